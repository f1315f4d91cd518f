//! Migration: Create roles reference table and seed it.

use sea_orm_migration::prelude::*;

use domain::SEEDED_ROLES;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Roles::Id).integer().not_null().primary_key())
                    .col(ColumnDef::new(Roles::Name).string_len(255).not_null())
                    .to_owned(),
            )
            .await?;

        let mut seed = Query::insert();
        seed.into_table(Roles::Table).columns([Roles::Id, Roles::Name]);
        for (id, name) in SEEDED_ROLES {
            seed.values_panic([(*id).into(), (*name).into()]);
        }

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Roles {
    Table,
    Id,
    Name,
}
