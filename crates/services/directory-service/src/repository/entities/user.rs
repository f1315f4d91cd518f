//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::User;

use super::role;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub login: String,
    pub password: String,
    #[sea_orm(unique)]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_day: Date,
    pub role_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain aggregate from a user row and its role row.
    pub fn into_user(self, role: role::Model) -> User {
        User {
            id: Some(self.id),
            login: self.login,
            password: self.password,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            birth_day: self.birth_day,
            role: role.into(),
        }
    }
}
