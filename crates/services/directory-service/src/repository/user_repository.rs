//! User repository: the persistence collaborator of the directory.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, Unchanged,
};

use super::entities::role::{self, Entity as RoleEntity};
use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{Role, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Every read returns the full aggregate with its role resolved.
/// `login` and `email` are backed by unique indexes, so a duplicate that slips
/// past the service's pre-check still fails with `AppError::Conflict`.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// Find user by login
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Find user by email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List every persisted user
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Find reference role by ID
    async fn find_role(&self, id: i32) -> AppResult<Option<Role>>;

    /// Insert a new user; the store assigns the ID
    async fn create(&self, user: &User) -> AppResult<User>;

    /// Overwrite every field of the user identified by `user.id`
    async fn replace(&self, user: &User) -> AppResult<User>;

    /// Delete user by ID, returning whether a row was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository on SeaORM
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_role(&self, id: i32) -> AppResult<role::Model> {
        RoleEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::internal(format!("Role {} is missing", id)))
    }
}

fn assemble((user, role): (user::Model, Option<role::Model>)) -> AppResult<User> {
    let role = role.ok_or_else(|| {
        AppError::internal(format!(
            "User {} references missing role {}",
            user.id, user.role_id
        ))
    })?;
    Ok(user.into_user(role))
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        let row = UserEntity::find_by_id(id)
            .find_also_related(RoleEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        row.map(assemble).transpose()
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let row = UserEntity::find()
            .filter(user::Column::Login.eq(login))
            .find_also_related(RoleEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        row.map(assemble).transpose()
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .find_also_related(RoleEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        row.map(assemble).transpose()
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let rows = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .find_also_related(RoleEntity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        rows.into_iter().map(assemble).collect()
    }

    async fn find_role(&self, id: i32) -> AppResult<Option<Role>> {
        let model = RoleEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Role::from))
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            login: Set(user.login.clone()),
            password: Set(user.password.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            birth_day: Set(user.birth_day),
            role_id: Set(user.role.reference_id()?),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        let role = self.load_role(model.role_id).await?;
        Ok(model.into_user(role))
    }

    async fn replace(&self, user: &User) -> AppResult<User> {
        let active_model = ActiveModel {
            id: Unchanged(user.persisted_id()?),
            login: Set(user.login.clone()),
            password: Set(user.password.clone()),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            birth_day: Set(user.birth_day),
            role_id: Set(user.role.reference_id()?),
        };

        // Single UPDATE ... WHERE id = ?; no row means the user is gone
        let model = match active_model.update(&self.db).await {
            Ok(model) => model,
            Err(DbErr::RecordNotUpdated) | Err(DbErr::RecordNotFound(_)) => {
                return Err(AppError::NotFound)
            }
            Err(e) => return Err(AppError::from(e)),
        };
        let role = self.load_role(model.role_id).await?;
        Ok(model.into_user(role))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}
