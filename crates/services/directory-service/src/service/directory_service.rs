//! Directory service - User CRUD with login/email uniqueness.
//!
//! SOLID (SRP): Handles user directory use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use common::{AppError, AppResult, OptionExt};
use domain::User;

use crate::repository::UserRepository;

/// Directory service trait for dependency injection.
///
/// Lookups are total: a missing user is `Ok(None)`, never an error.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Persist a new user. `user.id` must be unset.
    async fn create(&self, user: User) -> AppResult<User>;

    /// Find user by login
    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>>;

    /// List all persisted users
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Replace every mutable field of an existing user
    async fn update(&self, user: User) -> AppResult<User>;

    /// Delete the user with this ID; unknown IDs are a no-op
    async fn remove(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of UserDirectory using repository.
pub struct DirectoryManager {
    repo: Arc<dyn UserRepository>,
}

impl DirectoryManager {
    /// Create new directory service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Reject a role reference that does not match the stored reference data.
    async fn ensure_role_exists(&self, user: &User) -> AppResult<()> {
        let role_id = user.role.reference_id()?;
        let stored = self
            .repo
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::validation(format!("Role {} does not exist", role_id)))?;

        if stored.name != user.role.name {
            warn!(role_id, name = %user.role.name, "Role name mismatch");
            return Err(AppError::validation(format!(
                "Role {} is not named {}",
                role_id, user.role.name
            )));
        }
        Ok(())
    }

    /// Fail with a conflict when `login` or `email` belongs to a user other
    /// than `owner`.
    async fn ensure_unique(&self, user: &User, owner: Option<i32>) -> AppResult<()> {
        if let Some(existing) = self.repo.find_by_login(&user.login).await? {
            if existing.id != owner {
                warn!(login = %user.login, "Login already taken");
                return Err(AppError::conflict("Login"));
            }
        }

        if let Some(existing) = self.repo.find_by_email(&user.email).await? {
            if existing.id != owner {
                warn!(email = %user.email, "Email already taken");
                return Err(AppError::conflict("Email"));
            }
        }

        Ok(())
    }
}

#[async_trait]
impl UserDirectory for DirectoryManager {
    async fn create(&self, user: User) -> AppResult<User> {
        if user.is_persisted() {
            return Err(AppError::validation("id must be unset when creating a user"));
        }
        user.check()?;
        self.ensure_role_exists(&user).await?;
        self.ensure_unique(&user, None).await?;

        let created = self.repo.create(&user).await?;
        info!(id = ?created.id, login = %created.login, "User created");
        Ok(created)
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<User>> {
        debug!(login = %login, "Looking up user by login");
        self.repo.find_by_login(login).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        debug!(email = %email, "Looking up user by email");
        self.repo.find_by_email(email).await
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        debug!(id, "Looking up user by id");
        self.repo.find_by_id(id).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update(&self, user: User) -> AppResult<User> {
        let id = user.persisted_id()?;
        user.check()?;
        self.repo.find_by_id(id).await?.ok_or_not_found()?;
        self.ensure_role_exists(&user).await?;
        self.ensure_unique(&user, Some(id)).await?;

        let updated = self.repo.replace(&user).await?;
        info!(id, login = %updated.login, "User updated");
        Ok(updated)
    }

    async fn remove(&self, id: i32) -> AppResult<()> {
        if self.repo.delete(id).await? {
            info!(id, "User removed");
        } else {
            debug!(id, "Remove of unknown user ignored");
        }
        Ok(())
    }
}
