//! User domain entity and related types.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::BIRTH_DAY_FORMAT;
use crate::error::{DomainError, DomainResult};
use crate::role::Role;

/// User domain entity
///
/// `id` is assigned by the directory on creation and never changes afterwards.
/// `login` and `email` are unique across all persisted users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<i32>,
    #[validate(length(min = 1, max = 255))]
    pub login: String,
    /// Stored as given
    #[validate(length(max = 255))]
    pub password: String,
    #[validate(email, length(min = 1, max = 255))]
    pub email: String,
    #[validate(length(max = 255))]
    pub first_name: String,
    #[validate(length(max = 255))]
    pub last_name: String,
    pub birth_day: NaiveDate,
    pub role: Role,
}

impl User {
    /// Create a user that has not been persisted yet.
    pub fn new(
        login: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_day: NaiveDate,
        role: Role,
    ) -> Self {
        Self {
            id: None,
            login: login.into(),
            password: password.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_day,
            role,
        }
    }

    /// Check if the directory has assigned an identifier
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Identifier of a persisted user, required for update and removal.
    pub fn persisted_id(&self) -> DomainResult<i32> {
        self.id
            .ok_or_else(|| DomainError::validation("user id must be set"))
    }

    /// Run field-level validation (lengths, email syntax).
    pub fn check(&self) -> DomainResult<()> {
        self.validate().map_err(DomainError::from)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "null".to_string());
        write!(
            f,
            "User [id={}, login={}, email={}, firstName={}, lastName={}, birthDay={}, role={}]",
            id,
            self.login,
            self.email,
            self.first_name,
            self.last_name,
            self.birth_day.format(BIRTH_DAY_FORMAT),
            self.role
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            "testLogin",
            "Q!q1q1",
            "testEmail@mail.ru",
            "First Name",
            "Last Name",
            NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
            Role::new(1, "Admin"),
        )
    }

    #[test]
    fn test_new_user_is_not_persisted() {
        let user = sample_user();
        assert!(!user.is_persisted());
        assert!(matches!(
            user.persisted_id(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_structural_equality() {
        let a = sample_user();
        let mut b = sample_user();
        assert_eq!(a, b);

        b.role = Role::new(2, "User");
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_hides_password() {
        let mut user = sample_user();
        user.id = Some(7);

        let text = user.to_string();
        assert_eq!(
            text,
            "User [id=7, login=testLogin, email=testEmail@mail.ru, firstName=First Name, \
             lastName=Last Name, birthDay=1990-05-17, role=Role [id=1, name=Admin]]"
        );
        assert!(!text.contains("Q!q1q1"));
    }

    #[test]
    fn test_check_rejects_bad_email() {
        let mut user = sample_user();
        assert!(user.check().is_ok());

        user.email = "not-an-email".to_string();
        let err = user.check().unwrap_err();
        assert!(matches!(err, DomainError::Validation(ref msg) if msg.contains("email")));
    }

    #[test]
    fn test_check_rejects_empty_login() {
        let mut user = sample_user();
        user.login = String::new();
        assert!(user.check().is_err());
    }

    #[test]
    fn test_serde_keeps_nested_role_and_absent_id() {
        let user = sample_user();
        let json = serde_json::to_value(&user).unwrap();

        assert!(json["id"].is_null());
        assert_eq!(json["firstName"], "First Name");
        assert_eq!(json["birthDay"], "1990-05-17");
        assert_eq!(json["role"]["name"], "Admin");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
