//! Role reference data.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A role a user is associated with.
///
/// Roles are pre-existing reference data; users point at them by `id`.
/// Equality compares both `id` and `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    /// Identifier, unset until the role is persisted
    pub id: Option<i32>,
    pub name: String,
}

impl Role {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }

    /// Identifier used to associate the role with a user.
    pub fn reference_id(&self) -> DomainResult<i32> {
        self.id
            .ok_or_else(|| DomainError::validation("role id must be set"))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "Role [id={}, name={}]", id, self.name),
            None => write!(f, "Role [id=null, name={}]", self.name),
        }
    }
}
