//! Service layer - directory business rules.

mod directory_service;

pub use directory_service::{DirectoryManager, UserDirectory};
