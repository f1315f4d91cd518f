//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The `User`/`Role` aggregate defined here is what crosses the gRPC boundary
//! after conversion in the service crate.

pub mod constants;
pub mod error;
pub mod role;
pub mod user;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use role::Role;
pub use user::User;
