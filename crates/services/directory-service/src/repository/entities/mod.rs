//! SeaORM entities backing the user directory.

pub mod role;
pub mod user;
