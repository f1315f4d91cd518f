//! Domain-level constants.
//!
//! These constants define reference data and wire formats.

// =============================================================================
// Reference Roles
// =============================================================================

/// Identifier of the seeded administrator role
pub const ROLE_ADMIN_ID: i32 = 1;

/// Name of the seeded administrator role
pub const ROLE_ADMIN: &str = "Admin";

/// Identifier of the seeded regular user role
pub const ROLE_USER_ID: i32 = 2;

/// Name of the seeded regular user role
pub const ROLE_USER: &str = "User";

/// Roles present in every freshly migrated store
pub const SEEDED_ROLES: &[(i32, &str)] = &[(ROLE_ADMIN_ID, ROLE_ADMIN), (ROLE_USER_ID, ROLE_USER)];

// =============================================================================
// Formatting
// =============================================================================

/// Calendar date format used for `birth_day` on the wire
pub const BIRTH_DAY_FORMAT: &str = "%Y-%m-%d";
