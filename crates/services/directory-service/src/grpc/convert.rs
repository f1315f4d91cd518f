//! Conversions between domain entities and their protobuf form.
//!
//! Absent IDs stay absent on the wire (`optional int32`), so a user that
//! was never persisted cannot be confused with one whose ID is `0`.

use chrono::NaiveDate;

use common::{AppError, AppResult};
use domain::{Role, User, BIRTH_DAY_FORMAT};
use proto::directory as pb;

/// Convert domain Role to proto Role.
pub fn role_to_proto(role: &Role) -> pb::Role {
    pb::Role {
        id: role.id,
        name: role.name.clone(),
    }
}

/// Convert proto Role to domain Role.
pub fn proto_to_role(role: pb::Role) -> Role {
    Role {
        id: role.id,
        name: role.name,
    }
}

/// Convert domain User to proto User.
pub fn user_to_proto(user: &User) -> pb::User {
    pb::User {
        id: user.id,
        login: user.login.clone(),
        password: user.password.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        birth_day: user.birth_day.format(BIRTH_DAY_FORMAT).to_string(),
        role: Some(role_to_proto(&user.role)),
    }
}

/// Convert proto User to domain User.
pub fn proto_to_user(user: pb::User) -> AppResult<User> {
    let birth_day = NaiveDate::parse_from_str(&user.birth_day, BIRTH_DAY_FORMAT)
        .map_err(|_| AppError::validation("birth_day must be a YYYY-MM-DD date"))?;
    let role = user
        .role
        .map(proto_to_role)
        .ok_or_else(|| AppError::validation("role is required"))?;

    Ok(User {
        id: user.id,
        login: user.login,
        password: user.password,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        birth_day,
        role,
    })
}

/// Extract the user carried by a request.
pub fn required_user(user: Option<pb::User>) -> AppResult<User> {
    user.map(proto_to_user)
        .unwrap_or_else(|| Err(AppError::validation("user is required")))
}

/// Extract the ID of the user a remove request targets.
///
/// Only the ID is read; the remaining fields may be left at their defaults.
pub fn removal_id(user: Option<pb::User>) -> AppResult<i32> {
    user.and_then(|u| u.id)
        .ok_or_else(|| AppError::validation("user id must be set"))
}
