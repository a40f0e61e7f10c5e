//! Caller identity for the HTTP layer.
//!
//! Authorization here is the caller's responsibility: identity and role
//! arrive as explicit request headers set by the fronting gateway, and
//! handlers pass them into the core operations. There is no ambient
//! session state.

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpRequest};

use crate::errors::{AppError, AppResult};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Student,
    Ta,
    Faculty,
    Admin,
}

impl Role {
    /// Unrecognized or missing roles fall back to the least-privileged
    /// one.
    fn parse(value: &str) -> Role {
        match value.trim().to_uppercase().as_str() {
            "ADMIN" => Role::Admin,
            "FACULTY" => Role::Faculty,
            "TA" => Role::Ta,
            _ => Role::Student,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CallerIdentity {
    pub user_id: String,
    pub role: Role,
}

impl CallerIdentity {
    pub fn is_privileged(&self) -> bool {
        matches!(self.role, Role::Faculty | Role::Admin)
    }
}

impl FromRequest for CallerIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user_id = req
            .headers()
            .get(USER_ID_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Unauthorized("missing x-user-id header".to_string()));

        let role = req
            .headers()
            .get(USER_ROLE_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(Role::parse)
            .unwrap_or(Role::Student);

        ready(user_id.map(|user_id| CallerIdentity { user_id, role }))
    }
}

/// Guards a faculty-only resource.
pub fn require_faculty(caller: &CallerIdentity) -> AppResult<()> {
    if caller.is_privileged() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "only faculty can access this resource".to_string(),
        ))
    }
}

/// Guards a resource owned by a specific user; faculty may also pass.
pub fn require_owner_or_faculty(caller: &CallerIdentity, owner_id: &str) -> AppResult<()> {
    if caller.user_id == owner_id || caller.is_privileged() {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "this resource belongs to another user".to_string(),
        ))
    }
}
