//! # Access Context
//!
//! The `(user_id, is_privileged)` pair carried with each call into the
//! lifecycle core. The core trusts it as given.

use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtManager, Role};

/// Identity and privilege of the caller
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessContext {
    /// Authenticated user's id (None if anonymous)
    pub user_id: Option<Uuid>,

    /// Whether the caller holds elevated privilege
    pub is_admin: bool,
}

impl AccessContext {
    /// Context for an anonymous caller
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Context for an authenticated member
    pub fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: false,
        }
    }

    /// Context for a privileged moderator
    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            is_admin: true,
        }
    }

    /// The user id, or an error for anonymous callers
    pub fn require_user_id(&self) -> AuthResult<Uuid> {
        self.user_id.ok_or(AuthError::MissingToken)
    }

    /// Build a context from an `Authorization: Bearer` header value.
    ///
    /// Absent or invalid tokens degrade to anonymous; public reads must not
    /// fail on a stale token.
    pub fn from_bearer(jwt: &JwtManager, header: Option<&str>) -> Self {
        let token = match header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) => token,
            None => return Self::anonymous(),
        };

        match jwt.validate_token(token) {
            Ok(claims) => match JwtManager::user_id(&claims) {
                Ok(user_id) => Self {
                    user_id: Some(user_id),
                    is_admin: claims.role == Role::Admin,
                },
                Err(_) => Self::anonymous(),
            },
            Err(_) => Self::anonymous(),
        }
    }
}
