//! # Identity & Authorization
//!
//! The lifecycle core trusts `(user_id, is_admin)` as supplied per call; this
//! module produces that pair from Bearer tokens. Credential issuance (signup,
//! login, sessions) lives with an external collaborator — only validation and
//! an operator/test-facing mint path exist here.

pub mod context;
pub mod errors;
pub mod jwt;

pub use context::AccessContext;
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager, Role};
