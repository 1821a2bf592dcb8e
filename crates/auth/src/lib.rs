//! `fichaje-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it models
//! claims, roles, and the validation seam. Token decoding/signature checks
//! live with the transport layer behind the [`JwtValidator`] trait.

pub mod authorize;
pub mod claims;
pub mod roles;

pub use authorize::{require_admin, AuthzError};
pub use claims::{validate_claims, JwtClaims, JwtValidator, TokenValidationError};
pub use roles::Role;
