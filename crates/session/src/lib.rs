//! Session and authorization support for the CPN client.
//!
//! This crate owns everything identity-shaped on the client side:
//! - decoding the bearer token's claims ([`claims`]); the server signs and
//!   verifies tokens, the client only reads what is inside;
//! - deriving the user's [`role::Role`] and permissions;
//! - the [`store::Session`] with its two mutation entry points (`login`,
//!   `logout`) behind a pluggable [`store::TokenStorage`];
//! - [`guard`] decisions for role- and permission-gated navigation.
//!
//! **No transport concerns**: attaching the token to requests and reacting
//! to 401 responses is `cpn-client`'s job; it does so through the one
//! shared session object rather than reading storage directly.

pub mod claims;
pub mod guard;
pub mod role;
pub mod store;

pub use claims::{decode_claims, Permission, TokenClaims};
pub use guard::{authorize, RequiredPermission, RouteDecision};
pub use role::Role;
pub use store::{MemoryTokenStorage, Session, SharedSession, TokenStorage};

/// Errors returned by the session crate.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("malformed token: expected three dot-separated segments")]
    MalformedToken,

    #[error("token payload is not valid base64url: {0}")]
    PayloadEncoding(#[from] base64::DecodeError),

    #[error("token payload is not valid claims JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),
}
