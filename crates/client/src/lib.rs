//! # CPN Client
//!
//! Typed HTTP access to the clinic's REST backend.
//!
//! [`ApiClient`] is the one adapter every view goes through: it attaches
//! the bearer token from the shared session, serializes JSON bodies,
//! normalizes non-2xx responses into [`ApiError`], and on a 401 from any
//! endpoint expires the session so the host can redirect to login.
//!
//! Endpoint wrappers are grouped the way the backend groups its
//! controllers: [`auth`], [`dossiers`], [`antecedents`], [`cpn`],
//! [`admin`].
//!
//! **No UI concerns**: loading flags, toasts and navigation live in
//! `cpn-views`.

pub mod admin;
pub mod antecedents;
pub mod auth;
pub mod config;
pub mod cpn;
pub mod dossiers;
pub mod error;
pub mod http;
pub mod models;

pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use http::ApiClient;
