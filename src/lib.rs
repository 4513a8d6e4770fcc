//! # CPN UI
//!
//! Client-side library for the prenatal-care clinic records application:
//! typed API access, session handling, route guarding, view-model state for
//! the screens, and the dynamic antecedent-form engine at the center of CPN
//! record creation.
//!
//! This is a facade crate: each concern lives in its own workspace member
//! and is re-exported here.
//!
//! - [`forms`]: the schema-driven form engine, visit planner and
//!   definition editor (`cpn-forms`).
//! - [`session`]: token claims, session store, role/permission guard
//!   (`cpn-session`).
//! - [`client`]: the HTTP adapter and endpoint wrappers (`cpn-client`).
//! - [`views`]: per-screen view-model state (`cpn-views`).
//! - [`types`]: shared validated primitives (`cpn-types`).

pub use cpn_client as client;
pub use cpn_forms as forms;
pub use cpn_session as session;
pub use cpn_types as types;
pub use cpn_views as views;
