//! # CPN Views
//!
//! View-model state for the client's screens. Each view struct owns what
//! the corresponding screen renders (loading flags, loaded data, toasts)
//! and exposes async `load`/`submit` methods that call through the shared
//! [`cpn_client::ApiClient`]. Rendering itself belongs to the host UI; the
//! structs here are what it binds to.

pub mod cpn_dialog;
pub mod dashboard;
pub mod dossier_detail;
pub mod dossier_list;
pub mod login;
pub mod toast;
pub mod users_admin;

pub use cpn_dialog::{CpnDialogHost, SubmitOutcome};
pub use toast::{Severity, Toast};
