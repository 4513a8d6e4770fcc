//! # CPN Forms
//!
//! The dynamic antecedent-form engine for prenatal consultation (CPN)
//! records, plus the antenatal visit planner and the admin-side definition
//! editor.
//!
//! The engine is schema-driven: the server describes groups of typed fields
//! ([`AntecedentBlock`]), and this crate turns them into widget behaviors,
//! coerces and validates what the user entered, and assembles the typed
//! submission payload. It performs no I/O: hosts fetch the schema and
//! submit the payload, feeding results back into the [`CpnForm`] state
//! machine with the tickets it hands out.
//!
//! **No transport concerns**: HTTP, sessions and endpoints belong in
//! `cpn-client` and `cpn-session`.

pub mod coerce;
pub mod editor;
pub mod form;
pub mod payload;
pub mod planner;
pub mod schema;
pub mod validate;
pub mod values;
pub mod widget;

pub use coerce::{coerce, is_missing, TypedValue};
pub use form::{CpnForm, FormPhase, LoadTicket, SubmitBlocked, SubmitTicket};
pub use payload::{assemble, AntecedentValues, CpnSubmissionPayload};
pub use schema::{AntecedentBlock, FieldConstraints, FieldDefinition, FieldType};
pub use validate::{validate, ErrorKey, ValidationReport};
pub use values::{RawValue, ValueMap};
pub use widget::{widget_for, WidgetSpec};
