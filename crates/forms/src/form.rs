//! Per-instance CPN form state machine.
//!
//! One [`CpnForm`] lives exactly as long as the dialog that hosts it:
//!
//! ```text
//! CLOSED -> LOADING_SCHEMA -> READY -> SUBMITTING -> SUCCESS -> CLOSED
//!                  |            ^          |
//!                  |            |          +-- FAILURE -> READY (state kept)
//!                  +------------+  (load failure: empty blocks + notice)
//! ```
//!
//! The engine performs no I/O itself. The host starts the schema fetch and
//! the submission call, and feeds results back with the ticket it was given;
//! tickets from a superseded open (reopen, close) no longer match and their
//! results are discarded. That is the whole stale-response guard; there is
//! no cancellation primitive to lean on.

use crate::payload::{assemble, CpnSubmissionPayload};
use crate::planner;
use crate::schema::AntecedentBlock;
use crate::validate::{validate, ValidationReport};
use crate::values::{RawValue, ValueMap};
use cpn_types::{AntecedentId, IsoDate, PatientId};

/// Lifecycle phase of one form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Closed,
    LoadingSchema,
    Ready,
    Submitting,
}

/// Identifies one schema fetch; results from a superseded fetch are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Identifies one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitTicket(u64);

/// Why a submission could not start.
#[derive(Debug, thiserror::Error)]
pub enum SubmitBlocked {
    #[error("form is not ready for submission")]
    NotReady,
    #[error("{0} validation error(s)")]
    ValidationFailed(usize),
}

/// State of one CPN creation dialog.
#[derive(Debug, Default)]
pub struct CpnForm {
    phase: Phase,
    /// Bumped on every open and close; tickets must match to take effect.
    seq: u64,
    patient_id: Option<PatientId>,
    lmp_raw: String,
    blocks: Vec<AntecedentBlock>,
    values: ValueMap,
    errors: ValidationReport,
    schema_notice: Option<String>,
    submit_error: Option<String>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum Phase {
    #[default]
    Closed,
    LoadingSchema,
    Ready,
    Submitting,
}

impl CpnForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        match self.phase {
            Phase::Closed => FormPhase::Closed,
            Phase::LoadingSchema => FormPhase::LoadingSchema,
            Phase::Ready => FormPhase::Ready,
            Phase::Submitting => FormPhase::Submitting,
        }
    }

    /// Opens the form for a patient and starts a fresh instance: all values,
    /// errors and notices from any previous open are discarded. The caller
    /// fetches the schema and reports back through [`CpnForm::schema_loaded`]
    /// with the returned ticket.
    pub fn open(&mut self, patient_id: Option<PatientId>) -> LoadTicket {
        self.seq += 1;
        self.patient_id = patient_id;
        self.lmp_raw.clear();
        self.blocks.clear();
        self.values = ValueMap::default();
        self.errors = ValidationReport::default();
        self.schema_notice = None;
        self.submit_error = None;
        self.phase = Phase::LoadingSchema;
        LoadTicket(self.seq)
    }

    /// Applies a schema fetch result. Returns `false` when the ticket is
    /// stale (the form was reopened or closed meanwhile); stale results are
    /// discarded without touching state.
    ///
    /// A failed fetch is not fatal: the form becomes ready with an empty
    /// block list and a standing notice, so the top-level fields stay
    /// usable.
    pub fn schema_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<AntecedentBlock>, String>,
    ) -> bool {
        if ticket.0 != self.seq || self.phase != Phase::LoadingSchema {
            tracing::debug!("discarding stale schema load result");
            return false;
        }
        match result {
            Ok(blocks) => {
                // Soft-disabled blocks are delivered but not rendered.
                self.blocks = blocks
                    .into_iter()
                    .filter(|b| b.active.unwrap_or(true))
                    .collect();
                self.values = ValueMap::initialized(&self.blocks);
                self.schema_notice = None;
            }
            Err(message) => {
                tracing::warn!(error = %message, "antecedent schema load failed, degrading");
                self.blocks.clear();
                self.values = ValueMap::default();
                self.schema_notice = Some("antecedent sections could not be loaded".to_owned());
            }
        }
        self.phase = Phase::Ready;
        true
    }

    /// Writes one field's raw value. Ignored outside the editing phase.
    pub fn set_field(&mut self, antecedent_id: AntecedentId, field_code: &str, value: RawValue) {
        if self.phase == Phase::Ready {
            self.values.set(antecedent_id, field_code, value);
        }
    }

    /// Sets the raw last-menstrual-period input (`yyyy-mm-dd` or partial).
    pub fn set_lmp(&mut self, raw: &str) {
        if self.phase == Phase::Ready {
            self.lmp_raw = raw.to_owned();
        }
    }

    pub fn lmp_raw(&self) -> &str {
        &self.lmp_raw
    }

    /// The LMP as a date, once the input parses.
    pub fn lmp_date(&self) -> Option<IsoDate> {
        IsoDate::parse(&self.lmp_raw).ok()
    }

    /// Estimated due date derived from the LMP input, for live display.
    pub fn estimated_due_date(&self) -> Option<IsoDate> {
        self.lmp_date()
            .and_then(|lmp| planner::estimated_due_date(lmp).ok())
    }

    pub fn blocks(&self) -> &[AntecedentBlock] {
        &self.blocks
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    /// Standing notice from a degraded schema load, if any.
    pub fn schema_notice(&self) -> Option<&str> {
        self.schema_notice.as_deref()
    }

    /// Form-level message from the last failed submission, if any.
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn patient_id(&self) -> Option<PatientId> {
        self.patient_id
    }

    /// Whether the submit action should be enabled at all.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Ready && self.patient_id.is_some()
    }

    /// Runs validation and stores the report. Returns `true` when clean.
    pub fn validate(&mut self) -> bool {
        self.errors = validate(&self.blocks, &self.values, self.patient_id, &self.lmp_raw);
        self.errors.is_clean()
    }

    /// Validates and, when clean, assembles the payload and enters the
    /// SUBMITTING phase. The caller performs the network call and reports
    /// back with the ticket; the submit trigger stays disabled meanwhile,
    /// making submission at-most-once per attempt.
    pub fn begin_submit(&mut self) -> Result<(SubmitTicket, CpnSubmissionPayload), SubmitBlocked> {
        if self.phase != Phase::Ready {
            return Err(SubmitBlocked::NotReady);
        }
        if !self.validate() {
            return Err(SubmitBlocked::ValidationFailed(self.errors.len()));
        }
        // A clean report guarantees both of these parse.
        let patient_id = self.patient_id.ok_or(SubmitBlocked::NotReady)?;
        let lmp = IsoDate::parse(&self.lmp_raw).map_err(|_| SubmitBlocked::NotReady)?;

        let payload = assemble(&self.blocks, &self.values, patient_id, lmp);
        self.submit_error = None;
        self.phase = Phase::Submitting;
        Ok((SubmitTicket(self.seq), payload))
    }

    /// Marks the in-flight submission as succeeded and closes the form.
    /// Returns `false` for stale tickets (form closed or reopened since).
    pub fn submit_succeeded(&mut self, ticket: SubmitTicket) -> bool {
        if ticket.0 != self.seq || self.phase != Phase::Submitting {
            tracing::debug!("discarding stale submission success");
            return false;
        }
        self.reset();
        true
    }

    /// Marks the in-flight submission as failed: back to READY with all
    /// entered values kept, so the user can retry without re-entering data.
    pub fn submit_failed(&mut self, ticket: SubmitTicket, message: impl Into<String>) -> bool {
        if ticket.0 != self.seq || self.phase != Phase::Submitting {
            tracing::debug!("discarding stale submission failure");
            return false;
        }
        self.submit_error = Some(message.into());
        self.phase = Phase::Ready;
        true
    }

    /// Closes the form, discarding all state. In-flight loads and
    /// submissions are not aborted, but their results no longer apply.
    pub fn close(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.seq += 1;
        self.phase = Phase::Closed;
        self.patient_id = None;
        self.lmp_raw.clear();
        self.blocks.clear();
        self.values = ValueMap::default();
        self.errors = ValidationReport::default();
        self.schema_notice = None;
        self.submit_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::TypedValue;
    use crate::schema::{FieldConstraints, FieldDefinition, FieldType};
    use crate::validate::ErrorKey;
    use serde_json::{json, Map};

    fn count_field() -> FieldDefinition {
        FieldDefinition {
            id: Some(1),
            code: "count".into(),
            label: "Number".into(),
            field_type: FieldType::Integer,
            required: true,
            display_order: Some(1),
            constraints: serde_json::from_value::<FieldConstraints>(json!({ "min": 0 }))
                .expect("bag"),
            ui: Map::new(),
        }
    }

    fn obstetrics_block() -> AntecedentBlock {
        AntecedentBlock {
            id: 2,
            code: "PREV_PREGNANCIES".into(),
            name: "Previous pregnancies".into(),
            description: None,
            antecedent_type: "OBSTETRICS".into(),
            active: Some(true),
            fields: vec![count_field()],
        }
    }

    fn ready_form() -> CpnForm {
        let mut form = CpnForm::new();
        let ticket = form.open(Some(41));
        assert!(form.schema_loaded(ticket, Ok(vec![obstetrics_block()])));
        form
    }

    #[test]
    fn test_open_resets_previous_state() {
        let mut form = ready_form();
        form.set_lmp("2025-01-01");
        form.set_field(2, "count", RawValue::Text("2".into()));

        let ticket = form.open(Some(41));
        assert_eq!(form.phase(), FormPhase::LoadingSchema);
        assert_eq!(form.lmp_raw(), "");
        assert!(form.schema_loaded(ticket, Ok(vec![obstetrics_block()])));
        assert_eq!(form.values().get(2, "count"), &RawValue::Absent);
    }

    #[test]
    fn test_stale_schema_load_is_discarded() {
        let mut form = CpnForm::new();
        let first = form.open(Some(41));
        // The user closes and reopens before the first fetch resolves.
        let second = form.open(Some(42));

        assert!(!form.schema_loaded(first, Ok(vec![obstetrics_block()])));
        assert!(form.blocks().is_empty());

        assert!(form.schema_loaded(second, Ok(vec![obstetrics_block()])));
        assert_eq!(form.blocks().len(), 1);
    }

    #[test]
    fn test_schema_load_failure_degrades_to_ready() {
        let mut form = CpnForm::new();
        let ticket = form.open(Some(41));
        assert!(form.schema_loaded(ticket, Err("boom".into())));
        assert_eq!(form.phase(), FormPhase::Ready);
        assert!(form.blocks().is_empty());
        assert!(form.schema_notice().is_some());
        // Top-level fields remain usable.
        form.set_lmp("2025-01-01");
        assert_eq!(form.lmp_raw(), "2025-01-01");
    }

    #[test]
    fn test_inactive_blocks_are_not_rendered() {
        let mut form = CpnForm::new();
        let ticket = form.open(Some(41));
        let mut disabled = obstetrics_block();
        disabled.id = 9;
        disabled.active = Some(false);
        assert!(form.schema_loaded(ticket, Ok(vec![obstetrics_block(), disabled])));
        assert_eq!(form.blocks().len(), 1);
    }

    #[test]
    fn test_empty_required_field_blocks_submission() {
        let mut form = ready_form();
        form.set_lmp("2025-01-01");
        let err = form.begin_submit().expect_err("must be blocked");
        assert!(matches!(err, SubmitBlocked::ValidationFailed(1)));
        assert_eq!(form.phase(), FormPhase::Ready);
        let key = ErrorKey::field(&obstetrics_block(), "count");
        assert_eq!(form.errors().message(&key), Some("field is required"));
    }

    #[test]
    fn test_successful_submit_carries_typed_payload() {
        let mut form = ready_form();
        form.set_lmp("2025-01-01");
        form.set_field(2, "count", RawValue::Text("2".into()));

        let (ticket, payload) = form.begin_submit().expect("clean form submits");
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert_eq!(payload.patient_id, 41);
        assert_eq!(
            payload.antecedents[0].values.get("count"),
            Some(&TypedValue::Int(2))
        );

        assert!(form.submit_succeeded(ticket));
        assert_eq!(form.phase(), FormPhase::Closed);
    }

    #[test]
    fn test_failed_submit_keeps_entered_values() {
        let mut form = ready_form();
        form.set_lmp("2025-01-01");
        form.set_field(2, "count", RawValue::Text("2".into()));

        let (ticket, _) = form.begin_submit().expect("submits");
        assert!(form.submit_failed(ticket, "server unavailable"));
        assert_eq!(form.phase(), FormPhase::Ready);
        assert_eq!(form.submit_error(), Some("server unavailable"));
        assert_eq!(form.values().get(2, "count"), &RawValue::Text("2".into()));
    }

    #[test]
    fn test_close_suppresses_late_submission_result() {
        let mut form = ready_form();
        form.set_lmp("2025-01-01");
        form.set_field(2, "count", RawValue::Text("2".into()));
        let (ticket, _) = form.begin_submit().expect("submits");

        form.close();
        assert!(!form.submit_succeeded(ticket));
        assert_eq!(form.phase(), FormPhase::Closed);
    }

    #[test]
    fn test_submission_is_at_most_once_per_attempt() {
        let mut form = ready_form();
        form.set_lmp("2025-01-01");
        form.set_field(2, "count", RawValue::Text("2".into()));
        let _ = form.begin_submit().expect("submits");
        // While SUBMITTING, another trigger is rejected.
        assert!(matches!(form.begin_submit(), Err(SubmitBlocked::NotReady)));
        assert!(!form.can_submit());
    }

    #[test]
    fn test_due_date_tracks_lmp_input() {
        let mut form = ready_form();
        assert_eq!(form.estimated_due_date(), None);
        form.set_lmp("2025-01-01");
        assert_eq!(
            form.estimated_due_date(),
            Some(IsoDate::parse("2025-10-08").expect("date"))
        );
    }
}
