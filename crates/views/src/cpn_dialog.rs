//! Host controller for the CPN creation dialog.
//!
//! Wires the pure form engine to the HTTP client: opening fetches the
//! OBSTETRICS schema and feeds it back with the engine's ticket, submitting
//! assembles the payload, performs the two-step create and reports the
//! outcome. All stale-response discipline lives in the engine; this host
//! only moves results across.

use cpn_client::models::CpnRecord;
use cpn_client::{ApiClient, ApiError};
use cpn_forms::{CpnForm, SubmitBlocked};
use cpn_types::PatientId;

/// The antecedent category a CPN form edits.
pub const CPN_ANTECEDENT_TYPE: &str = "OBSTETRICS";

/// What came of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The record was created; the form has closed itself.
    Created(CpnRecord),
    /// Client-side validation failed; errors are on the form.
    Invalid(usize),
    /// The network call failed; the form stays open and populated.
    Failed(String),
    /// The session expired mid-call; form state is lost by design.
    SessionExpired,
    /// The form was closed or reopened while the call was in flight; the
    /// result was discarded.
    Discarded,
    /// Submission was not possible in the current phase.
    NotReady,
}

/// One CPN dialog instance.
#[derive(Default)]
pub struct CpnDialogHost {
    form: CpnForm,
}

impl CpnDialogHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for a patient and loads the antecedent schema.
    /// Schema failures degrade inside the engine (empty blocks plus a
    /// standing notice); this method never fails the open itself.
    pub async fn open(&mut self, client: &ApiClient, patient_id: Option<PatientId>) {
        let ticket = self.form.open(patient_id);
        let result = client
            .fetch_antecedent_blocks(Some(CPN_ANTECEDENT_TYPE))
            .await
            .map_err(|e| e.to_string());
        self.form.schema_loaded(ticket, result);
    }

    /// The engine state the host UI binds widgets and errors to.
    pub fn form(&self) -> &CpnForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CpnForm {
        &mut self.form
    }

    /// Validates, submits, and settles the form according to the result.
    pub async fn submit(&mut self, client: &ApiClient) -> SubmitOutcome {
        let (ticket, payload) = match self.form.begin_submit() {
            Ok(parts) => parts,
            Err(SubmitBlocked::ValidationFailed(count)) => return SubmitOutcome::Invalid(count),
            Err(SubmitBlocked::NotReady) => return SubmitOutcome::NotReady,
        };

        match client.create_cpn(&payload).await {
            Ok(record) => {
                if self.form.submit_succeeded(ticket) {
                    SubmitOutcome::Created(record)
                } else {
                    SubmitOutcome::Discarded
                }
            }
            Err(ApiError::Unauthorized) => {
                // The adapter has already cleared the session; there is no
                // form to come back to.
                self.form.close();
                SubmitOutcome::SessionExpired
            }
            Err(error) => {
                let message = error.to_string();
                if self.form.submit_failed(ticket, message.clone()) {
                    SubmitOutcome::Failed(message)
                } else {
                    SubmitOutcome::Discarded
                }
            }
        }
    }

    /// Cancels the dialog; any in-flight call's result will be discarded.
    pub fn close(&mut self) {
        self.form.close();
    }
}
