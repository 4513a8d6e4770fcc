//! Dossier and patient endpoints.

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Dossier, Patient, PatientDraft};
use cpn_types::PatientId;

impl ApiClient {
    /// Lists dossiers (`GET /dossier`), optionally filtered server-side.
    pub async fn fetch_dossiers(&self, search: Option<&str>) -> ApiResult<Vec<Dossier>> {
        self.get_json("/dossier", &[("search", search.map(str::to_owned))])
            .await
    }

    /// Loads one dossier with its embedded patient by its folder code
    /// (`GET /dossier/{uniqueID}`).
    pub async fn fetch_dossier(&self, unique_id: &str) -> ApiResult<Dossier> {
        self.get_json(&format!("/dossier/{unique_id}"), &[]).await
    }

    /// Creates a patient; the backend creates the matching dossier in the
    /// same operation (`POST /patient`) and answers with a confirmation
    /// message, returned verbatim. Callers re-list to see the new folder.
    pub async fn create_patient(&self, draft: &PatientDraft) -> ApiResult<String> {
        self.post_text("/patient", draft).await
    }

    /// Loads one patient (`GET /patient/{patientID}`).
    pub async fn fetch_patient(&self, patient_id: PatientId) -> ApiResult<Patient> {
        self.get_json(&format!("/patient/{patient_id}"), &[]).await
    }
}
