//! Dossier list screen: load, search, create.

use crate::toast::Toast;
use cpn_client::models::{Dossier, PatientDraft};
use cpn_client::ApiClient;

/// State behind the dossiers overview.
#[derive(Debug, Default)]
pub struct DossierListView {
    loading: bool,
    dossiers: Vec<Dossier>,
    search: String,
    toast: Option<Toast>,
}

impl DossierListView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the full dossier list. A failed load degrades to an empty
    /// list with an error toast; the screen stays usable.
    pub async fn load(&mut self, client: &ApiClient) {
        self.loading = true;
        match client.fetch_dossiers(None).await {
            Ok(dossiers) => self.dossiers = dossiers,
            Err(error) => {
                tracing::warn!(%error, "failed to load dossiers");
                self.dossiers.clear();
                self.toast = Some(Toast::error(format!("failed to load dossiers: {error}")));
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_owned();
    }

    /// Dossiers matching the current search, by patient name or folder
    /// code, case-insensitively. An empty search shows everything.
    pub fn visible(&self) -> Vec<&Dossier> {
        let needle = self.search.trim().to_lowercase();
        self.dossiers
            .iter()
            .filter(|d| needle.is_empty() || matches_search(d, &needle))
            .collect()
    }

    pub fn dossiers(&self) -> &[Dossier] {
        &self.dossiers
    }

    /// Takes the pending toast, if any, for the host to display.
    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }

    /// Validates and submits a new-patient draft; the backend creates the
    /// dossier alongside. On success the list is reloaded and a success
    /// toast queued. Returns the validation issues when the draft is
    /// incomplete.
    pub async fn submit_new_dossier(
        &mut self,
        client: &ApiClient,
        draft: &PatientDraft,
    ) -> Result<(), Vec<DraftIssue>> {
        let issues = validate_draft(draft);
        if !issues.is_empty() {
            return Err(issues);
        }
        match client.create_patient(draft).await {
            Ok(_) => {
                self.toast = Some(Toast::success("folder created successfully"));
                self.load(client).await;
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "failed to create patient");
                Err(vec![DraftIssue {
                    field: "form",
                    message: format!("failed to create folder: {error}"),
                }])
            }
        }
    }
}

/// One problem with a new-patient draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftIssue {
    pub field: &'static str,
    pub message: String,
}

/// First and last name are the only hard requirements; everything else on
/// the folder can be completed later.
pub fn validate_draft(draft: &PatientDraft) -> Vec<DraftIssue> {
    let mut issues = Vec::new();
    if draft.first_name.trim().is_empty() {
        issues.push(DraftIssue {
            field: "firstName",
            message: "first name is required".to_owned(),
        });
    }
    if draft.last_name.trim().is_empty() {
        issues.push(DraftIssue {
            field: "lastName",
            message: "last name is required".to_owned(),
        });
    }
    issues
}

fn matches_search(dossier: &Dossier, needle: &str) -> bool {
    if let Some(patient) = &dossier.patient {
        if patient.full_name().to_lowercase().contains(needle) {
            return true;
        }
    }
    dossier
        .unique_id
        .as_deref()
        .is_some_and(|id| id.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpn_client::models::Patient;

    fn dossier(unique_id: &str, first: &str, last: &str) -> Dossier {
        Dossier {
            dossier_id: 1,
            unique_id: Some(unique_id.to_owned()),
            patient: Some(Patient {
                patient_id: 1,
                first_name: Some(first.to_owned()),
                last_name: Some(last.to_owned()),
                email: None,
                phone_number: None,
                gender: Some("F".to_owned()),
                birth_date: None,
                address: None,
                marital_status: None,
                nationality: None,
            }),
        }
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let mut view = DossierListView::new();
        view.dossiers = vec![
            dossier("DOS-1", "Aissatou", "Diallo"),
            dossier("DOS-2", "Fatou", "Ndiaye"),
        ];
        view.set_search("diallo");
        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].unique_id.as_deref(), Some("DOS-1"));
    }

    #[test]
    fn test_search_matches_folder_code() {
        let mut view = DossierListView::new();
        view.dossiers = vec![dossier("DOS-2025-0042", "Aissatou", "Diallo")];
        view.set_search("2025-0042");
        assert_eq!(view.visible().len(), 1);
        view.set_search("nope");
        assert!(view.visible().is_empty());
    }

    #[test]
    fn test_empty_search_shows_everything() {
        let mut view = DossierListView::new();
        view.dossiers = vec![dossier("A", "a", "b"), dossier("B", "c", "d")];
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn test_draft_requires_first_and_last_name() {
        let mut draft = PatientDraft::new();
        let issues = validate_draft(&draft);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].field, "firstName");

        draft.first_name = "Aissatou".to_owned();
        draft.last_name = "Diallo".to_owned();
        assert!(validate_draft(&draft).is_empty());
    }
}
