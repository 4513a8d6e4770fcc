//! Read-only dashboard aggregates.
//!
//! Counts are computed client-side from the list endpoints; the backend
//! has no dedicated summary endpoint.

use crate::dossier_detail::upcoming_consultations;
use crate::toast::Toast;
use cpn_client::models::CpnRecord;
use cpn_client::ApiClient;
use cpn_types::IsoDate;

/// The numbers the dashboard tiles show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub dossier_count: usize,
    pub user_count: usize,
    pub cpn_count: usize,
    pub upcoming_visit_count: usize,
}

/// State behind the admin and doctor dashboards.
#[derive(Debug, Default)]
pub struct DashboardView {
    loading: bool,
    summary: DashboardSummary,
    toast: Option<Toast>,
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every list the tiles aggregate over, concurrently. A failed
    /// list contributes zero to its tiles rather than failing the screen.
    pub async fn load(&mut self, client: &ApiClient, today: IsoDate) {
        self.loading = true;
        let (dossiers, users, cpns) = tokio::join!(
            client.fetch_dossiers(None),
            client.fetch_all_users(),
            client.fetch_all_cpns()
        );

        let cpn_records: Vec<CpnRecord> = match cpns {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, "failed to load CPN records for dashboard");
                Vec::new()
            }
        };
        if dossiers.is_err() || users.is_err() {
            self.toast = Some(Toast::error("some dashboard figures could not be loaded"));
        }

        self.summary = DashboardSummary {
            dossier_count: dossiers.map(|d| d.len()).unwrap_or(0),
            user_count: users.map(|u| u.len()).unwrap_or(0),
            cpn_count: cpn_records.len(),
            upcoming_visit_count: upcoming_consultations(&cpn_records, today).len(),
        };
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn summary(&self) -> DashboardSummary {
        self.summary
    }

    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }
}
