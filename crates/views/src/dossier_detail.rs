//! Dossier detail screen: patient header, CPN records, upcoming visits.

use crate::toast::Toast;
use cpn_client::models::{CpnRecord, Dossier};
use cpn_client::ApiClient;
use cpn_types::{IsoDate, PatientId};

/// State behind one open dossier.
#[derive(Debug, Default)]
pub struct DossierDetailView {
    loading: bool,
    dossier: Option<Dossier>,
    cpn_records: Vec<CpnRecord>,
    toast: Option<Toast>,
}

impl DossierDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the dossier and the CPN records for its patient. The two
    /// fetches run concurrently; either failing degrades its part of the
    /// screen instead of blanking the other.
    pub async fn load(&mut self, client: &ApiClient, unique_id: &str) {
        self.loading = true;
        let (dossier, cpns) = tokio::join!(
            client.fetch_dossier(unique_id),
            client.fetch_all_cpns()
        );

        self.dossier = match dossier {
            Ok(dossier) => Some(dossier),
            Err(error) => {
                tracing::warn!(%error, unique_id, "failed to load dossier");
                self.toast = Some(Toast::error(format!("failed to load dossier: {error}")));
                None
            }
        };

        let patient_id = self.patient_id();
        self.cpn_records = match cpns {
            Ok(records) => filter_by_patient(records, patient_id),
            Err(error) => {
                tracing::warn!(%error, "failed to load CPN records");
                Vec::new()
            }
        };
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dossier(&self) -> Option<&Dossier> {
        self.dossier.as_ref()
    }

    pub fn patient_id(&self) -> Option<PatientId> {
        self.dossier
            .as_ref()
            .and_then(|d| d.patient.as_ref())
            .map(|p| p.patient_id)
    }

    pub fn cpn_records(&self) -> &[CpnRecord] {
        &self.cpn_records
    }

    /// Planned consultations dated `today` or later, soonest first.
    pub fn upcoming_consultations(&self, today: IsoDate) -> Vec<IsoDate> {
        upcoming_consultations(&self.cpn_records, today)
    }

    /// Appends a record freshly created by the CPN dialog, so the list
    /// reflects it without a round-trip.
    pub fn record_created(&mut self, record: CpnRecord) {
        self.toast = Some(Toast::success("CPN record created"));
        self.cpn_records.push(record);
    }

    pub fn take_toast(&mut self) -> Option<Toast> {
        self.toast.take()
    }
}

fn filter_by_patient(records: Vec<CpnRecord>, patient_id: Option<PatientId>) -> Vec<CpnRecord> {
    match patient_id {
        Some(id) => records
            .into_iter()
            .filter(|r| r.patient.as_ref().is_some_and(|p| p.patient_id == id))
            .collect(),
        None => Vec::new(),
    }
}

/// Collects planned visit dates on or after `today` across the given CPN
/// records, ascending. Dates arrive as `yyyy-mm-dd` or full timestamps;
/// anything that does not start with a date is skipped.
pub fn upcoming_consultations(records: &[CpnRecord], today: IsoDate) -> Vec<IsoDate> {
    let mut dates: Vec<IsoDate> = records
        .iter()
        .flat_map(|r| r.consultations.iter())
        .filter_map(|c| c.date.as_deref())
        .filter_map(parse_visit_date)
        .filter(|d| *d >= today)
        .collect();
    dates.sort();
    dates
}

fn parse_visit_date(raw: &str) -> Option<IsoDate> {
    IsoDate::parse(raw.get(..10)?).ok()
}
