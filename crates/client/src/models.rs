//! Wire DTOs for the clinic backend.
//!
//! Field names follow the backend's JSON contract (serde renames where the
//! wire key differs from idiomatic Rust). Everything the server might omit
//! is an `Option` with a default so a sparser payload never fails the whole
//! screen.

use cpn_types::{DossierId, PatientId, RoleId, UserId};
use serde::{Deserialize, Serialize};

/// A patient's administrative folder. Creating a patient creates its
/// dossier server-side; there is no separate dossier-creation call.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Dossier {
    #[serde(rename = "dossierID")]
    pub dossier_id: DossierId,
    /// Human-readable folder code, e.g. `DOS-2025-0042`.
    #[serde(rename = "uniqueID", default)]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub patient: Option<Patient>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Patient {
    #[serde(rename = "patientId")]
    pub patient_id: PatientId,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(rename = "birthDate", default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(rename = "maritalStatus", default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl Patient {
    /// First and last name joined for display, skipping whichever is
    /// missing.
    pub fn full_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Request body for creating a patient (and thereby a dossier).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PatientDraft {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub gender: String,
    #[serde(rename = "birthDate")]
    pub birth_date: String,
    pub address: String,
    #[serde(rename = "maritalStatus")]
    pub marital_status: String,
    pub nationality: String,
}

impl PatientDraft {
    /// An empty draft with the clinic's default gender preselected; the
    /// field stays user-editable.
    pub fn new() -> Self {
        Self {
            gender: "F".to_owned(),
            ..Self::default()
        }
    }
}

/// A created prenatal consultation form with its planned visits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CpnRecord {
    pub id: i64,
    #[serde(rename = "patientResponse", default)]
    pub patient: Option<Patient>,
    #[serde(rename = "giveBirthExpectedDate", default)]
    pub expected_birth_date: Option<String>,
    #[serde(default)]
    pub consultations: Vec<Consultation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Consultation {
    pub id: i64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(rename = "examenTypeResponses", default)]
    pub exam_results: Vec<ExamResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExamResult {
    #[serde(rename = "resultId")]
    pub result_id: i64,
    #[serde(rename = "champ", default)]
    pub field: Option<String>,
    #[serde(rename = "valeur", default)]
    pub value: Option<String>,
    #[serde(rename = "examen", default)]
    pub exam: Option<Exam>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Exam {
    pub id: i64,
    #[serde(rename = "nom", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "userID")]
    pub user_id: UserId,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "isEnabled", default)]
    pub is_enabled: bool,
    #[serde(default)]
    pub roles: Vec<UserRole>,
    #[serde(rename = "lastLogin", default)]
    pub last_login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserRole {
    #[serde(rename = "roleID")]
    pub role_id: RoleId,
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "passWord")]
    pub pass_word: String,
    #[serde(rename = "userRoleIds")]
    pub user_role_ids: Vec<RoleId>,
}

/// A role as listed by the roles endpoint.
///
/// The id key has changed name across backend versions and was missing in
/// some of them, so every historical spelling is accepted and the id stays
/// optional; user creation requires it and must refuse roles without one.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RoleSummary {
    #[serde(
        rename = "roleID",
        alias = "id",
        alias = "roleId",
        alias = "userRoleID",
        default
    )]
    pub role_id: Option<RoleId>,
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(default)]
    pub description: Option<String>,
}
