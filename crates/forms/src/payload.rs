//! Submission payload assembly.
//!
//! Only invoked on a clean validation report. For every block, every field
//! in display order is coerced; a field is included iff its coerced value is
//! present (and, for lists, non-empty). Wire keys follow the consultation
//! service's request contract.

use crate::coerce::{coerce, TypedValue};
use crate::schema::AntecedentBlock;
use crate::values::ValueMap;
use cpn_types::{AntecedentId, IsoDate, PatientId};
use serde::Serialize;
use std::collections::BTreeMap;

/// The typed values captured for one antecedent block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntecedentValues {
    #[serde(rename = "antecedentId")]
    pub antecedent_id: AntecedentId,
    pub values: BTreeMap<String, TypedValue>,
}

/// The complete CPN creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CpnSubmissionPayload {
    #[serde(rename = "patientID")]
    pub patient_id: PatientId,
    /// Wire key as exposed by the consultation service.
    #[serde(rename = "lastDYSmeNoRRheaDate")]
    pub lmp_date: IsoDate,
    #[serde(rename = "antecedentRequest")]
    pub antecedents: Vec<AntecedentValues>,
}

/// Assembles the submission payload from validated form state.
///
/// Every block contributes an entry, even when none of its fields were
/// answered; absent fields are simply left out of `values`.
pub fn assemble(
    blocks: &[AntecedentBlock],
    values: &ValueMap,
    patient_id: PatientId,
    lmp_date: IsoDate,
) -> CpnSubmissionPayload {
    let antecedents = blocks
        .iter()
        .map(|block| {
            let mut typed = BTreeMap::new();
            for field in block.sorted_fields() {
                let raw = values.get(block.id, &field.code);
                if let Some(value) = coerce(raw, field.field_type) {
                    typed.insert(field.code.clone(), value);
                }
            }
            AntecedentValues {
                antecedent_id: block.id,
                values: typed,
            }
        })
        .collect();

    CpnSubmissionPayload {
        patient_id,
        lmp_date,
        antecedents,
    }
}
