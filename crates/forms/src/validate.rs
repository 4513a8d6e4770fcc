//! Client-side validation.
//!
//! Validation never stops a render: every rule violation is collected into a
//! [`ValidationReport`] keyed by field path, and the form is submittable iff
//! the report is empty. At most one message is kept per field; the first
//! rule to fire wins and later rules never overwrite it.

use crate::coerce::{coerce, is_missing, TypedValue};
use crate::schema::{AntecedentBlock, FieldDefinition, FieldType};
use crate::values::{RawValue, ValueMap};
use cpn_types::{AntecedentId, IsoDate, PatientId};
use std::collections::HashMap;
use std::fmt;

/// Where a validation message is anchored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKey {
    /// The target patient identifier, validated ahead of the blocks.
    Patient,
    /// The top-level last-menstrual-period date.
    LmpDate,
    /// One field within one block.
    Field {
        antecedent_id: AntecedentId,
        block_code: String,
        field_code: String,
    },
}

impl ErrorKey {
    pub fn field(block: &AntecedentBlock, field_code: &str) -> Self {
        Self::Field {
            antecedent_id: block.id,
            block_code: block.code.clone(),
            field_code: field_code.to_owned(),
        }
    }
}

impl fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => f.write_str("patient"),
            Self::LmpDate => f.write_str("lmpDate"),
            Self::Field {
                block_code,
                field_code,
                ..
            } => write!(f, "{block_code}.{field_code}"),
        }
    }
}

/// The collected violations of one validation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    errors: HashMap<ErrorKey, String>,
}

impl ValidationReport {
    /// Records a message unless the key already carries one.
    pub fn record(&mut self, key: ErrorKey, message: impl Into<String>) {
        self.errors.entry(key).or_insert_with(|| message.into());
    }

    /// True when no rule fired; the form may be submitted.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The message for one key, if any rule fired there.
    pub fn message(&self, key: &ErrorKey) -> Option<&str> {
        self.errors.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ErrorKey, &str)> {
        self.errors.iter().map(|(k, v)| (k, v.as_str()))
    }
}

/// Validates the whole form: top-level fields first, then every block field
/// in display order. All violations are collected; nothing short-circuits.
pub fn validate(
    blocks: &[AntecedentBlock],
    values: &ValueMap,
    patient: Option<PatientId>,
    lmp_raw: &str,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if patient.is_none() {
        report.record(ErrorKey::Patient, "patient is required");
    }
    if lmp_raw.is_empty() {
        report.record(ErrorKey::LmpDate, "date is required");
    } else if IsoDate::parse(lmp_raw).is_err() {
        report.record(ErrorKey::LmpDate, "invalid date, expected yyyy-mm-dd");
    }

    for block in blocks {
        for dup in block.duplicate_field_codes() {
            report.record(
                ErrorKey::field(block, dup),
                format!("duplicate field code \"{dup}\""),
            );
        }
        for field in block.sorted_fields() {
            let raw = values.get(block.id, &field.code);
            validate_field(&mut report, block, field, raw);
        }
    }

    report
}

fn validate_field(
    report: &mut ValidationReport,
    block: &AntecedentBlock,
    field: &FieldDefinition,
    raw: &RawValue,
) {
    let key = || ErrorKey::field(block, &field.code);

    if field.required && is_missing(raw, field.field_type) {
        report.record(key(), "field is required");
    }

    match field.field_type {
        FieldType::Integer | FieldType::Decimal => {
            let n = match coerce(raw, field.field_type) {
                Some(TypedValue::Int(n)) => Some(n as f64),
                Some(TypedValue::Decimal(n)) => Some(n),
                _ => None,
            };
            if let Some(n) = n {
                if let Some(min) = field.constraints.min_number() {
                    if n < min {
                        report.record(key(), format!("must be at least {min}"));
                    }
                }
                if let Some(max) = field.constraints.max_number() {
                    if n > max {
                        report.record(key(), format!("must be at most {max}"));
                    }
                }
            }
        }
        FieldType::Text => {
            if let (RawValue::Text(s), Some(cap)) = (raw, field.constraints.max_length()) {
                if s.chars().count() > cap {
                    report.record(key(), format!("at most {cap} characters"));
                }
            }
        }
        FieldType::Date => {
            if let RawValue::Text(s) = raw {
                if !s.is_empty() {
                    // ISO dates order correctly as strings.
                    if let Some(min) = field.constraints.min_date() {
                        if s.as_str() < min {
                            report.record(key(), format!("date must be on or after {min}"));
                        }
                    }
                    if let Some(max) = field.constraints.max_date() {
                        if s.as_str() > max {
                            report.record(key(), format!("date must be on or before {max}"));
                        }
                    }
                }
            }
        }
        FieldType::Enum | FieldType::MultiEnum => {
            if field.required && !field.constraints.has_options() {
                report.record(key(), "no options configured for this field");
            }
        }
        FieldType::Boolean => {}
    }
}
