//! Antecedent form schema as served by the backend.
//!
//! A schema is a list of [`AntecedentBlock`]s, each a named group of typed
//! [`FieldDefinition`]s. The schema is read-only from the engine's point of
//! view: it is fetched every time a form opens and discarded on close.
//!
//! Key types:
//! - [`FieldType`]: closed set of the seven supported input types. Unknown
//!   wire values fall back to [`FieldType::Text`] rather than failing the
//!   whole schema.
//! - [`FieldConstraints`]: the free-form constraint bag with typed accessors
//!   interpreted per field type.

use cpn_types::AntecedentId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// The supported antecedent field input types.
///
/// This enum is deliberately *closed*: every concern that varies by field
/// type (widget selection, coercion, validation) is an exhaustive `match`
/// over it, so adding a type is a compile-checked edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Boolean,
    Integer,
    Decimal,
    Text,
    Date,
    Enum,
    MultiEnum,
}

impl FieldType {
    /// Maps a wire string to a field type.
    ///
    /// Unrecognized values degrade to [`FieldType::Text`], matching the
    /// server's forward-compatibility contract for new field types.
    pub fn from_wire(raw: &str) -> Self {
        match raw.to_ascii_uppercase().as_str() {
            "BOOLEAN" => Self::Boolean,
            "INTEGER" => Self::Integer,
            "DECIMAL" => Self::Decimal,
            "TEXT" => Self::Text,
            "DATE" => Self::Date,
            "ENUM" => Self::Enum,
            "MULTI_ENUM" => Self::MultiEnum,
            other => {
                tracing::debug!(field_type = other, "unknown field type, rendering as TEXT");
                Self::Text
            }
        }
    }

    /// The canonical wire name.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Boolean => "BOOLEAN",
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::Text => "TEXT",
            Self::Date => "DATE",
            Self::Enum => "ENUM",
            Self::MultiEnum => "MULTI_ENUM",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for FieldType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&s))
    }
}

/// Type-dependent constraint bag attached to a field definition.
///
/// The server stores constraints as free-form JSON (`{ "min": 0 }`,
/// `{ "options": ["A","B"] }`, …); the accessors below interpret the keys
/// the engine understands and ignore everything else.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldConstraints(pub Map<String, Value>);

impl FieldConstraints {
    /// Numeric lower bound, for INTEGER/DECIMAL fields.
    pub fn min_number(&self) -> Option<f64> {
        self.0.get("min").and_then(Value::as_f64)
    }

    /// Numeric upper bound, for INTEGER/DECIMAL fields.
    pub fn max_number(&self) -> Option<f64> {
        self.0.get("max").and_then(Value::as_f64)
    }

    /// Input step, for numeric fields.
    pub fn step(&self) -> Option<f64> {
        self.0.get("step").and_then(Value::as_f64)
    }

    /// Maximum raw length, for TEXT fields.
    pub fn max_length(&self) -> Option<usize> {
        self.0
            .get("maxLength")
            .and_then(Value::as_u64)
            .map(|n| n as usize)
    }

    /// Regex pattern hint, for TEXT fields. Not enforced by the engine.
    pub fn pattern(&self) -> Option<&str> {
        self.0.get("pattern").and_then(Value::as_str)
    }

    /// Earliest allowed date (`yyyy-mm-dd`), for DATE fields.
    pub fn min_date(&self) -> Option<&str> {
        self.0.get("min").and_then(Value::as_str)
    }

    /// Latest allowed date (`yyyy-mm-dd`), for DATE fields.
    pub fn max_date(&self) -> Option<&str> {
        self.0.get("max").and_then(Value::as_str)
    }

    /// Choice list for ENUM/MULTI_ENUM fields. Non-string entries are
    /// stringified the way the original renderer displayed them.
    pub fn options(&self) -> Vec<String> {
        match self.0.get("options") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// True when a non-empty options list is declared.
    pub fn has_options(&self) -> bool {
        matches!(self.0.get("options"), Some(Value::Array(items)) if !items.is_empty())
    }
}

/// One input within an antecedent block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default)]
    pub id: Option<i64>,
    /// Stable key, unique within the block; used as the key in the
    /// submission `values` object.
    pub code: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    /// Render position within the block; missing sorts as 0.
    #[serde(default, rename = "displayOrder")]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub constraints: FieldConstraints,
    /// Free-form display hints; carried but not interpreted by the engine.
    #[serde(default)]
    pub ui: Map<String, Value>,
}

/// A named, typed group of fields describing one clinical history category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntecedentBlock {
    pub id: AntecedentId,
    /// Human-readable identifier, unique within the schema.
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "antecedentType")]
    pub antecedent_type: String,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl AntecedentBlock {
    /// The block's fields in render order: stable ascending sort by
    /// `display_order` with missing values treated as 0, ties keeping
    /// their original relative position.
    pub fn sorted_fields(&self) -> Vec<&FieldDefinition> {
        let mut fields: Vec<&FieldDefinition> = self.fields.iter().collect();
        fields.sort_by_key(|f| f.display_order.unwrap_or(0));
        fields
    }

    /// Field codes that appear more than once in this block, in first-seen
    /// order. A non-empty result is a schema defect the validator reports
    /// against the offending fields.
    pub fn duplicate_field_codes(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for field in &self.fields {
            if !seen.insert(field.code.as_str()) && !dups.contains(&field.code.as_str()) {
                dups.push(field.code.as_str());
            }
        }
        dups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(code: &str, order: Option<i32>) -> FieldDefinition {
        FieldDefinition {
            id: None,
            code: code.into(),
            label: code.into(),
            field_type: FieldType::Text,
            required: false,
            display_order: order,
            constraints: FieldConstraints::default(),
            ui: Map::new(),
        }
    }

    fn block_with(fields: Vec<FieldDefinition>) -> AntecedentBlock {
        AntecedentBlock {
            id: 1,
            code: "B".into(),
            name: "Block".into(),
            description: None,
            antecedent_type: "OBSTETRICS".into(),
            active: Some(true),
            fields,
        }
    }

    #[test]
    fn test_field_type_wire_round_trip() {
        for raw in ["BOOLEAN", "INTEGER", "DECIMAL", "TEXT", "DATE", "ENUM", "MULTI_ENUM"] {
            assert_eq!(FieldType::from_wire(raw).as_wire(), raw);
        }
    }

    #[test]
    fn test_unknown_field_type_falls_back_to_text() {
        assert_eq!(FieldType::from_wire("SIGNATURE_PAD"), FieldType::Text);
        assert_eq!(FieldType::from_wire(""), FieldType::Text);
    }

    #[test]
    fn test_field_type_deserialize_is_case_insensitive() {
        let t: FieldType = serde_json::from_value(json!("multi_enum")).expect("deserializes");
        assert_eq!(t, FieldType::MultiEnum);
    }

    #[test]
    fn test_sorted_fields_missing_order_sorts_as_zero() {
        let block = block_with(vec![field("b", Some(1)), field("a", None)]);
        let codes: Vec<&str> = block.sorted_fields().iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "b"]);
    }

    #[test]
    fn test_sorted_fields_equal_order_keeps_original_sequence() {
        let block = block_with(vec![
            field("first", Some(2)),
            field("second", Some(2)),
            field("third", Some(1)),
        ]);
        let codes: Vec<&str> = block.sorted_fields().iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_duplicate_field_codes_reported_once() {
        let block = block_with(vec![field("x", None), field("y", None), field("x", None)]);
        assert_eq!(block.duplicate_field_codes(), vec!["x"]);
    }

    #[test]
    fn test_constraints_accessors_by_kind() {
        let c: FieldConstraints =
            serde_json::from_value(json!({ "min": 0, "max": 5, "step": 0.5 })).expect("bag");
        assert_eq!(c.min_number(), Some(0.0));
        assert_eq!(c.max_number(), Some(5.0));
        assert_eq!(c.step(), Some(0.5));
        assert_eq!(c.min_date(), None);

        let d: FieldConstraints =
            serde_json::from_value(json!({ "min": "2024-01-01", "max": "2024-12-31" }))
                .expect("bag");
        assert_eq!(d.min_date(), Some("2024-01-01"));
        assert_eq!(d.max_date(), Some("2024-12-31"));
        assert_eq!(d.min_number(), None);
    }

    #[test]
    fn test_constraints_options_stringify_non_strings() {
        let c: FieldConstraints =
            serde_json::from_value(json!({ "options": ["A", 2, true] })).expect("bag");
        assert_eq!(c.options(), vec!["A", "2", "true"]);
        assert!(c.has_options());
        assert!(!FieldConstraints::default().has_options());
    }

    #[test]
    fn test_block_deserializes_backend_shape() {
        let block: AntecedentBlock = serde_json::from_value(json!({
            "id": 2,
            "code": "PREV_PREGNANCIES",
            "name": "Previous pregnancies",
            "description": "Obstetric history",
            "antecedentType": "OBSTETRICS",
            "active": true,
            "fields": [{
                "id": 1,
                "code": "count",
                "label": "Number",
                "type": "INTEGER",
                "required": true,
                "displayOrder": 1,
                "constraints": { "min": 0 },
                "ui": {}
            }]
        }))
        .expect("block deserializes");
        assert_eq!(block.fields.len(), 1);
        assert_eq!(block.fields[0].field_type, FieldType::Integer);
        assert_eq!(block.fields[0].constraints.min_number(), Some(0.0));
    }
}
