//! Raw widget state for one form instance.
//!
//! Values are keyed by `(block id, field code)` and live only as long as the
//! form is open. Absence is an explicit [`RawValue::Absent`] variant so that
//! "not yet answered" never collapses into `false`, `0` or `""` downstream.

use crate::schema::{AntecedentBlock, FieldType};
use cpn_types::AntecedentId;
use std::collections::HashMap;

/// What a widget currently holds, before any typing or validation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    /// Never touched by the user.
    Absent,
    /// Text-like inputs: TEXT, DATE, ENUM and the string form of numbers.
    Text(String),
    /// BOOLEAN toggle state.
    Flag(bool),
    /// MULTI_ENUM selection; always a list, possibly empty.
    List(Vec<String>),
}

impl RawValue {
    /// The initial placeholder for a field of the given type: an empty list
    /// for MULTI_ENUM, explicit absence for everything else.
    pub fn initial_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::MultiEnum => Self::List(Vec::new()),
            _ => Self::Absent,
        }
    }
}

/// All raw values of one form instance.
#[derive(Debug, Clone, Default)]
pub struct ValueMap {
    slots: HashMap<AntecedentId, HashMap<String, RawValue>>,
}

impl ValueMap {
    /// An initialized map with one placeholder slot per field, so the
    /// renderer and validator never see an undefined slot.
    pub fn initialized(blocks: &[AntecedentBlock]) -> Self {
        let mut slots = HashMap::new();
        for block in blocks {
            let entry: &mut HashMap<String, RawValue> = slots.entry(block.id).or_default();
            for field in block.sorted_fields() {
                entry.insert(field.code.clone(), RawValue::initial_for(field.field_type));
            }
        }
        Self { slots }
    }

    /// Writes one field's value. Widgets only ever write their own slot.
    pub fn set(&mut self, antecedent_id: AntecedentId, field_code: &str, value: RawValue) {
        self.slots
            .entry(antecedent_id)
            .or_default()
            .insert(field_code.to_owned(), value);
    }

    /// Reads one field's value, absent when the slot was never created.
    pub fn get(&self, antecedent_id: AntecedentId, field_code: &str) -> &RawValue {
        self.slots
            .get(&antecedent_id)
            .and_then(|fields| fields.get(field_code))
            .unwrap_or(&RawValue::Absent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldConstraints, FieldDefinition};
    use serde_json::Map;

    fn field(code: &str, field_type: FieldType) -> FieldDefinition {
        FieldDefinition {
            id: None,
            code: code.into(),
            label: code.into(),
            field_type,
            required: false,
            display_order: None,
            constraints: FieldConstraints::default(),
            ui: Map::new(),
        }
    }

    fn block(id: AntecedentId, fields: Vec<FieldDefinition>) -> AntecedentBlock {
        AntecedentBlock {
            id,
            code: format!("B{id}"),
            name: format!("Block {id}"),
            description: None,
            antecedent_type: "OBSTETRICS".into(),
            active: Some(true),
            fields,
        }
    }

    #[test]
    fn test_initialized_map_gives_every_field_a_slot() {
        let blocks = vec![block(
            7,
            vec![field("flag", FieldType::Boolean), field("tags", FieldType::MultiEnum)],
        )];
        let map = ValueMap::initialized(&blocks);
        assert_eq!(map.get(7, "flag"), &RawValue::Absent);
        assert_eq!(map.get(7, "tags"), &RawValue::List(Vec::new()));
    }

    #[test]
    fn test_set_overwrites_only_the_target_slot() {
        let blocks = vec![block(
            1,
            vec![field("a", FieldType::Text), field("b", FieldType::Text)],
        )];
        let mut map = ValueMap::initialized(&blocks);
        map.set(1, "a", RawValue::Text("hello".into()));
        assert_eq!(map.get(1, "a"), &RawValue::Text("hello".into()));
        assert_eq!(map.get(1, "b"), &RawValue::Absent);
    }

    #[test]
    fn test_unknown_slot_reads_as_absent() {
        let map = ValueMap::default();
        assert_eq!(map.get(99, "nope"), &RawValue::Absent);
    }
}
