//! Admin-side editing of antecedent block definitions.
//!
//! A [`DefinitionDraft`] is the mutable working copy behind the settings
//! dialog: fields can be appended, removed and reordered, and every
//! structural edit renumbers `displayOrder` contiguously from 1 so the
//! stored order always matches what the admin sees. A clean draft converts
//! into the create/update request for the definitions endpoint.

use crate::schema::{AntecedentBlock, FieldConstraints, FieldType};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// One field row in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub code: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub display_order: i32,
    pub constraints: FieldConstraints,
    pub ui: Map<String, Value>,
}

impl FieldDraft {
    fn empty(display_order: i32) -> Self {
        Self {
            code: String::new(),
            label: String::new(),
            field_type: FieldType::Text,
            required: false,
            display_order,
            constraints: FieldConstraints::default(),
            ui: Map::new(),
        }
    }

    /// Replaces the `ui` hints from editor text. Text that does not parse
    /// as a JSON object leaves the previous hints in place; returns whether
    /// the text was accepted.
    pub fn set_ui_from_text(&mut self, text: &str) -> bool {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => {
                self.ui = map;
                true
            }
            _ => false,
        }
    }
}

/// Where a draft problem is anchored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftKey {
    Code,
    Name,
    FieldCode(usize),
    FieldLabel(usize),
    FieldOptions(usize),
    DuplicateFieldCode(usize),
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code => f.write_str("code"),
            Self::Name => f.write_str("name"),
            Self::FieldCode(i) => write!(f, "field.{i}.code"),
            Self::FieldLabel(i) => write!(f, "field.{i}.label"),
            Self::FieldOptions(i) => write!(f, "field.{i}.options"),
            Self::DuplicateFieldCode(i) => write!(f, "field.{i}.code"),
        }
    }
}

/// One problem found while validating a draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftIssue {
    pub key: DraftKey,
    pub message: String,
}

/// The create/update request body for the definitions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct DefinitionRequest {
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "antecedentType")]
    pub antecedent_type: String,
    pub fields: Vec<FieldRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldRequest {
    pub code: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(rename = "displayOrder")]
    pub display_order: i32,
    pub constraints: FieldConstraints,
    pub ui: Map<String, Value>,
}

/// Mutable working copy of one antecedent block definition.
#[derive(Debug, Clone, PartialEq)]
pub struct DefinitionDraft {
    pub code: String,
    pub name: String,
    pub description: String,
    pub antecedent_type: String,
    fields: Vec<FieldDraft>,
}

impl DefinitionDraft {
    /// An empty draft for a new definition of the given category.
    pub fn new(antecedent_type: impl Into<String>) -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            description: String::new(),
            antecedent_type: antecedent_type.into(),
            fields: Vec::new(),
        }
    }

    /// A draft pre-filled from an existing definition, for editing.
    /// Fields keep their stored order; missing display orders are assigned
    /// from the field's position.
    pub fn from_block(block: &AntecedentBlock) -> Self {
        let fields = block
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| FieldDraft {
                code: f.code.clone(),
                label: f.label.clone(),
                field_type: f.field_type,
                required: f.required,
                display_order: f.display_order.unwrap_or(i as i32 + 1),
                constraints: f.constraints.clone(),
                ui: f.ui.clone(),
            })
            .collect();
        Self {
            code: block.code.clone(),
            name: block.name.clone(),
            description: block.description.clone().unwrap_or_default(),
            antecedent_type: block.antecedent_type.clone(),
            fields,
        }
    }

    pub fn fields(&self) -> &[FieldDraft] {
        &self.fields
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut FieldDraft> {
        self.fields.get_mut(index)
    }

    /// Appends an empty field at the end of the draft and returns its index.
    pub fn add_field(&mut self) -> usize {
        let order = self.fields.len() as i32 + 1;
        self.fields.push(FieldDraft::empty(order));
        self.fields.len() - 1
    }

    /// Removes the field at `index`; remaining fields are renumbered.
    pub fn remove_field(&mut self, index: usize) {
        if index < self.fields.len() {
            self.fields.remove(index);
            self.renumber();
        }
    }

    /// Swaps the field with its predecessor; no-op at the top.
    pub fn move_up(&mut self, index: usize) {
        if index > 0 && index < self.fields.len() {
            self.fields.swap(index, index - 1);
            self.renumber();
        }
    }

    /// Swaps the field with its successor; no-op at the bottom.
    pub fn move_down(&mut self, index: usize) {
        if index + 1 < self.fields.len() {
            self.fields.swap(index, index + 1);
            self.renumber();
        }
    }

    fn renumber(&mut self) {
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.display_order = i as i32 + 1;
        }
    }

    /// Validates the draft. An empty result means it can be submitted.
    pub fn validate(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        let mut issue = |key: DraftKey, message: &str| {
            issues.push(DraftIssue {
                key,
                message: message.to_owned(),
            });
        };

        if self.code.trim().is_empty() {
            issue(DraftKey::Code, "code is required");
        }
        if self.name.trim().is_empty() {
            issue(DraftKey::Name, "name is required");
        }

        for (i, field) in self.fields.iter().enumerate() {
            let code = field.code.trim();
            if code.is_empty() {
                issue(DraftKey::FieldCode(i), "code is required");
            } else if self.fields[..i].iter().any(|f| f.code.trim() == code) {
                issue(DraftKey::DuplicateFieldCode(i), "duplicate field code");
            }
            if field.label.trim().is_empty() {
                issue(DraftKey::FieldLabel(i), "label is required");
            }
            if matches!(field.field_type, FieldType::Enum | FieldType::MultiEnum)
                && !field.constraints.has_options()
            {
                issue(
                    DraftKey::FieldOptions(i),
                    "options are required for choice fields",
                );
            }
        }

        issues
    }

    /// Converts a clean draft into the request body.
    ///
    /// # Errors
    ///
    /// Returns the validation issues when the draft is not clean.
    pub fn into_request(self) -> Result<DefinitionRequest, Vec<DraftIssue>> {
        let issues = self.validate();
        if !issues.is_empty() {
            return Err(issues);
        }
        Ok(DefinitionRequest {
            code: self.code.trim().to_owned(),
            name: self.name.trim().to_owned(),
            description: self.description,
            antecedent_type: self.antecedent_type,
            fields: self
                .fields
                .into_iter()
                .map(|f| FieldRequest {
                    code: f.code.trim().to_owned(),
                    label: f.label.trim().to_owned(),
                    field_type: f.field_type,
                    required: f.required,
                    display_order: f.display_order,
                    constraints: f.constraints,
                    ui: f.ui,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft_with_fields(codes: &[&str]) -> DefinitionDraft {
        let mut draft = DefinitionDraft::new("OBSTETRICS");
        draft.code = "HISTORY".into();
        draft.name = "History".into();
        for code in codes {
            let index = draft.add_field();
            let field = draft.field_mut(index).expect("just added");
            field.code = (*code).into();
            field.label = code.to_uppercase();
        }
        draft
    }

    #[test]
    fn test_add_field_appends_with_next_order() {
        let draft = draft_with_fields(&["a", "b", "c"]);
        let orders: Vec<i32> = draft.fields().iter().map(|f| f.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_up_renumbers_from_one() {
        let mut draft = draft_with_fields(&["a", "b", "c"]);
        draft.move_up(2);
        let codes: Vec<&str> = draft.fields().iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "c", "b"]);
        let orders: Vec<i32> = draft.fields().iter().map(|f| f.display_order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
    }

    #[test]
    fn test_move_at_edges_is_a_no_op() {
        let mut draft = draft_with_fields(&["a", "b"]);
        draft.move_up(0);
        draft.move_down(1);
        let codes: Vec<&str> = draft.fields().iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "b"]);
    }

    #[test]
    fn test_remove_field_renumbers() {
        let mut draft = draft_with_fields(&["a", "b", "c"]);
        draft.remove_field(1);
        let codes: Vec<&str> = draft.fields().iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, vec!["a", "c"]);
        let orders: Vec<i32> = draft.fields().iter().map(|f| f.display_order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[test]
    fn test_duplicate_codes_are_rejected() {
        let draft = draft_with_fields(&["x", "x"]);
        let issues = draft.validate();
        assert!(issues
            .iter()
            .any(|i| i.key == DraftKey::DuplicateFieldCode(1)));
    }

    #[test]
    fn test_choice_fields_require_options() {
        let mut draft = draft_with_fields(&["outcome"]);
        draft.field_mut(0).expect("field").field_type = FieldType::Enum;
        let issues = draft.validate();
        assert!(issues.iter().any(|i| i.key == DraftKey::FieldOptions(0)));

        draft.field_mut(0).expect("field").constraints =
            serde_json::from_value(json!({ "options": ["LIVE_BIRTH", "LOSS"] })).expect("bag");
        assert!(draft.validate().is_empty());
    }

    #[test]
    fn test_ui_text_falls_back_to_last_valid_value() {
        let mut draft = draft_with_fields(&["a"]);
        let field = draft.field_mut(0).expect("field");
        assert!(field.set_ui_from_text(r#"{ "visibleIf": { "field": "b" } }"#));
        assert!(!field.set_ui_from_text("{ not json"));
        assert!(field.ui.contains_key("visibleIf"));
    }

    #[test]
    fn test_clean_draft_serializes_to_request_shape() {
        let mut draft = draft_with_fields(&["count"]);
        draft.field_mut(0).expect("field").field_type = FieldType::Integer;
        draft.field_mut(0).expect("field").required = true;

        let request = draft.into_request().expect("clean draft");
        let json = serde_json::to_value(&request).expect("serializes");
        assert_eq!(json["antecedentType"], "OBSTETRICS");
        assert_eq!(json["fields"][0]["type"], "INTEGER");
        assert_eq!(json["fields"][0]["displayOrder"], 1);
    }

    #[test]
    fn test_dirty_draft_does_not_convert() {
        let mut draft = draft_with_fields(&["a"]);
        draft.code.clear();
        assert!(draft.into_request().is_err());
    }
}
