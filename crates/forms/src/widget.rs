//! Typed rendering dispatch.
//!
//! The engine does not own any UI; it hands the host a [`WidgetSpec`] that
//! says exactly which input behavior to render for a field and with which
//! bounds. Selection is a single exhaustive match over [`FieldType`], so
//! every field resolves to exactly one widget.

use crate::schema::{FieldDefinition, FieldType};
use crate::values::RawValue;

/// Default numeric step for DECIMAL fields when the schema leaves it out.
pub const DEFAULT_DECIMAL_STEP: f64 = 0.1;
/// Default numeric step for INTEGER fields.
pub const DEFAULT_INTEGER_STEP: f64 = 1.0;

/// One concrete input behavior, ready for the host to render.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetSpec {
    /// BOOLEAN: a two-state toggle. An absent value displays as off while
    /// still counting as missing for required-validation.
    Toggle { on: bool },
    /// INTEGER/DECIMAL: numeric input with pass-through bounds.
    NumberInput {
        value: String,
        min: Option<f64>,
        max: Option<f64>,
        step: f64,
    },
    /// DATE: `yyyy-mm-dd` string input with lexicographic bounds.
    DateInput {
        value: String,
        min: Option<String>,
        max: Option<String>,
    },
    /// ENUM: single choice, no default selection.
    SingleChoice {
        selected: Option<String>,
        options: Vec<String>,
    },
    /// MULTI_ENUM: multiple choice; the value is always a list.
    MultiChoice {
        selected: Vec<String>,
        options: Vec<String>,
    },
    /// TEXT and any unknown type: free string with an optional length cap.
    TextInput {
        value: String,
        max_length: Option<usize>,
    },
}

/// Selects the widget behavior for a field and its current raw value.
pub fn widget_for(field: &FieldDefinition, value: &RawValue) -> WidgetSpec {
    let c = &field.constraints;
    match field.field_type {
        FieldType::Boolean => WidgetSpec::Toggle {
            on: matches!(value, RawValue::Flag(true)),
        },
        FieldType::Integer => WidgetSpec::NumberInput {
            value: text_of(value),
            min: c.min_number(),
            max: c.max_number(),
            step: c.step().unwrap_or(DEFAULT_INTEGER_STEP),
        },
        FieldType::Decimal => WidgetSpec::NumberInput {
            value: text_of(value),
            min: c.min_number(),
            max: c.max_number(),
            step: c.step().unwrap_or(DEFAULT_DECIMAL_STEP),
        },
        FieldType::Date => WidgetSpec::DateInput {
            value: text_of(value),
            min: c.min_date().map(str::to_owned),
            max: c.max_date().map(str::to_owned),
        },
        FieldType::Enum => WidgetSpec::SingleChoice {
            selected: match value {
                RawValue::Text(s) if !s.is_empty() => Some(s.clone()),
                _ => None,
            },
            options: c.options(),
        },
        FieldType::MultiEnum => WidgetSpec::MultiChoice {
            selected: match value {
                RawValue::List(items) => items.clone(),
                _ => Vec::new(),
            },
            options: c.options(),
        },
        FieldType::Text => WidgetSpec::TextInput {
            value: text_of(value),
            max_length: c.max_length(),
        },
    }
}

fn text_of(value: &RawValue) -> String {
    match value {
        RawValue::Text(s) => s.clone(),
        _ => String::new(),
    }
}
