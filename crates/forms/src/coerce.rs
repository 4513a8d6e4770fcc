//! Raw-to-typed value coercion.
//!
//! One exhaustive mapping from `(raw widget value, declared field type)` to
//! either a [`TypedValue`] or `None` for "absent". Absence is never conflated
//! with `false`, `0` or an empty string: a DECIMAL field left blank coerces
//! to `None`, not to `0.0`.

use crate::schema::FieldType;
use crate::values::RawValue;
use serde::{Serialize, Serializer};

/// A coerced, submission-ready field value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    /// INTEGER values, truncated toward zero.
    Int(i64),
    Decimal(f64),
    /// TEXT, DATE and ENUM values all travel as strings.
    Text(String),
    /// MULTI_ENUM selections; guaranteed non-empty when produced by
    /// [`coerce`].
    List(Vec<String>),
}

impl Serialize for TypedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Decimal(n) => serializer.serialize_f64(*n),
            Self::Text(s) => serializer.serialize_str(s),
            Self::List(items) => items.serialize(serializer),
        }
    }
}

/// Coerces a raw widget value according to the declared field type.
///
/// Returns `None` when the value is absent for that type: empty or
/// unparseable input for numbers, empty strings for text-likes, an empty
/// selection for MULTI_ENUM. For BOOLEAN only a never-touched value is
/// absent; `false` is a present value.
pub fn coerce(raw: &RawValue, field_type: FieldType) -> Option<TypedValue> {
    match field_type {
        FieldType::Boolean => match raw {
            RawValue::Absent => None,
            RawValue::Flag(b) => Some(TypedValue::Bool(*b)),
            // A text widget bound to a BOOLEAN field still answers the
            // question: any non-empty content reads as true.
            RawValue::Text(s) => {
                if s.is_empty() {
                    None
                } else {
                    Some(TypedValue::Bool(true))
                }
            }
            RawValue::List(items) => Some(TypedValue::Bool(!items.is_empty())),
        },
        FieldType::Integer => number_text(raw)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .map(|n| TypedValue::Int(n.trunc() as i64)),
        FieldType::Decimal => number_text(raw)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .map(TypedValue::Decimal),
        FieldType::Date | FieldType::Enum | FieldType::Text => match raw {
            RawValue::Absent => None,
            RawValue::Text(s) if s.is_empty() => None,
            RawValue::Text(s) => Some(TypedValue::Text(s.clone())),
            RawValue::Flag(b) => Some(TypedValue::Text(b.to_string())),
            RawValue::List(items) if items.is_empty() => None,
            RawValue::List(items) => Some(TypedValue::Text(items.join(","))),
        },
        FieldType::MultiEnum => {
            let list = match raw {
                RawValue::Absent => Vec::new(),
                RawValue::List(items) => items.clone(),
                // A bare scalar becomes a one-element list.
                RawValue::Text(s) if s.is_empty() => Vec::new(),
                RawValue::Text(s) => vec![s.clone()],
                RawValue::Flag(b) => vec![b.to_string()],
            };
            if list.is_empty() {
                None
            } else {
                Some(TypedValue::List(list))
            }
        }
    }
}

/// True when the coerced value counts as missing for required-validation.
pub fn is_missing(raw: &RawValue, field_type: FieldType) -> bool {
    coerce(raw, field_type).is_none()
}

fn number_text(raw: &RawValue) -> Option<&str> {
    match raw {
        RawValue::Text(s) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_absent_vs_false() {
        assert_eq!(coerce(&RawValue::Absent, FieldType::Boolean), None);
        assert_eq!(
            coerce(&RawValue::Flag(false), FieldType::Boolean),
            Some(TypedValue::Bool(false))
        );
        assert!(is_missing(&RawValue::Absent, FieldType::Boolean));
        assert!(!is_missing(&RawValue::Flag(false), FieldType::Boolean));
    }

    #[test]
    fn test_integer_truncates_toward_zero() {
        assert_eq!(
            coerce(&RawValue::Text("3.9".into()), FieldType::Integer),
            Some(TypedValue::Int(3))
        );
        assert_eq!(
            coerce(&RawValue::Text("-3.9".into()), FieldType::Integer),
            Some(TypedValue::Int(-3))
        );
    }

    #[test]
    fn test_integer_unparseable_is_absent() {
        assert_eq!(coerce(&RawValue::Text("abc".into()), FieldType::Integer), None);
        assert_eq!(coerce(&RawValue::Text(String::new()), FieldType::Integer), None);
        assert_eq!(coerce(&RawValue::Absent, FieldType::Integer), None);
    }

    #[test]
    fn test_decimal_empty_is_absent_not_zero() {
        assert_eq!(
            coerce(&RawValue::Text("3.5".into()), FieldType::Decimal),
            Some(TypedValue::Decimal(3.5))
        );
        assert_eq!(coerce(&RawValue::Text(String::new()), FieldType::Decimal), None);
    }

    #[test]
    fn test_decimal_rejects_non_finite() {
        assert_eq!(coerce(&RawValue::Text("inf".into()), FieldType::Decimal), None);
        assert_eq!(coerce(&RawValue::Text("NaN".into()), FieldType::Decimal), None);
    }

    #[test]
    fn test_multi_enum_scalar_becomes_single_element_list() {
        assert_eq!(
            coerce(&RawValue::Text("A".into()), FieldType::MultiEnum),
            Some(TypedValue::List(vec!["A".into()]))
        );
    }

    #[test]
    fn test_multi_enum_empty_list_is_absent() {
        assert_eq!(coerce(&RawValue::List(Vec::new()), FieldType::MultiEnum), None);
        assert!(is_missing(&RawValue::List(Vec::new()), FieldType::MultiEnum));
    }

    #[test]
    fn test_date_and_enum_pass_through_as_strings() {
        assert_eq!(
            coerce(&RawValue::Text("2025-02-01".into()), FieldType::Date),
            Some(TypedValue::Text("2025-02-01".into()))
        );
        assert_eq!(
            coerce(&RawValue::Text("TWINS".into()), FieldType::Enum),
            Some(TypedValue::Text("TWINS".into()))
        );
        assert_eq!(coerce(&RawValue::Text(String::new()), FieldType::Enum), None);
    }

    #[test]
    fn test_typed_value_serializes_to_bare_json() {
        assert_eq!(serde_json::to_string(&TypedValue::Int(2)).expect("json"), "2");
        assert_eq!(serde_json::to_string(&TypedValue::Bool(false)).expect("json"), "false");
        assert_eq!(
            serde_json::to_string(&TypedValue::List(vec!["A".into(), "B".into()])).expect("json"),
            "[\"A\",\"B\"]"
        );
    }
}
