//! Transform rules and their application.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use etl_model::{FieldType, RecordSet, Value};

use crate::error::{Result, TransformError};
use crate::numeric::{parse_numeric, round_to};

/// One field-level operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleOp {
    /// Multiply the numeric value by a factor (e.g. unit conversion).
    Scale(f64),
    /// Round to a fixed number of decimal places.
    Round(u32),
    /// Coerce text to a number; unparsable values become null.
    #[serde(rename = "to_number")]
    ToNumber,
}

/// A pure mapping applied to one field across the whole record set.
///
/// Rules never change record count or the field set, and never observe
/// another field's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    pub field: String,
    pub op: RuleOp,
}

impl TransformRule {
    pub fn scale(field: impl Into<String>, factor: f64) -> Self {
        Self {
            field: field.into(),
            op: RuleOp::Scale(factor),
        }
    }

    pub fn round(field: impl Into<String>, decimals: u32) -> Self {
        Self {
            field: field.into(),
            op: RuleOp::Round(decimals),
        }
    }

    pub fn to_number(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: RuleOp::ToNumber,
        }
    }
}

/// Apply every rule, in declaration order, to the record set in place.
///
/// A rule naming a field outside the schema is an error; failed numeric
/// coercion on a single value is not — it yields [`Value::Null`].
pub fn apply_rules(rules: &[TransformRule], set: &mut RecordSet) -> Result<()> {
    for rule in rules {
        let index = set
            .schema()
            .index_of(&rule.field)
            .ok_or_else(|| TransformError::UnknownField {
                field: rule.field.clone(),
            })?;
        let field_type = set.schema().fields()[index].field_type;

        for record in set.records_mut() {
            if let Some(value) = record.get_mut(index) {
                *value = apply_op(rule.op, value, field_type);
            }
        }
        tracing::debug!(field = %rule.field, op = ?rule.op, "transform rule applied");
    }
    Ok(())
}

/// Last declared rounding rule per field, for fixed-precision sink output.
pub fn rounding_precision(rules: &[TransformRule]) -> BTreeMap<String, u32> {
    let mut precision = BTreeMap::new();
    for rule in rules {
        if let RuleOp::Round(decimals) = rule.op {
            precision.insert(rule.field.clone(), decimals);
        }
    }
    precision
}

fn apply_op(op: RuleOp, value: &Value, field_type: FieldType) -> Value {
    match op {
        RuleOp::ToNumber => coerce(value, field_type),
        RuleOp::Scale(factor) => match numeric_view(value) {
            Some(v) => Value::Float(v * factor),
            None => Value::Null,
        },
        RuleOp::Round(decimals) => match value {
            // Integers are already whole; leave them typed.
            Value::Int(v) => Value::Int(*v),
            other => match numeric_view(other) {
                Some(v) => Value::Float(round_to(v, decimals)),
                None => Value::Null,
            },
        },
    }
}

/// Numeric view used by scale/round: typed numbers directly, text via
/// lenient parsing.
fn numeric_view(value: &Value) -> Option<f64> {
    match value {
        Value::Str(s) => parse_numeric(s),
        other => other.as_f64(),
    }
}

fn coerce(value: &Value, field_type: FieldType) -> Value {
    match value {
        Value::Str(s) => match parse_numeric(s) {
            Some(v) if field_type == FieldType::Int && v.fract() == 0.0 => Value::Int(v as i64),
            Some(v) => Value::Float(v),
            None => Value::Null,
        },
        typed => typed.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use etl_model::{Field, Record, Schema};

    fn people_set() -> RecordSet {
        let schema = Schema::new(vec![
            Field::new("name", FieldType::Str),
            Field::new("height", FieldType::Float),
            Field::new("weight", FieldType::Float),
        ]);
        let mut set = RecordSet::new(schema);
        set.push(Record::new(vec![
            Value::Str("Alice".into()),
            Value::Float(65.0),
            Value::Float(120.0),
        ]));
        set
    }

    #[test]
    fn test_scale_and_round() {
        let mut set = people_set();
        let rules = vec![
            TransformRule::scale("height", 0.0254),
            TransformRule::round("height", 2),
            TransformRule::scale("weight", 0.45359237),
            TransformRule::round("weight", 2),
        ];
        apply_rules(&rules, &mut set).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.value(0, "name"), Some(&Value::Str("Alice".into())));
        assert_eq!(set.value(0, "height"), Some(&Value::Float(1.65)));
        assert_eq!(set.value(0, "weight"), Some(&Value::Float(54.43)));
    }

    #[test]
    fn test_unknown_field() {
        let mut set = people_set();
        let rules = vec![TransformRule::round("age", 2)];
        let result = apply_rules(&rules, &mut set);
        assert!(matches!(
            result,
            Err(TransformError::UnknownField { field }) if field == "age"
        ));
    }

    #[test]
    fn test_to_number_coercion() {
        let schema = Schema::new(vec![Field::new("gdp", FieldType::Float)]);
        let mut set = RecordSet::new(schema);
        set.push(Record::new(vec![Value::Str("26,854.60".into())]));
        set.push(Record::new(vec![Value::Str("—".into())]));

        apply_rules(&[TransformRule::to_number("gdp")], &mut set).unwrap();
        assert_eq!(set.value(0, "gdp"), Some(&Value::Float(26854.60)));
        assert_eq!(set.value(1, "gdp"), Some(&Value::Null));
    }

    #[test]
    fn test_to_number_integer_field() {
        let schema = Schema::new(vec![Field::new("year", FieldType::Int)]);
        let mut set = RecordSet::new(schema);
        set.push(Record::new(vec![Value::Str("2017".into())]));

        apply_rules(&[TransformRule::to_number("year")], &mut set).unwrap();
        assert_eq!(set.value(0, "year"), Some(&Value::Int(2017)));
    }

    #[test]
    fn test_scale_on_text_becomes_null() {
        let mut set = people_set();
        set.push(Record::new(vec![
            Value::Str("Bob".into()),
            Value::Str("tall".into()),
            Value::Float(190.0),
        ]));
        apply_rules(&[TransformRule::scale("height", 0.0254)], &mut set).unwrap();
        assert_eq!(set.value(1, "height"), Some(&Value::Null));
        // Row count and field set are untouched.
        assert_eq!(set.len(), 2);
        assert_eq!(set.schema().len(), 3);
    }

    #[test]
    fn test_round_twice_same_as_once() {
        let mut once = people_set();
        let mut twice = people_set();
        let round = [TransformRule::round("height", 2)];

        apply_rules(&round, &mut once).unwrap();
        apply_rules(&round, &mut twice).unwrap();
        apply_rules(&round, &mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_rounding_precision_map() {
        let rules = vec![
            TransformRule::scale("height", 0.0254),
            TransformRule::round("height", 2),
            TransformRule::round("weight", 3),
        ];
        let precision = rounding_precision(&rules);
        assert_eq!(precision.get("height"), Some(&2));
        assert_eq!(precision.get("weight"), Some(&3));
        assert_eq!(precision.get("name"), None);
    }
}
