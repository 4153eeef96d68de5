//! Schema-driven decoding of positional JSON tuples.
//!
//! Several Kraken payloads encode records as fixed-arity arrays whose meaning
//! depends on slot position, e.g. a spot trade is
//! `["30000.1", "0.5", 1690000000.0, "b", "l", "", 12345]`. A [`TupleSchema`]
//! declares the expected kind of every slot; [`decode`] checks the arity and
//! coerces each slot in order, failing on the first violation.

use crate::core::errors::DecodeError;
use rust_decimal::Decimal;
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Expected kind of a single tuple slot and how it is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// JSON string holding a decimal number
    DecimalString,
    /// Decimal number encoded as either a JSON string or a JSON number
    Decimal,
    /// JSON number, integral or fractional
    Number,
    /// JSON number without a fractional part
    Integer,
    /// Any JSON string
    Text,
    /// JSON string restricted to the listed members
    OneOf(&'static [&'static str]),
    Bool,
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecimalString => write!(f, "decimal string"),
            Self::Decimal => write!(f, "decimal"),
            Self::Number => write!(f, "number"),
            Self::Integer => write!(f, "integer"),
            Self::Text => write!(f, "string"),
            Self::OneOf(members) => write!(f, "one of [{}]", members.join(", ")),
            Self::Bool => write!(f, "boolean"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub name: &'static str,
    pub kind: SlotKind,
}

pub const fn slot(name: &'static str, kind: SlotKind) -> Slot {
    Slot { name, kind }
}

/// Ordered slot layout of one positional record type
#[derive(Debug, PartialEq, Eq)]
pub struct TupleSchema {
    pub name: &'static str,
    pub slots: &'static [Slot],
}

impl TupleSchema {
    pub const fn new(name: &'static str, slots: &'static [Slot]) -> Self {
        Self { name, slots }
    }

    pub const fn arity(&self) -> usize {
        self.slots.len()
    }
}

/// A coerced slot value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValue {
    Decimal(Decimal),
    Integer(i64),
    Text(String),
    Bool(bool),
}

/// Output of [`decode`]: one coerced value per schema slot, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTuple {
    schema: &'static TupleSchema,
    values: Vec<SlotValue>,
}

impl DecodedTuple {
    pub fn schema(&self) -> &'static TupleSchema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn decimal(&self, index: usize) -> Result<Decimal, DecodeError> {
        match self.values.get(index) {
            Some(SlotValue::Decimal(value)) => Ok(*value),
            other => Err(self.accessor_mismatch(index, "decimal", other)),
        }
    }

    pub fn integer(&self, index: usize) -> Result<i64, DecodeError> {
        match self.values.get(index) {
            Some(SlotValue::Integer(value)) => Ok(*value),
            other => Err(self.accessor_mismatch(index, "integer", other)),
        }
    }

    pub fn text(&self, index: usize) -> Result<&str, DecodeError> {
        match self.values.get(index) {
            Some(SlotValue::Text(value)) => Ok(value),
            other => Err(self.accessor_mismatch(index, "string", other)),
        }
    }

    pub fn boolean(&self, index: usize) -> Result<bool, DecodeError> {
        match self.values.get(index) {
            Some(SlotValue::Bool(value)) => Ok(*value),
            other => Err(self.accessor_mismatch(index, "boolean", other)),
        }
    }

    // Only reachable when a record reads a slot with the wrong accessor for its schema.
    fn accessor_mismatch(
        &self,
        index: usize,
        expected: &str,
        found: Option<&SlotValue>,
    ) -> DecodeError {
        let actual = match found {
            Some(SlotValue::Decimal(_)) => "decimal",
            Some(SlotValue::Integer(_)) => "integer",
            Some(SlotValue::Text(_)) => "string",
            Some(SlotValue::Bool(_)) => "boolean",
            None => "missing slot",
        };
        DecodeError::TypeMismatch {
            schema: self.schema.name,
            index,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Decode `raw` against `schema`.
///
/// Fails with [`DecodeError::Arity`] when the lengths differ and with
/// [`DecodeError::TypeMismatch`] for the first slot that cannot be coerced.
/// No partial tuple is ever returned.
pub fn decode(raw: &[Value], schema: &'static TupleSchema) -> Result<DecodedTuple, DecodeError> {
    if raw.len() != schema.arity() {
        return Err(DecodeError::Arity {
            schema: schema.name,
            expected: schema.arity(),
            actual: raw.len(),
        });
    }

    let values = raw
        .iter()
        .zip(schema.slots)
        .enumerate()
        .map(|(index, (value, slot))| {
            coerce(value, slot.kind).ok_or_else(|| slot_error(schema, index, slot, value))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DecodedTuple { schema, values })
}

/// Like [`decode`] but starting from an arbitrary JSON value that must be an array
pub fn decode_value(
    raw: &Value,
    schema: &'static TupleSchema,
) -> Result<DecodedTuple, DecodeError> {
    match raw {
        Value::Array(items) => decode(items, schema),
        other => Err(DecodeError::unexpected(
            schema.name,
            format!("expected array, got {}", describe(other)),
        )),
    }
}

/// A record type with a positional wire form
pub trait TupleRecord: Sized {
    const SCHEMA: &'static TupleSchema;

    fn from_tuple(tuple: &DecodedTuple) -> Result<Self, DecodeError>;

    /// Positional wire form; decoding it again yields an equal record
    fn to_tuple(&self) -> Vec<Value>;

    fn decode(raw: &Value) -> Result<Self, DecodeError> {
        Self::from_tuple(&decode_value(raw, Self::SCHEMA)?)
    }
}

/// Decode every element, aborting on the first failure
pub fn decode_all<T: TupleRecord>(raw: &[Value]) -> Result<Vec<T>, DecodeError> {
    raw.iter().map(T::decode).collect()
}

/// Parse a decimal without truncating: trailing garbage is an error.
///
/// Only digits, sign, decimal point and exponent are allowed, so digit
/// separators such as `1_000` are rejected.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b)) {
        return None;
    }
    Decimal::from_str(s)
        .ok()
        .or_else(|| Decimal::from_scientific(s).ok())
}

pub fn decimal_string(value: Decimal) -> Value {
    Value::String(value.to_string())
}

pub fn decimal_number(value: Decimal) -> Value {
    Number::from_str(&value.to_string()).map_or_else(|_| decimal_string(value), Value::Number)
}

fn number_to_decimal(number: &Number) -> Option<Decimal> {
    if let Some(value) = number.as_i64() {
        return Some(Decimal::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Some(Decimal::from(value));
    }
    parse_decimal(&number.to_string())
}

fn slot_error(schema: &TupleSchema, index: usize, slot: &Slot, value: &Value) -> DecodeError {
    match (slot.kind, value) {
        // right JSON type, but too large or too precise for a decimal
        (SlotKind::Decimal | SlotKind::Number, Value::Number(n)) => DecodeError::unexpected(
            format!("{} slot {} ({})", schema.name, index, slot.name),
            format!("{} is outside the decimal range", n),
        ),
        _ => DecodeError::TypeMismatch {
            schema: schema.name,
            index,
            expected: slot.kind.to_string(),
            actual: describe(value),
        },
    }
}

fn coerce(value: &Value, kind: SlotKind) -> Option<SlotValue> {
    match (kind, value) {
        (SlotKind::DecimalString | SlotKind::Decimal, Value::String(s)) => {
            parse_decimal(s).map(SlotValue::Decimal)
        }
        (SlotKind::Decimal | SlotKind::Number, Value::Number(n)) => {
            number_to_decimal(n).map(SlotValue::Decimal)
        }
        (SlotKind::Integer, Value::Number(n)) => n.as_i64().map(SlotValue::Integer),
        (SlotKind::Text, Value::String(s)) => Some(SlotValue::Text(s.clone())),
        (SlotKind::OneOf(members), Value::String(s)) => members
            .contains(&s.as_str())
            .then(|| SlotValue::Text(s.clone())),
        (SlotKind::Bool, Value::Bool(b)) => Some(SlotValue::Bool(*b)),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Array(items) => format!("array of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    static MIXED: TupleSchema = TupleSchema::new(
        "mixed",
        &[
            slot("price", SlotKind::DecimalString),
            slot("size", SlotKind::Decimal),
            slot("time", SlotKind::Number),
            slot("id", SlotKind::Integer),
            slot("side", SlotKind::OneOf(&["b", "s"])),
            slot("note", SlotKind::Text),
            slot("flag", SlotKind::Bool),
        ],
    );

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn raw(value: Value) -> Vec<Value> {
        value.as_array().unwrap().clone()
    }

    #[test]
    fn test_decode_mixed_tuple() {
        let tuple = decode(
            &raw(json!(["30000.1", 0.5, 1690000000.25, 42, "s", "", true])),
            &MIXED,
        )
        .unwrap();

        assert_eq!(tuple.len(), 7);
        assert_eq!(tuple.decimal(0).unwrap(), dec("30000.1"));
        assert_eq!(tuple.decimal(1).unwrap(), dec("0.5"));
        assert_eq!(tuple.decimal(2).unwrap(), dec("1690000000.25"));
        assert_eq!(tuple.integer(3).unwrap(), 42);
        assert_eq!(tuple.text(4).unwrap(), "s");
        assert_eq!(tuple.text(5).unwrap(), "");
        assert!(tuple.boolean(6).unwrap());
    }

    #[test]
    fn test_arity_mismatch_reports_both_counts() {
        let short = decode(&raw(json!(["1", "2"])), &MIXED).unwrap_err();
        assert_eq!(
            short,
            DecodeError::Arity {
                schema: "mixed",
                expected: 7,
                actual: 2
            }
        );

        let long = decode(
            &raw(json!(["1", 1, 1, 1, "b", "", false, "extra"])),
            &MIXED,
        )
        .unwrap_err();
        assert!(matches!(
            long,
            DecodeError::Arity {
                expected: 7,
                actual: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_type_mismatch_names_first_bad_slot() {
        // slot 0 must be a string, slots 3 and 4 are also wrong
        let err = decode(&raw(json!([1.5, 1, 1, 1.5, "x", "", false])), &MIXED).unwrap_err();
        match err {
            DecodeError::TypeMismatch {
                index,
                expected,
                actual,
                ..
            } => {
                assert_eq!(index, 0);
                assert_eq!(expected, "decimal string");
                assert_eq!(actual, "number 1.5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_string_fails_instead_of_truncating() {
        let err = decode(
            &raw(json!(["123abc", "1", 1, 1, "b", "", false])),
            &MIXED,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { index: 0, .. }));

        let err = decode(&raw(json!(["1", "", 1, 1, "b", "", false])), &MIXED).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { index: 1, .. }));
    }

    #[test]
    fn test_digit_separators_are_rejected() {
        let err = decode(
            &raw(json!(["1_000", "1", 1, 1, "b", "", false])),
            &MIXED,
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { index: 0, .. }));

        assert_eq!(parse_decimal("1_000"), None);
        assert_eq!(parse_decimal(" 1"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-1000.5"), Some(dec("-1000.5")));
    }

    #[test]
    fn test_number_outside_decimal_range_is_unexpected_value() {
        let err = decode(&raw(json!(["1", "1", 1e300, 1, "b", "", false])), &MIXED).unwrap_err();
        match err {
            DecodeError::UnexpectedValue { field, value } => {
                assert_eq!(field, "mixed slot 2 (time)");
                assert!(value.ends_with("is outside the decimal range"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_integer_slot_rejects_fractions_and_strings() {
        let err = decode(&raw(json!(["1", "1", 1, 1.5, "b", "", false])), &MIXED).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { index: 3, .. }));

        let err = decode(&raw(json!(["1", "1", 1, "7", "b", "", false])), &MIXED).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { index: 3, .. }));
    }

    #[test]
    fn test_one_of_rejects_unknown_member() {
        let err = decode(&raw(json!(["1", "1", 1, 1, "x", "", false])), &MIXED).unwrap_err();
        match err {
            DecodeError::TypeMismatch {
                index, expected, ..
            } => {
                assert_eq!(index, 4);
                assert_eq!(expected, "one of [b, s]");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_value_requires_array() {
        let err = decode_value(&json!({"price": "1"}), &MIXED).unwrap_err();
        assert!(matches!(err, DecodeError::UnexpectedValue { .. }));
    }

    #[test]
    fn test_scientific_numbers_are_accepted() {
        assert_eq!(parse_decimal("1e-5"), Some(dec("0.00001")));
        assert_eq!(parse_decimal("12.5"), Some(dec("12.5")));
        assert_eq!(parse_decimal("12.5x"), None);
    }

    #[test]
    fn test_decimal_number_encoding() {
        assert_eq!(decimal_number(dec("1690000000.25")), json!(1690000000.25));
        assert_eq!(decimal_number(dec("7")), json!(7));
        assert_eq!(decimal_string(dec("0.50")), json!("0.50"));
    }
}
