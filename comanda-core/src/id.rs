//! Integer record identities.
//!
//! One comparison rule applies to every operation: a requested id is parsed as a
//! base-10 integer, and a stored `id` matches when it normalizes to the same integer.
//! Stored ids normalize from JSON integers, integral floats (`3.0`) and strings
//! holding a base-10 integer (`"3"`). Anything else has no identity.

use serde_json::Value;
use std::{fmt, num::ParseIntError, str::FromStr};

/// Name of the identity field carried by collection records.
pub const ID_FIELD: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId(i64);

impl RecordId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// Normalizes a stored id value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self).or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
                    .map(|f| Self(f as i64))
            }),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reads the identity of a record, if it is an object with a usable `id`.
    pub fn of_record(record: &Value) -> Option<Self> {
        record
            .as_object()
            .and_then(|fields| fields.get(ID_FIELD))
            .and_then(Self::from_value)
    }

    pub fn matches(self, record: &Value) -> bool {
        Self::of_record(record) == Some(self)
    }

    /// The id the next created record receives: `1` for a collection without ids,
    /// otherwise one more than the largest existing id. Freed ids are never reused.
    ///
    /// Returns `None` only when the largest id is `i64::MAX`.
    pub fn next_for(records: &[Value]) -> Option<Self> {
        match records.iter().filter_map(Self::of_record).max() {
            Some(Self(max)) => max.checked_add(1).map(Self),
            None => Some(Self(1)),
        }
    }
}

impl FromStr for RecordId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        Value::from(id.0)
    }
}
