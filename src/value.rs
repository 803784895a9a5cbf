// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The value representation threaded through a constraint chain.
//!
//! A `Datum` is either an ordinary JSON value or the distinguished invalid
//! sentinel. The sentinel is its own enum variant so it can never be confused
//! with legitimate falsy data (`0`, `""`, `false`, `null`): a chain that
//! produces JSON `null` has succeeded with "no value", a chain that produces
//! `Datum::Invalid` has failed.

use serde_json::Value;

/// A value flowing between constraints in one field's chain.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    /// An ordinary value, including falsy ones.
    Value(Value),
    /// The invalid sentinel: this field failed its current constraint.
    Invalid,
}

impl Datum {
    /// True when this is the invalid sentinel.
    pub fn is_invalid(&self) -> bool {
        matches!(self, Datum::Invalid)
    }

    /// True for JSON `null`, the representation of an absent field.
    pub fn is_missing(&self) -> bool {
        matches!(self, Datum::Value(Value::Null))
    }

    /// Falsy under the `required` constraint's rules: `null`, `false`,
    /// the empty string, or numeric zero. The invalid sentinel is not
    /// classified; it never reaches a falsiness check in a running chain.
    pub fn is_falsy(&self) -> bool {
        match self {
            Datum::Value(Value::Null) => true,
            Datum::Value(Value::Bool(b)) => !b,
            Datum::Value(Value::String(s)) => s.is_empty(),
            Datum::Value(Value::Number(n)) => n.as_f64() == Some(0.0),
            _ => false,
        }
    }

    /// The underlying value, when this is not the sentinel.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Datum::Value(v) => Some(v),
            Datum::Invalid => None,
        }
    }

    /// Consume into the underlying value, when this is not the sentinel.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Datum::Value(v) => Some(v),
            Datum::Invalid => None,
        }
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        Datum::Value(value)
    }
}
