//! Boolean-coercion leaf constraints: `isTrue`, `isNotFalse`.
//!
//! Both coerce over a fixed token set and never fail; unrecognized input
//! simply coerces to the lenient default of the chosen constraint.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

const TRUE_TOKENS: &[&str] = &["true", "t", "yes", "y", "1", "on"];
const FALSE_TOKENS: &[&str] = &["false", "f", "no", "n", "0", "off"];

fn in_token_set(value: Option<&Value>, tokens: &[&str], boolean: bool) -> bool {
    match value {
        Some(Value::Bool(b)) => *b == boolean,
        Some(Value::Number(n)) => {
            let expected = if boolean { 1.0 } else { 0.0 };
            n.as_f64() == Some(expected)
        }
        Some(Value::String(s)) => tokens.contains(&s.to_ascii_lowercase().as_str()),
        _ => false,
    }
}

/// `isTrue` - coerces to `true` only for an affirmative token.
pub struct IsTrue;

#[async_trait]
impl Evaluator for IsTrue {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let b = in_token_set(value.as_value(), TRUE_TOKENS, true);
        Ok(Verdict::Next(Datum::Value(Value::Bool(b))))
    }

    fn name(&self) -> &str {
        "isTrue"
    }
}

/// `isNotFalse` - coerces to `false` only for an explicit negative token.
pub struct IsNotFalse;

#[async_trait]
impl Evaluator for IsNotFalse {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let b = !in_token_set(value.as_value(), FALSE_TOKENS, false);
        Ok(Verdict::Next(Datum::Value(Value::Bool(b))))
    }

    fn name(&self) -> &str {
        "isNotFalse"
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("isTrue", |_args, _cx| Ok(Arc::new(IsTrue)));
    registry.register_fn("isNotFalse", |_args, _cx| Ok(Arc::new(IsNotFalse)));
}
