use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::constraints::bad_args;
use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// `match` - the value (string, or a number via its decimal rendering) must
/// match the declared regex. The pattern compiles at bind time, so a bad
/// pattern is a configuration error, not a per-field failure.
pub struct Match {
    regex: Regex,
}

impl Match {
    pub fn new(regex: Regex) -> Self {
        Self { regex }
    }
}

#[async_trait]
impl Evaluator for Match {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let matched = match value.as_value() {
            Some(Value::String(s)) => self.regex.is_match(s),
            Some(Value::Number(n)) => self.regex.is_match(&n.to_string()),
            _ => false,
        };

        if matched {
            Ok(Verdict::Next(value))
        } else {
            Ok(Verdict::Next(Datum::Invalid))
        }
    }

    fn name(&self) -> &str {
        "match"
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("match", |args, cx| {
        let pattern = args
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| bad_args(cx, "match", "expects a regex pattern string"))?;
        let regex =
            Regex::new(pattern).map_err(|e| bad_args(cx, "match", e.to_string()))?;
        Ok(Arc::new(Match::new(regex)))
    });
}
