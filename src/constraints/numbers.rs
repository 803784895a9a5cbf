//! Numeric leaf constraints: `numeric`, `integer`, `min`, `max`.
//!
//! These are parse-or-fail sanitizers: on success the chain value becomes a
//! JSON number, so later constraints see the converted value, not the raw
//! string.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Number, Value};

use crate::constraints::bad_args;
use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// Coerce to f64: numbers directly, strings by trimmed parse.
fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// True when casting this float to i64 cannot lose or saturate the value.
/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is strict.
fn fits_i64(f: f64) -> bool {
    f.fract() == 0.0 && f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64
}

/// Coerce to i64: integer numbers, in-range whole floats, strings by
/// trimmed parse.
fn to_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64().filter(|f| fits_i64(*f)).map(|f| f as i64)
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Render an f64 back to a JSON number, preferring the integer form when the
/// cast is exact.
fn number_value(n: f64) -> Option<Value> {
    if fits_i64(n) {
        Some(Value::Number(Number::from(n as i64)))
    } else {
        Number::from_f64(n).map(Value::Number)
    }
}

/// `numeric` - parse as a number or fail.
pub struct Numeric;

#[async_trait]
impl Evaluator for Numeric {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let parsed = value
            .as_value()
            .and_then(to_f64)
            .and_then(number_value);
        match parsed {
            Some(number) => Ok(Verdict::Next(Datum::Value(number))),
            None => Ok(Verdict::Next(Datum::Invalid)),
        }
    }

    fn name(&self) -> &str {
        "numeric"
    }
}

/// `integer` - parse as an integer or fail.
pub struct Integer;

#[async_trait]
impl Evaluator for Integer {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        match value.as_value().and_then(to_i64) {
            Some(i) => Ok(Verdict::Next(Datum::Value(Value::Number(Number::from(i))))),
            None => Ok(Verdict::Next(Datum::Invalid)),
        }
    }

    fn name(&self) -> &str {
        "integer"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoundKind {
    Min,
    Max,
}

/// `min(x, integer?, equality?)` / `max(x, integer?, equality?)` - numeric
/// comparison against a declared bound, with optional integer parsing and
/// an optional inclusive bound. Passes the parsed number on.
pub struct Bound {
    kind: BoundKind,
    bound: f64,
    parse_integer: bool,
    inclusive: bool,
}

#[async_trait]
impl Evaluator for Bound {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let parsed = match value.as_value() {
            Some(v) if self.parse_integer => to_i64(v).map(|i| i as f64),
            Some(v) => to_f64(v),
            None => None,
        };
        let Some(n) = parsed else {
            return Ok(Verdict::Next(Datum::Invalid));
        };

        let within = match self.kind {
            BoundKind::Min => n > self.bound || (self.inclusive && n == self.bound),
            BoundKind::Max => n < self.bound || (self.inclusive && n == self.bound),
        };
        if !within {
            return Ok(Verdict::Next(Datum::Invalid));
        }

        match number_value(n) {
            Some(number) => Ok(Verdict::Next(Datum::Value(number))),
            None => Ok(Verdict::Next(Datum::Invalid)),
        }
    }

    fn name(&self) -> &str {
        match self.kind {
            BoundKind::Min => "min",
            BoundKind::Max => "max",
        }
    }
}

fn bind_bound(
    kind: BoundKind,
    name: &'static str,
) -> impl Fn(&[Value], &crate::schema::ParamContext) -> Result<Arc<dyn Evaluator>, crate::errors::ConfigError>
{
    move |args, cx| {
        let bound = args
            .first()
            .and_then(to_f64)
            .ok_or_else(|| bad_args(cx, name, "expects a numeric bound"))?;
        let parse_integer = args.get(1).and_then(Value::as_bool).unwrap_or(false);
        let inclusive = args.get(2).and_then(Value::as_bool).unwrap_or(false);
        Ok(Arc::new(Bound {
            kind,
            bound,
            parse_integer,
            inclusive,
        }) as Arc<dyn Evaluator>)
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("numeric", |_args, _cx| Ok(Arc::new(Numeric)));
    registry.register_fn("integer", |_args, _cx| Ok(Arc::new(Integer)));
    registry.register_fn("min", bind_bound(BoundKind::Min, "min"));
    registry.register_fn("max", bind_bound(BoundKind::Max, "max"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ParamContext;
    use serde_json::{json, Map};

    fn bind(name: &str, args: &[Value]) -> Arc<dyn Evaluator> {
        let mut registry = Registry::new();
        register(&mut registry);
        let cx = ParamContext::new("field", Arc::new(Map::new()));
        registry.lookup(name).unwrap().bind(args, &cx).unwrap()
    }

    #[tokio::test]
    async fn test_integer_parses_strings() {
        let verdict = Integer.evaluate(Datum::Value(json!("17"))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(17))));
    }

    #[tokio::test]
    async fn test_integer_rejects_fractions_and_garbage() {
        for bad in [json!("17.5"), json!("x"), json!(null), json!(17.5)] {
            let verdict = Integer.evaluate(Datum::Value(bad)).await.unwrap();
            assert_eq!(verdict, Verdict::Next(Datum::Invalid));
        }
    }

    #[tokio::test]
    async fn test_integer_rejects_whole_floats_outside_i64_range() {
        // Casting these would saturate rather than convert; parse-or-fail
        // means fail, never a silently clamped value.
        for bad in [json!(1e20), json!(-1e20), json!(9.3e18)] {
            let verdict = Integer.evaluate(Datum::Value(bad.clone())).await.unwrap();
            assert_eq!(verdict, Verdict::Next(Datum::Invalid), "input: {}", bad);
        }
    }

    #[tokio::test]
    async fn test_numeric_keeps_huge_whole_floats_as_floats() {
        let verdict = Numeric.evaluate(Datum::Value(json!(1e20))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(1e20))));
    }

    #[tokio::test]
    async fn test_numeric_parses_floats_and_keeps_integers_integral() {
        let verdict = Numeric.evaluate(Datum::Value(json!("17.5"))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(17.5))));

        let verdict = Numeric.evaluate(Datum::Value(json!("17"))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(17))));
    }

    #[tokio::test]
    async fn test_min_exclusive_by_default() {
        let evaluator = bind("min", &[json!(18)]);

        let verdict = evaluator.evaluate(Datum::Value(json!("18"))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Invalid));

        let verdict = evaluator.evaluate(Datum::Value(json!("19"))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(19))));
    }

    #[tokio::test]
    async fn test_min_inclusive_with_equality_flag() {
        let evaluator = bind("min", &[json!(18), json!(false), json!(true)]);
        let verdict = evaluator.evaluate(Datum::Value(json!(18))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(18))));
    }

    #[tokio::test]
    async fn test_max_bound() {
        let evaluator = bind("max", &[json!(100)]);

        let verdict = evaluator.evaluate(Datum::Value(json!(99.5))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Value(json!(99.5))));

        let verdict = evaluator.evaluate(Datum::Value(json!(100))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Invalid));
    }

    #[tokio::test]
    async fn test_bound_integer_flag_rejects_fractions() {
        let evaluator = bind("min", &[json!(0), json!(true)]);
        let verdict = evaluator.evaluate(Datum::Value(json!("1.5"))).await.unwrap();
        assert_eq!(verdict, Verdict::Next(Datum::Invalid));
    }

    #[test]
    fn test_bound_without_numeric_argument_is_config_error() {
        let mut registry = Registry::new();
        register(&mut registry);
        let cx = ParamContext::new("field", Arc::new(Map::new()));
        assert!(registry.lookup("min").unwrap().bind(&[json!("x")], &cx).is_err());
        assert!(registry.lookup("max").unwrap().bind(&[], &cx).is_err());
    }
}
