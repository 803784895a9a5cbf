//! String-format leaf constraints: `email`, `zip`, `phone`.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;

use crate::constraints::bad_args;
use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const ZIP_PATTERN: &str = r"^\d{5}$";

/// `email` / `zip` - the string must match the fixed format regex.
pub struct Format {
    name: &'static str,
    regex: Regex,
}

#[async_trait]
impl Evaluator for Format {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let matched = match value.as_value() {
            Some(Value::String(s)) => self.regex.is_match(s),
            Some(Value::Number(n)) if self.name == "zip" => self.regex.is_match(&n.to_string()),
            _ => false,
        };
        if matched {
            Ok(Verdict::Next(value))
        } else {
            Ok(Verdict::Next(Datum::Invalid))
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

/// `phone(digitsOnly?)` - extract exactly ten digits (a leading country `1`
/// is tolerated and stripped) and reformat. `digitsOnly` keeps the bare
/// digit string; otherwise the value becomes `(555) 123-4567`.
pub struct Phone {
    digits_only: bool,
}

#[async_trait]
impl Evaluator for Phone {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let raw = match value.as_value() {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => return Ok(Verdict::Next(Datum::Invalid)),
        };

        let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 11 && digits.starts_with('1') {
            digits.remove(0);
        }
        if digits.len() != 10 {
            return Ok(Verdict::Next(Datum::Invalid));
        }

        let formatted = if self.digits_only {
            digits
        } else {
            format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10])
        };
        Ok(Verdict::Next(Datum::Value(Value::String(formatted))))
    }

    fn name(&self) -> &str {
        "phone"
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("email", |_args, cx| {
        let regex = Regex::new(EMAIL_PATTERN).map_err(|e| bad_args(cx, "email", e.to_string()))?;
        Ok(Arc::new(Format {
            name: "email",
            regex,
        }) as Arc<dyn Evaluator>)
    });
    registry.register_fn("zip", |_args, cx| {
        let regex = Regex::new(ZIP_PATTERN).map_err(|e| bad_args(cx, "zip", e.to_string()))?;
        Ok(Arc::new(Format { name: "zip", regex }) as Arc<dyn Evaluator>)
    });
    registry.register_fn("phone", |args, _cx| {
        let digits_only = args.first().and_then(Value::as_bool).unwrap_or(false);
        Ok(Arc::new(Phone { digits_only }) as Arc<dyn Evaluator>)
    });
}
