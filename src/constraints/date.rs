use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// `date` - parse-or-fail. Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, or an
/// RFC 3339 timestamp; the sanidized value is the canonical `YYYY-MM-DD`
/// string.
pub struct Date;

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%m/%d/%Y"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}

#[async_trait]
impl Evaluator for Date {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let parsed = match value.as_value() {
            Some(Value::String(s)) => parse_date(s),
            _ => None,
        };
        match parsed {
            Some(date) => Ok(Verdict::Next(Datum::Value(Value::String(
                date.format("%Y-%m-%d").to_string(),
            )))),
            None => Ok(Verdict::Next(Datum::Invalid)),
        }
    }

    fn name(&self) -> &str {
        "date"
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("date", |_args, _cx| Ok(Arc::new(Date)));
}
