use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::LeafError;
use crate::schema::DeriveRule;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// `derive` - a cross-field rule over a sibling field's original raw value.
///
/// The sibling value is a snapshot handed over by the normalizer before any
/// pipeline executes; the evaluator never reads the live record. Bound
/// directly by the normalizer; this constraint has no registry factory.
pub struct DeriveEvaluator {
    rule: Arc<DeriveRule>,
    sibling: Value,
}

impl DeriveEvaluator {
    pub fn new(rule: Arc<DeriveRule>, sibling: Value) -> Self {
        Self { rule, sibling }
    }
}

#[async_trait]
impl Evaluator for DeriveEvaluator {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        match value {
            Datum::Value(v) => Ok(Verdict::Next((self.rule)(&v, &self.sibling))),
            Datum::Invalid => Ok(Verdict::Next(Datum::Invalid)),
        }
    }

    fn name(&self) -> &str {
        "derive"
    }
}
