use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::LeafError;
use crate::schema::{CustomRule, ParamContext};
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// `custom` - wraps a caller-supplied rule, binding it to the field's
/// context with no further logic. Bound directly by the normalizer; this
/// constraint has no registry factory.
pub struct CustomEvaluator {
    rule: Arc<CustomRule>,
    cx: ParamContext,
}

impl CustomEvaluator {
    pub fn new(rule: Arc<CustomRule>, cx: ParamContext) -> Self {
        Self { rule, cx }
    }
}

#[async_trait]
impl Evaluator for CustomEvaluator {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        (self.rule)(&self.cx, value)
    }

    fn name(&self) -> &str {
        "custom"
    }
}
