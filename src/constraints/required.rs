use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// `required` - fails on falsy values (null, false, "", 0).
pub struct Required;

#[async_trait]
impl Evaluator for Required {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        if value.is_falsy() {
            Ok(Verdict::Next(Datum::Invalid))
        } else {
            Ok(Verdict::Next(value))
        }
    }

    fn name(&self) -> &str {
        "required"
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("required", |_args, _cx| Ok(Arc::new(Required)));
}
