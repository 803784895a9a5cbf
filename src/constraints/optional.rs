use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// `optional(default?)` - when the value is absent (JSON null), interrupt
/// the chain with the declared default, accepting it unconditionally and
/// skipping every remaining constraint. Present values pass through.
pub struct Optional {
    default: Value,
}

#[async_trait]
impl Evaluator for Optional {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        if value.is_missing() {
            Ok(Verdict::Interrupt(Datum::Value(self.default.clone())))
        } else {
            Ok(Verdict::Next(value))
        }
    }

    fn name(&self) -> &str {
        "optional"
    }
}

pub(crate) fn register(registry: &mut Registry) {
    registry.register_fn("optional", |args, _cx| {
        let default = args.first().cloned().unwrap_or(Value::Null);
        Ok(Arc::new(Optional { default }))
    });
}
