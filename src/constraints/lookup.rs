//! External existence checks: `isDocument`, `isNotDocument`.
//!
//! These are the asynchronous leaves: the existence check may suspend on a
//! real backend. The lookup collaborator is captured by the factory at
//! registration time (see `install_document_checks`), the Rust rendition of
//! passing a lookup function in the schema. A lookup failure surfaces as a
//! [`LeafError`] and lands in the error report under this constraint's name.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::LeafError;
use crate::schema::Registry;
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// An external document-existence check.
#[async_trait]
pub trait DocumentLookup: Send + Sync {
    /// Whether a document exists for `key` with this value. `key` is the
    /// constraint's declared key argument, defaulting to the field name.
    async fn exists(&self, key: &str, value: &Value) -> Result<bool, LeafError>;
}

/// `isDocument(key?)` / `isNotDocument(key?)` - fail when the lookup
/// reports absence resp. presence.
pub struct DocumentCheck {
    lookup: Arc<dyn DocumentLookup>,
    key: String,
    expect_present: bool,
}

#[async_trait]
impl Evaluator for DocumentCheck {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        let Some(v) = value.as_value() else {
            return Ok(Verdict::Next(Datum::Invalid));
        };
        let present = self.lookup.exists(&self.key, v).await?;
        if present == self.expect_present {
            Ok(Verdict::Next(value))
        } else {
            Ok(Verdict::Next(Datum::Invalid))
        }
    }

    fn name(&self) -> &str {
        if self.expect_present {
            "isDocument"
        } else {
            "isNotDocument"
        }
    }
}

pub(crate) fn register(registry: &mut Registry, lookup: Arc<dyn DocumentLookup>) {
    let present_lookup = Arc::clone(&lookup);
    registry.register_fn("isDocument", move |args, cx| {
        Ok(Arc::new(DocumentCheck {
            lookup: Arc::clone(&present_lookup),
            key: key_from(args, cx),
            expect_present: true,
        }) as Arc<dyn Evaluator>)
    });
    registry.register_fn("isNotDocument", move |args, cx| {
        Ok(Arc::new(DocumentCheck {
            lookup: Arc::clone(&lookup),
            key: key_from(args, cx),
            expect_present: false,
        }) as Arc<dyn Evaluator>)
    });
}

fn key_from(args: &[Value], cx: &crate::schema::ParamContext) -> String {
    args.first()
        .and_then(Value::as_str)
        .unwrap_or(cx.field())
        .to_string()
}
