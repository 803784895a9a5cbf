// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end checks through the public surface: registry, schema,
//! normalizer, pipelines, orchestrator, and the built-in leaves together.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::constraints::{install_document_checks, DocumentLookup};
use crate::engine::{check, check_with};
use crate::errors::{ConfigError, LeafError};
use crate::schema::{ConstraintSpec, FieldSchema, Registry, Schema};
use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be a JSON object"),
    }
}

#[tokio::test]
async fn test_email_and_integer_record_cleans_fully() {
    let registry = Registry::with_builtins();
    let schema = Schema::new().field("email", "email").field("age", "integer");

    let result = check(
        &registry,
        &record(json!({ "email": "a@b.com", "age": "17" })),
        &schema,
    )
    .await
    .unwrap();

    assert!(result.is_ok());
    assert_eq!(result.cleaned.get("email"), Some(&json!("a@b.com")));
    // Type conversion: the raw string became a JSON number.
    assert_eq!(result.cleaned.get("age"), Some(&json!(17)));
}

#[tokio::test]
async fn test_required_rejects_empty_string() {
    let registry = Registry::with_builtins();
    let schema = Schema::new().field("name", "required");

    let result = check(&registry, &record(json!({ "name": "" })), &schema)
        .await
        .unwrap();

    assert!(result.cleaned.is_empty());
    let report = result.report.unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(report.errors.get("name"), Some(&"required".to_string()));
}

#[tokio::test]
async fn test_optional_default_bypasses_later_constraints() {
    let registry = Registry::with_builtins();
    // The field is absent, so `optional` interrupts with 0 and `match`
    // never sees the value. The falsy default is a success, not an error.
    let schema = Schema::new().field(
        "x",
        FieldSchema::new()
            .then(ConstraintSpec::with_args("optional", vec![json!(0)]))
            .then(ConstraintSpec::with_args("match", vec![json!(r"^\d+$")])),
    );

    let result = check(&registry, &record(json!({})), &schema).await.unwrap();

    assert!(result.is_ok());
    assert_eq!(result.cleaned.get("x"), Some(&json!(0)));
}

#[tokio::test]
async fn test_derive_confirms_matching_sibling() {
    let registry = Registry::with_builtins();
    let schema = Schema::new()
        .field("email", "email")
        .field(
            "emailconfirm",
            ConstraintSpec::derive("email", |v, o| {
                if v == o {
                    Datum::Value(v.clone())
                } else {
                    Datum::Invalid
                }
            }),
        );

    let result = check(
        &registry,
        &record(json!({ "email": "a@b.com", "emailconfirm": "a@b.com" })),
        &schema,
    )
    .await
    .unwrap();

    assert!(result.is_ok());
    assert_eq!(result.cleaned.get("email"), Some(&json!("a@b.com")));
    assert_eq!(result.cleaned.get("emailconfirm"), Some(&json!("a@b.com")));
}

#[tokio::test]
async fn test_derive_rejects_mismatched_sibling() {
    let registry = Registry::with_builtins();
    let schema = Schema::new()
        .field("email", "email")
        .field(
            "emailconfirm",
            ConstraintSpec::derive("email", |v, o| {
                if v == o {
                    Datum::Value(v.clone())
                } else {
                    Datum::Invalid
                }
            }),
        );

    let result = check(
        &registry,
        &record(json!({ "email": "a@b.com", "emailconfirm": "other@b.com" })),
        &schema,
    )
    .await
    .unwrap();

    // The sibling field itself still succeeds.
    assert_eq!(result.cleaned.get("email"), Some(&json!("a@b.com")));
    let report = result.report.unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(report.errors.get("emailconfirm"), Some(&"derive".to_string()));
}

#[tokio::test]
async fn test_first_failing_constraint_owns_the_error_slot() {
    let registry = Registry::with_builtins();
    // "" fails `required` first; `email` and `match` would also fail but
    // must never run.
    let schema = Schema::new().field(
        "email",
        FieldSchema::new()
            .then("required")
            .then("email")
            .then(ConstraintSpec::with_args("match", vec![json!("@b.com$")])),
    );

    let result = check(&registry, &record(json!({ "email": "" })), &schema)
        .await
        .unwrap();

    let report = result.report.unwrap();
    assert_eq!(report.errors.get("email"), Some(&"required".to_string()));
}

#[tokio::test]
async fn test_chain_threads_converted_values_forward() {
    let registry = Registry::with_builtins();
    // `integer` converts "21" to 21, then `min` compares the number.
    let schema = Schema::new().field(
        "age",
        FieldSchema::new()
            .then("required")
            .then("integer")
            .then(ConstraintSpec::with_args("min", vec![json!(18)])),
    );

    let result = check(&registry, &record(json!({ "age": "21" })), &schema)
        .await
        .unwrap();
    assert_eq!(result.cleaned.get("age"), Some(&json!(21)));

    let result = check(&registry, &record(json!({ "age": "15" })), &schema)
        .await
        .unwrap();
    let report = result.report.unwrap();
    assert_eq!(report.errors.get("age"), Some(&"min".to_string()));
}

#[tokio::test]
async fn test_mixed_record_reports_every_failure_once() {
    let registry = Registry::with_builtins();
    let schema = Schema::new()
        .field("email", "email")
        .field("zip", "zip")
        .field("phone", "phone")
        .field("joined", "date")
        .field("subscribed", "isTrue");

    let result = check(
        &registry,
        &record(json!({
            "email": "nope",
            "zip": "90210",
            "phone": "555-123-4567",
            "joined": "01/15/2024",
            "subscribed": "yes",
        })),
        &schema,
    )
    .await
    .unwrap();

    assert_eq!(result.cleaned.get("zip"), Some(&json!("90210")));
    assert_eq!(result.cleaned.get("phone"), Some(&json!("(555) 123-4567")));
    assert_eq!(result.cleaned.get("joined"), Some(&json!("2024-01-15")));
    assert_eq!(result.cleaned.get("subscribed"), Some(&json!(true)));

    let report = result.report.unwrap();
    assert_eq!(report.count, 1);
    assert_eq!(report.errors.get("email"), Some(&"email".to_string()));
}

#[tokio::test]
async fn test_exclude_empty_drops_null_optionals() {
    let registry = Registry::with_builtins();
    let schema = Schema::new()
        .field("name", "required")
        .field("nickname", "optional");

    let result = check_with(&registry, &record(json!({ "name": "a" })), &schema, true)
        .await
        .unwrap();

    assert!(result.is_ok());
    assert_eq!(result.cleaned.get("name"), Some(&json!("a")));
    assert!(result.cleaned.get("nickname").is_none());
}

struct MemoryLookup {
    taken: Vec<Value>,
}

#[async_trait]
impl DocumentLookup for MemoryLookup {
    async fn exists(&self, _key: &str, value: &Value) -> Result<bool, LeafError> {
        // Suspend once so the check exercises a real await point.
        tokio::task::yield_now().await;
        Ok(self.taken.contains(value))
    }
}

#[tokio::test]
async fn test_lookup_backed_field_end_to_end() {
    let mut registry = Registry::with_builtins();
    install_document_checks(
        &mut registry,
        Arc::new(MemoryLookup {
            taken: vec![json!("taken")],
        }),
    );

    let schema = Schema::new().field(
        "username",
        FieldSchema::new().then("required").then("isNotDocument"),
    );

    let result = check(&registry, &record(json!({ "username": "free" })), &schema)
        .await
        .unwrap();
    assert!(result.is_ok());
    assert_eq!(result.cleaned.get("username"), Some(&json!("free")));

    let result = check(&registry, &record(json!({ "username": "taken" })), &schema)
        .await
        .unwrap();
    let report = result.report.unwrap();
    assert_eq!(
        report.errors.get("username"),
        Some(&"isNotDocument".to_string())
    );
}

struct Shouting;

#[async_trait]
impl Evaluator for Shouting {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError> {
        match value.as_value() {
            Some(Value::String(s)) => Ok(Verdict::Next(Datum::Value(json!(s.to_uppercase())))),
            _ => Ok(Verdict::Next(Datum::Invalid)),
        }
    }

    fn name(&self) -> &str {
        "shouting"
    }
}

#[tokio::test]
async fn test_registration_takes_effect_for_subsequent_checks() {
    let mut registry = Registry::with_builtins();
    let schema = Schema::new().field("code", "shouting");
    let input = record(json!({ "code": "abc" }));

    // Lookup happens freshly per check, so the name is unknown now...
    let err = check(&registry, &input, &schema).await.unwrap_err();
    assert_eq!(err, ConfigError::unknown_constraint("code", "shouting"));

    // ...and resolves on the very next check once registered.
    registry.register_fn("shouting", |_args, _cx| Ok(Arc::new(Shouting)));

    let result = check(&registry, &input, &schema).await.unwrap();
    assert!(result.is_ok());
    assert_eq!(result.cleaned.get("code"), Some(&json!("ABC")));
}

#[tokio::test]
async fn test_custom_rule_in_a_chain() {
    let registry = Registry::with_builtins();
    let schema = Schema::new().field(
        "code",
        FieldSchema::new()
            .then("required")
            .then(ConstraintSpec::custom(|_cx, value| {
                let upper = match value.as_value() {
                    Some(Value::String(s)) => Datum::Value(json!(s.to_uppercase())),
                    _ => Datum::Invalid,
                };
                Ok(Verdict::Next(upper))
            })),
    );

    let result = check(&registry, &record(json!({ "code": "abc" })), &schema)
        .await
        .unwrap();
    assert_eq!(result.cleaned.get("code"), Some(&json!("ABC")));
}
