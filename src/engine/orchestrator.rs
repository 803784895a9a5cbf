// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The record orchestrator: whole-record fan-out and join.
//!
//! `check` normalizes every schema field up front (an unresolved constraint
//! name aborts here, before any pipeline runs), launches one independent
//! parameter pipeline per field, joins on all of them, and aggregates the
//! terminal outcomes into a cleaned record plus an error report.
//!
//! Fields have no ordering dependency on each other's sanidized output; the
//! only cross-field read is the `derive` snapshot, which the normalizer
//! takes from the shared original-record snapshot before execution begins.
//! There is no early abort: every field runs to completion exactly once
//! regardless of other fields' failures, trading fail-fast for a complete,
//! consistent error report. Pipelines are cooperative futures interleaved
//! by the runtime; the join holds no ordering expectation across fields.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::engine::pipeline::{run_chain, FieldOutcome};
use crate::errors::ConfigError;
use crate::observability::messages::engine::{CheckCompleted, CheckStarted, FieldChainFailed};
use crate::observability::messages::StructuredLog;
use crate::schema::{normalize_field, ParamContext, Registry, Schema};
use crate::value::Datum;

/// Per-field failure summary for one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ErrorReport {
    /// Number of failed fields.
    pub count: usize,
    /// Field name -> name of the first failing constraint in its chain.
    pub errors: HashMap<String, String>,
}

/// The aggregate result of one check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanidationResult {
    /// Succeeded fields with their sanidized values.
    pub cleaned: Map<String, Value>,
    /// `None` when every field succeeded.
    pub report: Option<ErrorReport>,
}

impl SanidationResult {
    pub fn is_ok(&self) -> bool {
        self.report.is_none()
    }
}

/// Check a record against a schema, keeping null-valued successes.
pub async fn check(
    registry: &Registry,
    record: &Map<String, Value>,
    schema: &Schema,
) -> Result<SanidationResult, ConfigError> {
    check_with(registry, record, schema, false).await
}

/// Check a record against a schema.
///
/// When `exclude_empty` is set, succeeded fields whose final value is null
/// are omitted from the cleaned record without counting as errors.
pub async fn check_with(
    registry: &Registry,
    record: &Map<String, Value>,
    schema: &Schema,
    exclude_empty: bool,
) -> Result<SanidationResult, ConfigError> {
    let started = Instant::now();
    let snapshot = Arc::new(record.clone());

    // Normalize every field before launching anything; a ConfigError here
    // aborts the whole check with no pipeline having run.
    let mut pipelines = Vec::with_capacity(schema.len());
    for (field, field_schema) in schema.iter() {
        let cx = ParamContext::new(field.clone(), Arc::clone(&snapshot));
        let chain = normalize_field(registry, &cx, field_schema)?;
        let original = cx.original().clone();
        pipelines.push((field.clone(), original, chain));
    }

    CheckStarted {
        field_count: pipelines.len(),
    }
    .log();

    let tasks = pipelines.into_iter().map(|(field, original, chain)| async move {
        let outcome = run_chain(&chain, Datum::Value(original)).await;
        (field, outcome)
    });
    let outcomes = join_all(tasks).await;

    let mut cleaned = Map::new();
    let mut errors = HashMap::new();
    for (field, outcome) in outcomes {
        match outcome {
            FieldOutcome::Succeeded(datum) => {
                // An interrupt may legitimately carry the sentinel; in the
                // cleaned record that reads as "no value", i.e. null.
                let value = datum.into_value().unwrap_or(Value::Null);
                if exclude_empty && value.is_null() {
                    continue;
                }
                cleaned.insert(field, value);
            }
            FieldOutcome::Failed { constraint } => {
                FieldChainFailed {
                    field: &field,
                    constraint: &constraint,
                }
                .log();
                errors.insert(field, constraint);
            }
        }
    }

    let field_count = schema.len();
    let failure_count = errors.len();
    let report = if errors.is_empty() {
        None
    } else {
        Some(ErrorReport {
            count: failure_count,
            errors,
        })
    };

    CheckCompleted {
        field_count,
        failure_count,
        duration: started.elapsed(),
    }
    .log();

    Ok(SanidationResult { cleaned, report })
}
