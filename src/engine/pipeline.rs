// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The per-field parameter pipeline.
//!
//! A chain runs as a small state machine: `Running(i)` advances through the
//! evaluator list, terminating in `Failed` or `Succeeded`. At step `i` with
//! current value `v`:
//!
//! * evaluator error -> `Failed`, recorded under that evaluator's name;
//! * interrupt verdict -> `Succeeded` with the carried value unconditionally,
//!   sentinel or not, skipping every remaining evaluator;
//! * `Next(Invalid)` -> `Failed` under that evaluator's name;
//! * `Next(v')` at the last index -> `Succeeded(v')`;
//! * otherwise advance to step `i + 1` with `v'`.
//!
//! Exactly one failing constraint name is ever recorded per field: the first
//! in chain order to fail. Evaluators after a terminal outcome never run.

use std::sync::Arc;

use crate::traits::{Evaluator, Verdict};
use crate::value::Datum;

/// The terminal state of one field's chain.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOutcome {
    /// The chain ran to completion (or was interrupted); this is the value
    /// destined for the cleaned record.
    Succeeded(Datum),
    /// The chain stopped at a failing constraint.
    Failed { constraint: String },
}

/// Run one field's evaluator chain against its raw value.
///
/// An empty chain immediately succeeds with the value unmodified. The
/// pipeline never blocks or polls on its own; suspension happens only
/// inside leaf evaluators.
pub async fn run_chain(chain: &[Arc<dyn Evaluator>], initial: Datum) -> FieldOutcome {
    let mut current = initial;

    for evaluator in chain {
        match evaluator.evaluate(current).await {
            Err(err) => {
                tracing::debug!(constraint = evaluator.name(), error = %err, "evaluator error");
                return FieldOutcome::Failed {
                    constraint: evaluator.name().to_string(),
                };
            }
            Ok(Verdict::Interrupt(value)) => return FieldOutcome::Succeeded(value),
            Ok(Verdict::Next(Datum::Invalid)) => {
                return FieldOutcome::Failed {
                    constraint: evaluator.name().to_string(),
                }
            }
            Ok(Verdict::Next(value)) => current = value,
        }
    }

    FieldOutcome::Succeeded(current)
}
