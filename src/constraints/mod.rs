// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in leaf constraints.
//!
//! Each leaf is a small, independent evaluator plus a factory registration.
//! Everything here is consumed through the registry contract; the engine
//! knows nothing about individual constraints.

pub mod booleans;
pub mod custom;
pub mod date;
pub mod derive;
pub mod formats;
pub mod lookup;
pub mod numbers;
pub mod optional;
pub mod pattern;
pub mod required;

pub use custom::CustomEvaluator;
pub use derive::DeriveEvaluator;
pub use lookup::DocumentLookup;

use std::sync::Arc;

use crate::errors::ConfigError;
use crate::schema::{ParamContext, Registry};

/// Install every built-in constraint that needs no external collaborator.
pub fn install_builtins(registry: &mut Registry) {
    required::register(registry);
    pattern::register(registry);
    numbers::register(registry);
    date::register(registry);
    formats::register(registry);
    booleans::register(registry);
    optional::register(registry);
}

/// Install `isDocument` / `isNotDocument` backed by the given lookup.
///
/// These two take their external existence check as a collaborator rather
/// than a declared argument, so they are installed separately from the
/// plain builtins.
pub fn install_document_checks(registry: &mut Registry, lookup: Arc<dyn DocumentLookup>) {
    lookup::register(registry, lookup);
}

pub(crate) fn bad_args(
    cx: &ParamContext,
    constraint: &str,
    reason: impl Into<String>,
) -> ConfigError {
    ConfigError::bad_arguments(cx.field(), constraint, reason)
}
