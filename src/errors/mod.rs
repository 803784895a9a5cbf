// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for schema normalization and leaf evaluation.
//!
//! Two channels exist and they are deliberately asymmetric:
//!
//! * [`ConfigError`] is fatal and synchronous. It is raised while a schema
//!   entry is being normalized, before any field pipeline runs, and aborts
//!   the whole check. It is surfaced to the caller directly, never through
//!   the error report.
//! * [`LeafError`] is recoverable and per-field. An evaluator that fails
//!   internally (for example an external lookup going away) terminates its
//!   own field's chain; the field is recorded in the error report under the
//!   failing constraint's name, the same slot a plain validation failure
//!   uses. Other fields are unaffected.

use thiserror::Error;

/// Fatal schema configuration errors, detected at normalization time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A schema entry names a constraint the registry does not know.
    #[error("unknown constraint '{constraint}' for field '{field}'")]
    UnknownConstraint { field: String, constraint: String },

    /// A constraint's declared arguments do not fit its factory.
    #[error("constraint '{constraint}' on field '{field}': {reason}")]
    BadArguments {
        field: String,
        constraint: String,
        reason: String,
    },
}

impl ConfigError {
    pub fn unknown_constraint(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        ConfigError::UnknownConstraint {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    pub fn bad_arguments(
        field: impl Into<String>,
        constraint: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::BadArguments {
            field: field.into(),
            constraint: constraint.into(),
            reason: reason.into(),
        }
    }
}

/// An evaluator-internal failure, reported through the per-field channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeafError {
    /// An external document lookup could not be completed.
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// Any other evaluator-internal failure.
    #[error("{0}")]
    Evaluator(String),
}
