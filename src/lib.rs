// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Combined sanitize+validate ("sanidate") engine for key-value records.
//!
//! A caller declares a [`Schema`]: per field, an ordered chain of
//! constraints. [`check`] runs every field's chain concurrently against the
//! raw record and yields a cleaned, type-converted record plus an error
//! report naming the first failing constraint per field.

pub mod constraints; // built-in leaf evaluators + registration
pub mod engine;      // pipeline + orchestrator
pub mod errors;      // error handling
pub mod observability;
pub mod schema;      // schema types, registry, normalizer
pub mod traits;      // unified abstractions
pub mod value;       // chain value + invalid sentinel

pub use constraints::{install_builtins, install_document_checks, DocumentLookup};
pub use engine::{check, check_with, ErrorReport, SanidationResult};
pub use errors::{ConfigError, LeafError};
pub use schema::{ConstraintSpec, FieldSchema, ParamContext, Registry, Schema};
pub use traits::{ConstraintFactory, Evaluator, Verdict};
pub use value::Datum;
