// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Schema normalization: one schema entry -> ordered bound evaluators.
//!
//! Each `Named` spec resolves its factory through the registry and binds it
//! with the declared arguments plus the field's context. Two spec forms
//! escape that shape: `custom` wraps the caller's rule around the context
//! with no further logic, and `derive` additionally snapshots the named
//! sibling field's original raw value here, before any pipeline executes,
//! so the bound evaluator never reads the live record later.

use std::sync::Arc;

use crate::constraints::{CustomEvaluator, DeriveEvaluator};
use crate::errors::ConfigError;
use crate::schema::{ConstraintSpec, FieldSchema, ParamContext, Registry};
use crate::traits::Evaluator;

/// Turn one field's schema entry into its ordered evaluator chain.
///
/// An unresolved constraint name fails synchronously with
/// [`ConfigError::UnknownConstraint`]; the caller aborts the entire check.
pub fn normalize_field(
    registry: &Registry,
    cx: &ParamContext,
    schema: &FieldSchema,
) -> Result<Vec<Arc<dyn Evaluator>>, ConfigError> {
    let mut chain: Vec<Arc<dyn Evaluator>> = Vec::with_capacity(schema.len());

    for spec in schema.specs() {
        let evaluator: Arc<dyn Evaluator> = match spec {
            ConstraintSpec::Named { name, args } => {
                let factory = registry.lookup(name).ok_or_else(|| {
                    ConfigError::unknown_constraint(cx.field(), name.clone())
                })?;
                factory.bind(args, cx)?
            }
            ConstraintSpec::Custom { rule } => {
                Arc::new(CustomEvaluator::new(Arc::clone(rule), cx.clone()))
            }
            ConstraintSpec::Derive { field, rule } => {
                Arc::new(DeriveEvaluator::new(Arc::clone(rule), cx.sibling(field)))
            }
        };
        chain.push(evaluator);
    }

    Ok(chain)
}
