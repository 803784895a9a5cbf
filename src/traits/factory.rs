use std::sync::Arc;

use serde_json::Value;

use crate::errors::ConfigError;
use crate::schema::ParamContext;
use crate::traits::Evaluator;

/// Produces a bound evaluator from a constraint's declared arguments plus
/// the per-field context.
///
/// Binding happens freshly during each check, at schema normalization time,
/// so registry edits affect subsequent checks immediately. Argument problems
/// (wrong arity, malformed regex, non-numeric bound) are reported here as
/// [`ConfigError`] and abort the whole check before any pipeline runs.
pub trait ConstraintFactory: Send + Sync {
    fn bind(&self, args: &[Value], cx: &ParamContext) -> Result<Arc<dyn Evaluator>, ConfigError>;
}
