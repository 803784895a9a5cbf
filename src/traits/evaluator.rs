use async_trait::async_trait;

use crate::errors::LeafError;
use crate::value::Datum;

/// What an evaluator decided about the value it was given.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Hand this value to the next constraint in the chain. Handing over
    /// the invalid sentinel fails the field under this evaluator's name.
    Next(Datum),
    /// Accept this value as the field's final result unconditionally and
    /// skip every remaining constraint, sentinel or not. This is how a
    /// field legitimately resolves to "no value" without being an error.
    Interrupt(Datum),
}

/// A bound constraint: one step of a field's chain.
///
/// Evaluators may suspend (external lookups do); the pipeline only relies
/// on each call resolving exactly once, which `async fn` guarantees by
/// construction. Evaluators own their own timeout policy; the engine never
/// imposes one.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, value: Datum) -> Result<Verdict, LeafError>;

    /// The constraint name recorded in the error report when this step fails.
    fn name(&self) -> &str;
}
