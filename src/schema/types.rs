// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Caller-facing schema types.
//!
//! A [`Schema`] maps field names to ordered constraint chains. Order inside
//! one [`FieldSchema`] is semantically significant: constraints execute in
//! declared order and each receives the previous constraint's output value.
//! The schema is caller-owned and immutable for the duration of one check.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::errors::LeafError;
use crate::traits::Verdict;
use crate::value::Datum;

/// A caller-supplied evaluation rule bound by the `custom` spec form.
pub type CustomRule = dyn Fn(&ParamContext, Datum) -> Result<Verdict, LeafError> + Send + Sync;

/// A cross-field rule bound by the `derive` spec form. Receives the chain's
/// current value and the named sibling field's original raw value; returns
/// the value to pass on, or the invalid sentinel to fail the field.
pub type DeriveRule = dyn Fn(&Value, &Value) -> Datum + Send + Sync;

/// One declared constraint in a field's chain.
///
/// `Named` entries are resolved through the registry. `Custom` and `Derive`
/// escape the normal factory shape: they carry Rust closures where the
/// registry carries factories, so the normalizer binds them directly.
#[derive(Clone)]
pub enum ConstraintSpec {
    /// A registered constraint plus its declared arguments.
    Named { name: String, args: Vec<Value> },
    /// An arbitrary caller-supplied evaluator, bound to the field context.
    Custom { rule: Arc<CustomRule> },
    /// A rule over a named sibling field's original raw value. The sibling
    /// value is snapshotted at normalization time, before any pipeline runs.
    Derive {
        field: String,
        rule: Arc<DeriveRule>,
    },
}

impl ConstraintSpec {
    /// A bare constraint name with no arguments.
    pub fn named(name: impl Into<String>) -> Self {
        ConstraintSpec::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// A parameterized constraint: the `[name, ...args]` form.
    pub fn with_args(name: impl Into<String>, args: Vec<Value>) -> Self {
        ConstraintSpec::Named {
            name: name.into(),
            args,
        }
    }

    pub fn custom<F>(rule: F) -> Self
    where
        F: Fn(&ParamContext, Datum) -> Result<Verdict, LeafError> + Send + Sync + 'static,
    {
        ConstraintSpec::Custom {
            rule: Arc::new(rule),
        }
    }

    pub fn derive<F>(field: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&Value, &Value) -> Datum + Send + Sync + 'static,
    {
        ConstraintSpec::Derive {
            field: field.into(),
            rule: Arc::new(rule),
        }
    }

    /// The constraint name this spec reports under.
    pub fn name(&self) -> &str {
        match self {
            ConstraintSpec::Named { name, .. } => name,
            ConstraintSpec::Custom { .. } => "custom",
            ConstraintSpec::Derive { .. } => "derive",
        }
    }
}

impl fmt::Debug for ConstraintSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintSpec::Named { name, args } => f
                .debug_struct("Named")
                .field("name", name)
                .field("args", args)
                .finish(),
            ConstraintSpec::Custom { .. } => f.write_str("Custom"),
            ConstraintSpec::Derive { field, .. } => {
                f.debug_struct("Derive").field("field", field).finish()
            }
        }
    }
}

impl From<&str> for ConstraintSpec {
    fn from(name: &str) -> Self {
        ConstraintSpec::named(name)
    }
}

/// The ordered constraint chain for one field.
#[derive(Clone, Default)]
pub struct FieldSchema {
    specs: Vec<ConstraintSpec>,
}

impl FieldSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint to the end of the chain.
    pub fn then(mut self, spec: impl Into<ConstraintSpec>) -> Self {
        self.specs.push(spec.into());
        self
    }

    pub fn specs(&self) -> &[ConstraintSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.specs.iter()).finish()
    }
}

impl From<&str> for FieldSchema {
    fn from(name: &str) -> Self {
        FieldSchema::new().then(name)
    }
}

impl From<ConstraintSpec> for FieldSchema {
    fn from(spec: ConstraintSpec) -> Self {
        FieldSchema::new().then(spec)
    }
}

impl From<Vec<ConstraintSpec>> for FieldSchema {
    fn from(specs: Vec<ConstraintSpec>) -> Self {
        Self { specs }
    }
}

/// Field-name to constraint-chain mapping for one record shape.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: HashMap<String, FieldSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) one field's chain. Builder-style.
    pub fn field(mut self, name: impl Into<String>, schema: impl Into<FieldSchema>) -> Self {
        self.fields.insert(name.into(), schema.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldSchema)> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Per-field execution context handed to factories at bind time.
///
/// Carries the field name, the field's original raw value, and a shared
/// read-only snapshot of the entire original record. The snapshot is taken
/// once per check and never mutated by any pipeline; it is what makes
/// `derive` possible without inter-pipeline ordering.
#[derive(Clone)]
pub struct ParamContext {
    field: String,
    original: Value,
    record: Arc<Map<String, Value>>,
}

impl ParamContext {
    pub fn new(field: impl Into<String>, record: Arc<Map<String, Value>>) -> Self {
        let field = field.into();
        // Absent fields enter their chain as JSON null.
        let original = record.get(&field).cloned().unwrap_or(Value::Null);
        Self {
            field,
            original,
            record,
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// This field's original raw value (null when absent from the record).
    pub fn original(&self) -> &Value {
        &self.original
    }

    /// The whole original record snapshot.
    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// A sibling field's original raw value (null when absent).
    pub fn sibling(&self, name: &str) -> Value {
        self.record.get(name).cloned().unwrap_or(Value::Null)
    }
}

impl fmt::Debug for ParamContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamContext")
            .field("field", &self.field)
            .field("original", &self.original)
            .field("record_fields", &self.record.len())
            .finish()
    }
}
