// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Constraint registry: name -> factory resolution.
//!
//! The registry is an explicit value, not process-wide state. Callers pass
//! one into `check`; [`Registry::with_builtins`] gives the default instance
//! seeded with the built-in leaf constraints, and tests can build isolated
//! registries of their own. Lookup happens freshly during each check, so
//! registering a constraint takes effect for every subsequent check. Callers
//! must not mutate a registry concurrently with in-flight checks that depend
//! on a stable constraint set.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::errors::ConfigError;
use crate::schema::ParamContext;
use crate::traits::{ConstraintFactory, Evaluator};

/// Mapping from constraint name to evaluator factory.
#[derive(Clone, Default)]
pub struct Registry {
    factories: HashMap<String, Arc<dyn ConstraintFactory>>,
}

impl Registry {
    /// An empty registry with no constraints at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-seeded with the built-in leaf constraints.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::constraints::install_builtins(&mut registry);
        registry
    }

    /// Register (or replace) a factory under the given constraint name.
    pub fn register(&mut self, name: impl Into<String>, factory: Arc<dyn ConstraintFactory>) {
        self.factories.insert(name.into(), factory);
    }

    /// Register a factory expressed as a plain binding closure.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, bind: F)
    where
        F: Fn(&[Value], &ParamContext) -> Result<Arc<dyn Evaluator>, ConfigError>
            + Send
            + Sync
            + 'static,
    {
        self.register(name, Arc::new(FnFactory(bind)));
    }

    /// Resolve a constraint name to its factory.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ConstraintFactory>> {
        self.factories.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// All registered constraint names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("constraint_count", &self.factories.len())
            .field("constraints", &self.names())
            .finish()
    }
}

/// Adapter turning a binding closure into a [`ConstraintFactory`].
struct FnFactory<F>(F);

impl<F> ConstraintFactory for FnFactory<F>
where
    F: Fn(&[Value], &ParamContext) -> Result<Arc<dyn Evaluator>, ConfigError> + Send + Sync,
{
    fn bind(&self, args: &[Value], cx: &ParamContext) -> Result<Arc<dyn Evaluator>, ConfigError> {
        (self.0)(args, cx)
    }
}
