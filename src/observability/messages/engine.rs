// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for check lifecycle and field pipeline events.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use crate::observability::messages::StructuredLog;

/// A record check started: all field schemas normalized, pipelines launching.
///
/// # Log Level
/// `debug!` - routine per-call event
pub struct CheckStarted {
    pub field_count: usize,
}

impl Display for CheckStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Starting record check: {} field pipelines", self.field_count)
    }
}

impl StructuredLog for CheckStarted {
    fn log(&self) {
        tracing::debug!(field_count = self.field_count, "{}", self);
    }
}

/// One field's chain reached its `Failed` terminal state.
///
/// # Log Level
/// `debug!` - per-field validation failures are expected traffic
pub struct FieldChainFailed<'a> {
    pub field: &'a str,
    pub constraint: &'a str,
}

impl Display for FieldChainFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Field '{}' failed constraint '{}'",
            self.field, self.constraint
        )
    }
}

impl StructuredLog for FieldChainFailed<'_> {
    fn log(&self) {
        tracing::debug!(field = self.field, constraint = self.constraint, "{}", self);
    }
}

/// All field pipelines reached a terminal state and the result was built.
///
/// # Log Level
/// `info!` - one summary line per check
pub struct CheckCompleted {
    pub field_count: usize,
    pub failure_count: usize,
    pub duration: Duration,
}

impl Display for CheckCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Record check completed: {} fields, {} failures in {:?}",
            self.field_count, self.failure_count, self.duration
        )
    }
}

impl StructuredLog for CheckCompleted {
    fn log(&self) {
        tracing::info!(
            field_count = self.field_count,
            failure_count = self.failure_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}",
            self
        );
    }
}
