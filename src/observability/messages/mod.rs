// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Messages are organized by subsystem:
//!
//! * `engine` - check lifecycle and field pipeline events

use std::fmt::Display;

pub mod engine;

/// Emit a message through `tracing` with its structured fields attached.
pub trait StructuredLog: Display {
    fn log(&self);
}
