// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Message types follow a struct-based pattern with a `Display`
//! implementation and a [`messages::StructuredLog`] impl, so call sites emit
//! one consistent line per event instead of scattering format strings
//! through the engine.

pub mod messages;
