// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod orchestrator;
mod pipeline;

#[cfg(test)]
mod integration_tests;

pub use orchestrator::{check, check_with, ErrorReport, SanidationResult};
pub use pipeline::{run_chain, FieldOutcome};
