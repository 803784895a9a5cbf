// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod evaluator;
pub mod factory;

pub use evaluator::{Evaluator, Verdict};
pub use factory::ConstraintFactory;
