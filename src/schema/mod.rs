// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod normalizer;
mod registry;
mod types;

pub use normalizer::normalize_field;
pub use registry::Registry;
pub use types::{ConstraintSpec, CustomRule, DeriveRule, FieldSchema, ParamContext, Schema};
