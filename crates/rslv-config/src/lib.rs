// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

mod config;
mod error;

pub use config::{Config, Solver, get_config, load_config};
pub use error::{Error, Result};
