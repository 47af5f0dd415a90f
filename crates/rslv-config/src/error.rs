// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot load config, lock has been poisoned: {0}")]
    LockPoisonedRead(String),
    #[error("cannot update config, lock has been poisoned: {0}")]
    LockPoisonedWrite(String),
    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
