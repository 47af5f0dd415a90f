// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Hard I/O-style failures from the version store. Per spec, these
/// abort the whole resolve call; they are distinct from the per-input
/// failures that live inside a successful `Resolution`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("resource {0} not found")]
    ResourceNotFound(String),
    #[error("store read failed: {0}")]
    ReadFailed(String),
}
