// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a `resolve` call outright, as opposed to the
/// per-input failures that live inside a successful [`rslv_model::Resolution`].
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The version store could not answer a query. Per spec this aborts
    /// the whole call with no partial result, unlike input-level failures.
    #[error(transparent)]
    #[diagnostic(forward(0))]
    Store(#[from] rslv_store::Error),

    /// The caller's cancellation token fired between candidate
    /// iterations. Distinguished from a store failure: there is no
    /// partial result to salvage either way, but the cause is external.
    #[error("resolve cancelled")]
    #[diagnostic(code(rslv_resolve::cancelled))]
    Cancelled,
}
