// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors the CLI itself can hit, as distinct from a [`rslv_resolve::Error`]
/// raised by a failed resolve call.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read {path}")]
    #[diagnostic(code(rslv_cli::io))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path} as {format}")]
    #[diagnostic(code(rslv_cli::parse))]
    Parse {
        path: String,
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] rslv_resolve::Error),

    #[error(transparent)]
    #[diagnostic(code(rslv_cli::config))]
    Config(#[from] rslv_config::Error),
}
