// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use clap::{Parser, Subcommand};

use crate::cmd_resolve::CmdResolve;

/// Resolve a job's declared resource inputs to a single,
/// constraint-consistent set of versions.
#[derive(Debug, Parser)]
#[clap(about, version)]
pub struct Opt {
    /// Increase logging verbosity. May be repeated.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Resolve(CmdResolve),
}

impl Opt {
    pub async fn run(&self) -> crate::error::Result<i32> {
        match &self.command {
            Command::Resolve(cmd) => cmd.run().await,
        }
    }
}
