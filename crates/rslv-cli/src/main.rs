// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! `rslv`: the resolver's one externally-invoked operation, `resolve`,
//! exposed as a command-line tool for exercising a snapshot offline
//! (outside the scheduling loop that calls `Resolver::resolve` in
//! production).

mod cli;
mod cmd_resolve;
mod error;
mod logging;

use clap::Parser;

fn main() -> miette::Result<()> {
    let opt = cli::Opt::parse();
    logging::configure(opt.verbose)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| miette::miette!("failed to start async runtime: {err}"))?;

    let code = rt.block_on(opt.run())?;
    std::process::exit(code);
}
