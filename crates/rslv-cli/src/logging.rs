// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! Logging setup, adapted from `spk-cli-common`'s `configure_logging`:
//! a verbosity count maps to an `EnvFilter` directive string, with a
//! `RSLV_LOG` environment override for ad-hoc debugging.

use tracing_subscriber::layer::SubscriberExt;

pub fn configure(verbosity: u8) -> miette::Result<()> {
    let mut directives = match verbosity {
        0 => "rslv=info".to_string(),
        1 => "rslv=debug".to_string(),
        2 => "rslv=trace".to_string(),
        _ => "rslv=trace,rslv_resolve=trace".to_string(),
    };
    if let Ok(overrides) = std::env::var("RSLV_LOG") {
        directives = overrides;
    }

    let env_filter = tracing_subscriber::filter::EnvFilter::new(directives);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbosity > 0);
    let subscriber = tracing_subscriber::Registry::default()
        .with(env_filter)
        .with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| miette::miette!("failed to install logger: {err}"))
}
