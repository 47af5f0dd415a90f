// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use std::sync::{Arc, RwLock};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::Result;

static CONFIG: OnceCell<RwLock<Arc<Config>>> = OnceCell::new();

#[derive(Clone, Default, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Solver {
    /// Maximum number of seconds to let a single resolve call run before
    /// it is cancelled. Zero (the default) disables the timeout.
    pub solve_timeout_seconds: u64,

    /// Emit a higher-verbosity `tracing` event for every candidate the
    /// search considers, not just the ones it selects or rejects.
    /// Expensive; off by default.
    pub log_every_candidate: bool,
}

/// Configuration values for the resolver.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub solver: Solver,
}

impl Config {
    /// Get the current loaded config, loading it if needed.
    pub fn current() -> Result<Arc<Self>> {
        get_config()
    }

    /// Load the config from disk, even if it's already been loaded before.
    pub fn load() -> Result<Self> {
        load_config()
    }

    /// Make this config the current global one.
    pub fn make_current(self) -> Result<Arc<Self>> {
        let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
            Ok(RwLock::new(Arc::new(self.clone())))
        })?;

        let mut lock = config
            .write()
            .map_err(|err| crate::Error::LockPoisonedWrite(err.to_string()))?;
        *Arc::make_mut(&mut lock) = self;
        Ok(Arc::clone(&lock))
    }
}

/// Get the current resolver config, fetching it from disk if needed.
pub fn get_config() -> Result<Arc<Config>> {
    let config = CONFIG.get_or_try_init(|| -> Result<RwLock<Arc<Config>>> {
        Ok(RwLock::new(Arc::new(load_config()?)))
    })?;
    let lock = config
        .read()
        .map_err(|err| crate::Error::LockPoisonedRead(err.to_string()))?;
    Ok(Arc::clone(&lock))
}

/// Load the resolver configuration from disk, even if it has already
/// been loaded. Includes the system and user configurations (if they
/// exist) and `RSLV_`-prefixed environment variable overrides.
pub fn load_config() -> Result<Config> {
    use config::{Config as RawConfig, File};

    const USER_CONFIG_BASE: &str = "rslv/rslv";
    let user_config = dirs::config_local_dir().map(|dir| dir.join(USER_CONFIG_BASE));

    let mut config_builder = RawConfig::builder()
        .add_source(File::with_name("/etc/rslv").required(false));
    if let Some(user_config) = &user_config {
        config_builder =
            config_builder.add_source(File::with_name(&user_config.display().to_string()).required(false));
    }

    for (var, value) in std::env::vars() {
        let Some(tail) = var.strip_prefix("RSLV_") else {
            continue;
        };
        let Some((section, name)) = tail.split_once('_') else {
            continue;
        };
        let key = format!("{}.{}", section.to_lowercase(), name.to_lowercase());
        config_builder = config_builder.set_override(key, value)?;
    }

    let config = config_builder.build()?;
    Ok(Config::deserialize(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::default();
        assert_eq!(config.solver.solve_timeout_seconds, 0);
        assert!(!config.solver.log_every_candidate);
    }
}
