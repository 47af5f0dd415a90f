// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! The `resolve` subcommand: the CLI's one operation, loading a
//! snapshot and a job's input declarations from disk and running them
//! through [`rslv_resolve::Resolver`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use rslv_model::{InputDecl, JobName, Snapshot};
use rslv_resolve::Resolver;
use rslv_store::MemoryStore;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Resolve a job's resource inputs against a version-store snapshot.
#[derive(Debug, Parser)]
pub struct CmdResolve {
    /// The job being resolved for (`CURRENT_JOB` in the spec's terms).
    #[clap(long)]
    pub current_job: String,

    /// Path to a version-store snapshot (`.json`, `.yaml`, or `.yml`).
    #[clap(long)]
    pub snapshot: PathBuf,

    /// Path to the job's input declarations (`.json`, `.yaml`, or `.yml`).
    #[clap(long)]
    pub declarations: PathBuf,

    /// How to print the resolution result.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl CmdResolve {
    pub async fn run(&self) -> Result<i32> {
        let snapshot: Snapshot = load(&self.snapshot)?;
        let declarations: Vec<InputDecl> = load(&self.declarations)?;
        let current_job = JobName::from(self.current_job.as_str());

        let store = Arc::new(MemoryStore::new(snapshot));
        let resolver = Resolver::new(store);

        let cancel = CancellationToken::new();
        let timeout = rslv_config::Config::current()?.solver.solve_timeout_seconds;
        let _timeout_guard = (timeout > 0).then(|| {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                tokio::time::sleep(std::time::Duration::from_secs(timeout)).await;
                cancel.cancel();
            })
        });

        let result = resolver.resolve(&current_job, &declarations, cancel).await?;

        match self.format {
            OutputFormat::Json => {
                let rendered = render_json(&declarations, &result);
                println!("{}", serde_json::to_string_pretty(&rendered).unwrap());
            }
            OutputFormat::Text => print_text(&declarations, &result),
        }

        Ok(if result.ok() { 0 } else { 1 })
    }
}

fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&raw).map_err(|source| Error::Parse {
            path: path.display().to_string(),
            format: "json",
            source: Box::new(source),
        }),
        _ => serde_yaml::from_str(&raw).map_err(|source| Error::Parse {
            path: path.display().to_string(),
            format: "yaml",
            source: Box::new(source),
        }),
    }
}

fn render_json(
    declarations: &[InputDecl],
    result: &rslv_model::Resolution,
) -> serde_json::Value {
    use serde_json::json;
    let values: serde_json::Map<_, _> = declarations
        .iter()
        .filter_map(|decl| {
            result
                .values
                .get(&decl.name)
                .map(|v| (decl.name.to_string(), json!(v.to_string())))
        })
        .collect();
    let errors: serde_json::Map<_, _> = declarations
        .iter()
        .filter_map(|decl| {
            result
                .errors
                .get(&decl.name)
                .map(|reason| (decl.name.to_string(), json!(reason)))
        })
        .collect();
    let skipped: Vec<_> = declarations
        .iter()
        .filter(|decl| result.skipped.contains(&decl.name))
        .map(|decl| decl.name.to_string())
        .collect();

    json!({
        "ok": result.ok(),
        "values": values,
        "errors": errors,
        "skipped": skipped,
    })
}

fn print_text(declarations: &[InputDecl], result: &rslv_model::Resolution) {
    for decl in declarations {
        if let Some(version) = result.values.get(&decl.name) {
            println!("{} {} -> {}", "resolved".green(), decl.name, version);
        } else if let Some(reason) = result.errors.get(&decl.name) {
            println!("{} {}: {}", "error".red(), decl.name, reason);
        } else if result.skipped.contains(&decl.name) {
            println!("{} {}", "skipped".yellow(), decl.name);
        }
    }
    if result.ok() {
        println!("{}", "ok".green().bold());
    } else {
        println!("{}", "failed".red().bold());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rslv_resolve_macros::{build_output, input, snapshot, version};
    use rslv_store::MemoryStore;
    use tokio_util::sync::CancellationToken;

    use super::*;

    #[tokio::test]
    async fn render_json_reports_values_errors_and_skipped_in_declaration_order() {
        let snapshot = snapshot! {
            versions: [version!("resource-x", "rxv1", 1)],
        };
        let declarations = vec![
            input!("x", "resource-x"),
            input!("y", "resource-y"),
            input!("z", "resource-z"),
        ];

        let store = Arc::new(MemoryStore::new(snapshot));
        let result = Resolver::new(store)
            .resolve(&"current".into(), &declarations, CancellationToken::new())
            .await
            .unwrap();

        let rendered = render_json(&declarations, &result);
        assert_eq!(rendered["ok"], serde_json::json!(false));
        assert_eq!(rendered["values"]["x"], serde_json::json!("rxv1"));
        assert_eq!(
            rendered["errors"]["y"],
            serde_json::json!("latest version of resource not found")
        );
        assert_eq!(rendered["skipped"], serde_json::json!(["z"]));
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = std::env::temp_dir().join("rslv-cli-cmd-resolve-test");
        std::fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("decl.json");
        std::fs::write(&json_path, br#"[{"name":"x","resource":"resource-x"}]"#).unwrap();
        let loaded: Vec<InputDecl> = load(&json_path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "x".into());

        let yaml_path = dir.join("decl.yaml");
        std::fs::write(&yaml_path, b"- name: y\n  resource: resource-y\n").unwrap();
        let loaded: Vec<InputDecl> = load(&yaml_path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "y".into());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn load_missing_file_reports_a_read_error() {
        let err = load::<Vec<InputDecl>>(Path::new("/nonexistent/rslv-cli-test-decl.json"))
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }
}
