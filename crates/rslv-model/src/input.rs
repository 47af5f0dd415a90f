// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::name::{InputName, JobName, ResourceName, VersionId};

/// How an input selects a candidate version, independent of `passed`
/// filtering (which applies under every mode).
#[derive(Clone, Debug, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum VersionMode {
    /// No explicit mode and no `passed` constraint: highest check-order,
    /// enabled only.
    UnconstrainedLatest,
    /// Explicit `latest`: highest check-order, enabled, satisfying every
    /// `passed` job individually.
    Latest,
    /// Pinned to a specific version identifier. An input's own `pinned`
    /// always wins over a resource's `api_pinned` flag.
    Pinned(VersionId),
    /// Advance one version at a time from the version used by the most
    /// recent build of the current job, per the every-mode scan policy.
    Every,
}

impl Default for VersionMode {
    fn default() -> Self {
        VersionMode::UnconstrainedLatest
    }
}

/// One declared resource input for the job being resolved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputDecl {
    pub name: InputName,
    pub resource: ResourceName,
    #[serde(default)]
    pub passed: Vec<JobName>,
    #[serde(default)]
    pub version: VersionMode,
}

impl InputDecl {
    pub fn new(name: impl Into<InputName>, resource: impl Into<ResourceName>) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            passed: Vec::new(),
            version: VersionMode::UnconstrainedLatest,
        }
    }

    pub fn with_passed(mut self, jobs: impl IntoIterator<Item = JobName>) -> Self {
        self.passed = jobs.into_iter().collect();
        if matches!(self.version, VersionMode::UnconstrainedLatest) {
            self.version = VersionMode::Latest;
        }
        self
    }

    pub fn with_mode(mut self, mode: VersionMode) -> Self {
        self.version = mode;
        self
    }

    pub fn has_passed(&self) -> bool {
        !self.passed.is_empty()
    }
}
