// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use serde::{Deserialize, Serialize};

use crate::name::{JobName, ResourceName, VersionId};

/// Identifies a build. Unique across all jobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildId(pub u64);

impl std::fmt::Display for BuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One row of a build's outputs: `build` produced `version` of `resource`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildOutputRow {
    pub job: JobName,
    pub build: BuildId,
    pub resource: ResourceName,
    pub version: VersionId,
}

/// One row of a build's inputs: `build` consumed `version` of `resource`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInputRow {
    pub job: JobName,
    pub build: BuildId,
    pub resource: ResourceName,
    pub version: VersionId,
}

/// A directed edge recording that `to_build` consumed an input that was
/// produced by `from_build`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BuildPipeRow {
    pub from_build: BuildId,
    pub to_build: BuildId,
}
