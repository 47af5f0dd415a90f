// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use std::collections::HashSet;
use std::sync::Arc;

use rslv_model::{BuildId, JobName, ResourceName, Version, VersionId};

use crate::Result;

/// The read-only interface the resolver consumes. A real deployment
/// backs this with a database that has its own indexes; the queries
/// here are the ones a DB can answer efficiently, which is why the
/// resolver's own `BuildSetIndex` only needs to *cache* calls into a
/// `Store`, not recompute them from raw rows.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Every version of `resource`, ordered ascending by check-order.
    async fn versions(&self, resource: &ResourceName) -> Result<Vec<Arc<Version>>>;

    /// The set of builds of `job` that output `version` of `resource`.
    async fn builds_of(
        &self,
        job: &JobName,
        resource: &ResourceName,
        version: &VersionId,
    ) -> Result<HashSet<BuildId>>;

    /// Every (resource, version) pair that `build` produced.
    async fn outputs_of(&self, build: BuildId) -> Result<HashSet<(ResourceName, VersionId)>>;

    /// The builds upstream of `build` via the pipe graph: builds whose
    /// output `build` consumed as an input.
    async fn pipes_into(&self, build: BuildId) -> Result<HashSet<BuildId>>;

    /// The most recent build of `current_job` that produced a version of
    /// `resource`, and the version it produced, if any.
    async fn latest_build_of_current(
        &self,
        current_job: &JobName,
        resource: &ResourceName,
    ) -> Result<Option<(BuildId, VersionId)>>;

    /// The version of `resource` consumed as an input by the most recent
    /// build of `current_job`, if any. This is the "frontier" every-mode
    /// iteration resumes from.
    async fn last_build_inputs(
        &self,
        current_job: &JobName,
        resource: &ResourceName,
    ) -> Result<Option<VersionId>>;
}
