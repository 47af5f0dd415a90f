// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use std::collections::HashSet;
use std::sync::Arc;

use rslv_model::{BuildId, JobName, ResourceName, Snapshot, Version, VersionId};

use crate::store::Store;
use crate::Result;

/// An in-memory `Store` built from a [`Snapshot`]. Used by tests and by
/// the CLI's offline mode. Answers every query by a linear scan of the
/// snapshot's rows — fine at test/CLI scale, and it keeps this
/// implementation an honest reference rather than a second index to
/// keep in sync with the real thing.
///
/// Builds are assumed to be numbered in the order they ran, matching
/// an append-only, auto-incrementing build id in a real database:
/// "the most recent build" of a job is the one with the highest id
/// among the matching rows.
#[derive(Debug)]
pub struct MemoryStore {
    snapshot: Snapshot,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn versions(&self, resource: &ResourceName) -> Result<Vec<Arc<Version>>> {
        let mut versions: Vec<Version> = self
            .snapshot
            .versions
            .iter()
            .filter(|v| &v.resource == resource)
            .cloned()
            .collect();
        rslv_model::sort_ascending(&mut versions);
        Ok(versions.into_iter().map(Arc::new).collect())
    }

    async fn builds_of(
        &self,
        job: &JobName,
        resource: &ResourceName,
        version: &VersionId,
    ) -> Result<HashSet<BuildId>> {
        Ok(self
            .snapshot
            .build_outputs
            .iter()
            .filter(|row| &row.job == job && &row.resource == resource && &row.version == version)
            .map(|row| row.build)
            .collect())
    }

    async fn outputs_of(&self, build: BuildId) -> Result<HashSet<(ResourceName, VersionId)>> {
        Ok(self
            .snapshot
            .build_outputs
            .iter()
            .filter(|row| row.build == build)
            .map(|row| (row.resource.clone(), row.version.clone()))
            .collect())
    }

    async fn pipes_into(&self, build: BuildId) -> Result<HashSet<BuildId>> {
        Ok(self
            .snapshot
            .build_pipes
            .iter()
            .filter(|pipe| pipe.to_build == build)
            .map(|pipe| pipe.from_build)
            .collect())
    }

    async fn latest_build_of_current(
        &self,
        current_job: &JobName,
        resource: &ResourceName,
    ) -> Result<Option<(BuildId, VersionId)>> {
        Ok(self
            .snapshot
            .build_outputs
            .iter()
            .filter(|row| &row.job == current_job && &row.resource == resource)
            .max_by_key(|row| row.build)
            .map(|row| (row.build, row.version.clone())))
    }

    async fn last_build_inputs(
        &self,
        current_job: &JobName,
        resource: &ResourceName,
    ) -> Result<Option<VersionId>> {
        Ok(self
            .snapshot
            .build_inputs
            .iter()
            .filter(|row| &row.job == current_job && &row.resource == resource)
            .max_by_key(|row| row.build)
            .map(|row| row.version.clone()))
    }
}
