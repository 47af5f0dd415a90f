// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! The Build-Set Index: a per-resolve-call cache in front of a
//! [`Store`], answering "does any build of job J produce version V of
//! resource R" and its reverse/upstream lookups without re-querying the
//! store for the same tuple twice in one search.
//!
//! Modeled on `spk-solve-validation`'s `ImpossibleRequestsChecker`,
//! which memoises its own read-only intersection-style queries in a
//! `DashMap` guarded by nothing more than the map itself — appropriate
//! here too, since a `BuildSetIndex` is built fresh for each `resolve`
//! call and never outlives it (spec: "invalidated on each invocation").

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use rslv_model::{BuildId, JobName, ResourceName, VersionId};
use rslv_store::Store;

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct BuildsOfKey {
    job: JobName,
    resource: ResourceName,
    version: VersionId,
}

/// Caches [`Store`] lookups for the duration of one resolve call.
pub struct BuildSetIndex {
    store: Arc<dyn Store>,
    builds_of_cache: DashMap<BuildsOfKey, Arc<HashSet<BuildId>>>,
    outputs_of_cache: DashMap<BuildId, Arc<HashSet<(ResourceName, VersionId)>>>,
    pipes_into_cache: DashMap<BuildId, Arc<HashSet<BuildId>>>,
    latest_build_cache: DashMap<(JobName, ResourceName), Arc<Option<(BuildId, VersionId)>>>,
}

impl BuildSetIndex {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            builds_of_cache: DashMap::new(),
            outputs_of_cache: DashMap::new(),
            pipes_into_cache: DashMap::new(),
            latest_build_cache: DashMap::new(),
        }
    }

    /// The set of builds of `job` that output `version` of `resource`.
    pub async fn builds_of(
        &self,
        job: &JobName,
        resource: &ResourceName,
        version: &VersionId,
    ) -> rslv_store::Result<Arc<HashSet<BuildId>>> {
        let key = BuildsOfKey {
            job: job.clone(),
            resource: resource.clone(),
            version: version.clone(),
        };
        if let Some(cached) = self.builds_of_cache.get(&key) {
            return Ok(Arc::clone(&cached));
        }
        let builds = Arc::new(self.store.builds_of(job, resource, version).await?);
        self.builds_of_cache.insert(key, Arc::clone(&builds));
        Ok(builds)
    }

    /// Every `(resource, version)` pair that `build` produced.
    pub async fn outputs_of(
        &self,
        build: BuildId,
    ) -> rslv_store::Result<Arc<HashSet<(ResourceName, VersionId)>>> {
        if let Some(cached) = self.outputs_of_cache.get(&build) {
            return Ok(Arc::clone(&cached));
        }
        let outputs = Arc::new(self.store.outputs_of(build).await?);
        self.outputs_of_cache.insert(build, Arc::clone(&outputs));
        Ok(outputs)
    }

    /// The builds upstream of `build` via the pipe graph.
    pub async fn pipes_into(&self, build: BuildId) -> rslv_store::Result<Arc<HashSet<BuildId>>> {
        if let Some(cached) = self.pipes_into_cache.get(&build) {
            return Ok(Arc::clone(&cached));
        }
        let pipes = Arc::new(self.store.pipes_into(build).await?);
        self.pipes_into_cache.insert(build, Arc::clone(&pipes));
        Ok(pipes)
    }

    /// The most recent build of `current_job` that produced a version of
    /// `resource`, and the version it produced.
    pub async fn latest_build_of_current(
        &self,
        current_job: &JobName,
        resource: &ResourceName,
    ) -> rslv_store::Result<Arc<Option<(BuildId, VersionId)>>> {
        let key = (current_job.clone(), resource.clone());
        if let Some(cached) = self.latest_build_cache.get(&key) {
            return Ok(Arc::clone(&cached));
        }
        let latest = Arc::new(
            self.store
                .latest_build_of_current(current_job, resource)
                .await?,
        );
        self.latest_build_cache.insert(key, Arc::clone(&latest));
        Ok(latest)
    }

    /// Does any build of `job` produce `version` of `resource`?
    pub async fn has_build(
        &self,
        job: &JobName,
        resource: &ResourceName,
        version: &VersionId,
    ) -> rslv_store::Result<bool> {
        Ok(!self.builds_of(job, resource, version).await?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rslv_model::{BuildOutputRow, Snapshot};
    use rslv_store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn builds_of_is_cached_across_calls() {
        let snapshot = Snapshot {
            build_outputs: vec![BuildOutputRow {
                job: "simple-a".into(),
                build: BuildId(1),
                resource: "resource-x".into(),
                version: "rxv1".into(),
            }],
            ..Default::default()
        };
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(snapshot)));
        let job = JobName::from("simple-a");
        let resource = ResourceName::from("resource-x");
        let version = VersionId::from("rxv1");

        let first = index.builds_of(&job, &resource, &version).await.unwrap();
        let second = index.builds_of(&job, &resource, &version).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, HashSet::from([BuildId(1)]));
    }

    #[tokio::test]
    async fn has_build_reflects_emptiness() {
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(Snapshot::default())));
        let found = index
            .has_build(
                &"simple-a".into(),
                &"resource-x".into(),
                &"rxv1".into(),
            )
            .await
            .unwrap();
        assert!(!found);
    }
}
