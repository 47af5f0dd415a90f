// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! The Candidate Iterator: for one input declaration, the ordered
//! sequence of versions a search should try, already filtered to what
//! the input's own constraints allow (disabled, pinned, passed
//! individually).
//!
//! Shaped after `spk-solve-package-iterator`'s `RepositoryPackageIterator`:
//! a stateful, non-restartable cursor with an explicit starting point
//! and a fallback path, built once by an async constructor and then
//! drained with plain [`Iterator::next`].

use std::collections::VecDeque;
use std::sync::Arc;

use rslv_model::{InputDecl, JobName, Version, VersionId, VersionMode};
use rslv_resolve_index::BuildSetIndex;
use rslv_store::Store;

/// The ordered sequence of candidate versions for one input.
///
/// Exhausting the iterator without a feasible candidate is not itself
/// an error: callers ask [`CandidateIterator::failure_reason`] for the
/// input-level reason, which is `None` when the cause is a `passed`
/// constraint the correlator must diagnose (see its ordinal
/// numbering).
#[derive(Debug)]
pub struct CandidateIterator {
    candidates: VecDeque<Arc<Version>>,
    failure_reason: Option<String>,
}

impl Iterator for CandidateIterator {
    type Item = Arc<Version>;

    fn next(&mut self) -> Option<Self::Item> {
        self.candidates.pop_front()
    }
}

impl CandidateIterator {
    /// Build the candidate sequence for `decl`, consulting `store` for
    /// the resource's versions and prior builds, and `index` for
    /// per-job build membership.
    pub async fn new(
        current_job: &JobName,
        decl: &InputDecl,
        store: &dyn Store,
        index: &BuildSetIndex,
    ) -> rslv_store::Result<Self> {
        let versions = store.versions(&decl.resource).await?;

        let mut satisfying = Vec::with_capacity(versions.len());
        for version in &versions {
            if Self::satisfies_passed(decl, version, index).await? {
                satisfying.push(Arc::clone(version));
            }
        }

        let mode = Self::effective_mode(decl, &versions);

        let (candidates, failure_reason) = match mode {
            VersionMode::Pinned(target) => Self::pinned(&versions, &satisfying, &target),
            VersionMode::UnconstrainedLatest | VersionMode::Latest => {
                Self::latest(&satisfying, decl)
            }
            VersionMode::Every => {
                let cur = store
                    .last_build_inputs(current_job, &decl.resource)
                    .await?;
                Self::every(&versions, &satisfying, cur, decl)
            }
        };

        Ok(Self {
            candidates: candidates.into(),
            failure_reason,
        })
    }

    /// The reason this input could not be resolved, if the iterator
    /// itself can name one. `None` means the candidates ran dry
    /// because of an unsatisfied `passed` job, which the search must
    /// attribute to a specific ordinal.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Whether a further call to `next` would yield a candidate. Used by
    /// the search to decide whether an earlier input is worth resuming
    /// during backtracking.
    pub fn has_more(&self) -> bool {
        !self.candidates.is_empty()
    }

    async fn satisfies_passed(
        decl: &InputDecl,
        version: &Version,
        index: &BuildSetIndex,
    ) -> rslv_store::Result<bool> {
        for job in &decl.passed {
            if !index.has_build(job, &decl.resource, &version.id).await? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// An explicit input-level `pinned` always wins; absent that, a
    /// resource version flagged `api_pinned` behaves as if the input
    /// had pinned to it.
    fn effective_mode(decl: &InputDecl, versions: &[Arc<Version>]) -> VersionMode {
        if let VersionMode::Pinned(_) = &decl.version {
            return decl.version.clone();
        }
        if let Some(api_pinned) = versions.iter().find(|v| v.api_pinned) {
            return VersionMode::Pinned(api_pinned.id.clone());
        }
        decl.version.clone()
    }

    /// The existence/enabled check runs against the *full* version list,
    /// not `satisfying`: a pinned version that exists but fails one of
    /// its own `passed` jobs is not "not found" — it is a passed-job
    /// failure, which the search must diagnose by ordinal once this
    /// iterator yields no candidates with no reason of its own.
    fn pinned(
        versions: &[Arc<Version>],
        satisfying: &[Arc<Version>],
        target: &VersionId,
    ) -> (Vec<Arc<Version>>, Option<String>) {
        let Some(version) = versions.iter().find(|v| &v.id == target && v.enabled()) else {
            return (
                vec![],
                Some(format!("pinned version ver:{target} not found")),
            );
        };
        match satisfying.iter().find(|v| v.id == version.id) {
            Some(candidate) => (vec![Arc::clone(candidate)], None),
            None => (vec![], None),
        }
    }

    fn latest(
        satisfying: &[Arc<Version>],
        decl: &InputDecl,
    ) -> (Vec<Arc<Version>>, Option<String>) {
        let mut candidates: Vec<Arc<Version>> = satisfying
            .iter()
            .filter(|v| v.enabled())
            .cloned()
            .collect();
        candidates.reverse();
        let failure_reason = if candidates.is_empty() && decl.passed.is_empty() {
            Some("latest version of resource not found".to_string())
        } else {
            None
        };
        (candidates, failure_reason)
    }

    fn every(
        versions: &[Arc<Version>],
        satisfying: &[Arc<Version>],
        cur: Option<VersionId>,
        decl: &InputDecl,
    ) -> (Vec<Arc<Version>>, Option<String>) {
        let candidates = match cur.and_then(|id| versions.iter().find(|v| v.id == id)) {
            // No prior build of CURRENT_JOB for this resource: behaves
            // like `latest` (highest check-order first), not an
            // ascending scan from the oldest satisfying version.
            None => {
                let mut candidates: Vec<Arc<Version>> = satisfying
                    .iter()
                    .filter(|v| v.enabled())
                    .cloned()
                    .collect();
                candidates.reverse();
                candidates
            }
            Some(cur_version) => {
                let cur_order = cur_version.check_order;
                let mut candidates: Vec<Arc<Version>> = satisfying
                    .iter()
                    .filter(|v| v.check_order > cur_order && v.enabled())
                    .cloned()
                    .collect();

                match satisfying.iter().find(|v| v.id == cur_version.id) {
                    Some(cur_in_satisfying) if cur_in_satisfying.enabled() => {
                        candidates.push(Arc::clone(cur_in_satisfying));
                    }
                    _ => {
                        if let Some(fallback) = satisfying
                            .iter()
                            .filter(|v| v.check_order <= cur_order && v.enabled())
                            .max_by_key(|v| v.check_order)
                        {
                            candidates.push(Arc::clone(fallback));
                        }
                    }
                }

                candidates
            }
        };

        let failure_reason = if candidates.is_empty() && decl.passed.is_empty() {
            Some("latest version of resource not found".to_string())
        } else {
            None
        };
        (candidates, failure_reason)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rslv_model::{BuildInputRow, BuildOutputRow, CheckOrder, InputDecl, Snapshot};
    use rslv_store::MemoryStore;

    use super::*;

    fn version(resource: &str, id: &str, order: i64, disabled: bool) -> rslv_model::Version {
        rslv_model::Version {
            resource: resource.into(),
            id: id.into(),
            check_order: CheckOrder(order),
            disabled,
            api_pinned: false,
        }
    }

    #[tokio::test]
    async fn latest_descends_from_highest_check_order() {
        let snapshot = Snapshot {
            versions: vec![
                version("resource-x", "rxv1", 1, false),
                version("resource-x", "rxv2", 2, false),
            ],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot);
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(Snapshot::default())));
        let decl = InputDecl::new("resource-x", "resource-x");

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert_eq!(iter.next().unwrap().id, "rxv2".into());
        assert_eq!(iter.next().unwrap().id, "rxv1".into());
        assert!(iter.next().is_none());
    }

    #[tokio::test]
    async fn pinned_missing_version_reports_reason() {
        let snapshot = Snapshot {
            versions: vec![
                version("resource-x", "rxv1", 1, false),
                version("resource-x", "rxv3", 2, false),
                version("resource-x", "rxv4", 3, false),
            ],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot);
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(Snapshot::default())));
        let decl =
            InputDecl::new("resource-x", "resource-x").with_mode(VersionMode::Pinned("rxv2".into()));

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert!(iter.next().is_none());
        assert_eq!(
            iter.failure_reason(),
            Some("pinned version ver:rxv2 not found")
        );
    }

    #[tokio::test]
    async fn pinned_version_present_but_failing_passed_leaves_reason_for_the_search() {
        // rxv2 exists and is enabled, but no build of "some-job" ever
        // produced it: this is a passed-job failure, not a "not found"
        // — the iterator reports no reason of its own and leaves the
        // ordinal diagnosis to the search.
        let snapshot = Snapshot {
            versions: vec![version("resource-x", "rxv2", 1, false)],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot.clone());
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(snapshot)));
        let decl = InputDecl::new("resource-x", "resource-x")
            .with_mode(VersionMode::Pinned("rxv2".into()))
            .with_passed(["some-job".into()]);

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert!(iter.next().is_none());
        assert_eq!(iter.failure_reason(), None);
    }

    #[tokio::test]
    async fn every_mode_no_prior_build_starts_from_highest_satisfying_version() {
        let snapshot = Snapshot {
            versions: vec![
                version("resource-x", "rxv1", 1, false),
                version("resource-x", "rxv2", 2, false),
                version("resource-x", "rxv3", 3, true),
            ],
            build_outputs: vec![
                BuildOutputRow {
                    job: "simple-a".into(),
                    build: rslv_model::BuildId(1),
                    resource: "resource-x".into(),
                    version: "rxv1".into(),
                },
                BuildOutputRow {
                    job: "simple-a".into(),
                    build: rslv_model::BuildId(2),
                    resource: "resource-x".into(),
                    version: "rxv2".into(),
                },
            ],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot.clone());
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(snapshot)));
        let decl = InputDecl::new("resource-x", "resource-x")
            .with_mode(VersionMode::Every)
            .with_passed(["simple-a".into()]);

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert_eq!(iter.next().unwrap().id, "rxv2".into());
        assert_eq!(iter.next().unwrap().id, "rxv1".into());
        assert!(iter.next().is_none());
    }

    #[tokio::test]
    async fn every_mode_all_newer_disabled_falls_back_to_current() {
        let snapshot = Snapshot {
            versions: vec![
                version("resource-x", "rxv3", 1, false),
                version("resource-x", "rxv4", 2, true),
            ],
            build_inputs: vec![BuildInputRow {
                job: "current".into(),
                build: rslv_model::BuildId(1),
                resource: "resource-x".into(),
                version: "rxv3".into(),
            }],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot);
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(Snapshot::default())));
        let decl = InputDecl::new("resource-x", "resource-x").with_mode(VersionMode::Every);

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert_eq!(iter.next().unwrap().id, "rxv3".into());
        assert!(iter.next().is_none());
    }

    #[tokio::test]
    async fn every_mode_advances_past_current_build() {
        let snapshot = Snapshot {
            versions: vec![
                version("resource-x", "rxv1", 1, false),
                version("resource-x", "rxv2", 2, false),
                version("resource-x", "rxv3", 3, false),
            ],
            build_inputs: vec![BuildInputRow {
                job: "current".into(),
                build: rslv_model::BuildId(1),
                resource: "resource-x".into(),
                version: "rxv1".into(),
            }],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot);
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(Snapshot::default())));
        let decl = InputDecl::new("resource-x", "resource-x").with_mode(VersionMode::Every);

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert_eq!(iter.next().unwrap().id, "rxv2".into());
        assert_eq!(iter.next().unwrap().id, "rxv3".into());
        assert_eq!(iter.next().unwrap().id, "rxv1".into());
        assert!(iter.next().is_none());
    }

    #[tokio::test]
    async fn passed_individually_filters_out_non_matching_versions() {
        let snapshot = Snapshot {
            versions: vec![
                version("resource-x", "rxv1", 1, false),
                version("resource-x", "rxv2", 2, false),
            ],
            build_outputs: vec![BuildOutputRow {
                job: "simple-a".into(),
                build: rslv_model::BuildId(1),
                resource: "resource-x".into(),
                version: "rxv1".into(),
            }],
            ..Default::default()
        };
        let store = MemoryStore::new(snapshot.clone());
        let index = BuildSetIndex::new(Arc::new(MemoryStore::new(snapshot)));
        let decl = InputDecl::new("resource-x", "resource-x").with_passed(["simple-a".into()]);

        let mut iter = CandidateIterator::new(&"current".into(), &decl, &store, &index)
            .await
            .unwrap();
        assert_eq!(iter.next().unwrap().id, "rxv1".into());
        assert!(iter.next().is_none());
    }
}
