// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use rslv_model::{BuildId, InputDecl, InputName, JobName, VersionId};
use rslv_resolve_index::BuildSetIndex;

/// Checks whether extending a partial assignment with one more
/// `(input, version)` pair keeps every `passed` constraint jointly
/// satisfiable.
///
/// Grounded on `spk-solve-validation`'s validator pattern, generalized
/// from "does this one candidate satisfy this one rule" to "does this
/// candidate, together with everything chosen so far, still let every
/// shared job be witnessed by a single build." The actual check is the
/// simple one spec.md's design notes call for: per shared job, take
/// the intersection of each assigned input's build-id set and test
/// non-emptiness — no generic CSP machinery.
pub struct Correlator {
    index: Arc<BuildSetIndex>,
}

impl Correlator {
    pub fn new(index: Arc<BuildSetIndex>) -> Self {
        Self { index }
    }

    /// `None` if `candidate` may be assigned to `candidate_decl`
    /// alongside `assignment`; `Some(job)` naming the shared passed job
    /// whose builds no longer intersect otherwise.
    pub async fn feasible(
        &self,
        declarations: &[InputDecl],
        assignment: &HashMap<InputName, VersionId>,
        candidate_decl: &InputDecl,
        candidate: &VersionId,
    ) -> rslv_store::Result<Option<JobName>> {
        for job in &candidate_decl.passed {
            if !Self::is_shared(job, declarations) {
                continue;
            }

            let mut build_sets = Vec::new();
            for decl in declarations {
                if decl.name == candidate_decl.name || !decl.passed.contains(job) {
                    continue;
                }
                let Some(version) = assignment.get(&decl.name) else {
                    continue;
                };
                build_sets.push(self.index.builds_of(job, &decl.resource, version).await?);
            }
            build_sets.push(
                self.index
                    .builds_of(job, &candidate_decl.resource, candidate)
                    .await?,
            );

            if !Self::intersects(&build_sets) {
                return Ok(Some(job.clone()));
            }
        }
        Ok(None)
    }

    fn is_shared(job: &JobName, declarations: &[InputDecl]) -> bool {
        declarations
            .iter()
            .filter(|decl| decl.passed.contains(job))
            .count()
            >= 2
    }

    fn intersects(build_sets: &[Arc<HashSet<BuildId>>]) -> bool {
        let mut sets = build_sets.iter();
        let Some(first) = sets.next() else {
            return true;
        };
        let mut acc: HashSet<BuildId> = (**first).clone();
        for set in sets {
            acc.retain(|build| set.contains(build));
            if acc.is_empty() {
                return false;
            }
        }
        !acc.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rslv_model::{BuildOutputRow, Snapshot};
    use rslv_store::MemoryStore;

    use super::*;

    fn decl(name: &str, resource: &str, passed: &[&str]) -> InputDecl {
        InputDecl::new(name, resource)
            .with_passed(passed.iter().map(|j| JobName::from(*j)))
    }

    #[tokio::test]
    async fn blocks_when_shared_job_builds_do_not_intersect() {
        let snapshot = Snapshot {
            build_outputs: vec![
                BuildOutputRow {
                    job: "fan-in".into(),
                    build: rslv_model::BuildId(1),
                    resource: "resource-x".into(),
                    version: "rxv1".into(),
                },
                BuildOutputRow {
                    job: "fan-in".into(),
                    build: rslv_model::BuildId(2),
                    resource: "resource-y".into(),
                    version: "ryv1".into(),
                },
            ],
            ..Default::default()
        };
        let index = Arc::new(BuildSetIndex::new(Arc::new(MemoryStore::new(snapshot))));
        let correlator = Correlator::new(index);

        let declarations = vec![
            decl("x", "resource-x", &["fan-in"]),
            decl("y", "resource-y", &["fan-in"]),
        ];
        let mut assignment = HashMap::new();
        assignment.insert(InputName::from("x"), VersionId::from("rxv1"));

        let blocked = correlator
            .feasible(
                &declarations,
                &assignment,
                &declarations[1],
                &"ryv1".into(),
            )
            .await
            .unwrap();
        assert_eq!(blocked, Some("fan-in".into()));
    }

    #[tokio::test]
    async fn allows_when_a_single_build_witnesses_both_selections() {
        let snapshot = Snapshot {
            build_outputs: vec![
                BuildOutputRow {
                    job: "fan-in".into(),
                    build: rslv_model::BuildId(1),
                    resource: "resource-x".into(),
                    version: "rxv1".into(),
                },
                BuildOutputRow {
                    job: "fan-in".into(),
                    build: rslv_model::BuildId(1),
                    resource: "resource-y".into(),
                    version: "ryv1".into(),
                },
            ],
            ..Default::default()
        };
        let index = Arc::new(BuildSetIndex::new(Arc::new(MemoryStore::new(snapshot))));
        let correlator = Correlator::new(index);

        let declarations = vec![
            decl("x", "resource-x", &["fan-in"]),
            decl("y", "resource-y", &["fan-in"]),
        ];
        let mut assignment = HashMap::new();
        assignment.insert(InputName::from("x"), VersionId::from("rxv1"));

        let blocked = correlator
            .feasible(
                &declarations,
                &assignment,
                &declarations[1],
                &"ryv1".into(),
            )
            .await
            .unwrap();
        assert_eq!(blocked, None);
    }
}
