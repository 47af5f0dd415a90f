// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use rslv_model::{InputDecl, JobName};
use rslv_resolve_index::BuildSetIndex;
use rslv_store::Store;

/// When a `CandidateIterator` for `decl` yields no candidates and its
/// own `failure_reason` is `None`, the cause is a `passed` job no
/// version of the resource ever flowed through. Finds the first such
/// job, in `decl.passed` order, so the search can report it by
/// ordinal.
pub async fn first_unsatisfied_passed_job(
    decl: &InputDecl,
    store: &dyn Store,
    index: &BuildSetIndex,
) -> rslv_store::Result<Option<JobName>> {
    let versions = store.versions(&decl.resource).await?;
    for job in &decl.passed {
        let mut witnessed = false;
        for version in &versions {
            if index.has_build(job, &decl.resource, &version.id).await? {
                witnessed = true;
                break;
            }
        }
        if !witnessed {
            return Ok(Some(job.clone()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rslv_model::{BuildOutputRow, Snapshot};
    use rslv_store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn names_the_first_job_with_no_witnessing_build() {
        let snapshot = Snapshot {
            versions: vec![rslv_model::Version {
                resource: "resource-x".into(),
                id: "rxv1".into(),
                check_order: rslv_model::CheckOrder(1),
                disabled: false,
                api_pinned: false,
            }],
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
        let decl = InputDecl::new("x", "resource-x")
            .with_passed(["simple-a".into(), "simple-b".into()]);

        let job = first_unsatisfied_passed_job(&decl, &store, &index)
            .await
            .unwrap();
        assert_eq!(job, Some("simple-b".into()));
    }
}
