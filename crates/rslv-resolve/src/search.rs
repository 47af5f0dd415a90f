// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

#[cfg(test)]
#[path = "./search_test.rs"]
mod search_test;

use std::collections::HashMap;
use std::sync::Arc;

use rslv_model::{InputDecl, InputName, JobName, Resolution, VersionId};
use rslv_resolve_correlate::{Correlator, JobOrdinals, first_unsatisfied_passed_job};
use rslv_resolve_index::BuildSetIndex;
use rslv_resolve_iterator::CandidateIterator;
use rslv_resolve_result::ResolutionBuilder;
use rslv_store::Store;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Resolves a job's input declarations against a version store.
///
/// Grounded on `spk-solve`'s step solver (`solvers/step/solver.rs`):
/// declarations are tried in order, each against a per-input candidate
/// cursor, and a later input's dead end resumes an earlier input's
/// cursor rather than failing the whole call outright — the same
/// decide/step-back shape the teacher's `Decision`/`StepBack` nodes give
/// its package solver, specialised here to the narrower shared-job
/// backtracking spec.md's design notes call for.
pub struct Resolver {
    store: Arc<dyn Store>,
}

impl Resolver {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Resolve `declarations` for `current_job` against the store given
    /// at construction. `cancel` is checked between candidate advances;
    /// once fired, the call returns [`Error::Cancelled`] with no partial
    /// result.
    pub async fn resolve(
        &self,
        current_job: &JobName,
        declarations: &[InputDecl],
        cancel: CancellationToken,
    ) -> Result<Resolution> {
        let index = Arc::new(BuildSetIndex::new(Arc::clone(&self.store)));
        let correlator = Correlator::new(Arc::clone(&index));
        let ordinals = JobOrdinals::new(declarations);
        let log_every_candidate = rslv_config::Config::current()
            .map(|config| config.solver.log_every_candidate)
            .unwrap_or(false);

        let mut assignment: HashMap<InputName, VersionId> = HashMap::new();
        let mut iterators: Vec<Option<CandidateIterator>> = declarations.iter().map(|_| None).collect();
        let mut last_blocked: Vec<Option<JobName>> = declarations.iter().map(|_| None).collect();

        let mut i = 0usize;
        let mut hard_failure: Option<usize> = None;
        while i < declarations.len() {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }
            let decl = &declarations[i];
            if iterators[i].is_none() {
                iterators[i] = Some(
                    CandidateIterator::new(current_job, decl, self.store.as_ref(), &index).await?,
                );
                last_blocked[i] = None;
            }

            let mut found = None;
            while let Some(candidate) = iterators[i].as_mut().unwrap().next() {
                if cancel.is_cancelled() {
                    return Err(Error::Cancelled);
                }
                if log_every_candidate {
                    tracing::trace!(input = %decl.name, candidate = %candidate.id, "considering candidate");
                }
                match correlator
                    .feasible(declarations, &assignment, decl, &candidate.id)
                    .await?
                {
                    None => {
                        found = Some(candidate);
                        break;
                    }
                    Some(job) => last_blocked[i] = Some(job),
                }
            }

            match found {
                Some(version) => {
                    tracing::debug!(input = %decl.name, version = %version.id, "input resolved");
                    assignment.insert(decl.name.clone(), version.id.clone());
                    i += 1;
                }
                None => match Self::nearest_backtrackable(declarations, i, &iterators) {
                    Some(j) => {
                        tracing::debug!(from = %decl.name, to = %declarations[j].name, "backtracking");
                        for k in j..=i {
                            assignment.remove(&declarations[k].name);
                        }
                        for k in (j + 1)..=i {
                            iterators[k] = None;
                            last_blocked[k] = None;
                        }
                        i = j;
                    }
                    None => {
                        hard_failure = Some(i);
                        break;
                    }
                },
            }
        }

        let mut builder = ResolutionBuilder::new();
        match hard_failure {
            None => {
                for decl in declarations {
                    if let Some(version) = assignment.get(&decl.name) {
                        builder.resolve(decl.name.clone(), version.clone());
                    }
                }
            }
            Some(fail_idx) => {
                for (idx, decl) in declarations.iter().enumerate() {
                    if idx < fail_idx {
                        if let Some(version) = assignment.get(&decl.name) {
                            builder.resolve(decl.name.clone(), version.clone());
                        }
                    } else if idx == fail_idx {
                        let reason =
                            Self::diagnose(decl, &iterators[idx], &last_blocked[idx], self.store.as_ref(), &index, &ordinals)
                                .await?;
                        tracing::warn!(input = %decl.name, reason = %reason, "input failed to resolve");
                        builder.fail(decl.name.clone(), reason);
                    } else {
                        builder.skip(decl.name.clone());
                    }
                }
            }
        }

        Ok(builder.build())
    }

    /// The nearest earlier declaration that shares a `passed` job with
    /// `declarations[i]` and still has an untried candidate.
    fn nearest_backtrackable(
        declarations: &[InputDecl],
        i: usize,
        iterators: &[Option<CandidateIterator>],
    ) -> Option<usize> {
        let decl = &declarations[i];
        (0..i).rev().find(|&j| {
            declarations[j].passed.iter().any(|job| decl.passed.contains(job))
                && iterators[j].as_ref().is_some_and(CandidateIterator::has_more)
        })
    }

    /// The stable error string for a declaration whose candidate cursor
    /// ran dry: prefer the iterator's own reason, then the last shared
    /// job the correlator rejected every candidate for, then a fresh
    /// individual-passed diagnosis.
    async fn diagnose(
        decl: &InputDecl,
        iterator: &Option<CandidateIterator>,
        last_blocked: &Option<JobName>,
        store: &dyn Store,
        index: &BuildSetIndex,
        ordinals: &JobOrdinals,
    ) -> Result<String> {
        if let Some(reason) = iterator.as_ref().and_then(CandidateIterator::failure_reason) {
            return Ok(reason.to_string());
        }
        if let Some(job) = last_blocked {
            return Ok(ordinals.message(job));
        }
        match first_unsatisfied_passed_job(decl, store, index).await? {
            Some(job) => Ok(ordinals.message(&job)),
            None => Ok("latest version of resource not found".to_string()),
        }
    }
}
