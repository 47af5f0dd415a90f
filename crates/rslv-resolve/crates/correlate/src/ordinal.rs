// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use itertools::Itertools;
use rslv_model::{InputDecl, JobName};

/// Stable numbering of every passed job referenced across a resolve
/// call's declarations, assigned once at the start of the call by
/// walking declarations in order and deduping by first appearance.
///
/// Owned by the search, not the store: the numbering only has meaning
/// within one `resolve` invocation (spec: "a stateful numbering owned
/// by the resolver").
#[derive(Debug, Clone, Default)]
pub struct JobOrdinals {
    order: Vec<JobName>,
}

impl JobOrdinals {
    pub fn new(declarations: &[InputDecl]) -> Self {
        let order = declarations
            .iter()
            .flat_map(|decl| decl.passed.iter().cloned())
            .unique()
            .collect();
        Self { order }
    }

    /// The 1-based ordinal of `job`, or `None` if it never appears in
    /// any declaration's `passed` list.
    pub fn ordinal(&self, job: &JobName) -> Option<usize> {
        self.order.iter().position(|seen| seen == job).map(|i| i + 1)
    }

    /// The stable, user-visible error string for `job` failing to
    /// witness a selection.
    pub fn message(&self, job: &JobName) -> String {
        match self.ordinal(job) {
            Some(n) => format!("passed job {n} does not have a build that satisfies the constraints"),
            None => format!("passed job {job} does not have a build that satisfies the constraints"),
        }
    }
}
