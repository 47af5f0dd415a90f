// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! The Result Builder: accumulates a search's outcome for each input
//! declaration into a final [`Resolution`].
//!
//! Shaped after `spk-solve-solution::Solution`'s mutate-then-finalize
//! split: the search calls `resolve`/`fail`/`skip` as it walks
//! declarations, and [`ResolutionBuilder::build`] packages the result
//! once at the end, the same way `Solution::add` accumulates and
//! `Solution::items` reads it back out.

use std::collections::{HashMap, HashSet};

use rslv_model::{InputName, Resolution, VersionId};

#[derive(Debug, Default)]
pub struct ResolutionBuilder {
    values: HashMap<InputName, VersionId>,
    errors: HashMap<InputName, String>,
    skipped: HashSet<InputName>,
}

impl ResolutionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successfully resolved input. Kept even if a later
    /// input fails (the partial-success rule).
    pub fn resolve(&mut self, name: InputName, version: VersionId) {
        self.values.insert(name, version);
    }

    /// Record the reason an attempted input could not be resolved.
    pub fn fail(&mut self, name: InputName, reason: String) {
        self.errors.insert(name, reason);
    }

    /// Record that an input was never attempted because an earlier
    /// one already failed.
    pub fn skip(&mut self, name: InputName) {
        self.skipped.insert(name);
    }

    pub fn has_failed(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn build(self) -> Resolution {
        Resolution {
            values: self.values,
            errors: self.errors,
            skipped: self.skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_success_survives_a_later_failure() {
        let mut builder = ResolutionBuilder::new();
        builder.resolve("x".into(), "rxv2".into());
        builder.fail("y".into(), "latest version of resource not found".to_string());
        builder.skip("z".into());

        let resolution = builder.build();
        assert!(!resolution.ok());
        assert_eq!(resolution.values.get(&InputName::from("x")), Some(&"rxv2".into()));
        assert!(resolution.errors.contains_key(&InputName::from("y")));
        assert!(resolution.skipped.contains(&InputName::from("z")));
    }

    #[test]
    fn ok_resolution_has_no_errors() {
        let mut builder = ResolutionBuilder::new();
        builder.resolve("x".into(), "rxv1".into());
        let resolution = builder.build();
        assert!(resolution.ok());
    }
}
