// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::build::{BuildInputRow, BuildOutputRow, BuildPipeRow};
use crate::name::ResourceName;
use crate::version::{Version, sort_ascending};

/// A complete, read-only snapshot of the version store's tables, as used
/// by the in-memory store (`rslv-store::MemoryStore`) and by tests. A
/// real deployment reads these tables live from a database; this type
/// exists so the resolver can be exercised standalone (the CLI's
/// offline mode) and so tests can declare a whole history in one value,
/// the same role `DB`/`DBRow` play in the upstream test suite this
/// resolver's behavior is grounded on.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub build_outputs: Vec<BuildOutputRow>,
    #[serde(default)]
    pub build_inputs: Vec<BuildInputRow>,
    #[serde(default)]
    pub build_pipes: Vec<BuildPipeRow>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Versions grouped by resource, each group sorted ascending by
    /// check-order.
    pub fn versions_by_resource(&self) -> HashMap<ResourceName, Vec<Version>> {
        let mut by_resource: HashMap<ResourceName, Vec<Version>> = HashMap::new();
        for version in &self.versions {
            by_resource
                .entry(version.resource.clone())
                .or_default()
                .push(version.clone());
        }
        for versions in by_resource.values_mut() {
            sort_ascending(versions);
        }
        by_resource
    }
}
