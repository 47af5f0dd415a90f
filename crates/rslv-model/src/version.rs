// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use serde::{Deserialize, Serialize};

use crate::name::{ResourceName, VersionId};

/// The sole ordering key for versions of a resource. Newest has the
/// highest value. Insertion order, row id, and lexical order of the
/// version's identifier are never used for ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckOrder(pub i64);

impl std::fmt::Display for CheckOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One observed version of a resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub resource: ResourceName,
    pub id: VersionId,
    pub check_order: CheckOrder,
    #[serde(default)]
    pub disabled: bool,
    /// Set by an out-of-band pin on the resource itself (e.g. an
    /// operator pinning a resource to a known-good version through the
    /// API), as distinct from an input's own `pinned` mode.
    #[serde(default)]
    pub api_pinned: bool,
}

impl Version {
    pub fn enabled(&self) -> bool {
        !self.disabled
    }
}

/// Sorts a version list ascending by `check_order`, the only ordering
/// contract this crate recognizes.
pub fn sort_ascending(versions: &mut [Version]) {
    versions.sort_by_key(|v| v.check_order);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(id: &str, order: i64, disabled: bool) -> Version {
        Version {
            resource: "resource-x".into(),
            id: id.into(),
            check_order: CheckOrder(order),
            disabled,
            api_pinned: false,
        }
    }

    #[test]
    fn sort_ascending_ignores_insertion_order() {
        let mut versions = vec![v("rxv3", 3, false), v("rxv1", 1, false), v("rxv2", 2, false)];
        sort_ascending(&mut versions);
        let ids: Vec<_> = versions.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["rxv1", "rxv2", "rxv3"]);
    }

    #[test]
    fn enabled_reflects_disabled_flag() {
        assert!(v("rxv1", 1, false).enabled());
        assert!(!v("rxv1", 1, true).enabled());
    }
}
