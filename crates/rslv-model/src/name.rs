// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a cheap newtype wrapper around `String` with the trait set
/// every identifier in this crate needs: equality, ordering, hashing,
/// `Display`, and conversion from borrowed or owned strings.
macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_newtype!(
    /// The name of a resource (e.g. a git repo, a docker image, an S3 blob).
    /// Owns an ordered sequence of [`crate::Version`]s.
    ResourceName
);

string_newtype!(
    /// The name of a job. The distinguished value supplied to
    /// [`crate::resolve`][rslv_resolve::Resolver::resolve]'s `current_job`
    /// argument is just another `JobName` — there is no sentinel constant,
    /// since "which job is current" is a property of the call, not the data.
    JobName
);

string_newtype!(
    /// The name of an input declaration, distinct from the resource it
    /// draws from (two inputs may declare the same `resource` under
    /// different `name`s).
    InputName
);

string_newtype!(
    /// A version identifier within one resource: conceptually a
    /// payload-digest, opaque beyond equality and the owning
    /// [`crate::Version`]'s `check_order`.
    VersionId
);
