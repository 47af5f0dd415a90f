// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! Declarative fixture macros for resolver tests: build a whole
//! history in one expression instead of constructing `Snapshot`s and
//! `InputDecl`s field by field.
//!
//! Shaped after `spk-solve-macros`'s `make_repo!`/`make_package!`: a
//! `#[macro_export]`ed `macro_rules!` DSL, with the crates it expands
//! into re-exported from this crate's root so a caller only needs
//! this one dependency.

pub use rslv_model;

/// One version row: `version!("resource-x", "rxv1", 1)`, optionally
/// suffixed with `disabled` or `api_pinned`.
#[macro_export]
macro_rules! version {
    ($resource:expr, $id:expr, $order:expr) => {
        $crate::rslv_model::Version {
            resource: $resource.into(),
            id: $id.into(),
            check_order: $crate::rslv_model::CheckOrder($order),
            disabled: false,
            api_pinned: false,
        }
    };
    ($resource:expr, $id:expr, $order:expr, disabled) => {
        $crate::rslv_model::Version {
            resource: $resource.into(),
            id: $id.into(),
            check_order: $crate::rslv_model::CheckOrder($order),
            disabled: true,
            api_pinned: false,
        }
    };
    ($resource:expr, $id:expr, $order:expr, api_pinned) => {
        $crate::rslv_model::Version {
            resource: $resource.into(),
            id: $id.into(),
            check_order: $crate::rslv_model::CheckOrder($order),
            disabled: false,
            api_pinned: true,
        }
    };
}

/// One build-output row: `build_output!("simple-a", 1, "resource-x", "rxv1")`.
#[macro_export]
macro_rules! build_output {
    ($job:expr, $build:expr, $resource:expr, $version:expr) => {
        $crate::rslv_model::BuildOutputRow {
            job: $job.into(),
            build: $crate::rslv_model::BuildId($build),
            resource: $resource.into(),
            version: $version.into(),
        }
    };
}

/// One build-input row: `build_input!("current", 1, "resource-x", "rxv1")`.
#[macro_export]
macro_rules! build_input {
    ($job:expr, $build:expr, $resource:expr, $version:expr) => {
        $crate::rslv_model::BuildInputRow {
            job: $job.into(),
            build: $crate::rslv_model::BuildId($build),
            resource: $resource.into(),
            version: $version.into(),
        }
    };
}

/// One build-pipe edge: `build_pipe!(1, 3)` meaning build 1 piped into
/// build 3.
#[macro_export]
macro_rules! build_pipe {
    ($from:expr, $to:expr) => {
        $crate::rslv_model::BuildPipeRow {
            from_build: $crate::rslv_model::BuildId($from),
            to_build: $crate::rslv_model::BuildId($to),
        }
    };
}

/// A whole DB snapshot in one expression. Any section may be omitted;
/// missing sections default to empty.
///
/// ```ignore
/// snapshot! {
///     versions: [version!("resource-x", "rxv1", 1)],
///     outputs: [build_output!("simple-a", 1, "resource-x", "rxv1")],
/// }
/// ```
#[macro_export]
macro_rules! snapshot {
    ( $($field:ident : [ $($row:expr),* $(,)? ]),* $(,)? ) => {{
        #[allow(unused_mut)]
        let mut snapshot = $crate::rslv_model::Snapshot::new();
        $(
            $crate::__snapshot_field!(snapshot, $field, [ $($row),* ]);
        )*
        snapshot
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __snapshot_field {
    ($snapshot:ident, versions, [ $($row:expr),* ]) => {
        $snapshot.versions = std::vec![ $($row),* ];
    };
    ($snapshot:ident, outputs, [ $($row:expr),* ]) => {
        $snapshot.build_outputs = std::vec![ $($row),* ];
    };
    ($snapshot:ident, inputs, [ $($row:expr),* ]) => {
        $snapshot.build_inputs = std::vec![ $($row),* ];
    };
    ($snapshot:ident, pipes, [ $($row:expr),* ]) => {
        $snapshot.build_pipes = std::vec![ $($row),* ];
    };
}

/// An input declaration: `input!("x", "resource-x")`, optionally with
/// `passed: [...]`, `pinned: "rxv2"`, `every`, or `latest`.
#[macro_export]
macro_rules! input {
    ($name:expr, $resource:expr) => {
        $crate::rslv_model::InputDecl::new($name, $resource)
    };
    ($name:expr, $resource:expr, passed: [ $($job:expr),* $(,)? ]) => {
        $crate::rslv_model::InputDecl::new($name, $resource)
            .with_passed([ $($crate::rslv_model::JobName::from($job)),* ])
    };
    ($name:expr, $resource:expr, pinned: $version:expr) => {
        $crate::rslv_model::InputDecl::new($name, $resource)
            .with_mode($crate::rslv_model::VersionMode::Pinned($version.into()))
    };
    ($name:expr, $resource:expr, latest) => {
        $crate::rslv_model::InputDecl::new($name, $resource)
            .with_mode($crate::rslv_model::VersionMode::Latest)
    };
    ($name:expr, $resource:expr, every) => {
        $crate::rslv_model::InputDecl::new($name, $resource)
            .with_mode($crate::rslv_model::VersionMode::Every)
    };
    ($name:expr, $resource:expr, every, passed: [ $($job:expr),* $(,)? ]) => {
        $crate::rslv_model::InputDecl::new($name, $resource)
            .with_mode($crate::rslv_model::VersionMode::Every)
            .with_passed([ $($crate::rslv_model::JobName::from($job)),* ])
    };
}
