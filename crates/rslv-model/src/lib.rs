// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! Core data types for the pipeline input resolver.
//!
//! This crate holds only plain data: names, versions, builds, input
//! declarations, and the resolution result. All resolver behavior
//! (iteration, correlation, searching) lives in the `rslv-resolve*`
//! crates, which depend on this one.

mod build;
mod input;
mod name;
mod resolution;
mod snapshot;
mod version;

pub use build::{BuildId, BuildInputRow, BuildOutputRow, BuildPipeRow};
pub use input::{InputDecl, VersionMode};
pub use name::{InputName, JobName, ResourceName, VersionId};
pub use resolution::Resolution;
pub use snapshot::Snapshot;
pub use version::{CheckOrder, Version, sort_ascending};
