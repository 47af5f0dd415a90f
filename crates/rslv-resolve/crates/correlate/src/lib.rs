// Copyright (c) Contributors to the pipeline-resolver project.
// SPDX-License-Identifier: Apache-2.0
// https://example.invalid/pipeline-resolver

//! The Correlator: joint feasibility of a partial assignment under
//! every `passed`-job constraint shared by more than one input.

mod correlator;
mod diagnose;
mod ordinal;

pub use correlator::Correlator;
pub use diagnose::first_unsatisfied_passed_job;
pub use ordinal::JobOrdinals;
