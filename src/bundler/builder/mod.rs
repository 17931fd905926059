//! Pipeline orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that runs the
//! artifact locator, the three staging operations and the packagers in a
//! fixed order.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for deliverables
//! - [`orchestrator`] - Main [`Bundler`] struct and the step sequence
//! - [`output`] - Copying deliverables into the output directory
//! - [`tool_detection`] - Packager program resolution

mod checksum;
mod orchestrator;
mod output;
mod tool_detection;

pub use orchestrator::Bundler;
pub use output::PackageOutput;
pub(crate) use tool_detection::resolve_program;
