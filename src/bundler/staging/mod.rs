//! Declarative staging specs and their execution.
//!
//! A [`StagingSpec`] says where one platform's copy of the artifact goes,
//! whether it is unpacked or copied whole, and which resources are placed
//! around it. [`plan`] builds one per platform without touching the disk;
//! [`stage`] carries it out.

mod plan;
mod stager;

pub use plan::plan;
pub use stager::stage;

use crate::bundler::platform::Platform;
use std::path::PathBuf;

/// How the artifact is materialized at the destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingMode {
    /// Unpack the archive into the destination root.
    Extract,
    /// Copy the artifact file verbatim into the destination root.
    CopyFile,
}

/// One resource placement: a file under the resource root copied into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCopy {
    /// Path relative to the resource root.
    pub source: PathBuf,
    /// Absolute directory receiving the file under its own name.
    pub destination_dir: PathBuf,
}

impl ResourceCopy {
    /// Creates a resource placement.
    pub fn new(source: impl Into<PathBuf>, destination_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination_dir: destination_dir.into(),
        }
    }
}

/// Declarative description of one platform's staged tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingSpec {
    /// Target this tree belongs to.
    pub platform: Platform,
    /// Directory cleared and refilled with the artifact. Absolute.
    pub destination_root: PathBuf,
    /// Resources copied after the artifact, in order.
    pub resources: Vec<ResourceCopy>,
    /// Extract or copy.
    pub mode: StagingMode,
}
