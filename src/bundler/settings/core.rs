//! Core Settings struct and implementations.

use super::{LinuxSettings, MacOsSettings, WindowsSettings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What to do when more than one artifact candidate is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactSelection {
    /// Refuse to guess.
    #[default]
    Fail,
    /// First candidate in lexicographic file-name order.
    First,
    /// Most recently modified candidate; ties fall back to file-name order.
    Newest,
}

/// Main settings for packaging operations.
///
/// Constructed via [`SettingsBuilder`](super::SettingsBuilder). All relative
/// paths are resolved against [`Settings::root`]; nothing reads the process
/// working directory.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Working root holding the artifact, `resources/` and packager trees.
    root: PathBuf,

    /// Product name, used for staged directory names and the canonical artifact.
    product_name: String,

    /// Extension identifying artifact candidates, without the leading dot.
    artifact_extension: String,

    /// File name the selected artifact is renamed to.
    canonical_artifact_name: String,

    /// Resource tree, relative to the root.
    resource_dir: PathBuf,

    /// Unified output directory, relative to the root.
    output_dir: PathBuf,

    /// Policy for multiple artifact candidates.
    artifact_selection: ArtifactSelection,

    /// Leave earlier deliverables in the output directory when a later
    /// packaging step fails.
    keep_partial_output: bool,

    linux: LinuxSettings,
    windows: WindowsSettings,
    macos: MacOsSettings,
}

impl Settings {
    /// Returns the working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Returns the artifact extension (e.g., `jar`).
    pub fn artifact_extension(&self) -> &str {
        &self.artifact_extension
    }

    /// Returns the fixed path every step after discovery reads the artifact from.
    pub fn canonical_artifact_path(&self) -> PathBuf {
        self.root.join(&self.canonical_artifact_name)
    }

    /// Returns the absolute resource root.
    pub fn resource_root(&self) -> PathBuf {
        self.root.join(&self.resource_dir)
    }

    /// Returns the absolute unified output directory.
    pub fn output_directory(&self) -> PathBuf {
        self.root.join(&self.output_dir)
    }

    /// Resolves a path relative to the working root.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join(relative)
    }

    /// Returns the ambiguity policy.
    pub fn artifact_selection(&self) -> ArtifactSelection {
        self.artifact_selection
    }

    /// Returns whether partial output survives a failed run.
    pub fn keep_partial_output(&self) -> bool {
        self.keep_partial_output
    }

    /// Returns the Linux settings.
    pub fn linux(&self) -> &LinuxSettings {
        &self.linux
    }

    /// Returns the Windows settings.
    pub fn windows(&self) -> &WindowsSettings {
        &self.windows
    }

    /// Returns the macOS settings.
    pub fn macos(&self) -> &MacOsSettings {
        &self.macos
    }

    /// Creates a new Settings instance (used by SettingsBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        root: PathBuf,
        product_name: String,
        artifact_extension: String,
        canonical_artifact_name: String,
        resource_dir: PathBuf,
        output_dir: PathBuf,
        artifact_selection: ArtifactSelection,
        keep_partial_output: bool,
        linux: LinuxSettings,
        windows: WindowsSettings,
        macos: MacOsSettings,
    ) -> Self {
        Self {
            root,
            product_name,
            artifact_extension,
            canonical_artifact_name,
            resource_dir,
            output_dir,
            artifact_selection,
            keep_partial_output,
            linux,
            windows,
            macos,
        }
    }
}
