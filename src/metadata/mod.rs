//! `Packaging.toml` loading.
//!
//! Every key is optional; anything left out keeps the reference layout.
//!
//! ```toml
//! [package]
//! name = "Peakaboo"
//!
//! [artifact]
//! extension = "jar"
//! on_ambiguous = "newest"
//!
//! [output]
//! dir = "build"
//! keep_partial = false
//!
//! [windows.packager]
//! program = "./buildWindowsInstaller.sh"
//! working_dir = "windows/_win32"
//! output = "_win32/*.exe"
//! ```

use crate::bundler::{
    ArtifactSelection, LinuxSettings, MacOsSettings, PackagerSettings, SettingsBuilder,
    WindowsSettings,
};
use crate::error::{BundlerError, CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the working root.
pub const MANIFEST_FILE_NAME: &str = "Packaging.toml";

/// Parsed `Packaging.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagingManifest {
    /// `[package]`
    pub package: PackageSection,
    /// `[artifact]`
    pub artifact: ArtifactSection,
    /// `[resources]`
    pub resources: ResourcesSection,
    /// `[output]`
    pub output: OutputSection,
    /// `[linux]`
    pub linux: Option<LinuxSection>,
    /// `[windows]`
    pub windows: Option<WindowsSection>,
    /// `[macos]`
    pub macos: Option<MacOsSection>,
}

/// `[package]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackageSection {
    /// Product name
    pub name: Option<String>,
}

/// `[artifact]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactSection {
    /// Candidate extension
    pub extension: Option<String>,
    /// Canonical file name
    pub canonical_name: Option<String>,
    /// Ambiguity policy
    pub on_ambiguous: Option<ArtifactSelection>,
}

/// `[resources]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResourcesSection {
    /// Resource tree, relative to the root
    pub dir: Option<PathBuf>,
}

/// `[output]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    /// Output directory, relative to the root
    pub dir: Option<PathBuf>,
    /// Keep earlier deliverables after a failure
    pub keep_partial: Option<bool>,
}

/// `[linux.packager]`, `[windows.packager]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackagerSection {
    /// Program to run
    pub program: Option<String>,
    /// Program arguments
    pub args: Option<Vec<String>>,
    /// Working directory
    pub working_dir: Option<PathBuf>,
    /// Output glob
    pub output: Option<String>,
}

/// `[linux]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LinuxSection {
    /// Staged `/usr` tree
    pub stage_dir: Option<PathBuf>,
    /// Icon resource
    pub icon: Option<PathBuf>,
    /// Logo resource
    pub logo: Option<PathBuf>,
    /// Launcher resource
    pub launcher: Option<PathBuf>,
    /// Package generator
    pub packager: Option<PackagerSection>,
}

/// `[windows]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowsSection {
    /// Parent of the staged application directory
    pub stage_dir: Option<PathBuf>,
    /// Icon resource
    pub icon: Option<PathBuf>,
    /// Launcher resource
    pub launcher: Option<PathBuf>,
    /// Installer generator
    pub packager: Option<PackagerSection>,
}

/// `[macos]`
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MacOsSection {
    /// Directory holding the `.app`
    pub stage_dir: Option<PathBuf>,
    /// Launcher resource
    pub launcher: Option<PathBuf>,
    /// Icon resource
    pub icon: Option<PathBuf>,
}

/// Reads and parses a manifest file.
pub fn load_manifest(path: &Path) -> Result<PackagingManifest> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        BundlerError::Cli(CliError::ExecutionFailed {
            command: "read_packaging_toml".to_string(),
            reason: format!("Failed to read {}: {}", path.display(), e),
        })
    })?;

    toml::from_str(&contents).map_err(|error| BundlerError::Config {
        path: path.to_path_buf(),
        error,
    })
}

impl PackagingManifest {
    /// Layers the manifest over a builder. Platform sections override only
    /// the keys they set.
    pub fn apply(self, mut builder: SettingsBuilder) -> SettingsBuilder {
        if let Some(name) = self.package.name {
            builder = builder.product_name(name);
        }
        if let Some(extension) = self.artifact.extension {
            builder = builder.artifact_extension(extension);
        }
        if let Some(name) = self.artifact.canonical_name {
            builder = builder.canonical_artifact_name(name);
        }
        if let Some(selection) = self.artifact.on_ambiguous {
            builder = builder.artifact_selection(selection);
        }
        if let Some(dir) = self.resources.dir {
            builder = builder.resource_dir(dir);
        }
        if let Some(dir) = self.output.dir {
            builder = builder.output_dir(dir);
        }
        if let Some(keep) = self.output.keep_partial {
            builder = builder.keep_partial_output(keep);
        }

        let product_name = builder.current_product_name().to_string();

        if let Some(section) = self.linux {
            let mut linux = LinuxSettings::for_product(&product_name);
            override_with(&mut linux.stage_dir, section.stage_dir);
            override_with(&mut linux.icon, section.icon);
            override_with(&mut linux.logo, section.logo);
            override_with(&mut linux.launcher, section.launcher);
            if let Some(packager) = section.packager {
                packager.apply(&mut linux.packager);
            }
            builder = builder.linux(linux);
        }
        if let Some(section) = self.windows {
            let mut windows = WindowsSettings::for_product(&product_name);
            override_with(&mut windows.stage_dir, section.stage_dir);
            override_with(&mut windows.icon, section.icon);
            override_with(&mut windows.launcher, section.launcher);
            if let Some(packager) = section.packager {
                packager.apply(&mut windows.packager);
            }
            builder = builder.windows(windows);
        }
        if let Some(section) = self.macos {
            let mut macos = MacOsSettings::for_product(&product_name);
            override_with(&mut macos.stage_dir, section.stage_dir);
            override_with(&mut macos.launcher, section.launcher);
            override_with(&mut macos.icon, section.icon);
            builder = builder.macos(macos);
        }

        builder
    }
}

impl PackagerSection {
    fn apply(self, settings: &mut PackagerSettings) {
        override_with(&mut settings.program, self.program);
        override_with(&mut settings.args, self.args);
        override_with(&mut settings.working_dir, self.working_dir);
        override_with(&mut settings.output, self.output);
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
