//! Builder for constructing Settings.

use super::{ArtifactSelection, LinuxSettings, MacOsSettings, Settings, WindowsSettings};
use std::path::{Path, PathBuf};

const DEFAULT_PRODUCT_NAME: &str = "Peakaboo";
const DEFAULT_ARTIFACT_EXTENSION: &str = "jar";

/// Builder for constructing [`Settings`].
///
/// Only the working root is required. Everything else defaults to the
/// reference layout for the product name.
///
/// # Examples
///
/// ```no_run
/// use peakaboo_packaging::bundler::{ArtifactSelection, SettingsBuilder};
///
/// # fn example() -> peakaboo_packaging::bundler::Result<()> {
/// let settings = SettingsBuilder::new()
///     .root("/srv/packaging")
///     .product_name("Peakaboo")
///     .artifact_selection(ArtifactSelection::Newest)
///     .build()?;
/// assert_eq!(settings.canonical_artifact_path().file_name().unwrap(), "Peakaboo.jar");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct SettingsBuilder {
    root: Option<PathBuf>,
    product_name: Option<String>,
    artifact_extension: Option<String>,
    canonical_artifact_name: Option<String>,
    resource_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    artifact_selection: ArtifactSelection,
    keep_partial_output: bool,
    linux: Option<LinuxSettings>,
    windows: Option<WindowsSettings>,
    macos: Option<MacOsSettings>,
}

impl SettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the working root.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the product name.
    ///
    /// Default: `Peakaboo`
    pub fn product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    /// Sets the artifact extension, with or without a leading dot.
    ///
    /// Default: `jar`
    pub fn artifact_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.artifact_extension = Some(extension.trim_start_matches('.').to_string());
        self
    }

    /// Sets the canonical artifact file name.
    ///
    /// Default: `<product>.<extension>`
    pub fn canonical_artifact_name(mut self, name: impl Into<String>) -> Self {
        self.canonical_artifact_name = Some(name.into());
        self
    }

    /// Sets the resource tree, relative to the root.
    ///
    /// Default: `resources`
    pub fn resource_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.resource_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the unified output directory, relative to the root.
    ///
    /// Default: `build`
    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the policy for multiple artifact candidates.
    ///
    /// Default: [`ArtifactSelection::Fail`]
    pub fn artifact_selection(mut self, selection: ArtifactSelection) -> Self {
        self.artifact_selection = selection;
        self
    }

    /// Keeps earlier deliverables in the output directory when a later step fails.
    ///
    /// Default: false
    pub fn keep_partial_output(mut self, keep: bool) -> Self {
        self.keep_partial_output = keep;
        self
    }

    /// Overrides the Linux section.
    pub fn linux(mut self, settings: LinuxSettings) -> Self {
        self.linux = Some(settings);
        self
    }

    /// Overrides the Windows section.
    pub fn windows(mut self, settings: WindowsSettings) -> Self {
        self.windows = Some(settings);
        self
    }

    /// Overrides the macOS section.
    pub fn macos(mut self, settings: MacOsSettings) -> Self {
        self.macos = Some(settings);
        self
    }

    /// Product name as it will be built, for callers layering partial overrides.
    pub fn current_product_name(&self) -> &str {
        self.product_name.as_deref().unwrap_or(DEFAULT_PRODUCT_NAME)
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or the product name is empty.
    pub fn build(self) -> crate::bundler::Result<Settings> {
        use crate::bundler::error::Context;

        let root = self.root.context("root is required")?;
        let product_name = self
            .product_name
            .unwrap_or_else(|| DEFAULT_PRODUCT_NAME.to_string());
        if product_name.trim().is_empty() {
            crate::bail!("product name must not be empty");
        }

        let artifact_extension = self
            .artifact_extension
            .unwrap_or_else(|| DEFAULT_ARTIFACT_EXTENSION.to_string());
        let canonical_artifact_name = self
            .canonical_artifact_name
            .unwrap_or_else(|| format!("{product_name}.{artifact_extension}"));

        let linux = self
            .linux
            .unwrap_or_else(|| LinuxSettings::for_product(&product_name));
        let windows = self
            .windows
            .unwrap_or_else(|| WindowsSettings::for_product(&product_name));
        let macos = self
            .macos
            .unwrap_or_else(|| MacOsSettings::for_product(&product_name));

        Ok(Settings::new(
            root,
            product_name,
            artifact_extension,
            canonical_artifact_name,
            self.resource_dir.unwrap_or_else(|| PathBuf::from("resources")),
            self.output_dir.unwrap_or_else(|| PathBuf::from("build")),
            self.artifact_selection,
            self.keep_partial_output,
            linux,
            windows,
            macos,
        ))
    }
}
