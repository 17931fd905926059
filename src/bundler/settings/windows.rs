//! Windows platform-specific settings.

use super::PackagerSettings;
use std::path::PathBuf;

/// Windows installer staging and generation.
///
/// The artifact is extracted into `<stage_dir>/<product>` alongside the
/// icon and the launcher script; the installer generator packs that
/// directory into a single `.exe`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WindowsSettings {
    /// Parent of the staged application directory, relative to the working root.
    ///
    /// Default: `windows`
    pub stage_dir: PathBuf,

    /// Installer icon, relative to the resource root.
    pub icon: PathBuf,

    /// Launcher script, relative to the resource root.
    pub launcher: PathBuf,

    /// Installer generator invocation.
    ///
    /// Default: `./buildWindowsInstaller.sh` in `windows/_win32`, producing `_win32/*.exe`
    pub packager: PackagerSettings,
}

impl WindowsSettings {
    /// Reference layout for a product.
    pub fn for_product(product_name: &str) -> Self {
        let launcher_name = product_name.to_lowercase();
        Self {
            stage_dir: PathBuf::from("windows"),
            icon: PathBuf::from("windows/Logo.ico"),
            launcher: PathBuf::from("windows").join(format!("{launcher_name}.vbs")),
            packager: PackagerSettings::new(
                "./buildWindowsInstaller.sh",
                "windows/_win32",
                "_win32/*.exe",
            ),
        }
    }

    /// Staged application directory.
    pub fn app_dir(&self, product_name: &str) -> PathBuf {
        self.stage_dir.join(product_name)
    }
}
