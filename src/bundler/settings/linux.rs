//! Linux platform-specific settings.

use super::PackagerSettings;
use std::path::PathBuf;

/// Debian package staging and generation.
///
/// The artifact is extracted into `<stage_dir>/share/<product>` and the
/// launcher lands in `<stage_dir>/bin`, mirroring the `/usr` prefix the
/// package installs into.
///
/// # Configuration
///
/// ```toml
/// [linux]
/// stage_dir = "deb/3.0/usr"
/// icon = "shared/icon.png"
/// logo = "shared/logo.png"
/// launcher = "linux/peakaboo"
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinuxSettings {
    /// Root of the staged `/usr` tree, relative to the working root.
    ///
    /// Default: `deb/3.0/usr`
    pub stage_dir: PathBuf,

    /// Application icon, relative to the resource root.
    pub icon: PathBuf,

    /// Splash logo, relative to the resource root.
    pub logo: PathBuf,

    /// Launcher script installed into `bin/`, relative to the resource root.
    pub launcher: PathBuf,

    /// Package generator invocation.
    ///
    /// Default: `./generate.sh` in `deb/`, producing `<product>.deb`
    pub packager: PackagerSettings,
}

impl LinuxSettings {
    /// Reference layout for a product.
    pub fn for_product(product_name: &str) -> Self {
        let launcher_name = product_name.to_lowercase();
        Self {
            stage_dir: PathBuf::from("deb/3.0/usr"),
            icon: PathBuf::from("shared/icon.png"),
            logo: PathBuf::from("shared/logo.png"),
            launcher: PathBuf::from("linux").join(launcher_name),
            packager: PackagerSettings::new(
                "./generate.sh",
                "deb",
                format!("{product_name}.deb"),
            ),
        }
    }

    /// Directory the artifact is extracted into.
    pub fn share_dir(&self, product_name: &str) -> PathBuf {
        self.stage_dir.join("share").join(product_name)
    }

    /// Directory the launcher script is copied into.
    pub fn bin_dir(&self) -> PathBuf {
        self.stage_dir.join("bin")
    }
}
