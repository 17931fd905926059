//! macOS platform-specific settings.

use std::path::PathBuf;

/// Application bundle staging.
///
/// The bundle skeleton (`Info.plist` and friends) lives in the working root
/// under `<stage_dir>/<product>.app`. Staging copies the artifact and the
/// launcher into `Contents/MacOS` and the icon into `Contents/Resources`;
/// the resulting directory is the deliverable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacOsSettings {
    /// Directory holding the `.app` bundle, relative to the working root.
    ///
    /// Default: `mac`
    pub stage_dir: PathBuf,

    /// Launcher executable, relative to the resource root.
    pub launcher: PathBuf,

    /// `.icns` icon, relative to the resource root.
    pub icon: PathBuf,
}

impl MacOsSettings {
    /// Reference layout for a product.
    pub fn for_product(product_name: &str) -> Self {
        let launcher_name = product_name.to_lowercase();
        Self {
            stage_dir: PathBuf::from("mac"),
            launcher: PathBuf::from("mac").join(&launcher_name),
            icon: PathBuf::from("mac").join(format!("{launcher_name}.icns")),
        }
    }

    /// The `.app` bundle directory.
    pub fn bundle_dir(&self, product_name: &str) -> PathBuf {
        self.stage_dir.join(format!("{product_name}.app"))
    }

    /// `Contents/MacOS` inside the bundle.
    pub fn executable_dir(&self, product_name: &str) -> PathBuf {
        self.bundle_dir(product_name).join("Contents").join("MacOS")
    }

    /// `Contents/Resources` inside the bundle.
    pub fn resources_dir(&self, product_name: &str) -> PathBuf {
        self.bundle_dir(product_name).join("Contents").join("Resources")
    }
}
