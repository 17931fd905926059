//! macOS application bundle.
//!
//! No packager runs for macOS. The artifact is copied whole into
//! `Contents/MacOS` and the staged `.app` directory is the deliverable.

use super::Platform;
use crate::{
    bail,
    bundler::{
        error::Result,
        settings::Settings,
        staging::{ResourceCopy, StagingMode, StagingSpec},
    },
};
use std::path::PathBuf;

/// Staging plan for the application bundle.
pub fn staging_spec(settings: &Settings) -> StagingSpec {
    let macos = settings.macos();
    let executable_dir = settings.resolve(macos.executable_dir(settings.product_name()));
    let resources_dir = settings.resolve(macos.resources_dir(settings.product_name()));

    StagingSpec {
        platform: Platform::MacOs,
        resources: vec![
            ResourceCopy::new(&macos.launcher, &executable_dir),
            ResourceCopy::new(&macos.icon, resources_dir),
        ],
        destination_root: executable_dir,
        mode: StagingMode::CopyFile,
    }
}

/// Returns the staged bundle directory as the deliverable.
pub async fn package(settings: &Settings) -> Result<Vec<PathBuf>> {
    let bundle_dir = settings.resolve(settings.macos().bundle_dir(settings.product_name()));
    if !bundle_dir.is_dir() {
        bail!("macOS bundle {} was not staged", bundle_dir.display());
    }
    log::info!("✓ Using application bundle: {}", bundle_dir.display());
    Ok(vec![bundle_dir])
}
