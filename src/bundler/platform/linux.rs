//! Linux Debian package.
//!
//! The artifact is unpacked under `usr/share/<product>` of the staged tree
//! and the package generator script turns that tree into a `.deb`.

use super::Platform;
use crate::bundler::{
    error::Result,
    packager::Packager,
    settings::Settings,
    staging::{ResourceCopy, StagingMode, StagingSpec},
};
use std::path::PathBuf;

const TOOL: &str = "Linux package generator";

/// Staging plan for the Debian tree.
pub fn staging_spec(settings: &Settings) -> StagingSpec {
    let linux = settings.linux();
    let share_dir = settings.resolve(linux.share_dir(settings.product_name()));
    let bin_dir = settings.resolve(linux.bin_dir());

    StagingSpec {
        platform: Platform::Linux,
        resources: vec![
            ResourceCopy::new(&linux.icon, &share_dir),
            ResourceCopy::new(&linux.logo, &share_dir),
            ResourceCopy::new(&linux.launcher, bin_dir),
        ],
        destination_root: share_dir,
        mode: StagingMode::Extract,
    }
}

/// Runs the package generator against the staged tree.
///
/// # Returns
///
/// The generated package file(s).
pub async fn package(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!("Building Debian package for {}", settings.product_name());

    let packager = Packager::new(TOOL, &settings.linux().packager, settings.root());
    packager.remove_stale_outputs().await?;
    packager.run().await?;
    let outputs = packager.require_outputs()?;

    for output in &outputs {
        log::info!("✓ Created Debian package: {}", output.display());
    }
    Ok(outputs)
}
