//! Windows installer.
//!
//! The artifact is unpacked into the application directory next to its icon
//! and launcher; the installer generator packs that directory into an `.exe`.

use super::Platform;
use crate::bundler::{
    error::Result,
    packager::Packager,
    settings::Settings,
    staging::{ResourceCopy, StagingMode, StagingSpec},
};
use std::path::PathBuf;

const TOOL: &str = "Windows installer generator";

/// Staging plan for the Windows application directory.
pub fn staging_spec(settings: &Settings) -> StagingSpec {
    let windows = settings.windows();
    let app_dir = settings.resolve(windows.app_dir(settings.product_name()));

    StagingSpec {
        platform: Platform::Windows,
        resources: vec![
            ResourceCopy::new(&windows.icon, &app_dir),
            ResourceCopy::new(&windows.launcher, &app_dir),
        ],
        destination_root: app_dir,
        mode: StagingMode::Extract,
    }
}

/// Runs the installer generator.
///
/// Installers left by an earlier run are deleted first, so the returned
/// paths are exactly what this invocation wrote.
pub async fn package(settings: &Settings) -> Result<Vec<PathBuf>> {
    log::info!("Building Windows installer for {}", settings.product_name());

    let packager = Packager::new(TOOL, &settings.windows().packager, settings.root());
    packager.remove_stale_outputs().await?;
    packager.run().await?;
    let outputs = packager.require_outputs()?;

    for output in &outputs {
        log::info!("✓ Created Windows installer: {}", output.display());
    }
    Ok(outputs)
}
