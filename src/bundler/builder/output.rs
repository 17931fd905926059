//! Deliverable collection into the unified output directory.

use super::checksum::calculate_sha256;
use crate::bundler::{
    error::{Context, Result},
    platform::Platform,
    utils::fs,
};
use std::path::{Path, PathBuf};

/// A deliverable copied into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutput {
    /// Platform the deliverable installs on.
    pub platform: Platform,
    /// Location inside the output directory.
    pub path: PathBuf,
    /// Size in bytes (all files, for bundle directories).
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub checksum: String,
}

/// Copies a packager product (file or directory) into `output_dir` under its
/// own name and records it.
pub async fn collect(platform: Platform, source: &Path, output_dir: &Path) -> Result<PackageOutput> {
    let file_name = source
        .file_name()
        .with_context(|| format!("deliverable {} has no file name", source.display()))?;
    let dest = output_dir.join(file_name);

    if source.is_dir() {
        fs::copy_dir(source, &dest).await?;
    } else {
        fs::copy_file(source, &dest).await?;
    }

    let size = fs::disk_size(&dest)?;
    let checksum = calculate_sha256(&dest).await?;
    log::debug!("Collected {} ({} bytes, sha256 {})", dest.display(), size, checksum);

    Ok(PackageOutput {
        platform,
        path: dest,
        size,
        checksum,
    })
}
