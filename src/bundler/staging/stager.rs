//! Staging execution.

use super::{StagingMode, StagingSpec};
use crate::bundler::{
    artifact::{Artifact, ArtifactFormat},
    error::{Context, Error, Result},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// Executes a staging spec.
///
/// # Process
///
/// 1. Check every declared resource exists (nothing is touched otherwise)
/// 2. Remove the destination root and recreate it empty
/// 3. Extract the artifact into it, or copy the artifact file into it
/// 4. Copy each resource into its destination directory, in order
///
/// After success the destination root holds the artifact and every
/// resource is in place. Running it again yields the same tree.
pub async fn stage(artifact: &Artifact, spec: &StagingSpec, resource_root: &Path) -> Result<()> {
    log::info!(
        "Staging {} into {}",
        spec.platform,
        spec.destination_root.display()
    );

    let sources = resolve_resources(spec, resource_root)?;

    if spec.mode == StagingMode::Extract && artifact.format() != ArtifactFormat::Archive {
        return Err(Error::NotAnArchive {
            path: artifact.path().to_path_buf(),
        });
    }

    fs::create_dir_all(&spec.destination_root, true).await?;

    match spec.mode {
        StagingMode::Extract => {
            let entries = fs::extract_zip(artifact.path(), &spec.destination_root).await?;
            log::debug!("Extracted {} archive entries", entries);
        }
        StagingMode::CopyFile => {
            let dest = spec.destination_root.join(artifact.file_name());
            fs::copy_file(artifact.path(), &dest).await?;
        }
    }

    for (source, resource) in sources.iter().zip(&spec.resources) {
        let file_name = source
            .file_name()
            .with_context(|| format!("resource {} has no file name", source.display()))?;
        let dest = resource.destination_dir.join(file_name);
        log::debug!("Copying {} -> {}", source.display(), dest.display());
        fs::copy_file(source, &dest).await?;
    }

    Ok(())
}

/// Absolute source paths for the spec's resources, failing on the first missing one.
fn resolve_resources(spec: &StagingSpec, resource_root: &Path) -> Result<Vec<PathBuf>> {
    spec.resources
        .iter()
        .map(|resource| {
            let path = resource_root.join(&resource.source);
            if path.is_file() {
                Ok(path)
            } else {
                Err(Error::MissingResource {
                    platform: spec.platform,
                    path,
                })
            }
        })
        .collect()
}
