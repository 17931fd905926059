//! Build artifact discovery.
//!
//! Finds the single compiled artifact in the working root and moves it to
//! the canonical name every later step reads from.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::{ArtifactSelection, Settings},
    utils::fs,
};
use std::path::{Path, PathBuf};

/// How the artifact can be materialized into a staging tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    /// Zip container (`.jar`, `.zip`); can be extracted.
    Archive,
    /// Anything else; can only be copied.
    Binary,
}

/// The located build artifact at its canonical path.
///
/// Read-only input shared by every staging operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    format: ArtifactFormat,
}

impl Artifact {
    /// Path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected format.
    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    /// File name of the artifact.
    pub fn file_name(&self) -> &std::ffi::OsStr {
        // Canonical paths are always built from a non-empty file name.
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// Locates the artifact, renames it to the canonical name and detects its format.
///
/// Fails with [`Error::MissingArtifact`] when nothing matches, and with
/// [`Error::AmbiguousArtifact`] when several match under
/// [`ArtifactSelection::Fail`]. Nothing outside the working root's top level
/// is touched.
pub async fn locate(settings: &Settings) -> Result<Artifact> {
    let canonical = settings.canonical_artifact_path();
    let candidates = find_candidates(settings.root(), settings.artifact_extension())?;

    let selected = select(candidates, &canonical, settings)?;
    log::info!("Using artifact {}", selected.display());

    if selected != canonical {
        tokio::fs::rename(&selected, &canonical)
            .await
            .fs_context("renaming artifact to", &canonical)?;
        log::debug!(
            "Renamed {} -> {}",
            selected.display(),
            canonical.display()
        );
    }

    let format = if fs::is_zip_archive(&canonical).await? {
        ArtifactFormat::Archive
    } else {
        ArtifactFormat::Binary
    };

    Ok(Artifact {
        path: canonical,
        format,
    })
}

/// Regular files directly under `dir` with the given extension
/// (case-insensitive), sorted by file name.
fn find_candidates(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir).fs_context("listing working root", dir)? {
        let entry = entry.fs_context("listing working root", dir)?;
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            candidates.push(path);
        }
    }
    candidates.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(candidates)
}

fn select(mut candidates: Vec<PathBuf>, canonical: &Path, settings: &Settings) -> Result<PathBuf> {
    if candidates.is_empty() {
        return Err(Error::MissingArtifact {
            dir: settings.root().to_path_buf(),
            extension: settings.artifact_extension().to_string(),
        });
    }

    // A leftover canonical file from an earlier run loses to a fresh build.
    if candidates.len() > 1 && candidates.iter().any(|c| c == canonical) {
        log::info!(
            "Ignoring {} from a previous run in favour of a new artifact",
            canonical.display()
        );
        candidates.retain(|c| c != canonical);
    }

    if candidates.len() == 1 {
        return Ok(candidates.remove(0));
    }

    match settings.artifact_selection() {
        ArtifactSelection::Fail => Err(Error::AmbiguousArtifact { candidates }),
        ArtifactSelection::First => {
            log::warn!(
                "{} artifact candidates found; using the first by name",
                candidates.len()
            );
            Ok(candidates.remove(0))
        }
        ArtifactSelection::Newest => {
            log::warn!(
                "{} artifact candidates found; using the most recently modified",
                candidates.len()
            );
            newest(candidates)
        }
    }
}

/// Most recently modified path. Candidates arrive name-sorted and only a
/// strictly newer time replaces the current pick, so ties resolve by name.
fn newest(candidates: Vec<PathBuf>) -> Result<PathBuf> {
    let mut best: Option<(std::time::SystemTime, PathBuf)> = None;
    for path in candidates {
        let modified = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .fs_context("reading modification time of", &path)?;
        match &best {
            Some((best_time, _)) if modified <= *best_time => {}
            _ => best = Some((modified, path)),
        }
    }
    best.map(|(_, path)| path)
        .ok_or_else(|| Error::GenericError("no artifact candidates".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn settings(root: &Path, selection: ArtifactSelection) -> Settings {
        SettingsBuilder::new()
            .root(root)
            .artifact_selection(selection)
            .build()
            .unwrap()
    }

    fn set_mtime(path: &Path, secs_ago: u64) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    #[tokio::test]
    async fn missing_artifact_is_reported() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("notes.txt"), "x").unwrap();

        let err = locate(&settings(temp.path(), ArtifactSelection::Fail))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingArtifact { ref extension, .. } if extension == "jar"));
    }

    #[tokio::test]
    async fn single_artifact_is_renamed_to_canonical_name() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app-1.0.jar"), "opaque").unwrap();

        let artifact = locate(&settings(temp.path(), ArtifactSelection::Fail))
            .await
            .unwrap();

        assert_eq!(artifact.path(), temp.path().join("Peakaboo.jar"));
        assert_eq!(artifact.format(), ArtifactFormat::Binary);
        assert!(!temp.path().join("app-1.0.jar").exists());
        assert_eq!(
            std::fs::read_to_string(temp.path().join("Peakaboo.jar")).unwrap(),
            "opaque"
        );
    }

    #[tokio::test]
    async fn extension_match_ignores_case_and_directories() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("classes.jar")).unwrap();
        std::fs::write(temp.path().join("APP.JAR"), "x").unwrap();

        let artifact = locate(&settings(temp.path(), ArtifactSelection::Fail))
            .await
            .unwrap();

        assert_eq!(artifact.file_name(), "Peakaboo.jar");
    }

    #[tokio::test]
    async fn ambiguity_fails_by_default() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("b.jar"), "b").unwrap();
        std::fs::write(temp.path().join("a.jar"), "a").unwrap();

        let err = locate(&settings(temp.path(), ArtifactSelection::Fail))
            .await
            .unwrap_err();

        match err {
            Error::AmbiguousArtifact { candidates } => {
                let names: Vec<_> = candidates
                    .iter()
                    .map(|c| c.file_name().unwrap().to_string_lossy().into_owned())
                    .collect();
                assert_eq!(names, ["a.jar", "b.jar"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(temp.path().join("a.jar").exists());
        assert!(temp.path().join("b.jar").exists());
    }

    #[tokio::test]
    async fn first_policy_picks_lexicographically_first() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("zeta.jar"), "z").unwrap();
        std::fs::write(temp.path().join("alpha.jar"), "a").unwrap();

        locate(&settings(temp.path(), ArtifactSelection::First))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("Peakaboo.jar")).unwrap(),
            "a"
        );
        assert!(temp.path().join("zeta.jar").exists());
    }

    #[tokio::test]
    async fn newest_policy_picks_most_recent() {
        let temp = TempDir::new().unwrap();
        let old = temp.path().join("alpha.jar");
        let new = temp.path().join("beta.jar");
        std::fs::write(&old, "old").unwrap();
        std::fs::write(&new, "new").unwrap();
        set_mtime(&old, 3600);
        set_mtime(&new, 10);

        locate(&settings(temp.path(), ArtifactSelection::Newest))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("Peakaboo.jar")).unwrap(),
            "new"
        );
    }

    #[tokio::test]
    async fn newest_policy_breaks_mtime_ties_by_name() {
        let temp = TempDir::new().unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        for (name, contents) in [("delta.jar", "d"), ("bravo.jar", "b"), ("charlie.jar", "c")] {
            let path = temp.path().join(name);
            std::fs::write(&path, contents).unwrap();
            let file = std::fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(stamp).unwrap();
        }

        locate(&settings(temp.path(), ArtifactSelection::Newest))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("Peakaboo.jar")).unwrap(),
            "b"
        );
    }

    #[test]
    fn selection_is_stable_across_repeated_runs() {
        let temp = TempDir::new().unwrap();
        for name in ["gamma.jar", "alpha.jar", "beta.jar"] {
            std::fs::write(temp.path().join(name), name).unwrap();
        }
        let canonical = temp.path().join("Peakaboo.jar");

        for selection in [ArtifactSelection::First, ArtifactSelection::Newest] {
            let settings = settings(temp.path(), selection);
            let picks: Vec<_> = (0..3)
                .map(|_| {
                    let candidates = find_candidates(temp.path(), "jar").unwrap();
                    select(candidates, &canonical, &settings).unwrap()
                })
                .collect();
            assert!(picks.windows(2).all(|w| w[0] == w[1]), "{selection:?}: {picks:?}");
        }
    }

    #[tokio::test]
    async fn first_policy_matches_across_identical_trees() {
        let mut picked = Vec::new();
        for _ in 0..2 {
            let temp = TempDir::new().unwrap();
            for name in ["v2.jar", "v10.jar", "v1.jar"] {
                std::fs::write(temp.path().join(name), name).unwrap();
            }
            locate(&settings(temp.path(), ArtifactSelection::First))
                .await
                .unwrap();
            picked.push(std::fs::read_to_string(temp.path().join("Peakaboo.jar")).unwrap());
        }

        assert_eq!(picked, ["v1.jar", "v1.jar"]);
    }

    #[tokio::test]
    async fn fresh_artifact_supersedes_previous_canonical() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Peakaboo.jar"), "previous").unwrap();
        std::fs::write(temp.path().join("app-2.0.jar"), "fresh").unwrap();

        locate(&settings(temp.path(), ArtifactSelection::Fail))
            .await
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(temp.path().join("Peakaboo.jar")).unwrap(),
            "fresh"
        );
        assert!(!temp.path().join("app-2.0.jar").exists());
    }

    #[tokio::test]
    async fn rerun_reuses_canonical_artifact() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("app.jar"), "x").unwrap();
        let settings = settings(temp.path(), ArtifactSelection::Fail);

        let first = locate(&settings).await.unwrap();
        let second = locate(&settings).await.unwrap();

        assert_eq!(first, second);
    }
}
