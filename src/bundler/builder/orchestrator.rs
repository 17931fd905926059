//! Main pipeline orchestration.
//!
//! This module provides the [`Bundler`] that locates the artifact, stages all
//! three platform trees, runs the packagers and collects the deliverables.

use super::output::{PackageOutput, collect};
use crate::bundler::{
    Result,
    artifact::{self, Artifact},
    error::Context,
    platform::{Platform, linux, macos, windows},
    progress::{LogProgress, Progress},
    settings::Settings,
    staging::{self, StagingSpec},
    utils::fs,
};
use std::path::{Path, PathBuf};

const IMPORT_STEP: &str = "Importing artifact";

/// Main pipeline orchestrator.
///
/// Runs strictly in sequence and stops at the first failure:
///
/// 1. Locate the artifact (nothing is staged if this fails)
/// 2. Stage Linux, Windows and macOS, in [`Platform::ALL`] order
/// 3. Recreate the output directory
/// 4. Package each platform and copy its deliverable into the output directory
///
/// If step 1 or 2 fails the output directory is removed, and if step 4
/// fails it is emptied again, unless [`Settings::keep_partial_output`] is
/// set. It never holds an incomplete or stale set of deliverables.
///
/// # Examples
///
/// ```no_run
/// use peakaboo_packaging::bundler::{Bundler, SettingsBuilder};
///
/// # async fn example() -> peakaboo_packaging::bundler::Result<()> {
/// let settings = SettingsBuilder::new().root(".").build()?;
/// let outputs = Bundler::new(settings).bundle().await?;
///
/// for output in outputs {
///     println!("{}: {} ({} bytes)", output.platform, output.path.display(), output.size);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    settings: Settings,
}

impl Bundler {
    /// Creates a new bundler with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Returns a reference to the bundler settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the whole pipeline, reporting step markers to the log.
    pub async fn bundle(&self) -> Result<Vec<PackageOutput>> {
        self.bundle_with(&LogProgress).await
    }

    /// Runs the whole pipeline, reporting step markers to `progress`.
    ///
    /// # Returns
    ///
    /// One [`PackageOutput`] per deliverable, in platform order.
    pub async fn bundle_with(&self, progress: &dyn Progress) -> Result<Vec<PackageOutput>> {
        let output_dir = self.settings.output_directory();

        let imported = step(progress, IMPORT_STEP, async {
            let artifact = artifact::locate(&self.settings).await?;
            self.stage_all(&artifact).await?;
            Ok(artifact)
        })
        .await;
        let artifact = match imported {
            Ok(artifact) => artifact,
            Err(e) => {
                // Deliverables from an earlier run must not outlive a failed one.
                if !self.settings.keep_partial_output() {
                    if let Err(cleanup) = fs::remove_dir_all(&output_dir).await {
                        log::error!("Failed to remove previous output: {}", cleanup);
                    }
                }
                return Err(e);
            }
        };
        log::debug!("Staged {} for every platform", artifact.path().display());

        fs::create_dir_all(&output_dir, true).await?;

        match self.package_all(&output_dir, progress).await {
            Ok(outputs) => Ok(outputs),
            Err(e) => {
                if self.settings.keep_partial_output() {
                    log::warn!(
                        "Leaving partial output in {} after failure",
                        output_dir.display()
                    );
                } else if let Err(cleanup) = fs::create_dir_all(&output_dir, true).await {
                    log::error!("Failed to clear partial output: {}", cleanup);
                }
                Err(e)
            }
        }
    }

    /// Stages every platform from an already-located artifact.
    ///
    /// Stops at the first platform that fails; later platforms are not staged.
    pub async fn stage_all(&self, artifact: &Artifact) -> Result<Vec<StagingSpec>> {
        let resource_root = self.settings.resource_root();
        let mut specs = Vec::with_capacity(Platform::ALL.len());

        for platform in Platform::ALL {
            let spec = staging::plan(platform, &self.settings);
            staging::stage(artifact, &spec, &resource_root)
                .await
                .with_context(|| format!("staging {platform}"))?;
            specs.push(spec);
        }

        Ok(specs)
    }

    async fn package_all(
        &self,
        output_dir: &Path,
        progress: &dyn Progress,
    ) -> Result<Vec<PackageOutput>> {
        let mut outputs = Vec::new();

        for platform in Platform::ALL {
            let label = format!("Building {platform} package");
            let collected = step(progress, &label, async {
                let mut collected = Vec::new();
                for source in self.package(platform).await? {
                    collected.push(collect(platform, &source, output_dir).await?);
                }
                Ok(collected)
            })
            .await?;
            outputs.extend(collected);
        }

        Ok(outputs)
    }

    async fn package(&self, platform: Platform) -> Result<Vec<PathBuf>> {
        let paths = match platform {
            Platform::Linux => linux::package(&self.settings).await,
            Platform::Windows => windows::package(&self.settings).await,
            Platform::MacOs => macos::package(&self.settings).await,
        };
        paths.with_context(|| format!("packaging {platform}"))
    }
}

/// Wraps a step with start/DONE markers; the step's error still propagates.
async fn step<T>(
    progress: &dyn Progress,
    label: &str,
    work: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    progress.start(label);
    match work.await {
        Ok(value) => {
            progress.done(label);
            Ok(value)
        }
        Err(e) => {
            progress.failed(label, &e);
            Err(e)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::bundler::{Error, settings::SettingsBuilder};
    use std::{cell::RefCell, io::Write, os::unix::fs::PermissionsExt};
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Progress for Recorder {
        fn start(&self, step: &str) {
            self.0.borrow_mut().push(format!("start {step}"));
        }
        fn done(&self, step: &str) {
            self.0.borrow_mut().push(format!("done {step}"));
        }
        fn failed(&self, step: &str, _error: &Error) {
            self.0.borrow_mut().push(format!("failed {step}"));
        }
    }

    fn script(path: &Path, body: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    fn working_root() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        for resource in [
            "shared/icon.png",
            "shared/logo.png",
            "linux/peakaboo",
            "windows/Logo.ico",
            "windows/peakaboo.vbs",
            "mac/peakaboo",
            "mac/peakaboo.icns",
        ] {
            let path = root.join("resources").join(resource);
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(path, resource).unwrap();
        }

        let jar = std::fs::File::create(root.join("app-1.0.jar")).unwrap();
        let mut writer = zip::ZipWriter::new(jar);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        writer.start_file("peakaboo/Main.class", options).unwrap();
        writer.write_all(b"\xca\xfe\xba\xbe").unwrap();
        writer.finish().unwrap();

        std::fs::create_dir_all(root.join("mac/Peakaboo.app/Contents")).unwrap();
        std::fs::write(root.join("mac/Peakaboo.app/Contents/Info.plist"), "<plist/>").unwrap();

        script(
            &root.join("deb/generate.sh"),
            "test -f 3.0/usr/share/Peakaboo/peakaboo/Main.class || exit 3\n\
             test -f 3.0/usr/bin/peakaboo || exit 4\n\
             echo deb > Peakaboo.deb",
        );
        script(
            &root.join("windows/_win32/buildWindowsInstaller.sh"),
            "test -f ../Peakaboo/Logo.ico || exit 5\n\
             mkdir -p _win32 && echo exe > _win32/Peakaboo-setup.exe",
        );
        temp
    }

    fn bundler(root: &Path) -> Bundler {
        Bundler::new(SettingsBuilder::new().root(root).build().unwrap())
    }

    #[tokio::test]
    async fn full_run_produces_three_deliverables() {
        let temp = working_root();
        let recorder = Recorder::default();

        let outputs = bundler(temp.path()).bundle_with(&recorder).await.unwrap();

        let platforms: Vec<_> = outputs.iter().map(|o| o.platform).collect();
        assert_eq!(platforms, Platform::ALL);
        let build = temp.path().join("build");
        assert!(build.join("Peakaboo.deb").is_file());
        assert!(build.join("Peakaboo-setup.exe").is_file());
        assert!(build.join("Peakaboo.app/Contents/MacOS/Peakaboo.jar").is_file());
        assert!(build.join("Peakaboo.app/Contents/Resources/peakaboo.icns").is_file());
        assert!(outputs.iter().all(|o| o.size > 0));
        assert_eq!(std::fs::read_dir(&build).unwrap().count(), 3);

        assert_eq!(
            *recorder.0.borrow(),
            [
                "start Importing artifact",
                "done Importing artifact",
                "start Building Linux package",
                "done Building Linux package",
                "start Building Windows package",
                "done Building Windows package",
                "start Building macOS package",
                "done Building macOS package",
            ]
        );
    }

    #[tokio::test]
    async fn missing_artifact_touches_no_staging_directory() {
        let temp = working_root();
        std::fs::remove_file(temp.path().join("app-1.0.jar")).unwrap();

        let err = bundler(temp.path()).bundle().await.unwrap_err();

        assert!(matches!(err, Error::MissingArtifact { .. }));
        assert!(!temp.path().join("deb/3.0").exists());
        assert!(!temp.path().join("windows/Peakaboo").exists());
        assert!(!temp.path().join("mac/Peakaboo.app/Contents/MacOS").exists());
        assert!(!temp.path().join("build").exists());
    }

    #[tokio::test]
    async fn missing_resource_stops_before_packaging() {
        let temp = working_root();
        std::fs::remove_file(temp.path().join("resources/windows/peakaboo.vbs")).unwrap();

        let err = bundler(temp.path()).bundle().await.unwrap_err();

        assert!(matches!(
            err.root_cause(),
            Error::MissingResource {
                platform: Platform::Windows,
                ..
            }
        ));
        assert!(temp.path().join("deb/3.0/usr/share/Peakaboo").exists());
        assert!(!temp.path().join("mac/Peakaboo.app/Contents/MacOS").exists());
        assert!(!temp.path().join("deb/Peakaboo.deb").exists());
        assert!(!temp.path().join("build").exists());
    }

    #[tokio::test]
    async fn failed_windows_packager_leaves_empty_output() {
        let temp = working_root();
        script(
            &temp.path().join("windows/_win32/buildWindowsInstaller.sh"),
            "exit 9",
        );
        let recorder = Recorder::default();

        let err = bundler(temp.path()).bundle_with(&recorder).await.unwrap_err();

        assert!(matches!(
            err.root_cause(),
            Error::ExternalTool { code: Some(9), .. }
        ));
        let build = temp.path().join("build");
        assert!(build.is_dir());
        assert_eq!(std::fs::read_dir(&build).unwrap().count(), 0);
        assert_eq!(
            recorder.0.borrow().last().map(String::as_str),
            Some("failed Building Windows package")
        );
    }

    #[tokio::test]
    async fn failed_staging_removes_previous_deliverables() {
        let temp = working_root();
        let bundler = bundler(temp.path());
        bundler.bundle().await.unwrap();
        let build = temp.path().join("build");
        assert_eq!(std::fs::read_dir(&build).unwrap().count(), 3);

        std::fs::remove_file(temp.path().join("resources/windows/peakaboo.vbs")).unwrap();
        let err = bundler.bundle().await.unwrap_err();

        assert!(matches!(err.root_cause(), Error::MissingResource { .. }));
        assert!(!build.exists());
    }

    #[tokio::test]
    async fn keep_partial_output_preserves_earlier_deliverables() {
        let temp = working_root();
        script(
            &temp.path().join("windows/_win32/buildWindowsInstaller.sh"),
            "exit 1",
        );
        let settings = SettingsBuilder::new()
            .root(temp.path())
            .keep_partial_output(true)
            .build()
            .unwrap();

        Bundler::new(settings).bundle().await.unwrap_err();

        let build = temp.path().join("build");
        assert!(build.join("Peakaboo.deb").is_file());
        assert!(!build.join("Peakaboo-setup.exe").exists());
        assert!(!build.join("Peakaboo.app").exists());
    }

    #[tokio::test]
    async fn rerun_produces_identical_deliverables() {
        let temp = working_root();
        let bundler = bundler(temp.path());

        let first = bundler.bundle().await.unwrap();
        let second = bundler.bundle().await.unwrap();

        let checksums = |outputs: &[PackageOutput]| -> Vec<String> {
            outputs.iter().map(|o| o.checksum.clone()).collect()
        };
        assert_eq!(checksums(&first), checksums(&second));
    }
}
