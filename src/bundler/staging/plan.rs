//! Stage planning: platform to [`StagingSpec`].

use super::StagingSpec;
use crate::bundler::{
    platform::{Platform, linux, macos, windows},
    settings::Settings,
};

/// Builds the staging spec for a platform.
///
/// Pure: reads settings only, never the filesystem, so the same settings
/// always produce the same spec.
pub fn plan(platform: Platform, settings: &Settings) -> StagingSpec {
    match platform {
        Platform::Linux => linux::staging_spec(settings),
        Platform::Windows => windows::staging_spec(settings),
        Platform::MacOs => macos::staging_spec(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        settings::SettingsBuilder,
        staging::{ResourceCopy, StagingMode},
    };
    use std::path::{Path, PathBuf};

    fn settings() -> Settings {
        SettingsBuilder::new().root("/work").build().unwrap()
    }

    fn sources(spec: &StagingSpec) -> Vec<&Path> {
        spec.resources.iter().map(|r| r.source.as_path()).collect()
    }

    #[test]
    fn linux_extracts_into_share_and_places_launcher_in_bin() {
        let spec = plan(Platform::Linux, &settings());
        let share = PathBuf::from("/work/deb/3.0/usr/share/Peakaboo");

        assert_eq!(spec.platform, Platform::Linux);
        assert_eq!(spec.mode, StagingMode::Extract);
        assert_eq!(spec.destination_root, share);
        assert_eq!(
            spec.resources,
            vec![
                ResourceCopy::new("shared/icon.png", &share),
                ResourceCopy::new("shared/logo.png", &share),
                ResourceCopy::new("linux/peakaboo", "/work/deb/3.0/usr/bin"),
            ]
        );
    }

    #[test]
    fn windows_extracts_into_app_dir_with_resources_beside_it() {
        let spec = plan(Platform::Windows, &settings());

        assert_eq!(spec.mode, StagingMode::Extract);
        assert_eq!(spec.destination_root, PathBuf::from("/work/windows/Peakaboo"));
        assert_eq!(
            sources(&spec),
            [Path::new("windows/Logo.ico"), Path::new("windows/peakaboo.vbs")]
        );
        assert!(
            spec.resources
                .iter()
                .all(|r| r.destination_dir == spec.destination_root)
        );
    }

    #[test]
    fn macos_copies_artifact_and_routes_icon_to_resources() {
        let spec = plan(Platform::MacOs, &settings());

        assert_eq!(spec.mode, StagingMode::CopyFile);
        assert_eq!(
            spec.destination_root,
            PathBuf::from("/work/mac/Peakaboo.app/Contents/MacOS")
        );
        assert_eq!(
            spec.resources,
            vec![
                ResourceCopy::new("mac/peakaboo", "/work/mac/Peakaboo.app/Contents/MacOS"),
                ResourceCopy::new(
                    "mac/peakaboo.icns",
                    "/work/mac/Peakaboo.app/Contents/Resources"
                ),
            ]
        );
    }

    #[test]
    fn planning_is_deterministic() {
        let settings = settings();
        for platform in Platform::ALL {
            assert_eq!(plan(platform, &settings), plan(platform, &settings));
        }
    }
}
