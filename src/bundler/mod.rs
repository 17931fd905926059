//! Multi-platform packaging pipeline.
//!
//! Turns one compiled artifact into a Debian package, a Windows installer
//! and a macOS application bundle.
//!
//! # Pipeline
//!
//! | Step | Linux | Windows | macOS |
//! |------|-------|---------|-------|
//! | Stage | extract into `usr/share/<app>` | extract into `<app>/` | copy into `Contents/MacOS` |
//! | Package | `generate.sh` | `buildWindowsInstaller.sh` | none, the bundle is the deliverable |
//! | Collect | `.deb` | `*.exe` | `<app>.app/` |
//!
//! The downstream generators are opaque; this crate only stages their input,
//! checks their exit status and collects what they wrote.

#![warn(missing_docs)]

pub mod artifact;
mod builder;
mod error;
mod packager;
pub mod platform;
mod progress;
mod settings;
pub mod staging;
mod utils;

// Public re-exports
pub use artifact::{Artifact, ArtifactFormat};
pub use builder::{Bundler, PackageOutput};
pub use error::{Context, Error, ErrorExt, Result};
pub use platform::Platform;
pub use progress::{LogProgress, Progress};
pub use settings::{
    ArtifactSelection, LinuxSettings, MacOsSettings, PackagerSettings, Settings,
    SettingsBuilder, WindowsSettings,
};
pub use staging::{ResourceCopy, StagingMode, StagingSpec};
