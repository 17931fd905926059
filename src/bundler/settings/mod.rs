//! Configuration structures for the packaging pipeline.
//!
//! [`Settings`] carries the working root and every relative path the
//! pipeline touches, so the whole run can be pointed at a synthetic tree.
//! Platform sections default to the reference layout derived from the
//! product name and can be overridden from `Packaging.toml`.

mod builder;
mod core;
mod linux;
mod macos;
mod packager;
mod windows;

pub use builder::SettingsBuilder;
pub use core::{ArtifactSelection, Settings};
pub use linux::LinuxSettings;
pub use macos::MacOsSettings;
pub use packager::PackagerSettings;
pub use windows::WindowsSettings;
