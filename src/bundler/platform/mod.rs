//! Target platforms and their per-platform staging and packaging steps.
//!
//! Each submodule owns two things for its platform: the staging plan (where
//! the artifact and resources land) and the packaging step that turns the
//! staged tree into a deliverable.

pub(crate) mod linux;
pub(crate) mod macos;
pub(crate) mod windows;

use std::fmt;

/// A distribution target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Debian package built from the staged `usr/` tree.
    Linux,
    /// NSIS installer built from the staged application directory.
    Windows,
    /// Application bundle directory, delivered as-is.
    MacOs,
}

impl Platform {
    /// Every platform, in the order the pipeline stages and packages them.
    pub const ALL: [Platform; 3] = [Platform::Linux, Platform::Windows, Platform::MacOs];

    /// Human-readable name for progress markers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
