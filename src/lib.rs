//! Multi-platform packaging pipeline for the Peakaboo application.
//!
//! Turns one compiled artifact into:
//! - a Debian package (`.deb`)
//! - a Windows installer (`.exe`)
//! - a macOS application bundle (`.app`)
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;
pub mod metadata;

// Re-export commonly used types
pub use error::{BundlerError, CliError, Result};
