//! External tool detection and availability checking.
//!
//! Resolves configured packager programs to executables before anything is
//! spawned, so a missing or non-executable script is reported as such rather
//! than as an opaque spawn failure.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Resolve a packager program to an executable path.
///
/// Bare names are searched on `PATH`. Names with a path separator (such as
/// `./generate.sh`) are resolved against `working_dir` and must be executable.
pub fn resolve_program(program: &str, working_dir: &Path) -> Result<PathBuf> {
    match which::which_in(program, std::env::var_os("PATH"), working_dir) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            Ok(path)
        }
        Err(error) => {
            log::debug!(
                "{} not resolvable from {}: {}",
                program,
                working_dir.display(),
                error
            );
            Err(Error::ToolNotFound {
                program: program.to_string(),
                dir: working_dir.to_path_buf(),
                error,
            })
        }
    }
}
