//! External packager configuration shared by the Linux and Windows targets.

use std::path::PathBuf;

/// How to invoke one external packager and where to find what it produced.
///
/// # Configuration
///
/// ```toml
/// [windows.packager]
/// program = "./buildWindowsInstaller.sh"
/// working_dir = "windows/_win32"
/// output = "_win32/*.exe"
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackagerSettings {
    /// Program to run. Bare names are looked up on `PATH`; names containing a
    /// path separator are resolved against `working_dir`.
    pub program: String,

    /// Arguments passed to the program.
    ///
    /// Default: none
    pub args: Vec<String>,

    /// Working directory for the invocation, relative to the working root.
    pub working_dir: PathBuf,

    /// Glob pattern, relative to `working_dir`, matching the deliverable(s)
    /// the packager writes.
    pub output: String,
}

impl PackagerSettings {
    /// Creates packager settings with no extra arguments.
    pub fn new(
        program: impl Into<String>,
        working_dir: impl Into<PathBuf>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
            output: output.into(),
        }
    }
}
