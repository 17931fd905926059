//! Error types for packaging operations.
//!
//! Provides contextual error chaining, filesystem errors that carry the
//! offending path, and the pipeline-specific failures (missing or ambiguous
//! artifact, missing resource, failed external packager).
//!
//! # Features
//!
//! - **Context trait**: Add context to errors similar to anyhow
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **bail! macro**: Early return with formatted error messages

use crate::bundler::platform::Platform;
use std::{
    fmt::Display,
    io,
    path::{self, PathBuf},
};
use thiserror::Error as DeriveError;

/// Errors returned by the packaging pipeline.
///
/// Every variant is fatal. The pipeline never retries and never reports
/// partial success.
#[derive(Debug, DeriveError)]
#[non_exhaustive]
pub enum Error {
    /// Error with context. Created by the [`Context`] trait.
    #[error("{0}: {1}")]
    Context(String, Box<Self>),

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {path}: {error}")]
    Fs {
        /// Context describing the operation (e.g., "copying resource")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// No candidate artifact in the working root.
    #[error("no *.{extension} artifact found in {}", .dir.display())]
    MissingArtifact {
        /// Directory that was searched
        dir: PathBuf,
        /// Extension that was searched for
        extension: String,
    },

    /// More than one candidate artifact and the selection policy is `fail`.
    #[error(
        "found {} candidate artifacts ({}); remove the stale ones or pass --on-ambiguous first|newest",
        .candidates.len(),
        display_paths(.candidates)
    )]
    AmbiguousArtifact {
        /// Candidates in lexicographic order
        candidates: Vec<PathBuf>,
    },

    /// A declared staging resource does not exist under the resource root.
    #[error("resource {} required for {platform} staging does not exist", .path.display())]
    MissingResource {
        /// Platform whose staging spec declared the resource
        platform: Platform,
        /// Absolute path of the missing source file
        path: PathBuf,
    },

    /// The staging mode requires extraction but the artifact is not an archive.
    #[error("cannot extract {}: not a zip archive", .path.display())]
    NotAnArchive {
        /// Artifact path
        path: PathBuf,
    },

    /// An external packager ran but exited unsuccessfully.
    #[error("{tool} failed with {}", exit_description(.code))]
    ExternalTool {
        /// Packager description (e.g., "Linux package generator")
        tool: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// Child process could not be spawned.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// Packager program could not be resolved to an executable.
    #[error("could not locate packager {program} from {}: {error}", .dir.display())]
    ToolNotFound {
        /// Program as configured
        program: String,
        /// Directory the program was resolved against
        dir: PathBuf,
        /// The underlying lookup error
        error: which::Error,
    },

    /// A packager exited successfully but left nothing matching its declared output.
    #[error("{tool} produced no output matching {pattern}")]
    MissingOutput {
        /// Packager description
        tool: String,
        /// Glob pattern that was expected to match
        pattern: String,
    },

    /// Error walking a directory tree.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] path::StripPrefixError),

    /// ZIP archive extraction error.
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    /// Invalid glob pattern for packager output.
    #[error("{0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob execution error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Generic error with custom message.
    #[error("{0}")]
    GenericError(String),
}

impl Error {
    /// Returns the innermost error, skipping [`Error::Context`] wrappers.
    pub fn root_cause(&self) -> &Self {
        let mut current = self;
        while let Self::Context(_, inner) = current {
            current = inner;
        }
        current
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn exit_description(code: &Option<i32>) -> String {
    match *code {
        Some(code) => format!("exit code {code}"),
        None => "termination by signal".to_string(),
    }
}

/// Convenient type alias for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Trait for adding context to errors.
///
/// Similar to `anyhow::Context` but integrated with the pipeline's Error type.
/// Works with both `Result<T, E>` and `Option<T>`.
pub trait Context<T> {
    /// Add context to an error.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error using a closure (lazy evaluation).
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> Context<T> for Result<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| Error::Context(context.to_string(), Box::new(e)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| Error::Context(f().to_string(), Box::new(e)))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Extension trait for filesystem operations with automatic path context.
pub trait ErrorExt<T> {
    /// Add filesystem context to an I/O error.
    ///
    /// The `context` should be a present-tense verb phrase describing the operation,
    /// e.g., "reading file", "creating directory", "copying resource".
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

/// Macro for early return with error.
///
/// Converts the message into a [`Error::GenericError`] and returns immediately.
///
/// ```ignore
/// bail!("operation failed");
/// bail!("invalid value: {}", value);
/// ```
#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::bundler::Error::GenericError($msg.into()))
    };
    ($err:expr $(,)?) => {
        return Err($crate::bundler::Error::GenericError($err.to_string()))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::bundler::Error::GenericError(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_cause_unwraps_nested_context() {
        let err: Result<()> = Err(Error::ExternalTool {
            tool: "Windows installer generator".into(),
            code: Some(2),
        });
        let err = err
            .context("building Windows package")
            .context("packaging")
            .unwrap_err();

        assert!(matches!(
            err.root_cause(),
            Error::ExternalTool { code: Some(2), .. }
        ));
        assert_eq!(
            err.to_string(),
            "packaging: building Windows package: Windows installer generator failed with exit code 2"
        );
    }

    #[test]
    fn signal_termination_is_described() {
        let err = Error::ExternalTool {
            tool: "Linux package generator".into(),
            code: None,
        };
        assert!(err.to_string().ends_with("termination by signal"));
    }

    #[test]
    fn fs_context_keeps_path() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.fs_context("copying resource", "/tmp/icon.png").unwrap_err();
        assert_eq!(err.to_string(), "copying resource /tmp/icon.png: gone");
    }
}
