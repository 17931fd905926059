//! Top-level error types for the packaging CLI.
//!
//! Wraps pipeline errors together with configuration and argument errors,
//! and maps each to a recovery hint printed after the message.

use crate::bundler::Error as PipelineError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Packaging.toml parse errors
    #[error("invalid {}: {error}", .path.display())]
    Config {
        /// Configuration file
        path: PathBuf,
        /// The underlying parse error
        error: toml::de::Error,
    },

    /// Pipeline errors
    #[error("{0}")]
    Bundler(#[from] PipelineError),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Command execution failed
    #[error("Command execution failed: {command} - {reason}")]
    ExecutionFailed {
        /// Command that failed
        command: String,
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let Self::Bundler(error) = self else {
            return vec!["Check the error message above for specific details".to_string()];
        };

        match error.root_cause() {
            PipelineError::MissingArtifact { extension, .. } => vec![format!(
                "Copy the built *.{extension} into the packaging directory or pass --root"
            )],
            PipelineError::AmbiguousArtifact { .. } => vec![
                "Remove all but one artifact".to_string(),
                "Or pass --on-ambiguous first|newest to pick one".to_string(),
            ],
            PipelineError::MissingResource { .. } => {
                vec!["Restore the file under resources/ or fix the path in Packaging.toml".to_string()]
            }
            PipelineError::ExternalTool { .. } => vec![
                "Scroll up for the packager's own output".to_string(),
                "Pass --keep-partial-output to inspect deliverables built before the failure"
                    .to_string(),
            ],
            PipelineError::ToolNotFound { .. } => {
                vec!["Check the packager script exists and is executable".to_string()]
            }
            _ => vec!["Check the error message above for specific details".to_string()],
        }
    }
}
