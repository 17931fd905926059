//! Checked invocation of the external platform packagers.
//!
//! The Linux and Windows generators are opaque scripts. This module resolves
//! them, runs them in their own directory with inherited stdio, checks the
//! exit status and finds the files they wrote.

use crate::bundler::{
    builder::resolve_program,
    error::{Error, ErrorExt, Result},
    settings::PackagerSettings,
};
use std::path::{Path, PathBuf};

/// One external packager bound to a working root.
#[derive(Debug)]
pub struct Packager<'a> {
    tool: &'static str,
    settings: &'a PackagerSettings,
    working_dir: PathBuf,
}

impl<'a> Packager<'a> {
    /// Binds packager settings to the working root.
    ///
    /// `tool` names the packager in progress output and errors.
    pub fn new(tool: &'static str, settings: &'a PackagerSettings, root: &Path) -> Self {
        Self {
            tool,
            settings,
            working_dir: root.join(&settings.working_dir),
        }
    }

    /// Runs the packager to completion.
    ///
    /// Fails with [`Error::ExternalTool`] on a non-zero exit.
    pub async fn run(&self) -> Result<()> {
        let program = resolve_program(&self.settings.program, &self.working_dir)?;
        log::info!(
            "Running {} ({}) in {}",
            self.tool,
            program.display(),
            self.working_dir.display()
        );

        let status = tokio::process::Command::new(&program)
            .args(&self.settings.args)
            .current_dir(&self.working_dir)
            .status()
            .await
            .map_err(|error| Error::CommandFailed {
                command: self.settings.program.clone(),
                error,
            })?;

        if !status.success() {
            return Err(Error::ExternalTool {
                tool: self.tool.to_string(),
                code: status.code(),
            });
        }

        Ok(())
    }

    /// Files currently matching the declared output pattern, sorted.
    pub fn outputs(&self) -> Result<Vec<PathBuf>> {
        let pattern = self.output_pattern();
        let mut paths = Vec::new();
        for entry in glob::glob(&pattern)? {
            paths.push(entry?);
        }
        paths.sort();
        Ok(paths)
    }

    /// Like [`outputs`](Self::outputs), but an empty match is an error.
    pub fn require_outputs(&self) -> Result<Vec<PathBuf>> {
        let paths = self.outputs()?;
        if paths.is_empty() {
            return Err(Error::MissingOutput {
                tool: self.tool.to_string(),
                pattern: self.output_pattern(),
            });
        }
        Ok(paths)
    }

    /// Deletes leftovers from an earlier run so they cannot be mistaken for
    /// this run's output.
    pub async fn remove_stale_outputs(&self) -> Result<()> {
        for path in self.outputs()? {
            log::debug!("Removing stale {} output {}", self.tool, path.display());
            if path.is_dir() {
                tokio::fs::remove_dir_all(&path)
                    .await
                    .fs_context("removing stale output", &path)?;
            } else {
                tokio::fs::remove_file(&path)
                    .await
                    .fs_context("removing stale output", &path)?;
            }
        }
        Ok(())
    }

    fn output_pattern(&self) -> String {
        let base = glob::Pattern::escape(&self.working_dir.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), self.settings.output)
    }
}
