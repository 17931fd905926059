//! Command line argument parsing and validation.

use crate::bundler::ArtifactSelection;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Packages the Peakaboo application for Linux, Windows and macOS
#[derive(Parser, Debug)]
#[command(
    name = "peakaboo_packaging",
    version,
    about = "Packages the Peakaboo application for Linux, Windows and macOS",
    long_about = "Stages one compiled artifact into the Linux, Windows and macOS packaging trees,
runs the platform packagers and collects the three deliverables into one output directory.

Usage:
  peakaboo_packaging
  peakaboo_packaging --root ./packaging --on-ambiguous newest
  peakaboo_packaging --config ci/Packaging.toml --keep-partial-output

Exit code 0 = the output directory holds all three deliverables."
)]
pub struct Args {
    /// Working root holding the artifact, resources and packaging trees
    #[arg(short = 'r', long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Packaging.toml to load (default: <root>/Packaging.toml when present)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do when several artifacts match
    #[arg(long, value_enum, value_name = "POLICY")]
    pub on_ambiguous: Option<ArtifactSelection>,

    /// Keep deliverables built before a failure
    #[arg(long)]
    pub keep_partial_output: bool,

    /// Print per-step details
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("--verbose and --quiet cannot be used together".to_string());
        }

        if !self.root.is_dir() {
            return Err(format!(
                "Working root {} is not a directory",
                self.root.display()
            ));
        }

        if let Some(config) = &self.config {
            if !config.is_file() {
                return Err(format!("Config file {} does not exist", config.display()));
            }
        }

        Ok(())
    }

    /// Manifest to load, if any: the explicit `--config`, else
    /// `<root>/Packaging.toml` when it exists.
    pub fn manifest_path(&self) -> Option<PathBuf> {
        if let Some(config) = &self.config {
            return Some(config.clone());
        }
        let default = self.root.join(crate::metadata::MANIFEST_FILE_NAME);
        default.is_file().then_some(default)
    }

    /// Working root as given
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Configuration derived from command line arguments
#[derive(Debug)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print verbose message if in verbose mode
    pub fn verbose_println(&self, message: &str) -> std::io::Result<()> {
        self.output.verbose(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }

    /// Print section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        self.output.section(title)
    }

    /// Print indented text
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        self.output.indent(message)
    }
}
