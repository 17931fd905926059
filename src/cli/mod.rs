//! Command line interface for the packaging pipeline.
//!
//! Parses arguments, layers `Packaging.toml` and flags into [`Settings`],
//! runs the [`Bundler`] and prints the deliverables.
//!
//! [`Settings`]: crate::bundler::Settings

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::bundler::{Bundler, SettingsBuilder};
use crate::error::{CliError, Result};
use crate::metadata;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute(&args).await
}

/// Runs the pipeline for already-parsed arguments.
pub async fn execute(args: &Args) -> Result<i32> {
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;
    let config = RuntimeConfig::from(args);

    let root = resolve_root(args.root())?;
    let mut builder = SettingsBuilder::new().root(&root);

    if let Some(path) = args.manifest_path() {
        config.verbose_println(&format!("Loading {}", path.display()))?;
        builder = metadata::load_manifest(&path)?.apply(builder);
    }
    if let Some(selection) = args.on_ambiguous {
        builder = builder.artifact_selection(selection);
    }
    if args.keep_partial_output {
        builder = builder.keep_partial_output(true);
    }

    let bundler = Bundler::new(builder.build()?);
    config.verbose_println(&format!(
        "Working root: {}",
        bundler.settings().root().display()
    ))?;
    config.verbose_println(&format!(
        "Output directory: {}",
        bundler.settings().output_directory().display()
    ))?;

    let outputs = bundler.bundle_with(config.output()).await?;

    config.section("Deliverables")?;
    for output in &outputs {
        config.success(&format!("{}: {}", output.platform, output.path.display()))?;
        config.indent(&format!("{} bytes, sha256 {}", output.size, output.checksum))?;
    }

    Ok(0)
}

/// Absolute form of the working root, so packagers running in their own
/// directories see the same paths.
fn resolve_root(root: &Path) -> Result<PathBuf> {
    let resolved = std::path::absolute(root)
        .with_context(|| format!("resolving working root {}", root.display()))?;
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BundlerError;

    #[test]
    fn relative_root_is_made_absolute() {
        let resolved = resolve_root(Path::new("packaging")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("packaging"));
    }

    #[test]
    fn empty_root_reports_what_was_being_resolved() {
        let err = resolve_root(Path::new("")).unwrap_err();

        assert!(matches!(err, BundlerError::Anyhow(_)));
        assert!(err.to_string().contains("resolving working root"));
    }
}
