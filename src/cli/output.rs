//! Colored terminal output for packaging runs.
//!
//! Step markers from the pipeline arrive through [`Progress`]; everything
//! else is the deliverable summary printed by the CLI.

use crate::bundler::{Error, Progress};
use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
#[derive(Debug)]
pub struct OutputManager {
    bufwtr: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.marked("✓", ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true), message)
    }

    /// Print a verbose message (only in verbose mode)
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        self.marked("→", ColorSpec::new().set_fg(Some(Color::Blue)), message)
    }

    /// Print a section header
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer)?;
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(&mut buffer, "═══ {} ═══", title)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "    {}", message)?;
        self.bufwtr.print(&buffer)
    }

    /// One stdout line: colored marker, then the message. Silent when quiet.
    fn marked(&self, marker: &str, color: &ColorSpec, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        buffer.set_color(color)?;
        write!(&mut buffer, "{marker}")?;
        buffer.reset()?;
        writeln!(&mut buffer, " {}", message)?;
        self.bufwtr.print(&buffer)
    }

    /// Failure marker on stderr, shown even when quiet.
    fn failure(&self, message: &str) -> std::io::Result<()> {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(&mut buffer, "✗")?;
        buffer.reset()?;
        writeln!(&mut buffer, " {}", message)?;
        bufwtr.print(&buffer)
    }
}

impl Progress for OutputManager {
    fn start(&self, step: &str) {
        log::info!("{step}...");
        let _ = self.marked(
            "⋯",
            ColorSpec::new().set_fg(Some(Color::Magenta)),
            &format!("{step}..."),
        );
    }

    fn done(&self, step: &str) {
        log::info!("{step}: DONE");
        let _ = self.success(&format!("{step}: DONE"));
    }

    fn failed(&self, step: &str, error: &Error) {
        log::debug!("{step} failed: {error:?}");
        if self.failure(&format!("{step}: FAILED")).is_err() {
            log::error!("{step}: FAILED");
        }
    }
}
