//! Start/DONE markers for pipeline steps.
//!
//! Markers are observability only. Callers report them around each step and
//! still propagate the step's error.

/// Receives step markers from the pipeline.
pub trait Progress {
    /// A step is starting.
    fn start(&self, step: &str);

    /// A step finished successfully.
    fn done(&self, step: &str);

    /// A step failed; the error is propagated by the pipeline afterwards.
    fn failed(&self, step: &str, error: &crate::bundler::Error);
}

/// Writes markers to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn start(&self, step: &str) {
        log::info!("{step}...");
    }

    fn done(&self, step: &str) {
        log::info!("{step}: DONE");
    }

    fn failed(&self, step: &str, error: &crate::bundler::Error) {
        log::error!("{step}: FAILED ({error})");
    }
}
