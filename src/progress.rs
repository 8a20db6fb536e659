use std::path::PathBuf;
use tracing::info;

/// Checkpoints reported while a conversion runs.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// The input document is about to be read
    ReadStarted { path: PathBuf },
    /// The input document is fully in memory
    ReadCompleted { path: PathBuf, bytes: usize },
    /// Scanning finished; `includes` counts records, `excludes` counts holes
    RegionsLoaded { includes: usize, excludes: usize },
    /// One JSON output file has been written
    FileWritten { path: PathBuf, records: usize },
}

/// Receiver for [`ProgressEvent`]s.
///
/// The scanner and writers only talk to this trait, so they can be driven in
/// tests with a closure that collects events instead of a logger.
pub trait ProgressSink {
    fn report(&mut self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent),
{
    fn report(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// Forwards every checkpoint to `tracing` at info level.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, event: ProgressEvent) {
        match event {
            ProgressEvent::ReadStarted { path } => {
                info!(input = %path.display(), "Reading data");
            }
            ProgressEvent::ReadCompleted { path, bytes } => {
                info!(input = %path.display(), bytes = bytes, "Read input document");
            }
            ProgressEvent::RegionsLoaded { includes, excludes } => {
                info!(
                    include_regions = includes,
                    exclude_regions = excludes,
                    "Loaded regions"
                );
            }
            ProgressEvent::FileWritten { path, records } => {
                info!(output = %path.display(), records = records, "Wrote output file");
            }
        }
    }
}
