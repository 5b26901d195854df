//! Execution of a single conversion job.
//!
//! A worker announces its job, runs the converter and reports progress
//! milestones. Whoever drives the worker (the batch coordinator, or
//! [`convert_single`]) emits the one terminal event from the returned outcome.

use crate::converter::{ConversionError, DocumentConverter};
use crate::events::{BatchEvent, EventSink};
use crate::job::ConversionJob;
use docforge_common::{paths, ConversionKind, JobId};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Progress reported once the input is open and the conversion is underway.
pub const UNDERWAY_PERCENT: u8 = 30;

/// Progress reported after the output has been written.
pub const DONE_PERCENT: u8 = 100;

/// Outcome of one job.
pub type JobOutcome = Result<(), ConversionError>;

/// Runs one [`ConversionJob`] to completion.
pub struct ConversionWorker {
    id: JobId,
    job: ConversionJob,
    file_name: String,
    converter: Arc<dyn DocumentConverter>,
}

impl ConversionWorker {
    pub fn new(id: JobId, job: ConversionJob, converter: Arc<dyn DocumentConverter>) -> Self {
        let file_name = job.file_name();
        Self {
            id,
            job,
            file_name,
            converter,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Announce the job (0% progress). Called once, before [`run`](Self::run).
    pub fn start(&self, sink: &dyn EventSink) {
        info!("Converting {} ({})", self.file_name, self.job.kind());
        sink.emit(BatchEvent::started(self.id, self.file_name.clone()));
    }

    /// Run the conversion, blocking until the converter returns.
    ///
    /// Emits the intermediate and final progress milestones. On failure no
    /// further progress is emitted and the error is returned.
    pub fn run(&self, sink: &dyn EventSink) -> JobOutcome {
        let kind = self.job.kind();
        let input = self.job.input_path();
        let output = self.job.output_path();

        self.converter.prepare(kind, input)?;
        sink.emit(BatchEvent::progress(
            self.id,
            UNDERWAY_PERCENT,
            self.file_name.clone(),
        ));

        self.converter.convert(kind, input, output)?;

        if kind == ConversionKind::PdfToWord {
            remove_lock_file(output);
        }

        sink.emit(BatchEvent::progress(
            self.id,
            DONE_PERCENT,
            self.file_name.clone(),
        ));
        Ok(())
    }

    /// The terminal event for `outcome`.
    pub fn completion_event(&self, outcome: &JobOutcome) -> BatchEvent {
        match outcome {
            Ok(()) => BatchEvent::succeeded(self.id, self.file_name.clone()),
            Err(e) => BatchEvent::failed(self.id, self.file_name.clone(), e.to_string()),
        }
    }
}

/// Best-effort removal of the `~$` lock file left next to a Word output.
fn remove_lock_file(output: &Path) {
    let Some(lock) = paths::lock_file_for(output) else {
        return;
    };
    if !lock.exists() {
        return;
    }
    match std::fs::remove_file(&lock) {
        Ok(()) => debug!("Removed lock file {:?}", lock),
        Err(e) => debug!("Could not remove lock file {:?}: {}", lock, e),
    }
}

/// Convert one file without a coordinator.
///
/// Emits `Started`, the progress milestones and one `JobCompleted`; never
/// `BatchCompleted`. The error is returned so the caller can show it directly.
pub fn convert_single(
    converter: Arc<dyn DocumentConverter>,
    sink: &dyn EventSink,
    job: ConversionJob,
) -> JobOutcome {
    let worker = ConversionWorker::new(JobId::new(), job, converter);
    worker.start(sink);
    let outcome = worker.run(sink);
    if let Err(ref e) = outcome {
        warn!("Conversion of {} failed: {}", worker.file_name(), e);
    }
    sink.emit(worker.completion_event(&outcome));
    outcome
}
