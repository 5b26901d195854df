//! Bounded-concurrency batch coordinator.
//!
//! [`BatchCoordinator`] accepts conversion jobs, runs at most
//! `concurrency_limit` of them at once and emits lifecycle events:
//!
//! - dispatch is strictly FIFO by submission order
//! - when a job finishes, its slot is backfilled from the queue immediately
//! - `BatchCompleted` fires once each time the coordinator drains to idle
//!
//! All bookkeeping (running count, queue, statuses) lives behind one mutex.
//! A worker's completion is applied as a single critical section: status
//! write, `JobCompleted`, backfill and the idle check happen together, so two
//! completions never interleave. Conversions themselves run on the tokio
//! blocking pool, outside the lock.

mod types;

pub use types::*;

use crate::converter::{ConversionError, DocumentConverter};
use crate::events::{BatchEvent, EventSink};
use crate::job::{ConversionJob, JobRecord, JobState, JobStatus};
use crate::worker::{ConversionWorker, JobOutcome};
use docforge_common::{Error, JobId, Result};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, info, warn};

struct BatchState {
    concurrency_limit: usize,
    active_count: usize,
    pending: VecDeque<JobId>,
    records: HashMap<JobId, JobRecord>,
    /// Submission order, for stable snapshots.
    order: Vec<JobId>,
    /// Most recent job submitted for each input path.
    latest_by_path: HashMap<PathBuf, JobId>,
    tally: BatchTally,
}

impl BatchState {
    fn is_idle(&self) -> bool {
        self.pending.is_empty() && self.active_count == 0
    }

    fn summary(&self) -> BatchSummary {
        BatchSummary::from_records(self.records.values())
    }
}

struct Inner {
    state: Mutex<BatchState>,
    converter: Arc<dyn DocumentConverter>,
    sink: Arc<dyn EventSink>,
    runtime: Handle,
    /// Bumped every time the coordinator becomes idle.
    idle_tx: watch::Sender<u64>,
}

/// Runs conversion jobs with a fixed concurrency cap.
///
/// Cloning is cheap; clones share the same queue and statuses.
#[derive(Clone)]
pub struct BatchCoordinator {
    inner: Arc<Inner>,
}

impl BatchCoordinator {
    /// Create a coordinator with the default limit of
    /// [`DEFAULT_CONCURRENCY_LIMIT`] concurrent conversions.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(converter: Arc<dyn DocumentConverter>, sink: Arc<dyn EventSink>) -> Result<Self> {
        Self::with_limit(converter, sink, DEFAULT_CONCURRENCY_LIMIT)
    }

    /// Create a coordinator running at most `limit` conversions at once.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero or no tokio runtime is active.
    pub fn with_limit(
        converter: Arc<dyn DocumentConverter>,
        sink: Arc<dyn EventSink>,
        limit: usize,
    ) -> Result<Self> {
        if limit == 0 {
            return Err(Error::invalid_input(
                "concurrency limit must be at least 1",
            ));
        }
        let runtime = Handle::try_current().map_err(|_| {
            Error::internal("BatchCoordinator must be created inside a tokio runtime")
        })?;
        let (idle_tx, _) = watch::channel(0);

        Ok(Self {
            inner: Arc::new(Inner {
                state: Mutex::new(BatchState {
                    concurrency_limit: limit,
                    active_count: 0,
                    pending: VecDeque::new(),
                    records: HashMap::new(),
                    order: Vec::new(),
                    latest_by_path: HashMap::new(),
                    tally: BatchTally::default(),
                }),
                converter,
                sink,
                runtime,
                idle_tx,
            }),
        })
    }

    pub fn concurrency_limit(&self) -> usize {
        self.inner.state.lock().concurrency_limit
    }

    /// Number of jobs currently running.
    pub fn active_count(&self) -> usize {
        self.inner.state.lock().active_count
    }

    /// Number of jobs waiting for a free slot.
    pub fn pending_count(&self) -> usize {
        self.inner.state.lock().pending.len()
    }

    /// Queue one job and start it if a slot is free.
    ///
    /// Every call creates a distinct job, even for an input path that was
    /// submitted before.
    pub fn submit(&self, job: ConversionJob) -> JobId {
        let mut state = self.inner.state.lock();
        let id = Self::enqueue(&mut state, job);
        self.inner.dispatch(&mut state);
        id
    }

    /// Queue several jobs at once, then start as many as the cap allows.
    ///
    /// Jobs are enqueued before any is dispatched, so the batch cannot be
    /// reported complete while part of it is still being submitted.
    pub fn submit_all(&self, jobs: impl IntoIterator<Item = ConversionJob>) -> Vec<JobId> {
        let mut state = self.inner.state.lock();
        let ids: Vec<JobId> = jobs
            .into_iter()
            .map(|job| Self::enqueue(&mut state, job))
            .collect();
        if !ids.is_empty() {
            info!("Queued {} conversion jobs", ids.len());
            self.inner.dispatch(&mut state);
        }
        ids
    }

    fn enqueue(state: &mut BatchState, job: ConversionJob) -> JobId {
        let id = JobId::new();
        debug!("Queued {} as job {}", job.file_name(), id);
        state
            .latest_by_path
            .insert(job.input_path().to_path_buf(), id);
        state.records.insert(id, JobRecord::new(id, job));
        state.order.push(id);
        state.pending.push_back(id);
        id
    }

    /// Status of a job by its identifier.
    pub fn status(&self, id: JobId) -> Option<JobStatus> {
        let state = self.inner.state.lock();
        state.records.get(&id).map(|r| r.status.clone())
    }

    /// Status of the most recently submitted job for `input_path`.
    pub fn status_for_path(&self, input_path: &Path) -> Option<JobStatus> {
        let state = self.inner.state.lock();
        state
            .latest_by_path
            .get(input_path)
            .and_then(|id| state.records.get(id))
            .map(|r| r.status.clone())
    }

    /// Full record of a job.
    pub fn record(&self, id: JobId) -> Option<JobRecord> {
        self.inner.state.lock().records.get(&id).cloned()
    }

    /// Snapshot of every job record, in submission order.
    pub fn records(&self) -> Vec<JobRecord> {
        let state = self.inner.state.lock();
        state
            .order
            .iter()
            .filter_map(|id| state.records.get(id).cloned())
            .collect()
    }

    pub fn summary(&self) -> BatchSummary {
        self.inner.state.lock().summary()
    }

    /// True when nothing is pending or running.
    pub fn is_idle(&self) -> bool {
        self.inner.state.lock().is_idle()
    }

    /// Wait until every submitted job has reached a terminal state.
    pub async fn wait(&self) -> BatchSummary {
        let mut idle_rx = self.inner.idle_tx.subscribe();
        loop {
            {
                let state = self.inner.state.lock();
                if state.is_idle() {
                    return state.summary();
                }
            }
            if idle_rx.changed().await.is_err() {
                // Sender lives in `inner`, which `self` keeps alive.
                return self.summary();
            }
        }
    }
}

impl Inner {
    /// Start pending jobs until the cap is reached or the queue is empty.
    fn dispatch(self: &Arc<Self>, state: &mut BatchState) {
        while state.active_count < state.concurrency_limit {
            let Some(id) = state.pending.pop_front() else {
                break;
            };
            let Some(record) = state.records.get_mut(&id) else {
                warn!("Queued job {} has no record", id);
                continue;
            };
            record.start();
            state.active_count += 1;

            let worker = ConversionWorker::new(id, record.job.clone(), Arc::clone(&self.converter));
            worker.start(self.sink.as_ref());
            debug!(
                "Dispatched job {} ({} running, {} pending)",
                id,
                state.active_count,
                state.pending.len()
            );
            self.spawn(worker);
        }
    }

    fn spawn(self: &Arc<Self>, worker: ConversionWorker) {
        let inner = Arc::clone(self);
        self.runtime.spawn(async move {
            let worker = Arc::new(worker);
            let runner = Arc::clone(&worker);
            let tap = ProgressTap {
                inner: Arc::clone(&inner),
            };

            let outcome = match tokio::task::spawn_blocking(move || runner.run(&tap)).await {
                Ok(outcome) => outcome,
                Err(e) => Err(ConversionError::failed(format!(
                    "conversion task aborted: {}",
                    e
                ))),
            };

            inner.on_worker_finished(&worker, outcome);
        });
    }

    /// Apply a worker's terminal outcome, backfill, and check for idle.
    fn on_worker_finished(self: &Arc<Self>, worker: &ConversionWorker, outcome: JobOutcome) {
        let mut guard = self.state.lock();
        let state = &mut *guard;

        assert!(
            state.active_count > 0,
            "job {} finished while no job was running",
            worker.id()
        );
        state.active_count -= 1;

        match state.records.get_mut(&worker.id()) {
            Some(record) => {
                assert_eq!(
                    record.status.state,
                    JobState::Running,
                    "job {} finished twice",
                    worker.id()
                );
                match &outcome {
                    Ok(()) => {
                        info!("Converted {}", worker.file_name());
                        record.succeed();
                        state.tally.succeeded += 1;
                    }
                    Err(e) => {
                        warn!("Conversion of {} failed: {}", worker.file_name(), e);
                        record.fail(&e.to_string());
                        state.tally.failed += 1;
                    }
                }
            }
            None => panic!("finished job {} has no record", worker.id()),
        }

        self.sink.emit(worker.completion_event(&outcome));

        self.dispatch(state);

        if state.is_idle() {
            let tally = std::mem::take(&mut state.tally);
            info!(
                "Batch complete: {} succeeded, {} failed",
                tally.succeeded, tally.failed
            );
            self.sink
                .emit(BatchEvent::batch_completed(tally.succeeded, tally.failed));
            self.idle_tx.send_modify(|n| *n += 1);
        }
    }
}

/// Sink handed to workers: records progress, then forwards the event.
struct ProgressTap {
    inner: Arc<Inner>,
}

impl EventSink for ProgressTap {
    fn emit(&self, event: BatchEvent) {
        let mut state = self.inner.state.lock();
        if let BatchEvent::Progress { job_id, percent, .. } = &event {
            if let Some(record) = state.records.get_mut(job_id) {
                record.update_progress(*percent);
            }
        }
        self.inner.sink.emit(event);
    }
}
