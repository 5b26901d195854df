//! Lifecycle events emitted by workers and the batch coordinator.
//!
//! The core never talks to a UI directly. Anything that wants to observe a
//! conversion implements [`EventSink`] or listens on a channel that does.
//! Sinks are called while coordinator state is locked: they must not block
//! and must not call back into the coordinator.

use docforge_common::JobId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

/// Event emitted during a conversion or a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum BatchEvent {
    /// A job was dispatched to a worker (0% progress).
    Started { job_id: JobId, file_name: String },
    /// A job reported a progress milestone.
    Progress {
        job_id: JobId,
        percent: u8,
        file_name: String,
    },
    /// A job reached its terminal state.
    JobCompleted {
        job_id: JobId,
        file_name: String,
        success: bool,
        error_message: Option<String>,
    },
    /// Every job submitted since the coordinator was last idle has finished.
    BatchCompleted { succeeded: usize, failed: usize },
}

impl BatchEvent {
    pub fn started(job_id: JobId, file_name: String) -> Self {
        BatchEvent::Started { job_id, file_name }
    }

    pub fn progress(job_id: JobId, percent: u8, file_name: String) -> Self {
        BatchEvent::Progress {
            job_id,
            percent,
            file_name,
        }
    }

    pub fn succeeded(job_id: JobId, file_name: String) -> Self {
        BatchEvent::JobCompleted {
            job_id,
            file_name,
            success: true,
            error_message: None,
        }
    }

    pub fn failed(job_id: JobId, file_name: String, error_message: String) -> Self {
        BatchEvent::JobCompleted {
            job_id,
            file_name,
            success: false,
            error_message: Some(error_message),
        }
    }

    pub fn batch_completed(succeeded: usize, failed: usize) -> Self {
        BatchEvent::BatchCompleted { succeeded, failed }
    }

    /// The job this event belongs to, if any.
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            BatchEvent::Started { job_id, .. }
            | BatchEvent::Progress { job_id, .. }
            | BatchEvent::JobCompleted { job_id, .. } => Some(*job_id),
            BatchEvent::BatchCompleted { .. } => None,
        }
    }

    /// Whether this is the last event a job will ever emit.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchEvent::JobCompleted { .. })
    }
}

/// Receiver of lifecycle events.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: BatchEvent);
}

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn emit(&self, event: BatchEvent) {
        (**self).emit(event);
    }
}

impl EventSink for broadcast::Sender<BatchEvent> {
    fn emit(&self, event: BatchEvent) {
        if self.send(event).is_err() {
            tracing::debug!("No subscribers for batch event");
        }
    }
}

impl EventSink for mpsc::UnboundedSender<BatchEvent> {
    fn emit(&self, event: BatchEvent) {
        if self.send(event).is_err() {
            tracing::debug!("Batch event receiver dropped");
        }
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: BatchEvent) {}
}
