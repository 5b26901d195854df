//! Docforge - PDF and Word document conversion
//!
//! This library crate exposes the conversion core for the CLI and for
//! integration testing.

pub mod batch;
pub mod config;
pub mod converter;
pub mod events;
pub mod intake;
pub mod job;
pub mod worker;

pub use batch::{BatchCoordinator, BatchSummary, DEFAULT_CONCURRENCY_LIMIT};
pub use converter::{ConversionError, DocumentConverter, OfficeConverter};
pub use events::{BatchEvent, EventSink};
pub use job::{ConversionJob, JobRecord, JobState, JobStatus};
pub use worker::{convert_single, ConversionWorker};
