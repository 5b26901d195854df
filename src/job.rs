use chrono::{DateTime, Utc};
use docforge_common::{paths, ConversionKind, JobId};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One unit of conversion work: a single input file becomes a single output file.
///
/// Immutable once created; the coordinator clones it into its own records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionJob {
    input_path: PathBuf,
    output_path: PathBuf,
    kind: ConversionKind,
}

impl ConversionJob {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        kind: ConversionKind,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            kind,
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn kind(&self) -> ConversionKind {
        self.kind
    }

    /// Name shown in events: the input's final path component.
    pub fn file_name(&self) -> String {
        paths::display_name(&self.input_path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl JobState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Status of one submitted job. `error_message` is set iff the job failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub state: JobState,
    pub error_message: Option<String>,
}

impl JobStatus {
    pub fn pending() -> Self {
        Self {
            state: JobState::Pending,
            error_message: None,
        }
    }
}

/// Everything the coordinator tracks for one submitted job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: JobId,
    pub job: ConversionJob,
    pub status: JobStatus,
    pub progress: u8,
    pub submitted_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl JobRecord {
    pub fn new(id: JobId, job: ConversionJob) -> Self {
        Self {
            id,
            job,
            status: JobStatus::pending(),
            progress: 0,
            submitted_at: Utc::now(),
            started_at: None,
            completed_at: None,
        }
    }

    pub fn start(&mut self) {
        self.status.state = JobState::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn update_progress(&mut self, percent: u8) {
        self.progress = percent.min(100);
    }

    pub fn succeed(&mut self) {
        self.status.state = JobState::Succeeded;
        self.progress = 100;
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self, error: &str) {
        self.status.state = JobState::Failed;
        self.status.error_message = Some(error.to_string());
        self.completed_at = Some(Utc::now());
    }
}
