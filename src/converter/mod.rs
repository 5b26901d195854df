//! Document conversion backends.
//!
//! The batch core only sees [`DocumentConverter`]. The shipped backend,
//! [`OfficeConverter`], drives a headless LibreOffice (`soffice`) process:
//!
//! - PDF to Word imports the PDF with the Writer PDF import filter and
//!   exports `docx`
//! - Word to PDF exports with `writer_pdf_Export`
//!
//! Every call runs in its own scratch directory with its own office profile,
//! so several conversions can be in flight at once.

mod office;
pub mod tools;

pub use office::OfficeConverter;
pub use tools::{check_tool, check_tools, require_tool, resolve_tool, ToolInfo};

use docforge_common::ConversionKind;
use std::path::{Path, PathBuf};

/// Failure of a single conversion. `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Reading the input or writing the output failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The converter program could not be started.
    #[error("{0} is not installed or not on PATH")]
    ToolNotFound(String),

    /// The converter program ran and reported failure.
    #[error("{tool} exited with {status}: {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// The converter program claimed success but wrote nothing.
    #[error("{tool} produced no output at {}", path.display())]
    MissingOutput { tool: String, path: PathBuf },

    /// Any other failure reported by a converter.
    #[error("{0}")]
    Failed(String),
}

impl ConversionError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn failed<S: Into<String>>(msg: S) -> Self {
        Self::Failed(msg.into())
    }
}

/// External converter contract.
///
/// Both methods block; workers call them from the blocking thread pool.
pub trait DocumentConverter: Send + Sync {
    /// Open and check the input before the conversion proper begins.
    ///
    /// The default only verifies that the input can be opened for reading.
    fn prepare(&self, _kind: ConversionKind, input: &Path) -> Result<(), ConversionError> {
        std::fs::File::open(input)
            .map(|_| ())
            .map_err(|e| ConversionError::io(input, e))
    }

    /// Convert `input` into `output`, creating or overwriting `output`.
    fn convert(
        &self,
        kind: ConversionKind,
        input: &Path,
        output: &Path,
    ) -> Result<(), ConversionError>;
}
