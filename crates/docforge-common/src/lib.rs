//! Docforge-Common: Shared types, constants, and utilities.
//!
//! This crate provides common functionality used across docforge:
//!
//! - **Typed IDs**: Type-safe UUID wrapper for conversion jobs
//! - **Core Types**: The conversion direction and its file extensions
//! - **Path Utilities**: Lock-file naming and display names
//! - **Error Handling**: Common error types and result aliases
//!
//! # Examples
//!
//! ```
//! use docforge_common::{ConversionKind, Error, JobId, Result};
//! use std::path::Path;
//!
//! // Create typed IDs
//! let job_id = JobId::new();
//!
//! // Work with conversion kinds
//! let kind = ConversionKind::PdfToWord;
//! assert_eq!(kind.output_extension(), "docx");
//!
//! // Check file types
//! assert!(kind.accepts(Path::new("REPORT.PDF")));
//!
//! // Use common error types
//! fn example() -> Result<()> {
//!     Err(Error::not_found("report.pdf"))
//! }
//! ```

pub mod error;
pub mod ids;
pub mod paths;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
