//! Core type definitions.
//!
//! [`ConversionKind`] is the direction of a conversion. It also owns the
//! extension rules used to validate inputs and name outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::{paths, Error};

/// Direction of a document conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    /// PDF document to Word (`.docx`).
    PdfToWord,
    /// Word document (`.docx`) to PDF.
    WordToPdf,
}

impl ConversionKind {
    /// Extension (lowercase, without dot) an input file must carry.
    #[must_use]
    pub fn input_extension(self) -> &'static str {
        match self {
            Self::PdfToWord => "pdf",
            Self::WordToPdf => "docx",
        }
    }

    /// Extension (lowercase, without dot) given to the produced file.
    #[must_use]
    pub fn output_extension(self) -> &'static str {
        match self {
            Self::PdfToWord => "docx",
            Self::WordToPdf => "pdf",
        }
    }

    /// Check whether `path` has the extension this kind expects as input.
    pub fn accepts(self, path: &Path) -> bool {
        paths::has_extension(path, self.input_extension())
    }

    /// Infer the conversion direction from an input file's extension.
    pub fn infer(path: &Path) -> Option<Self> {
        [Self::PdfToWord, Self::WordToPdf]
            .into_iter()
            .find(|kind| kind.accepts(path))
    }
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PdfToWord => write!(f, "pdf-to-word"),
            Self::WordToPdf => write!(f, "word-to-pdf"),
        }
    }
}

impl FromStr for ConversionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf-to-word" | "pdf_to_word" | "pdf2word" | "pdf2docx" => Ok(Self::PdfToWord),
            "word-to-pdf" | "word_to_pdf" | "word2pdf" | "docx2pdf" => Ok(Self::WordToPdf),
            other => Err(Error::invalid_input(format!(
                "unknown conversion kind '{}' (expected pdf-to-word or word-to-pdf)",
                other
            ))),
        }
    }
}
