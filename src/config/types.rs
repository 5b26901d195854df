use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::batch::DEFAULT_CONCURRENCY_LIMIT;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub converter: ConverterConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchConfig {
    /// Maximum number of conversions running at once (default: 3)
    #[serde(default = "default_concurrency_limit")]
    pub concurrency_limit: usize,
}

fn default_concurrency_limit() -> usize {
    DEFAULT_CONCURRENCY_LIMIT
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: default_concurrency_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConverterConfig {
    /// LibreOffice executable, as a name on PATH or an absolute path
    #[serde(default = "default_soffice_path")]
    pub soffice_path: String,

    /// Import filter used to open PDFs in Writer
    #[serde(default = "default_pdf_import_filter")]
    pub pdf_import_filter: String,
}

fn default_soffice_path() -> String {
    "soffice".to_string()
}

fn default_pdf_import_filter() -> String {
    "writer_pdf_import".to_string()
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            soffice_path: default_soffice_path(),
            pdf_import_filter: default_pdf_import_filter(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory for converted files; next to each input when unset
    #[serde(default)]
    pub directory: Option<PathBuf>,
}
