//! LibreOffice-backed converter.

use super::{ConversionError, DocumentConverter};
use crate::config::ConverterConfig;
use docforge_common::ConversionKind;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Converter that shells out to `soffice --headless --convert-to`.
#[derive(Debug, Clone)]
pub struct OfficeConverter {
    soffice: String,
    pdf_import_filter: String,
}

impl Default for OfficeConverter {
    fn default() -> Self {
        Self::new(&ConverterConfig::default())
    }
}

impl OfficeConverter {
    /// Create a converter from configured settings.
    pub fn new(settings: &ConverterConfig) -> Self {
        Self {
            soffice: settings.soffice_path.clone(),
            pdf_import_filter: settings.pdf_import_filter.clone(),
        }
    }

    /// The `soffice` program this converter runs.
    pub fn program(&self) -> &str {
        &self.soffice
    }

    /// Build the `soffice` argument list for one conversion.
    ///
    /// `scratch` receives both the isolated user profile and the converted file.
    fn build_args(&self, kind: ConversionKind, input: &Path, scratch: &Path) -> Vec<String> {
        let profile = scratch.join("profile");
        let mut args = vec![
            format!("-env:UserInstallation=file://{}", profile.display()),
            "--headless".to_string(),
            "--norestore".to_string(),
            "--nolockcheck".to_string(),
        ];

        match kind {
            ConversionKind::PdfToWord => {
                args.push(format!("--infilter={}", self.pdf_import_filter));
                args.extend(["--convert-to".to_string(), "docx:MS Word 2007 XML".to_string()]);
            }
            ConversionKind::WordToPdf => {
                args.extend(["--convert-to".to_string(), "pdf:writer_pdf_Export".to_string()]);
            }
        }

        args.extend([
            "--outdir".to_string(),
            scratch.to_string_lossy().to_string(),
            input.to_string_lossy().to_string(),
        ]);
        args
    }

    /// Where `soffice` writes its result inside the scratch directory.
    fn produced_path(kind: ConversionKind, input: &Path, scratch: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        scratch.join(format!("{}.{}", stem, kind.output_extension()))
    }
}

/// Move `from` to `to`, falling back to copy when they live on different filesystems.
fn move_file(from: &Path, to: &Path) -> Result<(), ConversionError> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)
        .map(|_| ())
        .map_err(|e| ConversionError::io(to, e))
}

impl DocumentConverter for OfficeConverter {
    fn convert(
        &self,
        kind: ConversionKind,
        input: &Path,
        output: &Path,
    ) -> Result<(), ConversionError> {
        let scratch = tempfile::Builder::new()
            .prefix("docforge-")
            .tempdir()
            .map_err(|e| ConversionError::io(&std::env::temp_dir(), e))?;

        let args = self.build_args(kind, input, scratch.path());
        debug!("soffice args: {:?}", args);

        let result = Command::new(&self.soffice).args(&args).output();
        let out = match result {
            Ok(out) => out,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConversionError::ToolNotFound(self.soffice.clone()));
            }
            Err(e) => return Err(ConversionError::io(Path::new(&self.soffice), e)),
        };

        if !out.status.success() {
            return Err(ConversionError::ToolFailed {
                tool: self.soffice.clone(),
                status: out.status.to_string(),
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }

        let produced = Self::produced_path(kind, input, scratch.path());
        if !produced.exists() {
            return Err(ConversionError::MissingOutput {
                tool: self.soffice.clone(),
                path: produced,
            });
        }

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConversionError::io(parent, e))?;
        }
        move_file(&produced, output)
    }
}
