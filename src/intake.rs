//! Input collection and validation.
//!
//! Everything here runs before submission. The coordinator assumes it only
//! ever sees existing, correctly typed inputs; this module is what makes
//! that true for the command line, the way a file picker would for a GUI.

use crate::job::ConversionJob;
use docforge_common::{paths, ConversionKind, Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolve command-line inputs into the files to convert.
///
/// Explicit files must exist and carry `kind`'s input extension. Directories
/// are expanded (recursively if `recursive`) to the matching files inside
/// them, sorted by name; other files in them are skipped silently. The
/// result is absolute and free of duplicates, in first-seen order.
pub fn collect_inputs(
    inputs: &[PathBuf],
    kind: ConversionKind,
    recursive: bool,
) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let max_depth = if recursive { usize::MAX } else { 1 };
            for entry in WalkDir::new(input)
                .max_depth(max_depth)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if entry.file_type().is_file() && kind.accepts(path) && !paths::is_lock_file(path) {
                    push_unique(&mut seen, &mut files, path)?;
                }
            }
            continue;
        }

        validate_input(input, kind)?;
        push_unique(&mut seen, &mut files, input)?;
    }

    Ok(files)
}

/// Check that a single explicitly named input can be converted with `kind`.
pub fn validate_input(input: &Path, kind: ConversionKind) -> Result<()> {
    if !input.exists() {
        return Err(Error::not_found(input.display().to_string()));
    }
    if !input.is_file() {
        return Err(Error::validation(format!(
            "{} is not a regular file",
            input.display()
        )));
    }
    if !kind.accepts(input) {
        return Err(Error::validation(format!(
            "{} is not a .{} file",
            paths::display_name(input),
            kind.input_extension()
        )));
    }
    Ok(())
}

fn push_unique(seen: &mut HashSet<PathBuf>, files: &mut Vec<PathBuf>, path: &Path) -> Result<()> {
    let absolute = std::fs::canonicalize(path)?;
    if seen.insert(absolute.clone()) {
        files.push(absolute);
    }
    Ok(())
}

/// Output path for `input`: same stem, `kind`'s output extension, placed in
/// `output_dir` or next to the input.
pub fn output_path_for(input: &Path, kind: ConversionKind, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    let file_name = format!("{}.{}", stem, kind.output_extension());

    match output_dir.or_else(|| input.parent()) {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Build one job per input.
///
/// Fails if two inputs would be written to the same output, as with
/// `a/report.pdf` and `b/report.pdf` sharing an output directory, or `a.pdf`
/// next to `a.PDF`. Outputs are compared ignoring ASCII case.
pub fn plan_jobs(
    inputs: &[PathBuf],
    kind: ConversionKind,
    output_dir: Option<&Path>,
) -> Result<Vec<ConversionJob>> {
    let mut claimed: HashMap<String, &Path> = HashMap::new();
    let mut jobs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = output_path_for(input, kind, output_dir);
        let key = output.to_string_lossy().to_ascii_lowercase();
        if let Some(previous) = claimed.insert(key, input) {
            return Err(Error::validation(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                input.display(),
                output.display()
            )));
        }
        jobs.push(ConversionJob::new(input.clone(), output, kind));
    }

    Ok(jobs)
}
