//! Batch trimming over a directory of SVG files.
//!
//! Every file is trimmed independently with the same configuration. A file
//! that fails to load or write is recorded in its [`BatchEntry`] and the rest
//! of the batch carries on; nothing is retried.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::parser::ParseOptions;
use crate::trim::{TrimOptions, TrimReport};

/// File-stem marker identifying outputs of a previous run.
pub const DEFAULT_SKIP_MARKER: &str = "(cropped)";

/// Options for a batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Trim configuration applied to every file
    pub trim: TrimOptions,

    /// Parse configuration applied to every file
    pub parse: ParseOptions,

    /// Write outputs here (mirroring sub-directories) instead of next to inputs
    pub output_dir: Option<PathBuf>,

    /// Descend into sub-directories
    pub recursive: bool,

    /// Whether to process files in parallel
    pub parallel: bool,

    /// Files whose stem contains any of these are skipped
    pub skip_markers: Vec<String>,
}

impl BatchOptions {
    /// Create new batch options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the trim options.
    pub fn with_trim_options(mut self, trim: TrimOptions) -> Self {
        self.trim = trim;
        self
    }

    /// Set the parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Enable or disable recursion into sub-directories.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Descend into sub-directories.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Add a skip marker.
    pub fn with_skip_marker(mut self, marker: impl Into<String>) -> Self {
        self.skip_markers.push(marker.into());
        self
    }

    /// Replace the skip markers.
    pub fn with_skip_markers(mut self, markers: Vec<String>) -> Self {
        self.skip_markers = markers;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            trim: TrimOptions::default(),
            parse: ParseOptions::default(),
            output_dir: None,
            recursive: false,
            parallel: true,
            skip_markers: vec![DEFAULT_SKIP_MARKER.to_string()],
        }
    }
}

/// Outcome of one file in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntryStatus {
    /// Footer removed and output written
    Trimmed,
    /// No footer; no output written
    NotFound,
    /// Loading or writing failed
    Failed,
}

/// One processed file.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Source file
    pub input: PathBuf,

    /// Destination (written only when trimmed)
    pub output: PathBuf,

    /// Trim report, if the file could be processed
    pub report: Option<TrimReport>,

    /// Error message, if it could not
    pub error: Option<String>,
}

impl BatchEntry {
    /// Classify the entry.
    pub fn status(&self) -> EntryStatus {
        match (&self.report, &self.error) {
            (_, Some(_)) => EntryStatus::Failed,
            (Some(report), None) if report.footer_found => EntryStatus::Trimmed,
            _ => EntryStatus::NotFound,
        }
    }
}

/// Results of a batch run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Per-file outcomes
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Number of files processed.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no files were processed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of files trimmed.
    pub fn trimmed(&self) -> usize {
        self.count(EntryStatus::Trimmed)
    }

    /// Number of files without a footer.
    pub fn not_found(&self) -> usize {
        self.count(EntryStatus::NotFound)
    }

    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.count(EntryStatus::Failed)
    }

    fn count(&self, status: EntryStatus) -> usize {
        self.entries.iter().filter(|e| e.status() == status).count()
    }
}

/// Default output path for a trimmed file: `<stem> (cropped).<ext>` beside it.
pub fn cropped_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "svg".to_string());
    input.with_file_name(format!("{} {}.{}", stem, DEFAULT_SKIP_MARKER, ext))
}

/// Whether a file's stem contains any skip marker.
pub fn is_skipped(path: &Path, markers: &[String]) -> bool {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    markers.iter().any(|m| !m.is_empty() && stem.contains(m.as_str()))
}

/// List the SVG files a batch would process, sorted by path.
pub fn discover<P: AsRef<Path>>(dir: P, options: &BatchOptions) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidOption(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    collect_svgs(dir, options, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_svgs(dir: &Path, options: &BatchOptions, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_symlink() && path.is_dir() {
            log::debug!("Not following directory link {}", path.display());
            continue;
        }
        if file_type.is_dir() {
            if options.recursive && options.output_dir.as_deref() != Some(path.as_path()) {
                collect_svgs(&path, options, files)?;
            }
            continue;
        }

        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        if !is_svg {
            continue;
        }
        if is_skipped(&path, &options.skip_markers) {
            log::debug!("Skipping previous output {}", path.display());
            continue;
        }
        files.push(path);
    }
    Ok(())
}

/// Destination for `input`, found under `root`.
pub fn output_path_for(input: &Path, root: &Path, options: &BatchOptions) -> PathBuf {
    match &options.output_dir {
        Some(out) => match input.strip_prefix(root) {
            Ok(relative) => out.join(relative),
            Err(_) => out.join(input.file_name().unwrap_or_default()),
        },
        None => cropped_path(input),
    }
}

/// Trim every SVG in a directory.
pub fn run_batch<P: AsRef<Path>>(dir: P, options: &BatchOptions) -> Result<BatchReport> {
    run_batch_with(dir, options, |_| {})
}

/// Trim every SVG in a directory, calling `on_entry` as each file finishes.
///
/// With parallel processing `on_entry` may be called from worker threads and
/// out of order; the returned report is always in input order.
pub fn run_batch_with<P, F>(dir: P, options: &BatchOptions, on_entry: F) -> Result<BatchReport>
where
    P: AsRef<Path>,
    F: Fn(&BatchEntry) + Sync,
{
    let dir = dir.as_ref();
    options.trim.validate()?;
    let files = discover(dir, options)?;
    log::info!("Found {} SVG file(s) in {}", files.len(), dir.display());

    let process = |input: &PathBuf| {
        let output = output_path_for(input, dir, options);
        let entry = process_file(input, output, options);
        on_entry(&entry);
        entry
    };

    let entries = if options.parallel {
        files.par_iter().map(process).collect()
    } else {
        files.iter().map(process).collect()
    };

    Ok(BatchReport { entries })
}

fn process_file(input: &Path, output: PathBuf, options: &BatchOptions) -> BatchEntry {
    let result = prepare_output_dir(&output, options).and_then(|()| {
        crate::trim_footer_with_parse_options(input, &output, &options.parse, &options.trim)
    });

    match result {
        Ok(report) => BatchEntry {
            input: input.to_path_buf(),
            output,
            report: Some(report),
            error: None,
        },
        Err(e) => {
            log::warn!("Failed to trim {}: {}", input.display(), e);
            BatchEntry {
                input: input.to_path_buf(),
                output,
                report: None,
                error: Some(e.to_string()),
            }
        }
    }
}

fn prepare_output_dir(output: &Path, options: &BatchOptions) -> Result<()> {
    if options.output_dir.is_none() {
        return Ok(());
    }
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
