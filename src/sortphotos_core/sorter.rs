use crate::sortphotos_core::error::{Result, SortError};
use crate::sortphotos_core::layout::destination_dir;
use crate::sortphotos_core::timestamp::{
    DateFallback, ResolvedTimestamp, TimestampSource, resolve_timestamp,
};
use crate::sortphotos_core::transfer::{
    DuplicatePolicy, TransferMode, resolve_collision, transfer_file,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported file name suffixes (lowercase).
const JPEG_SUFFIXES: &[&str] = &[".jpg", ".jpeg"];

/// Date format for reports.
const REPORT_DATE_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Whether a file name ends in one of the supported suffixes (any case).
pub fn is_supported(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase())
        .map(|name| JPEG_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)))
        .unwrap_or(false)
}

/// Settings that hold for a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortOptions {
    pub mode: TransferMode,
    pub duplicates: DuplicatePolicy,
    pub fallback: DateFallback,
    pub dry_run: bool,
}

/// What happened to a single source file.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Transferred {
        source: PathBuf,
        destination: PathBuf,
        date: String,
        date_source: TimestampSource,
    },
    /// Dry run: the transfer that would have happened.
    Planned {
        source: PathBuf,
        destination: PathBuf,
        date: String,
        date_source: TimestampSource,
    },
    SkippedDuplicate {
        source: PathBuf,
        existing: PathBuf,
    },
    SkippedNoTimestamp {
        source: PathBuf,
    },
    Failed {
        source: PathBuf,
        destination: PathBuf,
        reason: String,
    },
}

impl FileOutcome {
    pub fn source(&self) -> &Path {
        match self {
            FileOutcome::Transferred { source, .. }
            | FileOutcome::Planned { source, .. }
            | FileOutcome::SkippedDuplicate { source, .. }
            | FileOutcome::SkippedNoTimestamp { source }
            | FileOutcome::Failed { source, .. } => source,
        }
    }

    /// Where the file went (or would go), if anywhere.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            FileOutcome::Transferred { destination, .. }
            | FileOutcome::Planned { destination, .. } => Some(destination),
            _ => None,
        }
    }
}

/// Summary of a run, with one outcome per supported source file.
#[derive(Debug, Default, Serialize)]
pub struct SortReport {
    pub transferred: usize,
    pub planned: usize,
    pub duplicates_skipped: usize,
    pub undated_skipped: usize,
    pub failed: usize,
    pub files: Vec<FileOutcome>,
}

impl SortReport {
    fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Transferred { .. } => self.transferred += 1,
            FileOutcome::Planned { .. } => self.planned += 1,
            FileOutcome::SkippedDuplicate { .. } => self.duplicates_skipped += 1,
            FileOutcome::SkippedNoTimestamp { .. } => self.undated_skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
        self.files.push(outcome);
    }
}

impl std::fmt::Display for SortReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} transferred, {} duplicates skipped, {} without date, {} failed",
            self.transferred, self.duplicates_skipped, self.undated_skipped, self.failed
        )
    }
}

/// Sorts images from a flat source directory into `<target>/<year>/<month>/`.
pub struct Sorter {
    target_root: PathBuf,
    options: SortOptions,
}

impl Sorter {
    pub fn new(target_root: &Path, options: SortOptions) -> Self {
        Sorter {
            target_root: target_root.to_path_buf(),
            options,
        }
    }

    /// Sort every supported file directly inside `source_dir`.
    ///
    /// Only setup problems (missing source, unreadable listing, uncreatable
    /// target) are returned as errors. Per-file problems end up in the report.
    pub fn run(&self, source_dir: &Path) -> Result<SortReport> {
        let files = scan_source(source_dir)?;
        log::info!(
            "Found {} image(s) in {}",
            files.len(),
            source_dir.display()
        );

        if !self.options.dry_run {
            fs::create_dir_all(&self.target_root)?;
        }

        let bar = ProgressBar::new(files.len() as u64).with_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut report = SortReport::default();
        for path in files {
            bar.set_message(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            let outcome = self.process_file(&path);
            report.record(outcome);
            bar.inc(1);
        }

        bar.finish_and_clear();
        log::info!("Run complete: {}", report);

        Ok(report)
    }

    /// Resolve, place and transfer a single file.
    pub fn process_file(&self, path: &Path) -> FileOutcome {
        let resolved = match resolve_timestamp(path, self.options.fallback) {
            Ok(resolved) => resolved,
            Err(e) => {
                log::warn!("{}, skipped", e);
                return FileOutcome::SkippedNoTimestamp {
                    source: path.to_path_buf(),
                };
            }
        };

        let dest_dir = destination_dir(&self.target_root, &resolved.at);
        let file_name = path.file_name().unwrap_or_default();

        let Some(destination) = resolve_collision(&dest_dir, file_name, self.options.duplicates)
        else {
            let existing = dest_dir.join(file_name);
            log::info!(
                "Duplicate: {} already exists in {}, skipped",
                file_name.to_string_lossy(),
                dest_dir.display()
            );
            return FileOutcome::SkippedDuplicate {
                source: path.to_path_buf(),
                existing,
            };
        };

        let date = format_date(&resolved);

        if self.options.dry_run {
            log::info!(
                "[DRY RUN] Would {} (based on {}): {} -> {}",
                self.options.mode,
                resolved.source,
                path.display(),
                destination.display()
            );
            return FileOutcome::Planned {
                source: path.to_path_buf(),
                destination,
                date,
                date_source: resolved.source,
            };
        }

        match transfer_file(path, &destination, self.options.mode) {
            Ok(()) => {
                log::info!(
                    "{} (based on {}): {} -> {}",
                    self.options.mode.past_tense(),
                    resolved.source,
                    path.display(),
                    destination.display()
                );
                FileOutcome::Transferred {
                    source: path.to_path_buf(),
                    destination,
                    date,
                    date_source: resolved.source,
                }
            }
            Err(e) => {
                log::error!("{}", e);
                FileOutcome::Failed {
                    source: path.to_path_buf(),
                    destination,
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// List the supported files directly inside `source_dir`, in listing order.
pub fn scan_source(source_dir: &Path) -> Result<Vec<PathBuf>> {
    if !source_dir.exists() {
        return Err(SortError::PathNotFound(source_dir.to_path_buf()));
    }
    if !source_dir.is_dir() {
        return Err(SortError::NotADirectory(source_dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source_dir).min_depth(1).max_depth(1) {
        let path = match entry {
            Ok(entry) => entry.into_path(),
            // The root itself failing means nothing can be listed.
            Err(e) if e.depth() == 0 => return Err(SortError::Walkdir(e)),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !path.is_file() {
            continue;
        }
        if !is_supported(&path) {
            log::debug!("Skipping unsupported file: {}", path.display());
            continue;
        }
        files.push(path);
    }

    Ok(files)
}

fn format_date(resolved: &ResolvedTimestamp) -> String {
    resolved
        .at
        .format(REPORT_DATE_FORMAT)
        .unwrap_or_else(|_| resolved.at.to_string())
}
