use crate::sortphotos_core::sorter::SortOptions;
use crate::sortphotos_core::timestamp::DateFallback;
use crate::sortphotos_core::transfer::{DuplicatePolicy, TransferMode};
use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Sort JPEG files into year/month folders by EXIF capture date or file date"
)]
pub struct Cli {
    /// Source directory (default: current directory)
    #[arg(default_value = ".")]
    pub source: PathBuf,

    /// Target directory (default: sorted_photos in the current directory)
    #[arg(default_value = "sorted_photos")]
    pub target: PathBuf,

    /// Move files instead of copying them
    #[arg(long = "move")]
    pub r#move: bool,

    /// What to do when a file of the same name already exists in the target folder
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::Skip)]
    pub on_duplicate: DuplicatePolicy,

    /// Skip files without an EXIF date instead of using their modification time
    #[arg(long)]
    pub no_mtime_fallback: bool,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Enable file logging to sortphotos.log
    #[arg(long = "log")]
    pub log: bool,

    /// Log level for file logging (debug, info, warn, error)
    #[arg(long, default_value_t = LevelFilter::Debug)]
    pub log_level: LevelFilter,
}

impl Cli {
    /// Run settings selected by the flags.
    pub fn sort_options(&self) -> SortOptions {
        SortOptions {
            mode: if self.r#move {
                TransferMode::Move
            } else {
                TransferMode::Copy
            },
            duplicates: self.on_duplicate,
            fallback: if self.no_mtime_fallback {
                DateFallback::None
            } else {
                DateFallback::FileModified
            },
            dry_run: self.dry_run,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON report with one entry per file
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["sortphotos"]).unwrap();
        assert_eq!(cli.source, PathBuf::from("."));
        assert_eq!(cli.target, PathBuf::from("sorted_photos"));
        assert_eq!(cli.output, OutputFormat::Text);

        let options = cli.sort_options();
        assert_eq!(options.mode, TransferMode::Copy);
        assert_eq!(options.duplicates, DuplicatePolicy::Skip);
        assert_eq!(options.fallback, DateFallback::FileModified);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "sortphotos",
            "in",
            "out",
            "--move",
            "--on-duplicate",
            "suffix",
            "--no-mtime-fallback",
            "--dry-run",
            "--output",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.source, PathBuf::from("in"));
        assert_eq!(cli.target, PathBuf::from("out"));
        assert_eq!(cli.output, OutputFormat::Json);

        let options = cli.sort_options();
        assert_eq!(options.mode, TransferMode::Move);
        assert_eq!(options.duplicates, DuplicatePolicy::Suffix);
        assert_eq!(options.fallback, DateFallback::None);
        assert!(options.dry_run);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["sortphotos", "--on-duplicate", "overwrite"]).is_err());
    }
}
