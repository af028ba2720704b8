pub mod cli;
pub mod error;
pub mod layout;
pub mod month;
pub mod sorter;
pub mod timestamp;
pub mod transfer;

pub use cli::{Cli, OutputFormat};
pub use error::SortError;
pub use layout::{destination_dir, year_and_month};
pub use month::Month;
pub use sorter::{FileOutcome, SortOptions, SortReport, Sorter, is_supported, scan_source};
pub use timestamp::{
    DateFallback, ResolvedTimestamp, TimestampSource, file_modified_timestamp, parse_exif_date,
    read_embedded_timestamp, resolve_timestamp,
};
pub use transfer::{DuplicatePolicy, TransferMode, resolve_collision, transfer_file};
