use crate::sortphotos_core::error::{Result, SortError};
use exif::{In, Reader, Tag, Value};
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Date format used in EXIF data.
const EXIF_DATE_FORMAT: &[time::format_description::FormatItem] =
    time::macros::format_description!("[year]:[month]:[day] [hour]:[minute]:[second]");

/// Embedded date fields, in the order they are consulted.
const DATE_TAGS: &[(Tag, TimestampSource)] = &[
    (Tag::DateTimeOriginal, TimestampSource::CaptureTime),
    (Tag::DateTime, TimestampSource::ModifyTime),
];

/// Where a resolved timestamp came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampSource {
    /// EXIF `DateTimeOriginal`.
    CaptureTime,
    /// EXIF `DateTime` of the primary image.
    ModifyTime,
    /// Filesystem modification time.
    FileModified,
}

impl TimestampSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampSource::CaptureTime => "capture time",
            TimestampSource::ModifyTime => "embedded modification time",
            TimestampSource::FileModified => "file modification time",
        }
    }
}

impl std::fmt::Display for TimestampSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to do when a file carries no usable embedded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFallback {
    /// Use the filesystem modification time.
    #[default]
    FileModified,
    /// Give up on the file.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub at: PrimitiveDateTime,
    pub source: TimestampSource,
}

/// Parse an EXIF date string (`YYYY:MM:DD HH:MM:SS`).
pub fn parse_exif_date(date_str: &str) -> Result<PrimitiveDateTime> {
    let date_str = date_str.trim_end_matches('\0').trim();
    if date_str.is_empty() {
        return Err(SortError::InvalidDateFormat("empty date".to_string()));
    }

    PrimitiveDateTime::parse(date_str, EXIF_DATE_FORMAT)
        .map_err(|e| SortError::InvalidDateFormat(format!("{:?}: {}", date_str, e)))
}

/// Read the embedded capture date of an image.
///
/// `DateTimeOriginal` is used if present, otherwise `DateTime`. Returns
/// `Ok(None)` when the image has no Exif block, neither field is present, or
/// the field found holds no valid date, and [`SortError::MetadataUnreadable`]
/// when the file can't be opened or isn't a readable image container.
pub fn read_embedded_timestamp(path: &Path) -> Result<Option<ResolvedTimestamp>> {
    let unreadable = |reason: String| SortError::MetadataUnreadable {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| unreadable(e.to_string()))?;
    let mut reader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(unreadable(e.to_string())),
    };

    // The first date field present decides; a malformed one is not
    // replaced by a later field.
    let Some((tag, source, field)) = DATE_TAGS
        .iter()
        .find_map(|(tag, source)| exif.get_field(*tag, In::PRIMARY).map(|f| (tag, *source, f)))
    else {
        return Ok(None);
    };

    let raw = match field.value {
        Value::Ascii(ref values) => values.first().map(|v| String::from_utf8_lossy(v)),
        _ => None,
    };
    let Some(raw) = raw else {
        log::warn!("{} in {} is not a text field", tag, path.display());
        return Ok(None);
    };

    match parse_exif_date(&raw) {
        Ok(at) => Ok(Some(ResolvedTimestamp { at, source })),
        Err(e) => {
            log::warn!("Unusable {} in {}: {}", tag, path.display(), e);
            Ok(None)
        }
    }
}

/// Filesystem modification time of a file, in local time.
pub fn file_modified_timestamp(path: &Path) -> Result<ResolvedTimestamp> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|e| SortError::MetadataUnreadable {
            path: path.to_path_buf(),
            reason: format!("file modification time: {}", e),
        })?;

    let local = OffsetDateTime::from(modified).to_offset(get_local_offset());
    Ok(ResolvedTimestamp {
        at: PrimitiveDateTime::new(local.date(), local.time()),
        source: TimestampSource::FileModified,
    })
}

/// Determine the date a file should be sorted under.
///
/// Embedded capture time wins over the embedded modification time, which wins
/// over the filesystem modification time (if `fallback` allows it).
pub fn resolve_timestamp(path: &Path, fallback: DateFallback) -> Result<ResolvedTimestamp> {
    match read_embedded_timestamp(path) {
        Ok(Some(resolved)) => return Ok(resolved),
        Ok(None) => log::debug!("No embedded date found in {}", path.display()),
        Err(e) => log::warn!("{}", e),
    }

    match fallback {
        DateFallback::FileModified => {
            log::info!(
                "No capture date for {}, using file modification time",
                path.display()
            );
            file_modified_timestamp(path).map_err(|e| {
                log::warn!("{}", e);
                SortError::NoTimestamp(path.to_path_buf())
            })
        }
        DateFallback::None => Err(SortError::NoTimestamp(path.to_path_buf())),
    }
}

/// Get the local timezone offset, falling back to UTC if unavailable.
fn get_local_offset() -> UtcOffset {
    OffsetDateTime::now_local()
        .map(|dt| dt.offset())
        .unwrap_or(UtcOffset::UTC)
}
