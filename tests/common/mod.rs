#![allow(dead_code)]

use assert_fs::fixture::ChildPath;
use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend(tag.to_le_bytes());
    out.extend(kind.to_le_bytes());
    out.extend(count.to_le_bytes());
    out.extend(value.to_le_bytes());
}

fn ascii(value: &str) -> Vec<u8> {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    // Short values would have to be stored inline in the entry.
    assert!(bytes.len() > 4, "test dates must be longer than 3 characters");
    bytes
}

/// Little-endian TIFF block with an optional `DateTime` in IFD0 and an
/// optional `DateTimeOriginal` in the Exif IFD.
fn tiff_with_dates(capture: Option<&str>, modified: Option<&str>) -> Vec<u8> {
    let ifd0_entries = modified.is_some() as u32 + capture.is_some() as u32;
    let ifd0_len = 2 + 12 * ifd0_entries + 4;
    let exif_ifd_offset = 8 + ifd0_len;
    let exif_ifd_len = if capture.is_some() { 2 + 12 + 4 } else { 0 };
    let mut data_offset = exif_ifd_offset + exif_ifd_len;

    let mut out = Vec::new();
    let mut data = Vec::new();
    out.extend(b"II");
    out.extend(42u16.to_le_bytes());
    out.extend(8u32.to_le_bytes());

    out.extend((ifd0_entries as u16).to_le_bytes());
    if let Some(modified) = modified {
        let bytes = ascii(modified);
        push_entry(&mut out, TAG_DATE_TIME, TYPE_ASCII, bytes.len() as u32, data_offset);
        data_offset += bytes.len() as u32;
        data.extend(bytes);
    }
    if capture.is_some() {
        push_entry(&mut out, TAG_EXIF_IFD, TYPE_LONG, 1, exif_ifd_offset);
    }
    out.extend(0u32.to_le_bytes());

    if let Some(capture) = capture {
        let bytes = ascii(capture);
        out.extend(1u16.to_le_bytes());
        push_entry(
            &mut out,
            TAG_DATE_TIME_ORIGINAL,
            TYPE_ASCII,
            bytes.len() as u32,
            data_offset,
        );
        out.extend(0u32.to_le_bytes());
        data.extend(bytes);
    }

    out.extend(data);
    out
}

/// Minimal JPEG carrying an Exif APP1 segment and no image data.
pub fn jpeg_with_exif(capture: Option<&str>, modified: Option<&str>) -> Vec<u8> {
    let mut segment = b"Exif\0\0".to_vec();
    segment.extend(tiff_with_dates(capture, modified));

    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend(((segment.len() + 2) as u16).to_be_bytes());
    jpeg.extend(segment);
    jpeg.extend([0xFF, 0xD9]);
    jpeg
}

/// Minimal JPEG with a comment segment and no Exif data.
pub fn jpeg_without_exif() -> Vec<u8> {
    let comment = b"no metadata";
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xFE];
    jpeg.extend(((comment.len() + 2) as u16).to_be_bytes());
    jpeg.extend(comment);
    jpeg.extend([0xFF, 0xD9]);
    jpeg
}

/// Write a JPEG whose capture date is `capture` (EXIF format).
pub fn write_photo(dir: &impl PathChild, name: &str, capture: &str) -> ChildPath {
    let photo = dir.child(name);
    photo
        .write_binary(&jpeg_with_exif(Some(capture), None))
        .unwrap();
    photo
}

/// Set a file's modification time to the given unix timestamp.
pub fn set_mtime(path: &Path, unix_seconds: i64) {
    filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(unix_seconds, 0)).unwrap();
}

/// All files below `root`, relative to it, sorted.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect();
    files.sort();
    files
}
