use crate::sortphotos_core::error::{Result, SortError};
use clap::ValueEnum;
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// How a file gets into the target tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    #[default]
    Copy,
    Move,
}

impl TransferMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            TransferMode::Copy => "Copied",
            TransferMode::Move => "Moved",
        }
    }
}

impl std::fmt::Display for TransferMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What to do when the destination name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Leave the incoming file where it is
    #[default]
    Skip,
    /// Store the incoming file as name_1.ext, name_2.ext, ...
    Suffix,
}

/// Whether anything (file, directory, or dangling link) sits at `path`.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// `stem_N.ext`, or `stem_N` for names without an extension.
fn suffixed_name(file_name: &OsStr, n: u32) -> OsString {
    let name = Path::new(file_name);
    let mut suffixed = name.file_stem().unwrap_or(file_name).to_os_string();
    suffixed.push(format!("_{}", n));
    if let Some(ext) = name.extension() {
        suffixed.push(".");
        suffixed.push(ext);
    }
    suffixed
}

/// Pick the path `file_name` should be written to inside `dir`.
///
/// Returns `None` if the name is taken and `policy` says to skip.
pub fn resolve_collision(dir: &Path, file_name: &OsStr, policy: DuplicatePolicy) -> Option<PathBuf> {
    let candidate = dir.join(file_name);
    if !is_occupied(&candidate) {
        return Some(candidate);
    }

    match policy {
        DuplicatePolicy::Skip => None,
        DuplicatePolicy::Suffix => (1..)
            .map(|n| dir.join(suffixed_name(file_name, n)))
            .find(|path| !is_occupied(path)),
    }
}

/// Copy or move `source` to `destination`, creating parent directories.
///
/// `destination` is expected to be free; see [`resolve_collision`].
pub fn transfer_file(source: &Path, destination: &Path, mode: TransferMode) -> Result<()> {
    let wrap = |error: io::Error| SortError::Transfer {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        error,
    };

    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(wrap)?;
    }

    match mode {
        TransferMode::Copy => {
            fs::copy(source, destination).map_err(wrap)?;
        }
        TransferMode::Move => match fs::rename(source, destination) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
                log::debug!(
                    "{} and {} are on different filesystems, copying instead of renaming",
                    source.display(),
                    destination.display()
                );
                fs::copy(source, destination).map_err(wrap)?;
                if let Err(e) = fs::remove_file(source) {
                    // A failed move leaves only the source behind.
                    let _ = fs::remove_file(destination);
                    return Err(wrap(e));
                }
            }
            Err(e) => return Err(wrap(e)),
        },
    }

    Ok(())
}
