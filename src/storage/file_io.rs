//! File I/O utilities with atomic writes
//!
//! Every local record (settings, session, lead) is a small JSON document.
//! Writes go to a sibling temp file that is renamed over the target, so a
//! crash leaves either the old or the new document, never a torn one.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ForklyError;

/// Who may read a written file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Default permissions
    Shared,
    /// Owner-only on Unix; used for files holding tokens
    Private,
}

/// Read JSON from a file, returning `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, ForklyError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ForklyError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map(Some)
        .map_err(|e| ForklyError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read JSON from a file, returning an error if file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, ForklyError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    read_json_optional(path)?
        .ok_or_else(|| ForklyError::Storage(format!("File not found: {}", path.display())))
}

/// Write JSON to a file atomically with default permissions
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ForklyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_json(path.as_ref(), data, Visibility::Shared)
}

/// Write JSON to a file atomically, readable only by the owner
pub fn write_json_private<T, P>(path: P, data: &T) -> Result<(), ForklyError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_json(path.as_ref(), data, Visibility::Private)
}

fn write_json<T: Serialize>(
    path: &Path,
    data: &T,
    visibility: Visibility,
) -> Result<(), ForklyError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ForklyError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    let file = open_for_write(&temp_path, visibility)
        .map_err(|e| ForklyError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ForklyError::Storage(format!("Failed to serialize data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| ForklyError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ForklyError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        ForklyError::Storage(format!("Failed to rename temp file: {}", e))
    })
}

/// `dir/name.json` becomes `dir/.name.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "forkly".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(unix)]
fn open_for_write(path: &Path, visibility: Visibility) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    if visibility == Visibility::Private {
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path, _visibility: Visibility) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

/// Remove a file, treating "already gone" as success
///
/// Returns whether a file was removed.
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, ForklyError> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ForklyError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}
