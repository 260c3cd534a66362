//! JSON file persistence. Writes go through a temp file in the target
//! directory that is renamed over the destination.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use ckl_core::entities::ChecklistFile;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Serialize `value` as pretty JSON and atomically replace `path`.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &bytes)
}

pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(bytes).map_err(|e| StoreError::io(path, e))?;
    tmp.write_all(b"\n").map_err(|e| StoreError::io(path, e))?;
    tmp.as_file().sync_all().map_err(|e| StoreError::io(path, e))?;
    tmp.persist(path).map_err(|e| StoreError::io(path, e.error))?;
    Ok(())
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&raw).map_err(|e| StoreError::format(path, e.to_string()))
}

/// Read a checklist file and check its invariants.
pub fn read_checklist(path: &Path) -> Result<ChecklistFile, StoreError> {
    let file: ChecklistFile = read_json(path)?;
    file.check_invariants()
        .map_err(|e| StoreError::format(path, e.to_string()))?;
    Ok(file)
}

/// Remove a file, treating "already gone" as success.
pub fn remove_if_exists(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Rename `path` to `<file>.bad` (or `<file>.bad.N` when taken) so it is
/// neither loaded nor overwritten. Returns the new path.
pub fn set_aside(path: &Path) -> Result<PathBuf, StoreError> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut target = path.with_file_name(format!("{file_name}.bad"));
    let mut n = 1;
    while target.exists() {
        n += 1;
        target = path.with_file_name(format!("{file_name}.bad.{n}"));
    }
    fs::rename(path, &target).map_err(|e| StoreError::io(path, e))?;
    tracing::warn!(from = %path.display(), to = %target.display(), "set aside unreadable checklist file");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ckl_core::entities::Task;
    use ckl_core::enums::Priority;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn write_then_read_roundtrips() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("work.json");
        let task = Task::new(1, "Write spec", Priority::High, Utc::now()).unwrap();
        let file = ChecklistFile::from_tasks("work", vec![task]).unwrap();

        write_json_atomic(&path, &file).unwrap();
        let loaded = read_checklist(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn write_creates_missing_directories() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("a/b/work.json");
        write_json_atomic(&path, &ChecklistFile::empty("work")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_checklist(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let err = read_checklist(&temp.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn set_aside_keeps_content_and_never_clobbers() {
        let temp = TempDir::new().expect("tempdir should create");
        let path = temp.path().join("work.json");
        fs::write(&path, "first").unwrap();
        let first = set_aside(&path).unwrap();
        fs::write(&path, "second").unwrap();
        let second = set_aside(&path).unwrap();

        assert_eq!(first, temp.path().join("work.json.bad"));
        assert_eq!(second, temp.path().join("work.json.bad.2"));
        assert_eq!(fs::read_to_string(first).unwrap(), "first");
        assert_eq!(fs::read_to_string(second).unwrap(), "second");
        assert!(!path.exists());
    }

    #[test]
    fn remove_if_exists_tolerates_missing_file() {
        let temp = TempDir::new().expect("tempdir should create");
        assert!(remove_if_exists(&temp.path().join("gone.json")).is_ok());
    }
}
