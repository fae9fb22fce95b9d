use std::{fs, path::Path};

use crate::error::{FileSystemError, FileSystemResult};

/// Creates a directory structure if it doesn't exist.
///
/// # Errors
///
/// * [`FileSystemError::Io`] if the directory could not be created.
/// * [`FileSystemError::NotADirectory`] if the path exists but is not a directory.
pub fn ensure_dir_exists<P: AsRef<Path>>(path: P) -> FileSystemResult<()> {
    let path = path.as_ref();

    if path.exists() {
        if !path.is_dir() {
            return Err(FileSystemError::NotADirectory(path.to_path_buf()));
        }
        return Ok(());
    }

    fs::create_dir_all(path).map_err(|err| FileSystemError::io(path, "create", err))
}

/// Writes `contents` to a sibling temporary file and renames it over `path`.
///
/// Readers never observe a half-written file.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> FileSystemResult<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = Path::new(&tmp);

    fs::write(tmp, contents).map_err(|err| FileSystemError::io(tmp, "write", err))?;
    fs::rename(tmp, path).map_err(|err| FileSystemError::io(path, "rename", err))
}

/// Reads a file to a string, returning `None` if it does not exist.
pub fn read_optional<P: AsRef<Path>>(path: P) -> FileSystemResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(FileSystemError::io(path, "read", err)),
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_ensure_dir_exists() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir_exists(&nested).unwrap();

        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            ensure_dir_exists(&file),
            Err(FileSystemError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_write_atomic_and_read_optional() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("db/graph.json");

        assert!(read_optional(&target).unwrap().is_none());

        write_atomic(&target, b"{}").unwrap();
        assert_eq!(read_optional(&target).unwrap().as_deref(), Some("{}"));

        write_atomic(&target, b"[]").unwrap();
        assert_eq!(read_optional(&target).unwrap().as_deref(), Some("[]"));
        assert!(!dir.path().join("db/graph.json.tmp").exists());
    }
}
