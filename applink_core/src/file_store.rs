use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file already exists: {0}")]
    AlreadyExists(String),
    #[error("file not found: {0}")]
    NotFound(String),
}

pub fn sandbox_dir(app_name: &str, app_id: u32) -> String {
    format!("{}_{}", app_name, app_id)
}

// Filesystem seam for the staged-upload requests. `dir` is the per-app
// sandbox directory name, always relative to the store root.
pub trait FileStore: Send {
    fn free_space(&self) -> u64;
    fn write(&self, dir: &str, name: &str, bytes: &[u8]) -> Result<(), FileStoreError>;
    fn remove(&self, dir: &str, name: &str) -> Result<(), FileStoreError>;
    fn list(&self, dir: &str) -> Result<Vec<String>, FileStoreError>;
}

// Free space is a byte quota accounted against what is currently staged
// under the root, not a platform statvfs call.
pub struct DiskFileStore {
    root: PathBuf,
    quota_bytes: u64,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>, quota_bytes: u64) -> Self {
        Self {
            root: root.into(),
            quota_bytes,
        }
    }

    fn used_bytes(dir: &Path) -> u64 {
        let Ok(entries) = fs::read_dir(dir) else {
            return 0;
        };
        let mut used = 0;
        for entry in entries.flatten() {
            let Ok(meta) = entry.metadata() else { continue };
            if meta.is_dir() {
                used += Self::used_bytes(&entry.path());
            } else {
                used += meta.len();
            }
        }
        used
    }
}

impl FileStore for DiskFileStore {
    fn free_space(&self) -> u64 {
        self.quota_bytes
            .saturating_sub(Self::used_bytes(&self.root))
    }

    fn write(&self, dir: &str, name: &str, bytes: &[u8]) -> Result<(), FileStoreError> {
        let dir_path = self.root.join(dir);
        let path = dir_path.join(name);
        if path.exists() {
            return Err(FileStoreError::AlreadyExists(name.to_string()));
        }
        fs::create_dir_all(&dir_path)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn remove(&self, dir: &str, name: &str) -> Result<(), FileStoreError> {
        let path = self.root.join(dir).join(name);
        if !path.exists() {
            return Err(FileStoreError::NotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn list(&self, dir: &str) -> Result<Vec<String>, FileStoreError> {
        let dir_path = self.root.join(dir);
        if !dir_path.is_dir() {
            return Err(FileStoreError::NotFound(dir.to_string()));
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir_path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_dir_format() {
        assert_eq!(sandbox_dir("Radio", 17), "Radio_17");
    }

    #[test]
    fn write_list_remove_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(tmp.path(), 1024);

        store.write("Radio_17", "icon.png", b"png").unwrap();
        store.write("Radio_17", "art.jpg", b"jpeg").unwrap();
        assert_eq!(
            store.list("Radio_17").unwrap(),
            vec!["art.jpg".to_string(), "icon.png".to_string()]
        );

        store.remove("Radio_17", "icon.png").unwrap();
        assert_eq!(store.list("Radio_17").unwrap(), vec!["art.jpg".to_string()]);
    }

    #[test]
    fn duplicate_write_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(tmp.path(), 1024);
        store.write("Radio_17", "icon.png", b"png").unwrap();
        assert!(matches!(
            store.write("Radio_17", "icon.png", b"png"),
            Err(FileStoreError::AlreadyExists(_))
        ));
    }

    #[test]
    fn free_space_tracks_the_quota() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(tmp.path(), 100);
        assert_eq!(store.free_space(), 100);
        store.write("Radio_17", "blob", &[0u8; 60]).unwrap();
        assert_eq!(store.free_space(), 40);
    }

    #[test]
    fn listing_an_unknown_sandbox_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = DiskFileStore::new(tmp.path(), 100);
        assert!(matches!(
            store.list("Nope_1"),
            Err(FileStoreError::NotFound(_))
        ));
        assert!(matches!(
            store.remove("Nope_1", "x"),
            Err(FileStoreError::NotFound(_))
        ));
    }
}
