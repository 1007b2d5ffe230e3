use std::io;
use std::path::{Path, PathBuf};

/// Where snapshots are kept between runs.
pub trait SaveStore {
    /// Saved bytes, or `None` when nothing has been saved yet.
    fn read(&self) -> io::Result<Option<Vec<u8>>>;

    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// Single save file on disk.
#[derive(Clone, Debug, PartialEq)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        std::fs::write(&self.path, bytes)
    }
}

/// Save slot held in memory, for hosts without a filesystem and for tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    bytes: Option<Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Some(bytes.into()),
        }
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self) -> io::Result<Option<Vec<u8>>> {
        Ok(self.bytes.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.bytes = Some(bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("infisweep-{}-{}", std::process::id(), name))
    }

    #[test]
    fn file_store_round_trip() {
        let path = scratch_path("round-trip.save");
        let mut store = FileStore::new(&path);

        store.write(b"{}").unwrap();
        assert_eq!(store.read().unwrap(), Some(b"{}".to_vec()));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let store = FileStore::new(scratch_path("never-written.save"));
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn memory_store_keeps_last_write() {
        let mut store = MemoryStore::new();
        assert_eq!(store.read().unwrap(), None);

        store.write(b"first").unwrap();
        store.write(b"second").unwrap();
        assert_eq!(store.bytes(), Some(&b"second"[..]));
    }
}
