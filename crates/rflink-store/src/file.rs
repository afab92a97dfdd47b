use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::{ByteStore, ERASED};

/// File-backed storage, one byte per cell, persisted across runs.
pub struct FileStore {
    file: File,
    path: PathBuf,
    size: usize,
}

impl FileStore {
    /// Opens file-backed storage of `size` bytes, creating the file if it
    /// does not exist.
    ///
    /// Existing contents are preserved. Call [`ByteStore::init`] before
    /// the first read so that cells never written read as erased.
    pub fn open(path: impl AsRef<Path>, size: usize) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;
        debug!(path = %path.display(), size, "opened file store");
        Ok(Self { file, path, size })
    }

    /// Storage size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check(&self, address: usize) -> Result<()> {
        if address >= self.size {
            return Err(StoreError::AddressOutOfRange {
                address,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl ByteStore for FileStore {
    fn init(&mut self) -> Result<()> {
        let current = self.file.metadata()?.len() as usize;
        if current < self.size {
            self.file.seek(SeekFrom::Start(current as u64))?;
            self.file.write_all(&vec![ERASED; self.size - current])?;
            self.file.flush()?;
        }
        Ok(())
    }

    fn read_byte(&mut self, address: usize) -> Result<u8> {
        self.check(address)?;
        self.file.seek(SeekFrom::Start(address as u64))?;
        let mut cell = [0u8; 1];
        self.file.read_exact(&mut cell)?;
        Ok(cell[0])
    }

    fn write_byte(&mut self, address: usize, value: u8) -> Result<()> {
        self.check(address)?;
        self.file.seek(SeekFrom::Start(address as u64))?;
        self.file.write_all(&[value])?;
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_path(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rflink-store-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir.join("store.bin")
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn fresh_store_reads_erased_after_init() {
        let path = temp_store_path("fresh");
        let mut store = FileStore::open(&path, 32).unwrap();
        store.init().unwrap();

        for address in [0, 15, 31] {
            assert_eq!(store.read_byte(address).unwrap(), ERASED);
        }
        cleanup(&path);
    }

    #[test]
    fn write_then_read_roundtrips() {
        let path = temp_store_path("roundtrip");
        let mut store = FileStore::open(&path, 32).unwrap();
        store.init().unwrap();

        store.write_byte(7, 0x42).unwrap();
        assert_eq!(store.read_byte(7).unwrap(), 0x42);
        assert_eq!(store.read_byte(8).unwrap(), ERASED);
        cleanup(&path);
    }

    #[test]
    fn contents_persist_across_reopen() {
        let path = temp_store_path("persist");
        {
            let mut store = FileStore::open(&path, 32).unwrap();
            store.init().unwrap();
            store.write_byte(3, 0x99).unwrap();
        }

        let mut store = FileStore::open(&path, 32).unwrap();
        store.init().unwrap();
        assert_eq!(store.read_byte(3).unwrap(), 0x99);
        assert_eq!(store.read_byte(4).unwrap(), ERASED);
        cleanup(&path);
    }

    #[test]
    fn init_extends_a_grown_store() {
        let path = temp_store_path("grow");
        {
            let mut store = FileStore::open(&path, 8).unwrap();
            store.init().unwrap();
            store.write_byte(0, 1).unwrap();
        }

        let mut store = FileStore::open(&path, 16).unwrap();
        store.init().unwrap();
        assert_eq!(store.read_byte(0).unwrap(), 1);
        assert_eq!(store.read_byte(12).unwrap(), ERASED);
        cleanup(&path);
    }

    #[test]
    fn out_of_range_addresses_are_rejected() {
        let path = temp_store_path("bounds");
        let mut store = FileStore::open(&path, 8).unwrap();
        store.init().unwrap();

        let err = store.read_byte(8).unwrap_err();
        assert!(matches!(
            err,
            StoreError::AddressOutOfRange { address: 8, size: 8 }
        ));
        assert!(store.write_byte(9, 0).is_err());
        cleanup(&path);
    }
}
