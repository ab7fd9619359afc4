use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::error::Result;

pub trait BackingStore: Send + Sync {
    /// Reads exactly `buf.len()` bytes starting at `offset`.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()>;

    /// Writes all of `buf` starting at `offset`.
    fn write_at(&self, offset: u64, buf: &[u8]) -> Result<()>;

    /// Returns the current length of the store in bytes.
    fn len(&self) -> Result<u64>;

    /// Grows or truncates the store to exactly `len` bytes.
    fn set_len(&self, len: u64) -> Result<()>;

    /// Flushes buffered writes to the store.
    fn flush(&self) -> Result<()>;
}

/// Backing store over a single flat file on the host file system.
/// All access goes through one shared handle; the mutex serializes seeks.
pub struct FileStore {
    inner: Mutex<File>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        Ok(FileStore {
            inner: Mutex::new(inner),
        })
    }
}

impl BackingStore for FileStore {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.seek(SeekFrom::Start(offset))?;
        inner.read_exact(buf)?;
        Ok(())
    }

    fn write_at(&self, offset: u64, buf: &[u8]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.seek(SeekFrom::Start(offset))?;
        inner.write_all(buf)?;
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.metadata()?.len())
    }

    fn set_len(&self, len: u64) -> Result<()> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.set_len(len)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.flush()?;
        Ok(())
    }
}
