//! Common utilities for tests

use std::io;
use std::sync::Mutex;

use flatfs::{BackingStore, Result};

pub const ORANGE: &str = "\x1b[38;5;214m";
pub const RESET: &str = "\x1b[0m";

/// Provides a macro for logging messages during tests.
/// e.g. log!("placeholder") -> println!("[test] placeholder");
#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        println!("{}[test] {}{}", crate::common::ORANGE, format!($($arg)*), crate::common::RESET)
    };
}

/// In-memory backing store, the moral equivalent of a RAM disk.
pub struct MemStore {
    inner: Mutex<Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore {
            inner: Mutex::new(Vec::new()),
        }
    }
}

impl BackingStore for MemStore {
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<()> {
        let data = self.inner.lock().unwrap();
        let start = offset as usize;
        let end = start + buf.len();
        if end > data.len() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "read past end of store").into());
        }
        buf.copy_from_slice(&data[start..end]);
        Ok(())
    }

    fn write_at(&self, offset: u64, buf: &[u8]) -> Result<()> {
        let mut data = self.inner.lock().unwrap();
        let start = offset as usize;
        let end = start + buf.len();
        if end > data.len() {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "write past end of store").into());
        }
        data[start..end].copy_from_slice(buf);
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        Ok(self.inner.lock().unwrap().len() as u64)
    }

    fn set_len(&self, len: u64) -> Result<()> {
        self.inner.lock().unwrap().resize(len as usize, 0);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
