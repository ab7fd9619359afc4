use crate::config::*;
use crate::error::{FsError, Result};

/// One slot of the entry (inode) table. On disk:
/// `name (11 bytes, ASCII, NUL-padded) | size (2 LE) | first_block (2 LE, signed)`.
/// An empty slot is 15 zero bytes, detected by a zero first name byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileEntry {
    pub name: [u8; MAX_NAME_LEN],
    pub size: u16,
    pub first_block: i16,
}

impl FileEntry {
    pub fn new(name: &str, size: u16, first_block: i16) -> Result<Self> {
        if name.trim().is_empty() || name.len() > MAX_NAME_LEN {
            return Err(FsError::InvalidName);
        }
        if !name.bytes().all(|b| b.is_ascii() && b != 0) {
            return Err(FsError::InvalidName);
        }
        let mut arr = [0u8; MAX_NAME_LEN];
        arr[..name.len()].copy_from_slice(name.as_bytes());
        Ok(FileEntry {
            name: arr,
            size,
            first_block,
        })
    }

    /// The stored name without its NUL padding.
    pub fn name_str(&self) -> String {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_NAME_LEN);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    pub fn encode(&self) -> [u8; ENTRY_SIZE] {
        let mut raw = [0u8; ENTRY_SIZE];
        raw[..MAX_NAME_LEN].copy_from_slice(&self.name);
        raw[MAX_NAME_LEN..MAX_NAME_LEN + 2].copy_from_slice(&self.size.to_le_bytes());
        raw[MAX_NAME_LEN + 2..].copy_from_slice(&self.first_block.to_le_bytes());
        raw
    }

    /// Lenient decode: a slot whose name trims to nothing (all-zero slot or
    /// garbled bytes) is treated as empty. Never fails.
    pub fn decode(raw: &[u8; ENTRY_SIZE]) -> Option<Self> {
        let mut name = [0u8; MAX_NAME_LEN];
        name.copy_from_slice(&raw[..MAX_NAME_LEN]);
        let size = u16::from_le_bytes([raw[MAX_NAME_LEN], raw[MAX_NAME_LEN + 1]]);
        let first_block = i16::from_le_bytes([raw[MAX_NAME_LEN + 2], raw[MAX_NAME_LEN + 3]]);
        let entry = FileEntry {
            name,
            size,
            first_block,
        };
        if entry.name_str().trim().is_empty() {
            return None;
        }
        Some(entry)
    }
}

/// One slot of the chain-node table, linking a data block to the next block
/// of the same file. On disk: `index (2 LE, signed) | next (2 LE, signed)`.
/// A node is free iff `index < 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainNode {
    pub index: i16,
    pub next: i16,
}

impl ChainNode {
    pub const FREE: Self = ChainNode {
        index: NO_BLOCK,
        next: NO_BLOCK,
    };

    pub fn is_free(&self) -> bool {
        self.index < 0
    }

    pub fn encode(&self) -> [u8; NODE_SIZE] {
        let mut raw = [0u8; NODE_SIZE];
        raw[..2].copy_from_slice(&self.index.to_le_bytes());
        raw[2..].copy_from_slice(&self.next.to_le_bytes());
        raw
    }

    pub fn decode(raw: &[u8; NODE_SIZE]) -> Self {
        ChainNode {
            index: i16::from_le_bytes([raw[0], raw[1]]),
            next: i16::from_le_bytes([raw[2], raw[3]]),
        }
    }
}
