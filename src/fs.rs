//! The file system manager: create/read/write/delete/list over the backing
//! store, with all metadata guarded by a single readers-writer lock.
//!
//! The whole file system is one critical section. Mutating operations hold
//! the write guard for their full duration, including their disk I/O, and
//! persist the complete metadata region before reporting success; read and
//! list share the read guard. A reader therefore never observes a
//! partially-applied write.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::info;

use crate::config::*;
use crate::error::{FsError, Result};
use crate::store::BackingStore;
use crate::structs::{ChainNode, FileEntry};
use crate::{alloc, codec};

/// All in-memory metadata: the entry table, the chain-node table, and the
/// free bitmap derived from it.
pub(crate) struct FsState {
    pub(crate) entries: [Option<FileEntry>; MAX_FILES],
    pub(crate) nodes: [ChainNode; MAX_BLOCKS],
    pub(crate) free: [bool; MAX_BLOCKS],
}

impl FsState {
    pub(crate) fn empty() -> Self {
        FsState {
            entries: [None; MAX_FILES],
            nodes: [ChainNode::FREE; MAX_BLOCKS],
            free: [true; MAX_BLOCKS],
        }
    }

    /// Slot index and a copy of the live entry with the given name.
    fn find(&self, name: &str) -> Option<(usize, FileEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(i, slot)| slot.filter(|e| e.name_str() == name).map(|e| (i, e)))
    }
}

pub struct FileSystemManager<S: BackingStore> {
    store: S,
    state: RwLock<FsState>,
}

impl<S: BackingStore> FileSystemManager<S> {
    /// Opens the file system on `store`. A store whose length does not match
    /// the fixed disk size is (re)initialized to an all-empty system;
    /// otherwise the existing metadata region is loaded.
    pub fn new(store: S) -> Result<Self> {
        let state = if store.len()? == DISK_SIZE {
            codec::load(&store)?
        } else {
            store.set_len(DISK_SIZE)?;
            let state = FsState::empty();
            codec::save(&store, &state)?;
            info!("initialized empty file system ({DISK_SIZE} bytes)");
            state
        };
        Ok(FileSystemManager {
            store,
            state: RwLock::new(state),
        })
    }

    pub fn create(&self, name: &str) -> Result<()> {
        let mut entry = FileEntry::new(name, 0, NO_BLOCK)?;
        let mut state = self.write_lock();
        if state.find(name).is_some() {
            return Err(FsError::Conflict);
        }
        let slot = state
            .entries
            .iter()
            .position(Option::is_none)
            .ok_or(FsError::NoInodeSlots)?;
        // A brand-new empty file still claims one block up front.
        entry.first_block = alloc::allocate_block(&mut state)?;
        state.entries[slot] = Some(entry);
        codec::save(&self.store, &state)?;
        info!("created '{name}' at block {}", entry.first_block);
        Ok(())
    }

    /// Replaces the file's content with `data`. The old chain is released
    /// before the capacity check, so same-size and shrinking overwrites
    /// succeed even at full pool utilization. If the check then fails the
    /// file is left empty, never pointing at released blocks.
    pub fn write(&self, name: &str, data: &[u8]) -> Result<()> {
        let mut state = self.write_lock();
        let (idx, mut entry) = state.find(name).ok_or(FsError::NotFound)?;

        alloc::free_chain(&self.store, &mut state, entry.first_block)?;

        let blocks_needed = data.len().div_ceil(BLOCK_SIZE);
        if blocks_needed == 0 || alloc::free_blocks(&state) < blocks_needed {
            entry.size = 0;
            entry.first_block = NO_BLOCK;
            state.entries[idx] = Some(entry);
            codec::save(&self.store, &state)?;
            return if blocks_needed == 0 {
                Ok(())
            } else {
                Err(FsError::NoSpace)
            };
        }

        let mut first = NO_BLOCK;
        let mut prev = NO_BLOCK;
        for chunk in data.chunks(BLOCK_SIZE) {
            let block = alloc::allocate_block(&mut state)?;
            if first < 0 {
                first = block;
            } else {
                state.nodes[prev as usize].next = block;
            }
            prev = block;
            self.store.write_at(alloc::data_offset(block), chunk)?;
        }

        // Block contents are on disk before the entry starts pointing at them.
        entry.size = data.len() as u16;
        entry.first_block = first;
        state.entries[idx] = Some(entry);
        codec::save(&self.store, &state)?;
        info!("wrote {} bytes to '{name}'", data.len());
        Ok(())
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>> {
        let state = self.read_lock();
        let (_, entry) = state.find(name).ok_or(FsError::NotFound)?;

        let size = entry.size as usize;
        if size == 0 {
            return Ok(Vec::new());
        }

        let mut data = vec![0u8; size];
        let mut current = entry.first_block;
        let mut filled = 0;
        while current >= 0 && (current as usize) < MAX_BLOCKS && filled < size {
            let n = BLOCK_SIZE.min(size - filled);
            self.store
                .read_at(alloc::data_offset(current), &mut data[filled..filled + n])?;
            filled += n;
            current = state.nodes[current as usize].next;
        }
        Ok(data)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        let mut state = self.write_lock();
        let (idx, entry) = state.find(name).ok_or(FsError::NotFound)?;
        alloc::free_chain(&self.store, &mut state, entry.first_block)?;
        state.entries[idx] = None;
        codec::save(&self.store, &state)?;
        info!("deleted '{name}'");
        Ok(())
    }

    /// Live file names in ascending slot order. Slots are reused after
    /// deletion, so this is not insertion order.
    pub fn list(&self) -> Vec<String> {
        let state = self.read_lock();
        state.entries.iter().flatten().map(|e| e.name_str()).collect()
    }

    /// Number of currently unallocated blocks in the pool.
    pub fn free_blocks(&self) -> usize {
        alloc::free_blocks(&self.read_lock())
    }

    fn read_lock(&self) -> RwLockReadGuard<'_, FsState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_lock(&self) -> RwLockWriteGuard<'_, FsState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
