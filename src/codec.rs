//! Whole-region persistence of the metadata tables.
//!
//! The entry table and the chain-node table live at fixed offsets in a
//! single 115-byte prefix of the backing store; `save` and `load` always
//! move the entire region at once.

use crate::config::*;
use crate::error::Result;
use crate::fs::FsState;
use crate::store::BackingStore;
use crate::structs::{ChainNode, FileEntry};

pub(crate) fn save(store: &impl BackingStore, state: &FsState) -> Result<()> {
    let mut buf = [0u8; METADATA_BYTES];
    for (i, slot) in state.entries.iter().enumerate() {
        if let Some(entry) = slot {
            let off = i * ENTRY_SIZE;
            buf[off..off + ENTRY_SIZE].copy_from_slice(&entry.encode());
        }
    }
    for (i, node) in state.nodes.iter().enumerate() {
        let off = NODE_TABLE_OFFSET as usize + i * NODE_SIZE;
        buf[off..off + NODE_SIZE].copy_from_slice(&node.encode());
    }
    store.write_at(0, &buf)?;
    store.flush()
}

/// Inverse of `save`. Decoding is lenient: a slot whose name is effectively
/// empty is treated as unoccupied, and the free bitmap is rebuilt from the
/// sign of each node's self index.
pub(crate) fn load(store: &impl BackingStore) -> Result<FsState> {
    let mut buf = [0u8; METADATA_BYTES];
    store.read_at(0, &mut buf)?;

    let mut state = FsState::empty();
    for i in 0..MAX_FILES {
        let off = i * ENTRY_SIZE;
        let mut raw = [0u8; ENTRY_SIZE];
        raw.copy_from_slice(&buf[off..off + ENTRY_SIZE]);
        state.entries[i] = FileEntry::decode(&raw);
    }
    for i in 0..MAX_BLOCKS {
        let off = NODE_TABLE_OFFSET as usize + i * NODE_SIZE;
        let mut raw = [0u8; NODE_SIZE];
        raw.copy_from_slice(&buf[off..off + NODE_SIZE]);
        state.nodes[i] = ChainNode::decode(&raw);
        state.free[i] = state.nodes[i].is_free();
    }
    Ok(state)
}
