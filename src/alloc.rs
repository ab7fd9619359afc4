//! Free-block bookkeeping: first-fit allocation and chain release.

use crate::config::*;
use crate::error::{FsError, Result};
use crate::fs::FsState;
use crate::store::BackingStore;
use crate::structs::ChainNode;

/// Byte offset of data block `block` in the backing store.
pub(crate) fn data_offset(block: i16) -> u64 {
    DATA_OFFSET + block as u64 * BLOCK_SIZE as u64
}

pub(crate) fn free_blocks(state: &FsState) -> usize {
    state.free.iter().filter(|&&f| f).count()
}

/// First-fit scan of the bitmap; the lowest free index wins. The claimed
/// node starts out as a single-block chain: `{self, NO_BLOCK}`.
pub(crate) fn allocate_block(state: &mut FsState) -> Result<i16> {
    for i in 0..MAX_BLOCKS {
        if state.free[i] {
            state.free[i] = false;
            state.nodes[i] = ChainNode {
                index: i as i16,
                next: NO_BLOCK,
            };
            return Ok(i as i16);
        }
    }
    Err(FsError::NoSpace)
}

/// Releases the chain starting at `first`: each visited block has its data
/// region overwritten with zeros, is marked free, and has its node reset.
/// A sentinel, out-of-range, or already-free start is a no-op; the
/// already-free check also bounds the walk, since a revisited block reads
/// as free.
pub(crate) fn free_chain(store: &impl BackingStore, state: &mut FsState, first: i16) -> Result<()> {
    let zeros = [0u8; BLOCK_SIZE];
    let mut current = first;
    while current >= 0 && (current as usize) < MAX_BLOCKS && !state.free[current as usize] {
        let i = current as usize;
        store.write_at(data_offset(current), &zeros)?;
        current = state.nodes[i].next;
        state.free[i] = true;
        state.nodes[i] = ChainNode::FREE;
    }
    Ok(())
}
