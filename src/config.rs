pub const BLOCK_SIZE: usize = 128;
pub const MAX_FILES: usize = 5; // Capacity of the entry (inode) table
pub const MAX_BLOCKS: usize = 10; // Capacity of the data-block pool
pub const MAX_NAME_LEN: usize = 11; // ASCII bytes, NUL-padded on disk

pub const ENTRY_SIZE: usize = MAX_NAME_LEN + 2 + 2; // name | size | first block
pub const NODE_SIZE: usize = 2 + 2; // self index | next

pub const NODE_TABLE_OFFSET: u64 = (MAX_FILES * ENTRY_SIZE) as u64;
pub const METADATA_BYTES: usize = MAX_FILES * ENTRY_SIZE + MAX_BLOCKS * NODE_SIZE;
pub const METADATA_BLOCKS: usize = METADATA_BYTES.div_ceil(BLOCK_SIZE);

pub const DATA_OFFSET: u64 = (METADATA_BLOCKS * BLOCK_SIZE) as u64;
pub const DISK_SIZE: u64 = ((METADATA_BLOCKS + MAX_BLOCKS) * BLOCK_SIZE) as u64;

/// Sentinel for "no block": a free chain node's self index and the
/// next-pointer of the last block of a chain.
pub const NO_BLOCK: i16 = -1;
