//! Flatfs emulates a tiny block-based file system inside a single flat
//! backing file (a "virtual disk") and serves it to remote clients over a
//! line-oriented text protocol.
//!
//! Flatfs's linear disk layout (1408 bytes total):
//! - Entry table: 5 file entries of 15 bytes each, at offset 0
//! - Chain-node table: 10 nodes of 4 bytes each, at offset 75
//! - Data blocks: 10 blocks of 128 bytes, starting at offset 128
//!
//! Flatfs's layers (from bottom to top):
//! 1. Backing Store: seek+read/write abstraction over one flat file.  | `store`
//! 2. Metadata Codec: whole-region save/load of both tables.          | `codec`
//! 3. Block Allocator: free bitmap plus block-chain bookkeeping.      | `alloc`
//! 4. File System Manager: create/read/write/delete/list, one RwLock. | `fs`
//! 5. Server: text-command dispatch, one thread per connection.       | `server`

mod alloc;
mod codec;
mod config;
mod error;
mod fs;
mod server;
mod store;
mod structs;

pub use config::*;
pub use error::FsError as Error;
pub use error::{FsError, Result};
pub use fs::FileSystemManager;
pub use server::{handle_connection, serve};
pub use store::{BackingStore, FileStore};
pub use structs::{ChainNode, FileEntry};
