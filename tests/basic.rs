#![allow(unused)]

mod common;

use common::MemStore;
use flatfs::{FileSystemManager, FsError, BLOCK_SIZE, MAX_BLOCKS, MAX_FILES};

fn fresh_fs() -> FileSystemManager<MemStore> {
    FileSystemManager::new(MemStore::new()).unwrap()
}

#[test]
fn create_then_list() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    let names = fs.list();
    assert_eq!(names, vec!["a.txt"]);
}

#[test]
fn duplicate_create_is_conflict() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    let free_before = fs.free_blocks();
    let err = fs.create("a.txt").unwrap_err();
    assert!(matches!(err, FsError::Conflict));
    // Nothing may have changed: same listing, same free-block count.
    assert_eq!(fs.list(), vec!["a.txt"]);
    assert_eq!(fs.free_blocks(), free_before);
}

#[test]
fn create_reserves_a_block() {
    // An empty file claims one pool block at creation time.
    let fs = fresh_fs();
    assert_eq!(fs.free_blocks(), MAX_BLOCKS);
    fs.create("a.txt").unwrap();
    assert_eq!(fs.free_blocks(), MAX_BLOCKS - 1);
}

#[test]
fn write_read_roundtrip_boundary_sizes() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    for len in [0, 1, BLOCK_SIZE - 1, BLOCK_SIZE, BLOCK_SIZE + 1, MAX_BLOCKS * BLOCK_SIZE] {
        let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        fs.write("a.txt", &payload).unwrap();
        let read = fs.read("a.txt").unwrap();
        assert_eq!(read, payload, "round trip failed for {len} bytes");
        log!("round trip ok for {} bytes ({} free blocks)", len, fs.free_blocks());
    }
}

#[test]
fn write_consumes_exactly_the_needed_blocks() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    fs.write("a.txt", &vec![7u8; 300]).unwrap(); // 3 blocks
    assert_eq!(fs.free_blocks(), MAX_BLOCKS - 3);
    fs.write("a.txt", &vec![7u8; 100]).unwrap(); // shrink to 1 block
    assert_eq!(fs.free_blocks(), MAX_BLOCKS - 1);
}

#[test]
fn empty_write_releases_the_chain() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    fs.write("a.txt", b"hello").unwrap();
    fs.write("a.txt", b"").unwrap();
    assert_eq!(fs.read("a.txt").unwrap(), b"");
    assert_eq!(fs.free_blocks(), MAX_BLOCKS);
    assert_eq!(fs.list(), vec!["a.txt"]); // still a live file, just empty
}

#[test]
fn oversized_write_is_no_space() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    let too_big = vec![0u8; MAX_BLOCKS * BLOCK_SIZE + 1];
    let err = fs.write("a.txt", &too_big).unwrap_err();
    assert!(matches!(err, FsError::NoSpace));
    // The old chain was released before the check; the file is left empty.
    assert_eq!(fs.read("a.txt").unwrap(), b"");
    assert_eq!(fs.free_blocks(), MAX_BLOCKS);
}

#[test]
fn full_pool_rewrite_succeeds_in_place() {
    // Releasing the old chain before the capacity check lets a same-size
    // overwrite succeed with zero free blocks.
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    let full = vec![b'x'; MAX_BLOCKS * BLOCK_SIZE];
    fs.write("a.txt", &full).unwrap();
    assert_eq!(fs.free_blocks(), 0);
    let full2 = vec![b'y'; MAX_BLOCKS * BLOCK_SIZE];
    fs.write("a.txt", &full2).unwrap();
    assert_eq!(fs.read("a.txt").unwrap(), full2);
}

#[test]
fn delete_releases_exactly_the_chain() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    fs.create("b.txt").unwrap();
    fs.write("a.txt", &vec![1u8; 3 * BLOCK_SIZE]).unwrap();
    let free_before = fs.free_blocks();
    fs.delete("a.txt").unwrap();
    assert_eq!(fs.free_blocks(), free_before + 3);

    assert!(matches!(fs.read("a.txt").unwrap_err(), FsError::NotFound));
    assert!(matches!(fs.write("a.txt", b"x").unwrap_err(), FsError::NotFound));
    assert!(matches!(fs.delete("a.txt").unwrap_err(), FsError::NotFound));
    assert_eq!(fs.list(), vec!["b.txt"]);
}

#[test]
fn sixth_create_is_out_of_inode_slots() {
    let fs = fresh_fs();
    for i in 0..MAX_FILES {
        fs.create(&format!("f{i}")).unwrap();
    }
    let err = fs.create("one_more").unwrap_err();
    assert!(matches!(err, FsError::NoInodeSlots));
}

#[test]
fn create_without_free_blocks_is_no_space() {
    let fs = fresh_fs();
    fs.create("big").unwrap();
    fs.write("big", &vec![0u8; MAX_BLOCKS * BLOCK_SIZE]).unwrap();
    assert_eq!(fs.free_blocks(), 0);
    let err = fs.create("tiny").unwrap_err();
    assert!(matches!(err, FsError::NoSpace));
}

#[test]
fn inode_slots_checked_before_blocks() {
    // With the entry table and the pool both exhausted, the inode-slot
    // failure wins.
    let fs = fresh_fs();
    for i in 0..MAX_FILES {
        fs.create(&format!("f{i}")).unwrap();
    }
    let remaining = fs.free_blocks() + 1; // f0's reserved block comes back
    fs.write("f0", &vec![0u8; remaining * BLOCK_SIZE]).unwrap();
    assert_eq!(fs.free_blocks(), 0);
    let err = fs.create("one_more").unwrap_err();
    assert!(matches!(err, FsError::NoInodeSlots));
}

#[test]
fn list_orders_by_slot_not_insertion() {
    let fs = fresh_fs();
    fs.create("a").unwrap();
    fs.create("b").unwrap();
    fs.create("c").unwrap();
    fs.delete("b").unwrap();
    fs.create("d").unwrap(); // reuses b's slot
    assert_eq!(fs.list(), vec!["a", "d", "c"]);
}

#[test]
fn invalid_names_are_rejected() {
    let fs = fresh_fs();
    assert!(matches!(fs.create("").unwrap_err(), FsError::InvalidName));
    assert!(matches!(
        fs.create("twelve_chars").unwrap_err(), // one byte over the limit
        FsError::InvalidName
    ));
    assert!(matches!(fs.create("héllo").unwrap_err(), FsError::InvalidName));
    assert_eq!(fs.free_blocks(), MAX_BLOCKS);
    fs.create("eleven_char").unwrap(); // exactly at the limit
}

#[test]
fn whitespace_only_names_are_rejected() {
    // The lenient loader treats a name that trims to nothing as an empty
    // slot, so such a name must never be creatable: it would vanish on
    // reload and leave its reserved block owned by no file.
    let fs = fresh_fs();
    assert!(matches!(fs.create(" ").unwrap_err(), FsError::InvalidName));
    assert!(matches!(fs.create("   ").unwrap_err(), FsError::InvalidName));
    assert!(fs.list().is_empty());
    assert_eq!(fs.free_blocks(), MAX_BLOCKS);
}

#[test]
fn hello_scenario() {
    let fs = fresh_fs();
    fs.create("a.txt").unwrap();
    fs.write("a.txt", b"hello").unwrap();
    assert_eq!(fs.read("a.txt").unwrap(), b"hello");
    assert_eq!(fs.free_blocks(), MAX_BLOCKS - 1); // 5 bytes fit in one block
}
