use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    #[error("File already exists.")]
    Conflict,
    #[error("File not found.")]
    NotFound,
    #[error("No free inode slots.")]
    NoInodeSlots,
    #[error("No free blocks available.")]
    NoSpace,
    #[error("Invalid file name.")]
    InvalidName,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FsError>;
