use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open file - {}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to open {}", .path.display())]
    DeviceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to mmap {len:#x} bytes at {offset:#x}")]
    Mapping {
        offset: u64,
        len: usize,
        #[source]
        source: io::Error,
    },
    #[error("image of {size} bytes does not fit the {capacity}-byte instruction memory")]
    ImageTooLarge { size: u64, capacity: usize },
}

pub type LoadResult<T> = Result<T, LoadError>;
