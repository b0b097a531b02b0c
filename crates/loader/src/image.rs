use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::error::{LoadError, LoadResult};

/// A raw firmware image. The contents are opaque to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareImage {
    data: Vec<u8>,
}

impl FirmwareImage {
    /// Reads the whole file. Open, seek and read failures are all reported as
    /// [`LoadError::FileOpen`]. A file longer than `capacity` is rejected with
    /// [`LoadError::ImageTooLarge`] before anything is read.
    pub fn from_file(path: &Path, capacity: usize) -> LoadResult<Self> {
        let file_err = |source| LoadError::FileOpen {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(file_err)?;
        let size = file.seek(SeekFrom::End(0)).map_err(file_err)?;
        file.rewind().map_err(file_err)?;

        let len = usize::try_from(size)
            .ok()
            .filter(|&len| len <= capacity)
            .ok_or(LoadError::ImageTooLarge { size, capacity })?;

        let mut data = vec![0u8; len];
        file.read_exact(&mut data).map_err(file_err)?;
        Ok(Self { data })
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
