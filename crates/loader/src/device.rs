//! Privileged physical-memory device and the windows mapped from it.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::os::unix::io::AsRawFd;
use std::path::{Path, PathBuf};
use std::ptr;
use std::slice;

use tracing::{debug, warn};

use crate::error::{LoadError, LoadResult};
use crate::InstructionMemory;

/// An open handle on a physical-memory device such as `/dev/mem`.
///
/// The descriptor is closed when the handle is dropped.
#[derive(Debug)]
pub struct PhysMemDevice {
    file: File,
    path: PathBuf,
}

impl PhysMemDevice {
    /// Opens `path` for synchronous read/write access.
    pub fn open(path: &Path) -> LoadResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(libc::O_SYNC)
            .open(path)
            .map_err(|source| LoadError::DeviceOpen {
                path: path.to_path_buf(),
                source,
            })?;
        debug!("Opened {:?}", path);
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maps `len` bytes at physical `offset` as a shared read/write window.
    ///
    /// A regular file standing in for the device must cover the whole window,
    /// since touching a page past its end would fault.
    pub fn map(&self, offset: u64, len: usize) -> LoadResult<MappedWindow<'_>> {
        let mapping_err = |source| LoadError::Mapping { offset, len, source };

        let meta = self.file.metadata().map_err(mapping_err)?;
        if meta.is_file() && meta.len() < offset + len as u64 {
            return Err(mapping_err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("{:?} is only {} bytes long", self.path, meta.len()),
            )));
        }
        let file_offset = libc::off_t::try_from(offset)
            .map_err(|_| mapping_err(io::Error::from(io::ErrorKind::InvalidInput)))?;

        // SAFETY: a fresh mapping chosen by the kernel; the descriptor is valid for
        // the duration of the call.
        let addr = unsafe {
            libc::mmap(
                ptr::null_mut(),
                len,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_SHARED,
                self.file.as_raw_fd(),
                file_offset,
            )
        };
        if addr == libc::MAP_FAILED {
            return Err(mapping_err(io::Error::last_os_error()));
        }

        debug!("Mapped {:#x} bytes at physical {:#x} -> {:p}", len, offset, addr);
        Ok(MappedWindow {
            ptr: addr.cast::<u8>(),
            len,
            _device: self,
        })
    }
}

/// A shared mapping of device memory, unmapped on drop.
///
/// Borrows the device so the descriptor always outlives the mapping.
#[derive(Debug)]
pub struct MappedWindow<'dev> {
    ptr: *mut u8,
    len: usize,
    _device: &'dev PhysMemDevice,
}

impl MappedWindow<'_> {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `ptr..ptr + len` is mapped readable until drop.
        unsafe { slice::from_raw_parts(self.ptr, self.len) }
    }
}

impl InstructionMemory for MappedWindow<'_> {
    fn capacity(&self) -> usize {
        self.len
    }

    fn as_mut_bytes(&mut self) -> &mut [u8] {
        // SAFETY: mapped writable until drop, and `&mut self` is the only view.
        unsafe { slice::from_raw_parts_mut(self.ptr, self.len) }
    }
}

impl Drop for MappedWindow<'_> {
    fn drop(&mut self) {
        // SAFETY: `ptr`/`len` are exactly what mmap returned.
        let rc = unsafe { libc::munmap(self.ptr.cast(), self.len) };
        if rc != 0 {
            warn!("munmap failed: {}", io::Error::last_os_error());
        }
    }
}
