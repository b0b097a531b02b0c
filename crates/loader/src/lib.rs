//! Host-side loader that pushes a raw firmware image into FugaRV instruction
//! memory through a privileged physical-memory mapping.

pub mod device;
pub mod error;
pub mod image;


use std::path::Path;

use tracing::{debug, info};

pub use device::{MappedWindow, PhysMemDevice};
pub use error::{LoadError, LoadResult};
pub use image::FirmwareImage;

/// Physical address of the instruction memory as seen from the host.
pub const INSTMEM_OFFSET: u64 = 0x4000_0000;
/// Size of the instruction memory window.
pub const INSTMEM_SIZE: usize = 32 * 1024;
/// Default privileged memory device.
pub const DEFAULT_DEVICE: &str = "/dev/mem";

/// Writable target memory an image can be copied into.
pub trait InstructionMemory {
    fn capacity(&self) -> usize;
    fn as_mut_bytes(&mut self) -> &mut [u8];
}

/// Copies `image` to the start of `memory`.
///
/// Fails with [`LoadError::ImageTooLarge`] without touching `memory` if the
/// image does not fit. Bytes past the image length are left as they were.
pub fn transfer<M: InstructionMemory + ?Sized>(image: &FirmwareImage, memory: &mut M) -> LoadResult<usize> {
    let data = image.as_bytes();
    check_fits(data.len() as u64, memory.capacity())?;
    memory.as_mut_bytes()[..data.len()].copy_from_slice(data);
    Ok(data.len())
}

fn check_fits(size: u64, capacity: usize) -> LoadResult<()> {
    if size > capacity as u64 {
        return Err(LoadError::ImageTooLarge { size, capacity });
    }
    Ok(())
}

/// Loads the image at `path` into instruction memory through `device`.
///
/// Returns the number of bytes transferred. The device is never opened if the
/// image cannot be read or is larger than the window; the mapping and the
/// descriptor are released on every path once acquired.
pub fn load(path: &Path, device: &Path) -> LoadResult<usize> {
    let image = FirmwareImage::from_file(path, INSTMEM_SIZE)?;
    debug!("Read {} bytes from {:?}", image.len(), path);

    let mem = PhysMemDevice::open(device)?;
    let mut window = mem.map(INSTMEM_OFFSET, INSTMEM_SIZE)?;

    info!("Transferring {} bytes...", image.len());
    let written = transfer(&image, &mut window)?;
    debug!(
        "Wrote {} bytes at physical {:#x} via {:?}",
        written, INSTMEM_OFFSET, device
    );
    Ok(written)
}
