//! Reserve disk blocks for a destination file.

use crate::quantity::Quantity;
use crate::retry::SizedOperation;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use super::temp_path;

/// Preallocates the destination at the offered size. Each attempt rebuilds the
/// `.part` file from scratch and renames it into place only on success, so
/// repeated calls with smaller sizes never accumulate space.
#[derive(Debug, Default)]
pub struct Preallocator {
    reserved: Option<u64>,
}

impl Preallocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes reserved by the last attempt, if it succeeded.
    pub fn reserved(&self) -> Option<u64> {
        self.reserved
    }
}

impl SizedOperation for Preallocator {
    type Error = io::Error;

    fn attempt(&mut self, destination: &Path, size: &Quantity) -> io::Result<()> {
        self.reserved = None;
        let bytes = size.to_start_bytes().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("size {} is not a byte count", size),
            )
        })?;
        preallocate_file(destination, bytes)?;
        self.reserved = Some(bytes);
        Ok(())
    }
}

/// Create `destination` with `size` bytes of reserved space.
///
/// Works on `destination.part` and renames on success; on failure the temp file
/// is removed so its partial allocation is released before the next attempt.
pub fn preallocate_file(destination: &Path, size: u64) -> io::Result<()> {
    let tmp = temp_path(destination);
    let result = reserve(&tmp, size).and_then(|()| fs::rename(&tmp, destination));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn reserve(path: &Path, size: u64) -> io::Result<()> {
    let file = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    allocate(&file, size)?;
    file.sync_all()
}

/// `posix_fallocate` for real block allocation. Filesystems without fallocate
/// support get `set_len` (sparse), anything else is reported.
#[cfg(target_os = "linux")]
fn allocate(file: &File, size: u64) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    if size == 0 {
        return Ok(());
    }
    let len = libc::off_t::try_from(size)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "size exceeds off_t"))?;
    let r = unsafe { libc::posix_fallocate(file.as_raw_fd(), 0, len) };
    match r {
        0 => Ok(()),
        libc::EOPNOTSUPP | libc::EINVAL => {
            tracing::debug!(errno = r, "posix_fallocate unsupported, falling back to set_len");
            file.set_len(size)
        }
        errno => Err(io::Error::from_raw_os_error(errno)),
    }
}

#[cfg(not(target_os = "linux"))]
fn allocate(file: &File, size: u64) -> io::Result<()> {
    file.set_len(size)
}
