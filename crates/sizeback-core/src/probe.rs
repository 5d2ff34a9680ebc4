//! Filesystem block-size probe.
//!
//! Read-only `statvfs` query on the directory that will hold a destination.
//! The destination itself need not exist yet; its parent must.

use std::io;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

/// Allocation granularity of a filesystem, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSize(NonZeroU64);

impl BlockSize {
    pub fn new(bytes: u64) -> Option<Self> {
        NonZeroU64::new(bytes).map(BlockSize)
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// Round `bytes` down to a multiple of this block size.
    pub fn align_down(&self, bytes: u64) -> u64 {
        bytes - bytes % self.get()
    }
}

/// Why a filesystem could not be probed.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("statvfs {} failed", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("filesystem at {} reports a zero block size", path.display())]
    ZeroBlockSize { path: PathBuf },
}

impl ProbeError {
    /// Path that could not be probed.
    pub fn path(&self) -> &Path {
        match self {
            ProbeError::Stat { path, .. } | ProbeError::ZeroBlockSize { path } => path,
        }
    }
}

/// Directory whose filesystem is probed for `destination`: its parent, or `.`
/// for a bare file name (or the empty path).
pub fn probe_dir(destination: &Path) -> &Path {
    match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        Some(_) => Path::new("."),
        // `/` has no parent; probe it directly.
        None if destination.as_os_str().is_empty() => Path::new("."),
        None => destination,
    }
}

/// Block size of the filesystem containing `path`.
pub fn block_size(path: &Path) -> Result<BlockSize, ProbeError> {
    let st = stat_fs(path)?;
    let size = BlockSize::new(st.block_size).ok_or_else(|| ProbeError::ZeroBlockSize {
        path: path.to_path_buf(),
    })?;
    tracing::trace!(path = %path.display(), block_size = size.get(), "probed block size");
    Ok(size)
}

/// Bytes available to an unprivileged caller on the filesystem containing `path`.
pub fn available_bytes(path: &Path) -> Result<u64, ProbeError> {
    let st = stat_fs(path)?;
    Ok(st.blocks_available.saturating_mul(st.fragment_size))
}

struct FsStat {
    block_size: u64,
    fragment_size: u64,
    blocks_available: u64,
}

#[cfg(unix)]
fn stat_fs(path: &Path) -> Result<FsStat, ProbeError> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let stat_err = |source: io::Error| ProbeError::Stat {
        path: path.to_path_buf(),
        source,
    };
    let c_path = CString::new(path.as_os_str().as_bytes())
        .map_err(|e| stat_err(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

    let mut st: libc::statvfs = unsafe { std::mem::zeroed() };
    let r = unsafe { libc::statvfs(c_path.as_ptr(), &mut st) };
    if r != 0 {
        return Err(stat_err(io::Error::last_os_error()));
    }

    Ok(FsStat {
        block_size: st.f_bsize as u64,
        fragment_size: st.f_frsize as u64,
        blocks_available: st.f_bavail as u64,
    })
}

/// No statvfs off Unix: confirm the path exists and assume 4 KiB blocks.
#[cfg(not(unix))]
fn stat_fs(path: &Path) -> Result<FsStat, ProbeError> {
    std::fs::metadata(path).map_err(|source| ProbeError::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(FsStat {
        block_size: 4096,
        fragment_size: 4096,
        blocks_available: u64::MAX / 4096,
    })
}
