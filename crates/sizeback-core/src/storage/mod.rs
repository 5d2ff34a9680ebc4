//! Disk preallocation as a retryable sized operation.
//!
//! `Preallocator` reserves real blocks with `posix_fallocate` so that a full
//! disk shows up as a failure the decay loop can shrink around.

mod preallocate;

pub use preallocate::{preallocate_file, Preallocator};

/// Temporary file suffix used while a reservation is in progress.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `disk.img` → `disk.img.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
