//! Probe command: block size and free space of a filesystem.

use anyhow::{Context, Result};
use sizeback_core::probe;
use std::path::Path;

pub fn run_probe(path: &Path) -> Result<()> {
    let block = probe::block_size(path).with_context(|| format!("probe {}", path.display()))?;
    let available =
        probe::available_bytes(path).with_context(|| format!("probe {}", path.display()))?;
    println!("path:        {}", path.display());
    println!("block size:  {}", block.get());
    println!("available:   {}", available);
    Ok(())
}
