//! Schedule command: print the decay sequence for a starting size.

use anyhow::{bail, Context, Result};
use sizeback_core::config::SizebackConfig;
use sizeback_core::probe::{self, BlockSize};
use sizeback_core::quantity::Quantity;
use sizeback_core::retry::DecayPolicy;
use std::path::Path;

pub fn run_schedule(
    cfg: &SizebackConfig,
    start: &Quantity,
    block_size: Option<u64>,
    path: Option<&Path>,
) -> Result<()> {
    let block = match block_size {
        Some(b) => match BlockSize::new(b) {
            Some(bs) => bs,
            None => bail!("block size must be positive"),
        },
        None => {
            let p = path.unwrap_or(Path::new("."));
            probe::block_size(p).with_context(|| format!("probe {}", p.display()))?
        }
    };
    let Some(start_bytes) = start.to_start_bytes() else {
        bail!("start size {} is not a non-negative byte count", start);
    };
    for line in schedule_lines(&cfg.decay_policy(), start_bytes, block) {
        println!("{}", line);
    }
    Ok(())
}

/// One `attempt<TAB>bytes` line per attempt.
pub(crate) fn schedule_lines(policy: &DecayPolicy, start: u64, block: BlockSize) -> Vec<String> {
    policy
        .schedule(start, block)
        .map(|a| format!("{}\t{}", a.index, a.size))
        .collect()
}
