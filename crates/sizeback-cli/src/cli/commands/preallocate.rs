//! Preallocate command: reserve space, shrinking the request until it fits.

use anyhow::{Context, Result};
use sizeback_core::config::SizebackConfig;
use sizeback_core::probe;
use sizeback_core::quantity::{min_quantity, Quantity};
use sizeback_core::retry;
use sizeback_core::storage::Preallocator;
use std::path::Path;

pub fn run_preallocate(
    cfg: &SizebackConfig,
    dest: &Path,
    start: &Quantity,
    no_cap: bool,
) -> Result<()> {
    let start = if cfg.cap_to_available && !no_cap {
        let dir = probe::probe_dir(dest);
        let available = probe::available_bytes(dir)
            .with_context(|| format!("check free space for {}", dest.display()))?;
        capped_start(cfg, start, available, no_cap)
    } else {
        *start
    };

    let mut op = Preallocator::new();
    retry::run_sized(&cfg.decay_policy(), dest, &start, &mut op)
        .with_context(|| format!("preallocate {}", dest.display()))?;

    let reserved = op.reserved().unwrap_or(0);
    tracing::info!(dest = %dest.display(), reserved, "preallocated");
    println!("{}  {} bytes", dest.display(), reserved);
    Ok(())
}

/// Starting size after capping at `available` bytes, unless capping is off in
/// config or disabled with `--no-cap`.
pub(crate) fn capped_start(
    cfg: &SizebackConfig,
    start: &Quantity,
    available: u64,
    no_cap: bool,
) -> Quantity {
    if !cfg.cap_to_available || no_cap {
        return *start;
    }
    let cap = Quantity::from_bytes(i64::try_from(available).unwrap_or(i64::MAX));
    let capped = min_quantity(start, &cap);
    if capped != *start {
        tracing::info!(requested = %start, available, "capping preallocation to free space");
    }
    capped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_to_available_space() {
        let cfg = SizebackConfig::default();
        let got = capped_start(&cfg, &Quantity::new(10, 9), 4096 * 100, false);
        assert_eq!(got, Quantity::from_bytes(409_600));
    }

    #[test]
    fn smaller_request_is_kept() {
        let cfg = SizebackConfig::default();
        let start = Quantity::new(4, 3);
        assert_eq!(capped_start(&cfg, &start, 1 << 30, false), start);
    }

    #[test]
    fn no_cap_flag_skips_cap() {
        let cfg = SizebackConfig::default();
        let start = Quantity::new(10, 9);
        assert_eq!(capped_start(&cfg, &start, 1024, true), start);
    }

    #[test]
    fn config_can_disable_cap() {
        let cfg = SizebackConfig {
            cap_to_available: false,
            ..SizebackConfig::default()
        };
        let start = Quantity::new(10, 9);
        assert_eq!(capped_start(&cfg, &start, 1024, false), start);
    }

    #[test]
    fn huge_available_saturates_at_i64_max() {
        let cfg = SizebackConfig::default();
        let start = Quantity::new(1, 30);
        let got = capped_start(&cfg, &start, u64::MAX, false);
        assert_eq!(got, Quantity::from_bytes(i64::MAX));
    }
}
