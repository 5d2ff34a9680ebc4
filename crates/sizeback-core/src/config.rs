use crate::retry::DecayPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Size-decay parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Per-retry decrement as a percentage of the starting size.
    pub decay_percent: u32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        let p = DecayPolicy::default();
        Self {
            max_retries: p.max_retries,
            decay_percent: p.decay_percent,
        }
    }
}

impl DecayConfig {
    /// Policy for the executor; the percentage is clamped into 1..=100.
    pub fn to_policy(&self) -> DecayPolicy {
        DecayPolicy {
            max_retries: self.max_retries,
            decay_percent: self.decay_percent.clamp(1, 100),
        }
    }
}

/// Global configuration loaded from `~/.config/sizeback/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizebackConfig {
    /// Optional decay policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub decay: Option<DecayConfig>,
    /// Cap the starting size at the space available on the destination filesystem.
    #[serde(default = "default_cap_to_available")]
    pub cap_to_available: bool,
}

fn default_cap_to_available() -> bool {
    true
}

impl Default for SizebackConfig {
    fn default() -> Self {
        Self {
            decay: None,
            cap_to_available: default_cap_to_available(),
        }
    }
}

impl SizebackConfig {
    pub fn decay_policy(&self) -> DecayPolicy {
        self.decay
            .as_ref()
            .map(DecayConfig::to_policy)
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sizeback")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SizebackConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SizebackConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<SizebackConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: SizebackConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
