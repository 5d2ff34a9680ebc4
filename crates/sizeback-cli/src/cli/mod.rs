//! CLI for the sizeback size-decay executor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use sizeback_core::config::{self, SizebackConfig};
use sizeback_core::quantity::Quantity;
use std::path::PathBuf;

use commands::{run_completions, run_man, run_preallocate, run_probe, run_schedule};

/// Top-level CLI for sizeback.
#[derive(Debug, Parser)]
#[command(name = "sizeback")]
#[command(about = "sizeback: retry storage operations with shrinking sizes", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/sizeback/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show block size and free space of the filesystem holding a path.
    Probe {
        /// Existing file or directory.
        path: PathBuf,
    },

    /// Print the sizes a decay run would try, without touching the disk.
    Schedule {
        /// Starting size magnitude (bytes at scale 0).
        magnitude: i64,
        /// Base-10 exponent applied to the magnitude.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        scale: i32,
        /// Use this block size instead of probing.
        #[arg(long, value_name = "BYTES", conflicts_with = "path")]
        block_size: Option<u64>,
        /// Probe the filesystem holding this path (default: current directory).
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Preallocate a file, shrinking the request after each failure.
    Preallocate {
        /// Destination file; its parent directory must exist.
        dest: PathBuf,
        /// Starting size magnitude (bytes at scale 0).
        magnitude: i64,
        /// Base-10 exponent applied to the magnitude.
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        scale: i32,
        /// Do not cap the starting size at the available space.
        #[arg(long)]
        no_cap: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

fn load_config(path: Option<&PathBuf>) -> Result<SizebackConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Probe { path } => run_probe(&path)?,
            CliCommand::Schedule {
                magnitude,
                scale,
                block_size,
                path,
            } => {
                let cfg = load_config(cli.config.as_ref())?;
                tracing::debug!("loaded config: {:?}", cfg);
                let start = Quantity::new(magnitude, scale);
                run_schedule(&cfg, &start, block_size, path.as_deref())?;
            }
            CliCommand::Preallocate {
                dest,
                magnitude,
                scale,
                no_cap,
            } => {
                let cfg = load_config(cli.config.as_ref())?;
                tracing::debug!("loaded config: {:?}", cfg);
                let start = Quantity::new(magnitude, scale);
                run_preallocate(&cfg, &dest, &start, no_cap)?;
            }
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
