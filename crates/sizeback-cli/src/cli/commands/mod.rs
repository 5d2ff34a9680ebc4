//! CLI command handlers, one file per command.

mod completions;
mod preallocate;
mod probe;
mod schedule;

pub use completions::{run_completions, run_man};
pub use preallocate::run_preallocate;
pub use probe::run_probe;
pub use schedule::run_schedule;
