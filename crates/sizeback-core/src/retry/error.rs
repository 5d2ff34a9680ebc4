//! Terminal errors of a decay run.

use crate::probe::ProbeError;
use crate::quantity::Quantity;
use std::fmt;

/// Why a decay run gave up. Generic over the operation's own error type so the
/// last failure is handed back untouched.
#[derive(Debug)]
pub enum RetrySizeError<E> {
    /// Starting size was negative or too large to express in bytes. No attempts made.
    InvalidStartSize(Quantity),
    /// The destination's filesystem could not be probed. No attempts made.
    Probe(ProbeError),
    /// Every attempt in the schedule failed; `source` is the last failure.
    Exhausted {
        attempts: u32,
        last_size: Quantity,
        source: E,
    },
}

impl<E> RetrySizeError<E> {
    pub fn is_probe_failure(&self) -> bool {
        matches!(self, RetrySizeError::Probe(_))
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetrySizeError::Exhausted { .. })
    }

    /// Number of times the operation was called before giving up.
    pub fn attempts(&self) -> u32 {
        match self {
            RetrySizeError::Exhausted { attempts, .. } => *attempts,
            RetrySizeError::InvalidStartSize(_) | RetrySizeError::Probe(_) => 0,
        }
    }
}

impl<E> fmt::Display for RetrySizeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrySizeError::InvalidStartSize(q) => {
                write!(f, "invalid start size {} (must be 0..=i64::MAX bytes)", q)
            }
            RetrySizeError::Probe(e) => {
                write!(f, "cannot probe filesystem at {}", e.path().display())
            }
            RetrySizeError::Exhausted {
                attempts,
                last_size,
                ..
            } => write!(
                f,
                "operation failed after {} attempts (last size {} bytes)",
                attempts, last_size
            ),
        }
    }
}

impl<E> std::error::Error for RetrySizeError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RetrySizeError::Probe(e) => Some(e),
            RetrySizeError::Exhausted { source, .. } => Some(source),
            RetrySizeError::InvalidStartSize(_) => None,
        }
    }
}
