//! Decay loop: call the operation with shrinking sizes until it succeeds.

use super::error::RetrySizeError;
use super::policy::{DecayDecision, DecayPolicy};
use crate::probe;
use crate::quantity::Quantity;
use std::fmt;
use std::path::Path;

/// A size-bounded storage action the executor can retry.
///
/// Contract: calling `attempt` repeatedly with decreasing sizes against the
/// same destination must re-attempt the same logical allocation. It must not
/// be additive (e.g. append `size` bytes per call). The executor does not
/// check this.
pub trait SizedOperation {
    type Error;

    fn attempt(&mut self, destination: &Path, size: &Quantity) -> Result<(), Self::Error>;
}

/// [`retry_backoff_size_with`] using the default policy (10 retries, 10% decay).
pub fn retry_backoff_size<F, E>(
    destination: &Path,
    start: &Quantity,
    op: F,
) -> Result<(), RetrySizeError<E>>
where
    F: FnMut(&Path, &Quantity) -> Result<(), E>,
    E: fmt::Display,
{
    retry_backoff_size_with(&DecayPolicy::default(), destination, start, op)
}

/// Runs `op` against `destination`, starting at `start` and shrinking the size
/// after each failure as `policy` dictates. No sleeps between attempts.
///
/// The block size of the destination's parent directory is probed once up
/// front; if that fails, `op` is never called.
pub fn retry_backoff_size_with<F, E>(
    policy: &DecayPolicy,
    destination: &Path,
    start: &Quantity,
    mut op: F,
) -> Result<(), RetrySizeError<E>>
where
    F: FnMut(&Path, &Quantity) -> Result<(), E>,
    E: fmt::Display,
{
    let start_bytes = start
        .to_start_bytes()
        .ok_or(RetrySizeError::InvalidStartSize(*start))?;
    let block = probe::block_size(probe::probe_dir(destination)).map_err(RetrySizeError::Probe)?;
    let decrement = policy.decrement(start_bytes, block);

    let mut attempt = 0u32;
    let mut current = start_bytes;
    loop {
        let size = Quantity::from_bytes(current as i64);
        match op(destination, &size) {
            Ok(()) => {
                tracing::debug!(
                    dest = %destination.display(),
                    attempt,
                    size = current,
                    "sized operation succeeded"
                );
                return Ok(());
            }
            Err(e) => match policy.decide(attempt, current, decrement) {
                DecayDecision::Stop => {
                    return Err(RetrySizeError::Exhausted {
                        attempts: attempt + 1,
                        last_size: size,
                        source: e,
                    });
                }
                DecayDecision::RetryWith(next) => {
                    tracing::debug!(
                        dest = %destination.display(),
                        attempt,
                        size = current,
                        next,
                        error = %e,
                        "sized operation failed, retrying smaller"
                    );
                    attempt += 1;
                    current = next;
                }
            },
        }
    }
}

/// Runs a [`SizedOperation`] through the decay loop.
pub fn run_sized<O>(
    policy: &DecayPolicy,
    destination: &Path,
    start: &Quantity,
    op: &mut O,
) -> Result<(), RetrySizeError<O::Error>>
where
    O: SizedOperation,
    O::Error: fmt::Display,
{
    retry_backoff_size_with(policy, destination, start, |dest, size| op.attempt(dest, size))
}
