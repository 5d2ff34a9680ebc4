//! Size-decay retry.
//!
//! Retries a storage operation with a shrinking requested size, on the theory
//! that the failure was a lack of space. Each retry asks for a fixed fraction
//! of the original size less (aligned to the filesystem block size); there is
//! no time-based backoff.

mod error;
mod policy;
mod run;

pub use error::RetrySizeError;
pub use policy::{DecayDecision, DecayPolicy, DecaySchedule, RetryAttempt};
pub use run::{retry_backoff_size, retry_backoff_size_with, run_sized, SizedOperation};
