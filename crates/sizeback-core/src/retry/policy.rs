use crate::probe::BlockSize;
use crate::quantity::Quantity;

/// Decision returned by the decay policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecayDecision {
    /// Give up; the last failure is terminal.
    Stop,
    /// Try again with this many bytes.
    RetryWith(u64),
}

/// Linear size decay: every retry asks for `decay_percent` of the original
/// size less than the previous attempt, aligned down to the block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayPolicy {
    /// Retries after the first attempt (10 retries = 11 calls).
    pub max_retries: u32,
    /// Per-retry decrement as a percentage of the starting size (1..=100).
    pub decay_percent: u32,
}

impl Default for DecayPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            decay_percent: 10,
        }
    }
}

impl DecayPolicy {
    /// Fixed per-retry decrement for a run starting at `start` bytes.
    ///
    /// Rounded down to a block multiple. A start smaller than
    /// `100 / decay_percent` blocks would round to zero; then the unaligned
    /// decrement is used, and never less than one byte, so sizes always shrink.
    pub fn decrement(&self, start: u64, block: BlockSize) -> u64 {
        let percent = self.decay_percent.clamp(1, 100) as u128;
        let raw = (start as u128 * percent / 100) as u64;
        let aligned = block.align_down(raw);
        if aligned > 0 {
            aligned
        } else {
            raw.max(1)
        }
    }

    /// Decide what to do after attempt `attempt` (0-based) failed at `current` bytes.
    pub fn decide(&self, attempt: u32, current: u64, decrement: u64) -> DecayDecision {
        if attempt >= self.max_retries || current == 0 {
            return DecayDecision::Stop;
        }
        DecayDecision::RetryWith(current.saturating_sub(decrement))
    }

    /// Every attempt a run starting at `start` bytes would make if each one failed.
    pub fn schedule(&self, start: u64, block: BlockSize) -> DecaySchedule {
        DecaySchedule {
            policy: *self,
            decrement: self.decrement(start, block),
            next: Some((0, start)),
        }
    }
}

/// One offered size within a single executor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryAttempt {
    pub index: u32,
    pub size: Quantity,
}

/// Iterator over the attempts of a decay run.
#[derive(Debug, Clone)]
pub struct DecaySchedule {
    policy: DecayPolicy,
    decrement: u64,
    next: Option<(u32, u64)>,
}

impl DecaySchedule {
    pub fn decrement(&self) -> u64 {
        self.decrement
    }
}

impl Iterator for DecaySchedule {
    type Item = RetryAttempt;

    fn next(&mut self) -> Option<RetryAttempt> {
        let (index, bytes) = self.next?;
        self.next = match self.policy.decide(index, bytes, self.decrement) {
            DecayDecision::Stop => None,
            DecayDecision::RetryWith(smaller) => Some((index + 1, smaller)),
        };
        Some(RetryAttempt {
            index,
            size: Quantity::from_bytes(bytes as i64),
        })
    }
}
