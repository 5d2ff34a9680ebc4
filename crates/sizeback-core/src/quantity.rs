//! Exact decimal-scaled byte counts.
//!
//! A `Quantity` is `magnitude * 10^scale`. Comparison is by numeric value, so
//! `1000 * 10^0` and `1 * 10^3` are equal. There is no arithmetic or parsing
//! here; callers build quantities from integers and compare them.

use std::cmp::Ordering;
use std::fmt;

/// Exact numeric value representing a byte count.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    magnitude: i64,
    scale: i32,
}

impl Quantity {
    /// Build `magnitude * 10^scale`.
    pub fn new(magnitude: i64, scale: i32) -> Self {
        Self { magnitude, scale }
    }

    /// Plain byte count (scale 0).
    pub fn from_bytes(bytes: i64) -> Self {
        Self::new(bytes, 0)
    }

    pub fn magnitude(&self) -> i64 {
        self.magnitude
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn is_negative(&self) -> bool {
        self.magnitude < 0
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude == 0
    }

    /// Integer byte value. Negative scales truncate toward zero; returns `None`
    /// when the value does not fit in an `i64`.
    pub fn to_bytes(&self) -> Option<i64> {
        if self.magnitude == 0 {
            return Some(0);
        }
        if self.scale >= 0 {
            let factor = 10i64.checked_pow(self.scale.unsigned_abs())?;
            self.magnitude.checked_mul(factor)
        } else {
            match 10i64.checked_pow(self.scale.unsigned_abs()) {
                Some(divisor) => Some(self.magnitude / divisor),
                // 10^19 and beyond exceed any i64 magnitude.
                None => Some(0),
            }
        }
    }

    /// Byte count usable as the start of a decay run: `None` for any negative
    /// value (including ones that truncate to zero) or one that overflows.
    pub fn to_start_bytes(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        self.to_bytes().map(|b| b as u64)
    }

    /// Three-way comparison by value.
    pub fn cmp_quantity(&self, other: &Quantity) -> Ordering {
        self.cmp(other)
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.magnitude.signum().cmp(&other.magnitude.signum());
        if by_sign != Ordering::Equal || self.magnitude == 0 {
            return by_sign;
        }

        // Same sign, both non-zero: bring the larger scale down to the smaller one.
        let (hi, lo, flipped) = if self.scale >= other.scale {
            (self, other, false)
        } else {
            (other, self, true)
        };
        let diff = hi.scale.abs_diff(lo.scale);
        let hi_scaled = 10i128
            .checked_pow(diff)
            .and_then(|f| (hi.magnitude as i128).checked_mul(f));

        let ord = match hi_scaled {
            Some(v) => v.cmp(&(lo.magnitude as i128)),
            // Overflowed: |hi| dwarfs |lo|, so the sign decides.
            None if hi.magnitude > 0 => Ordering::Greater,
            None => Ordering::Less,
        };
        if flipped {
            ord.reverse()
        } else {
            ord
        }
    }
}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Quantity {}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            write!(f, "{}", self.magnitude)
        } else {
            write!(f, "{}e{}", self.magnitude, self.scale)
        }
    }
}

/// Copy of whichever quantity is numerically smaller (the first on ties).
pub fn min_quantity(a: &Quantity, b: &Quantity) -> Quantity {
    if b < a {
        *b
    } else {
        *a
    }
}
