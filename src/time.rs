use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Days per simulated year. Fixed at 365, exactly as `spec.md` §3 defines it.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// A point in simulated time, expressed in days since the epoch (`t = 0`).
///
/// Unlike the teacher's bit-packed `SimTimestamp` (integer year/day/hour),
/// this wraps a plain `f64`: events schedule successors at fractional-day
/// offsets (`t + 0.1`, `t + gauss(65, 10) * 365`), which a packed
/// hour-granularity integer can't represent.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn new(days: f64) -> Self {
        Self(days)
    }

    pub fn days(self) -> f64 {
        self.0
    }

    /// Age in years for a person born at `birth_time`, observed at `self`.
    pub fn years_since(self, birth_time: SimTime) -> f64 {
        (self.0 - birth_time.0) / DAYS_PER_YEAR
    }
}

impl Default for SimTime {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl Sub for SimTime {
    type Output = f64;
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.2}", self.0)
    }
}

// `SimTime` carries an `f64`, so it cannot derive `Eq`/`Ord`/`Hash`. The
// scheduler only ever compares times with `partial_cmp` (NaN never enters
// the system: every offset is a finite arithmetic expression over finite
// inputs), so `PartialOrd` is sufficient everywhere `SimTime` is used as a
// heap key.
