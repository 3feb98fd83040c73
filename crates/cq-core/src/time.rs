//! Simulation time model.
//!
//! Time is continuous: a `SimTime` is a count of simulated seconds since the
//! start of the run.  Exponential inter-arrival and service draws produce
//! fractional seconds, so unlike a tick counter the value is an `f64`.
//!
//! `SimTime` is totally ordered (via [`f64::total_cmp`]) so it can key a
//! `BTreeMap` event queue.  Times produced by the engine are always finite
//! and non-negative.

use std::cmp::Ordering;
use std::fmt;

/// An absolute simulation time in seconds.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Seconds since the start of the run.
    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// Build a time from a number of simulated minutes.
    #[inline]
    pub fn from_minutes(minutes: f64) -> SimTime {
        SimTime(minutes * 60.0)
    }

    /// Return the time `secs` seconds after `self`.
    #[inline]
    pub fn offset(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }

    /// Hours elapsed since time zero.
    #[inline]
    pub fn hours(self) -> f64 {
        self.0 / 3_600.0
    }

    /// Hour-of-day (0–23) assuming time zero is midnight.
    pub fn hour_of_day(self) -> u32 {
        ((self.0.max(0.0) / 3_600.0).floor() as u64 % 24) as u32
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.0.max(0.0);
        let hours = (total / 3_600.0).floor() as u64;
        let minutes = ((total % 3_600.0) / 60.0).floor() as u64;
        let seconds = total % 60.0;
        write!(f, "{hours:02}:{minutes:02}:{seconds:05.2}")
    }
}
