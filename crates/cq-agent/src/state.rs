//! Discretized observations.
//!
//! A [`QState`] is what the agent sees of the store: every station's queue
//! length, the number of open stations, the day type, and the hour.  Its
//! [`StateKey`] buckets the queue lengths and the hour so that similar
//! situations share Q-values.

use std::fmt;

use cq_core::{CheckoutStation, DayType, SimTime};

// ── Buckets ───────────────────────────────────────────────────────────────────

/// Coarse queue length.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QueueBucket {
    /// 0
    Empty,
    /// 1–2
    Short,
    /// 3–6
    Medium,
    /// 7+
    Long,
}

impl QueueBucket {
    pub fn from_len(len: u32) -> Self {
        match len {
            0 => QueueBucket::Empty,
            1..=2 => QueueBucket::Short,
            3..=6 => QueueBucket::Medium,
            _ => QueueBucket::Long,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QueueBucket::Empty  => "empty",
            QueueBucket::Short  => "short",
            QueueBucket::Medium => "medium",
            QueueBucket::Long   => "long",
        }
    }
}

/// Part of the trading day.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TimeBucket {
    /// before 09:00
    Morning,
    /// 09:00–11:59
    Midmorning,
    /// 12:00–13:59
    Lunch,
    /// 14:00–16:59
    Afternoon,
    /// 17:00–19:59
    Evening,
    /// 20:00 onwards
    Night,
}

impl TimeBucket {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=8 => TimeBucket::Morning,
            9..=11 => TimeBucket::Midmorning,
            12..=13 => TimeBucket::Lunch,
            14..=16 => TimeBucket::Afternoon,
            17..=19 => TimeBucket::Evening,
            _ => TimeBucket::Night,
        }
    }

    /// Per-queue, per-step chance of a new arrival in the training model.
    pub fn arrival_probability(self) -> f64 {
        match self {
            TimeBucket::Morning    => 0.3,
            TimeBucket::Midmorning => 0.5,
            TimeBucket::Lunch      => 0.8,
            TimeBucket::Afternoon  => 0.6,
            TimeBucket::Evening    => 0.7,
            TimeBucket::Night      => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeBucket::Morning    => "morning",
            TimeBucket::Midmorning => "midmorning",
            TimeBucket::Lunch      => "lunch",
            TimeBucket::Afternoon  => "afternoon",
            TimeBucket::Evening    => "evening",
            TimeBucket::Night      => "night",
        }
    }
}

// ── QState ────────────────────────────────────────────────────────────────────

/// Raw observation of the checkout area.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QState {
    /// One entry per station, in layout order.
    pub queue_lengths:   Vec<u32>,
    pub active_stations: u32,
    pub day_type:        DayType,
    /// 0–23.
    pub hour_of_day:     u32,
}

impl QState {
    /// Observe a station layout at simulated time `now`.
    pub fn observe(stations: &[CheckoutStation], day_type: DayType, now: SimTime) -> Self {
        Self {
            queue_lengths:   stations.iter().map(|s| s.queue.len() as u32).collect(),
            active_stations: stations.iter().filter(|s| s.is_active).count() as u32,
            day_type,
            hour_of_day:     now.hour_of_day(),
        }
    }

    pub fn key(&self) -> StateKey {
        StateKey {
            queues:          self.queue_lengths.iter().map(|&l| QueueBucket::from_len(l)).collect(),
            active_stations: self.active_stations,
            day_type:        self.day_type,
            time:            TimeBucket::from_hour(self.hour_of_day),
        }
    }

    pub fn time_bucket(&self) -> TimeBucket {
        TimeBucket::from_hour(self.hour_of_day)
    }

    /// Mean queue length; 0 with no queues.
    pub fn average_queue_length(&self) -> f64 {
        if self.queue_lengths.is_empty() {
            return 0.0;
        }
        self.queue_lengths.iter().map(|&l| l as f64).sum::<f64>() / self.queue_lengths.len() as f64
    }
}

// ── StateKey ──────────────────────────────────────────────────────────────────

/// Discretized [`QState`], the row index of the Q-table.
///
/// Displays as `short|empty|2|weekday|lunch`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateKey {
    pub queues:          Vec<QueueBucket>,
    pub active_stations: u32,
    pub day_type:        DayType,
    pub time:            TimeBucket,
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bucket in &self.queues {
            write!(f, "{}|", bucket.as_str())?;
        }
        write!(f, "{}|{}|{}", self.active_stations, self.day_type, self.time.as_str())
    }
}
