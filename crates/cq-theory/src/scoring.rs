//! Satisfaction curves and performance scoring.
//!
//! The breakpoints are hand-tuned retail heuristics.  Each blend exposes its
//! weights as a struct with a `Default` so callers can re-weight without
//! touching the curves.

/// Wait (seconds) at which the theoretical satisfaction reaches zero.
pub const MAX_ACCEPTABLE_WAIT_SECS: f64 = 300.0;

/// 0–1 satisfaction falling linearly with time in system.
pub fn satisfaction_from_wait(wait_secs: f64) -> f64 {
    (1.0 - wait_secs / MAX_ACCEPTABLE_WAIT_SECS).max(0.0)
}

// ── Satisfaction components (0–100) ───────────────────────────────────────────

/// Piecewise-linear in minutes: 100 up to 1 min, ≥ 5 beyond 10 min.
pub fn wait_satisfaction(wait_minutes: f64) -> f64 {
    let m = wait_minutes;
    if m <= 1.0 {
        100.0
    } else if m <= 2.0 {
        90.0 - (m - 1.0) * 10.0
    } else if m <= 3.0 {
        80.0 - (m - 2.0) * 20.0
    } else if m <= 5.0 {
        60.0 - (m - 3.0) * 15.0
    } else if m <= 10.0 {
        30.0 - (m - 5.0) * 4.0
    } else {
        (10.0 - (m - 10.0) * 0.5).max(5.0)
    }
}

/// Penalizes the number of people currently queueing; floor 10.
pub fn queue_satisfaction(queue_length: usize) -> f64 {
    let q = queue_length as f64;
    if q <= 5.0 {
        100.0
    } else if q <= 10.0 {
        100.0 - (q - 5.0) * 10.0
    } else if q <= 20.0 {
        50.0 - (q - 10.0) * 3.0
    } else {
        (20.0 - (q - 20.0) * 0.5).max(10.0)
    }
}

/// Peaks on the 60–85 % utilization plateau; overload drops fast to 40.
pub fn efficiency_satisfaction(utilization: f64) -> f64 {
    if (0.6..=0.85).contains(&utilization) {
        100.0
    } else if utilization < 0.6 {
        70.0 + (utilization / 0.6) * 30.0
    } else {
        (100.0 - (utilization - 0.85) * 200.0).max(40.0)
    }
}

/// 100 with no abandonments, floor 50.
pub fn abandonment_satisfaction(served: u64, abandoned: u64) -> f64 {
    let total = served + abandoned;
    if total == 0 {
        return 100.0;
    }
    let rate = abandoned as f64 / total as f64;
    (100.0 - rate * 200.0).max(50.0)
}

/// Weights of the satisfaction blend.  They sum to 1 by default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatisfactionWeights {
    pub wait:        f64,
    pub queue:       f64,
    pub efficiency:  f64,
    pub abandonment: f64,
}

impl Default for SatisfactionWeights {
    fn default() -> Self {
        Self { wait: 0.6, queue: 0.2, efficiency: 0.15, abandonment: 0.05 }
    }
}

/// Everything the satisfaction blend looks at.
#[derive(Clone, Debug, PartialEq)]
pub struct SatisfactionInputs {
    pub average_wait_secs: f64,
    pub queue_length:      usize,
    pub utilization:       f64,
    pub served:            u64,
    pub abandoned:         u64,
}

impl SatisfactionWeights {
    /// Unsmoothed 0–100 blend of the four components.
    pub fn blend(&self, inputs: &SatisfactionInputs) -> f64 {
        wait_satisfaction(inputs.average_wait_secs / 60.0) * self.wait
            + queue_satisfaction(inputs.queue_length) * self.queue
            + efficiency_satisfaction(inputs.utilization) * self.efficiency
            + abandonment_satisfaction(inputs.served, inputs.abandoned) * self.abandonment
    }
}

// ── Score components (0–100) ──────────────────────────────────────────────────

/// Step function of the average wait in minutes.
pub fn wait_time_score(wait_minutes: f64) -> f64 {
    match wait_minutes {
        m if m <= 1.0 => 100.0,
        m if m <= 2.0 => 90.0,
        m if m <= 3.0 => 75.0,
        m if m <= 5.0 => 50.0,
        m if m <= 7.0 => 25.0,
        _ => 0.0,
    }
}

/// 100 on the 70–85 % plateau, ramps on either side.
pub fn utilization_score(utilization: f64) -> f64 {
    let u = utilization;
    if (0.7..=0.85).contains(&u) {
        100.0
    } else if (0.6..0.7).contains(&u) {
        70.0 + (u - 0.6) * 300.0
    } else if u > 0.85 && u <= 0.95 {
        100.0 - (u - 0.85) * 500.0
    } else if u < 0.6 {
        u * 100.0 / 0.6
    } else {
        (50.0 - (u - 0.95) * 1000.0).max(0.0)
    }
}

/// How close served-per-hour comes to the arrival target (per hour).
pub fn throughput_score(throughput: f64, target_per_hour: f64) -> f64 {
    let efficiency = throughput / target_per_hour.max(1.0);
    if efficiency >= 0.95 {
        100.0
    } else if efficiency >= 0.8 {
        80.0 + (efficiency - 0.8) * 133.0
    } else if efficiency >= 0.6 {
        60.0 + (efficiency - 0.6) * 100.0
    } else {
        efficiency * 100.0
    }
}

/// Weights of the overall score.  They sum to 1 by default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreWeights {
    pub wait_time:   f64,
    pub utilization: f64,
    pub throughput:  f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { wait_time: 0.4, utilization: 0.3, throughput: 0.3 }
    }
}

/// Weighted 0–100 performance score.
pub fn overall_score(
    wait_minutes:    f64,
    utilization:     f64,
    throughput:      f64,
    target_per_hour: f64,
    weights:         &ScoreWeights,
) -> f64 {
    wait_time_score(wait_minutes) * weights.wait_time
        + utilization_score(utilization) * weights.utilization
        + throughput_score(throughput, target_per_hour) * weights.throughput
}
