//! Fluent builder for constructing an [`Engine`] with validated input.

use std::collections::HashSet;

use cq_core::{CheckoutStation, StoreProfile};
use cq_theory::{SatisfactionWeights, ScoreWeights};

use crate::{Engine, EngineTuning, SimError, SimParams, SimResult};

/// Fluent builder for [`Engine`].
///
/// # Required inputs
///
/// - the station layout
/// - [`SimParams`] — arrival rate, service means, day type, duration, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                                  |
/// |-----------------------------|------------------------------------------|
/// | `.tuning(t)`                | `EngineTuning::default()`                |
/// | `.profile(p)`               | `StoreProfile::builtin(params.day_type)` |
/// | `.satisfaction_weights(w)`  | `SatisfactionWeights::default()`         |
/// | `.score_weights(w)`         | `ScoreWeights::default()`                |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(stations, SimParams::default())
///     .profile(load_profile_csv("monday.csv", DayType::Weekday)?)
///     .build()?;
/// engine.run(&mut NoopObserver);
/// ```
pub struct EngineBuilder {
    stations:             Vec<CheckoutStation>,
    params:               SimParams,
    tuning:               Option<EngineTuning>,
    profile:              Option<StoreProfile>,
    satisfaction_weights: Option<SatisfactionWeights>,
    score_weights:        Option<ScoreWeights>,
}

impl EngineBuilder {
    pub fn new(stations: Vec<CheckoutStation>, params: SimParams) -> Self {
        Self {
            stations,
            params,
            tuning:               None,
            profile:              None,
            satisfaction_weights: None,
            score_weights:        None,
        }
    }

    pub fn tuning(mut self, tuning: EngineTuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    /// Calibration used for baskets, payment mix, and base service time.
    ///
    /// If not called, the built-in profile for `params.day_type` is used.
    pub fn profile(mut self, profile: StoreProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn satisfaction_weights(mut self, weights: SatisfactionWeights) -> Self {
        self.satisfaction_weights = Some(weights);
        self
    }

    pub fn score_weights(mut self, weights: ScoreWeights) -> Self {
        self.score_weights = Some(weights);
        self
    }

    /// Validate inputs and return a reset, ready-to-step [`Engine`].
    pub fn build(self) -> SimResult<Engine> {
        // ── Validate parameters ───────────────────────────────────────────
        let p = &self.params;
        non_negative("arrival rate", p.arrival_rate)?;
        positive("regular service time", p.service_time_regular)?;
        positive("kiosk service time", p.service_time_kiosk)?;
        non_negative("simulation duration", p.simulation_duration)?;

        let mut seen = HashSet::with_capacity(self.stations.len());
        for station in &self.stations {
            if !seen.insert(station.id) {
                return Err(SimError::DuplicateStation(station.id));
            }
            positive("station service time", station.service_time_mean)?;
        }

        let tuning = self.tuning.unwrap_or_default();
        if tuning.min_service_secs > tuning.max_service_secs {
            return Err(SimError::Config(format!(
                "min service time {} exceeds max {}",
                tuning.min_service_secs, tuning.max_service_secs,
            )));
        }

        let profile = self
            .profile
            .unwrap_or_else(|| StoreProfile::builtin(self.params.day_type));
        positive("profile service time", profile.avg_service_time)?;

        Ok(Engine::from_parts(
            self.stations,
            self.params,
            tuning,
            profile,
            self.satisfaction_weights.unwrap_or_default(),
            self.score_weights.unwrap_or_default(),
        ))
    }
}

fn non_negative(what: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParam { what, bound: "non-negative", value })
    }
}

fn positive(what: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParam { what, bound: "positive", value })
    }
}
