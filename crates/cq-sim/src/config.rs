//! Run parameters and the engine's hand-tuned behavioral constants.

use cq_core::{DayType, StoreProfile};

// ── SimParams ─────────────────────────────────────────────────────────────────

/// What to simulate: load, service speeds, calendar, and run length.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimParams {
    /// Mean arrivals per hour (Poisson process).
    pub arrival_rate: f64,

    /// Nominal mean service time of a staffed register, in seconds.  Feeds
    /// the warm-up throughput estimate and the M/M/c comparison.
    pub service_time_regular: f64,

    /// Nominal mean service time of a kiosk, in seconds.
    pub service_time_kiosk: f64,

    /// Selects the calibration profile (basket size, payment mix, base
    /// service time).
    pub day_type: DayType,

    /// Length of the run in simulated minutes.
    pub simulation_duration: f64,

    /// Back-pressure limit: while this many customers are in the system,
    /// arrivals are deferred rather than generated.
    pub max_customers: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            arrival_rate:         26.0,
            service_time_regular: 82.0,
            service_time_kiosk:   98.0,
            day_type:             DayType::Weekday,
            simulation_duration:  30.0,
            max_customers:        1_000,
            seed:                 42,
        }
    }
}

impl SimParams {
    /// Parameters matching a calibration profile: observed arrival rate over
    /// the trading day, observed service time, kiosks 20 % slower.
    pub fn from_profile(profile: &StoreProfile) -> Self {
        Self {
            arrival_rate:         profile.arrival_rate_per_hour(),
            service_time_regular: profile.avg_service_time,
            service_time_kiosk:   (profile.avg_service_time * 1.2).round(),
            day_type:             profile.day_type,
            ..Self::default()
        }
    }

    /// Run length in seconds.
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        self.simulation_duration * 60.0
    }

    /// Arrival rate per second, the unit the exponential draw uses.
    #[inline]
    pub fn arrival_rate_per_sec(&self) -> f64 {
        self.arrival_rate / 3_600.0
    }
}

// ── EngineTuning ──────────────────────────────────────────────────────────────

/// Behavioral constants of routing, balking, service sampling, and metric
/// smoothing.
///
/// The defaults are hand-tuned retail values.  Each is exposed so scenarios
/// can be re-tuned without touching the engine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineTuning {
    // Arrivals
    /// Delay before re-trying an arrival deferred by `max_customers`.
    pub retry_delay_secs:          f64,
    /// Exponential draws are truncated at this multiple of their mean.
    pub max_exponential_multiple:  f64,

    // Customers
    /// Width of the uniform noise around the profile's mean basket:
    /// `items = round(mean + (U − 0.5) · range)`.
    pub item_noise_range:          f64,
    /// Probability that a non-cash, small-basket customer prefers a kiosk.
    pub self_checkout_probability: f64,
    /// Baskets must be strictly smaller than this to consider a kiosk.
    pub self_checkout_item_limit:  u32,

    // Routing
    /// Customers moved from the main queue to registers per drain cycle.
    pub main_queue_batch:          usize,
    /// Largest basket still offered a last-chance kiosk redirect.
    pub redirect_max_items:        u32,
    /// Kiosk queue length at or below which a redirect is accepted.
    pub redirect_max_queue:        usize,
    /// Kiosk capacity used when a station sets none.
    pub default_kiosk_capacity:    usize,
    /// Kiosk choice weighs queue length double for baskets up to this size.
    pub small_basket_items:        u32,
    /// Cash payers are penalised on kiosk queues longer than this.
    pub cash_kiosk_queue_tolerance: usize,
    pub cash_kiosk_penalty:        f64,
    /// Register score: seconds of penalty per queued person.
    pub register_queue_penalty:    f64,
    /// Register score: service time considered neutral.
    pub register_baseline_service: f64,
    /// Register score: weight of the deviation from the baseline.
    pub register_service_weight:   f64,
    /// Register score: upper bound of the uniform tie-break.
    pub register_jitter:           f64,
    /// Rebalance when the longest register queue exceeds the shortest by
    /// more than this.
    pub rebalance_gap:             usize,
    /// ... and the longest queue holds more than this.
    pub rebalance_min_queue:       usize,

    // Balking
    /// Kiosk balking starts above this fraction of capacity.
    pub kiosk_balk_occupancy:      f64,
    pub kiosk_balk_probability:    f64,
    /// Main queue length above which the last customer always leaves.
    pub main_queue_hard_limit:     usize,
    /// Main queue length above which the last customer may leave.
    pub main_queue_soft_limit:     usize,
    /// Base of the load-dependent balking threshold.
    pub balk_threshold_base:       f64,
    /// System occupancy beyond this no longer raises the threshold.
    pub balk_occupancy_cap:        usize,

    // Service
    pub kiosk_service_factor:      f64,
    pub cash_service_factor:       f64,
    pub voucher_service_factor:    f64,
    /// Extra service fraction per item beyond the first.
    pub per_item_factor:           f64,
    /// Uniform jitter: the multiplier is drawn from `1 ± jitter`.
    pub service_jitter:            f64,
    pub min_service_secs:          f64,
    pub max_service_secs:          f64,

    // Metrics
    /// Per-customer wait cap applied when averaging.
    pub max_wait_secs:             f64,
    /// Weight of the previous value in exponential smoothing.
    pub utilization_smoothing:     f64,
    pub satisfaction_smoothing:    f64,
    /// Hard ceiling on published utilization.
    pub max_utilization:           f64,
    /// Queue pressure added to instantaneous utilization per waiting person.
    pub queue_pressure_per_person: f64,
    pub max_queue_pressure:        f64,
    /// Elapsed hours before throughput is taken at face value.
    pub warmup_hours:              f64,
    /// Share of theoretical capacity used as the warm-up throughput ceiling.
    pub warmup_capacity_fraction:  f64,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            retry_delay_secs:          5.0,
            max_exponential_multiple:  5.0,

            item_noise_range:          3.0,
            self_checkout_probability: 0.55,
            self_checkout_item_limit:  5,

            main_queue_batch:          3,
            redirect_max_items:        15,
            redirect_max_queue:        1,
            default_kiosk_capacity:    5,
            small_basket_items:        10,
            cash_kiosk_queue_tolerance: 2,
            cash_kiosk_penalty:        5.0,
            register_queue_penalty:    30.0,
            register_baseline_service: 75.0,
            register_service_weight:   0.5,
            register_jitter:           10.0,
            rebalance_gap:             3,
            rebalance_min_queue:       2,

            kiosk_balk_occupancy:      0.8,
            kiosk_balk_probability:    0.3,
            main_queue_hard_limit:     15,
            main_queue_soft_limit:     10,
            balk_threshold_base:       0.7,
            balk_occupancy_cap:        30,

            kiosk_service_factor:      1.2,
            cash_service_factor:       1.4,
            voucher_service_factor:    1.6,
            per_item_factor:           0.2,
            service_jitter:            0.25,
            min_service_secs:          10.0,
            max_service_secs:          360.0,

            max_wait_secs:             1_800.0,
            utilization_smoothing:     0.8,
            satisfaction_smoothing:    0.8,
            max_utilization:           0.99,
            queue_pressure_per_person: 0.01,
            max_queue_pressure:        0.15,
            warmup_hours:              0.05,
            warmup_capacity_fraction:  0.7,
        }
    }
}
