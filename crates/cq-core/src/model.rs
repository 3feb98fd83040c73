//! Checkout domain model shared by the engine and the learning agent.

use std::collections::VecDeque;
use std::fmt;

use crate::{CustomerId, SimTime, StationId};

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Calendar regime that selects calibration data.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DayType {
    #[default]
    Weekday,
    Weekend,
}

impl DayType {
    pub fn as_str(self) -> &'static str {
        match self {
            DayType::Weekday => "weekday",
            DayType::Weekend => "weekend",
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a customer pays.  Cash is only accepted at staffed registers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PaymentMethod {
    Cash,
    Card,
    Voucher,
}

impl PaymentMethod {
    /// All methods, in the order used by weighted sampling.
    pub const ALL: [PaymentMethod; 3] = [PaymentMethod::Cash, PaymentMethod::Card, PaymentMethod::Voucher];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash    => "cash",
            PaymentMethod::Card    => "card",
            PaymentMethod::Voucher => "voucher",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staffed register or self-service kiosk.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StationKind {
    Regular,
    Kiosk,
}

impl fmt::Display for StationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StationKind::Regular => "regular",
            StationKind::Kiosk   => "kiosk",
        })
    }
}

// ── Customer ──────────────────────────────────────────────────────────────────

/// One shopper.
///
/// `wait_time` is set together with `service_start` and always equals
/// `service_start - arrival_time`.  `service_end` is set at most once, either
/// when service completes or when the customer abandons a queue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Customer {
    pub id:                    CustomerId,
    pub arrival_time:          SimTime,
    /// Always ≥ 1.
    pub item_count:            u32,
    pub payment:               PaymentMethod,
    pub prefers_self_checkout: bool,
    pub total_value:           f64,
    pub service_start:         Option<SimTime>,
    pub service_end:           Option<SimTime>,
    /// Seconds spent queueing before service started.  Raw value: it may
    /// exceed the 1800 s cap, which applies only when the engine averages
    /// waits into `Metrics::average_wait_time`.
    pub wait_time:             Option<f64>,
    /// Left a queue before being served.
    pub abandoned:             bool,
    /// Currently waiting in the centralized main queue.
    pub in_main_queue:         bool,
}

impl Customer {
    /// Still waiting or being served.
    #[inline]
    pub fn is_in_system(&self) -> bool {
        self.service_end.is_none()
    }

    /// Finished service (abandoned customers are not "served").
    #[inline]
    pub fn is_served(&self) -> bool {
        self.service_end.is_some() && !self.abandoned
    }

    /// Length of the service interval, if service completed.
    pub fn service_duration(&self) -> Option<f64> {
        match (self.service_start, self.service_end) {
            (Some(start), Some(end)) if !self.abandoned => Some(end - start),
            _ => None,
        }
    }
}

// ── CheckoutStation ───────────────────────────────────────────────────────────

/// One server: a staffed register or a self-service kiosk.
///
/// The queue holds customer ids in FIFO order; at most one customer is being
/// served at a time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckoutStation {
    pub id:                StationId,
    pub kind:              StationKind,
    pub is_active:         bool,
    pub serving:           Option<CustomerId>,
    pub queue:             VecDeque<CustomerId>,
    /// Nominal mean service time in seconds.
    pub service_time_mean: f64,
    /// Queue capacity.  Only enforced for kiosks; `None` uses the engine's
    /// default.
    pub max_queue_length:  Option<usize>,
}

impl CheckoutStation {
    /// An active, idle station with an empty queue.
    pub fn new(id: StationId, kind: StationKind, service_time_mean: f64) -> Self {
        Self {
            id,
            kind,
            is_active: true,
            serving: None,
            queue: VecDeque::new(),
            service_time_mean,
            max_queue_length: None,
        }
    }

    pub fn regular(id: u32, service_time_mean: f64) -> Self {
        Self::new(StationId(id), StationKind::Regular, service_time_mean)
    }

    pub fn kiosk(id: u32, service_time_mean: f64) -> Self {
        Self::new(StationId(id), StationKind::Kiosk, service_time_mean)
    }

    pub fn with_max_queue_length(mut self, max: usize) -> Self {
        self.max_queue_length = Some(max);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[inline]
    pub fn is_kiosk(&self) -> bool {
        self.kind == StationKind::Kiosk
    }

    #[inline]
    pub fn is_regular(&self) -> bool {
        self.kind == StationKind::Regular
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.serving.is_some()
    }

    /// Queue capacity, falling back to `default` when unset.
    #[inline]
    pub fn capacity(&self, default: usize) -> usize {
        self.max_queue_length.unwrap_or(default)
    }

    /// Drop all transient state (queue and customer in service).
    pub fn clear(&mut self) {
        self.queue.clear();
        self.serving = None;
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Aggregate system snapshot, recomputed after every event.
///
/// Times are in seconds, throughput in customers per hour, satisfaction and
/// score on a 0–100 scale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub average_wait_time:        f64,
    pub average_queue_length:     f64,
    /// Time-weighted server utilization, ≤ 0.99.
    pub utilization:              f64,
    pub throughput:               f64,
    pub total_customers_served:   u64,
    pub total_customers_abandoned: u64,
    pub peak_queue_length:        usize,
    pub customers_in_system:      usize,
    pub satisfaction:             f64,
    pub score:                    f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            average_wait_time:         0.0,
            average_queue_length:      0.0,
            utilization:               0.0,
            throughput:                0.0,
            total_customers_served:    0,
            total_customers_abandoned: 0,
            peak_queue_length:         0,
            customers_in_system:       0,
            satisfaction:              100.0,
            score:                     0.0,
        }
    }
}
