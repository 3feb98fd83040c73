//! Plain data rows written by output backends.

use cq_core::{Customer, Metrics, SimTime};

/// Engine metrics sampled at one point of simulated time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsRow {
    /// Simulated seconds since the start of the run.
    pub time_secs:            f64,
    pub average_wait_time:    f64,
    pub average_queue_length: f64,
    pub utilization:          f64,
    /// Customers per hour.
    pub throughput:           f64,
    pub served:               u64,
    pub abandoned:            u64,
    pub satisfaction:         f64,
    pub score:                f64,
}

impl MetricsRow {
    pub fn sample(time: SimTime, metrics: &Metrics) -> Self {
        Self {
            time_secs:            time.secs(),
            average_wait_time:    metrics.average_wait_time,
            average_queue_length: metrics.average_queue_length,
            utilization:          metrics.utilization,
            throughput:           metrics.throughput,
            served:               metrics.total_customers_served,
            abandoned:            metrics.total_customers_abandoned,
            satisfaction:         metrics.satisfaction,
            score:                metrics.score,
        }
    }
}

/// Final record of one customer.
///
/// Times are simulated seconds; `None` where the customer never reached that
/// stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerRow {
    pub customer_id:   u32,
    pub arrival_time:  f64,
    pub item_count:    u32,
    /// `cash`, `card` or `voucher`.
    pub payment:       &'static str,
    pub prefers_kiosk: bool,
    pub total_value:   f64,
    pub service_start: Option<f64>,
    pub service_end:   Option<f64>,
    pub wait_time:     Option<f64>,
    pub abandoned:     bool,
}

impl From<&Customer> for CustomerRow {
    fn from(c: &Customer) -> Self {
        Self {
            customer_id:   c.id.0,
            arrival_time:  c.arrival_time.secs(),
            item_count:    c.item_count,
            payment:       c.payment.as_str(),
            prefers_kiosk: c.prefers_self_checkout,
            total_value:   c.total_value,
            service_start: c.service_start.map(SimTime::secs),
            service_end:   c.service_end.map(SimTime::secs),
            wait_time:     c.wait_time,
            abandoned:     c.abandoned,
        }
    }
}
