//! M/M/c steady-state formulas.
//!
//! With traffic `a = λ/μ` and utilization `ρ = a/c`:
//!
//! ```text
//! P₀ = [ Σ_{n<c} aⁿ/n!  +  (aᶜ/c!) · 1/(1-ρ) ]⁻¹
//! Lq = P₀ · (aᶜ/c!) · ρ / (1-ρ)²
//! Ls = Lq + a        Wq = Lq/λ        Ws = Ls/λ
//! ```
//!
//! The `aⁿ/n!` terms are built incrementally so large `c` neither overflows
//! the factorial nor the power.

use cq_core::{DayType, Metrics};

use crate::scoring::satisfaction_from_wait;

/// Floor for the score of a stable system, so "stable" is always
/// distinguishable from the unstable sentinel's zero.
pub const MIN_STABLE_SCORE: f64 = 0.01;

/// Theoretical M/M/c prediction.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MmcMetrics {
    /// `false` when `ρ ≥ 1`; every queue/wait field is then infinite.
    pub stable:      bool,
    /// Offered load `λ/μ`.
    pub traffic:     f64,
    /// `ρ = λ/(cμ)`.
    pub utilization: f64,
    /// Probability of an empty system.
    pub p0:          f64,
    pub lq:          f64,
    pub ls:          f64,
    pub wq:          f64,
    pub ws:          f64,
    /// Equals λ for a stable system, 0 otherwise.
    pub throughput:  f64,
    /// 0–1 satisfaction derived from `ws` (seconds).
    pub satisfaction: f64,
    /// 0–100; strictly positive iff stable.
    pub score:       f64,
}

impl MmcMetrics {
    /// The "unstable system" sentinel.
    pub fn unstable(utilization: f64) -> Self {
        Self {
            stable:       false,
            traffic:      f64::INFINITY,
            utilization,
            p0:           0.0,
            lq:           f64::INFINITY,
            ls:           f64::INFINITY,
            wq:           f64::INFINITY,
            ws:           f64::INFINITY,
            throughput:   0.0,
            satisfaction: 0.0,
            score:        0.0,
        }
    }
}

/// `n!` as a float (`0! = 1`).
pub fn factorial(n: u32) -> f64 {
    (2..=n).fold(1.0, |acc, k| acc * k as f64)
}

/// Steady-state metrics for `c` servers, arrival rate `lambda`, and
/// per-server service rate `mu`.
///
/// Returns [`MmcMetrics::unstable`] when `λ ≥ cμ`, when `c = 0`, or when `μ`
/// is not positive.
pub fn mmc_metrics(lambda: f64, mu: f64, c: u32) -> MmcMetrics {
    if c == 0 || !(mu > 0.0) || !lambda.is_finite() {
        return MmcMetrics::unstable(f64::INFINITY);
    }
    let lambda = lambda.max(0.0);
    let traffic = lambda / mu;
    let utilization = traffic / c as f64;
    if utilization >= 1.0 {
        return MmcMetrics::unstable(utilization);
    }

    // term = aⁿ/n!, advanced up to n = c.
    let mut term = 1.0;
    let mut sum = 0.0;
    for n in 0..c {
        sum += term;
        term *= traffic / (n + 1) as f64;
    }
    let tail = term;
    let p0 = 1.0 / (sum + tail / (1.0 - utilization));

    let lq = p0 * tail * utilization / (1.0 - utilization).powi(2);
    let ls = lq + traffic;
    let (wq, ws) = if lambda > 0.0 {
        (lq / lambda, ls / lambda)
    } else {
        // An arriving customer would go straight into service.
        (0.0, 1.0 / mu)
    };

    let satisfaction = satisfaction_from_wait(ws);
    MmcMetrics {
        stable: true,
        traffic,
        utilization,
        p0,
        lq,
        ls,
        wq,
        ws,
        throughput: lambda,
        satisfaction,
        score: (satisfaction * 100.0).max(MIN_STABLE_SCORE),
    }
}

/// Smallest server count whose utilization is at most `target_utilization`.
///
/// The search starts at the stability minimum `⌈λ/μ⌉` (at least one server)
/// and gives up ten servers later, returning that upper bound.
pub fn optimal_servers(lambda: f64, mu: f64, target_utilization: f64) -> u32 {
    let min_servers = if mu > 0.0 { (lambda / mu).ceil().max(1.0) as u32 } else { 1 };
    (min_servers..=min_servers + 10)
        .find(|&c| lambda / (c as f64 * mu) <= target_utilization)
        .unwrap_or(min_servers + 10)
}

/// Fraction of the wait-time target met: 1 at or under target, falling
/// linearly to 0 at twice the target.
pub fn service_level(actual_wait: f64, target_wait: f64) -> f64 {
    if actual_wait <= target_wait {
        return 1.0;
    }
    (1.0 - (actual_wait - target_wait) / target_wait).max(0.0)
}

/// Relative differences between theory and simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub wait_time_difference:    f64,
    pub queue_length_difference: f64,
    pub utilization_difference:  f64,
    /// `1 − mean(differences)`, floored at 0.
    pub accuracy:                f64,
}

/// Compare a theoretical prediction against simulated metrics.
///
/// Denominators are floored (1 for waits and lengths, 0.01 for
/// utilization) so near-empty systems do not blow up the ratio.  An unstable
/// prediction has zero accuracy.
pub fn compare(theory: &MmcMetrics, simulated: &Metrics) -> Comparison {
    if !theory.stable {
        return Comparison {
            wait_time_difference:    f64::INFINITY,
            queue_length_difference: f64::INFINITY,
            utilization_difference:  (theory.utilization - simulated.utilization).abs()
                / theory.utilization.max(0.01),
            accuracy:                0.0,
        };
    }

    let wait = (theory.ws - simulated.average_wait_time).abs() / theory.ws.max(1.0);
    let queue = (theory.ls - simulated.average_queue_length).abs() / theory.ls.max(1.0);
    let util = (theory.utilization - simulated.utilization).abs() / theory.utilization.max(0.01);

    Comparison {
        wait_time_difference:    wait,
        queue_length_difference: queue,
        utilization_difference:  util,
        accuracy:                (1.0 - (wait + queue + util) / 3.0).max(0.0),
    }
}

/// Staffing cost against satisfaction-adjusted revenue.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostEfficiency {
    pub total_cost:      f64,
    pub total_revenue:   f64,
    pub net_benefit:     f64,
    /// Net benefit per unit of cost; 0 when there is no cost.
    pub cost_efficiency: f64,
}

/// Hourly cost/benefit of running `servers` stations.
///
/// `satisfaction` is on the 0–100 scale and scales revenue linearly.
pub fn cost_efficiency(
    servers:              u32,
    staff_cost_per_hour:  f64,
    satisfaction:         f64,
    revenue_per_customer: f64,
    customers_per_hour:   f64,
) -> CostEfficiency {
    let total_cost = servers as f64 * staff_cost_per_hour;
    let total_revenue = customers_per_hour * revenue_per_customer * (satisfaction / 100.0);
    let net_benefit = total_revenue - total_cost;
    CostEfficiency {
        total_cost,
        total_revenue,
        net_benefit,
        cost_efficiency: if total_cost > 0.0 { net_benefit / total_cost } else { 0.0 },
    }
}

const WEEKDAY_HOURLY: [f64; 24] = [
    0.1, 0.1, 0.1, 0.1, 0.1, 0.2,
    0.3, 0.5, 0.7, 0.8, 0.9, 1.2,
    1.5, 1.3, 1.1, 1.0, 1.2, 1.8,
    2.0, 1.6, 1.2, 0.8, 0.5, 0.3,
];

const WEEKEND_HOURLY: [f64; 24] = [
    0.1, 0.1, 0.1, 0.1, 0.1, 0.1,
    0.2, 0.3, 0.5, 0.8, 1.2, 1.5,
    1.8, 2.0, 1.9, 1.7, 1.5, 1.6,
    1.8, 1.6, 1.3, 1.0, 0.7, 0.4,
];

/// Arrival rate for each hour of the day, scaling `base_rate` by the
/// day-type traffic profile.
pub fn arrival_pattern(day_type: DayType, base_rate: f64) -> [f64; 24] {
    let multipliers = match day_type {
        DayType::Weekday => WEEKDAY_HOURLY,
        DayType::Weekend => WEEKEND_HOURLY,
    };
    multipliers.map(|m| base_rate * m)
}

/// Theoretical time in system (seconds) for an hourly arrival rate and a
/// mean service time in seconds, scaled by `utilization_factor`.
pub fn approximate_wait_time(
    arrivals_per_hour:  f64,
    service_time_secs:  f64,
    servers:            u32,
    utilization_factor: f64,
) -> f64 {
    let theory = mmc_metrics(arrivals_per_hour / 3_600.0, 1.0 / service_time_secs, servers);
    theory.ws * utilization_factor
}
