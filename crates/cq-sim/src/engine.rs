//! The `Engine` struct and its event loop.

use std::cmp::Reverse;
use std::collections::VecDeque;

use cq_core::{
    CheckoutStation, Customer, CustomerId, Metrics, PaymentMethod, SimRng, SimTime, StationId,
    StoreProfile,
};
use cq_theory::{
    compare, mmc_metrics, overall_score, Comparison, MmcMetrics, SatisfactionInputs,
    SatisfactionWeights, ScoreWeights,
};
use tracing::{debug, info, trace};

use crate::{EngineTuning, EventKind, EventQueue, SimObserver, SimParams, SimulationEvent};

// ── Accumulators ──────────────────────────────────────────────────────────────

/// Running sums behind the published averages.
#[derive(Clone, Debug, Default)]
struct Accumulators {
    /// Σ queue_length · Δt
    queue_length_time:     f64,
    /// Σ instantaneous_utilization · Δt
    utilization_time:      f64,
    last_update:           SimTime,
    /// Σ min(wait, cap) over served customers.
    capped_wait_sum:       f64,
    served:                u64,
    previous_satisfaction: Option<f64>,
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Discrete-event simulation of a checkout area.
///
/// Regular registers are fed from one centralized main queue; kiosks keep
/// their own bounded queues.  Every call to [`step`][Engine::step] fires the
/// earliest pending event:
///
/// - **Arrival**: generate a customer, route it (kiosk or main queue), apply
///   balking, drain the main queue into idle registers, schedule the next
///   arrival.
/// - **RetryArrival**: the store was at `max_customers`; try again.
/// - **ServiceEnd**: free the station and pull its next customer, or drain
///   the main queue if it is an idle register.
///
/// Metrics are recomputed after every event.  The engine owns all mutable
/// state; callers read it through the accessor methods.
///
/// Create with [`Engine::new`] or, for validated input and custom tuning,
/// [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    params:               SimParams,
    tuning:               EngineTuning,
    profile:              StoreProfile,
    satisfaction_weights: SatisfactionWeights,
    score_weights:        ScoreWeights,

    rng:          SimRng,
    stations:     Vec<CheckoutStation>,
    /// Indexed by `CustomerId`.
    customers:    Vec<Customer>,
    main_queue:   VecDeque<CustomerId>,
    events:       EventQueue,
    current_time: SimTime,
    metrics:      Metrics,
    acc:          Accumulators,
    /// Customers without a `service_end`.
    in_system:    usize,
}

impl Engine {
    /// An engine with the built-in calibration for `params.day_type` and
    /// default tuning, reset and ready to step.
    ///
    /// Any station list is accepted; with no open register customers simply
    /// accumulate in the main queue.
    pub fn new(stations: Vec<CheckoutStation>, params: SimParams) -> Self {
        let profile = StoreProfile::builtin(params.day_type);
        Self::from_parts(
            stations,
            params,
            EngineTuning::default(),
            profile,
            SatisfactionWeights::default(),
            ScoreWeights::default(),
        )
    }

    pub(crate) fn from_parts(
        stations:             Vec<CheckoutStation>,
        params:               SimParams,
        tuning:               EngineTuning,
        profile:              StoreProfile,
        satisfaction_weights: SatisfactionWeights,
        score_weights:        ScoreWeights,
    ) -> Self {
        let mut engine = Self {
            rng: SimRng::new(params.seed),
            params,
            tuning,
            profile,
            satisfaction_weights,
            score_weights,
            stations,
            customers:    Vec::new(),
            main_queue:   VecDeque::new(),
            events:       EventQueue::new(),
            current_time: SimTime::ZERO,
            metrics:      Metrics::default(),
            acc:          Accumulators::default(),
            in_system:    0,
        };
        engine.reset();
        engine
    }

    /// Same configuration, different seed, freshly reset.
    pub(crate) fn reseeded(&self, seed: u64) -> Self {
        Self::from_parts(
            self.stations.clone(),
            SimParams { seed, ..self.params.clone() },
            self.tuning.clone(),
            self.profile.clone(),
            self.satisfaction_weights.clone(),
            self.score_weights.clone(),
        )
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Return to the just-constructed state: empty queues, no customers,
    /// time zero, RNG re-seeded, one arrival scheduled.
    pub fn reset(&mut self) {
        self.rng = SimRng::new(self.params.seed);
        self.events.clear();
        self.current_time = SimTime::ZERO;
        self.customers.clear();
        self.main_queue.clear();
        self.metrics = Metrics::default();
        self.acc = Accumulators::default();
        self.in_system = 0;
        for station in &mut self.stations {
            station.clear();
        }

        self.schedule_next_arrival();
        self.update_metrics();
    }

    /// Fire the next event.
    ///
    /// Returns `true` while events remain and the clock is still below the
    /// configured duration.  Calling it after it returned `false` is
    /// harmless: with no events it does nothing, otherwise it keeps
    /// processing past the end of the run.
    pub fn step(&mut self) -> bool {
        if self.advance().is_none() {
            return false;
        }
        self.has_more()
    }

    /// Step until the run ends, reporting every event to `observer`.
    ///
    /// Returns the final metrics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> Metrics {
        let end = self.params.duration_secs();
        while self.current_time.secs() < end {
            let Some(event) = self.advance() else { break };
            observer.on_event(&event, &self.metrics);
        }
        observer.on_sim_end(self.current_time, &self.metrics);

        info!(
            time      = %self.current_time,
            arrivals  = self.customers.len(),
            served    = self.metrics.total_customers_served,
            abandoned = self.metrics.total_customers_abandoned,
            avg_wait  = self.metrics.average_wait_time,
            "simulation finished",
        );
        self.metrics.clone()
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Seconds since the start of the run.
    #[inline]
    pub fn current_time(&self) -> SimTime {
        self.current_time
    }

    pub fn current_metrics(&self) -> Metrics {
        self.metrics.clone()
    }

    /// Every customer generated so far, in arrival order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id.index())
    }

    pub fn stations(&self) -> &[CheckoutStation] {
        &self.stations
    }

    pub fn station(&self, id: StationId) -> Option<&CheckoutStation> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// Customers waiting in the main queue, front first.
    pub fn main_queue(&self) -> Vec<Customer> {
        self.main_queue
            .iter()
            .map(|&id| self.customers[id.index()].clone())
            .collect()
    }

    /// Customers waiting at `station`, front first.  `None` for an unknown id.
    pub fn station_queue(&self, station: StationId) -> Option<Vec<Customer>> {
        let station = self.station(station)?;
        Some(
            station
                .queue
                .iter()
                .map(|&id| self.customers[id.index()].clone())
                .collect(),
        )
    }

    /// `(station, queue length)` for every station, in construction order.
    pub fn queue_lengths(&self) -> Vec<(StationId, usize)> {
        self.stations.iter().map(|s| (s.id, s.queue.len())).collect()
    }

    /// Real (non-retry) arrivals processed so far.
    pub fn arrivals_generated(&self) -> u64 {
        self.customers.len() as u64
    }

    /// Events waiting to fire.
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn tuning(&self) -> &EngineTuning {
        &self.tuning
    }

    pub fn profile(&self) -> &StoreProfile {
        &self.profile
    }

    /// M/M/c prediction for the open registers at the configured arrival
    /// rate and regular service time.  Times are in seconds.
    pub fn theoretical_metrics(&self) -> MmcMetrics {
        let servers = self
            .stations
            .iter()
            .filter(|s| s.is_active && s.is_regular())
            .count() as u32;
        let mu = if self.params.service_time_regular > 0.0 {
            1.0 / self.params.service_time_regular
        } else {
            0.0
        };
        mmc_metrics(self.params.arrival_rate_per_sec(), mu, servers)
    }

    /// Current metrics measured against [`theoretical_metrics`][Self::theoretical_metrics].
    pub fn comparison(&self) -> Comparison {
        compare(&self.theoretical_metrics(), &self.metrics)
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    fn has_more(&self) -> bool {
        !self.events.is_empty() && self.current_time.secs() < self.params.duration_secs()
    }

    /// Pop, apply, and re-measure.  `None` when no events remain.
    fn advance(&mut self) -> Option<SimulationEvent> {
        let event = self.events.pop()?;
        self.current_time = event.time;
        trace!(time = %event.time, kind = ?event.kind, "event");

        match event.kind {
            EventKind::Arrival => self.process_arrival(),
            EventKind::RetryArrival => self.schedule_next_arrival(),
            EventKind::ServiceEnd { customer, station } => {
                self.process_service_end(customer, station)
            }
        }

        self.update_metrics();
        Some(event)
    }

    fn schedule_next_arrival(&mut self) {
        let now = self.current_time;
        if self.in_system >= self.params.max_customers {
            debug!(in_system = self.in_system, "store full, deferring arrival");
            self.events.push(now + self.tuning.retry_delay_secs, EventKind::RetryArrival);
            return;
        }

        let gap = self
            .rng
            .bounded_exponential(self.params.arrival_rate_per_sec(), self.tuning.max_exponential_multiple);
        let at = now + gap;
        if at.secs() < self.params.duration_secs() {
            self.events.push(at, EventKind::Arrival);
        }
    }

    fn process_arrival(&mut self) {
        let id = self.create_customer();

        let joined_kiosk = self.customers[id.index()].prefers_self_checkout && self.join_kiosk(id);
        if !joined_kiosk {
            self.join_main_queue(id);
        }

        self.balk_from_kiosks();
        self.balk_from_main_queue();
        self.process_main_queue();
        self.schedule_next_arrival();
    }

    fn process_service_end(&mut self, customer: CustomerId, station: StationId) {
        let Some(idx) = self.stations.iter().position(|s| s.id == station) else { return };
        let Some(served) = self.stations[idx].serving.take() else { return };
        if served != customer {
            debug!(%station, expected = %customer, actual = %served, "service end for a different customer");
        }
        self.finish(served);

        if !self.stations[idx].queue.is_empty() {
            self.start_service(idx);
        } else if self.stations[idx].is_regular() {
            self.process_main_queue();
        }
    }

    // ── Customers ─────────────────────────────────────────────────────────

    fn create_customer(&mut self) -> CustomerId {
        let id = CustomerId(self.customers.len() as u32);
        let tuning = &self.tuning;
        let profile = &self.profile;

        let noise = (self.rng.uniform() - 0.5) * tuning.item_noise_range;
        let item_count = (profile.avg_items_per_customer + noise).round().max(1.0) as u32;

        let payment = PaymentMethod::ALL
            .get(self.rng.weighted_index(&profile.payment.weights()))
            .copied()
            .unwrap_or(PaymentMethod::Card);

        let base_value = 25.0 + self.rng.uniform() * 100.0;
        let total_value =
            base_value + (item_count - 1) as f64 * (15.0 + self.rng.uniform() * 25.0);

        // Cash is only taken at staffed registers.
        let prefers_self_checkout = payment != PaymentMethod::Cash
            && item_count < tuning.self_checkout_item_limit
            && self.rng.gen_bool(tuning.self_checkout_probability);

        self.customers.push(Customer {
            id,
            arrival_time: self.current_time,
            item_count,
            payment,
            prefers_self_checkout,
            total_value,
            service_start: None,
            service_end: None,
            wait_time: None,
            abandoned: false,
            in_main_queue: false,
        });
        self.in_system += 1;
        id
    }

    /// Mark `id` as served now.
    fn finish(&mut self, id: CustomerId) {
        let now = self.current_time;
        let customer = &mut self.customers[id.index()];
        customer.service_end = Some(now);
        self.acc.capped_wait_sum += customer.wait_time.unwrap_or(0.0).min(self.tuning.max_wait_secs);
        self.acc.served += 1;
        self.in_system = self.in_system.saturating_sub(1);
    }

    /// Mark `id` as having left a queue unserved.
    fn abandon(&mut self, id: CustomerId) {
        let customer = &mut self.customers[id.index()];
        customer.service_end = Some(self.current_time);
        customer.abandoned = true;
        customer.in_main_queue = false;
        self.metrics.total_customers_abandoned += 1;
        self.in_system = self.in_system.saturating_sub(1);
    }

    // ── Routing ───────────────────────────────────────────────────────────

    fn join_main_queue(&mut self, id: CustomerId) {
        self.customers[id.index()].in_main_queue = true;
        self.main_queue.push_back(id);
    }

    /// Put `id` in the best kiosk queue with room.  `false` if none has room.
    fn join_kiosk(&mut self, id: CustomerId) -> bool {
        let Some(idx) = self.best_kiosk(id) else { return false };
        let station = &mut self.stations[idx];
        station.queue.push_back(id);
        self.metrics.peak_queue_length = self.metrics.peak_queue_length.max(station.queue.len());
        debug!(customer = %id, station = %station.id, "joined kiosk queue");
        if !station.is_busy() {
            self.start_service(idx);
        }
        true
    }

    /// Open kiosk with room that maximizes the customer's preference score:
    /// fewer people queued and a shorter estimated wait score higher.
    fn best_kiosk(&self, id: CustomerId) -> Option<usize> {
        let customer = &self.customers[id.index()];
        let mut best: Option<(usize, f64)> = None;

        for (idx, station) in self.stations.iter().enumerate() {
            if !station.is_active || !station.is_kiosk() {
                continue;
            }
            let queued = station.queue.len();
            if queued >= station.capacity(self.tuning.default_kiosk_capacity) {
                continue;
            }

            let in_service = usize::from(station.is_busy());
            let estimated_wait = (queued + in_service) as f64 * station.service_time_mean;
            let mut preference = if customer.item_count <= self.tuning.small_basket_items {
                -2.0 * queued as f64
            } else {
                -(queued as f64)
            };
            if customer.payment == PaymentMethod::Cash && queued > self.tuning.cash_kiosk_queue_tolerance {
                preference -= self.tuning.cash_kiosk_penalty;
            }

            let score = preference - estimated_wait / 60.0;
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Idle open register with the lowest weighted score of estimated wait,
    /// queue penalty, service-speed deviation, and a random tie-break.
    fn best_register(&mut self) -> Option<usize> {
        let tuning = &self.tuning;
        let mut best: Option<(usize, f64)> = None;

        for (idx, station) in self.stations.iter().enumerate() {
            if !station.is_active || !station.is_regular() || station.is_busy() {
                continue;
            }
            let queued = station.queue.len() as f64;
            let mean = station.service_time_mean;
            let score = queued * mean
                + queued * tuning.register_queue_penalty
                + (mean - tuning.register_baseline_service) * tuning.register_service_weight
                + self.rng.uniform() * tuning.register_jitter;

            if best.is_none_or(|(_, top)| score < top) {
                best = Some((idx, score));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Move up to one batch of customers from the main queue to idle
    /// registers, then rebalance register queues.
    fn process_main_queue(&mut self) {
        let batch = self.tuning.main_queue_batch.min(self.main_queue.len());
        let mut processed = 0;

        while processed < batch {
            let Some(register) = self.best_register() else { break };
            let Some(id) = self.main_queue.pop_front() else { break };
            self.customers[id.index()].in_main_queue = false;
            processed += 1;

            if self.redirect_to_kiosk(id) {
                continue;
            }

            let station = &mut self.stations[register];
            station.queue.push_back(id);
            self.metrics.peak_queue_length = self.metrics.peak_queue_length.max(station.queue.len());
            if !station.is_busy() {
                self.start_service(register);
            }
        }

        self.rebalance_registers();
    }

    /// Last chance for a kiosk-preferring customer leaving the main queue:
    /// take a kiosk with at most `redirect_max_queue` people waiting.
    fn redirect_to_kiosk(&mut self, id: CustomerId) -> bool {
        let customer = &self.customers[id.index()];
        if !customer.prefers_self_checkout || customer.item_count > self.tuning.redirect_max_items {
            return false;
        }
        let Some(idx) = self.best_kiosk(id) else { return false };
        if self.stations[idx].queue.len() > self.tuning.redirect_max_queue {
            return false;
        }

        let station = &mut self.stations[idx];
        station.queue.push_back(id);
        debug!(customer = %id, station = %station.id, "redirected to kiosk");
        if !station.is_busy() {
            self.start_service(idx);
        }
        true
    }

    /// Move one customer from the back of the longest register queue to the
    /// front of the shortest when the gap is large and the short one is idle.
    fn rebalance_registers(&mut self) {
        let mut registers: Vec<usize> = (0..self.stations.len())
            .filter(|&i| self.stations[i].is_active && self.stations[i].is_regular())
            .collect();
        if registers.len() <= 1 {
            return;
        }
        registers.sort_by_key(|&i| Reverse(self.stations[i].queue.len()));

        let (Some(&longest), Some(&shortest)) = (registers.first(), registers.last()) else {
            return;
        };
        let long_len = self.stations[longest].queue.len();
        let short_len = self.stations[shortest].queue.len();

        if long_len.saturating_sub(short_len) > self.tuning.rebalance_gap
            && !self.stations[shortest].is_busy()
            && long_len > self.tuning.rebalance_min_queue
        {
            let Some(id) = self.stations[longest].queue.pop_back() else { return };
            self.stations[shortest].queue.push_front(id);
            debug!(
                customer = %id,
                from     = %self.stations[longest].id,
                to       = %self.stations[shortest].id,
                "rebalanced register queues",
            );
            self.start_service(shortest);
        }
    }

    // ── Balking ───────────────────────────────────────────────────────────

    fn balk_from_kiosks(&mut self) {
        for idx in 0..self.stations.len() {
            let station = &self.stations[idx];
            if !station.is_active || !station.is_kiosk() {
                continue;
            }
            let capacity = station.capacity(self.tuning.default_kiosk_capacity) as f64;
            let crowded = station.queue.len() as f64 > capacity * self.tuning.kiosk_balk_occupancy;
            if crowded && self.rng.gen_bool(self.tuning.kiosk_balk_probability) {
                if let Some(id) = self.stations[idx].queue.pop_back() {
                    debug!(customer = %id, station = %self.stations[idx].id, "balked from kiosk queue");
                    self.abandon(id);
                }
            }
        }
    }

    fn balk_from_main_queue(&mut self) {
        let tuning = &self.tuning;
        let waiting = self.main_queue.len()
            + self
                .stations
                .iter()
                .filter(|s| s.is_active)
                .map(|s| s.queue.len())
                .sum::<usize>();

        let too_long = self.main_queue.len() > tuning.main_queue_hard_limit;
        let threshold =
            tuning.balk_threshold_base + waiting.min(tuning.balk_occupancy_cap) as f64 / 100.0;
        let draw = self.rng.uniform();

        if (too_long || draw > threshold) && self.main_queue.len() > tuning.main_queue_soft_limit {
            if let Some(id) = self.main_queue.pop_back() {
                debug!(customer = %id, waiting, "balked from main queue");
                self.abandon(id);
            }
        }
    }

    // ── Service ───────────────────────────────────────────────────────────

    /// Begin serving the front of station `idx`'s queue.  No-op when empty.
    fn start_service(&mut self, idx: usize) {
        let Some(id) = self.stations[idx].queue.pop_front() else { return };
        let now = self.current_time;

        let station = &mut self.stations[idx];
        station.serving = Some(id);
        let station_id = station.id;
        let is_kiosk = station.is_kiosk();

        let customer = &mut self.customers[id.index()];
        customer.service_start = Some(now);
        customer.wait_time = Some(now - customer.arrival_time);
        let (payment, items) = (customer.payment, customer.item_count);

        let duration = self.sample_service_time(is_kiosk, payment, items);
        self.events.push(
            now + duration,
            EventKind::ServiceEnd { customer: id, station: station_id },
        );
    }

    /// Exponential draw around the profile's mean, scaled by station kind,
    /// payment, basket size and jitter, clamped to the configured bounds.
    fn sample_service_time(&mut self, is_kiosk: bool, payment: PaymentMethod, items: u32) -> f64 {
        let tuning = &self.tuning;

        let mut base = self.profile.avg_service_time;
        if is_kiosk {
            base *= tuning.kiosk_service_factor;
        }

        let payment_factor = match payment {
            PaymentMethod::Cash    => tuning.cash_service_factor,
            PaymentMethod::Voucher => tuning.voucher_service_factor,
            PaymentMethod::Card    => 1.0,
        };
        let item_factor = 1.0 + items.saturating_sub(1) as f64 * tuning.per_item_factor;
        let jitter = 1.0 - tuning.service_jitter + self.rng.uniform() * 2.0 * tuning.service_jitter;

        let draw = self.rng.bounded_exponential(1.0 / base, tuning.max_exponential_multiple);
        (draw * payment_factor * item_factor * jitter)
            .max(tuning.min_service_secs)
            .min(tuning.max_service_secs)
    }

    // ── Metrics ───────────────────────────────────────────────────────────

    fn update_metrics(&mut self) {
        let now = self.current_time;
        let tuning = &self.tuning;
        let dt = now - self.acc.last_update;

        let queue_length = self.main_queue.len()
            + self.stations.iter().map(|s| s.queue.len()).sum::<usize>();
        let busy = self.stations.iter().filter(|s| s.is_busy()).count();
        let active = self.stations.iter().filter(|s| s.is_active).count();

        // Average wait over served customers, each capped.
        let served = self.acc.served;
        self.metrics.average_wait_time = if served > 0 {
            self.acc.capped_wait_sum / served as f64
        } else {
            0.0
        };

        // Time-weighted queue length.
        if dt > 0.0 {
            self.acc.queue_length_time += queue_length as f64 * dt;
        }
        let elapsed = now.secs().max(1.0);
        self.metrics.average_queue_length = self.acc.queue_length_time / elapsed;
        self.metrics.peak_queue_length = self.metrics.peak_queue_length.max(queue_length);

        // Utilization: busy share plus queue pressure, time-weighted, smoothed.
        let instantaneous = if active == 0 {
            0.0
        } else {
            let base = busy as f64 / active as f64;
            if queue_length > 0 {
                let pressure =
                    (queue_length as f64 * tuning.queue_pressure_per_person).min(tuning.max_queue_pressure);
                (base + pressure).min(tuning.max_utilization)
            } else {
                base
            }
        };
        if dt > 0.0 {
            self.acc.utilization_time += instantaneous * dt;
        }
        let raw = self.acc.utilization_time / elapsed;
        let previous = self.metrics.utilization;
        let smoothed = if previous > 0.0 {
            tuning.utilization_smoothing * previous + (1.0 - tuning.utilization_smoothing) * raw
        } else {
            raw
        };
        self.metrics.utilization = smoothed.min(tuning.max_utilization);

        // Throughput, with a capacity-bounded estimate during warm-up.
        let hours = now.hours();
        self.metrics.throughput = if hours >= tuning.warmup_hours {
            served as f64 / hours
        } else if served > 0 {
            let service_secs = if self.params.service_time_regular > 0.0 {
                self.params.service_time_regular
            } else {
                self.profile.avg_service_time
            };
            let capacity = active as f64 / (service_secs / 3_600.0);
            (capacity * tuning.warmup_capacity_fraction).min(served as f64 / tuning.warmup_hours)
        } else {
            0.0
        };

        self.metrics.total_customers_served = served;
        self.metrics.customers_in_system = queue_length + busy;

        // Satisfaction blend, smoothed against the previous value.
        let blended = self.satisfaction_weights.blend(&SatisfactionInputs {
            average_wait_secs: self.metrics.average_wait_time,
            queue_length,
            utilization:       self.metrics.utilization,
            served,
            abandoned:         self.metrics.total_customers_abandoned,
        });
        let satisfaction = match self.acc.previous_satisfaction {
            Some(prev) => {
                prev * tuning.satisfaction_smoothing + blended * (1.0 - tuning.satisfaction_smoothing)
            }
            None => blended,
        }
        .clamp(0.0, 100.0);
        self.metrics.satisfaction = satisfaction;
        self.acc.previous_satisfaction = Some(satisfaction);

        self.metrics.score = overall_score(
            self.metrics.average_wait_time / 60.0,
            self.metrics.utilization,
            self.metrics.throughput,
            self.params.arrival_rate,
            &self.score_weights,
        );

        self.acc.last_update = now;
    }
}
