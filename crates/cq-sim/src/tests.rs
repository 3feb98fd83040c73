//! Integration tests for cq-sim.

use cq_core::{CheckoutStation, DayType, Metrics, PaymentMethod, SimTime};

use crate::{Engine, EngineBuilder, EventKind, SimObserver, SimParams, SimulationEvent};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn params(arrival_rate: f64, minutes: f64) -> SimParams {
    SimParams {
        arrival_rate,
        simulation_duration: minutes,
        ..SimParams::default()
    }
}

fn mixed_layout() -> Vec<CheckoutStation> {
    vec![
        CheckoutStation::regular(1, 82.0),
        CheckoutStation::regular(2, 82.0),
        CheckoutStation::kiosk(3, 98.0).with_max_queue_length(3),
        CheckoutStation::kiosk(4, 98.0),
    ]
}

/// Everyone waiting or in service, counted from the station side.
fn people_in_queues(engine: &Engine) -> usize {
    engine.main_queue().len()
        + engine
            .stations()
            .iter()
            .map(|s| s.queue.len() + usize::from(s.is_busy()))
            .sum::<usize>()
}

#[derive(Default)]
struct Recorder {
    events:     Vec<SimulationEvent>,
    end_calls:  usize,
    final_time: Option<SimTime>,
}

impl SimObserver for Recorder {
    fn on_event(&mut self, event: &SimulationEvent, _metrics: &Metrics) {
        self.events.push(*event);
    }

    fn on_sim_end(&mut self, end: SimTime, _metrics: &Metrics) {
        self.end_calls += 1;
        self.final_time = Some(end);
    }
}

// ── EventQueue ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_queue {
    use super::*;
    use crate::EventQueue;

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.push(SimTime(30.0), EventKind::Arrival);
        q.push(SimTime(10.0), EventKind::RetryArrival);
        q.push(SimTime(20.0), EventKind::Arrival);
        assert_eq!(q.peek_time(), Some(SimTime(10.0)));

        let times: Vec<f64> = std::iter::from_fn(|| q.pop()).map(|e| e.time.secs()).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
        assert!(q.is_empty());
    }

    #[test]
    fn equal_times_pop_in_insertion_order() {
        let mut q = EventQueue::new();
        let first = q.push(SimTime(5.0), EventKind::Arrival);
        let second = q.push(SimTime(5.0), EventKind::RetryArrival);
        let third = q.push(SimTime(5.0), EventKind::Arrival);
        assert_eq!(q.pop().map(|e| e.id), Some(first));
        assert_eq!(q.pop().map(|e| e.id), Some(second));
        assert_eq!(q.pop().map(|e| e.id), Some(third));
    }

    #[test]
    fn clear_empties_queue() {
        let mut q = EventQueue::new();
        q.push(SimTime(1.0), EventKind::Arrival);
        q.clear();
        assert_eq!(q.len(), 0);
        assert!(q.pop().is_none());
    }
}

// ── EngineBuilder validation ──────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;
    use crate::{EngineTuning, SimError};

    #[test]
    fn builds_successfully_with_defaults() {
        let engine = EngineBuilder::new(mixed_layout(), SimParams::default()).build().unwrap();
        assert_eq!(engine.stations().len(), 4);
        assert_eq!(engine.pending_events(), 1);
        assert_eq!(engine.profile().avg_service_time, 82.0);
    }

    #[test]
    fn weekend_uses_weekend_profile() {
        let p = SimParams { day_type: DayType::Weekend, ..SimParams::default() };
        let engine = EngineBuilder::new(mixed_layout(), p).build().unwrap();
        assert_eq!(engine.profile().avg_service_time, 49.0);
    }

    #[test]
    fn negative_arrival_rate_errors() {
        let result = EngineBuilder::new(mixed_layout(), params(-1.0, 30.0)).build();
        assert!(matches!(result, Err(SimError::InvalidParam { what: "arrival rate", .. })));
    }

    #[test]
    fn non_finite_service_time_errors() {
        let p = SimParams { service_time_regular: f64::NAN, ..SimParams::default() };
        assert!(EngineBuilder::new(mixed_layout(), p).build().is_err());
    }

    #[test]
    fn duplicate_station_ids_error() {
        let stations = vec![CheckoutStation::regular(1, 82.0), CheckoutStation::kiosk(1, 98.0)];
        let result = EngineBuilder::new(stations, SimParams::default()).build();
        assert!(matches!(result, Err(SimError::DuplicateStation(id)) if id.0 == 1));
    }

    #[test]
    fn inverted_service_bounds_error() {
        let tuning = EngineTuning { min_service_secs: 400.0, ..EngineTuning::default() };
        let result = EngineBuilder::new(mixed_layout(), SimParams::default()).tuning(tuning).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn params_from_weekend_profile() {
        let p = SimParams::from_profile(&cq_core::StoreProfile::weekend());
        assert_eq!(p.day_type, DayType::Weekend);
        assert!((p.arrival_rate - 37.0 / 8.0).abs() < 1e-12);
        assert_eq!(p.service_time_regular, 49.0);
        assert_eq!(p.service_time_kiosk, 59.0);
        assert_eq!(p.seed, SimParams::default().seed);
    }

    #[test]
    fn kiosk_choice_defaults() {
        let tuning = EngineTuning::default();
        assert_eq!(tuning.small_basket_items, 10);
        assert_eq!(tuning.cash_kiosk_queue_tolerance, 2);
        assert_eq!(tuning.cash_kiosk_penalty, 5.0);
    }

    #[test]
    fn empty_layout_is_accepted() {
        assert!(EngineBuilder::new(Vec::new(), SimParams::default()).build().is_ok());
    }
}

// ── Engine stepping ───────────────────────────────────────────────────────────

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn fresh_engine_state() {
        let engine = Engine::new(mixed_layout(), SimParams::default());
        assert_eq!(engine.current_time(), SimTime::ZERO);
        assert_eq!(engine.pending_events(), 1);
        assert!(engine.customers().is_empty());
        assert!(engine.main_queue().is_empty());

        let m = engine.current_metrics();
        assert_eq!(m.total_customers_served, 0);
        assert_eq!(m.customers_in_system, 0);
        assert_eq!(m.utilization, 0.0);
        // Idle store: 100·0.6 + 100·0.2 + 70·0.15 + 100·0.05.
        assert!((m.satisfaction - 95.5).abs() < 1e-9);
        // Only the wait component scores: 100·0.4.
        assert!((m.score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn customers_in_system_is_conserved() {
        let mut engine = Engine::new(mixed_layout(), params(90.0, 60.0));
        loop {
            let more = engine.step();
            let m = engine.current_metrics();
            assert_eq!(people_in_queues(&engine), m.customers_in_system);
            let unfinished = engine.customers().iter().filter(|c| c.is_in_system()).count();
            assert_eq!(unfinished, m.customers_in_system);
            if !more {
                break;
            }
        }
    }

    #[test]
    fn time_is_monotonic() {
        let mut engine = Engine::new(mixed_layout(), params(60.0, 45.0));
        let mut last = engine.current_time();
        while engine.step() {
            assert!(engine.current_time() >= last);
            last = engine.current_time();
        }
        assert!(engine.current_time() >= last);
    }

    /// One register at 200 arrivals per hour for four hours: waits far past
    /// the cap occur, and only the published average is capped.
    #[test]
    fn average_wait_caps_each_customer_at_thirty_minutes() {
        let mut long_wait_seen = false;
        for seed in [42, 7, 2024] {
            let p = SimParams { seed, ..params(200.0, 240.0) };
            let mut engine = Engine::new(vec![CheckoutStation::regular(1, 82.0)], p);
            while engine.step() {}

            let served: Vec<_> = engine.customers().iter().filter(|c| c.is_served()).collect();
            assert!(!served.is_empty());
            let m = engine.current_metrics();
            assert_eq!(m.total_customers_served, served.len() as u64);

            let mut capped_sum = 0.0;
            for c in &served {
                let service = c.service_duration().unwrap();
                assert!((10.0 - 1e-6..=360.0 + 1e-6).contains(&service), "service {service}");

                let wait = c.wait_time.unwrap();
                assert!(wait >= 0.0);
                let start = c.service_start.unwrap();
                assert!((start - c.arrival_time - wait).abs() < 1e-9);

                long_wait_seen |= wait > 1_800.0;
                capped_sum += wait.min(1_800.0);
            }
            let expected = capped_sum / served.len() as f64;
            assert!(
                (m.average_wait_time - expected).abs() < 1e-6,
                "seed {seed}: average {} vs capped mean {expected}",
                m.average_wait_time
            );
            assert!(m.average_wait_time <= 1_800.0);
        }
        // Customer records keep the raw wait.
        assert!(long_wait_seen);
    }

    #[test]
    fn cash_customers_never_prefer_kiosks() {
        let mut engine = Engine::new(mixed_layout(), params(200.0, 60.0));
        while engine.step() {}
        assert!(engine.customers().iter().any(|c| c.payment == PaymentMethod::Cash));
        for c in engine.customers() {
            if c.payment == PaymentMethod::Cash {
                assert!(!c.prefers_self_checkout);
            }
            if c.item_count >= 5 {
                assert!(!c.prefers_self_checkout);
            }
            assert!(c.item_count >= 1);
        }
    }

    #[test]
    fn kiosk_queues_respect_capacity() {
        let mut engine = Engine::new(mixed_layout(), params(240.0, 60.0));
        loop {
            let more = engine.step();
            for s in engine.stations().iter().filter(|s| s.is_kiosk()) {
                assert!(s.queue.len() <= s.capacity(5), "kiosk {} over capacity", s.id);
            }
            if !more {
                break;
            }
        }
    }

    #[test]
    fn reset_matches_fresh_engine() {
        let p = params(60.0, 30.0);
        let mut engine = Engine::new(mixed_layout(), p.clone());
        for _ in 0..50 {
            engine.step();
        }
        engine.reset();

        let fresh = Engine::new(mixed_layout(), p);
        assert_eq!(engine.current_metrics(), fresh.current_metrics());
        assert_eq!(engine.current_time(), SimTime::ZERO);
        assert!(engine.customers().is_empty());
        assert!(engine.stations().iter().all(|s| s.queue.is_empty() && !s.is_busy()));
        assert_eq!(engine.pending_events(), 1);
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut engine = Engine::new(mixed_layout(), params(80.0, 60.0));
            while engine.step() {}
            (engine.current_metrics(), engine.customers().to_vec())
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn store_full_defers_arrivals() {
        let p = SimParams { max_customers: 1, ..params(300.0, 30.0) };
        let mut engine = Engine::new(vec![CheckoutStation::regular(1, 82.0)], p);
        let mut recorder = Recorder::default();
        engine.run(&mut recorder);

        assert!(recorder.events.iter().any(|e| e.kind == EventKind::RetryArrival));
        assert!(engine.customers().len() > 1);
        assert!(engine.current_metrics().customers_in_system <= 1);
    }

    #[test]
    fn no_stations_accumulates_main_queue() {
        let mut engine = Engine::new(Vec::new(), params(120.0, 60.0));
        while engine.step() {
            assert!(engine.main_queue().len() <= 15);
        }
        let m = engine.current_metrics();
        assert_eq!(m.total_customers_served, 0);
        assert!(!engine.main_queue().is_empty());
        assert_eq!(m.utilization, 0.0);
    }

    #[test]
    fn metrics_stay_in_bounds() {
        let mut engine = Engine::new(vec![CheckoutStation::regular(1, 82.0)], params(200.0, 60.0));
        while engine.step() {
            let m = engine.current_metrics();
            assert!(m.utilization <= 0.99);
            assert!((0.0..=100.0).contains(&m.satisfaction));
            assert!((0.0..=100.0).contains(&m.score));
            assert!(m.average_wait_time <= 1_800.0);
            assert!(m.throughput >= 0.0);
        }
        // Overloaded single register: some customers give up.
        assert!(engine.current_metrics().total_customers_abandoned > 0);
    }

    #[test]
    fn station_queue_lookup() {
        let engine = Engine::new(mixed_layout(), SimParams::default());
        assert_eq!(engine.station_queue(cq_core::StationId(3)).map(|q| q.len()), Some(0));
        assert!(engine.station_queue(cq_core::StationId(99)).is_none());
        assert_eq!(engine.queue_lengths().len(), 4);
    }

    #[test]
    fn theoretical_metrics_use_open_registers() {
        let engine = Engine::new(mixed_layout(), SimParams::default());
        let theory = engine.theoretical_metrics();
        assert!(theory.stable);
        let expected = 26.0 / 3_600.0 * 82.0 / 2.0;
        assert!((theory.utilization - expected).abs() < 1e-12);

        let closed = vec![CheckoutStation::regular(1, 82.0).inactive()];
        assert!(!Engine::new(closed, SimParams::default()).theoretical_metrics().stable);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn run_reports_every_event_and_ends_once() {
        let mut engine = Engine::new(mixed_layout(), params(60.0, 30.0));
        let mut recorder = Recorder::default();
        let final_metrics = engine.run(&mut recorder);

        assert_eq!(recorder.end_calls, 1);
        assert_eq!(recorder.final_time, Some(engine.current_time()));
        assert!(!recorder.events.is_empty());
        assert!(recorder.events.windows(2).all(|w| w[0].time <= w[1].time));
        assert_eq!(final_metrics, engine.current_metrics());
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;
    use crate::{EngineTuning, NoopObserver};
    use cq_core::{SimRng, StoreProfile};

    /// One register at 82 s, 26 arrivals per hour, 30 minutes.
    #[test]
    fn single_register_half_hour() {
        let p = SimParams {
            arrival_rate:         26.0,
            service_time_regular: 82.0,
            simulation_duration:  30.0,
            ..SimParams::default()
        };
        let mut engine = Engine::new(vec![CheckoutStation::regular(1, 82.0)], p);
        while engine.step() {}

        let m = engine.current_metrics();
        let finished = m.total_customers_served + m.total_customers_abandoned;
        assert!(finished <= engine.arrivals_generated());
        assert_eq!(engine.arrivals_generated() - finished, m.customers_in_system as u64);
        assert!(m.average_wait_time.is_finite());
        assert!(m.average_wait_time >= 0.0);
    }

    /// Without kiosks, kiosk-preferring customers fall back to the main queue.
    #[test]
    fn no_kiosks_sends_preferring_customers_to_main_queue() {
        let p = SimParams {
            day_type: DayType::Weekend,
            ..params(150.0, 60.0)
        };
        let mut engine = Engine::new(vec![CheckoutStation::regular(1, 49.0)], p);

        let mut preferring_seen_in_main_queue = false;
        while engine.step() {
            preferring_seen_in_main_queue |=
                engine.main_queue().iter().any(|c| c.prefers_self_checkout && c.in_main_queue);
        }

        assert!(engine.customers().iter().any(|c| c.prefers_self_checkout));
        assert!(preferring_seen_in_main_queue);
        // Small non-cash baskets are the only ones that may prefer a kiosk.
        for c in engine.customers().iter().filter(|c| c.prefers_self_checkout) {
            assert_ne!(c.payment, PaymentMethod::Cash);
            assert!(c.item_count < 5);
        }
    }

    /// Card or voucher customers with fewer than five items prefer a kiosk
    /// with probability 0.55.
    #[test]
    fn self_checkout_preference_rate() {
        let layout = vec![
            CheckoutStation::regular(1, 49.0),
            CheckoutStation::regular(2, 49.0),
            CheckoutStation::regular(3, 49.0),
            CheckoutStation::regular(4, 49.0),
            CheckoutStation::kiosk(5, 59.0),
            CheckoutStation::kiosk(6, 59.0),
        ];
        let p = SimParams { day_type: DayType::Weekend, ..params(300.0, 240.0) };
        let mut engine = Engine::new(layout, p);
        while engine.step() {}

        let eligible: Vec<_> = engine
            .customers()
            .iter()
            .filter(|c| c.payment != PaymentMethod::Cash && c.item_count < 5)
            .collect();
        assert!(eligible.len() > 500, "only {} eligible customers", eligible.len());

        let preferring = eligible.iter().filter(|c| c.prefers_self_checkout).count();
        let rate = preferring as f64 / eligible.len() as f64;
        assert!((rate - 0.55).abs() < 0.06, "preference rate {rate}");
    }

    /// Kiosk-only floor under heavy load: crowded kiosk queues shed their
    /// last customer, and no queue ever exceeds its capacity.
    #[test]
    fn crowded_kiosks_lose_customers() {
        let layout = vec![
            CheckoutStation::kiosk(1, 98.0).with_max_queue_length(3),
            CheckoutStation::kiosk(2, 98.0).with_max_queue_length(3),
        ];
        // Main-queue balking off: every abandonment comes from a kiosk.
        let tuning = EngineTuning {
            main_queue_hard_limit: usize::MAX,
            main_queue_soft_limit: usize::MAX,
            ..EngineTuning::default()
        };
        let p = SimParams { day_type: DayType::Weekend, ..params(300.0, 120.0) };
        let mut engine = EngineBuilder::new(layout, p).tuning(tuning).build().unwrap();

        loop {
            let more = engine.step();
            for s in engine.stations() {
                assert!(s.queue.len() <= 3, "kiosk {} holds {}", s.id, s.queue.len());
            }
            if !more {
                break;
            }
        }

        let m = engine.current_metrics();
        assert!(m.total_customers_abandoned > 0);
        let abandoned = engine.customers().iter().filter(|c| c.abandoned).count() as u64;
        assert_eq!(abandoned, m.total_customers_abandoned);
        // Nobody left from the main queue.
        assert!(engine.customers().iter().filter(|c| c.abandoned).all(|c| c.prefers_self_checkout));
    }

    /// Kiosk choice depends on the tuned small-basket weighting.
    #[test]
    fn small_basket_weighting_changes_kiosk_choice() {
        let layout = || vec![CheckoutStation::kiosk(1, 60.0), CheckoutStation::kiosk(2, 180.0)];
        let p = SimParams { day_type: DayType::Weekend, ..params(200.0, 120.0) };
        let run = |tuning: EngineTuning| {
            let mut engine = EngineBuilder::new(layout(), p.clone()).tuning(tuning).build().unwrap();
            while engine.step() {}
            engine.customers().to_vec()
        };

        let eager = EngineTuning { self_checkout_probability: 1.0, ..EngineTuning::default() };
        let flat = EngineTuning { small_basket_items: 0, ..eager.clone() };
        assert_ne!(run(eager), run(flat));
    }

    #[test]
    fn replications_share_the_engine_profile() {
        let p = params(60.0, 30.0);
        let profile = StoreProfile {
            avg_service_time:       150.0,
            avg_items_per_customer: 8.0,
            ..StoreProfile::weekday()
        };
        let engine = EngineBuilder::new(mixed_layout(), p.clone())
            .profile(profile.clone())
            .build()
            .unwrap();
        let summary = engine.replicate(3);
        assert_eq!(summary.runs, 3);
        assert_eq!(engine.current_time(), SimTime::ZERO);

        let mut master = SimRng::new(p.seed);
        for run in &summary.per_run {
            let seed = master.next_seed();
            let mut single = EngineBuilder::new(mixed_layout(), SimParams { seed, ..p.clone() })
                .profile(profile.clone())
                .build()
                .unwrap();
            assert_eq!(&single.run(&mut NoopObserver), run);
        }

        let builtin = crate::replicate(&mixed_layout(), &p, &EngineTuning::default(), 3).unwrap();
        assert_ne!(summary, builtin);
    }

    #[test]
    fn replications_are_reproducible() {
        let layout = mixed_layout();
        let p = params(60.0, 30.0);
        let tuning = EngineTuning::default();
        let a = crate::replicate(&layout, &p, &tuning, 4).unwrap();
        let b = crate::replicate(&layout, &p, &tuning, 4).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.runs, 4);
        assert_eq!(a.per_run.len(), 4);
        assert!(a.wait_time_std_dev >= 0.0);
    }

    #[test]
    fn replications_propagate_validation_errors() {
        let p = params(f64::INFINITY, 30.0);
        assert!(crate::replicate(&mixed_layout(), &p, &EngineTuning::default(), 2).is_err());
    }
}
