//! Engine observer trait for progress reporting and data collection.

use cq_core::{Metrics, SimTime};

use crate::SimulationEvent;

/// Callbacks invoked by [`Engine::run`][crate::Engine::run].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ServedPrinter;
///
/// impl SimObserver for ServedPrinter {
///     fn on_event(&mut self, event: &SimulationEvent, metrics: &Metrics) {
///         if matches!(event.kind, EventKind::ServiceEnd { .. }) {
///             println!("{}: {} served", event.time, metrics.total_customers_served);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after each event has been applied and metrics recomputed.
    fn on_event(&mut self, _event: &SimulationEvent, _metrics: &Metrics) {}

    /// Called once when the run stops, with the final clock and metrics.
    fn on_sim_end(&mut self, _end: SimTime, _metrics: &Metrics) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
