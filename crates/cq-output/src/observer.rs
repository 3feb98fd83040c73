//! `MetricsObserver<W>` — samples engine metrics into an `OutputWriter`.

use cq_core::{Metrics, SimTime};
use cq_sim::{SimObserver, SimulationEvent};
use tracing::warn;

use crate::row::MetricsRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that records one [`MetricsRow`] per sampling interval
/// of simulated time, plus a final row at the end of the run.
///
/// The first event at or after each multiple of the interval is sampled, so
/// quiet stretches produce no rows.  Write errors are stored because observer
/// callbacks return nothing; check [`take_error`][Self::take_error] after
/// `engine.run()`.
pub struct MetricsObserver<W: OutputWriter> {
    writer:        W,
    interval_secs: f64,
    next_sample:   f64,
    last_written:  Option<f64>,
    rows_written:  usize,
    last_error:    Option<OutputError>,
}

impl<W: OutputWriter> MetricsObserver<W> {
    /// Sample every `interval_secs` simulated seconds.  A non-positive
    /// interval samples every event.
    pub fn new(writer: W, interval_secs: f64) -> Self {
        Self {
            writer,
            interval_secs: interval_secs.max(0.0),
            next_sample:   0.0,
            last_written:  None,
            rows_written:  0,
            last_error:    None,
        }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, time: SimTime, metrics: &Metrics) {
        let result = self.writer.write_metrics(&MetricsRow::sample(time, metrics));
        if result.is_ok() {
            self.rows_written += 1;
            self.last_written = Some(time.secs());
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "metrics output failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for MetricsObserver<W> {
    fn on_event(&mut self, event: &SimulationEvent, metrics: &Metrics) {
        let t = event.time.secs();
        if t < self.next_sample {
            return;
        }
        self.record(event.time, metrics);
        self.next_sample = if self.interval_secs > 0.0 {
            ((t / self.interval_secs).floor() + 1.0) * self.interval_secs
        } else {
            t
        };
    }

    fn on_sim_end(&mut self, end: SimTime, metrics: &Metrics) {
        if self.last_written != Some(end.secs()) {
            self.record(end, metrics);
        }
        let result = self.writer.finish();
        self.store_err(result);
    }
}
