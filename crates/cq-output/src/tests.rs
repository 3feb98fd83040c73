//! Tests for cq-output.

use cq_core::{CheckoutStation, EventId, Metrics, SimTime};
use cq_sim::{EventKind, SimObserver, SimParams, SimulationEvent};

use crate::row::{CustomerRow, MetricsRow};
use crate::writer::OutputWriter;
use crate::OutputResult;

fn metrics_row(time_secs: f64, served: u64) -> MetricsRow {
    MetricsRow {
        time_secs,
        average_wait_time:    42.0,
        average_queue_length: 1.5,
        utilization:          0.75,
        throughput:           20.0,
        served,
        abandoned:            1,
        satisfaction:         88.0,
        score:                61.0,
    }
}

fn customer_row(id: u32, served: bool) -> CustomerRow {
    CustomerRow {
        customer_id:   id,
        arrival_time:  10.0 * id as f64,
        item_count:    3,
        payment:       "card",
        prefers_kiosk: true,
        total_value:   77.5,
        service_start: served.then_some(10.0 * id as f64 + 5.0),
        service_end:   served.then_some(10.0 * id as f64 + 90.0),
        wait_time:     served.then_some(5.0),
        abandoned:     false,
    }
}

fn event_at(secs: f64) -> SimulationEvent {
    SimulationEvent { id: EventId(0), time: SimTime(secs), kind: EventKind::Arrival }
}

/// In-memory writer for observer tests.
#[derive(Default)]
struct Collect {
    metrics:  Vec<MetricsRow>,
    finished: usize,
}

impl OutputWriter for Collect {
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.metrics.push(*row);
        Ok(())
    }

    fn write_customers(&mut self, _rows: &[CustomerRow]) -> OutputResult<()> {
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished += 1;
        Ok(())
    }
}

/// Writer whose every call fails.
struct Broken;

impl OutputWriter for Broken {
    fn write_metrics(&mut self, _row: &MetricsRow) -> OutputResult<()> {
        Err(std::io::Error::other("disk full").into())
    }

    fn write_customers(&mut self, _rows: &[CustomerRow]) -> OutputResult<()> {
        Err(std::io::Error::other("disk full").into())
    }

    fn finish(&mut self) -> OutputResult<()> {
        Err(std::io::Error::other("still full").into())
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::MetricsObserver;

    #[test]
    fn samples_once_per_interval() {
        let mut obs = MetricsObserver::new(Collect::default(), 60.0);
        let m = Metrics::default();
        for t in [0.0, 10.0, 59.0, 61.0, 62.0, 200.0, 230.0] {
            obs.on_event(&event_at(t), &m);
        }
        obs.on_sim_end(SimTime(240.0), &m);

        let times: Vec<f64> = obs.writer_mut().metrics.iter().map(|r| r.time_secs).collect();
        assert_eq!(times, vec![0.0, 61.0, 200.0, 240.0]);
        assert_eq!(obs.rows_written(), 4);
        assert_eq!(obs.into_writer().finished, 1);
    }

    #[test]
    fn end_row_not_duplicated() {
        let mut obs = MetricsObserver::new(Collect::default(), 60.0);
        let m = Metrics::default();
        obs.on_event(&event_at(120.0), &m);
        obs.on_sim_end(SimTime(120.0), &m);
        assert_eq!(obs.rows_written(), 1);
    }

    #[test]
    fn zero_interval_samples_every_event() {
        let mut obs = MetricsObserver::new(Collect::default(), 0.0);
        let m = Metrics::default();
        for t in [1.0, 1.0, 2.0] {
            obs.on_event(&event_at(t), &m);
        }
        assert_eq!(obs.rows_written(), 3);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = MetricsObserver::new(Broken, 60.0);
        let m = Metrics::default();
        obs.on_event(&event_at(0.0), &m);
        obs.on_sim_end(SimTime(100.0), &m);

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 0);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::{CsvWriter, CUSTOMERS_HEADER, METRICS_HEADER};
    use crate::{write_customer_log, MetricsObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn read(dir: &TempDir, file: &str) -> (Vec<String>, Vec<csv::StringRecord>) {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        let rows = rdr.records().map(|r| r.unwrap()).collect();
        (headers, rows)
    }

    #[test]
    fn headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (h, rows) = read(&dir, "metrics_history.csv");
        assert_eq!(h, METRICS_HEADER);
        assert!(rows.is_empty());
        let (h, _) = read(&dir, "customers.csv");
        assert_eq!(h, CUSTOMERS_HEADER);
    }

    #[test]
    fn metrics_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_metrics(&metrics_row(60.0, 3)).unwrap();
        w.write_metrics(&metrics_row(120.0, 7)).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "metrics_history.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "60.000");
        assert_eq!(&rows[1][5], "7");
        assert_eq!(&rows[1][3], "0.7500");
    }

    #[test]
    fn missing_times_are_blank() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_customers(&[customer_row(0, true), customer_row(1, false)]).unwrap();
        w.finish().unwrap();

        let (_, rows) = read(&dir, "customers.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][6], "5.000");
        assert_eq!(&rows[1][6], "");
        assert_eq!(&rows[1][8], "");
        assert_eq!(&rows[1][3], "card");
        assert_eq!(&rows[1][4], "1");
    }

    #[test]
    fn finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn engine_run_to_csv() {
        let stations = vec![CheckoutStation::regular(1, 82.0), CheckoutStation::kiosk(2, 98.0)];
        let params = SimParams { arrival_rate: 60.0, simulation_duration: 60.0, seed: 7, ..SimParams::default() };
        let mut engine = cq_sim::EngineBuilder::new(stations, params).build().unwrap();

        let dir = tmp();
        let mut obs = MetricsObserver::new(CsvWriter::new(dir.path()).unwrap(), 300.0);
        let final_metrics = engine.run(&mut obs);
        assert!(obs.take_error().is_none());
        write_customer_log(obs.writer_mut(), engine.customers()).unwrap();
        obs.writer_mut().finish().unwrap();

        let (_, history) = read(&dir, "metrics_history.csv");
        // At most one sample per five-minute window plus the final row.
        assert!(!history.is_empty());
        assert!(history.len() <= 13);
        let last = history.last().unwrap();
        assert_eq!(last[5].parse::<u64>().unwrap(), final_metrics.total_customers_served);

        let (_, customers) = read(&dir, "customers.csv");
        assert_eq!(customers.len(), engine.customers().len());
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::sqlite::SqliteWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn metrics_rows() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_metrics(&metrics_row(60.0, 3)).unwrap();
        w.write_metrics(&metrics_row(120.0, 9)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (count, max_served): (i64, i64) = conn
            .query_row("SELECT COUNT(*), MAX(served) FROM metrics_history", [], |r| Ok((r.get(0)?, r.get(1)?)))
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(max_served, 9);
    }

    #[test]
    fn unserved_customer_has_null_times() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_customers(&[customer_row(0, true), customer_row(1, false)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let start: Option<f64> = conn
            .query_row("SELECT service_start FROM customers WHERE customer_id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(start, None);
        let wait: Option<f64> = conn
            .query_row("SELECT wait_time FROM customers WHERE customer_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(wait, Some(5.0));
    }
}
