//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `metrics_history.csv`
//! - `customers.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CustomerRow, MetricsRow, OutputResult};

pub const METRICS_HEADER: [&str; 9] = [
    "time_secs",
    "average_wait_time",
    "average_queue_length",
    "utilization",
    "throughput",
    "served",
    "abandoned",
    "satisfaction",
    "score",
];

pub const CUSTOMERS_HEADER: [&str; 10] = [
    "customer_id",
    "arrival_time",
    "item_count",
    "payment",
    "prefers_kiosk",
    "total_value",
    "service_start",
    "service_end",
    "wait_time",
    "abandoned",
];

pub struct CsvWriter {
    metrics:   Writer<File>,
    customers: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create both files in `dir` and write their header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join("metrics_history.csv"))?;
        metrics.write_record(METRICS_HEADER)?;

        let mut customers = Writer::from_path(dir.join("customers.csv"))?;
        customers.write_record(CUSTOMERS_HEADER)?;

        Ok(Self { metrics, customers, finished: false })
    }
}

/// Empty cell for a missing value.
fn opt(v: Option<f64>) -> String {
    v.map(|x| format!("{x:.3}")).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            format!("{:.3}", row.time_secs),
            format!("{:.3}", row.average_wait_time),
            format!("{:.3}", row.average_queue_length),
            format!("{:.4}", row.utilization),
            format!("{:.3}", row.throughput),
            row.served.to_string(),
            row.abandoned.to_string(),
            format!("{:.2}", row.satisfaction),
            format!("{:.2}", row.score),
        ])?;
        Ok(())
    }

    fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()> {
        for row in rows {
            self.customers.write_record(&[
                row.customer_id.to_string(),
                format!("{:.3}", row.arrival_time),
                row.item_count.to_string(),
                row.payment.to_string(),
                (row.prefers_kiosk as u8).to_string(),
                format!("{:.2}", row.total_value),
                opt(row.service_start),
                opt(row.service_end),
                opt(row.wait_time),
                (row.abandoned as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.customers.flush()?;
        Ok(())
    }
}
