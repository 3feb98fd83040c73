//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the output directory with two tables:
//! `metrics_history` and `customers`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{CustomerRow, MetricsRow, OutputResult};

pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS metrics_history (
                 time_secs            REAL    NOT NULL,
                 average_wait_time    REAL    NOT NULL,
                 average_queue_length REAL    NOT NULL,
                 utilization          REAL    NOT NULL,
                 throughput           REAL    NOT NULL,
                 served               INTEGER NOT NULL,
                 abandoned            INTEGER NOT NULL,
                 satisfaction         REAL    NOT NULL,
                 score                REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS customers (
                 customer_id   INTEGER PRIMARY KEY,
                 arrival_time  REAL    NOT NULL,
                 item_count    INTEGER NOT NULL,
                 payment       TEXT    NOT NULL,
                 prefers_kiosk INTEGER NOT NULL,
                 total_value   REAL    NOT NULL,
                 service_start REAL,
                 service_end   REAL,
                 wait_time     REAL,
                 abandoned     INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO metrics_history \
             (time_secs, average_wait_time, average_queue_length, utilization, \
              throughput, served, abandoned, satisfaction, score) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.time_secs,
                row.average_wait_time,
                row.average_queue_length,
                row.utilization,
                row.throughput,
                row.served as i64,
                row.abandoned as i64,
                row.satisfaction,
                row.score,
            ],
        )?;
        Ok(())
    }

    fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO customers \
                 (customer_id, arrival_time, item_count, payment, prefers_kiosk, \
                  total_value, service_start, service_end, wait_time, abandoned) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.customer_id,
                    row.arrival_time,
                    row.item_count,
                    row.payment,
                    row.prefers_kiosk as i64,
                    row.total_value,
                    row.service_start,
                    row.service_end,
                    row.wait_time,
                    row.abandoned as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
