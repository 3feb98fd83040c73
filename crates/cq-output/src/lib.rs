//! `cq-output` — simulation output writers for the rust_cq framework.
//!
//! | Feature   | Backend | Files created                             |
//! |-----------|---------|-------------------------------------------|
//! | *(none)*  | CSV     | `metrics_history.csv`, `customers.csv`    |
//! | `sqlite`  | SQLite  | `output.db`                               |
//!
//! Both backends implement [`OutputWriter`].  [`MetricsObserver`] drives one
//! from `Engine::run`; [`write_customer_log`] dumps the customer table once
//! the run is over.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cq_output::{CsvWriter, MetricsObserver, write_customer_log};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = MetricsObserver::new(writer, 60.0);
//! engine.run(&mut obs);
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! write_customer_log(obs.writer_mut(), engine.customers())?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{CustomerRow, MetricsRow};
pub use writer::{write_customer_log, OutputWriter};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
