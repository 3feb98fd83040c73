//! The `OutputWriter` trait implemented by all backend writers.

use cq_core::Customer;

use crate::{CustomerRow, MetricsRow, OutputResult};

/// Implemented by the CSV and SQLite writers.
///
/// Errors raised while a run is being observed are kept by
/// [`MetricsObserver`][crate::MetricsObserver] and retrieved with
/// [`take_error`][crate::MetricsObserver::take_error].
pub trait OutputWriter {
    /// Append one metrics sample.
    fn write_metrics(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Append a batch of customer records.
    fn write_customers(&mut self, rows: &[CustomerRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.  Safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Write every customer the engine has created.
pub fn write_customer_log<W: OutputWriter + ?Sized>(writer: &mut W, customers: &[Customer]) -> OutputResult<()> {
    let rows: Vec<CustomerRow> = customers.iter().map(CustomerRow::from).collect();
    writer.write_customers(&rows)
}
