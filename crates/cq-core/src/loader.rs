//! Transaction-log CSV loader.
//!
//! # CSV format
//!
//! One row per served customer, with interleaved cashier breaks:
//!
//! ```csv
//! Customer,Items Bought,Service Time (s),Payment Method,Notes,Cashier
//! 1,2.0,88,Cash,,A
//! 2,7.0,76,Card,,A
//! Break,,25,,Break,
//! 3,4.0,93,Voucher & Card,Promo used,A
//! ```
//!
//! Rows whose first field is `Break` (or empty) count as breaks.  Customer
//! rows with a non-numeric customer, item, or service-time field are skipped.
//! `Voucher & Card` payments count as vouchers.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::profile::{PaymentMix, StoreProfile};
use crate::{CoreError, CoreResult, DayType, PaymentMethod};

/// One observed checkout.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    pub customer:     u32,
    pub items:        f64,
    pub service_time: f64,
    pub payment:      PaymentMethod,
    pub notes:        Option<String>,
    pub cashier:      String,
}

/// Load a transaction log from `path` and derive a [`StoreProfile`].
pub fn load_profile_csv(path: &Path, day_type: DayType) -> CoreResult<StoreProfile> {
    let file = std::fs::File::open(path)?;
    load_profile_reader(file, day_type)
}

/// Like [`load_profile_csv`] but accepts any `Read` source.
pub fn load_profile_reader<R: Read>(reader: R, day_type: DayType) -> CoreResult<StoreProfile> {
    let (transactions, breaks) = parse_transactions(reader)?;
    StoreProfile::from_transactions(day_type, &transactions, breaks)
}

/// Parse all rows, returning customer transactions and the break count.
pub fn parse_transactions<R: Read>(reader: R) -> CoreResult<(Vec<Transaction>, u32)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    let mut breaks = 0u32;

    for result in csv_reader.records() {
        let record = result?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let customer = field(0);
        if customer.is_empty() || customer == "Break" {
            breaks += 1;
            continue;
        }

        let (Ok(customer), Ok(items), Ok(service_time)) = (
            customer.parse::<u32>(),
            field(1).parse::<f64>(),
            field(2).parse::<f64>(),
        ) else {
            continue;
        };

        let notes = match field(4) {
            "" => None,
            n => Some(n.to_owned()),
        };

        transactions.push(Transaction {
            customer,
            items,
            service_time,
            payment: parse_payment(field(3))?,
            notes,
            cashier: field(5).to_owned(),
        });
    }

    Ok((transactions, breaks))
}

impl StoreProfile {
    /// Aggregate a transaction log into a calibration profile.
    ///
    /// Mean service time is rounded to whole seconds and mean basket size to
    /// one decimal, matching the precision of the built-in profiles.
    pub fn from_transactions(
        day_type:     DayType,
        transactions: &[Transaction],
        breaks:       u32,
    ) -> CoreResult<StoreProfile> {
        if transactions.is_empty() {
            return Err(CoreError::EmptyCalibration);
        }
        let n = transactions.len() as f64;

        let total_service: f64 = transactions.iter().map(|t| t.service_time).sum();
        let total_items: f64 = transactions.iter().map(|t| t.items).sum();

        let count = |m: PaymentMethod| transactions.iter().filter(|t| t.payment == m).count() as f64;
        let payment = PaymentMix {
            cash:    count(PaymentMethod::Cash) / n,
            card:    count(PaymentMethod::Card) / n,
            voucher: count(PaymentMethod::Voucher) / n,
        };

        let cashiers: HashSet<&str> = transactions.iter().map(|t| t.cashier.as_str()).collect();

        Ok(StoreProfile {
            day_type,
            avg_service_time:       (total_service / n).round(),
            avg_items_per_customer: (total_items / n * 10.0).round() / 10.0,
            payment,
            total_customers:        transactions.len() as u32,
            cashier_breaks:         breaks,
            staff_count:            cashiers.len() as u32,
        })
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_payment(s: &str) -> CoreResult<PaymentMethod> {
    match s {
        "Cash" | "cash" => Ok(PaymentMethod::Cash),
        "Card" | "card" => Ok(PaymentMethod::Card),
        v if v.contains("Voucher") || v.contains("voucher") => Ok(PaymentMethod::Voucher),
        other => Err(CoreError::Parse(format!(
            "invalid payment method {other:?}: expected \"Cash\", \"Card\", or \"Voucher & Card\""
        ))),
    }
}
