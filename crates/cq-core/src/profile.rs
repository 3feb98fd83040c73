//! Store calibration data.
//!
//! The built-in profiles come from two observed trading days of a clothing
//! store: a Monday (one cashier) and a Saturday (two cashiers).  They drive
//! basket sizes, payment mix, and base service time in the engine.  Custom
//! profiles can be derived from a transaction log with
//! [`load_profile_csv`][crate::load_profile_csv].

use crate::DayType;

/// Length of the trading day used to turn daily counts into hourly rates.
pub const OPERATING_HOURS: f64 = 8.0;

/// Share of customers per payment method.  Shares sum to 1 for built-in data.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentMix {
    pub cash:    f64,
    pub card:    f64,
    pub voucher: f64,
}

impl PaymentMix {
    /// Weights ordered as [`PaymentMethod::ALL`](crate::PaymentMethod::ALL).
    pub fn weights(&self) -> [f64; 3] {
        [self.cash, self.card, self.voucher]
    }
}

/// Calibration for one day type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoreProfile {
    pub day_type:               DayType,
    /// Mean observed service time in seconds.
    pub avg_service_time:       f64,
    pub avg_items_per_customer: f64,
    pub payment:                PaymentMix,
    /// Customers observed over the trading day.
    pub total_customers:        u32,
    pub cashier_breaks:         u32,
    pub staff_count:            u32,
}

impl StoreProfile {
    /// Built-in Monday calibration.
    pub fn weekday() -> Self {
        Self {
            day_type:               DayType::Weekday,
            avg_service_time:       82.0,
            avg_items_per_customer: 3.6,
            payment:                PaymentMix { cash: 0.23, card: 0.59, voucher: 0.18 },
            total_customers:        22,
            cashier_breaks:         2,
            staff_count:            1,
        }
    }

    /// Built-in Saturday calibration.
    pub fn weekend() -> Self {
        Self {
            day_type:               DayType::Weekend,
            avg_service_time:       49.0,
            avg_items_per_customer: 1.5,
            payment:                PaymentMix { cash: 0.08, card: 0.89, voucher: 0.03 },
            total_customers:        37,
            cashier_breaks:         0,
            staff_count:            2,
        }
    }

    pub fn builtin(day_type: DayType) -> Self {
        match day_type {
            DayType::Weekday => Self::weekday(),
            DayType::Weekend => Self::weekend(),
        }
    }

    /// Observed customers per hour over an [`OPERATING_HOURS`] day.
    pub fn arrival_rate_per_hour(&self) -> f64 {
        self.total_customers as f64 / OPERATING_HOURS
    }
}
