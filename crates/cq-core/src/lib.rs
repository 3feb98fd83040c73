//! `cq-core` — foundational types for the `rust_cq` checkout queueing framework.
//!
//! This crate is a dependency of every other `cq-*` crate.  It has no `cq-*`
//! dependencies and few external ones (`rand`, `thiserror`, `csv`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`ids`]     | `CustomerId`, `StationId`, `EventId`                        |
//! | [`time`]    | `SimTime` (continuous seconds)                              |
//! | [`rng`]     | `SimRng` — uniform, weighted-categorical, bounded exponential |
//! | [`model`]   | `Customer`, `CheckoutStation`, `Metrics`, domain enums      |
//! | [`profile`] | `StoreProfile` calibration data per day type                |
//! | [`loader`]  | transaction CSV → `StoreProfile`                            |
//! | [`error`]   | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod loader;
pub mod model;
pub mod profile;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CustomerId, EventId, StationId};
pub use loader::{load_profile_csv, load_profile_reader, Transaction};
pub use model::{CheckoutStation, Customer, DayType, Metrics, PaymentMethod, StationKind};
pub use profile::{PaymentMix, StoreProfile};
pub use rng::SimRng;
pub use time::SimTime;
