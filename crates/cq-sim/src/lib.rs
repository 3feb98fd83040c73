//! `cq-sim` — discrete-event checkout engine for the rust_cq framework.
//!
//! # Event loop
//!
//! ```text
//! step():
//!   ① Pop        — earliest event (time, then insertion order).
//!   ② Advance    — current_time := event.time.
//!   ③ Dispatch   — Arrival       → create customer, route, balk,
//!                                  drain main queue, schedule next arrival
//!                  RetryArrival  → schedule next arrival
//!                  ServiceEnd    → free station, serve next or drain
//!   ④ Measure    — recompute time-weighted metrics.
//!   return events remain && current_time < duration
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs [`Engine::replicate`] on Rayon's thread pool.     |
//! | `serde`    | `Serialize`/`Deserialize` for params, tuning, events.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cq_core::CheckoutStation;
//! use cq_sim::{Engine, NoopObserver, SimParams};
//!
//! let stations = vec![CheckoutStation::regular(1, 82.0), CheckoutStation::kiosk(2, 98.0)];
//! let mut engine = Engine::new(stations, SimParams::default());
//! while engine.step() {}
//! println!("{:?}", engine.current_metrics());
//! ```

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod event_queue;
pub mod observer;
pub mod replicate;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use config::{EngineTuning, SimParams};
pub use engine::Engine;
pub use error::{SimError, SimResult};
pub use event_queue::{EventKind, EventQueue, SimulationEvent};
pub use observer::{NoopObserver, SimObserver};
pub use replicate::{replicate, ReplicationSummary};
