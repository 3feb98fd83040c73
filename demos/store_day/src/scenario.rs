//! JSON scenario format.

use std::path::PathBuf;

use cq_core::{CheckoutStation, StationKind};
use cq_sim::{EngineTuning, SimParams};
use serde::Deserialize;

/// Used when no scenario file is given: a weekday half-hour with two
/// registers and two kiosks.
pub const DEFAULT_SCENARIO: &str = r#"{
    "params": {
        "arrival_rate": 60,
        "service_time_regular": 82,
        "service_time_kiosk": 98,
        "day_type": "weekday",
        "simulation_duration": 120,
        "max_customers": 1000,
        "seed": 42
    },
    "stations": [
        { "kind": "regular" },
        { "kind": "regular" },
        { "kind": "kiosk", "max_queue_length": 4 },
        { "kind": "kiosk", "max_queue_length": 4 }
    ],
    "replications": 8,
    "sample_interval_secs": 60,
    "output_dir": "output"
}"#;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub params:               SimParams,
    #[serde(default)]
    pub tuning:               Option<EngineTuning>,
    pub stations:             Vec<StationEntry>,
    #[serde(default = "default_replications")]
    pub replications:         usize,
    #[serde(default = "default_sample_interval")]
    pub sample_interval_secs: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir:           PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationEntry {
    pub kind:             StationKind,
    /// Defaults to the matching service time in `params`.
    #[serde(default)]
    pub service_time:     Option<f64>,
    #[serde(default)]
    pub max_queue_length: Option<usize>,
    #[serde(default = "default_active")]
    pub active:           bool,
}

fn default_replications() -> usize {
    8
}

fn default_sample_interval() -> f64 {
    60.0
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_active() -> bool {
    true
}

impl Scenario {
    /// Stations numbered from 1 in file order.
    pub fn stations(&self) -> Vec<CheckoutStation> {
        self.stations
            .iter()
            .zip(1u32..)
            .map(|(entry, id)| {
                let mean = entry.service_time.unwrap_or(match entry.kind {
                    StationKind::Regular => self.params.service_time_regular,
                    StationKind::Kiosk   => self.params.service_time_kiosk,
                });
                let mut station = match entry.kind {
                    StationKind::Regular => CheckoutStation::regular(id, mean),
                    StationKind::Kiosk   => CheckoutStation::kiosk(id, mean),
                };
                station.max_queue_length = entry.max_queue_length;
                station.is_active = entry.active;
                station
            })
            .collect()
    }
}
