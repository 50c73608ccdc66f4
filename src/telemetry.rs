//! Per-tick satellite telemetry and a bounded in-memory recorder.
//!
//! Frames are the only thing the simulation hands to the outside world.
//! Rendering, plotting, persistence and signal monitoring all consume them
//! downstream.

use crate::constants::DEFAULT_HISTORY_LENGTH;
use crate::satellite::Satellite;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub satellite: String,
    pub altitude: f64,
    pub battery: f64,
    pub connections: u32,
    pub attempted_connections: u32,
    pub boosting: bool,
}

impl TelemetryRecord {
    pub fn from_satellite(satellite: &Satellite) -> Self {
        Self {
            satellite: satellite.name().to_string(),
            altitude: satellite.altitude(),
            battery: satellite.battery(),
            connections: satellite.link().connections(),
            attempted_connections: satellite.link().attempted_connections(),
            boosting: satellite.is_boosting(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connections > 0
    }
}

/// One record per satellite, in satellite order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryFrame {
    pub tick: u64,
    pub time_s: f64,
    pub records: Vec<TelemetryRecord>,
}

impl TelemetryFrame {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn record(&self, satellite: &str) -> Option<&TelemetryRecord> {
        self.records.iter().find(|r| r.satellite == satellite)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSummary {
    pub min_altitude: f64,
    pub max_altitude: f64,
    pub min_battery: f64,
    pub final_battery: f64,
    /// Fraction of recorded ticks with at least one link.
    pub connected_ratio: f64,
    pub boosting_ticks: usize,
}

/// Ring buffer of the most recent frames.
#[derive(Debug, Clone)]
pub struct TelemetryRecorder {
    frames: VecDeque<TelemetryFrame>,
    capacity: usize,
    total_recorded: u64,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_LENGTH)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            total_recorded: 0,
        }
    }

    pub fn record(&mut self, frame: TelemetryFrame) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
        self.total_recorded = self.total_recorded.saturating_add(1);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    pub fn frames(&self) -> impl Iterator<Item = &TelemetryFrame> {
        self.frames.iter()
    }

    pub fn latest(&self) -> Option<&TelemetryFrame> {
        self.frames.back()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Records for one satellite across the retained history.
    pub fn series<'a>(&'a self, satellite: &'a str) -> impl Iterator<Item = &'a TelemetryRecord> + 'a {
        self.frames.iter().filter_map(move |frame| frame.record(satellite))
    }

    pub fn altitude_series(&self, satellite: &str) -> Vec<f64> {
        self.series(satellite).map(|r| r.altitude).collect()
    }

    pub fn battery_series(&self, satellite: &str) -> Vec<f64> {
        self.series(satellite).map(|r| r.battery).collect()
    }

    pub fn summary(&self, satellite: &str) -> Option<SatelliteSummary> {
        let mut samples = 0usize;
        let mut connected = 0usize;
        let mut summary = SatelliteSummary {
            min_altitude: f64::INFINITY,
            max_altitude: f64::NEG_INFINITY,
            min_battery: f64::INFINITY,
            final_battery: 0.0,
            connected_ratio: 0.0,
            boosting_ticks: 0,
        };

        for record in self.series(satellite) {
            samples += 1;
            summary.min_altitude = summary.min_altitude.min(record.altitude);
            summary.max_altitude = summary.max_altitude.max(record.altitude);
            summary.min_battery = summary.min_battery.min(record.battery);
            summary.final_battery = record.battery;
            if record.is_connected() {
                connected += 1;
            }
            if record.boosting {
                summary.boosting_ticks += 1;
            }
        }

        if samples == 0 {
            return None;
        }
        summary.connected_ratio = connected as f64 / samples as f64;
        Some(summary)
    }
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::new()
    }
}
