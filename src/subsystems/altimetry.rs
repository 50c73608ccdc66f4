use super::Subsystem;
use serde::{Deserialize, Serialize};

/// Result of feeding one altitude sample to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApsisReading {
    pub altitude: f64,
    /// The sample set a new minimum this tick.
    pub at_periapsis: bool,
    /// The sample set a new maximum this tick.
    pub at_apoapsis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApsisState {
    pub altitude: f64,
    pub periapsis: f64,
    pub apoapsis: f64,
    pub at_periapsis: bool,
    pub at_apoapsis: bool,
}

/// Running altitude extrema since the last reset.
///
/// The edge flags are recomputed on every sample. A satellite lingering near
/// an extremum keeps setting new records, so they may stay true for several
/// consecutive ticks.
#[derive(Debug, Clone)]
pub struct ApsisTracker {
    state: ApsisState,
}

impl ApsisTracker {
    pub fn new() -> Self {
        Self {
            state: ApsisState {
                altitude: 0.0,
                periapsis: f64::INFINITY,
                apoapsis: 0.0,
                at_periapsis: false,
                at_apoapsis: false,
            },
        }
    }

    pub fn periapsis(&self) -> f64 {
        self.state.periapsis
    }

    pub fn apoapsis(&self) -> f64 {
        self.state.apoapsis
    }

    pub fn altitude(&self) -> f64 {
        self.state.altitude
    }

    pub fn reset_periapsis(&mut self) {
        self.state.periapsis = f64::INFINITY;
    }

    pub fn reset_apoapsis(&mut self) {
        self.state.apoapsis = 0.0;
    }
}

impl Default for ApsisTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Subsystem for ApsisTracker {
    type Input = f64;
    type Output = ApsisReading;
    type State = ApsisState;

    fn update(&mut self, altitude: f64, _dt_s: f64) -> ApsisReading {
        let state = &mut self.state;
        state.altitude = altitude;

        state.at_periapsis = altitude < state.periapsis;
        if state.at_periapsis {
            state.periapsis = altitude;
        }

        state.at_apoapsis = altitude > state.apoapsis;
        if state.at_apoapsis {
            state.apoapsis = altitude;
        }

        ApsisReading {
            altitude,
            at_periapsis: state.at_periapsis,
            at_apoapsis: state.at_apoapsis,
        }
    }

    fn get_state(&self) -> ApsisState {
        self.state
    }
}
