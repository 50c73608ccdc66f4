pub mod power;
pub mod altimetry;
pub mod propulsion;
pub mod comms;

pub use power::{PowerSystem, PowerConfig, PowerInput, PowerState};
pub use altimetry::{ApsisTracker, ApsisReading, ApsisState};
pub use propulsion::{
    StationKeeping, StationKeepingConfig, BurnCommand, BurnManeuver, ManeuverKind, ManeuverPhase,
    ManeuverStep, PropulsionInput, PropulsionState,
};
pub use comms::{LinkState, CommsState};

use serde::Serialize;

/// A per-satellite model advanced once per tick.
pub trait Subsystem {
    type Input;
    type Output;
    type State: Clone + Serialize;

    fn update(&mut self, input: Self::Input, dt_s: f64) -> Self::Output;
    fn get_state(&self) -> Self::State;
}
