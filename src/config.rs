//! JSON scenario definitions.
//!
//! A scenario lists the celestial bodies, the satellites and the tunables of
//! the power and relay models. Everything except the bodies has a default:
//!
//! ```json
//! {
//!   "name": "earth-moon",
//!   "time_delta": 60.0,
//!   "bodies": [
//!     { "name": "Earth", "x": 0.0, "y": 0.0, "mass": 5.972e24, "radius": 6.371e6 },
//!     { "name": "Moon", "x": 3.844e8, "y": 0.0, "mass": 7.347e22, "radius": 1.737e6 }
//!   ]
//! }
//! ```
//!
//! Validation happens once in [`ScenarioConfig::build`]; nothing is
//! re-checked while the simulation runs.

use crate::body::{BodyId, CelestialBody};
use crate::constants::{BATTERY_MAX, BATTERY_MIN, DEFAULT_INTERFERENCE_FACTOR, DEFAULT_SAFE_BATTERY_LEVEL, MINUTE_S};
use crate::error::{Result, SimError};
use crate::math::Vec2;
use crate::relay::RelayNetwork;
use crate::satellite::Satellite;
use crate::subsystems::{PowerConfig, StationKeepingConfig};
use crate::system::System;
use crate::visibility::LineOfSight;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

const DEFAULT_THRUST_N: f64 = 10.0;
const DEFAULT_BURN_DURATION_S: f64 = 600.0;

fn default_time_delta() -> f64 {
    MINUTE_S
}

fn default_interference_factor() -> f64 {
    DEFAULT_INTERFERENCE_FACTOR
}

fn default_safe_battery_level() -> f64 {
    DEFAULT_SAFE_BATTERY_LEVEL
}

fn default_thrust_force() -> f64 {
    DEFAULT_THRUST_N
}

fn default_burn_duration() -> f64 {
    DEFAULT_BURN_DURATION_S
}

fn default_battery() -> f64 {
    BATTERY_MAX
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub vx: f64,
    #[serde(default)]
    pub vy: f64,
    pub mass: f64,
    pub radius: f64,
}

impl BodyConfig {
    pub fn new(name: &str, position: Vec2, velocity: Vec2, mass: f64, radius: f64) -> Self {
        Self {
            name: name.to_string(),
            x: position.x,
            y: position.y,
            vx: velocity.x,
            vy: velocity.y,
            mass,
            radius,
        }
    }

    pub fn to_body(&self) -> Result<CelestialBody> {
        CelestialBody::named(
            &self.name,
            Vec2::new(self.x, self.y),
            Vec2::new(self.vx, self.vy),
            self.mass,
            self.radius,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteConfig {
    #[serde(flatten)]
    pub body: BodyConfig,
    /// Name of the celestial body whose altitude is tracked.
    pub orbit_target: String,
    pub min_altitude: f64,
    pub max_altitude: f64,
    #[serde(default = "default_thrust_force")]
    pub thrust_force: f64,
    #[serde(default = "default_burn_duration")]
    pub burn_duration: f64,
    #[serde(default = "default_battery")]
    pub battery: f64,
}

impl SatelliteConfig {
    fn validate(&self) -> Result<()> {
        let invalid = |reason| SimError::InvalidSatellite {
            name: self.body.name.clone(),
            reason,
        };

        if !(self.min_altitude.is_finite() && self.max_altitude.is_finite()) {
            return Err(invalid("altitude bounds must be finite"));
        }
        if self.min_altitude > self.max_altitude {
            return Err(invalid("min_altitude exceeds max_altitude"));
        }
        if !(self.thrust_force.is_finite() && self.thrust_force >= 0.0) {
            return Err(invalid("thrust_force must be non-negative"));
        }
        if !(self.burn_duration.is_finite() && self.burn_duration >= 0.0) {
            return Err(invalid("burn_duration must be non-negative"));
        }
        if !(BATTERY_MIN..=BATTERY_MAX).contains(&self.battery) {
            return Err(invalid("battery must lie within [0, 100]"));
        }
        Ok(())
    }

    pub fn station_keeping(&self) -> StationKeepingConfig {
        StationKeepingConfig {
            min_altitude: self.min_altitude,
            max_altitude: self.max_altitude,
            thrust_force: self.thrust_force,
            burn_duration: self.burn_duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    /// Seconds per tick.
    #[serde(default = "default_time_delta")]
    pub time_delta: f64,
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub satellites: Vec<SatelliteConfig>,
    /// Defaults to the first body.
    #[serde(default)]
    pub sun: Option<String>,
    /// Defaults to the second body.
    #[serde(default)]
    pub ground_base: Option<String>,
    #[serde(default)]
    pub power: PowerConfig,
    #[serde(default = "default_interference_factor")]
    pub interference_factor: f64,
    #[serde(default = "default_safe_battery_level")]
    pub safe_battery_level: f64,
}

impl ScenarioConfig {
    pub fn new(name: &str, time_delta: f64) -> Self {
        Self {
            name: name.to_string(),
            time_delta,
            bodies: Vec::new(),
            satellites: Vec::new(),
            sun: None,
            ground_base: None,
            power: PowerConfig::default(),
            interference_factor: DEFAULT_INTERFERENCE_FACTOR,
            safe_battery_level: DEFAULT_SAFE_BATTERY_LEVEL,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn body_index(&self, name: &str) -> Result<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .map(BodyId)
            .ok_or_else(|| SimError::UnknownBody(name.to_string()))
    }

    fn reference(&self, name: Option<&str>, fallback: usize) -> Result<BodyId> {
        match name {
            Some(name) => self.body_index(name),
            None if fallback < self.bodies.len() => Ok(BodyId(fallback)),
            None => Err(SimError::MissingBodies),
        }
    }

    /// Checks every configuration rule without building anything.
    pub fn validate(&self) -> Result<()> {
        if !(self.time_delta.is_finite() && self.time_delta > 0.0) {
            return Err(SimError::InvalidTimeStep(self.time_delta));
        }

        for (index, body) in self.bodies.iter().enumerate() {
            body.to_body()?;
            if self.bodies[..index].iter().any(|b| b.name == body.name) {
                return Err(SimError::InvalidBody {
                    name: body.name.clone(),
                    reason: "duplicate name",
                });
            }
        }

        for satellite in &self.satellites {
            satellite.body.to_body()?;
            satellite.validate()?;
            self.body_index(&satellite.orbit_target)?;
        }

        self.reference(self.sun.as_deref(), 0)?;
        self.reference(self.ground_base.as_deref(), 1)?;

        if !(self.interference_factor.is_finite() && self.interference_factor >= 0.0) {
            return Err(SimError::InvalidScenario {
                name: self.name.clone(),
                reason: "interference_factor must be non-negative",
            });
        }
        if !(self.safe_battery_level.is_finite() && (BATTERY_MIN..=BATTERY_MAX).contains(&self.safe_battery_level)) {
            return Err(SimError::InvalidScenario {
                name: self.name.clone(),
                reason: "safe_battery_level must be a percentage",
            });
        }
        Ok(())
    }

    /// Validates the scenario and turns it into a runnable [`System`].
    pub fn build(&self) -> Result<System> {
        self.validate()?;

        let bodies = self
            .bodies
            .iter()
            .map(BodyConfig::to_body)
            .collect::<Result<Vec<_>>>()?;

        let satellites = self
            .satellites
            .iter()
            .map(|config| {
                Ok(Satellite::new(
                    config.body.to_body()?,
                    self.body_index(&config.orbit_target)?,
                    config.station_keeping(),
                    self.power,
                    config.battery,
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        let sun = self.reference(self.sun.as_deref(), 0)?;
        let ground_base = self.reference(self.ground_base.as_deref(), 1)?;
        let line_of_sight = LineOfSight::new(self.interference_factor);

        info!(
            scenario = %self.name,
            bodies = bodies.len(),
            satellites = satellites.len(),
            time_delta = self.time_delta,
            "scenario built"
        );

        Ok(
            System::with_references(bodies, satellites, sun, ground_base, self.time_delta)?
                .with_line_of_sight(line_of_sight)
                .with_relay_network(RelayNetwork::new(line_of_sight, self.safe_battery_level)),
        )
    }
}
