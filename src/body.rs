use crate::error::{Result, SimError};
use crate::math::Vec2;
use serde::{Deserialize, Serialize};

/// Handle to a celestial body inside a [`System`](crate::system::System).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub usize);

/// Handle to a satellite inside a [`System`](crate::system::System).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SatelliteId(pub usize);

/// Where a satellite routes its traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkTarget {
    /// Straight to the ground base.
    Base(BodyId),
    /// Through another satellite.
    Relay(SatelliteId),
}

/// A point mass with a physical extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelestialBody {
    pub name: Option<String>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub mass: f64,
    pub radius: f64,
}

impl CelestialBody {
    /// Builds a body, rejecting non-positive or non-finite mass and radius.
    pub fn new(
        name: Option<String>,
        position: Vec2,
        velocity: Vec2,
        mass: f64,
        radius: f64,
    ) -> Result<Self> {
        let body = Self {
            name,
            position,
            velocity,
            mass,
            radius,
        };
        body.validate()?;
        Ok(body)
    }

    pub fn named(name: &str, position: Vec2, velocity: Vec2, mass: f64, radius: f64) -> Result<Self> {
        Self::new(Some(name.to_string()), position, velocity, mass, radius)
    }

    pub fn validate(&self) -> Result<()> {
        let reason = if !(self.mass.is_finite() && self.mass > 0.0) {
            Some("mass must be positive and finite")
        } else if !(self.radius.is_finite() && self.radius > 0.0) {
            Some("radius must be positive and finite")
        } else if !self.position.is_finite() {
            Some("position must be finite")
        } else if !self.velocity.is_finite() {
            Some("velocity must be finite")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(SimError::InvalidBody {
                name: self.label().to_string(),
                reason,
            }),
            None => Ok(()),
        }
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn distance_to(&self, other: &CelestialBody) -> f64 {
        self.position.distance(other.position)
    }

    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        let speed = self.velocity.norm();
        0.5 * self.mass * speed * speed
    }

    /// Semi-implicit Euler step: velocity first, then position with the new velocity.
    pub fn apply_force(&mut self, force: Vec2, dt_s: f64) {
        let acceleration = force * (1.0 / self.mass);
        self.velocity += acceleration * dt_s;
        self.position += self.velocity * dt_s;
    }
}

impl core::fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.label())
    }
}
