//! Built-in scenarios.
//!
//! Phase angles are fixed so every run of a preset is reproducible.

use crate::config::{BodyConfig, SatelliteConfig, ScenarioConfig};
use crate::constants::{AU, DAY_S, G, HOUR_S, MINUTE_S};
use crate::error::Result;
use crate::math::Vec2;
use crate::system::System;

/// Position on a circle of radius `distance` at angle `theta`, moving
/// counter-clockwise at `speed`.
pub fn start_conditions(theta: f64, distance: f64, speed: f64) -> (Vec2, Vec2) {
    let position = Vec2::from_polar(distance, theta);
    let velocity = Vec2::from_polar(speed, theta + core::f64::consts::FRAC_PI_2);
    (position, velocity)
}

/// Circular orbit speed at `distance` from the center of a body of `mass`.
pub fn orbital_speed(mass: f64, distance: f64) -> f64 {
    (G * mass / distance).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    EarthMoon,
    SolarSystem,
    Sirius,
    MarsRelay,
}

impl Preset {
    pub fn all() -> [Preset; 4] {
        [Preset::EarthMoon, Preset::SolarSystem, Preset::Sirius, Preset::MarsRelay]
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::EarthMoon => "earth-moon",
            Preset::SolarSystem => "solar-system",
            Preset::Sirius => "sirius",
            Preset::MarsRelay => "mars-relay",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::EarthMoon => "Earth and Moon released at rest, 60 s ticks",
            Preset::SolarSystem => "Sun, eight planets and the Moon, hourly ticks",
            Preset::Sirius => "Sirius A/B binary with a wandering planetoid, daily ticks",
            Preset::MarsRelay => "Three station-keeping satellites around Mars relaying to Earth",
        }
    }

    pub fn from_name(name: &str) -> Option<Preset> {
        Preset::all().into_iter().find(|p| p.name() == name)
    }

    pub fn config(self) -> ScenarioConfig {
        match self {
            Preset::EarthMoon => earth_moon(),
            Preset::SolarSystem => solar_system(),
            Preset::Sirius => sirius(),
            Preset::MarsRelay => mars_relay(),
        }
    }

    pub fn build(self) -> Result<System> {
        self.config().build()
    }
}

fn body(name: &str, theta: f64, distance: f64, speed: f64, mass: f64, radius: f64) -> BodyConfig {
    let (position, velocity) = start_conditions(theta, distance, speed);
    BodyConfig::new(name, position, velocity, mass, radius)
}

/// Earth at the origin, Moon 384 400 km away, both at rest.
pub fn earth_moon() -> ScenarioConfig {
    let mut config = ScenarioConfig::new(Preset::EarthMoon.name(), MINUTE_S);
    config.bodies = vec![
        BodyConfig::new("Earth", Vec2::ZERO, Vec2::ZERO, 5.972e24, 6.371e6),
        BodyConfig::new("Moon", Vec2::new(3.844e8, 0.0), Vec2::ZERO, 7.347e22, 1.737e6),
    ];
    config
}

pub fn solar_system() -> ScenarioConfig {
    let mut config = ScenarioConfig::new(Preset::SolarSystem.name(), HOUR_S);
    let west = core::f64::consts::PI;
    config.bodies = vec![
        BodyConfig::new("Sun", Vec2::ZERO, Vec2::ZERO, 1.989e30, 696.24e6),
        body("Earth", west, AU, 29.78e3, 5.972e24, 6.371e6),
        body("Moon", west, AU + 384e6, 29.78e3 + 1.022e3, 7.347e22, 1.737e6),
        body("Mars", west, 1.524 * AU, 24.077e3, 6.39e23, 3.389e6),
        body("Mercury", west, 0.387 * AU, 47.362e3, 3.285e23, 2.439e6),
        body("Venus", west, 0.723 * AU, 35.02e3, 4.867e24, 6.051e6),
        body("Jupiter", west, 5.203 * AU, 13.07e3, 1.898e27, 69.911e6),
        body("Saturn", west, 9.537 * AU, 9.69e3, 5.683e26, 58.232e6),
        body("Uranus", west, 19.191 * AU, 6.81e3, 8.681e25, 25.362e6),
        body("Neptune", west, 30.069 * AU, 5.43e3, 1.024e26, 24.622e6),
    ];
    config
}

/// The Sirius binary with a light planetoid between the stars.
pub fn sirius() -> ScenarioConfig {
    let mut config = ScenarioConfig::new(Preset::Sirius.name(), DAY_S);
    config.bodies = vec![
        BodyConfig::new("Sirius A", Vec2::new(10.0 * AU, 0.0), Vec2::new(0.0, 2e3), 2.02 * 1.989e30, 6e8),
        BodyConfig::new("Sirius B", Vec2::new(-10.0 * AU, 0.0), Vec2::new(0.0, -5e3), 1.01 * 1.989e30, 6e8),
        BodyConfig::new("Planetoid", Vec2::ZERO, Vec2::new(1e3, 1e4), 1e22, 6e6),
    ];
    config
}

/// Mars with two low orbiters and a high relay, talking to Earth.
pub fn mars_relay() -> ScenarioConfig {
    const MARS_MASS: f64 = 6.39e23;
    const MARS_RADIUS: f64 = 3.389e6;
    const MARS_DISTANCE: f64 = 1.524 * AU;
    const MARS_SPEED: f64 = 24.077e3;

    let mut config = ScenarioConfig::new(Preset::MarsRelay.name(), MINUTE_S);
    config.sun = Some("Sun".to_string());
    config.ground_base = Some("Earth".to_string());

    let earth_theta = 0.3;
    let mars_theta = 1.1;
    config.bodies = vec![
        BodyConfig::new("Sun", Vec2::ZERO, Vec2::ZERO, 1.989e30, 696.24e6),
        body("Earth", earth_theta, AU, 29.78e3, 5.972e24, 6.371e6),
        body("Moon", earth_theta, AU + 6.371e6 + 384e6, 29.78e3 + 1.022e3, 7.347e22, 1.737e6),
        body("Mars", mars_theta, MARS_DISTANCE, MARS_SPEED, MARS_MASS, MARS_RADIUS),
        body("Mercury", 4.0, 0.387 * AU, 47.362e3, 3.285e23, 2.439e6),
        body("Venus", 2.2, 0.723 * AU, 35.02e3, 4.867e24, 6.051e6),
        body("Jupiter", 5.5, 5.203 * AU, 13.07e3, 1.898e27, 69.911e6),
        body("Phobos", mars_theta, MARS_DISTANCE + MARS_RADIUS + 9e6, MARS_SPEED + 2.138e3, 1.0659e16, 11e3),
        body("Deimos", mars_theta, MARS_DISTANCE + MARS_RADIUS + 23e6, MARS_SPEED + 1.3513e3, 1.4762e15, 6e3),
    ];

    let satellite = |name: &str, altitude: f64, mass: f64, radius: f64, bounds: (f64, f64)| {
        let speed = MARS_SPEED + orbital_speed(MARS_MASS, MARS_RADIUS + altitude);
        SatelliteConfig {
            body: body(name, mars_theta, MARS_DISTANCE + MARS_RADIUS + altitude, speed, mass, radius),
            orbit_target: "Mars".to_string(),
            min_altitude: bounds.0,
            max_altitude: bounds.1,
            thrust_force: 10.0,
            burn_duration: 600.0,
            battery: 100.0,
        }
    };

    config.satellites = vec![
        satellite("Odyssey", 400e3, 725.0, 20.0, (200e3, 1200e3)),
        satellite("Rec Orbiter", 300e3, 1125.0, 20.0, (200e3, 1200e3)),
        satellite("Relay", 5000e3, 420.0, 10.0, (4500e3, 6000e3)),
    ];
    config
}
