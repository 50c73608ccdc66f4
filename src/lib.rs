//! # Orbit Simulator
//!
//! A fixed-step N-body simulation of celestial bodies and the artificial
//! satellites orbiting them, with satellite power, line-of-sight relay
//! networking and automated station-keeping.
//!
//! ## Features
//!
//! - **N-body gravity**: direct O(n^2) Newtonian summation with symplectic Euler integration
//! - **Line-of-sight**: segment obstruction tests against every celestial body
//! - **Battery model**: solar charging in sunlight, discharge for radio traffic
//! - **Relay network**: direct links to a ground base, or one hop through a charged satellite
//! - **Station-keeping**: periapsis-raise and apoapsis-lower burns keep orbits within bounds
//! - **Telemetry**: per-tick, per-satellite records for downstream consumers
//!
//! ## Quick Start
//!
//! ```rust
//! use orbitsim::scenario::Preset;
//!
//! let mut system = Preset::MarsRelay.build().expect("preset is valid");
//!
//! for _ in 0..10 {
//!     let frame = system.tick().expect("no coincident bodies");
//!     for record in &frame.records {
//!         println!("{}: {:.1} km, {:.1}%", record.satellite, record.altitude / 1e3, record.battery);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`gravity`] - Force summation and integration
//! - [`visibility`] - Line-of-sight obstruction
//! - [`subsystems`] - Battery, altimetry, propulsion and radio models
//! - [`satellite`] - A body carrying the subsystems
//! - [`relay`] - Per-tick connectivity resolution
//! - [`system`] - The tick pipeline
//! - [`telemetry`] - Records emitted every tick
//! - [`config`] / [`scenario`] - Scenario definitions and presets

#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod constants;
pub mod error;
pub mod math;
pub mod body;
pub mod gravity;
pub mod visibility;
pub mod subsystems;
pub mod satellite;
pub mod relay;
pub mod telemetry;
pub mod system;
pub mod config;
pub mod scenario;

// Re-export main public types for convenience
pub use body::{BodyId, CelestialBody, LinkTarget, SatelliteId};
pub use config::ScenarioConfig;
pub use error::{Result, SimError};
pub use satellite::Satellite;
pub use system::System;
pub use telemetry::{TelemetryFrame, TelemetryRecord};
