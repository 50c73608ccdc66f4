//! Physical and simulation constants.

/// Newtonian gravitational constant, m^3 kg^-1 s^-2.
pub const G: f64 = 6.674_08e-11;

/// Astronomical unit in meters.
pub const AU: f64 = 149_597_870_700.0;

pub const MINUTE_S: f64 = 60.0;
pub const HOUR_S: f64 = 3600.0;
pub const DAY_S: f64 = 24.0 * HOUR_S;

/// Battery charge bounds, percent.
pub const BATTERY_MIN: f64 = 0.0;
pub const BATTERY_MAX: f64 = 100.0;

/// Relays below this charge refuse to forward traffic.
pub const DEFAULT_SAFE_BATTERY_LEVEL: f64 = 20.0;

/// Scales obstacle radii in line-of-sight tests.
pub const DEFAULT_INTERFERENCE_FACTOR: f64 = 1.0;

/// Frames kept by the telemetry recorder before the oldest is dropped.
pub const DEFAULT_HISTORY_LENGTH: usize = 15_000;

static_assertions::const_assert!(BATTERY_MIN < DEFAULT_SAFE_BATTERY_LEVEL);
static_assertions::const_assert!(DEFAULT_SAFE_BATTERY_LEVEL < BATTERY_MAX);
static_assertions::const_assert!(DEFAULT_HISTORY_LENGTH > 0);
