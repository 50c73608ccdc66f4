use super::Subsystem;
use crate::constants::{BATTERY_MAX, BATTERY_MIN};
use serde::{Deserialize, Serialize};

const SOLAR_CHARGE_RATE: f64 = 0.02;
const TRANSMISSION_RATE: f64 = 0.005;
const BASELINE_DISCHARGE_RATE: f64 = 0.001;
const CONNECTION_RATE: f64 = 0.005;

/// Battery rates in percent per simulated second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerConfig {
    pub solar_charge_rate: f64,
    pub transmission_rate: f64,
    pub baseline_discharge_rate: f64,
    pub connection_rate: f64,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            solar_charge_rate: SOLAR_CHARGE_RATE,
            transmission_rate: TRANSMISSION_RATE,
            baseline_discharge_rate: BASELINE_DISCHARGE_RATE,
            connection_rate: CONNECTION_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerInput {
    /// Sun is in line of sight.
    pub charging: bool,
    pub transmitting: bool,
    pub connections: u32,
    pub attempted_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerState {
    pub battery_percent: f64,
    pub charging: bool,
    /// Last applied rate, percent per second.
    pub net_rate: f64,
}

#[derive(Debug, Clone)]
pub struct PowerSystem {
    config: PowerConfig,
    state: PowerState,
}

impl PowerSystem {
    pub fn new(config: PowerConfig, battery_percent: f64) -> Self {
        Self {
            config,
            state: PowerState {
                battery_percent: battery_percent.clamp(BATTERY_MIN, BATTERY_MAX),
                charging: false,
                net_rate: 0.0,
            },
        }
    }

    pub fn battery(&self) -> f64 {
        self.state.battery_percent
    }

    pub fn config(&self) -> &PowerConfig {
        &self.config
    }

    /// Net charge rate for the given conditions, before clamping.
    pub fn rate(&self, input: &PowerInput) -> f64 {
        let charge = if input.charging { self.config.solar_charge_rate } else { 0.0 };
        let transmission = if input.transmitting {
            self.config.transmission_rate * f64::from(input.connections)
        } else {
            0.0
        };

        charge
            - transmission
            - self.config.baseline_discharge_rate
            - self.config.connection_rate * f64::from(input.attempted_connections)
    }
}

impl Default for PowerSystem {
    fn default() -> Self {
        Self::new(PowerConfig::default(), BATTERY_MAX)
    }
}

impl Subsystem for PowerSystem {
    type Input = PowerInput;
    type Output = ();
    type State = PowerState;

    fn update(&mut self, input: PowerInput, dt_s: f64) {
        let rate = self.rate(&input);
        let battery = (self.state.battery_percent + rate * dt_s).clamp(BATTERY_MIN, BATTERY_MAX);

        self.state = PowerState {
            battery_percent: battery,
            charging: input.charging,
            net_rate: rate,
        };

        debug_assert!(
            (BATTERY_MIN..=BATTERY_MAX).contains(&self.state.battery_percent),
            "Battery level {} outside [{}, {}]",
            self.state.battery_percent, BATTERY_MIN, BATTERY_MAX
        );
    }

    fn get_state(&self) -> PowerState {
        self.state
    }
}
