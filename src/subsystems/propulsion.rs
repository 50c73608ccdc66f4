//! Station-keeping controller.
//!
//! Two independent burn state machines watch the tracked apsides:
//!
//! - lowering the apoapsis burns retrograde while passing periapsis,
//! - raising the periapsis burns prograde while passing apoapsis.
//!
//! Each machine counts a fixed number of burn ticks and then resets the
//! extremum it corrects, so a fresh one is measured over the next orbit.
//! Both may burn during the same tick; they do not coordinate.

use super::altimetry::ApsisState;
use super::Subsystem;
use crate::math::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationKeepingConfig {
    /// Lowest acceptable periapsis, m.
    pub min_altitude: f64,
    /// Highest acceptable apoapsis, m.
    pub max_altitude: f64,
    /// Engine thrust, N.
    pub thrust_force: f64,
    /// Length of a single correction burn, s.
    pub burn_duration: f64,
}

impl StationKeepingConfig {
    /// Burn length rounded to whole ticks.
    pub fn burn_ticks(&self, dt_s: f64) -> u32 {
        (self.burn_duration / dt_s).round() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverKind {
    RaisePeriapsis,
    LowerApoapsis,
}

impl ManeuverKind {
    /// +1 for prograde thrust, -1 for retrograde.
    pub fn direction(self) -> f64 {
        match self {
            ManeuverKind::RaisePeriapsis => 1.0,
            ManeuverKind::LowerApoapsis => -1.0,
        }
    }
}

impl core::fmt::Display for ManeuverKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ManeuverKind::RaisePeriapsis => write!(f, "raise-periapsis"),
            ManeuverKind::LowerApoapsis => write!(f, "lower-apoapsis"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManeuverPhase {
    Idle,
    Burning { remaining_ticks: u32 },
}

/// What one maneuver did during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ManeuverStep {
    pub ignited: bool,
    /// The engine fired this tick.
    pub thrusting: bool,
    pub delta_v: Vec2,
    /// Countdown hit zero; the corrected extremum must be reset.
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct BurnManeuver {
    kind: ManeuverKind,
    phase: ManeuverPhase,
    burns_completed: u32,
}

impl BurnManeuver {
    pub fn new(kind: ManeuverKind) -> Self {
        Self {
            kind,
            phase: ManeuverPhase::Idle,
            burns_completed: 0,
        }
    }

    pub fn kind(&self) -> ManeuverKind {
        self.kind
    }

    pub fn phase(&self) -> ManeuverPhase {
        self.phase
    }

    pub fn is_burning(&self) -> bool {
        matches!(self.phase, ManeuverPhase::Burning { .. })
    }

    pub fn burns_completed(&self) -> u32 {
        self.burns_completed
    }

    /// Advances the state machine by one tick.
    ///
    /// `trigger` only ignites an idle engine. `thrust_dv` is the full
    /// prograde delta-v one tick of burning produces.
    pub fn step(&mut self, trigger: bool, burn_ticks: u32, heading: f64, thrust_dv: f64) -> ManeuverStep {
        let mut step = ManeuverStep::default();

        if trigger && self.phase == ManeuverPhase::Idle {
            self.phase = ManeuverPhase::Burning {
                remaining_ticks: burn_ticks,
            };
            step.ignited = true;
        }

        if let ManeuverPhase::Burning { remaining_ticks } = self.phase {
            let mut remaining = remaining_ticks;
            if remaining > 0 {
                step.thrusting = true;
                step.delta_v = Vec2::from_polar(self.kind.direction() * thrust_dv, heading);
                remaining -= 1;
            }

            if remaining == 0 {
                self.phase = ManeuverPhase::Idle;
                self.burns_completed = self.burns_completed.saturating_add(1);
                step.completed = true;
            } else {
                self.phase = ManeuverPhase::Burning {
                    remaining_ticks: remaining,
                };
            }
        }

        step
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropulsionInput {
    pub apsides: ApsisState,
    pub velocity: Vec2,
    pub mass: f64,
}

/// Combined output of both maneuvers for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BurnCommand {
    pub raise_periapsis: ManeuverStep,
    pub lower_apoapsis: ManeuverStep,
}

impl BurnCommand {
    pub fn delta_v(&self) -> Vec2 {
        self.raise_periapsis.delta_v + self.lower_apoapsis.delta_v
    }

    pub fn is_thrusting(&self) -> bool {
        self.raise_periapsis.thrusting || self.lower_apoapsis.thrusting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropulsionState {
    pub raise_periapsis: ManeuverPhase,
    pub lower_apoapsis: ManeuverPhase,
    /// Either engine fired during the last update.
    pub boosting: bool,
    pub burns_completed: u32,
}

#[derive(Debug, Clone)]
pub struct StationKeeping {
    config: StationKeepingConfig,
    raise_periapsis: BurnManeuver,
    lower_apoapsis: BurnManeuver,
    boosting: bool,
}

impl StationKeeping {
    pub fn new(config: StationKeepingConfig) -> Self {
        Self {
            config,
            raise_periapsis: BurnManeuver::new(ManeuverKind::RaisePeriapsis),
            lower_apoapsis: BurnManeuver::new(ManeuverKind::LowerApoapsis),
            boosting: false,
        }
    }

    pub fn config(&self) -> &StationKeepingConfig {
        &self.config
    }

    pub fn maneuver(&self, kind: ManeuverKind) -> &BurnManeuver {
        match kind {
            ManeuverKind::RaisePeriapsis => &self.raise_periapsis,
            ManeuverKind::LowerApoapsis => &self.lower_apoapsis,
        }
    }

    /// Thrust was applied during the last update, including the final tick
    /// of a burn that has since gone idle.
    pub fn is_boosting(&self) -> bool {
        self.boosting
    }
}

impl Subsystem for StationKeeping {
    type Input = PropulsionInput;
    type Output = BurnCommand;
    type State = PropulsionState;

    fn update(&mut self, input: PropulsionInput, dt_s: f64) -> BurnCommand {
        let apsides = input.apsides;
        let burn_ticks = self.config.burn_ticks(dt_s);
        let heading = input.velocity.heading();
        let thrust_dv = self.config.thrust_force / input.mass * dt_s;

        let lower_trigger = apsides.apoapsis > self.config.max_altitude && apsides.at_periapsis;
        let raise_trigger = apsides.periapsis < self.config.min_altitude && apsides.at_apoapsis;

        let command = BurnCommand {
            lower_apoapsis: self.lower_apoapsis.step(lower_trigger, burn_ticks, heading, thrust_dv),
            raise_periapsis: self.raise_periapsis.step(raise_trigger, burn_ticks, heading, thrust_dv),
        };
        self.boosting = command.is_thrusting();
        command
    }

    fn get_state(&self) -> PropulsionState {
        PropulsionState {
            raise_periapsis: self.raise_periapsis.phase(),
            lower_apoapsis: self.lower_apoapsis.phase(),
            boosting: self.is_boosting(),
            burns_completed: self.raise_periapsis.burns_completed() + self.lower_apoapsis.burns_completed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_maneuver_ignores_missing_trigger() {
        let mut maneuver = BurnManeuver::new(ManeuverKind::LowerApoapsis);
        let step = maneuver.step(false, 5, 0.0, 1.0);
        assert_eq!(step, ManeuverStep::default());
        assert_eq!(maneuver.phase(), ManeuverPhase::Idle);
    }

    #[test]
    fn test_retrograde_burn_opposes_heading() {
        let mut maneuver = BurnManeuver::new(ManeuverKind::LowerApoapsis);
        let step = maneuver.step(true, 3, 0.0, 2.0);
        assert!(step.ignited);
        assert!(step.thrusting);
        assert!((step.delta_v.x + 2.0).abs() < 1e-12);
        assert_eq!(maneuver.phase(), ManeuverPhase::Burning { remaining_ticks: 2 });
    }

    #[test]
    fn test_trigger_while_burning_does_not_restart() {
        let mut maneuver = BurnManeuver::new(ManeuverKind::RaisePeriapsis);
        maneuver.step(true, 3, 0.0, 1.0);
        let step = maneuver.step(true, 3, 0.0, 1.0);
        assert!(!step.ignited);
        assert_eq!(maneuver.phase(), ManeuverPhase::Burning { remaining_ticks: 1 });
    }

    #[test]
    fn test_zero_length_burn_completes_immediately() {
        let mut maneuver = BurnManeuver::new(ManeuverKind::RaisePeriapsis);
        let step = maneuver.step(true, 0, 0.0, 1.0);
        assert!(step.ignited);
        assert!(step.completed);
        assert!(!step.thrusting);
        assert_eq!(step.delta_v, Vec2::ZERO);
        assert_eq!(maneuver.phase(), ManeuverPhase::Idle);
    }

    #[test]
    fn test_final_burn_tick_still_counts_as_boosting() {
        let mut keeper = StationKeeping::new(StationKeepingConfig {
            min_altitude: 0.0,
            max_altitude: 100.0,
            thrust_force: 1.0,
            burn_duration: 60.0,
        });
        let input = PropulsionInput {
            apsides: ApsisState {
                altitude: 200.0,
                periapsis: 200.0,
                apoapsis: 200.0,
                at_periapsis: true,
                at_apoapsis: true,
            },
            velocity: Vec2::new(1.0, 0.0),
            mass: 10.0,
        };

        let command = keeper.update(input, 60.0);
        assert!(command.lower_apoapsis.completed);
        assert!(command.is_thrusting());
        assert!(keeper.is_boosting());
        assert!(!keeper.maneuver(ManeuverKind::LowerApoapsis).is_burning());

        let idle = PropulsionInput {
            apsides: ApsisState {
                at_periapsis: false,
                at_apoapsis: false,
                ..input.apsides
            },
            ..input
        };
        keeper.update(idle, 60.0);
        assert!(!keeper.is_boosting());
    }
}
