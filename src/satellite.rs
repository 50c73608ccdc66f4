use crate::body::{BodyId, CelestialBody, LinkTarget};
use crate::subsystems::{
    ApsisTracker, BurnCommand, LinkState, ManeuverKind, PowerConfig, PowerInput, PowerSystem, PropulsionInput,
    StationKeeping, StationKeepingConfig, Subsystem,
};
use crate::visibility::LineOfSight;
use tracing::{debug, info};

/// A body with a battery, an altimeter, thrusters and a radio.
#[derive(Debug, Clone)]
pub struct Satellite {
    pub body: CelestialBody,
    orbit_target: BodyId,
    power: PowerSystem,
    tracker: ApsisTracker,
    station_keeping: StationKeeping,
    link: LinkState,
}

impl Satellite {
    pub fn new(
        body: CelestialBody,
        orbit_target: BodyId,
        station_keeping: StationKeepingConfig,
        power: PowerConfig,
        battery_percent: f64,
    ) -> Self {
        Self {
            body,
            orbit_target,
            power: PowerSystem::new(power, battery_percent),
            tracker: ApsisTracker::new(),
            station_keeping: StationKeeping::new(station_keeping),
            link: LinkState::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.body.label()
    }

    pub fn orbit_target(&self) -> BodyId {
        self.orbit_target
    }

    pub fn battery(&self) -> f64 {
        self.power.battery()
    }

    pub fn power(&self) -> &PowerSystem {
        &self.power
    }

    pub fn tracker(&self) -> &ApsisTracker {
        &self.tracker
    }

    pub fn station_keeping(&self) -> &StationKeeping {
        &self.station_keeping
    }

    pub fn link(&self) -> &LinkState {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut LinkState {
        &mut self.link
    }

    pub fn altitude(&self) -> f64 {
        self.tracker.altitude()
    }

    pub fn is_boosting(&self) -> bool {
        self.station_keeping.is_boosting()
    }

    pub fn relay(&self) -> Option<LinkTarget> {
        self.link.relay()
    }

    /// Altitude above the surface of `target`.
    pub fn altitude_above(&self, target: &CelestialBody) -> f64 {
        self.body.distance_to(target) - target.radius
    }

    /// Recomputes battery and apsides, then lets station-keeping act.
    ///
    /// Must run after the gravity step so positions reflect this tick.
    /// The power draw is based on the links resolved during the previous tick.
    pub fn update_subsystems(
        &mut self,
        bodies: &[CelestialBody],
        sun: &CelestialBody,
        line_of_sight: &LineOfSight,
        dt_s: f64,
    ) -> BurnCommand {
        let charging = line_of_sight.is_clear(&self.body, sun, bodies);
        self.power.update(
            PowerInput {
                charging,
                transmitting: self.link.is_transmitting(),
                connections: self.link.connections(),
                attempted_connections: self.link.attempted_connections(),
            },
            dt_s,
        );

        let target = &bodies[self.orbit_target.0];
        let altitude = self.altitude_above(target);
        let reading = self.tracker.update(altitude, dt_s);

        let command = self.station_keeping.update(
            PropulsionInput {
                apsides: self.tracker.get_state(),
                velocity: self.body.velocity,
                mass: self.body.mass,
            },
            dt_s,
        );
        self.apply_burn(&command);

        debug!(
            satellite = self.name(),
            altitude = reading.altitude,
            battery = self.power.battery(),
            charging,
            at_periapsis = reading.at_periapsis,
            at_apoapsis = reading.at_apoapsis,
            "satellite subsystems updated"
        );

        command
    }

    fn apply_burn(&mut self, command: &BurnCommand) {
        self.body.velocity += command.delta_v();

        for (kind, step) in [
            (ManeuverKind::RaisePeriapsis, &command.raise_periapsis),
            (ManeuverKind::LowerApoapsis, &command.lower_apoapsis),
        ] {
            if step.ignited {
                info!(
                    satellite = self.name(),
                    maneuver = %kind,
                    periapsis = self.tracker.periapsis(),
                    apoapsis = self.tracker.apoapsis(),
                    "station-keeping burn started"
                );
            }
            if step.completed {
                info!(satellite = self.name(), maneuver = %kind, "station-keeping burn finished");
            }
        }

        if command.raise_periapsis.completed {
            self.tracker.reset_periapsis();
        }
        if command.lower_apoapsis.completed {
            self.tracker.reset_apoapsis();
        }
    }
}
