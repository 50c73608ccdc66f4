use crate::body::{BodyId, CelestialBody, SatelliteId};
use crate::error::{Result, SimError};
use crate::gravity::GravitySolver;
use crate::math::Vec2;
use crate::relay::{RelayNetwork, RelayReport};
use crate::satellite::Satellite;
use crate::telemetry::{TelemetryFrame, TelemetryRecord, TelemetryRecorder};
use crate::visibility::LineOfSight;
use tracing::{debug, warn};

/// A running scenario: celestial bodies, satellites and the tick pipeline.
///
/// Each [`tick`](System::tick) integrates gravity for every body, updates
/// every satellite's battery, apsides and station-keeping, resolves relay
/// connectivity, and returns the resulting telemetry frame.
#[derive(Debug, Clone)]
pub struct System {
    bodies: Vec<CelestialBody>,
    satellites: Vec<Satellite>,
    sun: BodyId,
    ground_base: BodyId,
    dt_s: f64,
    solver: GravitySolver,
    line_of_sight: LineOfSight,
    relay_network: RelayNetwork,
    tick: u64,
    last_report: RelayReport,
}

impl System {
    /// Sun and ground base default to the first and second celestial body.
    pub fn new(bodies: Vec<CelestialBody>, satellites: Vec<Satellite>, dt_s: f64) -> Result<Self> {
        if bodies.len() < 2 {
            return Err(SimError::MissingBodies);
        }
        Self::with_references(bodies, satellites, BodyId(0), BodyId(1), dt_s)
    }

    /// Builds a system with an explicit sun and ground base.
    pub fn with_references(
        bodies: Vec<CelestialBody>,
        satellites: Vec<Satellite>,
        sun: BodyId,
        ground_base: BodyId,
        dt_s: f64,
    ) -> Result<Self> {
        if !(dt_s.is_finite() && dt_s > 0.0) {
            return Err(SimError::InvalidTimeStep(dt_s));
        }

        for body in &bodies {
            body.validate()?;
        }
        for id in [sun, ground_base] {
            if id.0 >= bodies.len() {
                return Err(SimError::UnknownBody(format!("body #{}", id.0)));
            }
        }
        for satellite in &satellites {
            satellite.body.validate()?;
            if satellite.orbit_target().0 >= bodies.len() {
                return Err(SimError::UnknownBody(format!(
                    "orbit target #{} of {}",
                    satellite.orbit_target().0,
                    satellite.name()
                )));
            }
        }

        let satellite_count = satellites.len();
        Ok(Self {
            bodies,
            satellites,
            sun,
            ground_base,
            dt_s,
            solver: GravitySolver::new(),
            line_of_sight: LineOfSight::default(),
            relay_network: RelayNetwork::default(),
            tick: 0,
            last_report: RelayReport {
                assignments: vec![None; satellite_count],
                ..RelayReport::default()
            },
        })
    }

    pub fn with_solver(mut self, solver: GravitySolver) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_line_of_sight(mut self, line_of_sight: LineOfSight) -> Self {
        self.line_of_sight = line_of_sight;
        self
    }

    pub fn with_relay_network(mut self, relay_network: RelayNetwork) -> Self {
        self.relay_network = relay_network;
        self
    }

    /// Advances the whole system by one time step.
    ///
    /// A coincident pair of bodies aborts the tick before anything moves.
    pub fn tick(&mut self) -> Result<TelemetryFrame> {
        let satellite_bodies = self.satellites.iter_mut().map(|s| &mut s.body);
        self.solver.step(self.bodies.iter_mut().chain(satellite_bodies), self.dt_s)?;

        let sun = &self.bodies[self.sun.0];
        for satellite in &mut self.satellites {
            satellite.update_subsystems(&self.bodies, sun, &self.line_of_sight, self.dt_s);
        }

        let report = self
            .relay_network
            .resolve(&self.bodies, self.ground_base, &mut self.satellites);
        self.log_lost_links(&report);
        self.last_report = report;

        self.tick += 1;
        debug!(
            tick = self.tick,
            direct = self.last_report.direct,
            relayed = self.last_report.relayed,
            "tick complete"
        );

        Ok(self.telemetry())
    }

    /// Runs `ticks` steps and returns every frame produced.
    pub fn run(&mut self, ticks: u64) -> Result<Vec<TelemetryFrame>> {
        (0..ticks).map(|_| self.tick()).collect()
    }

    /// Runs `ticks` steps into a recorder.
    pub fn run_recorded(&mut self, ticks: u64, recorder: &mut TelemetryRecorder) -> Result<()> {
        for _ in 0..ticks {
            let frame = self.tick()?;
            recorder.record(frame);
        }
        Ok(())
    }

    fn log_lost_links(&self, report: &RelayReport) {
        let previous = &self.last_report.assignments;
        for (index, assignment) in report.assignments.iter().enumerate() {
            let was_connected = previous.get(index).copied().flatten().is_some();
            if was_connected && assignment.is_none() {
                warn!(
                    satellite = self.satellites[index].name(),
                    tick = self.tick + 1,
                    "satellite lost all connectivity"
                );
            }
        }
    }

    /// Current telemetry, one record per satellite.
    pub fn telemetry(&self) -> TelemetryFrame {
        TelemetryFrame {
            tick: self.tick,
            time_s: self.elapsed_s(),
            records: self.satellites.iter().map(TelemetryRecord::from_satellite).collect(),
        }
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    pub fn satellite(&self, id: SatelliteId) -> Option<&Satellite> {
        self.satellites.get(id.0)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id.0)
    }

    pub fn satellite_mut(&mut self, id: SatelliteId) -> Option<&mut Satellite> {
        self.satellites.get_mut(id.0)
    }

    pub fn find_body(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name.as_deref() == Some(name))
            .map(BodyId)
    }

    pub fn find_satellite(&self, name: &str) -> Option<SatelliteId> {
        self.satellites
            .iter()
            .position(|s| s.body.name.as_deref() == Some(name))
            .map(SatelliteId)
    }

    pub fn sun(&self) -> BodyId {
        self.sun
    }

    pub fn ground_base(&self) -> BodyId {
        self.ground_base
    }

    pub fn dt_s(&self) -> f64 {
        self.dt_s
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_s(&self) -> f64 {
        self.tick as f64 * self.dt_s
    }

    pub fn last_relay_report(&self) -> &RelayReport {
        &self.last_report
    }

    /// Sum of momenta over bodies and satellites.
    pub fn total_momentum(&self) -> Vec2 {
        self.bodies
            .iter()
            .chain(self.satellites.iter().map(|s| &s.body))
            .fold(Vec2::ZERO, |acc, body| acc + body.momentum())
    }
}
