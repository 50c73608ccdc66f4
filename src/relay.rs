//! Per-tick connectivity resolution between satellites and the ground base.
//!
//! Satellites first try a direct line to the base. Those that fail look for
//! a single relay among the directly connected ones, in satellite order,
//! and take the first candidate that is visible and has enough charge.
//! Chains longer than one relay are never built.

use crate::body::{BodyId, CelestialBody, LinkTarget, SatelliteId};
use crate::constants::DEFAULT_SAFE_BATTERY_LEVEL;
use crate::satellite::Satellite;
use crate::visibility::LineOfSight;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Links established during one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelayReport {
    /// Indexed by satellite; `None` when the satellite found no path this tick.
    pub assignments: Vec<Option<LinkTarget>>,
    pub direct: usize,
    pub relayed: usize,
}

impl RelayReport {
    pub fn unconnected(&self) -> usize {
        self.assignments.len() - self.direct - self.relayed
    }

    pub fn assignment(&self, satellite: SatelliteId) -> Option<LinkTarget> {
        self.assignments.get(satellite.0).copied().flatten()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelayNetwork {
    line_of_sight: LineOfSight,
    safe_battery_level: f64,
}

impl Default for RelayNetwork {
    fn default() -> Self {
        Self::new(LineOfSight::default(), DEFAULT_SAFE_BATTERY_LEVEL)
    }
}

impl RelayNetwork {
    pub fn new(line_of_sight: LineOfSight, safe_battery_level: f64) -> Self {
        Self {
            line_of_sight,
            safe_battery_level,
        }
    }

    pub fn safe_battery_level(&self) -> f64 {
        self.safe_battery_level
    }

    /// Rewrites every satellite's link state for the current positions.
    ///
    /// `bodies` are the obstacles for every line-of-sight test.
    pub fn resolve(&self, bodies: &[CelestialBody], base: BodyId, satellites: &mut [Satellite]) -> RelayReport {
        let base_body = &bodies[base.0];
        let mut report = RelayReport {
            assignments: vec![None; satellites.len()],
            ..RelayReport::default()
        };

        let mut connected = Vec::with_capacity(satellites.len());
        for (index, satellite) in satellites.iter_mut().enumerate() {
            let link = satellite.link_mut();
            link.begin_tick();
            link.record_attempt();

            if self.line_of_sight.is_clear(&satellite.body, base_body, bodies) {
                let target = LinkTarget::Base(base);
                satellite.link_mut().connect(target);
                report.assignments[index] = Some(target);
                report.direct += 1;
                connected.push(index);
            }
        }

        for index in 0..satellites.len() {
            if satellites[index].link().is_connected() {
                continue;
            }

            for &candidate in &connected {
                satellites[index].link_mut().record_attempt();

                let visible = self
                    .line_of_sight
                    .is_clear(&satellites[index].body, &satellites[candidate].body, bodies);
                if !visible || satellites[candidate].battery() <= self.safe_battery_level {
                    continue;
                }

                let target = LinkTarget::Relay(SatelliteId(candidate));
                satellites[index].link_mut().connect(target);
                satellites[candidate].link_mut().add_connection();
                report.assignments[index] = Some(target);
                report.relayed += 1;
                trace!(
                    satellite = satellites[index].name(),
                    relay = satellites[candidate].name(),
                    "routed through relay"
                );
                break;
            }
        }

        for satellite in satellites.iter_mut() {
            satellite.link_mut().finish_tick();
        }

        report
    }
}
