//! Direct-summation Newtonian gravity and the fixed-step integrator.
//!
//! Every tick the solver snapshots all point masses, sums the pairwise
//! forces in O(n^2), then advances each body with semi-implicit Euler.
//! Nothing is mutated until every force has been computed, so a
//! coincident pair aborts the tick with the system untouched.

use crate::body::CelestialBody;
use crate::constants::G;
use crate::error::{Result, SimError};
use crate::math::{decompose, Vec2};
use tracing::trace;

/// Position and mass of a body frozen at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassPoint {
    pub position: Vec2,
    pub mass: f64,
}

impl From<&CelestialBody> for MassPoint {
    fn from(body: &CelestialBody) -> Self {
        Self {
            position: body.position,
            mass: body.mass,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySolver {
    gravitational_constant: f64,
}

impl Default for GravitySolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GravitySolver {
    pub fn new() -> Self {
        Self::with_constant(G)
    }

    pub fn with_constant(gravitational_constant: f64) -> Self {
        Self {
            gravitational_constant,
        }
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.gravitational_constant
    }

    /// Force exerted on `a` by `b`, pointing from `a` towards `b`.
    ///
    /// Returns `None` when the two points coincide.
    pub fn pairwise_force(&self, a: &MassPoint, b: &MassPoint) -> Option<Vec2> {
        let delta = b.position - a.position;
        let distance = delta.norm();
        if distance == 0.0 {
            return None;
        }

        let force = self.gravitational_constant * a.mass * b.mass / (distance * distance);
        Some(decompose(force, delta, distance))
    }

    /// Net force on every point from all the others.
    ///
    /// Fails with the indices of the first coincident pair found.
    pub fn net_forces(&self, points: &[MassPoint]) -> core::result::Result<Vec<Vec2>, (usize, usize)> {
        let mut forces = vec![Vec2::ZERO; points.len()];

        for (i, force) in forces.iter_mut().enumerate() {
            for (j, other) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                *force += self.pairwise_force(&points[i], other).ok_or((i, j))?;
            }
        }

        Ok(forces)
    }

    /// Advances every body by one tick of `dt_s` seconds.
    pub fn step<'a, I>(&self, bodies: I, dt_s: f64) -> Result<()>
    where
        I: IntoIterator<Item = &'a mut CelestialBody>,
    {
        let mut bodies: Vec<&mut CelestialBody> = bodies.into_iter().collect();
        let points: Vec<MassPoint> = bodies.iter().map(|b| MassPoint::from(&**b)).collect();

        let forces = self.net_forces(&points).map_err(|(i, j)| SimError::CoincidentBodies {
            first: bodies[i].label().to_string(),
            second: bodies[j].label().to_string(),
        })?;

        for (body, force) in bodies.iter_mut().zip(forces) {
            body.apply_force(force, dt_s);
            debug_assert!(body.position.is_finite(), "{} left the finite plane", body.label());
        }

        trace!(bodies = points.len(), dt_s, "integrated gravity step");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, mass: f64) -> MassPoint {
        MassPoint {
            position: Vec2::new(x, y),
            mass,
        }
    }

    #[test]
    fn test_pairwise_force_points_towards_other() {
        let solver = GravitySolver::with_constant(1.0);
        let f = solver.pairwise_force(&point(0.0, 0.0, 2.0), &point(2.0, 0.0, 3.0)).unwrap();
        assert!((f.x - 1.5).abs() < 1e-12);
        assert_eq!(f.y, 0.0);
    }

    #[test]
    fn test_coincident_points_report_pair() {
        let solver = GravitySolver::new();
        let points = [point(1.0, 1.0, 1.0), point(5.0, 5.0, 1.0), point(1.0, 1.0, 1.0)];
        assert_eq!(solver.net_forces(&points), Err((0, 2)));
    }

    #[test]
    fn test_single_body_feels_nothing() {
        let solver = GravitySolver::new();
        let forces = solver.net_forces(&[point(3.0, 4.0, 10.0)]).unwrap();
        assert_eq!(forces, vec![Vec2::ZERO]);
    }
}
