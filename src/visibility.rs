//! Line-of-sight obstruction tests between two bodies.

use crate::body::CelestialBody;
use crate::constants::DEFAULT_INTERFERENCE_FACTOR;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineOfSight {
    /// Multiplier applied to obstacle radii.
    pub interference_factor: f64,
}

impl Default for LineOfSight {
    fn default() -> Self {
        Self::new(DEFAULT_INTERFERENCE_FACTOR)
    }
}

impl LineOfSight {
    pub fn new(interference_factor: f64) -> Self {
        Self {
            interference_factor,
        }
    }

    /// First obstacle whose effective disc cuts the line between `source` and `target`.
    ///
    /// `source` and `target` are skipped by identity if they appear among the
    /// obstacles. Which obstacle is reported when several block the path
    /// depends on iteration order.
    pub fn find_obstruction<'a, I>(
        &self,
        source: &CelestialBody,
        target: &CelestialBody,
        obstacles: I,
    ) -> Option<&'a CelestialBody>
    where
        I: IntoIterator<Item = &'a CelestialBody>,
    {
        let (s, t) = (source.position, target.position);

        // a*x + b*y + c = 0 through both centers
        let a = t.y - s.y;
        let b = s.x - t.x;
        let c = t.x * s.y - s.x * t.y;
        let norm = a.hypot(b);
        if norm == 0.0 {
            return None;
        }

        let (min_x, max_x) = (s.x.min(t.x), s.x.max(t.x));
        let (min_y, max_y) = (s.y.min(t.y), s.y.max(t.y));

        obstacles.into_iter().find(|obstacle| {
            if core::ptr::eq(*obstacle, source) || core::ptr::eq(*obstacle, target) {
                return false;
            }

            let effective_radius = obstacle.radius * self.interference_factor;
            let o = obstacle.position;

            let within_x = min_x - effective_radius < o.x && o.x < max_x + effective_radius;
            let within_y = min_y - effective_radius < o.y && o.y < max_y + effective_radius;
            if !(within_x && within_y) {
                return false;
            }

            (a * o.x + b * o.y + c).abs() / norm < effective_radius
        })
    }

    pub fn is_obstructed<'a, I>(&self, source: &CelestialBody, target: &CelestialBody, obstacles: I) -> bool
    where
        I: IntoIterator<Item = &'a CelestialBody>,
    {
        self.find_obstruction(source, target, obstacles).is_some()
    }

    pub fn is_clear<'a, I>(&self, source: &CelestialBody, target: &CelestialBody, obstacles: I) -> bool
    where
        I: IntoIterator<Item = &'a CelestialBody>,
    {
        !self.is_obstructed(source, target, obstacles)
    }
}
