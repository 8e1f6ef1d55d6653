//! World-space positions and bounds.

use serde::{Deserialize, Serialize};

pub use glam::Vec3;

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Bounds {
    /// Creates bounds from two corners, ordering each axis.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Checks whether a point lies inside (inclusive).
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Linearly maps `t` in `[0, 1]` on the x and z axes to a point at height `y`.
    #[must_use]
    pub fn lerp_xz(&self, tx: f32, tz: f32, y: f32) -> Vec3 {
        Vec3::new(
            self.min.x + (self.max.x - self.min.x) * tx.clamp(0.0, 1.0),
            y,
            self.min.z + (self.max.z - self.min.z) * tz.clamp(0.0, 1.0),
        )
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 3.0, 10.0))
    }
}
