use crate::geom::Vec3;
use crate::ray::Ray;
use serde::{Deserialize, Serialize};

/// What a line-of-sight ray ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HitTag {
    /// The pursuing agent's body
    Pursuer,
    /// The evading agent's body
    Evader,
    /// Walls, props and anything else that blocks sight
    Environment,
}

/// First obstruction along a ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    pub tag: HitTag,
    /// Hit point in world space
    pub point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
}

/// Answers "what does this ray hit first" queries.
///
/// Implementations may be expensive (a physics engine, a BVH, analytic
/// geometry); callers keep the number of queries per tick bounded.
pub trait VisibilityOracle {
    /// Cast a ray and report the nearest hit within `max_distance`.
    /// `direction` need not be normalized.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo>;

    fn cast(&self, ray: &Ray) -> Option<HitInfo> {
        self.cast_ray(ray.origin, ray.direction, ray.max_distance)
    }

    /// Refresh the oracle's copy of the two agent bodies.
    /// Called once per tick before any query of that tick.
    fn sync_agents(&mut self, _pursuer: Vec3, _evader: Vec3) {}
}

impl<T: VisibilityOracle + ?Sized> VisibilityOracle for &T {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo> {
        (**self).cast_ray(origin, direction, max_distance)
    }
}

impl<T: VisibilityOracle + ?Sized> VisibilityOracle for Box<T> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo> {
        (**self).cast_ray(origin, direction, max_distance)
    }

    fn sync_agents(&mut self, pursuer: Vec3, evader: Vec3) {
        (**self).sync_agents(pursuer, evader)
    }
}
