use crate::geom::Vec3;

/// A bounded ray used for line-of-sight queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start of the ray in world space
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Hits farther than this are ignored
    pub max_distance: f32,
}

impl Ray {
    /// Create a ray, normalizing `direction`
    /// Returns `None` when the direction has no length.
    pub fn new(origin: Vec3, direction: Vec3, max_distance: f32) -> Option<Self> {
        let direction = direction.normalized()?;
        Some(Ray {
            origin,
            direction,
            max_distance,
        })
    }

    /// Ray from `from` aimed at `to`, bounded by their separation.
    ///
    /// Coincident points give `None`; callers treat that as an unobstructed
    /// line of sight.
    pub fn between(from: Vec3, to: Vec3) -> Option<Self> {
        let delta = to - from;
        let distance = delta.length();
        Ray::new(from, delta, distance)
    }

    /// Point at distance `t` along the ray
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
