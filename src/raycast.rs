use crate::geom::{Point2D, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle on the ground plane, unbounded in height
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point2D,
    pub max: Point2D,
}

impl Rect {
    pub fn new(min: Point2D, max: Point2D) -> Self {
        Rect {
            min: Point2D::new(min.x.min(max.x), min.y.min(max.y)),
            max: Point2D::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    /// Square of side `2 * half` around `center`
    pub fn centered(center: Point2D, half: f32) -> Self {
        Rect::new(
            Point2D::new(center.x - half, center.y - half),
            Point2D::new(center.x + half, center.y + half),
        )
    }

    pub fn contains(&self, p: Point2D) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Distance along the ray to the rectangle (slab test on the ground plane).
///
/// `direction` is the world-space unit direction, so the returned parameter is
/// a world-space distance even though only x/z take part. A ray starting
/// inside the rectangle hits it at distance 0.
pub fn ray_rect(origin: Vec3, direction: Vec3, max_distance: f32, rect: &Rect) -> Option<f32> {
    let o = origin.ground();
    if rect.contains(o) {
        return Some(0.0);
    }

    let mut t_min = 0.0_f32;
    let mut t_max = max_distance;

    for (o, d, lo, hi) in [
        (o.x, direction.x, rect.min.x, rect.max.x),
        (o.y, direction.z, rect.min.y, rect.max.y),
    ] {
        if d.abs() <= f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d;
        let (t0, t1) = {
            let a = (lo - o) * inv;
            let b = (hi - o) * inv;
            if a < b { (a, b) } else { (b, a) }
        };
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }

    Some(t_min)
}

/// Distance along the ray to a disc on the ground plane.
///
/// A ray that starts inside the disc never reports it: an agent does not
/// occlude rays cast from its own position.
pub fn ray_disc(origin: Vec3, direction: Vec3, max_distance: f32, center: Point2D, radius: f32) -> Option<f32> {
    let o = origin.ground();
    let fx = o.x - center.x;
    let fy = o.y - center.y;
    let c = fx * fx + fy * fy - radius * radius;
    if c <= 0.0 {
        return None;
    }

    let a = direction.x * direction.x + direction.z * direction.z;
    if a <= f32::EPSILON {
        return None;
    }
    let b = fx * direction.x + fy * direction.z;
    if b >= 0.0 {
        // pointing away
        return None;
    }

    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    if t >= 0.0 && t <= max_distance {
        Some(t)
    } else {
        None
    }
}
