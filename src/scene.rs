use crate::error::Result;
use crate::geom::{Point2D, Vec3};
use crate::oracle::{HitInfo, HitTag, VisibilityOracle};
use crate::ray::Ray;
use crate::raycast::{ray_disc, ray_rect, Rect};
use serde::{Deserialize, Serialize};
use std::fs;

/// Circular agent body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub center: Point2D,
    pub radius: f32,
}

impl Body {
    pub fn contains(&self, p: Point2D) -> bool {
        self.center.distance_squared(p) <= self.radius * self.radius
    }
}

/// Analytic visibility world: rectangular walls plus the two agent bodies.
///
/// Walls have unbounded height, so every query is solved on the ground plane.
#[derive(Debug, Clone)]
pub struct Scene {
    pub obstacles: Vec<Rect>,
    pub pursuer: Body,
    pub evader: Body,
}

impl Scene {
    pub fn new(body_radius: f32) -> Self {
        Scene {
            obstacles: Vec::new(),
            pursuer: Body {
                center: Point2D::default(),
                radius: body_radius,
            },
            evader: Body {
                center: Point2D::default(),
                radius: body_radius,
            },
        }
    }

    pub fn with_obstacles(body_radius: f32, obstacles: &[Rect]) -> Self {
        let mut scene = Self::new(body_radius);
        scene.obstacles.extend_from_slice(obstacles);
        scene
    }

    pub fn add_obstacle(&mut self, rect: Rect) {
        self.obstacles.push(rect);
    }

    /// Remove every obstacle covering `p`. Returns how many were removed.
    pub fn remove_obstacles_at(&mut self, p: Point2D) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|rect| !rect.contains(p));
        before - self.obstacles.len()
    }

    /// Add a square obstacle at `p`, or remove the ones already there
    pub fn toggle_obstacle(&mut self, p: Point2D, half_size: f32) {
        if self.remove_obstacles_at(p) == 0 {
            self.add_obstacle(Rect::centered(p, half_size));
        }
    }

    pub fn is_blocked(&self, p: Point2D) -> bool {
        self.obstacles.iter().any(|rect| rect.contains(p))
    }

    pub fn place_agents(&mut self, pursuer: Point2D, evader: Point2D) {
        self.pursuer.center = pursuer;
        self.evader.center = evader;
    }
}

impl VisibilityOracle for Scene {
    /// Nearest hit among walls and agent bodies.
    ///
    /// The body nearest the ray origin is taken to be the caster and never
    /// blocks its own rays. Any other body that already contains the origin
    /// is hit at distance 0, so overlapping agents always see each other.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo> {
        let ray = Ray::new(origin, direction, max_distance)?;
        let mut nearest: Option<(f32, HitTag)> = None;
        let mut consider = |t: Option<f32>, tag: HitTag| {
            if let Some(t) = t {
                if nearest.map_or(true, |(best, _)| t < best) {
                    nearest = Some((t, tag));
                }
            }
        };

        for rect in &self.obstacles {
            consider(ray_rect(ray.origin, ray.direction, ray.max_distance, rect), HitTag::Environment);
        }

        let o = origin.ground();
        let caster = if o.distance_squared(self.pursuer.center) <= o.distance_squared(self.evader.center) {
            HitTag::Pursuer
        } else {
            HitTag::Evader
        };
        for (body, tag) in [(&self.pursuer, HitTag::Pursuer), (&self.evader, HitTag::Evader)] {
            if tag != caster && body.contains(o) {
                consider(Some(0.0), tag);
            } else {
                consider(
                    ray_disc(ray.origin, ray.direction, ray.max_distance, body.center, body.radius),
                    tag,
                );
            }
        }

        nearest.map(|(distance, tag)| HitInfo {
            tag,
            point: ray.point_at(distance),
            distance,
        })
    }

    fn sync_agents(&mut self, pursuer: Vec3, evader: Vec3) {
        self.place_agents(pursuer.ground(), evader.ground());
    }
}

/// Serializable description of a scene and where the agents start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLayout {
    pub obstacles: Vec<Rect>,
    pub pursuer_start: Point2D,
    pub evader_start: Point2D,
}

impl SceneLayout {
    /// Capture the obstacles of `scene` with the given start positions
    pub fn from_scene(scene: &Scene, pursuer_start: Point2D, evader_start: Point2D) -> Self {
        SceneLayout {
            obstacles: scene.obstacles.clone(),
            pursuer_start,
            evader_start,
        }
    }

    /// A courtyard with a few pillars and a long wall, used when no layout file is given
    pub fn courtyard() -> Self {
        let r = |x0: f32, y0: f32, x1: f32, y1: f32| Rect::new(Point2D::new(x0, y0), Point2D::new(x1, y1));
        SceneLayout {
            obstacles: vec![
                r(-6.0, 2.0, 6.0, 3.0),
                r(-8.5, -6.5, -6.5, -4.5),
                r(5.0, -7.0, 7.0, -5.0),
                r(-1.0, -3.5, 1.0, -1.5),
                r(-9.0, 6.0, -4.0, 7.0),
                r(4.0, 6.0, 9.0, 7.0),
            ],
            pursuer_start: Point2D::new(0.0, -9.0),
            evader_start: Point2D::new(0.0, -5.0),
        }
    }

    pub fn build_scene(&self, body_radius: f32) -> Scene {
        let mut scene = Scene::with_obstacles(body_radius, &self.obstacles);
        scene.place_agents(self.pursuer_start, self.evader_start);
        scene
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let layout = serde_json::from_str(&json)?;
        Ok(layout)
    }
}
