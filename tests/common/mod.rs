#![allow(dead_code)]

use avoider::raycast::Rect;
use avoider::{HitInfo, HitTag, Locomotion, Point2D, Scene, Vec3, VisibilityOracle};
use std::cell::Cell;

/// Oracle with canned answers, one for rays cast from the pursuer and one for
/// rays cast from anywhere else. Counts every query.
pub struct ScriptedOracle {
    pub pursuer: Vec3,
    pub from_pursuer: Option<HitTag>,
    pub from_elsewhere: Option<HitTag>,
    pub calls: Cell<usize>,
}

impl ScriptedOracle {
    pub fn new(pursuer: Vec3, from_pursuer: Option<HitTag>, from_elsewhere: Option<HitTag>) -> Self {
        ScriptedOracle {
            pursuer,
            from_pursuer,
            from_elsewhere,
            calls: Cell::new(0),
        }
    }
}

impl VisibilityOracle for ScriptedOracle {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo> {
        self.calls.set(self.calls.get() + 1);
        let tag = if origin == self.pursuer {
            self.from_pursuer
        } else {
            self.from_elsewhere
        };
        let distance = max_distance * 0.5;
        tag.map(|tag| HitInfo {
            tag,
            point: origin + direction.normalized().unwrap_or(Vec3::ZERO) * distance,
            distance,
        })
    }
}

/// Oracle wrapper that counts queries made against a real scene
pub struct CountingOracle<'a> {
    pub inner: &'a Scene,
    pub calls: Cell<usize>,
}

impl<'a> CountingOracle<'a> {
    pub fn new(inner: &'a Scene) -> Self {
        CountingOracle {
            inner,
            calls: Cell::new(0),
        }
    }
}

impl VisibilityOracle for CountingOracle<'_> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<HitInfo> {
        self.calls.set(self.calls.get() + 1);
        self.inner.cast_ray(origin, direction, max_distance)
    }
}

/// Locomotion stand-in that never moves on its own.
///
/// `set_destination` records the call and sets the remaining distance to
/// `travel`; tests tweak `remaining` directly to simulate progress.
#[derive(Debug, Clone)]
pub struct StubBody {
    pub position: Vec3,
    pub remaining: f32,
    pub tolerance: f32,
    pub travel: f32,
    pub destinations: Vec<Vec3>,
    pub halts: u32,
}

impl StubBody {
    pub fn at(x: f32, y: f32) -> Self {
        StubBody {
            position: Point2D::new(x, y).elevate(0.0),
            remaining: 0.0,
            tolerance: 0.1,
            travel: 0.0,
            destinations: Vec::new(),
            halts: 0,
        }
    }

    pub fn with_travel(mut self, travel: f32) -> Self {
        self.travel = travel;
        self
    }
}

impl Locomotion for StubBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destinations.push(destination);
        self.remaining = self.travel;
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining
    }

    fn stopping_tolerance(&self) -> f32 {
        self.tolerance
    }

    fn halt(&mut self) {
        self.halts += 1;
    }
}

pub fn rect(x0: f32, y0: f32, x1: f32, y1: f32) -> Rect {
    Rect::new(Point2D::new(x0, y0), Point2D::new(x1, y1))
}

/// Pursuer at (0, -6), evader at (0, 0), and optionally a wall across y = -3
pub fn standoff_scene(with_wall: bool) -> Scene {
    let obstacles = if with_wall {
        vec![rect(-8.0, -3.5, 8.0, -2.5)]
    } else {
        Vec::new()
    };
    let mut scene = Scene::with_obstacles(0.5, &obstacles);
    scene.place_agents(Point2D::new(0.0, -6.0), Point2D::new(0.0, 0.0));
    scene
}

pub fn standoff_pursuer() -> Vec3 {
    Point2D::new(0.0, -6.0).elevate(0.0)
}

pub fn assert_min_spacing(points: &[Point2D], min_spacing: f32) {
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            let d = a.distance(*b);
            assert!(
                d >= min_spacing - 1e-4,
                "points {:?} and {:?} are only {} apart",
                a,
                b,
                d
            );
        }
    }
}
