use crate::geom::{Point2D, Vec3};

/// Moves an agent toward a destination. The evader only steers through this.
pub trait Locomotion {
    /// Current world position
    fn position(&self) -> Vec3;

    fn set_destination(&mut self, destination: Vec3);

    /// Distance still to travel; 0 when there is no destination
    fn remaining_distance(&self) -> f32;

    /// Remaining distance at which the agent counts as arrived
    fn stopping_tolerance(&self) -> f32;

    /// Kill the current velocity immediately
    fn halt(&mut self);
}

/// Straight-line mover used as the demo's and tests' locomotion
#[derive(Clone, Debug)]
pub struct Actor {
    /// Floating-point position on the ground plane
    pub fpos_x: f32,
    pub fpos_y: f32,
    /// Height the actor stands at
    pub elevation: f32,

    /// Top speed in world units per second
    pub speed: f32,
    /// Units per second squared; 0 means full speed instantly
    pub acceleration: f32,
    /// Current speed
    pub velocity: f32,
    /// Arrival tolerance
    pub stopping_distance: f32,

    /// Destination (None if no destination set)
    pub dest: Option<Point2D>,
}

impl Actor {
    /// Create a new actor at the given ground position
    pub fn new(fpos_x: f32, fpos_y: f32, speed: f32) -> Self {
        Actor {
            fpos_x,
            fpos_y,
            elevation: 0.0,
            speed,
            acceleration: 0.0,
            velocity: 0.0,
            stopping_distance: 0.0,
            dest: None,
        }
    }

    pub fn with_acceleration(mut self, acceleration: f32) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance;
        self
    }

    pub fn ground_position(&self) -> Point2D {
        Point2D::new(self.fpos_x, self.fpos_y)
    }

    /// Teleport, dropping any destination
    pub fn place(&mut self, p: Point2D) {
        self.fpos_x = p.x;
        self.fpos_y = p.y;
        self.dest = None;
        self.velocity = 0.0;
    }

    /// Clear the destination
    pub fn clear_destination(&mut self) {
        self.dest = None;
    }

    /// Move toward the destination (call once per frame)
    /// Returns true if the actor is at rest at (or without) a destination
    pub fn update(&mut self, delta_time: f32) -> bool {
        let Some(dest) = self.dest else {
            self.velocity = 0.0;
            return true;
        };

        let dx = dest.x - self.fpos_x;
        let dy = dest.y - self.fpos_y;
        let distance = (dx * dx + dy * dy).sqrt();

        if distance <= self.stopping_distance {
            self.velocity = 0.0;
            self.clear_destination();
            return true;
        }

        self.velocity = if self.acceleration > 0.0 {
            (self.velocity + self.acceleration * delta_time).min(self.speed)
        } else {
            self.speed
        };

        let movement_this_frame = self.velocity * delta_time;
        if distance <= movement_this_frame {
            // Snap to destination
            self.fpos_x = dest.x;
            self.fpos_y = dest.y;
            self.velocity = 0.0;
            self.clear_destination();
            return true;
        }

        self.fpos_x += dx / distance * movement_this_frame;
        self.fpos_y += dy / distance * movement_this_frame;
        false
    }
}

impl Locomotion for Actor {
    fn position(&self) -> Vec3 {
        self.ground_position().elevate(self.elevation)
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.dest = Some(destination.ground());
    }

    fn remaining_distance(&self) -> f32 {
        self.dest
            .map_or(0.0, |dest| dest.distance(self.ground_position()))
    }

    fn stopping_tolerance(&self) -> f32 {
        self.stopping_distance
    }

    fn halt(&mut self) {
        self.velocity = 0.0;
        self.clear_destination();
    }
}
