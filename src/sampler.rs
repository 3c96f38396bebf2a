//! Blue-noise candidate generation
//!
//! Dart throwing with local rejection (Bridson's algorithm): every accepted
//! sample spawns candidates in the annulus `[r, 2r]` around it, and a sample
//! is retired after [`DEFAULT_ATTEMPTS`] consecutive rejected throws.

use crate::error::{ensure_non_negative, ensure_positive, Result};
use crate::geom::Point2D;
use crate::grid::SampleGrid;
use rand::Rng;
use std::f32::consts::TAU;

/// Throws per active sample before it is retired
pub const DEFAULT_ATTEMPTS: u32 = 30;

/// Poisson-disc sampler over the rectangle `[0, width) × [0, height)`
#[derive(Debug, Clone)]
pub struct PoissonDiscSampler {
    width: f32,
    height: f32,
    min_spacing: f32,
    attempts: u32,
    max_samples: Option<usize>,
}

impl PoissonDiscSampler {
    /// Fails when `min_spacing` is not positive or a side is negative
    pub fn new(width: f32, height: f32, min_spacing: f32) -> Result<Self> {
        ensure_positive("min_spacing", min_spacing)?;
        ensure_non_negative("width", width)?;
        ensure_non_negative("height", height)?;
        Ok(PoissonDiscSampler {
            width,
            height,
            min_spacing,
            attempts: DEFAULT_ATTEMPTS,
            max_samples: None,
        })
    }

    /// Sampler for the square of side `2 * half_extent`
    pub fn square(half_extent: f32, min_spacing: f32) -> Result<Self> {
        ensure_positive("vision_range", half_extent)?;
        Self::new(half_extent * 2.0, half_extent * 2.0, min_spacing)
    }

    /// Stop once this many samples were accepted
    pub fn with_max_samples(mut self, max_samples: Option<usize>) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Generate a fresh sample set, in order of acceptance.
    ///
    /// Every point lies inside the rectangle and no two points are closer
    /// than `min_spacing`. An empty rectangle gives no points; one smaller
    /// than `min_spacing` gives a single point.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Point2D> {
        let mut samples = Vec::new();
        if self.width <= 0.0 || self.height <= 0.0 || self.max_samples == Some(0) {
            return samples;
        }

        let mut grid = SampleGrid::new(self.min_spacing);
        let mut active: Vec<usize> = Vec::new();

        let first = Point2D::new(rng.gen_range(0.0..self.width), rng.gen_range(0.0..self.height));
        grid.insert(first, 0);
        samples.push(first);
        active.push(0);

        while !active.is_empty() {
            if self.max_samples.map_or(false, |max| samples.len() >= max) {
                break;
            }

            let slot = rng.gen_range(0..active.len());
            let parent = samples[active[slot]];

            let mut accepted = None;
            for _ in 0..self.attempts {
                let candidate = self.throw_around(parent, rng);
                if self.contains(candidate)
                    && !grid.has_neighbor_within(candidate, &samples, self.min_spacing)
                {
                    accepted = Some(candidate);
                    break;
                }
            }

            match accepted {
                Some(point) => {
                    let index = samples.len();
                    grid.insert(point, index);
                    samples.push(point);
                    active.push(index);
                }
                None => {
                    active.swap_remove(slot);
                }
            }
        }

        samples
    }

    fn throw_around<R: Rng + ?Sized>(&self, parent: Point2D, rng: &mut R) -> Point2D {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(self.min_spacing..self.min_spacing * 2.0);
        Point2D::new(parent.x + radius * angle.cos(), parent.y + radius * angle.sin())
    }

    fn contains(&self, p: Point2D) -> bool {
        p.x >= 0.0 && p.x < self.width && p.y >= 0.0 && p.y < self.height
    }
}
