//! Hidden/seen classification of candidate points
//!
//! A point is hidden only when the pursuer's ray to it is stopped by the
//! environment *and* the evader's own ray to it does not run into the
//! pursuer. Any other outcome, including degenerate (zero-length) rays,
//! counts as seen. At most two oracle queries are made per point.

use crate::geom::{Point2D, Vec3};
use crate::oracle::{HitTag, VisibilityOracle};
use crate::ray::Ray;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    Seen,
    Hidden,
}

/// Candidates of one sampling episode, split by visibility.
///
/// Both sequences keep sampler order. A point lives in exactly one of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    pub seen: Vec<Point2D>,
    pub hidden: Vec<Point2D>,
}

impl CandidateSet {
    pub fn len(&self) -> usize {
        self.seen.len() + self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty() && self.hidden.is_empty()
    }

    pub fn push(&mut self, point: Point2D, visibility: Visibility) {
        match visibility {
            Visibility::Seen => self.seen.push(point),
            Visibility::Hidden => self.hidden.push(point),
        }
    }
}

/// Where the two agents stand while a candidate set is classified
#[derive(Debug, Clone, Copy)]
pub struct Observers {
    pub pursuer: Vec3,
    pub evader: Vec3,
    /// Height candidate points are lifted to before casting
    pub probe_height: f32,
}

/// Classify a single candidate point
pub fn classify_point<O: VisibilityOracle + ?Sized>(
    oracle: &O,
    observers: &Observers,
    point: Point2D,
) -> Visibility {
    let target = point.elevate(observers.probe_height);

    // Stage 1: can the pursuer see the point?
    let Some(sight) = Ray::between(observers.pursuer, target) else {
        return Visibility::Seen;
    };
    match oracle.cast(&sight) {
        None => return Visibility::Seen,
        Some(hit) if hit.tag == HitTag::Evader => return Visibility::Seen,
        Some(_) => {}
    }

    // Stage 2: would the evader run into the pursuer on the way there?
    let Some(path) = Ray::between(observers.evader, target) else {
        return Visibility::Seen;
    };
    match oracle.cast(&path) {
        Some(hit) if hit.tag == HitTag::Pursuer => Visibility::Seen,
        _ => Visibility::Hidden,
    }
}

/// Partition `points` into a fresh [`CandidateSet`]
pub fn classify<O: VisibilityOracle + ?Sized>(
    oracle: &O,
    observers: &Observers,
    points: &[Point2D],
) -> CandidateSet {
    let mut set = CandidateSet::default();
    for &point in points {
        set.push(point, classify_point(oracle, observers, point));
    }
    set
}
