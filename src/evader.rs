//! Hide-from-pursuer decision loop
//!
//! Once per tick the evader checks whether the pursuer can see it. While it
//! is seen (or has not yet been unseen for long enough) it stays `Running`
//! and, whenever it is idle at its destination, samples the neighbourhood
//! for a hidden spot and heads to the farthest one. After the pursuer has
//! lost sight of an idle evader for longer than the debounce, the evader
//! switches to `Stopped` and halts once.

use crate::classifier::{classify, CandidateSet, Observers};
use crate::config::{EvaderConfig, SamplingAnchor};
use crate::error::Result;
use crate::geom::{Point2D, Vec3};
use crate::locomotion::Locomotion;
use crate::oracle::{HitTag, VisibilityOracle};
use crate::ray::Ray;
use crate::sampler::PoissonDiscSampler;
use crate::selector::select_destination;
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvaderState {
    Running,
    Stopped,
}

/// What happened during one [`Evader::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub state: EvaderState,
    /// Pursuer had line of sight this tick
    pub seen: bool,
    /// A sampling episode ran this tick
    pub resampled: bool,
    /// Destination chosen this tick, if any
    pub new_destination: Option<Point2D>,
    /// The one-shot halt fired this tick
    pub halted: bool,
}

/// Whether the pursuer has an unobstructed line to the evader.
///
/// Coincident agents count as seen.
pub fn pursuer_has_sight<O: VisibilityOracle + ?Sized>(oracle: &O, pursuer: Vec3, evader: Vec3) -> bool {
    match Ray::between(pursuer, evader) {
        Some(ray) => matches!(oracle.cast(&ray), Some(hit) if hit.tag == HitTag::Evader),
        None => true,
    }
}

/// Per-agent hiding brain. Owns its candidate set, state and destination.
#[derive(Debug, Clone)]
pub struct Evader {
    config: EvaderConfig,
    sampler: PoissonDiscSampler,
    state: EvaderState,
    time_since_last_seen: f32,
    /// Latched once the halt fired for the current Stopped period
    halted: bool,
    destination: Option<Point2D>,
    candidates: CandidateSet,
    episodes_in_window: u32,
    window_elapsed: f32,
    total_episodes: u64,
}

impl Evader {
    pub fn new(config: EvaderConfig) -> Result<Self> {
        config.validate()?;
        let sampler = PoissonDiscSampler::square(config.vision_range, config.min_spacing)?
            .with_max_samples(config.candidate_cap());
        Ok(Evader {
            config,
            sampler,
            state: EvaderState::Running,
            time_since_last_seen: 0.0,
            halted: false,
            destination: None,
            candidates: CandidateSet::default(),
            episodes_in_window: 0,
            window_elapsed: 0.0,
            total_episodes: 0,
        })
    }

    pub fn config(&self) -> &EvaderConfig {
        &self.config
    }

    pub fn state(&self) -> EvaderState {
        self.state
    }

    pub fn time_since_last_seen(&self) -> f32 {
        self.time_since_last_seen
    }

    /// Currently chosen hiding spot
    pub fn destination(&self) -> Option<Point2D> {
        self.destination
    }

    /// Candidates of the latest episode; the chosen point is not in `hidden`
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn total_episodes(&self) -> u64 {
        self.total_episodes
    }

    /// Advance the decision loop by `delta_time`.
    ///
    /// `pursuer` is this tick's snapshot of the pursuer position; the evader
    /// position is read from `body`.
    pub fn tick<O, L, R>(
        &mut self,
        delta_time: f32,
        pursuer: Vec3,
        oracle: &O,
        body: &mut L,
        rng: &mut R,
    ) -> TickReport
    where
        O: VisibilityOracle + ?Sized,
        L: Locomotion + ?Sized,
        R: Rng + ?Sized,
    {
        let position = body.position();
        let seen = pursuer_has_sight(oracle, pursuer, position);
        let idle = self.destination.is_none() || body.remaining_distance() <= body.stopping_tolerance();

        let mut report = TickReport {
            state: self.state,
            seen,
            resampled: false,
            new_destination: None,
            halted: false,
        };

        // the resample budget window only runs while idling
        if idle {
            self.window_elapsed += delta_time;
            if self.window_elapsed > self.config.resample_window_seconds {
                self.window_elapsed = 0.0;
                self.episodes_in_window = 0;
            }
        }

        if seen {
            if self.state == EvaderState::Stopped {
                info!("Pursuer regained sight after {:.2}s, running", self.time_since_last_seen);
                self.episodes_in_window = 0;
            }
            self.time_since_last_seen = 0.0;
            self.state = EvaderState::Running;
            self.halted = false;
        } else if idle {
            self.time_since_last_seen += delta_time;
            if self.time_since_last_seen > self.config.stop_debounce_seconds {
                self.state = EvaderState::Stopped;
                if !self.halted {
                    info!(
                        "Unseen for {:.2}s while idle, stopping",
                        self.time_since_last_seen
                    );
                    body.halt();
                    self.halted = true;
                    report.halted = true;
                }
            }
        }

        if self.state == EvaderState::Running && idle {
            if self.episodes_in_window < self.config.sample_count_max {
                self.episodes_in_window += 1;
                report.resampled = true;
                report.new_destination = self.resample(pursuer, oracle, body, rng);
            } else {
                debug!(
                    "Resample budget of {} spent for this window",
                    self.config.sample_count_max
                );
            }
        }

        report.state = self.state;
        report
    }

    /// Run one sampling episode and steer `body` to the result.
    ///
    /// The candidate set is rebuilt from scratch. Returns the new destination,
    /// or `None` when no hidden candidate was found (the old one is kept).
    pub fn resample<O, L, R>(&mut self, pursuer: Vec3, oracle: &O, body: &mut L, rng: &mut R) -> Option<Point2D>
    where
        O: VisibilityOracle + ?Sized,
        L: Locomotion + ?Sized,
        R: Rng + ?Sized,
    {
        let position = body.position();
        let points = self.sample_points(position.ground(), rng);
        let observers = Observers {
            pursuer,
            evader: position,
            probe_height: self.config.probe_height,
        };

        self.candidates = classify(oracle, &observers, &points);
        self.total_episodes += 1;
        debug!(
            "Episode {}: {} candidates, {} hidden",
            self.total_episodes,
            self.candidates.len(),
            self.candidates.hidden.len()
        );

        match select_destination(&mut self.candidates.hidden, position.ground()) {
            Some(choice) => {
                self.destination = Some(choice);
                self.episodes_in_window = 0;
                body.set_destination(choice.elevate(self.config.probe_height));
                Some(choice)
            }
            None => {
                info!(
                    "No hidden spot among {} candidates, keeping destination {:?}",
                    self.candidates.len(),
                    self.destination
                );
                None
            }
        }
    }

    /// Fresh candidates inside the sampling square
    fn sample_points<R: Rng + ?Sized>(&self, evader: Point2D, rng: &mut R) -> Vec<Point2D> {
        let center = match self.config.sampling_anchor {
            SamplingAnchor::Origin => Point2D::default(),
            SamplingAnchor::Evader => evader,
        };
        let half = self.config.vision_range;
        let offset = center - Point2D::new(half, half);
        self.sampler
            .generate(rng)
            .into_iter()
            .map(|p| p + offset)
            .collect()
    }
}
