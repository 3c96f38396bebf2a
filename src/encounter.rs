use crate::config::EvaderConfig;
use crate::diagnostics::EvaderSnapshot;
use crate::error::{AvoiderError, Result};
use crate::evader::{Evader, TickReport};
use crate::locomotion::Locomotion;
use crate::oracle::VisibilityOracle;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A pursuer/evader pair sharing one visibility oracle.
///
/// The pair lives here rather than in either agent: each tick takes one
/// position snapshot of both bodies, points the pursuer at the evader and
/// lets the evader decide where to hide.
pub struct Encounter<O, L> {
    oracle: O,
    pursuer: L,
    evader_body: L,
    evader: Evader,
    rng: StdRng,
}

pub struct EncounterBuilder<O, L> {
    config: EvaderConfig,
    oracle: Option<O>,
    pursuer: Option<L>,
    evader_body: Option<L>,
    seed: Option<u64>,
}

impl<O, L> Default for EncounterBuilder<O, L> {
    fn default() -> Self {
        EncounterBuilder {
            config: EvaderConfig::default(),
            oracle: None,
            pursuer: None,
            evader_body: None,
            seed: None,
        }
    }
}

impl<O, L> EncounterBuilder<O, L>
where
    O: VisibilityOracle,
    L: Locomotion,
{
    pub fn config(mut self, config: EvaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn oracle(mut self, oracle: O) -> Self {
        self.oracle = Some(oracle);
        self
    }

    pub fn pursuer(mut self, pursuer: L) -> Self {
        self.pursuer = Some(pursuer);
        self
    }

    pub fn evader_body(mut self, evader_body: L) -> Self {
        self.evader_body = Some(evader_body);
        self
    }

    /// Fix the sampling RNG seed (entropy otherwise)
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Encounter<O, L>> {
        let oracle = self
            .oracle
            .ok_or(AvoiderError::MissingCollaborator("visibility oracle"))?;
        let pursuer = self
            .pursuer
            .ok_or(AvoiderError::MissingCollaborator("pursuer locomotion"))?;
        let evader_body = self
            .evader_body
            .ok_or(AvoiderError::MissingCollaborator("evader locomotion"))?;
        let evader = Evader::new(self.config)?;
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Encounter {
            oracle,
            pursuer,
            evader_body,
            evader,
            rng,
        })
    }
}

impl<O, L> Encounter<O, L>
where
    O: VisibilityOracle,
    L: Locomotion,
{
    pub fn builder() -> EncounterBuilder<O, L> {
        EncounterBuilder::default()
    }

    /// Run one control tick. Moving the bodies is left to the host.
    pub fn tick(&mut self, delta_time: f32) -> TickReport {
        let pursuer_pos = self.pursuer.position();
        let evader_pos = self.evader_body.position();
        self.oracle.sync_agents(pursuer_pos, evader_pos);

        self.pursuer.set_destination(evader_pos);
        self.evader.tick(
            delta_time,
            pursuer_pos,
            &self.oracle,
            &mut self.evader_body,
            &mut self.rng,
        )
    }

    pub fn snapshot(&self, max_points: usize) -> EvaderSnapshot {
        EvaderSnapshot::capture(
            &self.evader,
            self.pursuer.position(),
            self.evader_body.position(),
            max_points,
        )
    }

    pub fn evader(&self) -> &Evader {
        &self.evader
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    pub fn pursuer(&self) -> &L {
        &self.pursuer
    }

    pub fn pursuer_mut(&mut self) -> &mut L {
        &mut self.pursuer
    }

    pub fn evader_body(&self) -> &L {
        &self.evader_body
    }

    pub fn evader_body_mut(&mut self) -> &mut L {
        &mut self.evader_body
    }
}
