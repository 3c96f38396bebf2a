pub mod classifier;
pub mod config;
pub mod diagnostics;
pub mod encounter;
pub mod error;
pub mod evader;
pub mod geom;
pub mod grid;
pub mod locomotion;
pub mod oracle;
pub mod ray;
pub mod raycast;
pub mod sampler;
pub mod scene;
pub mod selector;

pub use classifier::{classify, classify_point, CandidateSet, Observers, Visibility};
pub use config::{Config, EvaderConfig, SamplingAnchor};
pub use diagnostics::EvaderSnapshot;
pub use encounter::{Encounter, EncounterBuilder};
pub use error::{AvoiderError, Result};
pub use evader::{pursuer_has_sight, Evader, EvaderState, TickReport};
pub use geom::{Point2D, Vec3};
pub use locomotion::{Actor, Locomotion};
pub use oracle::{HitInfo, HitTag, VisibilityOracle};
pub use sampler::PoissonDiscSampler;
pub use scene::{Scene, SceneLayout};
pub use selector::select_destination;
