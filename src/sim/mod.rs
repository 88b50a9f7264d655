//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - dt-driven ticks only, no wall-clock reads
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the collaborator traits
//!
//! Within one tick, state mutation (spawn/resolve/flood-advance) always
//! precedes notification fan-out, so listeners observe post-mutation state.

pub mod flood;
pub mod hazards;
pub mod spawn;
pub mod state;
pub mod steering;
pub mod tick;

pub use flood::FloodModel;
pub use hazards::HazardLifecycle;
pub use spawn::{LeakSpawner, ObstacleSpawn, ObstacleSpawner, SpawnZone};
pub use state::{
    GameSession, Hazard, HazardDetail, HazardId, HazardKind, HazardState, Outcome, Phase,
    Resolution,
};
pub use steering::{ProximitySensor, ShakeEffect, SteeringBridge};
pub use tick::{HullLayout, Session, SpawnerConfig, TickInput, TickIo, tick};
