//! Hullpatch - runtime core for a "patch the leaking boat" survival game
//!
//! Core modules:
//! - `sim`: deterministic simulation (state machine, hazards, spawners, flooding)
//! - `settings`: difficulty presets and per-field customization
//! - `events`: synchronous notification fan-out to presentation listeners
//! - `platform`: collaborator traits for engine services (raycasts, scene, audio)
//!
//! Rendering, physics, audio playback, and input devices live behind the
//! `platform` traits; the core only calls into them.

pub mod events;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Difficulty, SettingsProfile, SettingsStore};

/// Game tuning constants
pub mod consts {
    /// Default fixed timestep for headless runs (the sim itself is dt-driven)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Delay before spawners start after the session begins (seconds)
    pub const INITIAL_DELAY_SECS: f32 = 3.0;

    /// Water level at which the boat sinks
    pub const MAX_WATER_HEIGHT: f32 = 5.0;

    /// Flood-rate multiplier applied on each obstacle hit (cumulative)
    pub const OBSTACLE_PENALTY_FACTOR: f32 = 1.2;

    /// Minimum distance between a new leak and any active hazard
    pub const MIN_SPAWN_DISTANCE: f32 = 1.5;

    /// Raycast attempts before a placement attempt is abandoned
    pub const SPAWN_ATTEMPT_BUDGET: u32 = 10;

    /// Max raycast distance when projecting zone samples onto the hull
    pub const SPAWN_RAY_RANGE: f32 = 100.0;

    /// Quiet delay after the last hazard clears before the spawn timer
    /// advances again
    pub const SPAWN_QUIET_DELAY_SECS: f32 = 1.0;

    /// Obstacles closer than this to the ship trip the proximity warning
    pub const OBSTACLE_WARNING_DISTANCE: f32 = 30.0;
    /// Obstacles this far past the ship are retired as expired
    pub const OBSTACLE_EXPIRE_DISTANCE: f32 = 10.0;
    /// Obstacles within this distance of the ship center count as a hit
    pub const OBSTACLE_HIT_DISTANCE: f32 = 3.0;

    /// Camera shake duration (seconds)
    pub const SHAKE_DURATION_SECS: f32 = 0.5;
    /// Initial camera shake magnitude (world units)
    pub const SHAKE_MAGNITUDE: f32 = 0.1;

    /// Lateral obstacle displacement per unit of steering input per second
    pub const STEERING_SPEED: f32 = 5.0;
}
