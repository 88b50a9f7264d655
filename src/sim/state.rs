//! Core session and hazard types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::settings::SettingsProfile;

/// Current phase of the session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Fixed initial delay: no spawning, no timer decrement
    PreGame,
    /// Timer runs, spawners active, flood integrates
    Running,
    /// Terminal; all further ticks no-op
    Ended,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Level timer reached zero before the boat sank
    Survived,
    /// Water reached the maximum height
    Sunk,
}

/// Typed hazard identifier (replaces string tags)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HazardId(pub u32);

/// Hazard category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    Leak,
    Obstacle,
}

/// Lifecycle state of a hazard instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardState {
    Active,
    Resolved,
}

/// Terminal resolution of a hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Leak sealed by the player
    Patched,
    /// Obstacle struck the ship
    Hit,
    /// Obstacle drifted past without hitting
    Expired,
}

/// Kind-specific hazard payload
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardDetail {
    Leak {
        patched: bool,
    },
    Obstacle {
        /// Signed offset along the displacement axis (steering moves this)
        lateral_offset: f32,
        /// Approach speed toward the ship
        speed: f32,
        hit_ship: bool,
    },
}

/// A leak or obstacle instance
///
/// Owned exclusively by `HazardLifecycle`; everything else refers to hazards
/// by [`HazardId`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub id: HazardId,
    pub kind: HazardKind,
    pub position: Vec3,
    /// Session time at creation
    pub spawn_time: f32,
    pub state: HazardState,
    pub detail: HazardDetail,
}

impl Hazard {
    pub fn is_active(&self) -> bool {
        self.state == HazardState::Active
    }

    /// World position including the obstacle's lateral displacement
    pub fn effective_position(&self) -> Vec3 {
        match self.detail {
            HazardDetail::Obstacle { lateral_offset, .. } => {
                self.position + Vec3::X * lateral_offset
            }
            HazardDetail::Leak { .. } => self.position,
        }
    }
}

/// Single-session game state owned by the state machine
///
/// Invariants:
/// - `water_height` is monotonically non-decreasing while Running with
///   active leaks
/// - `patches_held <= max_patches_held`
/// - `outcome` is `Some` exactly when `phase == Ended`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: Phase,
    /// Time since session start, including the pre-game delay
    pub elapsed: f32,
    pub remaining_level_time: f32,
    pub water_height: f32,
    pub max_water_height: f32,
    pub patches_held: u32,
    pub max_patches_held: u32,
    pub outcome: Option<Outcome>,
}

impl GameSession {
    pub fn new(profile: &SettingsProfile, max_water_height: f32) -> Self {
        Self {
            phase: Phase::PreGame,
            elapsed: 0.0,
            remaining_level_time: profile.level_time_secs,
            water_height: 0.0,
            max_water_height,
            patches_held: profile.max_patches_held,
            max_patches_held: profile.max_patches_held,
            outcome: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_initial_state() {
        let profile = SettingsProfile::default();
        let s = GameSession::new(&profile, 5.0);
        assert_eq!(s.phase, Phase::PreGame);
        assert_eq!(s.remaining_level_time, profile.level_time_secs);
        assert_eq!(s.patches_held, profile.max_patches_held);
        assert_eq!(s.water_height, 0.0);
        assert!(s.outcome.is_none());
    }

    #[test]
    fn test_effective_position_applies_lateral_offset() {
        let h = Hazard {
            id: HazardId(1),
            kind: HazardKind::Obstacle,
            position: Vec3::new(0.0, 0.0, 50.0),
            spawn_time: 0.0,
            state: HazardState::Active,
            detail: HazardDetail::Obstacle {
                lateral_offset: 3.0,
                speed: 5.0,
                hit_ship: false,
            },
        };
        assert_eq!(h.effective_position(), Vec3::new(3.0, 0.0, 50.0));
    }
}
