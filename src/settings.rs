//! Difficulty presets and the settings store
//!
//! Holds the effective session parameters. A session resolves one of three
//! built-in presets, or flips to `Custom` the moment any single field is
//! overridden. No numeric validation happens here; callers own their ranges.

use serde::{Deserialize, Serialize};

/// Difficulty tag for a settings profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    /// Player customized at least one field individually
    Custom,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Custom => "Custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "norm" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            "custom" => Some(Difficulty::Custom),
            _ => None,
        }
    }
}

/// Effective session parameters
///
/// Immutable once resolved for a session; field-by-field mutation only
/// happens through [`SettingsStore::apply_override`] while in Custom mode.
/// Invariant (documented, not enforced): min <= max for both interval pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsProfile {
    pub difficulty: Difficulty,

    // === Level Timer ===
    /// Seconds until help arrives (win condition)
    pub level_time_secs: f32,

    // === Player ===
    /// Patch inventory cap
    pub max_patches_held: u32,

    // === Flood ===
    /// Water rise per active leak per second
    pub water_rise_rate: f32,

    // === Leaks ===
    pub min_leak_interval: f32,
    pub max_leak_interval: f32,
    /// Concurrency cap per spawner
    pub max_leaks_per_spawner: usize,

    // === Ship Obstacles ===
    pub obstacle_speed: f32,
    /// Half-range of random lateral spawn displacement
    pub displacement_range: f32,
    pub min_obstacle_interval: f32,
    pub max_obstacle_interval: f32,
    /// Enables steering and the obstacle spawner
    pub steering_enabled: bool,
}

impl Default for SettingsProfile {
    fn default() -> Self {
        Self::preset(Difficulty::Normal)
    }
}

impl SettingsProfile {
    /// Built-in preset values for Easy/Normal/Hard
    ///
    /// `Custom` has no preset; asking for it returns Normal values with the
    /// Custom tag so callers still get something sensible.
    pub fn preset(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                difficulty,
                level_time_secs: 45.0,
                max_patches_held: 8,
                water_rise_rate: 0.008,
                min_leak_interval: 8.0,
                max_leak_interval: 20.0,
                max_leaks_per_spawner: 5,
                obstacle_speed: 4.0,
                displacement_range: 8.0,
                min_obstacle_interval: 4.0,
                max_obstacle_interval: 8.0,
                steering_enabled: false,
            },
            Difficulty::Normal | Difficulty::Custom => Self {
                difficulty,
                level_time_secs: 60.0,
                max_patches_held: 5,
                water_rise_rate: 0.01,
                min_leak_interval: 5.0,
                max_leak_interval: 15.0,
                max_leaks_per_spawner: 10,
                obstacle_speed: 5.0,
                displacement_range: 10.0,
                min_obstacle_interval: 2.0,
                max_obstacle_interval: 5.0,
                steering_enabled: true,
            },
            Difficulty::Hard => Self {
                difficulty,
                level_time_secs: 90.0,
                max_patches_held: 3,
                water_rise_rate: 0.015,
                min_leak_interval: 3.0,
                max_leak_interval: 8.0,
                max_leaks_per_spawner: 12,
                obstacle_speed: 7.0,
                displacement_range: 12.0,
                min_obstacle_interval: 1.5,
                max_obstacle_interval: 3.5,
                steering_enabled: true,
            },
        }
    }
}

/// A single-field override, switching the profile to Custom
///
/// Typed replacement for per-field setter methods; one variant per
/// customizable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SettingOverride {
    LevelTimeSecs(f32),
    MaxPatchesHeld(u32),
    WaterRiseRate(f32),
    MinLeakInterval(f32),
    MaxLeakInterval(f32),
    MaxLeaksPerSpawner(usize),
    ObstacleSpeed(f32),
    DisplacementRange(f32),
    MinObstacleInterval(f32),
    MaxObstacleInterval(f32),
    SteeringEnabled(bool),
}

/// Holds the current effective profile for the session
///
/// Constructed explicitly and passed by reference to dependents; there is no
/// process-wide singleton. Calls before [`SettingsStore::resolve`] degrade
/// to Normal defaults with a warning rather than failing.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: Option<SettingsProfile>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Apply a preset and return the resolved profile by value
    ///
    /// Resolving `Custom` keeps the current field values and only switches
    /// the tag (the fields were already set via overrides).
    pub fn resolve(&mut self, difficulty: Difficulty) -> SettingsProfile {
        let profile = match difficulty {
            Difficulty::Custom => {
                let mut p = self.current.unwrap_or_else(|| {
                    log::warn!("settings store not initialized; Custom resolves to Normal values");
                    SettingsProfile::default()
                });
                p.difficulty = Difficulty::Custom;
                p
            }
            preset => SettingsProfile::preset(preset),
        };
        log::info!("applied {} difficulty settings", profile.difficulty.as_str());
        self.current = Some(profile);
        profile
    }

    /// Mutate a single field and switch the profile to Custom
    ///
    /// No-op (with a warning) before the store is initialized; callers must
    /// guard. No range validation is performed.
    pub fn apply_override(&mut self, o: SettingOverride) {
        let Some(profile) = self.current.as_mut() else {
            log::warn!("apply_override before resolve; ignoring {o:?}");
            return;
        };
        match o {
            SettingOverride::LevelTimeSecs(v) => profile.level_time_secs = v,
            SettingOverride::MaxPatchesHeld(v) => profile.max_patches_held = v,
            SettingOverride::WaterRiseRate(v) => profile.water_rise_rate = v,
            SettingOverride::MinLeakInterval(v) => profile.min_leak_interval = v,
            SettingOverride::MaxLeakInterval(v) => profile.max_leak_interval = v,
            SettingOverride::MaxLeaksPerSpawner(v) => profile.max_leaks_per_spawner = v,
            SettingOverride::ObstacleSpeed(v) => profile.obstacle_speed = v,
            SettingOverride::DisplacementRange(v) => profile.displacement_range = v,
            SettingOverride::MinObstacleInterval(v) => profile.min_obstacle_interval = v,
            SettingOverride::MaxObstacleInterval(v) => profile.max_obstacle_interval = v,
            SettingOverride::SteeringEnabled(v) => profile.steering_enabled = v,
        }
        profile.difficulty = Difficulty::Custom;
    }

    /// Current effective profile, falling back to Normal defaults
    pub fn current(&self) -> SettingsProfile {
        self.current.unwrap_or_else(|| {
            log::warn!("settings store not initialized; using Normal defaults");
            SettingsProfile::default()
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_returns_preset_by_value() {
        let mut store = SettingsStore::new();
        let p = store.resolve(Difficulty::Hard);
        assert_eq!(p.difficulty, Difficulty::Hard);
        assert_eq!(p, SettingsProfile::preset(Difficulty::Hard));
    }

    #[test]
    fn test_override_switches_to_custom_and_keeps_other_fields() {
        let mut store = SettingsStore::new();
        let before = store.resolve(Difficulty::Normal);

        store.apply_override(SettingOverride::WaterRiseRate(0.05));
        let after = store.current();

        assert_eq!(after.difficulty, Difficulty::Custom);
        assert_eq!(after.water_rise_rate, 0.05);
        // Everything else is untouched
        assert_eq!(after.level_time_secs, before.level_time_secs);
        assert_eq!(after.max_patches_held, before.max_patches_held);
        assert_eq!(after.min_leak_interval, before.min_leak_interval);
    }

    #[test]
    fn test_override_before_init_is_noop() {
        let mut store = SettingsStore::new();
        store.apply_override(SettingOverride::LevelTimeSecs(10.0));
        assert!(!store.is_initialized());
        // Fallback still yields defaults, not the ignored override
        assert_eq!(store.current().level_time_secs, 60.0);
    }

    #[test]
    fn test_resolve_custom_preserves_overrides() {
        let mut store = SettingsStore::new();
        store.resolve(Difficulty::Easy);
        store.apply_override(SettingOverride::ObstacleSpeed(9.0));
        let p = store.resolve(Difficulty::Custom);
        assert_eq!(p.difficulty, Difficulty::Custom);
        assert_eq!(p.obstacle_speed, 9.0);
    }

    #[test]
    fn test_preset_interval_invariant() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let p = SettingsProfile::preset(d);
            assert!(p.min_leak_interval <= p.max_leak_interval);
            assert!(p.min_obstacle_interval <= p.max_obstacle_interval);
        }
    }
}
