//! Spawn policy: when and where new hazards may appear
//!
//! Leak placement samples a random point on a spawn zone's surface and
//! projects it onto the hull through the physics raycast collaborator,
//! rejecting candidates too close to existing hazards. Placement failure is
//! soft: the caller simply retries at the next scheduled interval.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::{
    MIN_SPAWN_DISTANCE, SPAWN_ATTEMPT_BUDGET, SPAWN_QUIET_DELAY_SECS, SPAWN_RAY_RANGE,
};
use crate::platform::SurfaceQuery;
use crate::settings::SettingsProfile;

use super::state::Hazard;

/// Draw from [min, max); degenerate ranges collapse to min
fn uniform(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    if max > min { rng.random_range(min..max) } else { min }
}

/// An axis-aligned region where leaks may appear
#[derive(Debug, Clone, Copy)]
pub struct SpawnZone {
    pub min: Vec3,
    pub max: Vec3,
}

impl SpawnZone {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Random point on one of the six faces of the zone's bounds
    pub fn random_surface_point(&self, rng: &mut Pcg32) -> Vec3 {
        let x = uniform(rng, self.min.x, self.max.x);
        let y = uniform(rng, self.min.y, self.max.y);
        let z = uniform(rng, self.min.z, self.max.z);

        match rng.random_range(0..6u32) {
            0 => Vec3::new(self.min.x, y, z),
            1 => Vec3::new(self.max.x, y, z),
            2 => Vec3::new(x, self.min.y, z),
            3 => Vec3::new(x, self.max.y, z),
            4 => Vec3::new(x, y, self.min.z),
            _ => Vec3::new(x, y, self.max.z),
        }
    }
}

/// Per-spawner leak placement and timing state
#[derive(Debug)]
pub struct LeakSpawner {
    zones: Vec<SpawnZone>,
    /// Point inside the hull the placement rays aim at
    hull_target: Vec3,
    max_concurrent: usize,
    min_interval: f32,
    max_interval: f32,
    min_spawn_distance: f32,
    attempt_budget: u32,
    next_spawn_time: f32,
    spawning_allowed: bool,
    last_clear_time: Option<f32>,
}

impl LeakSpawner {
    pub fn new(zones: Vec<SpawnZone>, hull_target: Vec3, profile: &SettingsProfile) -> Self {
        if zones.is_empty() {
            log::warn!("leak spawner configured with no spawn zones; it will never place");
        }
        Self {
            zones,
            hull_target,
            max_concurrent: profile.max_leaks_per_spawner,
            min_interval: profile.min_leak_interval,
            max_interval: profile.max_leak_interval,
            min_spawn_distance: MIN_SPAWN_DISTANCE,
            attempt_budget: SPAWN_ATTEMPT_BUDGET,
            next_spawn_time: 0.0,
            spawning_allowed: false,
            last_clear_time: None,
        }
    }

    /// Allow spawning and draw the first interval (PreGame -> Running)
    pub fn start_spawning(&mut self, now: f32, rng: &mut Pcg32) {
        self.spawning_allowed = true;
        self.schedule_next(now, rng);
    }

    fn schedule_next(&mut self, now: f32, rng: &mut Pcg32) {
        self.next_spawn_time = now + uniform(rng, self.min_interval, self.max_interval);
    }

    /// Last active hazard cleared: re-arm the spawner
    ///
    /// The fresh interval only starts counting after a one-second quiet
    /// delay, so a patch at the exact spawn instant cannot starve the timer.
    pub fn on_all_clear(&mut self, now: f32, rng: &mut Pcg32) {
        self.spawning_allowed = true;
        self.last_clear_time = Some(now);
        self.next_spawn_time =
            now + SPAWN_QUIET_DELAY_SECS + uniform(rng, self.min_interval, self.max_interval);
    }

    pub fn is_spawning_allowed(&self) -> bool {
        self.spawning_allowed
    }

    pub fn next_spawn_time(&self) -> f32 {
        self.next_spawn_time
    }

    /// Advance the spawn timer; returns a placement when one is due and valid
    ///
    /// `active_leaks` is the shared live-leak count (read here, mutated only
    /// by the lifecycle registry). `None` covers: not yet due, cap reached,
    /// or no valid surface point within the attempt budget (soft failure,
    /// retried at the next interval).
    pub fn poll(
        &mut self,
        now: f32,
        active_leaks: usize,
        rng: &mut Pcg32,
        surface: &dyn SurfaceQuery,
        existing: &[Hazard],
    ) -> Option<Vec3> {
        if !self.spawning_allowed || now < self.next_spawn_time {
            return None;
        }

        if active_leaks >= self.max_concurrent {
            // Paused until the count returns to zero (on_all_clear re-arms)
            self.spawning_allowed = false;
            log::debug!("leak spawner paused at cap ({})", self.max_concurrent);
            return None;
        }

        // Interval is redrawn after every attempt, successful or not
        self.schedule_next(now, rng);
        self.try_place_leak(rng, surface, existing)
    }

    /// Bounded-attempt placement against the hull surface
    fn try_place_leak(
        &self,
        rng: &mut Pcg32,
        surface: &dyn SurfaceQuery,
        existing: &[Hazard],
    ) -> Option<Vec3> {
        if self.zones.is_empty() {
            return None;
        }

        for _ in 0..self.attempt_budget {
            let zone = &self.zones[rng.random_range(0..self.zones.len())];
            let origin = zone.random_surface_point(rng);
            let dir = (self.hull_target - origin).normalize_or_zero();
            if dir == Vec3::ZERO {
                continue;
            }

            let Some(hit) = surface.raycast(origin, dir, SPAWN_RAY_RANGE) else {
                continue;
            };

            let too_close = existing.iter().any(|h| {
                h.is_active() && h.effective_position().distance(hit.point) < self.min_spawn_distance
            });
            if !too_close {
                return Some(hit.point);
            }
        }

        log::debug!(
            "no valid leak spawn point after {} attempts",
            self.attempt_budget
        );
        None
    }
}

/// A freshly spawned obstacle, before registration with the lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleSpawn {
    pub position: Vec3,
    pub lateral_offset: f32,
    pub speed: f32,
}

/// Timed obstacle spawner ahead of the ship
#[derive(Debug)]
pub struct ObstacleSpawner {
    origin: Vec3,
    displacement_range: f32,
    speed: f32,
    min_interval: f32,
    max_interval: f32,
    next_spawn_time: f32,
    enabled: bool,
}

impl ObstacleSpawner {
    pub fn new(origin: Vec3, profile: &SettingsProfile) -> Self {
        Self {
            origin,
            displacement_range: profile.displacement_range,
            speed: profile.obstacle_speed,
            min_interval: profile.min_obstacle_interval,
            max_interval: profile.max_obstacle_interval,
            next_spawn_time: 0.0,
            enabled: false,
        }
    }

    pub fn start_spawning(&mut self, now: f32, rng: &mut Pcg32) {
        self.enabled = true;
        self.schedule_next(now, rng);
    }

    pub fn stop_spawning(&mut self) {
        self.enabled = false;
    }

    fn schedule_next(&mut self, now: f32, rng: &mut Pcg32) {
        self.next_spawn_time = now + uniform(rng, self.min_interval, self.max_interval);
    }

    /// Spawn an obstacle at a random lateral displacement when due
    pub fn poll(&mut self, now: f32, rng: &mut Pcg32) -> Option<ObstacleSpawn> {
        if !self.enabled || now < self.next_spawn_time {
            return None;
        }
        self.schedule_next(now, rng);

        let offset = uniform(rng, -self.displacement_range, self.displacement_range);
        Some(ObstacleSpawn {
            position: self.origin,
            lateral_offset: offset,
            speed: self.speed,
        })
    }
}
