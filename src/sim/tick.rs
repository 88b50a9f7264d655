//! Session orchestration: the per-tick state machine
//!
//! PreGame (fixed delay, nothing moves) -> Running (timer counts down,
//! spawners fire, flood integrates) -> Ended (terminal, all further ticks
//! no-op). End conditions are evaluated in a fixed order every Running tick:
//! time up first (Survived), then overflow (Sunk); whichever fires first
//! wins and the other is never looked at again.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{
    INITIAL_DELAY_SECS, MAX_WATER_HEIGHT, OBSTACLE_EXPIRE_DISTANCE, OBSTACLE_HIT_DISTANCE,
    OBSTACLE_PENALTY_FACTOR, OBSTACLE_WARNING_DISTANCE, SHAKE_DURATION_SECS, SHAKE_MAGNITUDE,
    STEERING_SPEED,
};
use crate::events::NotificationBus;
use crate::platform::{CameraEffects, InputSource, SceneControl, SurfaceQuery};
use crate::settings::SettingsProfile;

use super::flood::FloodModel;
use super::hazards::HazardLifecycle;
use super::spawn::{LeakSpawner, ObstacleSpawner, SpawnZone};
use super::state::{GameSession, HazardDetail, HazardId, HazardKind, Outcome, Phase, Resolution};
use super::steering::{ProximitySensor, ShakeEffect, SteeringBridge};

/// Zones and aim point for one leak spawner
#[derive(Debug, Clone)]
pub struct SpawnerConfig {
    pub zones: Vec<SpawnZone>,
    /// Point inside the hull that placement rays aim at
    pub hull_target: Vec3,
}

/// Static geometry of the boat for one session
#[derive(Debug, Clone)]
pub struct HullLayout {
    pub spawners: Vec<SpawnerConfig>,
    /// Where obstacles appear, ahead of the ship
    pub obstacle_origin: Vec3,
    pub ship_position: Vec3,
}

impl Default for HullLayout {
    fn default() -> Self {
        // Two hull-wall spawners, port and starboard
        Self {
            spawners: vec![
                SpawnerConfig {
                    zones: vec![SpawnZone::new(
                        Vec3::new(-6.0, 0.0, -10.0),
                        Vec3::new(-4.0, 2.5, 10.0),
                    )],
                    hull_target: Vec3::new(0.0, 1.0, 0.0),
                },
                SpawnerConfig {
                    zones: vec![SpawnZone::new(
                        Vec3::new(4.0, 0.0, -10.0),
                        Vec3::new(6.0, 2.5, 10.0),
                    )],
                    hull_target: Vec3::new(0.0, 1.0, 0.0),
                },
            ],
            obstacle_origin: Vec3::new(0.0, 0.0, 60.0),
            ship_position: Vec3::ZERO,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Leak the player is patching this tick (click while nearby)
    pub patch_target: Option<HazardId>,
    /// Player used the patch resupply box
    pub resupply: bool,
    /// Signed steering input, -1..=1
    pub steer_axis: f32,
    /// Player is at the wheel
    pub steering_engaged: bool,
}

impl TickInput {
    /// Build one tick's input from a polled device source
    ///
    /// `aimed_leak` is whatever leak the client's crosshair currently picks;
    /// it only takes effect on a primary-action press. `at_wheel` is the
    /// client's "player is at the wheel" state.
    pub fn from_source(
        source: &dyn InputSource,
        aimed_leak: Option<HazardId>,
        at_wheel: bool,
    ) -> Self {
        Self {
            patch_target: if source.primary_action_pressed() {
                aimed_leak
            } else {
                None
            },
            resupply: source.interact_key_pressed(),
            steer_axis: source.horizontal_axis(),
            steering_engaged: at_wheel,
        }
    }
}

/// Borrowed collaborators for one tick
pub struct TickIo<'a> {
    pub surface: &'a dyn SurfaceQuery,
    pub scene: &'a mut dyn SceneControl,
    pub camera: &'a mut dyn CameraEffects,
    pub bus: &'a mut NotificationBus,
}

/// One game session: state machine plus everything it coordinates
pub struct Session {
    profile: SettingsProfile,
    session: GameSession,
    rng: Pcg32,
    hazards: HazardLifecycle,
    leak_spawners: Vec<LeakSpawner>,
    obstacle_spawner: ObstacleSpawner,
    flood: FloodModel,
    steering: SteeringBridge,
    sensor: ProximitySensor,
    shake: ShakeEffect,
    ship_position: Vec3,
    initial_delay: f32,
    last_timer_secs: u32,
}

impl Session {
    pub fn new(profile: SettingsProfile, layout: HullLayout, seed: u64) -> Self {
        let leak_spawners = layout
            .spawners
            .into_iter()
            .map(|cfg| LeakSpawner::new(cfg.zones, cfg.hull_target, &profile))
            .collect();

        let session = GameSession::new(&profile, MAX_WATER_HEIGHT);
        Self {
            session,
            rng: Pcg32::seed_from_u64(seed),
            hazards: HazardLifecycle::new(),
            leak_spawners,
            obstacle_spawner: ObstacleSpawner::new(layout.obstacle_origin, &profile),
            flood: FloodModel::new(
                profile.water_rise_rate,
                MAX_WATER_HEIGHT,
                OBSTACLE_PENALTY_FACTOR,
            ),
            steering: SteeringBridge::new(STEERING_SPEED, profile.steering_enabled),
            sensor: ProximitySensor::new(OBSTACLE_WARNING_DISTANCE),
            shake: ShakeEffect::new(SHAKE_DURATION_SECS, SHAKE_MAGNITUDE),
            ship_position: layout.ship_position,
            initial_delay: INITIAL_DELAY_SECS,
            last_timer_secs: profile.level_time_secs.ceil() as u32,
            profile,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn hazards(&self) -> &HazardLifecycle {
        &self.hazards
    }

    pub fn flood(&self) -> &FloodModel {
        &self.flood
    }

    pub fn profile(&self) -> &SettingsProfile {
        &self.profile
    }

    /// Patch an active leak; rejected with an empty inventory
    ///
    /// Returns whether the patch was applied. Safe against duplicate click
    /// events: the underlying resolve is idempotent, so the inventory is
    /// only decremented once per leak.
    pub fn try_patch(&mut self, id: HazardId, bus: &mut NotificationBus) -> bool {
        if self.session.phase != Phase::Running {
            return false;
        }
        match self.hazards.get(id) {
            Some(h) if h.kind == HazardKind::Leak && h.is_active() => {}
            _ => return false,
        }
        if self.session.patches_held == 0 {
            log::debug!("patch rejected: no patches held");
            return false;
        }
        if !self.hazards.resolve(id, Resolution::Patched) {
            return false;
        }

        self.session.patches_held -= 1;
        let leaks = self.hazards.active_count_of(HazardKind::Leak);
        bus.patches_changed(self.session.patches_held);
        bus.leak_patched();
        bus.leak_count_changed(leaks);

        if leaks == 0 {
            // Last leak cleared: re-arm the spawners with the quiet delay
            let now = self.session.elapsed;
            for sp in &mut self.leak_spawners {
                sp.on_all_clear(now, &mut self.rng);
            }
        }
        true
    }

    /// Refill the patch inventory to its cap (resupply box)
    pub fn resupply_patches(&mut self, bus: &mut NotificationBus) {
        if self.session.phase != Phase::Running {
            return;
        }
        if self.session.patches_held < self.session.max_patches_held {
            self.session.patches_held = self.session.max_patches_held;
            bus.patches_changed(self.session.patches_held);
            log::debug!("patches resupplied to {}", self.session.patches_held);
        }
    }

    fn tick_running(&mut self, input: &TickInput, dt: f32, io: &mut TickIo) {
        let now = self.session.elapsed;

        // --- Player actions ---
        if let Some(id) = input.patch_target {
            self.try_patch(id, io.bus);
        }
        if input.resupply {
            self.resupply_patches(io.bus);
        }
        if input.steering_engaged {
            let bridge = self.steering;
            bridge.apply_steering(&mut self.hazards, input.steer_axis, dt);
        }

        // --- Spawners ---
        for sp in &mut self.leak_spawners {
            let active_leaks = self.hazards.active_count_of(HazardKind::Leak);
            let existing = self.hazards.all_active();
            if let Some(pos) = sp.poll(now, active_leaks, &mut self.rng, io.surface, &existing) {
                self.hazards.create(HazardKind::Leak, pos, now);
                io.bus.hazard_spawned(HazardKind::Leak);
                io.bus
                    .leak_count_changed(self.hazards.active_count_of(HazardKind::Leak));
            }
        }
        if let Some(spawn) = self.obstacle_spawner.poll(now, &mut self.rng) {
            self.hazards
                .create_obstacle(spawn.position, spawn.lateral_offset, spawn.speed, now);
            io.bus.hazard_spawned(HazardKind::Obstacle);
        }

        // --- Obstacle movement, hits, expiry ---
        let ship = self.ship_position;
        let mut hits = Vec::new();
        let mut expired = Vec::new();
        for h in self.hazards.active_obstacles_mut() {
            if let HazardDetail::Obstacle { speed, .. } = h.detail {
                // Approach along -Z toward the ship
                h.position.z -= speed * dt;
            }
            let pos = h.effective_position();
            if pos.distance(ship) <= OBSTACLE_HIT_DISTANCE {
                hits.push(h.id);
            } else if pos.z < ship.z - OBSTACLE_EXPIRE_DISTANCE {
                expired.push(h.id);
            }
        }
        let bridge = self.steering;
        for id in hits {
            bridge.on_ship_hit(id, &mut self.hazards, &mut self.flood, &mut self.shake);
        }
        for id in expired {
            self.hazards.resolve(id, Resolution::Expired);
        }
        self.hazards.retire_resolved();

        // --- Flood integration ---
        let leaks = self.hazards.active_count_of(HazardKind::Leak);
        self.session.water_height = self.flood.advance(dt, leaks);

        // --- Level timer and end conditions (time up wins ties) ---
        self.session.remaining_level_time = (self.session.remaining_level_time - dt).max(0.0);
        if self.session.remaining_level_time <= 0.0 {
            self.end_game(Outcome::Survived, io);
            return;
        }
        if self.flood.is_overflowed() {
            self.end_game(Outcome::Sunk, io);
            return;
        }

        // --- Notifications that trail the mutations ---
        if let Some(flag) = self.sensor.update(&self.hazards, ship) {
            io.bus.obstacle_proximity(flag);
        }
        let offset = self.shake.advance(dt, &mut self.rng);
        io.camera.set_shake_offset(offset);

        let secs = self.session.remaining_level_time.ceil() as u32;
        if secs != self.last_timer_secs {
            self.last_timer_secs = secs;
            io.bus.time_remaining_changed(secs);
        }
    }

    /// Single terminal transition; re-entry is a no-op
    fn end_game(&mut self, outcome: Outcome, io: &mut TickIo) {
        if self.session.phase == Phase::Ended {
            return;
        }
        self.session.phase = Phase::Ended;
        self.session.outcome = Some(outcome);
        self.obstacle_spawner.stop_spawning();

        // Freeze the outside world before telling anyone about it
        io.scene.release_pointer();
        io.scene.set_time_scale(0.0);
        io.camera.set_shake_offset(Vec3::ZERO);

        io.bus.phase_changed(Phase::Ended);
        io.bus.session_ended(outcome);
        log::info!(
            "session ended after {:.1}s: {outcome:?}",
            self.session.elapsed
        );
    }
}

/// Advance the session by one tick
pub fn tick(s: &mut Session, input: &TickInput, dt: f32, io: &mut TickIo) {
    // Terminal guard: once Ended, every tick is a no-op
    if s.session.phase == Phase::Ended {
        return;
    }

    s.session.elapsed += dt;

    match s.session.phase {
        Phase::PreGame => {
            // No spawning, no timer decrement during the initial delay
            if s.session.elapsed >= s.initial_delay {
                s.session.phase = Phase::Running;
                let now = s.session.elapsed;
                for sp in &mut s.leak_spawners {
                    sp.start_spawning(now, &mut s.rng);
                }
                if s.profile.steering_enabled {
                    s.obstacle_spawner.start_spawning(now, &mut s.rng);
                }
                io.bus.phase_changed(Phase::Running);
                log::info!("session running");
            }
        }
        Phase::Running => s.tick_running(input, dt, io),
        Phase::Ended => {}
    }
}
