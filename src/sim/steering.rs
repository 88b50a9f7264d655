//! Steering/obstacle coupling, collision penalty, and camera shake
//!
//! Steering input displaces active obstacles laterally with inverted sign,
//! so steering left visually pushes obstacles right. A ship hit applies the
//! flood penalty exactly once per obstacle (guarded by resolve idempotence)
//! and kicks off a time-sliced camera shake.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::flood::FloodModel;
use super::hazards::HazardLifecycle;
use super::state::{HazardDetail, HazardId, HazardKind, Resolution};

/// Transient camera shake, advanced one tick at a time
///
/// Runs as a scripted sequence across ticks rather than blocking: each
/// `advance` yields the next jitter offset, with magnitude damped linearly
/// to zero over the duration. Dropping the session cancels it implicitly.
#[derive(Debug, Clone, Copy)]
pub struct ShakeEffect {
    duration: f32,
    initial_magnitude: f32,
    elapsed: f32,
    active: bool,
}

impl ShakeEffect {
    pub fn new(duration: f32, magnitude: f32) -> Self {
        Self {
            duration,
            initial_magnitude: magnitude,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Start a shake; retriggering while one is running is ignored
    pub fn trigger(&mut self) {
        if !self.active {
            self.active = true;
            self.elapsed = 0.0;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Next camera offset; `Vec3::ZERO` once the shake has settled
    pub fn advance(&mut self, dt: f32, rng: &mut Pcg32) -> Vec3 {
        if !self.active {
            return Vec3::ZERO;
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
            return Vec3::ZERO;
        }

        let magnitude = self.initial_magnitude * (1.0 - self.elapsed / self.duration);
        Vec3::new(
            rng.random_range(-1.0..1.0) * magnitude,
            rng.random_range(-1.0..1.0) * magnitude,
            0.0,
        )
    }
}

/// Couples player steering to obstacle displacement and hit penalties
#[derive(Debug, Clone, Copy)]
pub struct SteeringBridge {
    steering_speed: f32,
    enabled: bool,
}

impl SteeringBridge {
    pub fn new(steering_speed: f32, enabled: bool) -> Self {
        Self {
            steering_speed,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Displace all active obstacles by `-signed_amount * speed * dt`
    pub fn apply_steering(&self, hazards: &mut HazardLifecycle, signed_amount: f32, dt: f32) {
        if !self.enabled || signed_amount == 0.0 {
            return;
        }
        // Inverted relative to player input
        let delta = -signed_amount * self.steering_speed * dt;
        for hazard in hazards.active_obstacles_mut() {
            if let HazardDetail::Obstacle { lateral_offset, .. } = &mut hazard.detail {
                *lateral_offset += delta;
            }
        }
    }

    /// Obstacle struck the ship: penalty + shake, exactly once per obstacle
    ///
    /// Returns whether this call performed the side effects (false on a
    /// duplicate hit event for an already-resolved obstacle).
    pub fn on_ship_hit(
        &self,
        id: HazardId,
        hazards: &mut HazardLifecycle,
        flood: &mut FloodModel,
        shake: &mut ShakeEffect,
    ) -> bool {
        if !hazards.resolve(id, Resolution::Hit) {
            return false;
        }
        flood.apply_penalty();
        shake.trigger();
        log::info!("obstacle {id:?} hit the ship; flood penalty applied");
        true
    }
}

/// Edge-triggered obstacle proximity warning
///
/// Tracks how many active obstacles sit within the warning distance of the
/// ship and reports only the 0 -> n and n -> 0 transitions.
#[derive(Debug, Clone, Copy)]
pub struct ProximitySensor {
    warning_distance: f32,
    in_range: usize,
}

impl ProximitySensor {
    pub fn new(warning_distance: f32) -> Self {
        Self {
            warning_distance,
            in_range: 0,
        }
    }

    /// Recount obstacles in range; `Some(flag)` on a warning edge
    pub fn update(&mut self, hazards: &HazardLifecycle, ship_pos: Vec3) -> Option<bool> {
        let count = hazards
            .all_active()
            .iter()
            .filter(|h| {
                h.kind == HazardKind::Obstacle
                    && h.effective_position().distance(ship_pos) < self.warning_distance
            })
            .count();

        let was = self.in_range;
        self.in_range = count;
        match (was, count) {
            (0, n) if n > 0 => Some(true),
            (n, 0) if n > 0 => Some(false),
            _ => None,
        }
    }

    pub fn obstacles_in_range(&self) -> usize {
        self.in_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(99)
    }

    fn lateral_of(hazards: &HazardLifecycle, id: HazardId) -> f32 {
        match hazards.get(id).unwrap().detail {
            HazardDetail::Obstacle { lateral_offset, .. } => lateral_offset,
            _ => panic!("expected obstacle"),
        }
    }

    #[test]
    fn test_steering_sign_is_inverted() {
        let mut hazards = HazardLifecycle::new();
        let id = hazards.create_obstacle(Vec3::new(0.0, 0.0, 40.0), 0.0, 5.0, 0.0);

        let bridge = SteeringBridge::new(5.0, true);
        bridge.apply_steering(&mut hazards, 1.0, 0.5);

        // Steering right (positive) pushes obstacles left (negative)
        assert!((lateral_of(&hazards, id) - (-2.5)).abs() < 1e-6);
    }

    #[test]
    fn test_steering_disabled_is_inert() {
        let mut hazards = HazardLifecycle::new();
        let id = hazards.create_obstacle(Vec3::new(0.0, 0.0, 40.0), 1.0, 5.0, 0.0);

        let bridge = SteeringBridge::new(5.0, false);
        bridge.apply_steering(&mut hazards, 1.0, 0.5);
        assert_eq!(lateral_of(&hazards, id), 1.0);
    }

    #[test]
    fn test_ship_hit_penalty_exactly_once() {
        let mut hazards = HazardLifecycle::new();
        let id = hazards.create_obstacle(Vec3::new(0.0, 0.0, 1.0), 0.0, 5.0, 0.0);

        let base = 0.01;
        let mut flood = FloodModel::new(base, 5.0, 1.2);
        let mut shake = ShakeEffect::new(0.5, 0.1);
        let bridge = SteeringBridge::new(5.0, true);

        assert!(bridge.on_ship_hit(id, &mut hazards, &mut flood, &mut shake));
        // Duplicate hit event from a second collision callback
        assert!(!bridge.on_ship_hit(id, &mut hazards, &mut flood, &mut shake));

        assert!((flood.rate() - base * 1.2).abs() < 1e-7);
        assert!(shake.is_active());
    }

    #[test]
    fn test_shake_runs_and_settles() {
        let mut shake = ShakeEffect::new(0.5, 0.1);
        let mut rng = rng();

        assert_eq!(shake.advance(0.1, &mut rng), Vec3::ZERO);

        shake.trigger();
        let mut saw_motion = false;
        for _ in 0..4 {
            let offset = shake.advance(0.1, &mut rng);
            assert!(offset.length() <= 0.1 * 2.0_f32.sqrt() + 1e-6);
            saw_motion |= offset != Vec3::ZERO;
        }
        assert!(saw_motion);

        // Past the duration: settled back to zero
        let rest = shake.advance(0.2, &mut rng);
        assert_eq!(rest, Vec3::ZERO);
        assert!(!shake.is_active());
    }

    #[test]
    fn test_proximity_sensor_edges() {
        let mut hazards = HazardLifecycle::new();
        let mut sensor = ProximitySensor::new(30.0);
        let ship = Vec3::ZERO;

        // Nothing nearby
        assert_eq!(sensor.update(&hazards, ship), None);

        let far = hazards.create_obstacle(Vec3::new(0.0, 0.0, 100.0), 0.0, 5.0, 0.0);
        assert_eq!(sensor.update(&hazards, ship), None);

        let near = hazards.create_obstacle(Vec3::new(0.0, 0.0, 10.0), 0.0, 5.0, 0.0);
        assert_eq!(sensor.update(&hazards, ship), Some(true));
        // Still in range: no repeat notification
        assert_eq!(sensor.update(&hazards, ship), None);

        hazards.resolve(near, Resolution::Hit);
        assert_eq!(sensor.update(&hazards, ship), Some(false));

        hazards.resolve(far, Resolution::Expired);
        assert_eq!(sensor.update(&hazards, ship), None);
    }
}
