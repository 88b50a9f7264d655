//! Engine collaborator traits
//!
//! The core treats rendering, physics raycasts, audio playback, scene
//! management, and input devices as black-box services behind these traits.
//! Null implementations are provided for headless runs and tests.

use glam::Vec3;

/// A surface point found by the physics raycast service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    pub point: Vec3,
    /// Surface normal at the hit (points away from the hull interior)
    pub normal: Vec3,
}

/// Physics raycast service (leak placement queries go through this)
pub trait SurfaceQuery {
    /// Cast a ray; `None` is a miss
    fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<SurfaceHit>;
}

/// Scene/session boundary, only touched at the terminal transition
pub trait SceneControl {
    /// Release pointer capture and stop feeding player input
    fn release_pointer(&mut self);
    /// Halt (0.0) or restore (1.0) global time progression
    fn set_time_scale(&mut self, scale: f32);
    fn load_scene(&mut self, name: &str);
    fn quit(&mut self);
}

/// Camera effects target (receives per-tick shake offsets)
pub trait CameraEffects {
    fn set_shake_offset(&mut self, offset: Vec3);
}

/// Audio clip identifiers the core knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipId {
    Music,
    Ambience,
    LeakSpawn,
    Patch,
}

/// Audio playback collaborator
pub trait AudioSink {
    /// Fire-and-forget one-shot
    fn play_one_shot(&mut self, clip: ClipId);
    /// Start a looping clip
    fn play(&mut self, clip: ClipId);
    fn stop(&mut self, clip: ClipId);
}

/// Rotating warning light (obstacle proximity indicator)
pub trait WarningLight {
    fn start_spin_and_light(&mut self);
    fn stop_spin_and_light(&mut self);
}

/// Message color for the end-of-game banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageColor {
    White,
    Green,
    Red,
}

/// On-screen text collaborator (HUD counters, end-of-game banner)
pub trait TextDisplay {
    fn set_text(&mut self, text: &str);
    fn set_color(&mut self, color: MessageColor);
}

/// Polled player input; the core never owns device state
pub trait InputSource {
    fn primary_action_pressed(&self) -> bool;
    fn horizontal_axis(&self) -> f32;
    fn interact_key_pressed(&self) -> bool;
}

// === Null implementations ===

/// Projects rays onto a single infinite plane; good enough for headless
/// sessions and tests where the hull is one flat wall.
#[derive(Debug, Clone, Copy)]
pub struct PlaneSurface {
    /// Any point on the plane
    pub point: Vec3,
    /// Plane normal (unit length)
    pub normal: Vec3,
}

impl SurfaceQuery for PlaneSurface {
    fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<SurfaceHit> {
        let denom = self.normal.dot(dir);
        if denom.abs() < 1e-6 {
            return None; // Parallel
        }
        let t = self.normal.dot(self.point - origin) / denom;
        if t < 0.0 || t > max_distance {
            return None;
        }
        Some(SurfaceHit {
            point: origin + dir * t,
            normal: self.normal,
        })
    }
}

/// Scene control that only records the last time scale (headless/demo)
#[derive(Debug, Default)]
pub struct NullScene {
    pub time_scale: f32,
    pub pointer_released: bool,
}

impl SceneControl for NullScene {
    fn release_pointer(&mut self) {
        self.pointer_released = true;
    }

    fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale;
    }

    fn load_scene(&mut self, name: &str) {
        log::info!("load_scene({name}) ignored in headless mode");
    }

    fn quit(&mut self) {}
}

/// Camera that remembers the last shake offset
#[derive(Debug, Default)]
pub struct NullCamera {
    pub shake_offset: Vec3,
}

impl CameraEffects for NullCamera {
    fn set_shake_offset(&mut self, offset: Vec3) {
        self.shake_offset = offset;
    }
}

/// Audio sink that drops everything
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_one_shot(&mut self, _clip: ClipId) {}
    fn play(&mut self, _clip: ClipId) {}
    fn stop(&mut self, _clip: ClipId) {}
}

/// Warning light that only tracks its on/off state
#[derive(Debug, Default)]
pub struct NullLight {
    pub spinning: bool,
}

impl WarningLight for NullLight {
    fn start_spin_and_light(&mut self) {
        self.spinning = true;
    }

    fn stop_spin_and_light(&mut self) {
        self.spinning = false;
    }
}

/// Text display that keeps the last message
#[derive(Debug, Default)]
pub struct NullDisplay {
    pub text: String,
    pub color: Option<MessageColor>,
}

impl TextDisplay for NullDisplay {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_color(&mut self, color: MessageColor) {
        self.color = Some(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_surface_hit() {
        let plane = PlaneSurface {
            point: Vec3::new(0.0, 0.0, 5.0),
            normal: Vec3::new(0.0, 0.0, -1.0),
        };
        let hit = plane
            .raycast(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 100.0)
            .unwrap();
        assert!((hit.point.z - 5.0).abs() < 1e-5);
        assert_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_plane_surface_miss_parallel_and_behind() {
        let plane = PlaneSurface {
            point: Vec3::new(0.0, 0.0, 5.0),
            normal: Vec3::new(0.0, 0.0, -1.0),
        };
        // Parallel ray
        assert!(
            plane
                .raycast(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), 100.0)
                .is_none()
        );
        // Plane behind the origin
        assert!(
            plane
                .raycast(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 100.0)
                .is_none()
        );
        // Out of range
        assert!(
            plane
                .raycast(Vec3::ZERO, Vec3::new(0.0, 0.0, 1.0), 2.0)
                .is_none()
        );
    }
}
