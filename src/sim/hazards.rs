//! Hazard lifecycle registry
//!
//! Exclusive owner of all hazard instances. Everything else holds
//! [`HazardId`]s and reads snapshots. Resolution is idempotent: the first
//! `resolve` for an id wins and reports `true`, duplicates are no-ops, so
//! side effects (patch decrement, flood penalty) fire exactly once even when
//! input events arrive twice.

use glam::Vec3;

use super::state::{Hazard, HazardDetail, HazardId, HazardKind, HazardState, Resolution};

#[derive(Debug, Default)]
pub struct HazardLifecycle {
    hazards: Vec<Hazard>,
    next_id: u32,
}

impl HazardLifecycle {
    pub fn new() -> Self {
        Self {
            hazards: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a new active hazard and return its id
    pub fn create(&mut self, kind: HazardKind, position: Vec3, now: f32) -> HazardId {
        self.create_obstacle_inner(kind, position, now, 0.0, 0.0)
    }

    /// Register a new active obstacle with movement parameters
    pub fn create_obstacle(
        &mut self,
        position: Vec3,
        lateral_offset: f32,
        speed: f32,
        now: f32,
    ) -> HazardId {
        self.create_obstacle_inner(HazardKind::Obstacle, position, now, lateral_offset, speed)
    }

    fn create_obstacle_inner(
        &mut self,
        kind: HazardKind,
        position: Vec3,
        now: f32,
        lateral_offset: f32,
        speed: f32,
    ) -> HazardId {
        let id = HazardId(self.next_id);
        self.next_id += 1;

        let detail = match kind {
            HazardKind::Leak => HazardDetail::Leak { patched: false },
            HazardKind::Obstacle => HazardDetail::Obstacle {
                lateral_offset,
                speed,
                hit_ship: false,
            },
        };

        self.hazards.push(Hazard {
            id,
            kind,
            position,
            spawn_time: now,
            state: HazardState::Active,
            detail,
        });

        log::debug!("hazard {id:?} ({kind:?}) created at {position}");
        id
    }

    /// Transition Active -> Resolved; returns whether this call did the work
    ///
    /// A second resolve on the same id is a no-op returning `false`. Unknown
    /// ids also return `false` (the hazard may already be retired).
    pub fn resolve(&mut self, id: HazardId, resolution: Resolution) -> bool {
        let Some(hazard) = self.hazards.iter_mut().find(|h| h.id == id) else {
            log::debug!("resolve({id:?}) on unknown or retired hazard; ignoring");
            return false;
        };
        if hazard.state == HazardState::Resolved {
            return false;
        }

        hazard.state = HazardState::Resolved;
        match (&mut hazard.detail, resolution) {
            (HazardDetail::Leak { patched }, Resolution::Patched) => *patched = true,
            (HazardDetail::Obstacle { hit_ship, .. }, Resolution::Hit) => *hit_ship = true,
            _ => {}
        }
        log::debug!("hazard {id:?} resolved: {resolution:?}");
        true
    }

    pub fn get(&self, id: HazardId) -> Option<&Hazard> {
        self.hazards.iter().find(|h| h.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.hazards.iter().filter(|h| h.is_active()).count()
    }

    pub fn active_count_of(&self, kind: HazardKind) -> usize {
        self.hazards
            .iter()
            .filter(|h| h.is_active() && h.kind == kind)
            .count()
    }

    /// Snapshot of active hazards (not a live view)
    pub fn all_active(&self) -> Vec<Hazard> {
        self.hazards
            .iter()
            .filter(|h| h.is_active())
            .copied()
            .collect()
    }

    /// Iterate mutably over active obstacles (steering displaces them)
    pub fn active_obstacles_mut(&mut self) -> impl Iterator<Item = &mut Hazard> {
        self.hazards
            .iter_mut()
            .filter(|h| h.is_active() && h.kind == HazardKind::Obstacle)
    }

    /// Drop resolved hazards from storage
    pub fn retire_resolved(&mut self) {
        self.hazards.retain(|h| h.is_active());
    }
}
