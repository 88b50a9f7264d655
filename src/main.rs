//! Headless demo: runs one scripted session and prints a JSON summary
//!
//! Usage: hullpatch [easy|normal|hard] [seed]
//!
//! A simple bot plays the session: it patches the oldest active leak each
//! tick, restocks when its patch inventory runs out, and holds a gentle
//! steering input. Useful for eyeballing balance changes without a client.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use hullpatch::consts::SIM_DT;
use hullpatch::events::{AudioDirector, GameListener, NotificationBus, WarningLightListener};
use hullpatch::platform::{NullAudio, NullCamera, NullLight, NullScene, PlaneSurface};
use hullpatch::sim::{HazardKind, HullLayout, Outcome, Phase, Session, TickInput, TickIo, tick};
use hullpatch::{Difficulty, SettingsStore};

use glam::Vec3;

#[derive(Debug, Default, Clone, Serialize)]
struct SessionStats {
    leaks_spawned: u32,
    leaks_patched: u32,
    obstacles_spawned: u32,
}

struct StatsListener(Rc<RefCell<SessionStats>>);

impl GameListener for StatsListener {
    fn hazard_spawned(&mut self, kind: HazardKind) {
        let mut stats = self.0.borrow_mut();
        match kind {
            HazardKind::Leak => stats.leaks_spawned += 1,
            HazardKind::Obstacle => stats.obstacles_spawned += 1,
        }
    }

    fn leak_patched(&mut self) {
        self.0.borrow_mut().leaks_patched += 1;
    }

    fn phase_changed(&mut self, phase: Phase) {
        log::info!("phase: {phase:?}");
    }

    fn time_remaining_changed(&mut self, secs: u32) {
        if secs % 10 == 0 {
            log::info!("time remaining: {:02}:{:02}", secs / 60, secs % 60);
        }
    }

    fn obstacle_proximity(&mut self, in_range: bool) {
        log::info!("obstacle warning: {}", if in_range { "on" } else { "off" });
    }
}

#[derive(Debug, Serialize)]
struct Summary {
    difficulty: String,
    seed: u64,
    outcome: Outcome,
    elapsed_secs: f32,
    water_height: f32,
    penalty_hits: u32,
    #[serde(flatten)]
    stats: SessionStats,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let difficulty = args
        .next()
        .map(|s| {
            Difficulty::from_str(&s).unwrap_or_else(|| {
                log::warn!("unknown difficulty {s:?}, using normal");
                Difficulty::Normal
            })
        })
        .unwrap_or(Difficulty::Normal);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let mut store = SettingsStore::new();
    let profile = store.resolve(difficulty);

    let mut session = Session::new(profile, HullLayout::default(), seed);

    // Flat hull wall for leak placement rays
    let surface = PlaneSurface {
        point: Vec3::new(0.0, 1.0, 0.0),
        normal: Vec3::X,
    };
    let mut scene = NullScene::default();
    let mut camera = NullCamera::default();

    let stats = Rc::new(RefCell::new(SessionStats::default()));
    let mut bus = NotificationBus::new();
    bus.subscribe(Box::new(StatsListener(stats.clone())));
    bus.subscribe(Box::new(AudioDirector::new(NullAudio)));
    bus.subscribe(Box::new(WarningLightListener::new(NullLight::default())));

    while session.session().phase != Phase::Ended {
        let snapshot = *session.session();
        let patch_target = if snapshot.patches_held > 0 {
            session
                .hazards()
                .all_active()
                .iter()
                .find(|h| h.kind == HazardKind::Leak)
                .map(|h| h.id)
        } else {
            None
        };

        let input = TickInput {
            patch_target,
            resupply: snapshot.patches_held == 0,
            steer_axis: 0.4,
            steering_engaged: profile.steering_enabled,
        };

        let mut io = TickIo {
            surface: &surface,
            scene: &mut scene,
            camera: &mut camera,
            bus: &mut bus,
        };
        tick(&mut session, &input, SIM_DT, &mut io);
    }

    let snapshot = session.session();
    let summary = Summary {
        difficulty: profile.difficulty.as_str().to_string(),
        seed,
        outcome: snapshot.outcome.unwrap_or(Outcome::Sunk),
        elapsed_secs: snapshot.elapsed,
        water_height: snapshot.water_height,
        penalty_hits: session.flood().penalty_hits(),
        stats: stats.borrow().clone(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize summary: {e}"),
    }
}
