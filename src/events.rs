//! Notification fan-out to presentation collaborators
//!
//! One-way, fire-and-forget: the state machine pushes transitions out and
//! never reads anything back. Listeners run synchronously within the tick
//! that produced the change, after all state mutation, so they always
//! observe post-mutation state. Each listener is invoked independently;
//! listener methods are infallible by contract and a no-op listener cannot
//! block delivery to the rest.

use crate::platform::{AudioSink, ClipId, MessageColor, TextDisplay, WarningLight};
use crate::sim::state::{HazardKind, Outcome, Phase};

/// Receiver for game-state transitions; every method defaults to a no-op
#[allow(unused_variables)]
pub trait GameListener {
    fn leak_count_changed(&mut self, count: usize) {}
    fn patches_changed(&mut self, count: u32) {}
    fn phase_changed(&mut self, phase: Phase) {}
    fn obstacle_proximity(&mut self, in_range: bool) {}
    fn hazard_spawned(&mut self, kind: HazardKind) {}
    fn leak_patched(&mut self) {}
    /// Whole-seconds countdown, emitted when the displayed value changes
    fn time_remaining_changed(&mut self, secs: u32) {}
    fn session_ended(&mut self, outcome: Outcome) {}
}

/// Synchronous fan-out of state-change events
#[derive(Default)]
pub struct NotificationBus {
    listeners: Vec<Box<dyn GameListener>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn GameListener>) {
        self.listeners.push(listener);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn leak_count_changed(&mut self, count: usize) {
        for l in &mut self.listeners {
            l.leak_count_changed(count);
        }
    }

    pub fn patches_changed(&mut self, count: u32) {
        for l in &mut self.listeners {
            l.patches_changed(count);
        }
    }

    pub fn phase_changed(&mut self, phase: Phase) {
        for l in &mut self.listeners {
            l.phase_changed(phase);
        }
    }

    pub fn obstacle_proximity(&mut self, in_range: bool) {
        for l in &mut self.listeners {
            l.obstacle_proximity(in_range);
        }
    }

    pub fn hazard_spawned(&mut self, kind: HazardKind) {
        for l in &mut self.listeners {
            l.hazard_spawned(kind);
        }
    }

    pub fn leak_patched(&mut self) {
        for l in &mut self.listeners {
            l.leak_patched();
        }
    }

    pub fn time_remaining_changed(&mut self, secs: u32) {
        for l in &mut self.listeners {
            l.time_remaining_changed(secs);
        }
    }

    pub fn session_ended(&mut self, outcome: Outcome) {
        for l in &mut self.listeners {
            l.session_ended(outcome);
        }
    }
}

/// Routes audio cues: looping music/ambience plus leak and patch one-shots
pub struct AudioDirector<A: AudioSink> {
    sink: A,
}

impl<A: AudioSink> AudioDirector<A> {
    /// Starts the background loops immediately
    pub fn new(mut sink: A) -> Self {
        sink.play(ClipId::Music);
        sink.play(ClipId::Ambience);
        Self { sink }
    }
}

impl<A: AudioSink> GameListener for AudioDirector<A> {
    fn hazard_spawned(&mut self, kind: HazardKind) {
        if kind == HazardKind::Leak {
            self.sink.play_one_shot(ClipId::LeakSpawn);
        }
    }

    fn leak_patched(&mut self) {
        self.sink.play_one_shot(ClipId::Patch);
    }

    fn session_ended(&mut self, _outcome: Outcome) {
        // Music stops, ambience keeps playing under the end banner
        self.sink.stop(ClipId::Music);
        self.sink.play(ClipId::Ambience);
    }
}

/// Drives the rotating warning light from proximity edges
pub struct WarningLightListener<L: WarningLight> {
    light: L,
}

impl<L: WarningLight> WarningLightListener<L> {
    pub fn new(light: L) -> Self {
        Self { light }
    }
}

impl<L: WarningLight> GameListener for WarningLightListener<L> {
    fn obstacle_proximity(&mut self, in_range: bool) {
        if in_range {
            self.light.start_spin_and_light();
        } else {
            self.light.stop_spin_and_light();
        }
    }

    fn session_ended(&mut self, _outcome: Outcome) {
        self.light.stop_spin_and_light();
    }
}

/// HUD counters, countdown, and the end-of-game banner
pub struct HudListener<D: TextDisplay> {
    status: D,
    timer: D,
    banner: D,
    leaks: usize,
    patches: u32,
}

impl<D: TextDisplay> HudListener<D> {
    pub fn new(status: D, timer: D, banner: D) -> Self {
        Self {
            status,
            timer,
            banner,
            leaks: 0,
            patches: 0,
        }
    }

    fn refresh_status(&mut self) {
        self.status.set_text(&format!(
            "Active Leaks: {} | Patches Left: {}",
            self.leaks, self.patches
        ));
    }
}

impl<D: TextDisplay> GameListener for HudListener<D> {
    fn leak_count_changed(&mut self, count: usize) {
        self.leaks = count;
        self.refresh_status();
    }

    fn patches_changed(&mut self, count: u32) {
        self.patches = count;
        self.refresh_status();
    }

    fn time_remaining_changed(&mut self, secs: u32) {
        self.timer.set_text(&format!(
            "Time Until Help Arrives: {:02}:{:02}",
            secs / 60,
            secs % 60
        ));
    }

    fn session_ended(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Survived => {
                self.banner.set_color(MessageColor::Green);
                self.banner
                    .set_text("You survived! The Coast Guard is on its way.");
            }
            Outcome::Sunk => {
                self.banner.set_color(MessageColor::Red);
                self.banner
                    .set_text("Game Over. You took on too much water, the boat sank.");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{NullDisplay, NullLight, WarningLight};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl GameListener for Recorder {
        fn leak_count_changed(&mut self, count: usize) {
            self.events.borrow_mut().push(format!("leaks={count}"));
        }
        fn phase_changed(&mut self, phase: Phase) {
            self.events.borrow_mut().push(format!("phase={phase:?}"));
        }
        fn session_ended(&mut self, outcome: Outcome) {
            self.events.borrow_mut().push(format!("end={outcome:?}"));
        }
    }

    struct Inert;
    impl GameListener for Inert {}

    #[test]
    fn test_fanout_reaches_all_listeners() {
        let log_a = Rc::new(RefCell::new(Vec::new()));
        let log_b = Rc::new(RefCell::new(Vec::new()));

        let mut bus = NotificationBus::new();
        bus.subscribe(Box::new(Recorder {
            events: log_a.clone(),
        }));
        // A listener that handles nothing sits between the recorders and
        // must not affect delivery
        bus.subscribe(Box::new(Inert));
        bus.subscribe(Box::new(Recorder {
            events: log_b.clone(),
        }));

        bus.leak_count_changed(2);
        bus.phase_changed(Phase::Running);

        let expect = vec!["leaks=2".to_string(), "phase=Running".to_string()];
        assert_eq!(*log_a.borrow(), expect);
        assert_eq!(*log_b.borrow(), expect);
    }

    struct RecordingAudio(Rc<RefCell<Vec<String>>>);

    impl AudioSink for RecordingAudio {
        fn play_one_shot(&mut self, clip: ClipId) {
            self.0.borrow_mut().push(format!("oneshot:{clip:?}"));
        }
        fn play(&mut self, clip: ClipId) {
            self.0.borrow_mut().push(format!("play:{clip:?}"));
        }
        fn stop(&mut self, clip: ClipId) {
            self.0.borrow_mut().push(format!("stop:{clip:?}"));
        }
    }

    #[test]
    fn test_audio_director_cues() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut director = AudioDirector::new(RecordingAudio(log.clone()));

        director.hazard_spawned(HazardKind::Leak);
        // Obstacles make no sound on spawn
        director.hazard_spawned(HazardKind::Obstacle);
        director.leak_patched();
        director.session_ended(Outcome::Survived);

        assert_eq!(
            *log.borrow(),
            vec![
                "play:Music",
                "play:Ambience",
                "oneshot:LeakSpawn",
                "oneshot:Patch",
                "stop:Music",
                "play:Ambience",
            ]
        );
    }

    struct SharedLight(Rc<RefCell<NullLight>>);
    impl crate::platform::WarningLight for SharedLight {
        fn start_spin_and_light(&mut self) {
            self.0.borrow_mut().start_spin_and_light();
        }
        fn stop_spin_and_light(&mut self) {
            self.0.borrow_mut().stop_spin_and_light();
        }
    }
    #[test]
    fn test_warning_light_follows_proximity() {
        let light = Rc::new(RefCell::new(NullLight::default()));
        let mut listener = WarningLightListener::new(SharedLight(light.clone()));

        listener.obstacle_proximity(true);
        assert!(light.borrow().spinning);
        listener.obstacle_proximity(false);
        assert!(!light.borrow().spinning);
    }

    #[test]
    fn test_hud_formats_countdown() {
        let mut hud = HudListener::new(
            NullDisplay::default(),
            NullDisplay::default(),
            NullDisplay::default(),
        );
        hud.time_remaining_changed(75);
        assert_eq!(hud.timer.text, "Time Until Help Arrives: 01:15");

        hud.leak_count_changed(3);
        hud.patches_changed(2);
        assert_eq!(hud.status.text, "Active Leaks: 3 | Patches Left: 2");
    }

    #[test]
    fn test_hud_end_banner() {
        let mut hud = HudListener::new(
            NullDisplay::default(),
            NullDisplay::default(),
            NullDisplay::default(),
        );
        hud.session_ended(Outcome::Sunk);
        assert_eq!(hud.banner.color, Some(MessageColor::Red));
        assert!(hud.banner.text.contains("boat sank"));
    }
}
