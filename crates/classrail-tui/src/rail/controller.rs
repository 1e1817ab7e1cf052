//! L2 Organism Layer: Rail controller
//!
//! Single owner of the rail scroll position. Input adapters feed it events,
//! the host calls [`RailController::tick`] once per frame, and the tick is
//! the only place that moves the rail outside of an active drag.
//!
//! Per frame, in order:
//! 1. an open drag session holds the rail (positions come from pointer moves)
//! 2. an active tween (arrow-key step or settle) drives the position
//! 3. otherwise a running momentum loop integrates and decays velocity
//! 4. a coasting rail that has gone quiet and slow starts settling
//! 5. auto-scroll drifts only if momentum is fully quiescent

use std::time::Instant;

use tracing::debug;

use super::config::{AutoScrollConfig, RailConfig, RailConfigExt};
use super::drag::{DragSession, PointerInput};
use super::geometry::{item_index_at, RailMetrics};
use super::input::{RailKey, WheelInput, WheelOutcome};
use super::interaction::{Interaction, InteractionKind, InteractionListener};
use super::momentum::{LoopState, MomentumEngine};
use super::oscillator::AutoScroller;
use super::settle::{SnapSettler, SETTLE_EPSILON};
use super::tween::{Tween, TweenKind};

#[derive(Debug, Clone)]
pub struct RailController {
    config: RailConfig,
    metrics: RailMetrics,
    position: f64,
    momentum: MomentumEngine,
    settler: SnapSettler,
    tween: Option<Tween>,
    drag: Option<DragSession>,
    auto: AutoScroller,
}

impl RailController {
    /// Create a controller for a rail whose items are already laid out
    pub fn new(
        config: RailConfig,
        auto_scroll: &AutoScrollConfig,
        metrics: RailMetrics,
        reduced_motion: bool,
    ) -> Self {
        Self {
            momentum: MomentumEngine::new(&config),
            settler: SnapSettler::new(&config),
            auto: AutoScroller::new(auto_scroll, reduced_motion),
            config,
            metrics,
            position: 0.0,
            tween: None,
            drag: None,
        }
    }

    #[inline]
    pub fn position(&self) -> f64 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.momentum.velocity()
    }

    pub fn metrics(&self) -> &RailMetrics {
        &self.metrics
    }

    #[inline]
    pub fn max_scroll(&self) -> f64 {
        self.metrics.max_scroll()
    }

    #[inline]
    pub fn item_pitch(&self) -> f64 {
        self.metrics.item_pitch(self.config.fallback_item_width)
    }

    /// Item nearest to the current position
    pub fn focused_index(&self) -> usize {
        item_index_at(self.position, self.item_pitch())
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[inline]
    pub fn is_loop_running(&self) -> bool {
        self.momentum.is_running()
    }

    #[inline]
    pub fn is_auto_scrolling(&self) -> bool {
        self.auto.is_running()
    }

    /// Whether a recent interaction is holding auto-scroll off
    #[inline]
    pub fn is_auto_scroll_paused(&self, now: Instant) -> bool {
        self.auto.is_paused(now)
    }

    pub fn state(&self) -> LoopState {
        match &self.tween {
            Some(tween) if tween.kind() == TweenKind::Settle => LoopState::Settling,
            _ if self.momentum.is_running() => LoopState::Coasting,
            _ => LoopState::Idle,
        }
    }

    /// Whether the host should keep delivering frames at full rate
    pub fn needs_frames(&self) -> bool {
        self.momentum.is_running()
            || self.tween.is_some()
            || self.drag.is_some()
            || self.auto.is_running()
    }

    /// Replace the layout snapshot and re-clamp
    pub fn set_metrics(&mut self, metrics: RailMetrics) {
        self.metrics = metrics;
        self.position = self.metrics.clamp(self.position);
    }

    /// Start the momentum loop if it is not already running
    pub fn kick(&mut self, now: Instant) -> bool {
        self.momentum.kick(now)
    }

    /// Wheel adapter
    ///
    /// Vertical gestures become velocity; horizontal ones are left to the
    /// host, which applies them through [`RailController::scroll_native`].
    pub fn wheel(&mut self, wheel: WheelInput, now: Instant) -> WheelOutcome {
        if wheel.is_horizontal_intent() {
            self.publish(InteractionKind::Wheel { intercepted: false }, now);
            return WheelOutcome::PassThrough;
        }
        self.cancel_settle();
        self.momentum.add_impulse(wheel.impulse(&self.config));
        self.publish(InteractionKind::Wheel { intercepted: true }, now);
        WheelOutcome::Intercepted
    }

    /// Host-native scrolling (pass-through wheel), clamped
    pub fn scroll_native(&mut self, delta: f64) {
        self.cancel_settle();
        self.position = self.metrics.clamp(self.position + delta);
    }

    /// Keyboard adapter; returns true when the key stepped the rail
    pub fn key(&mut self, key: RailKey, now: Instant) -> bool {
        let Some(direction) = key.step() else {
            self.publish(InteractionKind::KeyDown { step: false }, now);
            return false;
        };
        // An open drag session owns the position until release
        if self.drag.is_some() {
            self.publish(InteractionKind::KeyDown { step: false }, now);
            return false;
        }

        // Chain onto an unfinished step so rapid presses keep their full distance
        let base = match &self.tween {
            Some(tween) if tween.kind() == TweenKind::KeyStep => tween.target(),
            _ => self.position,
        };
        let target = self.metrics.clamp(base + direction * self.item_pitch());
        self.momentum.set_velocity(0.0);
        self.tween = if (target - self.position).abs() < SETTLE_EPSILON {
            None
        } else {
            Some(Tween::new(
                TweenKind::KeyStep,
                now,
                self.position,
                target,
                self.config.key_step_duration(),
                self.config.key_step_easing,
            ))
        };
        self.publish(InteractionKind::KeyDown { step: true }, now);
        true
    }

    /// Pointer-down: open a drag session and capture the pointer
    pub fn pointer_down(&mut self, pointer: PointerInput, now: Instant) {
        self.tween = None;
        self.drag = Some(DragSession::open(&pointer, self.position, now));
        self.momentum.set_velocity(0.0);
        debug!(pointer = pointer.pointer_id, x = pointer.x, "Drag opened");
        self.publish(InteractionKind::PointerDown, now);
    }

    /// Pointer-move: returns false when no session owns this pointer
    pub fn pointer_move(&mut self, pointer: PointerInput, now: Instant) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        if !drag.owns(pointer.pointer_id) {
            return false;
        }
        self.position = self
            .metrics
            .clamp(drag.position_for(pointer.x, self.config.drag_gain));
        let velocity = drag.sample(pointer.x, now, self.config.release_velocity_scale);
        self.momentum.set_velocity(velocity);
        true
    }

    /// Pointer-up: close the session and let the release velocity coast
    pub fn pointer_up(&mut self, now: Instant) -> bool {
        self.end_drag(now, "released")
    }

    /// Pointer-cancel or lost capture
    pub fn pointer_cancel(&mut self, now: Instant) -> bool {
        self.end_drag(now, "cancelled")
    }

    pub fn pointer_enter(&mut self, now: Instant) {
        self.publish(InteractionKind::PointerEnter, now);
    }

    pub fn touch_start(&mut self, now: Instant) {
        self.publish(InteractionKind::TouchStart, now);
    }

    /// Start the idle auto-scroll; safe to call repeatedly
    pub fn start_auto_scroll(&mut self) -> bool {
        self.auto.start()
    }

    /// Advance one frame and return the new position
    pub fn tick(&mut self, now: Instant) -> f64 {
        let dragging = self.drag.is_some();

        if !dragging {
            let step = self
                .tween
                .as_ref()
                .map(|tween| (tween.sample(now), tween.is_complete(now), tween.kind()));
            if let Some((sampled, done, kind)) = step {
                self.position = self.metrics.clamp(sampled);
                if done {
                    self.tween = None;
                    if kind == TweenKind::Settle {
                        debug!(position = self.position, "Rail settled");
                    }
                }
            } else if self.momentum.is_running() {
                let next = self.momentum.coast(self.position);
                self.position = self.metrics.clamp(next);
            }
        }

        if self.momentum.is_running()
            && self.tween.is_none()
            && self.momentum.ready_to_settle(now, dragging)
        {
            self.momentum.stop();
            self.tween = self.settler.plan(self.position, &self.metrics, now);
        }

        let hold = dragging
            || self.tween.is_some()
            || self.momentum.is_running()
            || self.momentum.velocity() != 0.0
            || !self.momentum.is_idle(now);
        if let Some(next) = self.auto.advance(self.position, self.max_scroll(), now, hold) {
            self.position = next;
        }

        self.position
    }

    fn end_drag(&mut self, now: Instant, how: &str) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        debug!(velocity = self.momentum.velocity(), "Drag {}", how);
        self.publish(InteractionKind::PointerUp, now);
        true
    }

    fn cancel_settle(&mut self) {
        if matches!(&self.tween, Some(tween) if tween.kind() == TweenKind::Settle) {
            self.tween = None;
        }
    }

    fn publish(&mut self, kind: InteractionKind, now: Instant) {
        let interaction = Interaction::new(kind, now);
        let listeners: [&mut dyn InteractionListener; 2] = [&mut self.momentum, &mut self.auto];
        for listener in listeners {
            listener.on_interaction(&interaction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(16);

    fn metrics() -> RailMetrics {
        RailMetrics {
            item_width: Some(240.0),
            gap: 16.0,
            content_extent: 10.0 * 256.0 - 16.0,
            viewport_extent: 800.0,
        }
    }

    fn rail() -> RailController {
        RailController::new(
            RailConfig::default(),
            &AutoScrollConfig::default(),
            metrics(),
            false,
        )
    }

    /// Tick until the loop is idle; returns the time of the last frame
    fn run_until_idle(rail: &mut RailController, mut now: Instant) -> Instant {
        for _ in 0..500 {
            now += FRAME;
            rail.tick(now);
            if rail.state() == LoopState::Idle {
                return now;
            }
        }
        panic!("rail never came to rest");
    }

    fn assert_on_boundary(rail: &RailController) {
        let ratio = rail.position() / rail.item_pitch();
        assert!(
            (ratio - ratio.round()).abs() < 1e-6,
            "position {} is not on a boundary",
            rail.position()
        );
    }

    #[test]
    fn test_kick_never_spawns_second_loop() {
        let mut rail = rail();
        let t0 = Instant::now();
        assert!(rail.kick(t0));
        assert!(!rail.kick(t0));
        assert!(!rail.kick(t0 + FRAME));
        assert_eq!(rail.state(), LoopState::Coasting);
    }

    #[test]
    fn test_vertical_wheel_becomes_velocity() {
        let mut rail = rail();
        let t0 = Instant::now();
        let outcome = rail.wheel(WheelInput::vertical(100.0, 0.0, 0.0), t0);
        assert_eq!(outcome, WheelOutcome::Intercepted);
        assert!((rail.velocity() - 13.8).abs() < 1e-9);
        assert!(rail.is_loop_running());

        rail.tick(t0 + FRAME);
        assert!((rail.position() - 13.8).abs() < 1e-9);
        assert!((rail.velocity() - 12.42).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_wheel_passes_through() {
        let mut rail = rail();
        let t0 = Instant::now();
        let outcome = rail.wheel(WheelInput::horizontal(120.0, 0.0, 0.0), t0);
        assert_eq!(outcome, WheelOutcome::PassThrough);
        assert_eq!(rail.velocity(), 0.0);
        assert!(!rail.is_loop_running());

        rail.scroll_native(120.0);
        assert_eq!(rail.position(), 120.0);
        rail.scroll_native(-500.0);
        assert_eq!(rail.position(), 0.0);
    }

    #[test]
    fn test_coast_then_settle_on_boundary() {
        let mut rail = rail();
        let t0 = Instant::now();
        for _ in 0..5 {
            rail.wheel(WheelInput::vertical(100.0, 0.0, 0.0), t0);
        }
        let mut now = t0;
        let mut saw_settling = false;
        for _ in 0..500 {
            now += FRAME;
            rail.tick(now);
            saw_settling |= rail.state() == LoopState::Settling;
            if rail.state() == LoopState::Idle {
                break;
            }
        }
        assert!(saw_settling);
        assert_eq!(rail.state(), LoopState::Idle);
        assert_eq!(rail.velocity(), 0.0);
        assert!(rail.position() > 0.0);
        assert_on_boundary(&rail);
    }

    #[test]
    fn test_position_stays_in_bounds_under_heavy_wheel() {
        let mut rail = rail();
        let t0 = Instant::now();
        for _ in 0..50 {
            rail.wheel(WheelInput::vertical(400.0, 0.0, 0.0), t0);
        }
        let mut now = t0;
        for _ in 0..100 {
            now += FRAME;
            rail.tick(now);
            assert!(rail.position() >= 0.0 && rail.position() <= rail.max_scroll());
        }
        assert_eq!(rail.position(), rail.max_scroll());
    }

    #[test]
    fn test_drag_moves_rail_and_releases_momentum() {
        let mut rail = rail();
        rail.set_metrics(metrics());
        let t0 = Instant::now();

        rail.pointer_down(PointerInput::new(1, 600.0, 10.0), t0);
        assert!(rail.is_dragging());
        assert!(rail.is_loop_running());

        // Drag left 100 units over 50ms: rail scrolls forward
        assert!(rail.pointer_move(PointerInput::new(1, 500.0, 10.0), t0 + Duration::from_millis(50)));
        assert_eq!(rail.position(), 100.0);
        assert!((rail.velocity() - 24.0).abs() < 1e-9);

        // Ticks during the drag do not integrate velocity
        rail.tick(t0 + Duration::from_millis(60));
        assert_eq!(rail.position(), 100.0);
        assert_eq!(rail.state(), LoopState::Coasting);

        assert!(rail.pointer_up(t0 + Duration::from_millis(66)));
        assert!(!rail.is_dragging());
        rail.tick(t0 + Duration::from_millis(82));
        assert!((rail.position() - 124.0).abs() < 1e-9);

        run_until_idle(&mut rail, t0 + Duration::from_millis(82));
        assert_on_boundary(&rail);
    }

    #[test]
    fn test_rightward_drag_gives_negative_release_velocity() {
        let mut rail = rail();
        let t0 = Instant::now();
        let (start_x, end_x) = (300.0, 400.0);
        rail.pointer_down(PointerInput::new(1, start_x, 0.0), t0);
        rail.pointer_move(PointerInput::new(1, end_x, 0.0), t0 + Duration::from_millis(50));
        rail.pointer_up(t0 + Duration::from_millis(50));
        assert!((rail.velocity() - (start_x - end_x) / 50.0 * 12.0).abs() < 1e-9);
        // Already at the start, so the rail stays clamped
        assert_eq!(rail.position(), 0.0);
    }

    #[test]
    fn test_moves_from_other_pointers_are_ignored() {
        let mut rail = rail();
        let t0 = Instant::now();
        assert!(!rail.pointer_move(PointerInput::new(1, 10.0, 0.0), t0));
        rail.pointer_down(PointerInput::new(1, 300.0, 0.0), t0);
        assert!(!rail.pointer_move(PointerInput::new(2, 100.0, 0.0), t0 + FRAME));
        assert_eq!(rail.position(), 0.0);
        assert!(rail.pointer_cancel(t0 + FRAME));
        assert!(!rail.pointer_cancel(t0 + FRAME));
    }

    #[test]
    fn test_arrow_keys_step_one_pitch() {
        let mut rail = rail();
        let t0 = Instant::now();
        assert!(rail.key(RailKey::Right, t0));
        rail.tick(t0 + Duration::from_millis(150));
        assert!(rail.position() > 0.0 && rail.position() < 256.0);
        rail.tick(t0 + Duration::from_millis(300));
        assert!((rail.position() - 256.0).abs() < 1e-6);

        let t1 = run_until_idle(&mut rail, t0 + Duration::from_millis(300));
        assert!((rail.position() - 256.0).abs() < 1e-6);

        assert!(rail.key(RailKey::Left, t1));
        rail.tick(t1 + Duration::from_millis(300));
        assert!(rail.position().abs() < 1e-6);
    }

    #[test]
    fn test_rapid_arrow_presses_chain() {
        let mut rail = rail();
        let t0 = Instant::now();
        rail.key(RailKey::Right, t0);
        rail.tick(t0 + Duration::from_millis(50));
        rail.key(RailKey::Right, t0 + Duration::from_millis(50));
        rail.tick(t0 + Duration::from_millis(350));
        assert!((rail.position() - 512.0).abs() < 1e-6);
    }

    #[test]
    fn test_step_past_end_is_clamped() {
        let mut rail = rail();
        let t0 = Instant::now();
        rail.scroll_native(rail.max_scroll());
        assert!(rail.key(RailKey::Right, t0));
        rail.tick(t0 + Duration::from_millis(400));
        assert_eq!(rail.position(), rail.max_scroll());
        assert!(!rail.key(RailKey::Other, t0));
    }

    #[test]
    fn test_wheel_interrupts_settle() {
        let mut rail = rail();
        let t0 = Instant::now();
        rail.scroll_native(100.0);
        rail.kick(t0);
        let mut now = t0;
        while rail.state() != LoopState::Settling {
            now += FRAME;
            rail.tick(now);
        }
        rail.wheel(WheelInput::vertical(100.0, 0.0, 0.0), now);
        assert_eq!(rail.state(), LoopState::Coasting);
    }

    #[test]
    fn test_auto_scroll_drifts_when_idle() {
        let mut rail = rail();
        let t0 = Instant::now();
        assert!(rail.start_auto_scroll());
        assert!(!rail.start_auto_scroll());
        rail.tick(t0);
        rail.tick(t0 + Duration::from_millis(500));
        assert!((rail.position() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_auto_scroll_yields_to_momentum() {
        let mut rail = rail();
        let t0 = Instant::now();
        rail.start_auto_scroll();
        rail.tick(t0);
        // A host kick does not pause auto-scroll, but the running loop holds it
        rail.kick(t0);
        rail.tick(t0 + Duration::from_millis(100));
        assert_eq!(rail.position(), 0.0);

        let idle_at = run_until_idle(&mut rail, t0 + Duration::from_millis(100));
        let later = idle_at + Duration::from_millis(500);
        rail.tick(later);
        assert!(rail.position() > 0.0);
    }

    #[test]
    fn test_interactions_pause_auto_scroll() {
        let t0 = Instant::now();
        for interact in [
            RailController::pointer_enter as fn(&mut RailController, Instant),
            RailController::touch_start,
        ] {
            let mut rail = rail();
            rail.start_auto_scroll();
            rail.tick(t0);
            interact(&mut rail, t0);
            assert!(!rail.is_loop_running());
            rail.tick(t0 + Duration::from_millis(3000));
            assert_eq!(rail.position(), 0.0);
            rail.tick(t0 + Duration::from_millis(4500));
            assert!(rail.position() > 0.0);
        }
    }

    #[test]
    fn test_every_interaction_pauses_auto_scroll() {
        let interactions: [(&str, fn(&mut RailController, Instant)); 8] = [
            ("pointer enter", |rail, now| rail.pointer_enter(now)),
            ("touch start", |rail, now| rail.touch_start(now)),
            ("vertical wheel", |rail, now| {
                rail.wheel(WheelInput::vertical(100.0, 0.0, 0.0), now);
            }),
            ("horizontal wheel", |rail, now| {
                rail.wheel(WheelInput::horizontal(100.0, 0.0, 0.0), now);
            }),
            ("other key", |rail, now| {
                rail.key(RailKey::Other, now);
            }),
            ("arrow key", |rail, now| {
                rail.key(RailKey::Right, now);
            }),
            ("pointer down", |rail, now| {
                rail.pointer_down(PointerInput::new(1, 300.0, 0.0), now)
            }),
            ("pointer down then cancel", |rail, now| {
                rail.pointer_down(PointerInput::new(1, 300.0, 0.0), now);
                rail.pointer_cancel(now + Duration::from_millis(100));
            }),
        ];

        let t0 = Instant::now();
        for (name, interact) in interactions {
            let mut rail = rail();
            rail.start_auto_scroll();
            assert!(!rail.is_auto_scroll_paused(t0), "{} paused early", name);

            interact(&mut rail, t0);
            assert!(rail.is_auto_scroll_paused(t0 + Duration::from_millis(4000)), "{} did not pause", name);
            assert!(!rail.is_auto_scroll_paused(t0 + Duration::from_millis(4001)), "{} paused too long", name);
        }
    }

    #[test]
    fn test_pointer_up_leaves_pause_window_alone() {
        let mut rail = rail();
        let t0 = Instant::now();
        rail.pointer_down(PointerInput::new(1, 300.0, 0.0), t0);
        rail.pointer_up(t0 + Duration::from_millis(3000));
        assert!(!rail.is_auto_scroll_paused(t0 + Duration::from_millis(4001)));
    }

    #[test]
    fn test_arrow_key_during_drag_does_not_step() {
        let mut rail = rail();
        let t0 = Instant::now();
        rail.pointer_down(PointerInput::new(1, 600.0, 0.0), t0);
        assert!(!rail.key(RailKey::Right, t0 + Duration::from_millis(10)));
        assert!(rail.is_auto_scroll_paused(t0 + Duration::from_millis(4010)));

        rail.pointer_move(PointerInput::new(1, 200.0, 0.0), t0 + Duration::from_millis(500));
        assert_eq!(rail.position(), 400.0);
        let release = rail.velocity();
        assert!((release - 9.6).abs() < 1e-9);

        rail.pointer_up(t0 + Duration::from_millis(510));
        rail.tick(t0 + Duration::from_millis(526));
        assert!((rail.position() - (400.0 + release)).abs() < 1e-9);
        assert_eq!(rail.state(), LoopState::Coasting);
    }

    #[test]
    fn test_reduced_motion_disables_auto_scroll() {
        let mut rail = RailController::new(
            RailConfig::default(),
            &AutoScrollConfig::default(),
            metrics(),
            true,
        );
        assert!(!rail.start_auto_scroll());
        rail.tick(Instant::now());
        assert!(!rail.needs_frames());
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut rail = rail();
        rail.scroll_native(1500.0);
        rail.set_metrics(RailMetrics {
            content_extent: 1000.0,
            ..metrics()
        });
        assert_eq!(rail.position(), 200.0);
        assert_eq!(rail.focused_index(), 1);
    }
}
