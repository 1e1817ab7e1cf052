//! L3 Molecular Layer: Momentum engine
//!
//! Owns the rail velocity and the "loop running" flag. A kick records the
//! activity time and starts the loop if it is not already running; the
//! per-frame physics lives in [`MomentumEngine::coast`] and never spawns
//! anything itself.

use std::time::{Duration, Instant};

use tracing::debug;

use super::config::{RailConfig, RailConfigExt};
use super::interaction::{Interaction, InteractionKind, InteractionListener};

/// Logical state of the rail animation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Nothing running
    Idle,
    /// Loop running, velocity decaying (or held by a drag)
    Coasting,
    /// Easing toward the nearest item boundary
    Settling,
}

#[derive(Debug, Clone)]
pub struct MomentumEngine {
    /// Units per tick, positive scrolls toward the end of the rail
    velocity: f64,
    running: bool,
    last_activity: Option<Instant>,
    friction: f64,
    min_speed_for_settle: f64,
    idle_after: Duration,
}

impl MomentumEngine {
    pub fn new(config: &RailConfig) -> Self {
        Self {
            velocity: 0.0,
            running: false,
            last_activity: None,
            friction: config.friction.clamp(0.0, 1.0),
            min_speed_for_settle: config.min_speed_for_settle,
            idle_after: config.idle_after(),
        }
    }

    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn add_impulse(&mut self, delta: f64) {
        self.velocity += delta;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_activity(&self) -> Option<Instant> {
        self.last_activity
    }

    /// Record activity and start the loop if needed
    ///
    /// Returns true only when this call started the loop.
    pub fn kick(&mut self, now: Instant) -> bool {
        self.last_activity = Some(now);
        if self.running {
            return false;
        }
        self.running = true;
        debug!(velocity = self.velocity, "Rail loop started");
        true
    }

    /// One undriven physics tick: returns the new (unclamped) position
    pub fn coast(&mut self, position: f64) -> f64 {
        let next = position + self.velocity;
        self.velocity *= self.friction;
        next
    }

    /// True once no input has arrived for longer than the idle threshold
    pub fn is_idle(&self, now: Instant) -> bool {
        self.last_activity
            .map(|at| now.saturating_duration_since(at) > self.idle_after)
            .unwrap_or(true)
    }

    /// Coasting → Settling condition
    pub fn ready_to_settle(&self, now: Instant, dragging: bool) -> bool {
        !dragging && self.is_idle(now) && self.velocity.abs() < self.min_speed_for_settle
    }

    /// Stop the loop and drop any residual velocity
    pub fn stop(&mut self) {
        self.running = false;
        self.velocity = 0.0;
    }
}

impl InteractionListener for MomentumEngine {
    fn on_interaction(&mut self, interaction: &Interaction) {
        let kicks = match interaction.kind {
            InteractionKind::Wheel { intercepted } => intercepted,
            InteractionKind::KeyDown { step } => step,
            InteractionKind::PointerDown | InteractionKind::PointerUp => true,
            InteractionKind::PointerEnter | InteractionKind::TouchStart => false,
        };
        if kicks {
            self.kick(interaction.at);
        }
    }
}
