//! L3 Molecular Layer: Idle auto-scroll
//!
//! Drifts the rail back and forth between its ends while nobody is touching
//! it. Never starts when reduced motion is preferred.

use std::time::{Duration, Instant};

use tracing::debug;

use super::config::{AutoScrollConfig, AutoScrollConfigExt};
use super::interaction::{Interaction, InteractionKind, InteractionListener};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reverse,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoScroller {
    direction: Direction,
    paused_until: Option<Instant>,
    last_frame: Option<Instant>,
    running: bool,
    allowed: bool,
    /// Units per second
    speed: f64,
    pause: Duration,
}

impl AutoScroller {
    pub fn new(config: &AutoScrollConfig, reduced_motion: bool) -> Self {
        Self {
            direction: Direction::Forward,
            paused_until: None,
            last_frame: None,
            running: false,
            allowed: config.enabled && !reduced_motion,
            speed: config.speed,
            pause: config.pause_duration(),
        }
    }

    /// Start drifting; returns false if already running or not allowed
    pub fn start(&mut self) -> bool {
        if !self.allowed || self.running {
            return false;
        }
        self.running = true;
        debug!("Auto-scroll started");
        true
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Hold the drift off until `now + pause`
    pub fn pause(&mut self, now: Instant) {
        self.paused_until = Some(now + self.pause);
    }

    pub fn is_paused(&self, now: Instant) -> bool {
        self.paused_until.map(|until| now <= until).unwrap_or(false)
    }

    /// One frame of drift
    ///
    /// Returns the new position, or `None` when the rail is left alone this
    /// frame (not running, paused, nothing to scroll, or `hold` set by the
    /// caller because momentum still owns the rail). The frame clock advances
    /// either way so a resumed drift never jumps.
    pub fn advance(&mut self, position: f64, max_scroll: f64, now: Instant, hold: bool) -> Option<f64> {
        if !self.running {
            return None;
        }
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_frame = Some(now);

        if max_scroll <= 0.0 || hold || self.is_paused(now) {
            return None;
        }

        let next = (position + self.direction.sign() * self.speed * dt).clamp(0.0, max_scroll);
        if next <= 0.0 && self.direction != Direction::Forward {
            debug!("Auto-scroll reached start, reversing");
            self.direction = Direction::Forward;
        }
        if next >= max_scroll - 1.0 && self.direction != Direction::Reverse {
            debug!("Auto-scroll reached end, reversing");
            self.direction = Direction::Reverse;
        }
        Some(next)
    }
}

impl InteractionListener for AutoScroller {
    fn on_interaction(&mut self, interaction: &Interaction) {
        match interaction.kind {
            InteractionKind::PointerDown
            | InteractionKind::Wheel { .. }
            | InteractionKind::TouchStart
            | InteractionKind::PointerEnter
            | InteractionKind::KeyDown { .. } => self.pause(interaction.at),
            InteractionKind::PointerUp => {}
        }
    }
}
