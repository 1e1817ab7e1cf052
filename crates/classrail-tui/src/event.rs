use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};

/// Event handler for terminal events
///
/// Delivers input as it arrives and a `Tick` at every frame deadline. While
/// something is animating, frames come at the animation rate, otherwise at
/// the slower idle rate.
pub struct EventHandler {
    idle_tick: Duration,
    frame: Duration,
    next_tick: Instant,
}

impl EventHandler {
    pub fn new(idle_tick_ms: u64, frame_rate: u32) -> Self {
        let frame = if frame_rate == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / frame_rate as u64).max(1))
        };
        Self {
            idle_tick: Duration::from_millis(idle_tick_ms),
            frame,
            next_tick: Instant::now(),
        }
    }

    /// Poll for the next event
    pub fn next(&mut self, animating: bool) -> Result<Option<AppEvent>> {
        let now = Instant::now();
        if now >= self.next_tick {
            let interval = if animating { self.frame } else { self.idle_tick };
            self.next_tick = now + interval;
            return Ok(Some(AppEvent::Tick(now)));
        }

        if !event::poll(self.next_tick - now)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) => {
                // Only handle key press events, ignore release events
                if key.kind == KeyEventKind::Press {
                    Ok(Some(AppEvent::Key(key)))
                } else {
                    Ok(None)
                }
            }
            Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            Event::FocusLost => Ok(Some(AppEvent::FocusLost)),
            _ => Ok(None),
        }
    }

    /// Pull the next frame in after input so motion starts immediately
    pub fn wake(&mut self) {
        let soonest = Instant::now() + self.frame;
        if soonest < self.next_tick {
            self.next_tick = soonest;
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse button, drag, move or wheel
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Terminal lost focus (drops pointer capture)
    FocusLost,
    /// Frame tick with its timestamp
    Tick(Instant),
}
