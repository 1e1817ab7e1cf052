//! L4 Atomic Layer: User interaction events
//!
//! Input adapters publish one [`Interaction`] per user gesture. The momentum
//! engine and the auto-scroller both subscribe, each deciding which kinds
//! matter to it and for how long.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    /// Wheel gesture; `intercepted` when it was turned into rail velocity
    Wheel { intercepted: bool },
    /// Key press; `step` when it moved the rail
    KeyDown { step: bool },
    PointerDown,
    /// Pointer released or capture lost
    PointerUp,
    PointerEnter,
    TouchStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub at: Instant,
}

impl Interaction {
    pub fn new(kind: InteractionKind, at: Instant) -> Self {
        Self { kind, at }
    }
}

/// Subscriber to published interactions
pub trait InteractionListener {
    fn on_interaction(&mut self, interaction: &Interaction);
}
