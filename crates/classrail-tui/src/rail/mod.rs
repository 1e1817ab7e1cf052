//! Momentum rail for the class gallery
//!
//! A horizontally scrolling strip of cards with inertia, drag-to-scroll,
//! wheel remapping, arrow-key steps, snap-to-card settling and an idle
//! auto-scroll, all sharing one scroll position.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `config` - Tuning types (re-exported from classrail-core) and durations
//! - `easing` - Pure easing curves
//! - `timing` - Progress and interpolation over explicit timestamps
//! - `geometry` - Pitch, bounds and clamping
//! - `input` - Wheel/key input shapes and the section wheel router
//! - `interaction` - Published user interactions
//!
//! ## L3 Molecular Layer
//! - `tween` - Timed position animation
//! - `momentum` - Velocity, friction and the loop flag
//! - `settle` - Snap-to-boundary planning
//! - `drag` - Pointer drag session
//! - `oscillator` - Idle auto-scroll
//!
//! ## L2 Organism Layer
//! - `controller` - One frame tick driving all of the above
//!
//! # Usage
//!
//! ```ignore
//! use classrail_tui::rail::{RailController, RailMetrics, WheelInput};
//!
//! let mut rail = RailController::new(config.rail.clone(), &config.auto_scroll, metrics, false);
//! rail.start_auto_scroll();
//!
//! // From input handlers
//! rail.wheel(WheelInput::vertical(100.0, x, y), Instant::now());
//!
//! // Once per frame
//! let offset = rail.tick(Instant::now());
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod timing;

// L3 Molecular Layer
pub mod drag;
pub mod momentum;
pub mod oscillator;
pub mod settle;
pub mod tween;

// L2 Organism Layer
pub mod controller;

pub use config::{AutoScrollConfigExt, RailConfigExt};
pub use controller::RailController;
pub use drag::PointerInput;
pub use easing::{EasingType, EasingTypeExt};
pub use geometry::{Bounds, RailMetrics};
pub use input::{RailKey, WheelInput, WheelOutcome, WheelRouter};
pub use interaction::{Interaction, InteractionKind, InteractionListener};
pub use momentum::LoopState;
pub use oscillator::Direction;
