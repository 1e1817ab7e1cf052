use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use classrail_core::{AppConfig, ClassCard, Session, SessionStore, CLASS_CARDS};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::info;

use crate::rail::{
    Bounds, PointerInput, RailController, RailKey, RailMetrics, WheelInput, WheelOutcome,
    WheelRouter,
};
use crate::theme::{load_theme, Theme};

/// Rail units scrolled by one mouse wheel notch
pub const WHEEL_NOTCH: f64 = 100.0;

/// Height of a card in terminal rows
pub const CARD_HEIGHT: u16 = 16;

/// Columns between the section edge and the rail
const RAIL_MARGIN: u16 = 2;

/// Used when a hand-built config carries a non-positive column scale
const FALLBACK_UNITS_PER_COLUMN: f64 = 8.0;

/// The terminal has a single mouse pointer
const MOUSE_POINTER_ID: u64 = 1;

/// Which page of the site is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Provider choice
    Login,
    /// Title card with the portal call to action
    Hero,
    /// Portal-open animation
    Portal { opened_at: Instant },
    /// The class rail
    Gallery,
}

/// Overlay mode on top of the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Email sign-in modal
    EmailPrompt { input: String, error: Option<String> },
    /// Help overlay
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginButton {
    Google,
    Email,
}

/// Screen regions of the gallery, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GalleryLayout {
    pub header: Rect,
    /// Section that owns the capturing wheel listener
    pub section: Rect,
    pub rail: Rect,
    pub status: Rect,
}

impl GalleryLayout {
    pub fn compute(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Section
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let section = chunks[1];
        let rail_height = CARD_HEIGHT.min(section.height);
        let margin = RAIL_MARGIN.min(section.width / 4);
        let rail = Rect::new(
            section.x + margin,
            section.y + (section.height - rail_height) / 2,
            section.width.saturating_sub(margin * 2),
            rail_height,
        );

        Self {
            header: chunks[0],
            section,
            rail,
            status: chunks[2],
        }
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Local session flag storage
    pub sessions: SessionStore,
    pub session: Option<Session>,
    pub screen: Screen,
    pub mode: Mode,
    pub login_focus: LoginButton,
    /// Created once the cards are laid out
    pub rail: Option<RailController>,
    pub layout: GalleryLayout,
    /// When the post-reveal auto-scroll start is due
    pub pending_auto_start: Option<Instant>,
    /// Whether the rail has keyboard focus
    pub rail_focused: bool,
    /// Card picked with Enter
    pub chosen: Option<usize>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    reduced_motion: bool,
    pointer_inside_rail: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, sessions: SessionStore, reduced_motion: bool) -> Self {
        let session = sessions.load();
        let screen = if session.is_some() {
            Screen::Hero
        } else {
            Screen::Login
        };
        Self {
            theme: load_theme(&config.ui.theme),
            config,
            sessions,
            session,
            screen,
            mode: Mode::Normal,
            login_focus: LoginButton::Google,
            rail: None,
            layout: GalleryLayout::default(),
            pending_auto_start: None,
            rail_focused: false,
            chosen: None,
            status_message: None,
            should_quit: false,
            reduced_motion,
            pointer_inside_rail: false,
        }
    }

    pub fn cards(&self) -> &'static [ClassCard] {
        CLASS_CARDS
    }

    /// Recompute layout and hand the rail fresh metrics
    pub fn resize(&mut self, area: Rect) {
        self.layout = GalleryLayout::compute(area);
        let metrics = self.rail_metrics();
        if let Some(rail) = self.rail.as_mut() {
            rail.set_metrics(metrics);
        }
    }

    #[inline]
    fn units_per_column(&self) -> f64 {
        match self.config.ui.units_per_column {
            upc if upc.is_finite() && upc > 0.0 => upc,
            _ => FALLBACK_UNITS_PER_COLUMN,
        }
    }

    /// Rail metrics derived from the card layout and current rail width
    pub fn rail_metrics(&self) -> RailMetrics {
        let upc = self.units_per_column();
        let viewport = self.layout.rail.width as f64 * upc;
        let count = self.cards().len();
        if count == 0 {
            return RailMetrics::empty(viewport);
        }
        let width = self.config.ui.card_width as f64 * upc;
        let gap = self.config.ui.card_gap as f64 * upc;
        RailMetrics {
            item_width: Some(width),
            gap,
            content_extent: count as f64 * (width + gap) - gap,
            viewport_extent: viewport,
        }
    }

    /// Rail scroll offset in whole columns
    pub fn rail_offset_columns(&self) -> u16 {
        self.rail
            .as_ref()
            .map(|rail| (rail.position() / self.units_per_column()).round() as u16)
            .unwrap_or(0)
    }

    /// Card nearest to the start of the viewport
    pub fn focused_card(&self) -> Option<usize> {
        let rail = self.rail.as_ref()?;
        let last = self.cards().len().checked_sub(1)?;
        Some(rail.focused_index().min(last))
    }

    fn sign_in(&mut self, session: Session) -> Result<()> {
        self.sessions.save(&session)?;
        info!(provider = %session.provider, "Signed in");
        self.session = Some(session);
        self.mode = Mode::Normal;
        self.screen = Screen::Hero;
        Ok(())
    }

    pub fn sign_in_google(&mut self) -> Result<()> {
        self.sign_in(Session::google())
    }

    pub fn begin_email_prompt(&mut self) {
        self.mode = Mode::EmailPrompt {
            input: String::new(),
            error: None,
        };
    }

    pub fn push_email_char(&mut self, c: char) {
        if let Mode::EmailPrompt { input, error } = &mut self.mode {
            input.push(c);
            *error = None;
        }
    }

    pub fn pop_email_char(&mut self) {
        if let Mode::EmailPrompt { input, .. } = &mut self.mode {
            input.pop();
        }
    }

    /// Try the typed address; an invalid one keeps the modal open
    pub fn submit_email(&mut self) -> Result<()> {
        let Mode::EmailPrompt { input, error } = &mut self.mode else {
            return Ok(());
        };
        match Session::email(input) {
            Ok(session) => self.sign_in(session),
            Err(e) => {
                *error = Some(e.to_string());
                Ok(())
            }
        }
    }

    pub fn activate_login_button(&mut self) -> Result<()> {
        match self.login_focus {
            LoginButton::Google => self.sign_in_google(),
            LoginButton::Email => {
                self.begin_email_prompt();
                Ok(())
            }
        }
    }

    pub fn next_login_button(&mut self) {
        self.login_focus = match self.login_focus {
            LoginButton::Google => LoginButton::Email,
            LoginButton::Email => LoginButton::Google,
        };
    }

    pub fn logout(&mut self) -> Result<()> {
        self.sessions.clear()?;
        self.session = None;
        self.rail = None;
        self.pending_auto_start = None;
        self.rail_focused = false;
        self.chosen = None;
        self.screen = Screen::Login;
        self.mode = Mode::Normal;
        self.set_status("Signed out");
        Ok(())
    }

    pub fn open_portal(&mut self, now: Instant) {
        if self.screen == Screen::Hero {
            info!("Opening portal");
            self.screen = Screen::Portal { opened_at: now };
        }
    }

    /// Portal animation progress in [0, 1]
    pub fn portal_progress(&self, now: Instant) -> f64 {
        match self.screen {
            Screen::Portal { opened_at } => crate::rail::timing::progress(
                opened_at,
                now,
                Duration::from_millis(self.config.portal.open_ms),
            ),
            Screen::Gallery => 1.0,
            _ => 0.0,
        }
    }

    fn reveal_gallery(&mut self, now: Instant) {
        self.screen = Screen::Gallery;
        if self.rail.is_none() {
            let mut rail = RailController::new(
                self.config.rail.clone(),
                &self.config.auto_scroll,
                self.rail_metrics(),
                self.reduced_motion,
            );
            rail.kick(now);
            self.rail = Some(rail);
        }
        self.pending_auto_start =
            Some(now + Duration::from_millis(self.config.portal.reveal_delay_ms));
        info!(cards = self.cards().len(), "Gallery revealed");
    }

    /// Advance timed transitions and the rail by one frame
    pub fn tick(&mut self, now: Instant) {
        if let Screen::Portal { opened_at } = self.screen {
            if now >= opened_at + Duration::from_millis(self.config.portal.open_ms) {
                self.reveal_gallery(now);
            }
        }

        if let Some(due) = self.pending_auto_start {
            if now >= due {
                self.pending_auto_start = None;
                self.rail_focused = true;
                if let Some(rail) = self.rail.as_mut() {
                    rail.start_auto_scroll();
                }
            }
        }

        if let Some(rail) = self.rail.as_mut() {
            rail.tick(now);
        }
    }

    /// Whether frames should come at the animation rate
    pub fn needs_animation(&self) -> bool {
        matches!(self.screen, Screen::Portal { .. })
            || self.pending_auto_start.is_some()
            || self.rail.as_ref().map(|r| r.needs_frames()).unwrap_or(false)
    }

    /// Keyboard adapter for the rail; every key press reaches it
    pub fn rail_key(&mut self, key: RailKey, now: Instant) -> bool {
        if self.screen != Screen::Gallery || !self.rail_focused {
            return false;
        }
        self.rail
            .as_mut()
            .map(|rail| rail.key(key, now))
            .unwrap_or(false)
    }

    /// Translate a terminal mouse event into rail input
    ///
    /// Returns true when the rail consumed it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: Instant) -> bool {
        if self.screen != Screen::Gallery || self.mode != Mode::Normal {
            return false;
        }
        let upc = self.units_per_column();
        let router = self.wheel_router();
        let (x, y) = (mouse.column as f64 * upc, mouse.row as f64 * upc);
        let over_rail = router.rail.contains(x, y);
        let pointer = PointerInput::new(MOUSE_POINTER_ID, x, y);

        let Some(rail) = self.rail.as_mut() else {
            return false;
        };

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if over_rail => {
                self.rail_focused = true;
                rail.pointer_down(pointer, now);
                true
            }
            MouseEventKind::Drag(MouseButton::Left) => rail.pointer_move(pointer, now),
            MouseEventKind::Up(MouseButton::Left) => rail.pointer_up(now),
            MouseEventKind::Moved => {
                if over_rail && !self.pointer_inside_rail {
                    rail.pointer_enter(now);
                }
                self.pointer_inside_rail = over_rail;
                over_rail
            }
            MouseEventKind::ScrollDown
            | MouseEventKind::ScrollUp
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => {
                let Some(wheel) = wheel_from_mouse(&mouse, x, y).and_then(|w| router.route(w))
                else {
                    return false;
                };
                if rail.wheel(wheel, now) == WheelOutcome::PassThrough {
                    rail.scroll_native(wheel.delta_x);
                }
                true
            }
            _ => false,
        }
    }

    /// Terminal focus loss drops pointer capture
    pub fn handle_focus_lost(&mut self, now: Instant) {
        if let Some(rail) = self.rail.as_mut() {
            rail.pointer_cancel(now);
        }
        self.pointer_inside_rail = false;
    }

    fn wheel_router(&self) -> WheelRouter {
        let upc = self.units_per_column();
        WheelRouter::new(
            cell_bounds(self.layout.section, upc),
            cell_bounds(self.layout.rail, upc),
        )
    }

    /// Pick the card nearest the start of the viewport
    pub fn select_card(&mut self) {
        if let Some(index) = self.focused_card() {
            self.chosen = Some(index);
            let name = self.cards()[index].name;
            info!(class = name, "Class chosen");
            self.set_status(format!("You chose the {}", name));
        }
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::EmailPrompt { .. })
    }
}

/// Hit-test box covering a rect's cells, in rail units
fn cell_bounds(rect: Rect, upc: f64) -> Bounds {
    Bounds::new(
        rect.x as f64 * upc,
        rect.y as f64 * upc,
        rect.width.saturating_sub(1) as f64 * upc,
        rect.height.saturating_sub(1) as f64 * upc,
    )
}

/// Terminals report notches; Shift+wheel means horizontal like in browsers
fn wheel_from_mouse(mouse: &MouseEvent, x: f64, y: f64) -> Option<WheelInput> {
    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    let wheel = match mouse.kind {
        MouseEventKind::ScrollDown if shift => WheelInput::horizontal(WHEEL_NOTCH, x, y),
        MouseEventKind::ScrollUp if shift => WheelInput::horizontal(-WHEEL_NOTCH, x, y),
        MouseEventKind::ScrollDown => WheelInput::vertical(WHEEL_NOTCH, x, y),
        MouseEventKind::ScrollUp => WheelInput::vertical(-WHEEL_NOTCH, x, y),
        MouseEventKind::ScrollRight => WheelInput::horizontal(WHEEL_NOTCH, x, y),
        MouseEventKind::ScrollLeft => WheelInput::horizontal(-WHEEL_NOTCH, x, y),
        _ => return None,
    };
    Some(wheel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rail::LoopState;

    fn temp_store(name: &str) -> SessionStore {
        let dir = std::env::temp_dir().join(format!("classrail-app-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        SessionStore::new(dir.join("session.json"))
    }

    fn app(name: &str, reduced_motion: bool) -> App {
        let mut app = App::new(Arc::new(AppConfig::default()), temp_store(name), reduced_motion);
        app.resize(Rect::new(0, 0, 120, 30));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// Sign in and walk through the portal to the gallery
    fn open_gallery(app: &mut App, t0: Instant) -> Instant {
        app.sign_in_google().unwrap();
        app.open_portal(t0);
        let revealed = t0 + Duration::from_millis(900);
        app.tick(revealed);
        assert_eq!(app.screen, Screen::Gallery);
        revealed
    }

    #[test]
    fn test_layout_keeps_rail_inside_section() {
        let layout = GalleryLayout::compute(Rect::new(0, 0, 120, 30));
        assert_eq!(layout.rail.height, CARD_HEIGHT);
        assert_eq!(layout.rail.x, 2);
        assert_eq!(layout.rail.width, 116);
        assert!(layout.rail.y >= layout.section.y);
        assert!(layout.rail.bottom() <= layout.section.bottom());
    }

    #[test]
    fn test_metrics_from_card_layout() {
        let app = app("metrics", false);
        let metrics = app.rail_metrics();
        assert_eq!(metrics.item_width, Some(240.0));
        assert_eq!(metrics.item_pitch(300.0), 256.0);
        assert_eq!(metrics.content_extent, 2544.0);
        assert_eq!(metrics.viewport_extent, 928.0);
    }

    #[test]
    fn test_login_to_gallery_flow() {
        let mut app = app("flow", false);
        assert_eq!(app.screen, Screen::Login);
        assert!(app.rail.is_none());

        let t0 = Instant::now();
        let revealed = open_gallery(&mut app, t0);
        assert!(app.sessions.path().exists());
        assert!(app.rail.is_some());
        assert!(!app.rail_focused);

        app.tick(revealed + Duration::from_millis(50));
        assert!(app.rail_focused);
        assert!(app.rail.as_ref().unwrap().is_auto_scrolling());

        // Next launch skips the login screen
        let again = App::new(app.config.clone(), app.sessions.clone(), false);
        assert_eq!(again.screen, Screen::Hero);

        app.logout().unwrap();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.rail.is_none());
        assert!(!app.sessions.path().exists());
    }

    #[test]
    fn test_portal_waits_for_animation() {
        let mut app = app("portal", false);
        app.sign_in_google().unwrap();
        let t0 = Instant::now();
        app.open_portal(t0);
        app.tick(t0 + Duration::from_millis(450));
        assert!(matches!(app.screen, Screen::Portal { .. }));
        assert!((app.portal_progress(t0 + Duration::from_millis(450)) - 0.5).abs() < 1e-9);
        assert!(app.needs_animation());
    }

    #[test]
    fn test_email_prompt_rejects_bad_address() {
        let mut app = app("email", false);
        app.next_login_button();
        app.activate_login_button().unwrap();
        assert!(app.is_input_mode());
        for c in "wizard".chars() {
            app.push_email_char(c);
        }
        app.submit_email().unwrap();
        assert!(matches!(&app.mode, Mode::EmailPrompt { error: Some(_), .. }));
        assert_eq!(app.screen, Screen::Login);

        for c in "@tower.example".chars() {
            app.push_email_char(c);
        }
        app.submit_email().unwrap();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.screen, Screen::Hero);
        assert_eq!(
            app.session.as_ref().and_then(|s| s.email.as_deref()),
            Some("wizard@tower.example")
        );
    }

    #[test]
    fn test_wheel_over_rail_is_captured() {
        let mut app = app("wheel", false);
        let now = open_gallery(&mut app, Instant::now());
        let row = app.layout.rail.y + 2;

        // Section margin beside the rail: not captured
        assert!(!app.handle_mouse(mouse(MouseEventKind::ScrollDown, 0, row), now));
        assert_eq!(app.rail.as_ref().unwrap().velocity(), 0.0);

        assert!(app.handle_mouse(mouse(MouseEventKind::ScrollDown, 10, row), now));
        let rail = app.rail.as_ref().unwrap();
        assert!((rail.velocity() - 13.8).abs() < 1e-9);
        assert_eq!(rail.state(), LoopState::Coasting);
    }

    #[test]
    fn test_horizontal_wheel_scrolls_natively() {
        let mut app = app("hwheel", false);
        let now = open_gallery(&mut app, Instant::now());
        let row = app.layout.rail.y + 2;
        assert!(app.handle_mouse(mouse(MouseEventKind::ScrollRight, 10, row), now));
        let rail = app.rail.as_ref().unwrap();
        assert_eq!(rail.position(), WHEEL_NOTCH);
        assert_eq!(rail.velocity(), 0.0);
    }

    #[test]
    fn test_mouse_drag_scrolls_rail() {
        let mut app = app("drag", true);
        let t0 = open_gallery(&mut app, Instant::now());
        let row = app.layout.rail.y + 2;

        assert!(app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 60, row), t0));
        assert!(app.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), 50, row),
            t0 + Duration::from_millis(40)
        ));
        assert_eq!(app.rail.as_ref().unwrap().position(), 80.0);
        assert_eq!(app.rail_offset_columns(), 10);

        assert!(app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 50, row), t0 + Duration::from_millis(50)));
        assert!(!app.rail.as_ref().unwrap().is_dragging());
    }

    #[test]
    fn test_keys_need_rail_focus() {
        let mut app = app("keys", true);
        let t0 = open_gallery(&mut app, Instant::now());
        assert!(!app.rail_key(RailKey::Right, t0));

        app.tick(t0 + Duration::from_millis(50));
        assert!(app.rail_key(RailKey::Right, t0 + Duration::from_millis(50)));
        app.tick(t0 + Duration::from_millis(400));
        assert_eq!(app.focused_card(), Some(1));

        app.select_card();
        assert_eq!(app.chosen, Some(1));
        assert_eq!(app.status_message.as_deref(), Some("You chose the Wizard"));
    }

    #[test]
    fn test_non_positive_column_scale_falls_back() {
        let mut config = AppConfig::default();
        config.ui.units_per_column = 0.0;
        let mut app = App::new(Arc::new(config), temp_store("zero-scale"), true);
        app.resize(Rect::new(0, 0, 120, 30));
        let t0 = open_gallery(&mut app, Instant::now());

        assert_eq!(app.rail_metrics().viewport_extent, 928.0);
        app.rail.as_mut().unwrap().scroll_native(80.0);
        assert_eq!(app.rail_offset_columns(), 10);
        app.tick(t0);
    }

    #[test]
    fn test_reduced_motion_never_auto_scrolls() {
        let mut app = app("reduced", true);
        let t0 = open_gallery(&mut app, Instant::now());
        app.tick(t0 + Duration::from_millis(100));
        assert!(!app.rail.as_ref().unwrap().is_auto_scrolling());
    }
}
