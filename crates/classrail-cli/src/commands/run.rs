use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tracing::info;

use classrail_core::{AppConfig, SessionStore};
use classrail_tui::{
    app::{App, Mode, Screen},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    widgets::{
        GalleryWidget, HeroWidget, LoginWidget, PopupWidget, PortalWidget, StatusBarWidget,
    },
};

/// Tick interval when nothing is moving
const IDLE_TICK_MS: u64 = 250;

pub fn run(config: Arc<AppConfig>, reduce_motion: bool) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);
    let sessions = SessionStore::new(config.session_path());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Classrail")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), sessions, reduce_motion);
    let size = terminal.size()?;
    app.resize(Rect::new(0, 0, size.width, size.height));
    info!(reduce_motion, screen = ?app.screen, "Starting");

    let mut events = EventHandler::new(IDLE_TICK_MS, config.ui.frame_rate);
    let result = main_loop(&mut terminal, &mut app, &keymap, &mut events);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    keymap: &Keymap,
    events: &mut EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app, Instant::now()))?;

        if let Some(event) = events.next(app.needs_animation())? {
            match event {
                AppEvent::Tick(now) => app.tick(now),
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, Instant::now())?;
                    events.wake();
                }
                AppEvent::Mouse(mouse) => {
                    if app.handle_mouse(mouse, Instant::now()) {
                        events.wake();
                    }
                }
                AppEvent::Resize(width, height) => app.resize(Rect::new(0, 0, width, height)),
                AppEvent::FocusLost => app.handle_focus_lost(Instant::now()),
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg0)), area);

    let body = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    match app.screen {
        Screen::Login => LoginWidget::render(frame, body, app),
        Screen::Hero => HeroWidget::render(frame, body, app),
        Screen::Portal { .. } => PortalWidget::render(frame, body, app, app.portal_progress(now)),
        Screen::Gallery => GalleryWidget::render(frame, app),
    }
    StatusBarWidget::render(frame, app.layout.status, app);

    // Render popups on top
    match &app.mode {
        Mode::EmailPrompt { .. } => PopupWidget::render_email_prompt(frame, app),
        Mode::Help => PopupWidget::render_help(frame, app),
        Mode::Normal => {}
    }
}

fn handle_action(app: &mut App, action: Action, now: Instant) -> Result<()> {
    if action != Action::None {
        app.clear_status();
    }

    // Every key press reaches the rail: arrows step it, anything else pauses auto-scroll
    if app.mode == Mode::Normal {
        app.rail_key(action.rail_key(), now);
    }

    match action {
        Action::Quit => {
            app.should_quit = true;
        }
        Action::Help => {
            app.mode = Mode::Help;
        }
        Action::ExitMode | Action::Cancel => {
            app.mode = Mode::Normal;
        }
        Action::Select => match app.screen {
            Screen::Login => app.activate_login_button()?,
            Screen::Hero => app.open_portal(now),
            Screen::Gallery => app.select_card(),
            Screen::Portal { .. } => {}
        },
        Action::NextButton => {
            if app.screen == Screen::Login {
                app.next_login_button();
            }
        }
        Action::LoginGoogle => {
            if app.screen == Screen::Login {
                app.sign_in_google()?;
            }
        }
        Action::LoginEmail => {
            if app.screen == Screen::Login {
                app.begin_email_prompt();
            }
        }
        Action::Logout => {
            if app.session.is_some() {
                app.logout()?;
            }
        }
        Action::Confirm => app.submit_email()?,
        Action::InputChar(c) => app.push_email_char(c),
        Action::Backspace => app.pop_email_char(),
        Action::StepLeft | Action::StepRight | Action::None => {}
    }

    Ok(())
}
