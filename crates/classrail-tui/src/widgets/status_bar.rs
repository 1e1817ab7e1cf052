use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode, Screen};
use crate::rail::LoopState;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let mode_str = match (&app.mode, app.screen) {
            (Mode::EmailPrompt { .. }, _) => "EMAIL",
            (Mode::Help, _) => "HELP",
            (Mode::Normal, Screen::Login) => "LOGIN",
            (Mode::Normal, Screen::Hero) => "HERO",
            (Mode::Normal, Screen::Portal { .. }) => "PORTAL",
            (Mode::Normal, Screen::Gallery) => "GALLERY",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else if let Some(rail) = app.rail.as_ref() {
            let motion = match rail.state() {
                LoopState::Coasting => "coasting",
                LoopState::Settling => "settling",
                LoopState::Idle if rail.is_dragging() => "dragging",
                LoopState::Idle if rail.is_auto_scrolling() => "drifting",
                LoopState::Idle => "idle",
            };
            format!(
                " {} | Card {}/{} | {}",
                mode_str,
                app.focused_card().map(|i| i + 1).unwrap_or(0),
                app.cards().len(),
                motion
            )
        } else {
            format!(" {}", mode_str)
        };

        let keys = &app.config.keymap;
        let help_hint = format!(" {}:quit {}:help ", keys.quit, keys.help);
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey1).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
