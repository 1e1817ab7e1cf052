use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::app::{App, LoginButton};

pub struct LoginWidget;

impl LoginWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let panel = centered_rect(44, 13, area);

        let block = Block::default()
            .title(" Enter the Guild ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.gold))
            .style(Style::default().bg(theme.bg1));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Tagline
                Constraint::Length(3), // Google
                Constraint::Length(3), // Email
                Constraint::Min(0),
                Constraint::Length(1), // Hint
            ])
            .split(inner);

        let tagline = Paragraph::new("Sign in to choose your class")
            .style(Style::default().fg(theme.fg1))
            .alignment(Alignment::Center);
        frame.render_widget(tagline, chunks[0]);

        Self::render_button(frame, chunks[1], app, LoginButton::Google, "Continue with Google");
        Self::render_button(frame, chunks[2], app, LoginButton::Email, "Continue with Email");

        let hint = Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.gold)),
            Span::styled(" switch  ", Style::default().fg(theme.grey1)),
            Span::styled("Enter", Style::default().fg(theme.gold)),
            Span::styled(" sign in", Style::default().fg(theme.grey1)),
        ]);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[4]);
    }

    fn render_button(frame: &mut Frame, area: Rect, app: &App, button: LoginButton, label: &str) {
        let theme = &app.theme;
        let focused = app.login_focus == button;
        let (border, text) = if focused {
            (
                Style::default().fg(theme.gold),
                Style::default()
                    .fg(theme.fg0)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (Style::default().fg(theme.grey0), Style::default().fg(theme.fg1))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let paragraph = Paragraph::new(label)
            .style(text)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area.inner(Margin::new(2, 0)));
    }
}
