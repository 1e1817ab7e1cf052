use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::app::App;
use crate::rail::easing::cubic_ease_out;

pub struct HeroWidget;

impl HeroWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let greeting = match app.session.as_ref().and_then(|s| s.email.as_deref()) {
            Some(email) => format!("Welcome back, {}", email),
            None => "Welcome, adventurer".to_string(),
        };

        let lines = vec![
            Line::from(Span::styled(
                "FORGE YOUR LEGEND",
                Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(greeting, Style::default().fg(theme.fg1))),
            Line::from(""),
            Line::from(vec![
                Span::styled("[ Enter ]", Style::default().fg(theme.portal).add_modifier(Modifier::BOLD)),
                Span::styled(" open the portal", Style::default().fg(theme.grey1)),
            ]),
        ];

        let panel = centered_rect(48, lines.len() as u16 + 2, area);
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().style(Style::default().bg(theme.bg0)));
        frame.render_widget(paragraph, panel);
    }
}

/// Expanding ring shown while the portal opens
pub struct PortalWidget;

impl PortalWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, progress: f64) {
        let theme = &app.theme;
        let eased = cubic_ease_out(progress.clamp(0.0, 1.0));
        let width = ((area.width as f64 * eased).round() as u16).max(2);
        let height = ((area.height as f64 * eased).round() as u16).max(2);
        let ring = centered_rect(width, height, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(theme.portal))
            .style(Style::default().bg(theme.bg2));
        let inner = block.inner(ring);
        frame.render_widget(block, ring);

        if inner.height > 0 {
            let label = Paragraph::new("The portal opens...")
                .style(Style::default().fg(theme.fg0).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center);
            frame.render_widget(label, centered_rect(inner.width, 1, inner));
        }
    }
}
