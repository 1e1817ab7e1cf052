use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::centered_rect;
use crate::app::{App, Mode};

pub struct PopupWidget;

impl PopupWidget {
    /// Render the email sign-in modal
    pub fn render_email_prompt(frame: &mut Frame, app: &App) {
        let Mode::EmailPrompt { input, error } = &app.mode else {
            return;
        };
        let theme = &app.theme;
        let area = frame.area();

        let popup_width = 50u16.min(area.width.saturating_sub(4));
        let popup_area = centered_rect(popup_width, 8, area);

        // Clear the background area
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Sign in with Email ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        let inner_area = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Label
                Constraint::Length(1), // Input
                Constraint::Length(2), // Error
                Constraint::Length(1), // Hint
            ])
            .split(inner_area);

        frame.render_widget(
            Paragraph::new(Span::styled("Email address", Style::default().fg(theme.fg1))),
            chunks[0],
        );

        let field = Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.gold)),
            Span::styled(input.as_str(), Style::default().fg(theme.fg0).add_modifier(Modifier::BOLD)),
            Span::styled("_", Style::default().fg(theme.gold).add_modifier(Modifier::SLOW_BLINK)),
        ]);
        frame.render_widget(Paragraph::new(field).style(Style::default().bg(theme.bg2)), chunks[1]);

        if let Some(error) = error {
            frame.render_widget(
                Paragraph::new(Span::styled(error.as_str(), Style::default().fg(theme.error))),
                chunks[2],
            );
        }

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.success).add_modifier(Modifier::BOLD)),
            Span::styled(" sign in  ", Style::default().fg(theme.grey1)),
            Span::styled("Esc", Style::default().fg(theme.error).add_modifier(Modifier::BOLD)),
            Span::styled(" cancel", Style::default().fg(theme.grey1)),
        ]);
        frame.render_widget(Paragraph::new(hint).alignment(Alignment::Center), chunks[3]);
    }

    /// Render the key help overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let entries = [
            ("←/→", "step one card"),
            (keys.step_left.as_str(), "step left"),
            (keys.step_right.as_str(), "step right"),
            (keys.select.as_str(), "open portal / choose class"),
            (keys.next_button.as_str(), "next login button"),
            (keys.login_google.as_str(), "sign in with Google"),
            (keys.login_email.as_str(), "sign in with email"),
            (keys.logout.as_str(), "sign out"),
            ("wheel", "coast the rail"),
            ("drag", "fling the rail"),
            (keys.quit.as_str(), "quit"),
        ];

        let lines: Vec<Line> = entries
            .iter()
            .map(|(key, what)| {
                Line::from(vec![
                    Span::styled(
                        format!("{:>8}  ", key),
                        Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*what, Style::default().fg(theme.fg1)),
                ])
            })
            .collect();

        let area = frame.area();
        let popup_area = centered_rect(46, lines.len() as u16 + 2, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.violet))
            .style(Style::default().bg(theme.bg1));
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}
