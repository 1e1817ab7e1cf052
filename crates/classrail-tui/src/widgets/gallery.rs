use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::CardRailWidget;
use crate::app::App;

/// Header, rail section and scroll indicator
pub struct GalleryWidget;

impl GalleryWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let layout = app.layout;

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "CHOOSE YOUR CLASS",
                Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "wheel, drag or ←/→ to browse · Enter to choose",
                Style::default().fg(theme.grey1),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.grey0)),
        );
        frame.render_widget(header, layout.header);

        frame.render_widget(Block::default().style(Style::default().bg(theme.bg0)), layout.section);
        CardRailWidget::render(frame, layout.rail, app);

        let below = layout.rail.y + layout.rail.height;
        if below < layout.section.y + layout.section.height {
            let track = Rect::new(layout.rail.x, below, layout.rail.width, 1);
            Self::render_indicator(frame, track, app);
        }
    }

    /// Thumb showing where the viewport sits along the rail
    fn render_indicator(frame: &mut Frame, track: Rect, app: &App) {
        let Some(rail) = app.rail.as_ref() else {
            return;
        };
        let metrics = rail.metrics();
        if !metrics.is_scrollable() || track.width == 0 {
            return;
        }

        let width = track.width as f64;
        let thumb = (width * metrics.viewport_extent / metrics.content_extent)
            .clamp(1.0, width)
            .round() as u16;
        let room = track.width.saturating_sub(thumb) as f64;
        let start = (room * rail.position() / rail.max_scroll()).round() as u16;

        let groove = Style::default().fg(app.theme.grey0);
        let line = Line::from(vec![
            Span::styled("─".repeat(start as usize), groove),
            Span::styled("━".repeat(thumb as usize), Style::default().fg(app.theme.violet)),
            Span::styled("─".repeat(track.width.saturating_sub(start + thumb) as usize), groove),
        ]);
        frame.render_widget(Paragraph::new(line), track);
    }
}

