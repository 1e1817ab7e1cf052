use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use classrail_core::ClassCard;

use crate::app::App;
use crate::theme::Theme;

/// The horizontally scrolling strip of class cards
///
/// All cards are laid out once into an off-screen buffer as wide as the
/// content; each frame copies the window starting at the rail offset.
pub struct CardRailWidget;

impl CardRailWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let card_width = app.config.ui.card_width;
        let gap = app.config.ui.card_gap;
        let cards = app.cards();
        let content_width = strip_width(cards.len(), card_width, gap);
        let mut strip = Buffer::empty(Rect::new(0, 0, content_width.max(area.width), area.height));

        let focused = app.focused_card();
        for (index, card) in cards.iter().enumerate() {
            let Some(x) = card_start(index, card_width, gap) else {
                break;
            };
            let rect = Rect::new(x, 0, card_width, area.height).intersection(strip.area);
            if rect.is_empty() {
                break;
            }
            let state = CardState {
                focused: app.rail_focused && focused == Some(index),
                chosen: app.chosen == Some(index),
            };
            render_card(card, state, &app.theme, rect, &mut strip);
        }

        copy_window(&strip, app.rail_offset_columns(), area, frame.buffer_mut());
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct CardState {
    focused: bool,
    chosen: bool,
}

/// Total columns taken by `count` cards with gaps between them
fn strip_width(count: usize, card_width: u16, gap: u16) -> u16 {
    if count == 0 {
        return 0;
    }
    let total = count as u32 * (card_width as u32 + gap as u32) - gap as u32;
    total.min(u16::MAX as u32) as u16
}

/// Column where card `index` starts, if it fits in a buffer
fn card_start(index: usize, card_width: u16, gap: u16) -> Option<u16> {
    let start = (index as u64).checked_mul(card_width as u64 + gap as u64)?;
    u16::try_from(start).ok()
}

fn render_card(card: &ClassCard, state: CardState, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let border = if state.chosen {
        theme.success
    } else if state.focused {
        theme.gold
    } else {
        theme.grey0
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(if state.focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(theme.bg1));
    if state.chosen {
        block = block.title_bottom(Line::from(" chosen ").alignment(Alignment::Center));
    }
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Art
            Constraint::Length(2), // Name
            Constraint::Min(0),    // Description
        ])
        .split(inner);

    render_art(card, theme, chunks[0], buf);

    let name = Paragraph::new(Line::from(Span::styled(
        card.name.to_uppercase(),
        Style::default().fg(theme.gold).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    name.render(chunks[1], buf);

    Paragraph::new(card.description)
        .style(Style::default().fg(theme.fg1))
        .wrap(Wrap { trim: true })
        .render(chunks[2].inner(Margin::new(1, 0)), buf);
}

/// Placeholder for the card image: the alt text framed in a shaded panel
fn render_art(card: &ClassCard, theme: &Theme, area: Rect, buf: &mut Buffer) {
    if area.height == 0 {
        return;
    }
    let art = area.inner(Margin::new(1, 0));
    buf.set_style(art, Style::default().bg(theme.bg2));

    let label = truncate_to_width(card.alt, art.width as usize);
    let line = Line::from(Span::styled(
        label,
        Style::default().fg(theme.grey1).add_modifier(Modifier::ITALIC),
    ));
    let row = Rect::new(art.x, art.y + art.height / 2, art.width, 1);
    Paragraph::new(line).alignment(Alignment::Center).render(row, buf);
}

/// Copy `area.width` columns of the strip starting at `offset` into `dest`
fn copy_window(strip: &Buffer, offset: u16, area: Rect, dest: &mut Buffer) {
    for dy in 0..area.height {
        for dx in 0..area.width {
            let Some(src) = strip.cell((offset.saturating_add(dx), dy)) else {
                continue;
            };
            if let Some(cell) = dest.cell_mut((area.x + dx, area.y + dy)) {
                *cell = src.clone();
            }
        }
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    for c in s.chars() {
        if out.width() + 1 >= max_width {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}
