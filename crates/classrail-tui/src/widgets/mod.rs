mod gallery;
mod hero;
mod login;
mod popup;
mod rail;
mod status_bar;

pub use gallery::GalleryWidget;
pub use hero::{HeroWidget, PortalWidget};
pub use login::LoginWidget;
pub use popup::PopupWidget;
pub use rail::CardRailWidget;
pub use status_bar::StatusBarWidget;

use ratatui::layout::Rect;

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
