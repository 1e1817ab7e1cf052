use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    // Palette colors
    pub gold: Color,
    pub violet: Color,
    pub teal: Color,
    pub crimson: Color,

    // Semantic colors
    pub accent: Color,
    pub selection: Color,
    pub portal: Color,
    pub error: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::arcane()
    }
}

impl Theme {
    /// Deep violet night sky with gold trim
    pub fn arcane() -> Self {
        Self {
            bg0: Color::Rgb(0x14, 0x10, 0x1f),
            bg1: Color::Rgb(0x1f, 0x19, 0x30),
            bg2: Color::Rgb(0x2c, 0x24, 0x45),
            fg0: Color::Rgb(0xe8, 0xe0, 0xf5),
            fg1: Color::Rgb(0xc4, 0xb8, 0xdc),
            grey0: Color::Rgb(0x5e, 0x55, 0x75),
            grey1: Color::Rgb(0x8a, 0x80, 0xa3),
            gold: Color::Rgb(0xe6, 0xb4, 0x50),
            violet: Color::Rgb(0xa8, 0x7c, 0xf0),
            teal: Color::Rgb(0x5f, 0xc9, 0xc0),
            crimson: Color::Rgb(0xe0, 0x5a, 0x6a),
            accent: Color::Rgb(0xe6, 0xb4, 0x50),
            selection: Color::Rgb(0x3d, 0x33, 0x5e),
            portal: Color::Rgb(0xa8, 0x7c, 0xf0),
            error: Color::Rgb(0xe0, 0x5a, 0x6a),
            success: Color::Rgb(0x7f, 0xc9, 0x7a),
        }
    }

    /// Warm parchment for light terminals
    pub fn parchment() -> Self {
        Self {
            bg0: Color::Rgb(0xf4, 0xec, 0xd8),
            bg1: Color::Rgb(0xea, 0xdf, 0xc4),
            bg2: Color::Rgb(0xdc, 0xcd, 0xab),
            fg0: Color::Rgb(0x3b, 0x2f, 0x22),
            fg1: Color::Rgb(0x55, 0x46, 0x36),
            grey0: Color::Rgb(0xa8, 0x98, 0x7c),
            grey1: Color::Rgb(0x80, 0x70, 0x58),
            gold: Color::Rgb(0xa8, 0x74, 0x10),
            violet: Color::Rgb(0x6a, 0x3d, 0x9a),
            teal: Color::Rgb(0x2a, 0x7a, 0x72),
            crimson: Color::Rgb(0xa8, 0x2a, 0x36),
            accent: Color::Rgb(0x8b, 0x3a, 0x1a),
            selection: Color::Rgb(0xd2, 0xbf, 0x94),
            portal: Color::Rgb(0x6a, 0x3d, 0x9a),
            error: Color::Rgb(0xa8, 0x2a, 0x36),
            success: Color::Rgb(0x3f, 0x7a, 0x2a),
        }
    }
}

/// Resolve a theme by its configured name, falling back to the default
pub fn load_theme(name: &str) -> Theme {
    match name.trim().to_lowercase().as_str() {
        "arcane" | "" => Theme::arcane(),
        "parchment" => Theme::parchment(),
        other => {
            warn!("Unknown theme '{}', using arcane", other);
            Theme::arcane()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_by_name() {
        assert_eq!(load_theme("Parchment").bg0, Theme::parchment().bg0);
        assert_eq!(load_theme("no-such-theme").bg0, Theme::arcane().bg0);
    }
}
