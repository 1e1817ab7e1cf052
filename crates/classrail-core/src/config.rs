use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub rail: RailConfig,
    #[serde(default)]
    pub auto_scroll: AutoScrollConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (session flag and log file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Frames per second of the render/animation loop
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Treat the terminal as preferring reduced motion (disables auto-scroll)
    #[serde(default)]
    pub reduce_motion: bool,
    /// Theme name ("arcane" or "parchment")
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Rail units per terminal column
    #[serde(default = "default_units_per_column")]
    pub units_per_column: f64,
    /// Card width in terminal columns
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Gap between cards in terminal columns
    #[serde(default = "default_card_gap")]
    pub card_gap: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            reduce_motion: false,
            theme: default_theme_name(),
            units_per_column: default_units_per_column(),
            card_width: default_card_width(),
            card_gap: default_card_gap(),
        }
    }
}

/// Easing curve for programmatic rail animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    /// 1 - (1-t)^3
    Cubic,
    /// 1 - (1-t)^5
    Quintic,
    /// Cubic ease-in-out, close to a browser's smooth scroll
    EaseInOut,
}

/// Physics tuning for the momentum rail
///
/// Distances are in rail units, velocities in units per animation tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RailConfig {
    /// Per-tick velocity decay factor
    #[serde(default = "default_friction")]
    pub friction: f64,
    /// Multiplier applied to vertical wheel deltas
    #[serde(default = "default_wheel_gain")]
    pub wheel_gain: f64,
    /// Damping applied after the wheel gain
    #[serde(default = "default_wheel_damping")]
    pub wheel_damping: f64,
    /// Multiplier applied to pointer drag distance
    #[serde(default = "default_drag_gain")]
    pub drag_gain: f64,
    /// Speed below which the rail may settle
    #[serde(default = "default_min_speed_for_settle")]
    pub min_speed_for_settle: f64,
    /// Quiet time after the last input before settling is allowed
    #[serde(default = "default_idle_after_ms")]
    pub idle_after_ms: u64,
    /// Duration of the snap-to-item ease
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Scale from pointer speed (units/ms) to release velocity
    #[serde(default = "default_release_velocity_scale")]
    pub release_velocity_scale: f64,
    /// Item width used before any card has been laid out
    #[serde(default = "default_fallback_item_width")]
    pub fallback_item_width: f64,
    /// Duration of an arrow-key step
    #[serde(default = "default_key_step_ms")]
    pub key_step_ms: u64,
    /// Easing of an arrow-key step
    #[serde(default = "default_key_step_easing")]
    pub key_step_easing: EasingType,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            friction: default_friction(),
            wheel_gain: default_wheel_gain(),
            wheel_damping: default_wheel_damping(),
            drag_gain: default_drag_gain(),
            min_speed_for_settle: default_min_speed_for_settle(),
            idle_after_ms: default_idle_after_ms(),
            settle_ms: default_settle_ms(),
            release_velocity_scale: default_release_velocity_scale(),
            fallback_item_width: default_fallback_item_width(),
            key_step_ms: default_key_step_ms(),
            key_step_easing: default_key_step_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoScrollConfig {
    /// Allow the idle auto-scroll at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Drift speed in units per second
    #[serde(default = "default_auto_scroll_speed")]
    pub speed: f64,
    /// How long any interaction pauses the drift
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            speed: default_auto_scroll_speed(),
            pause_ms: default_pause_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Length of the portal-open animation
    #[serde(default = "default_portal_open_ms")]
    pub open_ms: u64,
    /// Delay between revealing the gallery and starting auto-scroll
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            open_ms: default_portal_open_ms(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "l", "<C-c>", "<S-Tab>", "<CR>", "<Esc>", "<Space>"
///
/// Arrow keys always step the rail regardless of these bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Step the rail one card left
    #[serde(default = "default_key_step_left")]
    pub step_left: String,
    /// Step the rail one card right
    #[serde(default = "default_key_step_right")]
    pub step_right: String,
    /// Activate the focused button or card
    #[serde(default = "default_key_select")]
    pub select: String,
    /// Move focus between login buttons
    #[serde(default = "default_key_next_button")]
    pub next_button: String,
    #[serde(default = "default_key_login_google")]
    pub login_google: String,
    #[serde(default = "default_key_login_email")]
    pub login_email: String,
    /// Forget the local session and return to the login screen
    #[serde(default = "default_key_logout")]
    pub logout: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            step_left: default_key_step_left(),
            step_right: default_key_step_right(),
            select: default_key_select(),
            next_button: default_key_next_button(),
            login_google: default_key_login_google(),
            login_email: default_key_login_email(),
            logout: default_key_logout(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_step_left() -> String { "h".to_string() }
fn default_key_step_right() -> String { "l".to_string() }
fn default_key_select() -> String { "<CR>".to_string() }
fn default_key_next_button() -> String { "<Tab>".to_string() }
fn default_key_login_google() -> String { "g".to_string() }
fn default_key_login_email() -> String { "e".to_string() }
fn default_key_logout() -> String { "L".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("classrail")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_frame_rate() -> u32 {
    60
}

fn default_theme_name() -> String {
    "arcane".to_string()
}

fn default_units_per_column() -> f64 {
    8.0
}

fn default_card_width() -> u16 {
    30
}

fn default_card_gap() -> u16 {
    2 // 16 units at 8 units per column
}

fn default_friction() -> f64 {
    0.9
}

fn default_wheel_gain() -> f64 {
    1.15
}

fn default_wheel_damping() -> f64 {
    0.12
}

fn default_drag_gain() -> f64 {
    1.0
}

fn default_min_speed_for_settle() -> f64 {
    8.0
}

fn default_idle_after_ms() -> u64 {
    140
}

fn default_settle_ms() -> u64 {
    360
}

fn default_release_velocity_scale() -> f64 {
    12.0
}

fn default_fallback_item_width() -> f64 {
    300.0
}

fn default_key_step_ms() -> u64 {
    300
}

fn default_key_step_easing() -> EasingType {
    EasingType::EaseInOut
}

fn default_auto_scroll_speed() -> f64 {
    20.0
}

fn default_pause_ms() -> u64 {
    4000
}

fn default_portal_open_ms() -> u64 {
    900
}

fn default_reveal_delay_ms() -> u64 {
    50
}

/// Upper bound for `ui.frame_rate`; the frame interval is whole milliseconds
pub const MAX_FRAME_RATE: u32 = 1000;

/// Upper bound for `ui.card_width` in columns
pub const MAX_CARD_WIDTH: u16 = 200;

/// Upper bound for `ui.card_gap` in columns
pub const MAX_CARD_GAP: u16 = 50;

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it is missing
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the terminal layout cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        let ui = &self.ui;
        if !(1..=MAX_FRAME_RATE).contains(&ui.frame_rate) {
            return Err(crate::Error::Config(format!(
                "ui.frame_rate must be between 1 and {}, got {}",
                MAX_FRAME_RATE, ui.frame_rate
            )));
        }
        if !(ui.units_per_column.is_finite() && ui.units_per_column > 0.0) {
            return Err(crate::Error::Config(format!(
                "ui.units_per_column must be a positive number, got {}",
                ui.units_per_column
            )));
        }
        if !(1..=MAX_CARD_WIDTH).contains(&ui.card_width) || ui.card_gap > MAX_CARD_GAP {
            return Err(crate::Error::Config(format!(
                "ui.card_width must be between 1 and {} and ui.card_gap at most {}",
                MAX_CARD_WIDTH, MAX_CARD_GAP
            )));
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Render configuration as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/classrail/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("classrail")
            .join("config.toml")
    }

    /// Get the local session flag path
    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join("session.json")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("classrail.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rail_tuning() {
        let rail = RailConfig::default();
        assert!((rail.friction - 0.9).abs() < f64::EPSILON);
        assert!((rail.wheel_gain - 1.15).abs() < f64::EPSILON);
        assert!((rail.wheel_damping - 0.12).abs() < f64::EPSILON);
        assert_eq!(rail.idle_after_ms, 140);
        assert_eq!(rail.settle_ms, 360);
        assert_eq!(rail.key_step_easing, EasingType::EaseInOut);

        let auto = AutoScrollConfig::default();
        assert!(auto.enabled);
        assert_eq!(auto.pause_ms, 4000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [rail]
            friction = 0.85

            [ui]
            reduce_motion = true
            "#,
        )
        .unwrap();

        assert!((config.rail.friction - 0.85).abs() < f64::EPSILON);
        assert!((config.rail.min_speed_for_settle - 8.0).abs() < f64::EPSILON);
        assert!(config.ui.reduce_motion);
        assert_eq!(config.ui.card_width, 30);
        assert_eq!(config.keymap.step_right, "l");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[rail]\nfriction = \"fast\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_preserves_easing() {
        let mut config = AppConfig::default();
        config.rail.key_step_easing = EasingType::Quintic;
        let text = config.to_toml().unwrap();
        assert!(text.contains("key_step_easing = \"quintic\""));
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.rail.key_step_easing, EasingType::Quintic);
    }

    #[test]
    fn test_validate_rejects_unusable_ui_values() {
        assert!(AppConfig::default().validate().is_ok());

        for text in [
            "[ui]\nunits_per_column = 0.0",
            "[ui]\nunits_per_column = -8.0",
            "[ui]\nframe_rate = 0",
            "[ui]\nframe_rate = 5000",
            "[ui]\ncard_width = 8000",
            "[ui]\ncard_width = 0",
            "[ui]\ncard_gap = 500",
        ] {
            let err = AppConfig::from_toml(text).unwrap_err();
            assert!(matches!(err, crate::Error::Config(_)), "accepted {:?}", text);
        }

        let config = AppConfig::from_toml("[ui]\nframe_rate = 1000\ncard_width = 200").unwrap();
        assert_eq!(config.ui.frame_rate, 1000);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("classrail-missing-config").join("none.toml");
        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.ui.frame_rate, 60);
    }
}
