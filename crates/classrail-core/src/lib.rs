pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

pub use catalog::{ClassCard, CLASS_CARDS};
pub use config::{AppConfig, AutoScrollConfig, EasingType, PortalConfig, RailConfig};
pub use error::{Error, Result};
pub use session::{Provider, Session, SessionStore};
