//! Local "signed-in" flag
//!
//! There is no authentication behind this: picking a provider on the login
//! screen just records which one was chosen so the next launch can skip it.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Email,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Google => write!(f, "Google"),
            Provider::Email => write!(f, "email"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Session {
    pub fn google() -> Self {
        Self {
            provider: Provider::Google,
            email: None,
            timestamp: Utc::now(),
        }
    }

    /// Email sign-in; the address only needs to look like one
    pub fn email(address: &str) -> Result<Self> {
        let address = address.trim();
        let valid = address
            .split_once('@')
            .map(|(user, domain)| !user.is_empty() && domain.contains('.') && !domain.ends_with('.'))
            .unwrap_or(false);
        if !valid {
            return Err(Error::Session(format!("'{}' is not an email address", address)));
        }
        Ok(Self {
            provider: Provider::Email,
            email: Some(address.to_string()),
            timestamp: Utc::now(),
        })
    }
}

/// JSON file holding the current session, if any
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session
    ///
    /// A missing file means signed out. An unreadable or corrupt file is
    /// also treated as signed out so a bad flag never locks the user out.
    pub fn load(&self) -> Option<Session> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read session file {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Ignoring corrupt session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string(session)?)?;
        info!("Signed in with {}", session.provider);
        Ok(())
    }

    /// Remove the stored session; returns whether one existed
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Session cleared");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}
