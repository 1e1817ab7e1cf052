use anyhow::Result;

use classrail_core::{AppConfig, SessionStore};

pub fn run(config: &AppConfig) -> Result<()> {
    let store = SessionStore::new(config.session_path());
    if store.clear()? {
        println!("Signed out.");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}
