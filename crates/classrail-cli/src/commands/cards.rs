use anyhow::{anyhow, Result};

use classrail_core::{catalog::find_card, ClassCard, CLASS_CARDS};

pub fn run(name: Option<&str>, json: bool) -> Result<()> {
    let cards: Vec<&ClassCard> = match name {
        Some(name) => vec![find_card(name).ok_or_else(|| anyhow!("No class named '{}'", name))?],
        None => CLASS_CARDS.iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    if name.is_none() {
        println!("Classes ({}):\n", cards.len());
    }

    for card in cards {
        println!("  {} - {}", card.name, card.description);
        println!("    Image: {} ({})", card.image, card.alt);
        println!();
    }

    Ok(())
}
