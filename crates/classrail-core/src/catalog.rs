use serde::Serialize;

/// One selectable class shown on the rail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassCard {
    /// Artwork file name
    pub image: &'static str,
    /// Alternative text for the artwork
    pub alt: &'static str,
    /// Display name
    pub name: &'static str,
    /// One-line flavour description
    pub description: &'static str,
}

pub const CLASS_CARDS: &[ClassCard] = &[
    ClassCard {
        image: "Warrior.jpg",
        alt: "Warrior",
        name: "Warrior",
        description: "Disciplined frontline fighter. Balances offense and defense with shield, spear, or sword.",
    },
    ClassCard {
        image: "Mage.jpg",
        alt: "Wizard",
        name: "Wizard",
        description: "Scholar of the arcane. Prepares potent spells and bends the battlefield to their will.",
    },
    ClassCard {
        image: "Assassin.jpg",
        alt: "Rogue",
        name: "Rogue",
        description: "Master of stealth and precision. Disarms traps, picks locks, and strikes where it hurts.",
    },
    ClassCard {
        image: "Bard.jpg",
        alt: "Bard",
        name: "Bard",
        description: "Charismatic virtuoso. Bolsters allies, bewilders foes, and casts versatile support magic.",
    },
    ClassCard {
        image: "Necromancer.png",
        alt: "Necromancer",
        name: "Necromancer",
        description: "Wields forbidden rites. Raises undead servants and siphons life from the living.",
    },
    ClassCard {
        image: "Spellsword.png",
        alt: "Spellsword",
        name: "Spellsword",
        description: "Blade and spell as one. Enchants weapons and weaves magic between rapid strikes.",
    },
    ClassCard {
        image: "Ranger.png",
        alt: "Ranger",
        name: "Ranger",
        description: "Tracker and archer. Thrives in the wilds with traps, terrain tactics, and keen senses.",
    },
    ClassCard {
        image: "Barbarian.png",
        alt: "Barbarian",
        name: "Barbarian",
        description: "Rage-fueled berserker. Soaks up punishment and hits back with brutal force.",
    },
    ClassCard {
        image: "Beast-master.png",
        alt: "Beast Master",
        name: "Beast Master",
        description: "Ranger bonded to a loyal companion. Coordinates pack tactics and harrying attacks.",
    },
    ClassCard {
        image: "Artifiser.png",
        alt: "Artificer",
        name: "Artificer",
        description: "Inventive mage-engineer. Infuses gear and gadgets with magic, crafting clever solutions.",
    },
];

/// Look up a card by its display name (case-insensitive)
pub fn find_card(name: &str) -> Option<&'static ClassCard> {
    CLASS_CARDS
        .iter()
        .find(|card| card.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_ten_unique_classes() {
        assert_eq!(CLASS_CARDS.len(), 10);
        let mut names: Vec<_> = CLASS_CARDS.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn test_find_card_ignores_case() {
        assert_eq!(find_card("beast master").map(|c| c.image), Some("Beast-master.png"));
        assert!(find_card("Paladin").is_none());
    }
}
