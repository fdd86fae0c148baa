//! Static content catalogs
//!
//! Resources, gems and special items that can be buried in a cell. The table
//! order is significant: weighted sampling walks entries in declaration order.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// Plain diggable materials
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Stone,
    Dirt,
    Ore,
}

/// Gem variants
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GemKind {
    Blue,
    Purple,
    Green,
    Red,
}

/// Rare special items
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SpecialKind {
    Magnet,
    Bomb,
    Compass,
    Pickaxe,
    Chest,
}

/// Resource table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceDef {
    pub kind: ResourceKind,
    pub glyph: &'static str,
    pub color: &'static str,
    pub value: u32,
    /// Carry weight (informational)
    pub weight: f64,
}

/// Gem table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GemDef {
    pub kind: GemKind,
    pub glyph: &'static str,
    pub color: &'static str,
    pub value: u32,
    /// Higher = rarer; sampling weight is `1 / rarity`
    pub rarity: f64,
}

/// Special item table entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialDef {
    pub kind: SpecialKind,
    pub name: &'static str,
    pub glyph: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    /// Higher = rarer; sampling weight is `1 / rarity`
    pub rarity: f64,
}

pub static RESOURCES: [ResourceDef; 3] = [
    ResourceDef {
        kind: ResourceKind::Stone,
        glyph: "🪨",
        color: "#8b7355",
        value: 1,
        weight: 1.0,
    },
    ResourceDef {
        kind: ResourceKind::Dirt,
        glyph: "🟤",
        color: "#6b4226",
        value: 1,
        weight: 1.5,
    },
    ResourceDef {
        kind: ResourceKind::Ore,
        glyph: "🧱",
        color: "#a17168",
        value: 3,
        weight: 1.2,
    },
];

pub static GEMS: [GemDef; 4] = [
    GemDef {
        kind: GemKind::Blue,
        glyph: "💎",
        color: "#3a86ff",
        value: 10,
        rarity: 0.5,
    },
    GemDef {
        kind: GemKind::Purple,
        glyph: "💜",
        color: "#8e44ad",
        value: 15,
        rarity: 0.7,
    },
    GemDef {
        kind: GemKind::Green,
        glyph: "💚",
        color: "#2ecc71",
        value: 12,
        rarity: 0.6,
    },
    GemDef {
        kind: GemKind::Red,
        glyph: "❤️",
        color: "#e74c3c",
        value: 20,
        rarity: 0.8,
    },
];

pub static SPECIALS: [SpecialDef; 5] = [
    SpecialDef {
        kind: SpecialKind::Magnet,
        name: "Magnet",
        glyph: "🧲",
        color: "#cc5500",
        description: "Attracts nearby gems when digging",
        rarity: 0.8,
    },
    SpecialDef {
        kind: SpecialKind::Bomb,
        name: "Mining Bomb",
        glyph: "💣",
        color: "#333333",
        description: "Breaks surrounding rocks when used",
        rarity: 0.85,
    },
    SpecialDef {
        kind: SpecialKind::Compass,
        name: "Gem Compass",
        glyph: "🧭",
        color: "#5f4b8b",
        description: "Points to nearby gems",
        rarity: 0.9,
    },
    SpecialDef {
        kind: SpecialKind::Pickaxe,
        name: "Lucky Pickaxe",
        glyph: "⛏️",
        color: "#ffd700",
        description: "Temporarily increases gem find chance",
        rarity: 0.95,
    },
    SpecialDef {
        kind: SpecialKind::Chest,
        name: "Treasure Chest",
        glyph: "🧰",
        color: "#8b4513",
        description: "Contains multiple resources",
        rarity: 0.75,
    },
];

impl ResourceKind {
    pub fn def(self) -> &'static ResourceDef {
        &RESOURCES[self as usize]
    }

    /// Display name ("Stone", "Dirt", "Ore")
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Stone => "Stone",
            ResourceKind::Dirt => "Dirt",
            ResourceKind::Ore => "Ore",
        }
    }
}

impl GemKind {
    pub fn def(self) -> &'static GemDef {
        &GEMS[self as usize]
    }

    pub const fn name(self) -> &'static str {
        match self {
            GemKind::Blue => "Blue Gem",
            GemKind::Purple => "Purple Gem",
            GemKind::Green => "Green Gem",
            GemKind::Red => "Red Gem",
        }
    }
}

impl SpecialKind {
    pub fn def(self) -> &'static SpecialDef {
        &SPECIALS[self as usize]
    }
}

/// What is buried in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "variant", rename_all = "lowercase")]
pub enum Content {
    Resource(ResourceKind),
    Gem(GemKind),
    Special(SpecialKind),
}

/// Content family, used for grouping and sorting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContentType {
    Gem,
    Resource,
    Special,
}

impl Content {
    pub const fn content_type(&self) -> ContentType {
        match self {
            Content::Resource(_) => ContentType::Resource,
            Content::Gem(_) => ContentType::Gem,
            Content::Special(_) => ContentType::Special,
        }
    }

    /// Variant identifier ("stone", "blue", "magnet", ...)
    pub fn variant(&self) -> String {
        match self {
            Content::Resource(k) => k.to_string(),
            Content::Gem(k) => k.to_string(),
            Content::Special(k) => k.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Content::Resource(k) => k.name(),
            Content::Gem(k) => k.name(),
            Content::Special(k) => k.def().name,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Content::Resource(k) => k.def().glyph,
            Content::Gem(k) => k.def().glyph,
            Content::Special(k) => k.def().glyph,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Content::Resource(k) => k.def().color,
            Content::Gem(k) => k.def().color,
            Content::Special(k) => k.def().color,
        }
    }

    /// Base value; special items carry none
    pub fn value(&self) -> u32 {
        match self {
            Content::Resource(k) => k.def().value,
            Content::Gem(k) => k.def().value,
            Content::Special(_) => 0,
        }
    }

    pub fn rarity(&self) -> Option<f64> {
        match self {
            Content::Resource(_) => None,
            Content::Gem(k) => Some(k.def().rarity),
            Content::Special(k) => Some(k.def().rarity),
        }
    }

    pub fn description(&self) -> String {
        match self {
            Content::Resource(k) => format!("A piece of {} collected from mining.", k),
            Content::Gem(k) => format!("A beautiful {} gem found while mining.", k),
            Content::Special(k) => k.def().description.to_string(),
        }
    }

    /// Resources and gems stack; special items never do
    pub const fn is_stackable(&self) -> bool {
        !matches!(self, Content::Special(_))
    }
}

/// Iterate over every catalog entry, resources first
pub fn all_contents() -> impl Iterator<Item = Content> {
    ResourceKind::iter()
        .map(Content::Resource)
        .chain(GemKind::iter().map(Content::Gem))
        .chain(SpecialKind::iter().map(Content::Special))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_match_enum_order() {
        for (i, kind) in ResourceKind::iter().enumerate() {
            assert_eq!(RESOURCES[i].kind, kind);
        }
        for (i, kind) in GemKind::iter().enumerate() {
            assert_eq!(GEMS[i].kind, kind);
        }
        for (i, kind) in SpecialKind::iter().enumerate() {
            assert_eq!(SPECIALS[i].kind, kind);
        }
    }

    #[test]
    fn test_rarities_in_unit_interval() {
        for gem in &GEMS {
            assert!(gem.rarity > 0.0 && gem.rarity <= 1.0);
        }
        for special in &SPECIALS {
            assert!(special.rarity > 0.0 && special.rarity <= 1.0);
        }
    }

    #[test]
    fn test_content_metadata() {
        let gem = Content::Gem(GemKind::Purple);
        assert_eq!(gem.name(), "Purple Gem");
        assert_eq!(gem.variant(), "purple");
        assert_eq!(gem.value(), 15);
        assert!(gem.is_stackable());

        let chest = Content::Special(SpecialKind::Chest);
        assert_eq!(chest.name(), "Treasure Chest");
        assert_eq!(chest.rarity(), Some(0.75));
        assert!(!chest.is_stackable());

        let ore = Content::Resource(ResourceKind::Ore);
        assert_eq!(ore.value(), 3);
        assert_eq!(ore.description(), "A piece of ore collected from mining.");
    }

    #[test]
    fn test_content_serde_shape() {
        let json = serde_json::to_string(&Content::Gem(GemKind::Red)).unwrap();
        assert_eq!(json, r#"{"type":"gem","variant":"red"}"#);
        let back: Content = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Content::Gem(GemKind::Red));
    }

    #[test]
    fn test_all_contents_count() {
        assert_eq!(all_contents().count(), 12);
    }
}
