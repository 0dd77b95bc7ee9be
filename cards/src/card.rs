//! Collectible cards: creatures, skill cards, and items

use serde::{Deserialize, Serialize};

use crate::element::ElementalType;
use crate::skill::Skill;

/// Card rarity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rarity {
    #[serde(rename = "C")]
    Common,
    #[serde(rename = "R")]
    Rare,
    #[serde(rename = "E")]
    Epic,
    #[serde(rename = "L")]
    Legendary,
}

impl Rarity {
    /// Single-letter code used in card listings
    pub fn code(&self) -> char {
        match self {
            Rarity::Common => 'C',
            Rarity::Rare => 'R',
            Rarity::Epic => 'E',
            Rarity::Legendary => 'L',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A creature that can be placed in the active slot or on the bench
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureCard {
    /// Species number
    pub species: u32,
    pub primary_type: ElementalType,
    #[serde(default)]
    pub types: Vec<ElementalType>,
    pub hp: u32,
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
    /// Energy the creature itself carries into battle
    pub energy: u32,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl CreatureCard {
    /// Whether the creature has the given type
    pub fn has_type(&self, t: ElementalType) -> bool {
        self.primary_type == t || self.types.contains(&t)
    }
}

/// What a skill card does when played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardEffect {
    /// Restore HP to the active creature
    Heal { amount: u32 },
    /// Raise the active creature's attack for a number of turns
    AttackBoost { atk: i32, turns: u32 },
    /// Add to the active creature's shield
    Shield { amount: u32 },
    /// Clear every ailment on the active creature
    Cleanse,
}

/// A one-shot card that costs energy to play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCard {
    #[serde(default)]
    pub effect: Option<CardEffect>,
    pub energy: u32,
    /// Damage for cards that behave like an attack
    #[serde(default)]
    pub power: Option<u32>,
    #[serde(default)]
    pub element: Option<ElementalType>,
}

impl SkillCard {
    /// Build an attack skill for cards that carry power but no effect
    pub fn as_attack(&self, id: &str, name: &str) -> Option<Skill> {
        let power = self.power?;
        Some(Skill::strike(
            id,
            name,
            self.element.unwrap_or(ElementalType::Normal),
            power,
            self.energy,
        ))
    }
}

/// What an item card does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemEffect {
    /// Restore HP to the active creature, capped at max
    Heal { amount: u32 },
    /// Add energy to the side's pool, uncapped
    Energy { amount: u32 },
    /// Bring a fainted active creature back at a percentage of max HP
    Revive { percent: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCard {
    pub effect: ItemEffect,
}

/// The three card families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CardKind {
    #[serde(rename = "pokemon")]
    Creature(CreatureCard),
    Skill(SkillCard),
    Item(ItemCard),
}

/// A card in a collection or deck.
///
/// `id` names the catalog entry; `uid` is unique per owned copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub uid: String,
    pub name: String,
    pub rarity: Rarity,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(flatten)]
    pub kind: CardKind,
}

fn default_level() -> u32 {
    1
}

impl Card {
    /// Create a catalog entry whose uid equals its id
    pub fn new(id: impl Into<String>, name: impl Into<String>, rarity: Rarity, kind: CardKind) -> Self {
        let id = id.into();
        Self {
            uid: id.clone(),
            id,
            name: name.into(),
            rarity,
            level: 1,
            kind,
        }
    }

    /// Copy this card under a new uid
    pub fn instance(&self, uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..self.clone()
        }
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.kind, CardKind::Creature(_))
    }

    pub fn as_creature(&self) -> Option<&CreatureCard> {
        match &self.kind {
            CardKind::Creature(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_skill_card(&self) -> Option<&SkillCard> {
        match &self.kind {
            CardKind::Skill(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&ItemCard> {
        match &self.kind {
            CardKind::Item(i) => Some(i),
            _ => None,
        }
    }
}
