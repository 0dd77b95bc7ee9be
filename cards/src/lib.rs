//! Card vocabulary for the Pokemon card battler.
//!
//! This crate holds everything that describes a card before it enters a
//! battle: elemental types, skills and their effects, the three card
//! families, the built-in skill database, and catalog generation.
//!
//! ```text
//! pokecard-cards (card vocabulary) ← THIS CRATE
//!        │
//!        ▼
//! pokecard-battle (turn engine)
//! ```
//!
//! # Main Types
//!
//! - [`ElementalType`] - The 18 elemental types
//! - [`Skill`] / [`SkillEffect`] - Skill templates and their ordered effects
//! - [`Card`] / [`CardKind`] - Creature, skill, and item cards
//! - [`Catalog`] - Generated card pool with starter and AI decks
//!
//! # Example Usage
//!
//! ```ignore
//! use pokecard_cards::{Catalog, Difficulty};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let catalog = Catalog::generate(&mut rng);
//! let deck = catalog.ai_deck(Difficulty::Easy, &mut rng);
//! assert_eq!(deck.len(), 12);
//! ```

pub mod card;
pub mod catalog;
pub mod database;
pub mod element;
pub mod skill;

use thiserror::Error;

pub use card::{Card, CardEffect, CardKind, CreatureCard, ItemCard, ItemEffect, Rarity, SkillCard};
pub use catalog::{
    AI_OPPONENTS, AiOpponent, Catalog, Difficulty, STARTER_DECK, STARTER_PACK, ai_opponent,
};
pub use database::{skill_by_id, skill_database, skills_by_element};
pub use element::ElementalType;
pub use skill::{Ailment, Skill, SkillCategory, SkillEffect, SkillTarget, Stat};

/// Errors from decoding card data
#[derive(Debug, Error)]
pub enum CardError {
    #[error("unknown elemental type: {0}")]
    UnknownElement(String),

    #[error("unknown ailment: {0}")]
    UnknownAilment(String),

    #[error("invalid card data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a JSON array of cards
pub fn load_cards_json(json: &str) -> Result<Vec<Card>, CardError> {
    Ok(serde_json::from_str(json)?)
}
