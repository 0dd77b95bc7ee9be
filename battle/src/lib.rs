//! Turn-based battle engine for the Pokemon card battler.
//!
//! This crate turns decks of cards into a running battle: damage rolls,
//! timed status effects, the player/opponent turn loop, and reward
//! settlement once a side runs out of creatures.
//!
//! # Overview
//!
//! `pokecard-battle` sits between the card vocabulary and whatever drives
//! the game:
//!
//! ```text
//! pokecard-cards (card vocabulary)
//!        │
//!        ▼
//! pokecard-battle (turn engine) ← THIS CRATE
//!        │
//!        ├─> PlayerDataStore (decks in, results out)
//!        ├─> PresentationSink (attack/hit/heal/faint events)
//!        └─> PersistOutbox ──> run_persistence (async backend)
//! ```
//!
//! # Main Types
//!
//! ## Battle State
//! - [`BattlePokemon`] - A combatant with HP, stat modifiers, and timed effects
//! - [`BattleSide`] - Active combatant, bench, hand, and energy pool
//! - [`Battle`] - The aggregate: both sides, the log, and deferred work
//!
//! ## Rules
//! - [`compute_damage`] - Damage pipeline with shields, variance, and the 40% cap
//! - [`effects`] - Ailments, buffs, debuffs, shields, and the per-turn tick
//! - [`effectiveness`] - Elemental type chart
//!
//! ## Driving a Battle
//! - [`BattleEngine`] - Starts battles, runs player actions, settles rewards
//!
//! # Example Usage
//!
//! ```ignore
//! use pokecard_battle::{Action, BattleConfig, BattleEngine, BattleMode, MemoryStore};
//! use pokecard_cards::Catalog;
//! use rand::SeedableRng;
//!
//! let catalog = Catalog::generate(&mut rand::rngs::StdRng::seed_from_u64(1));
//! let mut engine = BattleEngine::new(MemoryStore::new(catalog), BattleConfig::seeded(1));
//!
//! engine.start_battle(BattleMode::Story, None)?;
//! let turn = engine.execute_player_action(&Action::attack("tackle"))?;
//! for entry in &turn.entries {
//!     println!("{}", entry.message);
//! }
//!
//! // Let deferred promotions and animation clears run
//! engine.advance(700);
//! ```

pub mod config;
pub mod damage;
pub mod effects;
pub mod engine;
pub mod error;
pub mod persist;
pub mod presentation;
pub mod store;
pub mod types;

// Re-export main types at crate root for convenience
pub use config::BattleConfig;
pub use damage::{DamageRoll, compute_damage};
pub use effects::{CanAttack, TickEvent, apply_effect, can_attack, process_status_effects};
pub use engine::{
    Action, Battle, BattleEngine, BattleMode, BattleResult, BattleSummary, PlayerProfile,
    RewardDelta, TurnSummary,
};
pub use error::{ActionError, StartError, StoreError};
pub use persist::{AsyncPersistence, PersistOutbox, PersistRequest, PersistStats, run_persistence};
pub use presentation::{NullSink, PresentationEvent, PresentationKind, PresentationSink, RecordingSink};
pub use store::{MemoryStore, PlayerDataStore};
pub use types::{
    BattleLog, BattlePokemon, BattleSide, LogEntry, LogKind, Side, StatModifiers, TYPE_CHART,
    effectiveness,
};
