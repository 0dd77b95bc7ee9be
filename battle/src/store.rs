//! Player data collaborator
//!
//! The engine reads starting decks and the player's profile through this
//! boundary and reports outcomes back through it. It never reaches for
//! ambient state.

use pokecard_cards::{Card, Catalog};

use crate::engine::{BattleResult, BattleSummary, PlayerProfile, RewardDelta};
use crate::error::StoreError;

/// Source of battle participants and sink for outcomes
pub trait PlayerDataStore {
    /// Cards in the player's active deck (may be empty)
    fn active_deck_cards(&self) -> Vec<Card>;

    /// Every card the player owns
    fn collection(&self) -> Vec<Card>;

    /// Card pool opponents draw their decks from
    fn catalog(&self) -> Catalog;

    fn profile(&self) -> PlayerProfile;

    /// Record a finished battle
    fn report_battle_result(
        &mut self,
        result: BattleResult,
        summary: &BattleSummary,
    ) -> Result<(), StoreError>;

    /// Apply settled rewards to the player's profile
    fn apply_rewards(&mut self, delta: &RewardDelta) -> Result<(), StoreError>;
}

/// In-memory store for tests and offline play
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub deck: Vec<Card>,
    pub collection: Vec<Card>,
    pub catalog: Catalog,
    pub profile: PlayerProfile,
    /// Every reported battle, in order
    pub results: Vec<(BattleResult, BattleSummary)>,
    /// Make every write fail, to exercise error paths
    pub fail_writes: bool,
}

impl MemoryStore {
    /// A new player: starter pack in the collection and the starter deck active
    pub fn new(catalog: Catalog) -> Self {
        Self {
            deck: catalog.starter_deck(),
            collection: catalog.starter_pack(),
            catalog,
            ..Self::default()
        }
    }

    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = deck;
        self
    }

    pub fn with_collection(mut self, collection: Vec<Card>) -> Self {
        self.collection = collection;
        self
    }

    pub fn with_profile(mut self, profile: PlayerProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl PlayerDataStore for MemoryStore {
    fn active_deck_cards(&self) -> Vec<Card> {
        self.deck.clone()
    }

    fn collection(&self) -> Vec<Card> {
        self.collection.clone()
    }

    fn catalog(&self) -> Catalog {
        self.catalog.clone()
    }

    fn profile(&self) -> PlayerProfile {
        self.profile.clone()
    }

    fn report_battle_result(
        &mut self,
        result: BattleResult,
        summary: &BattleSummary,
    ) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Rejected("memory store is read-only".into()));
        }
        self.results.push((result, summary.clone()));
        Ok(())
    }

    fn apply_rewards(&mut self, delta: &RewardDelta) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Rejected("memory store is read-only".into()));
        }
        delta.apply_to(&mut self.profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BattleMode;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn summary() -> BattleSummary {
        BattleSummary {
            mode: BattleMode::Story,
            result: BattleResult::Victory,
            player_team: vec!["pikachu".into()],
            opponent_team: vec!["rattata".into()],
            turn_count: 4,
            duration_ms: 1200,
        }
    }

    #[test]
    fn test_new_player_store() {
        let store = MemoryStore::new(Catalog::generate(&mut StdRng::seed_from_u64(1)));
        assert_eq!(store.active_deck_cards().len(), 12);
        assert_eq!(store.collection().len(), 12);
        assert_eq!(store.profile().level, 1);
    }

    #[test]
    fn test_writes_recorded() {
        let mut store = MemoryStore::default();
        store
            .report_battle_result(BattleResult::Victory, &summary())
            .unwrap();
        store
            .apply_rewards(&RewardDelta {
                wins: 1,
                ..RewardDelta::default()
            })
            .unwrap();
        assert_eq!(store.results.len(), 1);
        assert_eq!(store.profile.wins, 1);
    }

    #[test]
    fn test_failing_store() {
        let mut store = MemoryStore::default().failing();
        let err = store
            .report_battle_result(BattleResult::Defeat, &summary())
            .unwrap_err();
        assert_eq!(err, StoreError::Rejected("memory store is read-only".into()));
        assert!(store.results.is_empty());

        let err = store.apply_rewards(&RewardDelta::default()).unwrap_err();
        assert_eq!(err.to_string(), "Write rejected: memory store is read-only");
        assert_eq!(store.profile.wins, 0);
    }
}
