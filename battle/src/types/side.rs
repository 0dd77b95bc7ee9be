//! Side (participant) state

use pokecard_cards::Card;
use serde::{Deserialize, Serialize};

use super::pokemon::BattlePokemon;

/// The two battle participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }

    /// Subject used in log lines ("You" / "Opponent")
    pub fn subject(&self) -> &'static str {
        match self {
            Side::Player => "You",
            Side::Opponent => "Opponent",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One participant's side of the battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleSide {
    /// Trainer name
    pub name: String,

    /// Combatant in the active slot
    pub active: BattlePokemon,

    /// Reserve combatants, in order
    pub bench: Vec<BattlePokemon>,

    /// Item and skill cards
    pub hand: Vec<Card>,

    /// Shared pool that pays for actions
    pub energy: u32,
}

impl BattleSide {
    /// Create a side from an active combatant
    pub fn new(name: impl Into<String>, active: BattlePokemon, energy: u32) -> Self {
        Self {
            name: name.into(),
            active,
            bench: Vec::new(),
            hand: Vec::new(),
            energy,
        }
    }

    /// Build a side from a deck.
    ///
    /// The first creature card becomes active, the rest go to the bench, and
    /// every other card forms the hand. Returns `None` when the deck has no
    /// creature cards.
    pub fn from_deck(name: impl Into<String>, deck: &[Card], energy: u32) -> Option<Self> {
        let mut creatures = deck.iter().filter_map(BattlePokemon::from_card);
        let active = creatures.next()?;
        let bench = creatures.collect();
        let hand = deck.iter().filter(|c| !c.is_creature()).cloned().collect();

        Some(Self {
            name: name.into(),
            active,
            bench,
            hand,
            energy,
        })
    }

    pub fn with_bench(mut self, bench: Vec<BattlePokemon>) -> Self {
        self.bench = bench;
        self
    }

    pub fn with_hand(mut self, hand: Vec<Card>) -> Self {
        self.hand = hand;
        self
    }

    /// Check if the bench has anyone left
    pub fn has_bench(&self) -> bool {
        !self.bench.is_empty()
    }

    /// Count non-fainted combatants (active plus bench)
    pub fn alive_count(&self) -> usize {
        usize::from(self.active.is_alive()) + self.bench.iter().filter(|p| p.is_alive()).count()
    }

    /// Find a bench combatant by uid, id, or name
    pub fn find_bench(&self, key: &str) -> Option<usize> {
        self.bench
            .iter()
            .position(|p| p.uid == key || p.id == key || p.name == key)
    }

    /// Find a hand card by uid, falling back to catalog id
    pub fn find_card(&self, key: &str) -> Option<usize> {
        self.hand
            .iter()
            .position(|c| c.uid == key)
            .or_else(|| self.hand.iter().position(|c| c.id == key))
    }

    /// Remove a card from the hand
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Swap a bench member into the active slot.
    ///
    /// A live outgoing combatant takes the bench slot of the incoming one;
    /// a fainted one is dropped.
    pub fn switch_in(&mut self, index: usize) -> Option<&BattlePokemon> {
        if index >= self.bench.len() {
            return None;
        }
        if self.active.is_alive() {
            std::mem::swap(&mut self.active, &mut self.bench[index]);
        } else {
            self.active = self.bench.remove(index);
        }
        Some(&self.active)
    }

    /// Promote the first bench member, dropping the fainted active
    pub fn promote_next(&mut self) -> Option<&BattlePokemon> {
        self.switch_in(0)
    }

    /// Names of every combatant on this side, active first
    pub fn team_names(&self) -> Vec<String> {
        std::iter::once(&self.active)
            .chain(self.bench.iter())
            .map(|p| p.name.clone())
            .collect()
    }

    /// Add energy, capped
    pub fn regenerate(&mut self, amount: u32, cap: u32) {
        self.energy = (self.energy + amount).min(cap.max(self.energy));
    }
}
