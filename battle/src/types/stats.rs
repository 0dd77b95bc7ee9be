//! Additive stat modifiers

use pokecard_cards::Stat;
use serde::{Deserialize, Serialize};

/// Additive deltas applied on top of a creature's base stats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifiers {
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
    pub accuracy: i32,
    pub evasion: i32,
}

impl StatModifiers {
    /// Create new modifiers (all at 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the modifier for a stat
    pub fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spd => self.spd,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set the modifier for a stat
    pub fn set(&mut self, stat: Stat, value: i32) {
        match stat {
            Stat::Atk => self.atk = value,
            Stat::Def => self.def = value,
            Stat::Spd => self.spd = value,
            Stat::Accuracy => self.accuracy = value,
            Stat::Evasion => self.evasion = value,
        }
    }

    /// Add a delta to a stat
    pub fn add(&mut self, stat: Stat, delta: i32) {
        self.set(stat, self.get(stat) + delta);
    }

    /// Reset all modifiers to 0
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check if every modifier is 0
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
