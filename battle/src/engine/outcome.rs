//! Battle results, summaries, and reward settlement

use serde::{Deserialize, Serialize};

use crate::config::BattleConfig;

use super::battle::BattleMode;

/// How a battle ended, from the player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleResult {
    Victory,
    Defeat,
}

impl BattleResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleResult::Victory => "victory",
            BattleResult::Defeat => "defeat",
        }
    }
}

impl std::fmt::Display for BattleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What gets reported once a battle is over
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSummary {
    pub mode: BattleMode,
    pub result: BattleResult,
    pub player_team: Vec<String>,
    pub opponent_team: Vec<String>,
    pub turn_count: u32,
    /// Battle clock time from start to end
    pub duration_ms: u64,
}

/// The player's persistent progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub wins: u32,
    pub losses: u32,
    pub energy: u32,
    pub exp: u32,
    pub level: u32,
    pub gems: u32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            wins: 0,
            losses: 0,
            energy: 0,
            exp: 0,
            level: 1,
            gems: 0,
        }
    }
}

/// Changes to apply to a [`PlayerProfile`] after a battle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDelta {
    pub wins: u32,
    pub losses: u32,
    pub energy: u32,
    pub exp: u32,
    pub gems: u32,
    /// Set when the player reached a new level
    pub new_level: Option<u32>,
}

impl RewardDelta {
    pub fn apply_to(&self, profile: &mut PlayerProfile) {
        profile.wins += self.wins;
        profile.losses += self.losses;
        profile.energy += self.energy;
        profile.exp += self.exp;
        profile.gems += self.gems;
        if let Some(level) = self.new_level {
            profile.level = level;
        }
    }
}

/// Work out what a result is worth to the player
pub fn settle(profile: &PlayerProfile, result: BattleResult, config: &BattleConfig) -> RewardDelta {
    match result {
        BattleResult::Victory => {
            let mut delta = RewardDelta {
                wins: 1,
                energy: config.victory_energy,
                exp: config.victory_exp,
                ..RewardDelta::default()
            };
            let exp = profile.exp + config.victory_exp;
            if exp >= profile.level * config.level_exp_multiplier {
                delta.new_level = Some(profile.level + 1);
                delta.gems = config.level_up_gems;
            }
            delta
        }
        BattleResult::Defeat => RewardDelta {
            losses: 1,
            ..RewardDelta::default()
        },
    }
}
