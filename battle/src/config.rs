//! Battle tuning

use serde::{Deserialize, Serialize};

/// Tunable constants for a battle
///
/// Every field has a default, so a JSON document only needs the values
/// it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Energy each side starts with
    pub starting_energy: u32,

    /// Energy both sides gain at the end of a round
    pub energy_regen: u32,

    /// Regeneration stops at this amount
    pub energy_cap: u32,

    /// Delay before a transient animation marker is cleared (ms)
    pub anim_clear_delay_ms: u64,

    /// Delay before a fainted side's next bench member comes in (ms)
    pub promotion_delay_ms: u64,

    /// Player energy granted on victory
    pub victory_energy: u32,

    /// Player experience granted on victory
    pub victory_exp: u32,

    /// Level-up threshold is `level * level_exp_multiplier`
    pub level_exp_multiplier: u32,

    /// Gems granted on level-up
    pub level_up_gems: u32,

    /// Turns an ailment lasts when the skill doesn't say
    pub default_status_duration: u32,

    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            starting_energy: 3,
            energy_regen: 2,
            energy_cap: 5,
            anim_clear_delay_ms: 600,
            promotion_delay_ms: 700,
            victory_energy: 50,
            victory_exp: 100,
            level_exp_multiplier: 200,
            level_up_gems: 10,
            default_status_duration: 3,
            seed: None,
        }
    }
}

impl BattleConfig {
    /// Parse a config from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
