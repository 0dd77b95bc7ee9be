//! Error types for battle operations

use thiserror::Error;

use crate::engine::BattleMode;

/// Why a player action was refused.
///
/// The display text doubles as the warning written to the battle log.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("No battle in progress")]
    NoBattle,

    #[error("The battle is already over")]
    BattleEnded,

    #[error("It's not your turn!")]
    NotYourTurn,

    #[error("You must switch in a new Pokemon first!")]
    SwitchRequired,

    #[error("Not enough energy! ({needed} needed, {available} available)")]
    InsufficientEnergy { needed: u32, available: u32 },

    #[error("{skill} is on cooldown for {turns} more turn(s)")]
    OnCooldown { skill: String, turns: u32 },

    #[error("Unknown skill: {0}")]
    UnknownSkill(String),

    #[error("Card not in hand: {0}")]
    CardNotInHand(String),

    #[error("{0} can't be played that way")]
    WrongCardKind(String),

    #[error("No bench Pokemon named {0}")]
    UnknownBenchMember(String),

    #[error("{0} has fainted and can't battle!")]
    FaintedSwitchTarget(String),

    #[error("There is no target to attack!")]
    NoTarget,
}

/// Why a battle could not be created
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StartError {
    #[error("No Pokemon cards available, cannot start battle")]
    NoCreatureCards,

    #[error("Battle mode not supported: {0}")]
    UnsupportedMode(BattleMode),

    #[error("Unknown opponent: {0}")]
    UnknownOpponent(String),

    #[error("Opponent deck has no Pokemon cards")]
    OpponentHasNoCreatures,
}

/// Failure reported by the player data collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("Persistence queue closed")]
    Closed,
}
