//! Battle - the aggregate state of one battle in progress

use pokecard_cards::ElementalType;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::config::BattleConfig;
use crate::effects::process_status_effects;
use crate::presentation::{PresentationEvent, PresentationKind};
use crate::types::{AnimKind, AnimMarker, BattleLog, BattleSide, LogKind, Side};

use super::outcome::{BattleResult, BattleSummary};
use super::scheduler::{DeferredTask, Scheduler};

/// How the battle was started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleMode {
    Story,
    Ai,
    Pvp,
}

impl BattleMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BattleMode::Story => "story",
            BattleMode::Ai => "ai",
            BattleMode::Pvp => "pvp",
        }
    }
}

impl std::fmt::Display for BattleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single battle between the player and one opponent
///
/// All mutation goes through serialized calls: one action is fully resolved
/// (including the opponent's reply) before the next is accepted. Deferred
/// presentation work runs only when the clock is advanced.
#[derive(Debug, Clone)]
pub struct Battle {
    // === Metadata ===
    pub mode: BattleMode,

    /// Round counter, starting at 1
    pub turn: u32,

    /// Whose action is expected next
    pub current_turn: Side,

    // === State ===
    pub player: BattleSide,
    pub opponent: BattleSide,

    /// Side that must switch before doing anything else
    pub requires_switch: Option<Side>,

    /// Human-readable log
    pub log: BattleLog,

    // === Outcome ===
    pub ended: bool,
    pub result: Option<BattleResult>,

    pub started_at: u64,
    pub ended_at: Option<u64>,

    pub(crate) config: BattleConfig,
    pub(crate) rng: StdRng,
    pub(crate) scheduler: Scheduler,
    events: Vec<PresentationEvent>,
}

impl Battle {
    /// Start a battle between two prepared sides at clock time `now`
    pub fn new(
        mode: BattleMode,
        player: BattleSide,
        opponent: BattleSide,
        config: BattleConfig,
        now: u64,
    ) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut battle = Self {
            mode,
            turn: 1,
            current_turn: Side::Player,
            player,
            opponent,
            requires_switch: None,
            log: BattleLog::new(),
            ended: false,
            result: None,
            started_at: now,
            ended_at: None,
            config,
            rng,
            scheduler: Scheduler::starting_at(now),
            events: Vec::new(),
        };
        battle.push_log(LogKind::Info, "Battle started!");
        battle
    }

    /// Current battle clock, in milliseconds
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn side(&self, side: Side) -> &BattleSide {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut BattleSide {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }

    /// Check if the player may act right now
    pub fn is_player_turn(&self) -> bool {
        !self.ended && self.current_turn == Side::Player
    }

    /// Check if a bench promotion is still waiting for the clock
    pub fn promotion_pending(&self, side: Side) -> bool {
        self.scheduler
            .is_pending(&DeferredTask::PromoteBench { side })
    }

    /// Deferred tasks not yet run
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Take the presentation events raised since the last call
    pub fn drain_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move the clock forward and run every deferred task that came due.
    /// Returns how many tasks ran.
    pub fn advance(&mut self, ms: u64) -> usize {
        let due = self.scheduler.advance(ms);
        let count = due.len();
        for task in due {
            self.run_task(task);
        }
        count
    }

    /// Summary of a finished battle
    pub fn summary(&self) -> Option<BattleSummary> {
        let result = self.result?;
        let ended_at = self.ended_at.unwrap_or_else(|| self.now());
        Some(BattleSummary {
            mode: self.mode,
            result,
            player_team: self.player.team_names(),
            opponent_team: self.opponent.team_names(),
            turn_count: self.turn,
            duration_ms: ended_at.saturating_sub(self.started_at),
        })
    }

    /// Finish the battle. Has no effect if it already ended.
    pub fn end(&mut self, result: BattleResult) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.result = Some(result);
        self.ended_at = Some(self.now());
        self.requires_switch = None;

        let message = match result {
            BattleResult::Victory => "You won the battle!",
            BattleResult::Defeat => "You lost the battle...",
        };
        self.push_log(LogKind::Info, message);
        tracing::info!(%result, turn = self.turn, mode = %self.mode, "battle ended");
    }

    // === Internal helpers ===

    pub(crate) fn push_log(&mut self, kind: LogKind, message: impl Into<String>) {
        let now = self.now();
        self.log.push(kind, message, now);
    }

    pub(crate) fn emit(&mut self, side: Side, kind: PresentationKind, element: Option<ElementalType>) {
        let timestamp = self.now();
        self.events.push(PresentationEvent {
            side,
            kind,
            element,
            timestamp,
        });
    }

    /// Raise a transient marker on a side's active combatant and schedule
    /// its removal
    pub(crate) fn raise_anim(&mut self, side: Side, kind: AnimKind, element: Option<ElementalType>) {
        let ts = self.now();
        self.side_mut(side).active.anim = Some(AnimMarker { kind, ts, element });
        let delay = self.config.anim_clear_delay_ms;
        self.scheduler
            .schedule(delay, DeferredTask::ClearAnim { side, kind, ts });

        let presentation = match kind {
            AnimKind::Attack => PresentationKind::Attack,
            AnimKind::Hit => PresentationKind::Hit,
            AnimKind::Heal => PresentationKind::Heal,
        };
        self.emit(side, presentation, element);
    }

    /// Announce a faint if `side`'s active just went down
    pub(crate) fn note_faint(&mut self, side: Side, was_alive: bool) {
        let active = &self.side(side).active;
        if !(was_alive && active.is_fainted()) {
            return;
        }
        let message = format!("{} fainted!", active.name);
        self.push_log(LogKind::Damage, message);
        self.emit(side, PresentationKind::Faint, None);
        tracing::debug!(%side, turn = self.turn, "active fainted");
    }

    /// Run the per-turn status tick on a side's active combatant
    pub(crate) fn tick_active(&mut self, side: Side) {
        let active = match side {
            Side::Player => &mut self.player.active,
            Side::Opponent => &mut self.opponent.active,
        };
        if active.is_fainted() {
            return;
        }
        let events = process_status_effects(active, &mut self.rng);
        let name = active.name.clone();

        for event in events {
            let (kind, message) = event.describe(&name);
            self.push_log(kind, message);
        }
        self.note_faint(side, true);
    }

    /// Decide whether the battle is over and queue any follow-up
    pub(crate) fn check_battle_end(&mut self) {
        if self.ended {
            return;
        }

        if self.opponent.active.is_fainted() {
            if !self.opponent.has_bench() {
                self.end(BattleResult::Victory);
                return;
            }
            let task = DeferredTask::PromoteBench {
                side: Side::Opponent,
            };
            if !self.scheduler.is_pending(&task) {
                let delay = self.config.promotion_delay_ms;
                self.scheduler.schedule(delay, task);
                tracing::debug!(delay_ms = delay, "opponent promotion scheduled");
            }
        }

        if self.player.active.is_fainted() {
            if !self.player.has_bench() {
                self.end(BattleResult::Defeat);
                return;
            }
            if self.requires_switch != Some(Side::Player) {
                self.requires_switch = Some(Side::Player);
                self.push_log(LogKind::Info, "Choose your next Pokemon!");
            }
        }
    }

    fn run_task(&mut self, task: DeferredTask) {
        match task {
            DeferredTask::ClearAnim { side, kind, ts } => {
                let side = self.side_mut(side);
                let combatants =
                    std::iter::once(&mut side.active).chain(side.bench.iter_mut());
                for pokemon in combatants {
                    if let Some(marker) = pokemon.anim
                        && marker.kind == kind
                        && marker.ts == ts
                    {
                        pokemon.anim = None;
                    }
                }
            }
            DeferredTask::PromoteBench { side } => self.promote(side),
        }
    }

    fn promote(&mut self, side: Side) {
        if self.ended {
            return;
        }
        let target = self.side_mut(side);
        if target.active.is_alive() {
            return;
        }
        let Some(next) = target.promote_next().map(|p| p.name.clone()) else {
            return;
        };

        if self.requires_switch == Some(side) {
            self.requires_switch = None;
        }
        self.push_log(
            LogKind::Info,
            format!("{} sent out {}!", side.subject(), next),
        );
        tracing::debug!(%side, pokemon = %next, "bench promoted");
    }
}

/// Borrow the acting side and its foe at once
pub(crate) fn split_sides<'a>(
    player: &'a mut BattleSide,
    opponent: &'a mut BattleSide,
    actor: Side,
) -> (&'a mut BattleSide, &'a mut BattleSide) {
    match actor {
        Side::Player => (player, opponent),
        Side::Opponent => (opponent, player),
    }
}
