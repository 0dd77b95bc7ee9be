//! Battle engine
//!
//! [`BattleEngine`] owns at most one [`Battle`] at a time. It builds both
//! sides from the player data store, forwards presentation events to the
//! sink, and settles rewards once the battle is over.

mod actions;
mod ai;
mod battle;
mod outcome;
mod scheduler;

pub use actions::{Action, TurnSummary};
pub use ai::choose_skill;
pub use battle::{Battle, BattleMode};
pub use outcome::{BattleResult, BattleSummary, PlayerProfile, RewardDelta, settle};
pub use scheduler::{DeferredTask, Scheduler};

use pokecard_cards::{AI_OPPONENTS, AiOpponent, Card, ai_opponent};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::config::BattleConfig;
use crate::error::{ActionError, StartError};
use crate::presentation::{NullSink, PresentationSink};
use crate::store::PlayerDataStore;
use crate::types::{BattleLog, BattleSide, LogKind};

const PLAYER_NAME: &str = "Player";

/// Cards taken from the collection when the active deck is empty
const FALLBACK_CREATURES: usize = 6;
const FALLBACK_SUPPORT: usize = 6;

/// Drives battles for one player
pub struct BattleEngine<S, P = NullSink> {
    store: S,
    sink: P,
    config: BattleConfig,
    battle: Option<Battle>,
    /// Engine-level log for problems that happen outside a battle
    diagnostics: BattleLog,
    clock: u64,
    settled: bool,
    last_rewards: Option<RewardDelta>,
    rng: StdRng,
}

impl<S: PlayerDataStore> BattleEngine<S, NullSink> {
    pub fn new(store: S, config: BattleConfig) -> Self {
        Self::with_sink(store, NullSink, config)
    }
}

impl<S: PlayerDataStore, P: PresentationSink> BattleEngine<S, P> {
    pub fn with_sink(store: S, sink: P, config: BattleConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            sink,
            config,
            battle: None,
            diagnostics: BattleLog::new(),
            clock: 0,
            settled: false,
            last_rewards: None,
            rng,
        }
    }

    /// Start a new battle, replacing any previous one.
    ///
    /// `opponent` picks an AI trainer by id. Story mode defaults to the first
    /// trainer, AI mode to a random one. On failure no battle exists and the
    /// reason is written to [`diagnostics`](Self::diagnostics).
    pub fn start_battle(
        &mut self,
        mode: BattleMode,
        opponent: Option<&str>,
    ) -> Result<&Battle, StartError> {
        match self.prepare(mode, opponent) {
            Ok(battle) => {
                self.settled = false;
                self.last_rewards = None;
                let battle: &Battle = self.battle.insert(battle);
                Ok(battle)
            }
            Err(e) => {
                self.battle = None;
                self.diagnostics.push(LogKind::Error, e.to_string(), self.clock);
                tracing::error!(error = %e, %mode, "battle could not start");
                Err(e)
            }
        }
    }

    fn prepare(&mut self, mode: BattleMode, opponent: Option<&str>) -> Result<Battle, StartError> {
        if mode == BattleMode::Pvp {
            return Err(StartError::UnsupportedMode(mode));
        }
        let trainer = self.pick_opponent(mode, opponent)?;

        let energy = self.config.starting_energy;
        let deck = self.player_deck();
        let player =
            BattleSide::from_deck(PLAYER_NAME, &deck, energy).ok_or(StartError::NoCreatureCards)?;

        let opponent_deck = self
            .store
            .catalog()
            .ai_deck(trainer.difficulty, &mut self.rng);
        let opponent = BattleSide::from_deck(trainer.name, &opponent_deck, energy)
            .ok_or(StartError::OpponentHasNoCreatures)?;

        // Each battle gets its own stream, derived from the engine's
        let mut config = self.config.clone();
        config.seed = config.seed.map(|_| self.rng.gen_range(0..=u64::MAX));

        tracing::info!(
            %mode,
            opponent = trainer.name,
            player_team = player.bench.len() + 1,
            opponent_team = opponent.bench.len() + 1,
            "battle started"
        );
        Ok(Battle::new(mode, player, opponent, config, self.clock))
    }

    fn pick_opponent(
        &mut self,
        mode: BattleMode,
        requested: Option<&str>,
    ) -> Result<&'static AiOpponent, StartError> {
        let picked = match requested {
            Some(id) => ai_opponent(id),
            None if mode == BattleMode::Story => AI_OPPONENTS.first(),
            None => AI_OPPONENTS.choose(&mut self.rng),
        };
        picked.ok_or_else(|| StartError::UnknownOpponent(requested.unwrap_or_default().to_string()))
    }

    /// The active deck, or a stand-in built from the collection when it is empty
    fn player_deck(&self) -> Vec<Card> {
        let deck = self.store.active_deck_cards();
        if !deck.is_empty() {
            return deck;
        }

        let collection = self.store.collection();
        tracing::debug!(owned = collection.len(), "active deck empty, using collection");
        let creatures = collection
            .iter()
            .filter(|c| c.is_creature())
            .take(FALLBACK_CREATURES);
        let support = collection
            .iter()
            .filter(|c| !c.is_creature())
            .take(FALLBACK_SUPPORT);
        creatures.chain(support).cloned().collect()
    }

    /// Run one player action (and the opponent's reply) in the current battle
    pub fn execute_player_action(&mut self, action: &Action) -> Result<TurnSummary, ActionError> {
        let Some(battle) = self.battle.as_mut() else {
            let e = ActionError::NoBattle;
            self.diagnostics.push(LogKind::Warning, e.to_string(), self.clock);
            tracing::warn!(error = %e, ?action, "action rejected");
            return Err(e);
        };

        let outcome = battle.execute_player_action(action);
        self.flush_events();
        self.settle_if_ended();
        outcome
    }

    /// Move the clock forward, running any deferred work that comes due.
    /// Returns how many deferred tasks ran.
    pub fn advance(&mut self, ms: u64) -> usize {
        self.clock += ms;
        let ran = match self.battle.as_mut() {
            Some(battle) => battle.advance(ms),
            None => 0,
        };
        self.flush_events();
        ran
    }

    /// Force the current battle to end, e.g. when the player forfeits
    pub fn end_battle(&mut self, result: BattleResult) -> Result<(), ActionError> {
        let battle = self.battle.as_mut().ok_or(ActionError::NoBattle)?;
        battle.end(result);
        self.flush_events();
        self.settle_if_ended();
        Ok(())
    }

    fn flush_events(&mut self) {
        if let Some(battle) = self.battle.as_mut() {
            for event in battle.drain_events() {
                self.sink.notify(event);
            }
        }
    }

    /// Grant rewards and report the outcome once per battle. Store failures
    /// are logged; the battle state stays as it is.
    fn settle_if_ended(&mut self) {
        if self.settled {
            return;
        }
        let Some(battle) = self.battle.as_mut() else {
            return;
        };
        let (Some(result), Some(summary)) = (battle.result, battle.summary()) else {
            return;
        };
        self.settled = true;

        let delta = settle(&self.store.profile(), result, battle.config());
        match result {
            BattleResult::Victory => {
                battle.push_log(
                    LogKind::Info,
                    format!(
                        "Victory! You earned {} energy and {} EXP!",
                        delta.energy, delta.exp
                    ),
                );
                if let Some(level) = delta.new_level {
                    battle.push_log(LogKind::Info, format!("Level up! You're now level {level}!"));
                }
            }
            BattleResult::Defeat => battle.push_log(LogKind::Info, "Defeat... Try again!"),
        }

        if let Err(e) = self.store.apply_rewards(&delta) {
            battle.push_log(LogKind::Warning, format!("Could not save rewards: {e}"));
            tracing::warn!(error = %e, "failed to apply rewards");
        }
        if let Err(e) = self.store.report_battle_result(result, &summary) {
            battle.push_log(LogKind::Warning, format!("Could not save battle result: {e}"));
            tracing::warn!(error = %e, %result, "failed to report battle result");
        }
        self.last_rewards = Some(delta);
    }

    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    /// Direct access to the running battle, for scripted setups
    pub fn battle_mut(&mut self) -> Option<&mut Battle> {
        self.battle.as_mut()
    }

    /// Problems recorded outside any battle
    pub fn diagnostics(&self) -> &BattleLog {
        &self.diagnostics
    }

    /// Rewards settled for the most recent finished battle
    pub fn last_rewards(&self) -> Option<&RewardDelta> {
        self.last_rewards.as_ref()
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink(&self) -> &P {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pokecard_cards::Catalog;

    fn store() -> MemoryStore {
        MemoryStore::new(Catalog::generate(&mut StdRng::seed_from_u64(5)))
    }

    #[test]
    fn test_start_story_battle() {
        let mut engine = BattleEngine::new(store(), BattleConfig::seeded(1));
        let battle = engine.start_battle(BattleMode::Story, None).unwrap();

        assert_eq!(battle.opponent.name, "Rookie Trainer");
        assert_eq!(battle.player.energy, 3);
        assert_eq!(battle.opponent.energy, 3);
        assert!(battle.opponent.bench.len() >= 3);
        assert_eq!(battle.player.name, "Player");
    }

    #[test]
    fn test_pvp_unsupported() {
        let mut engine = BattleEngine::new(store(), BattleConfig::seeded(1));
        let err = engine.start_battle(BattleMode::Pvp, None).unwrap_err();
        assert_eq!(err, StartError::UnsupportedMode(BattleMode::Pvp));
        assert!(engine.battle().is_none());
        assert_eq!(engine.diagnostics().last().unwrap().kind, LogKind::Error);
    }

    #[test]
    fn test_unknown_opponent() {
        let mut engine = BattleEngine::new(store(), BattleConfig::seeded(1));
        let err = engine.start_battle(BattleMode::Ai, Some("ai9")).unwrap_err();
        assert_eq!(err, StartError::UnknownOpponent("ai9".into()));
    }

    #[test]
    fn test_empty_deck_falls_back_to_collection() {
        let store = store().with_deck(vec![]);
        let mut engine = BattleEngine::new(store, BattleConfig::seeded(1));
        let battle = engine.start_battle(BattleMode::Ai, Some("ai2")).unwrap();
        assert_eq!(battle.opponent.name, "Ace Trainer");
        assert!(battle.player.alive_count() >= 1);
    }

    #[test]
    fn test_action_without_battle() {
        let mut engine = BattleEngine::new(store(), BattleConfig::seeded(1));
        let err = engine
            .execute_player_action(&Action::attack("tackle"))
            .unwrap_err();
        assert_eq!(err, ActionError::NoBattle);
        assert_eq!(engine.diagnostics().len(), 1);
        assert!(engine.end_battle(BattleResult::Victory).is_err());
    }

    #[test]
    fn test_forfeit_settles_once() {
        let mut engine = BattleEngine::new(store(), BattleConfig::seeded(1));
        engine.start_battle(BattleMode::Story, None).unwrap();
        engine.end_battle(BattleResult::Defeat).unwrap();
        engine.end_battle(BattleResult::Defeat).unwrap();

        assert_eq!(engine.store().profile.losses, 1);
        assert_eq!(engine.store().results.len(), 1);
        let battle = engine.battle().unwrap();
        assert!(battle.log.contains("Defeat... Try again!"));
    }
}
