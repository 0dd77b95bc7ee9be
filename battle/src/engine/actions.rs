//! Player actions and the opponent's reply
//!
//! One call resolves a full round: the player's action, the player's status
//! tick, the faint check, the opponent's counter-attack and tick, then energy
//! regeneration.

use pokecard_cards::{CardEffect, ItemEffect, Skill, SkillEffect, Stat};
use serde::{Deserialize, Serialize};

use crate::damage::compute_damage;
use crate::effects::{apply_effect, can_attack, cleanse};
use crate::error::ActionError;
use crate::types::{AnimKind, BattlePokemon, Effectiveness, LogEntry, LogKind, Side};

use super::ai;
use super::battle::{Battle, split_sides};
use super::outcome::BattleResult;

/// Turns a Protect-style shield card survives: the owner's next tick and
/// the one after the opponent's reply
const CARD_SHIELD_TURNS: u32 = 2;

/// Something the player asks to do on their turn.
///
/// Skills are named by id or display name, cards by uid or catalog id,
/// bench members by uid, id, or name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    Attack { skill: String },
    UseItem { card: String },
    UseSkillCard { card: String },
    Switch { pokemon: String },
}

impl Action {
    pub fn attack(skill: impl Into<String>) -> Self {
        Action::Attack {
            skill: skill.into(),
        }
    }

    pub fn use_item(card: impl Into<String>) -> Self {
        Action::UseItem { card: card.into() }
    }

    pub fn use_skill_card(card: impl Into<String>) -> Self {
        Action::UseSkillCard { card: card.into() }
    }

    pub fn switch(pokemon: impl Into<String>) -> Self {
        Action::Switch {
            pokemon: pokemon.into(),
        }
    }
}

/// What one accepted action produced
#[derive(Debug, Clone, PartialEq)]
pub struct TurnSummary {
    /// Round the action was taken in
    pub turn: u32,
    /// Log entries appended while resolving the round
    pub entries: Vec<LogEntry>,
    pub result: Option<BattleResult>,
    /// The player must switch before acting again
    pub requires_switch: bool,
}

/// A validated action, ready to resolve
enum Plan {
    Attack(Skill),
    Item(usize),
    SkillCard(usize),
    Switch(usize),
}

impl Battle {
    /// Validate and resolve a player action, then let the opponent reply.
    ///
    /// A rejected action leaves the battle untouched apart from a single
    /// warning entry in the log.
    pub fn execute_player_action(&mut self, action: &Action) -> Result<TurnSummary, ActionError> {
        let mark = self.log.len();
        let turn = self.turn;

        let plan = match self.validate(action) {
            Ok(plan) => plan,
            Err(e) => {
                self.push_log(LogKind::Warning, e.to_string());
                tracing::warn!(error = %e, ?action, turn, "action rejected");
                return Err(e);
            }
        };
        tracing::debug!(?action, turn, "player action");

        let used = self.resolve(Side::Player, plan);
        self.tick_active(Side::Player);
        self.start_cooldown(Side::Player, used);
        self.check_battle_end();

        if !self.ended {
            self.opponent_turn();
        }
        if !self.ended {
            self.end_round();
        }

        Ok(TurnSummary {
            turn,
            entries: self.log.since(mark).to_vec(),
            result: self.result,
            requires_switch: self.requires_switch == Some(Side::Player),
        })
    }

    fn validate(&self, action: &Action) -> Result<Plan, ActionError> {
        if self.ended {
            return Err(ActionError::BattleEnded);
        }
        if self.current_turn != Side::Player {
            return Err(ActionError::NotYourTurn);
        }
        if self.requires_switch == Some(Side::Player) && !matches!(action, Action::Switch { .. }) {
            return Err(ActionError::SwitchRequired);
        }

        let side = &self.player;
        match action {
            Action::Attack { skill } => {
                let found = side
                    .active
                    .skill(skill)
                    .ok_or_else(|| ActionError::UnknownSkill(skill.clone()))?;
                if !found.is_ready() {
                    return Err(ActionError::OnCooldown {
                        skill: found.name.clone(),
                        turns: found.current_cooldown,
                    });
                }
                self.check_energy(found.energy)?;
                self.check_target()?;
                Ok(Plan::Attack(found.clone()))
            }

            Action::UseItem { card } => {
                let index = side
                    .find_card(card)
                    .ok_or_else(|| ActionError::CardNotInHand(card.clone()))?;
                let found = &side.hand[index];
                if found.as_item().is_none() {
                    return Err(ActionError::WrongCardKind(found.name.clone()));
                }
                Ok(Plan::Item(index))
            }

            Action::UseSkillCard { card } => {
                let index = side
                    .find_card(card)
                    .ok_or_else(|| ActionError::CardNotInHand(card.clone()))?;
                let found = &side.hand[index];
                let skill_card = found
                    .as_skill_card()
                    .ok_or_else(|| ActionError::WrongCardKind(found.name.clone()))?;
                self.check_energy(skill_card.energy)?;
                if skill_card.effect.is_none() && skill_card.power.is_some() {
                    self.check_target()?;
                }
                Ok(Plan::SkillCard(index))
            }

            Action::Switch { pokemon } => {
                let index = side
                    .find_bench(pokemon)
                    .ok_or_else(|| ActionError::UnknownBenchMember(pokemon.clone()))?;
                let target = &side.bench[index];
                if target.is_fainted() {
                    return Err(ActionError::FaintedSwitchTarget(target.name.clone()));
                }
                Ok(Plan::Switch(index))
            }
        }
    }

    fn check_energy(&self, needed: u32) -> Result<(), ActionError> {
        let available = self.player.energy;
        if available < needed {
            return Err(ActionError::InsufficientEnergy { needed, available });
        }
        Ok(())
    }

    /// The opponent's active may be down while its promotion is pending
    fn check_target(&self) -> Result<(), ActionError> {
        if self.opponent.active.is_fainted() {
            return Err(ActionError::NoTarget);
        }
        Ok(())
    }

    /// Carry out a validated plan. Returns the id of the skill used, if any.
    fn resolve(&mut self, side: Side, plan: Plan) -> Option<String> {
        match plan {
            Plan::Attack(skill) => {
                if self.blocked(side) {
                    return None;
                }
                let acting = self.side_mut(side);
                acting.energy = acting.energy.saturating_sub(skill.energy);
                self.perform_attack(side, &skill);
                return Some(skill.id);
            }
            Plan::Item(index) => self.use_item(side, index),
            Plan::SkillCard(index) => {
                if !self.blocked(side) {
                    self.use_skill_card(side, index);
                }
            }
            Plan::Switch(index) => self.switch(side, index),
        }
        None
    }

    /// Start the cooldown of a skill used this round. Runs after the owner's
    /// tick so the round of use does not count toward it.
    fn start_cooldown(&mut self, side: Side, skill_id: Option<String>) {
        let Some(id) = skill_id else {
            return;
        };
        if let Some(own) = self.side_mut(side).active.skill_mut(&id) {
            own.trigger_cooldown();
        }
    }

    /// Run the pre-action ailment check. A blocked action still uses the turn.
    fn blocked(&mut self, side: Side) -> bool {
        let active = match side {
            Side::Player => &self.player.active,
            Side::Opponent => &self.opponent.active,
        };
        let check = can_attack(active, &mut self.rng);
        if check.can_attack {
            return false;
        }
        if let Some(reason) = check.reason {
            self.push_log(LogKind::Status, reason);
        }
        true
    }

    /// Resolve a skill's effects in order. Energy and cooldown are handled by
    /// the caller.
    pub(crate) fn perform_attack(&mut self, side: Side, skill: &Skill) {
        let effects = if skill.effects.is_empty() && skill.power > 0 {
            vec![SkillEffect::Damage { value: None }]
        } else {
            skill.effects.clone()
        };

        let user = self.side(side).active.name.clone();
        if !effects.iter().any(SkillEffect::is_damage) {
            self.push_log(LogKind::Info, format!("{user} used {}!", skill.name));
        }

        let foe_side = side.other();
        for effect in &effects {
            match effect {
                SkillEffect::Damage { value } => self.strike(side, skill, *value),

                SkillEffect::Heal { value } => {
                    let healed = self.side_mut(side).active.heal(*value);
                    self.push_log(LogKind::Heal, format!("{user} restored {healed} HP!"));
                    self.raise_anim(side, AnimKind::Heal, None);
                }

                SkillEffect::Buff { stat, value, .. } => {
                    if self.apply_to(side, side, effect, &skill.name) {
                        self.push_log(LogKind::Buff, format!("{user}'s {stat} rose by {value}!"));
                    }
                }

                SkillEffect::Shield { value, .. } => {
                    if self.apply_to(side, side, effect, &skill.name) {
                        self.push_log(
                            LogKind::Buff,
                            format!("{user} is protected by a {value} HP shield!"),
                        );
                    }
                }

                SkillEffect::Debuff { stat, value, .. } => {
                    if self.side(foe_side).active.is_fainted() {
                        continue;
                    }
                    if self.apply_to(side, foe_side, effect, &skill.name) {
                        let foe = &self.side(foe_side).active.name;
                        let message = format!("{foe}'s {stat} fell by {value}!");
                        self.push_log(LogKind::Debuff, message);
                    }
                }

                SkillEffect::Status { ailment, .. } => {
                    if self.side(foe_side).active.is_fainted() {
                        continue;
                    }
                    if self.apply_to(side, foe_side, effect, &skill.name) {
                        let foe = &self.side(foe_side).active.name;
                        let message = format!("{foe} was inflicted with {ailment}!");
                        self.push_log(LogKind::Status, message);
                    }
                }
            }
        }
    }

    /// Roll and apply one damage effect against the opposing active
    fn strike(&mut self, side: Side, skill: &Skill, value: Option<u32>) {
        let foe_side = side.other();
        let (actor, foe) = split_sides(&mut self.player, &mut self.opponent, side);
        if foe.active.is_fainted() {
            return;
        }

        let roll = compute_damage(skill, value, &actor.active, &mut foe.active, &mut self.rng);
        let attacker = actor.active.name.clone();
        let defender = foe.active.name.clone();

        self.push_log(
            LogKind::Damage,
            format!("{attacker} used {} for {} damage!", skill.name, roll.damage),
        );
        if roll.critical {
            self.push_log(LogKind::Damage, "A critical hit!");
        }
        if roll.absorbed > 0 {
            self.push_log(
                LogKind::Info,
                format!("{defender}'s shield absorbed {} damage!", roll.absorbed),
            );
        }
        if let Some(message) = Effectiveness::from_multiplier(roll.effectiveness).message() {
            self.push_log(LogKind::Info, message);
        }

        self.raise_anim(side, AnimKind::Attack, Some(skill.element));
        self.raise_anim(foe_side, AnimKind::Hit, Some(skill.element));
        self.note_faint(foe_side, true);
    }

    /// Attach a timed effect to `target`'s active. Returns whether anything
    /// changed (a failed chance roll changes nothing).
    fn apply_to(&mut self, source: Side, target: Side, effect: &SkillEffect, skill_name: &str) -> bool {
        let default_duration = self.config.default_status_duration;
        let pokemon = match target {
            Side::Player => &mut self.player.active,
            Side::Opponent => &mut self.opponent.active,
        };
        let before = snapshot(pokemon);
        let recorded = apply_effect(
            effect,
            skill_name,
            source,
            target,
            pokemon,
            default_duration,
            &mut self.rng,
        );
        recorded.is_some() || snapshot(pokemon) != before
    }

    fn use_item(&mut self, side: Side, index: usize) {
        let Some(card) = self.side_mut(side).take_card(index) else {
            return;
        };
        let Some(item) = card.as_item() else {
            return;
        };
        let who = side.subject();

        match item.effect {
            ItemEffect::Heal { amount } => {
                let active = &mut self.side_mut(side).active;
                if active.is_fainted() {
                    self.push_log(LogKind::Info, format!("{} had no effect.", card.name));
                    return;
                }
                let healed = active.heal(amount);
                self.push_log(
                    LogKind::Heal,
                    format!("{who} used {} and healed {healed} HP!", card.name),
                );
                self.raise_anim(side, AnimKind::Heal, None);
            }

            ItemEffect::Energy { amount } => {
                self.side_mut(side).energy += amount;
                self.push_log(
                    LogKind::Info,
                    format!("{who} used {} and gained {amount} energy!", card.name),
                );
            }

            ItemEffect::Revive { percent } => {
                let active = &mut self.side_mut(side).active;
                if active.is_alive() {
                    self.push_log(LogKind::Info, format!("{} had no effect.", card.name));
                    return;
                }
                active.hp = (active.max_hp * percent / 100).clamp(1, active.max_hp.max(1));
                let name = active.name.clone();
                self.push_log(
                    LogKind::Heal,
                    format!("{who} used {} and revived {name}!", card.name),
                );
                self.raise_anim(side, AnimKind::Heal, None);
            }
        }
    }

    fn use_skill_card(&mut self, side: Side, index: usize) {
        let Some(card) = self.side_mut(side).take_card(index) else {
            return;
        };
        let Some(skill_card) = card.as_skill_card() else {
            return;
        };
        let acting = self.side_mut(side);
        acting.energy = acting.energy.saturating_sub(skill_card.energy);
        let who = side.subject();

        match skill_card.effect {
            Some(CardEffect::Heal { amount }) => {
                let healed = self.side_mut(side).active.heal(amount);
                self.push_log(
                    LogKind::Heal,
                    format!("{who} used {} and healed {healed} HP!", card.name),
                );
                self.raise_anim(side, AnimKind::Heal, None);
            }

            Some(CardEffect::AttackBoost { atk, turns }) => {
                let boost = SkillEffect::Buff {
                    stat: Stat::Atk,
                    value: atk,
                    duration: Some(turns),
                };
                self.apply_to(side, side, &boost, &card.name);
                self.push_log(LogKind::Buff, format!("{who} used {}, ATK +{atk}!", card.name));
            }

            Some(CardEffect::Shield { amount }) => {
                let shield = SkillEffect::Shield {
                    value: amount,
                    duration: Some(CARD_SHIELD_TURNS),
                };
                self.apply_to(side, side, &shield, &card.name);
                self.push_log(
                    LogKind::Buff,
                    format!("{who} used {}, shield +{amount}!", card.name),
                );
            }

            Some(CardEffect::Cleanse) => {
                let active = &mut self.side_mut(side).active;
                let removed = cleanse(active);
                let name = active.name.clone();
                let message = if removed > 0 {
                    format!("{who} used {}, {name} is cured of all ailments!", card.name)
                } else {
                    format!("{who} used {}, but {name} had nothing to cure.", card.name)
                };
                self.push_log(LogKind::Status, message);
            }

            // Cards carrying raw power behave like an attack
            None => match skill_card.as_attack(&card.id, &card.name) {
                Some(skill) => self.perform_attack(side, &skill),
                None => {
                    self.push_log(LogKind::Info, format!("{} had no effect.", card.name));
                }
            },
        }
    }

    fn switch(&mut self, side: Side, index: usize) {
        let acting = self.side_mut(side);
        let outgoing = acting.active.name.clone();
        let was_fainted = acting.active.is_fainted();
        let Some(incoming) = acting.switch_in(index).map(|p| p.name.clone()) else {
            return;
        };

        if self.requires_switch == Some(side) {
            self.requires_switch = None;
        }
        let who = side.subject();
        let message = if was_fainted {
            format!("{who} sent out {incoming}!")
        } else {
            format!("{who} withdrew {outgoing} and sent out {incoming}!")
        };
        self.push_log(LogKind::Info, message);
        tracing::debug!(%side, from = %outgoing, to = %incoming, "switched");
    }

    /// The opponent's counter-action. Skipped while its own active is down.
    fn opponent_turn(&mut self) {
        if self.opponent.active.is_fainted() {
            return;
        }
        self.current_turn = Side::Opponent;

        let mut used = None;
        if self.player.active.is_alive() {
            let skill = ai::choose_skill(&self.opponent.active, self.opponent.energy, &mut self.rng);
            tracing::debug!(skill = %skill.id, energy = self.opponent.energy, "opponent attacks");
            if !self.blocked(Side::Opponent) {
                self.opponent.energy = self.opponent.energy.saturating_sub(skill.energy);
                self.perform_attack(Side::Opponent, &skill);
                used = Some(skill.id);
            }
        }

        self.tick_active(Side::Opponent);
        self.start_cooldown(Side::Opponent, used);
        self.check_battle_end();
    }

    fn end_round(&mut self) {
        let regen = self.config.energy_regen;
        let cap = self.config.energy_cap;
        self.player.regenerate(regen, cap);
        self.opponent.regenerate(regen, cap);
        self.turn += 1;
        self.current_turn = Side::Player;
        tracing::debug!(
            turn = self.turn,
            player_energy = self.player.energy,
            opponent_energy = self.opponent.energy,
            "round complete"
        );
    }
}

/// The parts of a combatant an effect may touch
fn snapshot(pokemon: &BattlePokemon) -> (crate::types::StatModifiers, u32, usize) {
    (pokemon.stat_modifiers, pokemon.shield, pokemon.active_effects.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::engine::BattleMode;
    use crate::types::BattleSide;
    use pokecard_cards::{
        Ailment, Card, CardKind, ElementalType, ItemCard, Rarity, SkillCard, SkillCategory,
    };

    fn mon(name: &str, element: ElementalType) -> BattlePokemon {
        BattlePokemon::new(name, name, element, 100, 40, 40, 40)
    }

    fn battle() -> Battle {
        let player = BattleSide::new("Ash", mon("pikachu", ElementalType::Electric), 3)
            .with_bench(vec![mon("squirtle", ElementalType::Water)]);
        let opponent = BattleSide::new("Rookie Trainer", mon("rattata", ElementalType::Normal), 3)
            .with_bench(vec![mon("pidgey", ElementalType::Flying)]);
        Battle::new(
            BattleMode::Story,
            player,
            opponent,
            BattleConfig::seeded(7),
            0,
        )
    }

    fn item(id: &str, name: &str, effect: ItemEffect) -> Card {
        Card::new(id, name, Rarity::Common, CardKind::Item(ItemCard { effect }))
    }

    fn skill_card(id: &str, name: &str, effect: Option<CardEffect>, energy: u32) -> Card {
        Card::new(
            id,
            name,
            Rarity::Rare,
            CardKind::Skill(SkillCard {
                effect,
                energy,
                power: None,
                element: None,
            }),
        )
    }

    #[test]
    fn test_attack_round() {
        let mut battle = battle();
        let summary = battle.execute_player_action(&Action::attack("tackle")).unwrap();

        assert_eq!(summary.turn, 1);
        assert_eq!(battle.turn, 2);
        assert!(battle.is_player_turn());
        assert!(battle.opponent.active.hp < 100);
        assert!(summary.entries[0].message.starts_with("pikachu used Tackle for "));
        // 3 - 1 for tackle, +2 regen
        assert_eq!(battle.player.energy, 4);
    }

    #[test]
    fn test_insufficient_energy_rejected() {
        let mut battle = battle();
        battle.player.energy = 0;
        let before = battle.log.len();

        let err = battle
            .execute_player_action(&Action::attack("tackle"))
            .unwrap_err();
        assert_eq!(err, ActionError::InsufficientEnergy { needed: 1, available: 0 });
        assert_eq!(battle.log.len(), before + 1);
        assert_eq!(battle.log.last().unwrap().kind, LogKind::Warning);
        assert_eq!(battle.opponent.active.hp, 100);
        assert_eq!(battle.turn, 1);
    }

    #[test]
    fn test_not_your_turn() {
        let mut battle = battle();
        battle.current_turn = Side::Opponent;
        let err = battle
            .execute_player_action(&Action::attack("tackle"))
            .unwrap_err();
        assert_eq!(err, ActionError::NotYourTurn);
        assert_eq!(battle.log.last().unwrap().message, "It's not your turn!");
    }

    #[test]
    fn test_unknown_skill_and_card() {
        let mut battle = battle();
        assert_eq!(
            battle.execute_player_action(&Action::attack("hyper_beam")),
            Err(ActionError::UnknownSkill("hyper_beam".into()))
        );
        assert_eq!(
            battle.execute_player_action(&Action::use_item("item_potion")),
            Err(ActionError::CardNotInHand("item_potion".into()))
        );
    }

    #[test]
    fn test_cooldown_rejected() {
        let mut battle = battle();
        battle.player.active.skills = vec![
            Skill::strike("zap", "Zap", ElementalType::Electric, 30, 1).with_cooldown(3),
            Skill::tackle(),
        ];
        battle.execute_player_action(&Action::attack("zap")).unwrap();

        let err = battle.execute_player_action(&Action::attack("zap")).unwrap_err();
        assert!(matches!(err, ActionError::OnCooldown { turns: 3, .. }));
    }

    #[test]
    fn test_one_round_cooldown_blocks_next_round() {
        let mut battle = battle();
        battle.player.active.skills = vec![
            Skill::strike("quick", "Quick Attack", ElementalType::Normal, 30, 1).with_cooldown(1),
            Skill::tackle(),
        ];
        battle.execute_player_action(&Action::attack("quick")).unwrap();
        assert_eq!(battle.player.active.skill("quick").unwrap().current_cooldown, 1);

        let err = battle.execute_player_action(&Action::attack("quick")).unwrap_err();
        assert_eq!(
            err,
            ActionError::OnCooldown {
                skill: "Quick Attack".into(),
                turns: 1
            }
        );

        battle.execute_player_action(&Action::attack("tackle")).unwrap();
        assert!(battle.player.active.skill("quick").unwrap().is_ready());
        battle.execute_player_action(&Action::attack("quick")).unwrap();
    }

    #[test]
    fn test_opponent_cooldown_spans_next_round() {
        let mut battle = battle();
        battle.opponent.active.skills =
            vec![Skill::strike("bite", "Bite", ElementalType::Dark, 30, 1).with_cooldown(1)];
        battle.execute_player_action(&Action::attack("tackle")).unwrap();
        assert!(battle.log.contains("rattata used Bite for "));
        assert_eq!(battle.opponent.active.skill("bite").unwrap().current_cooldown, 1);

        // Bite is still cooling down, so the opponent falls back to Tackle
        let summary = battle.execute_player_action(&Action::attack("tackle")).unwrap();
        assert!(summary
            .entries
            .iter()
            .any(|e| e.message.starts_with("rattata used Tackle for ")));
        assert!(battle.opponent.active.skill("bite").unwrap().is_ready());
    }

    #[test]
    fn test_switch_required_blocks_other_actions() {
        let mut battle = battle();
        battle.player.active.hp = 0;
        battle.check_battle_end();

        assert_eq!(
            battle.execute_player_action(&Action::attack("tackle")),
            Err(ActionError::SwitchRequired)
        );

        let summary = battle.execute_player_action(&Action::switch("squirtle")).unwrap();
        assert!(!summary.requires_switch);
        assert_eq!(battle.player.active.name, "squirtle");
        assert!(battle.player.bench.is_empty());
        assert!(battle.log.contains("You sent out squirtle!"));
    }

    #[test]
    fn test_voluntary_switch_keeps_outgoing() {
        let mut battle = battle();
        battle.execute_player_action(&Action::switch("squirtle")).unwrap();
        assert_eq!(battle.player.active.name, "squirtle");
        assert_eq!(battle.player.bench[0].name, "pikachu");
        assert!(battle.log.contains("You withdrew pikachu and sent out squirtle!"));
    }

    #[test]
    fn test_no_target_while_promotion_pending() {
        let mut battle = battle();
        battle.opponent.active.hp = 0;
        battle.check_battle_end();
        assert_eq!(
            battle.execute_player_action(&Action::attack("tackle")),
            Err(ActionError::NoTarget)
        );

        battle.advance(700);
        assert_eq!(battle.opponent.active.name, "pidgey");
        assert!(battle.execute_player_action(&Action::attack("tackle")).is_ok());
    }

    #[test]
    fn test_potion_heals_and_is_consumed() {
        let mut battle = battle();
        battle.player.active.hp = 50;
        battle.player.hand = vec![item("item_potion", "Potion", ItemEffect::Heal { amount: 20 })];
        battle.opponent.active.skills = vec![Skill::new(
            "growl",
            "Growl",
            ElementalType::Normal,
            SkillCategory::Status,
        )];

        battle.execute_player_action(&Action::use_item("item_potion")).unwrap();
        assert_eq!(battle.player.active.hp, 70);
        assert!(battle.player.hand.is_empty());
        assert!(battle.log.contains("You used Potion and healed 20 HP!"));
    }

    #[test]
    fn test_energy_item_is_uncapped() {
        let mut battle = battle();
        battle.player.energy = 5;
        battle.player.hand = vec![item("item_energy", "Energy Crystal", ItemEffect::Energy { amount: 2 })];
        battle.execute_player_action(&Action::use_item("item_energy")).unwrap();
        // 7 stays above the cap; regeneration never lowers it
        assert_eq!(battle.player.energy, 7);
    }

    #[test]
    fn test_revive_needs_fainted_target() {
        let mut battle = battle();
        battle.player.hand = vec![item("item_revive", "Revive", ItemEffect::Revive { percent: 50 })];
        battle.execute_player_action(&Action::use_item("item_revive")).unwrap();
        assert!(battle.log.contains("Revive had no effect."));
        assert!(battle.player.hand.is_empty());
    }

    #[test]
    fn test_attack_boost_card() {
        let mut battle = battle();
        battle.player.hand = vec![skill_card(
            "skill_boost",
            "Attack Boost",
            Some(CardEffect::AttackBoost { atk: 10, turns: 3 }),
            1,
        )];
        battle
            .execute_player_action(&Action::use_skill_card("skill_boost"))
            .unwrap();

        assert_eq!(battle.player.active.stat_modifiers.atk, 10);
        assert!(battle.log.contains("You used Attack Boost, ATK +10!"));
        // 3 - 1 for the card, +2 regen
        assert_eq!(battle.player.energy, 4);
    }

    #[test]
    fn test_protect_card_absorbs_reply() {
        let mut battle = battle();
        battle.player.hand = vec![skill_card(
            "skill_protect",
            "Protect",
            Some(CardEffect::Shield { amount: 20 }),
            2,
        )];
        battle.opponent.active.skills = vec![Skill::tackle().with_energy(0)];
        battle
            .execute_player_action(&Action::use_skill_card("skill_protect"))
            .unwrap();

        // Tackle's raw 8 damage is soaked up, the floor still lands
        assert!(battle.log.contains("pikachu's shield absorbed 8 damage!"));
        assert_eq!(battle.player.active.shield, 12);
        assert!(battle.player.active.hp < 100);
    }

    #[test]
    fn test_cleanse_card() {
        let mut battle = battle();
        battle.player.hand = vec![skill_card("skill_cleanse", "Cleanse", Some(CardEffect::Cleanse), 1)];
        let burn = SkillEffect::Status {
            ailment: Ailment::Burn,
            chance: None,
            duration: Some(5),
        };
        battle.apply_to(Side::Opponent, Side::Player, &burn, "Ember");
        assert!(battle.player.active.has_ailment(Ailment::Burn));

        battle
            .execute_player_action(&Action::use_skill_card("skill_cleanse"))
            .unwrap();
        assert!(!battle.player.active.has_ailment(Ailment::Burn));
        assert!(battle.log.contains("cured of all ailments"));
    }

    #[test]
    fn test_unrecognized_skill_card_is_noop() {
        let mut battle = battle();
        battle.player.hand = vec![skill_card("skill_odd", "Odd Card", None, 0)];
        battle
            .execute_player_action(&Action::use_skill_card("skill_odd"))
            .unwrap();
        assert!(battle.log.contains("Odd Card had no effect."));
    }

    #[test]
    fn test_powered_skill_card_attacks() {
        let mut battle = battle();
        let mut card = skill_card("skill_bolt", "Bolt", None, 2);
        if let CardKind::Skill(inner) = &mut card.kind {
            inner.power = Some(40);
            inner.element = Some(ElementalType::Electric);
        }
        battle.player.hand = vec![card];
        battle
            .execute_player_action(&Action::use_skill_card("skill_bolt"))
            .unwrap();
        assert!(battle.log.contains("pikachu used Bolt for "));
        assert!(battle.opponent.active.hp < 100);
    }

    #[test]
    fn test_frozen_player_loses_turn() {
        let mut battle = battle();
        let freeze = SkillEffect::Status {
            ailment: Ailment::Freeze,
            chance: None,
            duration: Some(10),
        };
        battle.apply_to(Side::Opponent, Side::Player, &freeze, "Ice Beam");
        battle.execute_player_action(&Action::attack("tackle")).unwrap();

        assert!(battle.log.contains("pikachu is frozen solid!"));
        assert_eq!(battle.opponent.active.hp, 100);
        assert_eq!(battle.player.energy, 5);
        assert_eq!(battle.turn, 2);
    }

    #[test]
    fn test_status_skill_logs_use() {
        let mut battle = battle();
        battle.player.active.skills = vec![
            Skill::new("growl", "Growl", ElementalType::Normal, SkillCategory::Status).with_effect(
                SkillEffect::Debuff {
                    stat: Stat::Atk,
                    value: 5,
                    duration: None,
                    chance: None,
                },
            ),
        ];
        battle.execute_player_action(&Action::attack("growl")).unwrap();
        assert!(battle.log.contains("pikachu used Growl!"));
        assert!(battle.log.contains("rattata's ATK fell by 5!"));
        assert_eq!(battle.opponent.active.stat_modifiers.atk, -5);
    }
}
