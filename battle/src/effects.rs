//! Status-effect engine
//!
//! Timed effects live on the combatant that carries them. Buffs, debuffs,
//! and shields take effect the moment they are applied and are reverted when
//! they expire. Ailments act once per tick.

use pokecard_cards::{Ailment, SkillEffect, Stat};
use rand::Rng;

use crate::types::{ActiveEffect, BattlePokemon, LogKind, Side};

const BURN_FRACTION: f64 = 0.0625;
const POISON_FRACTION: f64 = 0.125;
const CONFUSION_FRACTION: f64 = 0.1;
const FREEZE_CURE_CHANCE: f64 = 0.2;
const SLEEP_WAKE_CHANCE: f64 = 0.33;
const CONFUSION_HIT_CHANCE: f64 = 0.33;
const PARALYSIS_SKIP_CHANCE: f64 = 0.25;

fn fraction_of(max_hp: u32, fraction: f64) -> u32 {
    (f64::from(max_hp) * fraction).floor() as u32
}

/// Speed penalty a paralyzed combatant carries
pub fn paralysis_penalty(spd: i32) -> i32 {
    -((f64::from(spd) * 0.5).floor() as i32)
}

/// Roll a percentage chance. `None` always succeeds.
fn roll_chance<R: Rng + ?Sized>(chance: Option<u8>, rng: &mut R) -> bool {
    let chance = f64::from(chance.unwrap_or(100));
    rng.gen_range(0.0..100.0) < chance
}

/// Attach one skill effect to `target`.
///
/// Returns the timed instance that was recorded, if any. Damage and heal
/// effects are resolved elsewhere and never produce one.
pub fn apply_effect<R: Rng + ?Sized>(
    effect: &SkillEffect,
    skill_name: &str,
    source: Side,
    target_side: Side,
    target: &mut BattlePokemon,
    default_duration: u32,
    rng: &mut R,
) -> Option<ActiveEffect> {
    let record = |turns: u32| ActiveEffect {
        source,
        target: target_side,
        effect: effect.clone(),
        turns_remaining: turns,
        skill_name: skill_name.to_string(),
    };

    let active = match effect {
        SkillEffect::Damage { .. } | SkillEffect::Heal { .. } => return None,

        SkillEffect::Status {
            ailment,
            chance,
            duration,
        } => {
            if !roll_chance(*chance, rng) {
                return None;
            }
            let turns = duration.unwrap_or(default_duration);

            // Reapplying an ailment refreshes it instead of stacking
            if let Some(existing) = target
                .active_effects
                .iter_mut()
                .find(|e| e.ailment() == Some(*ailment))
            {
                existing.turns_remaining = existing.turns_remaining.max(turns);
                return Some(existing.clone());
            }
            record(turns)
        }

        SkillEffect::Buff {
            stat,
            value,
            duration,
        } => {
            target.stat_modifiers.add(*stat, *value);
            record((*duration)?)
        }

        SkillEffect::Debuff {
            stat,
            value,
            duration,
            chance,
        } => {
            if !roll_chance(*chance, rng) {
                return None;
            }
            target.stat_modifiers.add(*stat, -*value);
            record((*duration)?)
        }

        SkillEffect::Shield { value, duration } => {
            target.shield += value;
            record((*duration)?)
        }
    };

    target.active_effects.push(active.clone());
    Some(active)
}

/// Something that happened during a status tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Burned { damage: u32 },
    Poisoned { damage: u32 },
    HurtInConfusion { damage: u32 },
    Thawed,
    WokeUp,
    /// A timed effect ran out and was reverted
    Expired { skill_name: String, effect: SkillEffect },
}

impl TickEvent {
    /// Log line for this event
    pub fn describe(&self, name: &str) -> (LogKind, String) {
        match self {
            TickEvent::Burned { damage } => {
                (LogKind::Status, format!("{name} is hurt by its burn! (-{damage} HP)"))
            }
            TickEvent::Poisoned { damage } => {
                (LogKind::Status, format!("{name} is hurt by poison! (-{damage} HP)"))
            }
            TickEvent::HurtInConfusion { damage } => (
                LogKind::Status,
                format!("{name} hurt itself in its confusion! (-{damage} HP)"),
            ),
            TickEvent::Thawed => (LogKind::Status, format!("{name} thawed out!")),
            TickEvent::WokeUp => (LogKind::Status, format!("{name} woke up!")),
            TickEvent::Expired { skill_name, effect } => match effect {
                SkillEffect::Status { ailment, .. } => {
                    (LogKind::Status, format!("{name} recovered from {ailment}."))
                }
                SkillEffect::Buff { stat, .. } => (
                    LogKind::Info,
                    format!("{name}'s {stat} boost from {skill_name} wore off."),
                ),
                SkillEffect::Debuff { stat, .. } => (
                    LogKind::Info,
                    format!("{name}'s {stat} recovered from {skill_name}."),
                ),
                SkillEffect::Shield { .. } => {
                    (LogKind::Info, format!("{name}'s shield faded."))
                }
                SkillEffect::Damage { .. } | SkillEffect::Heal { .. } => {
                    (LogKind::Info, format!("{skill_name} wore off."))
                }
            },
        }
    }
}

/// Run one per-turn tick on a combatant.
///
/// Ailments act first, then every timed effect counts down by one and
/// anything that reaches zero is removed and reverted. Skill cooldowns tick
/// down here as well.
pub fn process_status_effects<R: Rng + ?Sized>(
    pokemon: &mut BattlePokemon,
    rng: &mut R,
) -> Vec<TickEvent> {
    let mut events = Vec::new();

    for i in 0..pokemon.active_effects.len() {
        let Some(ailment) = pokemon.active_effects[i].ailment() else {
            continue;
        };
        match ailment {
            Ailment::Burn => {
                let damage = pokemon.take_damage(fraction_of(pokemon.max_hp, BURN_FRACTION));
                events.push(TickEvent::Burned { damage });
            }
            Ailment::Poison => {
                let damage = pokemon.take_damage(fraction_of(pokemon.max_hp, POISON_FRACTION));
                events.push(TickEvent::Poisoned { damage });
            }
            Ailment::Freeze => {
                if rng.gen_bool(FREEZE_CURE_CHANCE) {
                    pokemon.active_effects[i].turns_remaining = 0;
                    events.push(TickEvent::Thawed);
                }
            }
            Ailment::Paralyze => {
                pokemon.stat_modifiers.spd = paralysis_penalty(pokemon.spd);
            }
            Ailment::Sleep => {
                if rng.gen_bool(SLEEP_WAKE_CHANCE) {
                    pokemon.active_effects[i].turns_remaining = 0;
                    events.push(TickEvent::WokeUp);
                }
            }
            Ailment::Confusion => {
                if rng.gen_bool(CONFUSION_HIT_CHANCE) {
                    let damage =
                        pokemon.take_damage(fraction_of(pokemon.max_hp, CONFUSION_FRACTION));
                    events.push(TickEvent::HurtInConfusion { damage });
                }
            }
        }
    }

    for effect in &mut pokemon.active_effects {
        effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
    }

    let (expired, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut pokemon.active_effects)
        .into_iter()
        .partition(|e| e.turns_remaining == 0);
    pokemon.active_effects = remaining;

    for effect in expired {
        revert(pokemon, &effect.effect);
        events.push(TickEvent::Expired {
            skill_name: effect.skill_name,
            effect: effect.effect,
        });
    }

    pokemon.tick_cooldowns();
    events
}

/// Undo the standing part of an expired effect
fn revert(pokemon: &mut BattlePokemon, effect: &SkillEffect) {
    match effect {
        SkillEffect::Buff { stat, value, .. } => pokemon.stat_modifiers.add(*stat, -*value),
        SkillEffect::Debuff { stat, value, .. } => pokemon.stat_modifiers.add(*stat, *value),
        SkillEffect::Shield { .. } => pokemon.shield = 0,
        SkillEffect::Status {
            ailment: Ailment::Paralyze,
            ..
        } => clear_paralysis_penalty(pokemon),
        SkillEffect::Status { .. } | SkillEffect::Damage { .. } | SkillEffect::Heal { .. } => {}
    }
}

/// Once paralysis is gone, speed goes back to whatever the live timed
/// buffs and debuffs add up to
fn clear_paralysis_penalty(pokemon: &mut BattlePokemon) {
    if pokemon.has_ailment(Ailment::Paralyze) {
        return;
    }
    let spd = timed_modifier(pokemon, Stat::Spd);
    pokemon.stat_modifiers.set(Stat::Spd, spd);
}

/// Net modifier the live timed buffs and debuffs put on `stat`
fn timed_modifier(pokemon: &BattlePokemon, stat: Stat) -> i32 {
    pokemon
        .active_effects
        .iter()
        .map(|active| match active.effect {
            SkillEffect::Buff { stat: s, value, .. } if s == stat => value,
            SkillEffect::Debuff { stat: s, value, .. } if s == stat => -value,
            _ => 0,
        })
        .sum()
}

/// Strip every ailment. Returns how many were removed.
pub fn cleanse(pokemon: &mut BattlePokemon) -> usize {
    let before = pokemon.active_effects.len();
    let had_paralysis = pokemon.has_ailment(Ailment::Paralyze);
    pokemon.active_effects.retain(|e| e.ailment().is_none());
    if had_paralysis {
        clear_paralysis_penalty(pokemon);
    }
    before - pokemon.active_effects.len()
}

/// Result of the pre-action check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanAttack {
    pub can_attack: bool,
    pub reason: Option<String>,
}

impl CanAttack {
    fn allowed() -> Self {
        Self {
            can_attack: true,
            reason: None,
        }
    }

    fn blocked(reason: String) -> Self {
        Self {
            can_attack: false,
            reason: Some(reason),
        }
    }
}

/// Check whether a combatant may act this turn.
///
/// Freeze and sleep always block. Paralysis blocks on an independent 25%
/// roll per attempt.
pub fn can_attack<R: Rng + ?Sized>(pokemon: &BattlePokemon, rng: &mut R) -> CanAttack {
    if pokemon.has_ailment(Ailment::Freeze) {
        return CanAttack::blocked(format!("{} is frozen solid!", pokemon.name));
    }
    if pokemon.has_ailment(Ailment::Sleep) {
        return CanAttack::blocked(format!("{} is fast asleep!", pokemon.name));
    }
    if pokemon.has_ailment(Ailment::Paralyze) && rng.gen_bool(PARALYSIS_SKIP_CHANCE) {
        return CanAttack::blocked(format!("{} is paralyzed and can't move!", pokemon.name));
    }
    CanAttack::allowed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokecard_cards::{ElementalType, Skill};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mon() -> BattlePokemon {
        BattlePokemon::new("m", "Mon", ElementalType::Normal, 160, 40, 40, 50)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn status(ailment: Ailment, duration: u32) -> SkillEffect {
        SkillEffect::Status {
            ailment,
            chance: None,
            duration: Some(duration),
        }
    }

    fn apply(effect: &SkillEffect, target: &mut BattlePokemon, rng: &mut StdRng) -> Option<ActiveEffect> {
        apply_effect(effect, "Test", Side::Opponent, Side::Player, target, 3, rng)
    }

    #[test]
    fn test_buff_is_net_zero_after_expiry() {
        let mut rng = rng();
        let mut target = mon();
        let buff = SkillEffect::Buff {
            stat: Stat::Atk,
            value: 10,
            duration: Some(3),
        };
        let active = apply(&buff, &mut target, &mut rng).unwrap();
        assert_eq!(active.turns_remaining, 3);
        assert_eq!(target.effective_atk(), 50);

        process_status_effects(&mut target, &mut rng);
        process_status_effects(&mut target, &mut rng);
        assert_eq!(target.stat_modifiers.atk, 10);

        let events = process_status_effects(&mut target, &mut rng);
        assert!(target.active_effects.is_empty());
        assert!(target.stat_modifiers.is_neutral());
        assert!(matches!(events[0], TickEvent::Expired { .. }));
    }

    #[test]
    fn test_debuff_is_net_zero_after_expiry() {
        let mut rng = rng();
        let mut target = mon();
        let debuff = SkillEffect::Debuff {
            stat: Stat::Def,
            value: 20,
            duration: Some(2),
            chance: None,
        };
        apply(&debuff, &mut target, &mut rng).unwrap();
        assert_eq!(target.stat_modifiers.def, -20);

        process_status_effects(&mut target, &mut rng);
        process_status_effects(&mut target, &mut rng);
        assert!(target.stat_modifiers.is_neutral());
    }

    #[test]
    fn test_permanent_buff_records_nothing() {
        let mut rng = rng();
        let mut target = mon();
        let buff = SkillEffect::Buff {
            stat: Stat::Spd,
            value: 5,
            duration: None,
        };
        assert!(apply(&buff, &mut target, &mut rng).is_none());
        assert_eq!(target.stat_modifiers.spd, 5);
        assert!(target.active_effects.is_empty());
    }

    #[test]
    fn test_debuff_chance_zero_never_lands() {
        let mut rng = rng();
        let mut target = mon();
        let debuff = SkillEffect::Debuff {
            stat: Stat::Spd,
            value: 50,
            duration: Some(1),
            chance: Some(0),
        };
        for _ in 0..50 {
            assert!(apply(&debuff, &mut target, &mut rng).is_none());
        }
        assert!(target.stat_modifiers.is_neutral());
    }

    #[test]
    fn test_shield_expiry_zeroes_pool() {
        let mut rng = rng();
        let mut target = mon();
        let shield = SkillEffect::Shield {
            value: 30,
            duration: Some(1),
        };
        apply(&shield, &mut target, &mut rng).unwrap();
        assert_eq!(target.shield, 30);
        process_status_effects(&mut target, &mut rng);
        assert_eq!(target.shield, 0);
    }

    #[test]
    fn test_status_chance_gate() {
        let mut rng = rng();
        let mut target = mon();
        let never = SkillEffect::Status {
            ailment: Ailment::Burn,
            chance: Some(0),
            duration: None,
        };
        assert!(apply(&never, &mut target, &mut rng).is_none());

        let always = SkillEffect::Status {
            ailment: Ailment::Burn,
            chance: None,
            duration: None,
        };
        let active = apply(&always, &mut target, &mut rng).unwrap();
        assert_eq!(active.turns_remaining, 3);
        assert!(target.has_ailment(Ailment::Burn));
    }

    #[test]
    fn test_reapplying_refreshes() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Poison, 2), &mut target, &mut rng);
        apply(&status(Ailment::Poison, 4), &mut target, &mut rng);
        assert_eq!(target.active_effects.len(), 1);
        assert_eq!(target.active_effects[0].turns_remaining, 4);
    }

    #[test]
    fn test_burn_and_poison_ticks() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Burn, 3), &mut target, &mut rng);
        apply(&status(Ailment::Poison, 3), &mut target, &mut rng);

        let events = process_status_effects(&mut target, &mut rng);
        assert!(events.contains(&TickEvent::Burned { damage: 10 }));
        assert!(events.contains(&TickEvent::Poisoned { damage: 20 }));
        assert_eq!(target.hp, 130);
    }

    #[test]
    fn test_paralysis_halves_speed_then_restores() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Paralyze, 2), &mut target, &mut rng);

        process_status_effects(&mut target, &mut rng);
        assert_eq!(target.stat_modifiers.spd, -25);

        process_status_effects(&mut target, &mut rng);
        assert!(!target.has_ailment(Ailment::Paralyze));
        assert_eq!(target.stat_modifiers.spd, 0);
    }

    #[test]
    fn test_paralysis_overlapping_speed_debuff_nets_zero() {
        let mut rng = rng();
        let mut target = mon();
        let debuff = SkillEffect::Debuff {
            stat: Stat::Spd,
            value: 10,
            duration: Some(5),
            chance: None,
        };
        apply(&debuff, &mut target, &mut rng).unwrap();
        apply(&status(Ailment::Paralyze, 2), &mut target, &mut rng);

        process_status_effects(&mut target, &mut rng);
        assert_eq!(target.stat_modifiers.spd, -25);

        // Paralysis wears off while the debuff is still live
        process_status_effects(&mut target, &mut rng);
        assert!(!target.has_ailment(Ailment::Paralyze));
        assert_eq!(target.stat_modifiers.spd, -10);

        for _ in 0..4 {
            process_status_effects(&mut target, &mut rng);
        }
        assert!(target.active_effects.is_empty());
        assert_eq!(target.stat_modifiers.spd, 0);
    }

    #[test]
    fn test_cleansing_paralysis_keeps_speed_buff() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Paralyze, 3), &mut target, &mut rng);
        apply(
            &SkillEffect::Buff {
                stat: Stat::Spd,
                value: 15,
                duration: Some(4),
            },
            &mut target,
            &mut rng,
        );
        process_status_effects(&mut target, &mut rng);
        assert_eq!(target.stat_modifiers.spd, -25);

        cleanse(&mut target);
        assert_eq!(target.stat_modifiers.spd, 15);
    }

    #[test]
    fn test_freeze_and_sleep_block() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Freeze, 3), &mut target, &mut rng);
        let check = can_attack(&target, &mut rng);
        assert!(!check.can_attack);
        assert_eq!(check.reason.as_deref(), Some("Mon is frozen solid!"));

        let mut sleeper = mon();
        apply(&status(Ailment::Sleep, 3), &mut sleeper, &mut rng);
        let check = can_attack(&sleeper, &mut rng);
        assert_eq!(check.reason.as_deref(), Some("Mon is fast asleep!"));

        assert!(can_attack(&mon(), &mut rng).can_attack);
    }

    #[test]
    fn test_paralysis_skip_rate() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut target = mon();
        apply(&status(Ailment::Paralyze, 3), &mut target, &mut rng);

        let blocked = (0..1000)
            .filter(|_| !can_attack(&target, &mut rng).can_attack)
            .count();
        assert!((200..=300).contains(&blocked), "blocked {blocked} of 1000");
    }

    #[test]
    fn test_freeze_eventually_thaws() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Freeze, 1000), &mut target, &mut rng);
        let mut thawed = false;
        for _ in 0..200 {
            if process_status_effects(&mut target, &mut rng).contains(&TickEvent::Thawed) {
                thawed = true;
                break;
            }
        }
        assert!(thawed);
        assert!(!target.has_ailment(Ailment::Freeze));
    }

    #[test]
    fn test_cleanse_removes_only_ailments() {
        let mut rng = rng();
        let mut target = mon();
        apply(&status(Ailment::Paralyze, 3), &mut target, &mut rng);
        process_status_effects(&mut target, &mut rng);
        apply(
            &SkillEffect::Buff {
                stat: Stat::Atk,
                value: 10,
                duration: Some(3),
            },
            &mut target,
            &mut rng,
        );

        assert_eq!(cleanse(&mut target), 1);
        assert_eq!(target.active_effects.len(), 1);
        assert_eq!(target.stat_modifiers.spd, 0);
        assert_eq!(target.stat_modifiers.atk, 10);
    }

    #[test]
    fn test_tick_counts_down_cooldowns() {
        let mut rng = rng();
        let mut target = mon().with_skills(vec![Skill::tackle().with_cooldown(2)]);
        target.skills[0].trigger_cooldown();
        process_status_effects(&mut target, &mut rng);
        assert_eq!(target.skills[0].current_cooldown, 1);
    }

    #[test]
    fn test_describe_events() {
        let (kind, text) = TickEvent::Burned { damage: 4 }.describe("Pikachu");
        assert_eq!(kind, LogKind::Status);
        assert_eq!(text, "Pikachu is hurt by its burn! (-4 HP)");
    }
}
