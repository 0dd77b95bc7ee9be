//! Damage calculation

use pokecard_cards::{Skill, SkillCategory};
use rand::Rng;

use crate::types::{BattlePokemon, effectiveness};

/// Damage never drops below this after shields
pub const MIN_DAMAGE: i64 = 5;

/// A single hit may take at most this fraction of the defender's max HP
pub const MAX_HP_FRACTION: f64 = 0.4;

/// Outcome of one damage roll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageRoll {
    /// HP removed from the defender
    pub damage: u32,
    /// Amount the defender's shield soaked up
    pub absorbed: u32,
    /// Type multiplier used
    pub effectiveness: f32,
    pub critical: bool,
}

/// Largest hit a defender can take
pub fn damage_cap(defender: &BattlePokemon) -> i64 {
    (defender.max_hp as f64 * MAX_HP_FRACTION).floor() as i64
}

/// Critical-hit probability for a skill.
/// Edged and chopping skills crit more often.
pub fn crit_chance(skill_name: &str) -> f64 {
    let name = skill_name.to_lowercase();
    if name.contains("edge") || name.contains("chop") {
        0.125
    } else {
        0.05
    }
}

/// Roll damage for `skill` and apply it to `defender`.
///
/// The defender's shield is drained before HP. `effect_value` overrides the
/// skill's power when the damage effect carries its own value.
pub fn compute_damage<R: Rng + ?Sized>(
    skill: &Skill,
    effect_value: Option<u32>,
    attacker: &BattlePokemon,
    defender: &mut BattlePokemon,
    rng: &mut R,
) -> DamageRoll {
    // 1. Base damage
    let base = f64::from(effect_value.unwrap_or(skill.power));

    // 2. Effective attack, boosted for non-physical skills
    let mut attack = f64::from(attacker.effective_atk());
    if skill.category != SkillCategory::Physical {
        attack *= 1.2;
    }

    // 3. Effective defense (floored at 1)
    let defense = f64::from(defender.effective_def());

    // 4. Type multiplier against the defender's primary type
    let multiplier = effectiveness(skill.element, defender.primary_type);

    // 5. Raw damage
    let mut damage = ((base * 0.4 + (attack - defense) * 0.5) * f64::from(multiplier)).floor() as i64;

    // 6. Shield absorption
    let mut absorbed = 0;
    if damage > 0 {
        absorbed = damage.min(i64::from(defender.shield));
        defender.shield -= absorbed as u32;
        damage -= absorbed;
    }

    // 7. Minimum damage
    damage = damage.max(MIN_DAMAGE);

    // 8. Variance
    let variance: f64 = rng.gen_range(0.85..=1.0);
    damage = (damage as f64 * variance).floor() as i64;

    // 9. Cap
    let cap = damage_cap(defender);
    damage = damage.min(cap);

    // 10. Critical hit, still bounded by the cap
    let critical = rng.gen_bool(crit_chance(&skill.name));
    if critical {
        damage = ((damage as f64 * 1.5).floor() as i64).min(cap);
    }

    // 11. Never zero
    let damage = damage.max(1) as u32;
    defender.take_damage(damage);

    DamageRoll {
        damage,
        absorbed: absorbed as u32,
        effectiveness: multiplier,
        critical,
    }
}
