//! Built-in skill database
//!
//! Lookups hand out owned clones. Callers can mutate what they get back
//! without touching the database.

use crate::element::ElementalType::{self, *};
use crate::skill::{
    Ailment, Skill,
    SkillCategory::{self, *},
    SkillEffect, SkillTarget, Stat,
};

#[allow(clippy::too_many_arguments)]
fn skill(
    id: &str,
    name: &str,
    element: ElementalType,
    category: SkillCategory,
    power: u32,
    accuracy: u32,
    energy: u32,
    cooldown: u32,
) -> Skill {
    Skill::new(id, name, element, category)
        .with_power(power)
        .with_accuracy(accuracy)
        .with_energy(energy)
        .with_cooldown(cooldown)
}

fn damage(value: u32) -> SkillEffect {
    SkillEffect::Damage { value: Some(value) }
}

fn status(ailment: Ailment, chance: u8) -> SkillEffect {
    SkillEffect::Status {
        ailment,
        chance: Some(chance),
        duration: None,
    }
}

fn buff(stat: Stat, value: i32, duration: u32) -> SkillEffect {
    SkillEffect::Buff {
        stat,
        value,
        duration: Some(duration),
    }
}

fn debuff(stat: Stat, value: i32, duration: u32, chance: Option<u8>) -> SkillEffect {
    SkillEffect::Debuff {
        stat,
        value,
        duration: Some(duration),
        chance,
    }
}

/// Every skill template the game knows about
pub fn skill_database() -> Vec<Skill> {
    vec![
        // Fire
        skill("ember", "Ember", Fire, Special, 40, 100, 1, 0)
            .with_effect(damage(40))
            .with_effect(status(Ailment::Burn, 10)),
        skill("flamethrower", "Flamethrower", Fire, Special, 90, 95, 3, 2)
            .with_effect(damage(90))
            .with_effect(status(Ailment::Burn, 30)),
        skill("inferno", "Inferno", Fire, Ultimate, 150, 85, 5, 5)
            .with_effect(damage(150))
            .with_effect(status(Ailment::Burn, 100)),
        // Water
        skill("water_gun", "Water Gun", Water, Special, 40, 100, 1, 0).with_effect(damage(40)),
        skill("hydro_pump", "Hydro Pump", Water, Special, 110, 80, 4, 3)
            .with_effect(damage(110)),
        skill("aqua_shield", "Aqua Shield", Water, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(SkillEffect::Shield {
                value: 50,
                duration: Some(3),
            }),
        // Electric
        skill("thunder_shock", "Thunder Shock", Electric, Special, 40, 100, 1, 0)
            .with_effect(damage(40))
            .with_effect(status(Ailment::Paralyze, 20)),
        skill("thunderbolt", "Thunderbolt", Electric, Special, 90, 95, 3, 2)
            .with_effect(damage(90))
            .with_effect(status(Ailment::Paralyze, 30)),
        skill("thunder", "Thunder", Electric, Ultimate, 120, 70, 5, 4)
            .with_effect(damage(120))
            .with_effect(status(Ailment::Paralyze, 50)),
        // Grass
        skill("vine_whip", "Vine Whip", Grass, Physical, 45, 100, 1, 0).with_effect(damage(45)),
        skill("synthesis", "Synthesis", Grass, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(SkillEffect::Heal { value: 50 }),
        skill("solar_beam", "Solar Beam", Grass, Ultimate, 120, 100, 5, 4)
            .with_effect(damage(120)),
        // Heals carry no duration, so only the poison half of the drain survives
        skill("leech_seed", "Leech Seed", Grass, Status, 0, 90, 2, 2).with_effect(
            SkillEffect::Status {
                ailment: Ailment::Poison,
                chance: Some(100),
                duration: Some(3),
            },
        ),
        // Normal
        skill("tackle", "Tackle", Normal, Physical, 30, 100, 1, 0).with_effect(damage(30)),
        skill("quick_attack", "Quick Attack", Normal, Physical, 40, 100, 2, 1)
            .with_effect(damage(40))
            .with_effect(buff(Stat::Spd, 100, 1)),
        skill("hyper_beam", "Hyper Beam", Normal, Ultimate, 150, 90, 5, 5)
            .with_effect(damage(150)),
        // Fighting
        skill("karate_chop", "Karate Chop", Fighting, Physical, 50, 100, 2, 0)
            .with_effect(damage(50)),
        skill("bulk_up", "Bulk Up", Fighting, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(buff(Stat::Atk, 30, 3))
            .with_effect(buff(Stat::Def, 30, 3)),
        skill("close_combat", "Close Combat", Fighting, Ultimate, 120, 100, 4, 3)
            .with_effect(damage(120))
            .with_effect(debuff(Stat::Def, 20, 2, None)),
        // Flying
        skill("gust", "Gust", Flying, Special, 40, 100, 1, 0).with_effect(damage(40)),
        skill("air_slash", "Air Slash", Flying, Special, 75, 95, 3, 2)
            .with_effect(damage(75))
            .with_effect(debuff(Stat::Spd, 50, 1, Some(30))),
        skill("hurricane", "Hurricane", Flying, Ultimate, 110, 70, 5, 4)
            .with_effect(damage(110))
            .with_effect(status(Ailment::Confusion, 30)),
        // Poison
        skill("poison_sting", "Poison Sting", Poison, Physical, 15, 100, 1, 0)
            .with_effect(damage(15))
            .with_effect(status(Ailment::Poison, 30)),
        skill("toxic", "Toxic", Poison, Status, 0, 90, 2, 3).with_effect(SkillEffect::Status {
            ailment: Ailment::Poison,
            chance: Some(100),
            duration: Some(5),
        }),
        skill("sludge_bomb", "Sludge Bomb", Poison, Special, 90, 100, 3, 2)
            .with_effect(damage(90))
            .with_effect(status(Ailment::Poison, 30)),
        // Ground
        skill("mud_slap", "Mud Slap", Ground, Special, 20, 100, 1, 0)
            .with_effect(damage(20))
            .with_effect(debuff(Stat::Accuracy, 10, 3, None)),
        skill("earthquake", "Earthquake", Ground, Physical, 100, 100, 4, 3)
            .with_target(SkillTarget::All)
            .with_effect(damage(100)),
        skill("fissure", "Fissure", Ground, Ultimate, 200, 30, 5, 5).with_effect(damage(200)),
        // Rock
        skill("rock_throw", "Rock Throw", Rock, Physical, 50, 90, 2, 0).with_effect(damage(50)),
        // Lingering entry damage has no effect form; the skill is a no-op in battle
        skill("stealth_rock", "Stealth Rock", Rock, Status, 0, 100, 2, 4)
            .with_target(SkillTarget::All),
        skill("stone_edge", "Stone Edge", Rock, Physical, 100, 80, 4, 3)
            .with_effect(damage(100)),
        // Bug
        skill("bug_bite", "Bug Bite", Bug, Physical, 60, 100, 2, 0).with_effect(damage(60)),
        skill("string_shot", "String Shot", Bug, Status, 0, 95, 1, 2)
            .with_effect(debuff(Stat::Spd, 40, 3, None)),
        skill("megahorn", "Megahorn", Bug, Physical, 120, 85, 4, 3).with_effect(damage(120)),
        // Ghost
        skill("lick", "Lick", Ghost, Physical, 30, 100, 1, 0)
            .with_effect(damage(30))
            .with_effect(status(Ailment::Paralyze, 30)),
        skill("shadow_ball", "Shadow Ball", Ghost, Special, 80, 100, 3, 2)
            .with_effect(damage(80))
            .with_effect(debuff(Stat::Def, 20, 2, Some(20))),
        skill("phantom_force", "Phantom Force", Ghost, Physical, 90, 100, 4, 3)
            .with_effect(damage(90))
            .with_effect(SkillEffect::Shield {
                value: 100,
                duration: Some(1),
            }),
        // Steel. Buffs cannot be chance-gated, so the occasional attack boosts
        // of Metal Claw and Meteor Mash are left out.
        skill("metal_claw", "Metal Claw", Steel, Physical, 50, 95, 2, 0).with_effect(damage(50)),
        skill("iron_defense", "Iron Defense", Steel, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(buff(Stat::Def, 50, 3)),
        skill("meteor_mash", "Meteor Mash", Steel, Physical, 90, 90, 4, 3)
            .with_effect(damage(90)),
        // Psychic
        skill("confusion", "Confusion", Psychic, Special, 50, 100, 2, 0)
            .with_effect(damage(50))
            .with_effect(status(Ailment::Confusion, 10)),
        skill("calm_mind", "Calm Mind", Psychic, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(buff(Stat::Atk, 20, 3))
            .with_effect(buff(Stat::Def, 20, 3)),
        skill("psychic", "Psychic", Psychic, Special, 90, 100, 3, 2)
            .with_effect(damage(90))
            .with_effect(debuff(Stat::Def, 10, 2, Some(10))),
        // Ice
        skill("powder_snow", "Powder Snow", Ice, Special, 40, 100, 1, 0)
            .with_effect(damage(40))
            .with_effect(status(Ailment::Freeze, 10)),
        skill("ice_beam", "Ice Beam", Ice, Special, 90, 100, 3, 2)
            .with_effect(damage(90))
            .with_effect(status(Ailment::Freeze, 10)),
        skill("blizzard", "Blizzard", Ice, Ultimate, 110, 70, 5, 4)
            .with_target(SkillTarget::All)
            .with_effect(damage(110))
            .with_effect(status(Ailment::Freeze, 10)),
        // Dragon
        skill("dragon_rage", "Dragon Rage", Dragon, Special, 40, 100, 2, 0)
            .with_effect(damage(40)),
        skill("dragon_dance", "Dragon Dance", Dragon, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(buff(Stat::Atk, 30, 3))
            .with_effect(buff(Stat::Spd, 30, 3)),
        skill("outrage", "Outrage", Dragon, Physical, 120, 100, 4, 3)
            .with_effect(damage(120))
            .with_effect(SkillEffect::Status {
                ailment: Ailment::Confusion,
                chance: Some(100),
                duration: Some(2),
            }),
        // Dark
        skill("bite", "Bite", Dark, Physical, 60, 100, 2, 0)
            .with_effect(damage(60))
            .with_effect(debuff(Stat::Spd, 50, 1, Some(30))),
        skill("nasty_plot", "Nasty Plot", Dark, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(buff(Stat::Atk, 50, 3)),
        skill("dark_pulse", "Dark Pulse", Dark, Special, 80, 100, 3, 2)
            .with_effect(damage(80))
            .with_effect(debuff(Stat::Spd, 50, 1, Some(20))),
        // Fairy
        skill("fairy_wind", "Fairy Wind", Fairy, Special, 40, 100, 1, 0).with_effect(damage(40)),
        skill("moonlight", "Moonlight", Fairy, Status, 0, 100, 2, 3)
            .with_target(SkillTarget::User)
            .with_effect(SkillEffect::Heal { value: 50 }),
        skill("moonblast", "Moonblast", Fairy, Special, 95, 100, 4, 3)
            .with_effect(damage(95))
            .with_effect(debuff(Stat::Atk, 30, 2, Some(30))),
    ]
}

/// Look up a skill template by id
pub fn skill_by_id(id: &str) -> Option<Skill> {
    skill_database().into_iter().find(|s| s.id == id)
}

/// All skills of one element
pub fn skills_by_element(element: ElementalType) -> Vec<Skill> {
    skill_database()
        .into_iter()
        .filter(|s| s.element == element)
        .collect()
}
