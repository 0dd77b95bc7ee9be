//! Skills and the effects they carry

use serde::{Deserialize, Serialize};

use crate::CardError;
use crate::element::ElementalType;

/// Stats a buff or debuff can modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    Atk,
    Def,
    Spd,
    Accuracy,
    Evasion,
}

impl Stat {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "atk" => Some(Stat::Atk),
            "def" => Some(Stat::Def),
            "spd" => Some(Stat::Spd),
            "accuracy" => Some(Stat::Accuracy),
            "evasion" => Some(Stat::Evasion),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "atk",
            Stat::Def => "def",
            Stat::Spd => "spd",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasion",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// Status ailments that impair a creature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ailment {
    Burn,
    Freeze,
    Paralyze,
    Poison,
    Sleep,
    Confusion,
}

impl Ailment {
    pub fn parse(s: &str) -> Result<Self, CardError> {
        match s {
            "burn" => Ok(Ailment::Burn),
            "freeze" => Ok(Ailment::Freeze),
            "paralyze" => Ok(Ailment::Paralyze),
            "poison" => Ok(Ailment::Poison),
            "sleep" => Ok(Ailment::Sleep),
            "confusion" => Ok(Ailment::Confusion),
            _ => Err(CardError::UnknownAilment(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ailment::Burn => "burn",
            Ailment::Freeze => "freeze",
            Ailment::Paralyze => "paralyze",
            Ailment::Poison => "poison",
            Ailment::Sleep => "sleep",
            Ailment::Confusion => "confusion",
        }
    }

    /// Whether this ailment can stop the creature from acting
    pub fn prevents_action(&self) -> bool {
        matches!(self, Ailment::Freeze | Ailment::Sleep | Ailment::Paralyze)
    }
}

impl std::fmt::Display for Ailment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Physical,
    Special,
    Status,
    Ultimate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillTarget {
    Single,
    All,
    #[serde(rename = "self")]
    User,
    Team,
}

/// One consequence of using a skill.
///
/// A skill's effects resolve in list order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SkillEffect {
    /// Hit the opponent. An explicit value overrides the skill's power.
    Damage {
        #[serde(default)]
        value: Option<u32>,
    },
    /// Restore the user's HP
    Heal { value: u32 },
    /// Raise one of the user's stats
    Buff {
        stat: Stat,
        value: i32,
        #[serde(default)]
        duration: Option<u32>,
    },
    /// Lower one of the opponent's stats
    Debuff {
        stat: Stat,
        value: i32,
        #[serde(default)]
        duration: Option<u32>,
        #[serde(default)]
        chance: Option<u8>,
    },
    /// Inflict an ailment on the opponent
    Status {
        ailment: Ailment,
        #[serde(default)]
        chance: Option<u8>,
        #[serde(default)]
        duration: Option<u32>,
    },
    /// Add to the user's shield pool
    Shield {
        value: u32,
        #[serde(default)]
        duration: Option<u32>,
    },
}

impl SkillEffect {
    /// Remaining-turn count for a timed instance of this effect, if it has one
    pub fn duration(&self) -> Option<u32> {
        match self {
            SkillEffect::Buff { duration, .. }
            | SkillEffect::Debuff { duration, .. }
            | SkillEffect::Status { duration, .. }
            | SkillEffect::Shield { duration, .. } => *duration,
            SkillEffect::Damage { .. } | SkillEffect::Heal { .. } => None,
        }
    }

    /// The ailment carried by a status effect
    pub fn ailment(&self) -> Option<Ailment> {
        match self {
            SkillEffect::Status { ailment, .. } => Some(*ailment),
            _ => None,
        }
    }

    pub fn is_damage(&self) -> bool {
        matches!(self, SkillEffect::Damage { .. })
    }
}

/// A skill template.
///
/// Creatures hold their own clones, so runtime counters such as
/// `current_cooldown` never leak back into the database entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub element: ElementalType,
    pub category: SkillCategory,
    pub power: u32,
    pub accuracy: u32,
    pub energy: u32,
    pub cooldown: u32,
    #[serde(default)]
    pub current_cooldown: u32,
    pub target: SkillTarget,
    pub effects: Vec<SkillEffect>,
}

impl Skill {
    /// Create a single-target skill with no effects, full accuracy, and no cooldown
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        element: ElementalType,
        category: SkillCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            element,
            category,
            power: 0,
            accuracy: 100,
            energy: 0,
            cooldown: 0,
            current_cooldown: 0,
            target: SkillTarget::Single,
            effects: Vec::new(),
        }
    }

    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    pub fn with_energy(mut self, energy: u32) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_target(mut self, target: SkillTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// A plain damaging skill: one damage effect at the given power
    pub fn strike(
        id: impl Into<String>,
        name: impl Into<String>,
        element: ElementalType,
        power: u32,
        energy: u32,
    ) -> Self {
        Self::new(id, name, element, SkillCategory::Physical)
            .with_power(power)
            .with_energy(energy)
            .with_effect(SkillEffect::Damage { value: Some(power) })
    }

    /// The basic attack every creature falls back to
    pub fn tackle() -> Self {
        Self::strike("tackle", "Tackle", ElementalType::Normal, 20, 1)
    }

    /// Whether the skill's cooldown has elapsed
    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Whether any effect deals damage
    pub fn deals_damage(&self) -> bool {
        self.effects.iter().any(SkillEffect::is_damage)
    }

    /// Start the cooldown after use
    pub fn trigger_cooldown(&mut self) {
        self.current_cooldown = self.cooldown;
    }

    /// Tick the cooldown down by one turn
    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_parse() {
        assert_eq!(Stat::parse("atk"), Some(Stat::Atk));
        assert_eq!(Stat::parse("evasion"), Some(Stat::Evasion));
        assert_eq!(Stat::parse("spe"), None);
        assert_eq!(Stat::Def.to_string(), "DEF");
    }

    #[test]
    fn test_ailment_parse() {
        assert_eq!(Ailment::parse("burn").unwrap(), Ailment::Burn);
        assert!(matches!(
            Ailment::parse("frostbite"),
            Err(CardError::UnknownAilment(_))
        ));
        assert!(Ailment::Sleep.prevents_action());
        assert!(!Ailment::Burn.prevents_action());
    }

    #[test]
    fn test_effect_tagged_json() {
        let json = r#"{"type":"status","ailment":"burn","chance":30}"#;
        let effect: SkillEffect = serde_json::from_str(json).unwrap();
        assert_eq!(
            effect,
            SkillEffect::Status {
                ailment: Ailment::Burn,
                chance: Some(30),
                duration: None
            }
        );

        let json = r#"{"type":"damage"}"#;
        let effect: SkillEffect = serde_json::from_str(json).unwrap();
        assert_eq!(effect, SkillEffect::Damage { value: None });
    }

    #[test]
    fn test_self_target_serde_name() {
        let json = serde_json::to_string(&SkillTarget::User).unwrap();
        assert_eq!(json, "\"self\"");
    }

    #[test]
    fn test_cooldown_cycle() {
        let mut skill = Skill::strike("x", "X", ElementalType::Fire, 50, 2).with_cooldown(2);
        assert!(skill.is_ready());
        skill.trigger_cooldown();
        assert!(!skill.is_ready());
        skill.tick_cooldown();
        skill.tick_cooldown();
        assert!(skill.is_ready());
        skill.tick_cooldown();
        assert_eq!(skill.current_cooldown, 0);
    }

    #[test]
    fn test_clone_does_not_share_state() {
        let template = Skill::tackle().with_cooldown(3);
        let mut copy = template.clone();
        copy.trigger_cooldown();
        assert_eq!(template.current_cooldown, 0);
        assert_eq!(copy.current_cooldown, 3);
    }

    #[test]
    fn test_tackle_deals_damage() {
        let tackle = Skill::tackle();
        assert!(tackle.deals_damage());
        assert_eq!(tackle.energy, 1);
        assert_eq!(tackle.element, ElementalType::Normal);
    }
}
