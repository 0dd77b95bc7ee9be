//! Combatant state during battle

use pokecard_cards::{Ailment, Card, CardKind, ElementalType, Skill, SkillEffect};
use serde::{Deserialize, Serialize};

use super::side::Side;
use super::stats::StatModifiers;

/// A timed instance of a skill effect attached to a combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    /// Side whose combatant applied the effect
    pub source: Side,
    /// Side whose combatant carries the effect
    pub target: Side,
    pub effect: SkillEffect,
    /// Decremented once per tick; removed at 0
    pub turns_remaining: u32,
    /// Name of the skill that applied it, for logging
    pub skill_name: String,
}

impl ActiveEffect {
    pub fn ailment(&self) -> Option<Ailment> {
        self.effect.ailment()
    }
}

/// Kind of transient animation marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimKind {
    Attack,
    Hit,
    Heal,
}

/// Transient animation flag raised on a combatant.
///
/// Cleared by a deferred task only if `ts` and `kind` still match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimMarker {
    pub kind: AnimKind,
    pub ts: u64,
    pub element: Option<ElementalType>,
}

/// A creature in battle (changes as the battle progresses)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattlePokemon {
    // === Identity ===
    /// Catalog id of the card
    pub id: String,
    /// Unique id of the owned copy
    pub uid: String,
    pub name: String,

    // === HP ===
    pub hp: u32,
    pub max_hp: u32,

    // === Stats ===
    pub atk: i32,
    pub def: i32,
    pub spd: i32,
    pub stat_modifiers: StatModifiers,

    // === Energy ===
    pub energy: u32,
    pub max_energy: u32,

    // === Types ===
    pub primary_type: ElementalType,
    pub types: Vec<ElementalType>,

    // === Effects ===
    pub active_effects: Vec<ActiveEffect>,
    /// Flat buffer consumed before HP
    pub shield: u32,

    /// Private copies of the card's skills
    pub skills: Vec<Skill>,

    pub anim: Option<AnimMarker>,
}

impl BattlePokemon {
    /// Create a combatant with the given stats and a basic Tackle
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        primary_type: ElementalType,
        max_hp: u32,
        atk: i32,
        def: i32,
        spd: i32,
    ) -> Self {
        let id = id.into();
        Self {
            uid: id.clone(),
            id,
            name: name.into(),
            hp: max_hp,
            max_hp,
            atk,
            def,
            spd,
            stat_modifiers: StatModifiers::new(),
            energy: 0,
            max_energy: 0,
            primary_type,
            types: vec![primary_type],
            active_effects: Vec::new(),
            shield: 0,
            skills: vec![Skill::tackle()],
            anim: None,
        }
    }

    /// Snapshot a creature card into a fresh combatant.
    ///
    /// Returns `None` for skill and item cards.
    pub fn from_card(card: &Card) -> Option<Self> {
        let CardKind::Creature(creature) = &card.kind else {
            return None;
        };

        let skills = if creature.skills.is_empty() {
            vec![Skill::tackle()]
        } else {
            creature.skills.clone()
        };

        let types = if creature.types.is_empty() {
            vec![creature.primary_type]
        } else {
            creature.types.clone()
        };

        Some(Self {
            id: card.id.clone(),
            uid: card.uid.clone(),
            name: card.name.clone(),
            hp: creature.hp,
            max_hp: creature.hp,
            atk: creature.atk,
            def: creature.def,
            spd: creature.spd,
            stat_modifiers: StatModifiers::new(),
            energy: creature.energy,
            max_energy: creature.energy,
            primary_type: creature.primary_type,
            types,
            active_effects: Vec::new(),
            shield: 0,
            skills,
            anim: None,
        })
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self
    }

    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Remove HP, floored at 0. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restore HP, capped at max. Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.hp - before
    }

    /// HP as a percentage of max
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        self.hp * 100 / self.max_hp
    }

    /// Attack including modifiers
    pub fn effective_atk(&self) -> i32 {
        self.atk + self.stat_modifiers.atk
    }

    /// Defense including modifiers, never below 1
    pub fn effective_def(&self) -> i32 {
        (self.def + self.stat_modifiers.def).max(1)
    }

    /// Check if carrying a given ailment
    pub fn has_ailment(&self, ailment: Ailment) -> bool {
        self.active_effects
            .iter()
            .any(|e| e.ailment() == Some(ailment))
    }

    /// Ailments currently attached
    pub fn ailments(&self) -> Vec<Ailment> {
        self.active_effects
            .iter()
            .filter_map(ActiveEffect::ailment)
            .collect()
    }

    /// Find a skill by id or name
    pub fn skill(&self, key: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.id == key || s.name == key)
    }

    pub fn skill_mut(&mut self, key: &str) -> Option<&mut Skill> {
        self.skills
            .iter_mut()
            .find(|s| s.id == key || s.name == key)
    }

    /// Count every skill's cooldown down by one
    pub fn tick_cooldowns(&mut self) {
        for skill in &mut self.skills {
            skill.tick_cooldown();
        }
    }
}
