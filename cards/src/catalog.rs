//! Card catalog generation
//!
//! Creature stats are rolled once when the catalog is built. The catalog
//! then serves as the pool for starter packs, starter decks, and AI decks.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{Card, CardEffect, CardKind, CreatureCard, ItemCard, ItemEffect, Rarity, SkillCard};
use crate::database::skills_by_element;
use crate::element::ElementalType::{self, *};
use crate::skill::{Ailment, Skill, SkillCategory, SkillEffect};

/// A species entry used to build creature cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Species {
    pub number: u32,
    pub name: &'static str,
    pub types: &'static [ElementalType],
}

const fn species(number: u32, name: &'static str, types: &'static [ElementalType]) -> Species {
    Species {
        number,
        name,
        types,
    }
}

/// Built-in species list
pub static SPECIES: &[Species] = &[
    species(1, "bulbasaur", &[Grass, Poison]),
    species(2, "ivysaur", &[Grass, Poison]),
    species(3, "venusaur", &[Grass, Poison]),
    species(4, "charmander", &[Fire]),
    species(5, "charmeleon", &[Fire]),
    species(6, "charizard", &[Fire, Flying]),
    species(7, "squirtle", &[Water]),
    species(8, "wartortle", &[Water]),
    species(9, "blastoise", &[Water]),
    species(10, "caterpie", &[Bug]),
    species(16, "pidgey", &[Normal, Flying]),
    species(19, "rattata", &[Normal]),
    species(23, "ekans", &[Poison]),
    species(25, "pikachu", &[Electric]),
    species(26, "raichu", &[Electric]),
    species(27, "sandshrew", &[Ground]),
    species(35, "clefairy", &[Fairy]),
    species(37, "vulpix", &[Fire]),
    species(43, "oddish", &[Grass, Poison]),
    species(54, "psyduck", &[Water]),
    species(58, "growlithe", &[Fire]),
    species(63, "abra", &[Psychic]),
    species(66, "machop", &[Fighting]),
    species(74, "geodude", &[Rock, Ground]),
    species(81, "magnemite", &[Electric, Steel]),
    species(92, "gastly", &[Ghost, Poison]),
    species(95, "onix", &[Rock, Ground]),
    species(104, "cubone", &[Ground]),
    species(123, "scyther", &[Bug, Flying]),
    species(126, "magmar", &[Fire]),
    species(129, "magikarp", &[Water]),
    species(131, "lapras", &[Water, Ice]),
    species(135, "jolteon", &[Electric]),
    species(138, "omanyte", &[Rock, Water]),
    species(143, "snorlax", &[Normal]),
    species(144, "articuno", &[Ice, Flying]),
    species(145, "zapdos", &[Electric, Flying]),
    species(146, "moltres", &[Fire, Flying]),
    species(147, "dratini", &[Dragon]),
    species(149, "dragonite", &[Dragon, Flying]),
    species(150, "mewtwo", &[Psychic]),
    species(151, "mew", &[Psychic]),
];

/// Rarity tier for a species number
pub fn rarity_for_species(number: u32) -> Rarity {
    if (144..=151).contains(&number) {
        Rarity::Legendary
    } else if number % 3 == 0 && number > 100 {
        Rarity::Epic
    } else if number % 3 == 0 || number > 50 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Base (hp, atk, def, spd) before variance
pub fn base_stats(rarity: Rarity) -> (i32, i32, i32, i32) {
    match rarity {
        Rarity::Common => (40, 30, 25, 35),
        Rarity::Rare => (60, 45, 40, 50),
        Rarity::Epic => (80, 65, 55, 70),
        Rarity::Legendary => (100, 90, 80, 95),
    }
}

/// Skills every creature of this species starts with
pub fn species_skills(types: &[ElementalType]) -> Vec<Skill> {
    let mut skills = vec![Skill::tackle()];

    let signature = if types.contains(&Fire) {
        Some(
            Skill::strike("ember", "Ember", Fire, 30, 2).with_effect(SkillEffect::Status {
                ailment: Ailment::Burn,
                chance: Some(10),
                duration: None,
            }),
        )
    } else if types.contains(&Water) {
        Some(Skill::strike("water_gun", "Water Gun", Water, 30, 2))
    } else if types.contains(&Grass) {
        Some(Skill::strike("vine_whip", "Vine Whip", Grass, 30, 2))
    } else if types.contains(&Electric) {
        Some(
            Skill::strike("thunder_shock", "Thunder Shock", Electric, 30, 2).with_effect(
                SkillEffect::Status {
                    ailment: Ailment::Paralyze,
                    chance: Some(10),
                    duration: None,
                },
            ),
        )
    } else {
        None
    };

    if let Some(mut skill) = signature {
        skill.category = SkillCategory::Special;
        skills.push(skill);
    }
    skills
}

fn creature_card<R: Rng + ?Sized>(species: &Species, rng: &mut R) -> Card {
    let rarity = rarity_for_species(species.number);
    let (hp, atk, def, spd) = base_stats(rarity);
    let mut variance = || rng.gen_range(-5..5);

    let hp = (hp + variance()).max(1) as u32;
    let primary_type = species.types.first().copied().unwrap_or(Normal);

    Card::new(
        format!("pokemon_{}", species.number),
        species.name,
        rarity,
        CardKind::Creature(CreatureCard {
            species: species.number,
            primary_type,
            types: species.types.to_vec(),
            hp,
            atk: atk + variance(),
            def: def + variance(),
            spd: spd + variance(),
            energy: hp.div_ceil(50),
            skills: species_skills(species.types),
        }),
    )
}

/// The four skill cards
pub fn skill_cards() -> Vec<Card> {
    let card = |id: &str, name: &str, rarity, effect, energy| {
        Card::new(
            id,
            name,
            rarity,
            CardKind::Skill(SkillCard {
                effect: Some(effect),
                energy,
                power: None,
                element: None,
            }),
        )
    };

    vec![
        card("skill_heal", "Heal", Rarity::Common, CardEffect::Heal { amount: 30 }, 2),
        card(
            "skill_boost",
            "Attack Boost",
            Rarity::Rare,
            CardEffect::AttackBoost { atk: 10, turns: 3 },
            1,
        ),
        card("skill_shield", "Protect", Rarity::Rare, CardEffect::Shield { amount: 20 }, 2),
        card("skill_cleanse", "Cleanse", Rarity::Epic, CardEffect::Cleanse, 1),
    ]
}

/// The three item cards
pub fn item_cards() -> Vec<Card> {
    let card = |id: &str, name: &str, rarity, effect| {
        Card::new(id, name, rarity, CardKind::Item(ItemCard { effect }))
    };

    vec![
        card("item_potion", "Potion", Rarity::Common, ItemEffect::Heal { amount: 20 }),
        card("item_energy", "Energy Crystal", Rarity::Rare, ItemEffect::Energy { amount: 2 }),
        card("item_revive", "Revive", Rarity::Epic, ItemEffect::Revive { percent: 50 }),
    ]
}

/// Card ids granted to a brand new player
pub const STARTER_PACK: &[&str] = &[
    "pokemon_1",
    "pokemon_4",
    "pokemon_7",
    "pokemon_25",
    "skill_heal",
    "skill_heal",
    "skill_boost",
    "item_potion",
    "item_potion",
    "item_potion",
    "item_energy",
    "item_energy",
];

/// Card ids in the default deck
pub const STARTER_DECK: &[&str] = &[
    "pokemon_1",
    "pokemon_4",
    "pokemon_7",
    "pokemon_25",
    "pokemon_16",
    "pokemon_19",
    "skill_heal",
    "skill_heal",
    "skill_boost",
    "skill_shield",
    "item_potion",
    "item_energy",
];

/// Cards in an AI deck
pub const AI_DECK_SIZE: usize = 12;
const AI_MIN_CREATURES: usize = 4;
const AI_MAX_CREATURES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A computer-controlled opponent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiOpponent {
    pub id: &'static str,
    pub name: &'static str,
    pub level: u32,
    pub difficulty: Difficulty,
}

pub static AI_OPPONENTS: &[AiOpponent] = &[
    AiOpponent {
        id: "ai1",
        name: "Rookie Trainer",
        level: 1,
        difficulty: Difficulty::Easy,
    },
    AiOpponent {
        id: "ai2",
        name: "Ace Trainer",
        level: 5,
        difficulty: Difficulty::Medium,
    },
    AiOpponent {
        id: "ai3",
        name: "Elite Four",
        level: 10,
        difficulty: Difficulty::Hard,
    },
];

/// Look up an AI opponent by id
pub fn ai_opponent(id: &str) -> Option<&'static AiOpponent> {
    AI_OPPONENTS.iter().find(|o| o.id == id)
}

/// Every card the game can hand out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub cards: Vec<Card>,
}

impl Catalog {
    /// Roll creature stats for every built-in species and add the support cards
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut cards: Vec<Card> = SPECIES.iter().map(|s| creature_card(s, rng)).collect();
        cards.extend(skill_cards());
        cards.extend(item_cards());
        Self { cards }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    pub fn find(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    pub fn creatures(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_creature())
    }

    pub fn support(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !c.is_creature())
    }

    /// Owned copies of the given ids, each with its own uid.
    ///
    /// Ids missing from the catalog are skipped.
    pub fn instantiate(&self, ids: &[&str], uid_prefix: &str) -> Vec<Card> {
        ids.iter()
            .enumerate()
            .filter_map(|(n, id)| {
                self.find(id)
                    .map(|card| card.instance(format!("{uid_prefix}{id}#{n}")))
            })
            .collect()
    }

    pub fn starter_pack(&self) -> Vec<Card> {
        self.instantiate(STARTER_PACK, "")
    }

    pub fn starter_deck(&self) -> Vec<Card> {
        self.instantiate(STARTER_DECK, "")
    }

    /// Build a 12-card deck with 4 to 6 distinct creatures.
    ///
    /// Harder opponents teach their creatures extra skills of their
    /// primary type.
    pub fn ai_deck<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> Vec<Card> {
        let creatures: Vec<&Card> = self.creatures().collect();
        let support: Vec<&Card> = self.support().collect();

        let count = rng.gen_range(AI_MIN_CREATURES..=AI_MAX_CREATURES);
        let mut deck: Vec<Card> = creatures
            .choose_multiple(rng, count)
            .map(|c| c.instance(format!("ai_{}", c.id)))
            .collect();

        for card in &mut deck {
            if let CardKind::Creature(creature) = &mut card.kind {
                teach_skills(creature, difficulty);
            }
        }

        let remaining = AI_DECK_SIZE.saturating_sub(deck.len());
        deck.extend(
            support
                .choose_multiple(rng, remaining)
                .enumerate()
                .map(|(n, c)| c.instance(format!("ai_{}#{n}", c.id))),
        );
        deck
    }
}

fn teach_skills(creature: &mut CreatureCard, difficulty: Difficulty) {
    let mut learnable: Vec<Skill> = skills_by_element(creature.primary_type)
        .into_iter()
        .filter(|s| s.deals_damage())
        .filter(|s| !creature.skills.iter().any(|known| known.id == s.id))
        .collect();
    learnable.sort_by_key(|s| (s.energy, s.power));

    let extra = match difficulty {
        Difficulty::Easy => 0,
        Difficulty::Medium => 1,
        Difficulty::Hard => 2,
    };
    creature.skills.extend(learnable.into_iter().take(extra));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn catalog() -> Catalog {
        Catalog::generate(&mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_rarity_for_species() {
        assert_eq!(rarity_for_species(150), Rarity::Legendary);
        assert_eq!(rarity_for_species(144), Rarity::Legendary);
        assert_eq!(rarity_for_species(123), Rarity::Epic);
        assert_eq!(rarity_for_species(9), Rarity::Rare);
        assert_eq!(rarity_for_species(58), Rarity::Rare);
        assert_eq!(rarity_for_species(25), Rarity::Common);
    }

    #[test]
    fn test_creature_stats_within_variance() {
        for card in catalog().creatures() {
            let creature = card.as_creature().unwrap();
            let (hp, atk, def, spd) = base_stats(card.rarity);
            assert!((hp - 5..hp + 5).contains(&(creature.hp as i32)));
            assert!((atk - 5..atk + 5).contains(&creature.atk));
            assert!((def - 5..def + 5).contains(&creature.def));
            assert!((spd - 5..spd + 5).contains(&creature.spd));
            assert_eq!(creature.energy, creature.hp.div_ceil(50));
        }
    }

    #[test]
    fn test_species_skills() {
        let fire = species_skills(&[Fire, Flying]);
        assert_eq!(fire.len(), 2);
        assert_eq!(fire[0].name, "Tackle");
        assert_eq!(fire[1].name, "Ember");
        assert_eq!(fire[1].power, 30);
        assert_eq!(fire[1].energy, 2);

        let rock = species_skills(&[Rock]);
        assert_eq!(rock.len(), 1);
    }

    #[test]
    fn test_starter_pack_contents() {
        let pack = catalog().starter_pack();
        assert_eq!(pack.len(), STARTER_PACK.len());
        assert_eq!(pack.iter().filter(|c| c.is_creature()).count(), 4);

        let uids: HashSet<_> = pack.iter().map(|c| c.uid.as_str()).collect();
        assert_eq!(uids.len(), pack.len());
    }

    #[test]
    fn test_starter_deck_contents() {
        let deck = catalog().starter_deck();
        assert_eq!(deck.len(), 12);
        assert_eq!(deck.iter().filter(|c| c.is_creature()).count(), 6);
        assert_eq!(deck[0].id, "pokemon_1");
    }

    #[test]
    fn test_ai_deck_shape() {
        let catalog = catalog();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..20 {
            let deck = catalog.ai_deck(Difficulty::Easy, &mut rng);
            assert_eq!(deck.len(), AI_DECK_SIZE);

            let creatures: Vec<_> = deck.iter().filter(|c| c.is_creature()).collect();
            assert!((4..=6).contains(&creatures.len()));
            let distinct: HashSet<_> = creatures.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(distinct.len(), creatures.len());
        }
    }

    #[test]
    fn test_hard_ai_learns_more_skills() {
        let mut creature = catalog()
            .find("pokemon_4")
            .and_then(Card::as_creature)
            .cloned()
            .unwrap();
        let before = creature.skills.len();
        teach_skills(&mut creature, Difficulty::Hard);
        assert_eq!(creature.skills.len(), before + 2);
        assert!(creature.skills.iter().skip(before).all(|s| s.element == Fire));
    }

    #[test]
    fn test_ai_roster() {
        assert_eq!(AI_OPPONENTS.len(), 3);
        assert_eq!(ai_opponent("ai1").unwrap().name, "Rookie Trainer");
        assert!(ai_opponent("ai9").is_none());
    }
}
