//! Opponent skill selection

use pokecard_cards::Skill;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::types::BattlePokemon;

/// Pick the opponent's next skill.
///
/// Chooses uniformly among skills that are off cooldown and affordable with
/// `energy`. With nothing usable it falls back to a free Tackle.
pub fn choose_skill<R: Rng + ?Sized>(active: &BattlePokemon, energy: u32, rng: &mut R) -> Skill {
    let usable: Vec<&Skill> = active
        .skills
        .iter()
        .filter(|s| s.is_ready() && s.energy <= energy)
        .collect();

    match usable.choose(rng) {
        Some(skill) => (*skill).clone(),
        None => Skill::tackle().with_energy(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokecard_cards::ElementalType;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mon(skills: Vec<Skill>) -> BattlePokemon {
        BattlePokemon::new("charmander", "charmander", ElementalType::Fire, 40, 30, 25, 35)
            .with_skills(skills)
    }

    #[test]
    fn test_only_affordable_skills() {
        let mut rng = StdRng::seed_from_u64(3);
        let active = mon(vec![
            Skill::strike("ember", "Ember", ElementalType::Fire, 30, 2),
            Skill::strike("inferno", "Inferno", ElementalType::Fire, 90, 5),
        ]);
        for _ in 0..50 {
            assert_eq!(choose_skill(&active, 3, &mut rng).id, "ember");
        }
    }

    #[test]
    fn test_skips_cooling_down() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ember = Skill::strike("ember", "Ember", ElementalType::Fire, 30, 2).with_cooldown(2);
        ember.trigger_cooldown();
        let active = mon(vec![ember, Skill::tackle()]);
        for _ in 0..20 {
            assert_eq!(choose_skill(&active, 5, &mut rng).id, "tackle");
        }
    }

    #[test]
    fn test_fallback_is_free_tackle() {
        let mut rng = StdRng::seed_from_u64(3);
        let active = mon(vec![Skill::strike("inferno", "Inferno", ElementalType::Fire, 90, 5)]);
        let skill = choose_skill(&active, 0, &mut rng);
        assert_eq!(skill.id, "tackle");
        assert_eq!(skill.energy, 0);

        let empty = mon(vec![]);
        assert_eq!(choose_skill(&empty, 5, &mut rng).id, "tackle");
    }

    #[test]
    fn test_choice_is_spread() {
        let mut rng = StdRng::seed_from_u64(11);
        let active = mon(vec![
            Skill::tackle(),
            Skill::strike("ember", "Ember", ElementalType::Fire, 30, 1),
        ]);
        let embers = (0..200)
            .filter(|_| choose_skill(&active, 5, &mut rng).id == "ember")
            .count();
        assert!((60..=140).contains(&embers));
    }
}
