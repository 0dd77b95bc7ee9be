//! Elemental types shared by creatures and skills

use serde::{Deserialize, Serialize};

use crate::CardError;

/// The 18 elemental types a creature or skill can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ElementalType {
    Fire = 0,
    Water = 1,
    Grass = 2,
    Electric = 3,
    Psychic = 4,
    Ice = 5,
    Dragon = 6,
    Dark = 7,
    Fairy = 8,
    Normal = 9,
    Fighting = 10,
    Flying = 11,
    Poison = 12,
    Ground = 13,
    Rock = 14,
    Bug = 15,
    Ghost = 16,
    Steel = 17,
}

impl ElementalType {
    /// All 18 types, in chart order
    pub const ALL: [ElementalType; 18] = [
        ElementalType::Fire,
        ElementalType::Water,
        ElementalType::Grass,
        ElementalType::Electric,
        ElementalType::Psychic,
        ElementalType::Ice,
        ElementalType::Dragon,
        ElementalType::Dark,
        ElementalType::Fairy,
        ElementalType::Normal,
        ElementalType::Fighting,
        ElementalType::Flying,
        ElementalType::Poison,
        ElementalType::Ground,
        ElementalType::Rock,
        ElementalType::Bug,
        ElementalType::Ghost,
        ElementalType::Steel,
    ];

    /// Get all types as a slice
    pub fn all() -> &'static [ElementalType] {
        &Self::ALL
    }

    /// Row/column index into a type chart
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse a type name (case-insensitive)
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "fire" => Some(ElementalType::Fire),
            "water" => Some(ElementalType::Water),
            "grass" => Some(ElementalType::Grass),
            "electric" => Some(ElementalType::Electric),
            "psychic" => Some(ElementalType::Psychic),
            "ice" => Some(ElementalType::Ice),
            "dragon" => Some(ElementalType::Dragon),
            "dark" => Some(ElementalType::Dark),
            "fairy" => Some(ElementalType::Fairy),
            "normal" => Some(ElementalType::Normal),
            "fighting" => Some(ElementalType::Fighting),
            "flying" => Some(ElementalType::Flying),
            "poison" => Some(ElementalType::Poison),
            "ground" => Some(ElementalType::Ground),
            "rock" => Some(ElementalType::Rock),
            "bug" => Some(ElementalType::Bug),
            "ghost" => Some(ElementalType::Ghost),
            "steel" => Some(ElementalType::Steel),
            _ => None,
        }
    }

    /// Lowercase canonical name
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementalType::Fire => "fire",
            ElementalType::Water => "water",
            ElementalType::Grass => "grass",
            ElementalType::Electric => "electric",
            ElementalType::Psychic => "psychic",
            ElementalType::Ice => "ice",
            ElementalType::Dragon => "dragon",
            ElementalType::Dark => "dark",
            ElementalType::Fairy => "fairy",
            ElementalType::Normal => "normal",
            ElementalType::Fighting => "fighting",
            ElementalType::Flying => "flying",
            ElementalType::Poison => "poison",
            ElementalType::Ground => "ground",
            ElementalType::Rock => "rock",
            ElementalType::Bug => "bug",
            ElementalType::Ghost => "ghost",
            ElementalType::Steel => "steel",
        }
    }
}

impl std::fmt::Display for ElementalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ElementalType {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| CardError::UnknownElement(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(ElementalType::from_name("fire"), Some(ElementalType::Fire));
        assert_eq!(ElementalType::from_name("FIRE"), Some(ElementalType::Fire));
        assert_eq!(ElementalType::from_name(" Steel "), Some(ElementalType::Steel));
        assert_eq!(ElementalType::from_name("shadow"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "plasma".parse::<ElementalType>().unwrap_err();
        assert!(matches!(err, CardError::UnknownElement(ref s) if s == "plasma"));
    }

    #[test]
    fn test_all_types_indexed_in_order() {
        assert_eq!(ElementalType::all().len(), 18);
        for (i, t) in ElementalType::all().iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(ElementalType::from_name(t.as_str()), Some(*t));
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ElementalType::Electric).unwrap();
        assert_eq!(json, "\"electric\"");
        let parsed: ElementalType = serde_json::from_str("\"ghost\"").unwrap();
        assert_eq!(parsed, ElementalType::Ghost);
    }
}
