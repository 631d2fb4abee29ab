//! Core enums for characters and monsters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character profession
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profession {
    Warrior,
    Assassin,
    Wizard,
}

impl Profession {
    pub fn all() -> &'static [Profession] {
        &[Profession::Warrior, Profession::Assassin, Profession::Wizard]
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Profession::Warrior => write!(f, "Warrior"),
            Profession::Assassin => write!(f, "Assassin"),
            Profession::Wizard => write!(f, "Wizard"),
        }
    }
}

/// Character race
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Human,
    Dwarf,
    Orc,
    Elf,
}

impl Race {
    pub fn all() -> &'static [Race] {
        &[Race::Human, Race::Dwarf, Race::Orc, Race::Elf]
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Race::Human => write!(f, "Human"),
            Race::Dwarf => write!(f, "Dwarf"),
            Race::Orc => write!(f, "Orc"),
            Race::Elf => write!(f, "Elf"),
        }
    }
}

/// Monster family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterType {
    Humanoid,
    Beast,
    Undead,
    Elemental,
    Dragon,
}

impl MonsterType {
    pub fn all() -> &'static [MonsterType] {
        &[
            MonsterType::Humanoid,
            MonsterType::Beast,
            MonsterType::Undead,
            MonsterType::Elemental,
            MonsterType::Dragon,
        ]
    }
}

impl fmt::Display for MonsterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonsterType::Humanoid => write!(f, "Humanoid"),
            MonsterType::Beast => write!(f, "Beast"),
            MonsterType::Undead => write!(f, "Undead"),
            MonsterType::Elemental => write!(f, "Elemental"),
            MonsterType::Dragon => write!(f, "Dragon"),
        }
    }
}

/// Monster difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MonsterDifficulty {
    Easy,
    Normal,
    Hard,
    Boss,
}

impl fmt::Display for MonsterDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonsterDifficulty::Easy => write!(f, "Easy"),
            MonsterDifficulty::Normal => write!(f, "Normal"),
            MonsterDifficulty::Hard => write!(f, "Hard"),
            MonsterDifficulty::Boss => write!(f, "Boss"),
        }
    }
}
