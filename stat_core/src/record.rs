//! Plain persistence records for characters
//!
//! Abilities are stored by name only. Loading resolves each name against the
//! ability catalog, so stored records never carry behaviour.

use crate::ability::Ability;
use crate::character::Character;
use crate::combatant::Combatant;
use crate::stats::Stats;
use crate::types::{Profession, Race};
use serde::{Deserialize, Serialize};

/// Stored form of an ability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRecord {
    pub name: String,
    pub description: String,
    pub cooldown: u32,
    pub current_cooldown: u32,
}

/// Stored form of a character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name: String,
    pub profession: Profession,
    pub race: Race,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub stats: Stats,
    pub abilities: Vec<AbilityRecord>,
}

impl From<&Ability> for AbilityRecord {
    fn from(ability: &Ability) -> Self {
        AbilityRecord {
            name: ability.name.clone(),
            description: ability.description.clone(),
            cooldown: ability.cooldown(),
            current_cooldown: ability.current_cooldown(),
        }
    }
}

impl From<AbilityRecord> for Ability {
    fn from(record: AbilityRecord) -> Self {
        Ability::restore(
            &record.name,
            &record.description,
            record.cooldown,
            record.current_cooldown,
        )
    }
}

pub fn serialize_character(character: &Character) -> CharacterRecord {
    CharacterRecord {
        name: character.name.clone(),
        profession: character.profession,
        race: character.race,
        level: character.level(),
        experience: character.experience(),
        experience_to_next_level: character.experience_to_next_level(),
        stats: character.stats,
        abilities: character.abilities().iter().map(AbilityRecord::from).collect(),
    }
}

/// Rebuild a character; unknown ability names degrade, they never fail
pub fn deserialize_character(record: CharacterRecord) -> Character {
    Character::from_parts(
        record.name,
        record.profession,
        record.race,
        record.level,
        record.experience,
        record.experience_to_next_level,
        record.stats,
        record.abilities.into_iter().map(Ability::from).collect(),
    )
}

pub fn to_json(character: &Character) -> Result<String, serde_json::Error> {
    serde_json::to_string(&serialize_character(character))
}

pub fn from_json(json: &str) -> Result<Character, serde_json::Error> {
    let record: CharacterRecord = serde_json::from_str(json)?;
    Ok(deserialize_character(record))
}
