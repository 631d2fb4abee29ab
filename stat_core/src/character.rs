//! Player characters and levelling

use crate::ability::{abilities_for, Ability, AbilityEffect, AbilityError};
use crate::combatant::Combatant;
use crate::config::constants;
use crate::stats::{apply_level_growth, derive_initial_stats, Stats};
use crate::types::{Profession, Race};
use serde::{Deserialize, Serialize};

/// A player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub profession: Profession,
    pub race: Race,
    level: u32,
    experience: u32,
    experience_to_next_level: u32,
    pub stats: Stats,
    abilities: Vec<Ability>,
}

impl Character {
    /// Create a level 1 character with derived stats and starting abilities
    pub fn new(name: impl Into<String>, profession: Profession, race: Race) -> Self {
        Character {
            name: name.into(),
            profession,
            race,
            level: 1,
            experience: 0,
            experience_to_next_level: constants().progression.base_experience_to_next_level,
            stats: derive_initial_stats(profession, race),
            abilities: abilities_for(profession, race),
        }
    }

    /// Rebuild from stored parts; a zero threshold is raised to 1
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        name: String,
        profession: Profession,
        race: Race,
        level: u32,
        experience: u32,
        experience_to_next_level: u32,
        stats: Stats,
        abilities: Vec<Ability>,
    ) -> Self {
        Character {
            name,
            profession,
            race,
            level: level.max(1),
            experience,
            experience_to_next_level: experience_to_next_level.max(1),
            stats,
            abilities,
        }
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn experience_to_next_level(&self) -> u32 {
        self.experience_to_next_level
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn ability(&self, index: usize) -> Option<&Ability> {
        self.abilities.get(index)
    }

    /// Add experience and level up as many times as it covers
    ///
    /// Returns the number of levels gained.
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.experience >= self.experience_to_next_level {
            self.level_up();
            gained += 1;
        }
        gained
    }

    /// Advance one level
    ///
    /// Consumes the current threshold, grows it, applies profession growth
    /// and refills health and mana to the new maxima.
    pub fn level_up(&mut self) {
        let growth = constants().progression.experience_growth;

        self.level += 1;
        self.experience = self.experience.saturating_sub(self.experience_to_next_level);
        self.experience_to_next_level =
            ((self.experience_to_next_level as f64 * growth).floor() as u32).max(1);

        apply_level_growth(&mut self.stats, self.profession);
        self.stats.refresh_resources();

        tracing::info!(
            character = %self.name,
            level = self.level,
            next = self.experience_to_next_level,
            "level up"
        );
    }

    /// Use an ability, starting its cooldown
    ///
    /// Nothing changes when the index is out of range or the ability is
    /// still cooling down.
    pub fn use_ability(&mut self, index: usize) -> Result<AbilityEffect, AbilityError> {
        let count = self.abilities.len();
        let ability = self
            .abilities
            .get_mut(index)
            .ok_or(AbilityError::InvalidIndex { index, count })?;

        ability.try_use()?;
        Ok(ability.execute(&self.stats))
    }

    /// Count one turn off every ability cooldown
    pub fn update_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.tick();
        }
    }
}

impl Combatant for Character {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::AbilityId;
    use proptest::prelude::*;

    fn make_warrior() -> Character {
        Character::new("Aldric", Profession::Warrior, Race::Human)
    }

    #[test]
    fn test_new_character() {
        let character = make_warrior();
        assert_eq!(character.level(), 1);
        assert_eq!(character.experience(), 0);
        assert_eq!(character.experience_to_next_level(), 100);
        assert_eq!(character.abilities().len(), 3);
        assert_eq!(character.abilities()[0].id, AbilityId::Slash);
    }

    #[test]
    fn test_single_level_up() {
        let mut character = make_warrior();
        let gained = character.gain_experience(120);

        assert_eq!(gained, 1);
        assert_eq!(character.level(), 2);
        assert_eq!(character.experience(), 20);
        assert_eq!(character.experience_to_next_level(), 150);
        // Warrior Human: str 16 -> 18, vit 14 -> 16, int 11 -> 11.5
        assert!((character.stats.strength - 18.0).abs() < f64::EPSILON);
        assert!((character.stats.health - 260.0).abs() < f64::EPSILON);
        assert!((character.stats.mana - 107.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cascading_level_ups() {
        let mut character = make_warrior();
        // 100 + 150 + 225 = 475
        let gained = character.gain_experience(480);

        assert_eq!(gained, 3);
        assert_eq!(character.level(), 4);
        assert_eq!(character.experience(), 5);
        assert_eq!(character.experience_to_next_level(), 337);
    }

    #[test]
    fn test_below_threshold_no_level() {
        let mut character = make_warrior();
        assert_eq!(character.gain_experience(99), 0);
        assert_eq!(character.level(), 1);
        assert_eq!(character.experience(), 99);
    }

    #[test]
    fn test_use_ability_sets_cooldown() {
        let mut character = make_warrior();
        let effect = character.use_ability(1).unwrap();
        assert!(matches!(effect, AbilityEffect::DamageAndEffect { .. }));
        assert_eq!(character.abilities()[1].current_cooldown(), 10);

        character.update_cooldowns();
        assert_eq!(character.abilities()[1].current_cooldown(), 9);
    }

    #[test]
    fn test_use_ability_rejections_leave_state() {
        let mut character = make_warrior();
        character.use_ability(1).unwrap();
        let before = character.clone();

        assert!(matches!(
            character.use_ability(1),
            Err(AbilityError::OnCooldown { .. })
        ));
        assert!(matches!(
            character.use_ability(7),
            Err(AbilityError::InvalidIndex { index: 7, count: 3 })
        ));
        assert_eq!(character, before);
    }

    proptest! {
        #[test]
        fn prop_split_experience_matches_lump_sum(a in 0u32..5000, b in 0u32..5000) {
            let mut split = Character::new("Split", Profession::Wizard, Race::Elf);
            split.gain_experience(a);
            split.gain_experience(b);

            let mut lump = Character::new("Lump", Profession::Wizard, Race::Elf);
            lump.gain_experience(a + b);

            prop_assert_eq!(split.level(), lump.level());
            prop_assert_eq!(split.experience(), lump.experience());
            prop_assert_eq!(split.experience_to_next_level(), lump.experience_to_next_level());
            prop_assert_eq!(split.stats, lump.stats);
        }

        #[test]
        fn prop_experience_stays_below_threshold(amount in 0u32..100_000) {
            let mut character = Character::new("Grinder", Profession::Assassin, Race::Dwarf);
            character.gain_experience(amount);
            prop_assert!(character.experience() < character.experience_to_next_level());
        }
    }
}
