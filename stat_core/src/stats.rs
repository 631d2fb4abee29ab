//! Attribute block and progression formulas

use crate::config::constants;
use crate::types::{Profession, Race};
use loot_core::StatBonus;
use serde::{Deserialize, Serialize};

/// The six attributes shared by characters and monsters
///
/// Values are fractional because some per-level gains are halves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: f64,
    pub dexterity: f64,
    pub intelligence: f64,
    pub vitality: f64,
    pub health: f64,
    pub mana: f64,
}

impl Default for Stats {
    fn default() -> Self {
        Stats {
            strength: 10.0,
            dexterity: 10.0,
            intelligence: 10.0,
            vitality: 10.0,
            health: 100.0,
            mana: 50.0,
        }
    }
}

impl Stats {
    /// Health derived from vitality
    pub fn max_health(&self) -> f64 {
        let p = &constants().progression;
        p.base_health + self.vitality * p.health_per_vitality
    }

    /// Mana derived from intelligence
    pub fn max_mana(&self) -> f64 {
        let p = &constants().progression;
        p.base_mana + self.intelligence * p.mana_per_intelligence
    }

    /// Reset health and mana to their derived maxima
    pub fn refresh_resources(&mut self) {
        self.health = self.max_health();
        self.mana = self.max_mana();
    }

    /// Stats with equipment bonuses added on top
    pub fn with_bonus(&self, bonus: &StatBonus) -> Stats {
        Stats {
            strength: self.strength + bonus.strength,
            dexterity: self.dexterity + bonus.dexterity,
            intelligence: self.intelligence + bonus.intelligence,
            vitality: self.vitality + bonus.vitality,
            health: self.health + bonus.health,
            mana: self.mana + bonus.mana,
        }
    }
}

/// Starting stats for a profession and race
///
/// Baseline first, then profession deltas, then race deltas.
pub fn derive_initial_stats(profession: Profession, race: Race) -> Stats {
    let mut stats = Stats::default();

    match profession {
        Profession::Warrior => {
            stats.strength += 5.0;
            stats.vitality += 3.0;
            stats.health += 50.0;
        }
        Profession::Assassin => {
            stats.dexterity += 5.0;
            stats.strength += 2.0;
            stats.health += 25.0;
        }
        Profession::Wizard => {
            stats.intelligence += 5.0;
            stats.mana += 50.0;
        }
    }

    match race {
        Race::Human => {
            stats.strength += 1.0;
            stats.dexterity += 1.0;
            stats.intelligence += 1.0;
            stats.vitality += 1.0;
        }
        Race::Dwarf => {
            stats.strength += 2.0;
            stats.vitality += 3.0;
            stats.health += 25.0;
        }
        Race::Orc => {
            stats.strength += 4.0;
            stats.vitality += 2.0;
            stats.intelligence -= 2.0;
            stats.health += 30.0;
        }
        Race::Elf => {
            stats.dexterity += 3.0;
            stats.intelligence += 2.0;
            stats.mana += 25.0;
        }
    }

    stats
}

/// Apply one level of profession growth
pub(crate) fn apply_level_growth(stats: &mut Stats, profession: Profession) {
    match profession {
        Profession::Warrior => {
            stats.strength += 2.0;
            stats.vitality += 2.0;
            stats.dexterity += 1.0;
            stats.intelligence += 0.5;
        }
        Profession::Assassin => {
            stats.dexterity += 2.0;
            stats.strength += 1.0;
            stats.vitality += 1.0;
            stats.intelligence += 1.0;
        }
        Profession::Wizard => {
            stats.intelligence += 2.0;
            stats.vitality += 1.0;
            stats.dexterity += 1.0;
            stats.strength += 0.5;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_stats(stats: Stats, expected: [f64; 6]) {
        let actual = [
            stats.strength,
            stats.dexterity,
            stats.intelligence,
            stats.vitality,
            stats.health,
            stats.mana,
        ];
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < f64::EPSILON, "got {:?}, expected {:?}", actual, expected);
        }
    }

    #[test]
    fn test_warrior_human() {
        let stats = derive_initial_stats(Profession::Warrior, Race::Human);
        assert_stats(stats, [16.0, 11.0, 11.0, 14.0, 150.0, 50.0]);
    }

    #[test]
    fn test_wizard_orc_loses_intelligence() {
        let stats = derive_initial_stats(Profession::Wizard, Race::Orc);
        assert_stats(stats, [14.0, 10.0, 13.0, 12.0, 130.0, 100.0]);
    }

    #[test]
    fn test_assassin_elf() {
        let stats = derive_initial_stats(Profession::Assassin, Race::Elf);
        assert_stats(stats, [12.0, 18.0, 12.0, 10.0, 125.0, 75.0]);
    }

    #[test]
    fn test_warrior_dwarf() {
        let stats = derive_initial_stats(Profession::Warrior, Race::Dwarf);
        assert_stats(stats, [17.0, 10.0, 10.0, 16.0, 175.0, 50.0]);
    }

    #[test]
    fn test_derived_maxima() {
        let stats = Stats {
            vitality: 12.0,
            intelligence: 7.0,
            ..Stats::default()
        };
        assert!((stats.max_health() - 220.0).abs() < f64::EPSILON);
        assert!((stats.max_mana() - 85.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_half_point_growth_accumulates() {
        let mut stats = Stats::default();
        apply_level_growth(&mut stats, Profession::Warrior);
        apply_level_growth(&mut stats, Profession::Warrior);
        assert!((stats.intelligence - 11.0).abs() < f64::EPSILON);
        assert!((stats.strength - 14.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_bonus() {
        let bonus = StatBonus {
            strength: 3.0,
            health: 20.0,
            ..StatBonus::default()
        };
        let stats = Stats::default().with_bonus(&bonus);
        assert!((stats.strength - 13.0).abs() < f64::EPSILON);
        assert!((stats.health - 120.0).abs() < f64::EPSILON);
    }
}
