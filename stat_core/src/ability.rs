//! Ability catalog
//!
//! Abilities are stored as a catalog id plus cooldown bookkeeping. The effect
//! is computed on demand from the id and the owner's current stats, so an
//! ability survives serialization without carrying any behaviour.

use crate::effect::{ModifiedStat, StatusEffect};
use crate::stats::Stats;
use crate::types::{Profession, Race};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Damage dealt by an ability whose name is not in the catalog
pub const UNRECOGNIZED_DAMAGE: f64 = 5.0;

/// Catalog identifier for an ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityId {
    Slash,
    ShieldBash,
    Backstab,
    PoisonStrike,
    Fireball,
    FrostNova,
    Adaptability,
    StoneSkin,
    BerserkerRage,
    NaturesBlessing,
    /// Loaded from a record whose name matched nothing in the catalog
    Unrecognized,
}

impl AbilityId {
    /// All catalog abilities
    pub fn all() -> &'static [AbilityId] {
        &[
            AbilityId::Slash,
            AbilityId::ShieldBash,
            AbilityId::Backstab,
            AbilityId::PoisonStrike,
            AbilityId::Fireball,
            AbilityId::FrostNova,
            AbilityId::Adaptability,
            AbilityId::StoneSkin,
            AbilityId::BerserkerRage,
            AbilityId::NaturesBlessing,
        ]
    }

    /// Resolve a display name to its catalog id
    pub fn from_name(name: &str) -> Option<AbilityId> {
        Self::all().iter().copied().find(|id| id.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AbilityId::Slash => "Slash",
            AbilityId::ShieldBash => "Shield Bash",
            AbilityId::Backstab => "Backstab",
            AbilityId::PoisonStrike => "Poison Strike",
            AbilityId::Fireball => "Fireball",
            AbilityId::FrostNova => "Frost Nova",
            AbilityId::Adaptability => "Adaptability",
            AbilityId::StoneSkin => "Stone Skin",
            AbilityId::BerserkerRage => "Berserker Rage",
            AbilityId::NaturesBlessing => "Nature's Blessing",
            AbilityId::Unrecognized => "Unknown Ability",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AbilityId::Slash => "A powerful slash with your weapon",
            AbilityId::ShieldBash => "Bash your enemy with your shield, stunning them",
            AbilityId::Backstab => "Attack from behind for critical damage",
            AbilityId::PoisonStrike => "Poison your enemy, dealing damage over time",
            AbilityId::Fireball => "Launch a ball of fire at your enemy",
            AbilityId::FrostNova => "Freeze enemies around you",
            AbilityId::Adaptability => "Humans adapt quickly to situations",
            AbilityId::StoneSkin => "Harden your skin to reduce damage",
            AbilityId::BerserkerRage => "Enter a rage, increasing damage but reducing defense",
            AbilityId::NaturesBlessing => "Call upon nature to heal your wounds",
            AbilityId::Unrecognized => "A technique long forgotten",
        }
    }

    /// Full cooldown in turns
    pub fn cooldown(&self) -> u32 {
        match self {
            AbilityId::Slash => 0,
            AbilityId::ShieldBash => 10,
            AbilityId::Backstab => 5,
            AbilityId::PoisonStrike => 8,
            AbilityId::Fireball => 3,
            AbilityId::FrostNova => 12,
            AbilityId::Adaptability => 20,
            AbilityId::StoneSkin => 15,
            AbilityId::BerserkerRage => 25,
            AbilityId::NaturesBlessing => 18,
            AbilityId::Unrecognized => 0,
        }
    }

    /// Compute the effect from the owner's current stats
    pub fn execute(&self, stats: &Stats) -> AbilityEffect {
        match self {
            AbilityId::Slash => AbilityEffect::Damage(stats.strength * 1.5),
            AbilityId::ShieldBash => AbilityEffect::DamageAndEffect {
                damage: stats.strength,
                effect: StatusEffect::stun(2),
            },
            AbilityId::Backstab => AbilityEffect::Damage(stats.dexterity * 2.0),
            AbilityId::PoisonStrike => AbilityEffect::DamageAndEffect {
                damage: stats.dexterity * 0.5,
                effect: StatusEffect::poison(stats.dexterity * 0.3, 3),
            },
            AbilityId::Fireball => AbilityEffect::Damage(stats.intelligence * 1.8),
            AbilityId::FrostNova => AbilityEffect::DamageAndEffect {
                damage: stats.intelligence,
                effect: StatusEffect::freeze(2),
            },
            AbilityId::Adaptability => {
                AbilityEffect::Buff(StatusEffect::modifier(ModifiedStat::AllStats, 2.0, 3))
            }
            AbilityId::StoneSkin => {
                AbilityEffect::Buff(StatusEffect::modifier(ModifiedStat::Defense, 5.0, 3))
            }
            AbilityId::BerserkerRage => AbilityEffect::BuffAndDebuff {
                buffs: vec![StatusEffect::modifier(ModifiedStat::Strength, 5.0, 3)],
                debuffs: vec![StatusEffect::modifier(ModifiedStat::Defense, -2.0, 3)],
            },
            AbilityId::NaturesBlessing => AbilityEffect::Heal(stats.intelligence * 1.2),
            AbilityId::Unrecognized => AbilityEffect::Damage(UNRECOGNIZED_DAMAGE),
        }
    }
}

impl fmt::Display for AbilityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of executing an ability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityEffect {
    Damage(f64),
    Heal(f64),
    Buff(StatusEffect),
    DamageAndEffect {
        damage: f64,
        effect: StatusEffect,
    },
    BuffAndDebuff {
        buffs: Vec<StatusEffect>,
        debuffs: Vec<StatusEffect>,
    },
}

/// Why an ability could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("Invalid ability index {index} (have {count})")]
    InvalidIndex { index: usize, count: usize },
    #[error("{name} is on cooldown for {remaining} more turn(s)")]
    OnCooldown { name: String, remaining: u32 },
}

/// An owned ability with cooldown state
///
/// `current_cooldown` never exceeds `cooldown`; the ability is usable only
/// when it is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub description: String,
    cooldown: u32,
    current_cooldown: u32,
}

impl Ability {
    /// Fresh catalog ability, ready to use
    pub fn from_catalog(id: AbilityId) -> Self {
        Ability {
            id,
            name: id.name().to_string(),
            description: id.description().to_string(),
            cooldown: id.cooldown(),
            current_cooldown: 0,
        }
    }

    /// Rebuild an ability from stored fields, resolving the name
    ///
    /// Catalog abilities always take the catalog cooldown. Unknown names
    /// become `AbilityId::Unrecognized` and keep their stored text and
    /// cooldown so the player still sees what they had.
    pub fn restore(name: &str, description: &str, cooldown: u32, current_cooldown: u32) -> Self {
        let (id, cooldown) = match AbilityId::from_name(name) {
            Some(id) => (id, id.cooldown()),
            None => {
                tracing::warn!(ability = name, "unrecognized ability name, using flat damage");
                (AbilityId::Unrecognized, cooldown)
            }
        };

        Ability {
            id,
            name: name.to_string(),
            description: description.to_string(),
            cooldown,
            current_cooldown: current_cooldown.min(cooldown),
        }
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Start the cooldown, failing if the ability is not ready
    pub fn try_use(&mut self) -> Result<(), AbilityError> {
        if !self.is_ready() {
            return Err(AbilityError::OnCooldown {
                name: self.name.clone(),
                remaining: self.current_cooldown,
            });
        }
        self.current_cooldown = self.cooldown;
        Ok(())
    }

    /// Count one turn off the cooldown
    pub fn tick(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }

    pub fn execute(&self, stats: &Stats) -> AbilityEffect {
        self.id.execute(stats)
    }
}

/// Starting abilities: profession abilities first, then the race ability
pub fn abilities_for(profession: Profession, race: Race) -> Vec<Ability> {
    let profession_ids: [AbilityId; 2] = match profession {
        Profession::Warrior => [AbilityId::Slash, AbilityId::ShieldBash],
        Profession::Assassin => [AbilityId::Backstab, AbilityId::PoisonStrike],
        Profession::Wizard => [AbilityId::Fireball, AbilityId::FrostNova],
    };
    let race_id = match race {
        Race::Human => AbilityId::Adaptability,
        Race::Dwarf => AbilityId::StoneSkin,
        Race::Orc => AbilityId::BerserkerRage,
        Race::Elf => AbilityId::NaturesBlessing,
    };

    profession_ids
        .into_iter()
        .chain(std::iter::once(race_id))
        .map(Ability::from_catalog)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::EffectKind;

    #[test]
    fn test_catalog_names_round_trip() {
        for id in AbilityId::all() {
            assert_eq!(AbilityId::from_name(id.name()), Some(*id));
        }
        assert_eq!(AbilityId::from_name("Unknown Ability"), None);
    }

    #[test]
    fn test_profession_then_race_order() {
        let abilities = abilities_for(Profession::Assassin, Race::Orc);
        let ids: Vec<AbilityId> = abilities.iter().map(|a| a.id).collect();
        assert_eq!(
            ids,
            vec![AbilityId::Backstab, AbilityId::PoisonStrike, AbilityId::BerserkerRage]
        );
    }

    #[test]
    fn test_effects_read_current_stats() {
        let mut stats = Stats::default();
        assert_eq!(AbilityId::Slash.execute(&stats), AbilityEffect::Damage(15.0));
        stats.strength = 20.0;
        assert_eq!(AbilityId::Slash.execute(&stats), AbilityEffect::Damage(30.0));
    }

    #[test]
    fn test_poison_strike() {
        let stats = Stats {
            dexterity: 20.0,
            ..Stats::default()
        };
        match AbilityId::PoisonStrike.execute(&stats) {
            AbilityEffect::DamageAndEffect { damage, effect } => {
                assert!((damage - 10.0).abs() < f64::EPSILON);
                assert_eq!(effect.kind, EffectKind::Poison);
                assert!((effect.magnitude - 6.0).abs() < 1e-9);
                assert_eq!(effect.duration, 3);
            }
            other => panic!("Expected damage and effect, got {:?}", other),
        }
    }

    #[test]
    fn test_berserker_rage_buff_and_debuff() {
        match AbilityId::BerserkerRage.execute(&Stats::default()) {
            AbilityEffect::BuffAndDebuff { buffs, debuffs } => {
                assert_eq!(buffs.len(), 1);
                assert_eq!(debuffs.len(), 1);
                assert!(debuffs[0].is_debuff());
            }
            other => panic!("Expected buff and debuff, got {:?}", other),
        }
    }

    #[test]
    fn test_cooldown_cycle() {
        let mut ability = Ability::from_catalog(AbilityId::Fireball);
        assert!(ability.try_use().is_ok());
        assert_eq!(ability.current_cooldown(), 3);

        let err = ability.try_use().unwrap_err();
        assert_eq!(
            err,
            AbilityError::OnCooldown {
                name: "Fireball".to_string(),
                remaining: 3
            }
        );
        assert_eq!(ability.current_cooldown(), 3);

        for _ in 0..3 {
            ability.tick();
        }
        assert!(ability.is_ready());
        ability.tick();
        assert_eq!(ability.current_cooldown(), 0);
    }

    #[test]
    fn test_zero_cooldown_always_ready() {
        let mut ability = Ability::from_catalog(AbilityId::Slash);
        assert!(ability.try_use().is_ok());
        assert!(ability.try_use().is_ok());
    }

    #[test]
    fn test_restore_ignores_stored_catalog_cooldown() {
        let ability = Ability::restore("Shield Bash", "Bash", 0, 7);
        assert_eq!(ability.id, AbilityId::ShieldBash);
        assert_eq!(ability.cooldown(), 10);
        assert_eq!(ability.current_cooldown(), 7);

        let ability = Ability::restore("Fireball", "Fire", 1, 30);
        assert_eq!(ability.cooldown(), 3);
        assert_eq!(ability.current_cooldown(), 3);
    }

    #[test]
    fn test_restore_unrecognized() {
        let ability = Ability::restore("Moonbeam", "Old magic", 4, 9);
        assert_eq!(ability.id, AbilityId::Unrecognized);
        assert_eq!(ability.name, "Moonbeam");
        assert_eq!(ability.current_cooldown(), 4);
        assert_eq!(
            ability.execute(&Stats::default()),
            AbilityEffect::Damage(UNRECOGNIZED_DAMAGE)
        );
    }
}
