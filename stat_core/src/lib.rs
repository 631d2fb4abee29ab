//! stat_core - Characters, monsters and the rules that grow them
//!
//! This library provides:
//! - Stats: attribute block and derived health/mana
//! - Character: professions, races, experience and level-ups
//! - Ability catalog: tagged ability ids with stat-driven effects
//! - Status effects: timed effects and the per-combatant ledger
//! - Monsters: attacks with cooldowns and procedural spawning
//! - Records: plain persistence forms for characters
//!
//! # Quick Start
//!
//! ```rust
//! use stat_core::{Character, Profession, Race};
//!
//! let mut hero = Character::new("Aldric", Profession::Warrior, Race::Human);
//! let levels = hero.gain_experience(250);
//! assert_eq!(levels, 2);
//!
//! let json = stat_core::record::to_json(&hero).unwrap();
//! let restored = stat_core::record::from_json(&json).unwrap();
//! assert_eq!(restored, hero);
//! ```

pub mod ability;
pub mod character;
pub mod combatant;
pub mod config;
pub mod effect;
pub mod monster;
pub mod record;
pub mod spawn;
pub mod stats;
pub mod types;

// Core API
pub use ability::{abilities_for, Ability, AbilityEffect, AbilityError, AbilityId};
pub use character::Character;
pub use combatant::Combatant;
pub use effect::{EffectKind, EffectLedger, ModifiedStat, StatusEffect};
pub use monster::{Monster, MonsterAttack};
pub use stats::{derive_initial_stats, Stats};
pub use types::{MonsterDifficulty, MonsterType, Profession, Race};

// Configuration
pub use config::{constants, init_constants, init_constants_default, ConfigError, GameConstants};

// Persistence
pub use record::{deserialize_character, serialize_character, AbilityRecord, CharacterRecord};

// Re-export commonly needed loot types
pub use loot_core::{Item, StatBonus};
pub use tables_core::{Loot, LootTable};
