//! Monsters and their attacks

use crate::combatant::Combatant;
use crate::config::constants;
use crate::effect::StatusEffect;
use crate::stats::Stats;
use crate::types::{MonsterDifficulty, MonsterType};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tables_core::LootTable;

pub const BASIC_ATTACK_NAME: &str = "Basic Attack";
const BASIC_ATTACK_DESCRIPTION: &str = "attacks with a basic strike";

/// A monster attack with its own cooldown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterAttack {
    pub name: String,
    /// Verb phrase used in the combat log, e.g. "bites with sharp teeth"
    pub description: String,
    pub damage: f64,
    pub cooldown: u32,
    #[serde(default)]
    pub current_cooldown: u32,
    /// Effects inflicted on the player when the attack lands
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub effects: Vec<StatusEffect>,
}

impl MonsterAttack {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        damage: f64,
        cooldown: u32,
    ) -> Self {
        MonsterAttack {
            name: name.into(),
            description: description.into(),
            damage,
            cooldown,
            current_cooldown: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// A monster; plain data that serializes as is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub monster_type: MonsterType,
    pub difficulty: MonsterDifficulty,
    pub level: u32,
    pub stats: Stats,
    pub attacks: Vec<MonsterAttack>,
    pub loot_table: LootTable,
    pub experience_value: u32,
}

impl Monster {
    /// Pick an attack for this turn
    ///
    /// Chooses uniformly among ready attacks and resets the chosen one's
    /// cooldown. With nothing ready, falls back to a basic strike scaled from
    /// strength that has no cooldown.
    pub fn choose_attack<R: Rng>(&mut self, rng: &mut R) -> MonsterAttack {
        let ready: Vec<usize> = self
            .attacks
            .iter()
            .enumerate()
            .filter(|(_, attack)| attack.is_ready())
            .map(|(i, _)| i)
            .collect();

        match ready.choose(rng) {
            Some(&index) => {
                let attack = &mut self.attacks[index];
                attack.current_cooldown = attack.cooldown;
                tracing::debug!(monster = %self.name, attack = %attack.name, "attack chosen");
                attack.clone()
            }
            None => {
                let factor = constants().combat.basic_attack_factor;
                tracing::debug!(monster = %self.name, "no attack ready, using basic attack");
                MonsterAttack::new(
                    BASIC_ATTACK_NAME,
                    BASIC_ATTACK_DESCRIPTION,
                    (self.stats.strength * factor).floor(),
                    0,
                )
            }
        }
    }

    /// Count one turn off every attack cooldown
    pub fn update_cooldowns(&mut self) {
        for attack in &mut self.attacks {
            attack.current_cooldown = attack.current_cooldown.saturating_sub(1);
        }
    }
}

impl Combatant for Monster {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Monsters fight with the health they were spawned with
    fn max_health(&self) -> f64 {
        self.stats.health
    }

    fn max_mana(&self) -> f64 {
        self.stats.mana
    }
}
