use loot_core::ConsumableEffect;
use serde::{Deserialize, Serialize};
use stat_core::AbilityEffect;

/// What the player asked to do, referring to their own kit by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PlayerAction {
    /// A free-form physical attack with pre-computed damage
    Attack { damage: f64, description: String },
    /// Use the ability at this index
    Ability { index: usize },
    /// Use the carried item at this index
    Item { index: usize },
}

impl PlayerAction {
    pub fn attack(damage: f64, description: impl Into<String>) -> Self {
        PlayerAction::Attack {
            damage,
            description: description.into(),
        }
    }
}

/// A validated action, ready to apply to an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CombatAction {
    Attack {
        damage: f64,
        description: String,
    },
    Ability {
        mana_cost: f64,
        effect: AbilityEffect,
        description: String,
    },
    Item {
        effect: ConsumableEffect,
        description: String,
    },
}
