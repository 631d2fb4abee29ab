//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Call once at startup, before any character is created.
/// Returns error if already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))?;
    tracing::info!(path = ?path, "game constants loaded");
    Ok(())
}

/// Initialize the global game constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Falls back to defaults when nothing was initialized.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    GAME_CONSTANTS.get().is_some()
}

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub combat: CombatConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Parse constants from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let constants: GameConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.base_experience_to_next_level == 0 {
            return Err(ConfigError::ValidationError(
                "base_experience_to_next_level must be positive".to_string(),
            ));
        }
        let growth = self.progression.experience_growth;
        if !growth.is_finite() || growth < 1.0 {
            return Err(ConfigError::ValidationError(format!(
                "experience_growth must be a finite number of at least 1.0, got {}",
                self.progression.experience_growth
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience needed to reach level 2
    #[serde(default = "default_base_experience")]
    pub base_experience_to_next_level: u32,
    /// Threshold multiplier applied on each level-up (result is floored)
    #[serde(default = "default_experience_growth")]
    pub experience_growth: f64,
    /// Max health = base_health + vitality * health_per_vitality
    #[serde(default = "default_base_health")]
    pub base_health: f64,
    #[serde(default = "default_health_per_vitality")]
    pub health_per_vitality: f64,
    /// Max mana = base_mana + intelligence * mana_per_intelligence
    #[serde(default = "default_base_mana")]
    pub base_mana: f64,
    #[serde(default = "default_mana_per_intelligence")]
    pub mana_per_intelligence: f64,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            base_experience_to_next_level: default_base_experience(),
            experience_growth: default_experience_growth(),
            base_health: default_base_health(),
            health_per_vitality: default_health_per_vitality(),
            base_mana: default_base_mana(),
            mana_per_intelligence: default_mana_per_intelligence(),
        }
    }
}

fn default_base_experience() -> u32 {
    100
}
fn default_experience_growth() -> f64 {
    1.5
}
fn default_base_health() -> f64 {
    100.0
}
fn default_health_per_vitality() -> f64 {
    10.0
}
fn default_base_mana() -> f64 {
    50.0
}
fn default_mana_per_intelligence() -> f64 {
    5.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Strength multiplier for the monster fallback attack
    #[serde(default = "default_basic_attack_factor")]
    pub basic_attack_factor: f64,
    /// Flat mana cost charged per ability use
    #[serde(default = "default_ability_mana_cost")]
    pub ability_mana_cost: f64,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            basic_attack_factor: default_basic_attack_factor(),
            ability_mana_cost: default_ability_mana_cost(),
        }
    }
}

fn default_basic_attack_factor() -> f64 {
    0.8
}
fn default_ability_mana_cost() -> f64 {
    10.0
}
