//! Error types for the combat engine and action interpretation

use stat_core::AbilityError;
use thiserror::Error;

/// A rejected combat request
///
/// Every variant is returned before any state changes. `Display` is the
/// message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("An encounter is already in progress")]
    EncounterActive,
    #[error("You are not in combat")]
    NotInCombat,
    #[error("The fight is already over")]
    CombatOver,
    #[error("Wait for the enemy to respond")]
    TurnInFlight,
    #[error("The enemy has nothing to respond to")]
    NoPendingReply,
    #[error("The encounter has not been decided yet")]
    NotResolved,
    #[error("{0}")]
    Ability(#[from] AbilityError),
    #[error("Invalid item index {index} (have {count})")]
    InvalidItemIndex { index: usize, count: usize },
    #[error("{name} cannot be used in combat")]
    NotConsumable { name: String },
    #[error("{0}")]
    InvalidAction(String),
}

/// Failure inside an action interpreter
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("no JSON object found in response")]
    NoJson,
    #[error("malformed interpretation: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("incomplete interpretation: {0}")]
    Incomplete(&'static str),
}

pub type Result<T> = std::result::Result<T, CombatError>;
