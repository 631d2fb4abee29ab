//! loot_core - Items, the item catalog and the player inventory

pub mod catalog;
pub mod inventory;
pub mod item;
pub mod types;

pub use catalog::ItemCatalog;
pub use inventory::Inventory;
pub use item::Item;
pub use types::{ConsumableEffect, ConsumableKind, EquipmentSlot, ItemRarity, ItemType, StatBonus};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading item configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation { message: String, path: PathBuf },
}
