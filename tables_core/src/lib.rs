//! tables_core - Monster loot tables and loot generation

mod config;
mod drop;
mod registry;
mod table;

pub use drop::Loot;
pub use registry::LootTableRegistry;
pub use table::{GoldRange, LootEntry, LootTable};

use std::path::PathBuf;
use thiserror::Error;

/// Error loading loot table configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path:?}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path:?}': {message}")]
    Validation { message: String, path: PathBuf },
}

/// Error building or rolling a loot table
#[derive(Debug, Error)]
pub enum RollError {
    #[error("Unknown table: {0}")]
    UnknownTable(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Drop rate {rate} for '{item}' is outside [0, 1]")]
    InvalidDropRate { item: String, rate: f64 },
    #[error("Gold range [{min}, {max}] is inverted")]
    InvalidGoldRange { min: u32, max: u32 },
}
