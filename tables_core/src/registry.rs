use crate::config::TableFileConfig;
use crate::drop::Loot;
use crate::table::LootTable;
use crate::{ConfigError, RollError};
use loot_core::ItemCatalog;
use rand::Rng;
use std::collections::HashMap;
use std::path::Path;

/// Registry of loot tables keyed by monster id, loaded from TOML files
#[derive(Debug, Default)]
pub struct LootTableRegistry {
    tables: HashMap<String, LootTable>,
}

impl LootTableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load all loot tables from a directory (recursively)
    pub fn load(dir: &Path, catalog: &ItemCatalog) -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.load_dir(dir, catalog)?;
        Ok(registry)
    }

    /// Load tables from a directory recursively
    fn load_dir(&mut self, dir: &Path, catalog: &ItemCatalog) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            let path = entry.path();

            if path.is_dir() {
                self.load_dir(&path, catalog)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path, catalog)?;
            }
        }

        Ok(())
    }

    /// Load a single table file
    fn load_file(&mut self, path: &Path, catalog: &ItemCatalog) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;

        let config: TableFileConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;

        let table =
            LootTable::from_config(config, catalog).map_err(|e| ConfigError::Validation {
                message: e.to_string(),
                path: path.to_path_buf(),
            })?;

        tracing::debug!(monster = %table.monster_id, path = ?path, "loot table loaded");
        self.insert(table);
        Ok(())
    }

    /// Add or replace a table
    pub fn insert(&mut self, table: LootTable) {
        self.tables.insert(table.monster_id.clone(), table);
    }

    /// Get a table by monster id
    pub fn get(&self, monster_id: &str) -> Option<&LootTable> {
        self.tables.get(monster_id)
    }

    /// Check if a table exists
    pub fn contains(&self, monster_id: &str) -> bool {
        self.tables.contains_key(monster_id)
    }

    /// List all monster ids with a table
    pub fn table_ids(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|s| s.as_str())
    }

    /// Roll a table by monster id
    pub fn roll<R: Rng>(&self, monster_id: &str, rng: &mut R) -> Result<Loot, RollError> {
        let table = self
            .get(monster_id)
            .ok_or_else(|| RollError::UnknownTable(monster_id.to_string()))?;

        Ok(table.generate_loot(rng))
    }
}
