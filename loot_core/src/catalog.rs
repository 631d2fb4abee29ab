//! Item catalog: the built-in item set plus TOML-loaded additions

use crate::item::Item;
use crate::types::*;
use crate::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// TOML layout of an item catalog file
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    items: Vec<Item>,
}

/// Lookup of items by id
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<String, Item>,
}

impl ItemCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The item set shipped with the game
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for item in builtin_items() {
            catalog.insert(item);
        }
        catalog
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: path.to_path_buf(),
        })?;
        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                error,
                path: path.to_path_buf(),
            },
            ConfigError::Validation { message, .. } => ConfigError::Validation {
                message,
                path: path.to_path_buf(),
            },
            other => other,
        })
    }

    /// Parse a catalog from a TOML string
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            error: e,
            path: Default::default(),
        })?;

        let mut catalog = Self::new();
        for item in file.items {
            validate(&item).map_err(|message| ConfigError::Validation {
                message,
                path: Default::default(),
            })?;
            if catalog.items.contains_key(&item.id) {
                return Err(ConfigError::Validation {
                    message: format!("duplicate item id '{}'", item.id),
                    path: Default::default(),
                });
            }
            catalog.insert(item);
        }
        Ok(catalog)
    }

    /// Add or replace an item
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    /// Merge another catalog into this one; entries in `other` win
    pub fn extend(&mut self, other: ItemCatalog) {
        self.items.extend(other.items);
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All item ids in sorted order
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(|s| s.as_str())
    }
}

fn validate(item: &Item) -> Result<(), String> {
    match item.item_type {
        ItemType::Equipment if item.equipment_slot.is_none() => {
            Err(format!("equipment '{}' has no equipment_slot", item.id))
        }
        ItemType::Consumable if item.consumable_effect.is_none() => {
            Err(format!("consumable '{}' has no consumable_effect", item.id))
        }
        _ => Ok(()),
    }
}

fn builtin_items() -> Vec<Item> {
    let bonus = |strength: f64, dexterity: f64, intelligence: f64, vitality: f64| StatBonus {
        strength,
        dexterity,
        intelligence,
        vitality,
        ..Default::default()
    };

    vec![
        // Weapons
        Item::equipment(
            "weapon_rusty_sword",
            "Rusty Sword",
            "An old, rusty sword. Better than nothing.",
            ItemRarity::Common,
            5,
            EquipmentSlot::MainHand,
            bonus(2.0, 0.0, 0.0, 0.0),
        ),
        Item::equipment(
            "weapon_iron_sword",
            "Iron Sword",
            "A standard iron sword.",
            ItemRarity::Common,
            25,
            EquipmentSlot::MainHand,
            bonus(5.0, 0.0, 0.0, 0.0),
        ),
        Item::equipment(
            "weapon_steel_sword",
            "Steel Sword",
            "A well-crafted steel sword.",
            ItemRarity::Uncommon,
            100,
            EquipmentSlot::MainHand,
            bonus(8.0, 2.0, 0.0, 0.0),
        )
        .with_level_requirement(2),
        Item::equipment(
            "weapon_wooden_staff",
            "Wooden Staff",
            "A simple wooden staff.",
            ItemRarity::Common,
            15,
            EquipmentSlot::MainHand,
            bonus(0.0, 0.0, 3.0, 0.0),
        ),
        // Armour
        Item::equipment(
            "armor_leather_helmet",
            "Leather Helmet",
            "A basic leather helmet.",
            ItemRarity::Common,
            10,
            EquipmentSlot::Head,
            bonus(0.0, 0.0, 0.0, 1.0),
        ),
        Item::equipment(
            "armor_leather_chest",
            "Leather Chest",
            "A basic leather chest piece.",
            ItemRarity::Common,
            20,
            EquipmentSlot::Chest,
            bonus(0.0, 0.0, 0.0, 2.0),
        ),
        Item::equipment(
            "armor_iron_helmet",
            "Iron Helmet",
            "A sturdy iron helmet.",
            ItemRarity::Uncommon,
            50,
            EquipmentSlot::Head,
            bonus(0.0, 0.0, 0.0, 3.0),
        ),
        Item::equipment(
            "ring_of_wisdom",
            "Ring of Wisdom",
            "A mystical ring that enhances magical abilities.",
            ItemRarity::Rare,
            150,
            EquipmentSlot::Ring,
            bonus(0.0, 0.0, 8.0, 0.0),
        )
        .with_level_requirement(3),
        // Consumables
        Item::consumable(
            "consumable_health_potion",
            "Health Potion",
            "Restores 50 health points.",
            ItemRarity::Common,
            15,
            ConsumableEffect::new(ConsumableKind::Heal, 50.0),
        ),
        Item::consumable(
            "consumable_mana_potion",
            "Mana Potion",
            "Restores 30 mana points.",
            ItemRarity::Common,
            15,
            ConsumableEffect::new(ConsumableKind::Mana, 30.0),
        ),
        Item::consumable(
            "consumable_strength_potion",
            "Strength Potion",
            "Increases strength by 5 for 3 turns.",
            ItemRarity::Uncommon,
            30,
            ConsumableEffect::new(ConsumableKind::Buff, 5.0).with_duration(3),
        ),
    ]
}
