use crate::config::{CountConfig, EntryConfig, TableFileConfig};
use crate::drop::Loot;
use crate::RollError;
use loot_core::{Item, ItemCatalog};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-monster loot specification
///
/// Every entry is rolled independently against its drop rate, so a table
/// can yield any number of items including none. Gold always drops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTable {
    pub monster_id: String,
    #[serde(default)]
    pub possible_items: Vec<LootEntry>,
    pub gold_range: GoldRange,
}

/// An item and its independent drop probability in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: Item,
    pub drop_rate: f64,
}

/// Inclusive gold range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRange {
    pub min: u32,
    pub max: u32,
}

impl GoldRange {
    pub fn new(min: u32, max: u32) -> Self {
        GoldRange { min, max }
    }

    pub fn contains(&self, gold: u32) -> bool {
        gold >= self.min && gold <= self.max
    }

    fn roll<R: Rng>(&self, rng: &mut R) -> u32 {
        if self.max <= self.min {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }
}

impl LootTable {
    /// A table that only drops gold
    pub fn gold_only(monster_id: impl Into<String>, min: u32, max: u32) -> Self {
        LootTable {
            monster_id: monster_id.into(),
            possible_items: Vec::new(),
            gold_range: GoldRange::new(min, max),
        }
    }

    /// Add a possible drop; the rate is clamped into [0, 1]
    pub fn with_item(mut self, item: Item, drop_rate: f64) -> Self {
        self.possible_items.push(LootEntry {
            item,
            drop_rate: drop_rate.clamp(0.0, 1.0),
        });
        self
    }

    /// Build a table from config, resolving item ids against the catalog
    pub fn from_config(config: TableFileConfig, catalog: &ItemCatalog) -> Result<Self, RollError> {
        let gold = config.table.gold.unwrap_or(CountConfig::Single(0));
        if gold.min() > gold.max() {
            return Err(RollError::InvalidGoldRange {
                min: gold.min(),
                max: gold.max(),
            });
        }

        let possible_items = config
            .entries
            .into_iter()
            .map(|entry| LootEntry::from_config(entry, catalog))
            .collect::<Result<_, _>>()?;

        Ok(LootTable {
            monster_id: config.table.monster_id,
            possible_items,
            gold_range: GoldRange::new(gold.min(), gold.max()),
        })
    }

    /// Roll this table and return the drops
    ///
    /// Each entry drops when a uniform draw in [0, 1) is at most its rate.
    /// A rate of zero never drops.
    pub fn generate_loot<R: Rng>(&self, rng: &mut R) -> Loot {
        let items: Vec<Item> = self
            .possible_items
            .iter()
            .filter(|entry| {
                let roll = rng.gen::<f64>();
                entry.drop_rate > 0.0 && roll <= entry.drop_rate
            })
            .map(|entry| entry.item.clone())
            .collect();

        let gold = self.gold_range.roll(rng);

        tracing::debug!(
            monster = %self.monster_id,
            items = items.len(),
            gold,
            "loot generated"
        );

        Loot { items, gold }
    }
}

impl LootEntry {
    fn from_config(config: EntryConfig, catalog: &ItemCatalog) -> Result<Self, RollError> {
        if !(0.0..=1.0).contains(&config.drop_rate) {
            return Err(RollError::InvalidDropRate {
                item: config.item,
                rate: config.drop_rate,
            });
        }

        let item = catalog
            .get(&config.item)
            .cloned()
            .ok_or(RollError::UnknownItem(config.item))?;

        Ok(LootEntry {
            item,
            drop_rate: config.drop_rate,
        })
    }
}
