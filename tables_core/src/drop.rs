use loot_core::Item;
use serde::{Deserialize, Serialize};

/// Result of rolling a loot table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loot {
    pub items: Vec<Item>,
    pub gold: u32,
}

impl Loot {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.gold == 0
    }
}
