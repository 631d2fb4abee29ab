use loot_core::Item;
use serde::{Deserialize, Serialize};

/// Receives the spoils of a won encounter
///
/// Implementations must not fail; rewards are granted all at once.
pub trait RewardSink {
    /// Returns the number of levels gained
    fn gain_experience(&mut self, amount: u32) -> u32;
    fn add_gold(&mut self, amount: u64);
    fn add_item(&mut self, item: Item);
}

/// What a won encounter paid out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rewards {
    pub experience: u32,
    pub levels_gained: u32,
    pub gold: u32,
    pub items: Vec<Item>,
}
