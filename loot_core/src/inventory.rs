//! Player inventory: carried items, equipped gear and gold

use crate::item::Item;
use crate::types::{ConsumableEffect, EquipmentSlot, StatBonus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default number of carried items
pub const DEFAULT_CAPACITY: usize = 20;

/// Carried items, equipped items and gold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
    equipped: BTreeMap<EquipmentSlot, Item>,
    gold: u64,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Inventory {
            items: Vec::new(),
            equipped: BTreeMap::new(),
            gold: 0,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn gold(&self) -> u64 {
        self.gold
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Add an item; returns false (and drops nothing) when the bag is full
    pub fn add_item(&mut self, item: Item) -> bool {
        if self.is_full() {
            tracing::debug!(item = %item.id, "inventory full, item discarded");
            return false;
        }
        self.items.push(item);
        true
    }

    /// Remove the item at `index`
    pub fn remove_item(&mut self, index: usize) -> Option<Item> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Equip the item at `index`, swapping out whatever occupied its slot
    ///
    /// Returns false when the index is out of range or the item is not equipment.
    pub fn equip(&mut self, index: usize) -> bool {
        let slot = match self.items.get(index) {
            Some(item) if item.is_equipment() => item.equipment_slot,
            _ => None,
        };
        let Some(slot) = slot else {
            return false;
        };

        let item = self.items.remove(index);
        if let Some(previous) = self.equipped.insert(slot, item) {
            self.items.push(previous);
        }
        true
    }

    /// Move the item in `slot` back into the bag if there is room
    pub fn unequip(&mut self, slot: EquipmentSlot) -> bool {
        if self.is_full() || !self.equipped.contains_key(&slot) {
            return false;
        }
        match self.equipped.remove(&slot) {
            Some(item) => {
                self.items.push(item);
                true
            }
            None => false,
        }
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipped.get(&slot)
    }

    /// Iterate over equipped items in slot order
    pub fn equipped_items(&self) -> impl Iterator<Item = &Item> {
        self.equipped.values()
    }

    /// Carried and equipped items together
    pub fn all_items(&self) -> Vec<&Item> {
        self.items.iter().chain(self.equipped.values()).collect()
    }

    /// Summed bonuses of everything equipped
    pub fn equipment_bonus(&self) -> StatBonus {
        self.equipped
            .values()
            .fold(StatBonus::default(), |acc, item| acc.combine(&item.bonuses()))
    }

    /// Consume the consumable at `index`, returning its effect
    ///
    /// Nothing is removed when the index is invalid or the item is not consumable.
    pub fn use_item(&mut self, index: usize) -> Option<ConsumableEffect> {
        let effect = self
            .items
            .get(index)
            .filter(|item| item.is_consumable())
            .and_then(|item| item.consumable_effect)?;
        self.items.remove(index);
        Some(effect)
    }

    pub fn add_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Remove gold, flooring at zero
    pub fn remove_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_sub(amount);
    }

    pub fn upgrade_capacity(&mut self, extra: usize) {
        self.capacity += extra;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;

    fn item(id: &str) -> Item {
        ItemCatalog::builtin().get(id).cloned().unwrap()
    }

    #[test]
    fn test_capacity_limit() {
        let mut inventory = Inventory::new();
        for _ in 0..DEFAULT_CAPACITY {
            assert!(inventory.add_item(item("consumable_health_potion")));
        }
        assert!(!inventory.add_item(item("consumable_mana_potion")));
        assert_eq!(inventory.items().len(), DEFAULT_CAPACITY);

        inventory.upgrade_capacity(5);
        assert!(inventory.add_item(item("consumable_mana_potion")));
    }

    #[test]
    fn test_equip_swaps_slot() {
        let mut inventory = Inventory::new();
        inventory.add_item(item("weapon_rusty_sword"));
        inventory.add_item(item("weapon_iron_sword"));

        assert!(inventory.equip(0));
        assert_eq!(
            inventory.equipped(EquipmentSlot::MainHand).unwrap().id,
            "weapon_rusty_sword"
        );

        // Iron sword is now at index 0; equipping it returns the rusty sword to the bag
        assert!(inventory.equip(0));
        assert_eq!(
            inventory.equipped(EquipmentSlot::MainHand).unwrap().id,
            "weapon_iron_sword"
        );
        assert_eq!(inventory.items().len(), 1);
        assert_eq!(inventory.items()[0].id, "weapon_rusty_sword");
    }

    #[test]
    fn test_equip_rejects_consumable() {
        let mut inventory = Inventory::new();
        inventory.add_item(item("consumable_health_potion"));
        assert!(!inventory.equip(0));
        assert!(!inventory.equip(7));
        assert_eq!(inventory.items().len(), 1);
    }

    #[test]
    fn test_unequip_needs_room() {
        let mut inventory = Inventory::new();
        inventory.add_item(item("armor_iron_helmet"));
        assert!(inventory.equip(0));

        for _ in 0..DEFAULT_CAPACITY {
            inventory.add_item(item("consumable_health_potion"));
        }
        assert!(!inventory.unequip(EquipmentSlot::Head));

        inventory.remove_item(0);
        assert!(inventory.unequip(EquipmentSlot::Head));
        assert!(inventory.equipped(EquipmentSlot::Head).is_none());
    }

    #[test]
    fn test_equipment_bonus_sums_slots() {
        let mut inventory = Inventory::new();
        inventory.add_item(item("weapon_steel_sword"));
        inventory.add_item(item("armor_leather_chest"));
        inventory.equip(0);
        inventory.equip(0);

        let bonus = inventory.equipment_bonus();
        assert!((bonus.strength - 8.0).abs() < f64::EPSILON);
        assert!((bonus.dexterity - 2.0).abs() < f64::EPSILON);
        assert!((bonus.vitality - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_use_item_consumes_only_consumables() {
        let mut inventory = Inventory::new();
        inventory.add_item(item("weapon_iron_sword"));
        inventory.add_item(item("consumable_mana_potion"));

        assert!(inventory.use_item(0).is_none());
        assert_eq!(inventory.items().len(), 2);

        let effect = inventory.use_item(1).unwrap();
        assert!((effect.value - 30.0).abs() < f64::EPSILON);
        assert_eq!(inventory.items().len(), 1);
    }

    #[test]
    fn test_gold_floors_at_zero() {
        let mut inventory = Inventory::new();
        inventory.add_gold(12);
        inventory.remove_gold(50);
        assert_eq!(inventory.gold(), 0);
    }

    #[test]
    fn test_inventory_round_trips_json() {
        let mut inventory = Inventory::new();
        inventory.add_item(item("armor_leather_helmet"));
        inventory.add_item(item("consumable_strength_potion"));
        inventory.equip(0);
        inventory.add_gold(42);

        let json = serde_json::to_string(&inventory).unwrap();
        let restored: Inventory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, inventory);
    }
}
