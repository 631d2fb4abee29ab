use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An item as carried in an inventory or listed in a loot table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable catalog identifier
    pub id: String,
    /// Display name
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Sell value in gold
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub rarity: ItemRarity,
    #[serde(default = "default_level_requirement")]
    pub level_requirement: u32,

    // === Equipment ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment_slot: Option<EquipmentSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_bonuses: Option<StatBonus>,

    // === Consumable ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumable_effect: Option<ConsumableEffect>,

    // === Quest ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quest_id: Option<String>,

    // === Material ===
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub crafting_uses: Vec<String>,
}

fn default_level_requirement() -> u32 {
    1
}

impl Item {
    fn base(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        item_type: ItemType,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            item_type,
            value: 0,
            rarity: ItemRarity::Common,
            level_requirement: 1,
            equipment_slot: None,
            stat_bonuses: None,
            consumable_effect: None,
            quest_id: None,
            crafting_uses: Vec::new(),
        }
    }

    /// Create a piece of equipment
    pub fn equipment(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        rarity: ItemRarity,
        value: u32,
        slot: EquipmentSlot,
        bonuses: StatBonus,
    ) -> Self {
        let mut item = Self::base(id, name, description, ItemType::Equipment);
        item.rarity = rarity;
        item.value = value;
        item.equipment_slot = Some(slot);
        item.stat_bonuses = Some(bonuses);
        item
    }

    /// Create a consumable
    pub fn consumable(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        rarity: ItemRarity,
        value: u32,
        effect: ConsumableEffect,
    ) -> Self {
        let mut item = Self::base(id, name, description, ItemType::Consumable);
        item.rarity = rarity;
        item.value = value;
        item.consumable_effect = Some(effect);
        item
    }

    /// Create a quest item (always common, worthless)
    pub fn quest(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        quest_id: impl Into<String>,
    ) -> Self {
        let mut item = Self::base(id, name, description, ItemType::Quest);
        item.quest_id = Some(quest_id.into());
        item
    }

    /// Create a crafting material
    pub fn material(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        rarity: ItemRarity,
        value: u32,
        crafting_uses: Vec<String>,
    ) -> Self {
        let mut item = Self::base(id, name, description, ItemType::Material);
        item.rarity = rarity;
        item.value = value;
        item.crafting_uses = crafting_uses;
        item
    }

    pub fn with_level_requirement(mut self, level: u32) -> Self {
        self.level_requirement = level;
        self
    }

    pub fn is_equipment(&self) -> bool {
        self.item_type == ItemType::Equipment && self.equipment_slot.is_some()
    }

    pub fn is_consumable(&self) -> bool {
        self.item_type == ItemType::Consumable && self.consumable_effect.is_some()
    }

    /// Equipment bonuses, or an empty bonus set for anything else
    pub fn bonuses(&self) -> StatBonus {
        self.stat_bonuses.unwrap_or_default()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.name)?;
        writeln!(f, "{} ({})", self.item_type, self.rarity)?;
        writeln!(f, "{}", self.description)?;

        if let Some(slot) = self.equipment_slot {
            writeln!(f, "Slot: {}", slot)?;
        }

        if let Some(ref bonuses) = self.stat_bonuses {
            let parts: Vec<String> = [
                ("Str", bonuses.strength),
                ("Dex", bonuses.dexterity),
                ("Int", bonuses.intelligence),
                ("Vit", bonuses.vitality),
                ("Health", bonuses.health),
                ("Mana", bonuses.mana),
            ]
            .iter()
            .filter(|(_, v)| *v != 0.0)
            .map(|(name, v)| format!("+{} {}", v, name))
            .collect();
            if !parts.is_empty() {
                writeln!(f, "Bonuses: {}", parts.join(", "))?;
            }
        }

        if let Some(effect) = self.consumable_effect {
            writeln!(f, "Use: {}", effect)?;
        }

        if self.level_requirement > 1 {
            writeln!(f, "Requires: Level {}", self.level_requirement)?;
        }

        write!(f, "Value: {} gold", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_constructor() {
        let sword = Item::equipment(
            "weapon_iron_sword",
            "Iron Sword",
            "A standard iron sword.",
            ItemRarity::Common,
            25,
            EquipmentSlot::MainHand,
            StatBonus {
                strength: 5.0,
                ..Default::default()
            },
        );

        assert!(sword.is_equipment());
        assert!(!sword.is_consumable());
        assert_eq!(sword.equipment_slot, Some(EquipmentSlot::MainHand));
        assert!((sword.bonuses().strength - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_consumable_has_no_bonuses() {
        let potion = Item::consumable(
            "consumable_health_potion",
            "Health Potion",
            "Restores 50 health points.",
            ItemRarity::Common,
            15,
            ConsumableEffect::new(ConsumableKind::Heal, 50.0),
        );

        assert!(potion.is_consumable());
        assert!(potion.bonuses().is_empty());
    }

    #[test]
    fn test_quest_item_defaults() {
        let letter = Item::quest("quest_letter", "Sealed Letter", "Deliver it.", "q_courier");
        assert_eq!(letter.rarity, ItemRarity::Common);
        assert_eq!(letter.value, 0);
        assert_eq!(letter.quest_id.as_deref(), Some("q_courier"));
    }

    #[test]
    fn test_display_lists_bonuses() {
        let staff = Item::equipment(
            "weapon_wooden_staff",
            "Wooden Staff",
            "A simple wooden staff.",
            ItemRarity::Common,
            15,
            EquipmentSlot::MainHand,
            StatBonus {
                intelligence: 3.0,
                ..Default::default()
            },
        );

        let text = staff.to_string();
        assert!(text.contains("Wooden Staff"));
        assert!(text.contains("+3 Int"));
        assert!(text.contains("Slot: MainHand"));
    }

    #[test]
    fn test_json_shape() {
        let potion = Item::consumable(
            "consumable_mana_potion",
            "Mana Potion",
            "Restores 30 mana points.",
            ItemRarity::Common,
            15,
            ConsumableEffect::new(ConsumableKind::Mana, 30.0),
        );

        let json = serde_json::to_value(&potion).unwrap();
        assert_eq!(json["type"], "consumable");
        assert_eq!(json["consumable_effect"]["type"], "mana");
        assert!(json.get("equipment_slot").is_none());
    }
}
