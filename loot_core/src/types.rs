use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Equipment,
    Consumable,
    Quest,
    Material,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Equipment => write!(f, "Equipment"),
            ItemType::Consumable => write!(f, "Consumable"),
            ItemType::Quest => write!(f, "Quest"),
            ItemType::Material => write!(f, "Material"),
        }
    }
}

/// Equipment slot an item can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Head,
    Chest,
    Legs,
    Feet,
    MainHand,
    OffHand,
    Neck,
    Ring,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Head,
            EquipmentSlot::Chest,
            EquipmentSlot::Legs,
            EquipmentSlot::Feet,
            EquipmentSlot::MainHand,
            EquipmentSlot::OffHand,
            EquipmentSlot::Neck,
            EquipmentSlot::Ring,
        ]
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentSlot::Head => write!(f, "Head"),
            EquipmentSlot::Chest => write!(f, "Chest"),
            EquipmentSlot::Legs => write!(f, "Legs"),
            EquipmentSlot::Feet => write!(f, "Feet"),
            EquipmentSlot::MainHand => write!(f, "MainHand"),
            EquipmentSlot::OffHand => write!(f, "OffHand"),
            EquipmentSlot::Neck => write!(f, "Neck"),
            EquipmentSlot::Ring => write!(f, "Ring"),
        }
    }
}

/// Item rarity tiers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemRarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for ItemRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemRarity::Common => write!(f, "Common"),
            ItemRarity::Uncommon => write!(f, "Uncommon"),
            ItemRarity::Rare => write!(f, "Rare"),
            ItemRarity::Epic => write!(f, "Epic"),
            ItemRarity::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Flat attribute bonuses granted by equipment
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBonus {
    #[serde(default)]
    pub strength: f64,
    #[serde(default)]
    pub dexterity: f64,
    #[serde(default)]
    pub intelligence: f64,
    #[serde(default)]
    pub vitality: f64,
    #[serde(default)]
    pub health: f64,
    #[serde(default)]
    pub mana: f64,
}

impl StatBonus {
    /// Sum two bonus sets field by field
    pub fn combine(&self, other: &StatBonus) -> StatBonus {
        StatBonus {
            strength: self.strength + other.strength,
            dexterity: self.dexterity + other.dexterity,
            intelligence: self.intelligence + other.intelligence,
            vitality: self.vitality + other.vitality,
            health: self.health + other.health,
            mana: self.mana + other.mana,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StatBonus::default()
    }
}

/// What a consumable does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableKind {
    /// Restore health
    Heal,
    /// Restore mana
    Mana,
    /// Temporary strength increase
    Buff,
    /// Damage the opponent
    Damage,
}

/// Effect of a consumable item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumableEffect {
    #[serde(rename = "type")]
    pub kind: ConsumableKind,
    pub value: f64,
    /// Duration in turns (buffs only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl ConsumableEffect {
    pub fn new(kind: ConsumableKind, value: f64) -> Self {
        ConsumableEffect {
            kind,
            value,
            duration: None,
        }
    }

    pub fn with_duration(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }
}

impl fmt::Display for ConsumableEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConsumableKind::Heal => write!(f, "Restores {} health", self.value),
            ConsumableKind::Mana => write!(f, "Restores {} mana", self.value),
            ConsumableKind::Buff => match self.duration {
                Some(turns) => write!(f, "+{} strength for {} turns", self.value, turns),
                None => write!(f, "+{} strength", self.value),
            },
            ConsumableKind::Damage => write!(f, "Deals {} damage", self.value),
        }
    }
}
