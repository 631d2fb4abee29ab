//! Timed status effects and the per-combatant ledger that tracks them

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stat targeted by a modifier effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifiedStat {
    AllStats,
    Strength,
    Dexterity,
    Intelligence,
    Vitality,
    Defense,
}

impl fmt::Display for ModifiedStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifiedStat::AllStats => write!(f, "all_stats"),
            ModifiedStat::Strength => write!(f, "strength"),
            ModifiedStat::Dexterity => write!(f, "dexterity"),
            ModifiedStat::Intelligence => write!(f, "intelligence"),
            ModifiedStat::Vitality => write!(f, "vitality"),
            ModifiedStat::Defense => write!(f, "defense"),
        }
    }
}

/// What a status effect does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Stun,
    /// Deals its magnitude as damage every turn
    Poison,
    Freeze,
    Fear,
    /// Signed modifier; negative magnitude is a debuff
    StatModifier(ModifiedStat),
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Stun => write!(f, "stun"),
            EffectKind::Poison => write!(f, "poison"),
            EffectKind::Freeze => write!(f, "freeze"),
            EffectKind::Fear => write!(f, "fear"),
            EffectKind::StatModifier(stat) => write!(f, "{}", stat),
        }
    }
}

/// A timed effect on a combatant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: EffectKind,
    #[serde(default)]
    pub magnitude: f64,
    /// Turns remaining
    pub duration: u32,
}

impl StatusEffect {
    pub fn new(kind: EffectKind, magnitude: f64, duration: u32) -> Self {
        StatusEffect {
            kind,
            magnitude,
            duration,
        }
    }

    pub fn stun(duration: u32) -> Self {
        Self::new(EffectKind::Stun, 0.0, duration)
    }

    pub fn freeze(duration: u32) -> Self {
        Self::new(EffectKind::Freeze, 0.0, duration)
    }

    pub fn poison(damage_per_turn: f64, duration: u32) -> Self {
        Self::new(EffectKind::Poison, damage_per_turn, duration)
    }

    pub fn modifier(stat: ModifiedStat, value: f64, duration: u32) -> Self {
        Self::new(EffectKind::StatModifier(stat), value, duration)
    }

    pub fn is_debuff(&self) -> bool {
        match self.kind {
            EffectKind::StatModifier(_) => self.magnitude < 0.0,
            _ => true,
        }
    }
}

/// Active effects on one combatant, in application order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectLedger {
    effects: Vec<StatusEffect>,
}

impl EffectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: StatusEffect) {
        self.effects.push(effect);
    }

    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn has(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Decrement every duration and drop effects that reach zero
    ///
    /// Returns the number of effects that expired.
    pub fn advance(&mut self) -> usize {
        let before = self.effects.len();
        for effect in &mut self.effects {
            effect.duration = effect.duration.saturating_sub(1);
        }
        self.effects.retain(|e| e.duration > 0);
        before - self.effects.len()
    }

    /// Damage of each active poison, one entry per effect
    pub fn poison_ticks(&self) -> impl Iterator<Item = f64> + '_ {
        self.effects
            .iter()
            .filter(|e| e.kind == EffectKind::Poison)
            .map(|e| e.magnitude)
    }

    /// Net modifier currently applied to a stat, counting `AllStats`
    pub fn modifier_total(&self, stat: ModifiedStat) -> f64 {
        self.effects
            .iter()
            .filter_map(|e| match e.kind {
                EffectKind::StatModifier(s) if s == stat || s == ModifiedStat::AllStats => {
                    Some(e.magnitude)
                }
                _ => None,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_drops_expired() {
        let mut ledger = EffectLedger::new();
        ledger.push(StatusEffect::stun(1));
        ledger.push(StatusEffect::freeze(2));

        assert_eq!(ledger.advance(), 1);
        assert_eq!(ledger.len(), 1);
        assert!(ledger.has(EffectKind::Freeze));
        assert!(!ledger.has(EffectKind::Stun));

        assert_eq!(ledger.advance(), 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_zero_duration_dropped_on_first_advance() {
        let mut ledger = EffectLedger::new();
        ledger.push(StatusEffect::stun(0));
        ledger.advance();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_poison_ticks() {
        let mut ledger = EffectLedger::new();
        ledger.push(StatusEffect::poison(4.5, 3));
        ledger.push(StatusEffect::stun(2));
        ledger.push(StatusEffect::poison(1.0, 1));

        let ticks: Vec<f64> = ledger.poison_ticks().collect();
        assert_eq!(ticks, vec![4.5, 1.0]);
    }

    #[test]
    fn test_modifier_total() {
        let mut ledger = EffectLedger::new();
        ledger.push(StatusEffect::modifier(ModifiedStat::Strength, 5.0, 3));
        ledger.push(StatusEffect::modifier(ModifiedStat::Defense, -2.0, 3));
        ledger.push(StatusEffect::modifier(ModifiedStat::AllStats, 2.0, 3));

        assert!((ledger.modifier_total(ModifiedStat::Strength) - 7.0).abs() < f64::EPSILON);
        assert!((ledger.modifier_total(ModifiedStat::Defense) - 0.0).abs() < f64::EPSILON);
        assert!((ledger.modifier_total(ModifiedStat::Vitality) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_debuff_detection() {
        assert!(StatusEffect::modifier(ModifiedStat::Defense, -2.0, 3).is_debuff());
        assert!(!StatusEffect::modifier(ModifiedStat::Strength, 5.0, 3).is_debuff());
        assert!(StatusEffect::poison(3.0, 3).is_debuff());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(EffectKind::Stun.to_string(), "stun");
        assert_eq!(
            EffectKind::StatModifier(ModifiedStat::AllStats).to_string(),
            "all_stats"
        );
    }

    #[test]
    fn test_ledger_serializes_as_list() {
        let mut ledger = EffectLedger::new();
        ledger.push(StatusEffect::poison(3.0, 2));
        let json = serde_json::to_string(&ledger).unwrap();
        assert!(json.starts_with('['));
        let back: EffectLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ledger);
    }
}
