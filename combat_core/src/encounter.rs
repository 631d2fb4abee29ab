//! The combat encounter aggregate
//!
//! Holds both sides' resources, the full monster record, the player's ability
//! cooldowns, two effect ledgers, the turn counter and the append-only log.
//! All fields are private; state only changes through the operations below.

use crate::action::CombatAction;
use crate::error::CombatError;
use loot_core::{ConsumableEffect, ConsumableKind};
use rand::Rng;
use serde::{Deserialize, Serialize};
use stat_core::config::constants;
use stat_core::{
    Ability, AbilityEffect, AbilityError, Combatant, EffectLedger, ModifiedStat, Monster, Stats,
    StatusEffect,
};

/// Turns a strength potion lasts when the item does not say
const DEFAULT_BUFF_DURATION: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    monster: Monster,
    player_health: f64,
    player_mana: f64,
    monster_health: f64,
    abilities: Vec<Ability>,
    player_effects: EffectLedger,
    monster_effects: EffectLedger,
    turn: u32,
    log: Vec<String>,
    active: bool,
}

impl Encounter {
    /// Open an encounter; the monster fights at its full spawned health
    pub fn start(
        monster: Monster,
        player_health: f64,
        player_mana: f64,
        abilities: Vec<Ability>,
    ) -> Self {
        let monster_health = monster.max_health();
        let log = vec![format!("Combat started with {}!", monster.name)];

        tracing::info!(monster = %monster.name, monster_health, player_health, "combat started");

        Encounter {
            monster,
            player_health,
            player_mana,
            monster_health,
            abilities,
            player_effects: EffectLedger::new(),
            monster_effects: EffectLedger::new(),
            turn: 0,
            log,
            active: true,
        }
    }

    pub fn monster(&self) -> &Monster {
        &self.monster
    }

    pub fn player_health(&self) -> f64 {
        self.player_health
    }

    pub fn player_mana(&self) -> f64 {
        self.player_mana
    }

    pub fn monster_health(&self) -> f64 {
        self.monster_health
    }

    pub fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    pub fn player_effects(&self) -> &EffectLedger {
        &self.player_effects
    }

    pub fn monster_effects(&self) -> &EffectLedger {
        &self.monster_effects
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn monster_defeated(&self) -> bool {
        self.monster_health <= 0.0
    }

    pub fn player_defeated(&self) -> bool {
        self.player_health <= 0.0
    }

    pub(crate) fn record(&mut self, line: String) {
        self.log.push(line);
    }

    /// Validate an ability and start its cooldown
    ///
    /// The effect is computed from `stats` at the moment of use. Nothing
    /// changes when the ability is missing or still cooling down.
    pub fn use_ability(&mut self, index: usize, stats: &Stats) -> Result<CombatAction, CombatError> {
        let count = self.abilities.len();
        let ability = self
            .abilities
            .get_mut(index)
            .ok_or(AbilityError::InvalidIndex { index, count })?;

        ability.try_use()?;

        Ok(CombatAction::Ability {
            mana_cost: constants().combat.ability_mana_cost,
            effect: ability.execute(stats),
            description: ability.name.clone(),
        })
    }

    /// Apply a validated player action
    pub fn apply_player_action(&mut self, action: CombatAction) {
        match action {
            CombatAction::Attack {
                damage,
                description,
            } => {
                self.damage_monster(damage);
                self.log
                    .push(format!("Player {} for {} damage.", description, damage));
            }
            CombatAction::Ability {
                mana_cost,
                effect,
                description,
            } => {
                self.player_mana = (self.player_mana - mana_cost).max(0.0);
                self.log.push(format!("Player used {}.", description));
                self.apply_ability_effect(effect);
            }
            CombatAction::Item {
                effect,
                description,
            } => {
                self.log.push(format!("Player used {}.", description));
                self.apply_item_effect(effect);
            }
        }

        if self.monster_defeated() {
            self.log.push(format!("{} was defeated!", self.monster.name));
        }
    }

    fn apply_ability_effect(&mut self, effect: AbilityEffect) {
        match effect {
            AbilityEffect::Damage(value) => {
                self.damage_monster(value);
                self.log
                    .push(format!("Dealt {} damage to {}.", value, self.monster.name));
            }
            AbilityEffect::Heal(value) => {
                // Healing is not capped at max health
                self.player_health += value;
                self.log.push(format!("Healed for {} health.", value));
            }
            AbilityEffect::Buff(buff) => {
                self.log.push(format!(
                    "Gained {} buff for {} turns.",
                    buff.kind, buff.duration
                ));
                self.player_effects.push(buff);
            }
            AbilityEffect::DamageAndEffect { damage, effect } => {
                self.damage_monster(damage);
                self.log
                    .push(format!("Dealt {} damage to {}.", damage, self.monster.name));
                self.log.push(format!(
                    "Applied {} effect to {} for {} turns.",
                    effect.kind, self.monster.name, effect.duration
                ));
                self.monster_effects.push(effect);
            }
            AbilityEffect::BuffAndDebuff { buffs, debuffs } => {
                for buff in buffs {
                    self.log.push(format!(
                        "Gained {} buff for {} turns.",
                        buff.kind, buff.duration
                    ));
                    self.player_effects.push(buff);
                }
                for debuff in debuffs {
                    self.log.push(format!(
                        "Suffered {} debuff for {} turns.",
                        debuff.kind, debuff.duration
                    ));
                    self.player_effects.push(debuff);
                }
            }
        }
    }

    fn apply_item_effect(&mut self, effect: ConsumableEffect) {
        match effect.kind {
            ConsumableKind::Heal => {
                self.player_health += effect.value;
                self.log.push(format!("Healed for {} health.", effect.value));
            }
            ConsumableKind::Mana => {
                self.player_mana += effect.value;
                self.log.push(format!("Restored {} mana.", effect.value));
            }
            ConsumableKind::Buff => {
                let buff = StatusEffect::modifier(
                    ModifiedStat::Strength,
                    effect.value,
                    effect.duration.unwrap_or(DEFAULT_BUFF_DURATION),
                );
                self.log.push(format!(
                    "Gained {} buff for {} turns.",
                    buff.kind, buff.duration
                ));
                self.player_effects.push(buff);
            }
            ConsumableKind::Damage => {
                self.damage_monster(effect.value);
                self.log.push(format!(
                    "Dealt {} damage to {}.",
                    effect.value, self.monster.name
                ));
            }
        }
    }

    /// The monster picks an attack and strikes the player
    pub fn resolve_monster_turn<R: Rng>(&mut self, rng: &mut R) {
        let attack = self.monster.choose_attack(rng);

        self.player_health = (self.player_health - attack.damage).max(0.0);
        self.log.push(format!(
            "{} {} for {} damage.",
            self.monster.name, attack.description, attack.damage
        ));

        for effect in attack.effects {
            self.log.push(format!(
                "{} inflicted {} for {} turns.",
                self.monster.name, effect.kind, effect.duration
            ));
            self.player_effects.push(effect);
        }

        if self.player_defeated() {
            self.log.push("Player was defeated!".to_string());
        }
    }

    /// Count one turn off every player ability and monster attack
    pub fn tick_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.tick();
        }
        self.monster.update_cooldowns();
    }

    /// Move to the next turn and age every status effect
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.log.push(format!("--- Turn {} ---", self.turn));

        let expired = self.player_effects.advance() + self.monster_effects.advance();
        tracing::debug!(turn = self.turn, expired, "turn advanced");
    }

    /// Apply poison ticks from both ledgers
    pub fn apply_status_effects(&mut self) {
        let monster_ticks: Vec<f64> = self.monster_effects.poison_ticks().collect();
        for damage in monster_ticks {
            self.damage_monster(damage);
            self.log.push(format!(
                "{} took {} poison damage.",
                self.monster.name, damage
            ));
        }

        let player_ticks: Vec<f64> = self.player_effects.poison_ticks().collect();
        for damage in player_ticks {
            self.player_health = (self.player_health - damage).max(0.0);
            self.log.push(format!("Player took {} poison damage.", damage));
        }

        if self.monster_defeated() {
            self.log.push(format!("{} was defeated!", self.monster.name));
        }
        if self.player_defeated() {
            self.log.push("Player was defeated!".to_string());
        }
    }

    /// Close the encounter
    pub fn end(&mut self) {
        if self.active {
            self.log.push("Combat ended.".to_string());
            self.active = false;
            tracing::info!(monster = %self.monster.name, turns = self.turn, "combat ended");
        }
    }

    fn damage_monster(&mut self, damage: f64) {
        self.monster_health = (self.monster_health - damage).max(0.0);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use stat_core::{
        abilities_for, AbilityId, EffectKind, MonsterAttack, MonsterDifficulty, MonsterType,
        Profession, Race,
    };
    use tables_core::LootTable;

    fn make_test_rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    pub(crate) fn make_test_monster(health: f64, attacks: Vec<MonsterAttack>) -> Monster {
        Monster {
            id: "monster_0".to_string(),
            name: "Goblin".to_string(),
            monster_type: MonsterType::Humanoid,
            difficulty: MonsterDifficulty::Easy,
            level: 1,
            stats: Stats {
                strength: 12.0,
                health,
                ..Stats::default()
            },
            attacks,
            loot_table: LootTable::gold_only("monster_0", 5, 20),
            experience_value: 60,
        }
    }

    fn make_encounter() -> Encounter {
        let monster = make_test_monster(
            50.0,
            vec![MonsterAttack::new("Slash", "slashes with its claws", 10.0, 0)],
        );
        Encounter::start(
            monster,
            100.0,
            50.0,
            abilities_for(Profession::Warrior, Race::Human),
        )
    }

    fn attack(damage: f64) -> CombatAction {
        CombatAction::Attack {
            damage,
            description: "slashes".to_string(),
        }
    }

    #[test]
    fn test_start() {
        let encounter = make_encounter();
        assert_eq!(encounter.monster_health(), 50.0);
        assert_eq!(encounter.turn(), 0);
        assert!(encounter.is_active());
        assert!(encounter.player_effects().is_empty());
        assert_eq!(encounter.log(), ["Combat started with Goblin!"]);
    }

    #[test]
    fn test_attack_floors_at_zero() {
        let mut encounter = make_encounter();
        encounter.apply_player_action(attack(80.0));

        assert_eq!(encounter.monster_health(), 0.0);
        assert!(encounter.monster_defeated());
        assert_eq!(
            encounter.log()[1..],
            ["Player slashes for 80 damage.", "Goblin was defeated!"]
        );
    }

    #[test]
    fn test_ability_damage_and_mana() {
        let mut encounter = make_encounter();
        let stats = Stats {
            strength: 16.0,
            ..Stats::default()
        };
        let action = encounter.use_ability(0, &stats).unwrap();
        encounter.apply_player_action(action);

        assert_eq!(encounter.player_mana(), 40.0);
        assert_eq!(encounter.monster_health(), 26.0);
        assert!(encounter.log().contains(&"Player used Slash.".to_string()));
        assert!(encounter.log().contains(&"Dealt 24 damage to Goblin.".to_string()));
    }

    #[test]
    fn test_mana_floors_at_zero() {
        let monster = make_test_monster(50.0, Vec::new());
        let mut encounter = Encounter::start(
            monster,
            100.0,
            4.0,
            abilities_for(Profession::Warrior, Race::Human),
        );
        let action = encounter.use_ability(0, &Stats::default()).unwrap();
        encounter.apply_player_action(action);
        assert_eq!(encounter.player_mana(), 0.0);
    }

    #[test]
    fn test_heal_is_uncapped() {
        let monster = make_test_monster(50.0, Vec::new());
        let mut encounter = Encounter::start(
            monster,
            150.0,
            50.0,
            abilities_for(Profession::Wizard, Race::Elf),
        );
        let stats = Stats {
            intelligence: 20.0,
            ..Stats::default()
        };
        let action = encounter.use_ability(2, &stats).unwrap();
        encounter.apply_player_action(action);

        assert_eq!(encounter.player_health(), 174.0);
        assert!(encounter.log().contains(&"Healed for 24 health.".to_string()));
    }

    #[test]
    fn test_shield_bash_stuns_monster() {
        let mut encounter = make_encounter();
        let action = encounter.use_ability(1, &Stats::default()).unwrap();
        encounter.apply_player_action(action);

        assert!(encounter.monster_effects().has(EffectKind::Stun));
        assert!(encounter
            .log()
            .contains(&"Applied stun effect to Goblin for 2 turns.".to_string()));
    }

    #[test]
    fn test_berserker_rage_lands_on_player() {
        let monster = make_test_monster(50.0, Vec::new());
        let mut encounter = Encounter::start(
            monster,
            100.0,
            50.0,
            abilities_for(Profession::Warrior, Race::Orc),
        );
        let action = encounter.use_ability(2, &Stats::default()).unwrap();
        encounter.apply_player_action(action);

        assert_eq!(encounter.player_effects().len(), 2);
        assert!(encounter.monster_effects().is_empty());
        assert!(
            (encounter.player_effects().modifier_total(ModifiedStat::Defense) + 2.0).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn test_cooldown_rejection_changes_nothing() {
        let mut encounter = make_encounter();
        let action = encounter.use_ability(1, &Stats::default()).unwrap();
        encounter.apply_player_action(action);
        let before = encounter.clone();

        let result = encounter.use_ability(1, &Stats::default());
        assert!(matches!(
            result,
            Err(CombatError::Ability(AbilityError::OnCooldown { .. }))
        ));
        assert!(matches!(
            encounter.use_ability(9, &Stats::default()),
            Err(CombatError::Ability(AbilityError::InvalidIndex { .. }))
        ));
        assert_eq!(encounter, before);
    }

    #[test]
    fn test_item_effects() {
        let mut encounter = make_encounter();
        encounter.apply_player_action(CombatAction::Item {
            effect: ConsumableEffect::new(ConsumableKind::Heal, 50.0),
            description: "Health Potion".to_string(),
        });
        encounter.apply_player_action(CombatAction::Item {
            effect: ConsumableEffect::new(ConsumableKind::Mana, 30.0),
            description: "Mana Potion".to_string(),
        });
        encounter.apply_player_action(CombatAction::Item {
            effect: ConsumableEffect::new(ConsumableKind::Buff, 5.0).with_duration(3),
            description: "Strength Potion".to_string(),
        });
        encounter.apply_player_action(CombatAction::Item {
            effect: ConsumableEffect::new(ConsumableKind::Damage, 20.0),
            description: "Fire Bomb".to_string(),
        });

        assert_eq!(encounter.player_health(), 150.0);
        assert_eq!(encounter.player_mana(), 80.0);
        assert!(
            (encounter.player_effects().modifier_total(ModifiedStat::Strength) - 5.0).abs()
                < f64::EPSILON
        );
        assert_eq!(encounter.monster_health(), 30.0);
    }

    #[test]
    fn test_monster_turn() {
        let mut encounter = make_encounter();
        encounter.resolve_monster_turn(&mut make_test_rng());

        assert_eq!(encounter.player_health(), 90.0);
        assert_eq!(
            encounter.log().last().unwrap(),
            "Goblin slashes with its claws for 10 damage."
        );
    }

    #[test]
    fn test_monster_attack_effects_hit_player() {
        let monster = make_test_monster(
            50.0,
            vec![MonsterAttack::new("Sting", "stings", 2.0, 0)
                .with_effect(StatusEffect::poison(3.0, 2))],
        );
        let mut encounter = Encounter::start(monster, 100.0, 50.0, Vec::new());
        encounter.resolve_monster_turn(&mut make_test_rng());

        assert!(encounter.player_effects().has(EffectKind::Poison));
    }

    #[test]
    fn test_player_defeat_logged() {
        let monster = make_test_monster(
            50.0,
            vec![MonsterAttack::new("Crush", "crushes", 500.0, 0)],
        );
        let mut encounter = Encounter::start(monster, 100.0, 50.0, Vec::new());
        encounter.resolve_monster_turn(&mut make_test_rng());

        assert_eq!(encounter.player_health(), 0.0);
        assert!(encounter.player_defeated());
        assert_eq!(encounter.log().last().unwrap(), "Player was defeated!");
    }

    #[test]
    fn test_poison_ticks_then_expires() {
        let monster = make_test_monster(100.0, Vec::new());
        let mut encounter = Encounter::start(
            monster,
            100.0,
            50.0,
            abilities_for(Profession::Assassin, Race::Human),
        );
        let stats = Stats {
            dexterity: 20.0,
            ..Stats::default()
        };
        let action = encounter.use_ability(1, &stats).unwrap();
        encounter.apply_player_action(action);
        // 20 * 0.5 up front
        assert_eq!(encounter.monster_health(), 90.0);
        let tick = stats.dexterity * 0.3;

        let mut previous = encounter.monster_health();
        for _ in 0..2 {
            encounter.advance_turn();
            encounter.apply_status_effects();
            let now = encounter.monster_health();
            assert!((previous - now - tick).abs() < 1e-9);
            previous = now;
        }

        encounter.advance_turn();
        assert!(encounter.monster_effects().is_empty());
        encounter.apply_status_effects();
        assert_eq!(encounter.monster_health(), previous);
    }

    #[test]
    fn test_cooldowns_tick_both_sides() {
        let mut bite = MonsterAttack::new("Bite", "bites with sharp teeth", 15.0, 2);
        bite.current_cooldown = 2;
        let monster = make_test_monster(50.0, vec![bite]);
        let mut encounter = Encounter::start(
            monster,
            100.0,
            50.0,
            abilities_for(Profession::Wizard, Race::Human),
        );
        let action = encounter.use_ability(0, &Stats::default()).unwrap();
        encounter.apply_player_action(action);

        encounter.tick_cooldowns();
        assert_eq!(encounter.abilities()[0].current_cooldown(), 2);
        assert_eq!(encounter.monster().attacks[0].current_cooldown, 1);
        assert_eq!(encounter.abilities()[0].id, AbilityId::Fireball);
    }

    #[test]
    fn test_end_logs_once() {
        let mut encounter = make_encounter();
        encounter.end();
        encounter.end();
        assert!(!encounter.is_active());
        assert_eq!(
            encounter.log().iter().filter(|l| *l == "Combat ended.").count(),
            1
        );
    }
}
