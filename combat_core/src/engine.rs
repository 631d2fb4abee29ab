//! Combat phase machine
//!
//! `Idle` -> `InCombat` -> `Resolved` -> `Idle`. One encounter at a time; a
//! turn is in flight between the player's action and the monster's reply.

use crate::action::{CombatAction, PlayerAction};
use crate::encounter::Encounter;
use crate::error::{CombatError, Result};
use crate::rewards::{RewardSink, Rewards};
use loot_core::Inventory;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stat_core::{Character, Monster, Stats};
use std::fmt;

/// How an encounter ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    MonsterDefeated,
    PlayerDefeated,
    Fled,
}

impl fmt::Display for CombatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatOutcome::MonsterDefeated => write!(f, "Victory"),
            CombatOutcome::PlayerDefeated => write!(f, "Defeat"),
            CombatOutcome::Fled => write!(f, "Fled"),
        }
    }
}

/// Where a turn stands after a call into the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Waiting on the monster reply (after a player action) or the next
    /// player action (after a reply)
    Ongoing,
    MonsterDefeated,
    PlayerDefeated,
}

/// Observable engine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatPhase {
    Idle,
    InCombat { reply_pending: bool },
    Resolved(CombatOutcome),
}

/// Final record of a finished encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterSummary {
    pub outcome: CombatOutcome,
    pub monster_name: String,
    pub turns: u32,
    pub player_health: f64,
    pub player_mana: f64,
    pub log: Vec<String>,
    pub rewards: Option<Rewards>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
enum State {
    #[default]
    Idle,
    InCombat {
        encounter: Box<Encounter>,
        reply_pending: bool,
    },
    Resolved {
        encounter: Box<Encounter>,
        outcome: CombatOutcome,
    },
}

/// Owns the active encounter and enforces the turn order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatEngine {
    state: State,
}

impl CombatEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CombatPhase {
        match &self.state {
            State::Idle => CombatPhase::Idle,
            State::InCombat { reply_pending, .. } => CombatPhase::InCombat {
                reply_pending: *reply_pending,
            },
            State::Resolved { outcome, .. } => CombatPhase::Resolved(*outcome),
        }
    }

    /// The current encounter, if any
    pub fn encounter(&self) -> Option<&Encounter> {
        match &self.state {
            State::Idle => None,
            State::InCombat { encounter, .. } | State::Resolved { encounter, .. } => {
                Some(encounter)
            }
        }
    }

    /// Begin an encounter with the character's current resources
    pub fn start(&mut self, monster: Monster, character: &Character) -> Result<()> {
        if !matches!(self.state, State::Idle) {
            return Err(CombatError::EncounterActive);
        }

        let encounter = Encounter::start(
            monster,
            character.stats.health,
            character.stats.mana,
            character.abilities().to_vec(),
        );
        self.state = State::InCombat {
            encounter: Box::new(encounter),
            reply_pending: false,
        };
        Ok(())
    }

    /// Validate and apply the player's half of a turn
    ///
    /// `stats` are the player's effective stats, used for ability formulas.
    /// Items are consumed from `inventory` only once the action is accepted.
    /// Returns `Ongoing` when the monster still has to reply.
    pub fn submit_player_action(
        &mut self,
        action: PlayerAction,
        stats: &Stats,
        inventory: &mut Inventory,
    ) -> Result<TurnOutcome> {
        self.submit(action, None, stats, inventory)
    }

    fn submit(
        &mut self,
        action: PlayerAction,
        note: Option<String>,
        stats: &Stats,
        inventory: &mut Inventory,
    ) -> Result<TurnOutcome> {
        let encounter = match &mut self.state {
            State::Idle => return Err(CombatError::NotInCombat),
            State::Resolved { .. } => return Err(CombatError::CombatOver),
            State::InCombat {
                reply_pending: true,
                ..
            } => return Err(CombatError::TurnInFlight),
            State::InCombat { encounter, .. } => encounter,
        };

        let action = match action {
            PlayerAction::Attack {
                damage,
                description,
            } => CombatAction::Attack {
                damage: damage.max(0.0),
                description,
            },
            PlayerAction::Ability { index } => encounter.use_ability(index, stats)?,
            PlayerAction::Item { index } => take_consumable(inventory, index)?,
        };

        tracing::debug!(turn = encounter.turn(), ?action, "player action accepted");
        if let Some(note) = note {
            encounter.record(note);
        }
        encounter.apply_player_action(action);

        if encounter.monster_defeated() {
            self.settle(CombatOutcome::MonsterDefeated);
            return Ok(TurnOutcome::MonsterDefeated);
        }

        self.set_reply_pending(true);
        Ok(TurnOutcome::Ongoing)
    }

    /// Play out the monster's reply and the end of the turn
    ///
    /// Cooldowns tick and the turn advances only if the player survives the
    /// attack. Poison ticks after the advance can end the fight on their own.
    pub fn resolve_monster_reply<R: Rng>(&mut self, rng: &mut R) -> Result<TurnOutcome> {
        let encounter = match &mut self.state {
            State::InCombat {
                encounter,
                reply_pending: true,
            } => encounter,
            State::InCombat { .. } => return Err(CombatError::NoPendingReply),
            State::Idle => return Err(CombatError::NotInCombat),
            State::Resolved { .. } => return Err(CombatError::CombatOver),
        };

        encounter.resolve_monster_turn(rng);
        if encounter.player_defeated() {
            self.settle(CombatOutcome::PlayerDefeated);
            return Ok(TurnOutcome::PlayerDefeated);
        }

        encounter.tick_cooldowns();
        encounter.advance_turn();
        encounter.apply_status_effects();

        // A kill by poison counts before the player's own poison death
        if encounter.monster_defeated() {
            self.settle(CombatOutcome::MonsterDefeated);
            return Ok(TurnOutcome::MonsterDefeated);
        }
        if encounter.player_defeated() {
            self.settle(CombatOutcome::PlayerDefeated);
            return Ok(TurnOutcome::PlayerDefeated);
        }

        self.set_reply_pending(false);
        Ok(TurnOutcome::Ongoing)
    }

    /// Submit an action and, if the monster survives, play its reply
    pub fn take_turn<R: Rng>(
        &mut self,
        action: PlayerAction,
        stats: &Stats,
        inventory: &mut Inventory,
        rng: &mut R,
    ) -> Result<TurnOutcome> {
        self.take_turn_with_note(action, None, stats, inventory, rng)
    }

    /// Like `take_turn`, logging `note` once the action has been accepted
    ///
    /// A rejected action leaves the log untouched.
    pub fn take_turn_with_note<R: Rng>(
        &mut self,
        action: PlayerAction,
        note: Option<String>,
        stats: &Stats,
        inventory: &mut Inventory,
        rng: &mut R,
    ) -> Result<TurnOutcome> {
        match self.submit(action, note, stats, inventory)? {
            TurnOutcome::Ongoing => self.resolve_monster_reply(rng),
            decided => Ok(decided),
        }
    }

    /// Grant rewards for a decided encounter and return to `Idle`
    ///
    /// Loot is rolled before anything is handed to the sink. A defeat pays
    /// nothing. Calling this again afterwards fails with `NotInCombat`.
    pub fn resolve<S: RewardSink, R: Rng>(
        &mut self,
        sink: &mut S,
        rng: &mut R,
    ) -> Result<EncounterSummary> {
        let (mut encounter, outcome) = match std::mem::take(&mut self.state) {
            State::Resolved { encounter, outcome } => (encounter, outcome),
            State::Idle => return Err(CombatError::NotInCombat),
            in_combat => {
                self.state = in_combat;
                return Err(CombatError::NotResolved);
            }
        };

        let rewards = match outcome {
            CombatOutcome::MonsterDefeated => Some(grant_rewards(&mut encounter, sink, rng)),
            _ => {
                encounter.record("You have been defeated!".to_string());
                None
            }
        };

        Ok(finish(*encounter, outcome, rewards))
    }

    /// Abandon the current encounter
    ///
    /// Any pending monster reply is discarded and nothing is granted.
    pub fn flee(&mut self) -> Result<EncounterSummary> {
        let encounter = match std::mem::take(&mut self.state) {
            State::Idle => return Err(CombatError::NotInCombat),
            State::InCombat { encounter, .. } | State::Resolved { encounter, .. } => encounter,
        };

        let mut encounter = *encounter;
        encounter.record(format!("You fled from {}.", encounter.monster().name));
        Ok(finish(encounter, CombatOutcome::Fled, None))
    }

    fn settle(&mut self, outcome: CombatOutcome) {
        self.state = match std::mem::take(&mut self.state) {
            State::InCombat { encounter, .. } => State::Resolved { encounter, outcome },
            other => other,
        };
        tracing::debug!(%outcome, "encounter decided");
    }

    fn set_reply_pending(&mut self, pending: bool) {
        if let State::InCombat { reply_pending, .. } = &mut self.state {
            *reply_pending = pending;
        }
    }
}

/// Check and consume a carried consumable
fn take_consumable(inventory: &mut Inventory, index: usize) -> Result<CombatAction> {
    let item = inventory
        .items()
        .get(index)
        .ok_or(CombatError::InvalidItemIndex {
            index,
            count: inventory.items().len(),
        })?;

    let name = item.name.clone();
    if !item.is_consumable() || item.consumable_effect.is_none() {
        return Err(CombatError::NotConsumable { name });
    }

    let effect = inventory
        .use_item(index)
        .ok_or(CombatError::NotConsumable { name: name.clone() })?;

    Ok(CombatAction::Item {
        effect,
        description: name,
    })
}

fn grant_rewards<S: RewardSink, R: Rng>(
    encounter: &mut Encounter,
    sink: &mut S,
    rng: &mut R,
) -> Rewards {
    let monster = encounter.monster();
    let experience = monster.experience_value;
    let name = monster.name.clone();
    let loot = monster.loot_table.generate_loot(rng);

    let levels_gained = sink.gain_experience(experience);
    sink.add_gold(u64::from(loot.gold));
    for item in &loot.items {
        sink.add_item(item.clone());
    }

    encounter.record(format!(
        "You defeated {} and gained {} experience!",
        name, experience
    ));
    encounter.record(format!("You found {} gold!", loot.gold));
    if !loot.items.is_empty() {
        encounter.record(format!("You found {} item(s)!", loot.items.len()));
    }

    tracing::info!(
        monster = %name,
        experience,
        gold = loot.gold,
        items = loot.items.len(),
        levels_gained,
        "rewards granted"
    );

    Rewards {
        experience,
        levels_gained,
        gold: loot.gold,
        items: loot.items,
    }
}

fn finish(
    mut encounter: Encounter,
    outcome: CombatOutcome,
    rewards: Option<Rewards>,
) -> EncounterSummary {
    encounter.end();
    EncounterSummary {
        outcome,
        monster_name: encounter.monster().name.clone(),
        turns: encounter.turn(),
        player_health: encounter.player_health(),
        player_mana: encounter.player_mana(),
        log: encounter.log().to_vec(),
        rewards,
    }
}
