//! A player's session: their profile, the combat engine and a seeded RNG

use crate::action::PlayerAction;
use crate::engine::{CombatEngine, EncounterSummary, TurnOutcome};
use crate::error::{CombatError, Result};
use crate::interpreter::{ActionInterpreter, InterpretContext, KeywordInterpreter};
use crate::rewards::RewardSink;
use loot_core::{Inventory, Item};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use stat_core::record::{deserialize_character, serialize_character};
use stat_core::spawn::spawn_monsters;
use stat_core::{Character, CharacterRecord, Combatant, Monster, Stats};

/// The persistent side of a player: character plus inventory
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub character: Character,
    pub inventory: Inventory,
}

/// Stored form of a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub character: CharacterRecord,
    pub inventory: Inventory,
}

impl Profile {
    pub fn new(character: Character) -> Self {
        Profile {
            character,
            inventory: Inventory::new(),
        }
    }

    /// Character stats with equipment bonuses applied
    pub fn effective_stats(&self) -> Stats {
        self.character
            .stats
            .with_bonus(&self.inventory.equipment_bonus())
    }

    pub fn to_record(&self) -> ProfileRecord {
        ProfileRecord {
            character: serialize_character(&self.character),
            inventory: self.inventory.clone(),
        }
    }

    pub fn from_record(record: ProfileRecord) -> Self {
        Profile {
            character: deserialize_character(record.character),
            inventory: record.inventory,
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_record())
    }

    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self::from_record(serde_json::from_str(json)?))
    }
}

impl RewardSink for Profile {
    fn gain_experience(&mut self, amount: u32) -> u32 {
        self.character.gain_experience(amount)
    }

    fn add_gold(&mut self, amount: u64) {
        self.inventory.add_gold(amount);
    }

    fn add_item(&mut self, item: Item) {
        let id = item.id.clone();
        if !self.inventory.add_item(item) {
            tracing::warn!(item = %id, "inventory full, loot left behind");
        }
    }
}

/// One player's game: profile, combat engine and a reproducible RNG
#[derive(Debug)]
pub struct Session {
    profile: Profile,
    engine: CombatEngine,
    rng: ChaCha8Rng,
}

impl Session {
    pub fn new(profile: Profile, seed: u64) -> Self {
        Session {
            profile,
            engine: CombatEngine::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Mutable profile access, e.g. for equipping between fights
    ///
    /// Refused while an encounter is open so the fight and the profile never
    /// change underneath each other.
    pub fn profile_mut(&mut self) -> Result<&mut Profile> {
        if self.engine.encounter().is_some() {
            return Err(CombatError::EncounterActive);
        }
        Ok(&mut self.profile)
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    /// Spawn monsters scaled to the character's level
    pub fn spawn_monsters(&mut self, count: usize) -> Vec<Monster> {
        spawn_monsters(count, self.profile.character.level(), &mut self.rng)
    }

    pub fn start_encounter(&mut self, monster: Monster) -> Result<()> {
        self.engine.start(monster, &self.profile.character)
    }

    /// Play a full turn with an already decided action
    pub fn take_turn(&mut self, action: PlayerAction) -> Result<TurnOutcome> {
        let stats = self.profile.effective_stats();
        self.engine
            .take_turn(action, &stats, &mut self.profile.inventory, &mut self.rng)
    }

    /// Interpret free text and play it as a full turn
    ///
    /// Interpreter failures, including replies missing the fields their
    /// action needs, fall back to keyword matching. An input judged invalid
    /// is rejected with its message and changes nothing. The interpreter's
    /// reasoning is logged ahead of an accepted action.
    pub fn act<I: ActionInterpreter>(&mut self, input: &str, interpreter: &I) -> Result<TurnOutcome> {
        let encounter = self.engine.encounter().ok_or(CombatError::NotInCombat)?;
        let stats = self.profile.effective_stats();
        let context = InterpretContext {
            character: &self.profile.character,
            stats,
            abilities: encounter.abilities(),
            inventory: &self.profile.inventory,
            monster: encounter.monster(),
        };

        let interpretation = interpreter
            .interpret(input, &context)
            .and_then(|interpretation| interpretation.check().map(|()| interpretation))
            .or_else(|e| {
                tracing::warn!(error = %e, "interpreter failed, using keyword fallback");
                KeywordInterpreter.interpret(input, &context)
            })
            .map_err(|e| CombatError::InvalidAction(e.to_string()))?;

        let note = interpretation
            .reasoning
            .as_ref()
            .map(|reasoning| format!("AI Evaluation: {}", reasoning));
        let action = interpretation.into_action(input)?;

        self.engine.take_turn_with_note(
            action,
            note,
            &stats,
            &mut self.profile.inventory,
            &mut self.rng,
        )
    }

    /// Hand out rewards for a decided encounter and close it
    pub fn finish_encounter(&mut self) -> Result<EncounterSummary> {
        self.engine.resolve(&mut self.profile, &mut self.rng)
    }

    pub fn flee(&mut self) -> Result<EncounterSummary> {
        self.engine.flee()
    }
}
