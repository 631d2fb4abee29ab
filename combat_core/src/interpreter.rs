//! Turning free-text player input into combat actions
//!
//! A remote model can judge what the player typed; the keyword interpreter
//! is the deterministic fallback when the model is unavailable or replies
//! with something unusable.

use crate::action::PlayerAction;
use crate::error::{CombatError, InterpretError};
use loot_core::Inventory;
use serde::{Deserialize, Serialize};
use stat_core::{Ability, Character, Combatant, Monster, Stats};
use std::fmt::Write;

/// Words that mean a plain physical attack
const ATTACK_VERBS: &[&str] = &["attack", "hit", "strike", "slash", "stab", "punch", "kick"];

/// Everything an interpreter may look at
#[derive(Debug, Clone, Copy)]
pub struct InterpretContext<'a> {
    pub character: &'a Character,
    /// Effective stats including equipment
    pub stats: Stats,
    /// Abilities with their in-combat cooldowns
    pub abilities: &'a [Ability],
    pub inventory: &'a Inventory,
    pub monster: &'a Monster,
}

/// Kind of action an interpretation asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Attack,
    Ability,
    Item,
}

/// Verdict on a piece of player input
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interpretation {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<ActionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl Interpretation {
    pub fn invalid(message: impl Into<String>, reasoning: impl Into<String>) -> Self {
        Interpretation {
            valid: false,
            message: Some(message.into()),
            reasoning: Some(reasoning.into()),
            ..Self::default()
        }
    }

    /// Reject a valid verdict that is missing what its action needs
    pub fn check(&self) -> Result<(), InterpretError> {
        if !self.valid {
            return Ok(());
        }
        match self.action {
            None => Err(InterpretError::Incomplete("valid reply without an action")),
            Some(ActionKind::Ability) if self.ability_index.is_none() => {
                Err(InterpretError::Incomplete("ability reply without abilityIndex"))
            }
            Some(ActionKind::Item) if self.item_index.is_none() => {
                Err(InterpretError::Incomplete("item reply without itemIndex"))
            }
            Some(_) => Ok(()),
        }
    }

    /// Convert into an engine action; `input` becomes the attack description
    pub fn into_action(self, input: &str) -> Result<PlayerAction, CombatError> {
        if !self.valid {
            return Err(CombatError::InvalidAction(
                self.message.unwrap_or_else(|| "Invalid action".to_string()),
            ));
        }

        match self.action {
            Some(ActionKind::Attack) => Ok(PlayerAction::attack(
                self.damage.unwrap_or(0.0).max(0.0),
                input.trim(),
            )),
            Some(ActionKind::Ability) => self
                .ability_index
                .map(|index| PlayerAction::Ability { index })
                .ok_or_else(|| CombatError::InvalidAction("No ability was chosen".to_string())),
            Some(ActionKind::Item) => self
                .item_index
                .map(|index| PlayerAction::Item { index })
                .ok_or_else(|| CombatError::InvalidAction("No item was chosen".to_string())),
            None => Err(CombatError::InvalidAction(
                "That is not something you can do in combat".to_string(),
            )),
        }
    }
}

/// Judges player input
pub trait ActionInterpreter {
    fn interpret(
        &self,
        input: &str,
        context: &InterpretContext<'_>,
    ) -> Result<Interpretation, InterpretError>;
}

/// Deterministic keyword matching
///
/// An ability named in the input wins over attack verbs. Attacks deal
/// floor(strength).
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordInterpreter;

impl ActionInterpreter for KeywordInterpreter {
    fn interpret(
        &self,
        input: &str,
        context: &InterpretContext<'_>,
    ) -> Result<Interpretation, InterpretError> {
        let lower = input.to_lowercase();

        if let Some((index, ability)) = context
            .abilities
            .iter()
            .enumerate()
            .find(|(_, a)| lower.contains(&a.name.to_lowercase()))
        {
            if !ability.is_ready() {
                return Ok(Interpretation::invalid(
                    format!(
                        "{} is on cooldown for {} more turns.",
                        ability.name,
                        ability.current_cooldown()
                    ),
                    "Ability is currently on cooldown",
                ));
            }
            return Ok(Interpretation {
                valid: true,
                action: Some(ActionKind::Ability),
                ability_index: Some(index),
                message: Some(format!("You used {}!", ability.name)),
                reasoning: Some("Player used an available ability".to_string()),
                ..Interpretation::default()
            });
        }

        if ATTACK_VERBS.iter().any(|verb| lower.contains(verb)) {
            let damage = context.stats.strength.floor();
            return Ok(Interpretation {
                valid: true,
                action: Some(ActionKind::Attack),
                damage: Some(damage),
                message: Some(format!("You attacked for {} damage!", damage)),
                reasoning: Some("Basic attack is always available".to_string()),
                ..Interpretation::default()
            });
        }

        Ok(Interpretation::invalid(
            "I don't understand that action. Try attacking or using an ability.",
            "Could not identify a valid combat action",
        ))
    }
}

/// Sends a prompt to a language model and returns its raw reply
pub trait Transport {
    fn complete(&self, system: &str, user: &str) -> Result<String, InterpretError>;
}

/// Interpreter backed by a remote model
#[derive(Debug, Clone)]
pub struct RemoteInterpreter<T> {
    transport: T,
}

impl<T: Transport> RemoteInterpreter<T> {
    pub fn new(transport: T) -> Self {
        RemoteInterpreter { transport }
    }
}

impl<T: Transport> ActionInterpreter for RemoteInterpreter<T> {
    fn interpret(
        &self,
        input: &str,
        context: &InterpretContext<'_>,
    ) -> Result<Interpretation, InterpretError> {
        let prompt = build_prompt(input, context);
        let response = self.transport.complete(SYSTEM_PROMPT, &prompt)?;
        let json = extract_json(&response)?;
        let interpretation: Interpretation = serde_json::from_str(json)?;
        interpretation.check()?;
        Ok(interpretation)
    }
}

/// Try a primary interpreter, falling back to keywords on any error
#[derive(Debug, Clone)]
pub struct WithFallback<P> {
    primary: P,
    fallback: KeywordInterpreter,
}

impl<P: ActionInterpreter> WithFallback<P> {
    pub fn new(primary: P) -> Self {
        WithFallback {
            primary,
            fallback: KeywordInterpreter,
        }
    }
}

impl<P: ActionInterpreter> ActionInterpreter for WithFallback<P> {
    fn interpret(
        &self,
        input: &str,
        context: &InterpretContext<'_>,
    ) -> Result<Interpretation, InterpretError> {
        match self.primary.interpret(input, context) {
            Ok(interpretation) => Ok(interpretation),
            Err(e) => {
                tracing::warn!(error = %e, "interpreter failed, using keyword fallback");
                self.fallback.interpret(input, context)
            }
        }
    }
}

/// Render the context and input for a model
pub fn build_prompt(input: &str, context: &InterpretContext<'_>) -> String {
    let character = context.character;
    let stats = &context.stats;
    let mut prompt = String::new();

    let _ = writeln!(prompt, "PLAYER CHARACTER:");
    let _ = writeln!(prompt, "Race: {}", character.race);
    let _ = writeln!(prompt, "Profession: {}", character.profession);
    let _ = writeln!(prompt, "Level: {}", character.level());
    let _ = writeln!(
        prompt,
        "Stats: Strength {}, Dexterity {}, Intelligence {}, Vitality {}",
        stats.strength, stats.dexterity, stats.intelligence, stats.vitality
    );

    let _ = writeln!(prompt, "\nABILITIES:");
    for (i, ability) in context.abilities.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}: {} - {} (Cooldown: {}/{})",
            i,
            ability.name,
            ability.description,
            ability.current_cooldown(),
            ability.cooldown()
        );
    }

    let _ = writeln!(prompt, "\nEQUIPPED ITEMS:");
    let mut equipped = context.inventory.equipped_items().peekable();
    if equipped.peek().is_none() {
        let _ = writeln!(prompt, "No items equipped");
    }
    for item in equipped {
        if let Some(slot) = item.equipment_slot {
            let _ = writeln!(prompt, "- {}: {}", slot, item.name);
        }
    }

    let _ = writeln!(prompt, "\nINVENTORY:");
    if context.inventory.items().is_empty() {
        let _ = writeln!(prompt, "Empty inventory");
    }
    for (i, item) in context.inventory.items().iter().enumerate() {
        let _ = writeln!(prompt, "{}: {} - {}", i, item.name, item.description);
    }

    let monster = context.monster;
    let _ = writeln!(prompt, "\nOPPONENT:");
    let _ = writeln!(prompt, "Name: {}", monster.name);
    let _ = writeln!(prompt, "Type: {}", monster.monster_type);
    let _ = writeln!(prompt, "Level: {}", monster.level);

    let _ = writeln!(prompt, "\nPLAYER ACTION:\n\"{}\"", input.trim());
    prompt.push_str(PROMPT_INSTRUCTIONS);
    prompt
}

/// Extract the JSON object from a reply that may have text around it
fn extract_json(response: &str) -> Result<&str, InterpretError> {
    let start = response.find('{').ok_or(InterpretError::NoJson)?;
    let end = response.rfind('}').ok_or(InterpretError::NoJson)?;
    if end < start {
        return Err(InterpretError::NoJson);
    }
    Ok(&response[start..=end])
}

const SYSTEM_PROMPT: &str = r#"You are a combat evaluator for an RPG. Decide whether the player's combat action is realistic given their character, abilities and inventory. Respond ONLY with a JSON object:
{
  "valid": boolean,
  "action": "attack" | "ability" | "item",
  "damage": number,
  "abilityIndex": number,
  "itemIndex": number,
  "message": string,
  "reasoning": string
}"#;

const PROMPT_INSTRUCTIONS: &str = "
Evaluate if this action is realistic given the character, abilities, equipped items and inventory.
Basic physical attacks (punching, kicking, unarmed strikes) are always valid. Using a weapon or item the player does not have, or an ability that is on cooldown, is invalid. For valid attacks, calculate damage from the character's stats and equipment.
";
