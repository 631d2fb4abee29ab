//! combat_core - Turn-based encounters between a character and a monster
//!
//! This library provides:
//! - Encounter: the combat aggregate and its transition operations
//! - CombatEngine: the phase machine that orders turns and grants rewards
//! - Interpreters: free-text input to actions, with a keyword fallback
//! - Session: a profile, an engine and a seeded RNG bundled together
//!
//! # Quick Start
//!
//! ```rust
//! use combat_core::{KeywordInterpreter, Profile, Session, TurnOutcome};
//! use stat_core::{Character, Profession, Race};
//!
//! let hero = Character::new("Aldric", Profession::Warrior, Race::Human);
//! let mut session = Session::new(Profile::new(hero), 42);
//!
//! let monster = session.spawn_monsters(1).remove(0);
//! session.start_encounter(monster).unwrap();
//!
//! loop {
//!     match session.act("attack", &KeywordInterpreter).unwrap() {
//!         TurnOutcome::Ongoing => continue,
//!         _ => break,
//!     }
//! }
//! let summary = session.finish_encounter().unwrap();
//! println!("{}", summary.log.join("\n"));
//! ```

pub mod action;
pub mod encounter;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod rewards;
pub mod session;

pub use action::{CombatAction, PlayerAction};
pub use encounter::Encounter;
pub use engine::{CombatEngine, CombatOutcome, CombatPhase, EncounterSummary, TurnOutcome};
pub use error::{CombatError, InterpretError};
pub use interpreter::{
    build_prompt, ActionInterpreter, ActionKind, InterpretContext, Interpretation,
    KeywordInterpreter, RemoteInterpreter, Transport, WithFallback,
};
pub use rewards::{RewardSink, Rewards};
pub use session::{Profile, ProfileRecord, Session};
