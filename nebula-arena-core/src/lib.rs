//! Turn-based battle core for the Nebula Arena collectible-character game.
//!
//! The main entry point for driving a battle is [`engine::BattleEngine`].

pub mod battle_logger;
pub mod catalog;
pub mod data;
pub mod engine;
pub mod sim;

pub use catalog::Catalog;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::catalog::Catalog;
    pub use crate::engine::{BattleEngine, StepResult, TurnOutcome};
    pub use crate::sim::ai::{BattleAI, PlannedAction, RandomAI};
    pub use crate::sim::battle::{BattleOptions, BattleState, BattleStatus, HealthCap, Side, Slot};
    pub use crate::sim::encounter::{generate_enemy_team, Difficulty};
    pub use crate::sim::resolver::{Rejection, Resolution};
    pub use crate::sim::rewards::{apply_rewards, LevelReport, Rewards};
    pub use crate::sim::{Ability, AbilityKind, Character, EffectKind, Rarity, Stats};
}
