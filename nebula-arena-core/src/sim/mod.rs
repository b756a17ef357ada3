pub mod ability;
pub mod ai;
pub mod battle;
pub mod character;
pub mod effects;
pub mod encounter;
pub mod resolver;
pub mod rewards;
pub mod scheduler;

pub use ability::{Ability, AbilityKind, EffectKind, EffectTemplate};
pub use battle::{BattleOptions, BattleState, BattleStatus, HealthCap, Side, Slot};
pub use character::{Character, Rarity, Stats};
