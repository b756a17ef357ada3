//! Built-in roster of the base game.

pub mod abilities;
pub mod characters;
