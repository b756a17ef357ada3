use crate::catalog::Catalog;
use crate::sim::character::Character;
use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            other => bail!("unknown difficulty '{other}' (expected easy or hard)"),
        }
    }
}

/// Builds an enemy team of at most `team_size` battle-private characters.
///
/// Easy draws from shuffled basic enemies. Hard takes advanced enemies in id
/// order first and fills the rest from shuffled basic enemies.
pub fn generate_enemy_team(
    catalog: &Catalog,
    difficulty: Difficulty,
    team_size: usize,
    rng: &mut impl Rng,
) -> Vec<Character> {
    let mut basic = catalog.basic_enemies();
    basic.shuffle(rng);
    let picked: Vec<&Character> = match difficulty {
        Difficulty::Easy => basic.into_iter().take(team_size).collect(),
        Difficulty::Hard => catalog
            .advanced_enemies()
            .into_iter()
            .chain(basic)
            .take(team_size)
            .collect(),
    };
    if picked.len() < team_size {
        tracing::debug!(requested = team_size, available = picked.len(), "enemy pool smaller than team size");
    }
    picked.into_iter().cloned().collect()
}
