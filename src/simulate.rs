use anyhow::{bail, Result};
use nebula_arena_core::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug)]
pub struct SimulationOptions {
    pub battles: usize,
    pub seed: u64,
    pub difficulty: Difficulty,
    pub enemy_team_size: usize,
    /// Completed turns after which an unfinished battle counts as a stalemate.
    pub max_turns: u32,
    pub battle: BattleOptions,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            battles: 100,
            seed: 0,
            difficulty: Difficulty::Easy,
            enemy_team_size: 3,
            max_turns: 200,
            battle: BattleOptions::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    PlayerWin,
    EnemyWin,
    Stalemate,
}

#[derive(Clone, Debug, Serialize)]
pub struct BattleRecord {
    pub index: usize,
    pub seed: u64,
    pub enemies: Vec<u32>,
    pub outcome: Outcome,
    pub turns: u32,
    pub rewards: Rewards,
}

#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationSummary {
    pub battles: usize,
    pub player_wins: usize,
    pub enemy_wins: usize,
    pub stalemates: usize,
    pub mean_turns: f64,
    pub total_rewards: Rewards,
}

impl SimulationSummary {
    pub fn from_records(records: &[BattleRecord]) -> Self {
        let mut summary = Self {
            battles: records.len(),
            ..Self::default()
        };
        let mut turns = 0u64;
        for record in records {
            match record.outcome {
                Outcome::PlayerWin => summary.player_wins += 1,
                Outcome::EnemyWin => summary.enemy_wins += 1,
                Outcome::Stalemate => summary.stalemates += 1,
            }
            turns += u64::from(record.turns);
            summary.total_rewards.exp = summary.total_rewards.exp.saturating_add(record.rewards.exp);
            summary.total_rewards.gold = summary.total_rewards.gold.saturating_add(record.rewards.gold);
        }
        if !records.is_empty() {
            summary.mean_turns = turns as f64 / records.len() as f64;
        }
        summary
    }
}

fn battle_rng(seed: u64, index: usize) -> SmallRng {
    SmallRng::seed_from_u64(seed ^ ((index as u64) << 32) ^ index as u64)
}

/// Plays battle `index` of a run to completion or to the turn limit and
/// returns the finished engine.
pub fn play_battle(
    catalog: &Catalog,
    party: &[u32],
    index: usize,
    options: &SimulationOptions,
) -> Result<BattleEngine> {
    let mut rng = battle_rng(options.seed, index);
    let players = catalog.instantiate_team(party)?;
    let enemies = generate_enemy_team(catalog, options.difficulty, options.enemy_team_size, &mut rng);
    if enemies.is_empty() {
        bail!("the catalog has no enemies for {:?} encounters", options.difficulty);
    }
    let battle = BattleOptions {
        label: Some(format!("battle-{index}")),
        ..options.battle.clone()
    };
    let mut engine = BattleEngine::with_options(&players, &enemies, rng.gen(), battle)?;
    let mut player_ai = RandomAI::new(rng.gen());
    let mut enemy_ai = RandomAI::new(rng.gen());
    while !engine.is_terminal() && engine.turn() < options.max_turns {
        if engine.is_player_turn() {
            engine.auto_turn(&mut player_ai);
        } else {
            engine.auto_turn(&mut enemy_ai);
        }
    }
    Ok(engine)
}

fn record(index: usize, seed: u64, engine: &BattleEngine) -> BattleRecord {
    let outcome = match engine.status() {
        BattleStatus::PlayerWin => Outcome::PlayerWin,
        BattleStatus::EnemyWin => Outcome::EnemyWin,
        BattleStatus::Active => Outcome::Stalemate,
    };
    BattleRecord {
        index,
        seed,
        enemies: engine.enemy_team().iter().map(|c| c.id).collect(),
        outcome,
        turns: engine.turn(),
        rewards: engine.rewards(),
    }
}

/// Runs `options.battles` independent battles in parallel. Every battle owns
/// its own copies of both teams.
pub fn run_simulations(
    catalog: &Catalog,
    party: &[u32],
    options: &SimulationOptions,
) -> Result<(SimulationSummary, Vec<BattleRecord>)> {
    let records = (0..options.battles)
        .into_par_iter()
        .map(|index| {
            let engine = play_battle(catalog, party, index, options)?;
            Ok(record(index, options.seed, &engine))
        })
        .collect::<Result<Vec<_>>>()?;
    let summary = SimulationSummary::from_records(&records);
    tracing::info!(
        battles = summary.battles,
        player_wins = summary.player_wins,
        enemy_wins = summary.enemy_wins,
        stalemates = summary.stalemates,
        "simulation finished"
    );
    Ok((summary, records))
}
