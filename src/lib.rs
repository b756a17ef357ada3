pub mod simulate;

use crate::simulate::{play_battle, run_simulations, SimulationOptions};
use anyhow::Context;
use nebula_arena_core::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CliOptions {
    /// Custom roster JSON; the built-in roster is used when absent.
    pub roster_path: Option<PathBuf>,
    pub party: Vec<u32>,
    pub simulation: SimulationOptions,
    pub summary_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            roster_path: None,
            party: vec![1, 2, 3],
            simulation: SimulationOptions::default(),
            summary_path: None,
            log_path: None,
        }
    }
}

pub fn load_roster(path: &Path) -> anyhow::Result<Catalog> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
    Catalog::from_json(&raw).with_context(|| format!("Invalid roster in {}", path.display()))
}

/// Party ids must name distinct playable characters present in the catalog.
pub fn validate_party(catalog: &Catalog, party: &[u32]) -> anyhow::Result<()> {
    if party.is_empty() {
        anyhow::bail!("--party must name at least one character");
    }
    for (position, id) in party.iter().enumerate() {
        let character = catalog
            .get(*id)
            .ok_or_else(|| anyhow::anyhow!("Unknown character id {id} in --party"))?;
        if !catalog.player_characters().iter().any(|c| c.id == *id) {
            anyhow::bail!("{} ({id}) is not a playable character", character.name);
        }
        if party[..position].contains(id) {
            anyhow::bail!("{} ({id}) appears twice in --party", character.name);
        }
    }
    Ok(())
}

fn write_json(path: &Path, value: &impl serde::Serialize) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    if opts.simulation.battles == 0 {
        anyhow::bail!("--battles must be > 0");
    }
    if opts.simulation.enemy_team_size == 0 {
        anyhow::bail!("--enemies must be > 0");
    }
    let owned;
    let catalog = match &opts.roster_path {
        Some(path) => {
            owned = load_roster(path)?;
            &owned
        }
        None => Catalog::builtin(),
    };
    validate_party(catalog, &opts.party)?;

    let (summary, _records) = run_simulations(catalog, &opts.party, &opts.simulation)?;
    match &opts.summary_path {
        Some(path) => {
            write_json(path, &summary)?;
            println!("Wrote summary of {} battles to {}", summary.battles, path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    // Replays battle 0 for its log and the party's progression.
    let sample = play_battle(catalog, &opts.party, 0, &opts.simulation)?;
    if let Some(path) = &opts.log_path {
        write_json(path, &sample.log_json())?;
        println!("Wrote log of battle 0 ({} lines) to {}", sample.logs().len(), path.display());
    }
    let rewards = sample.rewards();
    if rewards.is_empty() {
        println!("Battle 0 ended {:?} and earned no rewards", sample.status());
        return Ok(());
    }
    let mut roster = catalog.instantiate_team(&opts.party)?;
    for report in apply_rewards(&mut roster, sample.player_team(), rewards) {
        println!(
            "{} gained {} level(s): now level {} with {} exp",
            report.name, report.levels_gained, report.level, report.experience
        );
    }
    Ok(())
}
