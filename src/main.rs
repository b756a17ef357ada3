use nebula_arena::{run, CliOptions};
use nebula_arena_core::prelude::{Difficulty, HealthCap};
use std::env;
use std::path::PathBuf;

fn usage() -> ! {
    eprintln!(
        "Usage: cargo run --release -- [--roster roster.json] [--party 1,2,3] [--difficulty easy|hard] \
[--enemies N] [--battles N] [--seed SEED] [--max-turns N] [--cap-heals] [--summary summary.json] [--log log.json]"
    );
    std::process::exit(1);
}

fn parse_party(raw: &str) -> anyhow::Result<Vec<u32>> {
    raw.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<u32>()
                .map_err(|err| anyhow::anyhow!("--party entry '{part}' is not an id: {err}"))
        })
        .collect()
}

fn parse_args() -> anyhow::Result<CliOptions> {
    let mut opts = CliOptions::default();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--roster" => {
                opts.roster_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--roster requires a path (e.g. --roster roster.json)")
                })?);
            }
            "--party" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--party requires comma-separated ids"))?;
                opts.party = parse_party(&val)?;
            }
            "--difficulty" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--difficulty requires easy or hard"))?;
                opts.simulation.difficulty = val.parse::<Difficulty>()?;
            }
            "--enemies" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--enemies requires a number"))?;
                opts.simulation.enemy_team_size = val.parse()?;
            }
            "--battles" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--battles requires a number"))?;
                opts.simulation.battles = val.parse()?;
            }
            "--seed" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--seed requires a number"))?;
                opts.simulation.seed = val.parse()?;
            }
            "--max-turns" => {
                let val = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--max-turns requires a number"))?;
                opts.simulation.max_turns = val.parse()?;
            }
            "--cap-heals" => opts.simulation.battle.health_cap = HealthCap::MaxHealth,
            "--summary" => {
                opts.summary_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--summary requires a path (e.g. --summary summary.json)")
                })?);
            }
            "--log" => {
                opts.log_path = Some(args.next().map(PathBuf::from).ok_or_else(|| {
                    anyhow::anyhow!("--log requires a path (e.g. --log log.json)")
                })?);
            }
            "--help" | "-h" => usage(),
            other => return Err(anyhow::anyhow!("Unknown argument {other}")),
        }
    }

    Ok(opts)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("nebula_arena=info")),
        )
        .init();
    let opts = parse_args()?;
    run(opts)
}
