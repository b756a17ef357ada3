use crate::sim::battle::BattleStatus;
use crate::sim::character::Character;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Rewards {
    pub exp: u32,
    pub gold: u32,
}

impl Rewards {
    pub fn is_empty(&self) -> bool {
        self.exp == 0 && self.gold == 0
    }
}

/// Rewards earned from `enemy_team` as it stood when the battle ended.
/// Anything but a player win pays nothing.
pub fn compute_rewards(status: BattleStatus, enemy_team: &[Character]) -> Rewards {
    if status != BattleStatus::PlayerWin {
        return Rewards::default();
    }
    enemy_team.iter().fold(Rewards::default(), |acc, enemy| {
        let gold = (f64::from(enemy.level) * 5.0 * enemy.rarity.reward_multiplier()).floor() as u32;
        Rewards {
            exp: acc.exp.saturating_add(enemy.level.saturating_mul(10)),
            gold: acc.gold.saturating_add(gold),
        }
    })
}

/// Progress of one roster character after rewards were applied.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LevelReport {
    pub id: u32,
    pub name: String,
    pub levels_gained: u32,
    pub level: u32,
    pub experience: u32,
}

/// Grants `rewards.exp` to the persistent record of every player character
/// that is still standing in `battle_team`. Records absent from the battle
/// team, or defeated in it, are left untouched.
pub fn apply_rewards(roster: &mut [Character], battle_team: &[Character], rewards: Rewards) -> Vec<LevelReport> {
    if rewards.exp == 0 {
        return Vec::new();
    }
    let mut reports = Vec::new();
    for survivor in battle_team.iter().filter(|c| !c.is_defeated()) {
        let Some(record) = roster.iter_mut().find(|r| r.id == survivor.id) else {
            tracing::warn!(id = survivor.id, "survivor has no roster record");
            continue;
        };
        let levels_gained = match record.add_experience(rewards.exp) {
            Ok(levels) => levels,
            Err(err) => {
                tracing::warn!(id = record.id, "experience not applied: {err:#}");
                continue;
            }
        };
        reports.push(LevelReport {
            id: record.id,
            name: record.name.clone(),
            levels_gained,
            level: record.level,
            experience: record.experience,
        });
    }
    tracing::info!(exp = rewards.exp, gold = rewards.gold, characters = reports.len(), "rewards applied");
    reports
}
