use crate::battle_logger::BattleLogger;
use crate::sim::ability::Ability;
use crate::sim::character::Character;
use crate::sim::scheduler::TurnScheduler;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Position of a combatant inside the battle: its side and its index in that team.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub side: Side,
    pub index: usize,
}

impl Slot {
    pub fn new(side: Side, index: usize) -> Self {
        Self { side, index }
    }

    pub fn player(index: usize) -> Self {
        Self::new(Side::Player, index)
    }

    pub fn enemy(index: usize) -> Self {
        Self::new(Side::Enemy, index)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BattleStatus {
    Active,
    PlayerWin,
    EnemyWin,
}

impl BattleStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattleStatus::Active)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum HealthCap {
    /// Heals and regeneration add health without limit.
    #[default]
    Uncapped,
    /// Heals and regeneration stop at the health the character entered the battle with.
    MaxHealth,
}

#[derive(Clone, Debug, Default)]
pub struct BattleOptions {
    pub health_cap: HealthCap,
    /// Label carried by the battle log, "battle" when unset.
    pub label: Option<String>,
}

impl BattleOptions {
    pub fn heal_cap_for(&self, character: &Character) -> Option<u32> {
        match self.health_cap {
            HealthCap::Uncapped => None,
            HealthCap::MaxHealth => Some(character.max_health),
        }
    }
}

#[derive(Clone, Debug)]
pub struct BattleState {
    pub player_team: Vec<Character>,
    pub enemy_team: Vec<Character>,
    pub scheduler: TurnScheduler,
    pub status: BattleStatus,
    pub logger: BattleLogger,
    pub options: BattleOptions,
    /// Completed advances.
    pub turn: u32,
}

impl BattleState {
    /// Takes ownership of both teams. Input must already be normalised; anything
    /// that would need repairing is rejected.
    pub fn new(player_team: Vec<Character>, enemy_team: Vec<Character>, options: BattleOptions) -> Result<Self> {
        validate_teams(&player_team, &enemy_team)?;
        let scheduler = TurnScheduler::new(&player_team, &enemy_team);
        let mut logger = match &options.label {
            Some(label) => BattleLogger::new_with_label(label.clone()),
            None => BattleLogger::new(),
        };
        logger.log_start();
        let state = Self {
            player_team,
            enemy_team,
            scheduler,
            status: BattleStatus::Active,
            logger,
            options,
            turn: 0,
        };
        tracing::debug!(
            order = ?state
                .scheduler
                .order()
                .iter()
                .filter_map(|slot| state.character(*slot).map(|c| (c.name.as_str(), c.stats.speed)))
                .collect::<Vec<_>>(),
            "turn order established"
        );
        Ok(state)
    }

    pub fn team(&self, side: Side) -> &[Character] {
        match side {
            Side::Player => &self.player_team,
            Side::Enemy => &self.enemy_team,
        }
    }

    pub fn character(&self, slot: Slot) -> Option<&Character> {
        self.team(slot.side).get(slot.index)
    }

    pub fn character_mut(&mut self, slot: Slot) -> Option<&mut Character> {
        match slot.side {
            Side::Player => self.player_team.get_mut(slot.index),
            Side::Enemy => self.enemy_team.get_mut(slot.index),
        }
    }

    pub fn is_alive(&self, slot: Slot) -> bool {
        self.character(slot).map(|c| !c.is_defeated()).unwrap_or(false)
    }

    pub fn slot_of(&self, id: u32) -> Option<Slot> {
        [Side::Player, Side::Enemy].into_iter().find_map(|side| {
            self.team(side)
                .iter()
                .position(|c| c.id == id)
                .map(|index| Slot::new(side, index))
        })
    }

    pub fn is_player_character(&self, character: &Character) -> bool {
        self.player_team.iter().any(|member| member.id == character.id)
    }

    pub fn all_defeated(&self, side: Side) -> bool {
        self.team(side).iter().all(Character::is_defeated)
    }

    pub fn acting_slot(&self) -> Slot {
        self.scheduler.acting()
    }

    pub fn acting_character(&self) -> &Character {
        let slot = self.scheduler.acting();
        &self.team(slot.side)[slot.index]
    }

    pub fn heal_cap(&self, slot: Slot) -> Option<u32> {
        self.character(slot).and_then(|c| self.options.heal_cap_for(c))
    }
}

fn validate_teams(player_team: &[Character], enemy_team: &[Character]) -> Result<()> {
    if player_team.is_empty() {
        bail!("player team must contain at least one character");
    }
    if enemy_team.is_empty() {
        bail!("enemy team must contain at least one character");
    }
    let mut seen = HashSet::new();
    for character in player_team.iter().chain(enemy_team) {
        if !seen.insert(character.id) {
            bail!("character id {} ({}) appears more than once", character.id, character.name);
        }
        if character.abilities.is_empty() {
            bail!("{} has no abilities", character.name);
        }
        if character.is_defeated() {
            bail!("{} cannot enter a battle already defeated", character.name);
        }
    }
    Ok(())
}

/// Sticky win/loss detection. A player wipe is checked first, so a double
/// wipe resolves as an enemy win. The transition is logged once.
pub fn check_status(state: &mut BattleState) -> BattleStatus {
    if state.status.is_terminal() {
        return state.status;
    }
    if state.all_defeated(Side::Player) {
        state.status = BattleStatus::EnemyWin;
        state.logger.log_defeat();
    } else if state.all_defeated(Side::Enemy) {
        state.status = BattleStatus::PlayerWin;
        state.logger.log_victory();
    }
    if state.status.is_terminal() {
        tracing::info!(status = ?state.status, turn = state.turn, "battle finished");
    }
    state.status
}

/// Living characters an ability used from `actor` may be aimed at.
pub fn valid_targets(state: &BattleState, actor: Slot, ability: &Ability) -> Vec<Slot> {
    let side = if ability.kind.targets_opponents() {
        actor.side.opponent()
    } else {
        actor.side
    };
    (0..state.team(side).len())
        .map(|index| Slot::new(side, index))
        .filter(|slot| state.is_alive(*slot))
        .collect()
}
