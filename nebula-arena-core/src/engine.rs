//! High-level battle controller for UI callers and automated runs.

use crate::sim::ai::BattleAI;
use crate::sim::battle::{BattleOptions, BattleState, BattleStatus, Slot};
use crate::sim::character::Character;
use crate::sim::resolver::{self, Rejection, Resolution};
use crate::sim::rewards::{compute_rewards, Rewards};
use crate::sim::scheduler;
use anyhow::Result;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// What happened to the actor during one [`BattleEngine::auto_turn`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TurnOutcome {
    Acted(Resolution),
    Rejected(Rejection),
    /// The policy found nothing to do.
    Passed,
    /// The battle was already over; nothing changed.
    Finished,
}

/// Result of a single automated turn.
#[derive(Clone, Debug)]
pub struct StepResult {
    /// Character that held the turn.
    pub actor: Slot,
    pub outcome: TurnOutcome,
    /// Log lines appended during the step.
    pub events: Vec<String>,
    pub status: BattleStatus,
}

/// Owns one battle from creation to termination.
pub struct BattleEngine {
    state: BattleState,
    rng: SmallRng,
    rewards: Option<Rewards>,
}

impl BattleEngine {
    /// Create a new engine from battle-private copies of both teams.
    pub fn new(player_team: &[Character], enemy_team: &[Character], seed: u64) -> Result<Self> {
        Self::with_options(player_team, enemy_team, seed, BattleOptions::default())
    }

    pub fn with_options(
        player_team: &[Character],
        enemy_team: &[Character],
        seed: u64,
        options: BattleOptions,
    ) -> Result<Self> {
        let state = BattleState::new(player_team.to_vec(), enemy_team.to_vec(), options)?;
        tracing::info!(
            players = state.player_team.len(),
            enemies = state.enemy_team.len(),
            seed,
            "battle created"
        );
        Ok(Self {
            state,
            rng: SmallRng::seed_from_u64(seed),
            rewards: None,
        })
    }

    /// Uses ability `ability` of the acting character on `target`.
    /// Every failure is reported as `false` plus a log line.
    pub fn execute_ability(&mut self, ability: usize, target: Slot) -> bool {
        self.try_execute_ability(ability, target).is_ok()
    }

    pub fn try_execute_ability(&mut self, ability: usize, target: Slot) -> Result<Resolution, Rejection> {
        let result = resolver::execute_ability(&mut self.state, ability, target, &mut self.rng);
        self.settle();
        result
    }

    pub fn advance_turn(&mut self) {
        scheduler::advance_turn(&mut self.state);
        self.settle();
    }

    /// Lets character `id` act instead of the scheduled one for this turn.
    pub fn set_acting_override(&mut self, id: u32) -> bool {
        scheduler::set_acting_override(&mut self.state, id)
    }

    /// The character allowed to act right now.
    pub fn current_character(&self) -> &Character {
        self.state.acting_character()
    }

    pub fn current_slot(&self) -> Slot {
        self.state.acting_slot()
    }

    pub fn is_player_character(&self, character: &Character) -> bool {
        self.state.is_player_character(character)
    }

    pub fn is_player_turn(&self) -> bool {
        self.state.scheduler.is_player_turn()
    }

    pub fn status(&self) -> BattleStatus {
        self.state.status
    }

    pub fn is_terminal(&self) -> bool {
        self.state.status.is_terminal()
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn logs(&self) -> &[String] {
        self.state.logger.log_lines()
    }

    pub fn log_json(&self) -> serde_json::Value {
        self.state.logger.to_json()
    }

    pub fn player_team(&self) -> &[Character] {
        &self.state.player_team
    }

    pub fn enemy_team(&self) -> &[Character] {
        &self.state.enemy_team
    }

    /// Access the internal battle state.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Rewards fixed when the battle ended; zero while it is still running.
    pub fn rewards(&self) -> Rewards {
        self.rewards.unwrap_or_default()
    }

    /// Lets `policy` act for whoever holds the turn, then advances.
    pub fn auto_turn(&mut self, policy: &mut dyn BattleAI) -> StepResult {
        let actor = self.current_slot();
        let logged = self.logs().len();
        let outcome = if self.is_terminal() {
            TurnOutcome::Finished
        } else {
            let outcome = match policy.choose_action(&self.state, actor) {
                Some(plan) => match self.try_execute_ability(plan.ability, plan.target) {
                    Ok(resolution) => TurnOutcome::Acted(resolution),
                    Err(rejection) => {
                        tracing::warn!(?rejection, ?plan, "policy chose an illegal action");
                        TurnOutcome::Rejected(rejection)
                    }
                },
                None => {
                    let name = self.state.acting_character().name.clone();
                    self.state.logger.log_pass(&name);
                    TurnOutcome::Passed
                }
            };
            self.advance_turn();
            outcome
        };
        StepResult {
            actor,
            outcome,
            events: self.logs()[logged..].to_vec(),
            status: self.status(),
        }
    }

    fn settle(&mut self) {
        if self.rewards.is_some() || !self.state.status.is_terminal() {
            return;
        }
        let rewards = compute_rewards(self.state.status, &self.state.enemy_team);
        tracing::info!(
            status = ?self.state.status,
            turn = self.state.turn,
            exp = rewards.exp,
            gold = rewards.gold,
            "rewards computed"
        );
        self.rewards = Some(rewards);
    }
}
