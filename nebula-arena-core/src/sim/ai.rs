use crate::sim::battle::{valid_targets, BattleState, Slot};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Ability index into the actor's ability list plus the chosen target.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PlannedAction {
    pub ability: usize,
    pub target: Slot,
}

pub trait BattleAI {
    /// Picks what `actor` does this turn. `None` means the actor passes.
    fn choose_action(&mut self, state: &BattleState, actor: Slot) -> Option<PlannedAction>;
}

/// Every legal `(ability, target)` pair for `actor` right now.
pub fn legal_actions(state: &BattleState, actor: Slot) -> Vec<PlannedAction> {
    let Some(character) = state.character(actor) else {
        return Vec::new();
    };
    if character.is_defeated() {
        return Vec::new();
    }
    character
        .ready_abilities()
        .flat_map(|(ability, definition)| {
            valid_targets(state, actor, definition)
                .into_iter()
                .map(move |target| PlannedAction { ability, target })
        })
        .collect()
}

pub struct RandomAI {
    rng: SmallRng,
}

impl RandomAI {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BattleAI for RandomAI {
    /// Draws uniformly from the ready abilities, then uniformly from that
    /// ability's valid targets. Passes when the drawn ability has no target.
    fn choose_action(&mut self, state: &BattleState, actor: Slot) -> Option<PlannedAction> {
        let character = state.character(actor)?;
        let ready: Vec<usize> = character.ready_abilities().map(|(index, _)| index).collect();
        let ability = *ready.choose(&mut self.rng)?;
        let targets = valid_targets(state, actor, &character.abilities[ability]);
        let Some(target) = targets.choose(&mut self.rng).copied() else {
            tracing::debug!(actor = %character.name, ability, "drawn ability has no valid target");
            return None;
        };
        Some(PlannedAction { ability, target })
    }
}
