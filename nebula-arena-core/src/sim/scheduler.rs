use crate::sim::battle::{check_status, BattleState, BattleStatus, Side, Slot};
use crate::sim::character::Character;
use crate::sim::effects::process_effects;

/// Fixed speed-ordered sequence of every combatant plus the turn cursor.
///
/// Defeated characters stay in `order` and are skipped, so indices never
/// shift during a battle.
#[derive(Clone, Debug)]
pub struct TurnScheduler {
    order: Vec<Slot>,
    current: usize,
    acting_override: Option<Slot>,
    player_turn: bool,
}

impl TurnScheduler {
    /// Both teams merged (players first) and stably sorted by speed, fastest first.
    pub fn new(player_team: &[Character], enemy_team: &[Character]) -> Self {
        let mut entries: Vec<(Slot, u32)> = player_team
            .iter()
            .enumerate()
            .map(|(index, c)| (Slot::player(index), c.stats.speed))
            .chain(
                enemy_team
                    .iter()
                    .enumerate()
                    .map(|(index, c)| (Slot::enemy(index), c.stats.speed)),
            )
            .collect();
        entries.sort_by(|lhs, rhs| rhs.1.cmp(&lhs.1));
        let order: Vec<Slot> = entries.into_iter().map(|(slot, _)| slot).collect();
        let player_turn = order.first().map(|slot| slot.side == Side::Player).unwrap_or(true);
        Self {
            order,
            current: 0,
            acting_override: None,
            player_turn,
        }
    }

    pub fn order(&self) -> &[Slot] {
        &self.order
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The combatant the speed order names for this turn.
    pub fn scheduled(&self) -> Slot {
        self.order[self.current]
    }

    /// The combatant allowed to act: the override if one is set, else [`Self::scheduled`].
    pub fn acting(&self) -> Slot {
        self.acting_override.unwrap_or_else(|| self.scheduled())
    }

    pub fn acting_override(&self) -> Option<Slot> {
        self.acting_override
    }

    pub fn is_player_turn(&self) -> bool {
        self.player_turn
    }

    pub fn clear_override(&mut self) {
        self.acting_override = None;
    }

    /// First index after the cursor, wrapping and finishing on the cursor
    /// itself, whose slot satisfies `is_alive`.
    pub fn next_living(&self, is_alive: impl Fn(Slot) -> bool) -> Option<usize> {
        let len = self.order.len();
        (1..=len)
            .map(|step| (self.current + step) % len)
            .find(|&index| is_alive(self.order[index]))
    }

    fn land_on(&mut self, index: usize) {
        self.current = index;
        self.player_turn = self.order[index].side == Side::Player;
    }
}

/// Lets a different living member of the side whose turn it is act in place
/// of the scheduled one. The override lasts until the next advance.
pub fn set_acting_override(state: &mut BattleState, id: u32) -> bool {
    if state.status.is_terminal() {
        return false;
    }
    let Some(slot) = state.slot_of(id) else {
        tracing::debug!(id, "override rejected: unknown character");
        return false;
    };
    if slot.side != state.scheduler.scheduled().side || !state.is_alive(slot) {
        tracing::debug!(id, ?slot, "override rejected: not a living member of the side on turn");
        return false;
    }
    state.scheduler.acting_override = Some(slot);
    true
}

/// Ends the current turn: ticks effects, clears the override, moves the cursor
/// to the next living combatant, and cools down every living character.
pub fn advance_turn(state: &mut BattleState) {
    if state.status.is_terminal() {
        return;
    }
    process_effects(state);
    state.scheduler.clear_override();
    state.turn = state.turn.saturating_add(1);
    if check_status(state).is_terminal() {
        return;
    }

    let next = state.scheduler.next_living(|slot| state.is_alive(slot));
    let Some(index) = next else {
        tracing::warn!("no living combatant left in turn order, forcing status check");
        if check_status(state) == BattleStatus::Active {
            // Unreachable while every team is non-empty: no living combatant
            // means the player team is wiped.
            state.status = BattleStatus::EnemyWin;
            state.logger.log_defeat();
        }
        return;
    };

    state.scheduler.land_on(index);
    for member in state.player_team.iter_mut().chain(state.enemy_team.iter_mut()) {
        if !member.is_defeated() {
            member.reduce_cooldowns();
        }
    }

    let name = state.acting_character().name.clone();
    tracing::debug!(
        character = %name,
        index,
        player_turn = state.scheduler.is_player_turn(),
        "turn changed"
    );
    state.logger.log_turn(&name);
    check_status(state);
}
