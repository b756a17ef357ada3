use crate::sim::ability::{AbilityKind, EffectKind, EffectTemplate};
use crate::sim::battle::{check_status, valid_targets, BattleState, Slot};
use crate::sim::effects::attach_effect;
use rand::Rng;

/// Why an ability use was refused. Refusals leave the battle untouched apart
/// from one log line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rejection {
    /// The battle already ended; nothing is logged.
    BattleOver,
    MissingAbility,
    MissingTarget,
    ActorDefeated,
    TargetDefeated,
    OnCooldown,
    /// The target is on the wrong side for the ability's kind.
    WrongSide,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Resolution {
    Damage { amount: u32, effect: Option<EffectKind> },
    Heal { amount: u32, effect: Option<EffectKind> },
    /// Buff, debuff and control abilities have no direct stat math; they only
    /// carry their rolled effect.
    Support { kind: AbilityKind, effect: Option<EffectKind> },
}

/// Uses ability `ability_index` of the acting character on `target`.
///
/// Every legality check runs before the cooldown is consumed. Once past them
/// the cooldown is spent, the effect is rolled once, the ability resolves and
/// the battle status is re-checked.
pub fn execute_ability(
    state: &mut BattleState,
    ability_index: usize,
    target: Slot,
    rng: &mut impl Rng,
) -> Result<Resolution, Rejection> {
    if state.status.is_terminal() {
        tracing::debug!("ability ignored: battle is over");
        return Err(Rejection::BattleOver);
    }
    let actor = state.acting_slot();
    validate(state, actor, ability_index, target)?;

    let used = match state.character_mut(actor) {
        Some(character) => character.abilities[ability_index].try_use(rng),
        None => None,
    };
    let Some(used) = used else {
        return Err(reject(state, Rejection::OnCooldown, "Ability is on cooldown!".to_string()));
    };
    let attacker = &state.team(actor.side)[actor.index];
    let ability = &attacker.abilities[ability_index];
    let actor_name = attacker.name.clone();
    let ability_name = ability.name.clone();
    let kind = ability.kind;
    let target_name = state.team(target.side)[target.index].name.clone();
    tracing::debug!(
        actor = %actor_name,
        ability = %ability_name,
        target = %target_name,
        effect = ?used.effect.map(|e| e.kind),
        "executing ability"
    );

    let resolution = match kind {
        AbilityKind::Damage => {
            let defender = &state.team(target.side)[target.index];
            let amount = attacker.calculate_damage(defender, ability, rng);
            if let Some(c) = state.character_mut(target) {
                c.take_damage(amount);
            }
            state.logger.log_damage(&actor_name, &ability_name, &target_name, amount);
            let effect = apply_rolled_effect(state, target, &target_name, used.effect);
            Resolution::Damage { amount, effect }
        }
        AbilityKind::Heal => {
            let special = u64::from(attacker.stats.special);
            let raw = (u64::from(used.power) * special / 100).min(u64::from(u32::MAX)) as u32;
            let cap = state.heal_cap(target);
            let amount = state
                .character_mut(target)
                .map(|c| c.restore_health(raw, cap))
                .unwrap_or(0);
            state.logger.log_heal(&actor_name, &ability_name, &target_name, amount);
            let effect = apply_rolled_effect(state, target, &target_name, used.effect);
            Resolution::Heal { amount, effect }
        }
        AbilityKind::Buff | AbilityKind::Debuff | AbilityKind::Control => {
            if used.effect.is_some() {
                state.logger.log_support(&actor_name, &ability_name, &target_name);
            } else {
                state.logger.log_no_effect(&actor_name, &ability_name);
            }
            let effect = apply_rolled_effect(state, target, &target_name, used.effect);
            Resolution::Support { kind, effect }
        }
    };

    check_status(state);
    Ok(resolution)
}

fn validate(state: &mut BattleState, actor: Slot, ability_index: usize, target: Slot) -> Result<(), Rejection> {
    let attacker = &state.team(actor.side)[actor.index];
    let Some(ability) = attacker.abilities.get(ability_index) else {
        return Err(reject(state, Rejection::MissingAbility, "Invalid ability or target!".to_string()));
    };
    let Some(defender) = state.character(target) else {
        return Err(reject(state, Rejection::MissingTarget, "Invalid ability or target!".to_string()));
    };
    if attacker.is_defeated() {
        return Err(reject(
            state,
            Rejection::ActorDefeated,
            "The attacker is no longer able to act!".to_string(),
        ));
    }
    if defender.is_defeated() {
        let message = format!("{} is already defeated and cannot be targeted!", defender.name);
        return Err(reject(state, Rejection::TargetDefeated, message));
    }
    if !ability.is_ready() {
        let message = format!("{} is on cooldown!", ability.name);
        return Err(reject(state, Rejection::OnCooldown, message));
    }
    if !valid_targets(state, actor, ability).contains(&target) {
        let message = format!("{} is not a valid target for {}!", defender.name, ability.name);
        return Err(reject(state, Rejection::WrongSide, message));
    }
    Ok(())
}

fn reject(state: &mut BattleState, rejection: Rejection, message: String) -> Rejection {
    tracing::debug!(?rejection, "ability rejected");
    state.logger.log_rejection(message);
    rejection
}

fn apply_rolled_effect(
    state: &mut BattleState,
    target: Slot,
    target_name: &str,
    effect: Option<EffectTemplate>,
) -> Option<EffectKind> {
    let template = effect?;
    let attached = state
        .character_mut(target)
        .map(|c| attach_effect(c, &template))
        .unwrap_or(false);
    if !attached {
        return None;
    }
    state.logger.log_effect_applied(target_name, template.kind, template.duration);
    Some(template.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ability::Ability;
    use crate::sim::battle::{BattleOptions, BattleStatus, HealthCap};
    use crate::sim::character::{Character, Stats};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn stats(attack: u32, health: u32, speed: u32, special: u32) -> Stats {
        Stats {
            attack,
            defense: 30,
            health,
            speed,
            special,
        }
    }

    fn toxic_venom() -> Ability {
        Ability::new(6, "Toxic Venom", "Injects a deadly alien toxin", 20, AbilityKind::Damage, 1).with_effect(
            100,
            EffectTemplate {
                kind: EffectKind::Poison,
                amount: 10,
                duration: 3,
            },
        )
    }

    fn nano_repair() -> Ability {
        Ability::new(7, "Nano Repair", "Microscopic robots repair damage", 30, AbilityKind::Heal, 2)
    }

    fn shield_matrix() -> Ability {
        Ability::new(9, "Shield Matrix", "Projects a protective energy field", 0, AbilityKind::Buff, 3).with_effect(
            100,
            EffectTemplate {
                kind: EffectKind::Shield,
                amount: 50,
                duration: 3,
            },
        )
    }

    fn battle(options: BattleOptions) -> BattleState {
        let bio_vex = Character::new(
            3,
            "Bio-Vex",
            stats(100, 320, 60, 50),
            vec![toxic_venom(), nano_repair(), shield_matrix()],
        );
        let epsilon = Character::new(4, "Epsilon", stats(30, 270, 35, 70), vec![nano_repair()]);
        let droid = Character::new(101, "Scrap Droid", stats(30, 200, 30, 10), vec![Ability::basic_attack()]);
        let pirate = Character::new(102, "Space Pirate", stats(40, 180, 40, 15), vec![Ability::basic_attack()]);
        BattleState::new(vec![bio_vex, epsilon], vec![droid, pirate], options).expect("valid teams")
    }

    #[test]
    fn damage_hits_target_attaches_effect_and_starts_cooldown() {
        let mut rng = SmallRng::seed_from_u64(21);
        let mut state = battle(BattleOptions::default());
        let result = execute_ability(&mut state, 0, Slot::enemy(0), &mut rng).expect("legal use");
        let Resolution::Damage { amount, effect } = result else {
            panic!("expected damage, got {result:?}");
        };
        // 20 * 100 / 30 = 66.6
        assert!((59..=73).contains(&amount), "damage {amount} out of band");
        assert_eq!(effect, Some(EffectKind::Poison));
        assert_eq!(state.enemy_team[0].health(), 200 - amount);
        assert_eq!(state.enemy_team[0].effects.len(), 1);
        assert_eq!(state.player_team[0].abilities[0].current_cooldown(), 1);
        let lines = state.logger.log_lines();
        assert_eq!(
            lines[lines.len() - 2],
            format!("Bio-Vex used Toxic Venom on Scrap Droid for {amount} damage!")
        );
        assert_eq!(lines[lines.len() - 1], "poison effect applied to Scrap Droid for 3 turns!");
    }

    #[test]
    fn defeated_target_is_rejected_without_spending_cooldown() {
        let mut rng = SmallRng::seed_from_u64(22);
        let mut state = battle(BattleOptions::default());
        state.enemy_team[0].take_damage(1_000);
        let logs_before = state.logger.log_lines().len();
        let result = execute_ability(&mut state, 0, Slot::enemy(0), &mut rng);
        assert_eq!(result, Err(Rejection::TargetDefeated));
        assert!(state.player_team[0].abilities[0].is_ready());
        assert_eq!(state.enemy_team[0].health(), 0);
        assert_eq!(state.logger.log_lines().len(), logs_before + 1);
        assert_eq!(
            state.logger.log_lines().last().map(String::as_str),
            Some("Scrap Droid is already defeated and cannot be targeted!")
        );
    }

    #[test]
    fn cooldown_and_missing_references_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(23);
        let mut state = battle(BattleOptions::default());
        assert!(execute_ability(&mut state, 0, Slot::enemy(0), &mut rng).is_ok());
        assert_eq!(
            execute_ability(&mut state, 0, Slot::enemy(1), &mut rng),
            Err(Rejection::OnCooldown)
        );
        assert_eq!(
            execute_ability(&mut state, 7, Slot::enemy(1), &mut rng),
            Err(Rejection::MissingAbility)
        );
        assert_eq!(
            execute_ability(&mut state, 1, Slot::player(9), &mut rng),
            Err(Rejection::MissingTarget)
        );
        assert_eq!(
            state.logger.log_lines().last().map(String::as_str),
            Some("Invalid ability or target!")
        );
    }

    #[test]
    fn wrong_side_target_is_rejected_before_cooldown() {
        let mut rng = SmallRng::seed_from_u64(24);
        let mut state = battle(BattleOptions::default());
        assert_eq!(
            execute_ability(&mut state, 0, Slot::player(1), &mut rng),
            Err(Rejection::WrongSide)
        );
        assert_eq!(
            execute_ability(&mut state, 1, Slot::enemy(0), &mut rng),
            Err(Rejection::WrongSide)
        );
        assert!(state.player_team[0].abilities.iter().all(Ability::is_ready));
    }

    #[test]
    fn heal_scales_with_special_and_is_uncapped_by_default() {
        let mut rng = SmallRng::seed_from_u64(25);
        let mut state = battle(BattleOptions::default());
        let result = execute_ability(&mut state, 1, Slot::player(1), &mut rng);
        // 30 * 50 / 100
        assert_eq!(result, Ok(Resolution::Heal { amount: 15, effect: None }));
        assert_eq!(state.player_team[1].health(), 285);
        assert_eq!(
            state.logger.log_lines().last().map(String::as_str),
            Some("Bio-Vex used Nano Repair on Epsilon for 15 healing!")
        );
    }

    #[test]
    fn heal_respects_max_health_cap_option() {
        let mut rng = SmallRng::seed_from_u64(26);
        let mut state = battle(BattleOptions {
            health_cap: HealthCap::MaxHealth,
            ..BattleOptions::default()
        });
        state.player_team[1].take_damage(5);
        let result = execute_ability(&mut state, 1, Slot::player(1), &mut rng);
        assert_eq!(result, Ok(Resolution::Heal { amount: 5, effect: None }));
        assert_eq!(state.player_team[1].health(), 270);
    }

    #[test]
    fn support_ability_attaches_effect_to_ally() {
        let mut rng = SmallRng::seed_from_u64(27);
        let mut state = battle(BattleOptions::default());
        let result = execute_ability(&mut state, 2, Slot::player(1), &mut rng);
        assert_eq!(
            result,
            Ok(Resolution::Support {
                kind: AbilityKind::Buff,
                effect: Some(EffectKind::Shield),
            })
        );
        assert_eq!(state.player_team[1].effects[0].kind, EffectKind::Shield);
        assert_eq!(state.player_team[1].health(), 270);
    }

    #[test]
    fn killing_blow_ends_the_battle_and_later_uses_are_ignored() {
        let mut rng = SmallRng::seed_from_u64(28);
        let mut state = battle(BattleOptions::default());
        state.enemy_team[0].take_damage(1_000);
        state.enemy_team[1].stats.health = 1;
        assert!(execute_ability(&mut state, 0, Slot::enemy(1), &mut rng).is_ok());
        assert_eq!(state.status, BattleStatus::PlayerWin);
        let logs = state.logger.log_lines().len();
        assert_eq!(
            execute_ability(&mut state, 1, Slot::player(0), &mut rng),
            Err(Rejection::BattleOver)
        );
        assert_eq!(state.logger.log_lines().len(), logs);
    }
}
