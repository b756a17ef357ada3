use nebula_arena_core::prelude::*;
use nebula_arena_core::sim::character::exp_for_next_level;
use nebula_arena_core::sim::scheduler::TurnScheduler;
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn with_stats(id: u32, attack: u32, defense: u32, health: u32, speed: u32) -> Character {
    Character::new(
        id,
        format!("C{id}"),
        Stats {
            attack,
            defense,
            health,
            speed,
            special: 10,
        },
        vec![Ability::basic_attack()],
    )
}

proptest! {
    #[test]
    fn damage_is_at_least_one(
        power in 0u32..500,
        attack in 0u32..1_000,
        defense in 0u32..1_000,
        seed in any::<u64>(),
    ) {
        let attacker = with_stats(1, attack, 30, 100, 30);
        let defender = with_stats(2, 30, defense, 100, 30);
        let ability = Ability::new(1, "Probe", "", power, AbilityKind::Damage, 0);
        let mut rng = SmallRng::seed_from_u64(seed);
        prop_assert!(attacker.calculate_damage(&defender, &ability, &mut rng) >= 1);
    }

    #[test]
    fn health_clamps_at_zero(health in 1u32..1_000, hits in proptest::collection::vec(0u32..2_000, 1..10)) {
        let mut target = with_stats(1, 30, 30, health, 30);
        let mut expected = health;
        for hit in hits {
            target.take_damage(hit);
            expected = expected.saturating_sub(hit);
            prop_assert_eq!(target.health(), expected);
        }
        prop_assert_eq!(target.is_defeated(), expected == 0);
    }

    #[test]
    fn turn_order_is_a_speed_sorted_permutation(
        player_speeds in proptest::collection::vec(0u32..200, 1..6),
        enemy_speeds in proptest::collection::vec(0u32..200, 1..6),
    ) {
        let players: Vec<Character> = player_speeds
            .iter()
            .enumerate()
            .map(|(i, &s)| with_stats(i as u32 + 1, 30, 30, 100, s))
            .collect();
        let enemies: Vec<Character> = enemy_speeds
            .iter()
            .enumerate()
            .map(|(i, &s)| with_stats(i as u32 + 101, 30, 30, 100, s))
            .collect();
        let scheduler = TurnScheduler::new(&players, &enemies);
        let order = scheduler.order();
        prop_assert_eq!(order.len(), players.len() + enemies.len());
        let speed_of = |slot: &Slot| match slot.side {
            Side::Player => players[slot.index].stats.speed,
            Side::Enemy => enemies[slot.index].stats.speed,
        };
        for pair in order.windows(2) {
            prop_assert!(speed_of(&pair[0]) >= speed_of(&pair[1]));
        }
        let mut seen = order.to_vec();
        seen.sort_by_key(|slot| (slot.side == Side::Enemy, slot.index));
        seen.dedup();
        prop_assert_eq!(seen.len(), order.len());
    }

    #[test]
    fn cooldown_never_goes_negative(cooldown in 0u32..10, extra in 0u32..5, seed in any::<u64>()) {
        let mut ability = Ability::new(1, "Probe", "", 10, AbilityKind::Damage, cooldown);
        let mut rng = SmallRng::seed_from_u64(seed);
        prop_assert!(ability.try_use(&mut rng).is_some());
        prop_assert_eq!(ability.current_cooldown(), cooldown);
        for _ in 0..cooldown {
            ability.reduce_cooldown();
        }
        prop_assert!(ability.is_ready());
        for _ in 0..extra {
            ability.reduce_cooldown();
        }
        prop_assert_eq!(ability.current_cooldown(), 0);
    }

    #[test]
    fn experience_thresholds_are_strictly_increasing(level in 1u32..100) {
        prop_assert!(exp_for_next_level(level + 1) > exp_for_next_level(level));
    }

    #[test]
    fn bulk_experience_levels_with_carry_over(amount in 1u32..20_000) {
        let mut character = with_stats(1, 50, 40, 300, 45);
        let gained = character.add_experience(amount).expect("positive amount");
        let mut level = 1;
        let mut remaining = amount;
        while remaining >= exp_for_next_level(level) {
            remaining -= exp_for_next_level(level);
            level += 1;
        }
        prop_assert_eq!(character.level, level);
        prop_assert_eq!(gained, level - 1);
        prop_assert_eq!(character.experience, remaining);
    }

    #[test]
    fn random_battles_never_select_a_defeated_actor(seed in any::<u64>()) {
        let catalog = Catalog::builtin();
        let players = catalog.instantiate_team(&[1, 4]).expect("players");
        let enemies = catalog.instantiate_team(&[101, 102]).expect("enemies");
        let mut engine = BattleEngine::new(&players, &enemies, seed).expect("valid battle");
        let mut ai = RandomAI::new(seed);
        for _ in 0..300 {
            if engine.is_terminal() {
                break;
            }
            prop_assert!(!engine.current_character().is_defeated());
            engine.auto_turn(&mut ai);
        }
        let player_wiped = engine.player_team().iter().all(Character::is_defeated);
        let enemy_wiped = engine.enemy_team().iter().all(Character::is_defeated);
        match engine.status() {
            BattleStatus::Active => prop_assert!(!player_wiped && !enemy_wiped),
            BattleStatus::PlayerWin => prop_assert!(enemy_wiped),
            BattleStatus::EnemyWin => prop_assert!(player_wiped),
        }
    }
}

#[test]
fn thousand_exp_from_level_one() {
    let mut character = with_stats(1, 50, 40, 300, 45);
    assert_eq!(character.add_experience(1_000).ok(), Some(7));
    assert_eq!(character.level, 8);
    assert_eq!(character.experience, 52);
    assert!(character.add_experience(0).is_err());
}
