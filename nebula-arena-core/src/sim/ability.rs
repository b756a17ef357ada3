use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    Damage,
    Heal,
    Buff,
    Debuff,
    Control,
}

impl AbilityKind {
    /// Damage, debuff and control abilities are aimed at the opposing side.
    pub fn targets_opponents(self) -> bool {
        matches!(self, AbilityKind::Damage | AbilityKind::Debuff | AbilityKind::Control)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    Poison,
    Regeneration,
    Stun,
    Shield,
    #[serde(alias = "speed")]
    SpeedBuff,
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EffectKind::Poison => "poison",
            EffectKind::Regeneration => "regeneration",
            EffectKind::Stun => "stun",
            EffectKind::Shield => "shield",
            EffectKind::SpeedBuff => "speed-buff",
        };
        f.write_str(name)
    }
}

/// Secondary effect carried by an ability definition.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct EffectTemplate {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default)]
    pub amount: u32,
    pub duration: u32,
}

/// Outcome of a successful [`Ability::try_use`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AbilityUse {
    pub power: u32,
    pub effect: Option<EffectTemplate>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ability {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub power: u32,
    pub kind: AbilityKind,
    pub cooldown: u32,
    current_cooldown: u32,
    /// Percent chance (0-100) that `effect` triggers on use.
    pub effect_chance: u8,
    pub effect: Option<EffectTemplate>,
}

pub const BASIC_ATTACK_ID: u32 = 9999;

impl Ability {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        power: u32,
        kind: AbilityKind,
        cooldown: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            power,
            kind,
            cooldown,
            current_cooldown: 0,
            effect_chance: 0,
            effect: None,
        }
    }

    pub fn with_effect(mut self, chance: u8, effect: EffectTemplate) -> Self {
        self.effect_chance = chance.min(100);
        self.effect = Some(effect);
        self
    }

    /// Starts the ability part-way through a cooldown, clamped to `cooldown`.
    pub fn with_current_cooldown(mut self, remaining: u32) -> Self {
        self.current_cooldown = remaining.min(self.cooldown);
        self
    }

    /// Fallback ability given to characters defined without any.
    pub fn basic_attack() -> Self {
        Self::new(
            BASIC_ATTACK_ID,
            "Basic Attack",
            "A simple attack that deals moderate damage",
            25,
            AbilityKind::Damage,
            0,
        )
    }

    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }

    /// Puts the ability on cooldown and rolls its effect once.
    ///
    /// Returns `None` without touching any state when the ability is still
    /// cooling down.
    pub fn try_use(&mut self, rng: &mut impl Rng) -> Option<AbilityUse> {
        if !self.is_ready() {
            tracing::debug!(ability = %self.name, remaining = self.current_cooldown, "ability on cooldown");
            return None;
        }
        self.current_cooldown = self.cooldown;
        Some(AbilityUse {
            power: self.power,
            effect: self.roll_effect(rng),
        })
    }

    /// Half-open roll in `[0, 100)`; the effect triggers when `roll < chance`.
    pub fn roll_effect(&self, rng: &mut impl Rng) -> Option<EffectTemplate> {
        let effect = self.effect?;
        if self.effect_chance == 0 {
            return None;
        }
        let roll = rng.gen_range(0.0..100.0);
        if roll < f64::from(self.effect_chance) {
            Some(effect)
        } else {
            None
        }
    }

    pub fn reduce_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn plasma_blast() -> Ability {
        Ability::new(2, "Plasma Blast", "Area damage with plasma energy", 35, AbilityKind::Damage, 2)
    }

    #[test]
    fn use_sets_full_cooldown_and_blocks_reuse() {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut ability = plasma_blast();
        let used = ability.try_use(&mut rng).expect("ability starts ready");
        assert_eq!(used.power, 35);
        assert_eq!(ability.current_cooldown(), 2);
        assert!(!ability.is_ready());
        assert!(ability.try_use(&mut rng).is_none());
        assert_eq!(ability.current_cooldown(), 2);
    }

    #[test]
    fn cooldown_recovers_after_cooldown_reductions_and_stays_at_zero() {
        let mut rng = SmallRng::seed_from_u64(2);
        let mut ability = plasma_blast();
        ability.try_use(&mut rng);
        ability.reduce_cooldown();
        assert!(!ability.is_ready());
        ability.reduce_cooldown();
        assert!(ability.is_ready());
        ability.reduce_cooldown();
        ability.reduce_cooldown();
        assert_eq!(ability.current_cooldown(), 0);
    }

    #[test]
    fn zero_cooldown_ability_is_always_ready() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut ability = Ability::basic_attack();
        for _ in 0..5 {
            assert!(ability.try_use(&mut rng).is_some());
        }
    }

    #[test]
    fn clone_keeps_cooldown_but_is_independent() {
        let mut rng = SmallRng::seed_from_u64(4);
        let mut original = plasma_blast();
        original.try_use(&mut rng);
        let mut copy = original.clone();
        assert_eq!(copy.current_cooldown(), 2);
        copy.reduce_cooldown();
        copy.reduce_cooldown();
        assert!(copy.is_ready());
        assert_eq!(original.current_cooldown(), 2);
    }

    #[test]
    fn effect_chance_extremes() {
        let mut rng = SmallRng::seed_from_u64(5);
        let poison = EffectTemplate {
            kind: EffectKind::Poison,
            amount: 10,
            duration: 3,
        };
        let always = plasma_blast().with_effect(100, poison);
        let never = plasma_blast().with_effect(0, poison);
        for _ in 0..200 {
            assert_eq!(always.roll_effect(&mut rng), Some(poison));
            assert_eq!(never.roll_effect(&mut rng), None);
        }
    }

    #[test]
    fn effect_roll_rate_tracks_chance() {
        let mut rng = SmallRng::seed_from_u64(6);
        let ability = plasma_blast().with_effect(
            70,
            EffectTemplate {
                kind: EffectKind::Poison,
                amount: 10,
                duration: 3,
            },
        );
        let hits = (0..2000).filter(|_| ability.roll_effect(&mut rng).is_some()).count();
        let rate = hits as f64 / 2000.0;
        assert!((rate - 0.7).abs() < 0.05, "expected rate near 0.7, got {rate}");
    }

    #[test]
    fn initial_cooldown_is_clamped() {
        let ability = plasma_blast().with_current_cooldown(9);
        assert_eq!(ability.current_cooldown(), 2);
    }

    #[test]
    fn speed_alias_deserializes_to_speed_buff() {
        let effect: EffectTemplate =
            serde_json::from_str(r#"{"type":"speed","amount":20,"duration":2}"#).expect("valid effect");
        assert_eq!(effect.kind, EffectKind::SpeedBuff);
        assert_eq!(effect.kind.to_string(), "speed-buff");
    }
}
