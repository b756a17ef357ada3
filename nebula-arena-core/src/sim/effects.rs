use crate::sim::ability::{EffectKind, EffectTemplate};
use crate::sim::battle::BattleState;
use crate::sim::character::Character;

/// A timed effect attached to a character.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusEffect {
    pub kind: EffectKind,
    pub amount: u32,
    /// Positive while the effect is attached.
    pub remaining: u32,
}

impl StatusEffect {
    pub fn from_template(template: &EffectTemplate) -> Self {
        Self {
            kind: template.kind,
            amount: template.amount,
            remaining: template.duration,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EffectTick {
    Poisoned { amount: u32 },
    Regenerated { amount: u32 },
    /// Stun, shield and speed-buff decay but have no per-turn consequence.
    Inert { kind: EffectKind },
    WoreOff { kind: EffectKind },
}

/// Attaches an effect. Zero-duration effects would be removed before ever
/// ticking, so they are dropped.
pub fn attach_effect(character: &mut Character, template: &EffectTemplate) -> bool {
    if template.duration == 0 {
        return false;
    }
    character.effects.push(StatusEffect::from_template(template));
    true
}

/// Applies one tick of every attached effect in attachment order, then
/// decrements durations and drops the effects that reached zero.
pub fn tick_effects(character: &mut Character, heal_cap: Option<u32>) -> Vec<EffectTick> {
    let mut ticks = Vec::new();
    if character.is_defeated() || character.effects.is_empty() {
        return ticks;
    }
    let mut effects = std::mem::take(&mut character.effects);
    for effect in &mut effects {
        // A poison tick earlier in this pass may have finished the character.
        if character.is_defeated() {
            break;
        }
        let tick = match effect.kind {
            EffectKind::Poison => {
                character.take_damage(effect.amount);
                EffectTick::Poisoned { amount: effect.amount }
            }
            EffectKind::Regeneration => {
                let amount = character.restore_health(effect.amount, heal_cap);
                EffectTick::Regenerated { amount }
            }
            EffectKind::Stun | EffectKind::Shield | EffectKind::SpeedBuff => {
                EffectTick::Inert { kind: effect.kind }
            }
        };
        ticks.push(tick);
        effect.remaining = effect.remaining.saturating_sub(1);
        if effect.remaining == 0 {
            ticks.push(EffectTick::WoreOff { kind: effect.kind });
        }
    }
    effects.retain(|effect| effect.remaining > 0);
    character.effects = effects;
    ticks
}

/// Ticks every character's effects in turn-order sequence and writes the
/// results to the battle log.
pub fn process_effects(state: &mut BattleState) {
    for position in 0..state.scheduler.order().len() {
        let slot = state.scheduler.order()[position];
        let cap = state.heal_cap(slot);
        let Some(character) = state.character_mut(slot) else {
            continue;
        };
        let ticks = tick_effects(character, cap);
        if ticks.is_empty() {
            continue;
        }
        let name = character.name.clone();
        for tick in ticks {
            match tick {
                EffectTick::Poisoned { amount } => state.logger.log_poison(&name, amount),
                EffectTick::Regenerated { amount } => state.logger.log_regeneration(&name, amount),
                EffectTick::Inert { kind } => {
                    tracing::trace!(character = %name, %kind, "inert effect ticked");
                }
                EffectTick::WoreOff { kind } => state.logger.log_effect_expired(&name, kind),
            }
        }
    }
}
