use crate::sim::ability::Ability;
use crate::sim::effects::StatusEffect;
use anyhow::{bail, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn reward_multiplier(self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Uncommon => 1.5,
            Rarity::Rare => 2.0,
            Rarity::Epic => 3.0,
            Rarity::Legendary => 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub attack: u32,
    pub defense: u32,
    pub health: u32,
    pub speed: u32,
    pub special: u32,
}

/// Highest reachable level. The threshold curve stays well inside `u32` up to here.
pub const MAX_LEVEL: u32 = 150;

/// Experience required to go from `level` to `level + 1`. Strictly increasing
/// over `1..MAX_LEVEL`; levels beyond the cap reuse the cap's threshold.
pub fn exp_for_next_level(level: u32) -> u32 {
    let exponent = level.clamp(1, MAX_LEVEL) - 1;
    (100.0 * 1.1f64.powi(exponent as i32)).floor() as u32
}

#[derive(Clone, Debug)]
pub struct Character {
    pub id: u32,
    pub name: String,
    pub species: String,
    pub rarity: Rarity,
    pub level: u32,
    pub experience: u32,
    pub stats: Stats,
    /// Health at instantiation; only consulted when heals are capped.
    pub max_health: u32,
    pub abilities: Vec<Ability>,
    pub effects: Vec<StatusEffect>,
}

impl Character {
    pub fn new(id: u32, name: impl Into<String>, stats: Stats, abilities: Vec<Ability>) -> Self {
        Self {
            id,
            name: name.into(),
            species: String::new(),
            rarity: Rarity::Common,
            level: 1,
            experience: 0,
            max_health: stats.health,
            stats,
            abilities,
            effects: Vec::new(),
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = species.into();
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.clamp(1, MAX_LEVEL);
        self
    }

    pub fn health(&self) -> u32 {
        self.stats.health
    }

    pub fn is_defeated(&self) -> bool {
        self.stats.health == 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.stats.health = self.stats.health.saturating_sub(amount);
    }

    /// Adds health, optionally clamped to `cap`. Returns the amount actually gained.
    pub fn restore_health(&mut self, amount: u32, cap: Option<u32>) -> u32 {
        let before = self.stats.health;
        let raised = before.saturating_add(amount);
        self.stats.health = match cap {
            Some(limit) => raised.min(limit.max(before)),
            None => raised,
        };
        self.stats.health - before
    }

    /// `max(1, power * attack / max(1, defense))` scaled by a uniform factor in
    /// `[0.9, 1.1]`, floored, never below 1.
    pub fn calculate_damage(&self, target: &Character, ability: &Ability, rng: &mut impl Rng) -> u32 {
        let defense = target.stats.defense.max(1) as f64;
        let base = (ability.power as f64 * self.stats.attack as f64 / defense).max(1.0);
        let factor = rng.gen_range(0.9..=1.1);
        let damage = (base * factor).floor().max(1.0);
        if damage >= u32::MAX as f64 {
            u32::MAX
        } else {
            damage as u32
        }
    }

    pub fn exp_to_next_level(&self) -> u32 {
        exp_for_next_level(self.level)
    }

    /// Accumulates experience and promotes once per threshold crossed,
    /// carrying the excess over. Returns the number of levels gained.
    /// At [`MAX_LEVEL`] experience keeps accumulating without promotion.
    pub fn add_experience(&mut self, amount: u32) -> Result<u32> {
        if amount == 0 {
            bail!("{} cannot gain a non-positive amount of experience", self.name);
        }
        self.experience = self.experience.saturating_add(amount);
        let mut gained = 0;
        while self.level < MAX_LEVEL && self.experience >= self.exp_to_next_level() {
            self.experience -= self.exp_to_next_level();
            self.level_up();
            gained += 1;
        }
        if gained > 0 {
            tracing::info!(
                character = %self.name,
                level = self.level,
                experience = self.experience,
                "level up"
            );
        }
        Ok(gained)
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.stats.attack = self.stats.attack.saturating_add(self.stats.attack / 10);
        self.stats.defense = self.stats.defense.saturating_add(self.stats.defense / 10);
        self.stats.health = self.stats.health.saturating_add(self.stats.health / 10);
        self.stats.speed = self.stats.speed.saturating_add(self.stats.speed / 20);
        self.stats.special = self.stats.special.saturating_add(self.stats.special / 10);
        self.max_health = self.stats.health;
    }

    pub fn reduce_cooldowns(&mut self) {
        for ability in &mut self.abilities {
            ability.reduce_cooldown();
        }
    }

    pub fn ready_abilities(&self) -> impl Iterator<Item = (usize, &Ability)> {
        self.abilities
            .iter()
            .enumerate()
            .filter(|(_, ability)| ability.is_ready())
    }
}
