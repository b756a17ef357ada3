//! Roster loading and normalisation.
//!
//! Raw roster data may leave out stats, single stat values, or abilities.
//! [`normalize`] fills the documented defaults once, so every [`Character`]
//! handed to a battle is complete.

use crate::data::abilities::{AbilityData, ABILITIES};
use crate::data::characters::CHARACTERS;
use crate::sim::ability::{Ability, AbilityKind, EffectTemplate};
use crate::sim::character::{Character, Rarity, Stats};
use anyhow::{anyhow, bail, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::BTreeMap;

const DEFAULT_STAT: u32 = 30;

/// Stat block used when an entry has no stats at all.
pub const DEFAULT_STATS: Stats = Stats {
    attack: 30,
    defense: 30,
    health: 200,
    speed: 30,
    special: 10,
};

#[derive(Clone, Debug, Deserialize)]
pub struct RosterFile {
    pub characters: Vec<RosterEntry>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub stats: Option<StatsEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct StatsEntry {
    pub attack: Option<u32>,
    pub defense: Option<u32>,
    pub health: Option<u32>,
    pub speed: Option<u32>,
    pub special: Option<u32>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityEntry {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub power: u32,
    #[serde(rename = "type")]
    pub kind: AbilityKind,
    #[serde(default)]
    pub cooldown: u32,
    #[serde(default)]
    pub current_cooldown: u32,
    #[serde(default)]
    pub effect_chance: u32,
    #[serde(default)]
    pub effect: Option<EffectTemplate>,
}

impl From<&AbilityData> for AbilityEntry {
    fn from(data: &AbilityData) -> Self {
        Self {
            id: data.id,
            name: data.name.to_string(),
            description: data.description.to_string(),
            power: data.power,
            kind: data.kind,
            cooldown: data.cooldown,
            current_cooldown: 0,
            effect_chance: u32::from(data.effect_chance),
            effect: data.effect,
        }
    }
}

/// Validated roster keyed by character id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    characters: BTreeMap<u32, Character>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    normalize(builtin_roster()).expect("built-in roster data must normalise")
});

impl Catalog {
    /// The base game's eleven characters.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: RosterFile = serde_json::from_str(json).context("parsing roster JSON")?;
        normalize(file)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// A battle-private copy of the catalog entry.
    pub fn instantiate(&self, id: u32) -> Result<Character> {
        self.get(id)
            .cloned()
            .ok_or_else(|| anyhow!("character {id} is not in the catalog"))
    }

    pub fn instantiate_team(&self, ids: &[u32]) -> Result<Vec<Character>> {
        ids.iter().map(|&id| self.instantiate(id)).collect()
    }

    pub fn player_characters(&self) -> Vec<&Character> {
        self.characters.range(..100u32).map(|(_, c)| c).collect()
    }

    pub fn enemy_characters(&self) -> Vec<&Character> {
        self.characters.range(100u32..).map(|(_, c)| c).collect()
    }

    pub fn basic_enemies(&self) -> Vec<&Character> {
        self.characters.range(100u32..200).map(|(_, c)| c).collect()
    }

    pub fn advanced_enemies(&self) -> Vec<&Character> {
        self.characters.range(200u32..).map(|(_, c)| c).collect()
    }
}

fn builtin_roster() -> RosterFile {
    let mut characters: Vec<RosterEntry> = CHARACTERS
        .values()
        .map(|data| RosterEntry {
            id: data.id,
            name: data.name.to_string(),
            species: data.species.to_string(),
            rarity: data.rarity,
            level: Some(data.level),
            experience: 0,
            stats: Some(StatsEntry {
                attack: Some(data.stats.attack),
                defense: Some(data.stats.defense),
                health: Some(data.stats.health),
                speed: Some(data.stats.speed),
                special: Some(data.stats.special),
            }),
            abilities: data
                .abilities
                .iter()
                .filter_map(|key| ABILITIES.get(*key))
                .map(AbilityEntry::from)
                .collect(),
        })
        .collect();
    characters.sort_by_key(|entry| entry.id);
    RosterFile { characters }
}

/// Turns raw roster data into a catalog, filling defaults and rejecting what
/// cannot be defaulted.
pub fn normalize(file: RosterFile) -> Result<Catalog> {
    let mut characters = BTreeMap::new();
    for entry in file.characters {
        let id = entry.id;
        let name = entry.name.clone();
        let character = normalize_entry(entry).with_context(|| format!("character {id} ({name})"))?;
        if characters.insert(id, character).is_some() {
            bail!("duplicate character id {id} ({name})");
        }
    }
    tracing::debug!(characters = characters.len(), "roster normalised");
    Ok(Catalog { characters })
}

fn normalize_entry(entry: RosterEntry) -> Result<Character> {
    let stats = match entry.stats {
        None => {
            tracing::debug!(id = entry.id, "no stats, using default stat block");
            DEFAULT_STATS
        }
        Some(raw) => Stats {
            attack: raw.attack.unwrap_or(DEFAULT_STAT),
            defense: raw.defense.unwrap_or(DEFAULT_STAT),
            health: raw.health.unwrap_or(DEFAULT_STAT),
            speed: raw.speed.unwrap_or(DEFAULT_STAT),
            special: raw.special.unwrap_or(DEFAULT_STAT),
        },
    };
    if stats.health == 0 {
        bail!("health must be positive");
    }
    let mut abilities = entry
        .abilities
        .into_iter()
        .map(normalize_ability)
        .collect::<Result<Vec<_>>>()?;
    if abilities.is_empty() {
        tracing::debug!(id = entry.id, "no abilities, adding Basic Attack");
        abilities.push(Ability::basic_attack());
    }
    let mut character = Character::new(entry.id, entry.name, stats, abilities)
        .with_species(entry.species)
        .with_rarity(entry.rarity)
        .with_level(entry.level.unwrap_or(1));
    character.experience = entry.experience;
    Ok(character)
}

fn normalize_ability(entry: AbilityEntry) -> Result<Ability> {
    if entry.effect_chance > 100 {
        bail!("{}: effect chance {} exceeds 100", entry.name, entry.effect_chance);
    }
    if entry.current_cooldown > entry.cooldown {
        bail!(
            "{}: current cooldown {} exceeds cooldown {}",
            entry.name,
            entry.current_cooldown,
            entry.cooldown
        );
    }
    let mut ability = Ability::new(entry.id, entry.name, entry.description, entry.power, entry.kind, entry.cooldown);
    if let Some(effect) = entry.effect {
        if effect.duration == 0 {
            bail!("{}: effect duration must be positive", ability.name);
        }
        ability = ability.with_effect(entry.effect_chance as u8, effect);
    }
    Ok(ability.with_current_cooldown(entry.current_cooldown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ability::{EffectKind, BASIC_ATTACK_ID};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn missing_data_is_defaulted() {
        let catalog = Catalog::from_json(
            r#"{
                "characters": [
                    { "id": 1, "name": "Blank" },
                    { "id": 2, "name": "Partial", "stats": { "attack": 70, "health": 250 } }
                ]
            }"#,
        )
        .expect("valid roster");
        let blank = catalog.get(1).expect("blank");
        assert_eq!(blank.stats, DEFAULT_STATS);
        assert_eq!(blank.abilities.len(), 1);
        assert_eq!(blank.abilities[0].id, BASIC_ATTACK_ID);
        assert_eq!(blank.abilities[0].power, 25);
        assert_eq!(blank.level, 1);
        assert_eq!(blank.rarity, Rarity::Common);

        let partial = catalog.get(2).expect("partial");
        assert_eq!(partial.stats.attack, 70);
        assert_eq!(partial.stats.health, 250);
        assert_eq!(partial.stats.defense, 30);
        assert_eq!(partial.stats.speed, 30);
        assert_eq!(partial.stats.special, 30);
    }

    #[test]
    fn abilities_parse_with_speed_alias_and_cooldown_state() {
        let catalog = Catalog::from_json(
            r#"{
                "characters": [{
                    "id": 4,
                    "name": "Epsilon",
                    "rarity": "uncommon",
                    "abilities": [{
                        "id": 10,
                        "name": "Neural Overclock",
                        "type": "buff",
                        "cooldown": 4,
                        "currentCooldown": 2,
                        "effectChance": 100,
                        "effect": { "type": "speed", "amount": 20, "duration": 2 }
                    }]
                }]
            }"#,
        )
        .expect("valid roster");
        let ability = &catalog.get(4).expect("epsilon").abilities[0];
        assert_eq!(ability.kind, AbilityKind::Buff);
        assert_eq!(ability.current_cooldown(), 2);
        assert_eq!(ability.effect_chance, 100);
        assert_eq!(ability.effect.map(|e| e.kind), Some(EffectKind::SpeedBuff));
    }

    #[test]
    fn undefaultable_data_is_rejected() {
        let chance = r#"{"characters":[{"id":1,"name":"A","abilities":[
            {"id":1,"name":"X","type":"damage","effectChance":150,
             "effect":{"type":"poison","amount":1,"duration":1}}]}]}"#;
        assert!(Catalog::from_json(chance).is_err());
        let cooldown = r#"{"characters":[{"id":1,"name":"A","abilities":[
            {"id":1,"name":"X","type":"damage","cooldown":1,"currentCooldown":3}]}]}"#;
        assert!(Catalog::from_json(cooldown).is_err());
        let duration = r#"{"characters":[{"id":1,"name":"A","abilities":[
            {"id":1,"name":"X","type":"damage","effectChance":10,
             "effect":{"type":"stun","duration":0}}]}]}"#;
        assert!(Catalog::from_json(duration).is_err());
        let duplicate = r#"{"characters":[{"id":1,"name":"A"},{"id":1,"name":"B"}]}"#;
        let err = Catalog::from_json(duplicate).expect_err("duplicate ids");
        assert!(format!("{err:#}").contains("duplicate character id 1"));
    }

    #[test]
    fn instantiated_copies_do_not_share_state() {
        let catalog = Catalog::builtin();
        let mut first = catalog.instantiate(1).expect("zephyr");
        first.take_damage(100);
        let mut rng = SmallRng::seed_from_u64(4);
        assert!(first.abilities[1].try_use(&mut rng).is_some());
        let second = catalog.instantiate(1).expect("zephyr");
        assert_eq!(second.health(), 300);
        assert!(second.abilities[1].is_ready());
        assert!(catalog.instantiate(999).is_err());
    }
}
