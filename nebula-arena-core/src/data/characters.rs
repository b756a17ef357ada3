use crate::sim::character::{Rarity, Stats};

#[derive(Clone, Copy, Debug)]
pub struct CharacterData {
    pub id: u32,
    pub name: &'static str,
    pub species: &'static str,
    pub rarity: Rarity,
    pub level: u32,
    pub stats: Stats,
    /// Keys into [`super::abilities::ABILITIES`].
    pub abilities: &'static [&'static str],
}

/// Ids below 100 are playable, 100-199 basic enemies, 200 and up advanced enemies.
pub static CHARACTERS: phf::Map<u32, CharacterData> = phf::phf_map! {
    1u32 => CharacterData {
        id: 1,
        name: "Zephyr-9",
        species: "Android",
        rarity: Rarity::Rare,
        level: 1,
        stats: Stats { attack: 50, defense: 40, health: 300, speed: 45, special: 30 },
        abilities: &["lasershot", "plasmablast", "nanorepair"],
    },
    2u32 => CharacterData {
        id: 2,
        name: "Nova Blade",
        species: "Altered Human",
        rarity: Rarity::Epic,
        level: 1,
        stats: Stats { attack: 60, defense: 35, health: 280, speed: 50, special: 40 },
        abilities: &["quantumstrike", "gravitysurge", "shieldmatrix"],
    },
    3u32 => CharacterData {
        id: 3,
        name: "Bio-Vex",
        species: "Xenomorph",
        rarity: Rarity::Legendary,
        level: 1,
        stats: Stats { attack: 100, defense: 30, health: 320, speed: 60, special: 50 },
        abilities: &["toxicvenom", "bioregeneration", "neuraldisruption"],
    },
    4u32 => CharacterData {
        id: 4,
        name: "Epsilon",
        species: "AI Construct",
        rarity: Rarity::Uncommon,
        level: 1,
        stats: Stats { attack: 30, defense: 45, health: 270, speed: 35, special: 70 },
        abilities: &["nanorepair", "shieldmatrix", "neuraloverclock"],
    },
    5u32 => CharacterData {
        id: 5,
        name: "Chronos",
        species: "Time Manipulator",
        rarity: Rarity::Epic,
        level: 1,
        stats: Stats { attack: 55, defense: 45, health: 280, speed: 60, special: 65 },
        abilities: &["timefreeze", "quantumstrike", "plasmashield"],
    },
    6u32 => CharacterData {
        id: 6,
        name: "Void Walker",
        species: "Void Entity",
        rarity: Rarity::Legendary,
        level: 1,
        stats: Stats { attack: 70, defense: 40, health: 300, speed: 55, special: 80 },
        abilities: &["voidrift", "gravitysurge", "neuralsync"],
    },
    7u32 => CharacterData {
        id: 7,
        name: "Quantum Healer",
        species: "Quantum Being",
        rarity: Rarity::Rare,
        level: 1,
        stats: Stats { attack: 35, defense: 50, health: 250, speed: 45, special: 90 },
        abilities: &["quantumheal", "shieldmatrix", "neuraloverclock"],
    },
    101u32 => CharacterData {
        id: 101,
        name: "Scrap Droid",
        species: "Mechanical",
        rarity: Rarity::Common,
        level: 1,
        stats: Stats { attack: 30, defense: 30, health: 200, speed: 30, special: 10 },
        abilities: &["lasershot"],
    },
    102u32 => CharacterData {
        id: 102,
        name: "Space Pirate",
        species: "Human",
        rarity: Rarity::Common,
        level: 1,
        stats: Stats { attack: 40, defense: 20, health: 180, speed: 40, special: 15 },
        abilities: &["plasmablast"],
    },
    201u32 => CharacterData {
        id: 201,
        name: "Void Stalker",
        species: "Void Entity",
        rarity: Rarity::Rare,
        level: 5,
        stats: Stats { attack: 80, defense: 50, health: 450, speed: 65, special: 60 },
        abilities: &["gravitysurge", "neuraldisruption"],
    },
    202u32 => CharacterData {
        id: 202,
        name: "Dr. Nexus",
        species: "Cybernetic Human",
        rarity: Rarity::Epic,
        level: 8,
        stats: Stats { attack: 100, defense: 70, health: 600, speed: 70, special: 90 },
        abilities: &["quantumstrike", "neuraloverclock", "toxicvenom"],
    },
};
