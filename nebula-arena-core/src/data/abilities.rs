use crate::sim::ability::{AbilityKind, EffectKind, EffectTemplate};

#[derive(Clone, Copy, Debug)]
pub struct AbilityData {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub power: u32,
    pub kind: AbilityKind,
    pub cooldown: u32,
    pub effect_chance: u8,
    pub effect: Option<EffectTemplate>,
}

pub static ABILITIES: phf::Map<&'static str, AbilityData> = phf::phf_map! {
    "lasershot" => AbilityData {
        id: 1,
        name: "Laser Shot",
        description: "A precise laser attack",
        power: 25,
        kind: AbilityKind::Damage,
        cooldown: 0,
        effect_chance: 0,
        effect: None,
    },
    "plasmablast" => AbilityData {
        id: 2,
        name: "Plasma Blast",
        description: "Area damage with plasma energy",
        power: 35,
        kind: AbilityKind::Damage,
        cooldown: 1,
        effect_chance: 0,
        effect: None,
    },
    "gravitysurge" => AbilityData {
        id: 3,
        name: "Gravity Surge",
        description: "Manipulates gravity to crush enemies",
        power: 40,
        kind: AbilityKind::Damage,
        cooldown: 2,
        effect_chance: 0,
        effect: None,
    },
    "quantumstrike" => AbilityData {
        id: 4,
        name: "Quantum Strike",
        description: "Attacks across multiple dimensions",
        power: 50,
        kind: AbilityKind::Damage,
        cooldown: 3,
        effect_chance: 0,
        effect: None,
    },
    "neuraldisruption" => AbilityData {
        id: 5,
        name: "Neural Disruption",
        description: "Disrupts neural pathways",
        power: 30,
        kind: AbilityKind::Damage,
        cooldown: 1,
        effect_chance: 50,
        effect: Some(EffectTemplate { kind: EffectKind::Stun, amount: 0, duration: 1 }),
    },
    "toxicvenom" => AbilityData {
        id: 6,
        name: "Toxic Venom",
        description: "Injects a deadly alien toxin",
        power: 20,
        kind: AbilityKind::Damage,
        cooldown: 1,
        effect_chance: 70,
        effect: Some(EffectTemplate { kind: EffectKind::Poison, amount: 10, duration: 3 }),
    },
    "nanorepair" => AbilityData {
        id: 7,
        name: "Nano Repair",
        description: "Microscopic robots repair damage",
        power: 30,
        kind: AbilityKind::Heal,
        cooldown: 2,
        effect_chance: 0,
        effect: None,
    },
    "bioregeneration" => AbilityData {
        id: 8,
        name: "Bio Regeneration",
        description: "Accelerates natural healing",
        power: 25,
        kind: AbilityKind::Heal,
        cooldown: 1,
        effect_chance: 30,
        effect: Some(EffectTemplate { kind: EffectKind::Regeneration, amount: 5, duration: 2 }),
    },
    "shieldmatrix" => AbilityData {
        id: 9,
        name: "Shield Matrix",
        description: "Projects a protective energy field",
        power: 0,
        kind: AbilityKind::Buff,
        cooldown: 3,
        effect_chance: 100,
        effect: Some(EffectTemplate { kind: EffectKind::Shield, amount: 50, duration: 3 }),
    },
    "neuraloverclock" => AbilityData {
        id: 10,
        name: "Neural Overclock",
        description: "Enhances reflexes and speed",
        power: 0,
        kind: AbilityKind::Buff,
        cooldown: 4,
        effect_chance: 100,
        effect: Some(EffectTemplate { kind: EffectKind::SpeedBuff, amount: 20, duration: 2 }),
    },
    "timefreeze" => AbilityData {
        id: 11,
        name: "Time Freeze",
        description: "Temporarily stops time for the target",
        power: 35,
        kind: AbilityKind::Damage,
        cooldown: 2,
        effect_chance: 40,
        effect: Some(EffectTemplate { kind: EffectKind::Stun, amount: 0, duration: 2 }),
    },
    "plasmashield" => AbilityData {
        id: 12,
        name: "Plasma Shield",
        description: "Creates a shield of plasma energy",
        power: 0,
        kind: AbilityKind::Buff,
        cooldown: 3,
        effect_chance: 100,
        effect: Some(EffectTemplate { kind: EffectKind::Shield, amount: 75, duration: 2 }),
    },
    "quantumheal" => AbilityData {
        id: 13,
        name: "Quantum Heal",
        description: "Heals using quantum energy",
        power: 40,
        kind: AbilityKind::Heal,
        cooldown: 2,
        effect_chance: 30,
        effect: Some(EffectTemplate { kind: EffectKind::Regeneration, amount: 8, duration: 2 }),
    },
    "voidrift" => AbilityData {
        id: 14,
        name: "Void Rift",
        description: "Opens a rift in space-time",
        power: 45,
        kind: AbilityKind::Damage,
        cooldown: 3,
        effect_chance: 20,
        effect: Some(EffectTemplate { kind: EffectKind::Poison, amount: 15, duration: 2 }),
    },
    "neuralsync" => AbilityData {
        id: 15,
        name: "Neural Sync",
        description: "Synchronizes neural patterns for enhanced abilities",
        power: 0,
        kind: AbilityKind::Buff,
        cooldown: 4,
        effect_chance: 100,
        effect: Some(EffectTemplate { kind: EffectKind::SpeedBuff, amount: 25, duration: 3 }),
    },
};
