use crate::sim::ability::EffectKind;
use serde_json::json;

/// Append-only, human-readable battle log rendered by the presentation layer.
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    label: String,
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self {
            label: "battle".to_string(),
            log: Vec::new(),
        }
    }

    pub fn new_with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            log: Vec::new(),
        }
    }

    fn push(&mut self, line: String) {
        tracing::debug!(target: "nebula_arena_core::log", "{line}");
        self.log.push(line);
    }

    pub fn log_start(&mut self) {
        self.push("Battle initiated!".to_string());
    }

    pub fn log_turn(&mut self, character: &str) {
        self.push(format!("It's {character}'s turn!"));
    }

    pub fn log_damage(&mut self, source: &str, ability: &str, target: &str, amount: u32) {
        self.push(format!("{source} used {ability} on {target} for {amount} damage!"));
    }

    pub fn log_heal(&mut self, source: &str, ability: &str, target: &str, amount: u32) {
        self.push(format!("{source} used {ability} on {target} for {amount} healing!"));
    }

    pub fn log_support(&mut self, source: &str, ability: &str, target: &str) {
        self.push(format!("{source} used {ability} on {target}!"));
    }

    pub fn log_no_effect(&mut self, source: &str, ability: &str) {
        self.push(format!("{source} used {ability} but it had no effect!"));
    }

    pub fn log_pass(&mut self, source: &str) {
        self.push(format!("{source} has no available action!"));
    }

    pub fn log_effect_applied(&mut self, target: &str, kind: EffectKind, duration: u32) {
        self.push(format!("{kind} effect applied to {target} for {duration} turns!"));
    }

    pub fn log_poison(&mut self, target: &str, amount: u32) {
        self.push(format!("{target} took {amount} poison damage!"));
    }

    pub fn log_regeneration(&mut self, target: &str, amount: u32) {
        self.push(format!("{target} regenerated {amount} health!"));
    }

    pub fn log_effect_expired(&mut self, target: &str, kind: EffectKind) {
        self.push(format!("{kind} effect wore off from {target}!"));
    }

    pub fn log_rejection(&mut self, message: String) {
        self.push(message);
    }

    pub fn log_victory(&mut self) {
        self.push("Victory! All enemies have been defeated!".to_string());
    }

    pub fn log_defeat(&mut self) {
        self.push("You have been defeated!".to_string());
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "label": self.label,
            "log": self.log,
        })
    }
}
