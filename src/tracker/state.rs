//! Encounter tracker
//!
//! Owns the creature roster and the round counter. All mutations go through
//! the tracker so failures never leave partial state behind.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::creature::{Creature, HealthStatus};
use super::effects::{ApplyOutcome, StatusEffect};

/// Tracker errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("creature '{0}' not found")]
    CreatureNotFound(String),

    #[error("creature '{0}' already exists")]
    CreatureAlreadyExists(String),

    #[error("'{creature}' has no effect named '{effect}'")]
    EffectNotFound { creature: String, effect: String },
}

/// Result of an HP modification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HpChange {
    pub creature: String,
    /// Actual HP delta applied (clamped for healing)
    pub delta: i32,
    pub is_heal: bool,
    pub current_hp: i32,
    pub max_hp: i32,
}

/// Structured view of one effect, for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSummary {
    pub name: String,
    pub duration_label: String,
    pub description: String,
}

impl From<&StatusEffect> for EffectSummary {
    fn from(effect: &StatusEffect) -> Self {
        Self {
            name: effect.name.clone(),
            duration_label: effect.duration_label(),
            description: effect.description.clone(),
        }
    }
}

/// Read-only view of one creature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureStatus {
    pub name: String,
    pub current_hp: i32,
    pub max_hp: i32,
    pub status: HealthStatus,
    pub effects: Vec<EffectSummary>,
}

/// Read-only view of the whole encounter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub round: u32,
    pub creatures: Vec<CreatureStatus>,
}

/// Outcome of advancing one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    pub round: u32,
    /// Per-creature expired effect names, only for creatures that lost any
    pub expired: Vec<(String, Vec<String>)>,
    pub snapshot: StatusSnapshot,
}

/// The encounter tracker: an ordered creature roster plus the round counter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectTracker {
    creatures: Vec<Creature>,
    round_count: u32,
}

impl EffectTracker {
    /// Create an empty tracker at round zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Current round number
    pub fn round(&self) -> u32 {
        self.round_count
    }

    /// True if the roster is empty
    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// Roster names in insertion order
    pub fn creature_names(&self) -> Vec<&str> {
        self.creatures.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a creature by exact name
    pub fn creature(&self, name: &str) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.name == name)
    }

    fn creature_mut(&mut self, name: &str) -> Option<&mut Creature> {
        self.creatures.iter_mut().find(|c| c.name == name)
    }

    /// Add a creature at full health.
    ///
    /// The name is trimmed first; an empty result is silently ignored. A
    /// duplicate name is an error and leaves the roster unchanged.
    pub fn add_creature(&mut self, name: &str, max_hp: i32) -> Result<(), TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        if self.creatures.iter().any(|c| c.name == name) {
            return Err(TrackerError::CreatureAlreadyExists(name.to_string()));
        }

        debug!(creature = name, max_hp, "adding creature");
        self.creatures.push(Creature::new(name, max_hp));
        Ok(())
    }

    /// Remove a creature from the roster
    pub fn remove_creature(&mut self, name: &str) -> Result<(), TrackerError> {
        let name = name.trim();
        let pos = self
            .creatures
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| TrackerError::CreatureNotFound(name.to_string()))?;

        debug!(creature = name, "removing creature");
        self.creatures.remove(pos);
        Ok(())
    }

    /// Apply an effect to a named creature
    pub fn apply_effect(
        &mut self,
        name: &str,
        effect: StatusEffect,
    ) -> Result<ApplyOutcome, TrackerError> {
        let creature = self
            .creature_mut(name)
            .ok_or_else(|| TrackerError::CreatureNotFound(name.to_string()))?;

        debug!(creature = name, effect = %effect.name, "applying effect");
        Ok(creature.apply_effect(effect))
    }

    /// Remove an effect from a named creature
    pub fn remove_effect(&mut self, name: &str, effect: &str) -> Result<(), TrackerError> {
        let creature = self
            .creature_mut(name)
            .ok_or_else(|| TrackerError::CreatureNotFound(name.to_string()))?;

        if !creature.remove_effect(effect) {
            return Err(TrackerError::EffectNotFound {
                creature: name.to_string(),
                effect: effect.to_string(),
            });
        }

        debug!(creature = name, effect, "removed effect");
        Ok(())
    }

    /// Heal or damage a named creature, reporting the actual delta
    pub fn modify_hp(
        &mut self,
        name: &str,
        amount: i32,
        is_heal: bool,
    ) -> Result<HpChange, TrackerError> {
        let creature = self
            .creature_mut(name)
            .ok_or_else(|| TrackerError::CreatureNotFound(name.to_string()))?;

        let delta = creature.change_hp(amount, is_heal);
        debug!(creature = name, delta, "HP changed");

        Ok(HpChange {
            creature: creature.name.clone(),
            delta,
            is_heal,
            current_hp: creature.current_hp,
            max_hp: creature.max_hp,
        })
    }

    /// Advance to the next round: increment the counter, tick every creature
    /// in roster order, and report what wore off
    pub fn advance_round(&mut self) -> RoundReport {
        self.round_count += 1;
        debug!(round = self.round_count, "advancing round");

        let mut expired = Vec::new();
        for creature in &mut self.creatures {
            let worn_off = creature.tick_down_effects();
            if !worn_off.is_empty() {
                expired.push((creature.name.clone(), worn_off));
            }
        }

        RoundReport {
            round: self.round_count,
            expired,
            snapshot: self.snapshot(),
        }
    }

    /// Read-only snapshot of the whole encounter
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            round: self.round_count,
            creatures: self
                .creatures
                .iter()
                .map(|c| CreatureStatus {
                    name: c.name.clone(),
                    current_hp: c.current_hp,
                    max_hp: c.max_hp,
                    status: c.health_status(),
                    effects: c.effects().iter().map(EffectSummary::from).collect(),
                })
                .collect(),
        }
    }
}
