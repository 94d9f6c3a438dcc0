//! Creature state
//!
//! A creature owns its HP pool and its collection of status effects. Effect
//! identity is case-insensitive on name; insertion order is preserved for
//! display.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::effects::{ApplyOutcome, StatusEffect, DURATION_NOTE, DURATION_PERMANENT};

/// Derived health category, recomputed from HP on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Alive,
    Bloodied,
    Defeated,
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthStatus::Alive => write!(f, "Alive"),
            HealthStatus::Bloodied => write!(f, "Bloodied"),
            HealthStatus::Defeated => write!(f, "Defeated"),
        }
    }
}

/// A participant in the encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub name: String,
    pub max_hp: i32,
    pub current_hp: i32,
    effects: Vec<StatusEffect>,
}

impl Creature {
    /// Create a creature at full health with no effects
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            current_hp: max_hp,
            effects: Vec::new(),
        }
    }

    /// Active effects in insertion order
    pub fn effects(&self) -> &[StatusEffect] {
        &self.effects
    }

    /// Apply healing or damage, returning the actual HP delta.
    ///
    /// Healing clamps at max HP and returns the amount actually restored.
    /// Damage is unbounded below zero; a defeated creature keeps taking it.
    pub fn change_hp(&mut self, amount: i32, is_heal: bool) -> i32 {
        if is_heal {
            let healed = amount.min(self.max_hp - self.current_hp);
            self.current_hp += healed;
            healed
        } else {
            self.current_hp -= amount;
            -amount
        }
    }

    /// Apply an effect, merging with any existing effect of the same name.
    ///
    /// A timed or permanent re-application refreshes the existing entry in
    /// place. An untimed re-application only updates the description, so a
    /// running countdown is never reset by a note.
    pub fn apply_effect(&mut self, effect: StatusEffect) -> ApplyOutcome {
        if let Some(existing) = self
            .effects
            .iter_mut()
            .find(|e| e.name.eq_ignore_ascii_case(&effect.name))
        {
            if effect.duration != DURATION_NOTE {
                existing.description = effect.description;
                existing.duration = effect.duration;
                existing.rounds_remaining = effect.rounds_remaining;
                return ApplyOutcome::Refreshed {
                    duration: effect.duration,
                };
            }
            existing.description = effect.description;
            return ApplyOutcome::NotesUpdated;
        }

        let outcome = match effect.duration {
            DURATION_NOTE => ApplyOutcome::AddedNote,
            DURATION_PERMANENT => ApplyOutcome::AddedPermanent,
            rounds => ApplyOutcome::AddedTimed { rounds },
        };
        self.effects.push(effect);
        outcome
    }

    /// Remove every effect matching the name case-insensitively, returning
    /// true if anything was removed
    pub fn remove_effect(&mut self, name: &str) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| !e.name.eq_ignore_ascii_case(name));
        self.effects.len() < before
    }

    /// Tick every timed effect one round, evicting the ones that expire.
    /// Returns the expired effect names in insertion order.
    pub fn tick_down_effects(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            if effect.tick_down() {
                expired.push(effect.name.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Derived health label: Defeated at or below zero, Bloodied strictly
    /// below half of max HP, otherwise Alive
    pub fn health_status(&self) -> HealthStatus {
        if self.current_hp <= 0 {
            HealthStatus::Defeated
        } else if self.current_hp * 2 < self.max_hp {
            HealthStatus::Bloodied
        } else {
            HealthStatus::Alive
        }
    }
}
