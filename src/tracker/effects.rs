//! Status effect types
//!
//! A status effect is a named condition on a creature. Its duration selects
//! one of three lifecycles: permanent, untimed note/item, or a countdown in
//! rounds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Duration value for effects that never expire
pub const DURATION_PERMANENT: i32 = -1;

/// Duration value for untimed notes and carried items
pub const DURATION_NOTE: i32 = 0;

/// A named condition, note, or item attached to a creature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub name: String,
    pub duration: i32,
    pub description: String,
    pub rounds_remaining: i32,
}

impl StatusEffect {
    /// Create a new effect; the countdown starts at the full duration
    pub fn new(name: impl Into<String>, duration: i32, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration,
            description: description.into(),
            rounds_remaining: duration,
        }
    }

    /// True if this is an untimed note or item
    pub fn is_note(&self) -> bool {
        self.duration == DURATION_NOTE
    }

    /// True if this effect never expires
    pub fn is_permanent(&self) -> bool {
        self.duration == DURATION_PERMANENT
    }

    /// True if this effect counts down in rounds
    pub fn is_timed(&self) -> bool {
        self.duration > 0
    }

    /// Advance the countdown by one round, returning true if the effect
    /// expired this tick. Permanent and note effects never expire.
    pub fn tick_down(&mut self) -> bool {
        if self.rounds_remaining > 0 {
            self.rounds_remaining -= 1;
        }
        self.rounds_remaining == 0 && self.duration > 0
    }

    /// Human-readable duration category
    pub fn duration_label(&self) -> String {
        if self.is_note() {
            "Notes/Items".to_string()
        } else if self.is_permanent() {
            "Permanent".to_string()
        } else {
            format!("{} rounds remaining", self.rounds_remaining)
        }
    }
}

impl fmt::Display for StatusEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}). Details: {}",
            self.name,
            self.duration_label(),
            self.description
        )
    }
}

/// Result of applying an effect to a creature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Existing effect had its timer and description refreshed
    Refreshed { duration: i32 },
    /// Existing untimed note had its description updated, timer untouched
    NotesUpdated,
    /// New untimed note or item added
    AddedNote,
    /// New permanent effect added
    AddedPermanent,
    /// New timed effect added
    AddedTimed { rounds: i32 },
}
