//! Combat and status-effect tracking
//!
//! Implements the encounter engine:
//! - Status effects with permanent, untimed, and round-limited durations
//! - Creatures with HP bookkeeping and owned effect collections
//! - The tracker roster with round advancement and status snapshots

mod creature;
mod effects;
mod state;

pub use creature::{Creature, HealthStatus};
pub use effects::{ApplyOutcome, StatusEffect, DURATION_NOTE, DURATION_PERMANENT};
pub use state::{
    CreatureStatus, EffectSummary, EffectTracker, HpChange, RoundReport, StatusSnapshot,
    TrackerError,
};
