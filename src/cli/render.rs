//! Terminal rendering
//!
//! Formats tracker outcomes and status reports as colored text. All color
//! goes through the palette so `--no-color` output stays free of escape
//! sequences.

use crossterm::style::{style, Attribute, Color, Stylize};

use crate::dice::RollResult;
use crate::tracker::{ApplyOutcome, HpChange, RoundReport, StatusSnapshot};

/// Color palette, disabled for plain-text output
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.enabled {
            style(text).attribute(Attribute::Bold).to_string()
        } else {
            text.to_string()
        }
    }

    fn effect(&self, text: &str) -> String {
        self.paint(text, Color::Cyan)
    }

    fn duration(&self, text: &str) -> String {
        self.paint(text, Color::Yellow)
    }

    fn good(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }

    fn bad(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    fn round(&self, text: &str) -> String {
        self.paint(text, Color::Blue)
    }

    fn status(&self, text: &str) -> String {
        self.paint(text, Color::Magenta)
    }
}

/// Formats tracker events as transcript lines
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn creature_added(&self, name: &str, max_hp: i32) -> String {
        self.palette.good(&format!(
            "[SETUP] Creature '{}' added with {} Max HP.",
            name, max_hp
        ))
    }

    pub fn creature_removed(&self, name: &str) -> String {
        self.palette
            .bad(&format!("[REMOVED] Creature '{}' removed from the tracker.", name))
    }

    pub fn hp_change(&self, change: &HpChange) -> String {
        let verb = if change.is_heal {
            self.palette.good("Healed")
        } else {
            self.palette.bad("Damaged")
        };
        format!(
            "[HP] {} {} for {}. Current HP: {} / {}",
            self.palette.bold(&change.creature),
            verb,
            change.delta.abs(),
            change.current_hp,
            change.max_hp
        )
    }

    pub fn apply_outcome(&self, creature: &str, effect: &str, outcome: &ApplyOutcome) -> String {
        let creature = self.palette.bold(creature);
        let effect = self.palette.effect(effect);
        match outcome {
            ApplyOutcome::AddedTimed { rounds } => format!(
                "[EFFECT] '{}' applied to {} ({}).",
                effect,
                creature,
                self.palette.duration(&format!("{} rounds", rounds))
            ),
            ApplyOutcome::AddedPermanent => format!(
                "[EFFECT] '{}' applied to {} ({}).",
                effect,
                creature,
                self.palette.duration("Permanent")
            ),
            ApplyOutcome::AddedNote => {
                format!("[NOTE] '{}' recorded for {}.", effect, creature)
            }
            ApplyOutcome::Refreshed { duration } => {
                let label = if *duration > 0 {
                    self.palette.duration(&format!("{} rounds", duration))
                } else {
                    self.palette.duration("Permanent")
                };
                format!("[EFFECT] '{}' on {} refreshed ({}).", effect, creature, label)
            }
            ApplyOutcome::NotesUpdated => {
                format!("[NOTE] '{}' on {} updated.", effect, creature)
            }
        }
    }

    pub fn effect_removed(&self, creature: &str, effect: &str) -> String {
        self.palette
            .bad(&format!("[REMOVED] '{}' removed from {}.", effect, creature))
    }

    pub fn error(&self, message: &str) -> String {
        self.palette.bad(&format!("[ERROR] {}", message))
    }

    pub fn round_report(&self, report: &RoundReport) -> String {
        let mut out = String::new();
        out.push_str(&"=".repeat(60));
        out.push('\n');
        out.push_str(&format!(
            "| ADVANCING TO ROUND {} (Effects checked and timed effects tick down)\n",
            self.palette.round(&report.round.to_string())
        ));
        out.push_str(&"=".repeat(60));
        out.push('\n');

        for (creature, worn_off) in &report.expired {
            let names: Vec<String> = worn_off.iter().map(|n| self.palette.effect(n)).collect();
            out.push_str(&format!(
                "[ROUND END] {}: {} effects have worn off.\n",
                self.palette.bold(creature),
                names.join(", ")
            ));
        }

        out.push_str(&self.status_report(&report.snapshot));
        out
    }

    pub fn status_report(&self, snapshot: &StatusSnapshot) -> String {
        let mut out = format!(
            "--- Current Status (Round {}) ---\n",
            self.palette.round(&snapshot.round.to_string())
        );

        for creature in &snapshot.creatures {
            out.push_str(&format!(
                "* {} ({}):\n",
                self.palette.bold(&creature.name),
                self.palette.status(&creature.status.to_string())
            ));
            out.push_str(&format!(
                "  HP: {}/{} HP\n",
                creature.current_hp, creature.max_hp
            ));
            out.push_str("  Active Status/Items:\n");
            if creature.effects.is_empty() {
                out.push_str("    (Clear)\n");
            } else {
                for effect in &creature.effects {
                    out.push_str(&format!(
                        "    - {} ({}). Details: {}\n",
                        self.palette.effect(&effect.name),
                        self.palette.duration(&effect.duration_label),
                        effect.description
                    ));
                }
            }
        }

        out
    }

    pub fn dice_roll(&self, formula: &str, result: &RollResult) -> String {
        let rolls: Vec<String> = result.rolls.iter().map(|r| r.to_string()).collect();
        let modifier = if result.modifier > 0 {
            format!(" +{}", result.modifier)
        } else if result.modifier < 0 {
            format!(" -{}", result.modifier.abs())
        } else {
            String::new()
        };

        format!(
            "--- Dice Roll: {} ---\nRolls: ({}){} = {}",
            formula.to_uppercase(),
            rolls.join(" + "),
            modifier,
            self.palette.round(&result.total.to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{EffectTracker, StatusEffect};

    fn plain() -> Renderer {
        Renderer::new(Palette::new(false))
    }

    #[test]
    fn test_creature_added() {
        let line = plain().creature_added("Goblin", 10);
        assert_eq!(line, "[SETUP] Creature 'Goblin' added with 10 Max HP.");
    }

    #[test]
    fn test_hp_change_damage() {
        let change = HpChange {
            creature: "Goblin".to_string(),
            delta: -4,
            is_heal: false,
            current_hp: 6,
            max_hp: 10,
        };
        assert_eq!(
            plain().hp_change(&change),
            "[HP] Goblin Damaged for 4. Current HP: 6 / 10"
        );
    }

    #[test]
    fn test_apply_outcomes() {
        let renderer = plain();
        assert_eq!(
            renderer.apply_outcome("Goblin", "Poisoned", &ApplyOutcome::AddedTimed { rounds: 3 }),
            "[EFFECT] 'Poisoned' applied to Goblin (3 rounds)."
        );
        assert_eq!(
            renderer.apply_outcome("Goblin", "Torch", &ApplyOutcome::AddedNote),
            "[NOTE] 'Torch' recorded for Goblin."
        );
    }

    #[test]
    fn test_status_report_empty_effects() {
        let mut tracker = EffectTracker::new();
        tracker.add_creature("Goblin", 10).unwrap();

        let report = plain().status_report(&tracker.snapshot());
        assert!(report.contains("--- Current Status (Round 0) ---"));
        assert!(report.contains("* Goblin (Alive):"));
        assert!(report.contains("  HP: 10/10 HP"));
        assert!(report.contains("    (Clear)"));
    }

    #[test]
    fn test_status_report_lists_effects() {
        let mut tracker = EffectTracker::new();
        tracker.add_creature("Goblin", 10).unwrap();
        tracker
            .apply_effect("Goblin", StatusEffect::new("Poisoned", 3, "1d4/round"))
            .unwrap();

        let report = plain().status_report(&tracker.snapshot());
        assert!(report.contains("    - Poisoned (3 rounds remaining). Details: 1d4/round"));
    }

    #[test]
    fn test_dice_roll_formatting() {
        let result = RollResult {
            rolls: vec![4, 5],
            modifier: 3,
            total: 12,
        };
        assert_eq!(
            plain().dice_roll("2d6+3", &result),
            "--- Dice Roll: 2D6+3 ---\nRolls: (4 + 5) +3 = 12"
        );
    }

    #[test]
    fn test_plain_output_has_no_escapes() {
        let renderer = plain();
        let mut tracker = EffectTracker::new();
        tracker.add_creature("Goblin", 10).unwrap();
        let report = renderer.round_report(&tracker.advance_round());

        assert!(!report.contains('\u{1b}'));
        assert!(!renderer.creature_added("Goblin", 10).contains('\u{1b}'));
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let renderer = Renderer::new(Palette::new(true));
        assert!(renderer.creature_added("Goblin", 10).contains('\u{1b}'));
    }
}
