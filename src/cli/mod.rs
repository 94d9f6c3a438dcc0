//! Interactive command loop
//!
//! Line-based menu over any input/output stream pair, so scripted sessions
//! can drive the tracker in tests. One command runs to completion before the
//! next read.

mod render;

pub use render::{Palette, Renderer};

use std::io::{BufRead, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::dice::roll_formula;
use crate::tracker::{EffectTracker, StatusEffect, DURATION_PERMANENT};
use crate::Config;

/// Menu commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    AddCreature,
    RemoveCreature,
    ModifyHp,
    ApplyEffect,
    RemoveEffect,
    AdvanceRound,
    Status,
    DiceRoll,
    Quit,
}

impl Command {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_uppercase().as_str() {
            "AC" => Some(Command::AddCreature),
            "RC" => Some(Command::RemoveCreature),
            "HP" => Some(Command::ModifyHp),
            "AE" => Some(Command::ApplyEffect),
            "RE" => Some(Command::RemoveEffect),
            "AR" => Some(Command::AdvanceRound),
            "S" => Some(Command::Status),
            "DR" => Some(Command::DiceRoll),
            "Q" => Some(Command::Quit),
            _ => None,
        }
    }
}

/// The interactive application: tracker, dice RNG, and stream pair
pub struct App<R, W> {
    tracker: EffectTracker,
    rng: StdRng,
    render: Renderer,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Create an app over the given streams
    pub fn new(config: &Config, input: R, out: W) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            tracker: EffectTracker::new(),
            rng,
            render: Renderer::new(Palette::new(config.color)),
            input,
            out,
        }
    }

    /// Run the command loop until quit or end of input
    pub fn run(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "=== Combat & Status Tracker ===")?;

        loop {
            self.write_menu()?;
            let line = match self.prompt("> ")? {
                Some(line) => line,
                None => break,
            };

            if line.is_empty() {
                continue;
            }

            match Command::parse(&line) {
                Some(Command::AddCreature) => self.add_creature()?,
                Some(Command::RemoveCreature) => self.remove_creature()?,
                Some(Command::ModifyHp) => self.modify_hp()?,
                Some(Command::ApplyEffect) => self.apply_effect()?,
                Some(Command::RemoveEffect) => self.remove_effect()?,
                Some(Command::AdvanceRound) => self.advance_round()?,
                Some(Command::Status) => self.show_status()?,
                Some(Command::DiceRoll) => self.dice_roll()?,
                Some(Command::Quit) => {
                    writeln!(self.out, "Session ended. Good game!")?;
                    break;
                }
                None => {
                    let msg = self
                        .render
                        .error(&format!("Unknown command '{}'.", line.trim()));
                    writeln!(self.out, "{}", msg)?;
                }
            }
        }

        Ok(())
    }

    /// Access the tracker, for scripted-session assertions
    pub fn tracker(&self) -> &EffectTracker {
        &self.tracker
    }

    fn write_menu(&mut self) -> std::io::Result<()> {
        writeln!(
            self.out,
            "\n--- Menu (Round {}) ---",
            self.tracker.round()
        )?;
        writeln!(self.out, " AC: Add Creature     RC: Remove Creature")?;
        writeln!(self.out, " HP: Modify HP        AE: Apply Effect")?;
        writeln!(self.out, " RE: Remove Effect    AR: Advance Round")?;
        writeln!(self.out, "  S: Show Status      DR: Dice Roll")?;
        writeln!(self.out, "  Q: Quit")?;
        Ok(())
    }

    /// Write a prompt and read one line; None at end of input
    fn prompt(&mut self, message: &str) -> std::io::Result<Option<String>> {
        write!(self.out, "{}", message)?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_nonempty(&mut self, message: &str) -> std::io::Result<Option<String>> {
        match self.prompt(message)? {
            Some(value) if !value.is_empty() => Ok(Some(value)),
            Some(_) => {
                let msg = self.render.error("Input must not be empty.");
                writeln!(self.out, "{}", msg)?;
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn prompt_positive(&mut self, message: &str) -> std::io::Result<Option<i32>> {
        let Some(value) = self.prompt(message)? else {
            return Ok(None);
        };
        match value.parse::<i32>() {
            Ok(n) if n > 0 => Ok(Some(n)),
            _ => {
                let msg = self
                    .render
                    .error(&format!("'{}' is not a positive whole number.", value));
                writeln!(self.out, "{}", msg)?;
                Ok(None)
            }
        }
    }

    /// Show the roster, or report an error and return false when empty
    fn require_roster(&mut self) -> std::io::Result<bool> {
        if self.tracker.is_empty() {
            let msg = self.render.error("No creatures in the tracker yet.");
            writeln!(self.out, "{}", msg)?;
            return Ok(false);
        }
        let names = self.tracker.creature_names().join(", ");
        writeln!(self.out, "Creatures: {}", names)?;
        Ok(true)
    }

    fn add_creature(&mut self) -> std::io::Result<()> {
        let Some(name) = self.prompt_nonempty("Creature name: ")? else {
            return Ok(());
        };
        let Some(max_hp) = self.prompt_positive("Max HP: ")? else {
            return Ok(());
        };

        match self.tracker.add_creature(&name, max_hp) {
            Ok(()) => {
                let msg = self.render.creature_added(&name, max_hp);
                writeln!(self.out, "{}", msg)
            }
            Err(e) => {
                let msg = self.render.error(&e.to_string());
                writeln!(self.out, "{}", msg)
            }
        }
    }

    fn remove_creature(&mut self) -> std::io::Result<()> {
        if !self.require_roster()? {
            return Ok(());
        }
        let Some(name) = self.prompt_nonempty("Creature to remove: ")? else {
            return Ok(());
        };

        match self.tracker.remove_creature(&name) {
            Ok(()) => {
                let msg = self.render.creature_removed(&name);
                writeln!(self.out, "{}", msg)
            }
            Err(e) => {
                let msg = self.render.error(&e.to_string());
                writeln!(self.out, "{}", msg)
            }
        }
    }

    fn modify_hp(&mut self) -> std::io::Result<()> {
        if !self.require_roster()? {
            return Ok(());
        }
        let Some(name) = self.prompt_nonempty("Creature name: ")? else {
            return Ok(());
        };
        let Some(action) = self.prompt("Damage or Heal (D/H): ")? else {
            return Ok(());
        };
        let is_heal = match action.to_uppercase().as_str() {
            "D" => false,
            "H" => true,
            _ => {
                let msg = self.render.error("Enter 'D' for damage or 'H' for heal.");
                writeln!(self.out, "{}", msg)?;
                return Ok(());
            }
        };
        let Some(amount) = self.prompt_positive("Amount: ")? else {
            return Ok(());
        };

        match self.tracker.modify_hp(&name, amount, is_heal) {
            Ok(change) => {
                let msg = self.render.hp_change(&change);
                writeln!(self.out, "{}", msg)
            }
            Err(e) => {
                let msg = self.render.error(&e.to_string());
                writeln!(self.out, "{}", msg)
            }
        }
    }

    fn apply_effect(&mut self) -> std::io::Result<()> {
        if !self.require_roster()? {
            return Ok(());
        }
        let Some(name) = self.prompt_nonempty("Creature name: ")? else {
            return Ok(());
        };
        let Some(effect_name) = self.prompt_nonempty("Effect name: ")? else {
            return Ok(());
        };
        let Some(duration_input) =
            self.prompt("Duration (-1 permanent, 0 note/item, or rounds): ")?
        else {
            return Ok(());
        };
        let duration = match duration_input.parse::<i32>() {
            Ok(n) if n >= DURATION_PERMANENT => n,
            _ => {
                let msg = self.render.error(&format!(
                    "'{}' is not a valid duration. Use -1, 0, or a round count.",
                    duration_input
                ));
                writeln!(self.out, "{}", msg)?;
                return Ok(());
            }
        };
        let Some(description) = self.prompt("Description (optional): ")? else {
            return Ok(());
        };
        let description = if description.is_empty() {
            "N/A".to_string()
        } else {
            description
        };

        let effect = StatusEffect::new(effect_name.clone(), duration, description);
        match self.tracker.apply_effect(&name, effect) {
            Ok(outcome) => {
                let msg = self.render.apply_outcome(&name, &effect_name, &outcome);
                writeln!(self.out, "{}", msg)
            }
            Err(e) => {
                let msg = self.render.error(&e.to_string());
                writeln!(self.out, "{}", msg)
            }
        }
    }

    fn remove_effect(&mut self) -> std::io::Result<()> {
        if !self.require_roster()? {
            return Ok(());
        }
        let Some(name) = self.prompt_nonempty("Creature name: ")? else {
            return Ok(());
        };

        let Some(creature) = self.tracker.creature(&name) else {
            let msg = self
                .render
                .error(&format!("creature '{}' not found", name));
            writeln!(self.out, "{}", msg)?;
            return Ok(());
        };
        let effect_names: Vec<String> =
            creature.effects().iter().map(|e| e.name.clone()).collect();
        if effect_names.is_empty() {
            writeln!(self.out, "{} has no active effects.", name)?;
            return Ok(());
        }
        writeln!(self.out, "Active effects: {}", effect_names.join(", "))?;

        let Some(effect) = self.prompt_nonempty("Effect to remove: ")? else {
            return Ok(());
        };

        match self.tracker.remove_effect(&name, &effect) {
            Ok(()) => {
                let msg = self.render.effect_removed(&name, &effect);
                writeln!(self.out, "{}", msg)
            }
            Err(e) => {
                let msg = self.render.error(&e.to_string());
                writeln!(self.out, "{}", msg)
            }
        }
    }

    fn advance_round(&mut self) -> std::io::Result<()> {
        let report = self.tracker.advance_round();
        debug!(round = report.round, "round advanced from menu");
        write!(self.out, "{}", self.render.round_report(&report))
    }

    fn show_status(&mut self) -> std::io::Result<()> {
        let snapshot = self.tracker.snapshot();
        write!(self.out, "{}", self.render.status_report(&snapshot))
    }

    fn dice_roll(&mut self) -> std::io::Result<()> {
        let Some(formula) = self.prompt_nonempty("Formula (e.g. 2d6+3): ")? else {
            return Ok(());
        };

        match roll_formula(&formula, &mut self.rng) {
            Ok(result) => {
                let msg = self.render.dice_roll(&formula, &result);
                writeln!(self.out, "{}", msg)
            }
            Err(e) => {
                let msg = self.render.error(&e.to_string());
                writeln!(self.out, "{}", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(script: &str) -> (EffectTracker, String) {
        let config = Config {
            color: false,
            seed: Some(1),
        };
        let input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        let mut app = App::new(&config, input, &mut out);
        app.run().unwrap();
        let tracker = app.tracker().clone();
        (tracker, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("ac"), Some(Command::AddCreature));
        assert_eq!(Command::parse(" Q "), Some(Command::Quit));
        assert_eq!(Command::parse("dr"), Some(Command::DiceRoll));
        assert_eq!(Command::parse("xyzzy"), None);
    }

    #[test]
    fn test_add_creature_session() {
        let (tracker, output) = run_session("AC\nGoblin\n10\nQ\n");

        assert_eq!(tracker.creature_names(), vec!["Goblin"]);
        assert!(output.contains("[SETUP] Creature 'Goblin' added with 10 Max HP."));
        assert!(output.contains("Session ended."));
    }

    #[test]
    fn test_unknown_command_keeps_loop_alive() {
        let (tracker, output) = run_session("bogus\nAC\nGoblin\n10\nQ\n");

        assert!(output.contains("[ERROR] Unknown command 'bogus'."));
        assert_eq!(tracker.creature_names(), vec!["Goblin"]);
    }

    #[test]
    fn test_non_numeric_hp_rejected() {
        let (tracker, output) = run_session("AC\nGoblin\nlots\nQ\n");

        assert!(output.contains("not a positive whole number"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_roster_required_before_hp() {
        let (_, output) = run_session("HP\nQ\n");
        assert!(output.contains("[ERROR] No creatures in the tracker yet."));
    }

    #[test]
    fn test_damage_and_status() {
        let (tracker, output) = run_session("AC\nGoblin\n10\nHP\nGoblin\nD\n7\nS\nQ\n");

        assert_eq!(tracker.creature("Goblin").unwrap().current_hp, 3);
        assert!(output.contains("[HP] Goblin Damaged for 7. Current HP: 3 / 10"));
        assert!(output.contains("* Goblin (Bloodied):"));
    }

    #[test]
    fn test_effect_lifecycle_session() {
        let script = "AC\nGoblin\n10\nAE\nGoblin\nStunned\n1\nno actions\nAR\nQ\n";
        let (tracker, output) = run_session(script);

        assert!(output.contains("[EFFECT] 'Stunned' applied to Goblin (1 rounds)."));
        assert!(output.contains("[ROUND END] Goblin: Stunned effects have worn off."));
        assert_eq!(tracker.round(), 1);
        assert!(tracker.creature("Goblin").unwrap().effects().is_empty());
    }

    #[test]
    fn test_remove_effect_lists_active() {
        let script = "AC\nGoblin\n10\nAE\nGoblin\nPoisoned\n3\n\nRE\nGoblin\nPoisoned\nQ\n";
        let (tracker, output) = run_session(script);

        assert!(output.contains("Active effects: Poisoned"));
        assert!(output.contains("[REMOVED] 'Poisoned' removed from Goblin."));
        assert!(tracker.creature("Goblin").unwrap().effects().is_empty());
    }

    #[test]
    fn test_empty_description_defaults() {
        let script = "AC\nGoblin\n10\nAE\nGoblin\nTorch\n0\n\nS\nQ\n";
        let (_, output) = run_session(script);

        assert!(output.contains("- Torch (Notes/Items). Details: N/A"));
    }

    #[test]
    fn test_dice_roll_reproducible_with_seed() {
        let (_, first) = run_session("DR\n2d6+3\nQ\n");
        let (_, second) = run_session("DR\n2d6+3\nQ\n");

        let line = |s: &str| {
            s.lines()
                .find(|l| l.starts_with("Rolls:"))
                .map(str::to_string)
        };
        assert_eq!(line(&first), line(&second));
        assert!(first.contains("--- Dice Roll: 2D6+3 ---"));
    }

    #[test]
    fn test_invalid_dice_formula_reported() {
        let (_, output) = run_session("DR\nnot-dice\nQ\n");
        assert!(output.contains("[ERROR] invalid dice formula 'not-dice'"));
    }

    #[test]
    fn test_eof_ends_loop() {
        let (tracker, _) = run_session("AC\nGoblin\n10\n");
        assert_eq!(tracker.creature_names(), vec!["Goblin"]);
    }
}
