//! Scripted session tests
//!
//! Feeds command transcripts through the interactive loop and checks the
//! resulting roster and output.

use std::io::Cursor;

use skirmish::cli::App;
use skirmish::Config;

fn run_session(script: &str) -> String {
    let config = Config {
        color: false,
        seed: Some(42),
    };
    let input = Cursor::new(script.to_string());
    let mut out = Vec::new();
    let mut app = App::new(&config, input, &mut out);
    app.run().unwrap();
    drop(app);
    String::from_utf8(out).unwrap()
}

/// Test: a complete session covering setup, combat, effects, and rounds
#[test]
fn test_full_session_transcript() {
    let script = concat!(
        "AC\nGoblin\n10\n",
        "AC\nOgre\n40\n",
        "AE\nGoblin\nPoisoned\n2\nwyvern sting\n",
        "HP\nOgre\nD\n25\n",
        "AR\n",
        "AR\n",
        "S\n",
        "RC\nGoblin\n",
        "Q\n",
    );
    let output = run_session(script);

    assert!(output.contains("[SETUP] Creature 'Goblin' added with 10 Max HP."));
    assert!(output.contains("[SETUP] Creature 'Ogre' added with 40 Max HP."));
    assert!(output.contains("[EFFECT] 'Poisoned' applied to Goblin (2 rounds)."));
    assert!(output.contains("[HP] Ogre Damaged for 25. Current HP: 15 / 40"));
    assert!(output.contains("| ADVANCING TO ROUND 1"));
    assert!(output.contains("[ROUND END] Goblin: Poisoned effects have worn off."));
    assert!(output.contains("--- Current Status (Round 2) ---"));
    assert!(output.contains("* Ogre (Bloodied):"));
    assert!(output.contains("[REMOVED] Creature 'Goblin' removed from the tracker."));
    assert!(output.contains("Session ended."));
}

/// Test: bad input at every prompt is reported and the loop keeps going
#[test]
fn test_invalid_input_recovers() {
    let script = concat!(
        "zz\n",
        "AC\nGoblin\n-5\n",
        "AC\nGoblin\n10\n",
        "AC\nGoblin\n12\n",
        "HP\nGoblin\nX\n",
        "AE\nGoblin\nStunned\n-7\n",
        "Q\n",
    );
    let output = run_session(script);

    assert!(output.contains("[ERROR] Unknown command 'zz'."));
    assert!(output.contains("'-5' is not a positive whole number."));
    assert!(output.contains("[ERROR] creature 'Goblin' already exists"));
    assert!(output.contains("Enter 'D' for damage or 'H' for heal."));
    assert!(output.contains("'-7' is not a valid duration."));
    assert!(output.contains("Session ended."));
}

/// Test: seeded sessions roll identical dice
#[test]
fn test_seeded_dice_are_reproducible() {
    let first = run_session("DR\n3d8+2\nQ\n");
    let second = run_session("DR\n3d8+2\nQ\n");

    let roll_line = |s: &str| {
        s.lines()
            .find(|l| l.starts_with("Rolls:"))
            .map(str::to_string)
    };
    assert_eq!(roll_line(&first), roll_line(&second));
    assert!(roll_line(&first).is_some());
}

/// Test: plain-palette output carries no ANSI escape sequences
#[test]
fn test_no_color_output_is_clean() {
    let script = concat!(
        "AC\nGoblin\n10\n",
        "AE\nGoblin\nPoisoned\n3\n\n",
        "HP\nGoblin\nH\n2\n",
        "AR\n",
        "S\n",
        "DR\n2d6\n",
        "Q\n",
    );
    let output = run_session(script);
    assert!(!output.contains('\u{1b}'));
}

/// Test: creature-targeting commands refuse to run on an empty roster
#[test]
fn test_empty_roster_short_circuits() {
    let output = run_session("HP\nAE\nRE\nRC\nQ\n");
    assert_eq!(
        output
            .matches("[ERROR] No creatures in the tracker yet.")
            .count(),
        4
    );
}
