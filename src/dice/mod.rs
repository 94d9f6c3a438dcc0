//! Dice rolling system
//!
//! Parses and rolls dice notation like "2d6+3", "1d20", "4d8-2"

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use thiserror::Error;

static FORMULA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d*)d(\d+)([+-]\d+)?$").unwrap());

/// Dice parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("invalid dice formula '{0}': use forms like '1d20', '3d6+5', or '2d8-1'")]
    Malformed(String),

    #[error("dice count must be at least 1")]
    ZeroCount,

    #[error("die sides must be at least 1")]
    ZeroSides,
}

/// A parsed dice formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceFormula {
    /// Number of dice to roll
    pub count: u32,
    /// Number of sides per die
    pub sides: u32,
    /// Modifier to add/subtract
    pub modifier: i32,
}

impl DiceFormula {
    /// Create a new dice formula
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Roll the dice, returning individual die results and the total
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> RollResult {
        let mut rolls = Vec::with_capacity(self.count as usize);
        for _ in 0..self.count {
            rolls.push(rng.random_range(1..=self.sides));
        }

        let sum: u32 = rolls.iter().sum();
        let total = sum as i32 + self.modifier;

        RollResult {
            rolls,
            modifier: self.modifier,
            total,
        }
    }

    /// Get the minimum possible result
    pub fn min(&self) -> i32 {
        self.count as i32 + self.modifier
    }

    /// Get the maximum possible result
    pub fn max(&self) -> i32 {
        (self.count * self.sides) as i32 + self.modifier
    }
}

impl FromStr for DiceFormula {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let formula = s.trim().to_lowercase();
        let caps = FORMULA_REGEX
            .captures(&formula)
            .ok_or_else(|| DiceError::Malformed(s.trim().to_string()))?;

        let count_str = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let count: u32 = if count_str.is_empty() {
            1 // "d6" means "1d6"
        } else {
            count_str
                .parse()
                .map_err(|_| DiceError::Malformed(s.trim().to_string()))?
        };

        let sides: u32 = caps[2]
            .parse()
            .map_err(|_| DiceError::Malformed(s.trim().to_string()))?;

        let modifier: i32 = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| DiceError::Malformed(s.trim().to_string()))?,
            None => 0,
        };

        if count == 0 {
            return Err(DiceError::ZeroCount);
        }
        if sides == 0 {
            return Err(DiceError::ZeroSides);
        }

        Ok(DiceFormula {
            count,
            sides,
            modifier,
        })
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier > 0 {
            write!(f, "{}d{}+{}", self.count, self.sides, self.modifier)
        } else if self.modifier < 0 {
            write!(f, "{}d{}{}", self.count, self.sides, self.modifier)
        } else {
            write!(f, "{}d{}", self.count, self.sides)
        }
    }
}

/// Result of rolling a formula
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollResult {
    /// Individual die results, in roll order
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub total: i32,
}

/// Parse and roll a formula in one step
pub fn roll_formula<R: Rng + ?Sized>(formula: &str, rng: &mut R) -> Result<RollResult, DiceError> {
    let parsed: DiceFormula = formula.parse()?;
    Ok(parsed.roll(rng))
}
