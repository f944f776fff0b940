//! Built-in checkmate practice puzzles (compile-time catalogue).
//!
//! Every entry must stay feasible under the sampling windows in
//! [`crate::generate::sampler::ProximityPolicy`]: each white piece hides at most 9 squares of
//! the black window (19 for a knightrider), so entries are kept well below the window size.

use std::fmt;

use crate::error::PracticeError;
use crate::puzzle::PuzzleId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
}

pub const DIFFICULTIES: [Difficulty; 4] = [
    Difficulty::Easy,
    Difficulty::Medium,
    Difficulty::Hard,
    Difficulty::Insane,
];

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Insane => "insane",
        }
    }

    pub fn puzzles(self) -> &'static [&'static str] {
        match self {
            Difficulty::Easy => EASY,
            Difficulty::Medium => MEDIUM,
            Difficulty::Hard => HARD,
            Difficulty::Insane => INSANE,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const EASY: &[&str] = &[
    "2Q-1k",
    "3R-1k",
    "1K2R-1k",
    "1K1Q1B-1k",
    "1K1AR-1k",
    "1K1CH-1k",
    "1K1AM-1k",
];

const MEDIUM: &[&str] = &[
    "1K1Q1N-1k",
    "1K1Q1P-1k",
    "1K1N2B-1k",
    "1K2B2B-1k",
    "3B3B-1k",
    "1K1R1B1N-1k",
    "1K1R2N-1k",
    "1K2AR-1k",
];

const HARD: &[&str] = &[
    "1K3NR-1k",
    "1K3HA-1k",
    "1K2N1B1B-1k",
    "1K1N2B1B-1k",
    "1K3HU-1k",
    "2AM-1k",
    "1K2GU1CE-1k",
];

const INSANE: &[&str] = &[
    "1K1N6B-1k",
    "1K2N7B-1k",
    "4NR-1k",
    "1K5HU-1k",
    "1K3CA1ZE-1k",
    "1K4N2B-1k",
];

/// Puzzles whose black king starts in the closer window.
pub const ROYAL_NEARER: &[&str] = &["1K1Q1P-1k", "1K1R2N-1k", "1K2N1B1B-1k"];

/// Every puzzle id, easiest bucket first.
pub fn all_puzzles() -> impl Iterator<Item = &'static str> {
    DIFFICULTIES.iter().flat_map(|d| d.puzzles().iter().copied())
}

pub fn is_known(id: &str) -> bool {
    all_puzzles().any(|p| p == id)
}

pub fn difficulty_of(id: &str) -> Option<Difficulty> {
    DIFFICULTIES
        .iter()
        .copied()
        .find(|d| d.puzzles().contains(&id))
}

pub fn is_royal_nearer(id: &str) -> bool {
    ROYAL_NEARER.contains(&id)
}

/// Parses `id` and checks that the catalogue offers it.
pub fn lookup(id: &str) -> Result<PuzzleId, PracticeError> {
    let parsed = PuzzleId::parse(id)?;
    if !is_known(id) {
        return Err(PracticeError::UnknownPuzzle { id: id.to_string() });
    }
    Ok(parsed)
}
