//! Puzzle identifiers and their placement instructions.
//!
//! A puzzle id such as `"1K1Q1N-1k"` lists white material as `<count><CODE>` groups, followed
//! by the lone black king `-1k`. The grammar only admits uppercase (white) codes before the
//! dash, so white groups always come first in the instruction list.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::chess::piece::{Color, Piece, PieceKind};
use crate::error::PracticeError;

static ID_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+[A-Z]+)+-1k$").expect("puzzle id grammar"));

static GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)([A-Za-z]+)").expect("piece group pattern"));

/// Place `count` pieces of one type and colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementInstruction {
    pub count: u32,
    pub kind: PieceKind,
    pub color: Color,
}

impl PlacementInstruction {
    #[inline]
    pub fn piece(&self) -> Piece {
        Piece::new(self.kind, self.color)
    }
}

impl fmt::Display for PlacementInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.count, self.piece())
    }
}

/// A validated puzzle id together with its decoded instructions.
///
/// Equality, ordering and hashing only look at the id text; the instructions are a pure
/// function of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PuzzleId {
    raw: String,
    instructions: Vec<PlacementInstruction>,
}

impl PuzzleId {
    pub fn parse(id: &str) -> Result<PuzzleId, PracticeError> {
        let instructions = parse_instructions(id)?;
        Ok(PuzzleId {
            raw: id.to_string(),
            instructions,
        })
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Instructions in id order: every white group, then the black king.
    #[inline]
    pub fn instructions(&self) -> &[PlacementInstruction] {
        &self.instructions
    }

    pub fn piece_total(&self) -> u32 {
        self.instructions.iter().map(|i| i.count).sum()
    }
}

/// Decodes an id into placement instructions, rejecting anything outside the grammar.
pub fn parse_instructions(id: &str) -> Result<Vec<PlacementInstruction>, PracticeError> {
    if !ID_GRAMMAR.is_match(id) {
        return Err(PracticeError::MalformedPuzzleId {
            id: id.to_string(),
            reason: "expected <count><CODE> groups followed by -1k",
        });
    }

    let mut out = Vec::new();
    for cap in GROUP.captures_iter(id) {
        let code = &cap[2];
        let count: u32 = cap[1].parse().map_err(|_| PracticeError::MalformedPuzzleId {
            id: id.to_string(),
            reason: "piece count out of range",
        })?;
        if count == 0 {
            return Err(PracticeError::ZeroCount {
                id: id.to_string(),
                code: code.to_string(),
            });
        }
        let piece = Piece::from_short(code).ok_or_else(|| PracticeError::UnknownPieceCode {
            id: id.to_string(),
            code: code.to_string(),
        })?;
        out.push(PlacementInstruction {
            count,
            kind: piece.kind,
            color: piece.color,
        });
    }
    Ok(out)
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PuzzleId {
    type Err = PracticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleId::parse(s)
    }
}

impl TryFrom<String> for PuzzleId {
    type Error = PracticeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let instructions = parse_instructions(&value)?;
        Ok(PuzzleId {
            raw: value,
            instructions,
        })
    }
}

impl From<PuzzleId> for String {
    fn from(id: PuzzleId) -> String {
        id.raw
    }
}

impl Borrow<str> for PuzzleId {
    fn borrow(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for PuzzleId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PuzzleId {}

impl Hash for PuzzleId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for PuzzleId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PuzzleId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}
