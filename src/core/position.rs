use std::collections::BTreeMap;

use crate::chess::piece::{Color, Piece};
use crate::core::coord::Coord;
use crate::error::PracticeError;

/// A sparse piece placement on the infinite board.
///
/// Each square holds at most one piece. Iteration is in coordinate order, so two equal
/// positions always produce the same compact string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Position {
    pieces: BTreeMap<Coord, Piece>,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    #[inline]
    pub fn get(&self, at: Coord) -> Option<Piece> {
        self.pieces.get(&at).copied()
    }

    #[inline]
    pub fn is_occupied(&self, at: Coord) -> bool {
        self.pieces.contains_key(&at)
    }

    /// Places `piece` on an empty square. Returns `false` (and leaves the position unchanged)
    /// if the square is taken.
    pub fn place(&mut self, at: Coord, piece: Piece) -> bool {
        if self.is_occupied(at) {
            return false;
        }
        self.pieces.insert(at, piece);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.pieces.iter().map(|(&c, &p)| (c, p))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.color == color)
    }

    pub fn count_of(&self, piece: Piece) -> usize {
        self.pieces.values().filter(|&&p| p == piece).count()
    }

    /// Compact string form, e.g. `"K0,1|Q-3,2|k12,-5"`.
    pub fn to_compact(&self) -> String {
        self.iter()
            .map(|(c, p)| format!("{}{}", p.short(), c))
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Parses [`Position::to_compact`] output. A trailing `+` (special rights marker) on an
    /// entry is accepted and ignored.
    pub fn from_compact(s: &str) -> Result<Position, PracticeError> {
        let mut pos = Position::new();
        for entry in s.split('|').filter(|e| !e.is_empty()) {
            let invalid = |reason| PracticeError::InvalidPositionString {
                entry: entry.to_string(),
                reason,
            };
            let body = entry.strip_suffix('+').unwrap_or(entry);
            let split = body
                .find(|c: char| c.is_ascii_digit() || c == '-')
                .ok_or_else(|| invalid("missing coordinates"))?;
            let (code, key) = body.split_at(split);
            let piece = Piece::from_short(code).ok_or_else(|| invalid("unknown piece code"))?;
            let at = Coord::from_key(key).map_err(|_| invalid("bad coordinates"))?;
            if !pos.place(at, piece) {
                return Err(invalid("square listed twice"));
            }
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::piece::PieceKind;

    #[test]
    fn occupied_squares_are_not_overwritten() {
        let mut pos = Position::new();
        let q = Piece::new(PieceKind::Queen, Color::White);
        let k = Piece::new(PieceKind::King, Color::Black);
        assert!(pos.place(Coord::new(1, 1), q));
        assert!(!pos.place(Coord::new(1, 1), k));
        assert_eq!(pos.get(Coord::new(1, 1)), Some(q));
        assert_eq!(pos.len(), 1);
    }

    #[test]
    fn compact_string_is_sorted_by_square() {
        let mut pos = Position::new();
        pos.place(Coord::new(12, -5), Piece::new(PieceKind::King, Color::Black));
        pos.place(Coord::new(-3, 2), Piece::new(PieceKind::Queen, Color::White));
        pos.place(Coord::new(0, 1), Piece::new(PieceKind::Knightrider, Color::White));
        assert_eq!(pos.to_compact(), "Q-3,2|NR0,1|k12,-5");
        assert_eq!(Position::from_compact(&pos.to_compact()).unwrap(), pos);
    }

    #[test]
    fn compact_parse_rejects_duplicates_and_garbage() {
        assert!(Position::from_compact("Q1,1|R1,1").is_err());
        assert!(Position::from_compact("X1,1").is_err());
        assert!(Position::from_compact("Q").is_err());
        assert!(Position::from_compact("").unwrap().is_empty());
        assert_eq!(Position::from_compact("K2,3+").unwrap().len(), 1);
    }
}
