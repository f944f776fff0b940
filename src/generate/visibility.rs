use crate::core::coord::Coord;
use crate::core::position::Position;

/// True iff no placed piece can see `candidate`.
///
/// A piece sees every square on its rank, file and both diagonals, regardless of distance or
/// blockers. Knightriders additionally see every square on their (1,2) and (2,1) lines.
/// An occupied candidate shares its own rank and is therefore never safe.
pub fn is_square_safe(candidate: Coord, position: &Position) -> bool {
    position
        .iter()
        .all(|(at, piece)| !sees(at, candidate, piece.kind.sees_knight_lines()))
}

#[inline]
fn sees(from: Coord, target: Coord, knight_lines: bool) -> bool {
    let d = target - from;
    let (ax, ay) = (d.x.abs(), d.y.abs());
    if d.x == 0 || d.y == 0 || ax == ay {
        return true;
    }
    knight_lines && (ax == 2 * ay || 2 * ax == ay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::piece::{Color, Piece, PieceKind};

    fn single(kind: PieceKind, at: Coord) -> Position {
        let mut pos = Position::new();
        pos.place(at, Piece::new(kind, Color::White));
        pos
    }

    #[test]
    fn lines_are_unbounded() {
        let pos = single(PieceKind::Knight, Coord::ORIGIN);
        assert!(!is_square_safe(Coord::new(0, 1000), &pos));
        assert!(!is_square_safe(Coord::new(-1000, 0), &pos));
        assert!(!is_square_safe(Coord::new(-700, 700), &pos));
        assert!(is_square_safe(Coord::new(2, 1), &pos));
    }

    #[test]
    fn knight_lines_only_matter_for_knightriders() {
        let target = Coord::new(14, 7);
        assert!(is_square_safe(target, &single(PieceKind::Rook, Coord::ORIGIN)));
        assert!(!is_square_safe(
            target,
            &single(PieceKind::Knightrider, Coord::ORIGIN)
        ));
        assert!(!is_square_safe(
            Coord::new(-3, 6),
            &single(PieceKind::Knightrider, Coord::ORIGIN)
        ));
    }
}
