use std::fmt;

/// Piece types known to the infinite-chess game host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
    Amazon,
    Chancellor,
    Archbishop,
    Guard,
    Hawk,
    Centaur,
    Knightrider,
    Huygen,
    Rose,
    Camel,
    Giraffe,
    Zebra,
    RoyalQueen,
    RoyalCentaur,
}

pub const ALL_KINDS: [PieceKind; 20] = [
    PieceKind::King,
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Pawn,
    PieceKind::Amazon,
    PieceKind::Chancellor,
    PieceKind::Archbishop,
    PieceKind::Guard,
    PieceKind::Hawk,
    PieceKind::Centaur,
    PieceKind::Knightrider,
    PieceKind::Huygen,
    PieceKind::Rose,
    PieceKind::Camel,
    PieceKind::Giraffe,
    PieceKind::Zebra,
    PieceKind::RoyalQueen,
    PieceKind::RoyalCentaur,
];

impl PieceKind {
    /// Uppercase short code (`"Q"`, `"NR"`, ...).
    pub fn code(self) -> &'static str {
        use PieceKind::*;
        match self {
            King => "K",
            Queen => "Q",
            Rook => "R",
            Bishop => "B",
            Knight => "N",
            Pawn => "P",
            Amazon => "AM",
            Chancellor => "CH",
            Archbishop => "AR",
            Guard => "GU",
            Hawk => "HA",
            Centaur => "CE",
            Knightrider => "NR",
            Huygen => "HU",
            Rose => "RO",
            Camel => "CA",
            Giraffe => "GI",
            Zebra => "ZE",
            RoyalQueen => "RQ",
            RoyalCentaur => "RC",
        }
    }

    /// Plural type name used in long piece names (`"queens"` in `"queensW"`).
    pub fn plural_name(self) -> &'static str {
        use PieceKind::*;
        match self {
            King => "kings",
            Queen => "queens",
            Rook => "rooks",
            Bishop => "bishops",
            Knight => "knights",
            Pawn => "pawns",
            Amazon => "amazons",
            Chancellor => "chancellors",
            Archbishop => "archbishops",
            Guard => "guards",
            Hawk => "hawks",
            Centaur => "centaurs",
            Knightrider => "knightriders",
            Huygen => "huygens",
            Rose => "roses",
            Camel => "camels",
            Giraffe => "giraffes",
            Zebra => "zebras",
            RoyalQueen => "royalQueens",
            RoyalCentaur => "royalCentaurs",
        }
    }

    /// Case-insensitive lookup of a short code.
    pub fn from_code(code: &str) -> Option<PieceKind> {
        let upper = code.to_ascii_uppercase();
        ALL_KINDS.iter().copied().find(|k| k.code() == upper)
    }

    #[inline]
    pub fn is_royal(self) -> bool {
        matches!(
            self,
            PieceKind::King | PieceKind::RoyalQueen | PieceKind::RoyalCentaur
        )
    }

    /// Bishops of one group must share a square colour, and consecutive groups alternate.
    #[inline]
    pub fn is_parity_bound(self) -> bool {
        self == PieceKind::Bishop
    }

    /// Pieces that see along (1,2)/(2,1) lines, which widens the visibility check.
    #[inline]
    pub fn sees_knight_lines(self) -> bool {
        self == PieceKind::Knightrider
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Suffix of long piece names.
    pub fn suffix(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Short form: uppercase code for white, lowercase for black.
    pub fn short(self) -> String {
        match self.color {
            Color::White => self.kind.code().to_string(),
            Color::Black => self.kind.code().to_ascii_lowercase(),
        }
    }

    /// Long form, e.g. `"queensW"` / `"kingsB"`.
    pub fn long(self) -> String {
        format!("{}{}", self.kind.plural_name(), self.color.suffix())
    }

    /// Parses a short form. Mixed-case codes are rejected.
    pub fn from_short(code: &str) -> Option<Piece> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        let color = if code.chars().all(|c| c.is_ascii_uppercase()) {
            Color::White
        } else if code.chars().all(|c| c.is_ascii_lowercase()) {
            Color::Black
        } else {
            return None;
        };
        PieceKind::from_code(code).map(|kind| Piece::new(kind, color))
    }

    pub fn from_long(name: &str) -> Option<Piece> {
        let (plural, color) = if let Some(plural) = name.strip_suffix('W') {
            (plural, Color::White)
        } else if let Some(plural) = name.strip_suffix('B') {
            (plural, Color::Black)
        } else {
            return None;
        };
        ALL_KINDS
            .iter()
            .copied()
            .find(|k| k.plural_name() == plural)
            .map(|kind| Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.long())
    }
}

/// Short-to-long translation, e.g. `"nr"` -> `"knightridersB"`.
pub fn short_to_long(code: &str) -> Option<String> {
    Piece::from_short(code).map(Piece::long)
}

/// Long-to-short translation, e.g. `"queensW"` -> `"Q"`.
pub fn long_to_short(name: &str) -> Option<String> {
    Piece::from_long(name).map(Piece::short)
}
