use std::fmt;
use std::ops::Sub;

use crate::error::PracticeError;

/// A square on the infinite board.
///
/// Ordering is lexicographic on `(x, y)`, which keeps positions and their compact strings
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn in_linf_bound(self, bound: i32) -> bool {
        self.x.abs() <= bound && self.y.abs() <= bound
    }

    /// Square colour as `(x + y) mod 2`, using the Euclidean remainder so negative
    /// coordinates alternate like positive ones.
    #[inline]
    pub fn square_parity(self) -> u8 {
        (self.x + self.y).rem_euclid(2) as u8
    }

    /// The `"x,y"` key used by the game host for squares.
    pub fn key(self) -> String {
        format!("{},{}", self.x, self.y)
    }

    pub fn from_key(key: &str) -> Result<Coord, PracticeError> {
        let invalid = || PracticeError::InvalidSquareKey {
            key: key.to_string(),
        };
        let (x, y) = key.split_once(',').ok_or_else(invalid)?;
        let x = x.trim().parse::<i32>().map_err(|_| invalid())?;
        let y = y.trim().parse::<i32>().map_err(|_| invalid())?;
        Ok(Coord::new(x, y))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl Sub for Coord {
    type Output = Coord;

    #[inline]
    fn sub(self, rhs: Coord) -> Self::Output {
        Coord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_round_trips_negative_coordinates() {
        let c = Coord::new(-17, 4);
        assert_eq!(c.key(), "-17,4");
        assert_eq!(Coord::from_key(&c.key()).unwrap(), c);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["", "3", "a,b", "1,2,3", ",5"] {
            assert!(
                matches!(Coord::from_key(key), Err(PracticeError::InvalidSquareKey { .. })),
                "{key:?} should not parse"
            );
        }
    }

    #[test]
    fn parity_alternates_across_the_origin() {
        assert_eq!(Coord::new(0, 0).square_parity(), 0);
        assert_eq!(Coord::new(-1, 0).square_parity(), 1);
        assert_eq!(Coord::new(-1, -1).square_parity(), 0);
        assert_eq!(Coord::new(-3, 0).square_parity(), Coord::new(3, 0).square_parity());
    }
}
