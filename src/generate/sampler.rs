use rand::Rng;
use tracing::debug;

use crate::catalogue;
use crate::chess::piece::{Color, Piece};
use crate::config::SamplerLimits;
use crate::core::coord::Coord;
use crate::core::position::Position;
use crate::error::PracticeError;
use crate::generate::budget::AttemptTracker;
use crate::generate::visibility::is_square_safe;
use crate::puzzle::{PlacementInstruction, PuzzleId};

/// Width of the column band the black king is drawn from.
pub const BLACK_X_BAND: i32 = 3;

/// Sampling windows for one generation call.
///
/// White pieces are drawn from a square around the origin (`|x|,|y| <= 5`, or `<= 3` when the
/// royal is nearer). The black king is drawn from a 3-column band to the right
/// (`x` in `12..=14`, or `8..=10`) spanning `|y| <= 17` (or `<= 8`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProximityPolicy {
    pub royal_nearer: bool,
}

impl ProximityPolicy {
    pub fn for_puzzle(id: &PuzzleId) -> Self {
        Self {
            royal_nearer: catalogue::is_royal_nearer(id.as_str()),
        }
    }

    #[inline]
    pub fn white_half_width(self) -> i32 {
        if self.royal_nearer {
            3
        } else {
            5
        }
    }

    #[inline]
    pub fn black_x_offset(self) -> i32 {
        if self.royal_nearer {
            8
        } else {
            12
        }
    }

    #[inline]
    pub fn black_y_half_width(self) -> i32 {
        if self.royal_nearer {
            8
        } else {
            17
        }
    }

    pub fn white_candidate<R: Rng + ?Sized>(self, rng: &mut R) -> Coord {
        let h = self.white_half_width();
        Coord::new(rng.random_range(-h..=h), rng.random_range(-h..=h))
    }

    pub fn black_candidate<R: Rng + ?Sized>(self, rng: &mut R) -> Coord {
        let x0 = self.black_x_offset();
        let h = self.black_y_half_width();
        Coord::new(
            rng.random_range(x0..x0 + BLACK_X_BAND),
            rng.random_range(-h..=h),
        )
    }

    pub fn in_white_window(self, c: Coord) -> bool {
        c.in_linf_bound(self.white_half_width())
    }

    pub fn in_black_window(self, c: Coord) -> bool {
        let x0 = self.black_x_offset();
        (x0..x0 + BLACK_X_BAND).contains(&c.x) && c.y.abs() <= self.black_y_half_width()
    }
}

/// Incremental rejection sampler. Feed it instruction groups in order, then [`finish`].
///
/// [`finish`]: PositionSampler::finish
pub struct PositionSampler<'r, R: Rng + ?Sized> {
    rng: &'r mut R,
    policy: ProximityPolicy,
    tracker: AttemptTracker,
    position: Position,
    bishop_parity: u8,
    black_started: bool,
}

impl<'r, R: Rng + ?Sized> PositionSampler<'r, R> {
    /// Seeds the bishop parity from `rng`.
    pub fn new(rng: &'r mut R, policy: ProximityPolicy, limits: SamplerLimits) -> Self {
        let bishop_parity = rng.random_range(0..2u8);
        Self {
            rng,
            policy,
            tracker: AttemptTracker::new(limits),
            position: Position::new(),
            bishop_parity,
            black_started: false,
        }
    }

    /// Square colour the next parity-bound white group must use.
    #[inline]
    pub fn bishop_parity(&self) -> u8 {
        self.bishop_parity
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn total_attempts(&self) -> u64 {
        self.tracker.total_attempts()
    }

    /// Places every piece of one group, then flips the bishop parity.
    pub fn place_group(&mut self, instr: &PlacementInstruction) -> Result<(), PracticeError> {
        let piece = instr.piece();
        if instr.color == Color::White && self.black_started {
            return Err(PracticeError::WhiteAfterBlack {
                piece: piece.long(),
            });
        }

        for _ in 0..instr.count {
            let at = match instr.color {
                Color::White => self.place_white(piece)?,
                Color::Black => {
                    self.black_started = true;
                    self.place_black(piece)?
                }
            };
            debug!(
                piece = %piece,
                square = %at,
                attempts = self.tracker.piece_attempts(),
                "placed piece"
            );
        }

        self.bishop_parity = 1 - self.bishop_parity;
        Ok(())
    }

    fn place_white(&mut self, piece: Piece) -> Result<Coord, PracticeError> {
        self.tracker.start_piece();
        loop {
            self.tracker.bump("white_placement", piece)?;
            let at = self.policy.white_candidate(&mut *self.rng);
            if self.position.is_occupied(at) {
                continue;
            }
            if piece.kind.is_parity_bound() && at.square_parity() != self.bishop_parity {
                continue;
            }
            self.position.place(at, piece);
            return Ok(at);
        }
    }

    fn place_black(&mut self, piece: Piece) -> Result<Coord, PracticeError> {
        self.tracker.start_piece();
        loop {
            self.tracker.bump("black_placement", piece)?;
            let at = self.policy.black_candidate(&mut *self.rng);
            if self.position.is_occupied(at) || !is_square_safe(at, &self.position) {
                continue;
            }
            self.position.place(at, piece);
            return Ok(at);
        }
    }

    pub fn finish(self) -> Position {
        self.position
    }
}

/// Samples a position for an arbitrary instruction list (white groups first).
pub fn sample_position<R: Rng + ?Sized>(
    instructions: &[PlacementInstruction],
    policy: ProximityPolicy,
    rng: &mut R,
    limits: SamplerLimits,
) -> Result<Position, PracticeError> {
    let mut sampler = PositionSampler::new(rng, policy, limits);
    for instr in instructions {
        sampler.place_group(instr)?;
    }
    debug!(
        attempts = sampler.total_attempts(),
        royal_nearer = policy.royal_nearer,
        "position sampled"
    );
    Ok(sampler.finish())
}

/// Generates the starting position for a catalogue puzzle.
///
/// Unknown or malformed ids are rejected before anything is sampled.
pub fn generate_checkmate_position<R: Rng + ?Sized>(
    id: &str,
    rng: &mut R,
    limits: SamplerLimits,
) -> Result<Position, PracticeError> {
    let puzzle = catalogue::lookup(id)?;
    sample_position(
        puzzle.instructions(),
        ProximityPolicy::for_puzzle(&puzzle),
        rng,
        limits,
    )
}
