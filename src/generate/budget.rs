//! Retry accounting for rejection sampling.
//!
//! Placement draws candidates until one is admissible. The draw loop itself never gives up,
//! so every placement is charged against [`SamplerLimits::max_attempts_per_piece`] and an
//! exhausted budget surfaces as [`PracticeError::Infeasible`] instead of a hang.

use crate::chess::piece::Piece;
use crate::config::SamplerLimits;
use crate::error::PracticeError;

#[derive(Debug, Clone)]
pub struct AttemptTracker {
    limits: SamplerLimits,
    piece_attempts: u64,
    total_attempts: u64,
}

impl AttemptTracker {
    #[inline]
    pub fn new(limits: SamplerLimits) -> Self {
        Self {
            limits,
            piece_attempts: 0,
            total_attempts: 0,
        }
    }

    /// Resets the per-piece counter before drawing squares for the next piece.
    #[inline]
    pub fn start_piece(&mut self) {
        self.piece_attempts = 0;
    }

    #[inline]
    pub fn piece_attempts(&self) -> u64 {
        self.piece_attempts
    }

    #[inline]
    pub fn total_attempts(&self) -> u64 {
        self.total_attempts
    }

    /// Charge one candidate draw.
    pub fn bump(&mut self, stage: &'static str, piece: Piece) -> Result<(), PracticeError> {
        if self.piece_attempts >= self.limits.max_attempts_per_piece {
            return Err(PracticeError::Infeasible {
                stage,
                piece: piece.long(),
                attempts: self.piece_attempts,
            });
        }
        self.piece_attempts += 1;
        self.total_attempts += 1;
        Ok(())
    }
}
