//! Crate-wide error type.
//!
//! Invalid input (unknown or malformed puzzle ids) and sequencing faults are reported here.
//! Stale UI commands (undo/restart outside practice) are *not* errors; see
//! [`crate::session::CommandOutcome`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PracticeError {
    /// The id does not match `<count><type>...-1k`.
    #[error("malformed puzzle id {id:?}: {reason}")]
    MalformedPuzzleId { id: String, reason: &'static str },

    #[error("unknown piece code {code:?} in puzzle id {id:?}")]
    UnknownPieceCode { id: String, code: String },

    #[error("piece group {code:?} in puzzle id {id:?} has a zero count")]
    ZeroCount { id: String, code: String },

    /// Well-formed, but not offered by the practice catalogue.
    #[error("puzzle {id:?} is not part of the checkmate practice catalogue")]
    UnknownPuzzle { id: String },

    /// A white group was scheduled after black placement had already started.
    #[error("cannot place white {piece} after black pieces have been placed")]
    WhiteAfterBlack { piece: String },

    #[error("game conclusion handler called but the game has not concluded")]
    GameNotConcluded,

    /// The placement retry budget ran out.
    #[error("no admissible square found for {piece} at {stage} after {attempts} attempts")]
    Infeasible {
        stage: &'static str,
        piece: String,
        attempts: u64,
    },

    #[error("invalid square key {key:?}")]
    InvalidSquareKey { key: String },

    #[error("invalid position string entry {entry:?}: {reason}")]
    InvalidPositionString { entry: String, reason: &'static str },

    /// The game host refused to start or unload a game.
    #[error("game host error: {0}")]
    Host(String),

    #[error("storage error at {stage} for {path}: {error}")]
    Storage {
        stage: &'static str,
        path: String,
        error: String,
    },
}
