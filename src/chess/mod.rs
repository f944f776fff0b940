//! Piece vocabulary shared with the game host.

pub mod piece;
