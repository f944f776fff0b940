//! Randomized checkmate-practice positions for infinite chess, and the practice session that
//! drives undo/restart/completion around an external game host.

pub mod catalogue;
pub mod chess;
pub mod config;
pub mod core;
pub mod error;
pub mod generate;
pub mod ledger;
pub mod puzzle;
pub mod session;

pub use error::PracticeError;
