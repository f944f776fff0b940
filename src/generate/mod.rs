//! Randomized starting positions for checkmate practice.
//!
//! - [`sampler`]: sampling windows and the group-by-group rejection sampler.
//! - [`visibility`]: the line-of-sight test used for black placement.
//! - [`budget`]: per-piece retry limits.

pub mod budget;
pub mod sampler;
pub mod visibility;

pub use sampler::{generate_checkmate_position, sample_position, PositionSampler, ProximityPolicy};
pub use visibility::is_square_safe;
