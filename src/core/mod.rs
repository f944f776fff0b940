//! Board primitives.
//!
//! - [`coord`]: integer coordinates on the infinite board, square keys and square colour.
//! - [`position`]: a sparse square -> piece map plus its compact string form.

pub mod coord;
pub mod position;
