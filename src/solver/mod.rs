//! Bounded linear-program solver.
//!
//! One dense two-phase simplex implementation, sized for the small
//! production-planning programs this crate works with. Kept separate from
//! the model layer so the models stay pure formula evaluations.

pub mod simplex;

pub use simplex::{LinearProgram, SimplexOutcome};
