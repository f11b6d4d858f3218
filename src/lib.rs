//! # modelar
//!
//! Operations modeling toolkit: three small deterministic calculators
//! for workshop-scale planning questions.
//!
//! - Production planning: profit-maximizing product mix by linear
//!   programming (dense two-phase simplex)
//! - Inventory policy: economic order quantity and the total cost curve
//! - Waiting lines: M/M/1 steady-state metrics and occupancy curve
//!
//! The design follows:
//! - Toyota Production System (TPS): Jidoka, Poka-Yoke
//! - JPL Mission-Critical Verification: Power of 10 rules
//!
//! ## Example
//!
//! ```rust
//! use modelar::models::{queueing, QueueInput};
//!
//! let input = QueueInput::new(2.0, 3.0);
//! let result = queueing::evaluate(&input);
//! assert!(result.is_ok());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,      // Numerical code choices are intentional
    clippy::imprecise_flops,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
    clippy::needless_range_loop,   // Sometimes range loops are clearer
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod solver;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ScenarioConfig, ScenarioConfigBuilder};
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::export::{ChartSeries, ExportFormat, Marker};
    pub use crate::models::{
        inventory, production, queueing, Curve, CurvePoint, EoqInput, EoqResult, ProductionInput,
        ProductionResult, QueueInput, QueueMetrics, QueueResult,
    };
    pub use crate::solver::{LinearProgram, SimplexOutcome};
}

/// Re-export for public API
pub use error::{ModelError, ModelResult};
