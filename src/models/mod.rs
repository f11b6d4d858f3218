//! Operations-research model layer.
//!
//! Three independent, stateless calculators, each a pure function of its
//! input structure:
//! - [`production`] — production-mix linear program (profit maximization
//!   under resource limits)
//! - [`inventory`] — economic order quantity and the total-cost curve
//! - [`queueing`] — M/M/1 steady-state metrics with stability check
//!
//! No model depends on another; a caller picks the one it needs, hands it
//! an input struct, and owns the returned result. Curves returned for
//! charting share the [`Curve`] type defined here.

pub mod inventory;
pub mod production;
pub mod queueing;

pub use inventory::{EoqInput, EoqResult};
pub use production::{ProductionInput, ProductionResult};
pub use queueing::{QueueInput, QueueMetrics, QueueResult};

use serde::{Deserialize, Serialize};

/// Default number of samples for discretized curves.
pub const DEFAULT_CURVE_SAMPLES: usize = 100;

// ============================================================================
// Curve Types
// ============================================================================

/// A single sample on a discretized model curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Abscissa (order quantity, arrival rate, product quantity, ...).
    pub x: f64,
    /// Ordinate (total cost, occupancy, constraint boundary, ...).
    pub y: f64,
}

/// An ordered sequence of samples, labeled for charting.
///
/// Produced fresh by each model call; points are stored in ascending `x`
/// order as sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    /// Chart label for the series.
    label: String,
    /// Samples in ascending `x` order.
    points: Vec<CurvePoint>,
}

impl Curve {
    /// Create an empty curve with a label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            points: Vec::new(),
        }
    }

    /// Create an empty curve with a label and preallocated capacity.
    #[must_use]
    pub fn with_capacity(label: impl Into<String>, capacity: usize) -> Self {
        Self {
            label: label.into(),
            points: Vec::with_capacity(capacity),
        }
    }

    /// Append a sample.
    pub fn push(&mut self, x: f64, y: f64) {
        self.points.push(CurvePoint { x, y });
    }

    /// Get the series label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get all samples.
    #[must_use]
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Get number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the curve has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sample with the smallest ordinate.
    #[must_use]
    pub fn min_by_y(&self) -> Option<&CurvePoint> {
        self.points.iter().min_by(|a, b| {
            a.y.partial_cmp(&b.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Sample with the largest ordinate.
    #[must_use]
    pub fn max_by_y(&self) -> Option<&CurvePoint> {
        self.points.iter().max_by(|a, b| {
            a.y.partial_cmp(&b.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    /// Abscissa range covered by the samples.
    #[must_use]
    pub fn x_range(&self) -> Option<(f64, f64)> {
        let first = self.points.first()?.x;
        let last = self.points.last()?.x;
        Some((first, last))
    }
}
