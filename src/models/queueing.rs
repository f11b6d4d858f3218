//! M/M/1 steady-state queueing model.
//!
//! A single server with Poisson arrivals at rate λ and exponential
//! service at rate μ. When λ < μ the queue is stable and the standard
//! steady-state metrics exist:
//!
//! ```text
//! ρ  = λ / μ           server utilization
//! L  = ρ / (1 - ρ)     average number in system
//! Lq = ρ² / (1 - ρ)    average number waiting
//! W  = 1 / (μ - λ)     average time in system
//! Wq = ρ / (μ - λ)     average time waiting
//! ```
//!
//! λ >= μ means the queue grows without bound; `evaluate` reports that as
//! the `Unstable` variant rather than an error, because an overloaded
//! configuration is a legitimate modeling answer. As λ approaches μ from
//! below, all four averages grow without limit but stay finite; values are
//! returned as computed, with no clamping.
//!
//! # Example
//!
//! ```rust
//! use modelar::models::queueing::{self, QueueInput};
//!
//! let result = queueing::evaluate(&QueueInput::new(2.0, 3.0)).unwrap();
//! let metrics = result.metrics().unwrap();
//! assert!((metrics.avg_in_system - 2.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::models::{Curve, DEFAULT_CURVE_SAMPLES};

/// Parameters of the M/M/1 model. Both rates must be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueInput {
    /// Arrival rate λ (customers per unit time).
    pub arrival_rate: f64,
    /// Service rate μ (customers per unit time).
    pub service_rate: f64,
}

impl Default for QueueInput {
    /// The workshop instance: λ = 2, μ = 3.
    fn default() -> Self {
        Self {
            arrival_rate: 2.0,
            service_rate: 3.0,
        }
    }
}

impl QueueInput {
    /// Create an input from the arrival and service rates.
    #[must_use]
    pub const fn new(arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            arrival_rate,
            service_rate,
        }
    }

    /// Check that both rates are finite and positive.
    ///
    /// # Errors
    ///
    /// `NonFiniteInput` for NaN or infinite rates, `InvalidInput` for
    /// rates outside `(0, inf)`.
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in [
            ("arrival_rate", self.arrival_rate),
            ("service_rate", self.service_rate),
        ] {
            if !value.is_finite() {
                return Err(ModelError::non_finite(name));
            }
            if value <= 0.0 {
                return Err(ModelError::invalid_input(name, "> 0", value));
            }
        }
        Ok(())
    }
}

/// Steady-state metrics of a stable M/M/1 queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueMetrics {
    /// Server utilization ρ, strictly inside (0, 1).
    pub utilization: f64,
    /// Average number of customers in the system (L).
    pub avg_in_system: f64,
    /// Average number of customers waiting (Lq).
    pub avg_in_queue: f64,
    /// Average time a customer spends in the system (W).
    pub avg_time_in_system: f64,
    /// Average time a customer spends waiting (Wq).
    pub avg_time_in_queue: f64,
}

/// Outcome of an M/M/1 evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueResult {
    /// λ < μ: the steady state exists.
    Stable(QueueMetrics),
    /// λ >= μ: the queue grows without bound.
    Unstable {
        /// Offered load λ/μ (at or above 1).
        utilization: f64,
    },
}

impl QueueResult {
    /// Whether the queue reaches a steady state.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::Stable(_))
    }

    /// Steady-state metrics, if the queue is stable.
    #[must_use]
    pub const fn metrics(&self) -> Option<&QueueMetrics> {
        match self {
            Self::Stable(metrics) => Some(metrics),
            Self::Unstable { .. } => None,
        }
    }

    /// Offered load λ/μ, reported for both variants.
    #[must_use]
    pub const fn utilization(&self) -> f64 {
        match self {
            Self::Stable(metrics) => metrics.utilization,
            Self::Unstable { utilization } => *utilization,
        }
    }
}

/// Evaluate the M/M/1 model.
///
/// # Errors
///
/// Input violations per [`QueueInput::validate`]. Instability is NOT an
/// error; it comes back as [`QueueResult::Unstable`].
pub fn evaluate(input: &QueueInput) -> ModelResult<QueueResult> {
    input.validate()?;

    let utilization = input.arrival_rate / input.service_rate;
    if input.arrival_rate >= input.service_rate {
        return Ok(QueueResult::Unstable { utilization });
    }

    let spare_rate = input.service_rate - input.arrival_rate;
    Ok(QueueResult::Stable(QueueMetrics {
        utilization,
        avg_in_system: utilization / (1.0 - utilization),
        avg_in_queue: utilization * utilization / (1.0 - utilization),
        avg_time_in_system: 1.0 / spare_rate,
        avg_time_in_queue: utilization / spare_rate,
    }))
}

/// Sensitivity view: average number in system as the arrival rate sweeps
/// over `(0, μ)`, both endpoints excluded (L diverges at μ and is zero in
/// the limit at 0). Sample `i` of `n` sits at `λ'_i = μ * i / (n + 1)`.
///
/// This is a derived chart series, not the primary result; the configured
/// arrival rate is marked on it by the export layer.
///
/// # Errors
///
/// Input violations per [`QueueInput::validate`], or `InvalidInput` when
/// `samples` is zero.
pub fn occupancy_curve(input: &QueueInput, samples: usize) -> ModelResult<Curve> {
    input.validate()?;
    if samples == 0 {
        return Err(ModelError::invalid_input("samples", ">= 1", 0.0));
    }

    let mut curve = Curve::with_capacity("average in system", samples);
    for i in 1..=samples {
        let rho = i as f64 / (samples + 1) as f64;
        let arrival = input.service_rate * rho;
        curve.push(arrival, rho / (1.0 - rho));
    }
    Ok(curve)
}

/// Sensitivity view at the default resolution.
///
/// # Errors
///
/// Same as [`occupancy_curve`].
pub fn default_occupancy_curve(input: &QueueInput) -> ModelResult<Curve> {
    occupancy_curve(input, DEFAULT_CURVE_SAMPLES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workshop_metrics() -> QueueMetrics {
        let result = evaluate(&QueueInput::default()).expect("evaluate");
        *result.metrics().expect("stable")
    }

    #[test]
    fn test_workshop_metrics() {
        let metrics = workshop_metrics();
        assert!((metrics.utilization - 2.0 / 3.0).abs() < 1e-9);
        assert!((metrics.avg_in_system - 2.0).abs() < 1e-9);
        assert!((metrics.avg_in_queue - 4.0 / 3.0).abs() < 1e-9);
        assert!((metrics.avg_time_in_system - 1.0).abs() < 1e-9);
        assert!((metrics.avg_time_in_queue - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_littles_law_holds() {
        let input = QueueInput::default();
        let metrics = workshop_metrics();
        let l = input.arrival_rate * metrics.avg_time_in_system;
        let lq = input.arrival_rate * metrics.avg_time_in_queue;
        assert!((metrics.avg_in_system - l).abs() < 1e-9);
        assert!((metrics.avg_in_queue - lq).abs() < 1e-9);
    }

    #[test]
    fn test_overloaded_queue_is_unstable() {
        let result = evaluate(&QueueInput::new(3.0, 2.0)).expect("evaluate");
        assert!(!result.is_stable());
        assert!(result.metrics().is_none());
        assert!((result.utilization() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_saturated_queue_is_unstable() {
        // λ == μ is already unstable; the steady state does not exist.
        let result = evaluate(&QueueInput::new(3.0, 3.0)).expect("evaluate");
        assert_eq!(
            result,
            QueueResult::Unstable { utilization: 1.0 }
        );
    }

    #[test]
    fn test_near_saturation_stays_finite() {
        let result = evaluate(&QueueInput::new(3.0 - 1e-6, 3.0)).expect("evaluate");
        let metrics = result.metrics().expect("still stable");

        assert!(metrics.avg_in_system.is_finite());
        assert!(metrics.avg_in_system > 1e5);
        assert!(metrics.avg_time_in_system.is_finite());
        assert!((metrics.avg_time_in_system - 1e6).abs() < 1.0);
    }

    #[test]
    fn test_zero_arrival_rate_rejected() {
        let err = evaluate(&QueueInput::new(0.0, 3.0)).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("arrival_rate"));
    }

    #[test]
    fn test_negative_service_rate_rejected() {
        let err = evaluate(&QueueInput::new(2.0, -3.0)).unwrap_err();
        assert!(err.to_string().contains("service_rate"));
    }

    #[test]
    fn test_infinite_rate_rejected() {
        let err = evaluate(&QueueInput::new(f64::INFINITY, 3.0)).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn test_occupancy_curve_stays_inside_range() {
        let input = QueueInput::default();
        let curve = default_occupancy_curve(&input).expect("curve");

        assert_eq!(curve.len(), 100);
        let (first, last) = curve.x_range().expect("non-empty");
        assert!(first > 0.0);
        assert!(last < input.service_rate);
    }

    #[test]
    fn test_occupancy_curve_is_increasing() {
        let curve = default_occupancy_curve(&QueueInput::default()).expect("curve");
        for pair in curve.points().windows(2) {
            assert!(pair[0].y < pair[1].y);
        }
    }

    #[test]
    fn test_occupancy_curve_zero_samples_rejected() {
        let err = occupancy_curve(&QueueInput::default(), 0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let input = QueueInput::new(1.7, 2.9);
        let first = evaluate(&input).expect("evaluate");
        let second = evaluate(&input).expect("evaluate");
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_serde_round_trip() {
        let stable = evaluate(&QueueInput::default()).expect("evaluate");
        let json = serde_json::to_string(&stable).expect("serialize");
        let back: QueueResult = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(stable, back);

        let unstable = QueueResult::Unstable { utilization: 1.5 };
        let json = serde_json::to_string(&unstable).expect("serialize");
        assert!(json.contains("unstable"));
    }
}
