//! Economic order quantity model.
//!
//! Balances ordering cost against holding cost for a single item under
//! constant annual demand:
//!
//! ```text
//! EOQ   = sqrt(2 * D * S / H)
//! TC(Q) = (D / Q) * S + (Q / 2) * H
//! ```
//!
//! where `D` is annual demand, `S` the fixed cost per order, and `H` the
//! holding cost per unit per year. `compute` returns the EOQ, the total
//! cost at the EOQ, and the total-cost curve sampled over `(0, 2*EOQ]`
//! for charting (the EOQ sits at the curve's minimum, midway through the
//! range).
//!
//! # Example
//!
//! ```rust
//! use modelar::models::inventory::{self, EoqInput};
//!
//! let result = inventory::compute(&EoqInput::default()).unwrap();
//! assert!((result.eoq - 223.607).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::models::{Curve, DEFAULT_CURVE_SAMPLES};

/// Parameters of the EOQ model. All three must be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EoqInput {
    /// Annual demand in units (D).
    pub annual_demand: f64,
    /// Fixed cost per order (S).
    pub order_cost: f64,
    /// Holding cost per unit per year (H).
    pub holding_cost: f64,
}

impl Default for EoqInput {
    /// The workshop instance: D = 1000, S = 50, H = 2.
    fn default() -> Self {
        Self {
            annual_demand: 1000.0,
            order_cost: 50.0,
            holding_cost: 2.0,
        }
    }
}

impl EoqInput {
    /// Create an input from demand, order cost, and holding cost.
    #[must_use]
    pub const fn new(annual_demand: f64, order_cost: f64, holding_cost: f64) -> Self {
        Self {
            annual_demand,
            order_cost,
            holding_cost,
        }
    }

    /// Check that every parameter is finite and positive.
    ///
    /// # Errors
    ///
    /// `NonFiniteInput` for NaN or infinite parameters, `InvalidInput` for
    /// values outside `(0, inf)`.
    pub fn validate(&self) -> ModelResult<()> {
        for (name, value) in [
            ("annual_demand", self.annual_demand),
            ("order_cost", self.order_cost),
            ("holding_cost", self.holding_cost),
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

    /// Total annual cost of ordering in batches of `quantity`.
    ///
    /// `quantity` must be positive; the ordering term divides by it.
    #[must_use]
    pub fn total_cost(&self, quantity: f64) -> f64 {
        (self.annual_demand / quantity) * self.order_cost + (quantity / 2.0) * self.holding_cost
    }
}

/// Outcome of an EOQ evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EoqResult {
    /// The cost-minimizing order quantity.
    pub eoq: f64,
    /// Total annual cost when ordering at the EOQ.
    pub cost_at_eoq: f64,
    /// Total cost sampled over `(0, 2*EOQ]`, ascending in quantity.
    pub total_cost_curve: Curve,
}

/// Evaluate the EOQ model at the default curve resolution.
///
/// # Errors
///
/// Input violations per [`EoqInput::validate`].
pub fn compute(input: &EoqInput) -> ModelResult<EoqResult> {
    compute_with_samples(input, DEFAULT_CURVE_SAMPLES)
}

/// Evaluate the EOQ model, sampling the cost curve at `samples` points.
///
/// Sample `i` of `n` sits at `Q_i = i * 2*EOQ / n`: the first quantity is
/// strictly positive (the cost curve diverges at zero) and the last is
/// exactly twice the EOQ.
///
/// # Errors
///
/// Input violations per [`EoqInput::validate`], or `InvalidInput` when
/// `samples` is zero.
pub fn compute_with_samples(input: &EoqInput, samples: usize) -> ModelResult<EoqResult> {
    input.validate()?;
    if samples == 0 {
        return Err(ModelError::invalid_input("samples", ">= 1", 0.0));
    }

    let eoq = (2.0 * input.annual_demand * input.order_cost / input.holding_cost).sqrt();
    let cost_at_eoq = input.total_cost(eoq);

    let step = 2.0 * eoq / samples as f64;
    let mut total_cost_curve = Curve::with_capacity("total cost", samples);
    for i in 1..=samples {
        let quantity = step * i as f64;
        total_cost_curve.push(quantity, input.total_cost(quantity));
    }

    Ok(EoqResult {
        eoq,
        cost_at_eoq,
        total_cost_curve,
    })
}
