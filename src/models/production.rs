//! Production-mix linear optimization.
//!
//! Decides how much of each product to make so that profit is maximal
//! while every resource stays within its limit:
//!
//! ```text
//! maximize    sum_i profit_i * x_i
//! subject to  sum_j a_ij * x_j <= limit_i   (one row per resource)
//!             x_j >= 0
//! ```
//!
//! The maximization is handed to the simplex core as a minimization of the
//! negated objective. Infeasible programs come back as a result variant, as
//! does unboundedness (an unbounded profit means the constraint set fails
//! to cap some profitable product, which callers treat the same way as an
//! empty feasible region).
//!
//! # Example
//!
//! ```rust
//! use modelar::models::production::{self, ProductionInput};
//!
//! let input = ProductionInput::new(
//!     vec![40.0, 30.0],
//!     vec![vec![2.0, 1.0], vec![1.0, 1.0]],
//!     vec![100.0, 80.0],
//! );
//! let result = production::solve(&input).unwrap();
//! assert!(result.is_feasible());
//! assert!((result.max_profit().unwrap() - 2600.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::models::Curve;
use crate::solver::{LinearProgram, SimplexOutcome};

/// Coefficients below this magnitude are treated as zero when deriving
/// chart geometry.
const COEFFICIENT_EPSILON: f64 = 1e-9;

/// Parameters of a production-mix program.
///
/// `profits` has one entry per product; `constraint_coefficients` has one
/// row per resource, each row as long as `profits`; `constraint_limits`
/// has one entry per resource row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionInput {
    /// Profit per unit of each product (non-negative).
    pub profits: Vec<f64>,
    /// Resource usage per unit: row i, column j is how much of resource i
    /// one unit of product j consumes (non-negative).
    pub constraint_coefficients: Vec<Vec<f64>>,
    /// Available amount of each resource (non-negative).
    pub constraint_limits: Vec<f64>,
}

impl Default for ProductionInput {
    /// The two-product workshop instance: profits 40/30, resource rows
    /// [2, 1] and [1, 1], limits 100 and 80.
    fn default() -> Self {
        Self {
            profits: vec![40.0, 30.0],
            constraint_coefficients: vec![vec![2.0, 1.0], vec![1.0, 1.0]],
            constraint_limits: vec![100.0, 80.0],
        }
    }
}

impl ProductionInput {
    /// Create an input from its three parameter blocks.
    #[must_use]
    pub const fn new(
        profits: Vec<f64>,
        constraint_coefficients: Vec<Vec<f64>>,
        constraint_limits: Vec<f64>,
    ) -> Self {
        Self {
            profits,
            constraint_coefficients,
            constraint_limits,
        }
    }

    /// Number of products.
    #[must_use]
    pub fn n_products(&self) -> usize {
        self.profits.len()
    }

    /// Number of resource constraints.
    #[must_use]
    pub fn n_constraints(&self) -> usize {
        self.constraint_limits.len()
    }

    /// Check domains and shapes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for empty blocks or negative values,
    /// `DimensionMismatch` for ragged rows or limit/row count disagreement,
    /// and `NonFiniteInput` for NaN or infinite entries.
    pub fn validate(&self) -> ModelResult<()> {
        if self.profits.is_empty() {
            return Err(ModelError::invalid_input(
                "profits",
                "at least one product",
                0.0,
            ));
        }
        if self.constraint_coefficients.is_empty() {
            return Err(ModelError::invalid_input(
                "constraint_coefficients",
                "at least one constraint row",
                0.0,
            ));
        }
        if self.constraint_limits.len() != self.constraint_coefficients.len() {
            return Err(ModelError::dimension_mismatch(
                "constraint_limits",
                self.constraint_coefficients.len(),
                self.constraint_limits.len(),
            ));
        }

        let n = self.profits.len();
        for (i, row) in self.constraint_coefficients.iter().enumerate() {
            if row.len() != n {
                return Err(ModelError::dimension_mismatch(
                    format!("constraint_coefficients[{i}]"),
                    n,
                    row.len(),
                ));
            }
        }

        for (i, &p) in self.profits.iter().enumerate() {
            if !p.is_finite() {
                return Err(ModelError::non_finite(format!("profits[{i}]")));
            }
            if p < 0.0 {
                return Err(ModelError::invalid_input(format!("profits[{i}]"), ">= 0", p));
            }
        }
        for (i, row) in self.constraint_coefficients.iter().enumerate() {
            for (j, &a) in row.iter().enumerate() {
                if !a.is_finite() {
                    return Err(ModelError::non_finite(format!(
                        "constraint_coefficients[{i}][{j}]"
                    )));
                }
                if a < 0.0 {
                    return Err(ModelError::invalid_input(
                        format!("constraint_coefficients[{i}][{j}]"),
                        ">= 0",
                        a,
                    ));
                }
            }
        }
        for (i, &b) in self.constraint_limits.iter().enumerate() {
            if !b.is_finite() {
                return Err(ModelError::non_finite(format!("constraint_limits[{i}]")));
            }
            if b < 0.0 {
                return Err(ModelError::invalid_input(
                    format!("constraint_limits[{i}]"),
                    ">= 0",
                    b,
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of a production-mix solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionResult {
    /// A profit-maximal plan exists.
    Optimal {
        /// Units of each product to produce (same order as the input).
        quantities: Vec<f64>,
        /// Profit of the plan.
        max_profit: f64,
    },
    /// No plan satisfies every constraint (or profit is uncapped, which is
    /// reported the same way).
    Infeasible,
}

impl ProductionResult {
    /// Whether a plan was found.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        matches!(self, Self::Optimal { .. })
    }

    /// Quantities of the plan, if one was found.
    #[must_use]
    pub fn quantities(&self) -> Option<&[f64]> {
        match self {
            Self::Optimal { quantities, .. } => Some(quantities),
            Self::Infeasible => None,
        }
    }

    /// Profit of the plan, if one was found.
    #[must_use]
    pub const fn max_profit(&self) -> Option<f64> {
        match self {
            Self::Optimal { max_profit, .. } => Some(*max_profit),
            Self::Infeasible => None,
        }
    }
}

/// Solve the production-mix program.
///
/// The same input yields the same plan on every call: pivoting follows
/// Bland's rule, so even tied optimal vertices resolve identically.
///
/// # Errors
///
/// Returns an input violation per [`ProductionInput::validate`], or
/// `ModelError::Solver` if the simplex pivot budget is exhausted (not
/// reachable for validated inputs of in-scope size).
pub fn solve(input: &ProductionInput) -> ModelResult<ProductionResult> {
    input.validate()?;

    let objective: Vec<f64> = input.profits.iter().map(|p| -p).collect();
    let program = LinearProgram::new(
        objective,
        input.constraint_coefficients.clone(),
        input.constraint_limits.clone(),
    );

    match program.solve()? {
        SimplexOutcome::Optimal { point, objective } => Ok(ProductionResult::Optimal {
            quantities: point,
            max_profit: -objective,
        }),
        SimplexOutcome::Infeasible | SimplexOutcome::Unbounded => Ok(ProductionResult::Infeasible),
    }
}

/// Chart geometry for two-product programs.
///
/// Returns one boundary curve per constraint that can be written as
/// `y(x)` (positive coefficient on the second product), followed by the
/// feasible-frontier envelope (the largest feasible `y` at each `x`,
/// floored at 0). The x-range runs from 0 to the largest x-intercept of
/// the constraints; `samples` points are spaced evenly across it,
/// endpoints included.
///
/// # Errors
///
/// `DimensionMismatch` unless the input has exactly two products,
/// `InvalidInput` if `samples < 2` or the coefficient matrix is all
/// zeros (the region is unbounded and has no chartable frontier), plus
/// anything [`ProductionInput::validate`] reports.
pub fn constraint_frontier(input: &ProductionInput, samples: usize) -> ModelResult<Vec<Curve>> {
    input.validate()?;
    if input.n_products() != 2 {
        return Err(ModelError::dimension_mismatch(
            "constraint chart products",
            2,
            input.n_products(),
        ));
    }
    if samples < 2 {
        return Err(ModelError::invalid_input(
            "samples",
            ">= 2",
            samples as f64,
        ));
    }

    // Widest x-intercept among constraints that bound x; fall back to the
    // y-intercept scale when none does.
    let x_intercept = |row: &[f64], limit: f64| -> Option<f64> {
        (row[0] > COEFFICIENT_EPSILON).then(|| limit / row[0])
    };
    let y_intercept = |row: &[f64], limit: f64| -> Option<f64> {
        (row[1] > COEFFICIENT_EPSILON).then(|| limit / row[1])
    };
    let intercept_max = |f: &dyn Fn(&[f64], f64) -> Option<f64>| {
        input
            .constraint_coefficients
            .iter()
            .zip(input.constraint_limits.iter())
            .filter_map(|(row, &b)| f(row, b))
            .fold(None, |acc: Option<f64>, v| {
                Some(acc.map_or(v, |a| a.max(v)))
            })
    };
    let x_max = match intercept_max(&x_intercept).or_else(|| intercept_max(&y_intercept)) {
        Some(x) => x,
        None => {
            return Err(ModelError::invalid_input(
                "constraint_coefficients",
                "at least one nonzero coefficient",
                0.0,
            ))
        }
    };

    let step = x_max / (samples - 1) as f64;
    let mut curves = Vec::with_capacity(input.n_constraints() + 1);

    for (i, (row, &limit)) in input
        .constraint_coefficients
        .iter()
        .zip(input.constraint_limits.iter())
        .enumerate()
    {
        if row[1] <= COEFFICIENT_EPSILON {
            continue;
        }
        let mut curve = Curve::with_capacity(format!("constraint {}", i + 1), samples);
        for s in 0..samples {
            let x = step * s as f64;
            let y = ((limit - row[0] * x) / row[1]).max(0.0);
            curve.push(x, y);
        }
        curves.push(curve);
    }

    let mut frontier = Curve::with_capacity("feasible frontier", samples);
    for s in 0..samples {
        let x = step * s as f64;
        let mut y = f64::INFINITY;
        for (row, &limit) in input
            .constraint_coefficients
            .iter()
            .zip(input.constraint_limits.iter())
        {
            if row[1] > COEFFICIENT_EPSILON {
                y = y.min((limit - row[0] * x) / row[1]);
            } else if row[0] * x > limit + COEFFICIENT_EPSILON {
                // A vertical constraint excludes this x entirely.
                y = 0.0;
            }
        }
        if !y.is_finite() {
            // No constraint caps y here; the frontier is only drawn where
            // the region is bounded.
            y = 0.0;
        }
        frontier.push(x, y.max(0.0));
    }
    curves.push(frontier);

    Ok(curves)
}
