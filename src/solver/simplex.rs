//! Dense two-phase simplex for bounded linear programs.
//!
//! Solves the standard form
//!
//! ```text
//! minimize    c · x
//! subject to  A · x <= b
//!             x >= 0
//! ```
//!
//! with no restriction on the sign of `b` or `c`. Rows with a negative
//! right-hand side get an artificial variable and a phase-one solve drives
//! the artificials to zero (or certifies infeasibility). Pivot selection is
//! Bland's rule throughout: the entering column is the lowest-index column
//! with a negative reduced cost, the leaving row is the minimum-ratio row
//! with the lowest-index basic variable among ties. That makes the solve
//! deterministic (the same vertex is returned for the same program on every
//! call, ties included) and excludes cycling on degenerate vertices.
//!
//! # Example
//!
//! ```rust
//! use modelar::solver::{LinearProgram, SimplexOutcome};
//!
//! // minimize -(3x + 2y) subject to x + y <= 4
//! let program = LinearProgram::new(
//!     vec![-3.0, -2.0],
//!     vec![vec![1.0, 1.0]],
//!     vec![4.0],
//! );
//!
//! match program.solve().unwrap() {
//!     SimplexOutcome::Optimal { point, objective } => {
//!         assert!((point[0] - 4.0).abs() < 1e-9);
//!         assert!((objective + 12.0).abs() < 1e-9);
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Coefficients below this magnitude are treated as zero during pivoting.
const PIVOT_EPSILON: f64 = 1e-9;

/// Residual phase-one objective above this certifies infeasibility.
const FEASIBILITY_TOLERANCE: f64 = 1e-7;

/// Pivot budget per tableau dimension (JPL Rule 2: all loops bounded).
/// Bland's rule terminates in finitely many pivots; the budget only guards
/// against floating-point pathologies.
const PIVOT_BUDGET_FACTOR: usize = 64;

/// A bounded linear program in `minimize c·x, A·x <= b, x >= 0` form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearProgram {
    /// Objective coefficients (length n, minimization sense).
    pub objective: Vec<f64>,
    /// Constraint coefficient rows (m rows, each of length n).
    pub constraints: Vec<Vec<f64>>,
    /// Constraint right-hand sides (length m).
    pub limits: Vec<f64>,
}

/// Outcome of a simplex solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimplexOutcome {
    /// A finite optimum exists.
    Optimal {
        /// Optimal point (length n, all components >= 0).
        point: Vec<f64>,
        /// Objective value at the point (minimization sense).
        objective: f64,
    },
    /// No point satisfies all constraints together with `x >= 0`.
    Infeasible,
    /// The objective decreases without bound over the feasible set.
    Unbounded,
}

impl LinearProgram {
    /// Create a program from its objective, constraint matrix, and limits.
    #[must_use]
    pub const fn new(objective: Vec<f64>, constraints: Vec<Vec<f64>>, limits: Vec<f64>) -> Self {
        Self {
            objective,
            constraints,
            limits,
        }
    }

    /// Number of decision variables.
    #[must_use]
    pub fn n_variables(&self) -> usize {
        self.objective.len()
    }

    /// Number of inequality constraints.
    #[must_use]
    pub fn n_constraints(&self) -> usize {
        self.limits.len()
    }

    /// Solve the program with the two-phase simplex method.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Solver` if the program shape is inconsistent
    /// (row lengths disagreeing with the objective, limits disagreeing with
    /// the row count) or if the pivot budget is exhausted.
    pub fn solve(&self) -> ModelResult<SimplexOutcome> {
        self.check_shape()?;

        let mut tableau = Tableau::build(self);

        if tableau.n_artificials > 0 {
            match tableau.run_phase_one()? {
                PhaseOneOutcome::Feasible => {}
                PhaseOneOutcome::Infeasible => return Ok(SimplexOutcome::Infeasible),
            }
        }

        tableau.load_objective(&self.objective);
        match tableau.pivot_until_optimal()? {
            PivotLoopEnd::Optimal => Ok(SimplexOutcome::Optimal {
                point: tableau.extract_point(self.n_variables()),
                objective: tableau.objective_value(),
            }),
            PivotLoopEnd::Unbounded => Ok(SimplexOutcome::Unbounded),
        }
    }

    fn check_shape(&self) -> ModelResult<()> {
        let n = self.objective.len();
        let m = self.constraints.len();
        if n == 0 {
            return Err(ModelError::solver("program has no variables"));
        }
        if m == 0 {
            return Err(ModelError::solver("program has no constraints"));
        }
        if self.limits.len() != m {
            return Err(ModelError::solver(format!(
                "limit count {} does not match constraint count {m}",
                self.limits.len()
            )));
        }
        for (i, row) in self.constraints.iter().enumerate() {
            if row.len() != n {
                return Err(ModelError::solver(format!(
                    "constraint row {i} has length {} for {n} variables",
                    row.len()
                )));
            }
        }
        Ok(())
    }
}

/// End state of a pivot loop.
enum PivotLoopEnd {
    Optimal,
    Unbounded,
}

/// End state of phase one.
enum PhaseOneOutcome {
    Feasible,
    Infeasible,
}

/// Dense simplex tableau.
///
/// Column layout: `n_structural` decision variables, then one slack per
/// constraint row, then (during phase one only) the artificial variables.
/// The right-hand side and the reduced-cost row are stored separately so
/// that the artificial columns can be truncated after phase one.
struct Tableau {
    /// Coefficient rows (one per constraint).
    rows: Vec<Vec<f64>>,
    /// Right-hand side per row (kept non-negative).
    rhs: Vec<f64>,
    /// Reduced-cost row for the active phase.
    cost: Vec<f64>,
    /// Negated objective value of the active phase.
    cost_rhs: f64,
    /// Basic column of each row.
    basis: Vec<usize>,
    /// Number of decision-variable columns.
    n_structural: usize,
    /// Decision + slack columns (everything that survives phase one).
    n_real: usize,
    /// Artificial columns appended after the real ones.
    n_artificials: usize,
}

impl Tableau {
    /// Assemble the initial tableau.
    ///
    /// Rows with a negative right-hand side are negated so that `rhs >= 0`
    /// holds everywhere; such rows lose their slack as a starting basis
    /// (its coefficient flips to -1) and receive an artificial instead.
    fn build(program: &LinearProgram) -> Self {
        let n = program.n_variables();
        let m = program.n_constraints();
        let n_real = n + m;

        let negated: Vec<bool> = program.limits.iter().map(|&b| b < 0.0).collect();
        let n_artificials = negated.iter().filter(|&&neg| neg).count();

        let width = n_real + n_artificials;
        let mut rows = vec![vec![0.0; width]; m];
        let mut rhs = vec![0.0; m];
        let mut basis = vec![0; m];

        let mut next_artificial = n_real;
        for i in 0..m {
            let sign = if negated[i] { -1.0 } else { 1.0 };
            for j in 0..n {
                rows[i][j] = sign * program.constraints[i][j];
            }
            rows[i][n + i] = sign;
            rhs[i] = sign * program.limits[i];

            if negated[i] {
                rows[i][next_artificial] = 1.0;
                basis[i] = next_artificial;
                next_artificial += 1;
            } else {
                basis[i] = n + i;
            }
        }

        Self {
            rows,
            rhs,
            cost: vec![0.0; width],
            cost_rhs: 0.0,
            basis,
            n_structural: n,
            n_real,
            n_artificials,
        }
    }

    /// Total number of columns currently in the tableau.
    fn width(&self) -> usize {
        self.n_real + self.n_artificials
    }

    /// Minimize the sum of artificial variables, then eliminate them.
    fn run_phase_one(&mut self) -> ModelResult<PhaseOneOutcome> {
        // Phase-one cost: 1 on each artificial, reduced against the basis.
        self.cost = vec![0.0; self.width()];
        self.cost_rhs = 0.0;
        for j in self.n_real..self.width() {
            self.cost[j] = 1.0;
        }
        for i in 0..self.rows.len() {
            if self.basis[i] >= self.n_real {
                for j in 0..self.width() {
                    self.cost[j] -= self.rows[i][j];
                }
                self.cost_rhs -= self.rhs[i];
            }
        }

        match self.pivot_until_optimal()? {
            PivotLoopEnd::Optimal => {}
            PivotLoopEnd::Unbounded => {
                // The phase-one objective is bounded below by zero.
                return Err(ModelError::solver("phase one reported unbounded"));
            }
        }

        if self.objective_value() > FEASIBILITY_TOLERANCE {
            return Ok(PhaseOneOutcome::Infeasible);
        }

        self.evict_basic_artificials();
        for row in &mut self.rows {
            row.truncate(self.n_real);
        }
        self.n_artificials = 0;
        Ok(PhaseOneOutcome::Feasible)
    }

    /// Pivot out artificials that stayed basic at zero level; rows where no
    /// real column can serve as a pivot are redundant and dropped.
    fn evict_basic_artificials(&mut self) {
        let mut i = 0;
        while i < self.rows.len() {
            if self.basis[i] < self.n_real {
                i += 1;
                continue;
            }
            let pivot_col =
                (0..self.n_real).find(|&j| self.rows[i][j].abs() > PIVOT_EPSILON);
            match pivot_col {
                Some(col) => {
                    self.pivot(i, col);
                    i += 1;
                }
                None => {
                    self.rows.remove(i);
                    self.rhs.remove(i);
                    self.basis.remove(i);
                }
            }
        }
    }

    /// Install the phase-two objective, reduced against the current basis.
    fn load_objective(&mut self, objective: &[f64]) {
        self.cost = vec![0.0; self.width()];
        self.cost_rhs = 0.0;
        self.cost[..self.n_structural].copy_from_slice(objective);
        for i in 0..self.rows.len() {
            let basic_cost = self.cost[self.basis[i]];
            if basic_cost.abs() > 0.0 {
                for j in 0..self.width() {
                    self.cost[j] -= basic_cost * self.rows[i][j];
                }
                self.cost_rhs -= basic_cost * self.rhs[i];
            }
        }
    }

    /// Run Bland-rule pivots until optimality or unboundedness.
    fn pivot_until_optimal(&mut self) -> ModelResult<PivotLoopEnd> {
        let max_pivots = PIVOT_BUDGET_FACTOR * (self.rows.len() + self.width() + 1);
        for _ in 0..max_pivots {
            let Some(entering) = self.entering_column() else {
                return Ok(PivotLoopEnd::Optimal);
            };
            let Some(leaving) = self.leaving_row(entering) else {
                return Ok(PivotLoopEnd::Unbounded);
            };
            self.pivot(leaving, entering);
        }
        Err(ModelError::solver(
            "pivot budget exhausted without convergence",
        ))
    }

    /// Bland's rule: lowest-index real column with a negative reduced cost.
    /// Artificial columns never re-enter the basis.
    fn entering_column(&self) -> Option<usize> {
        (0..self.n_real).find(|&j| self.cost[j] < -PIVOT_EPSILON)
    }

    /// Minimum-ratio row for the entering column; among ratio ties the row
    /// whose basic variable has the lowest index wins (Bland's rule).
    /// `None` means the column is unbounded.
    fn leaving_row(&self, entering: usize) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for i in 0..self.rows.len() {
            let coefficient = self.rows[i][entering];
            if coefficient <= PIVOT_EPSILON {
                continue;
            }
            // Round-off can leave a basic value at -1e-16; a negative ratio
            // would pivot outside the feasible region.
            let ratio = (self.rhs[i] / coefficient).max(0.0);
            match best {
                None => best = Some((i, ratio)),
                Some((best_row, best_ratio)) => {
                    if ratio < best_ratio - PIVOT_EPSILON
                        || ((ratio - best_ratio).abs() <= PIVOT_EPSILON
                            && self.basis[i] < self.basis[best_row])
                    {
                        best = Some((i, ratio));
                    }
                }
            }
        }
        best.map(|(row, _)| row)
    }

    /// Gauss-Jordan pivot on (`row`, `col`), updating the cost row in step.
    fn pivot(&mut self, row: usize, col: usize) {
        let pivot_value = self.rows[row][col];
        for value in &mut self.rows[row] {
            *value /= pivot_value;
        }
        self.rhs[row] /= pivot_value;

        for i in 0..self.rows.len() {
            if i == row {
                continue;
            }
            let factor = self.rows[i][col];
            if factor.abs() <= f64::EPSILON {
                continue;
            }
            for j in 0..self.width() {
                self.rows[i][j] -= factor * self.rows[row][j];
            }
            self.rhs[i] -= factor * self.rhs[row];
        }

        let cost_factor = self.cost[col];
        if cost_factor.abs() > f64::EPSILON {
            for j in 0..self.width() {
                self.cost[j] -= cost_factor * self.rows[row][j];
            }
            self.cost_rhs -= cost_factor * self.rhs[row];
        }

        self.basis[row] = col;
    }

    /// Objective value of the active phase at the current basis.
    fn objective_value(&self) -> f64 {
        -self.cost_rhs
    }

    /// Read the decision variables out of the basis. Basic values carry
    /// round-off of order `f64::EPSILON`; tiny negatives are floored at 0.
    fn extract_point(&self, n_variables: usize) -> Vec<f64> {
        let mut point = vec![0.0; n_variables];
        for (i, &basic) in self.basis.iter().enumerate() {
            if basic < n_variables {
                point[basic] = self.rhs[i].max(0.0);
            }
        }
        point
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Falsification: with non-negative limits the origin is feasible,
        /// so a maximization of non-negative profits never reports
        /// infeasible, and any optimum satisfies every constraint.
        #[test]
        fn prop_nonneg_limits_never_infeasible(
            profits in prop::collection::vec(0.0f64..100.0, 1..4),
            limits in prop::collection::vec(0.0f64..100.0, 1..4),
            seed_coeffs in prop::collection::vec(0.0f64..10.0, 16),
        ) {
            let n = profits.len();
            let m = limits.len();
            let constraints: Vec<Vec<f64>> = (0..m)
                .map(|i| (0..n).map(|j| seed_coeffs[(i * n + j) % 16]).collect())
                .collect();
            let objective: Vec<f64> = profits.iter().map(|p| -p).collect();
            let program = LinearProgram::new(objective, constraints.clone(), limits.clone());

            match program.solve().expect("solve") {
                SimplexOutcome::Optimal { point, objective } => {
                    for (row, &limit) in constraints.iter().zip(limits.iter()) {
                        let lhs: f64 = row.iter().zip(point.iter()).map(|(a, x)| a * x).sum();
                        prop_assert!(lhs <= limit + 1e-6);
                    }
                    for &x in &point {
                        prop_assert!(x >= 0.0);
                    }
                    // The origin scores zero, so the minimum is at most zero.
                    prop_assert!(objective <= 1e-9);
                }
                SimplexOutcome::Unbounded => {
                    // Possible when some profitable variable has an all-zero
                    // column; still a legitimate outcome.
                }
                SimplexOutcome::Infeasible => {
                    prop_assert!(false, "origin was feasible");
                }
            }
        }

        /// Falsification: repeated solves return the identical outcome.
        #[test]
        fn prop_solve_deterministic(
            profits in prop::collection::vec(0.0f64..50.0, 1..3),
            limits in prop::collection::vec(0.0f64..50.0, 1..3),
            coeff in 0.0f64..5.0,
        ) {
            let n = profits.len();
            let constraints: Vec<Vec<f64>> =
                limits.iter().map(|_| vec![coeff; n]).collect();
            let objective: Vec<f64> = profits.iter().map(|p| -p).collect();
            let program = LinearProgram::new(objective, constraints, limits);

            let first = program.solve().expect("solve");
            let second = program.solve().expect("solve");
            prop_assert_eq!(first, second);
        }
    }
}
