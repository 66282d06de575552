use std::sync::Arc;

use thiserror::Error;

/// An inequality constraint `lower <= g(x) <= upper` on the solver variables.
///
/// Implementations report how far `x` is from satisfying the constraint.
/// Solvers only compare violations, so any non-negative measure that is zero
/// exactly on the feasible set works.
pub trait Constraint: Send + Sync {
    /// Returns the total violation at `x`, zero when `x` is feasible.
    fn violation(&self, x: &[f64]) -> f64;

    /// Returns the number of solver variables the constraint is written
    /// for, or `None` if it accepts any.
    fn dims(&self) -> Option<usize> {
        None
    }
}

impl<C: Constraint + ?Sized> Constraint for Arc<C> {
    fn violation(&self, x: &[f64]) -> f64 {
        (**self).violation(x)
    }

    fn dims(&self) -> Option<usize> {
        (**self).dims()
    }
}

/// Errors that can occur when constructing a constraint.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    #[error("constraint has {rows} rows but {limits} limits")]
    LimitCount { rows: usize, limits: usize },

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("lower limit {lower} exceeds upper limit {upper} at row {row}")]
    Inverted { row: usize, lower: f64, upper: f64 },
}

/// Sum of the amounts by which each value lies outside its limits.
fn interval_violation(values: &[f64], lower: &[f64], upper: &[f64]) -> f64 {
    values
        .iter()
        .zip(lower.iter().zip(upper))
        .map(|(&v, (&lo, &hi))| {
            if v.is_nan() {
                f64::INFINITY
            } else {
                (lo - v).max(0.0) + (v - hi).max(0.0)
            }
        })
        .sum()
}

fn check_limits(lower: &[f64], upper: &[f64], rows: usize) -> Result<(), ConstraintError> {
    if lower.len() != rows || upper.len() != rows {
        return Err(ConstraintError::LimitCount {
            rows,
            limits: lower.len().min(upper.len()),
        });
    }
    for (row, (&lo, &hi)) in lower.iter().zip(upper).enumerate() {
        if lo > hi {
            return Err(ConstraintError::Inverted {
                row,
                lower: lo,
                upper: hi,
            });
        }
    }
    Ok(())
}

/// A linear constraint `lower <= A·x <= upper`.
///
/// Use `f64::NEG_INFINITY` or `f64::INFINITY` for one-sided rows.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    matrix: Vec<Vec<f64>>,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl LinearConstraint {
    /// Creates a linear constraint from the rows of `A` and its limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the rows differ in length, the number of limits
    /// does not match the number of rows, or a lower limit exceeds its upper.
    pub fn new(
        matrix: Vec<Vec<f64>>,
        lower: Vec<f64>,
        upper: Vec<f64>,
    ) -> Result<Self, ConstraintError> {
        let expected = matrix.first().map_or(0, Vec::len);
        if let Some((row, found)) = matrix
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != expected)
        {
            return Err(ConstraintError::RaggedMatrix {
                row,
                expected,
                found,
            });
        }
        check_limits(&lower, &upper, matrix.len())?;
        Ok(Self {
            matrix,
            lower,
            upper,
        })
    }

    /// Returns `A·x`.
    #[must_use]
    pub fn apply(&self, x: &[f64]) -> Vec<f64> {
        self.matrix
            .iter()
            .map(|row| row.iter().zip(x).map(|(a, v)| a * v).sum())
            .collect()
    }
}

impl Constraint for LinearConstraint {
    fn violation(&self, x: &[f64]) -> f64 {
        interval_violation(&self.apply(x), &self.lower, &self.upper)
    }

    /// The column count of `A`, or `None` for a constraint without rows.
    fn dims(&self) -> Option<usize> {
        self.matrix.first().map(Vec::len)
    }
}

/// A nonlinear constraint `lower <= g(x) <= upper`.
pub struct NonlinearConstraint<F> {
    function: F,
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl<F> NonlinearConstraint<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    /// Creates a nonlinear constraint with one limit pair per output of `g`.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits differ in length or are inverted.
    pub fn new(function: F, lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, ConstraintError> {
        check_limits(&lower, &upper, lower.len())?;
        Ok(Self {
            function,
            lower,
            upper,
        })
    }
}

impl<F> Constraint for NonlinearConstraint<F>
where
    F: Fn(&[f64]) -> Vec<f64> + Send + Sync,
{
    fn violation(&self, x: &[f64]) -> f64 {
        let values = (self.function)(x);
        if values.len() != self.lower.len() {
            return f64::INFINITY;
        }
        interval_violation(&values, &self.lower, &self.upper)
    }
}

impl<F> std::fmt::Debug for NonlinearConstraint<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonlinearConstraint")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn linear_constraint_measures_distance_outside_limits() {
        // 0 <= x0 + x1 <= 1
        let constraint = LinearConstraint::new(vec![vec![1.0, 1.0]], vec![0.0], vec![1.0]).unwrap();

        assert_relative_eq!(constraint.violation(&[0.25, 0.25]), 0.0);
        assert_relative_eq!(constraint.violation(&[1.0, 1.5]), 1.5);
        assert_relative_eq!(constraint.violation(&[-1.0, 0.5]), 0.5);
    }

    #[test]
    fn one_sided_rows_use_infinite_limits() {
        // x0 - x1 >= 0
        let constraint =
            LinearConstraint::new(vec![vec![1.0, -1.0]], vec![0.0], vec![f64::INFINITY]).unwrap();

        assert_relative_eq!(constraint.violation(&[5.0, 1.0]), 0.0);
        assert_relative_eq!(constraint.violation(&[1.0, 3.0]), 2.0);
    }

    #[test]
    fn ragged_matrix_is_rejected() {
        let result = LinearConstraint::new(
            vec![vec![1.0, 1.0], vec![1.0]],
            vec![0.0, 0.0],
            vec![1.0, 1.0],
        );
        assert!(matches!(
            result,
            Err(ConstraintError::RaggedMatrix { row: 1, .. })
        ));
    }

    #[test]
    fn nonlinear_constraint_evaluates_function() {
        // Unit disk: x0² + x1² <= 1
        let constraint = NonlinearConstraint::new(
            |x: &[f64]| vec![x[0] * x[0] + x[1] * x[1]],
            vec![f64::NEG_INFINITY],
            vec![1.0],
        )
        .unwrap();

        assert_relative_eq!(constraint.violation(&[0.5, 0.5]), 0.0);
        assert_relative_eq!(constraint.violation(&[2.0, 0.0]), 3.0);
    }

    #[test]
    fn linear_constraints_declare_their_width() {
        let constraint =
            LinearConstraint::new(vec![vec![1.0, 10.0]], vec![f64::NEG_INFINITY], vec![0.5])
                .unwrap();
        let shared: Arc<dyn Constraint> = Arc::new(constraint.clone());
        let unit = NonlinearConstraint::new(|x: &[f64]| vec![x[0]], vec![0.0], vec![1.0]).unwrap();

        assert_eq!(constraint.dims(), Some(2));
        assert_eq!(shared.dims(), Some(2));
        assert_eq!(unit.dims(), None);
        assert_eq!(
            LinearConstraint::new(Vec::new(), Vec::new(), Vec::new())
                .unwrap()
                .dims(),
            None
        );
    }

    #[test]
    fn shared_constraints_report_the_same_violation() {
        let shared: Arc<dyn Constraint> =
            Arc::new(LinearConstraint::new(vec![vec![1.0]], vec![0.0], vec![1.0]).unwrap());
        let boxed: Box<dyn Constraint> = Box::new(Arc::clone(&shared));

        assert_relative_eq!(boxed.violation(&[3.0]), 2.0);
        assert_relative_eq!(shared.violation(&[3.0]), 2.0);
    }

    #[test]
    fn nonlinear_constraint_with_nan_output_is_infinitely_violated() {
        let constraint =
            NonlinearConstraint::new(|x: &[f64]| vec![x[0].ln()], vec![0.0], vec![1.0]).unwrap();

        assert!(constraint.violation(&[-1.0]).is_infinite());
    }
}
