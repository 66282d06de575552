use thiserror::Error;

use super::{Bounds, Constraint};

/// The feasible region searched by a solver.
///
/// A domain is a set of [`Bounds`] that every candidate is clipped into, plus
/// any number of inequality [`Constraint`]s. Constraints are not enforced
/// by clipping. Solvers rank candidates by their total violation instead.
pub struct Domain {
    bounds: Bounds,
    constraints: Vec<Box<dyn Constraint>>,
}

/// Errors that can occur when a point does not fit a [`Domain`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("point has {found} entries, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("entry {index} of the point is not finite")]
    NotFinite { index: usize },

    #[error("global search requires finite bounds")]
    UnboundedSearch,
}

impl Domain {
    /// Creates an unconstrained domain with the given bounds.
    #[must_use]
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            constraints: Vec::new(),
        }
    }

    /// Creates an unconstrained, unbounded domain of `dims` dimensions.
    #[must_use]
    pub fn unbounded(dims: usize) -> Self {
        Self::new(Bounds::unbounded(dims))
    }

    /// Adds a constraint to the domain.
    #[must_use]
    pub fn with_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Adds an already boxed constraint to the domain.
    pub fn push_constraint(&mut self, constraint: Box<dyn Constraint>) {
        self.constraints.push(constraint);
    }

    /// Returns the domain bounds.
    #[must_use]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Returns the number of solver variables.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.bounds.dims()
    }

    /// Returns the number of inequality constraints.
    #[must_use]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Returns the total constraint violation at `x`.
    ///
    /// A NaN violation is reported as `+∞`.
    #[must_use]
    pub fn violation(&self, x: &[f64]) -> f64 {
        let total: f64 = self.constraints.iter().map(|c| c.violation(x)).sum();
        if total.is_nan() { f64::INFINITY } else { total }
    }

    /// Returns `true` if the domain may be what holds a search at `x`:
    /// `x` lies on a bound or the domain has constraints.
    pub(crate) fn restricts(&self, x: &[f64]) -> bool {
        !self.constraints.is_empty() || self.bounds.touches(x)
    }

    /// Clips `x` into the domain bounds in place.
    pub fn clip(&self, x: &mut [f64]) {
        self.bounds.clip(x);
    }

    /// Checks that `x` has the domain's dimension and finite entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the length differs from [`Domain::dims`] or any
    /// entry is NaN or infinite.
    pub fn check_point(&self, x: &[f64]) -> Result<(), DomainError> {
        if x.len() != self.dims() {
            return Err(DomainError::DimensionMismatch {
                expected: self.dims(),
                found: x.len(),
            });
        }
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::NotFinite { index });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Domain")
            .field("bounds", &self.bounds)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}

impl From<Bounds> for Domain {
    fn from(bounds: Bounds) -> Self {
        Self::new(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::optimization::LinearConstraint;

    #[test]
    fn sums_violations_of_every_constraint() {
        let unit = |row: Vec<f64>| LinearConstraint::new(vec![row], vec![0.0], vec![1.0]).unwrap();
        let domain = Domain::unbounded(2)
            .with_constraint(unit(vec![1.0, 0.0]))
            .with_constraint(unit(vec![0.0, 1.0]));

        assert_eq!(domain.constraint_count(), 2);
        assert_relative_eq!(domain.violation(&[0.5, 0.5]), 0.0);
        assert_relative_eq!(domain.violation(&[2.0, -1.0]), 2.0);
    }

    #[test]
    fn check_point_rejects_wrong_length_and_non_finite() {
        let domain = Domain::unbounded(2);

        assert_eq!(
            domain.check_point(&[1.0]),
            Err(DomainError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            domain.check_point(&[1.0, f64::NAN]),
            Err(DomainError::NotFinite { index: 1 })
        );
        assert!(domain.check_point(&[1.0, 2.0]).is_ok());
    }
}
