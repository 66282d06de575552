use thiserror::Error;

/// Box bounds `lower[i] <= x[i] <= upper[i]` on the solver variables.
///
/// Infinite limits are allowed, which lets local solvers work on unbounded
/// or half-bounded problems. Global solvers require every limit to be finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

/// Errors that can occur when constructing [`Bounds`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BoundsError {
    #[error("lower bound has {lower} entries but upper bound has {upper}")]
    LengthMismatch { lower: usize, upper: usize },

    #[error("bounds must have at least one dimension")]
    Empty,

    #[error("bound {index} is NaN")]
    NotANumber { index: usize },

    #[error("lower bound {lower} exceeds upper bound {upper} at index {index}")]
    Inverted { index: usize, lower: f64, upper: f64 },
}

impl Bounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits differ in length, are empty, contain
    /// NaN, or if any lower limit exceeds its upper limit.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, BoundsError> {
        if lower.len() != upper.len() {
            return Err(BoundsError::LengthMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(BoundsError::Empty);
        }
        for (index, (&lo, &hi)) in lower.iter().zip(&upper).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(BoundsError::NotANumber { index });
            }
            if lo > hi {
                return Err(BoundsError::Inverted {
                    index,
                    lower: lo,
                    upper: hi,
                });
            }
        }
        Ok(Self { lower, upper })
    }

    /// Creates bounds of `dims` dimensions with no finite limits.
    #[must_use]
    pub fn unbounded(dims: usize) -> Self {
        Self {
            lower: vec![f64::NEG_INFINITY; dims],
            upper: vec![f64::INFINITY; dims],
        }
    }

    /// Returns the number of solver variables.
    #[must_use]
    pub fn dims(&self) -> usize {
        self.lower.len()
    }

    /// Returns the lower limits.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Returns the upper limits.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns `true` if every limit is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lower.iter().chain(&self.upper).all(|v| v.is_finite())
    }

    /// Returns `true` if `x` lies within the bounds.
    #[must_use]
    pub fn contains(&self, x: &[f64]) -> bool {
        x.len() == self.dims()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(v, (lo, hi))| lo <= v && v <= hi)
    }

    /// Clips `x` into the bounds in place.
    pub fn clip(&self, x: &mut [f64]) {
        for (v, (&lo, &hi)) in x.iter_mut().zip(self.lower.iter().zip(&self.upper)) {
            *v = v.clamp(lo, hi);
        }
    }

    /// Returns `true` if any entry of `x` lies exactly on one of its limits.
    pub(crate) fn touches(&self, x: &[f64]) -> bool {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .any(|(v, (lo, hi))| v == lo || v == hi)
    }

    /// Maps a point of the unit hypercube onto the bounds.
    ///
    /// Only meaningful for finite bounds.
    pub(crate) fn scale(&self, unit: &[f64]) -> Vec<f64> {
        unit.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(u, (lo, hi))| lo + u * (hi - lo))
            .collect()
    }

    /// Maps a point within the bounds onto the unit hypercube.
    ///
    /// Degenerate dimensions (`lower == upper`) map to zero.
    pub(crate) fn unscale(&self, x: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(self.lower.iter().zip(&self.upper))
            .map(|(v, (lo, hi))| {
                let width = hi - lo;
                if width > 0.0 { (v - lo) / width } else { 0.0 }
            })
            .collect()
    }
}
