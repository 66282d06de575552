//! Normalized error measures between experimental and predicted curves.
//!
//! Every measure returns a percentage and is invariant under scaling both
//! curves by the same positive factor. Denominators are not guarded, so an
//! all-zero curve yields a non-finite error.

use thiserror::Error;

/// A scale-invariant error measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorMeasure {
    /// Normalized mean absolute difference, see [`nmad`].
    Nmad,

    /// Normalized root-mean-square difference, see [`nrms`].
    Nrms,

    /// Mean pointwise relative error, see [`re`].
    #[default]
    Re,
}

/// Errors that can occur when comparing two curves.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MeasureError {
    #[error("experimental curve has {experimental} samples but prediction has {predicted}")]
    LengthMismatch {
        experimental: usize,
        predicted: usize,
    },

    #[error("curves are empty")]
    Empty,
}

impl ErrorMeasure {
    /// Compares the experimental curve `x` with the prediction `p`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curves differ in length or are empty.
    pub fn evaluate(self, x: &[f64], p: &[f64]) -> Result<f64, MeasureError> {
        match self {
            Self::Nmad => nmad(x, p),
            Self::Nrms => nrms(x, p),
            Self::Re => re(x, p),
        }
    }
}

fn check(x: &[f64], p: &[f64]) -> Result<f64, MeasureError> {
    if x.len() != p.len() {
        return Err(MeasureError::LengthMismatch {
            experimental: x.len(),
            predicted: p.len(),
        });
    }
    if x.is_empty() {
        return Err(MeasureError::Empty);
    }
    #[allow(clippy::cast_precision_loss)]
    Ok(x.len() as f64)
}

/// `100 · mean|x − p| / max(mean|x|, mean|p|)`
///
/// # Errors
///
/// Returns an error if the curves differ in length or are empty.
pub fn nmad(x: &[f64], p: &[f64]) -> Result<f64, MeasureError> {
    let n = check(x, p)?;
    let mad = x.iter().zip(p).map(|(x, p)| (x - p).abs()).sum::<f64>() / n;
    let mean_x = x.iter().map(|v| v.abs()).sum::<f64>() / n;
    let mean_p = p.iter().map(|v| v.abs()).sum::<f64>() / n;

    Ok(100.0 * mad / mean_x.max(mean_p))
}

/// `100 · sqrt(mean (x − p)²) / sqrt(mean x²)`
///
/// # Errors
///
/// Returns an error if the curves differ in length or are empty.
pub fn nrms(x: &[f64], p: &[f64]) -> Result<f64, MeasureError> {
    let n = check(x, p)?;
    let rms = (x.iter().zip(p).map(|(x, p)| (x - p).powi(2)).sum::<f64>() / n).sqrt();
    let scale = (x.iter().map(|v| v * v).sum::<f64>() / n).sqrt();

    Ok(100.0 * rms / scale)
}

/// `100 · mean(|x − p| / max(|x|, |p|))`
///
/// # Errors
///
/// Returns an error if the curves differ in length or are empty.
pub fn re(x: &[f64], p: &[f64]) -> Result<f64, MeasureError> {
    let n = check(x, p)?;
    let total: f64 = x
        .iter()
        .zip(p)
        .map(|(x, p)| (x - p).abs() / x.abs().max(p.abs()))
        .sum();

    Ok(100.0 * total / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    const ALL: [ErrorMeasure; 3] = [ErrorMeasure::Nmad, ErrorMeasure::Nrms, ErrorMeasure::Re];

    #[test]
    fn proportional_prediction() {
        let x = [0.1, 0.2, 0.3];
        let p = [0.15, 0.30, 0.45];

        assert_relative_eq!(nmad(&x, &p).unwrap(), 100.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(nrms(&x, &p).unwrap(), 50.0, max_relative = 1e-12);
        assert_relative_eq!(re(&x, &p).unwrap(), 100.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn measures_weigh_outliers_differently() {
        let x = [0.1, 0.2, 0.3];
        let p = [0.11, 0.21, 0.6];

        assert_relative_eq!(nmad(&x, &p).unwrap(), 34.782_608_696, max_relative = 1e-9);
        assert_relative_eq!(nrms(&x, &p).unwrap(), 80.267_410_216, max_relative = 1e-9);
        assert_relative_eq!(re(&x, &p).unwrap(), 21.284_271_284, max_relative = 1e-9);

        let x = [0.01, 0.2, 3.0];
        let p = [0.02, 0.22, 3.3];

        assert_relative_eq!(nmad(&x, &p).unwrap(), 9.322_033_898, max_relative = 1e-9);
        assert_relative_eq!(nrms(&x, &p).unwrap(), 10.005_474_105, max_relative = 1e-9);
        assert_relative_eq!(re(&x, &p).unwrap(), 22.727_272_727, max_relative = 1e-9);
    }

    #[test]
    fn identical_curves_have_zero_error() {
        let x = [0.5, 2.0, 1e3, 4e6];
        for measure in ALL {
            assert_relative_eq!(measure.evaluate(&x, &x).unwrap(), 0.0);
        }
    }

    #[test]
    fn common_scaling_leaves_error_unchanged() {
        let x = [0.1, 0.25, 0.7, 1.3];
        let p = [0.12, 0.2, 0.75, 1.1];
        for scale in [1e-3, 7.5, 1e6] {
            let sx: Vec<f64> = x.iter().map(|v| v * scale).collect();
            let sp: Vec<f64> = p.iter().map(|v| v * scale).collect();
            for measure in ALL {
                assert_relative_eq!(
                    measure.evaluate(&sx, &sp).unwrap(),
                    measure.evaluate(&x, &p).unwrap(),
                    max_relative = 1e-12
                );
            }
        }
    }

    #[test]
    fn zero_curves_propagate_non_finite_values() {
        assert!(re(&[0.0], &[0.0]).unwrap().is_nan());
        assert!(nrms(&[0.0, 0.0], &[1.0, 1.0]).unwrap().is_infinite());
    }

    #[test]
    fn rejects_mismatched_or_empty_curves() {
        assert_eq!(
            ErrorMeasure::Re.evaluate(&[1.0, 2.0], &[1.0]),
            Err(MeasureError::LengthMismatch {
                experimental: 2,
                predicted: 1
            })
        );
        assert_eq!(nmad(&[], &[]), Err(MeasureError::Empty));
    }

    #[test]
    fn relative_error_is_the_default() {
        assert_eq!(ErrorMeasure::default(), ErrorMeasure::Re);
    }
}
