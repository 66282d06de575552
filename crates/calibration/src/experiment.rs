use hyperfit_materials::DeformationMode;
use thiserror::Error;

/// An experimental stress–strain curve and the mode it was measured in.
///
/// Strain is true (logarithmic) strain and stress is true (Cauchy) stress.
/// The first sample is the reference state and is not used for fitting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Test {
    mode: DeformationMode,
    strain: Vec<f64>,
    stress: Vec<f64>,
}

/// Errors that can occur when constructing a [`Test`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TestError {
    #[error("strain has {strain} samples but stress has {stress}")]
    LengthMismatch { strain: usize, stress: usize },

    #[error("a test needs at least 2 samples, found {found}")]
    TooShort { found: usize },

    #[error("sample {index} is not finite")]
    NotFinite { index: usize },
}

impl Test {
    /// Creates a validated test.
    ///
    /// # Errors
    ///
    /// Returns an error if the curves differ in length, have fewer than two
    /// samples, or contain non-finite values.
    pub fn new(
        mode: DeformationMode,
        strain: Vec<f64>,
        stress: Vec<f64>,
    ) -> Result<Self, TestError> {
        if strain.len() != stress.len() {
            return Err(TestError::LengthMismatch {
                strain: strain.len(),
                stress: stress.len(),
            });
        }
        if strain.len() < 2 {
            return Err(TestError::TooShort {
                found: strain.len(),
            });
        }
        if let Some(index) = strain
            .iter()
            .zip(&stress)
            .position(|(e, s)| !e.is_finite() || !s.is_finite())
        {
            return Err(TestError::NotFinite { index });
        }

        Ok(Self {
            mode,
            strain,
            stress,
        })
    }

    #[must_use]
    pub fn mode(&self) -> DeformationMode {
        self.mode
    }

    #[must_use]
    pub fn strain(&self) -> &[f64] {
        &self.strain
    }

    #[must_use]
    pub fn stress(&self) -> &[f64] {
        &self.stress
    }

    /// Returns the number of samples, including the reference state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strain.len()
    }

    /// Always `false`; a test holds at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }
}
