use lti_core::constraint::{Constrained, ConstraintError, Finite};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    parameters::InputDocument,
    transfer_function::{Polynomial, TransferFunction},
};

/// The family of a test input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Step,
    Impulse,
}

/// A unit step or unit impulse scaled by an amplitude.
///
/// The amplitude only has to be finite. Zero and negative amplitudes are
/// valid: by linearity they scale (or flip) the unit response.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "InputDocument")]
pub enum InputSpec {
    Step { amplitude: Constrained<f64, Finite> },
    Impulse { amplitude: Constrained<f64, Finite> },
}

impl InputSpec {
    /// Creates a step input of the given amplitude.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidInputError`] if the amplitude is not finite.
    pub fn step(amplitude: f64) -> Result<Self, InvalidInputError> {
        Self::new(InputKind::Step, amplitude)
    }

    /// Creates an impulse input of the given amplitude (area).
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidInputError`] if the amplitude is not finite.
    pub fn impulse(amplitude: f64) -> Result<Self, InvalidInputError> {
        Self::new(InputKind::Impulse, amplitude)
    }

    /// Creates an input of the given kind and amplitude.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidInputError`] if the amplitude is not finite.
    pub fn new(kind: InputKind, amplitude: f64) -> Result<Self, InvalidInputError> {
        let amplitude = Finite::new(amplitude).map_err(|source| InvalidInputError {
            amplitude,
            source,
        })?;
        Ok(match kind {
            InputKind::Step => Self::Step { amplitude },
            InputKind::Impulse => Self::Impulse { amplitude },
        })
    }

    #[must_use]
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Step { .. } => InputKind::Step,
            Self::Impulse { .. } => InputKind::Impulse,
        }
    }

    #[must_use]
    pub fn amplitude(&self) -> f64 {
        match self {
            Self::Step { amplitude } | Self::Impulse { amplitude } => amplitude.into_inner(),
        }
    }

    /// Re-checks that the amplitude is finite.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidInputError`] if the amplitude is NaN or infinite.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let amplitude = self.amplitude();
        Finite::new(amplitude)
            .map(|_| ())
            .map_err(|source| InvalidInputError { amplitude, source })
    }

    /// Returns `U(s)`: `A / s` for a step, `A` for an impulse.
    #[must_use]
    pub fn laplace(&self) -> TransferFunction {
        let numerator = Polynomial::new(vec![self.amplitude()]);
        let denominator = match self.kind() {
            InputKind::Step => Polynomial::new(vec![1.0, 0.0]),
            InputKind::Impulse => Polynomial::new(vec![1.0]),
        };
        TransferFunction::new(numerator, denominator)
    }

    /// Samples the literal test signal on a time grid.
    ///
    /// A step is zero at `t <= 0` and `amplitude` afterwards. An impulse is a
    /// single-sample spike: the first sample carries `amplitude` and every
    /// other sample is zero. The spike is only a visual stand-in for a Dirac
    /// impulse; it has no meaningful area on the grid.
    #[must_use]
    pub fn signal(&self, time: &[f64]) -> Vec<f64> {
        let amplitude = self.amplitude();
        match self.kind() {
            InputKind::Step => time
                .iter()
                .map(|&t| if t > 0.0 { amplitude } else { 0.0 })
                .collect(),
            InputKind::Impulse => (0..time.len())
                .map(|i| if i == 0 { amplitude } else { 0.0 })
                .collect(),
        }
    }
}

/// An input amplitude that is NaN or infinite.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid input amplitude {amplitude}: {source}")]
pub struct InvalidInputError {
    pub amplitude: f64,
    #[source]
    pub source: ConstraintError,
}
