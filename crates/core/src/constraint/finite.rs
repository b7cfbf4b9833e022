use crate::constraint::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that an `f64` is finite (neither infinite nor NaN).
///
/// Input amplitudes only need to be finite: zero and negative values are valid
/// scalings of a unit test signal.
///
/// ```
/// use lti_core::constraint::Finite;
///
/// assert!(Finite::new(-3.0).is_ok());
/// assert!(Finite::new(f64::INFINITY).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finite;

impl Finite {
    /// Constructs `Constrained<f64, Finite>` if the value is finite.
    ///
    /// # Errors
    ///
    /// - [`ConstraintError::NotANumber`] if the value is NaN.
    /// - [`ConstraintError::Infinite`] if the value is positive or negative infinity.
    pub fn new(value: f64) -> Result<Constrained<f64, Finite>, ConstraintError> {
        Constrained::<f64, Finite>::new(value)
    }
}

impl Constraint<f64> for Finite {
    fn check(value: &f64) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::Infinite)
        } else {
            Ok(())
        }
    }
}
