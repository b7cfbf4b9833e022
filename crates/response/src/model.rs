use std::fmt;

use lti_core::constraint::{
    Constrained, Constraint, ConstraintError, Finite, NonNegative, StrictlyPositive,
};
use serde::Deserialize;
use thiserror::Error;
use uom::si::{
    angular_velocity::radian_per_second,
    f64::{AngularVelocity, Time},
    time::second,
};

use crate::{
    parameters::ModelDocument,
    transfer_function::{Polynomial, TransferFunction},
};

/// A first- or second-order LTI model.
///
/// Both families are fixed in structure:
///
/// ```text
/// first order:   G(s) = k / (tau s + 1)
/// second order:  G(s) = wn² / (s² + 2 zeta wn s + wn²)
/// ```
///
/// Parameters are validated on construction, so a `ModelSpec` always
/// describes a stable model with a well-defined response. Deserializing
/// goes through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "ModelDocument")]
pub enum ModelSpec {
    FirstOrder(FirstOrder),
    SecondOrder(SecondOrder),
}

impl ModelSpec {
    /// Creates a first-order model from a gain and a time constant in seconds.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidModelError`] if either value is not finite and
    /// strictly positive.
    pub fn first_order(k: f64, tau: f64) -> Result<Self, InvalidModelError> {
        FirstOrder::new(k, tau).map(Self::FirstOrder)
    }

    /// Creates a second-order model from a natural frequency in rad/s and a
    /// damping ratio.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidModelError`] if `wn` is not finite and strictly
    /// positive, or if `zeta` is not finite and non-negative.
    pub fn second_order(wn: f64, zeta: f64) -> Result<Self, InvalidModelError> {
        SecondOrder::new(wn, zeta).map(Self::SecondOrder)
    }

    /// Returns the model order, 1 or 2.
    #[must_use]
    pub fn order(&self) -> u8 {
        match self {
            Self::FirstOrder(_) => 1,
            Self::SecondOrder(_) => 2,
        }
    }

    /// Returns the steady-state gain `G(0)`.
    ///
    /// The second-order family has unity gain by construction.
    #[must_use]
    pub fn dc_gain(&self) -> f64 {
        match self {
            Self::FirstOrder(model) => model.gain(),
            Self::SecondOrder(_) => 1.0,
        }
    }

    /// Returns `G(s)` as numerator and denominator coefficients, highest power first.
    #[must_use]
    pub fn transfer_function(&self) -> TransferFunction {
        match self {
            Self::FirstOrder(model) => TransferFunction::new(
                Polynomial::new(vec![model.gain()]),
                Polynomial::new(vec![model.tau(), 1.0]),
            ),
            Self::SecondOrder(model) => {
                let wn = model.wn();
                let zeta = model.zeta();
                TransferFunction::new(
                    Polynomial::new(vec![wn * wn]),
                    Polynomial::new(vec![1.0, 2.0 * zeta * wn, wn * wn]),
                )
            }
        }
    }

    /// Re-checks every parameter invariant.
    ///
    /// Construction already enforces these, so this only fails if a value
    /// was somehow corrupted; sampling calls it before touching any formula.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvalidModelError`] found.
    pub fn validate(&self) -> Result<(), InvalidModelError> {
        match self {
            Self::FirstOrder(model) => {
                check::<StrictlyPositive>(Parameter::Gain, model.gain())?;
                check::<StrictlyPositive>(Parameter::TimeConstant, model.tau())?;
            }
            Self::SecondOrder(model) => {
                check::<StrictlyPositive>(Parameter::NaturalFrequency, model.wn())?;
                check::<NonNegative>(Parameter::DampingRatio, model.zeta())?;
            }
        }
        Ok(())
    }
}

impl From<FirstOrder> for ModelSpec {
    fn from(model: FirstOrder) -> Self {
        Self::FirstOrder(model)
    }
}

impl From<SecondOrder> for ModelSpec {
    fn from(model: SecondOrder) -> Self {
        Self::SecondOrder(model)
    }
}

/// First-order model `k / (tau s + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrder {
    gain: Constrained<f64, StrictlyPositive>,
    time_constant: Constrained<Time, StrictlyPositive>,
}

impl FirstOrder {
    /// Creates a model from a static gain and a time constant in seconds.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidModelError`] naming the offending parameter if
    /// either value is not finite and strictly positive.
    pub fn new(k: f64, tau: f64) -> Result<Self, InvalidModelError> {
        Ok(Self {
            gain: check::<StrictlyPositive>(Parameter::Gain, k)?,
            time_constant: positive_quantity(
                Parameter::TimeConstant,
                tau,
                Time::new::<second>,
            )?,
        })
    }

    /// Creates a model from a static gain and a `uom` time constant.
    ///
    /// # Errors
    ///
    /// See [`FirstOrder::new`].
    pub fn from_quantities(k: f64, tau: Time) -> Result<Self, InvalidModelError> {
        Self::new(k, tau.get::<second>())
    }

    /// Static gain `k`.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.gain.into_inner()
    }

    /// Time constant as a `uom` quantity.
    #[must_use]
    pub fn time_constant(&self) -> Time {
        self.time_constant.into_inner()
    }

    /// Time constant `tau` in seconds.
    #[must_use]
    pub fn tau(&self) -> f64 {
        self.time_constant().get::<second>()
    }
}

/// Second-order model `wn² / (s² + 2 zeta wn s + wn²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrder {
    natural_frequency: Constrained<AngularVelocity, StrictlyPositive>,
    damping_ratio: Constrained<f64, NonNegative>,
}

impl SecondOrder {
    /// Creates a model from a natural frequency in rad/s and a damping ratio.
    ///
    /// # Errors
    ///
    /// Returns an [`InvalidModelError`] naming the offending parameter if
    /// `wn` is not finite and strictly positive, or if `zeta` is not finite
    /// and non-negative.
    pub fn new(wn: f64, zeta: f64) -> Result<Self, InvalidModelError> {
        Ok(Self {
            natural_frequency: positive_quantity(
                Parameter::NaturalFrequency,
                wn,
                AngularVelocity::new::<radian_per_second>,
            )?,
            damping_ratio: check::<NonNegative>(Parameter::DampingRatio, zeta)?,
        })
    }

    /// Creates a model from a `uom` natural frequency and a damping ratio.
    ///
    /// # Errors
    ///
    /// See [`SecondOrder::new`].
    pub fn from_quantities(wn: AngularVelocity, zeta: f64) -> Result<Self, InvalidModelError> {
        Self::new(wn.get::<radian_per_second>(), zeta)
    }

    /// Natural frequency as a `uom` quantity.
    #[must_use]
    pub fn natural_frequency(&self) -> AngularVelocity {
        self.natural_frequency.into_inner()
    }

    /// Natural frequency `wn` in rad/s.
    #[must_use]
    pub fn wn(&self) -> f64 {
        self.natural_frequency().get::<radian_per_second>()
    }

    /// Damping ratio `zeta`.
    #[must_use]
    pub fn zeta(&self) -> f64 {
        self.damping_ratio.into_inner()
    }

    /// Classifies the damping regime from `zeta`.
    #[must_use]
    pub fn damping(&self) -> Damping {
        Damping::from_ratio(self.zeta())
    }

    /// Damped natural frequency `wn √(1 − zeta²)`, defined only when underdamped.
    #[must_use]
    pub fn damped_frequency(&self) -> Option<f64> {
        match self.damping() {
            Damping::Underdamped => Some(self.wn() * (1.0 - self.zeta().powi(2)).sqrt()),
            Damping::CriticallyDamped | Damping::Overdamped => None,
        }
    }
}

/// Damping regime of a second-order model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damping {
    /// `zeta < 1`: oscillatory decay with complex poles.
    Underdamped,
    /// `zeta == 1`: repeated real pole.
    CriticallyDamped,
    /// `zeta > 1`: two distinct real poles.
    Overdamped,
}

impl Damping {
    /// Classifies a (non-negative) damping ratio.
    #[must_use]
    pub fn from_ratio(zeta: f64) -> Self {
        if zeta < 1.0 {
            Self::Underdamped
        } else if zeta > 1.0 {
            Self::Overdamped
        } else {
            Self::CriticallyDamped
        }
    }
}

/// The model parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    Gain,
    TimeConstant,
    NaturalFrequency,
    DampingRatio,
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gain => "gain (k)",
            Self::TimeConstant => "time constant (tau)",
            Self::NaturalFrequency => "natural frequency (wn)",
            Self::DampingRatio => "damping ratio (zeta)",
        })
    }
}

/// A model parameter outside its valid domain.
///
/// Raised before any sampling; invalid parameters are never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid {parameter} = {value}: {source}")]
pub struct InvalidModelError {
    pub parameter: Parameter,
    pub value: f64,
    #[source]
    pub source: ConstraintError,
}

/// Checks that `value` is finite and satisfies `C`.
fn check<C: Constraint<f64>>(
    parameter: Parameter,
    value: f64,
) -> Result<Constrained<f64, C>, InvalidModelError> {
    let invalid = |source| InvalidModelError {
        parameter,
        value,
        source,
    };
    Finite::new(value).map_err(invalid)?;
    Constrained::new(value).map_err(invalid)
}

/// Checks an SI value, then wraps it as a strictly positive `uom` quantity.
fn positive_quantity<Q>(
    parameter: Parameter,
    value: f64,
    quantity: impl Fn(f64) -> Q,
) -> Result<Constrained<Q, StrictlyPositive>, InvalidModelError>
where
    StrictlyPositive: Constraint<Q>,
{
    check::<StrictlyPositive>(parameter, value)?;
    Constrained::new(quantity(value)).map_err(|source| InvalidModelError {
        parameter,
        value,
        source,
    })
}
