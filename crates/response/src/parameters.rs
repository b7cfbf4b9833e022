//! Parameter documents for loading scenarios from TOML or JSON.
//!
//! ```toml
//! [model]
//! order = 2
//! wn = 1.0
//! zeta = 0.3
//!
//! [input]
//! kind = "step"
//! amplitude = 1.0
//!
//! [sampling]
//! horizon = 10.0
//! samples = 1000
//! ```
//!
//! Models and inputs deserialize through the same validating constructors
//! used in code, so an out-of-domain value rejects the whole document.

use serde::Deserialize;
use thiserror::Error;

use crate::{
    error::Error,
    input::{InputKind, InputSpec, InvalidInputError},
    model::{InvalidModelError, ModelSpec, Parameter},
    sampler::Config,
    simulation::{Scenario, SimulationResult, simulate},
};

/// A complete simulation request.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    pub model: ModelSpec,
    pub input: InputSpec,
    #[serde(default)]
    pub sampling: Config,
}

impl Parameters {
    #[must_use]
    pub fn scenario(&self) -> Scenario {
        Scenario::new(self.model, self.input)
    }

    /// Runs the described simulation.
    ///
    /// # Errors
    ///
    /// See [`simulate`].
    pub fn simulate(&self) -> Result<SimulationResult, Error> {
        simulate(&self.model, &self.input, &self.sampling)
    }
}

/// A parameter document that does not describe a valid model or input.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("unsupported model order {0}, expected 1 or 2")]
    UnsupportedOrder(u8),

    #[error("order {order} model requires {parameter}")]
    Missing { order: u8, parameter: Parameter },

    #[error(transparent)]
    InvalidModel(#[from] InvalidModelError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

/// Raw model fields; only those of the selected order are used.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ModelDocument {
    order: u8,
    k: Option<f64>,
    tau: Option<f64>,
    wn: Option<f64>,
    zeta: Option<f64>,
}

impl TryFrom<ModelDocument> for ModelSpec {
    type Error = ParameterError;

    fn try_from(doc: ModelDocument) -> Result<Self, ParameterError> {
        let order = doc.order;
        let require = |value: Option<f64>, parameter| {
            value.ok_or(ParameterError::Missing { order, parameter })
        };

        Ok(match order {
            1 => ModelSpec::first_order(
                require(doc.k, Parameter::Gain)?,
                require(doc.tau, Parameter::TimeConstant)?,
            )?,
            2 => ModelSpec::second_order(
                require(doc.wn, Parameter::NaturalFrequency)?,
                require(doc.zeta, Parameter::DampingRatio)?,
            )?,
            other => return Err(ParameterError::UnsupportedOrder(other)),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct InputDocument {
    #[serde(alias = "type")]
    kind: InputKind,
    #[serde(default = "unit_amplitude")]
    amplitude: f64,
}

fn unit_amplitude() -> f64 {
    1.0
}

impl TryFrom<InputDocument> for InputSpec {
    type Error = ParameterError;

    fn try_from(doc: InputDocument) -> Result<Self, ParameterError> {
        Ok(InputSpec::new(doc.kind, doc.amplitude)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(order: u8, k: Option<f64>, tau: Option<f64>) -> ModelDocument {
        ModelDocument {
            order,
            k,
            tau,
            wn: None,
            zeta: None,
        }
    }

    #[test]
    fn first_order_document() {
        let spec = ModelSpec::try_from(model(1, Some(2.0), Some(0.5))).unwrap();
        assert_eq!(spec, ModelSpec::first_order(2.0, 0.5).unwrap());
    }

    #[test]
    fn missing_parameter() {
        let err = ModelSpec::try_from(model(1, Some(2.0), None)).unwrap_err();
        assert_eq!(
            err,
            ParameterError::Missing {
                order: 1,
                parameter: Parameter::TimeConstant,
            }
        );
        assert_eq!(err.to_string(), "order 1 model requires time constant (tau)");
    }

    #[test]
    fn unsupported_order() {
        let err = ModelSpec::try_from(model(3, None, None)).unwrap_err();
        assert_eq!(err, ParameterError::UnsupportedOrder(3));
    }

    #[test]
    fn invalid_values_use_model_errors() {
        let err = ModelSpec::try_from(model(1, Some(1.0), Some(-1.0))).unwrap_err();
        let ParameterError::InvalidModel(inner) = err else {
            panic!("expected an invalid model error");
        };
        assert_eq!(inner.parameter, Parameter::TimeConstant);
    }

    #[test]
    fn input_document() {
        let input = InputSpec::try_from(InputDocument {
            kind: InputKind::Impulse,
            amplitude: 2.0,
        })
        .unwrap();
        assert_eq!(input, InputSpec::impulse(2.0).unwrap());
    }
}
