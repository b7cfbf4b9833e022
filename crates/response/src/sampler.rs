//! Uniformly sampled responses of LTI models to step and impulse inputs.
//!
//! The sampler evaluates the model's *unit* response on a time grid and
//! scales it by the input amplitude, which is exact for linear models.
//! The literal test signal is sampled on the same grid for display.

mod closed_form;
mod config;
mod state_space;

pub use config::{Config, MAX_EVALUATIONS, Method};
pub use state_space::ImproperTransferFunction;

use tracing::{debug, instrument};

use crate::{error::Error, input::InputSpec, model::ModelSpec};

use closed_form::ClosedForm;
use state_space::CanonicalForm;

/// A response sampled on a uniform time grid.
///
/// The three series always have the same length. Responses produced by
/// [`sample`] also start at `t = 0`, end at the horizon and are strictly
/// increasing in time.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledResponse {
    time: Vec<f64>,
    input_signal: Vec<f64>,
    output: Vec<f64>,
}

/// Series of different lengths passed to [`SampledResponse::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("series lengths differ: time {time}, input {input_signal}, output {output}")]
pub struct MismatchedLengths {
    pub time: usize,
    pub input_signal: usize,
    pub output: usize,
}

impl SampledResponse {
    /// Assembles a response from existing series.
    ///
    /// Only the equal-length invariant is enforced; the time axis is taken as given.
    ///
    /// # Errors
    ///
    /// Returns [`MismatchedLengths`] if the series lengths differ.
    pub fn new(
        time: Vec<f64>,
        input_signal: Vec<f64>,
        output: Vec<f64>,
    ) -> Result<Self, MismatchedLengths> {
        if time.len() != input_signal.len() || time.len() != output.len() {
            return Err(MismatchedLengths {
                time: time.len(),
                input_signal: input_signal.len(),
                output: output.len(),
            });
        }
        Ok(Self {
            time,
            input_signal,
            output,
        })
    }

    #[must_use]
    pub fn time(&self) -> &[f64] {
        &self.time
    }

    #[must_use]
    pub fn input_signal(&self) -> &[f64] {
        &self.input_signal
    }

    #[must_use]
    pub fn output(&self) -> &[f64] {
        &self.output
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Consumes the response and returns `(time, input_signal, output)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.time, self.input_signal, self.output)
    }
}

/// Samples the response of `model` to `input`.
///
/// # Errors
///
/// - [`Error::InvalidModel`] if a model parameter is out of its domain.
///   This is checked before any sample is computed.
/// - [`Error::InvalidInput`] if the input amplitude is not finite.
/// - [`Error::InvalidConfig`] if the horizon, sample count or method
///   options are invalid.
/// - [`Error::Realization`] or [`Error::Integration`] if the state-space
///   method cannot realize or integrate the model.
#[instrument(level = "debug", skip_all, fields(order = model.order(), input = ?input.kind()))]
pub fn sample(
    model: &ModelSpec,
    input: &InputSpec,
    config: &Config,
) -> Result<SampledResponse, Error> {
    model.validate()?;
    input.validate()?;
    config
        .validate()
        .map_err(|reason| Error::InvalidConfig { reason })?;

    let time = time_axis(config);
    let kind = input.kind();

    let unit: Vec<f64> = match config.method {
        Method::ClosedForm => {
            let response = ClosedForm::from(model);
            time.iter()
                .map(|&t| response.unit_response(kind, t))
                .collect()
        }
        Method::StateSpace { substeps } => {
            let realization = CanonicalForm::new(&model.transfer_function())?;
            state_space::unit_response(
                &realization,
                kind,
                config.spacing(),
                config.samples,
                substeps,
            )?
        }
    };

    let amplitude = input.amplitude();
    let output: Vec<f64> = unit.into_iter().map(|y| amplitude * y).collect();
    let input_signal = input.signal(&time);

    debug!(
        samples = time.len(),
        horizon = config.horizon,
        method = ?config.method,
        "sampled response"
    );

    Ok(SampledResponse {
        time,
        input_signal,
        output,
    })
}

/// Builds `samples` uniformly spaced points over `[0, horizon]`.
///
/// The last point is pinned to the horizon so rounding never shortens the axis.
fn time_axis(config: &Config) -> Vec<f64> {
    let spacing = config.spacing();
    let last = config.samples - 1;
    (0..config.samples)
        .map(|i| {
            if i == last {
                config.horizon
            } else {
                i as f64 * spacing
            }
        })
        .collect()
}
