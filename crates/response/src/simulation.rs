use lti_core::Model;
use tracing::{debug, instrument, warn};

use crate::{
    error::Error,
    input::InputSpec,
    metrics::{PerformanceMetrics, analyze},
    model::ModelSpec,
    sampler::{Config, SampledResponse, sample},
    transfer_function::TransferFunction,
};

/// A model paired with the test input applied to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scenario {
    pub model: ModelSpec,
    pub input: InputSpec,
}

impl Scenario {
    #[must_use]
    pub fn new(model: ModelSpec, input: InputSpec) -> Self {
        Self { model, input }
    }
}

/// Everything produced by one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub model: ModelSpec,
    pub input: InputSpec,
    /// Model transfer function `G(s)`.
    pub transfer_function: TransferFunction,
    pub response: SampledResponse,
    pub metrics: PerformanceMetrics,
}

impl SimulationResult {
    /// Input transform `U(s)`.
    #[must_use]
    pub fn input_transform(&self) -> TransferFunction {
        self.input.laplace()
    }

    /// Output transform `Y(s) = G(s) U(s)`.
    #[must_use]
    pub fn output_transform(&self) -> TransferFunction {
        &self.transfer_function * &self.input.laplace()
    }
}

/// Samples a response and extracts its metrics in one pass.
///
/// Metrics that cannot be computed are logged and reported as unavailable;
/// they never fail the run.
///
/// # Errors
///
/// Fails only if sampling fails; see [`sample`].
#[instrument(level = "debug", skip_all, fields(order = model.order(), input = ?input.kind()))]
pub fn simulate(
    model: &ModelSpec,
    input: &InputSpec,
    config: &Config,
) -> Result<SimulationResult, Error> {
    let response = sample(model, input, config)?;
    let metrics = analyze(model, input, &response);

    for (metric, reason) in metrics.unavailable() {
        warn!(metric, %reason, "metric unavailable");
    }
    debug!(final_value = metrics.final_value(), "simulation complete");

    Ok(SimulationResult {
        model: *model,
        input: *input,
        transfer_function: model.transfer_function(),
        response,
        metrics,
    })
}

/// Runs simulations with a fixed sampling configuration.
///
/// Implements [`Model`] so a simulation can be driven like any other
/// workspace model: each call builds a fresh result from its scenario.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Simulator {
    pub config: Config,
}

impl Simulator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Model for Simulator {
    type Input = Scenario;
    type Output = SimulationResult;
    type Error = Error;

    fn call(&self, input: &Scenario) -> Result<SimulationResult, Error> {
        simulate(&input.model, &input.input, &self.config)
    }
}
