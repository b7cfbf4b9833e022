//! Step and impulse responses of first- and second-order LTI models.
//!
//! A [`ModelSpec`] and an [`InputSpec`] are sampled on a uniform time grid
//! by [`sample`], and [`analyze`] extracts transient metrics from the result:
//! the final value, the 63.2% marker at `t = tau` for first-order models, and
//! overshoot and settling candidates for underdamped second-order models.
//! [`simulate`] runs both steps and also returns the transfer functions.
//!
//! Invalid parameters are hard errors raised before any sample is computed.
//! Metrics that cannot be computed are soft failures, reported per field as
//! [`MetricUnavailable`].
//!
//! ```
//! use lti_response::{Config, InputSpec, ModelSpec, PerformanceMetrics, simulate};
//!
//! let model = ModelSpec::second_order(1.0, 0.3)?;
//! let input = InputSpec::step(1.0)?;
//! let result = simulate(&model, &input, &Config::default())?;
//!
//! if let PerformanceMetrics::Underdamped(metrics) = result.metrics {
//!     let overshoot = metrics.overshoot?;
//!     assert!((overshoot.percent - 37.2).abs() < 0.1);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod input;
mod metrics;
mod model;
mod parameters;
mod sampler;
mod simulation;
mod transfer_function;

pub use error::Error;
pub use input::{InputKind, InputSpec, InvalidInputError};
pub use metrics::{
    AnalyticMetrics, DampedMetrics, FirstOrderMetrics, Marker, MetricUnavailable, Overshoot,
    PerformanceMetrics, SettlingBand, UnderdampedMetrics, analyze,
};
pub use model::{Damping, FirstOrder, InvalidModelError, ModelSpec, Parameter, SecondOrder};
pub use parameters::{ParameterError, Parameters};
pub use sampler::{
    Config, ImproperTransferFunction, MAX_EVALUATIONS, Method, MismatchedLengths, SampledResponse,
    sample,
};
pub use simulation::{Scenario, SimulationResult, Simulator, simulate};
pub use transfer_function::{Polynomial, TransferFunction};
