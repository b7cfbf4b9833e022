use lti_solvers::transient::rk4;
use thiserror::Error;

use crate::{input::InvalidInputError, model::InvalidModelError, sampler::ImproperTransferFunction};

/// Errors that abort sampling or simulation.
///
/// Metrics that cannot be computed are not errors; they are reported per
/// field as [`MetricUnavailable`](crate::MetricUnavailable).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    InvalidModel(#[from] InvalidModelError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error("invalid sampling config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("cannot realize model: {0}")]
    Realization(#[from] ImproperTransferFunction),

    #[error("numerical integration failed: {0}")]
    Integration(#[from] rk4::Error),
}
