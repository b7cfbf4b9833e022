use serde::Deserialize;

/// Upper bound on model evaluations per response: samples for the closed
/// form, integration steps for the state-space method.
pub const MAX_EVALUATIONS: usize = 10_000_000;

/// Configuration for sampling a response.
///
/// Fields missing from a deserialized document take their default values.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// End of the time axis in seconds; the axis always starts at zero.
    pub horizon: f64,
    /// Number of uniformly spaced samples, including both endpoints.
    pub samples: usize,
    /// How the unit response is evaluated at each sample.
    pub method: Method,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            horizon: 10.0,
            samples: 1000,
            method: Method::ClosedForm,
        }
    }
}

impl Config {
    /// Validates the horizon, sample count and method options.
    ///
    /// # Errors
    ///
    /// Returns a static reason if the horizon is not finite and positive,
    /// fewer than two samples are requested, the state-space method is
    /// asked for zero substeps, or the run would exceed
    /// [`MAX_EVALUATIONS`].
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err("horizon must be finite and positive");
        }
        if self.samples < 2 {
            return Err("samples must be at least 2");
        }
        if self.samples > MAX_EVALUATIONS {
            return Err("samples is too large");
        }
        if let Method::StateSpace { substeps } = self.method {
            if substeps == 0 {
                return Err("substeps must be at least 1");
            }
            let steps = (self.samples - 1).checked_mul(substeps);
            if steps.is_none_or(|steps| steps > MAX_EVALUATIONS) {
                return Err("samples × substeps is too large");
            }
        }
        Ok(())
    }

    /// Spacing between consecutive samples.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.horizon / (self.samples - 1) as f64
    }
}

/// How the unit response is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Method {
    /// Exact closed-form expressions for each model family and damping regime.
    #[default]
    ClosedForm,
    /// RK4 integration of the controllable canonical state-space realization.
    ///
    /// Each sample interval is split into `substeps` integration steps.
    StateSpace { substeps: usize },
}
