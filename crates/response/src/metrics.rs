//! Transient performance metrics extracted from a sampled response.
//!
//! Which metrics are reported depends on the model family and, for second
//! order models, on the damping regime. Each metric that can fail carries
//! its own `Result`, so one unavailable metric never hides the others.

mod analytic;
mod search;
mod unavailable;

pub use analytic::AnalyticMetrics;
pub use unavailable::MetricUnavailable;

use tracing::{debug, instrument};

use crate::{
    input::{InputKind, InputSpec},
    model::{Damping, ModelSpec, SecondOrder},
    sampler::SampledResponse,
};

/// A single sample picked out of a response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub time: f64,
    pub value: f64,
}

impl Marker {
    fn at(response: &SampledResponse, index: usize) -> Self {
        Self {
            index,
            time: response.time()[index],
            value: response.output()[index],
        }
    }
}

/// Percent overshoot measured at the response peak.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Overshoot {
    pub percent: f64,
    pub peak: Marker,
}

/// A settling band around the final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlingBand {
    TwoPercent,
    FivePercent,
}

impl SettlingBand {
    /// Fraction of the final value that marks the band edge.
    #[must_use]
    pub fn fraction(self) -> f64 {
        match self {
            Self::TwoPercent => 0.98,
            Self::FivePercent => 0.95,
        }
    }
}

/// Metrics reported for a first-order model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderMetrics {
    pub final_value: f64,
    pub static_gain: f64,
    /// Sample nearest `t = tau`.
    pub tau_marker: Result<Marker, MetricUnavailable>,
}

/// Metrics reported for an underdamped second-order model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnderdampedMetrics {
    pub final_value: f64,
    pub overshoot: Result<Overshoot, MetricUnavailable>,
    pub settling_2pct: Result<Marker, MetricUnavailable>,
    pub settling_5pct: Result<Marker, MetricUnavailable>,
    pub analytic: AnalyticMetrics,
}

impl UnderdampedMetrics {
    /// Settling candidate for the given band.
    #[must_use]
    pub fn settling(&self, band: SettlingBand) -> Result<Marker, MetricUnavailable> {
        match band {
            SettlingBand::TwoPercent => self.settling_2pct,
            SettlingBand::FivePercent => self.settling_5pct,
        }
    }
}

/// Metrics reported for a critically damped or overdamped second-order model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedMetrics {
    pub final_value: f64,
    pub damping: Damping,
}

/// Performance metrics, shaped by model family and damping regime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PerformanceMetrics {
    FirstOrder(FirstOrderMetrics),
    Underdamped(UnderdampedMetrics),
    Damped(DampedMetrics),
}

impl PerformanceMetrics {
    /// Theoretical steady-state output.
    #[must_use]
    pub fn final_value(&self) -> f64 {
        match self {
            Self::FirstOrder(metrics) => metrics.final_value,
            Self::Underdamped(metrics) => metrics.final_value,
            Self::Damped(metrics) => metrics.final_value,
        }
    }

    /// Lists every metric that could not be computed, by name.
    #[must_use]
    pub fn unavailable(&self) -> Vec<(&'static str, MetricUnavailable)> {
        let mut missing = Vec::new();
        match self {
            Self::FirstOrder(metrics) => {
                if let Err(reason) = metrics.tau_marker {
                    missing.push(("tau_marker", reason));
                }
            }
            Self::Underdamped(metrics) => {
                if let Err(reason) = metrics.overshoot {
                    missing.push(("overshoot", reason));
                }
                if let Err(reason) = metrics.settling_2pct {
                    missing.push(("settling_2pct", reason));
                }
                if let Err(reason) = metrics.settling_5pct {
                    missing.push(("settling_5pct", reason));
                }
                if let Err(reason) = metrics.analytic.settling_time {
                    missing.push(("analytic_settling_time", reason));
                }
            }
            Self::Damped(_) => {}
        }
        missing
    }
}

/// Extracts performance metrics from a sampled response.
///
/// The final value is theoretical: `dc_gain × amplitude` for a step and
/// zero for an impulse. Searches run over the whole horizon.
#[instrument(level = "debug", skip_all, fields(order = model.order(), samples = response.len()))]
#[must_use]
pub fn analyze(
    model: &ModelSpec,
    input: &InputSpec,
    response: &SampledResponse,
) -> PerformanceMetrics {
    let final_value = match input.kind() {
        InputKind::Step => model.dc_gain() * input.amplitude(),
        InputKind::Impulse => 0.0,
    };

    let metrics = match model {
        ModelSpec::FirstOrder(model) => PerformanceMetrics::FirstOrder(FirstOrderMetrics {
            final_value,
            static_gain: model.gain(),
            tau_marker: search::nearest(response.time(), model.tau())
                .map(|index| Marker::at(response, index)),
        }),
        ModelSpec::SecondOrder(model) => second_order(model, response, final_value),
    };

    debug!(final_value, unavailable = metrics.unavailable().len(), "analyzed response");
    metrics
}

fn second_order(
    model: &SecondOrder,
    response: &SampledResponse,
    final_value: f64,
) -> PerformanceMetrics {
    let Some(analytic) = AnalyticMetrics::new(model) else {
        return PerformanceMetrics::Damped(DampedMetrics {
            final_value,
            damping: model.damping(),
        });
    };

    let overshoot = overshoot(response, final_value);
    let band_crossing = |band: SettlingBand| {
        let overshoot = overshoot?;
        settling(response, final_value, band, &overshoot.peak)
    };

    PerformanceMetrics::Underdamped(UnderdampedMetrics {
        final_value,
        overshoot,
        settling_2pct: band_crossing(SettlingBand::TwoPercent),
        settling_5pct: band_crossing(SettlingBand::FivePercent),
        analytic,
    })
}

/// Peak and percent overshoot in the direction of the final value.
fn overshoot(response: &SampledResponse, final_value: f64) -> Result<Overshoot, MetricUnavailable> {
    if final_value == 0.0 {
        return Err(MetricUnavailable::ZeroFinalValue);
    }

    let sign = final_value.signum();
    let peak = Marker::at(response, search::peak(response.output(), sign)?);
    if sign * (peak.value - final_value) <= 0.0 {
        return Err(MetricUnavailable::NoOvershoot);
    }

    Ok(Overshoot {
        percent: (peak.value - final_value) / final_value * 100.0,
        peak,
    })
}

/// Sample nearest the band edge, accepted only if it follows the peak.
fn settling(
    response: &SampledResponse,
    final_value: f64,
    band: SettlingBand,
    peak: &Marker,
) -> Result<Marker, MetricUnavailable> {
    let index = search::nearest(response.output(), band.fraction() * final_value)?;
    let candidate = Marker::at(response, index);
    if candidate.time > peak.time {
        Ok(candidate)
    } else {
        Err(MetricUnavailable::BeforePeak)
    }
}
