//! Index searches over sampled series.
//!
//! Both searches skip non-finite samples and keep the first index on ties.

use super::MetricUnavailable;

/// Index of the sample closest to `target`.
pub(super) fn nearest(values: &[f64], target: f64) -> Result<usize, MetricUnavailable> {
    best_by(values, |value| -(value - target).abs())
}

/// Index of the extreme sample in the direction of `sign`.
///
/// A positive `sign` finds the maximum, a negative one the minimum.
pub(super) fn peak(values: &[f64], sign: f64) -> Result<usize, MetricUnavailable> {
    best_by(values, |value| sign * value)
}

/// Index of the finite sample with the highest score.
fn best_by(values: &[f64], score: impl Fn(f64) -> f64) -> Result<usize, MetricUnavailable> {
    if values.is_empty() {
        return Err(MetricUnavailable::EmptyResponse);
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let candidate = score(value);
        match best {
            Some((_, top)) if candidate <= top => {}
            _ => best = Some((index, candidate)),
        }
    }

    best.map(|(index, _)| index)
        .ok_or(MetricUnavailable::NonFiniteResponse)
}
