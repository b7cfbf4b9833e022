use std::f64::consts::PI;

use crate::model::SecondOrder;

use super::MetricUnavailable;

/// Textbook approximations for an underdamped second-order step response.
///
/// ```text
/// Ts ≈ 4 / (zeta wn)                        2% settling time
/// Mp = e^(−zeta π / √(1 − zeta²)) × 100     percent overshoot
/// wd = wn √(1 − zeta²)
/// Tp = π / wd
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticMetrics {
    /// Settling time in seconds, unavailable without damping.
    pub settling_time: Result<f64, MetricUnavailable>,
    pub overshoot_percent: f64,
    /// Damped natural frequency in rad/s.
    pub damped_frequency: f64,
    /// Time of the first peak in seconds.
    pub peak_time: f64,
}

impl AnalyticMetrics {
    /// Returns `None` unless the model is underdamped.
    pub(crate) fn new(model: &SecondOrder) -> Option<Self> {
        let wd = model.damped_frequency()?;
        let wn = model.wn();
        let zeta = model.zeta();

        let settling_time = if zeta > 0.0 {
            Ok(4.0 / (zeta * wn))
        } else {
            Err(MetricUnavailable::ZeroDamping)
        };

        Some(Self {
            settling_time,
            overshoot_percent: (-zeta * PI / (1.0 - zeta * zeta).sqrt()).exp() * 100.0,
            damped_frequency: wd,
            peak_time: PI / wd,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn lightly_damped() {
        let model = SecondOrder::new(1.0, 0.3).unwrap();
        let metrics = AnalyticMetrics::new(&model).unwrap();

        assert_relative_eq!(metrics.settling_time.unwrap(), 13.333_333, epsilon = 1e-5);
        assert_relative_eq!(metrics.overshoot_percent, 37.2326, epsilon = 1e-3);
        assert_relative_eq!(metrics.damped_frequency, 0.91_f64.sqrt());
        assert_relative_eq!(metrics.peak_time, PI / 0.91_f64.sqrt());
    }

    #[test]
    fn undamped_never_settles() {
        let model = SecondOrder::new(2.0, 0.0).unwrap();
        let metrics = AnalyticMetrics::new(&model).unwrap();

        assert_eq!(metrics.settling_time, Err(MetricUnavailable::ZeroDamping));
        assert_relative_eq!(metrics.overshoot_percent, 100.0);
        assert_relative_eq!(metrics.peak_time, PI / 2.0);
    }

    #[test]
    fn only_underdamped_models() {
        assert!(AnalyticMetrics::new(&SecondOrder::new(1.0, 1.0).unwrap()).is_none());
        assert!(AnalyticMetrics::new(&SecondOrder::new(1.0, 1.5).unwrap()).is_none());
    }
}
