//! Exact unit step and unit impulse responses.
//!
//! Second-order step responses by damping regime, with `sigma = zeta wn`:
//!
//! ```text
//! underdamped   1 − e^(−sigma t) (cos wd t + zeta/√(1 − zeta²) sin wd t),  wd = wn √(1 − zeta²)
//! critical      1 − e^(−wn t) (1 + wn t)
//! overdamped    1 + (p2 e^(p1 t) − p1 e^(p2 t)) / (p1 − p2),  p1,2 = −sigma ± wn √(zeta² − 1)
//! ```
//!
//! Impulse responses are the time derivatives of the step responses.

use crate::{
    input::InputKind,
    model::{Damping, ModelSpec},
};

/// Precomputed modes of a model's unit response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClosedForm {
    FirstOrder {
        k: f64,
        tau: f64,
    },
    Underdamped {
        wn: f64,
        sigma: f64,
        wd: f64,
    },
    CriticallyDamped {
        wn: f64,
    },
    /// Two real poles: `slow` is the one closer to the origin.
    Overdamped {
        wn: f64,
        slow: f64,
        fast: f64,
    },
}

impl From<&ModelSpec> for ClosedForm {
    fn from(model: &ModelSpec) -> Self {
        match model {
            ModelSpec::FirstOrder(model) => Self::FirstOrder {
                k: model.gain(),
                tau: model.tau(),
            },
            ModelSpec::SecondOrder(model) => {
                let wn = model.wn();
                let zeta = model.zeta();
                match model.damping() {
                    Damping::Underdamped => Self::Underdamped {
                        wn,
                        sigma: zeta * wn,
                        wd: wn * (1.0 - zeta * zeta).sqrt(),
                    },
                    Damping::CriticallyDamped => Self::CriticallyDamped { wn },
                    Damping::Overdamped => {
                        // The product of the poles is wn², which avoids the
                        // cancellation in −sigma + wn √(zeta² − 1).
                        let fast = -wn * (zeta + (zeta * zeta - 1.0).sqrt());
                        Self::Overdamped {
                            wn,
                            slow: wn * wn / fast,
                            fast,
                        }
                    }
                }
            }
        }
    }
}

impl ClosedForm {
    /// Unit response to the given input family at time `t`.
    pub(crate) fn unit_response(&self, kind: InputKind, t: f64) -> f64 {
        match kind {
            InputKind::Step => self.unit_step(t),
            InputKind::Impulse => self.unit_impulse(t),
        }
    }

    pub(crate) fn unit_step(&self, t: f64) -> f64 {
        match *self {
            Self::FirstOrder { k, tau } => k * (1.0 - (-t / tau).exp()),
            Self::Underdamped { sigma, wd, .. } => {
                let ratio = sigma / wd;
                1.0 - (-sigma * t).exp() * ((wd * t).cos() + ratio * (wd * t).sin())
            }
            Self::CriticallyDamped { wn } => 1.0 - (-wn * t).exp() * (1.0 + wn * t),
            Self::Overdamped { slow, fast, .. } => {
                1.0 + (fast * (slow * t).exp() - slow * (fast * t).exp()) / (slow - fast)
            }
        }
    }

    pub(crate) fn unit_impulse(&self, t: f64) -> f64 {
        match *self {
            Self::FirstOrder { k, tau } => k / tau * (-t / tau).exp(),
            Self::Underdamped { wn, sigma, wd } => {
                wn * wn / wd * (-sigma * t).exp() * (wd * t).sin()
            }
            Self::CriticallyDamped { wn } => wn * wn * t * (-wn * t).exp(),
            Self::Overdamped { wn, slow, fast } => {
                wn * wn * ((slow * t).exp() - (fast * t).exp()) / (slow - fast)
            }
        }
    }
}
