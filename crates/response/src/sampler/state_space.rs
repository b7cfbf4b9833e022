//! Numerical unit responses from a state-space realization.
//!
//! A strictly proper `G(s) = b(s) / a(s)` of order `n` is realized in
//! controllable canonical form, with `a` normalized to a monic polynomial
//! `sⁿ + a1 sⁿ⁻¹ + … + an`:
//!
//! ```text
//! x1' = x2
//! …
//! xn' = −an x1 − … − a1 xn + u
//! y   = c1 x1 + … + cn xn        (ci = coefficient of s^(i−1) in b)
//! ```
//!
//! A unit step is `u = 1` from a zero state. A unit impulse moves the state
//! to `x(0+) = B = [0, …, 0, 1]` and leaves `u = 0` afterwards.

use std::{
    convert::Infallible,
    ops::{Add, Mul},
};

use lti_core::{Model, OdeProblem, StepIntegrable};
use lti_solvers::transient::rk4::{self, Event};
use thiserror::Error;
use tracing::trace;

use crate::{input::InputKind, transfer_function::TransferFunction};

/// A transfer function that cannot be realized without feedthrough.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("transfer function {0} is not strictly proper")]
pub struct ImproperTransferFunction(pub TransferFunction);

/// Controllable canonical realization of a strictly proper transfer function.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CanonicalForm {
    /// Feedback gains `[an, …, a1]`, lowest power first.
    feedback: Vec<f64>,
    /// Output gains `[c1, …, cn]`, lowest power first.
    output: Vec<f64>,
}

impl CanonicalForm {
    pub(crate) fn new(tf: &TransferFunction) -> Result<Self, ImproperTransferFunction> {
        let den = tf.denominator().coefficients();
        let num = tf.numerator().coefficients();
        let lead = den[0];
        if !tf.is_strictly_proper() || lead == 0.0 {
            return Err(ImproperTransferFunction(tf.clone()));
        }

        let order = den.len() - 1;
        let feedback = den[1..].iter().rev().map(|a| a / lead).collect();
        let output = num
            .iter()
            .rev()
            .map(|b| b / lead)
            .chain(std::iter::repeat(0.0))
            .take(order)
            .collect();

        Ok(Self { feedback, output })
    }

    pub(crate) fn order(&self) -> usize {
        self.feedback.len()
    }

    /// Initial state and constant forcing for a unit test input.
    fn initial(&self, kind: InputKind) -> Input {
        let mut state = vec![0.0; self.order()];
        let forcing = match kind {
            InputKind::Step => 1.0,
            InputKind::Impulse => {
                if let Some(last) = state.last_mut() {
                    *last = 1.0;
                }
                0.0
            }
        };
        Input {
            state: States(state),
            forcing,
        }
    }
}

/// States of the realization, lowest derivative first.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct States(Vec<f64>);

/// Time derivative of [`States`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rates(Vec<f64>);

impl Add for Rates {
    type Output = Rates;

    fn add(self, rhs: Rates) -> Rates {
        Rates(self.0.iter().zip(&rhs.0).map(|(a, b)| a + b).collect())
    }
}

impl Mul<f64> for Rates {
    type Output = Rates;

    fn mul(self, rhs: f64) -> Rates {
        Rates(self.0.iter().map(|r| r * rhs).collect())
    }
}

impl StepIntegrable<f64> for States {
    type Derivative = Rates;

    fn step(&self, derivative: Rates, delta: f64) -> Self {
        States(
            self.0
                .iter()
                .zip(derivative.0)
                .map(|(x, dx)| x + dx * delta)
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Input {
    state: States,
    forcing: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Output {
    rates: Rates,
    y: f64,
}

impl Model for CanonicalForm {
    type Input = Input;
    type Output = Output;
    type Error = Infallible;

    fn call(&self, input: &Input) -> Result<Output, Infallible> {
        let x = &input.state.0;
        let y: f64 = self.output.iter().zip(x).map(|(c, x)| c * x).sum();

        let feedback: f64 = self.feedback.iter().zip(x).map(|(a, x)| a * x).sum();
        let mut rates: Vec<f64> = x.iter().skip(1).copied().collect();
        rates.push(input.forcing - feedback);

        Ok(Output {
            rates: Rates(rates),
            y,
        })
    }
}

/// Advances the realization's state with constant forcing.
struct Propagation;

impl OdeProblem for Propagation {
    type Input = Input;
    type Output = Output;
    type Delta = f64;
    type State = States;
    type Error = Infallible;

    fn state(&self, input: &Input) -> Result<States, Infallible> {
        Ok(input.state.clone())
    }

    fn derivative(&self, _input: &Input, output: &Output) -> Result<Rates, Infallible> {
        Ok(output.rates.clone())
    }

    fn build_input(&self, base: &Input, state: &States, _delta: &f64) -> Result<Input, Infallible> {
        Ok(Input {
            state: state.clone(),
            forcing: base.forcing,
        })
    }
}

/// Integrates the unit response on a uniform grid of `samples` points spaced
/// `spacing` apart, taking `substeps` RK4 steps per interval.
///
/// # Errors
///
/// Returns an [`rk4::Error`] if the solver rejects the step size.
pub(crate) fn unit_response(
    realization: &CanonicalForm,
    kind: InputKind,
    spacing: f64,
    samples: usize,
    substeps: usize,
) -> Result<Vec<f64>, rk4::Error> {
    let dt = spacing / substeps as f64;
    let steps = (samples - 1) * substeps;

    let solution = rk4::solve(
        realization,
        &Propagation,
        realization.initial(kind),
        dt,
        steps,
        |event: &Event<Input, Output>| {
            if event.step % substeps == 0 {
                trace!(
                    t = event.elapsed,
                    y = event.snapshot.output.y,
                    "integrated sample"
                );
            }
            None::<rk4::Action>
        },
    )?;

    Ok(solution
        .outputs()
        .step_by(substeps)
        .map(|output| output.y)
        .collect())
}
