//! Classic fourth-order Runge–Kutta solver for ODE problems.
//!
//! Each step evaluates the model four times and advances the state with the
//! weighted slope:
//!
//! ```text
//! k1 = f(t,        x)
//! k2 = f(t + dt/2, x + k1 * dt/2)
//! k3 = f(t + dt/2, x + k2 * dt/2)
//! k4 = f(t + dt,   x + k3 * dt)
//! x_{n+1} = x_n + (k1 + 2 k2 + 2 k3 + k4) / 6 * dt
//! ```
//!
//! The derivative type must support addition and scaling by `f64` so the
//! stages can be combined before stepping.
//!
//! # Example
//!
//! ```ignore
//! use lti_solvers::transient::rk4;
//!
//! let solution = rk4::solve_unobserved(&model, &problem, initial_input, 0.01, 1000)?;
//!
//! for snapshot in &solution.history {
//!     println!("{:?} -> {:?}", snapshot.input, snapshot.output);
//! }
//! ```

mod action;
mod error;
mod event;
mod solution;

use std::ops::{Add, Mul};

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use lti_core::{DerivativeOf, Model, Observer, OdeProblem, Snapshot, StepIntegrable};

/// Integrates an ODE problem with fixed-step RK4.
///
/// The observer receives an [`Event`] for the initial snapshot and after each
/// accepted step, and may return [`Action::StopEarly`] to end the integration.
///
/// # Errors
///
/// Returns [`Error::InvalidStep`] if `dt` is not finite and positive, or an
/// error if the model or problem fails at any stage.
pub fn solve<M, P, Obs>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: StepIntegrable<f64>,
    DerivativeOf<P::State, f64>: Clone
        + Add<Output = DerivativeOf<P::State, f64>>
        + Mul<f64, Output = DerivativeOf<P::State, f64>>,
    Obs: Observer<Event<M::Input, M::Output>, Action>,
{
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidStep(dt));
    }

    let initial_output = model.call(&initial).map_err(Error::model)?;
    let initial_snapshot = Snapshot::new(initial, initial_output);

    let mut history = Vec::with_capacity(steps + 1);
    history.push(initial_snapshot.clone());

    let event = Event {
        step: 0,
        elapsed: 0.0,
        snapshot: initial_snapshot.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            history,
            steps: 0,
        });
    }

    let half = 0.5 * dt;
    let mut current = initial_snapshot;

    for step in 1..=steps {
        let state = problem.state(&current.input).map_err(Error::problem)?;

        let k1 = problem
            .derivative(&current.input, &current.output)
            .map_err(Error::problem)?;
        let k2 = stage(model, problem, &current.input, &state, k1.clone(), half)?;
        let k3 = stage(model, problem, &current.input, &state, k2.clone(), half)?;
        let k4 = stage(model, problem, &current.input, &state, k3.clone(), dt)?;

        let slope = (k1 + (k2 + k3) * 2.0 + k4) * (1.0 / 6.0);
        let next_state = state.step(slope, dt);

        let next_input = problem
            .build_input(&current.input, &next_state, &dt)
            .map_err(Error::problem)?;
        let next_output = model.call(&next_input).map_err(Error::model)?;
        let next_snapshot = Snapshot::new(next_input, next_output);

        history.push(next_snapshot.clone());

        let event = Event {
            step,
            elapsed: step as f64 * dt,
            snapshot: next_snapshot.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(Solution {
                status: Status::StoppedByObserver,
                history,
                steps: step,
            });
        }

        current = next_snapshot;
    }

    Ok(Solution {
        status: Status::Complete,
        history,
        steps,
    })
}

/// Integrates an ODE problem with fixed-step RK4 without observation.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`].
pub fn solve_unobserved<M, P>(
    model: &M,
    problem: &P,
    initial: M::Input,
    dt: f64,
    steps: usize,
) -> Result<Solution<M::Input, M::Output>, Error>
where
    M: Model,
    M::Input: Clone,
    M::Output: Clone,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: StepIntegrable<f64>,
    DerivativeOf<P::State, f64>: Clone
        + Add<Output = DerivativeOf<P::State, f64>>
        + Mul<f64, Output = DerivativeOf<P::State, f64>>,
{
    solve(model, problem, initial, dt, steps, ())
}

/// Evaluates the derivative at `state + slope * delta`, located `delta` past `base`.
fn stage<M, P>(
    model: &M,
    problem: &P,
    base: &M::Input,
    state: &P::State,
    slope: DerivativeOf<P::State, f64>,
    delta: f64,
) -> Result<DerivativeOf<P::State, f64>, Error>
where
    M: Model,
    P: OdeProblem<Input = M::Input, Output = M::Output, Delta = f64>,
    P::State: StepIntegrable<f64>,
{
    let trial = state.step(slope, delta);
    let input = problem
        .build_input(base, &trial, &delta)
        .map_err(Error::problem)?;
    let output = model.call(&input).map_err(Error::model)?;
    problem.derivative(&input, &output).map_err(Error::problem)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{convert::Infallible, f64::consts::PI};

    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // --- Test fixtures ---

    /// Two-element state, enough for a second-order realization.
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct State([f64; 2]);

    #[derive(Debug, Clone, Copy)]
    struct Rate([f64; 2]);

    impl Add for Rate {
        type Output = Rate;

        fn add(self, rhs: Rate) -> Rate {
            Rate([self.0[0] + rhs.0[0], self.0[1] + rhs.0[1]])
        }
    }

    impl Mul<f64> for Rate {
        type Output = Rate;

        fn mul(self, rhs: f64) -> Rate {
            Rate([self.0[0] * rhs, self.0[1] * rhs])
        }
    }

    impl StepIntegrable<f64> for State {
        type Derivative = Rate;

        fn step(&self, derivative: Rate, dt: f64) -> Self {
            State([
                self.0[0] + derivative.0[0] * dt,
                self.0[1] + derivative.0[1] * dt,
            ])
        }
    }

    #[derive(Debug, Clone)]
    struct Input {
        time: f64,
        state: State,
    }

    /// Linear system `x' = A x` with a constant matrix.
    struct Linear {
        a: [[f64; 2]; 2],
    }

    impl Model for Linear {
        type Input = Input;
        type Output = Rate;
        type Error = Infallible;

        fn call(&self, input: &Input) -> Result<Rate, Infallible> {
            let [x0, x1] = input.state.0;
            Ok(Rate([
                self.a[0][0] * x0 + self.a[0][1] * x1,
                self.a[1][0] * x0 + self.a[1][1] * x1,
            ]))
        }
    }

    struct LinearProblem;

    impl OdeProblem for LinearProblem {
        type Input = Input;
        type Output = Rate;
        type Delta = f64;
        type State = State;
        type Error = Infallible;

        fn state(&self, input: &Input) -> Result<State, Infallible> {
            Ok(input.state)
        }

        fn derivative(&self, _input: &Input, output: &Rate) -> Result<Rate, Infallible> {
            Ok(*output)
        }

        fn build_input(&self, base: &Input, state: &State, delta: &f64) -> Result<Input, Infallible> {
            Ok(Input {
                time: base.time + delta,
                state: *state,
            })
        }
    }

    fn start(state: [f64; 2]) -> Input {
        Input {
            time: 0.0,
            state: State(state),
        }
    }

    // --- Tests ---

    #[test]
    fn exponential_decay_matches_closed_form() {
        // x0' = -x0 / tau, x1 unused.
        let tau = 2.0;
        let model = Linear {
            a: [[-1.0 / tau, 0.0], [0.0, 0.0]],
        };

        let solution = solve_unobserved(&model, &LinearProblem, start([1.0, 0.0]), 0.01, 500)
            .expect("should solve");

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(solution.history.len(), 501);

        let last = solution.last().unwrap();
        assert_relative_eq!(last.input.time, 5.0, epsilon = 1e-9);
        assert_relative_eq!(last.input.state.0[0], (-5.0_f64 / tau).exp(), epsilon = 1e-9);
    }

    #[test]
    fn harmonic_oscillator_completes_a_period() {
        // x'' = -x, starting at x = 1 with zero velocity.
        let model = Linear {
            a: [[0.0, 1.0], [-1.0, 0.0]],
        };
        let steps = 1000;
        let dt = 2.0 * PI / f64::from(steps);

        let solution = solve_unobserved(&model, &LinearProblem, start([1.0, 0.0]), dt, 1000)
            .expect("should solve");

        let [x, v] = solution.history.last().unwrap().input.state.0;
        assert_abs_diff_eq!(x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn observer_can_stop_early() {
        let model = Linear {
            a: [[-1.0, 0.0], [0.0, -1.0]],
        };

        let observer = |event: &Event<Input, Rate>| (event.step >= 3).then_some(Action::StopEarly);

        let solution = solve(&model, &LinearProblem, start([1.0, 1.0]), 0.1, 100, observer)
            .expect("should stop early");

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 3);
        assert_eq!(solution.history.len(), 4);
    }

    #[test]
    fn observer_sees_only_accepted_steps() {
        let model = Linear {
            a: [[-1.0, 0.0], [0.0, -1.0]],
        };

        let mut times = Vec::new();
        let mut elapsed = Vec::new();
        let solution = solve(
            &model,
            &LinearProblem,
            start([1.0, 1.0]),
            0.5,
            2,
            |event: &Event<Input, Rate>| {
                times.push(event.snapshot.input.time);
                elapsed.push(event.elapsed);
                None
            },
        )
        .expect("should solve");

        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        assert_eq!(elapsed, times);
        assert_eq!(solution.outputs().count(), 3);
    }

    #[test]
    fn rejects_non_positive_step() {
        let model = Linear {
            a: [[0.0, 0.0], [0.0, 0.0]],
        };

        for dt in [0.0, -0.1, f64::NAN] {
            let result = solve_unobserved(&model, &LinearProblem, start([0.0, 0.0]), dt, 10);
            assert!(matches!(result, Err(Error::InvalidStep(_))));
        }
    }
}
