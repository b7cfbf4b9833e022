use crate::{DerivativeOf, StepIntegrable};

/// Describes how to integrate a [`Model`](crate::Model) as an initial value problem.
///
/// The model computes state derivatives; the problem knows where the state
/// lives in the model input, which part of the output is the derivative, and
/// how to rebuild an input once the state has been advanced by some `Delta`.
/// Fixed-step solvers such as RK4 call [`build_input`](Self::build_input)
/// several times per step for intermediate stages, so implementations must
/// not assume that every built input is an accepted step.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the integrated state out of a model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input does not hold a usable state.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Picks the state's time derivative out of a model evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the output does not determine a derivative.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds the model input for `state`, located `delta` past `base`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if no valid input exists for `state`.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;
}
