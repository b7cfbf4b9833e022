/// A state that can be advanced using its derivative.
///
/// Stepping computes `state + derivative * delta`. Integrators that combine
/// several derivative evaluations per step (RK4, for instance) form the
/// weighted derivative first and then step once, so implementations only
/// need this single operation.
///
/// `Delta` is usually time, either a plain `f64` in seconds or a dimensioned
/// `uom` quantity.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// The derivative of a [`StepIntegrable`] type with respect to `Delta`.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
