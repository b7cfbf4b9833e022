//! Core traits and types shared by the LTI response workspace.
//!
//! This crate defines the abstractions that the solvers and the response
//! engine build on:
//!
//! - [`Model`]: a deterministic callable that maps a typed input to a typed output
//! - [`Snapshot`]: a captured input/output pair from a model call
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`OdeProblem`]: adapts a model to a state that can be stepped through time
//! - [`constraint`]: type-level numeric invariants such as "strictly positive"

pub mod constraint;

mod model;
mod observer;
mod problems;
mod step;

pub use observer::Observer;
pub use problems::OdeProblem;
pub use step::{DerivativeOf, StepIntegrable};
pub use {model::Model, model::Snapshot};
