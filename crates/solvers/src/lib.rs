//! Transient solvers for the LTI response workspace.
//!
//! Solvers integrate any [`Model`] paired with an [`OdeProblem`] and report
//! every accepted step to an [`Observer`].
//!
//! # Modules
//!
//! - [`transient`]: fixed-step time integration ([`transient::rk4`])
//!
//! [`Model`]: lti_core::Model
//! [`OdeProblem`]: lti_core::OdeProblem
//! [`Observer`]: lti_core::Observer

pub mod transient;
