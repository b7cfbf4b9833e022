//! Solvers for transient (initial value) problems.
//!
//! # Solvers
//!
//! - [`rk4`]: classic fourth-order Runge–Kutta with a fixed step

pub mod rk4;
