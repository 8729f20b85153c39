//! Root finders for real functions of one variable.
//!
//! Every method runs on the same driver: it validates its inputs, then
//! iterates, recording one row per iteration, until its stopping predicate
//! holds, an evaluation fails, the observer stops it or the iteration budget
//! runs out. A converged run returns a [`Solution`] with the full trace; a
//! failed run returns a [`Failure`] carrying the iterations completed so far.
//!
//! # Methods
//!
//! - [`bisection`]: guaranteed convergence on a sign-changing bracket
//! - [`false_position`]: chord-based bracketing, stops on the residual
//! - [`secant`]: open method from two seeds, no sign change required
//! - [`newton`]: Newton-Raphson with a separate derivative function
//! - [`scan`]: best-effort search for every root of an interval
//!
//! Each method module offers `solve`, taking an
//! [`Observer`](algebrify_core::Observer), and
//! `solve_unobserved`. The free functions [`bisect`], [`false_position()`],
//! [`secant()`] and [`newton_raphson`] take the tolerance and iteration budget
//! directly.
//!
//! Functions are anything implementing [`Function`], including compiled
//! expressions and closures wrapped with [`algebrify_core::from_fn`].
//!
//! # Logging
//!
//! Runs log their outcome at `debug` and every iteration at `trace` through
//! the [`log`] facade. No logger is installed here.

mod bracket;
mod config;
mod driver;
mod error;
mod evaluate;
mod event;
mod solution;

pub mod bisection;
pub mod false_position;
pub mod newton;
pub mod observers;
pub mod scan;
pub mod secant;

pub use bracket::BracketError;
pub use config::{Config, ConfigError};
pub use error::{Degeneracy, Error, FailureKind};
pub use event::{Action, Event};
pub use solution::{Failure, Record, RunResult, Solution};

use algebrify_core::Function;

/// Runs bisection on `[a, b]`.
///
/// # Errors
///
/// Fails with [`Error::InvalidConfig`] if `tol` or `max_iter` is invalid, and
/// otherwise as [`bisection::solve`] does.
pub fn bisect<F: Function>(
    f: &F,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> RunResult<bisection::Iteration> {
    let config = config_for(bisection::NAME, tol, max_iter)?;
    bisection::solve_unobserved(f, [a, b], &config)
}

/// Runs false position on `[a, b]`.
///
/// # Errors
///
/// Fails with [`Error::InvalidConfig`] if `tol` or `max_iter` is invalid, and
/// otherwise as [`false_position::solve`] does.
pub fn false_position<F: Function>(
    f: &F,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> RunResult<false_position::Iteration> {
    let config = config_for(false_position::NAME, tol, max_iter)?;
    false_position::solve_unobserved(f, [a, b], &config)
}

/// Runs the secant method from `x0` and `x1`.
///
/// # Errors
///
/// Fails with [`Error::InvalidConfig`] if `tol` or `max_iter` is invalid, and
/// otherwise as [`secant::solve`] does.
pub fn secant<F: Function>(
    f: &F,
    x0: f64,
    x1: f64,
    tol: f64,
    max_iter: usize,
) -> RunResult<secant::Iteration> {
    let config = config_for(secant::NAME, tol, max_iter)?;
    secant::solve_unobserved(f, [x0, x1], &config)
}

/// Runs Newton-Raphson from `x0` with derivative `fprime`.
///
/// # Errors
///
/// Fails with [`Error::InvalidConfig`] if `tol` or `max_iter` is invalid, and
/// otherwise as [`newton::solve`] does.
pub fn newton_raphson<F: Function, D: Function>(
    f: &F,
    fprime: &D,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> RunResult<newton::Iteration> {
    let config = config_for(newton::NAME, tol, max_iter)?;
    newton::solve_unobserved(f, fprime, x0, &config)
}

fn config_for<R>(method: &'static str, tol: f64, max_iter: usize) -> Result<Config, Failure<R>> {
    Config::new(tol, max_iter).map_err(|e| Failure::new(method, e, Vec::new()))
}
