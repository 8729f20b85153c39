//! Bisection on a bracketing interval.
//!
//! # Algorithm
//!
//! Each iteration evaluates the midpoint `c = (a + b) / 2` and keeps the half
//! of the bracket across which `f` still changes sign. The run stops when
//! `f(c) == 0`, when the half-width `(b - a) / 2` drops below the tolerance,
//! or when the relative change in `c` (as a percentage) drops below the
//! tolerance.
//!
//! # When to Use
//!
//! - A sign change is known on `[a, b]`
//! - Guaranteed convergence matters more than speed
//!
//! The relative error is undefined on the first iteration and whenever the
//! midpoint is exactly zero; those records carry `None`.

use algebrify_core::{Function, Observer};

use crate::{
    Action, Config, Error, Event, Failure, RunResult,
    bracket::{Bounds, require_sign_change},
    driver::{Method, drive},
    evaluate::evaluate,
};

pub(crate) const NAME: &str = "bisection";

/// One bisection iteration.
///
/// `a` and `b` are the bracket this iteration split.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Iteration {
    pub iter: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fa: f64,
    pub fb: f64,
    pub fc: f64,

    /// `|c - c_prev| / |c| * 100`.
    pub relative_error: Option<f64>,
}

impl crate::Record for Iteration {
    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> f64 {
        self.c
    }
}

/// Finds a root of `f` in `bracket` by bisection.
///
/// The endpoints may be given in either order. The observer receives an
/// [`Event`] after every iteration.
///
/// # Errors
///
/// Fails with an empty trace if the bracket is invalid or `f` cannot be
/// evaluated at its endpoints, and with the partial trace if an evaluation
/// fails mid-run, the budget runs out or the observer stops the run.
pub fn solve<F, Obs>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
    observer: Obs,
) -> RunResult<Iteration>
where
    F: Function,
    Obs: for<'a> Observer<Event<'a, Iteration>, Action>,
{
    let method = Bisection::new(f, bracket).map_err(|e| Failure::new(NAME, e, Vec::new()))?;
    drive(method, config, observer)
}

/// Finds a root of `f` in `bracket` by bisection, without an observer.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    f: &F,
    bracket: [f64; 2],
    config: &Config,
) -> RunResult<Iteration> {
    solve(f, bracket, config, ())
}

struct Bisection<F> {
    f: F,
    a: f64,
    b: f64,
    fa: f64,
    fb: f64,
    prev: Option<f64>,
}

impl<F: Function> Bisection<F> {
    fn new(f: F, [a, b]: [f64; 2]) -> Result<Self, Error> {
        let Bounds { left, right } = Bounds::new(a, b)?;
        let fa = evaluate(&f, "f", left)?;
        let fb = evaluate(&f, "f", right)?;
        require_sign_change(left, right, fa, fb)?;

        Ok(Self {
            f,
            a: left,
            b: right,
            fa,
            fb,
            prev: None,
        })
    }
}

impl<F: Function> Method for Bisection<F> {
    type Record = Iteration;

    const NAME: &'static str = NAME;

    fn step(&mut self, iter: usize) -> Result<Iteration, Error> {
        let c = (self.a + self.b) / 2.0;
        let fc = evaluate(&self.f, "f", c)?;
        let relative_error = self.prev.and_then(|prev| relative_error(c, prev));

        Ok(Iteration {
            iter,
            a: self.a,
            b: self.b,
            c,
            fa: self.fa,
            fb: self.fb,
            fc,
            relative_error,
        })
    }

    #[allow(clippy::float_cmp)]
    fn is_converged(&self, record: &Iteration, tol: f64) -> bool {
        record.fc == 0.0
            || (record.b - record.a) / 2.0 < tol
            || record.relative_error.is_some_and(|e| e < tol)
    }

    fn advance(&mut self, record: &Iteration) {
        if self.fa * record.fc < 0.0 {
            self.b = record.c;
            self.fb = record.fc;
        } else {
            self.a = record.c;
            self.fa = record.fc;
        }
        self.prev = Some(record.c);
    }

    fn finish(&self, record: &Iteration) -> Result<(f64, f64), Error> {
        Ok((record.c, record.fc))
    }
}

/// Percent change from `prev` to `c`, undefined when `c` is zero.
#[allow(clippy::float_cmp)]
fn relative_error(c: f64, prev: f64) -> Option<f64> {
    if c == 0.0 {
        None
    } else {
        Some(((c - prev) / c).abs() * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrify_core::{from_fn, try_from_fn};
    use approx::assert_relative_eq;

    use crate::{BracketError, FailureKind};

    fn config(tol: f64, max_iters: usize) -> Config {
        Config::new(tol, max_iters).unwrap()
    }

    #[test]
    fn finds_sqrt_two() {
        let f = from_fn(|x| x * x - 2.0);
        let solution = solve_unobserved(&f, [0.0, 2.0], &config(1e-6, 100)).unwrap();

        assert_relative_eq!(solution.root, 2.0_f64.sqrt(), epsilon = 1e-6);
        assert!(solution.iters <= 22);
        assert_eq!(solution.trace.len(), solution.iters);
        assert_relative_eq!(solution.residual, solution.trace[solution.iters - 1].fc);
    }

    #[test]
    fn first_iteration_has_no_relative_error() {
        let f = from_fn(|x| x * x - 2.0);
        let solution = solve_unobserved(&f, [0.0, 2.0], &config(1e-6, 100)).unwrap();

        assert_eq!(solution.trace[0].relative_error, None);
        assert_relative_eq!(solution.trace[0].c, 1.0);

        // c goes 1 -> 1.5, a 33.3% change
        let second = solution.trace[1].relative_error.expect("defined on iteration 2");
        assert_relative_eq!(second, 100.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn keeps_the_sign_changing_half() {
        let f = from_fn(|x| x - 0.3);
        let solution = solve_unobserved(&f, [0.0, 1.0], &config(1e-3, 100)).unwrap();

        for pair in solution.trace.windows(2) {
            let [prev, next] = pair else { unreachable!() };
            assert!(next.b - next.a < prev.b - prev.a);
            assert!(next.a <= 0.3 && 0.3 <= next.b);
        }
    }

    #[test]
    fn reversed_bracket_is_normalized() {
        let f = from_fn(|x| x * x * x - 4.0 * x + 1.0);
        let solution = solve_unobserved(&f, [1.0, 0.0], &Config::default()).unwrap();

        let first = solution.trace[0];
        assert_relative_eq!(first.a, 0.0);
        assert_relative_eq!(first.b, 1.0);
        assert_relative_eq!(solution.root, 0.254_101_688, epsilon = 1e-4);
    }

    #[test]
    fn exact_root_at_midpoint_stops() {
        let f = from_fn(|x| x - 1.0);
        let solution = solve_unobserved(&f, [0.0, 2.0], &config(1e-12, 100)).unwrap();

        assert_eq!(solution.iters, 1);
        assert_relative_eq!(solution.root, 1.0);
    }

    #[test]
    fn no_sign_change_is_rejected_without_records() {
        let f = from_fn(|x| x * x + 1.0);
        let failure = solve_unobserved(&f, [-1.0, 1.0], &Config::default()).unwrap_err();

        assert_eq!(failure.kind(), FailureKind::InvalidBracket);
        assert!(failure.trace.is_empty());
        assert!(matches!(
            failure.error,
            Error::InvalidBracket(BracketError::NoSignChange { .. })
        ));
    }

    #[test]
    fn zero_at_endpoint_is_not_a_sign_change() {
        let f = from_fn(|x| x);
        let failure = solve_unobserved(&f, [0.0, 1.0], &Config::default()).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::InvalidBracket);
    }

    #[test]
    fn budget_exhaustion_keeps_every_record() {
        let f = from_fn(|x| x * x - 2.0);
        let failure = solve_unobserved(&f, [0.0, 2.0], &config(1e-12, 5)).unwrap_err();

        assert!(matches!(failure.error, Error::NotConverged { iters: 5 }));
        assert_eq!(failure.trace.len(), 5);
    }

    #[test]
    fn evaluation_error_mid_run_keeps_partial_trace() {
        // Undefined at the second midpoint, 0.5.
        let f = try_from_fn(|x: f64| {
            if (x - 0.5).abs() < 1e-12 {
                Err(std::fmt::Error)
            } else {
                Ok(x - 0.2)
            }
        });
        let failure = solve_unobserved(&f, [0.0, 2.0], &config(1e-9, 100)).unwrap_err();

        assert_eq!(failure.kind(), FailureKind::EvaluationError);
        assert_eq!(failure.trace.len(), 1);
    }

    #[test]
    fn observer_can_stop_early() {
        let f = from_fn(|x| x * x - 2.0);
        let observer =
            |event: &Event<'_, Iteration>| (event.iter == 3).then_some(Action::StopEarly);
        let failure = solve(&f, [0.0, 2.0], &config(1e-9, 100), observer).unwrap_err();

        assert_eq!(failure.kind(), FailureKind::StoppedByObserver);
        assert_eq!(failure.trace.len(), 3);
    }
}
