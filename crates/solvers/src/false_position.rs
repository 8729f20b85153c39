//! False position (regula falsi) on a bracketing interval.
//!
//! Each iteration takes the point where the chord through `(a, f(a))` and
//! `(b, f(b))` crosses zero, `c = b - f(b) (b - a) / (f(b) - f(a))`, and keeps
//! the sub-interval across which `f` changes sign. The run stops when
//! `|f(c)|` drops below the tolerance.
//!
//! Because the sign change is strict, `f(b) - f(a)` is never zero and the
//! chord always crosses inside the bracket.

use algebrify_core::{Function, Observer};

use crate::{
    Action, Config, Degeneracy, Error, Event, Failure, RunResult,
    bracket::{Bounds, require_sign_change},
    driver::{Method, drive},
    evaluate::evaluate,
};

pub(crate) const NAME: &str = "false position";

/// One false position iteration.
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
}

impl crate::Record for Iteration {
    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> f64 {
        self.c
    }
}

/// Finds a root of `f` in `bracket` by false position.
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
    let method = FalsePosition::new(f, bracket).map_err(|e| Failure::new(NAME, e, Vec::new()))?;
    drive(method, config, observer)
}

/// Finds a root of `f` in `bracket` by false position, without an observer.
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

struct FalsePosition<F> {
    f: F,
    a: f64,
    b: f64,
    fa: f64,
    fb: f64,
}

impl<F: Function> FalsePosition<F> {
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
        })
    }
}

impl<F: Function> Method for FalsePosition<F> {
    type Record = Iteration;

    const NAME: &'static str = NAME;

    fn step(&mut self, iter: usize) -> Result<Iteration, Error> {
        let Self { a, b, fa, fb, .. } = *self;
        let c = b - fb * (b - a) / (fb - fa);
        if !c.is_finite() {
            return Err(Error::DegenerateStep {
                iter,
                cause: Degeneracy::NonFiniteStep { value: c },
            });
        }
        let fc = evaluate(&self.f, "f", c)?;

        Ok(Iteration {
            iter,
            a,
            b,
            c,
            fa,
            fb,
            fc,
        })
    }

    fn is_converged(&self, record: &Iteration, tol: f64) -> bool {
        record.fc.abs() < tol
    }

    fn advance(&mut self, record: &Iteration) {
        if self.fa * record.fc < 0.0 {
            self.b = record.c;
            self.fb = record.fc;
        } else {
            self.a = record.c;
            self.fa = record.fc;
        }
    }

    fn finish(&self, record: &Iteration) -> Result<(f64, f64), Error> {
        Ok((record.c, record.fc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrify_core::from_fn;
    use approx::assert_relative_eq;

    use crate::FailureKind;

    #[test]
    fn linear_function_converges_in_one_step() {
        let f = from_fn(|x| 2.0 * x - 1.0);
        let solution = solve_unobserved(&f, [-3.0, 4.0], &Config::default()).unwrap();

        assert_eq!(solution.iters, 1);
        assert_relative_eq!(solution.root, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn cubic_root() {
        let f = from_fn(|x: f64| x.powi(3) - x - 2.0);
        let config = Config::new(1e-10, 200).unwrap();
        let solution = solve_unobserved(&f, [1.0, 2.0], &config).unwrap();

        assert_relative_eq!(solution.root, 1.521_379_706_804_567_6, epsilon = 1e-9);
        assert!(solution.residual.abs() < 1e-10);
        assert!(solution.trace.iter().all(|r| r.a < r.c && r.c < r.b));
    }

    #[test]
    fn first_record_uses_the_chord() {
        let f = from_fn(|x| x * x - 4.0);
        let solution = solve_unobserved(&f, [0.0, 3.0], &Config::default()).unwrap();

        // chord from (0, -4) to (3, 5) crosses at 3 - 5 * 3 / 9
        let first = solution.trace[0];
        assert_relative_eq!(first.c, 3.0 - 15.0 / 9.0);
        assert_relative_eq!(first.fa, -4.0);
        assert_relative_eq!(first.fb, 5.0);
    }

    #[test]
    fn same_sign_is_rejected() {
        let f = from_fn(|x| x * x + 1.0);
        let failure = solve_unobserved(&f, [0.0, 3.0], &Config::default()).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::InvalidBracket);
        assert!(failure.trace.is_empty());

        // a zero at an endpoint is rejected as well
        let f = from_fn(|x| x - 3.0);
        let failure = solve_unobserved(&f, [0.0, 3.0], &Config::default()).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::InvalidBracket);
    }

    #[test]
    fn slow_convergence_exhausts_budget() {
        // regula falsi keeps one endpoint fixed on strongly convex functions
        let f = from_fn(|x: f64| x.powi(10) - 1.0);
        let config = Config::new(1e-12, 5).unwrap();
        let failure = solve_unobserved(&f, [0.0, 1.3], &config).unwrap_err();

        assert!(matches!(failure.error, Error::NotConverged { iters: 5 }));
        assert_eq!(failure.trace.len(), 5);
    }
}
