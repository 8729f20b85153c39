//! Newton-Raphson iteration with a caller-supplied derivative.
//!
//! Each iteration evaluates `f(x)` and `f'(x)` and steps to
//! `x_next = x - f(x) / f'(x)`. The run stops when the step size
//! `|x_next - x|` drops below the tolerance; `f` is then evaluated once more
//! at the accepted root to report its residual.
//!
//! The derivative is an independent [`Function`], so it can be a compiled
//! expression, a closure or a finite-difference approximation. Nothing checks
//! that it matches `f`.

use algebrify_core::{Function, Observer};

use crate::{
    Action, Config, Degeneracy, Error, Event, Failure, RunResult,
    config::finite_seed,
    driver::{Method, drive},
    evaluate::evaluate,
};

pub(crate) const NAME: &str = "newton-raphson";

/// One Newton-Raphson iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Iteration {
    pub iter: usize,
    pub x: f64,
    pub fx: f64,
    pub dfx: f64,
    pub x_next: f64,
}

impl crate::Record for Iteration {
    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> f64 {
        self.x_next
    }
}

/// Finds a root of `f` by Newton-Raphson iteration from `x0`.
///
/// # Errors
///
/// Fails with an empty trace if `x0` is not finite. Fails with the partial
/// trace if the derivative vanishes, either function cannot be evaluated, the
/// budget runs out or the observer stops the run. A failure to evaluate `f`
/// at the converged root is reported with the full trace.
pub fn solve<F, D, Obs>(
    f: &F,
    fprime: &D,
    x0: f64,
    config: &Config,
    observer: Obs,
) -> RunResult<Iteration>
where
    F: Function,
    D: Function,
    Obs: for<'a> Observer<Event<'a, Iteration>, Action>,
{
    let x = finite_seed(x0).map_err(|e| Failure::new(NAME, e, Vec::new()))?;
    let method = Newton { f, fprime, x };
    drive(method, config, observer)
}

/// Finds a root of `f` by Newton-Raphson iteration, without an observer.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F, D>(
    f: &F,
    fprime: &D,
    x0: f64,
    config: &Config,
) -> RunResult<Iteration>
where
    F: Function,
    D: Function,
{
    solve(f, fprime, x0, config, ())
}

struct Newton<F, D> {
    f: F,
    fprime: D,
    x: f64,
}

impl<F: Function, D: Function> Method for Newton<F, D> {
    type Record = Iteration;

    const NAME: &'static str = NAME;

    #[allow(clippy::float_cmp)]
    fn step(&mut self, iter: usize) -> Result<Iteration, Error> {
        let x = self.x;
        let fx = evaluate(&self.f, "f", x)?;
        let dfx = evaluate(&self.fprime, "f'", x)?;
        let degenerate = |cause| Error::DegenerateStep { iter, cause };

        if dfx == 0.0 {
            return Err(degenerate(Degeneracy::ZeroDerivative { x }));
        }
        let x_next = x - fx / dfx;
        if !x_next.is_finite() {
            return Err(degenerate(Degeneracy::NonFiniteStep { value: x_next }));
        }

        Ok(Iteration {
            iter,
            x,
            fx,
            dfx,
            x_next,
        })
    }

    fn is_converged(&self, record: &Iteration, tol: f64) -> bool {
        (record.x_next - record.x).abs() < tol
    }

    fn advance(&mut self, record: &Iteration) {
        self.x = record.x_next;
    }

    fn finish(&self, record: &Iteration) -> Result<(f64, f64), Error> {
        let residual = evaluate(&self.f, "f", record.x_next)?;
        Ok((record.x_next, residual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrify_core::{from_fn, try_from_fn};
    use approx::assert_relative_eq;

    use crate::FailureKind;

    #[test]
    fn finds_sqrt_two() {
        let f = from_fn(|x| x * x - 2.0);
        let df = from_fn(|x| 2.0 * x);
        let config = Config::new(1e-12, 50).unwrap();
        let solution = solve_unobserved(&f, &df, 1.5, &config).unwrap();

        assert_relative_eq!(solution.root, 2.0_f64.sqrt(), epsilon = 1e-12);
        assert!(solution.residual.abs() < 1e-12);
        assert!(solution.iters <= 6);
    }

    #[test]
    fn zero_derivative_on_first_iteration() {
        let f = from_fn(|x| x * x);
        let df = from_fn(|x| 2.0 * x);
        let failure = solve_unobserved(&f, &df, 0.0, &Config::default()).unwrap_err();

        assert_eq!(failure.kind(), FailureKind::DegenerateStep);
        assert!(matches!(
            failure.error,
            Error::DegenerateStep {
                iter: 1,
                cause: Degeneracy::ZeroDerivative { x },
            } if x == 0.0
        ));
        assert!(failure.trace.is_empty());
    }

    #[test]
    fn records_chain_their_points() {
        let f = from_fn(|x: f64| x.exp() - 3.0);
        let df = from_fn(f64::exp);
        let solution = solve_unobserved(&f, &df, 0.0, &Config::default()).unwrap();

        let first = solution.trace[0];
        assert_relative_eq!(first.x, 0.0);
        assert_relative_eq!(first.fx, -2.0);
        assert_relative_eq!(first.dfx, 1.0);
        assert_relative_eq!(first.x_next, 2.0);
        for pair in solution.trace.windows(2) {
            let [prev, next] = pair else { unreachable!() };
            assert_relative_eq!(next.x, prev.x_next);
        }
        assert_relative_eq!(solution.root, 3.0_f64.ln(), epsilon = 1e-6);
    }

    #[test]
    fn oscillation_exhausts_budget() {
        // atan overshoots from x0 = 2 and diverges
        let f = from_fn(f64::atan);
        let df = from_fn(|x: f64| 1.0 / (1.0 + x * x));
        let config = Config::new(1e-10, 5).unwrap();
        let failure = solve_unobserved(&f, &df, 2.0, &config).unwrap_err();

        assert!(matches!(failure.error, Error::NotConverged { iters: 5 }));
        assert_eq!(failure.trace.len(), 5);
    }

    #[test]
    fn derivative_errors_are_labelled() {
        let f = from_fn(|x| x - 1.0);
        let df = try_from_fn(|_| Err::<f64, _>(std::fmt::Error));
        let failure = solve_unobserved(&f, &df, 3.0, &Config::default()).unwrap_err();

        assert!(matches!(
            failure.error,
            Error::Evaluation { function: "f'", .. }
        ));
    }

    #[test]
    fn residual_check_failure_keeps_trace() {
        // undefined left of 2; the too-small derivative overshoots into it
        let f = try_from_fn(|x: f64| {
            if x < 2.0 {
                Err(std::fmt::Error)
            } else {
                Ok(x - 2.0)
            }
        });
        let df = from_fn(|_| 0.5);
        let failure = solve_unobserved(&f, &df, 2.0 + 1e-5, &Config::default()).unwrap_err();

        assert_eq!(failure.kind(), FailureKind::EvaluationError);
        assert_eq!(failure.trace.len(), 1);
        assert!(failure.trace[0].x_next < 2.0);
    }

    #[test]
    fn non_finite_seed_is_rejected() {
        let f = from_fn(|x| x);
        let failure = solve_unobserved(&f, &f, f64::INFINITY, &Config::default()).unwrap_err();
        assert_eq!(failure.kind(), FailureKind::InvalidConfig);
    }
}
