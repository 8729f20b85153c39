//! Secant method from two starting points.
//!
//! Each iteration extends the line through `(x0, f(x0))` and `(x1, f(x1))` to
//! zero, `x2 = x1 - f(x1) (x1 - x0) / (f(x1) - f(x0))`, then shifts
//! `(x0, x1) <- (x1, x2)`. The run stops when `|f(x2)|` drops below the
//! tolerance. No sign change is required, so convergence is not guaranteed.

use algebrify_core::{Function, Observer};

use crate::{
    Action, Config, ConfigError, Degeneracy, Error, Event, Failure, RunResult,
    config::finite_seed,
    driver::{Method, drive},
    evaluate::evaluate,
};

pub(crate) const NAME: &str = "secant";

/// One secant iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Iteration {
    pub iter: usize,
    pub x0: f64,
    pub x1: f64,
    pub x2: f64,
    pub fx0: f64,
    pub fx1: f64,
    pub fx2: f64,
}

impl crate::Record for Iteration {
    fn iter(&self) -> usize {
        self.iter
    }

    fn estimate(&self) -> f64 {
        self.x2
    }
}

/// Finds a root of `f` by the secant method from the seeds `[x0, x1]`.
///
/// # Errors
///
/// Fails with an empty trace if the seeds are not finite and distinct or `f`
/// cannot be evaluated at them. Fails with the partial trace if the secant
/// becomes horizontal, an evaluation fails, the budget runs out or the
/// observer stops the run.
pub fn solve<F, Obs>(
    f: &F,
    seeds: [f64; 2],
    config: &Config,
    observer: Obs,
) -> RunResult<Iteration>
where
    F: Function,
    Obs: for<'a> Observer<Event<'a, Iteration>, Action>,
{
    let method = Secant::new(f, seeds).map_err(|e| Failure::new(NAME, e, Vec::new()))?;
    drive(method, config, observer)
}

/// Finds a root of `f` by the secant method, without an observer.
///
/// # Errors
///
/// See [`solve`].
pub fn solve_unobserved<F: Function>(
    f: &F,
    seeds: [f64; 2],
    config: &Config,
) -> RunResult<Iteration> {
    solve(f, seeds, config, ())
}

struct Secant<F> {
    f: F,
    x0: f64,
    x1: f64,
    fx0: f64,
    fx1: f64,
}

impl<F: Function> Secant<F> {
    #[allow(clippy::float_cmp)]
    fn new(f: F, [x0, x1]: [f64; 2]) -> Result<Self, Error> {
        let x0 = finite_seed(x0)?;
        let x1 = finite_seed(x1)?;
        if x0 == x1 {
            return Err(ConfigError::CoincidentSeeds { value: x0 }.into());
        }
        let fx0 = evaluate(&f, "f", x0)?;
        let fx1 = evaluate(&f, "f", x1)?;

        Ok(Self { f, x0, x1, fx0, fx1 })
    }
}

impl<F: Function> Method for Secant<F> {
    type Record = Iteration;

    const NAME: &'static str = NAME;

    #[allow(clippy::float_cmp)]
    fn step(&mut self, iter: usize) -> Result<Iteration, Error> {
        let Self {
            x0, x1, fx0, fx1, ..
        } = *self;
        let degenerate = |cause| Error::DegenerateStep { iter, cause };

        if fx1 == fx0 {
            return Err(degenerate(Degeneracy::FlatSecant { x0, x1 }));
        }
        let x2 = x1 - fx1 * (x1 - x0) / (fx1 - fx0);
        if !x2.is_finite() {
            return Err(degenerate(Degeneracy::NonFiniteStep { value: x2 }));
        }
        let fx2 = evaluate(&self.f, "f", x2)?;

        Ok(Iteration {
            iter,
            x0,
            x1,
            x2,
            fx0,
            fx1,
            fx2,
        })
    }

    fn is_converged(&self, record: &Iteration, tol: f64) -> bool {
        record.fx2.abs() < tol
    }

    fn advance(&mut self, record: &Iteration) {
        self.x0 = record.x1;
        self.fx0 = record.fx1;
        self.x1 = record.x2;
        self.fx1 = record.fx2;
    }

    fn finish(&self, record: &Iteration) -> Result<(f64, f64), Error> {
        Ok((record.x2, record.fx2))
    }
}
