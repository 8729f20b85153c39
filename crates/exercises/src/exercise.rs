use std::fmt;

use algebrify_expr::{Expression, compile_expression};
use algebrify_solvers::{RunResult, Solution};

use crate::{Error, Kind};

/// A bracketing problem, solvable by bisection or false position.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct BracketExercise {
    pub function: String,
    pub a: f64,
    pub b: f64,
    pub tol: f64,
    pub max_iters: usize,
}

/// A secant problem with two distinct seeds.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct SecantExercise {
    pub function: String,
    pub x0: f64,
    pub x1: f64,
    pub tol: f64,
    pub max_iters: usize,
}

/// A Newton-Raphson problem with its derivative.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct NewtonExercise {
    pub function: String,
    pub derivative: String,
    pub x0: f64,
    pub tol: f64,
    pub max_iters: usize,
}

/// A practice problem for one of the root finders.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Exercise {
    Bisection(BracketExercise),
    FalsePosition(BracketExercise),
    Secant(SecantExercise),
    Newton(NewtonExercise),
}

/// The result of solving an exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub root: f64,
    pub residual: f64,
    pub iters: usize,
}

impl<R> From<Solution<R>> for Outcome {
    fn from(solution: Solution<R>) -> Self {
        Self {
            root: solution.root,
            residual: solution.residual,
            iters: solution.iters,
        }
    }
}

impl Exercise {
    /// Returns the method this exercise is meant for.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Exercise::Bisection(_) => Kind::Bisection,
            Exercise::FalsePosition(_) => Kind::FalsePosition,
            Exercise::Secant(_) => Kind::Secant,
            Exercise::Newton(_) => Kind::Newton,
        }
    }

    /// Returns the formula whose root is sought.
    #[must_use]
    pub fn function(&self) -> &str {
        match self {
            Exercise::Bisection(e) | Exercise::FalsePosition(e) => &e.function,
            Exercise::Secant(e) => &e.function,
            Exercise::Newton(e) => &e.function,
        }
    }

    /// Compiles the exercise's formulas and runs its method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Compile`] if a formula does not compile and
    /// [`Error::Solve`] if the method fails.
    pub fn solve(&self) -> Result<Outcome, Error> {
        let kind = self.kind();
        let f = compile(self.function())?;
        match self {
            Exercise::Bisection(e) => settle(
                kind,
                algebrify_solvers::bisect(&f, e.a, e.b, e.tol, e.max_iters),
            ),
            Exercise::FalsePosition(e) => settle(
                kind,
                algebrify_solvers::false_position(&f, e.a, e.b, e.tol, e.max_iters),
            ),
            Exercise::Secant(e) => settle(
                kind,
                algebrify_solvers::secant(&f, e.x0, e.x1, e.tol, e.max_iters),
            ),
            Exercise::Newton(e) => {
                let df = compile(&e.derivative)?;
                settle(
                    kind,
                    algebrify_solvers::newton_raphson(&f, &df, e.x0, e.tol, e.max_iters),
                )
            }
        }
    }
}

// Each method has its own record type, so results are settled per method.
fn settle<R>(kind: Kind, result: RunResult<R>) -> Result<Outcome, Error> {
    result.map(Outcome::from).map_err(|failure| Error::Solve {
        kind,
        source: failure.error,
    })
}

pub(crate) fn compile(formula: &str) -> Result<Expression, Error> {
    compile_expression(formula, ["x"]).map_err(|source| Error::Compile {
        formula: formula.to_owned(),
        source,
    })
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exercise::Bisection(e) | Exercise::FalsePosition(e) => write!(
                f,
                "f(x) = {} on [{:.6}, {:.6}], tol = {:e}",
                e.function, e.a, e.b, e.tol
            ),
            Exercise::Secant(e) => write!(
                f,
                "f(x) = {}, x0 = {:.6}, x1 = {:.6}, tol = {:e}",
                e.function, e.x0, e.x1, e.tol
            ),
            Exercise::Newton(e) => write!(
                f,
                "f(x) = {}, f'(x) = {}, x0 = {:.6}, tol = {:e}",
                e.function, e.derivative, e.x0, e.tol
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn bracket(function: &str, a: f64, b: f64) -> BracketExercise {
        BracketExercise {
            function: function.to_owned(),
            a,
            b,
            tol: 1e-6,
            max_iters: 100,
        }
    }

    #[test]
    fn solves_each_kind() {
        let sqrt5 = 5.0_f64.sqrt();

        let outcome = Exercise::Bisection(bracket("x^2 - 5", 0.0, 3.0))
            .solve()
            .unwrap();
        assert_relative_eq!(outcome.root, sqrt5, epsilon = 1e-6);

        let outcome = Exercise::FalsePosition(bracket("x^2 - 5", 0.0, 3.0))
            .solve()
            .unwrap();
        assert_relative_eq!(outcome.root, sqrt5, epsilon = 1e-6);

        let outcome = Exercise::Secant(SecantExercise {
            function: "x^2 - 5".to_owned(),
            x0: 1.0,
            x1: 3.0,
            tol: 1e-8,
            max_iters: 100,
        })
        .solve()
        .unwrap();
        assert_relative_eq!(outcome.root, sqrt5, epsilon = 1e-6);

        let outcome = Exercise::Newton(NewtonExercise {
            function: "x^2 - 5".to_owned(),
            derivative: "2x".to_owned(),
            x0: 2.0,
            tol: 1e-10,
            max_iters: 100,
        })
        .solve()
        .unwrap();
        assert_relative_eq!(outcome.root, sqrt5, epsilon = 1e-9);
        assert!(outcome.iters <= 6);
    }

    #[test]
    fn failures_name_the_method() {
        let err = Exercise::FalsePosition(bracket("x^2 + 1", 0.0, 3.0))
            .solve()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Solve {
                kind: Kind::FalsePosition,
                source: algebrify_solvers::Error::InvalidBracket(_),
            }
        ));

        let err = Exercise::Bisection(bracket("x^^2", 0.0, 3.0))
            .solve()
            .unwrap_err();
        assert!(matches!(err, Error::Compile { ref formula, .. } if formula == "x^^2"));
    }

    #[test]
    fn display_lists_the_inputs() {
        let exercise = Exercise::Bisection(bracket("cos(x) - x", 0.0, 1.0));
        assert_eq!(
            exercise.to_string(),
            "f(x) = cos(x) - x on [0.000000, 1.000000], tol = 1e-6"
        );
        assert_eq!(exercise.kind(), Kind::Bisection);
        assert_eq!(exercise.function(), "cos(x) - x");
    }
}
