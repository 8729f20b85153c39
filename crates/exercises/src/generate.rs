//! Random exercise generation.
//!
//! Every generator draws candidates from the catalog until one is usable or
//! the attempt budget runs out. Candidates that cannot be evaluated count as
//! failed attempts.

use algebrify_core::Function;
use algebrify_expr::Expression;
use rand::Rng;

use crate::{
    BRACKET_FUNCTIONS, BracketExercise, Error, Exercise, GeneratorConfig, Kind, NEWTON_PAIRS,
    NewtonExercise, SecantExercise, exercise::compile,
};

/// Draws a random exercise for `kind`.
///
/// # Errors
///
/// Returns [`Error::Exhausted`] if no usable exercise turns up within the
/// configured number of attempts.
pub fn generate<R: Rng + ?Sized>(
    kind: Kind,
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<Exercise, Error> {
    let exercise = match kind {
        Kind::Bisection => Exercise::Bisection(bracket(kind, rng, config)?),
        Kind::FalsePosition => Exercise::FalsePosition(bracket(kind, rng, config)?),
        Kind::Secant => Exercise::Secant(secant(rng, config)?),
        Kind::Newton => Exercise::Newton(newton(rng, config)?),
    };
    log::debug!("generated {kind} exercise: {exercise}");
    Ok(exercise)
}

#[allow(clippy::float_cmp)]
fn bracket<R: Rng + ?Sized>(
    kind: Kind,
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<BracketExercise, Error> {
    let catalog = compile_all(BRACKET_FUNCTIONS)?;
    let [low, high] = config.range();

    for _ in 0..config.attempts() {
        let (formula, f) = pick(rng, &catalog);
        let x = rng.gen_range(low..=high);
        let y = rng.gen_range(low..=high);
        if x == y {
            continue;
        }
        let (a, b) = (x.min(y), x.max(y));

        match (f.call(a), f.call(b)) {
            (Ok(fa), Ok(fb)) if fa * fb < 0.0 => {
                return Ok(BracketExercise {
                    function: (*formula).to_owned(),
                    a,
                    b,
                    tol: pick_tol(rng, config),
                    max_iters: config.max_iters(),
                });
            }
            _ => log::trace!("rejected `{formula}` on [{a}, {b}]"),
        }
    }

    Err(exhausted(kind, config))
}

#[allow(clippy::float_cmp)]
fn secant<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> Result<SecantExercise, Error> {
    let catalog = compile_all(BRACKET_FUNCTIONS)?;
    let [low, high] = config.range();

    for _ in 0..config.attempts() {
        let (formula, f) = pick(rng, &catalog);
        let x0 = rng.gen_range(low..=high);
        let x1 = rng.gen_range(low..=high);
        if x0 == x1 {
            continue;
        }

        match (f.call(x0), f.call(x1)) {
            (Ok(f0), Ok(f1)) if f0 != f1 => {
                return Ok(SecantExercise {
                    function: (*formula).to_owned(),
                    x0,
                    x1,
                    tol: pick_tol(rng, config),
                    max_iters: config.max_iters(),
                });
            }
            _ => log::trace!("rejected `{formula}` from {x0} and {x1}"),
        }
    }

    Err(exhausted(Kind::Secant, config))
}

#[allow(clippy::float_cmp)]
fn newton<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> Result<NewtonExercise, Error> {
    let catalog = NEWTON_PAIRS
        .iter()
        .map(|pair| -> Result<_, Error> {
            Ok((pair, compile(pair.function)?, compile(pair.derivative)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let [low, high] = config.seed_range();

    for _ in 0..config.attempts() {
        let (pair, f, df) = pick(rng, &catalog);
        let x0 = rng.gen_range(low..=high);

        match (f.call(x0), df.call(x0)) {
            (Ok(_), Ok(slope)) if slope != 0.0 => {
                return Ok(NewtonExercise {
                    function: pair.function.to_owned(),
                    derivative: pair.derivative.to_owned(),
                    x0,
                    tol: pick_tol(rng, config),
                    max_iters: config.max_iters(),
                });
            }
            _ => log::trace!("rejected `{}` from {x0}", pair.function),
        }
    }

    Err(exhausted(Kind::Newton, config))
}

fn compile_all(
    formulas: &'static [&'static str],
) -> Result<Vec<(&'static str, Expression)>, Error> {
    formulas
        .iter()
        .map(|&formula| -> Result<_, Error> { Ok((formula, compile(formula)?)) })
        .collect()
}

// Catalogs and tolerance lists are never empty.
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn pick_tol<R: Rng + ?Sized>(rng: &mut R, config: &GeneratorConfig) -> f64 {
    *pick(rng, config.tolerances())
}

fn exhausted(kind: Kind, config: &GeneratorConfig) -> Error {
    Error::Exhausted {
        kind,
        attempts: config.attempts(),
    }
}
