//! Practice problems for the Algebrify root finders.
//!
//! Exercises are drawn from a fixed catalog of formulas. Bracketing
//! exercises get an interval across which the function changes sign, secant
//! exercises two distinct seeds, and Newton-Raphson exercises a seed where
//! the derivative is usable. All randomness comes from the caller's
//! [`rand::Rng`], so a seeded generator reproduces the same exercises.
//!
//! ```
//! use algebrify_exercises::{GeneratorConfig, History, Kind, generate};
//! use rand::{SeedableRng, rngs::StdRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let exercise = generate(Kind::Bisection, &mut rng, &GeneratorConfig::default()).unwrap();
//!
//! let outcome = exercise.solve().unwrap();
//! assert!(outcome.residual.abs() < 1.0);
//!
//! let mut history = History::new();
//! history.record(&exercise);
//! assert_eq!(history.latest().unwrap().kind, Kind::Bisection);
//! ```

mod catalog;
mod config;
mod error;
mod exercise;
mod generate;
mod history;

pub use catalog::{BRACKET_FUNCTIONS, Kind, NEWTON_PAIRS, NewtonPair};
pub use config::{ConfigError, DEFAULT_TOLERANCES, GeneratorConfig};
pub use error::Error;
pub use exercise::{BracketExercise, Exercise, NewtonExercise, Outcome, SecantExercise};
pub use generate::generate;
pub use history::{Entry, History};
