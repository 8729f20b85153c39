use algebrify_expr::ParseError;
use thiserror::Error;

use crate::Kind;

/// Errors from generating or solving exercises.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no valid {kind} exercise found in {attempts} attempts")]
    Exhausted { kind: Kind, attempts: usize },

    #[error("formula `{formula}` does not compile: {source}")]
    Compile {
        formula: String,
        #[source]
        source: ParseError,
    },

    #[error("{kind} exercise could not be solved: {source}")]
    Solve {
        kind: Kind,
        #[source]
        source: algebrify_solvers::Error,
    },
}
