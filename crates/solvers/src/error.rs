use std::error::Error as StdError;

use thiserror::Error;

use crate::{bracket::BracketError, config::ConfigError};

/// Errors that end a root-finding run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid bracket: {0}")]
    InvalidBracket(#[from] BracketError),

    #[error("degenerate step at iteration {iter}: {cause}")]
    DegenerateStep { iter: usize, cause: Degeneracy },

    #[error("no convergence within {iters} iterations")]
    NotConverged { iters: usize },

    #[error("failed to evaluate {function} at x = {x}")]
    Evaluation {
        function: &'static str,
        x: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("{function}({x}) is not finite: {value}")]
    NonFiniteValue {
        function: &'static str,
        x: f64,
        value: f64,
    },

    #[error("stopped by observer after {iters} iterations")]
    StoppedByObserver { iters: usize },
}

/// Why an iteration could not produce its next point.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Degeneracy {
    #[error("f({x0}) and f({x1}) are equal, so the secant is horizontal")]
    FlatSecant { x0: f64, x1: f64 },

    #[error("derivative is zero at x = {x}")]
    ZeroDerivative { x: f64 },

    #[error("next point is not finite: {value}")]
    NonFiniteStep { value: f64 },
}

/// The coarse category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidConfig,
    InvalidBracket,
    DegenerateStep,
    NotConverged,
    EvaluationError,
    StoppedByObserver,
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidConfig(_) => FailureKind::InvalidConfig,
            Self::InvalidBracket(_) => FailureKind::InvalidBracket,
            Self::DegenerateStep { .. } => FailureKind::DegenerateStep,
            Self::NotConverged { .. } => FailureKind::NotConverged,
            Self::Evaluation { .. } | Self::NonFiniteValue { .. } => FailureKind::EvaluationError,
            Self::StoppedByObserver { .. } => FailureKind::StoppedByObserver,
        }
    }

    /// Returns true if the run was rejected before its first iteration.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidConfig(_) | Self::InvalidBracket(_))
    }
}
