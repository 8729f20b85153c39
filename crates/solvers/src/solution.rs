use std::{error::Error as StdError, fmt};

use crate::{Error, FailureKind};

/// One row of an iteration trace.
pub trait Record: Clone + fmt::Debug {
    /// Returns the 1-based iteration index.
    fn iter(&self) -> usize;

    /// Returns the root estimate produced by this iteration.
    fn estimate(&self) -> f64;
}

/// A converged run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<R> {
    /// The accepted root, equal to the last record's estimate.
    pub root: f64,

    /// The function value at the accepted root.
    pub residual: f64,

    /// Number of iterations performed.
    pub iters: usize,

    /// Every iteration, in order.
    pub trace: Vec<R>,
}

/// A failed run and the iterations completed before it failed.
///
/// Precondition failures carry an empty trace.
#[derive(Debug)]
pub struct Failure<R> {
    /// The method that failed.
    pub method: &'static str,

    /// What went wrong.
    pub error: Error,

    /// The iterations completed before the failure.
    pub trace: Vec<R>,
}

/// The outcome of a root-finding run.
pub type RunResult<R> = Result<Solution<R>, Failure<R>>;

impl<R> Failure<R> {
    pub(crate) fn new(method: &'static str, error: impl Into<Error>, trace: Vec<R>) -> Self {
        Self {
            method,
            error: error.into(),
            trace,
        }
    }

    /// Returns the category of the underlying error.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.error.kind()
    }
}

impl<R> fmt::Display for Failure<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed", self.method)?;
        if !self.trace.is_empty() {
            write!(f, " after {} iterations", self.trace.len())?;
        }
        write!(f, ": {}", self.error)
    }
}

impl<R: fmt::Debug> StdError for Failure<R> {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.error)
    }
}
