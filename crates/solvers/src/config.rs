use thiserror::Error;

/// Stopping parameters shared by every root finder.
///
/// The meaning of `tol` depends on the method: bisection compares it to the
/// half-width and the relative error, false position and secant to the
/// residual, and Newton-Raphson to the step size.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawConfig")
)]
pub struct Config {
    tol: f64,
    max_iters: usize,
}

/// Unchecked [`Config`] fields, validated on the way in.
#[cfg(feature = "serde-derive")]
#[derive(serde::Deserialize)]
struct RawConfig {
    tol: f64,
    max_iters: usize,
}

#[cfg(feature = "serde-derive")]
impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        Self::new(raw.tol, raw.max_iters)
    }
}

/// Errors from validating a solver configuration or its starting values.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive, got {value}")]
    Tolerance { value: f64 },

    #[error("maximum iteration count must be at least 1")]
    MaxIters,

    #[error("starting value must be finite, got {value}")]
    NonFiniteSeed { value: f64 },

    #[error("starting values must be distinct, both are {value}")]
    CoincidentSeeds { value: f64 },
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-4, 100).unwrap()
    }
}

impl Config {
    /// Creates a new config.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is not finite and positive or if
    /// `max_iters` is zero.
    pub fn new(tol: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol <= 0.0 {
            return Err(ConfigError::Tolerance { value: tol });
        }
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }

        Ok(Self { tol, max_iters })
    }

    /// Returns the convergence tolerance.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the iteration budget.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// Checks that a starting value is finite.
pub(crate) fn finite_seed(value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFiniteSeed { value })
    }
}
