use thiserror::Error;

/// Tolerances offered by default, coarsest first.
pub const DEFAULT_TOLERANCES: [f64; 5] = [1e-2, 1e-3, 1e-4, 1e-5, 1e-6];

/// Controls how random exercises are drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGeneratorConfig")
)]
pub struct GeneratorConfig {
    attempts: usize,
    range: [f64; 2],
    seed_range: [f64; 2],
    tolerances: Vec<f64>,
    max_iters: usize,
}

/// Unchecked [`GeneratorConfig`] fields, validated on the way in.
#[cfg(feature = "serde-derive")]
#[derive(serde::Deserialize)]
struct RawGeneratorConfig {
    attempts: usize,
    range: [f64; 2],
    seed_range: [f64; 2],
    tolerances: Vec<f64>,
    max_iters: usize,
}

#[cfg(feature = "serde-derive")]
impl TryFrom<RawGeneratorConfig> for GeneratorConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGeneratorConfig) -> Result<Self, Self::Error> {
        Self::new(raw.attempts, raw.range, raw.tolerances)?
            .with_seed_range(raw.seed_range)?
            .with_max_iters(raw.max_iters)
    }
}

/// Errors from validating a [`GeneratorConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("attempt budget must be at least 1")]
    Attempts,

    #[error("range [{low}, {high}] must be finite with low < high")]
    Range { low: f64, high: f64 },

    #[error("at least one tolerance is required")]
    NoTolerances,

    #[error("tolerance must be finite and positive, got {value}")]
    Tolerance { value: f64 },

    #[error("maximum iteration count must be at least 1")]
    MaxIters,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(100, [-10.0, 10.0], DEFAULT_TOLERANCES.to_vec())
            .unwrap()
            .with_seed_range([0.5, 3.0])
            .unwrap()
    }
}

impl GeneratorConfig {
    /// Creates a new config.
    ///
    /// `range` bounds the endpoints and seeds of bracketing and secant
    /// exercises. Newton seeds come from [`seed_range`](Self::seed_range),
    /// which defaults to `range`. Generated exercises allow 100 iterations.
    ///
    /// # Errors
    ///
    /// Returns an error if `attempts` is zero, if `range` is not a finite
    /// increasing pair, or if `tolerances` is empty or holds a value that is
    /// not finite and positive.
    pub fn new(attempts: usize, range: [f64; 2], tolerances: Vec<f64>) -> Result<Self, ConfigError> {
        if attempts == 0 {
            return Err(ConfigError::Attempts);
        }
        check_range(range)?;
        if tolerances.is_empty() {
            return Err(ConfigError::NoTolerances);
        }
        if let Some(&value) = tolerances.iter().find(|t| !t.is_finite() || **t <= 0.0) {
            return Err(ConfigError::Tolerance { value });
        }

        Ok(Self {
            attempts,
            range,
            seed_range: range,
            tolerances,
            max_iters: 100,
        })
    }

    /// Sets the interval Newton seeds are drawn from.
    ///
    /// # Errors
    ///
    /// Returns an error if `seed_range` is not a finite increasing pair.
    pub fn with_seed_range(mut self, seed_range: [f64; 2]) -> Result<Self, ConfigError> {
        check_range(seed_range)?;
        self.seed_range = seed_range;
        Ok(self)
    }

    /// Sets the iteration budget written into generated exercises.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iters` is zero.
    pub fn with_max_iters(mut self, max_iters: usize) -> Result<Self, ConfigError> {
        if max_iters == 0 {
            return Err(ConfigError::MaxIters);
        }
        self.max_iters = max_iters;
        Ok(self)
    }

    /// Returns how many draws are tried before giving up.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Returns the interval endpoints and secant seeds are drawn from.
    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Returns the interval Newton seeds are drawn from.
    #[must_use]
    pub fn seed_range(&self) -> [f64; 2] {
        self.seed_range
    }

    /// Returns the tolerances to choose from. Never empty.
    #[must_use]
    pub fn tolerances(&self) -> &[f64] {
        &self.tolerances
    }

    /// Returns the iteration budget of generated exercises.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

fn check_range([low, high]: [f64; 2]) -> Result<(), ConfigError> {
    if low.is_finite() && high.is_finite() && low < high {
        Ok(())
    } else {
        Err(ConfigError::Range { low, high })
    }
}
