use thiserror::Error;

/// Errors from validating a bracketing interval.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum BracketError {
    #[error("bracket endpoints must be finite, got [{a}, {b}]")]
    NonFinite { a: f64, b: f64 },

    #[error("bracket has zero width at {x}")]
    ZeroWidth { x: f64 },

    #[error("f changes sign nowhere on [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    NoSignChange { a: f64, b: f64, fa: f64, fb: f64 },
}

/// A finite interval with `left < right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) left: f64,
    pub(crate) right: f64,
}

impl Bounds {
    /// Validates `[a, b]`, swapping the endpoints if they are reversed.
    #[allow(clippy::float_cmp)]
    pub(crate) fn new(a: f64, b: f64) -> Result<Self, BracketError> {
        if !a.is_finite() || !b.is_finite() {
            return Err(BracketError::NonFinite { a, b });
        }
        if a == b {
            return Err(BracketError::ZeroWidth { x: a });
        }
        let (left, right) = if a < b { (a, b) } else { (b, a) };
        Ok(Self { left, right })
    }
}

/// Requires `fa` and `fb` to have strictly opposite signs.
///
/// A zero at either endpoint does not count as a sign change.
pub(crate) fn require_sign_change(a: f64, b: f64, fa: f64, fb: f64) -> Result<(), BracketError> {
    if fa * fb < 0.0 {
        Ok(())
    } else {
        Err(BracketError::NoSignChange { a, b, fa, fb })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reversed_endpoints_are_swapped() {
        let bounds = Bounds::new(3.0, -1.0).unwrap();
        assert_relative_eq!(bounds.left, -1.0);
        assert_relative_eq!(bounds.right, 3.0);
    }

    #[test]
    fn rejects_degenerate_brackets() {
        assert!(matches!(
            Bounds::new(f64::NAN, 1.0),
            Err(BracketError::NonFinite { .. })
        ));
        assert_eq!(
            Bounds::new(2.0, 2.0),
            Err(BracketError::ZeroWidth { x: 2.0 })
        );
    }

    #[test]
    fn sign_change_is_strict() {
        assert!(require_sign_change(0.0, 1.0, -1.0, 2.0).is_ok());
        assert!(require_sign_change(0.0, 1.0, 1.0, 2.0).is_err());
        assert!(require_sign_change(0.0, 1.0, 0.0, 2.0).is_err());
    }
}
