use algebrify_core::Function;

use crate::Error;

/// Evaluates `f` at `x`, requiring a finite result.
///
/// `name` labels the function in error messages (`"f"` or `"f'"`).
pub(crate) fn evaluate<F: Function>(f: &F, name: &'static str, x: f64) -> Result<f64, Error> {
    let value = f.call(x).map_err(|e| Error::Evaluation {
        function: name,
        x,
        source: Box::new(e),
    })?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteValue {
            function: name,
            x,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrify_core::{from_fn, try_from_fn};

    #[test]
    fn passes_finite_values() {
        let f = from_fn(|x| 2.0 * x);
        assert!(matches!(evaluate(&f, "f", 1.5), Ok(v) if v == 3.0));
    }

    #[test]
    fn rejects_non_finite_values() {
        let f = from_fn(|x: f64| 1.0 / x);
        assert!(matches!(
            evaluate(&f, "f", 0.0),
            Err(Error::NonFiniteValue { function: "f", .. })
        ));
    }

    #[test]
    fn boxes_function_errors() {
        let f = try_from_fn(|_| Err::<f64, _>(std::fmt::Error));
        let err = evaluate(&f, "f'", 4.0).unwrap_err();
        assert!(matches!(
            err,
            Error::Evaluation { function: "f'", x, .. } if x == 4.0
        ));
    }
}
