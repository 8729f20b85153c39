use std::convert::Infallible;

/// A real function of one real variable.
///
/// Evaluation may fail, for example when a compiled expression leaves its
/// domain. Solvers treat any error as fatal for the current run.
pub trait Function {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the function at `x`.
    ///
    /// # Errors
    ///
    /// Returns an error if the function is undefined at `x`.
    fn call(&self, x: f64) -> Result<f64, Self::Error>;
}

impl<T: Function + ?Sized> Function for &T {
    type Error = T::Error;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        (**self).call(x)
    }
}

/// A [`Function`] backed by an infallible closure.
///
/// Created by [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Wraps a plain `f64 -> f64` closure as a [`Function`].
///
/// ```
/// use algebrify_core::{Function, from_fn};
///
/// let f = from_fn(|x| x * x - 2.0);
/// assert_eq!(f.call(2.0), Ok(2.0));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(f64) -> f64,
{
    FromFn(f)
}

impl<F> Function for FromFn<F>
where
    F: Fn(f64) -> f64,
{
    type Error = Infallible;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        Ok((self.0)(x))
    }
}

/// A [`Function`] backed by a fallible closure.
///
/// Created by [`try_from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct TryFromFn<F>(F);

/// Wraps a fallible `f64 -> Result<f64, E>` closure as a [`Function`].
pub fn try_from_fn<F, E>(f: F) -> TryFromFn<F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    TryFromFn(f)
}

impl<F, E> Function for TryFromFn<F>
where
    F: Fn(f64) -> Result<f64, E>,
    E: std::error::Error + Send + Sync + 'static,
{
    type Error = E;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        (self.0)(x)
    }
}
