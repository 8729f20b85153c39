//! Core traits for the Algebrify numerical core.
//!
//! This crate defines the shared abstractions that the expression compiler
//! and the root-finding solvers build on:
//!
//! - [`Function`]: a scalar real function that may fail to evaluate
//! - [`Observer`]: receives solver events and optionally returns control actions
//!
//! Solvers depend only on these traits, so a compiled
//! expression and a plain closure can be handed to them interchangeably.

mod function;
mod observer;

pub use function::{FromFn, Function, TryFromFn, from_fn, try_from_fn};
pub use observer::Observer;
