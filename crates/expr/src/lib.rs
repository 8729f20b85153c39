//! Safe compiler for user-typed algebraic formulas.
//!
//! A formula is tokenized, parsed by a recursive-descent parser into a small
//! tree, and evaluated by walking that tree. Nothing in the source text is
//! ever executed: the only reachable operations are arithmetic, powers, the
//! [`Builtin`] functions and the constants in the active [`NameTable`].
//!
//! Accepted notation:
//!
//! - `^` and `**` for powers, right associative (`2^3^2 = 2^9`, `-2^2 = -4`)
//! - implicit products (`3x`, `2(x+1)`, `x sin(x)`, `xsin(x)`, `(x+1)(x-1)`)
//! - function calls with or without parentheses (`sin(x)`, `sin x`, `sin 2x`)
//! - English and Spanish function names (`sen`, `raiz`, `tg`)
//!
//! ```
//! use algebrify_core::Function;
//! use algebrify_expr::compile_expression;
//!
//! let f = compile_expression("3x^2 + x sen(x)", ["x"]).unwrap();
//! let y = f.call(1.0).unwrap();
//! assert!((y - (3.0 + 1.0_f64.sin())).abs() < 1e-12);
//! ```

mod ast;
mod error;
mod expression;
mod lexer;
mod names;
mod parser;

pub use error::{EvalError, ParseError};
pub use expression::{Compiler, Expression, compile_expression};
pub use names::{Builtin, Entry, NameTable};
