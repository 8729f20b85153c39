use thiserror::Error;

/// Errors raised while compiling a formula.
///
/// Positions are zero-based character offsets into the source text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character {ch:?} at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("malformed number {text:?} at position {pos}")]
    MalformedNumber { text: String, pos: usize },

    #[error("unknown name `{name}` at position {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("unexpected {found} at position {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("expression ended unexpectedly")]
    UnexpectedEnd,

    #[error("parenthesis opened at position {pos} is never closed")]
    UnclosedParen { pos: usize },

    #[error("expression nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error("expression is too large: its tree would be more than {limit} levels tall")]
    TooLarge { limit: usize },

    #[error("`{name}` is not a valid variable name")]
    InvalidVariable { name: String },

    #[error("variable `{name}` shadows a built-in name")]
    ReservedVariable { name: String },
}

/// Errors raised while evaluating a compiled expression.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvalError {
    #[error("variable `{name}` has no value")]
    Unbound { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("{function}({arg}) is undefined")]
    Domain { function: &'static str, arg: f64 },

    #[error("{base}^{exponent} is undefined")]
    Power { base: f64, exponent: f64 },

    #[error("result is not a finite number: {value}")]
    NonFinite { value: f64 },
}
