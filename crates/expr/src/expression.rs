use std::collections::HashMap;
use std::fmt;

use algebrify_core::Function;

use crate::ast::Node;
use crate::error::{EvalError, ParseError};
use crate::lexer::tokenize;
use crate::names::NameTable;
use crate::parser::parse;

/// A validated formula, ready to evaluate.
///
/// An `Expression` can only compute arithmetic, powers and allow-listed
/// functions of its declared variables. Evaluating it at finite inputs
/// either returns a finite number or an [`EvalError`].
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    variables: Vec<String>,
    root: Node,
}

impl Expression {
    /// Returns the source text the expression was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the declared variables in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Evaluates the expression with variables bound by name.
    ///
    /// Bindings for names the expression does not declare are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Unbound`] if a declared variable has no binding,
    /// or any evaluation error raised along the way.
    pub fn evaluate(&self, bindings: &HashMap<String, f64>) -> Result<f64, EvalError> {
        let values = self
            .variables
            .iter()
            .map(|name| {
                bindings
                    .get(name)
                    .copied()
                    .ok_or_else(|| EvalError::Unbound { name: name.clone() })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.root.eval(&values)
    }

    /// Evaluates the expression with variables bound by position.
    ///
    /// `values[i]` binds the `i`-th declared variable; extra values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Unbound`] if fewer values than variables are
    /// given, or any evaluation error raised along the way.
    pub fn eval_with(&self, values: &[f64]) -> Result<f64, EvalError> {
        if let Some(missing) = self.variables.get(values.len()) {
            return Err(EvalError::Unbound {
                name: missing.clone(),
            });
        }
        self.root.eval(values)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Binds `x` to the first declared variable.
///
/// Constant expressions ignore `x`; expressions with more than one variable
/// fail with [`EvalError::Unbound`] for the second one.
impl Function for Expression {
    type Error = EvalError;

    fn call(&self, x: f64) -> Result<f64, Self::Error> {
        self.eval_with(&[x])
    }
}

/// Compiles formulas against a name table and a set of variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Compiler {
    names: NameTable,
    variables: Vec<String>,
}

impl Default for Compiler {
    /// The default name table with the single variable `x`.
    fn default() -> Self {
        Self {
            names: NameTable::default(),
            variables: vec!["x".to_string()],
        }
    }
}

impl Compiler {
    /// Creates a compiler over `names` with the single variable `x`.
    #[must_use]
    pub fn new(names: NameTable) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    /// Replaces the declared variables.
    ///
    /// Duplicates are dropped; the first occurrence fixes the position.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidVariable`] for names that are not
    /// identifiers and [`ParseError::ReservedVariable`] for names the table
    /// already defines.
    pub fn with_variables<I, S>(mut self, variables: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut declared: Vec<String> = Vec::new();
        for name in variables {
            let name = name.as_ref();
            if !is_identifier(name) {
                return Err(ParseError::InvalidVariable {
                    name: name.to_string(),
                });
            }
            if self.names.contains(name) {
                return Err(ParseError::ReservedVariable {
                    name: name.to_string(),
                });
            }
            if !declared.iter().any(|d| d == name) {
                declared.push(name.to_string());
            }
        }
        self.variables = declared;
        Ok(self)
    }

    /// Returns the name table.
    #[must_use]
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Returns the declared variables.
    #[must_use]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Compiles `source` into an [`Expression`].
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] if the text is not a well-formed formula over
    /// the table's names and the declared variables.
    pub fn compile(&self, source: &str) -> Result<Expression, ParseError> {
        let tokens = tokenize(source)?;
        let root = parse(tokens, &self.names, &self.variables)?;
        log::trace!("compiled {source:?} into {} nodes", root.size());
        Ok(Expression {
            source: source.to_string(),
            variables: self.variables.clone(),
            root,
        })
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Compiles `source` with the default name table over `variable_names`.
///
/// The first variable is the one bound when the expression is used as a
/// [`Function`].
///
/// # Errors
///
/// Returns a [`ParseError`] if a variable name is unusable or the text is
/// not a well-formed formula.
pub fn compile_expression<I, S>(source: &str, variable_names: I) -> Result<Expression, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Compiler::default()
        .with_variables(variable_names)?
        .compile(source)
}
