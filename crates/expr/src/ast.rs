use crate::error::EvalError;
use crate::names::Builtin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// A compiled formula.
///
/// Variables are stored by index into the expression's declared variables,
/// and named constants are already folded into numbers.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    Variable(usize),
    Call(Builtin, Box<Node>),
    Negate(Box<Node>),
    Binary(BinOp, Box<Node>, Box<Node>),
}

impl Node {
    pub(crate) fn binary(op: BinOp, lhs: Node, rhs: Node) -> Self {
        Node::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Evaluates the tree with `values[i]` bound to variable `i`.
    ///
    /// Callers guarantee every variable index is in bounds.
    pub(crate) fn eval(&self, values: &[f64]) -> Result<f64, EvalError> {
        match self {
            Node::Number(n) => Ok(*n),
            Node::Variable(index) => finite(values[*index]),
            Node::Call(builtin, arg) => builtin.apply(arg.eval(values)?),
            Node::Negate(inner) => Ok(-inner.eval(values)?),
            Node::Binary(op, lhs, rhs) => {
                let l = lhs.eval(values)?;
                let r = rhs.eval(values)?;
                apply(*op, l, r)
            }
        }
    }

    /// Returns the number of nodes in the tree.
    pub(crate) fn size(&self) -> usize {
        match self {
            Node::Number(_) | Node::Variable(_) => 1,
            Node::Call(_, inner) | Node::Negate(inner) => 1 + inner.size(),
            Node::Binary(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }
}

#[allow(clippy::float_cmp)]
fn apply(op: BinOp, l: f64, r: f64) -> Result<f64, EvalError> {
    let value = match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div if r == 0.0 => return Err(EvalError::DivisionByZero),
        BinOp::Div => l / r,
        BinOp::Pow if l == 0.0 && r < 0.0 => return Err(EvalError::DivisionByZero),
        BinOp::Pow => {
            let value = l.powf(r);
            if value.is_nan() {
                return Err(EvalError::Power {
                    base: l,
                    exponent: r,
                });
            }
            value
        }
    };
    finite(value)
}

fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite { value })
    }
}
