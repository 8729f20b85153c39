use std::collections::HashMap;
use std::f64::consts;

use crate::error::EvalError;

/// The unary real functions an expression may call.
///
/// This is the complete allow-list: a formula can reach nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Ln,
    Log10,
    Sqrt,
    Abs,
    Sec,
    Csc,
    Cot,
}

impl Builtin {
    /// Every builtin, in declaration order.
    pub const ALL: [Builtin; 20] = [
        Builtin::Sin,
        Builtin::Cos,
        Builtin::Tan,
        Builtin::Asin,
        Builtin::Acos,
        Builtin::Atan,
        Builtin::Sinh,
        Builtin::Cosh,
        Builtin::Tanh,
        Builtin::Asinh,
        Builtin::Acosh,
        Builtin::Atanh,
        Builtin::Exp,
        Builtin::Ln,
        Builtin::Log10,
        Builtin::Sqrt,
        Builtin::Abs,
        Builtin::Sec,
        Builtin::Csc,
        Builtin::Cot,
    ];

    /// Returns the canonical English name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Asin => "asin",
            Builtin::Acos => "acos",
            Builtin::Atan => "atan",
            Builtin::Sinh => "sinh",
            Builtin::Cosh => "cosh",
            Builtin::Tanh => "tanh",
            Builtin::Asinh => "asinh",
            Builtin::Acosh => "acosh",
            Builtin::Atanh => "atanh",
            Builtin::Exp => "exp",
            Builtin::Ln => "ln",
            Builtin::Log10 => "log10",
            Builtin::Sqrt => "sqrt",
            Builtin::Abs => "abs",
            Builtin::Sec => "sec",
            Builtin::Csc => "csc",
            Builtin::Cot => "cot",
        }
    }

    /// Applies the function, rejecting arguments outside its real domain.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::Domain`] for arguments outside the domain,
    /// [`EvalError::DivisionByZero`] at the poles of `sec`, `csc` and `cot`,
    /// and [`EvalError::NonFinite`] if the result overflows.
    pub fn apply(self, x: f64) -> Result<f64, EvalError> {
        let domain = || EvalError::Domain {
            function: self.name(),
            arg: x,
        };
        let value = match self {
            Builtin::Sin => x.sin(),
            Builtin::Cos => x.cos(),
            Builtin::Tan => x.tan(),
            Builtin::Asin | Builtin::Acos if !(-1.0..=1.0).contains(&x) => return Err(domain()),
            Builtin::Asin => x.asin(),
            Builtin::Acos => x.acos(),
            Builtin::Atan => x.atan(),
            Builtin::Sinh => x.sinh(),
            Builtin::Cosh => x.cosh(),
            Builtin::Tanh => x.tanh(),
            Builtin::Asinh => x.asinh(),
            Builtin::Acosh if x < 1.0 => return Err(domain()),
            Builtin::Acosh => x.acosh(),
            Builtin::Atanh if x.abs() >= 1.0 => return Err(domain()),
            Builtin::Atanh => x.atanh(),
            Builtin::Exp => x.exp(),
            Builtin::Ln | Builtin::Log10 if x <= 0.0 => return Err(domain()),
            Builtin::Ln => x.ln(),
            Builtin::Log10 => x.log10(),
            Builtin::Sqrt if x < 0.0 => return Err(domain()),
            Builtin::Sqrt => x.sqrt(),
            Builtin::Abs => x.abs(),
            Builtin::Sec => reciprocal(x.cos())?,
            Builtin::Csc => reciprocal(x.sin())?,
            Builtin::Cot => reciprocal(x.tan())?,
        };

        if value.is_nan() {
            return Err(domain());
        }
        if !value.is_finite() {
            return Err(EvalError::NonFinite { value });
        }
        Ok(value)
    }
}

#[allow(clippy::float_cmp)]
fn reciprocal(denominator: f64) -> Result<f64, EvalError> {
    if denominator == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(1.0 / denominator)
}

/// What a surface name resolves to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry {
    Function(Builtin),
    Constant(f64),
}

/// Maps the names users type onto builtins and constants.
///
/// Lookups ignore ASCII case, so `Sin`, `SIN` and `sin` are the same name.
/// The default table is [`NameTable::spanish`], which also accepts every
/// English name.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTable {
    entries: HashMap<String, Entry>,
}

impl Default for NameTable {
    fn default() -> Self {
        Self::spanish()
    }
}

impl NameTable {
    /// Creates a table with no names at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Standard English names, their `arc*` aliases, `ln`/`log` for the
    /// natural logarithm, and the constants `pi` and `e`.
    #[must_use]
    pub fn english() -> Self {
        let mut table = Self::empty();
        for builtin in Builtin::ALL {
            table.insert(builtin.name(), Entry::Function(builtin));
        }
        let aliases = [
            ("arcsin", Builtin::Asin),
            ("arccos", Builtin::Acos),
            ("arctan", Builtin::Atan),
            ("arcsinh", Builtin::Asinh),
            ("arccosh", Builtin::Acosh),
            ("arctanh", Builtin::Atanh),
            ("log", Builtin::Ln),
        ];
        for (alias, builtin) in aliases {
            table.insert(alias, Entry::Function(builtin));
        }
        table
            .with_constant("pi", consts::PI)
            .with_constant("π", consts::PI)
            .with_constant("e", consts::E)
    }

    /// The English table plus the Spanish spellings used in class
    /// (`sen`, `senh`, `tg`, `raiz`).
    #[must_use]
    pub fn spanish() -> Self {
        Self::english()
            .with_function("sen", Builtin::Sin)
            .with_function("senh", Builtin::Sinh)
            .with_function("tg", Builtin::Tan)
            .with_function("raiz", Builtin::Sqrt)
            .with_function("arcsen", Builtin::Asin)
    }

    /// Adds or replaces a function alias.
    #[must_use]
    pub fn with_function(mut self, name: &str, builtin: Builtin) -> Self {
        self.insert(name, Entry::Function(builtin));
        self
    }

    /// Adds or replaces a named constant.
    #[must_use]
    pub fn with_constant(mut self, name: &str, value: f64) -> Self {
        self.insert(name, Entry::Constant(value));
        self
    }

    /// Looks up a name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Entry> {
        self.entries.get(&name.to_ascii_lowercase()).copied()
    }

    /// Returns true if the table defines `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Length in characters of the longest name in the table.
    pub(crate) fn longest_name(&self) -> usize {
        self.entries
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
    }

    fn insert(&mut self, name: &str, entry: Entry) {
        self.entries.insert(name.to_ascii_lowercase(), entry);
    }
}
