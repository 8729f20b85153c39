use std::fmt;

/// Functions used for bracketing and secant exercises.
///
/// Every entry is continuous on the real line, so any sign-changing interval
/// brackets a root.
pub const BRACKET_FUNCTIONS: &[&str] = &[
    "x^3 - 4x + 1",
    "sin(x) - x/2",
    "exp(x) - 3x",
    "x^2 - 5",
    "cos(x) - x",
    "x^5 - x - 1",
    "x^3 - x - 2",
];

/// A function and its derivative, for Newton-Raphson exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewtonPair {
    pub function: &'static str,
    pub derivative: &'static str,
}

pub const NEWTON_PAIRS: &[NewtonPair] = &[
    NewtonPair {
        function: "x^2 - 2",
        derivative: "2x",
    },
    NewtonPair {
        function: "x^3 - x - 2",
        derivative: "3x^2 - 1",
    },
    NewtonPair {
        function: "sin(x) - x/2",
        derivative: "cos(x) - 0.5",
    },
    NewtonPair {
        function: "exp(-x) - x",
        derivative: "-exp(-x) - 1",
    },
    NewtonPair {
        function: "x^5 - 5",
        derivative: "5x^4",
    },
    NewtonPair {
        function: "ln(x) - 1",
        derivative: "1/x",
    },
    NewtonPair {
        function: "x - cos(x)",
        derivative: "1 + sin(x)",
    },
    NewtonPair {
        function: "x^2 - sin(x)",
        derivative: "2x - cos(x)",
    },
    NewtonPair {
        function: "x^3 - 3x + 2",
        derivative: "3x^2 - 3",
    },
    NewtonPair {
        function: "tan(x) - x",
        derivative: "sec(x)^2 - 1",
    },
    NewtonPair {
        function: "log10(x) - 2",
        derivative: "1/(x ln(10))",
    },
    NewtonPair {
        function: "sec(x) - 2",
        derivative: "sec(x) tan(x)",
    },
];

/// The root-finding method an exercise is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde-derive",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum Kind {
    Bisection,
    FalsePosition,
    Secant,
    Newton,
}

impl Kind {
    pub const ALL: [Kind; 4] = [
        Kind::Bisection,
        Kind::FalsePosition,
        Kind::Secant,
        Kind::Newton,
    ];

    /// Returns the method's display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Kind::Bisection => "bisection",
            Kind::FalsePosition => "false position",
            Kind::Secant => "secant",
            Kind::Newton => "newton-raphson",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use algebrify_core::Function;
    use algebrify_expr::compile_expression;
    use approx::assert_relative_eq;

    #[test]
    fn every_formula_compiles() {
        let formulas = BRACKET_FUNCTIONS
            .iter()
            .copied()
            .chain(NEWTON_PAIRS.iter().flat_map(|p| [p.function, p.derivative]));

        for formula in formulas {
            assert!(
                compile_expression(formula, ["x"]).is_ok(),
                "`{formula}` should compile"
            );
        }
    }

    #[test]
    fn derivatives_match_central_differences() {
        let h = 1e-6;
        for pair in NEWTON_PAIRS {
            let f = compile_expression(pair.function, ["x"]).unwrap();
            let df = compile_expression(pair.derivative, ["x"]).unwrap();

            for x in [0.7, 1.3, 2.4] {
                let numeric = (f.call(x + h).unwrap() - f.call(x - h).unwrap()) / (2.0 * h);
                assert_relative_eq!(
                    df.call(x).unwrap(),
                    numeric,
                    epsilon = 1e-4,
                    max_relative = 1e-6
                );
            }
        }
    }

    #[test]
    fn kind_names() {
        let names: Vec<String> = Kind::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            ["bisection", "false position", "secant", "newton-raphson"]
        );
    }
}
