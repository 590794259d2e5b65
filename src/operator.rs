//! Binary operators: symbols, precedence ranks, spacing policy, and the
//! per-class weight tables they are drawn from.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distribution;
use crate::errors::ConfigError;

/// Highest fixed spacing width around an operator symbol.
pub const MAX_SPACING: usize = 9;

/// Precedence rank of `+` and `-`. Numerically greater = binds looser.
pub const PREC_ADDITIVE: u32 = 30;

/// Precedence rank of `*`, `x` and `/`.
pub const PREC_MULTIPLICATIVE: u32 = 20;

/// Spacing distribution used when no fixed width is configured. Heavily
/// favors no space or a single space.
const SPACING_WEIGHTS: [(f64, &str); 4] = [
    (0.499, ""),
    (0.499, " "),
    (0.0018, "  "),
    (0.0002, "   "),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorSymbol {
    Add,
    Sub,
    Mul,
    /// `x`, the alias glyph for multiplication.
    MulAlias,
    Div,
}

impl OperatorSymbol {
    pub fn as_char(self) -> char {
        match self {
            OperatorSymbol::Add => '+',
            OperatorSymbol::Sub => '-',
            OperatorSymbol::Mul => '*',
            OperatorSymbol::MulAlias => 'x',
            OperatorSymbol::Div => '/',
        }
    }

    pub fn precedence(self) -> u32 {
        match self {
            OperatorSymbol::Add | OperatorSymbol::Sub => PREC_ADDITIVE,
            _ => PREC_MULTIPLICATIVE,
        }
    }

    /// `+` and `-`, the symbols subject to the sign-collision rule.
    pub fn is_additive(self) -> bool {
        matches!(self, OperatorSymbol::Add | OperatorSymbol::Sub)
    }
}

impl fmt::Display for OperatorSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Requested operator mix, as spelled on the command line (`-o asmd`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OperatorClass {
    /// Addition
    #[value(name = "a", alias = "add")]
    Add,
    /// Subtraction
    #[value(name = "s", alias = "sub")]
    Sub,
    /// Addition, subtraction
    #[value(name = "as", alias = "add-sub")]
    AddSub,
    /// Multiplication
    #[value(name = "m", alias = "mul")]
    Mul,
    /// Division
    #[value(name = "d", alias = "div")]
    Div,
    /// Multiplication, division
    #[value(name = "md", alias = "mul-div")]
    MulDiv,
    /// All four operations
    #[value(name = "asmd", alias = "all")]
    All,
}

impl OperatorClass {
    /// Weight table in draw order `x * / + -`. Zero-weight symbols are
    /// unreachable for the class.
    fn weight_table(self) -> [(f64, OperatorSymbol); 5] {
        use OperatorSymbol::*;
        match self {
            OperatorClass::Add => {
                [(0.0, MulAlias), (0.0, Mul), (0.0, Div), (1.0, Add), (0.0, Sub)]
            }
            OperatorClass::Sub => {
                [(0.0, MulAlias), (0.0, Mul), (0.0, Div), (0.0, Add), (1.0, Sub)]
            }
            OperatorClass::AddSub => {
                [(0.0, MulAlias), (0.0, Mul), (0.0, Div), (0.5, Add), (0.5, Sub)]
            }
            OperatorClass::Mul => {
                [(0.5, MulAlias), (0.5, Mul), (0.0, Div), (0.0, Add), (0.0, Sub)]
            }
            OperatorClass::Div => {
                [(0.0, MulAlias), (0.0, Mul), (1.0, Div), (0.0, Add), (0.0, Sub)]
            }
            OperatorClass::MulDiv => {
                [(0.25, MulAlias), (0.25, Mul), (0.5, Div), (0.0, Add), (0.0, Sub)]
            }
            OperatorClass::All => {
                [(0.125, MulAlias), (0.125, Mul), (0.25, Div), (0.25, Add), (0.25, Sub)]
            }
        }
    }

    /// Classes that trigger the zero-avoidance guard on single-digit
    /// integer operands.
    pub fn is_multiplicative(self) -> bool {
        matches!(
            self,
            OperatorClass::Mul | OperatorClass::Div | OperatorClass::MulDiv
        )
    }
}

/// A drawn operator: the symbol plus the whitespace it renders with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    pub symbol: OperatorSymbol,
    spacing: String,
}

impl Operator {
    pub fn new(symbol: OperatorSymbol, spacing: String) -> Self {
        Self { symbol, spacing }
    }

    pub fn precedence(&self) -> u32 {
        self.symbol.precedence()
    }

    /// Rendered form: the spacing on both sides of the symbol.
    pub fn display(&self) -> String {
        format!("{}{}{}", self.spacing, self.symbol, self.spacing)
    }

    pub fn display_len(&self) -> usize {
        2 * self.spacing.len() + 1
    }
}

/// Immutable configuration for one operator generator.
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    pub class: OperatorClass,
    /// Fixed spaces around the symbol; `None` draws from the distribution.
    pub spacing: Option<usize>,
}

/// Draws random operators by cumulative selection over the class's weight
/// table, with an independently resolved spacing policy.
#[derive(Debug)]
pub struct OperatorGenerator {
    table: [(f64, OperatorSymbol); 5],
    spacing: Option<String>,
}

impl OperatorGenerator {
    pub fn new(config: OperatorConfig) -> Result<Self, ConfigError> {
        let table = config.class.weight_table();
        if table.iter().map(|(weight, _)| weight).sum::<f64>() <= 0.0 {
            return Err(ConfigError::EmptyWeightTable(config.class));
        }
        let spacing = match config.spacing {
            Some(n) if n > MAX_SPACING => {
                return Err(ConfigError::SpacingOutOfRange(n))
            }
            Some(n) => Some(" ".repeat(n)),
            None => None,
        };
        Ok(Self { table, spacing })
    }

    pub fn pick<R: Rng>(&self, rng: &mut R) -> Operator {
        let symbol = *distribution::pick(rng, &self.table);
        let spacing = match &self.spacing {
            Some(fixed) => fixed.clone(),
            None => distribution::pick(rng, &SPACING_WEIGHTS).to_string(),
        };
        Operator::new(symbol, spacing)
    }
}
