//! Operand leaves: signed integers and decimals with digit-length policies.

use std::fmt;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distribution;
use crate::errors::ConfigError;

/// Supported digit count for an integer part. 1 to 19 digits keeps every
/// magnitude within `u64`.
pub const DIGIT_LEN_RANGE: RangeInclusive<usize> = 1..=19;

/// Probability that a drawn magnitude of 0 survives the zero-avoidance
/// guard.
const ZERO_PASS_PROBABILITY: f64 = 0.001;

/// Digit-count distribution for random-length integers (index 0 = 1 digit).
/// Weights are configuration data, not derived.
const INTEGER_LEN_WEIGHTS: [f64; 19] = [
    0.0500, 0.3270, 0.3260, 0.2310, 0.0410, 0.0110, 0.0062, 0.0012, 0.0011,
    0.0010, 0.0009, 0.0008, 0.0007, 0.0006, 0.0005, 0.0004, 0.0003, 0.0002,
    0.0001,
];

/// Digit-count distribution for the integer part of random-length decimals.
const DECIMAL_LEN_WEIGHTS: [f64; 19] = [
    0.1850, 0.1900, 0.2000, 0.2000, 0.2000, 0.0110, 0.0062, 0.0012, 0.0011,
    0.0010, 0.0009, 0.0008, 0.0007, 0.0006, 0.0005, 0.0004, 0.0003, 0.0002,
    0.0001,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

impl Sign {
    fn draw<R: Rng>(rng: &mut R) -> Self {
        if rng.gen::<f64>() <= 0.5 {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

/// Which leaf kinds a generator may produce.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum OperandClass {
    /// Integers only
    Integer,
    /// Decimals only
    Decimal,
    /// 50/50 blend of integers and decimals
    IntegerAndDecimal,
}

/// Immutable configuration for one operand generator. Built once from the
/// merged settings; generators never share mutable state.
#[derive(Debug, Clone)]
pub struct OperandConfig {
    pub class: OperandClass,
    /// Fixed integer digit count, `None` = drawn from the distribution.
    pub integer_len: Option<usize>,
    /// Fixed integer-part digit count for decimals, `None` = drawn.
    pub decimal_len: Option<usize>,
    /// Fixed fractional digit count for decimals, `None` = uniform 1..=len.
    pub fraction_len: Option<usize>,
    /// Bias integer draws away from zero. Engaged for single-digit integers
    /// under a multiplicative operator class, where a bare `0` would
    /// dominate short products and quotients.
    pub avoid_zero: bool,
}

/// A leaf value: a signed sequence of integer digits plus an optional
/// sequence of fractional digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    sign: Sign,
    digits: String,
    frac_digits: String,
}

impl Operand {
    pub fn integer(sign: Sign, magnitude: u64) -> Self {
        Self {
            sign,
            digits: magnitude.to_string(),
            frac_digits: String::new(),
        }
    }

    /// Decimal built from `value` shifted right by `scale` digits:
    /// `(456, 2)` is `4.56`, `(456, 3)` is `0.456`, `(5, 3)` is `0.005`.
    pub fn decimal(sign: Sign, value: u64, scale: usize) -> Self {
        debug_assert!(scale >= 1);
        let raw = value.to_string();
        if scale >= raw.len() {
            Self {
                sign,
                digits: "0".to_string(),
                frac_digits: format!("{:0>width$}", raw, width = scale),
            }
        } else {
            let split = raw.len() - scale;
            Self {
                sign,
                digits: raw[..split].to_string(),
                frac_digits: raw[split..].to_string(),
            }
        }
    }

    pub fn is_decimal(&self) -> bool {
        !self.frac_digits.is_empty()
    }

    /// Leaves never need internal brackets: rank 0 is below every operator.
    pub fn precedence(&self) -> u32 {
        0
    }

    /// Whether the rendering starts with a minus sign. An integer zero
    /// drops its sign; a decimal keeps it even for `-0.0`.
    pub fn is_rendered_negative(&self) -> bool {
        match self.sign {
            Sign::Positive => false,
            Sign::Negative => self.is_decimal() || self.digits != "0",
        }
    }

    /// Rendered character count, without rendering.
    pub fn rendered_len(&self) -> usize {
        let sign = usize::from(self.is_rendered_negative());
        let frac = if self.frac_digits.is_empty() {
            0
        } else {
            1 + self.frac_digits.len()
        };
        sign + self.digits.len() + frac
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rendered_negative() {
            write!(f, "-")?;
        }
        write!(f, "{}", self.digits)?;
        if !self.frac_digits.is_empty() {
            write!(f, ".{}", self.frac_digits)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum LeafKind {
    Integer,
    Decimal,
}

/// Produces random operand leaves according to the configured class mix.
#[derive(Debug)]
pub struct OperandGenerator {
    config: OperandConfig,
    mix: Vec<(f64, LeafKind)>,
}

impl OperandGenerator {
    /// Validates digit lengths up front; generation itself never fails.
    pub fn new(config: OperandConfig) -> Result<Self, ConfigError> {
        if let Some(n) = config.integer_len {
            if !DIGIT_LEN_RANGE.contains(&n) {
                return Err(ConfigError::IntegerLenOutOfRange(n));
            }
        }
        if let Some(n) = config.decimal_len {
            if !DIGIT_LEN_RANGE.contains(&n) {
                return Err(ConfigError::DecimalLenOutOfRange(n));
            }
        }
        if let Some(n) = config.fraction_len {
            if !DIGIT_LEN_RANGE.contains(&n) {
                return Err(ConfigError::FractionLenOutOfRange(n));
            }
        }
        let mix = match config.class {
            OperandClass::Integer => vec![(1.0, LeafKind::Integer)],
            OperandClass::Decimal => vec![(1.0, LeafKind::Decimal)],
            OperandClass::IntegerAndDecimal => {
                vec![(0.5, LeafKind::Integer), (0.5, LeafKind::Decimal)]
            }
        };
        Ok(Self { config, mix })
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> Operand {
        match distribution::pick(rng, &self.mix) {
            LeafKind::Integer => self.generate_integer(rng),
            LeafKind::Decimal => self.generate_decimal(rng),
        }
    }

    fn generate_integer<R: Rng>(&self, rng: &mut R) -> Operand {
        let sign = Sign::draw(rng);
        let len = self
            .config
            .integer_len
            .unwrap_or_else(|| distribution::pick_index(rng, &INTEGER_LEN_WEIGHTS) + 1);
        let (lo, hi) = magnitude_range(len);
        let mut magnitude = rng.gen_range(lo..=hi);
        if self.config.avoid_zero {
            while magnitude == 0 && rng.gen::<f64>() > ZERO_PASS_PROBABILITY {
                magnitude = rng.gen_range(lo..=hi);
            }
        }
        Operand::integer(sign, magnitude)
    }

    fn generate_decimal<R: Rng>(&self, rng: &mut R) -> Operand {
        let sign = Sign::draw(rng);
        let len = self
            .config
            .decimal_len
            .unwrap_or_else(|| distribution::pick_index(rng, &DECIMAL_LEN_WEIGHTS) + 1);
        let (lo, hi) = magnitude_range(len);
        let value = rng.gen_range(lo..=hi);
        let scale = match self.config.fraction_len {
            Some(n) => n,
            None => rng.gen_range(1..=len),
        };
        Operand::decimal(sign, value, scale)
    }
}

/// Inclusive magnitude bounds for a digit count. A single digit may be 0;
/// longer magnitudes never have a leading zero.
fn magnitude_range(len: usize) -> (u64, u64) {
    if len == 1 {
        (0, 9)
    } else {
        let lo = 10u64.pow((len - 1) as u32);
        (lo, lo * 10 - 1)
    }
}
