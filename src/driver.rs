//! Per-length generation loop: build, render, fit, retry.

use rand::Rng;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::errors::ConfigError;
use crate::expr::ExprPool;
use crate::fitter::LengthFitter;
use crate::operand::OperandGenerator;
use crate::operator::OperatorGenerator;

/// Whole-pipeline retries per requested length.
pub const MAX_ATTEMPTS: usize = 100;

/// Result of fitting one target length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LengthOutcome {
    /// Exactly the requested number of characters, ready to emit.
    Fitted(String),
    /// Attempt cap exhausted; carries the last candidate's length for the
    /// diagnostic. Non-fatal, the run continues with the next length.
    Unfitted { target: usize, achieved: usize },
}

/// Drives build → render → fit for every target length from 1 up to the
/// configured maximum. Generation is sequential and synchronous; the only
/// shared state is the immutable configuration captured at construction.
pub struct Driver {
    operands: OperandGenerator,
    operators: OperatorGenerator,
    max_length: usize,
}

impl Driver {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        if config.max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        Ok(Self {
            operands: OperandGenerator::new(config.operand)?,
            operators: OperatorGenerator::new(config.operator)?,
            max_length: config.max_length,
        })
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Fit one target length within the attempt cap. A fresh pool is built
    /// and discarded per attempt; nothing is shared across attempts.
    pub fn generate_for_length<R: Rng>(&self, rng: &mut R, target: usize) -> LengthOutcome {
        debug_assert!(target >= 1);
        let mut achieved = 0;
        for attempt in 0..MAX_ATTEMPTS {
            let mut pool = ExprPool::new();
            pool.build_random(rng, &self.operands, &self.operators);

            let fitter = LengthFitter::new(&pool, &self.operators);
            let candidate = fitter.fit(rng, target);
            if candidate.len() == target {
                debug!(target, attempt, "fitted");
                return LengthOutcome::Fitted(candidate);
            }
            achieved = candidate.len();
        }
        warn!(target, achieved, "attempt cap exhausted");
        LengthOutcome::Unfitted { target, achieved }
    }

    /// Generate for every target length in order. Fit failures are data,
    /// not errors.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Vec<LengthOutcome> {
        (1..=self.max_length)
            .map(|target| self.generate_for_length(rng, target))
            .collect()
    }
}
