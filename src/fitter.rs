//! Length fitting: grow or shrink a rendered candidate until it hits an
//! exact character-count target, using only the attempt's expression pool.

use generational_arena::Index;
use rand::Rng;
use regex::Regex;
use tracing::trace;

use crate::expr::{enclose_in_brackets, ExprPool};
use crate::operator::OperatorGenerator;

/// Fits one attempt's pool to a target length. Best effort: the caller
/// rechecks the exact length.
pub struct LengthFitter<'a> {
    pool: &'a ExprPool,
    operators: &'a OperatorGenerator,
}

impl<'a> LengthFitter<'a> {
    pub fn new(pool: &'a ExprPool, operators: &'a OperatorGenerator) -> Self {
        Self { pool, operators }
    }

    /// Best-fit pool entry for a desired length: smallest absolute length
    /// difference, earliest-inserted on ties.
    pub fn select_best(&self, desired: usize) -> Option<Index> {
        self.pool.iter().map(|(idx, _)| idx).min_by_key(|&idx| {
            (self.pool.rendered_len(idx) as i64 - desired as i64).abs()
        })
    }

    /// Start from the best-fit pool entry, grow while short, then apply the
    /// shrink pass if long. The pool always holds at least one entry per
    /// attempt; an empty pool is an internal invariant violation.
    pub fn fit<R: Rng>(&self, rng: &mut R, target: usize) -> String {
        let start = self.select_best(target).expect("expression pool is never empty");
        let mut text = self.pool.render(start, rng);
        if text.len() < target {
            text = self.lengthen(rng, text, target);
        }
        if text.len() > target {
            text = shorten(&text, target);
        }
        trace!(target, achieved = text.len(), "fit pass done");
        text
    }

    fn lengthen<R: Rng>(&self, rng: &mut R, mut text: String, target: usize) -> String {
        while text.len() < target {
            let operator = self.operators.pick(rng);
            text.push_str(&operator.display());

            let needed = target.saturating_sub(text.len());
            let idx = self.select_best(needed).expect("expression pool is never empty");
            let mut sub = self.pool.render(idx, rng);
            if operator.symbol.is_additive() && sub.starts_with('-') {
                sub = enclose_in_brackets(rng, &sub);
            }
            text.push_str(&sub);
        }
        text
    }
}

/// Shrink pass, computed once rather than iteratively refined.
///
/// First strips up to `excess / 3` enclosing bracket pairs around negative
/// integer literals, left to right (`(-5)` becomes `-5`), discounting the
/// excess by three per strip. Whatever excess remains then strips leading
/// minus signs from negative integer literals at the start of the string or
/// directly after an operator symbol or space, where the token run stays
/// valid. Not guaranteed to reach the target.
pub fn shorten(text: &str, target: usize) -> String {
    let mut excess = text.len().saturating_sub(target);
    let mut result = text.to_string();

    let pairs = excess / 3;
    if pairs > 0 {
        let bracketed_negative = Regex::new(r"[(\[]-(\d+)[)\]]").unwrap();
        let (replaced, made) = replace_limited(&bracketed_negative, &result, pairs, "-$1");
        result = replaced;
        excess -= 3 * made;
    }

    if excess > 0 {
        let leading_minus = Regex::new(r"(^|[-+x*/ ])-(\d+)").unwrap();
        let (replaced, _) = replace_limited(&leading_minus, &result, excess, "${1}${2}");
        result = replaced;
    }

    result
}

/// `Regex::replacen` plus the number of substitutions actually made.
fn replace_limited(re: &Regex, text: &str, limit: usize, rep: &str) -> (String, usize) {
    let made = re.find_iter(text).take(limit).count();
    let replaced = re.replacen(text, limit, rep).into_owned();
    (replaced, made)
}
