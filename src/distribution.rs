//! Discrete probability tables, drawn with cumulative `r <= c` selection.
//!
//! Every random policy in this crate (operand class mix, digit-count
//! distributions, operator weight tables, spacing) is a table of weights
//! summing to 1.0. Selection draws one uniform value and walks the table,
//! accepting the first entry whose running total reaches the draw; the
//! final entry absorbs float drift at the tail.

use rand::Rng;

/// Pick an entry from a weighted table.
pub(crate) fn pick<'a, T, R: Rng>(rng: &mut R, table: &'a [(f64, T)]) -> &'a T {
    debug_assert!(!table.is_empty());
    let r = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for (weight, item) in table {
        cumulative += weight;
        if r <= cumulative {
            return item;
        }
    }
    &table[table.len() - 1].1
}

/// Pick an index from a bare weight slice.
pub(crate) fn pick_index<R: Rng>(rng: &mut R, weights: &[f64]) -> usize {
    debug_assert!(!weights.is_empty());
    let r = rng.gen::<f64>();
    let mut cumulative = 0.0;
    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        if r <= cumulative {
            return i;
        }
    }
    weights.len() - 1
}
