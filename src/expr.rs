//! Expression trees in an arena pool.
//!
//! Every node and leaf produced during one build attempt lands in the pool
//! in post-order (children before their parent, root last). The pool is the
//! raw material the length-fitting stage searches for best-length
//! candidates, and it is discarded wholesale when the attempt ends.

use generational_arena::{Arena, Index};
use rand::Rng;
use tracing::trace;

use crate::operand::{Operand, OperandGenerator};
use crate::operator::{Operator, OperatorGenerator};

/// Recursion floor for the tree builder.
pub const MAX_DEPTH: usize = 12;

/// A pool entry: a bare operand leaf or a binary operation over two other
/// pool entries.
#[derive(Debug)]
pub enum Expression {
    Leaf(Operand),
    Binary {
        operator: Operator,
        left: Index,
        right: Index,
    },
}

/// Arena holding every expression produced during one build attempt.
#[derive(Debug)]
pub struct ExprPool {
    arena: Arena<Expression>,
}

impl Default for ExprPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprPool {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    pub fn get(&self, idx: Index) -> Option<&Expression> {
        self.arena.get(idx)
    }

    pub fn count(&self) -> usize {
        self.arena.len()
    }

    /// Entries in insertion order (nothing is ever removed).
    pub fn iter(&self) -> impl Iterator<Item = (Index, &Expression)> {
        self.arena.iter()
    }

    pub fn insert_leaf(&mut self, operand: Operand) -> Index {
        self.arena.insert(Expression::Leaf(operand))
    }

    pub fn insert_binary(&mut self, operator: Operator, left: Index, right: Index) -> Index {
        self.arena.insert(Expression::Binary {
            operator,
            left,
            right,
        })
    }

    /// Grow a random tree into the pool and return the root.
    ///
    /// The root is always a binary expression, the recursion floor always a
    /// leaf; in between, branching probability decays with depth as
    /// `1 - (depth/MAX_DEPTH)^2`, biasing early levels toward branching and
    /// later levels toward leaves.
    pub fn build_random<R: Rng>(
        &mut self,
        rng: &mut R,
        operands: &OperandGenerator,
        operators: &OperatorGenerator,
    ) -> Index {
        let root = self.create_random(rng, 0, operands, operators);
        trace!(nodes = self.count(), "built expression tree");
        root
    }

    fn create_random<R: Rng>(
        &mut self,
        rng: &mut R,
        depth: usize,
        operands: &OperandGenerator,
        operators: &OperatorGenerator,
    ) -> Index {
        let branch = if depth == 0 {
            true
        } else if depth >= MAX_DEPTH {
            false
        } else {
            let decay = (depth as f64 / MAX_DEPTH as f64).powi(2);
            rng.gen::<f64>() <= 1.0 - decay
        };

        if branch {
            let operator = operators.pick(rng);
            let left = self.create_random(rng, depth + 1, operands, operators);
            let right = self.create_random(rng, depth + 1, operands, operators);
            self.insert_binary(operator, left, right)
        } else {
            self.insert_leaf(operands.generate(rng))
        }
    }

    /// Precedence of a pool entry: 0 for leaves, the operator's rank for
    /// binary nodes.
    pub fn precedence(&self, idx: Index) -> u32 {
        match &self.arena[idx] {
            Expression::Leaf(operand) => operand.precedence(),
            Expression::Binary { operator, .. } => operator.precedence(),
        }
    }

    /// Rendered character count, computed without consuming randomness:
    /// the bracket glyph coin flip never changes the length. Recomputed on
    /// every call, never cached.
    pub fn rendered_len(&self, idx: Index) -> usize {
        match &self.arena[idx] {
            Expression::Leaf(operand) => operand.rendered_len(),
            Expression::Binary {
                operator,
                left,
                right,
            } => {
                let parent = operator.precedence();
                let mut total = self.rendered_len(*left)
                    + operator.display_len()
                    + self.rendered_len(*right);
                if self.precedence(*left) > parent {
                    total += 2;
                }
                if self.precedence(*right) > parent {
                    total += 2;
                }
                if operator.symbol.is_additive() && self.starts_negative(*right) {
                    total += 2;
                }
                total
            }
        }
    }

    /// Whether the rendering starts with a minus sign. Mirrors `render`: a
    /// bracketed left child hides its sign.
    pub fn starts_negative(&self, idx: Index) -> bool {
        match &self.arena[idx] {
            Expression::Leaf(operand) => operand.is_rendered_negative(),
            Expression::Binary { operator, left, .. } => {
                if self.precedence(*left) > operator.precedence() {
                    false
                } else {
                    self.starts_negative(*left)
                }
            }
        }
    }

    /// Render a pool entry to text, bottom-up.
    ///
    /// A child is bracketed iff its precedence is numerically greater than
    /// the parent's (a looser-binding operation nested under a tighter one).
    /// The right child is additionally bracketed when the parent is `+`/`-`
    /// and the child's rendering starts with `-`, so no two sign characters
    /// ever collide. Randomness is consumed only for bracket glyphs.
    pub fn render<R: Rng>(&self, idx: Index, rng: &mut R) -> String {
        match &self.arena[idx] {
            Expression::Leaf(operand) => operand.to_string(),
            Expression::Binary {
                operator,
                left,
                right,
            } => {
                let mut left_text = self.render(*left, rng);
                let mut right_text = self.render(*right, rng);
                let parent = operator.precedence();

                if self.precedence(*left) > parent {
                    left_text = enclose_in_brackets(rng, &left_text);
                }
                let right_negative = right_text.starts_with('-');
                if self.precedence(*right) > parent {
                    right_text = enclose_in_brackets(rng, &right_text);
                }
                if operator.symbol.is_additive() && right_negative {
                    right_text = enclose_in_brackets(rng, &right_text);
                }

                format!("{}{}{}", left_text, operator.display(), right_text)
            }
        }
    }
}

/// Wrap in `()` or `[]`, chosen by a fair coin flip. Cosmetic variety only.
pub fn enclose_in_brackets<R: Rng>(rng: &mut R, text: &str) -> String {
    if rng.gen::<f64>() <= 0.5 {
        format!("({text})")
    } else {
        format!("[{text}]")
    }
}
