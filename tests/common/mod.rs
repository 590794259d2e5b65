//! Shared test helpers: a precedence-aware reparser for generated
//! expressions and a bracket balance checker.

#![allow(dead_code)]

/// Parse and evaluate a rendered expression with standard operator
/// precedence and left associativity. `x` multiplies, `()` and `[]` group,
/// `-` before a factor negates. Returns None if the text does not parse or
/// leaves trailing input.
pub fn reparse(text: &str) -> Option<f64> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
    };
    let value = parser.expr()?;
    parser.skip_ws();
    (parser.pos == parser.chars.len()).then_some(value)
}

/// Check that every opened bracket is closed by the matching type.
pub fn brackets_balanced(text: &str) -> bool {
    let mut stack = Vec::new();
    for c in text.chars() {
        match c {
            '(' | '[' => stack.push(c),
            ')' => {
                if stack.pop() != Some('(') {
                    return false;
                }
            }
            ']' => {
                if stack.pop() != Some('[') {
                    return false;
                }
            }
            _ => {}
        }
    }
    stack.is_empty()
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek() == Some(' ') {
            self.pos += 1;
        }
    }

    fn expr(&mut self) -> Option<f64> {
        let mut value = self.term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('+') => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Some('-') => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn term(&mut self) -> Option<f64> {
        let mut value = self.factor()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') | Some('x') => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Some('/') => {
                    self.pos += 1;
                    value /= self.factor()?;
                }
                _ => return Some(value),
            }
        }
    }

    fn factor(&mut self) -> Option<f64> {
        self.skip_ws();
        match self.peek()? {
            '-' => {
                self.pos += 1;
                Some(-self.factor()?)
            }
            '(' => self.bracketed(')'),
            '[' => self.bracketed(']'),
            _ => self.number(),
        }
    }

    fn bracketed(&mut self, closing: char) -> Option<f64> {
        self.pos += 1;
        let value = self.expr()?;
        self.skip_ws();
        if self.peek() != Some(closing) {
            return None;
        }
        self.pos += 1;
        Some(value)
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some('.') {
            self.pos += 1;
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if self.pos == start {
            return None;
        }
        let literal: String = self.chars[start..self.pos].iter().collect();
        literal.parse().ok()
    }
}

#[test]
fn test_reparse_respects_precedence_and_brackets() {
    assert_eq!(reparse("1+2*3"), Some(7.0));
    assert_eq!(reparse("(1+2)*3"), Some(9.0));
    assert_eq!(reparse("[1+2]x3"), Some(9.0));
    assert_eq!(reparse("5+(-3)"), Some(2.0));
    assert_eq!(reparse("1-2-3"), Some(-4.0));
    assert_eq!(reparse("5 / -2"), Some(-2.5));
    assert_eq!(reparse("(1+2"), None);
    assert_eq!(reparse("1+2)"), None);
}

#[test]
fn test_brackets_balanced_rejects_mismatched_types() {
    assert!(brackets_balanced("(1+[2x3])"));
    assert!(!brackets_balanced("(1+2]"));
    assert!(!brackets_balanced("((1)"));
}
