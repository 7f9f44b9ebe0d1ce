// SPDX-License-Identifier: MIT

//! Recursive-descent parser for targeting conditions
//!
//! Parses expressions like:
//! - `age=25`
//! - `age<35 and (category=economics or color=dark)`
//! - `age=[10-35] or name=Ben,John,Peter`

use super::ast::{CompareOp, Expression, Relation, Term};
use super::literal::classify_literal;
use crate::error::ConditionError;
use crate::targeting::options::EvaluatorOptions;

/// Rewrite the spelled-out relations and spaced equality into the compact
/// forms the parser works on.
///
/// This is a plain textual substitution: `and`/`or` are only recognized as
/// lowercase words with exactly one space on each side.
pub fn normalize(input: &str) -> String {
    input
        .replace(" and ", " && ")
        .replace(" or ", " || ")
        .replace(" = ", "=")
}

/// Parse a condition into its root scope
///
/// Error positions refer to character offsets in `normalize(input)`.
pub fn parse(input: &str, options: &EvaluatorOptions) -> Result<Expression, ConditionError> {
    let normalized = normalize(input);
    let expr = Parser::new(&normalized, options).parse_root()?;
    log::trace!(
        "Parsed condition '{}' into {} comparisons",
        input,
        expr.comparison_count()
    );
    Ok(expr)
}

/// Per-call parser state. The cursor lives here and nowhere else.
struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    options: &'a EvaluatorOptions,
}

/// Attribute name being accumulated ahead of an operator
#[derive(Default)]
struct PendingName {
    text: String,
    start: usize,
}

impl PendingName {
    fn push(&mut self, c: char, pos: usize) {
        if self.text.is_empty() {
            self.start = pos;
        }
        self.text.push(c);
    }

    /// Forget a name that no operator followed
    fn discard(&mut self) {
        if !self.text.is_empty() {
            log::trace!(
                "Dropping '{}' at position {}, no comparison follows it",
                self.text,
                self.start
            );
            self.text.clear();
        }
    }
}

impl<'a> Parser<'a> {
    fn new(input: &str, options: &'a EvaluatorOptions) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            options,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn parse_root(&mut self) -> Result<Expression, ConditionError> {
        self.parse_scope(None, 0)
    }

    /// Parse the contents of a scope. `open` is the position of its `(`,
    /// or `None` for the implicit top-level scope which ends at end of input.
    fn parse_scope(
        &mut self,
        open: Option<usize>,
        depth: usize,
    ) -> Result<Expression, ConditionError> {
        let mut terms: Vec<Term> = Vec::new();
        let mut relation: Option<Relation> = None;
        let mut name = PendingName::default();

        while let Some(c) = self.peek() {
            match c {
                '(' => {
                    name.discard();
                    let at = self.pos;
                    if depth + 1 > self.options.max_depth {
                        return Err(ConditionError::NestingTooDeep {
                            limit: self.options.max_depth,
                            position: at,
                        });
                    }
                    self.pos += 1;
                    let inner = self.parse_scope(Some(at), depth + 1)?;
                    push_term(&mut terms, relation.take(), inner, at)?;
                }
                ')' => {
                    name.discard();
                    if open.is_none() {
                        return Err(ConditionError::UnmatchedClose { position: self.pos });
                    }
                    self.pos += 1;
                    return Ok(Expression::Scope(terms));
                }
                '&' | '|' => {
                    name.discard();
                    relation = Some(if c == '&' {
                        Relation::And
                    } else {
                        Relation::Or
                    });
                    self.pos += 1;
                    if self.peek() == Some(c) {
                        self.pos += 1;
                    }
                }
                '<' | '>' | '=' => {
                    let start = if name.text.is_empty() {
                        self.pos
                    } else {
                        name.start
                    };
                    let attribute = std::mem::take(&mut name.text);
                    let compare = self.parse_comparison(attribute)?;
                    push_term(&mut terms, relation.take(), compare, start)?;
                }
                c if c.is_whitespace() => self.pos += 1,
                c => {
                    name.push(c, self.pos);
                    self.pos += 1;
                }
            }
        }

        name.discard();
        match open {
            Some(position) => Err(ConditionError::MismatchedParenthesis { position }),
            None => Ok(Expression::Scope(terms)),
        }
    }

    /// Parse `op literal` with the cursor on the first operator character
    fn parse_comparison(&mut self, attribute: String) -> Result<Expression, ConditionError> {
        let position = self.pos;
        let first = self.chars[self.pos];
        self.pos += 1;

        let extended = first != '=' && self.peek() == Some('=');
        if extended {
            self.pos += 1;
        }
        let op = match (first, extended) {
            ('<', true) => CompareOp::Lte,
            ('<', false) => CompareOp::Lt,
            ('>', true) => CompareOp::Gte,
            ('>', false) => CompareOp::Gt,
            _ => CompareOp::Eq,
        };

        let literal_start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ')' {
                break;
            }
            self.pos += 1;
        }
        if self.pos == literal_start {
            return Err(ConditionError::DanglingOperator {
                operator: op,
                position,
            });
        }

        let text: String = self.chars[literal_start..self.pos].iter().collect();
        let value = classify_literal(&text, literal_start, self.options)?;

        Ok(Expression::Compare {
            attribute,
            op,
            value,
            position,
        })
    }
}

fn push_term(
    terms: &mut Vec<Term>,
    relation: Option<Relation>,
    expression: Expression,
    position: usize,
) -> Result<(), ConditionError> {
    if terms.is_empty() {
        // A relation in front of the first term has nothing to bind to
        terms.push(Term {
            relation: None,
            expression,
        });
        return Ok(());
    }

    match relation {
        Some(relation) => {
            terms.push(Term {
                relation: Some(relation),
                expression,
            });
            Ok(())
        }
        None => Err(ConditionError::MissingRelation { position }),
    }
}
