// SPDX-License-Identifier: MIT

//! Abstract Syntax Tree for targeting conditions

use super::literal::Literal;

/// A condition expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Parenthesized group of terms folded left to right
    Scope(Vec<Term>),
    /// Comparison expression: attribute op value
    Compare {
        attribute: String,
        op: CompareOp,
        value: Literal,
        /// Offset of the operator in the normalized condition
        position: usize,
    },
}

/// A child of a scope together with the relation written before it
///
/// The first term of a scope never carries a relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub relation: Option<Relation>,
    pub expression: Expression,
}

/// Relation markers linking sibling terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `and` / `&&`
    And,
    /// `or` / `||`
    Or,
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// =
    Eq,
    /// <
    Lt,
    /// >
    Gt,
    /// <=
    Lte,
    /// >=
    Gte,
}

impl Relation {
    pub fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Relation::And => left && right,
            Relation::Or => left || right,
        }
    }
}

impl CompareOp {
    pub fn compare(self, left: f64, right: f64) -> bool {
        match self {
            CompareOp::Eq => left == right,
            CompareOp::Lt => left < right,
            CompareOp::Gt => left > right,
            CompareOp::Lte => left <= right,
            CompareOp::Gte => left >= right,
        }
    }
}

impl Expression {
    /// Number of comparisons in the tree
    pub fn comparison_count(&self) -> usize {
        match self {
            Expression::Compare { .. } => 1,
            Expression::Scope(terms) => terms
                .iter()
                .map(|t| t.expression.comparison_count())
                .sum(),
        }
    }

    /// Deepest scope nesting below this node
    pub fn depth(&self) -> usize {
        match self {
            Expression::Compare { .. } => 0,
            Expression::Scope(terms) => {
                1 + terms
                    .iter()
                    .map(|t| t.expression.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }

    /// Writes the terms of a scope without the surrounding parentheses
    fn fmt_terms(terms: &[Term], f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                if let Some(relation) = term.relation {
                    write!(f, " {} ", relation)?;
                } else {
                    write!(f, " ")?;
                }
            }
            write!(f, "{}", term.expression)?;
        }
        Ok(())
    }

    /// Canonical form of a root expression, without the implicit outer scope
    pub fn to_root_string(&self) -> String {
        struct Root<'a>(&'a Expression);

        impl std::fmt::Display for Root<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.0 {
                    Expression::Scope(terms) => Expression::fmt_terms(terms, f),
                    other => write!(f, "{}", other),
                }
            }
        }

        Root(self).to_string()
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Scope(terms) => {
                write!(f, "(")?;
                Expression::fmt_terms(terms, f)?;
                write!(f, ")")
            }
            Expression::Compare {
                attribute,
                op,
                value,
                ..
            } => write!(f, "{}{}{}", attribute, op, value),
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::And => write!(f, "and"),
            Relation::Or => write!(f, "or"),
        }
    }
}

impl std::fmt::Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Lte => write!(f, "<="),
            CompareOp::Gte => write!(f, ">="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare(attribute: &str, op: CompareOp, value: Literal) -> Expression {
        Expression::Compare {
            attribute: attribute.to_string(),
            op,
            value,
            position: 0,
        }
    }

    #[test]
    fn test_compare_op_display() {
        assert_eq!(format!("{}", CompareOp::Eq), "=");
        assert_eq!(format!("{}", CompareOp::Gt), ">");
        assert_eq!(format!("{}", CompareOp::Gte), ">=");
        assert_eq!(format!("{}", CompareOp::Lt), "<");
        assert_eq!(format!("{}", CompareOp::Lte), "<=");
    }

    #[test]
    fn test_compare_op_ordering() {
        assert!(CompareOp::Lt.compare(25.0, 35.0));
        assert!(!CompareOp::Gt.compare(25.0, 35.0));
        assert!(CompareOp::Lte.compare(35.0, 35.0));
        assert!(CompareOp::Gte.compare(35.0, 35.0));
        assert!(CompareOp::Eq.compare(25.0, 25.0));
        assert!(!CompareOp::Eq.compare(25.0, 25.5));
    }

    #[test]
    fn test_relation_apply() {
        assert!(Relation::And.apply(true, true));
        assert!(!Relation::And.apply(true, false));
        assert!(Relation::Or.apply(false, true));
        assert!(!Relation::Or.apply(false, false));
    }

    #[test]
    fn test_display_nested_scope() {
        let expr = Expression::Scope(vec![
            Term {
                relation: None,
                expression: compare("age", CompareOp::Lt, Literal::Number(35.0)),
            },
            Term {
                relation: Some(Relation::And),
                expression: Expression::Scope(vec![
                    Term {
                        relation: None,
                        expression: compare(
                            "name",
                            CompareOp::Eq,
                            Literal::StringSet(vec!["Ben".to_string(), "John".to_string()]),
                        ),
                    },
                    Term {
                        relation: Some(Relation::Or),
                        expression: compare(
                            "height",
                            CompareOp::Eq,
                            Literal::Interval {
                                low: 150.0,
                                high: 170.0,
                            },
                        ),
                    },
                ]),
            },
        ]);

        assert_eq!(
            expr.to_string(),
            "(age<35 and (name=Ben,John or height=[150-170]))"
        );
        assert_eq!(
            expr.to_root_string(),
            "age<35 and (name=Ben,John or height=[150-170])"
        );
        assert_eq!(expr.comparison_count(), 3);
        assert_eq!(expr.depth(), 2);
    }

    #[test]
    fn test_empty_scope_display() {
        let expr = Expression::Scope(vec![]);
        assert_eq!(expr.to_string(), "()");
        assert_eq!(expr.to_root_string(), "");
        assert_eq!(expr.depth(), 1);
    }
}
