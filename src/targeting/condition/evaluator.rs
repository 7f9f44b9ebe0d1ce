// SPDX-License-Identifier: MIT

//! Condition expression evaluator

use super::ast::{CompareOp, Expression, Term};
use super::literal::Literal;
use crate::error::ConditionError;
use crate::targeting::attributes::{AttributeValue, Attributes};

/// Why a walk over the tree stopped early
enum Halt {
    /// A comparison referenced an attribute the context does not have
    UnknownAttribute(String),
    Failed(ConditionError),
}

impl From<ConditionError> for Halt {
    fn from(err: ConditionError) -> Self {
        Halt::Failed(err)
    }
}

/// Evaluate a parsed condition against a set of attributes.
///
/// Terms are evaluated left to right without short-circuiting. The first
/// comparison on an unknown attribute makes the whole condition `false`;
/// type errors found before that point are returned.
pub fn evaluate(expr: &Expression, attributes: &Attributes) -> Result<bool, ConditionError> {
    match eval(expr, attributes) {
        Ok(result) => Ok(result),
        Err(Halt::UnknownAttribute(name)) => {
            log::debug!("Attribute '{}' is not present, condition cannot match", name);
            Ok(false)
        }
        Err(Halt::Failed(err)) => Err(err),
    }
}

fn eval(expr: &Expression, attributes: &Attributes) -> Result<bool, Halt> {
    match expr {
        Expression::Scope(terms) => eval_scope(terms, attributes),
        Expression::Compare {
            attribute,
            op,
            value,
            position,
        } => {
            let stored = attributes
                .get(attribute)
                .ok_or_else(|| Halt::UnknownAttribute(attribute.clone()))?;
            let result = evaluate_compare(attribute, *op, value, stored, *position)?;
            log::trace!("{}{}{} -> {}", attribute, op, value, result);
            Ok(result)
        }
    }
}

fn eval_scope(terms: &[Term], attributes: &Attributes) -> Result<bool, Halt> {
    let mut scope: Option<bool> = None;
    for term in terms {
        let value = eval(&term.expression, attributes)?;
        scope = Some(match (scope, term.relation) {
            (Some(current), Some(relation)) => relation.apply(current, value),
            // Parser guarantees every term after the first carries a relation
            _ => value,
        });
    }
    // An empty scope places no constraint
    Ok(scope.unwrap_or(true))
}

fn evaluate_compare(
    attribute: &str,
    op: CompareOp,
    literal: &Literal,
    stored: &AttributeValue,
    position: usize,
) -> Result<bool, ConditionError> {
    let mismatch = || ConditionError::TypeMismatch {
        attribute: attribute.to_string(),
        literal: literal.kind(),
        value: stored.kind(),
        position,
    };

    match literal {
        Literal::Number(n) => {
            let value = stored.as_f64().ok_or_else(mismatch)?;
            Ok(op.compare(value, *n))
        }
        // Interval membership ignores the written operator
        Literal::Interval { low, high } => {
            let value = stored.as_f64().ok_or_else(mismatch)?;
            Ok(*low <= value && value <= *high)
        }
        Literal::StringSet(members) => {
            let value = stored.as_str().ok_or_else(mismatch)?;
            Ok(members.iter().any(|m| m == value))
        }
        Literal::String(s) => {
            let value = stored.as_str().ok_or_else(mismatch)?;
            if op != CompareOp::Eq {
                return Err(ConditionError::IllegalStringOperator {
                    operator: op,
                    position,
                });
            }
            Ok(value == s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::targeting::condition::literal::LiteralKind;
    use crate::targeting::condition::parser::parse;
    use crate::targeting::attributes::ValueKind;
    use crate::targeting::options::EvaluatorOptions;

    fn check(attributes: &Attributes, condition: &str) -> Result<bool, ConditionError> {
        let expr = parse(condition, &EvaluatorOptions::default())?;
        evaluate(&expr, attributes)
    }

    fn person() -> Attributes {
        Attributes::new()
            .with("age", 25)
            .with("category", "programming")
            .with("color", "dark")
            .with("name", "Jasmine")
            .with("gender", "female")
    }

    #[test]
    fn test_string_equality() {
        let attributes = person();
        assert!(check(&attributes, "color=dark").unwrap());
        assert!(!check(&attributes, "color=white").unwrap());
        assert!(!check(&attributes, "name=jasmine").unwrap());
    }

    #[test]
    fn test_number_comparison() {
        let attributes = Attributes::new().with("score", 7.5);

        assert!(check(&attributes, "score>5").unwrap());
        assert!(!check(&attributes, "score>10").unwrap());

        assert!(check(&attributes, "score>=7.5").unwrap());
        assert!(!check(&attributes, "score>=8").unwrap());

        assert!(check(&attributes, "score<10").unwrap());
        assert!(!check(&attributes, "score<5").unwrap());

        assert!(check(&attributes, "score<=7.5").unwrap());
        assert!(!check(&attributes, "score<=7").unwrap());

        assert!(check(&attributes, "score=7.5").unwrap());
        assert!(!check(&attributes, "score=7").unwrap());
    }

    #[test]
    fn test_interval_is_inclusive() {
        for (age, expected) in [(9, false), (10, true), (20, true), (35, true), (36, false)] {
            let attributes = Attributes::new().with("age", age);
            assert_eq!(
                check(&attributes, "age=[10-35]").unwrap(),
                expected,
                "age {}",
                age
            );
        }
    }

    #[test]
    fn test_interval_ignores_operator() {
        let attributes = Attributes::new().with("age", 20);
        assert!(check(&attributes, "age<[10-35]").unwrap());
        assert!(check(&attributes, "age>=[10-35]").unwrap());
    }

    #[test]
    fn test_string_set_membership() {
        let attributes = Attributes::new().with("name", "John");
        assert!(check(&attributes, "name=Ben,John,Peter").unwrap());

        let attributes = Attributes::new().with("name", "john");
        assert!(!check(&attributes, "name=Ben,John,Peter").unwrap());
    }

    #[test]
    fn test_empty_scope_is_true() {
        let attributes = person();
        assert!(check(&attributes, "()").unwrap());
        assert!(check(&attributes, "() and ()").unwrap());
        assert!(check(&attributes, "color=dark and ()").unwrap());
        assert!(!check(&attributes, "color=white and ()").unwrap());
        assert!(check(&attributes, "color=white or ()").unwrap());
    }

    #[test]
    fn test_relations_fold_left_to_right() {
        let attributes = Attributes::new().with("a", 1).with("b", 2).with("c", 3);

        // ((a=1 or b=0) and c=0) -> false; precedence-based reading would be true
        assert!(!check(&attributes, "a=1 or b=0 and c=0").unwrap());
        // ((a=0 and b=0) or c=3) -> true
        assert!(check(&attributes, "a=0 and b=0 or c=3").unwrap());
        // Explicit grouping changes the result
        assert!(check(&attributes, "a=1 or (b=0 and c=0)").unwrap());
    }

    #[test]
    fn test_unknown_attribute_is_false() {
        let attributes = person();
        assert!(!check(&attributes, "missing=1").unwrap());
        assert!(!check(&attributes, "color=dark or missing=1").unwrap());
        assert!(!check(&attributes, "(color=dark or color=white) and missing=test").unwrap());
    }

    #[test]
    fn test_unknown_attribute_stops_before_later_errors() {
        let attributes = person();
        // The type error on `color` is never reached
        assert!(!check(&attributes, "missing=1 and color=5").unwrap());
    }

    #[test]
    fn test_type_error_before_unknown_attribute_is_raised() {
        let attributes = person();
        let err = check(&attributes, "color=5 and missing=1").unwrap_err();
        assert_eq!(
            err,
            ConditionError::TypeMismatch {
                attribute: "color".to_string(),
                literal: LiteralKind::Number,
                value: ValueKind::String,
                position: 5,
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let attributes = person();
        assert!(matches!(
            check(&attributes, "color=[1-5]").unwrap_err(),
            ConditionError::TypeMismatch {
                literal: LiteralKind::Interval,
                ..
            }
        ));
        assert!(matches!(
            check(&attributes, "age=Ben,John").unwrap_err(),
            ConditionError::TypeMismatch {
                literal: LiteralKind::StringSet,
                value: ValueKind::Number,
                ..
            }
        ));
        assert!(matches!(
            check(&attributes, "age=old").unwrap_err(),
            ConditionError::TypeMismatch {
                literal: LiteralKind::String,
                ..
            }
        ));
    }

    #[test]
    fn test_numeric_strings_are_not_coerced() {
        let attributes = Attributes::new().with("age", "25");
        assert!(matches!(
            check(&attributes, "age<30").unwrap_err(),
            ConditionError::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_illegal_string_operator() {
        let attributes = person();
        assert_eq!(
            check(&attributes, "color<dark").unwrap_err(),
            ConditionError::IllegalStringOperator {
                operator: CompareOp::Lt,
                position: 5
            }
        );
        assert!(matches!(
            check(&attributes, "color>=dark").unwrap_err(),
            ConditionError::IllegalStringOperator {
                operator: CompareOp::Gte,
                ..
            }
        ));
    }

    #[test]
    fn test_no_short_circuit() {
        let attributes = person();
        // `or` with a true left side still evaluates the right side
        assert!(check(&attributes, "color=dark or color<dark").is_err());
    }
}
