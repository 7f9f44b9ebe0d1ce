// SPDX-License-Identifier: MIT

//! Serve decisions
//!
//! `ConditionEvaluator` is the entry point: it applies the empty-input rules,
//! compiles the condition and evaluates it against the caller's attributes.
//! It holds nothing but its options, so one instance can be shared freely
//! between threads.

use crate::error::ConditionError;
use crate::targeting::attributes::Attributes;
use crate::targeting::condition::{evaluate, parse, Expression};
use crate::targeting::options::EvaluatorOptions;

/// Compiles and evaluates targeting conditions
#[derive(Debug, Clone, Default)]
pub struct ConditionEvaluator {
    options: EvaluatorOptions,
}

/// A condition parsed once, ready to be matched against many attribute sets
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCondition {
    source: String,
    /// `None` when the condition was blank
    expression: Option<Expression>,
}

impl ConditionEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EvaluatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EvaluatorOptions {
        &self.options
    }

    /// Decide whether content guarded by `condition` may be served to a
    /// context described by `attributes`.
    ///
    /// - no attributes: `false`, checked first
    /// - blank condition: `true`
    /// - condition referencing an absent attribute: `false`
    pub fn should_serve(
        &self,
        attributes: &Attributes,
        condition: &str,
    ) -> Result<bool, ConditionError> {
        if attributes.is_empty() {
            log::debug!("No attributes supplied, nothing can match");
            return Ok(false);
        }
        if condition.trim().is_empty() {
            return Ok(true);
        }

        let expr = parse(condition, &self.options)?;
        evaluate(&expr, attributes)
    }

    /// Parse a condition for repeated evaluation
    pub fn compile(&self, condition: &str) -> Result<CompiledCondition, ConditionError> {
        let expression = if condition.trim().is_empty() {
            None
        } else {
            Some(parse(condition, &self.options)?)
        };

        Ok(CompiledCondition {
            source: condition.to_string(),
            expression,
        })
    }
}

impl CompiledCondition {
    /// Same rules as `ConditionEvaluator::should_serve`
    pub fn matches(&self, attributes: &Attributes) -> Result<bool, ConditionError> {
        if attributes.is_empty() {
            return Ok(false);
        }
        match &self.expression {
            Some(expr) => evaluate(expr, attributes),
            None => Ok(true),
        }
    }

    /// The condition text as it was given
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expression(&self) -> Option<&Expression> {
        self.expression.as_ref()
    }
}

impl std::fmt::Display for CompiledCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.expression {
            Some(expr) => write!(f, "{}", expr.to_root_string()),
            None => Ok(()),
        }
    }
}

/// `ConditionEvaluator::should_serve` with default options
pub fn should_serve(attributes: &Attributes, condition: &str) -> Result<bool, ConditionError> {
    ConditionEvaluator::new().should_serve(attributes, condition)
}
