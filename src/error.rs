// SPDX-License-Identifier: MIT

//! Typed error handling for adserve-rs
//!
//! `ConditionError` covers everything that can go wrong while compiling or
//! evaluating a targeting condition. `ServeError` is the crate-level error used
//! by the configuration, attribute and scenario-suite layers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::targeting::attributes::ValueKind;
use crate::targeting::condition::{CompareOp, LiteralKind};

/// Errors raised by the condition parser and evaluator
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    /// An opening parenthesis is never closed
    #[error("Brackets mismatch: '(' at position {position} is never closed")]
    MismatchedParenthesis { position: usize },

    /// A closing parenthesis has no opening counterpart
    #[error("Unexpected ')' at position {position}, it has no matching opening parenthesis")]
    UnmatchedClose { position: usize },

    /// An operator is not followed by a literal
    #[error("Expected comparison value after '{operator}' at position {position}")]
    DanglingOperator { operator: CompareOp, position: usize },

    /// The literal kind cannot be compared with the stored attribute value
    #[error("Cannot compare {value} attribute '{attribute}' with {literal} at position {position}")]
    TypeMismatch {
        attribute: String,
        literal: LiteralKind,
        value: ValueKind,
        position: usize,
    },

    /// Only `=` is defined for plain string literals
    #[error("Cannot compare strings with operator '{operator}' at position {position}, only '=' is allowed")]
    IllegalStringOperator { operator: CompareOp, position: usize },

    /// Interval syntax that does not split into two numeric bounds
    #[error("Malformed numeric interval '{literal}' at position {position}")]
    MalformedInterval { literal: String, position: usize },

    /// Two terms of one scope without `and`/`or` between them
    #[error("Expected 'and' or 'or' before the term at position {position}")]
    MissingRelation { position: usize },

    /// Parentheses nested deeper than the configured limit
    #[error("Scopes nested deeper than {limit} levels at position {position}")]
    NestingTooDeep { limit: usize, position: usize },
}

/// Stable, serializable names for the `ConditionError` variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MismatchedParenthesis,
    UnmatchedClose,
    DanglingOperator,
    TypeMismatch,
    IllegalStringOperator,
    MalformedInterval,
    MissingRelation,
    NestingTooDeep,
}

impl ConditionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MismatchedParenthesis { .. } => ErrorKind::MismatchedParenthesis,
            Self::UnmatchedClose { .. } => ErrorKind::UnmatchedClose,
            Self::DanglingOperator { .. } => ErrorKind::DanglingOperator,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::IllegalStringOperator { .. } => ErrorKind::IllegalStringOperator,
            Self::MalformedInterval { .. } => ErrorKind::MalformedInterval,
            Self::MissingRelation { .. } => ErrorKind::MissingRelation,
            Self::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
        }
    }

    /// Character offset in the normalized condition where the error was found
    pub fn position(&self) -> usize {
        match self {
            Self::MismatchedParenthesis { position }
            | Self::UnmatchedClose { position }
            | Self::DanglingOperator { position, .. }
            | Self::TypeMismatch { position, .. }
            | Self::IllegalStringOperator { position, .. }
            | Self::MalformedInterval { position, .. }
            | Self::MissingRelation { position }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::MismatchedParenthesis => "mismatched_parenthesis",
            ErrorKind::UnmatchedClose => "unmatched_close",
            ErrorKind::DanglingOperator => "dangling_operator",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::IllegalStringOperator => "illegal_string_operator",
            ErrorKind::MalformedInterval => "malformed_interval",
            ErrorKind::MissingRelation => "missing_relation",
            ErrorKind::NestingTooDeep => "nesting_too_deep",
        };
        write!(f, "{}", name)
    }
}

/// Top-level error type for adserve-rs
#[derive(Debug, Error)]
pub enum ServeError {
    /// Condition compilation or evaluation failed
    #[error("Condition error: {0}")]
    Condition(#[from] ConditionError),

    /// An attribute value that is neither a number nor a string
    #[error("Invalid attribute '{name}': {reason}")]
    InvalidAttribute { name: String, reason: String },

    /// Configuration errors (bad env vars, bad option values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl ServeError {
    /// Create an invalid attribute error
    pub fn invalid_attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
