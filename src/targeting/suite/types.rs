// SPDX-License-Identifier: MIT

//! YAML schema types for scenario suites

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::targeting::attributes::Attributes;
use crate::targeting::options::EvaluatorOptions;

/// Top-level suite document
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Suite {
    #[serde(default)]
    pub name: Option<String>,
    /// Evaluator options used for every scenario
    #[serde(default)]
    pub options: EvaluatorOptions,
    pub scenarios: Vec<Scenario>,
}

/// One attributes/condition pair and its expected result
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Scenario {
    pub description: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub condition: String,
    pub expect: Expectation,
}

/// Expected result: a verdict or `{ error: <kind> }`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Expectation {
    Verdict(bool),
    Error { error: ErrorKind },
}

impl std::fmt::Display for Expectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expectation::Verdict(v) => write!(f, "{}", v),
            Expectation::Error { error } => write!(f, "error {}", error),
        }
    }
}
