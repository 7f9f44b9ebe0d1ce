// SPDX-License-Identifier: MIT

//! Runs scenario suites and collects pass/fail results

use super::types::{Expectation, Scenario, Suite};
use crate::error::ConditionError;
use crate::targeting::engine::ConditionEvaluator;

/// What a scenario actually produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Verdict(bool),
    Error(ConditionError),
}

/// Result of a single scenario
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub description: String,
    pub expected: Expectation,
    pub outcome: Outcome,
    pub passed: bool,
}

/// Results for a whole suite, in scenario order
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub results: Vec<ScenarioResult>,
}

impl Outcome {
    fn satisfies(&self, expected: &Expectation) -> bool {
        match (self, expected) {
            (Outcome::Verdict(actual), Expectation::Verdict(wanted)) => actual == wanted,
            (Outcome::Error(err), Expectation::Error { error }) => err.kind() == *error,
            _ => false,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Verdict(v) => write!(f, "{}", v),
            Outcome::Error(err) => write!(f, "error {} ({})", err.kind(), err),
        }
    }
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}

/// Evaluate every scenario of a suite with the suite's options
pub fn run_suite(suite: &Suite) -> SuiteReport {
    let evaluator = ConditionEvaluator::with_options(suite.options.clone());
    let results = suite
        .scenarios
        .iter()
        .map(|scenario| run_scenario(&evaluator, scenario))
        .collect();
    SuiteReport { results }
}

fn run_scenario(evaluator: &ConditionEvaluator, scenario: &Scenario) -> ScenarioResult {
    let outcome = match evaluator.should_serve(&scenario.attributes, &scenario.condition) {
        Ok(verdict) => Outcome::Verdict(verdict),
        Err(err) => Outcome::Error(err),
    };
    let passed = outcome.satisfies(&scenario.expect);
    if !passed {
        log::warn!(
            "Scenario '{}' expected {} but got {}",
            scenario.description,
            scenario.expect,
            outcome
        );
    }

    ScenarioResult {
        description: scenario.description.clone(),
        expected: scenario.expect.clone(),
        outcome,
        passed,
    }
}
