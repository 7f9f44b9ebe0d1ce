// SPDX-License-Identifier: MIT

//! Scenario suites
//!
//! A suite is a YAML list of attribute sets, conditions and the expected
//! verdict (or error) for each. Suites document the condition language and
//! back the `adserve check` command.

pub mod loader;
pub mod runner;
pub mod types;

pub use loader::SuiteLoader;
pub use runner::{run_suite, Outcome, ScenarioResult, SuiteReport};
pub use types::{Expectation, Scenario, Suite};
