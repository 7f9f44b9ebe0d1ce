// SPDX-License-Identifier: MIT

//! Evaluator configuration
//!
//! Options can be deserialized from suite files or read from the environment:
//! - `ADSERVE_NUMERIC_INTERVALS` - `true`/`false`, enables `[low-high]` literals
//! - `ADSERVE_STRING_SETS` - `true`/`false`, enables `a,b,c` literals
//! - `ADSERVE_MAX_DEPTH` - maximum scope nesting depth

use serde::{Deserialize, Serialize};

use crate::error::ServeError;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Switches and limits for condition compilation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EvaluatorOptions {
    /// Recognize `[low-high]` literals as inclusive numeric intervals
    pub numeric_intervals: bool,
    /// Recognize comma separated literals as string sets
    pub string_sets: bool,
    /// Maximum parenthesis nesting depth
    pub max_depth: usize,
}

impl Default for EvaluatorOptions {
    fn default() -> Self {
        Self {
            numeric_intervals: true,
            string_sets: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvaluatorOptions {
    /// Defaults overridden by any `ADSERVE_*` variables that are set
    pub fn from_env() -> Result<Self, ServeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an injectable variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(raw) = lookup("ADSERVE_NUMERIC_INTERVALS") {
            options.numeric_intervals = parse_flag("ADSERVE_NUMERIC_INTERVALS", &raw)?;
        }
        if let Some(raw) = lookup("ADSERVE_STRING_SETS") {
            options.string_sets = parse_flag("ADSERVE_STRING_SETS", &raw)?;
        }
        if let Some(raw) = lookup("ADSERVE_MAX_DEPTH") {
            options.max_depth = raw.trim().parse::<usize>().map_err(|_| {
                ServeError::config(format!("ADSERVE_MAX_DEPTH must be a number, got '{}'", raw))
            })?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Reject settings no condition could be compiled under
    pub fn validate(&self) -> Result<(), ServeError> {
        if self.max_depth == 0 {
            return Err(ServeError::config("max_depth must be at least 1"));
        }
        Ok(())
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ServeError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ServeError::config(format!(
            "{} must be true or false, got '{}'",
            key, raw
        ))),
    }
}
