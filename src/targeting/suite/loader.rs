// SPDX-License-Identifier: MIT

//! Suite loader - YAML file loading and parsing

use std::fs;
use std::path::Path;

use super::types::Suite;
use crate::error::ServeError;

/// Loads scenario suites from YAML files
pub struct SuiteLoader;

impl SuiteLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load a suite from a YAML file
    pub fn load_suite<P: AsRef<Path>>(&self, path: P) -> Result<Suite, ServeError> {
        let path = path.as_ref();
        log::debug!("Loading suite from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse_yaml(&content)
    }

    /// Parse a suite from a YAML string
    pub fn parse_yaml(content: &str) -> Result<Suite, ServeError> {
        let suite: Suite = serde_yaml::from_str(content)?;
        suite.options.validate()?;
        Ok(suite)
    }
}

impl Default for SuiteLoader {
    fn default() -> Self {
        Self::new()
    }
}
