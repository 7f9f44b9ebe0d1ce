// SPDX-License-Identifier: MIT

//! Attribute map storage

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::value::AttributeValue;
use crate::error::ServeError;

/// Caller-supplied context attributes, keyed by case-sensitive name
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Attributes {
    fields: HashMap<String, AttributeValue>,
}

impl Attributes {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Build attributes from a JSON object of numbers and strings
    pub fn from_json(value: &Value) -> Result<Self, ServeError> {
        let object = value
            .as_object()
            .ok_or_else(|| ServeError::invalid_attribute("<root>", "expected a JSON object"))?;

        let mut attributes = Self::new();
        for (name, raw) in object {
            let value = match raw {
                Value::Number(n) => n.as_f64().map(AttributeValue::Number).ok_or_else(|| {
                    ServeError::invalid_attribute(name, "number out of range")
                })?,
                Value::String(s) => AttributeValue::String(s.clone()),
                Value::Bool(_) => {
                    return Err(ServeError::invalid_attribute(name, "booleans are not supported"))
                }
                Value::Null => {
                    return Err(ServeError::invalid_attribute(name, "null is not supported"))
                }
                Value::Array(_) | Value::Object(_) => {
                    return Err(ServeError::invalid_attribute(
                        name,
                        "only scalar values are supported",
                    ))
                }
            };
            attributes.insert(name.clone(), value);
        }
        Ok(attributes)
    }

    /// Set an attribute, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style `insert`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Get an attribute value
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get all attribute names
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}

impl From<HashMap<String, AttributeValue>> for Attributes {
    fn from(fields: HashMap<String, AttributeValue>) -> Self {
        Self { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
