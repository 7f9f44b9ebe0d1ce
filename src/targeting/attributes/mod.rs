// SPDX-License-Identifier: MIT

//! Context attributes a condition is evaluated against
//!
//! This module provides:
//! - `AttributeValue` - a scalar, either a number or a string
//! - `Attributes` - the case-sensitive name to value map supplied by the caller

mod store;
mod value;

pub use store::Attributes;
pub use value::{AttributeValue, ValueKind};
