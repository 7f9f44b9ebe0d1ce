// SPDX-License-Identifier: MIT

//! Ad targeting conditions
//!
//! Decides whether a piece of content should be served to a context by
//! checking a small boolean condition language against the context's
//! attributes.
//!
//! ```
//! use adserve_rs::{should_serve, Attributes};
//!
//! let attributes = Attributes::new().with("age", 25).with("category", "economics");
//! let served = should_serve(
//!     &attributes,
//!     "(age=35 and category=programming) or (age=25 and category=economics)",
//! )
//! .unwrap();
//! assert!(served);
//! ```

pub mod error;
pub mod targeting;

pub use error::{ConditionError, ErrorKind, ServeError};
pub use targeting::attributes::{AttributeValue, Attributes};
pub use targeting::engine::{should_serve, CompiledCondition, ConditionEvaluator};
pub use targeting::options::EvaluatorOptions;
