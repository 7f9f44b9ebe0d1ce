// SPDX-License-Identifier: MIT

//! Targeting condition language
//!
//! This module provides parsing and evaluation of targeting conditions.
//! Conditions are small boolean expressions like:
//! - `age=25`
//! - `age<35 and category=economics`
//! - `(age=[18-32] or name=Ben,John) and (color=dark or ())`

mod ast;
mod evaluator;
mod literal;
mod parser;

pub use ast::{CompareOp, Expression, Relation, Term};
pub use evaluator::evaluate;
pub use literal::{classify_literal, parse_number, Literal, LiteralKind};
pub use parser::{normalize, parse};
