// SPDX-License-Identifier: MIT

pub mod attributes;
pub mod condition;
pub mod engine;
pub mod options;
pub mod suite;
