// SPDX-License-Identifier: MIT

//! Comparison literals and their classification by shape

use crate::error::ConditionError;
use crate::targeting::options::EvaluatorOptions;

/// Literal values on the right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    /// Inclusive range `[low-high]`
    Interval { low: f64, high: f64 },
    /// Comma separated alternatives `a,b,c`
    StringSet(Vec<String>),
    String(String),
}

/// The four literal kinds, used in error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Number,
    Interval,
    StringSet,
    String,
}

impl Literal {
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Number(_) => LiteralKind::Number,
            Literal::Interval { .. } => LiteralKind::Interval,
            Literal::StringSet(_) => LiteralKind::StringSet,
            Literal::String(_) => LiteralKind::String,
        }
    }
}

/// Classify raw literal text.
///
/// Priority is numeric, then interval, then string set, then plain string.
/// Intervals and string sets can be switched off through the options, in
/// which case such text falls through to the next kind.
pub fn classify_literal(
    text: &str,
    position: usize,
    options: &EvaluatorOptions,
) -> Result<Literal, ConditionError> {
    if let Some(n) = parse_number(text) {
        return Ok(Literal::Number(n));
    }

    if options.numeric_intervals && is_interval(text) {
        return parse_interval(text, position);
    }

    if options.string_sets && text.contains(',') {
        return Ok(Literal::StringSet(
            text.split(',').map(|s| s.to_string()).collect(),
        ));
    }

    Ok(Literal::String(text.to_string()))
}

/// Parse a finite decimal number: `[+-]digits[.digits][(e|E)[+-]digits]`.
///
/// Rejects `inf`, `NaN` and hex forms that `f64::from_str` or other
/// numeric parsers might accept. Values that overflow `f64` (`1e400`) are
/// rejected too and classify as strings.
pub fn parse_number(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return None;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }

    if i != bytes.len() {
        return None;
    }

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_interval(text: &str) -> bool {
    text.len() >= 2 && text.starts_with('[') && text.ends_with(']') && text.contains('-')
}

fn parse_interval(text: &str, position: usize) -> Result<Literal, ConditionError> {
    let malformed = || ConditionError::MalformedInterval {
        literal: text.to_string(),
        position,
    };

    let inner = &text[1..text.len() - 1];
    let mut parts = inner.split('-');
    let (low, high) = match (parts.next(), parts.next(), parts.next()) {
        (Some(low), Some(high), None) => (low, high),
        _ => return Err(malformed()),
    };

    let low = parse_number(low).ok_or_else(malformed)?;
    let high = parse_number(high).ok_or_else(malformed)?;
    Ok(Literal::Interval { low, high })
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{}", n),
            Literal::Interval { low, high } => write!(f, "[{}-{}]", low, high),
            Literal::StringSet(members) => write!(f, "{}", members.join(",")),
            Literal::String(s) => write!(f, "{}", s),
        }
    }
}

impl std::fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralKind::Number => write!(f, "numeric value"),
            LiteralKind::Interval => write!(f, "numeric interval"),
            LiteralKind::StringSet => write!(f, "string set"),
            LiteralKind::String => write!(f, "string value"),
        }
    }
}
