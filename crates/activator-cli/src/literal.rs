//! Command-line argument literals.
//!
//! | literal            | value                 |
//! |--------------------|-----------------------|
//! | `null`             | `Value::Null`         |
//! | `true` / `false`   | `Boolean`             |
//! | `42`, `-7`         | `Int32`               |
//! | `42L`              | `Int64`               |
//! | `1.5`              | `Float64`             |
//! | `'c'`              | `Char`                |
//! | `@<ticks>`         | `DateTime`            |
//! | anything else      | `String`, one pair of surrounding double quotes removed |
use activator_types::{DateTime, Value};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiteralError {
    #[error("integer literal out of range: {0}")]
    IntegerOutOfRange(String),
    #[error("invalid char literal: {0}")]
    InvalidChar(String),
    #[error("invalid DateTime literal {0}: expected @<ticks> between {min} and {max}", min = DateTime::MIN.ticks(), max = DateTime::MAX.ticks())]
    InvalidDateTime(String),
}

pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    match text {
        "null" => return Ok(Value::Null),
        "true" => return Ok(Value::Boolean(true)),
        "false" => return Ok(Value::Boolean(false)),
        _ => {}
    }

    if let Some(ticks) = text.strip_prefix('@') {
        return ticks
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_ticks)
            .map(Value::DateTime)
            .ok_or_else(|| LiteralError::InvalidDateTime(text.to_string()));
    }

    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        let mut chars = text[1..text.len() - 1].chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Value::Char(c)),
            _ => Err(LiteralError::InvalidChar(text.to_string())),
        };
    }

    if looks_numeric(text) {
        if let Some(digits) = text.strip_suffix('L').filter(|d| is_integer(d)) {
            return digits
                .parse::<i64>()
                .map(Value::Int64)
                .map_err(|_| LiteralError::IntegerOutOfRange(text.to_string()));
        }
        if is_integer(text) {
            return text
                .parse::<i32>()
                .map(Value::Int32)
                .map_err(|_| LiteralError::IntegerOutOfRange(text.to_string()));
        }
        if let Ok(f) = text.parse::<f64>() {
            return Ok(Value::Float64(f));
        }
    }

    let unquoted = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    Ok(Value::from(unquoted))
}

fn looks_numeric(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    body.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn is_integer(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    !body.is_empty() && body.chars().all(|c| c.is_ascii_digit())
}
