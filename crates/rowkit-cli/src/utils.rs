use std::{
    fmt::Display,
    sync::{LazyLock, RwLock},
};

use nu_ansi_term::Color;
use rowkit_db::{Filter, Value};

use crate::error::{CliError, CliResult};

pub static COLOR: LazyLock<RwLock<bool>> = LazyLock::new(|| RwLock::new(true));

pub fn set_color(enabled: bool) {
    let mut color = COLOR.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *color = enabled;
}

pub struct Colored<T: Display>(pub Color, pub T);

impl<T: Display> Display for Colored<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let color = COLOR.read().map(|c| *c).unwrap_or(false);
        if color {
            write!(f, "{}", self.0.prefix())?;
            self.1.fmt(f)?;
            write!(f, "{}", self.0.suffix())
        } else {
            self.1.fmt(f)
        }
    }
}

/// Coerces a command-line value: `null`, then integer, then real, otherwise text.
pub fn parse_value(raw: &str) -> Value {
    if raw.eq_ignore_ascii_case("null") {
        Value::Null
    } else if let Ok(i) = raw.parse::<i64>() {
        Value::Integer(i)
    } else if let Ok(f) = raw.parse::<f64>() {
        if f.is_finite() {
            Value::Real(f)
        } else {
            Value::Text(raw.to_string())
        }
    } else {
        Value::Text(raw.to_string())
    }
}

/// Splits `column=value` at the first `=`.
pub fn parse_pair(raw: &str) -> CliResult<(String, Value)> {
    match raw.split_once('=') {
        Some((column, value)) if !column.trim().is_empty() => {
            Ok((column.trim().to_string(), parse_value(value)))
        }
        _ => Err(CliError::InvalidPair(raw.to_string())),
    }
}

/// Builds an ordered filter set from `column=value` arguments.
pub fn parse_filter(pairs: &[String]) -> CliResult<Filter> {
    pairs
        .iter()
        .map(|pair| parse_pair(pair))
        .collect::<CliResult<Filter>>()
}

/// Plain text rendering of a cell.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

pub fn json_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Integer(i) => serde_json::Value::from(*i),
        Value::Real(f) => serde_json::Value::from(*f),
        Value::Text(s) => serde_json::Value::from(s.as_str()),
        Value::Blob(b) => serde_json::Value::from(b.as_slice()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_coercion() {
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("NULL"), Value::Null);
        assert_eq!(parse_value("42"), Value::Integer(42));
        assert_eq!(parse_value("-7"), Value::Integer(-7));
        assert_eq!(parse_value("2.5"), Value::Real(2.5));
        assert_eq!(parse_value("done"), Value::Text("done".into()));
        assert_eq!(parse_value("2020-05-11"), Value::Text("2020-05-11".into()));
        assert_eq!(parse_value("inf"), Value::Text("inf".into()));
        assert_eq!(parse_value(""), Value::Text(String::new()));
    }

    #[test]
    fn test_parse_pair() {
        let (column, value) = parse_pair("status=done").unwrap();
        assert_eq!(column, "status");
        assert_eq!(value, Value::Text("done".into()));

        let (_, value) = parse_pair("description=a=b").unwrap();
        assert_eq!(value, Value::Text("a=b".into()));

        assert!(matches!(parse_pair("status"), Err(CliError::InvalidPair(_))));
        assert!(matches!(parse_pair("=done"), Err(CliError::InvalidPair(_))));
    }

    #[test]
    fn test_parse_filter_keeps_order() {
        let filter = parse_filter(&["status=done".into(), "project_id=1".into()]).unwrap();
        assert_eq!(filter.columns(), vec!["status", "project_id"]);
    }

    #[test]
    fn test_colored_without_color() {
        set_color(false);
        assert_eq!(Colored(Color::Red, "x").to_string(), "x");
        set_color(true);
    }
}
