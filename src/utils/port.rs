//! Port value coercion for container mappings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A container mapping port as it appears in `containers.yml`.
///
/// Ports are collected as text; when the text parses as an integer it is
/// written as a YAML number, otherwise the original text is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

impl PortValue {
    /// Coerce port text to a number when possible.
    ///
    /// Surrounding whitespace and a leading sign are accepted.
    ///
    /// # Examples
    /// ```
    /// use topogen::utils::PortValue;
    ///
    /// assert_eq!(PortValue::coerce("8080"), PortValue::Number(8080));
    /// assert_eq!(PortValue::coerce(" 22 "), PortValue::Number(22));
    /// assert_eq!(PortValue::coerce("http"), PortValue::Text("http".to_string()));
    /// ```
    pub fn coerce(raw: &str) -> Self {
        match raw.trim().parse::<i64>() {
            Ok(n) => PortValue::Number(n),
            Err(_) => PortValue::Text(raw.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, PortValue::Number(_))
    }
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortValue::Number(n) => write!(f, "{}", n),
            PortValue::Text(s) => write!(f, "{}", s),
        }
    }
}
