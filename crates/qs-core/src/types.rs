//! Value types for query objects.
//!
//! A query string is flat: every key maps either to a single scalar or to one
//! level of scalars. [`QueryValue`] and [`Scalar`] are closed variants that
//! encode exactly that shape, so nested mappings and nested sequences cannot be
//! represented at all.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::QsError;

/// A key→value mapping as produced by `parse` and consumed by `stringify`.
///
/// Insertion order is preserved and drives serialization order. Equality
/// ignores order (`IndexMap`'s `PartialEq` compares as a map).
pub type QueryObject = IndexMap<String, QueryValue>;

/// A single element of a sequence value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Number(f64),
    String(String),
}

/// The value bound to one key of a [`QueryObject`].
///
/// `Null` stands for both null and absent values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    #[default]
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    Sequence(Vec<Scalar>),
}

impl QueryValue {
    pub fn is_null(&self) -> bool {
        matches!(self, QueryValue::Null)
    }

    /// True only for `String("")`; an empty sequence is not an empty string.
    pub fn is_empty_string(&self) -> bool {
        matches!(self, QueryValue::String(s) if s.is_empty())
    }

    /// The string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// The elements, if this is a sequence value.
    pub fn as_sequence(&self) -> Option<&[Scalar]> {
        match self {
            QueryValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The scalar payload. `Null` and sequences have none.
    pub fn into_scalar(self) -> Option<Scalar> {
        match self {
            QueryValue::Boolean(b) => Some(Scalar::Boolean(b)),
            QueryValue::Number(n) => Some(Scalar::Number(n)),
            QueryValue::String(s) => Some(Scalar::String(s)),
            QueryValue::Null | QueryValue::Sequence(_) => None,
        }
    }

    /// Canonical text of a non-sequence value. `Null` renders as `null`.
    pub(crate) fn scalar_text(&self) -> Option<String> {
        match self {
            QueryValue::Null => Some("null".to_string()),
            QueryValue::Boolean(b) => Some(b.to_string()),
            QueryValue::Number(n) => Some(format_number(*n)),
            QueryValue::String(s) => Some(s.clone()),
            QueryValue::Sequence(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Boolean(b) => write!(f, "{b}"),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
            Scalar::String(s) => f.write_str(s),
        }
    }
}

/// Render a number the way it appears in a query string.
///
/// - Integral values have no fraction: `1.0` → `1`
/// - Negative zero normalizes to `0`
/// - Other finite values use the shortest round-trip decimal, never an exponent
/// - `NaN`, `Infinity` and `-Infinity` are spelled out
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    format!("{}", n)
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Boolean(b)
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(f64::from(n))
    }
}

impl From<Scalar> for QueryValue {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Boolean(b) => QueryValue::Boolean(b),
            Scalar::Number(n) => QueryValue::Number(n),
            Scalar::String(s) => QueryValue::String(s),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::String(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::String(s)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Boolean(b)
    }
}

impl From<f64> for QueryValue {
    fn from(n: f64) -> Self {
        QueryValue::Number(n)
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Number(n as f64)
    }
}

impl From<i32> for QueryValue {
    fn from(n: i32) -> Self {
        QueryValue::Number(f64::from(n))
    }
}

impl<T: Into<Scalar>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(QueryValue::Null, Into::into)
    }
}

/// How a sequence-valued key is written in (and recognized from) a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// Repeated bare keys: `a=1&a=2`.
    #[default]
    None,
    /// Empty brackets: `a[]=1&a[]=2`.
    Bracket,
    /// Zero-based indices: `a[0]=1&a[1]=2`.
    Index,
    /// One comma-joined value: `a=1,2`.
    Comma,
}

impl ArrayFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayFormat::None => "none",
            ArrayFormat::Bracket => "bracket",
            ArrayFormat::Index => "index",
            ArrayFormat::Comma => "comma",
        }
    }
}

impl fmt::Display for ArrayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArrayFormat {
    type Err = QsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ArrayFormat::None),
            "bracket" => Ok(ArrayFormat::Bracket),
            "index" => Ok(ArrayFormat::Index),
            "comma" => Ok(ArrayFormat::Comma),
            other => Err(QsError::UnknownArrayFormat(other.to_string())),
        }
    }
}
