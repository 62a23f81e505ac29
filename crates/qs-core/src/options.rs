//! Per-call options for the codec.
//!
//! Both structs deserialize from camelCase JSON with every field optional, so
//! `{"arrayFormat":"comma"}` is a complete `StringifyOptions`.

use serde::{Deserialize, Serialize};

use crate::types::ArrayFormat;

/// Options for [`crate::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseOptions {
    /// Percent-decode keys and values (`+` also decodes to a space).
    pub decode: bool,
    /// Which sequence convention to recognize.
    pub array_format: ArrayFormat,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            decode: true,
            array_format: ArrayFormat::None,
        }
    }
}

impl ParseOptions {
    pub fn with_array_format(array_format: ArrayFormat) -> Self {
        Self {
            array_format,
            ..Self::default()
        }
    }
}

/// Options for [`crate::stringify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringifyOptions {
    /// Percent-encode keys and values.
    pub encode: bool,
    /// How sequence values are written.
    pub array_format: ArrayFormat,
    /// Omit keys bound to `Null`.
    pub skip_null: bool,
    /// Omit keys bound to the empty string.
    pub skip_empty_string: bool,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        Self {
            encode: true,
            array_format: ArrayFormat::None,
            skip_null: true,
            skip_empty_string: true,
        }
    }
}

impl StringifyOptions {
    pub fn with_array_format(array_format: ArrayFormat) -> Self {
        Self {
            array_format,
            ..Self::default()
        }
    }
}
