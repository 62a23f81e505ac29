//! Splitting a URL into its base and query, and joining them back.
//!
//! The split is purely textual on the first `?`. A `#fragment` is not special:
//! in `https://x.test/p#top?a=1` the fragment stays in the base, and in
//! `https://x.test/p?a=1#top` it ends up in the value of `a`.

use serde::{Deserialize, Serialize};

use crate::decoder::parse;
use crate::encoder::stringify;
use crate::options::{ParseOptions, StringifyOptions};
use crate::types::QueryObject;

/// A URL split into the part before `?` and its parsed query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParsedUrl {
    pub url: String,
    #[serde(default)]
    pub query: QueryObject,
}

impl ParsedUrl {
    pub fn new(url: impl Into<String>, query: QueryObject) -> Self {
        Self {
            url: url.into(),
            query,
        }
    }
}

/// Split `url` on its first `?` and parse the remainder.
///
/// # Example
/// ```
/// use qs_core::{parse_url, ParseOptions, QueryValue};
///
/// let parsed = parse_url("https://x.test/p?a=1", &ParseOptions::default());
/// assert_eq!(parsed.url, "https://x.test/p");
/// assert_eq!(parsed.query["a"], QueryValue::from("1"));
/// ```
pub fn parse_url(url: &str, options: &ParseOptions) -> ParsedUrl {
    let (base, query) = url.split_once('?').unwrap_or((url, ""));
    ParsedUrl {
        url: base.to_string(),
        query: parse(query, options),
    }
}

/// Append the serialized query to `parsed.url`, or return the URL unchanged
/// when the query serializes to nothing.
pub fn stringify_url(parsed: &ParsedUrl, options: &StringifyOptions) -> String {
    join_query(&parsed.url, &stringify(&parsed.query, options))
}

/// `base?query`, or just `base` for an empty query.
pub(crate) fn join_query(base: &str, query: &str) -> String {
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{}?{}", base, query)
    }
}
