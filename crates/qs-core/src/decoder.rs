//! Query string → [`QueryObject`].
//!
//! Tokenization follows `application/x-www-form-urlencoded`: pairs separated by
//! `&`, each split on its first `=`, empty segments ignored. Array recognition
//! is then applied per pair, in this order:
//!
//! 1. **Comma** (only with [`ArrayFormat::Comma`]): a value containing `,` is
//!    split into a sequence and bound to the key, replacing any prior binding.
//! 2. **Bracket suffix**: `name[]` appends to `name`, `name[3]` places the value
//!    at index 3 of `name`. A scalar already bound to `name` becomes element 0
//!    of the sequence, as with duplicate keys.
//! 3. **Duplicate key**: a second occurrence turns the binding into a sequence.
//! 4. **Plain**: the key is bound to the string value.
//!
//! Bracket suffixes and duplicate keys are honoured in every array format, so
//! `a[]=1&a[]=2` parses to a sequence even with [`ArrayFormat::None`].
//!
//! Sequences are held as position → value maps while parsing and packed into
//! vectors at the end, so indices may arrive in any order.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use log::trace;
use url::form_urlencoded;

use crate::options::ParseOptions;
use crate::types::{ArrayFormat, QueryObject, QueryValue, Scalar};

/// Gaps before an index up to this bound are padded with empty strings.
/// Elements at larger indices keep their relative order but are packed
/// without padding, which keeps `a[4294967295]=x` from allocating a huge
/// sequence.
pub const MAX_BRACKET_INDEX: usize = 1000;

/// Parse a query string into a [`QueryObject`].
///
/// A single leading `?` is ignored. Blank input yields an empty object. This
/// never fails: malformed percent escapes are kept literally and invalid UTF-8
/// is replaced with U+FFFD.
///
/// # Example
/// ```
/// use qs_core::{parse, ParseOptions, QueryValue};
///
/// let query = parse("?a=1&a=2&b=x%20y", &ParseOptions::default());
/// assert_eq!(query["a"], QueryValue::from(vec!["1", "2"]));
/// assert_eq!(query["b"], QueryValue::from("x y"));
/// ```
pub fn parse(query: &str, options: &ParseOptions) -> QueryObject {
    let query = query.strip_prefix('?').unwrap_or(query);
    if query.trim().is_empty() {
        return QueryObject::new();
    }

    let mut bindings: IndexMap<String, Binding> = IndexMap::new();
    for (key, value) in split_pairs(query, options.decode) {
        assign(&mut bindings, key, value, options.array_format);
    }
    bindings
        .into_iter()
        .map(|(key, binding)| (key, binding.into_value()))
        .collect()
}

/// A key's value while parsing is still in progress.
enum Binding {
    Scalar(String),
    Slots(BTreeMap<usize, String>),
}

impl Binding {
    fn slots(values: impl IntoIterator<Item = String>) -> Self {
        Binding::Slots(values.into_iter().enumerate().collect())
    }

    /// Turn a scalar into a one-element sequence; sequences are left alone.
    fn as_slots(&mut self) -> &mut BTreeMap<usize, String> {
        if let Binding::Scalar(old) = self {
            *self = Binding::slots([std::mem::take(old)]);
        }
        match self {
            Binding::Slots(slots) => slots,
            Binding::Scalar(_) => unreachable!("scalar converted above"),
        }
    }

    fn into_value(self) -> QueryValue {
        match self {
            Binding::Scalar(value) => QueryValue::String(value),
            Binding::Slots(slots) => QueryValue::Sequence(pack(slots)),
        }
    }
}

/// Split a query into key/value pairs, decoding them when asked to.
fn split_pairs(query: &str, decode: bool) -> Vec<(String, String)> {
    if decode {
        return form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
    }
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (k.to_string(), v.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

/// Bind one decoded pair according to the recognition rules.
fn assign(bindings: &mut IndexMap<String, Binding>, key: String, value: String, format: ArrayFormat) {
    if format == ArrayFormat::Comma && value.contains(',') {
        trace!("comma-splitting value of {key:?}");
        let items = value.split(',').map(str::to_string);
        bindings.insert(key, Binding::slots(items));
        return;
    }

    if let Some((name, index)) = split_bracket_key(&key) {
        trace!("bracket key {key:?} targets {name:?} at {index:?}");
        let slots = bindings
            .entry(name.to_string())
            .or_insert_with(|| Binding::Slots(BTreeMap::new()))
            .as_slots();
        match index {
            Some(i) => {
                slots.insert(i, value);
            }
            None => push(slots, value),
        }
        return;
    }

    match bindings.get_mut(&key) {
        Some(binding) => push(binding.as_slots(), value),
        None => {
            bindings.insert(key, Binding::Scalar(value));
        }
    }
}

/// Append after the highest occupied position.
fn push(slots: &mut BTreeMap<usize, String>, value: String) {
    let next = slots
        .last_key_value()
        .map_or(0, |(last, _)| last.saturating_add(1));
    slots.insert(next, value);
}

/// Match `name[]` or `name[digits]` at the end of a key.
///
/// Returns the target name and the index, if one was given and fits in a
/// `usize`; an index too large for `usize` appends. The name must be
/// non-empty; everything before the last `[` belongs to it, so `a[b][1]`
/// targets `a[b]`.
fn split_bracket_key(key: &str) -> Option<(&str, Option<usize>)> {
    let inner = key.strip_suffix(']')?;
    let open = inner.rfind('[')?;
    let name = &inner[..open];
    let digits = &inner[open + 1..];
    if name.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    };
    Some((name, index))
}

/// Lay out positioned values in index order, padding gaps up to
/// [`MAX_BRACKET_INDEX`] with empty strings.
fn pack(slots: BTreeMap<usize, String>) -> Vec<Scalar> {
    let mut items = Vec::with_capacity(slots.len());
    for (index, value) in slots {
        if index <= MAX_BRACKET_INDEX {
            items.resize(index.max(items.len()), Scalar::String(String::new()));
        }
        items.push(Scalar::String(value));
    }
    items
}
