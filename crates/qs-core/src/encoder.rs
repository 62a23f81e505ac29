//! [`QueryObject`] → query string.
//!
//! Keys are emitted in insertion order. Scalars become `key=value`; sequences
//! follow the selected [`ArrayFormat`]:
//!
//! - **None**: `a=1&a=2` (a one-element sequence is indistinguishable from a
//!   scalar once written)
//! - **Bracket**: `a[]=1&a[]=2`
//! - **Index**: `a[0]=1&a[1]=2`
//! - **Comma**: `a=1%2C2` (joined first, then encoded as one value)
//!
//! Encoding uses the `encodeURIComponent` character set: everything except
//! ASCII alphanumerics and `- _ . ! ~ * ' ( )` is percent-encoded, so a space
//! becomes `%20` rather than `+`.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::options::StringifyOptions;
use crate::types::{ArrayFormat, QueryObject, QueryValue, Scalar};

/// Bytes left unescaped by `encodeURIComponent` (RFC 3986 unreserved plus
/// `! * ' ( )`).
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Serialize a [`QueryObject`] into a query string (without a leading `?`).
///
/// Never fails. Keys with no surviving pairs contribute nothing; an object with
/// no surviving keys yields the empty string.
///
/// # Example
/// ```
/// use qs_core::{stringify, ArrayFormat, QueryObject, QueryValue, StringifyOptions};
///
/// let mut query = QueryObject::new();
/// query.insert("q".into(), QueryValue::from("a b"));
/// query.insert("tag".into(), QueryValue::from(vec!["x", "y"]));
/// query.insert("page".into(), QueryValue::Null);
///
/// let options = StringifyOptions::with_array_format(ArrayFormat::Bracket);
/// assert_eq!(stringify(&query, &options), "q=a%20b&tag[]=x&tag[]=y");
/// ```
pub fn stringify(object: &QueryObject, options: &StringifyOptions) -> String {
    let mut parts: Vec<String> = Vec::new();

    for (key, value) in object {
        if options.skip_null && value.is_null() {
            continue;
        }
        if options.skip_empty_string && value.is_empty_string() {
            continue;
        }

        let key = encode_component(key, options.encode);
        match value {
            QueryValue::Sequence(items) => {
                encode_sequence(&key, items, options, &mut parts);
            }
            scalar => {
                let text = scalar.scalar_text().unwrap_or_default();
                parts.push(format!("{}={}", key, encode_component(&text, options.encode)));
            }
        }
    }

    parts.join("&")
}

/// Emit the pairs for one sequence-valued key.
fn encode_sequence(key: &str, items: &[Scalar], options: &StringifyOptions, parts: &mut Vec<String>) {
    let encode = options.encode;
    match options.array_format {
        ArrayFormat::Bracket => {
            for item in items {
                parts.push(format!("{}[]={}", key, encode_scalar(item, encode)));
            }
        }
        ArrayFormat::Index => {
            for (i, item) in items.iter().enumerate() {
                parts.push(format!("{}[{}]={}", key, i, encode_scalar(item, encode)));
            }
        }
        ArrayFormat::Comma => {
            let joined = items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(",");
            parts.push(format!("{}={}", key, encode_component(&joined, encode)));
        }
        ArrayFormat::None => {
            for item in items {
                parts.push(format!("{}={}", key, encode_scalar(item, encode)));
            }
        }
    }
}

fn encode_scalar(item: &Scalar, encode: bool) -> String {
    encode_component(&item.to_string(), encode).into_owned()
}

/// Percent-encode a key or value with the `encodeURIComponent` set.
fn encode_component(s: &str, encode: bool) -> Cow<'_, str> {
    if encode {
        utf8_percent_encode(s, URI_COMPONENT).into()
    } else {
        Cow::Borrowed(s)
    }
}
