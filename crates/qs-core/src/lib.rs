//! # qs-core
//!
//! Parse and serialize URL query strings, with conventions for sequence values
//! and bindings for rewriting the query of a browsing context's address.
//!
//! ## Quick start
//!
//! ```rust
//! use qs_core::{parse, stringify, ArrayFormat, ParseOptions, QueryValue, StringifyOptions};
//!
//! let options = ParseOptions::with_array_format(ArrayFormat::Bracket);
//! let query = parse("?tag[]=rust&tag[]=wasm&q=a%20b", &options);
//! assert_eq!(query["tag"], QueryValue::from(vec!["rust", "wasm"]));
//! assert_eq!(query["q"], QueryValue::from("a b"));
//!
//! let back = stringify(&query, &StringifyOptions::with_array_format(ArrayFormat::Bracket));
//! assert_eq!(back, "tag[]=rust&tag[]=wasm&q=a%20b");
//! ```
//!
//! ## Modules
//!
//! - [`decoder`] — query string → [`QueryObject`] (`parse`)
//! - [`encoder`] — [`QueryObject`] → query string (`stringify`)
//! - [`url`] — split/join a URL and its query (`parse_url`, `stringify_url`)
//! - [`address`] — `get`/`set`/`update`/`remove`/`remove_keys` over an [`AddressPort`]
//! - [`options`] — per-call parse/stringify options
//! - [`types`] — `QueryValue`, `Scalar`, `ArrayFormat`
//! - [`error`] — error types for host access and option parsing

pub mod address;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod types;
pub mod url;

pub use address::{get, remove, remove_keys, set, update, AddressPort, Location, MemoryAddress};
pub use decoder::parse;
pub use encoder::stringify;
pub use error::{HostPrimitive, QsError, Result};
pub use options::{ParseOptions, StringifyOptions};
pub use types::{ArrayFormat, QueryObject, QueryValue, Scalar};
pub use crate::url::{parse_url, stringify_url, ParsedUrl};
