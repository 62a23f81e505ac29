//! Reading and rewriting the query of a browsing context's current address.
//!
//! The host is never referenced implicitly. Every operation receives an
//! [`AddressPort`] that exposes the two primitives a browser provides: reading
//! the current location, and replacing the address without navigating or adding
//! a history entry. A port that lacks either primitive makes the dependent
//! operations fail with [`QsError::HostUnavailable`] before anything changes.
//!
//! Each write is a single [`AddressPort::replace`] call, so an observer sees
//! either the old address or the new one.

use log::debug;
use url::{Position, Url};

use crate::decoder::parse;
use crate::encoder::stringify;
use crate::error::{HostPrimitive, QsError, Result};
use crate::options::{ParseOptions, StringifyOptions};
use crate::types::QueryObject;
use crate::url::join_query;

/// The current address as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    /// Everything before the path, e.g. `https://x.test`. Hosts with an
    /// opaque origin report the literal prefix (`file://`), not `null`.
    pub origin: String,
    /// Path starting with `/`.
    pub pathname: String,
    /// Query including its leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// `origin + pathname`: the address with query and fragment dropped.
    pub fn base(&self) -> String {
        format!("{}{}", self.origin, self.pathname)
    }
}

/// Host capability consumed by the address-bar bindings.
pub trait AddressPort {
    /// The current location, or `None` when the host has no address accessor.
    fn location(&self) -> Option<Location>;

    /// Whether [`replace`](Self::replace) is available.
    fn supports_replace(&self) -> bool;

    /// Replace the current address without creating a history entry.
    fn replace(&mut self, url: &str) -> Result<()>;
}

/// Parse the query of the current address.
pub fn get<P: AddressPort + ?Sized>(port: &P, options: &ParseOptions) -> Result<QueryObject> {
    read(port, "get", options)
}

/// Replace the current address with `origin + pathname`, followed by
/// `?query` when `query` serializes to something.
pub fn set<P: AddressPort + ?Sized>(
    port: &mut P,
    query: &QueryObject,
    options: &StringifyOptions,
) -> Result<()> {
    write(port, "set", query, options)
}

/// Merge `updates` over the current query and write the result.
///
/// Keys in `updates` override existing ones in place; new keys are appended.
/// The current query is read with the same array format `options` writes, so
/// bracketed or indexed sequences survive the update.
pub fn update<P: AddressPort + ?Sized>(
    port: &mut P,
    updates: &QueryObject,
    options: &StringifyOptions,
) -> Result<()> {
    let mut current = read(port, "update", &reading_options(options))?;
    for (key, value) in updates {
        current.insert(key.clone(), value.clone());
    }
    write(port, "update", &current, options)
}

/// Drop the whole query (and any fragment) from the current address.
pub fn remove<P: AddressPort + ?Sized>(port: &mut P) -> Result<()> {
    require_replace(port, "remove")?;
    let location = require_location(port, "remove")?;
    let target = location.base();
    debug!("remove(): replacing address with {target}");
    port.replace(&target)
}

/// Delete the named keys from the current query and write the result.
/// Keys that are not present are ignored.
pub fn remove_keys<P, K>(port: &mut P, keys: &[K], options: &StringifyOptions) -> Result<()>
where
    P: AddressPort + ?Sized,
    K: AsRef<str>,
{
    let mut current = read(port, "removeKeys", &reading_options(options))?;
    for key in keys {
        current.shift_remove(key.as_ref());
    }
    write(port, "removeKeys", &current, options)
}

fn reading_options(options: &StringifyOptions) -> ParseOptions {
    ParseOptions::with_array_format(options.array_format)
}

fn read<P: AddressPort + ?Sized>(
    port: &P,
    operation: &'static str,
    options: &ParseOptions,
) -> Result<QueryObject> {
    let location = require_location(port, operation)?;
    Ok(parse(&location.search, options))
}

fn write<P: AddressPort + ?Sized>(
    port: &mut P,
    operation: &'static str,
    query: &QueryObject,
    options: &StringifyOptions,
) -> Result<()> {
    require_replace(port, operation)?;
    let location = require_location(port, operation)?;
    let target = join_query(&location.base(), &stringify(query, options));
    debug!("{operation}(): replacing address with {target}");
    port.replace(&target)
}

fn require_location<P: AddressPort + ?Sized>(port: &P, operation: &'static str) -> Result<Location> {
    port.location().ok_or(QsError::HostUnavailable {
        operation,
        primitive: HostPrimitive::Location,
    })
}

fn require_replace<P: AddressPort + ?Sized>(port: &P, operation: &'static str) -> Result<()> {
    if port.supports_replace() {
        Ok(())
    } else {
        Err(QsError::HostUnavailable {
            operation,
            primitive: HostPrimitive::History,
        })
    }
}

/// An in-process [`AddressPort`] holding an absolute URL.
///
/// Replacements are resolved against the current address, the way a browser
/// resolves the URL given to `history.replaceState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAddress {
    current: Url,
}

impl MemoryAddress {
    /// Start from an absolute URL such as `https://x.test/p?a=1`.
    pub fn parse(address: &str) -> Result<Self> {
        Ok(Self {
            current: Url::parse(address)?,
        })
    }

    /// The full current address.
    pub fn href(&self) -> &str {
        self.current.as_str()
    }
}

impl AddressPort for MemoryAddress {
    fn location(&self) -> Option<Location> {
        Some(Location {
            origin: self.current[..Position::BeforePath].to_string(),
            pathname: self.current.path().to_string(),
            search: match self.current.query() {
                Some(q) if !q.is_empty() => format!("?{q}"),
                _ => String::new(),
            },
        })
    }

    fn supports_replace(&self) -> bool {
        true
    }

    fn replace(&mut self, url: &str) -> Result<()> {
        self.current = self.current.join(url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_location_splits_components() {
        let port = MemoryAddress::parse("https://x.test:8080/a/b?c=1#frag").unwrap();
        assert_eq!(
            port.location(),
            Some(Location {
                origin: "https://x.test:8080".to_string(),
                pathname: "/a/b".to_string(),
                search: "?c=1".to_string(),
            })
        );
    }

    #[test]
    fn memory_location_of_file_address_keeps_scheme_prefix() {
        let port = MemoryAddress::parse("file:///tmp/page.html?a=1").unwrap();
        let location = port.location().unwrap();
        assert_eq!(location.origin, "file://");
        assert_eq!(location.base(), "file:///tmp/page.html");
    }

    #[test]
    fn memory_location_without_query_has_empty_search() {
        let port = MemoryAddress::parse("https://x.test/?").unwrap();
        assert_eq!(port.location().unwrap().search, "");
    }

    #[test]
    fn memory_address_rejects_relative_input() {
        assert!(matches!(
            MemoryAddress::parse("/only/a/path"),
            Err(QsError::InvalidAddress(_))
        ));
    }
}
