/// Address-bar binding tests, run against in-memory and crippled host ports.
use qs_core::{
    get, remove, remove_keys, set, update, AddressPort, ArrayFormat, HostPrimitive, Location,
    MemoryAddress, ParseOptions, QsError, QueryObject, QueryValue, Result, StringifyOptions,
};

fn obj(pairs: &[(&str, QueryValue)]) -> QueryObject {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn port(address: &str) -> MemoryAddress {
    MemoryAddress::parse(address).expect("test address must be absolute")
}

/// A host that records replacements and can withhold either primitive.
struct StubHost {
    location: Option<Location>,
    history: bool,
    replaced: Vec<String>,
}

impl StubHost {
    fn with_search(search: &str) -> Self {
        Self {
            location: Some(Location {
                origin: "https://x.test".to_string(),
                pathname: "/p".to_string(),
                search: search.to_string(),
            }),
            history: true,
            replaced: Vec::new(),
        }
    }

    fn without_location() -> Self {
        Self {
            location: None,
            ..Self::with_search("")
        }
    }

    fn without_history() -> Self {
        Self {
            history: false,
            ..Self::with_search("?a=1")
        }
    }
}

impl AddressPort for StubHost {
    fn location(&self) -> Option<Location> {
        self.location.clone()
    }

    fn supports_replace(&self) -> bool {
        self.history
    }

    fn replace(&mut self, url: &str) -> Result<()> {
        self.replaced.push(url.to_string());
        Ok(())
    }
}

fn assert_unavailable<T: std::fmt::Debug>(
    result: Result<T>,
    expected_operation: &str,
    expected_primitive: HostPrimitive,
) {
    match result {
        Err(QsError::HostUnavailable {
            operation,
            primitive,
        }) => {
            assert_eq!(operation, expected_operation);
            assert_eq!(primitive, expected_primitive);
        }
        other => panic!("expected HostUnavailable, got {other:?}"),
    }
}

// ============================================================================
// get
// ============================================================================

#[test]
fn get_parses_current_query() {
    let host = port("https://x.test/p?a=1&b=x%20y");
    let query = get(&host, &ParseOptions::default()).unwrap();
    assert_eq!(query, obj(&[("a", "1".into()), ("b", "x y".into())]));
}

#[test]
fn get_without_query_is_empty() {
    let host = port("https://x.test/p");
    assert!(get(&host, &ParseOptions::default()).unwrap().is_empty());
}

#[test]
fn get_uses_array_format() {
    let host = port("https://x.test/p?t[]=1&t[]=2");
    let query = get(&host, &ParseOptions::with_array_format(ArrayFormat::Bracket)).unwrap();
    assert_eq!(query, obj(&[("t", vec!["1", "2"].into())]));
}

#[test]
fn get_without_location_fails() {
    let host = StubHost::without_location();
    assert_unavailable(
        get(&host, &ParseOptions::default()),
        "get",
        HostPrimitive::Location,
    );
}

// ============================================================================
// set
// ============================================================================

#[test]
fn set_replaces_query_and_drops_fragment() {
    let mut host = port("https://x.test/p?old=1#frag");
    set(&mut host, &obj(&[("a", "1".into())]), &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "https://x.test/p?a=1");
}

#[test]
fn set_with_empty_query_drops_question_mark() {
    let mut host = port("https://x.test/p?old=1");
    set(&mut host, &QueryObject::new(), &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "https://x.test/p");
}

#[test]
fn set_uses_array_format() {
    let mut host = StubHost::with_search("");
    set(
        &mut host,
        &obj(&[("t", vec!["1", "2"].into())]),
        &StringifyOptions::with_array_format(ArrayFormat::Index),
    )
    .unwrap();
    assert_eq!(host.replaced, vec!["https://x.test/p?t[0]=1&t[1]=2"]);
}

#[test]
fn set_makes_exactly_one_replacement() {
    let mut host = StubHost::with_search("?x=1");
    set(&mut host, &obj(&[("a", "1".into())]), &StringifyOptions::default()).unwrap();
    assert_eq!(host.replaced.len(), 1);
}

#[test]
fn set_without_history_fails_without_replacing() {
    let mut host = StubHost::without_history();
    assert_unavailable(
        set(&mut host, &obj(&[("a", "1".into())]), &StringifyOptions::default()),
        "set",
        HostPrimitive::History,
    );
    assert!(host.replaced.is_empty());
}

#[test]
fn set_without_location_fails_without_replacing() {
    let mut host = StubHost::without_location();
    assert_unavailable(
        set(&mut host, &QueryObject::new(), &StringifyOptions::default()),
        "set",
        HostPrimitive::Location,
    );
    assert!(host.replaced.is_empty());
}

#[test]
fn set_through_trait_object() {
    let mut host = port("https://x.test/p");
    let dynamic: &mut dyn AddressPort = &mut host;
    set(dynamic, &obj(&[("a", "1".into())]), &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "https://x.test/p?a=1");
}

#[test]
fn set_on_file_address_keeps_path() {
    let mut host = port("file:///tmp/page.html?a=1");
    set(&mut host, &obj(&[("b", "2".into())]), &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "file:///tmp/page.html?b=2");
}

// ============================================================================
// update
// ============================================================================

#[test]
fn update_merges_over_current_query() {
    let mut host = port("https://x.test/p?a=1&b=2");
    update(
        &mut host,
        &obj(&[("b", "3".into()), ("c", "4".into())]),
        &StringifyOptions::default(),
    )
    .unwrap();
    assert_eq!(host.href(), "https://x.test/p?a=1&b=3&c=4");
}

#[test]
fn update_with_null_removes_key_on_write() {
    let mut host = port("https://x.test/p?a=1&b=2");
    update(
        &mut host,
        &obj(&[("a", QueryValue::Null)]),
        &StringifyOptions::default(),
    )
    .unwrap();
    assert_eq!(host.href(), "https://x.test/p?b=2");
}

#[test]
fn update_keeps_bracket_sequences() {
    let mut host = port("https://x.test/p?t[]=1&t[]=2");
    update(
        &mut host,
        &obj(&[("q", "x".into())]),
        &StringifyOptions::with_array_format(ArrayFormat::Bracket),
    )
    .unwrap();
    assert_eq!(host.href(), "https://x.test/p?t[]=1&t[]=2&q=x");
}

#[test]
fn update_without_location_fails() {
    let mut host = StubHost::without_location();
    assert_unavailable(
        update(&mut host, &QueryObject::new(), &StringifyOptions::default()),
        "update",
        HostPrimitive::Location,
    );
}

#[test]
fn update_without_history_fails_without_replacing() {
    let mut host = StubHost::without_history();
    assert_unavailable(
        update(&mut host, &obj(&[("b", "2".into())]), &StringifyOptions::default()),
        "update",
        HostPrimitive::History,
    );
    assert!(host.replaced.is_empty());
}

// ============================================================================
// remove / remove_keys
// ============================================================================

#[test]
fn remove_clears_query_and_fragment() {
    let mut host = port("https://x.test/p/q?a=1#frag");
    remove(&mut host).unwrap();
    assert_eq!(host.href(), "https://x.test/p/q");
}

#[test]
fn remove_on_file_address_keeps_path() {
    let mut host = port("file:///tmp/page.html?a=1#top");
    remove(&mut host).unwrap();
    assert_eq!(host.href(), "file:///tmp/page.html");
}

#[test]
fn update_and_remove_keys_on_file_address() {
    let mut host = port("file:///tmp/page.html?a=1&b=2");
    update(&mut host, &obj(&[("c", "3".into())]), &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "file:///tmp/page.html?a=1&b=2&c=3");
    remove_keys(&mut host, &["a"], &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "file:///tmp/page.html?b=2&c=3");
}

#[test]
fn remove_without_history_fails() {
    let mut host = StubHost::without_history();
    assert_unavailable(remove(&mut host), "remove", HostPrimitive::History);
    assert!(host.replaced.is_empty());
}

#[test]
fn remove_without_location_fails() {
    let mut host = StubHost::without_location();
    assert_unavailable(remove(&mut host), "remove", HostPrimitive::Location);
}

#[test]
fn remove_keys_deletes_named_keys() {
    let mut host = port("https://x.test/p?a=1&b=2&c=3");
    remove_keys(&mut host, &["a", "c", "missing"], &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "https://x.test/p?b=2");
}

#[test]
fn remove_keys_of_everything_leaves_bare_path() {
    let mut host = port("https://x.test/p?a=1");
    remove_keys(&mut host, &["a".to_string()], &StringifyOptions::default()).unwrap();
    assert_eq!(host.href(), "https://x.test/p");
}

#[test]
fn remove_keys_without_location_fails() {
    let mut host = StubHost::without_location();
    assert_unavailable(
        remove_keys(&mut host, &["a"], &StringifyOptions::default()),
        "removeKeys",
        HostPrimitive::Location,
    );
}

#[test]
fn host_unavailable_message_names_operation_and_primitive() {
    let host = StubHost::without_location();
    let err = get(&host, &ParseOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "get() requires a browsing-context host, but its address accessor is unavailable"
    );
}
