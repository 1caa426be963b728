//! Integration test: full host lifecycle through the C ABI.
//!
//! Create → register → query → destroy, the way an embedding runtime drives
//! the registry, including ownership hand-off of returned strings.

use std::ffi::{CStr, CString, c_char};
use std::ptr;

use reef_ffi::{
    REEF_DUPLICATE_NODE, REEF_OK, ReefRegistry, reef_query_key, reef_query_node,
    reef_register_node, reef_registry_free, reef_registry_len, reef_registry_new,
    reef_string_free,
};
use reef_integration_tests::request_keys;
use reef_ring::{DEFAULT_VIRTUAL_NODE_PATTERN, Registry, RegistryConfig};

fn cstr(s: &str) -> CString {
    CString::new(s).unwrap()
}

/// Copy a returned string and release it through the ABI.
fn take(raw: *mut c_char) -> Option<String> {
    if raw.is_null() {
        return None;
    }
    let out = unsafe { CStr::from_ptr(raw) }.to_str().unwrap().to_string();
    unsafe { reef_string_free(raw) };
    Some(out)
}

fn create(replicas: i32) -> *mut ReefRegistry {
    let service = cstr("edge");
    let pattern = cstr(DEFAULT_VIRTUAL_NODE_PATTERN);
    let handle = unsafe { reef_registry_new(service.as_ptr(), pattern.as_ptr(), replicas) };
    assert!(!handle.is_null());
    handle
}

#[test]
fn test_host_lifecycle() {
    let handle = create(32);

    for name in ["edge-a", "edge-b", "edge-c"] {
        let name = cstr(name);
        assert_eq!(unsafe { reef_register_node(handle, name.as_ptr()) }, REEF_OK);
    }
    let dup = cstr("edge-b");
    assert_eq!(
        unsafe { reef_register_node(handle, dup.as_ptr()) },
        REEF_DUPLICATE_NODE
    );
    assert_eq!(unsafe { reef_registry_len(handle) }, 3 * 33);

    for key in request_keys(500, 5) {
        let key = cstr(&key);
        let owner = take(unsafe { reef_query_node(handle, key.as_ptr()) }).unwrap();
        assert!(["edge-a", "edge-b", "edge-c"].contains(&owner.as_str()));
    }

    unsafe { reef_registry_free(handle) };
}

#[test]
fn test_abi_agrees_with_library() {
    let handle = create(64);
    let config = RegistryConfig::new("edge", DEFAULT_VIRTUAL_NODE_PATTERN, 64);
    let mut registry = Registry::new(config).unwrap();

    for i in 0..4 {
        let name = format!("node-{i}");
        registry.register(&name).unwrap();
        let name = cstr(&name);
        unsafe { reef_register_node(handle, name.as_ptr()) };
    }

    for key in request_keys(1_000, 21) {
        let expected = registry.query(&key).unwrap();
        let c_key = cstr(&key);
        let by_name = take(unsafe { reef_query_node(handle, c_key.as_ptr()) });
        assert_eq!(by_name.as_deref(), Some(expected));

        let hashed = registry.hash_key(&key);
        let by_key = take(unsafe { reef_query_key(handle, hashed) });
        assert_eq!(by_key.as_deref(), Some(expected));
    }

    unsafe { reef_registry_free(handle) };
}

#[test]
fn test_empty_registry_queries_return_null() {
    let handle = create(4);
    let key = cstr("nobody-home");
    assert!(take(unsafe { reef_query_node(handle, key.as_ptr()) }).is_none());
    assert!(take(unsafe { reef_query_key(handle, 0) }).is_none());
    assert!(take(unsafe { reef_query_node(handle, ptr::null()) }).is_none());
    unsafe { reef_registry_free(handle) };
}
