use acctthrive_core::{canonical, sha256_hex};
use serde_json::json;

#[test]
fn stable_json_bytes_are_key_order_deterministic() {
    let a = json!({"z": 2, "a": 1});
    let b = json!({"a": 1, "z": 2});
    let ba = canonical::stable_json_bytes(&a).expect("stable json a");
    let bb = canonical::stable_json_bytes(&b).expect("stable json b");
    assert_eq!(ba, bb);
    assert_eq!(ba, br#"{"a":1,"z":2}"#.to_vec());
}

#[test]
fn nested_objects_inside_arrays_are_sorted() {
    let value = json!({"rows": [{"b": 1, "a": 2}]});
    let bytes = canonical::stable_json_bytes(&value).expect("stable json");
    assert_eq!(bytes, br#"{"rows":[{"a":2,"b":1}]}"#.to_vec());
}

#[test]
fn pretty_bytes_end_with_newline() {
    let bytes = canonical::stable_json_pretty_bytes(&json!({"k": 1})).expect("pretty json");
    assert_eq!(bytes.last(), Some(&b'\n'));
}

#[test]
fn sha256_matches_known_vector() {
    assert_eq!(
        sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
