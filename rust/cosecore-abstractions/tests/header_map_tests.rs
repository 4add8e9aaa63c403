// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;

use cosecore_abstractions::{
    decode_map_from_cbor, decode_value_from_cbor, encode_map_to_cbor, CoseError, CoseHeaderMap, HeaderKey,
    HeaderValue, MAX_NESTING_DEPTH,
};

/// `depth` one-element arrays wrapped around a zero.
fn nested_arrays(depth: usize) -> Vec<u8> {
    let mut bytes = vec![0x81; depth];
    bytes.push(0x00);
    bytes
}

#[test]
fn empty_protected_header_encodes_as_empty_bstr_contents() {
    let hdr = CoseHeaderMap::new();
    assert!(hdr.encode_protected().unwrap().is_empty());
}

#[test]
fn protected_header_keeps_original_bytes() {
    // {1: -7} encoded with a non-minimal int for the value.
    let original = vec![0xa1, 0x01, 0x38, 0x06];
    let hdr = CoseHeaderMap::from_protected_bytes(&original).unwrap();

    assert_eq!(hdr.get_i64(1), Some(-7));
    assert_eq!(hdr.encode_protected().unwrap(), original);
}

#[test]
fn editing_a_decoded_header_re_encodes_it() {
    let mut hdr = CoseHeaderMap::from_protected_bytes(&[0xa1, 0x01, 0x26]).unwrap();
    hdr.insert(4, HeaderValue::Bytes(b"kid".to_vec()));

    let encoded = hdr.encode_protected().unwrap();
    let decoded = decode_map_from_cbor(&encoded).unwrap();
    assert_eq!(decoded.get(&HeaderKey::Int(1)), Some(&HeaderValue::Int(-7)));
    assert_eq!(decoded.get(&HeaderKey::Int(4)), Some(&HeaderValue::Bytes(b"kid".to_vec())));
}

#[test]
fn map_with_nested_values_survives_encoding() {
    let mut inner = BTreeMap::new();
    inner.insert(HeaderKey::Text("a".to_string()), HeaderValue::Bool(true));

    let mut map = BTreeMap::new();
    map.insert(HeaderKey::Int(-1), HeaderValue::Int(1));
    map.insert(
        HeaderKey::Int(33),
        HeaderValue::Array(vec![HeaderValue::Bytes(vec![1, 2]), HeaderValue::Null]),
    );
    map.insert(HeaderKey::Text("x".to_string()), HeaderValue::Map(inner));

    let bytes = encode_map_to_cbor(&map).unwrap();
    assert_eq!(decode_map_from_cbor(&bytes).unwrap(), map);
}

#[test]
fn decode_rejects_trailing_bytes() {
    let err = decode_map_from_cbor(&[0xa0, 0x00]).unwrap_err();
    assert!(matches!(err, CoseError::Cbor(msg) if msg.contains("trailing")));

    let err = decode_value_from_cbor(&[0x01, 0x01]).unwrap_err();
    assert!(matches!(err, CoseError::Cbor(_)));
}

#[test]
fn decode_rejects_indefinite_length_map() {
    // {_ 1: 1 }
    let err = decode_map_from_cbor(&[0xbf, 0x01, 0x01, 0xff]).unwrap_err();
    assert!(matches!(err, CoseError::Cbor(msg) if msg.contains("indefinite")));
}

#[test]
fn header_value_accessors() {
    assert_eq!(HeaderValue::Int(5).as_i64(), Some(5));
    assert_eq!(HeaderValue::Bytes(vec![1]).as_bytes(), Some([1u8].as_slice()));
    assert_eq!(HeaderValue::Text("t".to_string()).as_bytes(), None);
    assert_eq!(HeaderValue::Null.type_name(), "null");
}

#[test]
fn nesting_up_to_the_limit_is_accepted() {
    let value = decode_value_from_cbor(&nested_arrays(MAX_NESTING_DEPTH)).unwrap();

    let mut depth = 0;
    let mut cur = &value;
    while let HeaderValue::Array(items) = cur {
        depth += 1;
        cur = &items[0];
    }
    assert_eq!(depth, MAX_NESTING_DEPTH);
    assert_eq!(cur, &HeaderValue::Int(0));
}

#[test]
fn deeply_nested_input_is_an_error_not_a_crash() {
    let err = decode_value_from_cbor(&nested_arrays(MAX_NESTING_DEPTH + 1)).unwrap_err();
    assert!(matches!(err, CoseError::Cbor(msg) if msg.contains("nesting too deep")));

    // {1: [[[...0]]]} with far more levels than the stack could hold.
    let mut map = vec![0xa1, 0x01];
    map.extend(nested_arrays(200_000));
    let err = decode_map_from_cbor(&map).unwrap_err();
    assert!(matches!(err, CoseError::Cbor(msg) if msg.contains("nesting too deep")));

    // Maps count toward the same limit: {0: {0: ... {}}}.
    let mut maps = [0xa1, 0x00].repeat(MAX_NESTING_DEPTH + 1);
    maps.push(0xa0);
    assert!(matches!(decode_value_from_cbor(&maps), Err(CoseError::Cbor(_))));
}
