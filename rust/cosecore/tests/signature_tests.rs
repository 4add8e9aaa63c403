// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore::{
    CoseAlgorithm, CoseError, CoseHeaderMap, CoseKey, CoseSignature, Ec2Key, EllipticCurve, HeaderKey, HeaderValue,
    SignatureContext, SymmetricKey, HEADER_ALG,
};
use minicbor::Encoder;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::OsRng;

fn es256_key() -> CoseKey {
    let secret = p256::SecretKey::random(&mut OsRng);
    let point = secret.public_key().to_encoded_point(false);
    Ec2Key::new(
        Some(EllipticCurve::P256),
        Some(point.x().unwrap().to_vec()),
        Some(point.y().unwrap().to_vec()),
        Some(secret.to_bytes().to_vec()),
    )
    .unwrap()
    .into()
}

fn alg_header(alg: CoseAlgorithm) -> CoseHeaderMap {
    let mut hdr = CoseHeaderMap::new();
    hdr.insert(HEADER_ALG, HeaderValue::Int(alg.id()));
    hdr
}

fn kid_header(kid: &[u8]) -> CoseHeaderMap {
    let mut hdr = CoseHeaderMap::new();
    hdr.insert(4, HeaderValue::Bytes(kid.to_vec()));
    hdr
}

#[test]
fn encode_omits_an_empty_signature() {
    let sig = CoseSignature::new(alg_header(CoseAlgorithm::Es256), kid_header(b"11"), None);

    let pending = sig.encode(b"").unwrap();
    assert_eq!(pending.len(), 2);

    let complete = sig.encode(&[0x01, 0x02]).unwrap();
    assert_eq!(complete.len(), 3);
    assert_eq!(complete[2], HeaderValue::Bytes(vec![0x01, 0x02]));
    // {1: -7}
    assert_eq!(complete[0], HeaderValue::Bytes(vec![0xa1, 0x01, 0x26]));
}

#[test]
fn from_signature_obj_pops_a_trailing_signature() {
    let mut unprotected = cosecore::CborMap::new();
    unprotected.insert(HeaderKey::Int(4), HeaderValue::Bytes(b"11".to_vec()));
    let items = vec![
        HeaderValue::Bytes(vec![0xa1, 0x01, 0x26]),
        HeaderValue::Map(unprotected.clone()),
        HeaderValue::Bytes(vec![9; 64]),
    ];

    let sig = CoseSignature::from_signature_obj(items.clone()).unwrap();
    assert_eq!(sig.signature, vec![9; 64]);
    assert_eq!(sig.header_algorithm().unwrap(), Some(CoseAlgorithm::Es256));
    assert_eq!(sig.unprotected.get_bytes(4), Some(b"11".as_slice()));
    assert_eq!(sig.context(), SignatureContext::Signature);

    let unsigned = CoseSignature::from_signature_obj(items[..2].to_vec()).unwrap();
    assert!(unsigned.signature.is_empty());
}

#[test]
fn from_signature_obj_rejects_malformed_arrays() {
    let err = CoseSignature::from_signature_obj(vec![HeaderValue::Bytes(vec![])]).unwrap_err();
    assert!(matches!(err, CoseError::MalformedStructure(_)));

    let err = CoseSignature::from_signature_obj(vec![
        HeaderValue::Map(Default::default()),
        HeaderValue::Map(Default::default()),
    ])
    .unwrap_err();
    assert!(matches!(err, CoseError::MalformedStructure(_)));

    let err = CoseSignature::from_signature_obj(vec![
        HeaderValue::Bytes(vec![]),
        HeaderValue::Map(Default::default()),
        HeaderValue::Text("sig".to_string()),
    ])
    .unwrap_err();
    assert!(matches!(err, CoseError::MalformedStructure(_)));
}

#[test]
fn sig_structure_layout() {
    let sig = CoseSignature::new(CoseHeaderMap::new(), CoseHeaderMap::new(), None).with_external_aad(b"aad".to_vec());
    let bytes = sig.sig_structure(&[0xa0], b"payload").unwrap();

    let mut expected = Vec::new();
    let mut enc = Encoder::new(&mut expected);
    enc.array(5).unwrap();
    enc.str("Signature").unwrap();
    enc.bytes(&[0xa0]).unwrap();
    enc.bytes(&[]).unwrap();
    enc.bytes(b"aad").unwrap();
    enc.bytes(b"payload").unwrap();
    assert_eq!(bytes, expected);

    let counter = sig.clone().with_context(SignatureContext::CounterSignature);
    let counter_bytes = counter.sig_structure(&[0xa0], b"payload").unwrap();
    assert_ne!(counter_bytes, bytes);
    assert_eq!(&counter_bytes[1..18], b"\x70CounterSignature");
}

#[test]
fn sign_then_verify_with_the_attached_key() {
    let key = es256_key();
    let mut sig = CoseSignature::new(alg_header(CoseAlgorithm::Es256), kid_header(b"11"), Some(&key));
    let body_protected = [0xa0];

    sig.sign(&body_protected, b"This is the content.").unwrap();
    assert_eq!(sig.signature.len(), 64);
    sig.verify(&body_protected, b"This is the content.").unwrap();

    let err = sig.verify(&body_protected, b"This is not the content.").unwrap_err();
    assert_eq!(err, CoseError::SignatureVerificationFailed);

    // Wire round trip, then verify with the key re-attached.
    let decoded = CoseSignature::from_cbor(&sig.to_cbor().unwrap()).unwrap().with_key(&key);
    decoded.verify(&body_protected, b"This is the content.").unwrap();
}

#[test]
fn counter_signature_does_not_verify_as_a_signature() {
    let key = es256_key();
    let mut counter = CoseSignature::new_counter_signature(alg_header(CoseAlgorithm::Es256), CoseHeaderMap::new(), Some(&key));
    counter.sign(&[], b"payload").unwrap();

    let mut as_signature = counter.clone().with_context(SignatureContext::Signature);
    as_signature.signature = counter.signature.clone();
    assert_eq!(
        as_signature.verify(&[], b"payload"),
        Err(CoseError::SignatureVerificationFailed)
    );
}

#[test]
fn key_algorithm_is_used_when_headers_have_none() {
    let key = es256_key().with_alg(CoseAlgorithm::Es256).unwrap();
    let mut sig = CoseSignature::new(CoseHeaderMap::new(), CoseHeaderMap::new(), Some(&key));
    sig.sign(&[], b"payload").unwrap();
    sig.verify(&[], b"payload").unwrap();
}

#[test]
fn text_alg_header_is_rejected_instead_of_ignored() {
    let key = es256_key().with_alg(CoseAlgorithm::Es256).unwrap();
    let mut unprotected = CoseHeaderMap::new();
    unprotected.insert(HEADER_ALG, HeaderValue::Text("ES256".to_string()));
    let mut sig = CoseSignature::new(CoseHeaderMap::new(), unprotected, Some(&key));

    assert!(matches!(sig.header_algorithm(), Err(CoseError::InvalidAlgorithm(_))));
    assert!(matches!(sig.sign(&[], b"payload"), Err(CoseError::InvalidAlgorithm(_))));
    assert!(sig.signature.is_empty());

    // An int alg in the protected bucket takes precedence.
    sig.protected = alg_header(CoseAlgorithm::Es256);
    assert_eq!(sig.header_algorithm().unwrap(), Some(CoseAlgorithm::Es256));
}

#[test]
fn compute_signature_rejects_non_signature_algorithms() {
    let key: CoseKey = SymmetricKey::new(vec![1; 16]).unwrap().into();
    let err = CoseSignature::compute_signature(b"x", Some(CoseAlgorithm::A128Gcm), &key).unwrap_err();
    assert!(matches!(err, CoseError::UnsupportedSignature(_)));
}

#[test]
fn signing_without_a_key_fails() {
    let mut sig = CoseSignature::new(alg_header(CoseAlgorithm::Es256), CoseHeaderMap::new(), None);
    assert!(matches!(sig.sign(&[], b"x"), Err(CoseError::MissingKeyParameter(_))));
}
