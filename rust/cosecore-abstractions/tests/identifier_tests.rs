// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CoseAlgorithm, CoseError, EllipticCurve, KeyOps, KeyParameter, KeyType};

#[test]
fn algorithm_ids_match_iana_registry() {
    let expected: &[(CoseAlgorithm, i64)] = &[
        (CoseAlgorithm::A128Gcm, 1),
        (CoseAlgorithm::A192Gcm, 2),
        (CoseAlgorithm::A256Gcm, 3),
        (CoseAlgorithm::Hmac256_64, 4),
        (CoseAlgorithm::Hmac256_256, 5),
        (CoseAlgorithm::Hmac384_384, 6),
        (CoseAlgorithm::Hmac512_512, 7),
        (CoseAlgorithm::AesCcm16_64_128, 10),
        (CoseAlgorithm::AesCcm64_64_256, 13),
        (CoseAlgorithm::AesMac128_64, 14),
        (CoseAlgorithm::AesMac256_64, 15),
        (CoseAlgorithm::AesMac128_128, 25),
        (CoseAlgorithm::AesMac256_128, 26),
        (CoseAlgorithm::AesCcm16_128_128, 30),
        (CoseAlgorithm::AesCcm64_128_256, 33),
        (CoseAlgorithm::A128Kw, -3),
        (CoseAlgorithm::A256Kw, -5),
        (CoseAlgorithm::Direct, -6),
        (CoseAlgorithm::Es256, -7),
        (CoseAlgorithm::EdDsa, -8),
        (CoseAlgorithm::EcdhEsHkdf256, -25),
        (CoseAlgorithm::EcdhSsA256Kw, -34),
        (CoseAlgorithm::Es384, -35),
        (CoseAlgorithm::Es512, -36),
    ];

    for (alg, id) in expected {
        assert_eq!(alg.id(), *id, "{alg}");
        assert_eq!(CoseAlgorithm::try_from(*id).unwrap(), *alg);
    }
}

#[test]
fn every_algorithm_round_trips_through_its_id() {
    for alg in CoseAlgorithm::ALL {
        assert_eq!(CoseAlgorithm::try_from(alg.id()).unwrap(), alg);
    }
}

#[test]
fn unknown_algorithm_is_rejected() {
    let err = CoseAlgorithm::try_from(9999).unwrap_err();
    assert!(matches!(err, CoseError::InvalidAlgorithm(_)));
}

#[test]
fn nonce_lengths_follow_ccm_length_field() {
    assert_eq!(CoseAlgorithm::A256Gcm.nonce_len(), Some(12));
    assert_eq!(CoseAlgorithm::AesCcm16_64_128.nonce_len(), Some(13));
    assert_eq!(CoseAlgorithm::AesCcm64_128_256.nonce_len(), Some(7));
    assert_eq!(CoseAlgorithm::Hmac256_256.nonce_len(), None);
}

#[test]
fn direct_algorithms_are_flagged() {
    assert!(CoseAlgorithm::Direct.is_direct());
    assert!(CoseAlgorithm::EcdhEsHkdf256.is_direct());
    assert!(!CoseAlgorithm::A128Kw.is_direct());
    assert!(!CoseAlgorithm::EcdhEsA128Kw.is_direct());
}

#[test]
fn key_type_accepts_only_assigned_values() {
    assert_eq!(KeyType::try_from(1).unwrap(), KeyType::Okp);
    assert_eq!(KeyType::try_from(2).unwrap(), KeyType::Ec2);
    assert_eq!(KeyType::try_from(4).unwrap(), KeyType::Symmetric);
    assert!(matches!(KeyType::try_from(99), Err(CoseError::InvalidKeyType(_))));
    assert_eq!(KeyType::Registered(99).id(), 99);
}

#[test]
fn key_ops_and_curves_map_to_registry_values() {
    assert_eq!(KeyOps::try_from(10).unwrap(), KeyOps::MacVerify);
    assert!(matches!(KeyOps::try_from(11), Err(CoseError::InvalidKeyOperation(_))));

    assert_eq!(EllipticCurve::try_from(8).unwrap(), EllipticCurve::Secp256k1);
    assert_eq!(EllipticCurve::P384.key_type(), Some(KeyType::Ec2));
    assert_eq!(EllipticCurve::X25519.key_type(), Some(KeyType::Okp));
    assert_eq!(EllipticCurve::Reserved.key_type(), None);
}

#[test]
fn key_parameter_names_are_case_insensitive() {
    assert_eq!(KeyParameter::from_name("KID"), Some(KeyParameter::Kid));
    assert_eq!(KeyParameter::from_name("base_iv"), Some(KeyParameter::BaseIv));
    assert_eq!(KeyParameter::from_name("crv"), None);
}
