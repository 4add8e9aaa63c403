// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CoseAlgorithm, CoseError};
use cosecore_crypto::{aead_decrypt, aead_encrypt, aead_nonce, aead_params};
use proptest::prelude::*;

// McGrew & Viega, "The Galois/Counter Mode of Operation", test case 14.
#[test]
fn a256gcm_matches_zero_key_vector() {
    let key = [0u8; 32];
    let nonce = [0u8; 12];
    let out = aead_encrypt(&key, b"", &[0u8; 16], CoseAlgorithm::A256Gcm, &nonce).unwrap();
    assert_eq!(
        hex::encode(out),
        "cea7403d4d606b6e074ec5d3baf39d18d0d1c8a799996bf0265b98b5d48ab919"
    );
}

// Test case 16: AES-256 with AAD.
#[test]
fn a256gcm_matches_vector_with_aad_and_rejects_tampering() {
    let key = hex::decode("feffe9928665731c6d6a8f9467308308feffe9928665731c6d6a8f9467308308").unwrap();
    let nonce = hex::decode("cafebabefacedbaddecaf888").unwrap();
    let plaintext = hex::decode(
        "d9313225f88406e5a55909c5aff5269a86a7a9531534f7da2e4c303d8a318a721c3c0c95956809532fcf0e2449a6b525b16aedf5aa0de657ba637b39",
    )
    .unwrap();
    let mut aad = hex::decode("feedfacedeadbeeffeedfacedeadbeefabaddad2").unwrap();

    let ciphertext = aead_encrypt(&key, &aad, &plaintext, CoseAlgorithm::A256Gcm, &nonce).unwrap();
    assert_eq!(
        hex::encode(&ciphertext),
        concat!(
            "522dc1f099567d07f47f37a32a84427d643a8cdcbfe5c0c97598a2bd2555d1aa8cb08e48590dbb3da7b08b1056828838c5f61e6393ba7a0abcc9f662",
            "76fc6ece0f4e1768cddf8853bb2d551b"
        )
    );
    assert_eq!(
        aead_decrypt(&key, &aad, &ciphertext, CoseAlgorithm::A256Gcm, &nonce).unwrap(),
        plaintext
    );

    aad[0] ^= 0x01;
    let err = aead_decrypt(&key, &aad, &ciphertext, CoseAlgorithm::A256Gcm, &nonce).unwrap_err();
    assert_eq!(err, CoseError::AuthenticationFailed);
}

#[test]
fn ccm_tag_lengths_follow_the_algorithm() {
    let key = [0x11u8; 16];
    let short = aead_encrypt(&key, b"aad", b"hello", CoseAlgorithm::AesCcm16_64_128, &[0u8; 13]).unwrap();
    assert_eq!(short.len(), 5 + 8);
    let long = aead_encrypt(&key, b"aad", b"hello", CoseAlgorithm::AesCcm64_128_128, &[0u8; 7]).unwrap();
    assert_eq!(long.len(), 5 + 16);
}

#[test]
fn non_aead_algorithm_is_unsupported() {
    let err = aead_encrypt(&[0u8; 16], b"", b"x", CoseAlgorithm::Hmac256_256, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, CoseError::UnsupportedEncryption(_)));
    let err = aead_decrypt(&[0u8; 16], b"", b"x", CoseAlgorithm::Es256, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, CoseError::UnsupportedEncryption(_)));
}

#[test]
fn wrong_key_or_nonce_length_is_rejected() {
    let err = aead_encrypt(&[0u8; 16], b"", b"x", CoseAlgorithm::A256Gcm, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, CoseError::InvalidKeyParameter(_)));
    let err = aead_encrypt(&[0u8; 16], b"", b"x", CoseAlgorithm::AesCcm16_64_128, &[0u8; 12]).unwrap_err();
    assert!(matches!(err, CoseError::InvalidKeyParameter(_)));
}

#[test]
fn truncated_ciphertext_fails_authentication() {
    let key = [3u8; 32];
    let nonce = [4u8; 13];
    let ct = aead_encrypt(&key, b"", b"payload", CoseAlgorithm::AesCcm16_128_256, &nonce).unwrap();
    let err = aead_decrypt(&key, b"", &ct[..ct.len() - 1], CoseAlgorithm::AesCcm16_128_256, &nonce).unwrap_err();
    assert_eq!(err, CoseError::AuthenticationFailed);
}

#[test]
fn nonce_is_base_iv_xor_padded_partial_iv() {
    let base_iv = hex::decode("89f52f65a1c580933b5261a72f").unwrap();
    let nonce = aead_nonce(&base_iv, &[0x61, 0xa7], 13).unwrap();
    assert_eq!(hex::encode(nonce), "89f52f65a1c580933b5261c688");

    assert!(aead_nonce(&base_iv, &[0u8; 14], 13).is_err());
    assert!(aead_nonce(&base_iv[..12], &[1], 13).is_err());
}

const AEAD_ALGORITHMS: [CoseAlgorithm; 11] = [
    CoseAlgorithm::A128Gcm,
    CoseAlgorithm::A192Gcm,
    CoseAlgorithm::A256Gcm,
    CoseAlgorithm::AesCcm16_64_128,
    CoseAlgorithm::AesCcm16_64_256,
    CoseAlgorithm::AesCcm64_64_128,
    CoseAlgorithm::AesCcm64_64_256,
    CoseAlgorithm::AesCcm16_128_128,
    CoseAlgorithm::AesCcm16_128_256,
    CoseAlgorithm::AesCcm64_128_128,
    CoseAlgorithm::AesCcm64_128_256,
];

proptest! {
    #[test]
    fn every_aead_algorithm_round_trips(
        idx in 0..AEAD_ALGORITHMS.len(),
        plaintext in proptest::collection::vec(any::<u8>(), 0..256),
        aad in proptest::collection::vec(any::<u8>(), 0..32),
        seed in any::<u8>(),
    ) {
        let alg = AEAD_ALGORITHMS[idx];
        let params = aead_params(alg).unwrap();
        prop_assert_eq!(Some(params.nonce_len), alg.nonce_len());

        let key = vec![seed; params.key_len];
        let nonce = vec![seed.wrapping_add(1); params.nonce_len];
        let ct = aead_encrypt(&key, &aad, &plaintext, alg, &nonce).unwrap();
        prop_assert_eq!(ct.len(), plaintext.len() + params.tag_len);
        prop_assert_eq!(aead_decrypt(&key, &aad, &ct, alg, &nonce).unwrap(), plaintext);
    }
}
