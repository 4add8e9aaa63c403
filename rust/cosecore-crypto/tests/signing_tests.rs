// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CoseAlgorithm, CoseError, EllipticCurve, KeyField, KeyOps};
use cosecore_crypto::{sign, sign_with_key, verify, verify_with_key};
use cosecore_keys::{CoseKey, Ec2Key, OkpKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand_core::OsRng;

const MSG: &[u8] = b"This is the content.";

fn p256_key(with_public: bool) -> CoseKey {
    let secret = p256::SecretKey::random(&mut OsRng);
    let point = secret.public_key().to_encoded_point(false);
    let (x, y) = if with_public {
        (Some(point.x().unwrap().to_vec()), Some(point.y().unwrap().to_vec()))
    } else {
        (None, None)
    };
    Ec2Key::new(Some(EllipticCurve::P256), x, y, Some(secret.to_bytes().to_vec()))
        .unwrap()
        .into()
}

fn public_only(key: &CoseKey) -> CoseKey {
    let CoseKey::Ec2(ec2) = key else { panic!("expected EC2") };
    Ec2Key::new(ec2.crv(), ec2.x().map(<[u8]>::to_vec), ec2.y().map(<[u8]>::to_vec), None)
        .unwrap()
        .into()
}

#[test]
fn es256_sign_then_verify() {
    let key = p256_key(true);
    let sig = sign(CoseAlgorithm::Es256, &key, MSG).unwrap();
    assert_eq!(sig.len(), 64);

    verify(CoseAlgorithm::Es256, &public_only(&key), MSG, &sig).unwrap();

    let err = verify(CoseAlgorithm::Es256, &public_only(&key), b"other", &sig).unwrap_err();
    assert_eq!(err, CoseError::SignatureVerificationFailed);
}

#[test]
fn es256_verifies_with_a_private_only_key() {
    let key = p256_key(false);
    let sig = sign(CoseAlgorithm::Es256, &key, MSG).unwrap();
    verify(CoseAlgorithm::Es256, &key, MSG, &sig).unwrap();
}

#[test]
fn es384_and_es512_signatures_are_raw_r_s() {
    let secret = p384::SecretKey::random(&mut OsRng);
    let key: CoseKey = Ec2Key::new(Some(EllipticCurve::P384), None, None, Some(secret.to_bytes().to_vec()))
        .unwrap()
        .into();
    let sig = sign(CoseAlgorithm::Es384, &key, MSG).unwrap();
    assert_eq!(sig.len(), 96);
    verify(CoseAlgorithm::Es384, &key, MSG, &sig).unwrap();

    let secret = p521::SecretKey::random(&mut OsRng);
    let key: CoseKey = Ec2Key::new(Some(EllipticCurve::P521), None, None, Some(secret.to_bytes().to_vec()))
        .unwrap()
        .into();
    let sig = sign(CoseAlgorithm::Es512, &key, MSG).unwrap();
    assert_eq!(sig.len(), 132);
    verify(CoseAlgorithm::Es512, &key, MSG, &sig).unwrap();
}

#[test]
fn eddsa_over_ed25519() {
    let sk = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
    let private: CoseKey = OkpKey::new(Some(EllipticCurve::Ed25519), None, Some(sk.to_bytes().to_vec()))
        .unwrap()
        .into();
    let public: CoseKey = OkpKey::new(
        Some(EllipticCurve::Ed25519),
        Some(sk.verifying_key().to_bytes().to_vec()),
        None,
    )
    .unwrap()
    .into();

    let sig = sign(CoseAlgorithm::EdDsa, &private, MSG).unwrap();
    assert_eq!(sig.len(), 64);
    verify(CoseAlgorithm::EdDsa, &public, MSG, &sig).unwrap();
    // Ed25519 is deterministic.
    assert_eq!(sig, sign(CoseAlgorithm::EdDsa, &private, MSG).unwrap());

    let mut bad = sig.clone();
    bad[10] ^= 1;
    assert_eq!(
        verify(CoseAlgorithm::EdDsa, &public, MSG, &bad),
        Err(CoseError::SignatureVerificationFailed)
    );
}

#[test]
fn malformed_signature_bytes_fail_verification() {
    let key = p256_key(true);
    let err = verify(CoseAlgorithm::Es256, &key, MSG, &[1, 2, 3]).unwrap_err();
    assert_eq!(err, CoseError::SignatureVerificationFailed);
}

#[test]
fn unsupported_algorithms_and_curves() {
    let key = p256_key(true);
    assert!(matches!(
        sign(CoseAlgorithm::A128Gcm, &key, MSG),
        Err(CoseError::UnsupportedSignature(_))
    ));
    assert!(matches!(
        sign(CoseAlgorithm::Es384, &key, MSG),
        Err(CoseError::InvalidKeyParameter(_))
    ));

    let ed448: CoseKey = OkpKey::new(Some(EllipticCurve::Ed448), Some(vec![0; 57]), None).unwrap().into();
    assert!(matches!(
        verify(CoseAlgorithm::EdDsa, &ed448, MSG, &[0; 114]),
        Err(CoseError::UnsupportedSignature(_))
    ));
}

#[test]
fn key_aware_signing_resolves_configuration() {
    let key = p256_key(true).with_alg(CoseAlgorithm::Es256).unwrap();
    let sig = sign_with_key(&key, None, MSG).unwrap();
    verify_with_key(&public_only(&key), Some(CoseAlgorithm::Es256), MSG, &sig).unwrap();

    let err = sign_with_key(&key, Some(CoseAlgorithm::Es384), MSG).unwrap_err();
    assert!(matches!(err, CoseError::KeyConfigurationConflict { field: KeyField::Algorithm, .. }));

    let verify_only = p256_key(true).with_key_ops(KeyOps::Verify).unwrap();
    let err = sign_with_key(&verify_only, Some(CoseAlgorithm::Es256), MSG).unwrap_err();
    assert!(matches!(
        err,
        CoseError::KeyConfigurationConflict { field: KeyField::KeyOperation, .. }
    ));
}

#[test]
fn key_aware_signing_fills_in_the_curve() {
    let secret = p256::SecretKey::random(&mut OsRng);
    let key: CoseKey = Ec2Key::new(None, None, None, Some(secret.to_bytes().to_vec())).unwrap().into();
    let sig = sign_with_key(&key, Some(CoseAlgorithm::Es256), MSG).unwrap();
    verify_with_key(&key, Some(CoseAlgorithm::Es256), MSG, &sig).unwrap();
}
