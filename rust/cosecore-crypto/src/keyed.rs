// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Operations on COSE keys.
//!
//! Each entry point resolves the key configuration for its operation before
//! touching key material, so a key bound to another algorithm, curve or
//! operation is rejected up front.

use cosecore_abstractions::{CoseAlgorithm, CoseError, KeyOps};
use cosecore_keys::{CoseKey, ResolvedKeys};

use crate::{aead, ecdh, key_wrap, mac, material, signing, EcdhOutput};

fn resolve(key: &CoseKey, alg: Option<CoseAlgorithm>, op: KeyOps) -> Result<(CoseAlgorithm, ResolvedKeys), CoseError> {
    let resolved = key.check_key_conf(alg, Some(op), None, None)?;
    Ok((resolved.algorithm()?, resolved))
}

/// Encrypt with a symmetric key. `alg` may be omitted if the key carries one.
pub fn encrypt(
    key: &CoseKey,
    alg: Option<CoseAlgorithm>,
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let (alg, resolved) = resolve(key, alg, KeyOps::Encrypt)?;
    aead::aead_encrypt(material::symmetric(&resolved.key)?, aad, plaintext, alg, nonce)
}

pub fn decrypt(
    key: &CoseKey,
    alg: Option<CoseAlgorithm>,
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let (alg, resolved) = resolve(key, alg, KeyOps::Decrypt)?;
    aead::aead_decrypt(material::symmetric(&resolved.key)?, aad, ciphertext, alg, nonce)
}

pub fn mac_create(key: &CoseKey, alg: Option<CoseAlgorithm>, message: &[u8]) -> Result<Vec<u8>, CoseError> {
    let (alg, resolved) = resolve(key, alg, KeyOps::MacCreate)?;
    mac::calc_tag(material::symmetric(&resolved.key)?, message, alg)
}

pub fn mac_verify(key: &CoseKey, alg: Option<CoseAlgorithm>, message: &[u8], tag: &[u8]) -> Result<(), CoseError> {
    let (alg, resolved) = resolve(key, alg, KeyOps::MacVerify)?;
    mac::verify_tag(material::symmetric(&resolved.key)?, tag, message, alg)
}

/// Wrap `content_key` under the key encryption key `kek`.
pub fn wrap_key(kek: &CoseKey, alg: Option<CoseAlgorithm>, content_key: &[u8]) -> Result<Vec<u8>, CoseError> {
    let (alg, resolved) = resolve(kek, alg, KeyOps::Wrap)?;
    key_wrap::key_wrap(alg, material::symmetric(&resolved.key)?, content_key)
}

pub fn unwrap_key(kek: &CoseKey, alg: Option<CoseAlgorithm>, wrapped: &[u8]) -> Result<Vec<u8>, CoseError> {
    let (alg, resolved) = resolve(kek, alg, KeyOps::Unwrap)?;
    key_wrap::key_unwrap(alg, material::symmetric(&resolved.key)?, wrapped)
}

/// Key agreement between our private key and the peer's public key.
///
/// Algorithm, curve and key operation are resolved across both keys first;
/// keys on different curves are reported as a configuration conflict.
pub fn derive_shared_key(
    private_key: &CoseKey,
    peer_key: &CoseKey,
    alg: Option<CoseAlgorithm>,
    length: usize,
    context: &[u8],
) -> Result<EcdhOutput, CoseError> {
    let resolved = private_key.check_key_conf(alg, Some(KeyOps::DeriveKey), Some(peer_key), None)?;
    let peer = resolved
        .peer
        .as_ref()
        .ok_or_else(|| CoseError::KeyAgreementFailed("no peer key".to_string()))?;
    ecdh::ecdh_derive(&resolved.key, peer, length, context)
}

pub fn sign_with_key(key: &CoseKey, alg: Option<CoseAlgorithm>, to_sign: &[u8]) -> Result<Vec<u8>, CoseError> {
    let curve = alg.or(key.alg()).and_then(CoseAlgorithm::signature_curve);
    let resolved = key.check_key_conf(alg, Some(KeyOps::Sign), None, curve)?;
    signing::sign(resolved.algorithm()?, &resolved.key, to_sign)
}

pub fn verify_with_key(
    key: &CoseKey,
    alg: Option<CoseAlgorithm>,
    to_sign: &[u8],
    signature: &[u8],
) -> Result<(), CoseError> {
    let curve = alg.or(key.alg()).and_then(CoseAlgorithm::signature_curve);
    let resolved = key.check_key_conf(alg, Some(KeyOps::Verify), None, curve)?;
    signing::verify(resolved.algorithm()?, &resolved.key, to_sign, signature)
}
