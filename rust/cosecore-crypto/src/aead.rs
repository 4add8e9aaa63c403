// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Content encryption: AES-GCM and AES-CCM (RFC 8152 §10).

use aes::{Aes128, Aes256};
use aes_gcm::aead::consts::{U12, U13, U16, U7, U8};
use aes_gcm::aead::{Aead, AeadCore, KeyInit, Nonce, Payload};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use ccm::Ccm;
use cosecore_abstractions::{CoseAlgorithm, CoseError};
use tracing::{debug, warn};

type Aes192Gcm = AesGcm<aes::Aes192, U12>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AeadFamily {
    Gcm,
    Ccm,
}

/// Parameters of a content encryption algorithm. All lengths are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AeadParams {
    pub alg: CoseAlgorithm,
    pub family: AeadFamily,
    pub key_len: usize,
    pub tag_len: usize,
    pub nonce_len: usize,
}

const fn entry(alg: CoseAlgorithm, family: AeadFamily, key_len: usize, tag_len: usize, nonce_len: usize) -> AeadParams {
    AeadParams {
        alg,
        family,
        key_len,
        tag_len,
        nonce_len,
    }
}

static AEAD_TABLE: [AeadParams; 11] = [
    entry(CoseAlgorithm::A128Gcm, AeadFamily::Gcm, 16, 16, 12),
    entry(CoseAlgorithm::A192Gcm, AeadFamily::Gcm, 24, 16, 12),
    entry(CoseAlgorithm::A256Gcm, AeadFamily::Gcm, 32, 16, 12),
    entry(CoseAlgorithm::AesCcm16_64_128, AeadFamily::Ccm, 16, 8, 13),
    entry(CoseAlgorithm::AesCcm16_64_256, AeadFamily::Ccm, 32, 8, 13),
    entry(CoseAlgorithm::AesCcm64_64_128, AeadFamily::Ccm, 16, 8, 7),
    entry(CoseAlgorithm::AesCcm64_64_256, AeadFamily::Ccm, 32, 8, 7),
    entry(CoseAlgorithm::AesCcm16_128_128, AeadFamily::Ccm, 16, 16, 13),
    entry(CoseAlgorithm::AesCcm16_128_256, AeadFamily::Ccm, 32, 16, 13),
    entry(CoseAlgorithm::AesCcm64_128_128, AeadFamily::Ccm, 16, 16, 7),
    entry(CoseAlgorithm::AesCcm64_128_256, AeadFamily::Ccm, 32, 16, 7),
];

/// Look up a content encryption algorithm.
pub fn aead_params(alg: CoseAlgorithm) -> Option<&'static AeadParams> {
    AEAD_TABLE.iter().find(|p| p.alg == alg)
}

#[derive(Clone, Copy)]
enum Direction {
    Seal,
    Open,
}

enum CipherError {
    Parameters(String),
    Cipher,
}

/// Encrypt `plaintext`, returning the ciphertext with the tag appended.
pub fn aead_encrypt(
    key: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    alg: CoseAlgorithm,
    nonce: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let params = lookup(alg)?;
    debug!(alg = %alg, "aead encrypt");
    run(params, Direction::Seal, key, nonce, Payload { msg: plaintext, aad }).map_err(|e| match e {
        CipherError::Parameters(msg) => CoseError::InvalidKeyParameter(msg),
        CipherError::Cipher => CoseError::UnsupportedEncryption(format!("{alg}: plaintext too long for nonce size")),
    })
}

/// Decrypt and authenticate `ciphertext` (which carries the tag).
///
/// No plaintext is returned unless the tag verifies.
pub fn aead_decrypt(
    key: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    alg: CoseAlgorithm,
    nonce: &[u8],
) -> Result<Vec<u8>, CoseError> {
    let params = lookup(alg)?;
    debug!(alg = %alg, "aead decrypt");
    run(params, Direction::Open, key, nonce, Payload { msg: ciphertext, aad }).map_err(|e| match e {
        CipherError::Parameters(msg) => CoseError::InvalidKeyParameter(msg),
        CipherError::Cipher => {
            warn!(alg = %alg, "aead tag verification failed");
            CoseError::AuthenticationFailed
        }
    })
}

/// Build the per-message nonce from a base IV and a partial IV (RFC 8152 §3.1):
/// the partial IV is left-padded with zeros to `nonce_len` and XORed into the
/// base IV.
pub fn aead_nonce(base_iv: &[u8], partial_iv: &[u8], nonce_len: usize) -> Result<Vec<u8>, CoseError> {
    if base_iv.len() != nonce_len {
        return Err(CoseError::InvalidKeyParameter(format!(
            "base IV must be {nonce_len} bytes, got {}",
            base_iv.len()
        )));
    }
    if partial_iv.len() > nonce_len {
        return Err(CoseError::InvalidKeyParameter(format!(
            "partial IV of {} bytes does not fit a {nonce_len}-byte nonce",
            partial_iv.len()
        )));
    }
    let offset = nonce_len - partial_iv.len();
    let mut nonce = base_iv.to_vec();
    for (n, p) in nonce[offset..].iter_mut().zip(partial_iv) {
        *n ^= p;
    }
    Ok(nonce)
}

fn lookup(alg: CoseAlgorithm) -> Result<&'static AeadParams, CoseError> {
    aead_params(alg).ok_or_else(|| CoseError::UnsupportedEncryption(alg.to_string()))
}

/// Checked key and nonce lengths; errors from the cipher itself are opaque.
fn run(
    params: &AeadParams,
    dir: Direction,
    key: &[u8],
    nonce: &[u8],
    payload: Payload<'_, '_>,
) -> Result<Vec<u8>, CipherError> {
    if key.len() != params.key_len {
        return Err(CipherError::Parameters(format!(
            "{} requires a {}-byte key, got {}",
            params.alg,
            params.key_len,
            key.len()
        )));
    }
    if nonce.len() != params.nonce_len {
        return Err(CipherError::Parameters(format!(
            "{} requires a {}-byte nonce, got {}",
            params.alg,
            params.nonce_len,
            nonce.len()
        )));
    }

    match params.alg {
        CoseAlgorithm::A128Gcm => apply::<Aes128Gcm>(dir, key, nonce, payload),
        CoseAlgorithm::A192Gcm => apply::<Aes192Gcm>(dir, key, nonce, payload),
        CoseAlgorithm::A256Gcm => apply::<Aes256Gcm>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm16_64_128 => apply::<Ccm<Aes128, U8, U13>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm16_64_256 => apply::<Ccm<Aes256, U8, U13>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm64_64_128 => apply::<Ccm<Aes128, U8, U7>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm64_64_256 => apply::<Ccm<Aes256, U8, U7>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm16_128_128 => apply::<Ccm<Aes128, U16, U13>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm16_128_256 => apply::<Ccm<Aes256, U16, U13>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm64_128_128 => apply::<Ccm<Aes128, U16, U7>>(dir, key, nonce, payload),
        CoseAlgorithm::AesCcm64_128_256 => apply::<Ccm<Aes256, U16, U7>>(dir, key, nonce, payload),
        other => Err(CipherError::Parameters(format!("{other} is not a content encryption algorithm"))),
    }
}

fn apply<C>(dir: Direction, key: &[u8], nonce: &[u8], payload: Payload<'_, '_>) -> Result<Vec<u8>, CipherError>
where
    C: KeyInit + Aead + AeadCore,
{
    let cipher = C::new_from_slice(key).map_err(|_| CipherError::Parameters("invalid key length".to_string()))?;
    let nonce = Nonce::<C>::from_slice(nonce);
    match dir {
        Direction::Seal => cipher.encrypt(nonce, payload),
        Direction::Open => cipher.decrypt(nonce, payload),
    }
    .map_err(|_| CipherError::Cipher)
}
