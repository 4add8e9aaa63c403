// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! MAC algorithms: AES-CBC-MAC family and HMAC family (RFC 8152 §9).
//!
//! The AES-MAC identifiers are computed with CMAC. Truncated variants keep the
//! first 8 bytes of the full tag; truncation is fixed by the algorithm.

use aes::{Aes128, Aes256};
use cmac::Cmac;
use cosecore_abstractions::{CoseAlgorithm, CoseError};
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacPrimitive {
    CmacAes128,
    CmacAes256,
    HmacSha256,
    HmacSha384,
    HmacSha512,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacParams {
    pub alg: CoseAlgorithm,
    pub primitive: MacPrimitive,
    /// Tag length in bytes; shorter than the native output for truncated variants.
    pub tag_len: usize,
}

const fn entry(alg: CoseAlgorithm, primitive: MacPrimitive, tag_len: usize) -> MacParams {
    MacParams { alg, primitive, tag_len }
}

static CMAC_TABLE: [MacParams; 4] = [
    entry(CoseAlgorithm::AesMac128_64, MacPrimitive::CmacAes128, 8),
    entry(CoseAlgorithm::AesMac256_64, MacPrimitive::CmacAes256, 8),
    entry(CoseAlgorithm::AesMac128_128, MacPrimitive::CmacAes128, 16),
    entry(CoseAlgorithm::AesMac256_128, MacPrimitive::CmacAes256, 16),
];

static HMAC_TABLE: [MacParams; 4] = [
    entry(CoseAlgorithm::Hmac256_64, MacPrimitive::HmacSha256, 8),
    entry(CoseAlgorithm::Hmac256_256, MacPrimitive::HmacSha256, 32),
    entry(CoseAlgorithm::Hmac384_384, MacPrimitive::HmacSha384, 48),
    entry(CoseAlgorithm::Hmac512_512, MacPrimitive::HmacSha512, 64),
];

/// Look up a MAC algorithm, CMAC family first.
pub fn mac_params(alg: CoseAlgorithm) -> Option<&'static MacParams> {
    CMAC_TABLE.iter().chain(HMAC_TABLE.iter()).find(|p| p.alg == alg)
}

/// Compute the tag of `message`.
pub fn calc_tag(key: &[u8], message: &[u8], alg: CoseAlgorithm) -> Result<Vec<u8>, CoseError> {
    let params = mac_params(alg).ok_or_else(|| CoseError::UnsupportedMac(alg.to_string()))?;
    debug!(alg = %alg, "mac");
    let mut tag = match params.primitive {
        MacPrimitive::CmacAes128 => digest::<Cmac<Aes128>>(key, message)?,
        MacPrimitive::CmacAes256 => digest::<Cmac<Aes256>>(key, message)?,
        MacPrimitive::HmacSha256 => digest::<Hmac<Sha256>>(key, message)?,
        MacPrimitive::HmacSha384 => digest::<Hmac<Sha384>>(key, message)?,
        MacPrimitive::HmacSha512 => digest::<Hmac<Sha512>>(key, message)?,
    };
    tag.truncate(params.tag_len);
    Ok(tag)
}

/// Recompute the tag and compare it with `tag` in constant time.
pub fn verify_tag(key: &[u8], tag: &[u8], message: &[u8], alg: CoseAlgorithm) -> Result<(), CoseError> {
    let expected = calc_tag(key, message, alg)?;
    if bool::from(expected.as_slice().ct_eq(tag)) {
        Ok(())
    } else {
        warn!(alg = %alg, "mac tag mismatch");
        Err(CoseError::InvalidTag)
    }
}

fn digest<M: Mac + hmac::digest::KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, CoseError> {
    let mut mac = <M as Mac>::new_from_slice(key)
        .map_err(|_| CoseError::InvalidKeyParameter(format!("invalid MAC key length {}", key.len())))?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}
