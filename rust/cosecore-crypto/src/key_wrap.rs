// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! AES key wrap (RFC 3394) for recipient key distribution.

use aes::cipher::generic_array::GenericArray;
use aes::{Aes128, Aes192, Aes256};
use aes_kw::Kek;
use cosecore_abstractions::{CoseAlgorithm, CoseError};
use tracing::{debug, warn};

const SEMIBLOCK: usize = 8;

/// KEK length for algorithms that end in an AES key wrap.
pub fn kek_len(alg: CoseAlgorithm) -> Option<usize> {
    use CoseAlgorithm::*;
    match alg {
        A128Kw | EcdhEsA128Kw | EcdhSsA128Kw => Some(16),
        A192Kw | EcdhEsA192Kw | EcdhSsA192Kw => Some(24),
        A256Kw | EcdhEsA256Kw | EcdhSsA256Kw => Some(32),
        _ => None,
    }
}

/// Wrap `plaintext_key` under `kek`.
///
/// Direct algorithms carry no wrapped key and yield an empty byte string.
pub fn key_wrap(alg: CoseAlgorithm, kek: &[u8], plaintext_key: &[u8]) -> Result<Vec<u8>, CoseError> {
    if alg.is_direct() {
        return Ok(Vec::new());
    }
    let len = check_kek(alg, kek)?;
    if plaintext_key.len() < 2 * SEMIBLOCK || plaintext_key.len() % SEMIBLOCK != 0 {
        return Err(CoseError::InvalidKeyParameter(format!(
            "key to wrap must be a multiple of 8 bytes and at least 16, got {}",
            plaintext_key.len()
        )));
    }
    debug!(alg = %alg, "key wrap");

    let mut out = vec![0u8; plaintext_key.len() + SEMIBLOCK];
    let result = match len {
        16 => Kek::<Aes128>::new(GenericArray::from_slice(kek)).wrap(plaintext_key, &mut out),
        24 => Kek::<Aes192>::new(GenericArray::from_slice(kek)).wrap(plaintext_key, &mut out),
        _ => Kek::<Aes256>::new(GenericArray::from_slice(kek)).wrap(plaintext_key, &mut out),
    };
    result.map_err(|e| CoseError::InvalidKeyParameter(e.to_string()))?;
    Ok(out)
}

/// Unwrap a key wrapped with [`key_wrap`]. An integrity check failure is
/// reported as [`CoseError::AuthenticationFailed`].
pub fn key_unwrap(alg: CoseAlgorithm, kek: &[u8], wrapped: &[u8]) -> Result<Vec<u8>, CoseError> {
    if alg.is_direct() {
        return Ok(Vec::new());
    }
    let len = check_kek(alg, kek)?;
    if wrapped.len() < 3 * SEMIBLOCK || wrapped.len() % SEMIBLOCK != 0 {
        return Err(CoseError::InvalidKeyParameter(format!(
            "wrapped key has invalid length {}",
            wrapped.len()
        )));
    }
    debug!(alg = %alg, "key unwrap");

    let mut out = vec![0u8; wrapped.len() - SEMIBLOCK];
    let result = match len {
        16 => Kek::<Aes128>::new(GenericArray::from_slice(kek)).unwrap(wrapped, &mut out),
        24 => Kek::<Aes192>::new(GenericArray::from_slice(kek)).unwrap(wrapped, &mut out),
        _ => Kek::<Aes256>::new(GenericArray::from_slice(kek)).unwrap(wrapped, &mut out),
    };
    result.map_err(|_| {
        warn!(alg = %alg, "key unwrap integrity check failed");
        CoseError::AuthenticationFailed
    })?;
    Ok(out)
}

fn check_kek(alg: CoseAlgorithm, kek: &[u8]) -> Result<usize, CoseError> {
    let len = kek_len(alg).ok_or_else(|| CoseError::UnsupportedKeyWrap(alg.to_string()))?;
    if kek.len() != len {
        return Err(CoseError::InvalidKeyParameter(format!(
            "{alg} requires a {len}-byte key encryption key, got {}",
            kek.len()
        )));
    }
    Ok(len)
}
