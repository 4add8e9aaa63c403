// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE algorithm identifiers (IANA COSE Algorithms registry).
//!
//! The numeric values are fixed by RFC 8152 and must match the registry exactly;
//! every dispatch table in `cosecore-crypto` is keyed by this enum.

use std::fmt;

use crate::{CoseError, EllipticCurve};

/// Supported COSE algorithms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i64)]
pub enum CoseAlgorithm {
    /// AES-GCM mode w/ 128-bit key, 128-bit tag.
    A128Gcm = 1,
    /// AES-GCM mode w/ 192-bit key, 128-bit tag.
    A192Gcm = 2,
    /// AES-GCM mode w/ 256-bit key, 128-bit tag.
    A256Gcm = 3,
    /// HMAC w/ SHA-256 truncated to 64 bits.
    Hmac256_64 = 4,
    /// HMAC w/ SHA-256.
    Hmac256_256 = 5,
    /// HMAC w/ SHA-384.
    Hmac384_384 = 6,
    /// HMAC w/ SHA-512.
    Hmac512_512 = 7,
    /// AES-CCM mode 128-bit key, 64-bit tag, 13-byte nonce.
    AesCcm16_64_128 = 10,
    /// AES-CCM mode 256-bit key, 64-bit tag, 13-byte nonce.
    AesCcm16_64_256 = 11,
    /// AES-CCM mode 128-bit key, 64-bit tag, 7-byte nonce.
    AesCcm64_64_128 = 12,
    /// AES-CCM mode 256-bit key, 64-bit tag, 7-byte nonce.
    AesCcm64_64_256 = 13,
    /// AES-MAC 128-bit key, 64-bit tag.
    AesMac128_64 = 14,
    /// AES-MAC 256-bit key, 64-bit tag.
    AesMac256_64 = 15,
    /// AES-MAC 128-bit key, 128-bit tag.
    AesMac128_128 = 25,
    /// AES-MAC 256-bit key, 128-bit tag.
    AesMac256_128 = 26,
    /// AES-CCM mode 128-bit key, 128-bit tag, 13-byte nonce.
    AesCcm16_128_128 = 30,
    /// AES-CCM mode 256-bit key, 128-bit tag, 13-byte nonce.
    AesCcm16_128_256 = 31,
    /// AES-CCM mode 128-bit key, 128-bit tag, 7-byte nonce.
    AesCcm64_128_128 = 32,
    /// AES-CCM mode 256-bit key, 128-bit tag, 7-byte nonce.
    AesCcm64_128_256 = 33,
    /// AES Key Wrap w/ 128-bit key.
    A128Kw = -3,
    /// AES Key Wrap w/ 192-bit key.
    A192Kw = -4,
    /// AES Key Wrap w/ 256-bit key.
    A256Kw = -5,
    /// Direct use of the content encryption key.
    Direct = -6,
    /// ECDSA w/ SHA-256 over P-256.
    Es256 = -7,
    /// EdDSA.
    EdDsa = -8,
    /// Shared secret w/ HKDF and SHA-256.
    DirectHkdfSha256 = -10,
    /// Shared secret w/ HKDF and SHA-512.
    DirectHkdfSha512 = -11,
    /// Shared secret w/ AES-MAC 128-bit key.
    DirectHkdfAes128 = -12,
    /// Shared secret w/ AES-MAC 256-bit key.
    DirectHkdfAes256 = -13,
    /// ECDH ephemeral-static w/ HKDF and SHA-256.
    EcdhEsHkdf256 = -25,
    /// ECDH ephemeral-static w/ HKDF and SHA-512.
    EcdhEsHkdf512 = -26,
    /// ECDH static-static w/ HKDF and SHA-256.
    EcdhSsHkdf256 = -27,
    /// ECDH static-static w/ HKDF and SHA-512.
    EcdhSsHkdf512 = -28,
    /// ECDH ephemeral-static w/ HKDF, key wrapped with A128KW.
    EcdhEsA128Kw = -29,
    /// ECDH ephemeral-static w/ HKDF, key wrapped with A192KW.
    EcdhEsA192Kw = -30,
    /// ECDH ephemeral-static w/ HKDF, key wrapped with A256KW.
    EcdhEsA256Kw = -31,
    /// ECDH static-static w/ HKDF, key wrapped with A128KW.
    EcdhSsA128Kw = -32,
    /// ECDH static-static w/ HKDF, key wrapped with A192KW.
    EcdhSsA192Kw = -33,
    /// ECDH static-static w/ HKDF, key wrapped with A256KW.
    EcdhSsA256Kw = -34,
    /// ECDSA w/ SHA-384 over P-384.
    Es384 = -35,
    /// ECDSA w/ SHA-512 over P-521.
    Es512 = -36,
}

impl CoseAlgorithm {
    /// Every registered algorithm, in registry order.
    pub const ALL: [CoseAlgorithm; 41] = [
        Self::A128Gcm,
        Self::A192Gcm,
        Self::A256Gcm,
        Self::Hmac256_64,
        Self::Hmac256_256,
        Self::Hmac384_384,
        Self::Hmac512_512,
        Self::AesCcm16_64_128,
        Self::AesCcm16_64_256,
        Self::AesCcm64_64_128,
        Self::AesCcm64_64_256,
        Self::AesMac128_64,
        Self::AesMac256_64,
        Self::AesMac128_128,
        Self::AesMac256_128,
        Self::AesCcm16_128_128,
        Self::AesCcm16_128_256,
        Self::AesCcm64_128_128,
        Self::AesCcm64_128_256,
        Self::A128Kw,
        Self::A192Kw,
        Self::A256Kw,
        Self::Direct,
        Self::Es256,
        Self::EdDsa,
        Self::DirectHkdfSha256,
        Self::DirectHkdfSha512,
        Self::DirectHkdfAes128,
        Self::DirectHkdfAes256,
        Self::EcdhEsHkdf256,
        Self::EcdhEsHkdf512,
        Self::EcdhSsHkdf256,
        Self::EcdhSsHkdf512,
        Self::EcdhEsA128Kw,
        Self::EcdhEsA192Kw,
        Self::EcdhEsA256Kw,
        Self::EcdhSsA128Kw,
        Self::EcdhSsA192Kw,
        Self::EcdhSsA256Kw,
        Self::Es384,
        Self::Es512,
    ];

    /// The registered numeric identifier.
    pub fn id(self) -> i64 {
        self as i64
    }

    /// The registered name.
    pub fn name(self) -> &'static str {
        match self {
            Self::A128Gcm => "A128GCM",
            Self::A192Gcm => "A192GCM",
            Self::A256Gcm => "A256GCM",
            Self::Hmac256_64 => "HMAC 256/64",
            Self::Hmac256_256 => "HMAC 256/256",
            Self::Hmac384_384 => "HMAC 384/384",
            Self::Hmac512_512 => "HMAC 512/512",
            Self::AesCcm16_64_128 => "AES-CCM-16-64-128",
            Self::AesCcm16_64_256 => "AES-CCM-16-64-256",
            Self::AesCcm64_64_128 => "AES-CCM-64-64-128",
            Self::AesCcm64_64_256 => "AES-CCM-64-64-256",
            Self::AesMac128_64 => "AES-MAC 128/64",
            Self::AesMac256_64 => "AES-MAC 256/64",
            Self::AesMac128_128 => "AES-MAC 128/128",
            Self::AesMac256_128 => "AES-MAC 256/128",
            Self::AesCcm16_128_128 => "AES-CCM-16-128-128",
            Self::AesCcm16_128_256 => "AES-CCM-16-128-256",
            Self::AesCcm64_128_128 => "AES-CCM-64-128-128",
            Self::AesCcm64_128_256 => "AES-CCM-64-128-256",
            Self::A128Kw => "A128KW",
            Self::A192Kw => "A192KW",
            Self::A256Kw => "A256KW",
            Self::Direct => "direct",
            Self::Es256 => "ES256",
            Self::EdDsa => "EdDSA",
            Self::DirectHkdfSha256 => "direct+HKDF-SHA-256",
            Self::DirectHkdfSha512 => "direct+HKDF-SHA-512",
            Self::DirectHkdfAes128 => "direct+HKDF-AES-128",
            Self::DirectHkdfAes256 => "direct+HKDF-AES-256",
            Self::EcdhEsHkdf256 => "ECDH-ES + HKDF-256",
            Self::EcdhEsHkdf512 => "ECDH-ES + HKDF-512",
            Self::EcdhSsHkdf256 => "ECDH-SS + HKDF-256",
            Self::EcdhSsHkdf512 => "ECDH-SS + HKDF-512",
            Self::EcdhEsA128Kw => "ECDH-ES + A128KW",
            Self::EcdhEsA192Kw => "ECDH-ES + A192KW",
            Self::EcdhEsA256Kw => "ECDH-ES + A256KW",
            Self::EcdhSsA128Kw => "ECDH-SS + A128KW",
            Self::EcdhSsA192Kw => "ECDH-SS + A192KW",
            Self::EcdhSsA256Kw => "ECDH-SS + A256KW",
            Self::Es384 => "ES384",
            Self::Es512 => "ES512",
        }
    }

    /// True for algorithms where the recipient carries no wrapped key:
    /// the content key is the shared secret or is derived from it.
    pub fn is_direct(self) -> bool {
        matches!(
            self,
            Self::Direct
                | Self::DirectHkdfSha256
                | Self::DirectHkdfSha512
                | Self::DirectHkdfAes128
                | Self::DirectHkdfAes256
                | Self::EcdhEsHkdf256
                | Self::EcdhEsHkdf512
                | Self::EcdhSsHkdf256
                | Self::EcdhSsHkdf512
        )
    }

    /// Nonce length in bytes for content encryption algorithms.
    pub fn nonce_len(self) -> Option<usize> {
        match self {
            Self::A128Gcm | Self::A192Gcm | Self::A256Gcm => Some(12),
            Self::AesCcm16_64_128
            | Self::AesCcm16_64_256
            | Self::AesCcm16_128_128
            | Self::AesCcm16_128_256 => Some(13),
            Self::AesCcm64_64_128
            | Self::AesCcm64_64_256
            | Self::AesCcm64_128_128
            | Self::AesCcm64_128_256 => Some(7),
            _ => None,
        }
    }

    /// The curve a signature algorithm is bound to, if it is bound to exactly one.
    ///
    /// EdDSA is curve-agnostic (Ed25519 or Ed448) and returns `None`.
    pub fn signature_curve(self) -> Option<EllipticCurve> {
        match self {
            Self::Es256 => Some(EllipticCurve::P256),
            Self::Es384 => Some(EllipticCurve::P384),
            Self::Es512 => Some(EllipticCurve::P521),
            _ => None,
        }
    }
}

impl TryFrom<i64> for CoseAlgorithm {
    type Error = CoseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.id() == value)
            .ok_or_else(|| CoseError::InvalidAlgorithm(format!("unknown COSE algorithm: {value}")))
    }
}

impl fmt::Display for CoseAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
