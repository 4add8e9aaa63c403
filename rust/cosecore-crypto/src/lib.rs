// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE algorithm dispatch.
//!
//! Stateless functions that route a [`CoseAlgorithm`] to its primitive:
//! - [`aead`]: AES-GCM / AES-CCM content encryption
//! - [`mac`]: AES-MAC (CMAC) and HMAC, including the 64-bit truncated variants
//! - [`key_wrap`]: RFC 3394 AES key wrap
//! - [`ecdh`]: ECDH + HKDF-SHA-256 key agreement
//! - [`signing`]: ECDSA and EdDSA signatures
//!
//! [`keyed`] wraps these with key configuration checks for callers that hold
//! [`cosecore_keys::CoseKey`] values.

use cosecore_abstractions::CoseAlgorithm;

pub mod aead;
pub mod ecdh;
pub mod key_wrap;
pub mod keyed;
pub mod mac;
mod material;
pub mod signing;

pub use aead::{aead_decrypt, aead_encrypt, aead_nonce, aead_params, AeadFamily, AeadParams};
pub use ecdh::{ecdh_derive, hkdf_sha256, EcdhOutput};
pub use key_wrap::{key_unwrap, key_wrap};
pub use keyed::{
    decrypt, derive_shared_key, encrypt, mac_create, mac_verify, sign_with_key, unwrap_key, verify_with_key,
    wrap_key,
};
pub use mac::{calc_tag, mac_params, verify_tag, MacParams, MacPrimitive};
pub use signing::{sign, verify};

/// Whether `alg` is a signature algorithm this crate can sign and verify with.
pub fn is_signature_algorithm(alg: CoseAlgorithm) -> bool {
    matches!(
        alg,
        CoseAlgorithm::Es256 | CoseAlgorithm::Es384 | CoseAlgorithm::Es512 | CoseAlgorithm::EdDsa
    )
}
