// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE signing and encryption core.
//!
//! This crate is the primary entry point. It provides the signature structure
//! and re-exports the key model and algorithm dispatch so callers depend on a
//! single crate.

mod signature;

pub use signature::{CoseSignature, SignatureContext, HEADER_ALG};

pub use cosecore_abstractions::{
    CborMap, CoseAlgorithm, CoseError, CoseHeaderMap, EllipticCurve, HeaderKey, HeaderValue, KeyField, KeyOps,
    KeyParameter, KeyType,
};
pub use cosecore_keys::{
    base64url_decode, base64url_encode, resolve_key_conf, CoseKey, CoseKeySet, Ec2Key, KeyConfig,
    KeyTypeRegistration, KeyTypeRegistry, OkpKey, RegisteredKey, ResolvedKeys, SymmetricKey,
};

pub use cosecore_crypto as crypto;
