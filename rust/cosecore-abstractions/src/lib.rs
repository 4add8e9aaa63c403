// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared identifiers and datatypes for the `cosecore` crates.
//!
//! This crate exists to prevent circular dependencies across:
//! - the key model (`cosecore-keys`)
//! - algorithm dispatch and primitives (`cosecore-crypto`)
//! - the signature structure facade (`cosecore`)
//!
//! It is intentionally kept small and stable: the IANA identifier registries,
//! the CBOR value model used for headers and keys, and the error taxonomy.

pub mod algorithm;
pub mod curve;
pub mod error;
pub mod header_map;
pub mod key_ops;
pub mod key_parameter;
pub mod key_type;

pub use algorithm::CoseAlgorithm;
pub use curve::EllipticCurve;
pub use error::CoseError;
pub use header_map::{
    decode_map_from_cbor, decode_value_from_cbor, encode_map_to_cbor, encode_value_to_cbor, CborMap,
    CoseHeaderMap, HeaderKey, HeaderValue, MAX_NESTING_DEPTH,
};
pub use key_ops::KeyOps;
pub use key_parameter::{KeyField, KeyParameter};
pub use key_type::KeyType;
