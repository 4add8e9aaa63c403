// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE key model.
//!
//! - [`CoseKey`]: the closed set of key variants (OKP, EC2, Symmetric and
//!   key types registered at runtime)
//! - [`KeyTypeRegistry`]: `kty` to factory dispatch used when decoding keys
//! - [`resolve_key_conf`]: algorithm/curve/operation consistency between a
//!   key, the requested operation and an optional peer key
//! - field validators for received key maps and a base64url codec

pub mod base64url;
pub mod common;
pub mod conf;
pub mod ec2;
pub mod key;
pub mod key_set;
pub mod okp;
pub mod registered;
pub mod registry;
pub mod symmetric;
pub mod validate;

pub use base64url::{base64url_decode, base64url_encode};
pub use common::KeyCommon;
pub use conf::{resolve_key_conf, KeyConfig, ResolvedKeys};
pub use ec2::Ec2Key;
pub use key::CoseKey;
pub use key_set::CoseKeySet;
pub use okp::OkpKey;
pub use registered::RegisteredKey;
pub use registry::{KeyFactory, KeyTypeRegistration, KeyTypeRegistry};
pub use symmetric::SymmetricKey;

// Re-export so `inventory::submit!` works for downstream registrations.
pub use inventory;
