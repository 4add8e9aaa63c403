// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CborMap, CoseError, HeaderKey, HeaderValue, KeyType};

use crate::{validate, CoseKey, KeyCommon};

pub const SYMMETRIC_K: i64 = -1;

/// Symmetric key (RFC 8152 §13.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricKey {
    pub(crate) common: KeyCommon,
    k: Vec<u8>,
}

impl SymmetricKey {
    pub fn new(k: Vec<u8>) -> Result<Self, CoseError> {
        if k.is_empty() {
            return Err(CoseError::MalformedKey("symmetric key value k is empty".to_string()));
        }
        Ok(Self {
            common: KeyCommon::default(),
            k,
        })
    }

    /// Registry factory for `kty` Symmetric.
    pub fn from_map(map: &CborMap) -> Result<CoseKey, CoseError> {
        validate::expect_kty(map, KeyType::Symmetric)?;
        let k = validate::byte_string("k", validate::param(map, SYMMETRIC_K))?
            .ok_or_else(|| CoseError::MalformedKey("symmetric key is missing k".to_string()))?;
        let mut key = Self::new(k)?;
        key.common = KeyCommon::from_map(map)?;
        Ok(CoseKey::Symmetric(key))
    }

    pub fn k(&self) -> &[u8] {
        &self.k
    }

    pub(crate) fn write_map(&self, map: &mut CborMap) {
        map.insert(HeaderKey::Int(SYMMETRIC_K), HeaderValue::Bytes(self.k.clone()));
    }
}
