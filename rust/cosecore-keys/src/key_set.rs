// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{decode_value_from_cbor, encode_value_to_cbor, CoseError, HeaderValue};

use crate::{CoseKey, KeyTypeRegistry};

/// An ordered `COSE_KeySet`. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoseKeySet {
    keys: Vec<CoseKey>,
}

impl CoseKeySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: CoseKey) {
        self.keys.push(key);
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CoseKey> {
        self.keys.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CoseKey> {
        self.keys.iter()
    }

    /// Keys whose `kid` equals `kid`, in set order.
    pub fn find_by_kid<'a>(&'a self, kid: &'a [u8]) -> impl Iterator<Item = &'a CoseKey> + 'a {
        self.keys.iter().filter(move |k| k.kid() == Some(kid))
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CoseError> {
        Self::from_cbor_with(bytes, KeyTypeRegistry::global())
    }

    /// Decode with a caller-supplied registry.
    pub fn from_cbor_with(bytes: &[u8], registry: &KeyTypeRegistry) -> Result<Self, CoseError> {
        let HeaderValue::Array(items) = decode_value_from_cbor(bytes)? else {
            return Err(CoseError::Cbor("COSE_KeySet must be an array".to_string()));
        };
        let keys = items
            .iter()
            .map(|item| match item {
                HeaderValue::Map(map) => registry.decode(map),
                other => Err(CoseError::MalformedKey(format!(
                    "COSE_KeySet entries must be maps, got {}",
                    other.type_name()
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { keys })
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, CoseError> {
        let items = self.keys.iter().map(|k| HeaderValue::Map(k.to_map())).collect();
        encode_value_to_cbor(&HeaderValue::Array(items))
    }
}

impl FromIterator<CoseKey> for CoseKeySet {
    fn from_iter<I: IntoIterator<Item = CoseKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CoseKeySet {
    type Item = &'a CoseKey;
    type IntoIter = std::slice::Iter<'a, CoseKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}
