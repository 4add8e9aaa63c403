// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CborMap, CoseError, HeaderKey, KeyParameter, KeyType};

use crate::{validate, CoseKey, KeyCommon};

/// A key of a type added to a [`crate::KeyTypeRegistry`] at runtime.
///
/// Type-specific parameters are kept as received; the common parameters are
/// validated like any other key's.
#[derive(Debug, Clone, PartialEq)]
pub struct RegisteredKey {
    pub(crate) common: KeyCommon,
    kty: KeyType,
    params: CborMap,
}

impl RegisteredKey {
    pub fn new(kty: KeyType, params: CborMap) -> Self {
        Self {
            common: KeyCommon::default(),
            kty,
            params,
        }
    }

    /// Generic factory: keeps every non-common label as an opaque parameter.
    pub fn from_map(map: &CborMap) -> Result<CoseKey, CoseError> {
        let id = validate::param(map, KeyParameter::Kty.label())
            .and_then(|v| v.as_i64())
            .ok_or_else(|| CoseError::MalformedKey("missing or non-integer kty".to_string()))?;
        let kty = KeyType::try_from(id).unwrap_or(KeyType::Registered(id));

        let params = map
            .iter()
            .filter(|(label, _)| !KeyCommon::is_common_label(label))
            .map(|(label, value)| (label.clone(), value.clone()))
            .collect();

        let mut key = Self::new(kty, params);
        key.common = KeyCommon::from_map(map)?;
        Ok(CoseKey::Registered(key))
    }

    pub fn kty(&self) -> KeyType {
        self.kty
    }

    pub fn params(&self) -> &CborMap {
        &self.params
    }

    pub fn param(&self, label: i64) -> Option<&cosecore_abstractions::HeaderValue> {
        self.params.get(&HeaderKey::Int(label))
    }

    pub(crate) fn write_map(&self, map: &mut CborMap) {
        map.extend(self.params.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
