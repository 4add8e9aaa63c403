// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CborMap, CoseAlgorithm, CoseError, HeaderKey, HeaderValue, KeyField, KeyOps, KeyParameter};

use crate::validate;

/// Parameters shared by every COSE key type (`kid`, `alg`, `key_ops`, `base_iv`).
///
/// `alg` and `key_ops` may be filled in later but never contradicted: the
/// setters accept re-assignment to an equal value only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCommon {
    kid: Option<Vec<u8>>,
    alg: Option<CoseAlgorithm>,
    key_ops: Option<KeyOps>,
    base_iv: Option<Vec<u8>>,
}

impl KeyCommon {
    pub fn kid(&self) -> Option<&[u8]> {
        self.kid.as_deref()
    }

    pub fn alg(&self) -> Option<CoseAlgorithm> {
        self.alg
    }

    pub fn key_ops(&self) -> Option<KeyOps> {
        self.key_ops
    }

    pub fn base_iv(&self) -> Option<&[u8]> {
        self.base_iv.as_deref()
    }

    pub fn set_kid(&mut self, kid: Option<Vec<u8>>) {
        self.kid = kid;
    }

    pub fn set_base_iv(&mut self, base_iv: Option<Vec<u8>>) {
        self.base_iv = base_iv;
    }

    pub fn set_alg(&mut self, alg: CoseAlgorithm) -> Result<(), CoseError> {
        match self.alg {
            Some(current) if current != alg => Err(CoseError::conflict(
                KeyField::Algorithm,
                format!("COSE key algorithm {current} does not match {alg}"),
            )),
            _ => {
                self.alg = Some(alg);
                Ok(())
            }
        }
    }

    pub fn set_key_ops(&mut self, op: KeyOps) -> Result<(), CoseError> {
        match self.key_ops {
            Some(current) if current != op => Err(CoseError::conflict(
                KeyField::KeyOperation,
                format!("COSE key operation should be {op}, instead {current}"),
            )),
            _ => {
                self.key_ops = Some(op);
                Ok(())
            }
        }
    }

    pub(crate) fn from_map(map: &CborMap) -> Result<Self, CoseError> {
        Ok(Self {
            kid: validate::byte_string("kid", validate::param(map, KeyParameter::Kid.label()))?,
            alg: validate::alg(validate::param(map, KeyParameter::Alg.label()))?,
            key_ops: validate::key_ops(validate::param(map, KeyParameter::KeyOps.label()))?,
            base_iv: validate::byte_string("base_iv", validate::param(map, KeyParameter::BaseIv.label()))?,
        })
    }

    /// Value of one common parameter, if the key carries it. `kty` is owned by
    /// the key variant and is not answered here.
    pub(crate) fn value(&self, param: KeyParameter) -> Option<HeaderValue> {
        match param {
            KeyParameter::Kty => None,
            KeyParameter::Kid => self.kid.clone().map(HeaderValue::Bytes),
            KeyParameter::Alg => self.alg.map(|a| HeaderValue::Int(a.id())),
            KeyParameter::KeyOps => self
                .key_ops
                .map(|op| HeaderValue::Array(vec![HeaderValue::Int(op.id())])),
            KeyParameter::BaseIv => self.base_iv.clone().map(HeaderValue::Bytes),
        }
    }

    pub(crate) fn write_map(&self, map: &mut CborMap) {
        for param in [KeyParameter::Kid, KeyParameter::Alg, KeyParameter::KeyOps, KeyParameter::BaseIv] {
            if let Some(value) = self.value(param) {
                map.insert(HeaderKey::Int(param.label()), value);
            }
        }
    }

    pub(crate) fn is_common_label(label: &HeaderKey) -> bool {
        matches!(label, HeaderKey::Int(1..=5))
    }
}
