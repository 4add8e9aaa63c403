// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Field validators for received key maps.
//!
//! Typed setters make most invalid states unrepresentable; these validators run
//! where untyped values enter the model, i.e. when a key map is decoded.

use cosecore_abstractions::{
    CborMap, CoseAlgorithm, CoseError, EllipticCurve, HeaderKey, HeaderValue, KeyOps, KeyParameter, KeyType,
};

pub(crate) fn param(map: &CborMap, label: i64) -> Option<&HeaderValue> {
    map.get(&HeaderKey::Int(label))
}

/// `kty` must be an assigned key type; there is no default.
pub fn kty(value: &HeaderValue) -> Result<KeyType, CoseError> {
    match value {
        HeaderValue::Int(id) => KeyType::try_from(*id),
        other => Err(CoseError::InvalidKeyType(format!(
            "kty must be an int, got {}",
            other.type_name()
        ))),
    }
}

/// `alg` may be absent; when present it must be a registered algorithm.
pub fn alg(value: Option<&HeaderValue>) -> Result<Option<CoseAlgorithm>, CoseError> {
    match value {
        None => Ok(None),
        Some(HeaderValue::Int(id)) => CoseAlgorithm::try_from(*id).map(Some),
        Some(other) => Err(CoseError::InvalidAlgorithm(format!(
            "alg must be an int, got {}",
            other.type_name()
        ))),
    }
}

/// Byte-string parameters (`kid`, `base_iv`, key material) are absent or a bstr.
pub fn byte_string(name: &str, value: Option<&HeaderValue>) -> Result<Option<Vec<u8>>, CoseError> {
    match value {
        None => Ok(None),
        Some(HeaderValue::Bytes(b)) => Ok(Some(b.clone())),
        Some(other) => Err(CoseError::InvalidKeyParameter(format!(
            "{name} attribute must be of type bstr, got {}",
            other.type_name()
        ))),
    }
}

/// `key_ops` is absent, a single operation, or an array holding at most one.
pub fn key_ops(value: Option<&HeaderValue>) -> Result<Option<KeyOps>, CoseError> {
    match value {
        None => Ok(None),
        Some(HeaderValue::Int(id)) => KeyOps::try_from(*id).map(Some),
        Some(HeaderValue::Array(ops)) => match ops.as_slice() {
            [] => Ok(None),
            [HeaderValue::Int(id)] => KeyOps::try_from(*id).map(Some),
            [_] => Err(CoseError::InvalidKeyOperation("key_ops entries must be ints".to_string())),
            _ => Err(CoseError::InvalidKeyOperation(
                "a key may declare at most one key operation".to_string(),
            )),
        },
        Some(other) => Err(CoseError::InvalidKeyOperation(format!(
            "key_ops must be an int or array, got {}",
            other.type_name()
        ))),
    }
}

/// `crv` is absent or a registered curve of the expected key type family.
pub fn curve(value: Option<&HeaderValue>, family: KeyType) -> Result<Option<EllipticCurve>, CoseError> {
    let crv = match value {
        None => return Ok(None),
        Some(HeaderValue::Int(id)) => EllipticCurve::try_from(*id)?,
        Some(other) => {
            return Err(CoseError::InvalidKeyParameter(format!(
                "crv must be an int, got {}",
                other.type_name()
            )))
        }
    };
    curve_in_family(crv, family)?;
    Ok(Some(crv))
}

pub(crate) fn curve_in_family(crv: EllipticCurve, family: KeyType) -> Result<(), CoseError> {
    if crv.key_type() != Some(family) {
        return Err(CoseError::InvalidKeyParameter(format!(
            "curve {crv} cannot be used with a {family} key"
        )));
    }
    Ok(())
}

/// Check the `kty` of a map handed to a variant factory.
pub(crate) fn expect_kty(map: &CborMap, expected: KeyType) -> Result<(), CoseError> {
    let value = param(map, KeyParameter::Kty.label())
        .ok_or_else(|| CoseError::MalformedKey("missing kty".to_string()))?;
    let found = kty(value)?;
    if found != expected {
        return Err(CoseError::InvalidKeyType(format!("expected {expected} key, got {found}")));
    }
    Ok(())
}
