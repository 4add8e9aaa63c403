// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Access to the key material primitives need.

use cosecore_abstractions::{CoseError, EllipticCurve};
use cosecore_keys::{CoseKey, Ec2Key, OkpKey, SymmetricKey};

pub(crate) fn required<'a>(name: &str, value: Option<&'a [u8]>) -> Result<&'a [u8], CoseError> {
    value.ok_or_else(|| CoseError::MissingKeyParameter(format!("key has no {name}")))
}

pub(crate) fn fixed<const N: usize>(name: &str, bytes: &[u8]) -> Result<[u8; N], CoseError> {
    bytes.try_into().map_err(|_| {
        CoseError::InvalidKeyParameter(format!("{name} must be {N} bytes, got {}", bytes.len()))
    })
}

/// SEC1 uncompressed point `04 || x || y`.
pub(crate) fn sec1_point(key: &Ec2Key) -> Result<Vec<u8>, CoseError> {
    let x = required("x coordinate", key.x())?;
    let y = required("y coordinate", key.y())?;
    let mut point = Vec::with_capacity(1 + x.len() + y.len());
    point.push(0x04);
    point.extend_from_slice(x);
    point.extend_from_slice(y);
    Ok(point)
}

pub(crate) fn curve(key: &CoseKey) -> Result<EllipticCurve, CoseError> {
    key.curve()
        .ok_or_else(|| CoseError::MissingKeyParameter(format!("{} key has no curve", key.kty())))
}

pub(crate) fn ec2(key: &CoseKey) -> Result<&Ec2Key, CoseError> {
    match key {
        CoseKey::Ec2(k) => Ok(k),
        other => Err(CoseError::InvalidKeyType(format!("expected EC2 key, got {}", other.kty()))),
    }
}

pub(crate) fn okp(key: &CoseKey) -> Result<&OkpKey, CoseError> {
    match key {
        CoseKey::Okp(k) => Ok(k),
        other => Err(CoseError::InvalidKeyType(format!("expected OKP key, got {}", other.kty()))),
    }
}

pub(crate) fn symmetric(key: &CoseKey) -> Result<&[u8], CoseError> {
    match key {
        CoseKey::Symmetric(k) => Ok(SymmetricKey::k(k)),
        other => Err(CoseError::InvalidKeyType(format!("expected Symmetric key, got {}", other.kty()))),
    }
}
