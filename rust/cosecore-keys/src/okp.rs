// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CborMap, CoseError, EllipticCurve, HeaderKey, HeaderValue, KeyType};

use crate::{validate, CoseKey, KeyCommon};

pub const OKP_CRV: i64 = -1;
pub const OKP_X: i64 = -2;
pub const OKP_D: i64 = -4;

/// Octet key pair (RFC 8152 §13.2): X25519/X448 and Ed25519/Ed448 keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OkpKey {
    pub(crate) common: KeyCommon,
    pub(crate) crv: Option<EllipticCurve>,
    x: Option<Vec<u8>>,
    d: Option<Vec<u8>>,
}

impl OkpKey {
    pub fn new(crv: Option<EllipticCurve>, x: Option<Vec<u8>>, d: Option<Vec<u8>>) -> Result<Self, CoseError> {
        if let Some(crv) = crv {
            validate::curve_in_family(crv, KeyType::Okp)?;
        }
        if x.is_none() && d.is_none() {
            return Err(CoseError::MalformedKey(
                "OKP key requires the public key x or the private key d".to_string(),
            ));
        }
        Ok(Self {
            common: KeyCommon::default(),
            crv,
            x,
            d,
        })
    }

    /// Registry factory for `kty` OKP.
    pub fn from_map(map: &CborMap) -> Result<CoseKey, CoseError> {
        validate::expect_kty(map, KeyType::Okp)?;
        let mut key = Self::new(
            validate::curve(validate::param(map, OKP_CRV), KeyType::Okp)?,
            validate::byte_string("x", validate::param(map, OKP_X))?,
            validate::byte_string("d", validate::param(map, OKP_D))?,
        )?;
        key.common = KeyCommon::from_map(map)?;
        Ok(CoseKey::Okp(key))
    }

    pub fn crv(&self) -> Option<EllipticCurve> {
        self.crv
    }

    pub fn x(&self) -> Option<&[u8]> {
        self.x.as_deref()
    }

    pub fn d(&self) -> Option<&[u8]> {
        self.d.as_deref()
    }

    pub(crate) fn write_map(&self, map: &mut CborMap) {
        if let Some(crv) = self.crv {
            map.insert(HeaderKey::Int(OKP_CRV), HeaderValue::Int(crv.id()));
        }
        if let Some(x) = &self.x {
            map.insert(HeaderKey::Int(OKP_X), HeaderValue::Bytes(x.clone()));
        }
        if let Some(d) = &self.d {
            map.insert(HeaderKey::Int(OKP_D), HeaderValue::Bytes(d.clone()));
        }
    }
}
