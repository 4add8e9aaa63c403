// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosecore_abstractions::{CborMap, CoseError, EllipticCurve, HeaderKey, HeaderValue, KeyType};

use crate::{validate, CoseKey, KeyCommon};

pub const EC2_CRV: i64 = -1;
pub const EC2_X: i64 = -2;
pub const EC2_Y: i64 = -3;
pub const EC2_D: i64 = -4;

/// Elliptic curve key with x/y coordinates (RFC 8152 §13.1.1).
///
/// Coordinates and the private scalar are kept as opaque big-endian byte
/// strings; turning them into curve points is the crypto layer's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ec2Key {
    pub(crate) common: KeyCommon,
    pub(crate) crv: Option<EllipticCurve>,
    x: Option<Vec<u8>>,
    y: Option<Vec<u8>>,
    d: Option<Vec<u8>>,
}

impl Ec2Key {
    /// A key needs either both public coordinates or the private scalar.
    pub fn new(
        crv: Option<EllipticCurve>,
        x: Option<Vec<u8>>,
        y: Option<Vec<u8>>,
        d: Option<Vec<u8>>,
    ) -> Result<Self, CoseError> {
        if let Some(crv) = crv {
            validate::curve_in_family(crv, KeyType::Ec2)?;
        }
        let has_public = x.is_some() && y.is_some();
        if !has_public && d.is_none() {
            return Err(CoseError::MalformedKey(
                "EC2 key requires the x and y coordinates or the private key d".to_string(),
            ));
        }
        Ok(Self {
            common: KeyCommon::default(),
            crv,
            x,
            y,
            d,
        })
    }

    /// Registry factory for `kty` EC2.
    pub fn from_map(map: &CborMap) -> Result<CoseKey, CoseError> {
        validate::expect_kty(map, KeyType::Ec2)?;
        let mut key = Self::new(
            validate::curve(validate::param(map, EC2_CRV), KeyType::Ec2)?,
            validate::byte_string("x", validate::param(map, EC2_X))?,
            validate::byte_string("y", validate::param(map, EC2_Y))?,
            validate::byte_string("d", validate::param(map, EC2_D))?,
        )?;
        key.common = KeyCommon::from_map(map)?;
        Ok(CoseKey::Ec2(key))
    }

    pub fn crv(&self) -> Option<EllipticCurve> {
        self.crv
    }

    pub fn x(&self) -> Option<&[u8]> {
        self.x.as_deref()
    }

    pub fn y(&self) -> Option<&[u8]> {
        self.y.as_deref()
    }

    pub fn d(&self) -> Option<&[u8]> {
        self.d.as_deref()
    }

    pub(crate) fn write_map(&self, map: &mut CborMap) {
        if let Some(crv) = self.crv {
            map.insert(HeaderKey::Int(EC2_CRV), HeaderValue::Int(crv.id()));
        }
        for (label, value) in [(EC2_X, &self.x), (EC2_Y, &self.y), (EC2_D, &self.d)] {
            if let Some(v) = value {
                map.insert(HeaderKey::Int(label), HeaderValue::Bytes(v.clone()));
            }
        }
    }
}
