// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::BTreeMap;
use std::fmt;

use cosecore_abstractions::{
    decode_map_from_cbor, encode_map_to_cbor, CborMap, CoseAlgorithm, CoseError, EllipticCurve, HeaderKey,
    HeaderValue, KeyField, KeyOps, KeyParameter, KeyType,
};

use crate::conf::{resolve_key_conf, KeyConfig, ResolvedKeys};
use crate::{base64url_encode, validate, Ec2Key, KeyCommon, KeyTypeRegistry, OkpKey, RegisteredKey, SymmetricKey};

/// A COSE key of any supported type.
///
/// The set of variants is closed so dispatch on key material can be matched
/// exhaustively. Key types added at runtime decode into [`CoseKey::Registered`].
#[derive(Debug, Clone, PartialEq)]
pub enum CoseKey {
    Okp(OkpKey),
    Ec2(Ec2Key),
    Symmetric(SymmetricKey),
    Registered(RegisteredKey),
}

impl CoseKey {
    /// Decode a `COSE_Key` map using the process-wide registry.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CoseError> {
        KeyTypeRegistry::global().decode(&decode_map_from_cbor(bytes)?)
    }

    /// Decode an already-parsed key map using the process-wide registry.
    pub fn from_map(map: &CborMap) -> Result<Self, CoseError> {
        KeyTypeRegistry::global().decode(map)
    }

    pub fn kty(&self) -> KeyType {
        match self {
            Self::Okp(_) => KeyType::Okp,
            Self::Ec2(_) => KeyType::Ec2,
            Self::Symmetric(_) => KeyType::Symmetric,
            Self::Registered(k) => k.kty(),
        }
    }

    pub fn common(&self) -> &KeyCommon {
        match self {
            Self::Okp(k) => &k.common,
            Self::Ec2(k) => &k.common,
            Self::Symmetric(k) => &k.common,
            Self::Registered(k) => &k.common,
        }
    }

    pub fn common_mut(&mut self) -> &mut KeyCommon {
        match self {
            Self::Okp(k) => &mut k.common,
            Self::Ec2(k) => &mut k.common,
            Self::Symmetric(k) => &mut k.common,
            Self::Registered(k) => &mut k.common,
        }
    }

    pub fn kid(&self) -> Option<&[u8]> {
        self.common().kid()
    }

    pub fn alg(&self) -> Option<CoseAlgorithm> {
        self.common().alg()
    }

    pub fn key_ops(&self) -> Option<KeyOps> {
        self.common().key_ops()
    }

    pub fn base_iv(&self) -> Option<&[u8]> {
        self.common().base_iv()
    }

    /// Whether this key type carries a curve attribute at all.
    pub fn has_curve(&self) -> bool {
        matches!(self, Self::Okp(_) | Self::Ec2(_))
    }

    pub fn curve(&self) -> Option<EllipticCurve> {
        match self {
            Self::Okp(k) => k.crv,
            Self::Ec2(k) => k.crv,
            _ => None,
        }
    }

    pub fn set_alg(&mut self, alg: CoseAlgorithm) -> Result<(), CoseError> {
        self.common_mut().set_alg(alg)
    }

    pub fn set_key_ops(&mut self, op: KeyOps) -> Result<(), CoseError> {
        self.common_mut().set_key_ops(op)
    }

    /// Assign the curve. Fails on key types without a curve, on curves from
    /// the other key family, and on a curve that contradicts the current one.
    pub fn set_curve(&mut self, crv: EllipticCurve) -> Result<(), CoseError> {
        let kty = self.kty();
        let slot = match self {
            Self::Okp(k) => &mut k.crv,
            Self::Ec2(k) => &mut k.crv,
            _ => {
                return Err(CoseError::InvalidKeyParameter(format!("{kty} keys do not have a curve")));
            }
        };
        validate::curve_in_family(crv, kty)?;
        match *slot {
            Some(current) if current != crv => Err(CoseError::conflict(
                KeyField::Curve,
                format!("COSE key curve {current} does not match {crv}"),
            )),
            _ => {
                *slot = Some(crv);
                Ok(())
            }
        }
    }

    pub fn with_kid(mut self, kid: impl Into<Vec<u8>>) -> Self {
        self.common_mut().set_kid(Some(kid.into()));
        self
    }

    pub fn with_base_iv(mut self, base_iv: impl Into<Vec<u8>>) -> Self {
        self.common_mut().set_base_iv(Some(base_iv.into()));
        self
    }

    /// Construction-time assignment; use [`CoseKey::set_alg`] on a key whose
    /// `alg` may already be set.
    pub fn with_alg(mut self, alg: CoseAlgorithm) -> Result<Self, CoseError> {
        self.set_alg(alg)?;
        Ok(self)
    }

    pub fn with_key_ops(mut self, op: KeyOps) -> Result<Self, CoseError> {
        self.set_key_ops(op)?;
        Ok(self)
    }

    /// Check the key (and optional peer key) against the requested algorithm,
    /// operation and curve, completing unset fields.
    ///
    /// Neither key is modified; the resolved copies are returned.
    pub fn check_key_conf(
        &self,
        algorithm: Option<CoseAlgorithm>,
        key_operation: Option<KeyOps>,
        peer_key: Option<&CoseKey>,
        curve: Option<EllipticCurve>,
    ) -> Result<ResolvedKeys, CoseError> {
        let config = KeyConfig {
            algorithm,
            key_operation,
            curve,
        };
        resolve_key_conf(self, peer_key, &config)
    }

    /// Map of the requested common parameters, keyed by label.
    ///
    /// `kty` is always present. Names are matched without regard to case;
    /// names that are not common parameters, and parameters the key does not
    /// carry, are skipped.
    pub fn encode(&self, fields: &[&str]) -> BTreeMap<i64, HeaderValue> {
        let mut out = BTreeMap::new();
        out.insert(KeyParameter::Kty.label(), HeaderValue::Int(self.kty().id()));
        for param in fields.iter().filter_map(|name| KeyParameter::from_name(name)) {
            if let Some(value) = self.common().value(param) {
                out.insert(param.label(), value);
            }
        }
        out
    }

    /// Every parameter of the key, common and type-specific.
    pub fn to_map(&self) -> CborMap {
        let mut map = CborMap::new();
        map.insert(HeaderKey::Int(KeyParameter::Kty.label()), HeaderValue::Int(self.kty().id()));
        self.common().write_map(&mut map);
        match self {
            Self::Okp(k) => k.write_map(&mut map),
            Self::Ec2(k) => k.write_map(&mut map),
            Self::Symmetric(k) => k.write_map(&mut map),
            Self::Registered(k) => k.write_map(&mut map),
        }
        map
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, CoseError> {
        encode_map_to_cbor(&self.to_map())
    }
}

impl From<OkpKey> for CoseKey {
    fn from(key: OkpKey) -> Self {
        Self::Okp(key)
    }
}

impl From<Ec2Key> for CoseKey {
    fn from(key: Ec2Key) -> Self {
        Self::Ec2(key)
    }
}

impl From<SymmetricKey> for CoseKey {
    fn from(key: SymmetricKey) -> Self {
        Self::Symmetric(key)
    }
}

impl From<RegisteredKey> for CoseKey {
    fn from(key: RegisteredKey) -> Self {
        Self::Registered(key)
    }
}

impl fmt::Display for CoseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<COSE_Key(kty={}", self.kty())?;
        if let Some(kid) = self.kid() {
            write!(f, ", kid={}", base64url_encode(kid))?;
        }
        if let Some(alg) = self.alg() {
            write!(f, ", alg={alg}")?;
        }
        if let Some(crv) = self.curve() {
            write!(f, ", crv={crv}")?;
        }
        if let Some(op) = self.key_ops() {
            write!(f, ", key_ops={op}")?;
        }
        f.write_str(")>")
    }
}
