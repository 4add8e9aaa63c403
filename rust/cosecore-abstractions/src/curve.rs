// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::{CoseError, KeyType};

/// COSE elliptic curves (IANA COSE Elliptic Curves registry).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum EllipticCurve {
    Reserved = 0,
    P256 = 1,
    P384 = 2,
    P521 = 3,
    X25519 = 4,
    X448 = 5,
    Ed25519 = 6,
    Ed448 = 7,
    Secp256k1 = 8,
}

impl EllipticCurve {
    pub fn id(self) -> i64 {
        self as i64
    }

    /// The key type a curve is used with: EC2 for Weierstrass curves, OKP for
    /// the octet key pair curves. `Reserved` belongs to neither.
    pub fn key_type(self) -> Option<KeyType> {
        match self {
            Self::P256 | Self::P384 | Self::P521 | Self::Secp256k1 => Some(KeyType::Ec2),
            Self::X25519 | Self::X448 | Self::Ed25519 | Self::Ed448 => Some(KeyType::Okp),
            Self::Reserved => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Reserved => "Reserved",
            Self::P256 => "P-256",
            Self::P384 => "P-384",
            Self::P521 => "P-521",
            Self::X25519 => "X25519",
            Self::X448 => "X448",
            Self::Ed25519 => "Ed25519",
            Self::Ed448 => "Ed448",
            Self::Secp256k1 => "secp256k1",
        }
    }
}

impl TryFrom<i64> for EllipticCurve {
    type Error = CoseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Reserved),
            1 => Ok(Self::P256),
            2 => Ok(Self::P384),
            3 => Ok(Self::P521),
            4 => Ok(Self::X25519),
            5 => Ok(Self::X448),
            6 => Ok(Self::Ed25519),
            7 => Ok(Self::Ed448),
            8 => Ok(Self::Secp256k1),
            other => Err(CoseError::InvalidKeyParameter(format!("unknown COSE elliptic curve: {other}"))),
        }
    }
}

impl fmt::Display for EllipticCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
