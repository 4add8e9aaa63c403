// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::CoseError;

/// COSE key types (IANA COSE Key Types registry).
///
/// `Registered` carries an identifier that is not assigned by IANA but has been
/// added to a key-type registry at runtime. `TryFrom<i64>` never produces it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyType {
    Reserved,
    Okp,
    Ec2,
    Rsa,
    Symmetric,
    HssLms,
    WalnutDsa,
    Registered(i64),
}

impl KeyType {
    pub fn id(self) -> i64 {
        match self {
            Self::Reserved => 0,
            Self::Okp => 1,
            Self::Ec2 => 2,
            Self::Rsa => 3,
            Self::Symmetric => 4,
            Self::HssLms => 5,
            Self::WalnutDsa => 6,
            Self::Registered(id) => id,
        }
    }
}

impl TryFrom<i64> for KeyType {
    type Error = CoseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Reserved),
            1 => Ok(Self::Okp),
            2 => Ok(Self::Ec2),
            3 => Ok(Self::Rsa),
            4 => Ok(Self::Symmetric),
            5 => Ok(Self::HssLms),
            6 => Ok(Self::WalnutDsa),
            other => Err(CoseError::InvalidKeyType(format!("unknown COSE key type: {other}"))),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reserved => f.write_str("Reserved"),
            Self::Okp => f.write_str("OKP"),
            Self::Ec2 => f.write_str("EC2"),
            Self::Rsa => f.write_str("RSA"),
            Self::Symmetric => f.write_str("Symmetric"),
            Self::HssLms => f.write_str("HSS-LMS"),
            Self::WalnutDsa => f.write_str("WalnutDSA"),
            Self::Registered(id) => write!(f, "kty({id})"),
        }
    }
}
