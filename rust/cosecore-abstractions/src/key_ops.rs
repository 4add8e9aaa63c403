// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;

use crate::CoseError;

/// COSE key operations (RFC 8152, Table 4).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(i64)]
pub enum KeyOps {
    Sign = 1,
    Verify = 2,
    Encrypt = 3,
    Decrypt = 4,
    Wrap = 5,
    Unwrap = 6,
    DeriveKey = 7,
    DeriveBits = 8,
    MacCreate = 9,
    MacVerify = 10,
}

impl KeyOps {
    pub fn id(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sign => "sign",
            Self::Verify => "verify",
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
            Self::Wrap => "wrap key",
            Self::Unwrap => "unwrap key",
            Self::DeriveKey => "derive key",
            Self::DeriveBits => "derive bits",
            Self::MacCreate => "MAC create",
            Self::MacVerify => "MAC verify",
        }
    }
}

impl TryFrom<i64> for KeyOps {
    type Error = CoseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Sign),
            2 => Ok(Self::Verify),
            3 => Ok(Self::Encrypt),
            4 => Ok(Self::Decrypt),
            5 => Ok(Self::Wrap),
            6 => Ok(Self::Unwrap),
            7 => Ok(Self::DeriveKey),
            8 => Ok(Self::DeriveBits),
            9 => Ok(Self::MacCreate),
            10 => Ok(Self::MacVerify),
            other => Err(CoseError::InvalidKeyOperation(format!("unknown COSE key operation: {other}"))),
        }
    }
}

impl fmt::Display for KeyOps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
