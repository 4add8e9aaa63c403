// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Labels of the key parameters common to every COSE key type (RFC 8152, Table 3).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i64)]
pub enum KeyParameter {
    Kty = 1,
    Kid = 2,
    Alg = 3,
    KeyOps = 4,
    BaseIv = 5,
}

impl KeyParameter {
    pub const ALL: [KeyParameter; 5] = [Self::Kty, Self::Kid, Self::Alg, Self::KeyOps, Self::BaseIv];

    pub fn label(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Kty => "kty",
            Self::Kid => "kid",
            Self::Alg => "alg",
            Self::KeyOps => "key_ops",
            Self::BaseIv => "base_iv",
        }
    }

    /// Look up a parameter by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

/// Key fields resolved by key configuration checks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum KeyField {
    Algorithm,
    Curve,
    KeyOperation,
}

impl std::fmt::Display for KeyField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Algorithm => f.write_str("algorithm"),
            Self::Curve => f.write_str("curve"),
            Self::KeyOperation => f.write_str("key operation"),
        }
    }
}
