// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key-type registry: decode dispatch from `kty` to a key factory.
//!
//! The built-in key types are listed explicitly in [`KeyTypeRegistry::builtin`].
//! Additional key types can be registered at link time with `inventory::submit!`:
//!
//! ```ignore
//! inventory::submit! {
//!     KeyTypeRegistration { kty: -70000, name: "example", factory: RegisteredKey::from_map }
//! }
//! ```
//!
//! or on a private registry with [`KeyTypeRegistry::register`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use cosecore_abstractions::{CborMap, CoseError, HeaderValue, KeyParameter, KeyType};
use tracing::{debug, warn};

use crate::{validate, CoseKey, Ec2Key, OkpKey, SymmetricKey};

/// Builds a concrete key from a received key map.
pub type KeyFactory = fn(&CborMap) -> Result<CoseKey, CoseError>;

pub struct KeyTypeRegistration {
    pub kty: i64,
    pub name: &'static str,
    pub factory: KeyFactory,
}

inventory::collect!(KeyTypeRegistration);

#[derive(Clone, Copy)]
struct Entry {
    name: &'static str,
    factory: KeyFactory,
}

/// Mapping from key type identifier to factory.
///
/// Populate a registry before decoding with it; the process-wide instance
/// returned by [`KeyTypeRegistry::global`] is read-only once built.
#[derive(Clone, Default)]
pub struct KeyTypeRegistry {
    entries: BTreeMap<i64, Entry>,
}

const BUILTIN: [(KeyType, &str, KeyFactory); 3] = [
    (KeyType::Okp, "OKP", OkpKey::from_map),
    (KeyType::Ec2, "EC2", Ec2Key::from_map),
    (KeyType::Symmetric, "Symmetric", SymmetricKey::from_map),
];

impl KeyTypeRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry holding the OKP, EC2 and Symmetric key types.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (kty, name, factory) in BUILTIN {
            registry.entries.insert(kty.id(), Entry { name, factory });
        }
        registry
    }

    /// The built-in key types plus every `inventory` registration linked into
    /// the process. A registration that collides with an existing entry is
    /// skipped.
    pub fn with_extensions() -> Self {
        let mut registry = Self::builtin();
        for reg in inventory::iter::<KeyTypeRegistration> {
            if let Err(e) = registry.register(reg.kty, reg.name, reg.factory) {
                warn!(kty = reg.kty, name = reg.name, error = %e, "skipping key type registration");
            }
        }
        registry
    }

    /// The process-wide registry used by [`CoseKey::from_cbor`].
    pub fn global() -> &'static KeyTypeRegistry {
        static GLOBAL: OnceLock<KeyTypeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::with_extensions)
    }

    /// Add a key type. Registering the same identifier again with the same
    /// name and factory is a no-op; any other registration for a taken
    /// identifier fails.
    pub fn register(&mut self, kty: i64, name: &'static str, factory: KeyFactory) -> Result<(), CoseError> {
        if let Some(existing) = self.entries.get(&kty) {
            if existing.name == name && same_factory(existing.factory, factory) {
                return Ok(());
            }
            return Err(CoseError::KeyTypeAlreadyRegistered(kty));
        }
        debug!(kty, name, "registered key type");
        self.entries.insert(kty, Entry { name, factory });
        Ok(())
    }

    pub fn is_registered(&self, kty: i64) -> bool {
        self.entries.contains_key(&kty)
    }

    /// The key type for a registered identifier.
    pub fn key_type(&self, kty: i64) -> Option<KeyType> {
        self.is_registered(kty)
            .then(|| KeyType::try_from(kty).unwrap_or(KeyType::Registered(kty)))
    }

    /// Registered identifiers and names, ordered by identifier.
    pub fn registered(&self) -> impl Iterator<Item = (i64, &'static str)> + '_ {
        self.entries.iter().map(|(kty, e)| (*kty, e.name))
    }

    /// Decode a received key map into the key variant registered for its `kty`.
    pub fn decode(&self, map: &CborMap) -> Result<CoseKey, CoseError> {
        let kty = match validate::param(map, KeyParameter::Kty.label()) {
            Some(HeaderValue::Int(id)) => *id,
            Some(other) => {
                return Err(CoseError::KeyTypeUnknown(format!(
                    "kty must be an int, got {}",
                    other.type_name()
                )))
            }
            None => return Err(CoseError::KeyTypeUnknown("key map has no kty".to_string())),
        };
        let entry = self
            .entries
            .get(&kty)
            .ok_or_else(|| CoseError::KeyTypeUnknown(format!("no key type registered for kty {kty}")))?;
        debug!(kty, name = entry.name, "decoding COSE key");
        (entry.factory)(map)
    }
}

fn same_factory(a: KeyFactory, b: KeyFactory) -> bool {
    a as usize == b as usize
}

impl std::fmt::Debug for KeyTypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.registered()).finish()
    }
}
