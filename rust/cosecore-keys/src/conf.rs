// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key configuration checks.
//!
//! Every operation that touches key material first resolves the requested
//! algorithm, curve and key operation against the key (and the peer key, for
//! key agreement). Resolution never mutates its inputs: it returns resolved
//! copies or the first conflict found.

use cosecore_abstractions::{CoseAlgorithm, CoseError, EllipticCurve, KeyField, KeyOps};

use crate::CoseKey;

/// The algorithm, key operation and curve an operation is about to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyConfig {
    pub algorithm: Option<CoseAlgorithm>,
    pub key_operation: Option<KeyOps>,
    pub curve: Option<EllipticCurve>,
}

impl KeyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: CoseAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn with_key_operation(mut self, key_operation: KeyOps) -> Self {
        self.key_operation = Some(key_operation);
        self
    }

    pub fn with_curve(mut self, curve: EllipticCurve) -> Self {
        self.curve = Some(curve);
        self
    }
}

/// Keys after configuration resolution.
///
/// `key` always has an algorithm, and a curve if its type carries one.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedKeys {
    pub key: CoseKey,
    pub peer: Option<CoseKey>,
}

impl ResolvedKeys {
    /// The resolved algorithm.
    pub fn algorithm(&self) -> Result<CoseAlgorithm, CoseError> {
        self.key.alg().ok_or_else(|| CoseError::missing_field(KeyField::Algorithm))
    }
}

/// Resolve `config` against `key` and, if given, `peer`.
pub fn resolve_key_conf(key: &CoseKey, peer: Option<&CoseKey>, config: &KeyConfig) -> Result<ResolvedKeys, CoseError> {
    let mut key = key.clone();
    let mut peer = peer.cloned();

    // Algorithm: always required.
    let alg = resolve(KeyField::Algorithm, key.alg(), config.algorithm)?
        .ok_or_else(|| CoseError::missing_field(KeyField::Algorithm))?;
    key.set_alg(alg)?;
    if let Some(peer) = peer.as_mut() {
        agree(KeyField::Algorithm, Some(alg), peer.alg())?;
        peer.set_alg(alg)?;
    }

    // Curve: only for key types that carry one.
    if key.has_curve() {
        let crv = resolve(KeyField::Curve, key.curve(), config.curve)?
            .ok_or_else(|| CoseError::missing_field(KeyField::Curve))?;
        if crv.key_type() != Some(key.kty()) {
            return Err(CoseError::conflict(
                KeyField::Curve,
                format!("curve {crv} cannot be used with a {} key", key.kty()),
            ));
        }
        key.set_curve(crv)?;
        if let Some(peer) = peer.as_mut().filter(|p| p.has_curve()) {
            agree(KeyField::Curve, Some(crv), peer.curve())?;
            peer.set_curve(crv)?;
        }
    }

    // Key operation: optional. A peer's operation fills in an unset one.
    let mut op = resolve(KeyField::KeyOperation, key.key_ops(), config.key_operation)?;
    if let Some(peer) = peer.as_mut() {
        op = agree(KeyField::KeyOperation, op, peer.key_ops())?;
        if let Some(op) = op {
            peer.set_key_ops(op)?;
        }
    }
    if let Some(op) = op {
        key.set_key_ops(op)?;
    }

    Ok(ResolvedKeys { key, peer })
}

fn resolve<T>(field: KeyField, current: Option<T>, requested: Option<T>) -> Result<Option<T>, CoseError>
where
    T: PartialEq + Copy + std::fmt::Display,
{
    match (current, requested) {
        (Some(c), Some(r)) if c != r => Err(CoseError::conflict(
            field,
            format!("key has {field} {c}, requested {r}"),
        )),
        (_, Some(r)) => Ok(Some(r)),
        (c, None) => Ok(c),
    }
}

fn agree<T>(field: KeyField, ours: Option<T>, theirs: Option<T>) -> Result<Option<T>, CoseError>
where
    T: PartialEq + Copy + std::fmt::Display,
{
    match (ours, theirs) {
        (Some(o), Some(t)) if o != t => Err(CoseError::conflict(
            field,
            format!("peer key has {field} {t}, expected {o}"),
        )),
        (Some(o), _) => Ok(Some(o)),
        (None, t) => Ok(t),
    }
}
