// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signature algorithms: ECDSA (ES256/ES384/ES512, raw `r || s`) and EdDSA
//! over Ed25519.

use cosecore_abstractions::{CoseAlgorithm, CoseError, EllipticCurve};
use cosecore_keys::CoseKey;
use signature::{Signer, Verifier};
use tracing::{debug, warn};

use crate::material;

/// Sign `to_sign` with the private key in `key`.
pub fn sign(alg: CoseAlgorithm, key: &CoseKey, to_sign: &[u8]) -> Result<Vec<u8>, CoseError> {
    let crv = signing_curve(alg, key)?;
    debug!(alg = %alg, crv = %crv, "sign");

    match crv {
        EllipticCurve::P256 => {
            let sk = p256::ecdsa::SigningKey::from_slice(ec2_d(key)?).map_err(|e| bad_key("P-256", e))?;
            let sig: p256::ecdsa::Signature = sk.try_sign(to_sign).map_err(sign_failed)?;
            Ok(sig.to_bytes().to_vec())
        }
        EllipticCurve::P384 => {
            let sk = p384::ecdsa::SigningKey::from_slice(ec2_d(key)?).map_err(|e| bad_key("P-384", e))?;
            let sig: p384::ecdsa::Signature = sk.try_sign(to_sign).map_err(sign_failed)?;
            Ok(sig.to_bytes().to_vec())
        }
        EllipticCurve::P521 => {
            let sk = p521::ecdsa::SigningKey::from_slice(ec2_d(key)?).map_err(|e| bad_key("P-521", e))?;
            let sig: p521::ecdsa::Signature = sk.try_sign(to_sign).map_err(sign_failed)?;
            Ok(sig.to_bytes().to_vec())
        }
        EllipticCurve::Ed25519 => {
            let d = material::required("private key d", material::okp(key)?.d())?;
            let sk = ed25519_dalek::SigningKey::from_bytes(&material::fixed::<32>("Ed25519 private key", d)?);
            let sig = sk.try_sign(to_sign).map_err(sign_failed)?;
            Ok(sig.to_bytes().to_vec())
        }
        other => Err(CoseError::UnsupportedSignature(format!("{alg} over {other}"))),
    }
}

/// Verify `signature` over `to_sign` with the public key in `key`. EC2 keys
/// without coordinates are verified with the public key derived from `d`.
pub fn verify(alg: CoseAlgorithm, key: &CoseKey, to_sign: &[u8], signature: &[u8]) -> Result<(), CoseError> {
    let crv = signing_curve(alg, key)?;
    debug!(alg = %alg, crv = %crv, "verify");

    let verified = match crv {
        EllipticCurve::P256 => {
            let vk = match ec2_point(key)? {
                Some(point) => p256::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|e| bad_key("P-256", e))?,
                None => {
                    let sk = p256::ecdsa::SigningKey::from_slice(ec2_d(key)?).map_err(|e| bad_key("P-256", e))?;
                    p256::ecdsa::VerifyingKey::from(&sk)
                }
            };
            p256::ecdsa::Signature::from_slice(signature)
                .map(|sig| vk.verify(to_sign, &sig).is_ok())
                .unwrap_or(false)
        }
        EllipticCurve::P384 => {
            let vk = match ec2_point(key)? {
                Some(point) => p384::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|e| bad_key("P-384", e))?,
                None => {
                    let sk = p384::ecdsa::SigningKey::from_slice(ec2_d(key)?).map_err(|e| bad_key("P-384", e))?;
                    p384::ecdsa::VerifyingKey::from(&sk)
                }
            };
            p384::ecdsa::Signature::from_slice(signature)
                .map(|sig| vk.verify(to_sign, &sig).is_ok())
                .unwrap_or(false)
        }
        EllipticCurve::P521 => {
            let vk = match ec2_point(key)? {
                Some(point) => p521::ecdsa::VerifyingKey::from_sec1_bytes(&point).map_err(|e| bad_key("P-521", e))?,
                None => {
                    let sk = p521::ecdsa::SigningKey::from_slice(ec2_d(key)?).map_err(|e| bad_key("P-521", e))?;
                    p521::ecdsa::VerifyingKey::from(&sk)
                }
            };
            p521::ecdsa::Signature::from_slice(signature)
                .map(|sig| vk.verify(to_sign, &sig).is_ok())
                .unwrap_or(false)
        }
        EllipticCurve::Ed25519 => {
            let okp = material::okp(key)?;
            let vk = match okp.x() {
                Some(x) => ed25519_dalek::VerifyingKey::from_bytes(&material::fixed::<32>("Ed25519 public key", x)?)
                    .map_err(|e| bad_key("Ed25519", e))?,
                None => {
                    let d = material::required("public key x or private key d", okp.d())?;
                    ed25519_dalek::SigningKey::from_bytes(&material::fixed::<32>("Ed25519 private key", d)?)
                        .verifying_key()
                }
            };
            ed25519_dalek::Signature::from_slice(signature)
                .map(|sig| vk.verify(to_sign, &sig).is_ok())
                .unwrap_or(false)
        }
        other => return Err(CoseError::UnsupportedSignature(format!("{alg} over {other}"))),
    };

    if verified {
        Ok(())
    } else {
        warn!(alg = %alg, "signature verification failed");
        Err(CoseError::SignatureVerificationFailed)
    }
}

/// The curve to sign on: fixed by ECDSA algorithms, taken from the key for EdDSA.
fn signing_curve(alg: CoseAlgorithm, key: &CoseKey) -> Result<EllipticCurve, CoseError> {
    match alg {
        CoseAlgorithm::Es256 | CoseAlgorithm::Es384 | CoseAlgorithm::Es512 => {
            let expected = alg
                .signature_curve()
                .ok_or_else(|| CoseError::UnsupportedSignature(alg.to_string()))?;
            match key.curve() {
                Some(crv) if crv != expected => Err(CoseError::InvalidKeyParameter(format!(
                    "{alg} requires a {expected} key, got {crv}"
                ))),
                _ => Ok(expected),
            }
        }
        CoseAlgorithm::EdDsa => material::curve(key),
        other => Err(CoseError::UnsupportedSignature(other.to_string())),
    }
}

fn ec2_d(key: &CoseKey) -> Result<&[u8], CoseError> {
    material::required("private key d", material::ec2(key)?.d())
}

fn ec2_point(key: &CoseKey) -> Result<Option<Vec<u8>>, CoseError> {
    let ec2 = material::ec2(key)?;
    if ec2.x().is_some() && ec2.y().is_some() {
        material::sec1_point(ec2).map(Some)
    } else {
        Ok(None)
    }
}

fn bad_key(curve: &str, e: impl std::fmt::Display) -> CoseError {
    CoseError::InvalidKeyParameter(format!("bad {curve} key: {e}"))
}

fn sign_failed(e: signature::Error) -> CoseError {
    CoseError::UnsupportedSignature(format!("signing failed: {e}"))
}
