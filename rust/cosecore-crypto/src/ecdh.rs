// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key agreement: ECDH over P-256/P-384/P-521 and X25519, followed by
//! HKDF-SHA-256 with an empty salt.

use cosecore_abstractions::{CoseError, EllipticCurve};
use cosecore_keys::CoseKey;
use hkdf::Hkdf;
use sha2::Sha256;
use tracing::debug;
use zeroize::Zeroizing;

use crate::material;

/// Result of a key agreement.
///
/// The raw shared secret is kept alongside the derived key because some
/// recipient algorithms feed it to their own KDF.
#[derive(Clone)]
pub struct EcdhOutput {
    pub shared_secret: Zeroizing<Vec<u8>>,
    pub derived_key: Zeroizing<Vec<u8>>,
}

impl std::fmt::Debug for EcdhOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdhOutput")
            .field("shared_secret_len", &self.shared_secret.len())
            .field("derived_key_len", &self.derived_key.len())
            .finish()
    }
}

/// HKDF-SHA-256 extract-and-expand with no salt.
pub fn hkdf_sha256(ikm: &[u8], length: usize, info: &[u8]) -> Result<Vec<u8>, CoseError> {
    let mut okm = vec![0u8; length];
    Hkdf::<Sha256>::new(None, ikm)
        .expand(info, &mut okm)
        .map_err(|_| CoseError::InvalidKeyParameter(format!("HKDF-SHA-256 cannot produce {length} bytes")))?;
    Ok(okm)
}

/// Agree on a shared secret between `private_key` and `public_key`, then
/// derive `length` bytes from it with `context` as HKDF info.
pub fn ecdh_derive(
    private_key: &CoseKey,
    public_key: &CoseKey,
    length: usize,
    context: &[u8],
) -> Result<EcdhOutput, CoseError> {
    let crv = material::curve(private_key)?;
    let peer_crv = material::curve(public_key)?;
    if crv != peer_crv {
        return Err(CoseError::KeyAgreementFailed(format!(
            "keys are on different curves: {crv} and {peer_crv}"
        )));
    }
    debug!(crv = %crv, "ecdh");

    let shared_secret = Zeroizing::new(shared_secret(crv, private_key, public_key)?);
    let derived_key = Zeroizing::new(hkdf_sha256(&shared_secret, length, context)?);
    Ok(EcdhOutput {
        shared_secret,
        derived_key,
    })
}

fn shared_secret(crv: EllipticCurve, private_key: &CoseKey, public_key: &CoseKey) -> Result<Vec<u8>, CoseError> {
    match crv {
        EllipticCurve::P256 => {
            let (d, point) = ec2_inputs(private_key, public_key)?;
            let secret = p256::SecretKey::from_slice(d).map_err(|e| invalid("P-256 private key", e))?;
            let public = p256::PublicKey::from_sec1_bytes(&point).map_err(|e| invalid("P-256 public key", e))?;
            let shared = p256::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
            Ok(shared.raw_secret_bytes().to_vec())
        }
        EllipticCurve::P384 => {
            let (d, point) = ec2_inputs(private_key, public_key)?;
            let secret = p384::SecretKey::from_slice(d).map_err(|e| invalid("P-384 private key", e))?;
            let public = p384::PublicKey::from_sec1_bytes(&point).map_err(|e| invalid("P-384 public key", e))?;
            let shared = p384::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
            Ok(shared.raw_secret_bytes().to_vec())
        }
        EllipticCurve::P521 => {
            let (d, point) = ec2_inputs(private_key, public_key)?;
            let secret = p521::SecretKey::from_slice(d).map_err(|e| invalid("P-521 private key", e))?;
            let public = p521::PublicKey::from_sec1_bytes(&point).map_err(|e| invalid("P-521 public key", e))?;
            let shared = p521::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
            Ok(shared.raw_secret_bytes().to_vec())
        }
        EllipticCurve::X25519 => {
            let d = material::required("private key d", material::okp(private_key)?.d())?;
            let x = material::required("public key x", material::okp(public_key)?.x())?;
            let secret = x25519_dalek::StaticSecret::from(material::fixed::<32>("X25519 private key", d)?);
            let public = x25519_dalek::PublicKey::from(material::fixed::<32>("X25519 public key", x)?);
            let shared = secret.diffie_hellman(&public);
            if !shared.was_contributory() {
                return Err(CoseError::KeyAgreementFailed("X25519 peer key is a low-order point".to_string()));
            }
            Ok(shared.as_bytes().to_vec())
        }
        other => Err(CoseError::KeyAgreementFailed(format!("key agreement over {other} is not supported"))),
    }
}

fn ec2_inputs<'a>(private_key: &'a CoseKey, public_key: &CoseKey) -> Result<(&'a [u8], Vec<u8>), CoseError> {
    let d = material::required("private key d", material::ec2(private_key)?.d())?;
    let point = material::sec1_point(material::ec2(public_key)?)?;
    Ok((d, point))
}

fn invalid(what: &str, e: impl std::fmt::Display) -> CoseError {
    CoseError::KeyAgreementFailed(format!("invalid {what}: {e}"))
}
