// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! `COSE_Signature` and `COSE_Countersignature` structures (RFC 8152 §4.1, §4.5).

use cosecore_abstractions::{
    decode_value_from_cbor, encode_value_to_cbor, CoseAlgorithm, CoseError, CoseHeaderMap, HeaderKey, HeaderValue,
};
use cosecore_keys::CoseKey;
use minicbor::Encoder;
use tracing::debug;

/// Label of the `alg` header parameter.
pub const HEADER_ALG: i64 = 1;

/// Context string of the `Sig_structure` a signature is computed over.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SignatureContext {
    Signature,
    CounterSignature,
}

impl SignatureContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "Signature",
            Self::CounterSignature => "CounterSignature",
        }
    }
}

/// One signer's headers and signature.
///
/// The key is borrowed: the structure never owns key material.
#[derive(Debug, Clone)]
pub struct CoseSignature<'k> {
    context: SignatureContext,
    pub protected: CoseHeaderMap,
    pub unprotected: CoseHeaderMap,
    /// Empty until computed.
    pub signature: Vec<u8>,
    pub external_aad: Vec<u8>,
    key: Option<&'k CoseKey>,
}

impl<'k> CoseSignature<'k> {
    pub fn new(protected: CoseHeaderMap, unprotected: CoseHeaderMap, key: Option<&'k CoseKey>) -> Self {
        Self {
            context: SignatureContext::Signature,
            protected,
            unprotected,
            signature: Vec::new(),
            external_aad: Vec::new(),
            key,
        }
    }

    /// A signature embedded as an attribute of another signed structure.
    pub fn new_counter_signature(
        protected: CoseHeaderMap,
        unprotected: CoseHeaderMap,
        key: Option<&'k CoseKey>,
    ) -> Self {
        Self::new(protected, unprotected, key).with_context(SignatureContext::CounterSignature)
    }

    /// Build from the decoded array `[protected, unprotected, signature?]`.
    ///
    /// A two-element array yields a structure that has not been signed yet.
    pub fn from_signature_obj(mut items: Vec<HeaderValue>) -> Result<Self, CoseError> {
        let signature = match items.len() {
            3 => match items.pop() {
                Some(HeaderValue::Bytes(sig)) => sig,
                _ => return Err(CoseError::MalformedStructure("signature must be a bstr".to_string())),
            },
            2 => Vec::new(),
            n => {
                return Err(CoseError::MalformedStructure(format!(
                    "signature array must have 2 or 3 elements, got {n}"
                )))
            }
        };

        let mut items = items.into_iter();
        let protected = match items.next() {
            Some(HeaderValue::Bytes(bytes)) => CoseHeaderMap::from_protected_bytes(&bytes)?,
            _ => return Err(CoseError::MalformedStructure("protected header must be a bstr".to_string())),
        };
        let unprotected = match items.next() {
            Some(HeaderValue::Map(map)) => CoseHeaderMap::from_map(map),
            _ => return Err(CoseError::MalformedStructure("unprotected header must be a map".to_string())),
        };

        let mut sig = Self::new(protected, unprotected, None);
        sig.signature = signature;
        Ok(sig)
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self, CoseError> {
        match decode_value_from_cbor(bytes)? {
            HeaderValue::Array(items) => Self::from_signature_obj(items),
            other => Err(CoseError::MalformedStructure(format!(
                "signature must be an array, got {}",
                other.type_name()
            ))),
        }
    }

    pub fn with_context(mut self, context: SignatureContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_key(mut self, key: &'k CoseKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn with_external_aad(mut self, external_aad: impl Into<Vec<u8>>) -> Self {
        self.external_aad = external_aad.into();
        self
    }

    pub fn context(&self) -> SignatureContext {
        self.context
    }

    pub fn key(&self) -> Option<&'k CoseKey> {
        self.key
    }

    /// The `alg` header: protected bucket first, then unprotected.
    ///
    /// Text-valued algorithms are not supported and are rejected rather than
    /// treated as absent.
    pub fn header_algorithm(&self) -> Result<Option<CoseAlgorithm>, CoseError> {
        let label = HeaderKey::Int(HEADER_ALG);
        let value = self
            .protected
            .map()
            .get(&label)
            .or_else(|| self.unprotected.map().get(&label));
        match value {
            None => Ok(None),
            Some(HeaderValue::Int(id)) => CoseAlgorithm::try_from(*id).map(Some),
            Some(other) => Err(CoseError::InvalidAlgorithm(format!(
                "alg header must be an int, got {}",
                other.type_name()
            ))),
        }
    }

    /// Sign `to_sign` with `key`. The structure is not modified.
    ///
    /// Without an explicit algorithm, the key's own `alg` is used.
    pub fn compute_signature(
        to_sign: &[u8],
        alg: Option<CoseAlgorithm>,
        key: &CoseKey,
    ) -> Result<Vec<u8>, CoseError> {
        if let Some(alg) = alg.filter(|a| !cosecore_crypto::is_signature_algorithm(*a)) {
            return Err(CoseError::UnsupportedSignature(alg.to_string()));
        }
        cosecore_crypto::sign_with_key(key, alg, to_sign)
    }

    /// `[protected, unprotected]` when `signature` is empty, else
    /// `[protected, unprotected, signature]`.
    pub fn encode(&self, signature: &[u8]) -> Result<Vec<HeaderValue>, CoseError> {
        let mut items = vec![
            HeaderValue::Bytes(self.protected.encode_protected()?),
            HeaderValue::Map(self.unprotected.encode_unprotected()),
        ];
        if !signature.is_empty() {
            items.push(HeaderValue::Bytes(signature.to_vec()));
        }
        Ok(items)
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>, CoseError> {
        encode_value_to_cbor(&HeaderValue::Array(self.encode(&self.signature)?))
    }

    /// CBOR `Sig_structure` over the body's protected header and the payload.
    pub fn sig_structure(&self, body_protected: &[u8], payload: &[u8]) -> Result<Vec<u8>, CoseError> {
        let sign_protected = self.protected.encode_protected()?;

        let mut out = Vec::new();
        let mut enc = Encoder::new(&mut out);
        enc.array(5)
            .and_then(|e| e.str(self.context.as_str()))
            .and_then(|e| e.bytes(body_protected))
            .and_then(|e| e.bytes(&sign_protected))
            .and_then(|e| e.bytes(&self.external_aad))
            .and_then(|e| e.bytes(payload))
            .map_err(|e| CoseError::Cbor(e.to_string()))?;
        Ok(out)
    }

    /// Compute and store the signature with the attached key.
    pub fn sign(&mut self, body_protected: &[u8], payload: &[u8]) -> Result<(), CoseError> {
        let key = self.require_key()?;
        let alg = self.header_algorithm()?;
        debug!(context = self.context.as_str(), alg = ?alg, "signing");
        let to_sign = self.sig_structure(body_protected, payload)?;
        self.signature = Self::compute_signature(&to_sign, alg, key)?;
        Ok(())
    }

    /// Verify the stored signature with the attached key.
    pub fn verify(&self, body_protected: &[u8], payload: &[u8]) -> Result<(), CoseError> {
        let key = self.require_key()?;
        let alg = self.header_algorithm()?;
        debug!(context = self.context.as_str(), alg = ?alg, "verifying");
        let to_sign = self.sig_structure(body_protected, payload)?;
        cosecore_crypto::verify_with_key(key, alg, &to_sign, &self.signature)
    }

    fn require_key(&self) -> Result<&'k CoseKey, CoseError> {
        self.key
            .ok_or_else(|| CoseError::MissingKeyParameter("no key attached to the signature".to_string()))
    }
}
