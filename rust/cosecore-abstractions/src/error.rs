// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error taxonomy shared by every `cosecore` crate.
//!
//! All operations are deterministic, so callers should treat every variant as
//! fatal to the current operation; retrying with the same inputs reproduces it.

use crate::KeyField;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CoseError {
    #[error("unsupported content encryption algorithm: {0}")]
    UnsupportedEncryption(String),

    #[error("unsupported MAC algorithm: {0}")]
    UnsupportedMac(String),

    #[error("unsupported key wrap algorithm: {0}")]
    UnsupportedKeyWrap(String),

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedSignature(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("the authentication tags do not match")]
    InvalidTag,

    #[error("signature verification failed")]
    SignatureVerificationFailed,

    #[error("invalid key type: {0}")]
    InvalidKeyType(String),

    #[error("invalid algorithm: {0}")]
    InvalidAlgorithm(String),

    #[error("invalid key operation: {0}")]
    InvalidKeyOperation(String),

    #[error("invalid key parameter: {0}")]
    InvalidKeyParameter(String),

    #[error("key type is not recognized: {0}")]
    KeyTypeUnknown(String),

    #[error("key type {0} is already registered with a different factory")]
    KeyTypeAlreadyRegistered(i64),

    #[error("malformed key: {0}")]
    MalformedKey(String),

    #[error("key configuration conflict on {field}: {message}")]
    KeyConfigurationConflict { field: KeyField, message: String },

    #[error("missing key parameter: {0}")]
    MissingKeyParameter(String),

    #[error("key agreement failed: {0}")]
    KeyAgreementFailed(String),

    #[error("invalid base64url input: {0}")]
    InvalidBase64(String),

    #[error("malformed COSE structure: {0}")]
    MalformedStructure(String),

    #[error("CBOR error: {0}")]
    Cbor(String),
}

impl CoseError {
    pub fn conflict(field: KeyField, message: impl Into<String>) -> Self {
        Self::KeyConfigurationConflict {
            field,
            message: message.into(),
        }
    }

    /// A required key field was still unset after configuration resolution.
    pub fn missing_field(field: KeyField) -> Self {
        Self::MissingKeyParameter(format!("selected {field} cannot be empty"))
    }
}
