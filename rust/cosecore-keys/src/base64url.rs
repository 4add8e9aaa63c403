// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use cosecore_abstractions::CoseError;

/// URL-safe base64 without padding.
pub fn base64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode URL-safe base64, with or without padding.
pub fn base64url_decode(text: &str) -> Result<Vec<u8>, CoseError> {
    let mut s: String = text
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            c => c,
        })
        .collect();
    match s.len() % 4 {
        0 => {}
        2 => s.push_str("=="),
        3 => s.push('='),
        _ => {
            return Err(CoseError::InvalidBase64(format!(
                "illegal base64url string length {}",
                text.len()
            )))
        }
    }
    STANDARD
        .decode(s.as_bytes())
        .map_err(|e| CoseError::InvalidBase64(e.to_string()))
}
