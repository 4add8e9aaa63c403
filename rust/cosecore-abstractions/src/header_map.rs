// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE header map model and CBOR codec.
//!
//! COSE header parameters live in two header maps:
//! - Protected headers: encoded as a CBOR bstr containing a CBOR map
//! - Unprotected headers: encoded as an inline CBOR map
//!
//! COSE keys use the same map shape (integer or text labels), so the key model
//! decodes received keys through this module as well.
//!
//! The codec only supports the CBOR types COSE headers and keys need and rejects
//! indefinite-length arrays/maps.

use std::collections::BTreeMap;

use minicbor::data::Type;
use minicbor::{Decoder, Encoder};

use crate::CoseError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum HeaderKey {
    Int(i64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Int(i64),
    Bytes(Vec<u8>),
    Text(String),
    Array(Vec<HeaderValue>),
    Map(BTreeMap<HeaderKey, HeaderValue>),
    Bool(bool),
    Null,
}

/// A decoded CBOR map with integer or text labels.
pub type CborMap = BTreeMap<HeaderKey, HeaderValue>;

impl HeaderValue {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    /// Short type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Bytes(_) => "bstr",
            Self::Text(_) => "tstr",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Bool(_) => "bool",
            Self::Null => "null",
        }
    }
}

impl From<i64> for HeaderKey {
    fn from(label: i64) -> Self {
        Self::Int(label)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CoseHeaderMap {
    encoded_map_cbor: Vec<u8>,
    map: CborMap,
}

impl CoseHeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a header map from values; the encoded form is produced on demand.
    pub fn from_map(map: CborMap) -> Self {
        Self {
            encoded_map_cbor: Vec::new(),
            map,
        }
    }

    /// Decode a protected header from the contents of its bstr, keeping the
    /// original bytes so signatures over them stay verifiable.
    pub fn from_protected_bytes(bytes: &[u8]) -> Result<Self, CoseError> {
        let map = decode_map_from_cbor(bytes)?;
        Ok(Self {
            encoded_map_cbor: bytes.to_vec(),
            map,
        })
    }

    pub fn clear(&mut self) {
        self.encoded_map_cbor.clear();
        self.map.clear();
    }

    pub fn insert(&mut self, key: impl Into<HeaderKey>, value: HeaderValue) {
        // Any edit invalidates the bytes we were decoded from.
        self.encoded_map_cbor.clear();
        self.map.insert(key.into(), value);
    }

    pub fn get_i64(&self, key: i64) -> Option<i64> {
        self.map.get(&HeaderKey::Int(key)).and_then(HeaderValue::as_i64)
    }

    pub fn get_bytes(&self, key: i64) -> Option<&[u8]> {
        self.map.get(&HeaderKey::Int(key)).and_then(HeaderValue::as_bytes)
    }

    pub fn get_array(&self, key: i64) -> Option<&[HeaderValue]> {
        self.map.get(&HeaderKey::Int(key)).and_then(|v| match v {
            HeaderValue::Array(a) => Some(a.as_slice()),
            _ => None,
        })
    }

    pub fn map(&self) -> &CborMap {
        &self.map
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Encoded form of a protected header: the original bytes when decoded from
    /// the wire, otherwise a fresh encoding. An empty map is the empty bstr.
    pub fn encode_protected(&self) -> Result<Vec<u8>, CoseError> {
        if !self.encoded_map_cbor.is_empty() {
            return Ok(self.encoded_map_cbor.clone());
        }
        if self.map.is_empty() {
            return Ok(Vec::new());
        }
        encode_map_to_cbor(&self.map)
    }

    /// An unprotected header travels as an inline map.
    pub fn encode_unprotected(&self) -> CborMap {
        self.map.clone()
    }
}

/// Deepest array/map nesting accepted from received bytes.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Decode a CBOR map from its encoded bytes. Empty input is an empty map.
pub fn decode_map_from_cbor(bytes: &[u8]) -> Result<CborMap, CoseError> {
    if bytes.is_empty() {
        return Ok(BTreeMap::new());
    }
    let mut dec = Decoder::new(bytes);
    let map = read_map(&mut dec, 0)?;
    finish(&dec, bytes, "map")?;
    Ok(map)
}

/// Decode a single CBOR item from its encoded bytes, rejecting trailing data.
pub fn decode_value_from_cbor(bytes: &[u8]) -> Result<HeaderValue, CoseError> {
    let mut dec = Decoder::new(bytes);
    let value = read_item(&mut dec, 0)?;
    finish(&dec, bytes, "item")?;
    Ok(value)
}

fn finish(dec: &Decoder<'_>, bytes: &[u8], what: &str) -> Result<(), CoseError> {
    if dec.position() != bytes.len() {
        return Err(CoseError::Cbor(format!("trailing bytes after {what}")));
    }
    Ok(())
}

fn cbor(context: &'static str) -> impl Fn(minicbor::decode::Error) -> CoseError {
    move |e| CoseError::Cbor(format!("{context}: {e}"))
}

fn is_int(ty: Type) -> bool {
    matches!(
        ty,
        Type::U8 | Type::U16 | Type::U32 | Type::U64 | Type::I8 | Type::I16 | Type::I32 | Type::I64 | Type::Int
    )
}

/// Read a container length, refusing indefinite lengths and nesting past
/// [`MAX_NESTING_DEPTH`].
fn container_len(len: Option<u64>, depth: usize, kind: &str) -> Result<u64, CoseError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(CoseError::Cbor(format!(
            "nesting too deep: more than {MAX_NESTING_DEPTH} levels"
        )));
    }
    len.ok_or_else(|| CoseError::Cbor(format!("indefinite-length {kind}s are not supported")))
}

fn read_map(dec: &mut Decoder<'_>, depth: usize) -> Result<CborMap, CoseError> {
    let len = container_len(dec.map().map_err(cbor("failed to read map"))?, depth, "map")?;
    let mut map = BTreeMap::new();
    for _ in 0..len {
        let ty = dec.datatype().map_err(cbor("failed to read map key"))?;
        let label = if is_int(ty) {
            HeaderKey::Int(dec.i64().map_err(cbor("failed to decode int map key"))?)
        } else if ty == Type::String {
            HeaderKey::Text(dec.str().map_err(cbor("failed to decode text map key"))?.to_string())
        } else {
            return Err(CoseError::Cbor(format!("unsupported map key type: {ty:?}")));
        };
        map.insert(label, read_item(dec, depth + 1)?);
    }
    Ok(map)
}

fn read_item(dec: &mut Decoder<'_>, depth: usize) -> Result<HeaderValue, CoseError> {
    let ty = dec.datatype().map_err(cbor("failed to read item"))?;
    let value = match ty {
        _ if is_int(ty) => HeaderValue::Int(dec.i64().map_err(cbor("failed to decode int"))?),
        Type::Bytes => HeaderValue::Bytes(dec.bytes().map_err(cbor("failed to decode bstr"))?.to_vec()),
        Type::String => HeaderValue::Text(dec.str().map_err(cbor("failed to decode tstr"))?.to_string()),
        Type::Bool => HeaderValue::Bool(dec.bool().map_err(cbor("failed to decode bool"))?),
        Type::Null => {
            dec.null().map_err(cbor("failed to decode null"))?;
            HeaderValue::Null
        }
        Type::Array => {
            let len = container_len(dec.array().map_err(cbor("failed to read array"))?, depth, "array")?;
            let items = (0..len)
                .map(|_| read_item(dec, depth + 1))
                .collect::<Result<Vec<_>, _>>()?;
            HeaderValue::Array(items)
        }
        Type::Map => HeaderValue::Map(read_map(dec, depth)?),
        other => return Err(CoseError::Cbor(format!("unsupported value type: {other:?}"))),
    };
    Ok(value)
}

pub fn encode_map_to_cbor(map: &CborMap) -> Result<Vec<u8>, CoseError> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    encode_map(&mut enc, map)?;
    Ok(out)
}

pub fn encode_value_to_cbor(value: &HeaderValue) -> Result<Vec<u8>, CoseError> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    encode_value(&mut enc, value)?;
    Ok(out)
}

fn encode_map<W: minicbor::encode::Write>(enc: &mut Encoder<W>, map: &CborMap) -> Result<(), CoseError>
where
    W::Error: std::fmt::Display,
{
    enc.map(map.len() as u64).map_err(|e| CoseError::Cbor(e.to_string()))?;
    for (k, v) in map {
        match k {
            HeaderKey::Int(i) => enc.i64(*i),
            HeaderKey::Text(s) => enc.str(s),
        }
        .map_err(|e| CoseError::Cbor(e.to_string()))?;
        encode_value(enc, v)?;
    }
    Ok(())
}

fn encode_value<W: minicbor::encode::Write>(enc: &mut Encoder<W>, value: &HeaderValue) -> Result<(), CoseError>
where
    W::Error: std::fmt::Display,
{
    let cbor = |e: minicbor::encode::Error<W::Error>| CoseError::Cbor(e.to_string());

    match value {
        HeaderValue::Int(i) => {
            enc.i64(*i).map_err(cbor)?;
        }
        HeaderValue::Bytes(b) => {
            enc.bytes(b).map_err(cbor)?;
        }
        HeaderValue::Text(s) => {
            enc.str(s).map_err(cbor)?;
        }
        HeaderValue::Bool(b) => {
            enc.bool(*b).map_err(cbor)?;
        }
        HeaderValue::Null => {
            enc.null().map_err(cbor)?;
        }
        HeaderValue::Array(items) => {
            enc.array(items.len() as u64).map_err(cbor)?;
            for item in items {
                encode_value(enc, item)?;
            }
        }
        HeaderValue::Map(map) => encode_map(enc, map)?,
    }
    Ok(())
}
