use crate::crypto::cipher_types::Encoding;
use crate::crypto::error::CodecError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

pub fn decode_base64(data: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD.decode(data).map_err(|e| CodecError {
        encoding: Encoding::Base64,
        reason: e.to_string(),
    })
}

/// Lowercase hex.
pub fn encode_hex(data: &[u8]) -> String {
    hex::encode(data)
}

/// Accepts either case.
pub fn decode_hex(data: &str) -> Result<Vec<u8>, CodecError> {
    hex::decode(data).map_err(|e| CodecError {
        encoding: Encoding::Hex,
        reason: e.to_string(),
    })
}

pub fn encode(data: &[u8], encoding: Encoding) -> String {
    match encoding {
        Encoding::Utf8 => String::from_utf8_lossy(data).into_owned(),
        Encoding::Base64 => encode_base64(data),
        Encoding::Hex => encode_hex(data),
    }
}

pub fn decode(data: &str, encoding: Encoding) -> Result<Vec<u8>, CodecError> {
    match encoding {
        Encoding::Utf8 => Ok(data.as_bytes().to_vec()),
        Encoding::Base64 => decode_base64(data),
        Encoding::Hex => decode_hex(data),
    }
}
