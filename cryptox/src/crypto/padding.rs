//! Padding schemes.
//!
//! All functions take and return owned buffers.

use crate::crypto::cipher_types::Padding;
use crate::crypto::error::PaddingError;

const ISO_MARKER: u8 = 0x80;
const PKCS5_BLOCK_SIZE: usize = 8;

/// Appends `0x00` bytes up to the next multiple of `block_size`.
///
/// An already aligned buffer gains a whole block of zeros. Empty buffers and
/// `block_size == 0` are returned untouched.
pub fn pad_zero(mut data: Vec<u8>, block_size: usize) -> Vec<u8> {
    if data.is_empty() || block_size < 1 {
        return data;
    }
    let padding_length = block_size - data.len() % block_size;
    data.resize(data.len() + padding_length, 0);
    data
}

/// Strips every trailing `0x00` byte.
///
/// Lossy: plaintext that itself ends in zero bytes loses them as well.
pub fn unpad_zero(mut data: Vec<u8>) -> Vec<u8> {
    while data.last() == Some(&0u8) {
        data.pop();
    }
    data
}

/// Appends `N` bytes of value `N`, `N = block_size - len % block_size`.
pub fn pad_pkcs7(mut data: Vec<u8>, block_size: usize) -> Vec<u8> {
    if data.is_empty() || block_size < 1 {
        return data;
    }
    let padding_length = block_size - data.len() % block_size;
    data.extend(std::iter::repeat_n(padding_length as u8, padding_length));
    data
}

/// Drops as many trailing bytes as the last byte says.
///
/// The padding bytes themselves are not checked, and a declared length that
/// would consume the whole buffer leaves it unchanged.
pub fn unpad_pkcs7(mut data: Vec<u8>) -> Vec<u8> {
    if let Some(&last_byte) = data.last() {
        let pad_len = last_byte as usize;
        if data.len() > pad_len {
            data.truncate(data.len() - pad_len);
        }
    }
    data
}

pub fn pad_pkcs5(data: Vec<u8>) -> Vec<u8> {
    pad_pkcs7(data, PKCS5_BLOCK_SIZE)
}

pub fn unpad_pkcs5(data: Vec<u8>) -> Vec<u8> {
    unpad_pkcs7(data)
}

/// ISO/IEC 9797-1 method 2: a `0x80` marker, then zero padding.
pub fn pad_iso97971(mut data: Vec<u8>, block_size: usize) -> Vec<u8> {
    data.push(ISO_MARKER);
    pad_zero(data, block_size)
}

pub fn unpad_iso97971(data: Vec<u8>) -> Result<Vec<u8>, PaddingError> {
    let mut data = unpad_zero(data);
    match data.last() {
        Some(&ISO_MARKER) => {
            data.pop();
            Ok(data)
        }
        _ => Err(PaddingError::MissingIsoMarker),
    }
}

/// Pads `data` with the selected scheme.
///
/// An unset scheme (`None`) is a passthrough, exactly like
/// [`Padding::None`].
pub fn apply_padding(data: Vec<u8>, padding: Option<Padding>, block_size: usize) -> Vec<u8> {
    match padding {
        Some(Padding::Zero) => pad_zero(data, block_size),
        Some(Padding::Pkcs5) => pad_pkcs5(data),
        Some(Padding::Pkcs7) => pad_pkcs7(data, block_size),
        Some(Padding::Iso97971) => pad_iso97971(data, block_size),
        Some(Padding::None) => data,
        None => {
            log::warn!("padding unset, passing {} bytes through", data.len());
            data
        }
    }
}

/// Reverses [`apply_padding`].
pub fn remove_padding(data: Vec<u8>, padding: Option<Padding>) -> Result<Vec<u8>, PaddingError> {
    match padding {
        Some(Padding::Zero) => Ok(unpad_zero(data)),
        Some(Padding::Pkcs5) => Ok(unpad_pkcs5(data)),
        Some(Padding::Pkcs7) => Ok(unpad_pkcs7(data)),
        Some(Padding::Iso97971) => unpad_iso97971(data),
        Some(Padding::None) => Ok(data),
        None => {
            log::warn!("padding unset, passing {} bytes through", data.len());
            Ok(data)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_padding_adds_full_block_when_aligned() {
        assert_eq!(pad_zero(vec![1, 2, 3, 4], 4), vec![1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn pkcs7_rejects_oversized_declared_length() {
        assert_eq!(unpad_pkcs7(vec![1, 2, 9]), vec![1, 2, 9]);
        assert_eq!(unpad_pkcs7(vec![3, 3, 3]), vec![3, 3, 3]);
    }

    #[test]
    fn iso_unpad_of_all_zero_buffer_fails() {
        assert_eq!(unpad_iso97971(vec![0; 8]), Err(PaddingError::MissingIsoMarker));
    }
}
