use crate::crypto::cipher_types::{Method, Mode};
use crate::crypto::error::ValidationError;

const AES_KEY_SIZES: [usize; 3] = [16, 24, 32];

/// Checks key and IV lengths before any cipher is built.
///
/// The IV is only checked for CBC, CFB and OFB. CTR and an unset mode accept
/// any IV length here; the mode wrapper still refuses a counter block of the
/// wrong size.
pub fn validate(
    method: Option<Method>,
    mode: Option<Mode>,
    key: &[u8],
    iv: &[u8],
    block_size: usize,
) -> Result<(), ValidationError> {
    match mode {
        Some(Mode::Cbc | Mode::Cfb | Mode::Ofb) => {
            if iv.len() != block_size {
                return Err(ValidationError::IvSizeMismatch {
                    iv_len: iv.len(),
                    block_size,
                });
            }
        }
        Some(Mode::Ctr) | None => {
            if iv.len() != block_size {
                log::warn!(
                    "IV length {} differs from block size {}, not checked for mode {:?}",
                    iv.len(),
                    block_size,
                    mode
                );
            }
        }
    }

    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    }

    if method == Some(Method::Aes) && !AES_KEY_SIZES.contains(&key.len()) {
        return Err(ValidationError::InvalidAesKeyLength(key.len()));
    }

    Ok(())
}
