use crate::crypto::cipher_types::{Encoding, Method};
use std::fmt;
use thiserror::Error;

/// Failure to build a block cipher for the selected method.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("the method is not supported")]
    UnsupportedMethod,

    #[error("invalid key size {len} for {method}")]
    InvalidKeyLength { method: Method, len: usize },
}

/// Precondition failures detected before any cipher is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the IV is not the same as block size, IV size: {iv_len}, block size: {block_size}")]
    IvSizeMismatch { iv_len: usize, block_size: usize },

    #[error("the key cannot be empty")]
    EmptyKey,

    #[error("the length of key of AES can only be 16, 24, 32, got {0}")]
    InvalidAesKeyLength(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaddingError {
    #[error("ISO/IEC 9797-1 marker byte 0x80 not found")]
    MissingIsoMarker,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModeError {
    #[error("the IV is not the same as block size, IV size: {iv_len}, block size: {block_size}")]
    IvSizeMismatch { iv_len: usize, block_size: usize },

    #[error("input not full blocks, data size: {len}, block size: {block_size}")]
    NotBlockAligned { len: usize, block_size: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to decode {encoding} string, err: {reason}")]
pub struct CodecError {
    pub encoding: Encoding,
    pub reason: String,
}

/// Unknown names handed to `FromStr` for the closed enumerations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown method `{0}`")]
    UnknownMethod(String),

    #[error("unknown mode `{0}`")]
    UnknownMode(String),

    #[error("unknown padding `{0}`")]
    UnknownPadding(String),

    #[error("unknown encoding `{0}`")]
    UnknownEncoding(String),

    #[error("malformed cipher spec `{0}`, expected METHOD/MODE[/PADDING]")]
    MalformedSpec(String),
}

/// Error kinds a [`CryptoSession`](crate::CryptoSession) accumulates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("input data cannot be empty")]
    EmptyInput,

    #[error("failed to create cipher from the data, error: {0}")]
    UnsupportedMethod(#[source] CipherError),

    #[error("the mode is not supported")]
    UnsupportedMode,

    #[error("failed to validate data, error: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("the data size needs to be an integer multiple of block size, data size: {len}, block size: {block_size}")]
    NonBlockAligned { len: usize, block_size: usize },

    #[error(transparent)]
    DecodeFailed(#[from] CodecError),

    #[error("failed to depad data, error: {0}")]
    PaddingFailed(#[from] PaddingError),

    #[error("failed to run the mode of operation, error: {0}")]
    Mode(#[from] ModeError),

    #[error("invalid option, error: {0}")]
    InvalidOption(#[from] ParseError),
}

impl From<CipherError> for CryptoError {
    fn from(err: CipherError) -> Self {
        CryptoError::UnsupportedMethod(err)
    }
}

/// Ordered collection of every error a session has seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors(Vec<CryptoError>);

impl Errors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: impl Into<CryptoError>) {
        self.0.push(err.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CryptoError> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// `true` if any accumulated error matches `pred`.
    pub fn any(&self, pred: impl Fn(&CryptoError) -> bool) -> bool {
        self.0.iter().any(pred)
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Errors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.first().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl IntoIterator for Errors {
    type Item = CryptoError;
    type IntoIter = std::vec::IntoIter<CryptoError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a CryptoError;
    type IntoIter = std::slice::Iter<'a, CryptoError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<CryptoError> for Errors {
    fn from(err: CryptoError) -> Self {
        Errors(vec![err])
    }
}
