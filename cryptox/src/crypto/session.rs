use crate::crypto::cipher_context::CipherContext;
use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::cipher_types::{CipherSpec, Encoding, Method, Mode, Padding};
use crate::crypto::codec;
use crate::crypto::error::{CipherError, CodecError, CryptoError, Errors, ValidationError};
use crate::crypto::method::new_cipher;
use crate::crypto::padding::{apply_padding, remove_padding};
use crate::crypto::validator;
use std::fmt;

/// A value read from a session together with everything that went wrong
/// while the session was being configured and run.
///
/// The value is always present, even when errors were recorded, so callers
/// must look at `errors` (or use [`Outcome::into_result`]) before trusting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    pub value: T,
    pub errors: Errors,
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_result(self) -> Result<T, Errors> {
        if self.errors.is_empty() {
            Ok(self.value)
        } else {
            Err(self.errors)
        }
    }

    pub fn into_parts(self) -> (T, Errors) {
        (self.value, self.errors)
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Input,
    Key,
    Iv,
}

/// Symmetric encryption session.
///
/// Configuration calls and the terminal `encrypt`/`decrypt` never stop the
/// chain; failures are appended to an internal [`Errors`] collection that is
/// handed back by every output accessor.
///
/// ```
/// use cryptox::{CryptoSession, Method, Mode, Padding};
///
/// let mut session = CryptoSession::new();
/// let ciphertext = session
///     .with_method(Method::Aes)
///     .with_mode(Mode::Cbc)
///     .with_padding(Padding::Pkcs7)
///     .key_from_bytes(vec![b'c'; 16])
///     .iv_from_bytes(vec![b'b'; 16])
///     .input_from_string("hello world")
///     .encrypt()
///     .to_base64_string()
///     .into_result()
///     .unwrap();
///
/// let plaintext = session
///     .input_from_base64(&ciphertext)
///     .decrypt()
///     .to_text()
///     .into_result()
///     .unwrap();
/// assert_eq!(plaintext, "hello world");
/// ```
#[derive(Clone)]
pub struct CryptoSession {
    input: Vec<u8>,
    output: Option<Vec<u8>>,
    key: Vec<u8>,
    iv: Vec<u8>,
    method: Option<Method>,
    mode: Option<Mode>,
    padding: Option<Padding>,
    errors: Errors,
}

impl Default for CryptoSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CryptoSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoSession")
            .field("input_len", &self.input.len())
            .field("output_len", &self.output.as_ref().map(Vec::len))
            .field("key", &"<redacted>")
            .field("iv", &self.iv)
            .field("method", &self.method)
            .field("mode", &self.mode)
            .field("padding", &self.padding)
            .field("errors", &self.errors)
            .finish()
    }
}

impl CryptoSession {
    pub fn new() -> Self {
        Self {
            input: Vec::new(),
            output: None,
            key: Vec::new(),
            iv: Vec::new(),
            method: Some(Method::Aes),
            mode: Some(Mode::Cbc),
            padding: None,
            errors: Errors::new(),
        }
    }

    pub fn from_spec(spec: CipherSpec) -> Self {
        let mut session = Self::new();
        session.with_spec(spec);
        session
    }

    pub fn with_method(&mut self, method: Method) -> &mut Self {
        self.method = Some(method);
        self
    }

    pub fn with_mode(&mut self, mode: Mode) -> &mut Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_padding(&mut self, padding: Padding) -> &mut Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_spec(&mut self, spec: CipherSpec) -> &mut Self {
        self.method = Some(spec.method);
        self.mode = Some(spec.mode);
        self.padding = spec.padding;
        self
    }

    /// Selects the method by name. An unknown name is recorded and leaves the
    /// method unset, so a later `encrypt`/`decrypt` fails as well.
    pub fn with_method_name(&mut self, name: &str) -> &mut Self {
        self.method = name.parse::<Method>().map_err(|e| self.errors.push(e)).ok();
        self
    }

    pub fn with_mode_name(&mut self, name: &str) -> &mut Self {
        self.mode = name.parse::<Mode>().map_err(|e| self.errors.push(e)).ok();
        self
    }

    /// An unknown padding name is recorded and leaves padding unset, which
    /// pads as a passthrough.
    pub fn with_padding_name(&mut self, name: &str) -> &mut Self {
        self.padding = name.parse::<Padding>().map_err(|e| self.errors.push(e)).ok();
        self
    }

    /// Parses an `AES/CBC/PKCS7` style spec; nothing changes when it is malformed.
    pub fn with_spec_str(&mut self, spec: &str) -> &mut Self {
        match spec.parse::<CipherSpec>() {
            Ok(spec) => self.with_spec(spec),
            Err(err) => {
                self.errors.push(err);
                self
            }
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Vec<u8> {
        match slot {
            Slot::Input => &mut self.input,
            Slot::Key => &mut self.key,
            Slot::Iv => &mut self.iv,
        }
    }

    // Decode failures are recorded and the slot still gets assigned (empty).
    fn assign(&mut self, slot: Slot, decoded: Result<Vec<u8>, CodecError>) -> &mut Self {
        let bytes = decoded.unwrap_or_else(|err| {
            log::warn!("{err}");
            self.errors.push(err);
            Vec::new()
        });
        *self.slot_mut(slot) = bytes;
        self
    }

    pub fn input_from_bytes(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.assign(Slot::Input, Ok(data.into()))
    }

    pub fn input_from_string(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Input, Ok(data.as_bytes().to_vec()))
    }

    pub fn input_from_base64(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Input, codec::decode_base64(data))
    }

    pub fn input_from_hex(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Input, codec::decode_hex(data))
    }

    pub fn input_from(&mut self, data: &str, encoding: Encoding) -> &mut Self {
        self.assign(Slot::Input, codec::decode(data, encoding))
    }

    pub fn key_from_bytes(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.assign(Slot::Key, Ok(data.into()))
    }

    pub fn key_from_string(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Key, Ok(data.as_bytes().to_vec()))
    }

    pub fn key_from_base64(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Key, codec::decode_base64(data))
    }

    pub fn key_from_hex(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Key, codec::decode_hex(data))
    }

    pub fn key_from(&mut self, data: &str, encoding: Encoding) -> &mut Self {
        self.assign(Slot::Key, codec::decode(data, encoding))
    }

    pub fn iv_from_bytes(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.assign(Slot::Iv, Ok(data.into()))
    }

    pub fn iv_from_string(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Iv, Ok(data.as_bytes().to_vec()))
    }

    pub fn iv_from_base64(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Iv, codec::decode_base64(data))
    }

    pub fn iv_from_hex(&mut self, data: &str) -> &mut Self {
        self.assign(Slot::Iv, codec::decode_hex(data))
    }

    pub fn iv_from(&mut self, data: &str, encoding: Encoding) -> &mut Self {
        self.assign(Slot::Iv, codec::decode(data, encoding))
    }

    /// Clears input, key, IV and errors and restores the default method and
    /// mode. Padding and the last output are left as they are.
    pub fn reset(&mut self) -> &mut Self {
        self.input.clear();
        self.key.clear();
        self.iv.clear();
        self.errors.clear();
        self.method = Some(Method::Aes);
        self.mode = Some(Mode::Cbc);
        self
    }

    /// Runs the key/IV checks against an explicit block size.
    pub fn validate(&self, block_size: usize) -> Result<(), ValidationError> {
        validator::validate(self.method, self.mode, &self.key, &self.iv, block_size)
    }

    // Shared front half of encrypt and decrypt: input guard, validation,
    // then cipher construction.
    fn prepare(&self) -> Result<Box<dyn BlockCipher>, CryptoError> {
        if self.input.is_empty() {
            return Err(CryptoError::EmptyInput);
        }
        let method = self.method.ok_or(CipherError::UnsupportedMethod)?;
        self.validate(method.block_size())?;
        Ok(new_cipher(Some(method), &self.key)?)
    }

    pub fn encrypt(&mut self) -> &mut Self {
        if let Err(err) = self.try_encrypt() {
            log::debug!("encrypt failed: {err}");
            self.errors.push(err);
        }
        self
    }

    fn try_encrypt(&mut self) -> Result<(), CryptoError> {
        let algorithm = self.prepare()?;
        let block_size = algorithm.block_size();

        log::debug!(
            "encrypting {} bytes, method {:?}, mode {:?}, padding {:?}",
            self.input.len(),
            self.method,
            self.mode,
            self.padding
        );

        let padded = apply_padding(self.input.clone(), self.padding, block_size);
        // Stream modes take a trailing partial block; CBC does not.
        let needs_alignment = self.mode.is_some_and(|mode| !mode.is_stream_mode());
        if needs_alignment && padded.len() % block_size != 0 {
            return Err(CryptoError::NonBlockAligned {
                len: padded.len(),
                block_size,
            });
        }

        self.output = Some(vec![0u8; padded.len()]);

        let Some(mode) = self.mode else {
            return Err(CryptoError::UnsupportedMode);
        };
        let ctx = CipherContext::new(algorithm, mode, self.iv.clone());
        self.output = Some(ctx.encrypt(&padded)?);
        Ok(())
    }

    pub fn decrypt(&mut self) -> &mut Self {
        if let Err(err) = self.try_decrypt() {
            log::debug!("decrypt failed: {err}");
            self.errors.push(err);
        }
        self
    }

    fn try_decrypt(&mut self) -> Result<(), CryptoError> {
        let algorithm = self.prepare()?;
        let block_size = algorithm.block_size();

        if self.input.len() % block_size != 0 {
            return Err(CryptoError::NonBlockAligned {
                len: self.input.len(),
                block_size,
            });
        }

        log::debug!(
            "decrypting {} bytes, method {:?}, mode {:?}, padding {:?}",
            self.input.len(),
            self.method,
            self.mode,
            self.padding
        );

        self.output = Some(vec![0u8; self.input.len()]);

        let decrypted = match self.mode {
            Some(mode) => CipherContext::new(algorithm, mode, self.iv.clone()).decrypt(&self.input)?,
            // No error here: the output stays zero-filled and is depadded as is.
            None => {
                log::warn!("decrypt called with no mode set, output left zero-filled");
                vec![0u8; self.input.len()]
            }
        };

        match remove_padding(decrypted.clone(), self.padding) {
            Ok(unpadded) => {
                self.output = Some(unpadded);
                Ok(())
            }
            Err(err) => {
                self.output = Some(decrypted);
                Err(err.into())
            }
        }
    }

    fn outcome<T>(&self, value: T) -> Outcome<T> {
        Outcome {
            value,
            errors: self.errors.clone(),
        }
    }

    fn output_slice(&self) -> &[u8] {
        self.output.as_deref().unwrap_or_default()
    }

    pub fn to_bytes(&self) -> Outcome<Vec<u8>> {
        self.outcome(self.output_slice().to_vec())
    }

    /// Output as text; invalid UTF-8 sequences are replaced, not rejected.
    pub fn to_text(&self) -> Outcome<String> {
        self.outcome(codec::encode(self.output_slice(), Encoding::Utf8))
    }

    pub fn to_base64_string(&self) -> Outcome<String> {
        self.outcome(codec::encode_base64(self.output_slice()))
    }

    pub fn to_hex_string(&self) -> Outcome<String> {
        self.outcome(codec::encode_hex(self.output_slice()))
    }

    pub fn to_encoding(&self, encoding: Encoding) -> Outcome<String> {
        self.outcome(codec::encode(self.output_slice(), encoding))
    }

    pub fn input(&self) -> &[u8] {
        &self.input
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// `None` until a terminal operation has produced something.
    pub fn output(&self) -> Option<&[u8]> {
        self.output.as_deref()
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn padding(&self) -> Option<Padding> {
        self.padding
    }

    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
