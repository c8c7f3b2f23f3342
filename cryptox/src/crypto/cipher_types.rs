use crate::crypto::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Block cipher selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Method {
    /// Rijndael with a 128-bit block and 128/192/256-bit keys.
    Aes,
    /// 64-bit block, variable key of 40 to 128 bits (RFC 2144).
    Cast5,
    /// 128-bit block and key (GB/T 32907-2016).
    Sm4,
    /// 128-bit block, 128/192/256-bit keys.
    Twofish,
    /// Tiny Encryption Algorithm, 64-bit block and 128-bit key.
    Tea,
    /// Extended TEA with the reworked key schedule.
    Xtea,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Aes,
        Method::Cast5,
        Method::Sm4,
        Method::Twofish,
        Method::Tea,
        Method::Xtea,
    ];

    /// Fixed block size in bytes, known without constructing the cipher.
    pub fn block_size(self) -> usize {
        match self {
            Method::Aes | Method::Sm4 | Method::Twofish => 16,
            Method::Cast5 | Method::Tea | Method::Xtea => 8,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Aes => "AES",
            Method::Cast5 => "CAST5",
            Method::Sm4 => "SM4",
            Method::Twofish => "Twofish",
            Method::Tea => "TEA",
            Method::Xtea => "XTEA",
        };
        f.write_str(name)
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aes" => Ok(Method::Aes),
            "cast5" | "cast-128" | "cast128" => Ok(Method::Cast5),
            "sm4" => Ok(Method::Sm4),
            "twofish" => Ok(Method::Twofish),
            "tea" => Ok(Method::Tea),
            "xtea" => Ok(Method::Xtea),
            _ => Err(ParseError::UnknownMethod(s.to_string())),
        }
    }
}

/// Mode of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Each plaintext block is XORed with the previous ciphertext block
    /// before encryption; the IV stands in for the first one.
    Cbc,
    /// Cipher feedback with a full-block segment.
    Cfb,
    /// Output feedback: the IV is encrypted repeatedly to form a keystream.
    Ofb,
    /// Counter mode, the IV is the initial big-endian counter block.
    Ctr,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Cbc, Mode::Cfb, Mode::Ofb, Mode::Ctr];

    #[inline]
    pub fn is_stream_mode(self) -> bool {
        matches!(self, Mode::Cfb | Mode::Ofb | Mode::Ctr)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Cbc => "CBC",
            Mode::Cfb => "CFB",
            Mode::Ofb => "OFB",
            Mode::Ctr => "CTR",
        };
        f.write_str(name)
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cbc" => Ok(Mode::Cbc),
            "cfb" => Ok(Mode::Cfb),
            "ofb" => Ok(Mode::Ofb),
            "ctr" => Ok(Mode::Ctr),
            _ => Err(ParseError::UnknownMode(s.to_string())),
        }
    }
}

/// Padding scheme applied before encryption and stripped after decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Padding {
    None,
    Zero,
    /// PKCS7 pinned to an 8-byte block.
    Pkcs5,
    Pkcs7,
    /// ISO/IEC 9797-1 method 2: a `0x80` marker followed by zeros.
    Iso97971,
}

impl Padding {
    pub const ALL: [Padding; 5] = [
        Padding::None,
        Padding::Zero,
        Padding::Pkcs5,
        Padding::Pkcs7,
        Padding::Iso97971,
    ];
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Padding::None => "NoPadding",
            Padding::Zero => "ZeroPadding",
            Padding::Pkcs5 => "PKCS5",
            Padding::Pkcs7 => "PKCS7",
            Padding::Iso97971 => "ISO97971",
        };
        f.write_str(name)
    }
}

impl FromStr for Padding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "no" | "nopadding" => Ok(Padding::None),
            "zero" | "zeros" | "zeropadding" => Ok(Padding::Zero),
            "pkcs5" | "pkcs5padding" => Ok(Padding::Pkcs5),
            "pkcs7" | "pkcs7padding" => Ok(Padding::Pkcs7),
            "iso97971" | "iso9797-1" | "iso9797" => Ok(Padding::Iso97971),
            _ => Err(ParseError::UnknownPadding(s.to_string())),
        }
    }
}

/// Textual representation used for ingesting buffers and rendering output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Encoding {
    /// Text taken byte-for-byte as UTF-8.
    Utf8,
    /// Standard alphabet base64 with `=` padding.
    Base64,
    Hex,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Base64 => "base64",
            Encoding::Hex => "hex",
        };
        f.write_str(name)
    }
}

impl FromStr for Encoding {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" | "text" | "string" => Ok(Encoding::Utf8),
            "base64" | "b64" => Ok(Encoding::Base64),
            "hex" | "base16" => Ok(Encoding::Hex),
            _ => Err(ParseError::UnknownEncoding(s.to_string())),
        }
    }
}

/// A `(method, mode, padding)` triple, written as `AES/CBC/PKCS7`.
///
/// The padding segment is optional; leaving it out keeps padding unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CipherSpec {
    pub method: Method,
    pub mode: Mode,
    pub padding: Option<Padding>,
}

impl CipherSpec {
    pub fn new(method: Method, mode: Mode, padding: Option<Padding>) -> Self {
        Self {
            method,
            mode,
            padding,
        }
    }
}

impl Default for CipherSpec {
    fn default() -> Self {
        Self::new(Method::Aes, Mode::Cbc, None)
    }
}

impl fmt::Display for CipherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.padding {
            Some(padding) => write!(f, "{}/{}/{}", self.method, self.mode, padding),
            None => write!(f, "{}/{}", self.method, self.mode),
        }
    }
}

impl FromStr for CipherSpec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        match parts.as_slice() {
            [method, mode] => Ok(Self::new(method.parse()?, mode.parse()?, None)),
            [method, mode, padding] => Ok(Self::new(
                method.parse()?,
                mode.parse()?,
                Some(padding.parse()?),
            )),
            _ => Err(ParseError::MalformedSpec(s.to_string())),
        }
    }
}
