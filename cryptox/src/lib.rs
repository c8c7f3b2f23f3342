pub mod crypto;

pub use crypto::cipher_context::CipherContext;
pub use crypto::cipher_traits::BlockCipher;
pub use crypto::cipher_types::{CipherSpec, Encoding, Method, Mode, Padding};
pub use crypto::error::{CryptoError, Errors};
pub use crypto::session::{CryptoSession, Outcome};
