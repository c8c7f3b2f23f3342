use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::cipher_types::Method;
use crate::crypto::error::CipherError;
use crate::crypto::tea::{Tea, Xtea};
use cipher::generic_array::GenericArray;
use cipher::{BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit};

/// Adapter from a RustCrypto block cipher to [`BlockCipher`].
struct RustCryptoBlock<C>(C);

impl<C> BlockCipher for RustCryptoBlock<C>
where
    C: BlockEncrypt + BlockDecrypt + Send + Sync,
{
    fn block_size(&self) -> usize {
        <C as BlockSizeUser>::block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        BlockEncrypt::encrypt_block(&self.0, GenericArray::from_mut_slice(block));
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        BlockDecrypt::decrypt_block(&self.0, GenericArray::from_mut_slice(block));
    }
}

fn keyed<C>(method: Method, key: &[u8]) -> Result<Box<dyn BlockCipher>, CipherError>
where
    C: KeyInit + BlockEncrypt + BlockDecrypt + Send + Sync + 'static,
{
    let cipher = C::new_from_slice(key).map_err(|_| CipherError::InvalidKeyLength {
        method,
        len: key.len(),
    })?;
    Ok(Box::new(RustCryptoBlock(cipher)))
}

/// Builds the block cipher for `method` keyed with `key`.
///
/// Every primitive enforces its own key-length rule here. An unset method
/// (`None`) is reported as [`CipherError::UnsupportedMethod`].
pub fn new_cipher(method: Option<Method>, key: &[u8]) -> Result<Box<dyn BlockCipher>, CipherError> {
    let Some(method) = method else {
        return Err(CipherError::UnsupportedMethod);
    };

    let cipher = match method {
        Method::Aes => match key.len() {
            16 => keyed::<aes::Aes128>(method, key)?,
            24 => keyed::<aes::Aes192>(method, key)?,
            32 => keyed::<aes::Aes256>(method, key)?,
            len => return Err(CipherError::InvalidKeyLength { method, len }),
        },
        Method::Cast5 => keyed::<cast5::Cast5>(method, key)?,
        Method::Sm4 => keyed::<sm4::Sm4>(method, key)?,
        Method::Twofish => keyed::<twofish::Twofish>(method, key)?,
        Method::Tea => Box::new(Tea::new(key)?),
        Method::Xtea => Box::new(Xtea::new(key)?),
    };

    log::debug!(
        "created {} cipher, block size {}, key size {}",
        method,
        cipher.block_size(),
        key.len()
    );
    Ok(cipher)
}
