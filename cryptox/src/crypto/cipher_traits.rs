/// A keyed block cipher operating in place on exactly `block_size()` bytes.
///
/// Implementations must be usable from several threads at once, the CTR and
/// CBC-decrypt paths fan blocks out over `rayon`.
pub trait BlockCipher: Send + Sync {
    fn block_size(&self) -> usize;
    fn encrypt_block(&self, block: &mut [u8]);
    fn decrypt_block(&self, block: &mut [u8]);
}

impl<T: BlockCipher + ?Sized> BlockCipher for Box<T> {
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        (**self).encrypt_block(block)
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        (**self).decrypt_block(block)
    }
}
