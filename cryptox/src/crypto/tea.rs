use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::cipher_types::Method;
use crate::crypto::error::CipherError;

const DELTA: u32 = 0x9E37_79B9;
const CYCLES: u32 = 32;
const BLOCK_SIZE: usize = 8;
const KEY_SIZE: usize = 16;

fn load_key(method: Method, key: &[u8]) -> Result<[u32; 4], CipherError> {
    if key.len() != KEY_SIZE {
        return Err(CipherError::InvalidKeyLength {
            method,
            len: key.len(),
        });
    }
    let mut words = [0u32; 4];
    for (word, chunk) in words.iter_mut().zip(key.chunks_exact(4)) {
        *word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    Ok(words)
}

#[inline]
fn load_block(block: &[u8]) -> (u32, u32) {
    (
        u32::from_be_bytes([block[0], block[1], block[2], block[3]]),
        u32::from_be_bytes([block[4], block[5], block[6], block[7]]),
    )
}

#[inline]
fn store_block(block: &mut [u8], v0: u32, v1: u32) {
    block[..4].copy_from_slice(&v0.to_be_bytes());
    block[4..BLOCK_SIZE].copy_from_slice(&v1.to_be_bytes());
}

/// Tiny Encryption Algorithm, 32 cycles (64 Feistel rounds).
pub struct Tea {
    key: [u32; 4],
}

impl Tea {
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        Ok(Self {
            key: load_key(Method::Tea, key)?,
        })
    }
}

impl BlockCipher for Tea {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        let [k0, k1, k2, k3] = self.key;
        let (mut v0, mut v1) = load_block(block);
        let mut sum = 0u32;

        for _ in 0..CYCLES {
            sum = sum.wrapping_add(DELTA);
            v0 = v0.wrapping_add(
                (v1 << 4).wrapping_add(k0) ^ v1.wrapping_add(sum) ^ (v1 >> 5).wrapping_add(k1),
            );
            v1 = v1.wrapping_add(
                (v0 << 4).wrapping_add(k2) ^ v0.wrapping_add(sum) ^ (v0 >> 5).wrapping_add(k3),
            );
        }

        store_block(block, v0, v1);
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        let [k0, k1, k2, k3] = self.key;
        let (mut v0, mut v1) = load_block(block);
        let mut sum = DELTA.wrapping_mul(CYCLES);

        for _ in 0..CYCLES {
            v1 = v1.wrapping_sub(
                (v0 << 4).wrapping_add(k2) ^ v0.wrapping_add(sum) ^ (v0 >> 5).wrapping_add(k3),
            );
            v0 = v0.wrapping_sub(
                (v1 << 4).wrapping_add(k0) ^ v1.wrapping_add(sum) ^ (v1 >> 5).wrapping_add(k1),
            );
            sum = sum.wrapping_sub(DELTA);
        }

        store_block(block, v0, v1);
    }
}

/// XTEA, 32 cycles with the key word chosen from the running sum.
pub struct Xtea {
    key: [u32; 4],
}

impl Xtea {
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        Ok(Self {
            key: load_key(Method::Xtea, key)?,
        })
    }

    #[inline]
    fn mix(v: u32) -> u32 {
        ((v << 4) ^ (v >> 5)).wrapping_add(v)
    }
}

impl BlockCipher for Xtea {
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    fn encrypt_block(&self, block: &mut [u8]) {
        let k = &self.key;
        let (mut v0, mut v1) = load_block(block);
        let mut sum = 0u32;

        for _ in 0..CYCLES {
            v0 = v0.wrapping_add(Self::mix(v1) ^ sum.wrapping_add(k[(sum & 3) as usize]));
            sum = sum.wrapping_add(DELTA);
            v1 = v1.wrapping_add(Self::mix(v0) ^ sum.wrapping_add(k[((sum >> 11) & 3) as usize]));
        }

        store_block(block, v0, v1);
    }

    fn decrypt_block(&self, block: &mut [u8]) {
        let k = &self.key;
        let (mut v0, mut v1) = load_block(block);
        let mut sum = DELTA.wrapping_mul(CYCLES);

        for _ in 0..CYCLES {
            v1 = v1.wrapping_sub(Self::mix(v0) ^ sum.wrapping_add(k[((sum >> 11) & 3) as usize]));
            sum = sum.wrapping_sub(DELTA);
            v0 = v0.wrapping_sub(Self::mix(v1) ^ sum.wrapping_add(k[(sum & 3) as usize]));
        }

        store_block(block, v0, v1);
    }
}
