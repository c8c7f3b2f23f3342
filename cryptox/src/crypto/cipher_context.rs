use crate::crypto::cipher_traits::BlockCipher;
use crate::crypto::cipher_types::Mode;
use crate::crypto::error::ModeError;
use rayon::prelude::*;

const CHUNK_SIZE: usize = 1024 * 1024; // 1MB per rayon task
const OPTIMAL_PARALLELISM_THRESHOLD: usize = 4 * 1024 * 1024; // below this, stay on one thread

/// Runs a block cipher under a mode of operation.
///
/// The context is immutable; every call starts from the configured IV, so the
/// same context can encrypt and then decrypt.
pub struct CipherContext {
    algorithm: Box<dyn BlockCipher>,
    mode: Mode,
    iv: Vec<u8>,
}

impl CipherContext {
    pub fn new(algorithm: Box<dyn BlockCipher>, mode: Mode, iv: impl Into<Vec<u8>>) -> Self {
        Self {
            algorithm,
            mode,
            iv: iv.into(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn block_size(&self) -> usize {
        self.algorithm.block_size()
    }

    pub fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, ModeError> {
        self.check_iv()?;
        match self.mode {
            Mode::Cbc => self.cbc_encrypt(data),
            Mode::Cfb => Ok(self.cfb(data, true)),
            Mode::Ofb => Ok(self.ofb(data)),
            Mode::Ctr => Ok(self.ctr(data)),
        }
    }

    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, ModeError> {
        self.check_iv()?;
        match self.mode {
            Mode::Cbc => self.cbc_decrypt(data),
            Mode::Cfb => Ok(self.cfb(data, false)),
            Mode::Ofb => Ok(self.ofb(data)),
            Mode::Ctr => Ok(self.ctr(data)),
        }
    }

    fn check_iv(&self) -> Result<(), ModeError> {
        let block_size = self.algorithm.block_size();
        if self.iv.len() != block_size {
            return Err(ModeError::IvSizeMismatch {
                iv_len: self.iv.len(),
                block_size,
            });
        }
        Ok(())
    }

    fn check_aligned(&self, data: &[u8]) -> Result<(), ModeError> {
        let block_size = self.algorithm.block_size();
        if data.len() % block_size != 0 {
            return Err(ModeError::NotBlockAligned {
                len: data.len(),
                block_size,
            });
        }
        Ok(())
    }

    #[inline]
    fn xor_in_place(dst: &mut [u8], keystream: &[u8]) {
        for (d, k) in dst.iter_mut().zip(keystream) {
            *d ^= k;
        }
    }

    // Adds `value` to a big-endian counter block, wrapping on overflow.
    #[inline]
    fn increment_block(block: &mut [u8], value: usize) {
        let mut carry = value as u128;
        for byte in block.iter_mut().rev() {
            if carry == 0 {
                break;
            }
            let sum = *byte as u128 + (carry & 0xFF);
            *byte = sum as u8;
            carry = (carry >> 8) + (sum >> 8);
        }
    }

    fn cbc_encrypt(&self, data: &[u8]) -> Result<Vec<u8>, ModeError> {
        self.check_aligned(data)?;
        let block_size = self.algorithm.block_size();
        let mut out = data.to_vec();
        let mut prev = self.iv.clone();

        for block in out.chunks_exact_mut(block_size) {
            Self::xor_in_place(block, &prev);
            self.algorithm.encrypt_block(block);
            prev.copy_from_slice(block);
        }
        Ok(out)
    }

    fn cbc_decrypt(&self, data: &[u8]) -> Result<Vec<u8>, ModeError> {
        self.check_aligned(data)?;
        let block_size = self.algorithm.block_size();
        let mut out = data.to_vec();

        // Each plaintext block only needs its own and the previous ciphertext
        // block, so decryption parallelises cleanly.
        let decrypt_one = |(i, block): (usize, &mut [u8])| {
            self.algorithm.decrypt_block(block);
            let prev = if i == 0 {
                &self.iv[..]
            } else {
                &data[(i - 1) * block_size..i * block_size]
            };
            Self::xor_in_place(block, prev);
        };

        if data.len() > OPTIMAL_PARALLELISM_THRESHOLD {
            out.par_chunks_mut(block_size).enumerate().for_each(decrypt_one);
        } else {
            out.chunks_mut(block_size).enumerate().for_each(decrypt_one);
        }
        Ok(out)
    }

    fn cfb(&self, data: &[u8], encrypt: bool) -> Vec<u8> {
        let block_size = self.algorithm.block_size();
        let mut out = data.to_vec();
        let mut feedback = self.iv.clone();
        let mut keystream = vec![0u8; block_size];

        for block in out.chunks_mut(block_size) {
            keystream.copy_from_slice(&feedback);
            self.algorithm.encrypt_block(&mut keystream);

            if encrypt {
                Self::xor_in_place(block, &keystream);
                feedback[..block.len()].copy_from_slice(block);
            } else {
                feedback[..block.len()].copy_from_slice(block);
                Self::xor_in_place(block, &keystream);
            }
        }
        out
    }

    fn ofb(&self, data: &[u8]) -> Vec<u8> {
        let block_size = self.algorithm.block_size();
        let mut out = data.to_vec();
        let mut keystream = self.iv.clone();

        for block in out.chunks_mut(block_size) {
            self.algorithm.encrypt_block(&mut keystream[..block_size]);
            Self::xor_in_place(block, &keystream);
        }
        out
    }

    fn ctr(&self, data: &[u8]) -> Vec<u8> {
        if data.len() > OPTIMAL_PARALLELISM_THRESHOLD {
            self.process_ctr_parallel(data)
        } else {
            self.process_ctr_batch(data, 0)
        }
    }

    // XORs `data` with the keystream starting `start_idx` blocks past the IV.
    fn process_ctr_batch(&self, data: &[u8], start_idx: usize) -> Vec<u8> {
        let block_size = self.algorithm.block_size();
        let mut out = data.to_vec();
        let mut counter = self.iv.clone();
        Self::increment_block(&mut counter, start_idx);
        let mut keystream = vec![0u8; block_size];

        for block in out.chunks_mut(block_size) {
            keystream.copy_from_slice(&counter);
            self.algorithm.encrypt_block(&mut keystream);
            Self::xor_in_place(block, &keystream);
            Self::increment_block(&mut counter, 1);
        }
        out
    }

    fn process_ctr_parallel(&self, data: &[u8]) -> Vec<u8> {
        let block_size = self.algorithm.block_size();

        // Chunk boundaries must fall on block boundaries so each chunk can
        // derive its starting counter.
        let optimal_chunk_size = (data.len() / rayon::current_num_threads())
            .clamp(block_size, CHUNK_SIZE)
            / block_size
            * block_size;

        log::debug!(
            "CTR over {} bytes in parallel, chunk size {}",
            data.len(),
            optimal_chunk_size
        );

        data.par_chunks(optimal_chunk_size)
            .enumerate()
            .flat_map_iter(|(chunk_idx, chunk)| {
                let counter_offset = chunk_idx * (optimal_chunk_size / block_size);
                self.process_ctr_batch(chunk, counter_offset)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_block_carries_across_bytes() {
        let mut block = [0x00, 0x00, 0xFF, 0xFF];
        CipherContext::increment_block(&mut block, 1);
        assert_eq!(block, [0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn increment_block_wraps_around() {
        let mut block = [0xFF; 4];
        CipherContext::increment_block(&mut block, 2);
        assert_eq!(block, [0x00, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn increment_block_adds_multi_byte_values() {
        let mut block = [0x00, 0x00, 0x00, 0x10];
        CipherContext::increment_block(&mut block, 0x1_0000 + 0xF0);
        assert_eq!(block, [0x00, 0x01, 0x01, 0x00]);
    }
}
