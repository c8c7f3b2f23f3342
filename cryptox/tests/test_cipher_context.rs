mod common;

use common::random_bytes;
use cryptox::crypto::cipher_context::CipherContext;
use cryptox::crypto::cipher_traits::BlockCipher;
use cryptox::crypto::cipher_types::{Method, Mode};
use cryptox::crypto::error::ModeError;
use cryptox::crypto::method::new_cipher;
use hex_literal::hex;

struct IdentityCipher;

impl BlockCipher for IdentityCipher {
    fn block_size(&self) -> usize {
        8
    }

    fn encrypt_block(&self, _block: &mut [u8]) {}

    fn decrypt_block(&self, _block: &mut [u8]) {}
}

const SP800_KEY: [u8; 16] = hex!("2b7e151628aed2a6abf7158809cf4f3c");
const SP800_IV: [u8; 16] = hex!("000102030405060708090a0b0c0d0e0f");
const SP800_PLAINTEXT: [u8; 32] = hex!(
    "6bc1bee22e409f96e93d7e117393172a"
    "ae2d8a571e03ac9c9eb76fac45af8e51"
);

fn aes_context(mode: Mode, iv: &[u8]) -> CipherContext {
    CipherContext::new(new_cipher(Some(Method::Aes), &SP800_KEY).unwrap(), mode, iv)
}

#[test]
fn test_cbc_aes128_sp800_38a() {
    let ctx = aes_context(Mode::Cbc, &SP800_IV);
    let ciphertext = ctx.encrypt(&SP800_PLAINTEXT).unwrap();
    assert_eq!(
        ciphertext,
        hex!(
            "7649abac8119b246cee98e9b12e9197d"
            "5086cb9b507219ee95db113a917678b2"
        )
    );
    assert_eq!(ctx.decrypt(&ciphertext).unwrap(), SP800_PLAINTEXT);
}

#[test]
fn test_cfb_aes128_sp800_38a() {
    let ctx = aes_context(Mode::Cfb, &SP800_IV);
    let ciphertext = ctx.encrypt(&SP800_PLAINTEXT).unwrap();
    assert_eq!(
        ciphertext,
        hex!(
            "3b3fd92eb72dad20333449f8e83cfb4a"
            "c8a64537a0b3a93fcde3cdad9f1ce58b"
        )
    );
    assert_eq!(ctx.decrypt(&ciphertext).unwrap(), SP800_PLAINTEXT);
}

#[test]
fn test_ofb_aes128_sp800_38a() {
    let ctx = aes_context(Mode::Ofb, &SP800_IV);
    let ciphertext = ctx.encrypt(&SP800_PLAINTEXT).unwrap();
    assert_eq!(
        ciphertext,
        hex!(
            "3b3fd92eb72dad20333449f8e83cfb4a"
            "7789508d16918f03f53c52dac54ed825"
        )
    );
    assert_eq!(ctx.decrypt(&ciphertext).unwrap(), SP800_PLAINTEXT);
}

#[test]
fn test_ctr_aes128_sp800_38a() {
    let counter = hex!("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let ctx = aes_context(Mode::Ctr, &counter);
    let ciphertext = ctx.encrypt(&SP800_PLAINTEXT).unwrap();
    assert_eq!(
        ciphertext,
        hex!(
            "874d6191b620e3261bef6864990db6ce"
            "9806f66b7970fdff8617187bb9fffdff"
        )
    );
    assert_eq!(ctx.decrypt(&ciphertext).unwrap(), SP800_PLAINTEXT);
}

#[test]
fn test_stream_modes_handle_partial_blocks() {
    for mode in [Mode::Cfb, Mode::Ofb, Mode::Ctr] {
        let ctx = aes_context(mode, &SP800_IV);
        let data = random_bytes(37);
        let ciphertext = ctx.encrypt(&data).unwrap();
        assert_eq!(ciphertext.len(), 37, "{mode}");
        assert_eq!(ctx.decrypt(&ciphertext).unwrap(), data, "{mode}");
    }
}

#[test]
fn test_stream_prefix_matches_full_encryption() {
    let data = random_bytes(100);
    for mode in [Mode::Cfb, Mode::Ofb, Mode::Ctr] {
        let ctx = aes_context(mode, &SP800_IV);
        let full = ctx.encrypt(&data).unwrap();
        let prefix = ctx.encrypt(&data[..41]).unwrap();
        assert_eq!(prefix, full[..41], "{mode}");
    }
}

#[test]
fn test_cbc_rejects_partial_blocks() {
    let ctx = aes_context(Mode::Cbc, &SP800_IV);
    assert_eq!(
        ctx.encrypt(&[0u8; 17]),
        Err(ModeError::NotBlockAligned {
            len: 17,
            block_size: 16
        })
    );
    assert!(ctx.decrypt(&[0u8; 15]).is_err());
}

#[test]
fn test_wrong_iv_size_is_an_error_not_a_panic() {
    for mode in Mode::ALL {
        let ctx = aes_context(mode, &[0u8; 8]);
        assert_eq!(
            ctx.encrypt(&[0u8; 16]),
            Err(ModeError::IvSizeMismatch {
                iv_len: 8,
                block_size: 16
            }),
            "{mode}"
        );
    }
}

#[test]
fn test_identity_cbc_chains_with_iv() {
    let iv = [1u8; 8];
    let ctx = CipherContext::new(Box::new(IdentityCipher), Mode::Cbc, iv);
    let ciphertext = ctx.encrypt(&[0u8; 16]).unwrap();
    // c0 = p0 ^ iv, c1 = p1 ^ c0
    assert_eq!(ciphertext[..8], [1u8; 8]);
    assert_eq!(ciphertext[8..], [1u8; 8]);
    assert_eq!(ctx.decrypt(&ciphertext).unwrap(), vec![0u8; 16]);
}

#[test]
fn test_ctr_parallel_path_keeps_counter_sequence() {
    // With an identity cipher the CTR keystream is the counter itself.
    let len = 5 * 1024 * 1024 + 3;
    let ctx = CipherContext::new(Box::new(IdentityCipher), Mode::Ctr, [0u8; 8]);
    let keystream = ctx.encrypt(&vec![0u8; len]).unwrap();
    assert_eq!(keystream.len(), len);

    for index in [0u64, 1, 255, 131_072, 600_000, (len as u64 / 8) - 1] {
        let start = index as usize * 8;
        assert_eq!(keystream[start..start + 8], index.to_be_bytes(), "block {index}");
    }
}

#[test]
fn test_large_round_trips_use_parallel_paths() {
    let data = random_bytes(4 * 1024 * 1024 + 64);
    for mode in [Mode::Cbc, Mode::Ctr] {
        let ctx = aes_context(mode, &SP800_IV);
        let ciphertext = ctx.encrypt(&data).unwrap();
        assert_ne!(ciphertext[..64], data[..64]);
        assert_eq!(ctx.decrypt(&ciphertext).unwrap(), data, "{mode}");
    }
}

#[test]
fn test_ctr_large_matches_small_prefix() {
    let data = random_bytes(4 * 1024 * 1024 + 1000);
    let ctx = aes_context(Mode::Ctr, &SP800_IV);
    let full = ctx.encrypt(&data).unwrap();
    let prefix = ctx.encrypt(&data[..4096]).unwrap();
    assert_eq!(prefix, full[..4096]);
}
