#![allow(dead_code)]

use rand::RngCore;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

/// Random payload whose last byte is never zero, so zero padding round-trips.
pub fn random_bytes_no_trailing_zero(len: usize) -> Vec<u8> {
    let mut buf = random_bytes(len);
    if let Some(last) = buf.last_mut() {
        *last |= 0x01;
    }
    buf
}
