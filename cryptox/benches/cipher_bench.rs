use std::time::Duration;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use rand::RngCore;
use cryptox::crypto::cipher_context::CipherContext;
use cryptox::crypto::cipher_traits::BlockCipher;
use cryptox::crypto::cipher_types::Mode;

struct IdentityCipher;

impl BlockCipher for IdentityCipher {
    fn block_size(&self) -> usize { 8 }
    fn encrypt_block(&self, _: &mut [u8]) {}
    fn decrypt_block(&self, _: &mut [u8]) {}
}

// Mode overhead without any cipher cost, on a buffer above the parallel threshold.
fn bench_mode_overhead(c: &mut Criterion) {
    let mut data = vec![0u8; 64 * 1024 * 1024];
    rand::rng().fill_bytes(&mut data);

    let mut group = c.benchmark_group("Mode overhead 64MB");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));
    group.throughput(Throughput::Bytes(data.len() as u64));

    for mode in Mode::ALL {
        let ctx = CipherContext::new(Box::new(IdentityCipher), mode, vec![0u8; 8]);
        group.bench_with_input(BenchmarkId::new("encrypt", mode), &data, |b, data| {
            b.iter(|| ctx.encrypt(data).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("decrypt", mode), &data, |b, data| {
            b.iter(|| ctx.decrypt(data).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_mode_overhead);
criterion_main!(benches);
