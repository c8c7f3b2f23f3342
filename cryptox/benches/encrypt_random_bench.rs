use criterion::{criterion_group, criterion_main, Criterion, BatchSize};
use cryptox::{CryptoSession, Method, Mode, Padding};

fn random_bytes(len: usize) -> Vec<u8> {
    use rand::RngCore;
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

fn bench_all_methods_and_modes(c: &mut Criterion) {
    let data = random_bytes(1024);
    let key = random_bytes(16);

    for method in Method::ALL {
        for mode in Mode::ALL {
            let bench_name = format!("{method} {mode}+PKCS7");

            let mut session = CryptoSession::new();
            session
                .with_method(method)
                .with_mode(mode)
                .with_padding(Padding::Pkcs7)
                .key_from_bytes(key.clone())
                .iv_from_bytes(vec![0u8; method.block_size()]);

            c.bench_function(&bench_name, |b| {
                b.iter_batched(
                    || data.clone(),
                    |input| {
                        let out = session.input_from_bytes(input).encrypt().to_bytes();
                        assert!(out.is_ok());
                    },
                    BatchSize::SmallInput,
                )
            });
        }
    }
}

criterion_group!(benches, bench_all_methods_and_modes);
criterion_main!(benches);
