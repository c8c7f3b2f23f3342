use cryptox::{CryptoSession, Encoding, Method, Mode, Padding};

fn random_bytes(len: usize) -> Vec<u8> {
    use rand::RngCore;
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

fn main() -> Result<(), cryptox::Errors> {
    env_logger::init();

    let text = "The quick brown fox jumps over the lazy dog. Symmetric encryption test string!";

    for method in Method::ALL {
        for mode in [Mode::Cbc, Mode::Ctr] {
            let mut session = CryptoSession::new();
            session
                .with_method(method)
                .with_mode(mode)
                .with_padding(Padding::Pkcs7)
                .key_from_bytes(random_bytes(16))
                .iv_from_bytes(random_bytes(method.block_size()));

            let encrypted = session
                .input_from_string(text)
                .encrypt()
                .to_encoding(Encoding::Base64)
                .into_result()?;

            let decrypted = session
                .input_from(&encrypted, Encoding::Base64)
                .decrypt()
                .to_text()
                .into_result()?;

            assert_eq!(text, decrypted);
            println!("{method} {mode}+PKCS7 OK: {encrypted}");
        }
    }

    Ok(())
}
