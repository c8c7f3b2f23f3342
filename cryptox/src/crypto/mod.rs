pub mod cipher_context;
pub mod cipher_traits;
pub mod cipher_types;
pub mod codec;
pub mod error;
pub mod method;
pub mod padding;
pub mod session;
pub mod tea;
pub mod validator;
