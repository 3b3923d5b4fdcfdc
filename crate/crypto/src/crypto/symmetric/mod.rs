pub mod codec;
pub mod symmetric_ciphers;
