mod hashing;
mod keys;

pub use hashing::{HashingAlgorithm, hashing_algorithm_to_openssl_ref};
pub use keys::{private_key_from_pem, public_key_from_pem};
