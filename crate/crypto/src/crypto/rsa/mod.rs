pub mod ckm_rsa_pkcs_oaep;

/// Smallest RSA modulus, in bits, accepted for wrapping session keys.
pub const MIN_RSA_MODULUS_LENGTH: u32 = 1024;
