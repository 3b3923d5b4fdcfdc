//! RSA key encryption with OAEP padding (PKCS #1 v2.2, a.k.a. `CKM_RSA_PKCS_OAEP`).
//!
//! The maximum plaintext length is `k - 2 - 2 * hLen` where
//!  - `k` is the length in octets of the RSA modulus
//!  - `hLen` is the length in octets of the hash function output
//!
//! The ciphertext length is always the modulus length. OAEP is randomized:
//! encrypting the same plaintext twice yields two different ciphertexts.
use openssl::{
    pkey::{PKey, Private, Public},
    pkey_ctx::PkeyCtx,
    rsa::Padding,
};
use secure_session_logger::trace;
use zeroize::Zeroizing;

use super::MIN_RSA_MODULUS_LENGTH;
use crate::{
    crypto_bail, crypto_ensure,
    error::{CryptoError, result::CryptoResult},
    openssl::{HashingAlgorithm, hashing_algorithm_to_openssl_ref},
};

/// Largest plaintext, in bytes, that OAEP can encrypt under `pub_key`.
pub fn max_plaintext_length(
    pub_key: &PKey<Public>,
    hash_fn: HashingAlgorithm,
) -> CryptoResult<usize> {
    let modulus_bytes_len = usize::try_from(pub_key.rsa()?.size())?;
    let hash_len = hashing_algorithm_to_openssl_ref(hash_fn).size();
    modulus_bytes_len
        .checked_sub(2 + 2 * hash_len)
        .ok_or_else(|| {
            CryptoError::InvalidSize(format!(
                "a {modulus_bytes_len} bytes RSA modulus is too small for OAEP with {hash_fn:?}"
            ))
        })
}

/// Key Wrap using RSA OAEP.
///
/// Arguments:
/// - `pub_key`: the public key used to wrap the key
/// - `hash_fn`: the hash function to use for OAEP (also used by MGF1)
/// - `key_to_wrap`: the bytes to wrap
pub fn ckm_rsa_pkcs_oaep_key_wrap(
    pub_key: &PKey<Public>,
    hash_fn: HashingAlgorithm,
    key_to_wrap: &[u8],
) -> CryptoResult<Vec<u8>> {
    let max_len = max_plaintext_length(pub_key, hash_fn)?;
    if key_to_wrap.len() > max_len {
        crypto_bail!(CryptoError::InvalidSize(format!(
            "RSA OAEP: {} bytes cannot be wrapped by a {} bits key with {hash_fn:?}: at most \
             {max_len} bytes",
            key_to_wrap.len(),
            pub_key.bits()
        )))
    }
    let (mut ctx, mut ciphertext) = init_ckm_rsa_pkcs_oaep_encryption_context(pub_key, hash_fn)?;
    ctx.encrypt_to_vec(key_to_wrap, &mut ciphertext)?;
    trace!(
        "RSA OAEP wrapped {} bytes into {} bytes",
        key_to_wrap.len(),
        ciphertext.len()
    );
    Ok(ciphertext)
}

fn init_ckm_rsa_pkcs_oaep_encryption_context(
    pub_key: &PKey<Public>,
    hash_fn: HashingAlgorithm,
) -> CryptoResult<(PkeyCtx<Public>, Vec<u8>)> {
    let rsa_pub_key = pub_key.rsa()?;
    crypto_ensure!(
        pub_key.bits() >= MIN_RSA_MODULUS_LENGTH,
        "RSA OAEP encryption error: RSA key has insufficient size: expected >= {} bits and got {} \
         bits",
        MIN_RSA_MODULUS_LENGTH,
        pub_key.bits()
    );

    // The ciphertext has the same length as the modulus.
    let encapsulation_bytes_len = usize::try_from(rsa_pub_key.size())?;
    let ciphertext = Vec::with_capacity(encapsulation_bytes_len);

    let hash_fn = hashing_algorithm_to_openssl_ref(hash_fn);
    let mut ctx = PkeyCtx::new(pub_key)?;
    ctx.encrypt_init()?;
    ctx.set_rsa_padding(Padding::PKCS1_OAEP)?;
    ctx.set_rsa_oaep_md(hash_fn)?;
    ctx.set_rsa_mgf1_md(hash_fn)?;
    Ok((ctx, ciphertext))
}

/// Key Unwrap using RSA OAEP.
///
/// The wrapped key must be exactly as long as the RSA modulus.
///
/// Arguments:
/// - `priv_key`: the private key matching the wrapping public key
/// - `hash_fn`: the hash function used for OAEP when wrapping
/// - `wrapped_key`: the wrapped bytes
pub fn ckm_rsa_pkcs_oaep_key_unwrap(
    priv_key: &PKey<Private>,
    hash_fn: HashingAlgorithm,
    wrapped_key: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let rsa_priv_key = priv_key.rsa()?;
    let modulus_bytes_len = usize::try_from(rsa_priv_key.size())?;
    crypto_ensure!(
        wrapped_key.len() == modulus_bytes_len,
        CryptoError::InvalidSize(format!(
            "RSA OAEP: wrapped key is {} bytes, expected {modulus_bytes_len} bytes",
            wrapped_key.len()
        ))
    );

    let hash_fn = hashing_algorithm_to_openssl_ref(hash_fn);
    let mut plaintext = Zeroizing::new(Vec::with_capacity(modulus_bytes_len));
    let mut ctx = PkeyCtx::new(priv_key)?;
    ctx.decrypt_init()?;
    ctx.set_rsa_padding(Padding::PKCS1_OAEP)?;
    ctx.set_rsa_oaep_md(hash_fn)?;
    ctx.set_rsa_mgf1_md(hash_fn)?;
    ctx.decrypt_to_vec(wrapped_key, &mut plaintext)?;
    Ok(plaintext)
}
