use openssl::{
    rand::rand_bytes,
    symm::{
        Cipher, decrypt as openssl_decrypt, decrypt_aead as openssl_decrypt_aead,
        encrypt as openssl_encrypt, encrypt_aead as openssl_encrypt_aead,
    },
};
use secure_session_logger::trace;
use zeroize::Zeroizing;

use crate::{
    crypto::{IV_LENGTH, TAG_LENGTH},
    crypto_bail, crypto_ensure,
    error::{CryptoError, result::CryptoResult},
};

/// AES 128 GCM key length in bytes.
pub const AES_128_GCM_KEY_LENGTH: usize = 16;
/// AES 192 GCM key length in bytes.
pub const AES_192_GCM_KEY_LENGTH: usize = 24;
/// AES 256 GCM key length in bytes.
pub const AES_256_GCM_KEY_LENGTH: usize = 32;
/// AES GCM nonce length in bytes.
/// The session protocol uses 16-byte nonces rather than the usual 12 bytes;
/// GCM hashes longer nonces into its initial counter block.
pub const AES_GCM_IV_LENGTH: usize = IV_LENGTH;
/// AES GCM tag/mac length in bytes.
pub const AES_GCM_MAC_LENGTH: usize = TAG_LENGTH;

/// AES 128 CBC key length in bytes.
pub const AES_128_CBC_KEY_LENGTH: usize = 16;
/// AES 256 CBC key length in bytes.
pub const AES_256_CBC_KEY_LENGTH: usize = 32;
/// AES CBC iv length in bytes.
pub const AES_CBC_IV_LENGTH: usize = 16;
/// AES CBC has no authentication.
pub const AES_CBC_MAC_LENGTH: usize = 0;

/// The supported symmetric ciphers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymCipher {
    Aes128Gcm,
    Aes192Gcm,
    Aes256Gcm,
    Aes128Cbc,
    Aes256Cbc,
}

impl SymCipher {
    fn to_openssl_cipher(self) -> Cipher {
        match self {
            Self::Aes128Gcm => Cipher::aes_128_gcm(),
            Self::Aes192Gcm => Cipher::aes_192_gcm(),
            Self::Aes256Gcm => Cipher::aes_256_gcm(),
            Self::Aes128Cbc => Cipher::aes_128_cbc(),
            Self::Aes256Cbc => Cipher::aes_256_cbc(),
        }
    }

    /// Get the tag size in bytes.
    #[must_use]
    pub const fn tag_size(&self) -> usize {
        match self {
            Self::Aes128Gcm | Self::Aes192Gcm | Self::Aes256Gcm => AES_GCM_MAC_LENGTH,
            Self::Aes128Cbc | Self::Aes256Cbc => AES_CBC_MAC_LENGTH,
        }
    }

    /// Get the nonce size in bytes.
    #[must_use]
    pub const fn nonce_size(&self) -> usize {
        match self {
            Self::Aes128Gcm | Self::Aes192Gcm | Self::Aes256Gcm => AES_GCM_IV_LENGTH,
            Self::Aes128Cbc | Self::Aes256Cbc => AES_CBC_IV_LENGTH,
        }
    }

    /// Get the key size in bytes.
    #[must_use]
    pub const fn key_size(&self) -> usize {
        match self {
            Self::Aes128Gcm => AES_128_GCM_KEY_LENGTH,
            Self::Aes192Gcm => AES_192_GCM_KEY_LENGTH,
            Self::Aes256Gcm => AES_256_GCM_KEY_LENGTH,
            Self::Aes128Cbc => AES_128_CBC_KEY_LENGTH,
            Self::Aes256Cbc => AES_256_CBC_KEY_LENGTH,
        }
    }

    #[must_use]
    pub const fn is_aead(&self) -> bool {
        self.tag_size() > 0
    }

    /// Select the AES GCM variant matching a raw key length.
    pub fn from_gcm_key_size(key_size: usize) -> CryptoResult<Self> {
        match key_size {
            AES_128_GCM_KEY_LENGTH => Ok(Self::Aes128Gcm),
            AES_192_GCM_KEY_LENGTH => Ok(Self::Aes192Gcm),
            AES_256_GCM_KEY_LENGTH => Ok(Self::Aes256Gcm),
            _ => crypto_bail!(CryptoError::NotSupported(format!(
                "AES key must be 16, 24 or 32 bytes long for AES GCM. Found {key_size} bytes"
            ))),
        }
    }

    /// Select the AES CBC variant matching a raw key length.
    pub fn from_cbc_key_size(key_size: usize) -> CryptoResult<Self> {
        match key_size {
            AES_128_CBC_KEY_LENGTH => Ok(Self::Aes128Cbc),
            AES_256_CBC_KEY_LENGTH => Ok(Self::Aes256Cbc),
            _ => crypto_bail!(CryptoError::NotSupported(format!(
                "AES key must be 16 or 32 bytes long for AES CBC. Found {key_size} bytes"
            ))),
        }
    }
}

/// Generate a random nonce for the given symmetric cipher.
pub fn random_nonce(sym_cipher: SymCipher) -> CryptoResult<Vec<u8>> {
    let mut nonce = vec![0; sym_cipher.nonce_size()];
    rand_bytes(&mut nonce)?;
    Ok(nonce)
}

/// Generate a random key for the given symmetric cipher.
pub fn random_key(sym_cipher: SymCipher) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let mut key = Zeroizing::from(vec![0; sym_cipher.key_size()]);
    rand_bytes(&mut key)?;
    Ok(key)
}

fn check_key_and_nonce(sym_cipher: SymCipher, key: &[u8], nonce: &[u8]) -> CryptoResult<()> {
    crypto_ensure!(
        key.len() == sym_cipher.key_size(),
        CryptoError::InvalidSize(format!(
            "{sym_cipher:?} requires a {} bytes key, got {} bytes",
            sym_cipher.key_size(),
            key.len()
        ))
    );
    // GCM accepts nonces of any non-zero length, CBC needs exactly one block
    let nonce_ok = if sym_cipher.is_aead() {
        !nonce.is_empty()
    } else {
        nonce.len() == sym_cipher.nonce_size()
    };
    crypto_ensure!(
        nonce_ok,
        CryptoError::InvalidSize(format!(
            "{sym_cipher:?}: invalid nonce of {} bytes",
            nonce.len()
        ))
    );
    Ok(())
}

/// Encrypt the plaintext using the given symmetric cipher.
///
/// Return the ciphertext and the tag. CBC uses PKCS#7 padding and returns an
/// empty tag; `aad` is ignored for CBC.
pub fn encrypt(
    sym_cipher: SymCipher,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
    check_key_and_nonce(sym_cipher, key, nonce)?;
    trace!(
        "encrypting {} bytes with {sym_cipher:?}, nonce: {} bytes",
        plaintext.len(),
        nonce.len()
    );
    if !sym_cipher.is_aead() {
        let ciphertext =
            openssl_encrypt(sym_cipher.to_openssl_cipher(), key, Some(nonce), plaintext)?;
        return Ok((ciphertext, vec![]))
    }
    // Create buffer for the tag
    let mut tag = vec![0; sym_cipher.tag_size()];
    let ciphertext = openssl_encrypt_aead(
        sym_cipher.to_openssl_cipher(),
        key,
        Some(nonce),
        aad,
        plaintext,
        tag.as_mut(),
    )?;
    Ok((ciphertext, tag))
}

/// Decrypt the ciphertext using the given symmetric cipher.
///
/// The tag is required for AES GCM and checked before any plaintext is
/// returned; it is ignored for CBC.
pub fn decrypt(
    sym_cipher: SymCipher,
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    check_key_and_nonce(sym_cipher, key, nonce)?;
    trace!(
        "decrypting {} bytes with {sym_cipher:?}, nonce: {} bytes",
        ciphertext.len(),
        nonce.len()
    );
    if !sym_cipher.is_aead() {
        return Ok(Zeroizing::from(openssl_decrypt(
            sym_cipher.to_openssl_cipher(),
            key,
            Some(nonce),
            ciphertext,
        )?))
    }
    crypto_ensure!(
        tag.len() == sym_cipher.tag_size(),
        CryptoError::InvalidSize(format!(
            "tag length mismatch. Expected: {}, got: {}",
            sym_cipher.tag_size(),
            tag.len()
        ))
    );
    Ok(Zeroizing::from(openssl_decrypt_aead(
        sym_cipher.to_openssl_cipher(),
        key,
        Some(nonce),
        aad,
        ciphertext,
        tag,
    )?))
}
