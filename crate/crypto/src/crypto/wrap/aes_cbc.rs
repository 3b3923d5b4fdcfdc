use secure_session_logger::debug;
use zeroize::Zeroizing;

use super::SessionKeyWrapper;
use crate::{
    CryptoResultHelper,
    crypto::{
        encoding::{b64_decode, b64_encode},
        symmetric::symmetric_ciphers::{SymCipher, decrypt, encrypt, random_nonce},
    },
    crypto_ensure,
    error::{CryptoError, ErrorReason, result::CryptoResult},
};

/// Wraps session keys under a shared AES key-encryption key.
///
/// The envelope is `base64(iv || AES-CBC(kek, session_key_b64))` with a
/// fresh 16-byte IV per wrap and PKCS#7 padding.
pub struct AesCbcWrapper {
    kek: Zeroizing<Vec<u8>>,
    sym_cipher: SymCipher,
}

impl AesCbcWrapper {
    /// Build a wrapper from a 16 or 32 bytes key-encryption key.
    pub fn new(kek: &[u8]) -> CryptoResult<Self> {
        let sym_cipher = SymCipher::from_cbc_key_size(kek.len()).reason(ErrorReason::KeyWrap)?;
        Ok(Self {
            kek: Zeroizing::new(kek.to_vec()),
            sym_cipher,
        })
    }

    /// Recover the base64 session key from an envelope produced by
    /// [`SessionKeyWrapper::wrap`].
    pub fn unwrap(&self, wrapped_b64: &str) -> CryptoResult<String> {
        self.unwrap_envelope(wrapped_b64)
            .reason(ErrorReason::Decryption)
    }

    fn wrap_envelope(&self, session_key_b64: &str) -> CryptoResult<String> {
        let iv = random_nonce(self.sym_cipher)?;
        let (ciphertext, _) =
            encrypt(self.sym_cipher, &self.kek, &iv, &[], session_key_b64.as_bytes())?;
        Ok(b64_encode(&[iv, ciphertext].concat()))
    }

    fn unwrap_envelope(&self, wrapped_b64: &str) -> CryptoResult<String> {
        let envelope = b64_decode(wrapped_b64)?;
        let iv_len = self.sym_cipher.nonce_size();
        crypto_ensure!(
            envelope.len() > iv_len,
            CryptoError::InvalidSize(format!(
                "the wrapped key is {} bytes long, no room for a ciphertext after the IV",
                envelope.len()
            ))
        );
        let (iv, ciphertext) = envelope.split_at(iv_len);
        let session_key = decrypt(self.sym_cipher, &self.kek, iv, &[], ciphertext, &[])?;
        Ok(String::from_utf8(session_key.to_vec())?)
    }
}

impl SessionKeyWrapper for AesCbcWrapper {
    fn wrap(&self, session_key_b64: &str) -> CryptoResult<String> {
        let wrapped = self
            .wrap_envelope(session_key_b64)
            .reason(ErrorReason::KeyWrap)?;
        debug!("session key wrapped with {:?}", self.sym_cipher);
        Ok(wrapped)
    }
}
