//! Authenticated payload encryption under a session key.
//!
//! An envelope is `base64(ciphertext || tag)`: the 16-byte AES-GCM tag is
//! appended, there is no length prefix, and the split point is recovered as
//! `len - 16` when decoding. The AES variant follows the raw key length.
use secure_session_logger::debug;
use zeroize::Zeroizing;

use super::symmetric_ciphers::{self, SymCipher};
use crate::{
    CryptoResultHelper,
    crypto::{
        TAG_LENGTH,
        encoding::{b64_decode, b64_decode_secret, b64_encode},
    },
    crypto_ensure,
    error::{CryptoError, ErrorReason, result::CryptoResult},
};

/// Encrypt `plaintext` under the raw `session_key` with nonce `iv`.
///
/// Returns the base64 envelope. Fails with [`CryptoError::Encryption`] when
/// the key is not 16, 24 or 32 bytes long, the IV is empty, or the cipher
/// reports an error.
pub fn encrypt(plaintext: &[u8], session_key: &[u8], iv: &[u8]) -> CryptoResult<String> {
    seal(plaintext, session_key, iv).reason(ErrorReason::Encryption)
}

fn seal(plaintext: &[u8], session_key: &[u8], iv: &[u8]) -> CryptoResult<String> {
    let sym_cipher = SymCipher::from_gcm_key_size(session_key.len())?;
    let (mut envelope, tag) =
        symmetric_ciphers::encrypt(sym_cipher, session_key, iv, &[], plaintext)?;
    envelope.extend_from_slice(&tag);
    debug!(
        "sealed {} bytes into a {} bytes envelope",
        plaintext.len(),
        envelope.len()
    );
    Ok(b64_encode(&envelope))
}

/// Decrypt a base64 envelope with the base64 `iv_b64` and `session_key_b64`.
///
/// The recovered plaintext is returned base64 encoded: callers decode once
/// more to get the original bytes.
///
/// Every failure is reported as [`CryptoError::Decryption`]: a wrong key, a
/// wrong or malformed IV and a tampered envelope cannot be told apart.
pub fn decrypt(iv_b64: &str, envelope_b64: &str, session_key_b64: &str) -> CryptoResult<String> {
    let plaintext = open(iv_b64, envelope_b64, session_key_b64)?;
    Ok(b64_encode(&plaintext))
}

/// Decrypt a base64 envelope and return the raw plaintext bytes.
pub fn open(
    iv_b64: &str,
    envelope_b64: &str,
    session_key_b64: &str,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    open_envelope(iv_b64, envelope_b64, session_key_b64).reason(ErrorReason::Decryption)
}

fn open_envelope(
    iv_b64: &str,
    envelope_b64: &str,
    session_key_b64: &str,
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let session_key = b64_decode_secret(session_key_b64)?;
    let sym_cipher = SymCipher::from_gcm_key_size(session_key.len())?;
    let iv = b64_decode(iv_b64)?;
    let envelope = b64_decode(envelope_b64)?;
    let (ciphertext, tag) = split_envelope(&envelope)?;
    let plaintext =
        symmetric_ciphers::decrypt(sym_cipher, &session_key, &iv, &[], ciphertext, tag)?;
    debug!("opened a {} bytes envelope", envelope.len());
    Ok(plaintext)
}

/// Split a decoded envelope into its ciphertext and its trailing tag.
pub fn split_envelope(envelope: &[u8]) -> CryptoResult<(&[u8], &[u8])> {
    crypto_ensure!(
        envelope.len() >= TAG_LENGTH,
        CryptoError::InvalidSize(format!(
            "the envelope is {} bytes long, shorter than the {TAG_LENGTH} bytes tag",
            envelope.len()
        ))
    );
    Ok(envelope.split_at(envelope.len() - TAG_LENGTH))
}

/// Drop the trailing 16-byte block of a decrypted buffer.
///
/// Buffers of 16 bytes or less are returned whole.
#[must_use]
pub fn strip_trailing_block(decrypted: &[u8]) -> &[u8] {
    if decrypted.len() > TAG_LENGTH {
        decrypted.split_at(decrypted.len() - TAG_LENGTH).0
    } else {
        decrypted
    }
}
