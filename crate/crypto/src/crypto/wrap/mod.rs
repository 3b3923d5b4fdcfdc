//! Session key wrapping protocols.
//!
//! Two protocols exist and they are not interoperable: a deployment picks one
//! and sticks to it.
//!  - [`RsaOaepWrapper`]: RSA-OAEP (SHA-256) over the base64 text of the
//!    session key, under the counterparty public key.
//!  - [`AesCbcWrapper`]: AES-CBC under a shared key-encryption key, the random
//!    IV prepended to the ciphertext.

mod aes_cbc;
mod rsa_oaep;
#[allow(clippy::unwrap_used, clippy::panic_in_result_fn)]
#[cfg(test)]
mod tests;

pub use aes_cbc::AesCbcWrapper;
pub use rsa_oaep::{RsaOaepWrapper, unwrap_session_key};

use crate::{crypto::encoding::url_encode, error::result::CryptoResult};

/// Protect a session key for transport to the counterparty.
pub trait SessionKeyWrapper {
    /// Wrap the base64 session key into a base64 envelope.
    fn wrap(&self, session_key_b64: &str) -> CryptoResult<String>;

    /// Wrap, then percent-encode the envelope for use in a URL or a header.
    fn url_encoded_wrap(&self, session_key_b64: &str) -> CryptoResult<String> {
        self.wrap(session_key_b64).map(|wrapped| url_encode(&wrapped))
    }
}

impl<T: SessionKeyWrapper + ?Sized> SessionKeyWrapper for Box<T> {
    fn wrap(&self, session_key_b64: &str) -> CryptoResult<String> {
        (**self).wrap(session_key_b64)
    }
}

/// Wrap `session_key_b64` under the PEM public key with RSA-OAEP SHA-256.
pub fn wrap_session_key(session_key_b64: &str, public_key_pem: &str) -> CryptoResult<String> {
    RsaOaepWrapper::from_pem(public_key_pem)?.wrap(session_key_b64)
}

/// Same as [`wrap_session_key`], percent-encoded.
pub fn url_encoded_wrap_session_key(
    session_key_b64: &str,
    public_key_pem: &str,
) -> CryptoResult<String> {
    RsaOaepWrapper::from_pem(public_key_pem)?.url_encoded_wrap(session_key_b64)
}
