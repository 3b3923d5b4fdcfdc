use std::fmt;

use secure_session_logger::debug;
use zeroize::Zeroizing;

use crate::{
    CryptoResultHelper,
    crypto::{
        encoding::b64_decode_secret,
        session_key::generate_session_key,
        symmetric::codec,
        wrap::{SessionKeyWrapper, url_encoded_wrap_session_key, wrap_session_key},
    },
    error::{ErrorReason, result::CryptoResult},
};

/// A public key and a session key bound together for repeated use.
///
/// The session key is fixed at construction: every call encrypts under the
/// same key, so the counterparty only needs to unwrap it once. Sessions are
/// immutable and may be shared across threads.
#[derive(Clone)]
pub struct SecureSession {
    public_key_pem: String,
    session_key_b64: Zeroizing<String>,
}

impl SecureSession {
    /// Bind `public_key_pem` to `session_key_b64`, or to a freshly generated
    /// session key when none (or an empty one) is supplied.
    ///
    /// The public key is not parsed here: an invalid key surfaces as a
    /// [`crate::CryptoError::KeyWrap`] error on the first wrap.
    pub fn new(public_key_pem: impl Into<String>, session_key_b64: Option<String>) -> Self {
        let session_key_b64 = match session_key_b64 {
            Some(key) if !key.is_empty() => key,
            _ => {
                debug!("no session key supplied, generating one");
                generate_session_key()
            }
        };
        Self {
            public_key_pem: public_key_pem.into(),
            session_key_b64: Zeroizing::new(session_key_b64),
        }
    }

    /// The base64 session key.
    #[must_use]
    pub fn session_key(&self) -> &str {
        &self.session_key_b64
    }

    #[must_use]
    pub fn public_key(&self) -> &str {
        &self.public_key_pem
    }

    /// Wrap the session key under the bound public key.
    pub fn wrap_session_key(&self) -> CryptoResult<String> {
        wrap_session_key(&self.session_key_b64, &self.public_key_pem)
    }

    /// Wrap the session key, percent-encoded for a URL or a header.
    pub fn url_encoded_session_key(&self) -> CryptoResult<String> {
        url_encoded_wrap_session_key(&self.session_key_b64, &self.public_key_pem)
    }

    /// Wrap the session key with another protocol than RSA-OAEP.
    pub fn wrap_session_key_with<W: SessionKeyWrapper + ?Sized>(
        &self,
        wrapper: &W,
    ) -> CryptoResult<String> {
        wrapper.wrap(&self.session_key_b64)
    }

    /// Encrypt `plaintext` with `iv` under the session key.
    ///
    /// A session key that is not valid base64 is reported as
    /// [`crate::CryptoError::Encryption`].
    pub fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> CryptoResult<String> {
        let session_key =
            b64_decode_secret(&self.session_key_b64).reason(ErrorReason::Encryption)?;
        codec::encrypt(plaintext, &session_key, iv)
    }

    /// Decrypt an envelope sealed under the session key.
    ///
    /// As with [`codec::decrypt`], the plaintext comes back base64 encoded.
    pub fn decrypt(&self, iv_b64: &str, envelope_b64: &str) -> CryptoResult<String> {
        codec::decrypt(iv_b64, envelope_b64, &self.session_key_b64)
    }

    /// Decrypt card data returned by the counterparty.
    ///
    /// The counterparty pads card data with a trailing 16-byte block that is
    /// dropped here; plaintexts of 16 bytes or less are returned whole.
    pub fn decrypt_card_data(
        &self,
        iv_b64: &str,
        envelope_b64: &str,
    ) -> CryptoResult<Zeroizing<Vec<u8>>> {
        let plaintext = codec::open(iv_b64, envelope_b64, &self.session_key_b64)?;
        Ok(Zeroizing::new(
            codec::strip_trailing_block(&plaintext).to_vec(),
        ))
    }
}

impl fmt::Debug for SecureSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureSession")
            .field("public_key_pem", &self.public_key_pem)
            .field("session_key_b64", &"***")
            .finish()
    }
}

/// Create a [`SecureSession`]; see [`SecureSession::new`].
pub fn create_secure_session(
    public_key_pem: impl Into<String>,
    session_key_b64: Option<String>,
) -> SecureSession {
    SecureSession::new(public_key_pem, session_key_b64)
}
