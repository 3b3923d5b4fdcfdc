use openssl::pkey::{PKey, Public};
use secure_session_logger::debug;

use super::SessionKeyWrapper;
use crate::{
    CryptoResultHelper,
    crypto::{
        encoding::{b64_decode, b64_encode},
        rsa::ckm_rsa_pkcs_oaep::{ckm_rsa_pkcs_oaep_key_unwrap, ckm_rsa_pkcs_oaep_key_wrap},
    },
    error::{ErrorReason, result::CryptoResult},
    openssl::{HashingAlgorithm, private_key_from_pem, public_key_from_pem},
};

/// Wraps session keys under the counterparty RSA public key.
///
/// The plaintext handed to RSA-OAEP is the base64 *text* of the session key,
/// not the decoded key bytes: the counterparty expects exactly that.
#[derive(Debug, Clone)]
pub struct RsaOaepWrapper {
    public_key: PKey<Public>,
    hash_fn: HashingAlgorithm,
}

impl RsaOaepWrapper {
    #[must_use]
    pub fn new(public_key: PKey<Public>) -> Self {
        Self {
            public_key,
            hash_fn: HashingAlgorithm::SHA256,
        }
    }

    /// Parse the counterparty public key; a key that cannot be parsed is a
    /// [`crate::CryptoError::KeyWrap`] error.
    pub fn from_pem(public_key_pem: &str) -> CryptoResult<Self> {
        let public_key = public_key_from_pem(public_key_pem).reason(ErrorReason::KeyWrap)?;
        Ok(Self::new(public_key))
    }

    #[must_use]
    pub const fn hash_fn(&self) -> HashingAlgorithm {
        self.hash_fn
    }
}

impl SessionKeyWrapper for RsaOaepWrapper {
    fn wrap(&self, session_key_b64: &str) -> CryptoResult<String> {
        let wrapped = ckm_rsa_pkcs_oaep_key_wrap(
            &self.public_key,
            self.hash_fn,
            session_key_b64.as_bytes(),
        )
        .reason(ErrorReason::KeyWrap)?;
        debug!(
            "session key wrapped with RSA OAEP {:?} under a {} bits key",
            self.hash_fn,
            self.public_key.bits()
        );
        Ok(b64_encode(&wrapped))
    }
}

/// Recover the base64 session key from its RSA-OAEP SHA-256 envelope.
///
/// This is the counterparty side of [`RsaOaepWrapper`]; failures are reported
/// as [`crate::CryptoError::Decryption`].
pub fn unwrap_session_key(wrapped_b64: &str, private_key_pem: &str) -> CryptoResult<String> {
    unwrap_with_private_key(wrapped_b64, private_key_pem).reason(ErrorReason::Decryption)
}

fn unwrap_with_private_key(wrapped_b64: &str, private_key_pem: &str) -> CryptoResult<String> {
    let private_key = private_key_from_pem(private_key_pem)?;
    let wrapped = b64_decode(wrapped_b64)?;
    let session_key =
        ckm_rsa_pkcs_oaep_key_unwrap(&private_key, HashingAlgorithm::SHA256, &wrapped)?;
    Ok(String::from_utf8(session_key.to_vec())?)
}
