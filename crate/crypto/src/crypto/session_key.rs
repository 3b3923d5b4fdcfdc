//! Session key and IV generation.
//!
//! Both draw from the thread-local CSPRNG seeded by the operating system. An
//! unavailable entropy source aborts the calling thread: there is nothing a
//! caller could do to recover from it.

use zeroize::Zeroizing;

use crate::crypto::{IV_LENGTH, SESSION_KEY_LENGTH, encoding::b64_encode};

/// Generate a fresh 24-byte session key, base64 encoded.
#[must_use]
pub fn generate_session_key() -> String {
    let key = Zeroizing::new(rand::random::<[u8; SESSION_KEY_LENGTH]>());
    b64_encode(key.as_slice())
}

/// Generate a fresh 16-byte initialization vector.
///
/// An IV must never be reused with the same session key.
#[must_use]
pub fn generate_iv() -> [u8; IV_LENGTH] {
    rand::random()
}
