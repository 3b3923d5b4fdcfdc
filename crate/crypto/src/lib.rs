//! Secure session cryptography.
//!
//! A short-lived AES session key is generated on the client, wrapped under the
//! counterparty RSA public key with OAEP, then used to seal individual
//! payloads with AES-GCM. The pure primitives live in [`crypto`];
//! [`SecureSession`] binds a public key and a session key for repeated use.

pub use error::{
    CryptoError, ErrorReason,
    result::{CryptoResult, CryptoResultHelper},
};
pub use session::{SecureSession, create_secure_session};

pub mod crypto;
mod error;
pub mod openssl;
mod session;
