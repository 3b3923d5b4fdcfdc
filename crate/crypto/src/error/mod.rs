use std::num::TryFromIntError;

use thiserror::Error;

pub(crate) mod result;

/// The operation family an error is reported under.
///
/// Every public operation of this crate fails with exactly one of these
/// families, whatever the underlying cause was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorReason {
    KeyWrap,
    Encryption,
    Decryption,
}

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Failed to wrap session key: {0}")]
    KeyWrap(String),

    #[error("Failed to encrypt: {0}")]
    Encryption(String),

    #[error("Failed to decrypt: {0}")]
    Decryption(String),

    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    #[error("Conversion Error: {0}")]
    ConversionError(String),

    #[error("{0}")]
    Default(String),

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Not Supported: {0}")]
    NotSupported(String),

    #[error("OpenSSL Error: {0}")]
    OpenSSL(String),
}

impl CryptoError {
    /// Fold this error into the given operation family.
    ///
    /// Errors already tagged with a family keep their message untouched.
    #[must_use]
    pub fn reason(self, reason: ErrorReason) -> Self {
        match self {
            Self::KeyWrap(_) | Self::Encryption(_) | Self::Decryption(_) => self,
            other => Self::from_reason(reason, other.to_string()),
        }
    }

    pub(crate) const fn from_reason(reason: ErrorReason, message: String) -> Self {
        match reason {
            ErrorReason::KeyWrap => Self::KeyWrap(message),
            ErrorReason::Encryption => Self::Encryption(message),
            ErrorReason::Decryption => Self::Decryption(message),
        }
    }

    /// The operation family of this error, if it has been tagged with one.
    #[must_use]
    pub const fn error_reason(&self) -> Option<ErrorReason> {
        match self {
            Self::KeyWrap(_) => Some(ErrorReason::KeyWrap),
            Self::Encryption(_) => Some(ErrorReason::Encryption),
            Self::Decryption(_) => Some(ErrorReason::Decryption),
            _ => None,
        }
    }
}

impl From<openssl::error::ErrorStack> for CryptoError {
    fn from(e: openssl::error::ErrorStack) -> Self {
        Self::OpenSSL(format!("Error: {e}. Details: {e:?}"))
    }
}

impl From<TryFromIntError> for CryptoError {
    fn from(e: TryFromIntError) -> Self {
        Self::ConversionError(e.to_string())
    }
}

impl From<std::string::FromUtf8Error> for CryptoError {
    fn from(e: std::string::FromUtf8Error) -> Self {
        Self::ConversionError(e.to_string())
    }
}

/// Return early with an error if a condition is not satisfied.
///
/// This macro is equivalent to `if !$cond { return Err(From::from($err)); }`.
#[macro_export]
macro_rules! crypto_ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::crypto_error!($msg));
        }
    };
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($err);
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return ::core::result::Result::Err($crate::crypto_error!($fmt, $($arg)*));
        }
    };
}

/// Construct a crypto error from a string.
#[macro_export]
macro_rules! crypto_error {
    ($msg:literal) => {
        $crate::CryptoError::Default(::core::format_args!($msg).to_string())
    };
    ($err:expr $(,)?) => ({
        $crate::CryptoError::Default($err.to_string())
    });
    ($fmt:expr, $($arg:tt)*) => {
        $crate::CryptoError::Default(::core::format_args!($fmt, $($arg)*).to_string())
    };
}

/// Return early with an error.
#[macro_export]
macro_rules! crypto_bail {
    ($msg:literal) => {
        return ::core::result::Result::Err($crate::crypto_error!($msg))
    };
    ($err:expr $(,)?) => {
        return ::core::result::Result::Err($err)
    };
    ($fmt:expr, $($arg:tt)*) => {
        return ::core::result::Result::Err($crate::crypto_error!($fmt, $($arg)*))
    };
}
