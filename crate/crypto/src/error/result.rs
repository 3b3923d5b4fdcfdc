use std::fmt::Display;

use crate::error::{CryptoError, ErrorReason};

pub type CryptoResult<R> = Result<R, CryptoError>;

pub trait CryptoResultHelper<T> {
    /// Report the error under the given operation family.
    fn reason(self, reason: ErrorReason) -> CryptoResult<T>;

    fn context(self, context: &str) -> CryptoResult<T>;

    fn with_context<D, O>(self, op: O) -> CryptoResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D;
}

impl<T, E> CryptoResultHelper<T> for Result<T, E>
where
    E: Into<CryptoError>,
{
    fn reason(self, reason: ErrorReason) -> CryptoResult<T> {
        self.map_err(|e| Into::<CryptoError>::into(e).reason(reason))
    }

    fn context(self, context: &str) -> CryptoResult<T> {
        self.map_err(|e| {
            let e: CryptoError = e.into();
            CryptoError::Default(format!("{context}: {e}"))
        })
    }

    fn with_context<D, O>(self, op: O) -> CryptoResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.map_err(|e| {
            let e: CryptoError = e.into();
            CryptoError::Default(format!("{}: {e}", op()))
        })
    }
}

impl<T> CryptoResultHelper<T> for Option<T> {
    fn reason(self, reason: ErrorReason) -> CryptoResult<T> {
        self.ok_or_else(|| CryptoError::from_reason(reason, "no value".to_owned()))
    }

    fn context(self, context: &str) -> CryptoResult<T> {
        self.ok_or_else(|| CryptoError::Default(context.to_owned()))
    }

    fn with_context<D, O>(self, op: O) -> CryptoResult<T>
    where
        D: Display + Send + Sync + 'static,
        O: FnOnce() -> D,
    {
        self.ok_or_else(|| CryptoError::Default(format!("{}", op())))
    }
}
