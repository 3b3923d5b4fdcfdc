pub mod encoding;
pub mod rsa;
pub mod session_key;
pub mod symmetric;
pub mod wrap;

/// Length in bytes of a raw session key.
pub const SESSION_KEY_LENGTH: usize = 24;

/// Length in bytes of the initialization vector used for each payload.
pub const IV_LENGTH: usize = 16;

/// Length in bytes of the authentication tag appended to each envelope.
pub const TAG_LENGTH: usize = 16;
