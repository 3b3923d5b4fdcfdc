mod decrypt;
mod encrypt;
mod iv;
mod session_key;
mod unwrap;
pub(crate) mod utils;
mod wrap;

pub use decrypt::DecryptAction;
pub use encrypt::{EncryptAction, EncryptedPayload};
pub use iv::IvAction;
pub use session_key::SessionKeyAction;
pub use unwrap::UnwrapAction;
pub use wrap::WrapAction;
