//! Text encodings used on the wire: standard padded base64 for every binary
//! artifact and percent-encoding for values placed in URLs or headers.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use zeroize::Zeroizing;

use crate::error::result::CryptoResult;

#[must_use]
pub fn b64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

pub fn b64_decode(text: &str) -> CryptoResult<Vec<u8>> {
    Ok(STANDARD.decode(text)?)
}

/// Decode key material; the decoded bytes are wiped when dropped.
pub fn b64_decode_secret(text: &str) -> CryptoResult<Zeroizing<Vec<u8>>> {
    Ok(Zeroizing::new(STANDARD.decode(text)?))
}

/// Percent-encode a value the way `encodeURIComponent` does for base64 text:
/// `+`, `/` and `=` are escaped, alphanumerics are kept.
#[must_use]
pub fn url_encode(text: &str) -> String {
    url::form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
