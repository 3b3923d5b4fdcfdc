//! RSA key parsing.
//!
//! Counterparties hand out their public key in several shapes: regular
//! multi-line PEM, PEM collapsed on a single line, PKCS#1 `RSA PUBLIC KEY`
//! PEM, or the bare base64 DER body. All of them are accepted.

use openssl::{
    pkey::{PKey, Private, Public},
    rsa::Rsa,
};

use crate::{
    CryptoResultHelper,
    crypto::encoding::b64_decode,
    error::{CryptoError, result::CryptoResult},
};

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_DASHES: &str = "-----";
const PKCS1_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

/// Parse a public key from PEM text.
pub fn public_key_from_pem(pem: &str) -> CryptoResult<PKey<Public>> {
    let pem = pem.trim();
    if let Ok(public_key) = PKey::public_key_from_pem(pem.as_bytes()) {
        return Ok(public_key)
    }
    let (label, body) = split_armor(pem)?;
    let der = b64_decode(&body).context("invalid public key PEM body")?;
    let public_key = if label == Some(PKCS1_PUBLIC_KEY_LABEL) {
        PKey::from_rsa(Rsa::public_key_from_der_pkcs1(&der)?)?
    } else {
        PKey::public_key_from_der(&der)?
    };
    Ok(public_key)
}

/// Parse a PKCS#8 or traditional RSA private key from PEM text.
pub fn private_key_from_pem(pem: &str) -> CryptoResult<PKey<Private>> {
    Ok(PKey::private_key_from_pem(pem.trim().as_bytes())?)
}

/// Split PEM armor into its label and its whitespace-free base64 body.
///
/// Text without armor is returned whole as the body.
fn split_armor(pem: &str) -> CryptoResult<(Option<&str>, String)> {
    let Some(rest) = pem.strip_prefix(PEM_BEGIN) else {
        return Ok((None, strip_whitespace(pem)))
    };
    let (label, rest) = rest
        .split_once(PEM_DASHES)
        .context("PEM header is not terminated")?;
    let (body, footer) = rest
        .split_once(PEM_END)
        .context("PEM footer is missing")?;
    if !footer.starts_with(label) {
        return Err(CryptoError::Default(format!(
            "PEM footer does not match the {label} header"
        )))
    }
    Ok((Some(label), strip_whitespace(body)))
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use openssl::{pkey::PKey, rsa::Rsa};

    use super::{private_key_from_pem, public_key_from_pem};
    use crate::crypto::encoding::b64_encode;

    #[test]
    fn test_public_key_shapes() {
        let rsa = Rsa::generate(2048).unwrap();
        let private_key = PKey::from_rsa(rsa.clone()).unwrap();
        let expected = private_key.public_key_to_der().unwrap();

        let multi_line = String::from_utf8(private_key.public_key_to_pem().unwrap()).unwrap();
        let single_line: String = multi_line.lines().collect();
        let bare_der = b64_encode(&expected);
        let pkcs1 = String::from_utf8(rsa.public_key_to_pem_pkcs1().unwrap()).unwrap();

        for pem in [multi_line, single_line, bare_der, pkcs1] {
            let public_key = public_key_from_pem(&pem).unwrap();
            assert_eq!(public_key.public_key_to_der().unwrap(), expected);
        }
    }

    #[test]
    fn test_invalid_public_key() {
        public_key_from_pem("").unwrap_err();
        public_key_from_pem("-----BEGIN PUBLIC KEY-----not base64").unwrap_err();
        public_key_from_pem("-----BEGIN PUBLIC KEY-----AAAA-----END PUBLIC KEY-----").unwrap_err();
    }

    #[test]
    fn test_private_key_from_pem() {
        let private_key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();
        let pem = String::from_utf8(private_key.private_key_to_pem_pkcs8().unwrap()).unwrap();
        let parsed = private_key_from_pem(&pem).unwrap();
        assert_eq!(
            parsed.public_key_to_der().unwrap(),
            private_key.public_key_to_der().unwrap()
        );
    }
}
