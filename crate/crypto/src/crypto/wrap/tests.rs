use openssl::{pkey::PKey, rsa::Rsa};

use super::{
    AesCbcWrapper, RsaOaepWrapper, SessionKeyWrapper, unwrap_session_key,
    url_encoded_wrap_session_key, wrap_session_key,
};
use crate::{
    CryptoError,
    crypto::{
        encoding::{b64_decode, url_encode},
        rsa::ckm_rsa_pkcs_oaep::ckm_rsa_pkcs_oaep_key_unwrap,
        session_key::generate_session_key,
    },
    error::result::CryptoResult,
    openssl::HashingAlgorithm,
};

/// An RSA key pair as (private PEM, public PEM).
fn rsa_key_pair(bits: u32) -> CryptoResult<(String, String)> {
    let private_key = PKey::from_rsa(Rsa::generate(bits)?)?;
    Ok((
        String::from_utf8(private_key.private_key_to_pem_pkcs8()?)?,
        String::from_utf8(private_key.public_key_to_pem()?)?,
    ))
}

#[test]
fn test_wrap_unwrap_session_key() -> CryptoResult<()> {
    let (private_pem, public_pem) = rsa_key_pair(2048)?;
    let session_key = generate_session_key();

    let wrapped = wrap_session_key(&session_key, &public_pem)?;
    // the envelope is as long as the modulus
    assert_eq!(b64_decode(&wrapped)?.len(), 256);

    let unwrapped = unwrap_session_key(&wrapped, &private_pem)?;
    assert_eq!(unwrapped, session_key);
    Ok(())
}

#[test]
fn test_wrap_is_randomized() -> CryptoResult<()> {
    let (private_pem, public_pem) = rsa_key_pair(2048)?;
    let session_key = generate_session_key();

    let first = wrap_session_key(&session_key, &public_pem)?;
    let second = wrap_session_key(&session_key, &public_pem)?;
    assert_ne!(first, second);

    assert_eq!(unwrap_session_key(&first, &private_pem)?, session_key);
    assert_eq!(unwrap_session_key(&second, &private_pem)?, session_key);
    Ok(())
}

#[test]
fn test_wrap_encrypts_the_base64_text() -> CryptoResult<()> {
    let (private_pem, public_pem) = rsa_key_pair(2048)?;
    let session_key = generate_session_key();

    let wrapped = wrap_session_key(&session_key, &public_pem)?;
    let private_key = PKey::private_key_from_pem(private_pem.as_bytes())?;
    let recovered = ckm_rsa_pkcs_oaep_key_unwrap(
        &private_key,
        HashingAlgorithm::SHA256,
        &b64_decode(&wrapped)?,
    )?;
    // 32 characters of base64 text, not the 24 decoded bytes
    assert_eq!(recovered.len(), 32);
    assert_eq!(recovered.as_slice(), session_key.as_bytes());
    Ok(())
}

#[test]
fn test_url_encoded_wrap() -> CryptoResult<()> {
    let (private_pem, public_pem) = rsa_key_pair(2048)?;
    let session_key = generate_session_key();

    let url_encoded = url_encoded_wrap_session_key(&session_key, &public_pem)?;
    assert!(
        url_encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '%')
    );

    // percent-decoding gives back a valid envelope
    let wrapped: String = url::form_urlencoded::parse(format!("k={url_encoded}").as_bytes())
        .map(|(_, v)| v.into_owned())
        .next()
        .unwrap();
    assert_eq!(url_encode(&wrapped), url_encoded);
    assert_eq!(unwrap_session_key(&wrapped, &private_pem)?, session_key);
    Ok(())
}

#[test]
fn test_wrap_with_single_line_pem() -> CryptoResult<()> {
    let (private_pem, public_pem) = rsa_key_pair(2048)?;
    let single_line: String = public_pem.lines().collect();
    let session_key = generate_session_key();

    let wrapped = wrap_session_key(&session_key, &single_line)?;
    assert_eq!(unwrap_session_key(&wrapped, &private_pem)?, session_key);
    Ok(())
}

#[test]
fn test_wrap_invalid_public_key() {
    let session_key = generate_session_key();

    let err = wrap_session_key(&session_key, "not a key").unwrap_err();
    assert!(matches!(err, CryptoError::KeyWrap(_)), "{err}");

    let err = url_encoded_wrap_session_key(&session_key, "").unwrap_err();
    assert!(matches!(err, CryptoError::KeyWrap(_)), "{err}");

    // an EC key parses but cannot be used for RSA OAEP
    let ec_group = openssl::ec::EcGroup::from_curve_name(openssl::nid::Nid::X9_62_PRIME256V1)
        .unwrap();
    let ec_key = PKey::from_ec_key(openssl::ec::EcKey::generate(&ec_group).unwrap()).unwrap();
    let ec_pem = String::from_utf8(ec_key.public_key_to_pem().unwrap()).unwrap();
    let err = wrap_session_key(&session_key, &ec_pem).unwrap_err();
    assert!(matches!(err, CryptoError::KeyWrap(_)), "{err}");
}

#[test]
fn test_wrap_plaintext_too_large_for_key() -> CryptoResult<()> {
    // 1024 bits with SHA-256 leaves 62 bytes of plaintext
    let (_, public_pem) = rsa_key_pair(1024)?;
    let wrapper = RsaOaepWrapper::from_pem(&public_pem)?;

    wrapper.wrap(&generate_session_key())?;
    let err = wrapper.wrap(&"A".repeat(63)).unwrap_err();
    assert!(matches!(err, CryptoError::KeyWrap(_)), "{err}");
    Ok(())
}

#[test]
fn test_unwrap_with_wrong_private_key() -> CryptoResult<()> {
    let (_, public_pem) = rsa_key_pair(2048)?;
    let (other_private_pem, _) = rsa_key_pair(2048)?;

    let wrapped = wrap_session_key(&generate_session_key(), &public_pem)?;
    let err = unwrap_session_key(&wrapped, &other_private_pem).unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)), "{err}");
    Ok(())
}

#[test]
fn test_aes_cbc_wrapper() -> CryptoResult<()> {
    let session_key = generate_session_key();
    for kek_len in [16, 32] {
        let kek = vec![0x42; kek_len];
        let wrapper = AesCbcWrapper::new(&kek)?;

        let first = wrapper.wrap(&session_key)?;
        let second = wrapper.wrap(&session_key)?;
        // fresh IV per wrap
        assert_ne!(first, second);
        // 16 bytes IV + 48 bytes (32 bytes of text padded to 3 blocks)
        assert_eq!(b64_decode(&first)?.len(), 16 + 48);

        assert_eq!(wrapper.unwrap(&first)?, session_key);
        assert_eq!(wrapper.unwrap(&second)?, session_key);
    }

    let err = AesCbcWrapper::new(&[0; 24]).err().unwrap();
    assert!(matches!(err, CryptoError::KeyWrap(_)), "{err}");
    Ok(())
}

#[test]
fn test_aes_cbc_wrapper_wrong_kek() -> CryptoResult<()> {
    let session_key = generate_session_key();
    let wrapped = AesCbcWrapper::new(&[1; 32])?.wrap(&session_key)?;
    // a wrong KEK either breaks the padding or yields another key
    match AesCbcWrapper::new(&[2; 32])?.unwrap(&wrapped) {
        Ok(unwrapped) => assert_ne!(unwrapped, session_key),
        Err(err) => assert!(matches!(err, CryptoError::Decryption(_)), "{err}"),
    }

    let err = AesCbcWrapper::new(&[1; 32])?.unwrap("AAAA").unwrap_err();
    assert!(matches!(err, CryptoError::Decryption(_)), "{err}");
    Ok(())
}

#[test]
fn test_wrappers_behind_one_interface() -> CryptoResult<()> {
    let (_, public_pem) = rsa_key_pair(2048)?;
    let wrappers: Vec<Box<dyn SessionKeyWrapper>> = vec![
        Box::new(RsaOaepWrapper::from_pem(&public_pem)?),
        Box::new(AesCbcWrapper::new(&[7; 16])?),
    ];
    let session_key = generate_session_key();
    for wrapper in &wrappers {
        let wrapped = wrapper.wrap(&session_key)?;
        assert!(!wrapped.is_empty());
        let url_encoded = wrapper.url_encoded_wrap(&session_key)?;
        assert!(!url_encoded.contains('/'));
    }
    Ok(())
}
