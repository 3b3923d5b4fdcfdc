use std::path::PathBuf;

use clap::Parser;
use secure_session_crypto::{
    SecureSession,
    crypto::{
        encoding::{b64_decode, b64_encode},
        session_key::generate_iv,
    },
};
use serde::{Deserialize, Serialize};

use crate::{
    actions::utils::{read_payload, session_key},
    config::CliConf,
    error::result::CliResult,
};

/// The output of `encrypt`, printed as JSON.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// The base64 IV the payload was encrypted with
    pub iv: String,
    /// The base64 `ciphertext || tag` envelope
    pub envelope: String,
}

/// Encrypt a payload with AES-GCM under a session key.
///
/// The AES variant follows the session key length (24 bytes: AES-192).
/// The result is printed as a JSON object holding
///   - `iv`: the base64 IV
///   - `envelope`: the base64 concatenation of the ciphertext and the 16-byte tag
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct EncryptAction {
    /// The file to encrypt
    #[clap(name = "FILE", required_unless_present = "data")]
    input_file: Option<PathBuf>,

    /// The text to encrypt, instead of a file
    #[clap(long, short = 'd', conflicts_with = "FILE")]
    data: Option<String>,

    /// The base64 session key.
    /// Defaults to the `session_key` of the configuration.
    #[clap(long = "session-key", short = 'k')]
    session_key: Option<String>,

    /// The base64 IV; a fresh one is generated when omitted
    #[clap(long, short = 'i')]
    iv: Option<String>,
}

impl EncryptAction {
    pub fn run(&self, conf: &CliConf) -> CliResult<()> {
        let plaintext = read_payload(self.input_file.as_ref(), self.data.as_ref())?;
        let session_key = session_key(self.session_key.as_ref(), conf)?;
        let iv = match &self.iv {
            Some(iv) => b64_decode(iv)?,
            None => generate_iv().to_vec(),
        };

        // the public key plays no part in encryption
        let session = SecureSession::new(String::new(), Some(session_key.as_str().to_owned()));
        let output = EncryptedPayload {
            iv: b64_encode(&iv),
            envelope: session.encrypt(&plaintext, &iv)?,
        };
        println!("{}", serde_json::to_string(&output)?);
        Ok(())
    }
}
