use std::{fs, path::PathBuf};

use clap::Parser;
use secure_session_crypto::{
    SecureSession,
    crypto::encoding::{b64_decode_secret, b64_encode},
};
use secure_session_logger::debug;

use crate::{
    actions::utils::session_key,
    config::CliConf,
    error::result::{CliResult, CliResultHelper},
};

/// Decrypt an AES-GCM envelope with a session key.
///
/// The plaintext is printed base64 encoded, or written raw to `--output-file`.
/// With `--card-data`, the trailing 16-byte block the counterparty appends to
/// card data is dropped (plaintexts of 16 bytes or less are kept whole).
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct DecryptAction {
    /// The base64 envelope to decrypt
    #[clap(required = true, name = "ENVELOPE")]
    envelope: String,

    /// The base64 IV the envelope was encrypted with
    #[clap(long, short = 'i', required = true)]
    iv: String,

    /// The base64 session key.
    /// Defaults to the `session_key` of the configuration.
    #[clap(long = "session-key", short = 'k')]
    session_key: Option<String>,

    /// Treat the plaintext as card data returned by the counterparty
    #[clap(long = "card-data", default_value = "false")]
    card_data: bool,

    /// Write the raw plaintext to this file
    #[clap(long = "output-file", short = 'o')]
    output_file: Option<PathBuf>,
}

impl DecryptAction {
    pub fn run(&self, conf: &CliConf) -> CliResult<()> {
        let session_key = session_key(self.session_key.as_ref(), conf)?;
        let session = SecureSession::new(String::new(), Some(session_key.as_str().to_owned()));

        let plaintext = if self.card_data {
            session.decrypt_card_data(&self.iv, &self.envelope)?
        } else {
            // the session hands the plaintext back base64 encoded
            b64_decode_secret(&session.decrypt(&self.iv, &self.envelope)?)?
        };
        debug!("recovered {} bytes", plaintext.len());

        match &self.output_file {
            Some(output_file) => {
                fs::write(output_file, plaintext.as_slice()).with_context(|| {
                    format!("failed to write the plaintext to {}", output_file.display())
                })?;
                println!(
                    "The decrypted data is available at {}",
                    output_file.display()
                );
            }
            None => println!("{}", b64_encode(&plaintext)),
        }
        Ok(())
    }
}
