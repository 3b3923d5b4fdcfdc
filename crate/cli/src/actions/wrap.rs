use std::path::PathBuf;

use clap::Parser;
use secure_session_crypto::SecureSession;
use secure_session_logger::debug;

use crate::{
    actions::utils::{read_pem, session_key},
    config::CliConf,
    error::result::CliResult,
};

/// Wrap a session key under the counterparty RSA public key.
///
/// The base64 text of the session key is encrypted with RSA-OAEP SHA-256 and
/// the result printed base64 encoded, or percent-encoded with `--url-encoded`.
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct WrapAction {
    /// The base64 session key to wrap.
    /// Defaults to the `session_key` of the configuration.
    #[clap(long = "session-key", short = 'k')]
    session_key: Option<String>,

    /// The PEM file of the counterparty public key.
    /// Defaults to the `public_key_file` of the configuration.
    #[clap(long = "public-key-file", short = 'p')]
    public_key_file: Option<PathBuf>,

    /// Percent-encode the wrapped key for use in a URL or a header
    #[clap(long = "url-encoded", short = 'u', default_value = "false")]
    url_encoded: bool,
}

impl WrapAction {
    pub fn run(&self, conf: &CliConf) -> CliResult<()> {
        let public_key = read_pem(
            self.public_key_file.as_ref(),
            conf.public_key_file.as_ref(),
            "public key",
        )?;
        let session_key = session_key(self.session_key.as_ref(), conf)?;
        let session = SecureSession::new(public_key, Some(session_key.as_str().to_owned()));

        let wrapped = if self.url_encoded {
            session.url_encoded_session_key()?
        } else {
            session.wrap_session_key()?
        };
        debug!("session key wrapped, url encoded: {}", self.url_encoded);
        println!("{wrapped}");
        Ok(())
    }
}
