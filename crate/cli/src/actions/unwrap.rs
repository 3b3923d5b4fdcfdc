use std::path::PathBuf;

use clap::Parser;
use secure_session_crypto::crypto::wrap::unwrap_session_key;

use crate::{actions::utils::read_pem, config::CliConf, error::result::CliResult};

/// Recover a wrapped session key with the counterparty RSA private key.
///
/// This is the receiving end of `wrap`; it prints the base64 session key.
#[derive(Parser, Debug)]
#[clap(verbatim_doc_comment)]
pub struct UnwrapAction {
    /// The base64 wrapped session key
    #[clap(required = true, name = "WRAPPED_KEY")]
    wrapped_key: String,

    /// The PEM file of the counterparty private key.
    /// Defaults to the `private_key_file` of the configuration.
    #[clap(long = "private-key-file", short = 'p')]
    private_key_file: Option<PathBuf>,
}

impl UnwrapAction {
    pub fn run(&self, conf: &CliConf) -> CliResult<()> {
        let private_key = read_pem(
            self.private_key_file.as_ref(),
            conf.private_key_file.as_ref(),
            "private key",
        )?;
        let session_key = unwrap_session_key(&self.wrapped_key, &private_key)?;
        println!("{session_key}");
        Ok(())
    }
}
